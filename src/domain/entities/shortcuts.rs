/// Operations that can be bound to a Ctrl+<key> shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    FocusSearch,
    SaveFirstColumn,
    CopyFirstCell,
    Clear,
    CopyLot2,
    DeleteSelected,
    UndoDelete,
    SelectAll,
    ApplyResult,
    CopySelectedSummary,
}

/// Per-instance shortcut configuration. Each table instance carries its own
/// set so two tables can coexist without their bindings colliding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutSet {
    pub search: char,
    pub save: char,
    pub copy_first: char,
    pub clear: char,
    pub lot2: char,
    pub delete: char,
    pub undo: char,
    pub select_all: char,
    pub update: char,
    pub copy_selected: char,
}

impl ShortcutSet {
    pub fn action_for(&self, key: char) -> Option<TableAction> {
        let bindings = [
            (self.search, TableAction::FocusSearch),
            (self.save, TableAction::SaveFirstColumn),
            (self.copy_first, TableAction::CopyFirstCell),
            (self.clear, TableAction::Clear),
            (self.lot2, TableAction::CopyLot2),
            (self.delete, TableAction::DeleteSelected),
            (self.undo, TableAction::UndoDelete),
            (self.select_all, TableAction::SelectAll),
            (self.update, TableAction::ApplyResult),
            (self.copy_selected, TableAction::CopySelectedSummary),
        ];
        bindings
            .iter()
            .find(|(bound, _)| *bound == key)
            .map(|(_, action)| *action)
    }

    /// Button-label hint such as `Ctrl+F`.
    pub fn hint(key: char) -> String {
        format!("Ctrl+{}", key.to_ascii_uppercase())
    }

    pub fn keys(&self) -> [char; 10] {
        [
            self.search,
            self.save,
            self.copy_first,
            self.clear,
            self.lot2,
            self.delete,
            self.undo,
            self.select_all,
            self.update,
            self.copy_selected,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ShortcutSet {
        ShortcutSet {
            search: 'f',
            save: 'c',
            copy_first: 'h',
            clear: 'x',
            lot2: 'z',
            delete: 'd',
            undo: 'u',
            select_all: 'a',
            update: 's',
            copy_selected: 'y',
        }
    }

    #[test]
    fn action_for_maps_each_bound_key() {
        let shortcuts = sample();

        assert_eq!(shortcuts.action_for('f'), Some(TableAction::FocusSearch));
        assert_eq!(shortcuts.action_for('d'), Some(TableAction::DeleteSelected));
        assert_eq!(shortcuts.action_for('u'), Some(TableAction::UndoDelete));
        assert_eq!(
            shortcuts.action_for('y'),
            Some(TableAction::CopySelectedSummary)
        );
    }

    #[test]
    fn action_for_ignores_unbound_keys() {
        assert_eq!(sample().action_for('q'), None);
        assert_eq!(sample().action_for('F'), None);
    }

    #[test]
    fn hint_upper_cases_the_key() {
        assert_eq!(ShortcutSet::hint('f'), "Ctrl+F");
    }
}
