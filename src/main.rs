use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use dioxus::prelude::*;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

mod app;
mod domain;
mod infra;
mod platform;
mod usecase;

use app::DynamicTable;
use domain::entities::shortcuts::ShortcutSet;

/// CSV source fetched by the first table instance at startup.
const PRIMARY_SOURCE: &str = "ddbb3.csv";
/// CSV source fetched by the second table instance at startup.
const SECONDARY_SOURCE: &str = "022025.csv";

fn primary_shortcuts() -> ShortcutSet {
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

fn secondary_shortcuts() -> ShortcutSet {
    ShortcutSet {
        search: 'g',
        save: 'v',
        copy_first: 'j',
        clear: 'b',
        lot2: 'n',
        delete: 'e',
        undo: 'r',
        select_all: 'q',
        update: 'w',
        copy_selected: 't',
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let webview_data_dir =
        default_webview_data_dir().expect("should resolve and create webview data directory");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(dioxus::desktop::WindowBuilder::new().with_title("lotview"))
                .with_data_directory(webview_data_dir),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        div {
            DynamicTable {
                table_id: "1",
                source: PRIMARY_SOURCE,
                shortcuts: primary_shortcuts(),
            }
            DynamicTable {
                table_id: "2",
                source: SECONDARY_SOURCE,
                shortcuts: secondary_shortcuts(),
            }
        }
    }
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

fn default_webview_data_dir() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from("com", "lotview", "lotview")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))?;
    ensure_webview_data_dir(project_dirs.data_local_dir())
}
