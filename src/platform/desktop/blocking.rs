/// Runs a blocking closure on a dedicated thread and waits for it.
///
/// Blocking reqwest clients refuse to run inside an async runtime, and the
/// dioxus desktop components execute on one, so network and filesystem loads
/// go through here.
pub fn run_blocking<F, T>(f: F) -> T
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    std::thread::scope(|scope| match scope.spawn(f).join() {
        Ok(value) => value,
        Err(payload) => std::panic::resume_unwind(payload),
    })
}
