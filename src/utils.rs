use std::sync::mpsc;

use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Run `fut` on the shared runtime and hand its output back to the calling thread.
pub fn run_async_to_main<T, Fut>(fut: Fut) -> mpsc::Receiver<T>
where
    T: Send + 'static,
    Fut: std::future::Future<Output = T> + Send + 'static,
{
    let (tx, rx) = mpsc::channel::<T>();
    RUNTIME.spawn(async move {
        let _ = tx.send(fut.await);
    });
    rx
}

/// Local servers are usually plain HTTP, so that is the default scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
