use once_cell::sync::Lazy;

pub static RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to build Tokio runtime")
});

/// Runs a future to completion on the shared runtime.
pub fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    RUNTIME.block_on(fut)
}

pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adds_scheme_and_drops_trailing_slash() {
        assert_eq!(normalize_url(" meeds.io/ "), "https://meeds.io");
        assert_eq!(normalize_url("http://localhost:8080"), "http://localhost:8080");
    }

    #[test]
    fn block_on_drives_futures() {
        assert_eq!(block_on(async { 21 * 2 }), 42);
    }
}
