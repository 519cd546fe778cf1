use std::sync::LazyLock;
use std::time::Duration;

/// Global HTTP client instance shared by all outbound gateway calls.
///
/// Initialized lazily on first access and reused across the application,
/// so TCP connections to the vendor API are pooled instead of re-opened
/// per request. Per-request timeouts from `GatewayConfig` override the
/// defaults set here.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // Security
        .use_rustls_tls()
        .build()
        .expect("Failed to build HTTP client")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_initializes_without_panicking() {
        let _ = &*HTTP_CLIENT;
    }
}
