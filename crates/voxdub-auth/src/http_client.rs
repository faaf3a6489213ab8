use std::time::Duration;

use reqwest::Client;

/// Build the pooled HTTP client shared by all Google service clients
///
/// Built once at startup and cloned into each provider, so the three
/// upstream APIs reuse the same connection pool.
pub fn http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(30)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .build()
}
