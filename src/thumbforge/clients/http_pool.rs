//! Shared HTTP clients, one per base URL.
//!
//! Reusing a `reqwest::Client` keeps its connection pool warm, so repeated generations skip
//! DNS lookups and TLS handshakes. Clients are configured with:
//! - `pool_idle_timeout`: idle connections kept for 90 seconds
//! - `pool_max_idle_per_host`: up to 10 idle connections per host
//! - `tcp_keepalive`: keepalive probes every 60 seconds
//! - `connect_timeout`: 30 seconds to establish a connection
//!
//! Whole-request timeouts are set per request by the caller.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

lazy_static! {
    static ref HTTP_CLIENT_POOL: Mutex<HashMap<String, reqwest::Client>> =
        Mutex::new(HashMap::new());
}

/// Get or create the shared client for `base_url`.
pub fn get_http_client(base_url: &str) -> Result<reqwest::Client, reqwest::Error> {
    // a poisoned lock only means another thread panicked mid-insert; the map is still usable
    let mut pool = HTTP_CLIENT_POOL
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(client) = pool.get(base_url) {
        return Ok(client.clone());
    }

    let client = reqwest::ClientBuilder::new()
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .pool_max_idle_per_host(10)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .connect_timeout(Duration::from_secs(30))
        .build()?;

    log::debug!("created pooled HTTP client for {}", base_url);
    pool.insert(base_url.to_string(), client.clone());
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_keeps_one_entry_per_base_url() {
        let url = "https://pool-test.example.com/v1beta";
        get_http_client(url).unwrap();
        get_http_client(url).unwrap();
        get_http_client("https://other-pool-test.example.com").unwrap();

        let pool = HTTP_CLIENT_POOL.lock().unwrap();
        assert_eq!(pool.keys().filter(|k| k.as_str() == url).count(), 1);
        assert!(pool.contains_key("https://other-pool-test.example.com"));
    }
}
