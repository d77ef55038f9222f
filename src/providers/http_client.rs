// ABOUTME: Pooled HTTP client shared by every provider adapter
// ABOUTME: Built once from server configuration with an identifying user agent
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::ServerConfig;
use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;

/// Upstream food databases ask clients to identify themselves; Open Food
/// Facts in particular throttles anonymous default agents.
const USER_AGENT: &str = concat!("nutrihub/", env!("CARGO_PKG_VERSION"));

/// Global shared HTTP client for provider API calls
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

fn build_client(config: &ServerConfig) -> Client {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Install the shared client using the server's outbound timeout settings.
///
/// Called once at startup, before the registry probes readiness; the first
/// installation wins.
pub fn initialize_shared_client(config: &ServerConfig) {
    let _ = SHARED_CLIENT.set(build_client(config));
}

/// The shared HTTP client for provider API calls.
///
/// Falls back to `ServerConfig` defaults when
/// [`initialize_shared_client`] was never called, which keeps adapters
/// usable in tests without startup wiring.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| build_client(&ServerConfig::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_client_is_built_once() {
        let first: *const Client = shared_client();
        let second: *const Client = shared_client();
        assert_eq!(first, second);
    }
}
