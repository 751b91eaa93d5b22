use std::time::Duration;

use crate::core::errors::{Result, TrustctlError};
use crate::core::models::delegation_role::DelegationRole;
use crate::core::traits::transport::Transport;

/// Timeout for a delegation state fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches signed delegation state from a remote trust server over
/// HTTPS. The server is expected to serve the current delegation roles
/// for a GUN as a JSON array at `/v1/<gun>/_trust/delegations.json`.
pub struct HttpTransport {
    server: String,
}

impl HttpTransport {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
        }
    }

    fn transport_error(&self, detail: String) -> TrustctlError {
        TrustctlError::Transport {
            server: self.server.clone(),
            detail,
        }
    }
}

impl Transport for HttpTransport {
    fn fetch_delegation_roles(&self, gun: &str) -> Result<Vec<DelegationRole>> {
        let url = format!("{}/v1/{}/_trust/delegations.json", self.server, gun);

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| self.transport_error(format!("failed to create async runtime: {e}")))?;

        rt.block_on(async {
            let client = reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .user_agent(format!("trustctl/{}", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| self.transport_error(format!("failed to create HTTP client: {e}")))?;

            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|e| self.transport_error(e.to_string()))?;

            if !response.status().is_success() {
                return Err(
                    self.transport_error(format!("server returned {} for {url}", response.status()))
                );
            }

            response
                .json::<Vec<DelegationRole>>()
                .await
                .map_err(|e| self.transport_error(format!("invalid delegation state: {e}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let t = HttpTransport::new("https://trust.example.com/");
        assert_eq!(t.server, "https://trust.example.com");
    }

    #[test]
    fn unreachable_server_surfaces_a_transport_error() {
        // Port 1 on loopback refuses the connection immediately.
        let t = HttpTransport::new("http://127.0.0.1:1");
        let err = t.fetch_delegation_roles("my-gun").unwrap_err();
        assert!(matches!(err, TrustctlError::Transport { .. }));
    }
}
