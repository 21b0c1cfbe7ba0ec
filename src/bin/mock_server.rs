//! Local Museume backend backed by in-memory fixtures.
//!
//! Point the client at it with
//! `MUSEUME_API_BASE_URL=http://127.0.0.1:8000/api MUSEUME_API_TOKEN=mock-member-token`.
//! Host and port come from `MOCK_API_HOST` / `MOCK_API_PORT`.

use museume::mock_api::{MockRestApiConfig, MockRestApiServer, MOCK_TOKEN};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    museume::telemetry::init_tracing()?;

    let mut config = MockRestApiConfig::default();
    if let Ok(host) = std::env::var("MOCK_API_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("MOCK_API_PORT") {
        config.port = port.parse()?;
    }

    info!("Mock member token: {}", MOCK_TOKEN);
    MockRestApiServer::new(config).start().await
}
