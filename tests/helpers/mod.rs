//! Shared setup for integration tests: an in-process mock backend and a
//! dispatcher pointed at it.

#![allow(dead_code)]

use museume::mock_api::{MockAppState, MockData, MockRestApiConfig, MockRestApiServer, MOCK_TOKEN};
use museume::notify::{Toast, ToastSeverity};
use museume::store::Store;
use museume::{ApiClient, ClientConfig, Dispatcher};

pub struct TestBackend {
    pub dispatcher: Dispatcher,
    pub state: MockAppState,
}

/// Backend with default fixtures, paging two records at a time.
pub async fn spawn_backend() -> TestBackend {
    spawn_backend_with(MockData::new(), 2).await
}

pub async fn spawn_backend_with(data: MockData, page_size: usize) -> TestBackend {
    let server = MockRestApiServer::with_data(
        MockRestApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            page_size,
        },
        data,
    );
    let state = server.state();
    let addr = server.spawn().await.expect("mock backend should bind");

    let config = ClientConfig::new(&format!("http://{}/api", addr))
        .expect("valid base url")
        .with_token(MOCK_TOKEN);
    let api = ApiClient::new(config).expect("client builds");

    TestBackend {
        dispatcher: Dispatcher::new(api, Store::new()),
        state,
    }
}

/// Dispatcher without a token against the same backend.
pub fn anonymous(backend: &TestBackend) -> Dispatcher {
    let mut config = backend.dispatcher.api().config().clone();
    config.token = None;
    Dispatcher::new(ApiClient::new(config).expect("client builds"), Store::new())
}

pub fn toasts_of(toasts: &[Toast], severity: ToastSeverity) -> Vec<String> {
    toasts
        .iter()
        .filter(|t| t.severity == severity)
        .map(|t| t.message.clone())
        .collect()
}
