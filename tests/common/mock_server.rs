//! Mock origin server for testing image fetching.

use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use faas_fixtures::models::{AppConfig, OriginConfig};

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockOrigin {
    pub server: MockServer,
}

impl MockOrigin {
    /// Start a new mock origin
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Host and port of the mock origin, as sent in a `Host` header
    pub fn host(&self) -> String {
        self.server.address().to_string()
    }

    /// Origin config pointing at this server over plain HTTP
    pub fn origin_config(&self) -> OriginConfig {
        OriginConfig {
            scheme: "http".to_string(),
            host: Some(self.host()),
        }
    }

    /// Application config pointing at this server
    pub fn app_config(&self) -> AppConfig {
        AppConfig {
            origin: self.origin_config(),
        }
    }

    /// Mock a GET endpoint returning PNG bytes
    pub async fn mock_png(&self, endpoint: &str, png: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(png)
                    .insert_header("content-type", "image/png"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a GET endpoint returning HTML
    pub async fn mock_html(&self, endpoint: &str, html: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(html)
                    .insert_header("content-type", "text/html"),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock an endpoint that returns an error
    pub async fn mock_error(&self, endpoint: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// Paths requested so far, in order
    pub async fn requested_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}
