use std::time::Duration;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::{
    ADMIN_SECRET_HEADER, ApiError, ApiResult, AuthRequest, AuthResponse, Backend, ITEMS_PATH, Item,
    USERS_PATH, UserList, UserSummary,
};
use crate::config::Config;

/// Standard User-Agent header for tales requests.
pub const USER_AGENT: &str = concat!("tales/", env!("CARGO_PKG_VERSION"));

/// reqwest-backed [`Backend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    /// Creates a client for `base_url` (no trailing slash expected).
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Creates a client from the resolved config values.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let base_url = config.effective_base_url()?;
        Self::new(base_url, config.request_timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Sends a request and decodes a JSON body, mapping every failure to `ApiError`.
async fn send_json<T: DeserializeOwned>(builder: reqwest::RequestBuilder) -> ApiResult<T> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(ApiError::http_status(status.as_u16(), &body));
    }

    serde_json::from_str(&body).map_err(|e| ApiError::parse(format!("Invalid response body: {e}")))
}

impl Backend for BackendClient {
    async fn list_items(&self) -> ApiResult<Vec<Item>> {
        let url = self.url(ITEMS_PATH);
        tracing::debug!(%url, "fetching items");
        send_json(self.http.get(url)).await
    }

    async fn get_item(&self, id: i64) -> ApiResult<Item> {
        let url = format!("{}/{id}", self.url(ITEMS_PATH));
        tracing::debug!(%url, "fetching item");
        send_json(self.http.get(url)).await
    }

    async fn authenticate(&self, request: &AuthRequest) -> ApiResult<AuthResponse> {
        let url = self.url(request.action.path());
        tracing::debug!(%url, action = %request.action, "sending auth request");
        send_json(self.http.post(url).json(&request.credentials)).await
    }

    async fn list_users(&self, admin_secret: &str) -> ApiResult<Vec<UserSummary>> {
        let url = self.url(USERS_PATH);
        tracing::debug!(%url, "listing users");
        let list: UserList =
            send_json(self.http.get(url).header(ADMIN_SECRET_HEADER, admin_secret)).await?;
        Ok(list.users)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::{ApiErrorKind, AuthAction, Credentials};

    fn client(server: &MockServer) -> BackendClient {
        BackendClient::new(server.uri(), None).unwrap()
    }

    fn login_request() -> AuthRequest {
        AuthRequest {
            action: AuthAction::Login,
            seq: 1,
            credentials: Credentials {
                phone: "1234567890".to_string(),
                password: "secret".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_list_items_decodes_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "First Item", "description": "This is the first item"},
                {"id": 2, "name": "Second Item"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let items = client(&server).list_items().await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "First Item");
        assert_eq!(items[1].description, None);
    }

    #[tokio::test]
    async fn test_list_items_malformed_payload_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client(&server).list_items().await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Parse);
    }

    #[tokio::test]
    async fn test_get_item_not_found_carries_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/items/42"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Item not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server).get_item(42).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::HttpStatus(404));
        assert_eq!(err.detail.as_deref(), Some("Item not found"));
    }

    #[tokio::test]
    async fn test_authenticate_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"phone": "1234567890", "password": "secret"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"token": "demo-token-1234567890"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let resp = client(&server).authenticate(&login_request()).await.unwrap();
        assert_eq!(resp.token, "demo-token-1234567890");
    }

    #[tokio::test]
    async fn test_list_users_sends_admin_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/users"))
            .and(header("X-Admin-Secret", "devsecret"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"users": [{"phone": "1234567890"}]})),
            )
            .mount(&server)
            .await;

        let users = client(&server).list_users("devsecret").await.unwrap();
        assert_eq!(users, vec![UserSummary {
            phone: "1234567890".to_string()
        }]);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // Bind then drop a server so the port is (very likely) closed.
        let uri = {
            let server = MockServer::start().await;
            server.uri()
        };
        let client = BackendClient::new(uri, Some(Duration::from_secs(2))).unwrap();

        let err = client.list_items().await.unwrap_err();
        assert!(matches!(
            err.kind,
            ApiErrorKind::Network | ApiErrorKind::Timeout
        ));
    }
}
