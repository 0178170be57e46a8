//! Instagram Graph API content publishing
//!
//! Publishing is two sequential calls against the business account:
//!
//! 1. `POST /{account_id}/media` with `image_url` and `caption` creates a media
//!    container and returns its id.
//! 2. `POST /{account_id}/media_publish` with `creation_id` publishes that
//!    container and returns the id of the live post.
//!
//! The platform reports rejections as `{"error": {"message": ...}}`, usually
//! with a 4xx status. Step B never runs when step A fails. A failure in step B
//! leaves the container unpublished on the platform; it is logged, not cleaned up.

use anyhow::{Context, Result};
use backoffice_core::InstagramConfig;
use serde::Deserialize;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::{Duration, Instant};

use crate::error::PublishError;

/// Thin Graph API client holding the account credentials and connection pool
#[derive(Clone)]
pub struct GraphApiClient {
    http_client: reqwest::Client,
    api_base: String,
    account_id: String,
    access_token: String,
}

impl Debug for GraphApiClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GraphApiClient")
            .field("api_base", &self.api_base)
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// A post that went live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedMedia {
    /// Platform id of the published post
    pub remote_id: String,
    /// Container the post was published from
    pub container_id: String,
}

// Graph API structures
#[derive(Debug, Deserialize)]
struct GraphResponse {
    id: Option<String>,
    error: Option<GraphError>,
}

#[derive(Debug, Deserialize)]
struct GraphError {
    message: String,
}

/// What a single Graph API call came back with
enum GraphOutcome {
    Created(String),
    Rejected(String),
}

impl GraphApiClient {
    pub fn new(config: &InstagramConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client for the Instagram Graph API")?;

        Ok(Self {
            http_client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            account_id: config.account_id.clone(),
            access_token: config.access_token.clone(),
        })
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// POST an edge of the account with query parameters, appending the access token
    async fn post_edge(
        &self,
        edge: &str,
        params: &[(&str, &str)],
    ) -> Result<GraphOutcome, PublishError> {
        let url = format!("{}/{}/{}", self.api_base, self.account_id, edge);

        let mut query: Vec<(&str, &str)> = params.to_vec();
        query.push(("access_token", self.access_token.as_str()));

        let response = self
            .http_client
            .post(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| PublishError::transport(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PublishError::transport(e.without_url().to_string()))?;

        let parsed: GraphResponse = serde_json::from_str(&body).map_err(|_| {
            PublishError::transport(format!("unexpected response from {} ({})", edge, status))
        })?;

        if let Some(error) = parsed.error {
            return Ok(GraphOutcome::Rejected(error.message));
        }

        match parsed.id {
            Some(id) if status.is_success() && !id.is_empty() => Ok(GraphOutcome::Created(id)),
            _ => Err(PublishError::transport(format!(
                "response from {} ({}) carried neither an id nor an error",
                edge, status
            ))),
        }
    }
}

/// The platform fetches the image itself, so it needs an http(s) URL with a host.
fn is_absolute_web_url(raw: &str) -> bool {
    match reqwest::Url::parse(raw) {
        Ok(url) => {
            matches!(url.scheme(), "https" | "http")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Step A: create a media container for a public image.
///
/// Returns the container id.
pub async fn create_container(
    client: &GraphApiClient,
    image_url: &str,
    caption: &str,
) -> Result<String, PublishError> {
    let outcome = client
        .post_edge("media", &[("image_url", image_url), ("caption", caption)])
        .await?;

    match outcome {
        GraphOutcome::Created(container_id) => Ok(container_id),
        GraphOutcome::Rejected(message) => Err(PublishError::ContainerCreationFailed(message)),
    }
}

/// Step B: publish a previously created container.
///
/// Returns the id of the live post.
pub async fn publish_container(
    client: &GraphApiClient,
    container_id: &str,
) -> Result<String, PublishError> {
    let outcome = client
        .post_edge("media_publish", &[("creation_id", container_id)])
        .await
        .map_err(|e| e.with_container(container_id))?;

    match outcome {
        GraphOutcome::Created(remote_id) => Ok(remote_id),
        GraphOutcome::Rejected(message) => Err(PublishError::PublishFailed {
            container_id: container_id.to_string(),
            message,
        }),
    }
}

/// Publish an image with a caption, running both steps in order.
#[tracing::instrument(
    skip(client, caption),
    fields(account_id = %client.account_id(), caption_len = caption.len())
)]
pub async fn publish(
    client: &GraphApiClient,
    caption: &str,
    image_url: &str,
) -> Result<PublishedMedia, PublishError> {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        return Err(PublishError::MissingImage);
    }
    if !is_absolute_web_url(image_url) {
        return Err(PublishError::InvalidImageUrl(image_url.to_string()));
    }

    let start = Instant::now();

    let container_id = match create_container(client, image_url, caption).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "Instagram media container creation failed"
            );
            return Err(e);
        }
    };

    tracing::debug!(container_id = %container_id, "Instagram media container created");

    match publish_container(client, &container_id).await {
        Ok(remote_id) => {
            tracing::info!(
                container_id = %container_id,
                instagram_post_id = %remote_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "Published to Instagram"
            );
            Ok(PublishedMedia {
                remote_id,
                container_id,
            })
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                container_id = %container_id,
                duration_ms = start.elapsed().as_millis() as u64,
                "Instagram publish failed, media container left unpublished"
            );
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const ACCOUNT_ID: &str = "17841400000000000";
    const IMAGE_URL: &str = "https://association-uploads.s3.eu-west-3.amazonaws.com/abc123";

    fn client_for(server: &Server) -> GraphApiClient {
        GraphApiClient::new(&InstagramConfig {
            access_token: "test-token".to_string(),
            account_id: ACCOUNT_ID.to_string(),
            api_base: server.url(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn media_path() -> String {
        format!("/{}/media", ACCOUNT_ID)
    }

    fn media_publish_path() -> String {
        format!("/{}/media_publish", ACCOUNT_ID)
    }

    #[tokio::test]
    async fn publishes_container_created_in_step_a() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("image_url".into(), IMAGE_URL.into()),
                Matcher::UrlEncoded("caption".into(), "Title\n\nBody".into()),
                Matcher::UrlEncoded("access_token".into(), "test-token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"17895698586"}"#)
            .expect(1)
            .create_async()
            .await;
        let publish_mock = server
            .mock("POST", media_publish_path().as_str())
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("creation_id".into(), "17895698586".into()),
                Matcher::UrlEncoded("access_token".into(), "test-token".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"17895698999"}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let published = publish(&client, "Title\n\nBody", IMAGE_URL).await.unwrap();

        assert_eq!(published.remote_id, "17895698999");
        assert_eq!(published.container_id, "17895698586");
        create.assert_async().await;
        publish_mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_image_makes_no_remote_call() {
        let mut server = Server::new_async().await;
        let any_call = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        for image_url in ["", "   "] {
            let err = publish(&client, "caption", image_url).await.unwrap_err();
            assert_eq!(err, PublishError::MissingImage);
        }
        any_call.assert_async().await;
    }

    #[tokio::test]
    async fn relative_image_url_is_rejected_locally() {
        let mut server = Server::new_async().await;
        let any_call = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", "/uploads/abc123").await.unwrap_err();
        assert!(matches!(err, PublishError::InvalidImageUrl(_)));
        any_call.assert_async().await;
    }

    #[tokio::test]
    async fn unparseable_image_urls_are_rejected_locally() {
        let mut server = Server::new_async().await;
        let any_call = server
            .mock("POST", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        for image_url in [
            "https://",
            "http://exa mple/x y",
            "ftp://files.example.org/a.png",
            "data:image/png;base64,iVBORw0KGgo=",
        ] {
            let err = publish(&client, "caption", image_url).await.unwrap_err();
            assert_eq!(err, PublishError::InvalidImageUrl(image_url.to_string()));
        }
        any_call.assert_async().await;
    }

    #[tokio::test]
    async fn container_failure_skips_publish_step() {
        let mut server = Server::new_async().await;
        let create = server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"error":{"message":"Only photo or video can be accepted as media type.","type":"OAuthException","code":9004}}"#,
            )
            .expect(1)
            .create_async()
            .await;
        let publish_mock = server
            .mock("POST", media_publish_path().as_str())
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();

        assert_eq!(
            err,
            PublishError::ContainerCreationFailed(
                "Only photo or video can be accepted as media type.".to_string()
            )
        );
        assert!(err.to_string().starts_with("Failed to create media container: "));
        create.assert_async().await;
        publish_mock.assert_async().await;
    }

    #[tokio::test]
    async fn publish_failure_reports_forwarded_container() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id":"17895698586"}"#)
            .create_async()
            .await;
        let publish_mock = server
            .mock("POST", media_publish_path().as_str())
            .match_query(Matcher::UrlEncoded(
                "creation_id".into(),
                "17895698586".into(),
            ))
            .with_status(400)
            .with_body(r#"{"error":{"message":"Media ID is not available"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();

        assert_eq!(
            err,
            PublishError::PublishFailed {
                container_id: "17895698586".to_string(),
                message: "Media ID is not available".to_string(),
            }
        );
        assert_eq!(err.orphaned_container(), Some("17895698586"));
        publish_mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_json_response_is_a_transport_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();
        assert!(matches!(err, PublishError::Transport { .. }));
    }

    #[tokio::test]
    async fn publish_step_gateway_error_keeps_container_id() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"id":"17895698586"}"#)
            .create_async()
            .await;
        let publish_mock = server
            .mock("POST", media_publish_path().as_str())
            .match_query(Matcher::Any)
            .with_status(502)
            .with_header("content-type", "text/html")
            .with_body("<html>Bad Gateway</html>")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();

        assert!(matches!(err, PublishError::Transport { .. }));
        assert_eq!(err.orphaned_container(), Some("17895698586"));
        assert_eq!(
            err.to_string(),
            "Instagram API request failed: unexpected response from media_publish (502 Bad Gateway)"
        );
        publish_mock.assert_async().await;
    }

    #[tokio::test]
    async fn step_a_transport_error_leaves_no_container() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();
        assert_eq!(err.orphaned_container(), None);
    }

    #[tokio::test]
    async fn response_without_id_or_error_is_a_transport_error() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", media_path().as_str())
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = create_container(&client, IMAGE_URL, "caption")
            .await
            .unwrap_err();
        assert!(matches!(err, PublishError::Transport { .. }));
    }

    #[tokio::test]
    async fn unreachable_api_is_a_transport_error() {
        let client = GraphApiClient::new(&InstagramConfig {
            access_token: "test-token".to_string(),
            account_id: ACCOUNT_ID.to_string(),
            api_base: "http://127.0.0.1:1".to_string(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = publish(&client, "caption", IMAGE_URL).await.unwrap_err();
        assert!(matches!(err, PublishError::Transport { .. }));
        assert!(err.to_string().starts_with("Instagram API request failed: "));
    }

    #[test]
    fn debug_output_hides_access_token() {
        let client = GraphApiClient::new(&InstagramConfig {
            access_token: "very-secret-token".to_string(),
            account_id: ACCOUNT_ID.to_string(),
            api_base: "https://graph.facebook.com/v19.0/".to_string(),
            timeout_secs: 30,
        })
        .unwrap();
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("very-secret-token"));
        assert!(rendered.contains("https://graph.facebook.com/v19.0\""));
    }
}
