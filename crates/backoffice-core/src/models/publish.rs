use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to republish a news item on Instagram
///
/// Either a pre-composed `caption` or the news `title` and `content` must be
/// supplied.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishToInstagramRequest {
    /// News item id, used for logging only
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(length(max = 500, message = "Title must be at most 500 characters"))]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    #[validate(length(max = 2200, message = "Caption must be at most 2200 characters"))]
    pub caption: Option<String>,
    /// Public URL of the already uploaded image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Outcome of a publish attempt: `{ success, instagramPostId?, error? }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublishResponse {
    pub fn published(instagram_post_id: impl Into<String>) -> Self {
        Self {
            success: true,
            instagram_post_id: Some(instagram_post_id.into()),
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            instagram_post_id: None,
            error: Some(reason.into()),
        }
    }
}
