use thiserror::Error;

/// Why a publish attempt did not produce a live post
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("An image is required to publish to Instagram")]
    MissingImage,

    #[error("Image URL must be an absolute http(s) URL")]
    InvalidImageUrl(String),

    /// Step A was rejected by the platform; nothing was created
    #[error("Failed to create media container: {0}")]
    ContainerCreationFailed(String),

    /// Step B was rejected; the container from step A is left unpublished
    #[error("Failed to publish media container: {message}")]
    PublishFailed {
        container_id: String,
        message: String,
    },

    /// The call did not complete or its response was unreadable. In step B
    /// the container from step A is carried along.
    #[error("Instagram API request failed: {message}")]
    Transport {
        message: String,
        container_id: Option<String>,
    },
}

impl PublishError {
    pub(crate) fn transport(message: impl Into<String>) -> Self {
        PublishError::Transport {
            message: message.into(),
            container_id: None,
        }
    }

    /// Attach the container a failed publish step was working on.
    pub(crate) fn with_container(self, container: &str) -> Self {
        match self {
            PublishError::Transport { message, .. } => PublishError::Transport {
                message,
                container_id: Some(container.to_string()),
            },
            other => other,
        }
    }

    /// Container left behind by a failed publish step, if any
    pub fn orphaned_container(&self) -> Option<&str> {
        match self {
            PublishError::PublishFailed { container_id, .. } => Some(container_id),
            PublishError::Transport { container_id, .. } => container_id.as_deref(),
            _ => None,
        }
    }
}
