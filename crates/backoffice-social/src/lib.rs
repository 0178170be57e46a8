//! Backoffice Social Library
//!
//! Republishes news items on Instagram through the Graph API content
//! publishing flow: create a media container for a public image, then publish
//! that container. Every failure is normalized into [`PublishError`].

pub mod caption;
pub mod error;
pub mod instagram;

pub use caption::{compose_caption, resolve_caption};
pub use error::PublishError;
pub use instagram::{create_container, publish, publish_container, GraphApiClient, PublishedMedia};
