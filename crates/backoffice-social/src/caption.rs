//! Caption composition for news posts.

/// Join a news title and body the way the post is laid out on Instagram.
pub fn compose_caption(title: &str, content: &str) -> String {
    format!("{}\n\n{}", title, content)
}

/// Pick the caption to publish.
///
/// An explicit non-blank caption wins. Otherwise the caption is composed from
/// the news title and content, dropping whichever part is blank.
pub fn resolve_caption(
    caption: Option<&str>,
    title: Option<&str>,
    content: Option<&str>,
) -> String {
    if let Some(caption) = caption.filter(|c| !c.trim().is_empty()) {
        return caption.to_string();
    }

    let title = title.map(str::trim).filter(|t| !t.is_empty());
    let content = content.map(str::trim).filter(|c| !c.is_empty());
    match (title, content) {
        (Some(title), Some(content)) => compose_caption(title, content),
        (Some(only), None) | (None, Some(only)) => only.to_string(),
        (None, None) => String::new(),
    }
}
