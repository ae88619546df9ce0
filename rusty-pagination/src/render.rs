//! Page body rendering.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use twilight_model::channel::message::embed::Embed;

use crate::error::RenderError;
use crate::transport::PageContent;
use crate::validate::{limits::MAX_MESSAGE_CONTENT, truncate_with_ellipsis};

const CODE_BLOCK_OPEN: &str = "```json\n";
const CODE_BLOCK_CLOSE: &str = "\n```";

/// `(item, index, all) -> content`. Must be pure.
pub type PageRenderer<T> = Arc<dyn Fn(&T, usize, &[T]) -> PageContent + Send + Sync>;

pub fn default_renderer<T: Serialize + 'static>() -> PageRenderer<T> {
    Arc::new(render_default)
}

/// Strings and other primitives render as text; structured items are
/// pretty-printed as JSON inside a code block.
pub fn render_default<T: Serialize>(item: &T, index: usize, _all: &[T]) -> PageContent {
    let value = match serde_json::to_value(item) {
        Ok(value) => value,
        Err(source) => {
            warn!(?source, page = index, "page item could not be serialized");
            return PageContent::Plain(format!("Page {}", index + 1));
        }
    };

    let text = match value {
        Value::String(text) => text,
        Value::Null => "null".to_owned(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        structured @ (Value::Array(_) | Value::Object(_)) => {
            let pretty = serde_json::to_string_pretty(&structured)
                .unwrap_or_else(|_| structured.to_string());
            let budget = MAX_MESSAGE_CONTENT - CODE_BLOCK_OPEN.len() - CODE_BLOCK_CLOSE.len();
            format!(
                "{CODE_BLOCK_OPEN}{}{CODE_BLOCK_CLOSE}",
                truncate_with_ellipsis(&pretty, budget)
            )
        }
    };

    PageContent::Plain(text)
}

/// Split rendered content into message text and embeds, appending an
/// optional notice (e.g. the timeout notice).
pub(crate) fn page_body(
    content: PageContent,
    page: usize,
    notice: Option<&str>,
) -> Result<(Option<String>, Vec<Embed>), RenderError> {
    match content {
        PageContent::Rich(embed) => Ok((notice.map(ToOwned::to_owned), vec![embed])),
        PageContent::Plain(text) => {
            if text.trim().is_empty() {
                return Err(RenderError::Page {
                    page,
                    reason: "rendered text is empty".to_owned(),
                });
            }

            let text = match notice {
                Some(notice) => {
                    let budget = MAX_MESSAGE_CONTENT.saturating_sub(notice.chars().count() + 2);
                    format!("{}\n\n{notice}", truncate_with_ellipsis(&text, budget))
                }
                None => text,
            };

            let len = text.chars().count();
            if len > MAX_MESSAGE_CONTENT {
                return Err(RenderError::Page {
                    page,
                    reason: format!("{len} characters exceed the {MAX_MESSAGE_CONTENT} limit"),
                });
            }

            Ok((Some(text), Vec::new()))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Card {
        name: &'static str,
        cost: u8,
    }

    fn plain(content: PageContent) -> String {
        match content {
            PageContent::Plain(text) => text,
            PageContent::Rich(_) => panic!("expected plain text"),
        }
    }

    #[test]
    fn primitives_are_stringified() {
        assert_eq!(plain(render_default(&"hello", 0, &["hello"])), "hello");
        assert_eq!(plain(render_default(&42, 0, &[42])), "42");
        assert_eq!(plain(render_default(&true, 0, &[true])), "true");
    }

    #[test]
    fn structured_items_are_pretty_printed() {
        let card = Card {
            name: "Fireball",
            cost: 4,
        };
        let text = plain(render_default(&card, 0, std::slice::from_ref(&card)));
        assert!(text.starts_with("```json\n{"));
        assert!(text.contains("\"name\": \"Fireball\""));
        assert!(text.ends_with("\n```"));
    }

    #[test]
    fn empty_text_is_a_render_error() {
        let err = page_body(PageContent::Plain("  ".to_owned()), 3, None).unwrap_err();
        assert!(matches!(err, RenderError::Page { page: 3, .. }));
    }

    #[test]
    fn notice_is_appended_and_fits() {
        let long = "x".repeat(MAX_MESSAGE_CONTENT);
        let (text, embeds) = page_body(PageContent::Plain(long), 0, Some("expired")).unwrap();
        let text = text.unwrap();
        assert!(embeds.is_empty());
        assert!(text.ends_with("\n\nexpired"));
        assert!(text.chars().count() <= MAX_MESSAGE_CONTENT);
    }

    #[test]
    fn oversized_text_without_notice_fails() {
        let long = "x".repeat(MAX_MESSAGE_CONTENT + 1);
        assert!(page_body(PageContent::Plain(long), 0, None).is_err());
    }
}
