//! Input checks shared by every public entry point.
//!
//! Each check is a pure predicate returning the failing field, the offending
//! value and the expected shape. Callers run them before mutating anything.

use std::time::Duration;

use crate::error::ValidationError;
use crate::icon::Icon;

/// Platform limits for message components.
pub mod limits {
    pub const MAX_CONTROLS_PER_ROW: usize = 5;
    pub const MAX_ROWS: usize = 5;
    pub const MAX_SELECT_OPTIONS: usize = 25;
    pub const MAX_BUTTON_LABEL: usize = 80;
    pub const MAX_OPTION_LABEL: usize = 100;
    pub const MAX_OPTION_DESCRIPTION: usize = 100;
    pub const MAX_PLACEHOLDER: usize = 150;
    pub const MAX_CUSTOM_ID: usize = 100;
    pub const MAX_MESSAGE_CONTENT: usize = 2000;
}

pub fn non_empty_data(len: usize) -> Result<(), ValidationError> {
    if len == 0 {
        return Err(ValidationError::new("data", "0 items", "at least one item"));
    }
    Ok(())
}

/// The timeout may not outlive the interaction token that lets us edit the message.
pub fn timeout(value: Duration, max: Duration) -> Result<(), ValidationError> {
    if value > max {
        return Err(ValidationError::new(
            "timeout",
            format!("{}ms", value.as_millis()),
            format!("at most {}ms", max.as_millis()),
        ));
    }
    Ok(())
}

pub fn page_index(page: usize, total_pages: usize) -> Result<(), ValidationError> {
    if page >= total_pages {
        return Err(ValidationError::new(
            "page",
            page,
            format!("a page index in 0..{total_pages}"),
        ));
    }
    Ok(())
}

/// `[A-Za-z0-9_-]{1,100}`
pub fn custom_id(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let well_formed = (1..=limits::MAX_CUSTOM_ID).contains(&value.len())
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if !well_formed {
        return Err(ValidationError::new(
            field,
            format!("{value:?}"),
            "1-100 characters of [A-Za-z0-9_-]",
        ));
    }
    Ok(())
}

/// Composed control ids must still fit the platform's custom id cap.
pub fn composed_id_length(prefix: &str, longest_suffix: usize) -> Result<(), ValidationError> {
    let budget = limits::MAX_CUSTOM_ID.saturating_sub(longest_suffix);
    if prefix.len() > budget {
        return Err(ValidationError::new(
            "custom_id",
            format!("{} characters", prefix.len()),
            format!("at most {budget} characters so control ids fit in {}", limits::MAX_CUSTOM_ID),
        ));
    }
    Ok(())
}

pub fn label_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "an empty label", "a non-empty label"));
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::new(
            field,
            format!("{len} characters"),
            format!("at most {max} characters"),
        ));
    }
    Ok(())
}

/// `[label, icon]` pairs require a non-empty label and a valid icon token.
pub fn label_pair(field: &'static str, label: &str, icon: &str) -> Result<(), ValidationError> {
    label_text(field, label, limits::MAX_BUTTON_LABEL)?;
    if !Icon::is_icon(icon) {
        return Err(ValidationError::new(
            field,
            format!("{icon:?}"),
            "a unicode emoji or a <:name:id> custom emoji",
        ));
    }
    Ok(())
}

pub fn max_options(value: usize) -> Result<(), ValidationError> {
    if !(1..=limits::MAX_SELECT_OPTIONS).contains(&value) {
        return Err(ValidationError::new(
            "max_options",
            value,
            format!("between 1 and {}", limits::MAX_SELECT_OPTIONS),
        ));
    }
    Ok(())
}

pub fn description_length(value: usize) -> Result<(), ValidationError> {
    if !(1..=limits::MAX_OPTION_DESCRIPTION).contains(&value) {
        return Err(ValidationError::new(
            "description_max_len",
            value,
            format!("between 1 and {}", limits::MAX_OPTION_DESCRIPTION),
        ));
    }
    Ok(())
}

pub fn placeholder(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len > limits::MAX_PLACEHOLDER {
        return Err(ValidationError::new(
            "placeholder",
            format!("{len} characters"),
            format!("at most {} characters", limits::MAX_PLACEHOLDER),
        ));
    }
    Ok(())
}

pub fn custom_numbering(prefix: Option<&str>, suffix: Option<&str>) -> Result<(), ValidationError> {
    let has_prefix = prefix.is_some_and(|value| !value.trim().is_empty());
    let has_suffix = suffix.is_some_and(|value| !value.trim().is_empty());
    if !has_prefix && !has_suffix {
        return Err(ValidationError::new(
            "custom_numbering",
            "neither prefix nor suffix",
            "a non-empty prefix or suffix",
        ));
    }
    Ok(())
}

/// Truncate to `max` characters, marking the cut with `...`.
pub fn truncate_with_ellipsis(value: &str, max: usize) -> String {
    const ELLIPSIS: &str = "...";

    if value.chars().count() <= max {
        return value.to_owned();
    }
    if max <= ELLIPSIS.len() {
        return value.chars().take(max).collect();
    }

    let kept: String = value.chars().take(max - ELLIPSIS.len()).collect();
    format!("{}{ELLIPSIS}", kept.trim_end())
}
