//! Dropdown (select menu) surface.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::{ComponentError, PaginationError, RenderError, ValidationError};
use crate::validate::{
    self,
    limits::{MAX_OPTION_DESCRIPTION, MAX_OPTION_LABEL, MAX_SELECT_OPTIONS},
    truncate_with_ellipsis,
};

use super::{
    Control, ControlId, ControlIds, ControlRow, NavAction, PageView, RenderWarning, SelectControl,
    SelectOption,
};

/// Item fields consulted, in order, when deriving an option description.
const DESCRIPTION_FIELDS: [&str; 5] = ["description", "content", "title", "name", "label"];
const DEFAULT_PLACEHOLDER: &str = "Jump to a page";
const DEFAULT_DESCRIPTION_MAX_LEN: usize = 50;

/// Label (and optional description) produced by a custom option renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionLabel {
    pub label: String,
    pub description: Option<String>,
}

impl OptionLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// `(item, index) -> label`. An `Err` falls back to a generic `Page {n}` option.
pub type OptionRenderer<T> = Arc<dyn Fn(&T, usize) -> anyhow::Result<OptionLabel> + Send + Sync>;

/// `"{prefix} {n}{suffix}"`, or `"{n} {suffix}"` without a prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomNumbering {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl CustomNumbering {
    fn label(&self, index: usize) -> String {
        let number = index + 1;
        let prefix = self.prefix.as_deref().map(str::trim).unwrap_or_default();
        let suffix = self.suffix.as_deref().unwrap_or_default();

        if prefix.is_empty() {
            format!("{number} {}", suffix.trim())
        } else {
            format!("{prefix} {number}{suffix}")
        }
    }
}

pub struct SelectConfig<T> {
    pub placeholder: String,
    /// Cap on listed pages, itself capped by the platform at 25.
    pub max_options: usize,
    pub custom_numbering: Option<CustomNumbering>,
    pub option_renderer: Option<OptionRenderer<T>>,
    /// Derive descriptions from the items (page-number and numbering labels only).
    pub auto_descriptions: bool,
    pub description_max_len: usize,
}

impl<T> Default for SelectConfig<T> {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            max_options: MAX_SELECT_OPTIONS,
            custom_numbering: None,
            option_renderer: None,
            auto_descriptions: true,
            description_max_len: DEFAULT_DESCRIPTION_MAX_LEN,
        }
    }
}

impl<T> SelectConfig<T> {
    pub fn with_numbering(mut self, prefix: Option<&str>, suffix: Option<&str>) -> Self {
        self.custom_numbering = Some(CustomNumbering {
            prefix: prefix.map(ToOwned::to_owned),
            suffix: suffix.map(ToOwned::to_owned),
        });
        self
    }

    pub fn with_option_renderer<F>(mut self, renderer: F) -> Self
    where
        F: Fn(&T, usize) -> anyhow::Result<OptionLabel> + Send + Sync + 'static,
    {
        self.option_renderer = Some(Arc::new(renderer));
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::max_options(self.max_options)?;
        validate::description_length(self.description_max_len)?;
        validate::placeholder(&self.placeholder)?;
        if let Some(numbering) = &self.custom_numbering {
            validate::custom_numbering(numbering.prefix.as_deref(), numbering.suffix.as_deref())?;
        }
        Ok(())
    }

    pub fn accessible_page_count(&self, total_pages: usize) -> usize {
        total_pages.min(self.max_options.min(MAX_SELECT_OPTIONS))
    }

    pub fn are_all_pages_accessible(&self, total_pages: usize) -> bool {
        self.accessible_page_count(total_pages) == total_pages
    }

    fn strategy(&self) -> LabelStrategy<'_, T> {
        match (&self.option_renderer, &self.custom_numbering) {
            (Some(renderer), _) => LabelStrategy::Custom(renderer),
            (None, Some(numbering)) => LabelStrategy::Numbered(numbering),
            (None, None) => LabelStrategy::PageNumbers,
        }
    }
}

enum LabelStrategy<'a, T> {
    Custom(&'a OptionRenderer<T>),
    Numbered(&'a CustomNumbering),
    PageNumbers,
}

enum OptionFailure {
    /// Substitute the generic option and keep going.
    Recoverable(String),
    Fatal(PaginationError),
}

/// Build the single dropdown row for the current position.
pub fn render_selector<T: Serialize>(
    view: PageView<'_, T>,
    config: &SelectConfig<T>,
    ids: &ControlIds,
) -> Result<(ControlRow, Vec<RenderWarning>), PaginationError> {
    let accessible = config.accessible_page_count(view.total_pages);
    let mut warnings = Vec::new();

    if accessible < view.total_pages {
        warnings.push(RenderWarning::PagesTruncated {
            accessible,
            total: view.total_pages,
        });
    }
    if config.option_renderer.is_some() && config.custom_numbering.is_some() {
        warnings.push(RenderWarning::ConflictingLabelStrategies);
    }

    let strategy = config.strategy();
    let mut options = Vec::with_capacity(accessible);

    for (index, item) in view.data.iter().take(accessible).enumerate() {
        let mut option = match build_option(config, &strategy, item, index, &mut warnings) {
            Ok(option) => option,
            Err(OptionFailure::Recoverable(reason)) => {
                warnings.push(RenderWarning::OptionFallback {
                    page: index,
                    reason,
                });
                fallback_option(index)
            }
            Err(OptionFailure::Fatal(err)) => return Err(err),
        };
        option.default = index == view.current_page;
        options.push(option);
    }

    let placeholder = if view.current_page < accessible {
        config.placeholder.clone()
    } else {
        format!("Page {} / {}", view.current_page + 1, view.total_pages)
    };

    let row = ControlRow {
        controls: vec![Control::Select(SelectControl {
            id: ids.menu(),
            placeholder: Some(placeholder),
            options,
            disabled: false,
        })],
    };

    Ok((row, warnings))
}

fn build_option<T: Serialize>(
    config: &SelectConfig<T>,
    strategy: &LabelStrategy<'_, T>,
    item: &T,
    index: usize,
    warnings: &mut Vec<RenderWarning>,
) -> Result<SelectOption, OptionFailure> {
    let (label, description) = match strategy {
        LabelStrategy::Custom(renderer) => {
            let rendered =
                renderer(item, index).map_err(|err| OptionFailure::Recoverable(format!("{err:#}")))?;
            let label = rendered.label.trim();

            if label.is_empty() {
                return Err(OptionFailure::Fatal(
                    RenderError::Option {
                        page: index,
                        reason: "custom renderer produced an empty label".to_owned(),
                    }
                    .into(),
                ));
            }
            validate::label_text("option_label", label, MAX_OPTION_LABEL)
                .map_err(|err| OptionFailure::Fatal(err.into()))?;

            let description = rendered
                .description
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(|text| clamp_text(text, MAX_OPTION_DESCRIPTION, index, warnings));

            (label.to_owned(), description)
        }
        LabelStrategy::Numbered(numbering) => {
            let label = clamp_text(&numbering.label(index), MAX_OPTION_LABEL, index, warnings);
            (label, auto_description(config, item, index)?)
        }
        LabelStrategy::PageNumbers => (
            format!("Page {}", index + 1),
            auto_description(config, item, index)?,
        ),
    };

    Ok(SelectOption {
        label,
        value: index.to_string(),
        description,
        default: false,
    })
}

fn auto_description<T: Serialize>(
    config: &SelectConfig<T>,
    item: &T,
    index: usize,
) -> Result<Option<String>, OptionFailure> {
    if !config.auto_descriptions {
        return Ok(None);
    }

    let description = describe_item(item, index, config.description_max_len)
        .map_err(|err| OptionFailure::Recoverable(err.to_string()))?;
    Ok(Some(description).filter(|text| !text.is_empty()))
}

fn clamp_text(text: &str, max: usize, page: usize, warnings: &mut Vec<RenderWarning>) -> String {
    if text.chars().count() > max {
        warnings.push(RenderWarning::LabelTruncated { page });
    }
    truncate_with_ellipsis(text, max)
}

fn fallback_option(index: usize) -> SelectOption {
    SelectOption {
        label: format!("Page {}", index + 1),
        value: index.to_string(),
        description: None,
        default: false,
    }
}

/// Describe an item for a selector option.
///
/// Structured items use the first present field among `description`,
/// `content`, `title`, `name`, `label`; primitives describe themselves and
/// anything else becomes `Item {n}`.
pub fn describe_item<T: Serialize>(
    item: &T,
    index: usize,
    max_len: usize,
) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(item)?;

    let text = match &value {
        Value::Object(fields) => DESCRIPTION_FIELDS
            .iter()
            .find_map(|field| fields.get(*field).and_then(value_text)),
        other => value_text(other),
    }
    .unwrap_or_else(|| format!("Item {}", index + 1));

    Ok(truncate_with_ellipsis(&text, max_len))
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub(super) fn route<T>(
    config: &SelectConfig<T>,
    kind: ControlId,
    control_id: &str,
    values: &[String],
    total_pages: usize,
) -> Result<NavAction, ComponentError> {
    if kind != ControlId::Menu {
        return Err(ComponentError::Unrecognized {
            control_id: control_id.to_owned(),
        });
    }

    let raw = values.first().map(String::as_str).unwrap_or_default();
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|page| *page < config.accessible_page_count(total_pages))
        .map(NavAction::GoTo)
        .ok_or_else(|| ComponentError::InvalidSelection {
            control_id: control_id.to_owned(),
            value: raw.to_owned(),
        })
}
