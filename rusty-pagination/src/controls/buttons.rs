//! Directional button surface (first / previous / counter / next / last).

use crate::error::ValidationError;
use crate::icon::Icon;
use crate::validate::{self, limits::MAX_BUTTON_LABEL, limits::MAX_CONTROLS_PER_ROW};

use super::{
    ButtonControl, ButtonKind, Control, ControlId, ControlIds, ControlRow, IconPlacement,
    NavAction, PageView,
};

/// Label configuration for one directional button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlLabel {
    /// A bare string. Classified as an icon when it matches the icon grammar,
    /// otherwise used as label text. The default fills the missing half.
    Text(String),
    /// `[label, icon]`, taken literally.
    Pair { label: String, icon: String },
}

impl ControlLabel {
    pub fn pair(label: impl Into<String>, icon: impl Into<String>) -> Self {
        ControlLabel::Pair {
            label: label.into(),
            icon: icon.into(),
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), ValidationError> {
        match self {
            ControlLabel::Text(text) => validate::label_text(field, text, MAX_BUTTON_LABEL),
            ControlLabel::Pair { label, icon } => validate::label_pair(field, label, icon),
        }
    }
}

impl From<&str> for ControlLabel {
    fn from(value: &str) -> Self {
        ControlLabel::Text(value.to_owned())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    #[default]
    Secondary,
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonConfig {
    pub first: ControlLabel,
    pub previous: ControlLabel,
    pub next: ControlLabel,
    pub last: ControlLabel,
    pub style: ButtonStyle,
    /// Show `first`/`last` (only ever rendered with more than two pages).
    pub show_edges: bool,
    /// Show the disabled `current / total` pseudo-button.
    pub show_counter: bool,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            first: ControlLabel::pair("First", "⏮"),
            previous: ControlLabel::pair("Prev", "◀"),
            next: ControlLabel::pair("Next", "▶"),
            last: ControlLabel::pair("Last", "⏭"),
            style: ButtonStyle::Secondary,
            show_edges: true,
            show_counter: true,
        }
    }
}

impl ButtonConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.first.validate("first")?;
        self.previous.validate("previous")?;
        self.next.validate("next")?;
        self.last.validate("last")
    }

    fn label_for(&self, kind: ButtonKind) -> Option<&ControlLabel> {
        match kind {
            ButtonKind::First => Some(&self.first),
            ButtonKind::Previous => Some(&self.previous),
            ButtonKind::Next => Some(&self.next),
            ButtonKind::Last => Some(&self.last),
            ButtonKind::Counter => None,
        }
    }
}

fn default_label(kind: ButtonKind) -> (&'static str, &'static str) {
    match kind {
        ButtonKind::First => ("First", "⏮"),
        ButtonKind::Previous => ("Prev", "◀"),
        ButtonKind::Next => ("Next", "▶"),
        ButtonKind::Last => ("Last", "⏭"),
        ButtonKind::Counter => ("", ""),
    }
}

/// Resolve a label configuration into `(label, icon)`.
fn resolve_label(kind: ButtonKind, config: &ControlLabel) -> (Option<String>, Option<Icon>) {
    let (default_text, default_icon) = default_label(kind);

    match config {
        ControlLabel::Pair { label, icon } => (Some(label.clone()), Icon::parse(icon)),
        ControlLabel::Text(text) => match Icon::parse(text) {
            Some(icon) => (Some(default_text.to_owned()), Some(icon)),
            None => (Some(text.clone()), Icon::parse(default_icon)),
        },
    }
}

fn placement(kind: ButtonKind) -> IconPlacement {
    match kind {
        ButtonKind::First | ButtonKind::Previous => IconPlacement::Leading,
        ButtonKind::Counter | ButtonKind::Next | ButtonKind::Last => IconPlacement::Trailing,
    }
}

/// Build the button rows for the current position.
pub fn render_buttons<T>(
    view: PageView<'_, T>,
    config: &ButtonConfig,
    ids: &ControlIds,
) -> Vec<ControlRow> {
    let with_edges = config.show_edges && view.total_pages > 2;

    let mut kinds = Vec::with_capacity(MAX_CONTROLS_PER_ROW);
    if with_edges {
        kinds.push(ButtonKind::First);
    }
    kinds.push(ButtonKind::Previous);
    if config.show_counter {
        kinds.push(ButtonKind::Counter);
    }
    kinds.push(ButtonKind::Next);
    if with_edges {
        kinds.push(ButtonKind::Last);
    }

    let controls: Vec<Control> = kinds
        .into_iter()
        .map(|kind| Control::Button(build_button(view, config, ids, kind)))
        .collect();

    controls
        .chunks(MAX_CONTROLS_PER_ROW)
        .map(|chunk| ControlRow {
            controls: chunk.to_vec(),
        })
        .collect()
}

fn build_button<T>(
    view: PageView<'_, T>,
    config: &ButtonConfig,
    ids: &ControlIds,
    kind: ButtonKind,
) -> ButtonControl {
    let (label, icon) = match config.label_for(kind) {
        Some(label_config) => resolve_label(kind, label_config),
        None => (
            Some(format!("{} / {}", view.current_page + 1, view.total_pages)),
            None,
        ),
    };

    let disabled = match kind {
        ButtonKind::First | ButtonKind::Previous => view.is_first(),
        ButtonKind::Next | ButtonKind::Last => view.is_last(),
        ButtonKind::Counter => true,
    };

    ButtonControl {
        id: ids.button(kind),
        kind,
        label,
        icon,
        icon_placement: placement(kind),
        style: config.style,
        disabled,
    }
}

pub(super) fn route(kind: ControlId) -> Option<NavAction> {
    match kind {
        ControlId::Nav(ButtonKind::First) => Some(NavAction::First),
        ControlId::Nav(ButtonKind::Previous) => Some(NavAction::Previous),
        ControlId::Nav(ButtonKind::Next) => Some(NavAction::Next),
        ControlId::Nav(ButtonKind::Last) => Some(NavAction::Last),
        ControlId::Nav(ButtonKind::Counter) => Some(NavAction::Inert),
        ControlId::Menu => None,
    }
}
