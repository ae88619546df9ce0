//! Navigation control synthesis.
//!
//! Renderers here are pure: they map a [`PageView`] plus a surface
//! configuration to platform-neutral control descriptors. The Discord adapter
//! turns those descriptors into message components.

mod buttons;
mod hybrid;
mod select;

use std::fmt;

use serde::Serialize;

use crate::error::{ComponentError, PaginationError, RenderError, ValidationError};
use crate::icon::Icon;
use crate::validate::limits::MAX_ROWS;

pub use buttons::{ButtonConfig, ButtonStyle, ControlLabel, render_buttons};
pub use hybrid::{HybridConfig, HybridLayout, render_hybrid};
pub use select::{
    CustomNumbering, OptionLabel, OptionRenderer, SelectConfig, describe_item, render_selector,
};

const NAV_NAMESPACE: &str = "nav";
const MENU_NAMESPACE: &str = "menu";
const MENU_CONTROL: &str = "page";

/// Length of the longest `:{namespace}:{control}` suffix appended to a session prefix.
pub const LONGEST_ID_SUFFIX: usize = ":nav:counter".len();

/// Which directional (or inert) button a descriptor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    First,
    Previous,
    Counter,
    Next,
    Last,
}

impl ButtonKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ButtonKind::First => "first",
            ButtonKind::Previous => "prev",
            ButtonKind::Counter => "counter",
            ButtonKind::Next => "next",
            ButtonKind::Last => "last",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "first" => Some(ButtonKind::First),
            "prev" => Some(ButtonKind::Previous),
            "counter" => Some(ButtonKind::Counter),
            "next" => Some(ButtonKind::Next),
            "last" => Some(ButtonKind::Last),
            _ => None,
        }
    }
}

/// Where an icon sits relative to the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconPlacement {
    Leading,
    Trailing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonControl {
    pub id: String,
    pub kind: ButtonKind,
    pub label: Option<String>,
    pub icon: Option<Icon>,
    pub icon_placement: IconPlacement,
    pub style: ButtonStyle,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    pub description: Option<String>,
    pub default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectControl {
    pub id: String,
    pub placeholder: Option<String>,
    pub options: Vec<SelectOption>,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Control {
    Button(ButtonControl),
    Select(SelectControl),
}

impl Control {
    pub fn id(&self) -> &str {
        match self {
            Control::Button(button) => &button.id,
            Control::Select(select) => &select.id,
        }
    }

    pub fn is_disabled(&self) -> bool {
        match self {
            Control::Button(button) => button.disabled,
            Control::Select(select) => select.disabled,
        }
    }

    fn disable(&mut self) {
        match self {
            Control::Button(button) => button.disabled = true,
            Control::Select(select) => select.disabled = true,
        }
    }
}

/// One horizontal row of controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlRow {
    pub controls: Vec<Control>,
}

impl ControlRow {
    pub fn buttons(&self) -> impl Iterator<Item = &ButtonControl> {
        self.controls.iter().filter_map(|control| match control {
            Control::Button(button) => Some(button),
            Control::Select(_) => None,
        })
    }

    pub fn select(&self) -> Option<&SelectControl> {
        self.controls.iter().find_map(|control| match control {
            Control::Select(select) => Some(select),
            Control::Button(_) => None,
        })
    }
}

/// Mark every control in every row disabled (used once a session expires).
pub fn disable_all(rows: &mut [ControlRow]) {
    rows.iter_mut()
        .flat_map(|row| row.controls.iter_mut())
        .for_each(Control::disable);
}

/// Non-fatal problems found while rendering controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    PagesTruncated { accessible: usize, total: usize },
    OptionFallback { page: usize, reason: String },
    LabelTruncated { page: usize },
    ConflictingLabelStrategies,
}

impl fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderWarning::PagesTruncated { accessible, total } => write!(
                f,
                "selector exposes {accessible} of {total} pages; the rest are not selectable"
            ),
            RenderWarning::OptionFallback { page, reason } => {
                write!(f, "option for page {} fell back to a generic label: {reason}", page + 1)
            }
            RenderWarning::LabelTruncated { page } => {
                write!(f, "option text for page {} was truncated", page + 1)
            }
            RenderWarning::ConflictingLabelStrategies => f.write_str(
                "several selector label strategies configured; custom renderer wins over numbering",
            ),
        }
    }
}

/// Controls for one render pass plus anything worth reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedControls {
    pub rows: Vec<ControlRow>,
    pub warnings: Vec<RenderWarning>,
}

/// Read-only snapshot of the pagination position shared by every renderer.
pub struct PageView<'a, T> {
    pub current_page: usize,
    pub total_pages: usize,
    pub data: &'a [T],
}

impl<T> Clone for PageView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PageView<'_, T> {}

impl<'a, T> PageView<'a, T> {
    /// Build a view with the page clamped into the data range.
    pub fn new(data: &'a [T], current_page: usize) -> Self {
        let total_pages = data.len();
        Self {
            current_page: current_page.min(total_pages.saturating_sub(1)),
            total_pages,
            data,
        }
    }

    pub fn is_first(&self) -> bool {
        self.current_page == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_page + 1 >= self.total_pages
    }

    pub fn item(&self) -> Option<&'a T> {
        self.data.get(self.current_page)
    }
}

/// Identifier of a control, resolved back from its custom id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlId {
    Nav(ButtonKind),
    Menu,
}

/// Builds and classifies the custom ids of one session's controls.
///
/// Buttons live under `{prefix}:nav:*` and the selector under
/// `{prefix}:menu:*`, so the two surfaces never share an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlIds {
    prefix: String,
}

impl ControlIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn button(&self, kind: ButtonKind) -> String {
        format!("{}:{NAV_NAMESPACE}:{}", self.prefix, kind.as_str())
    }

    pub fn menu(&self) -> String {
        format!("{}:{MENU_NAMESPACE}:{MENU_CONTROL}", self.prefix)
    }

    pub fn classify(&self, control_id: &str) -> Option<ControlId> {
        let rest = control_id
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix(':')?;
        let (namespace, control) = rest.split_once(':')?;

        match namespace {
            NAV_NAMESPACE => ButtonKind::parse(control).map(ControlId::Nav),
            MENU_NAMESPACE if control == MENU_CONTROL => Some(ControlId::Menu),
            _ => None,
        }
    }
}

/// What a control activation asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    First,
    Previous,
    Next,
    Last,
    GoTo(usize),
    /// Known control that carries no action (the page counter).
    Inert,
}

/// Rendering strategy attached to a session.
pub enum ControlSurface<T> {
    Buttons(ButtonConfig),
    Selector(SelectConfig<T>),
    Hybrid(HybridConfig<T>),
}

impl<T> Default for ControlSurface<T> {
    fn default() -> Self {
        ControlSurface::Buttons(ButtonConfig::default())
    }
}

impl<T: Serialize> ControlSurface<T> {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            ControlSurface::Buttons(config) => config.validate(),
            ControlSurface::Selector(config) => config.validate(),
            ControlSurface::Hybrid(config) => config.validate(),
        }
    }

    pub fn render(
        &self,
        view: PageView<'_, T>,
        ids: &ControlIds,
    ) -> Result<RenderedControls, PaginationError> {
        let rendered = match self {
            ControlSurface::Buttons(config) => RenderedControls {
                rows: render_buttons(view, config, ids),
                warnings: Vec::new(),
            },
            ControlSurface::Selector(config) => {
                let (row, warnings) = render_selector(view, config, ids)?;
                RenderedControls {
                    rows: vec![row],
                    warnings,
                }
            }
            ControlSurface::Hybrid(config) => render_hybrid(view, config, ids)?,
        };

        if rendered.rows.len() > MAX_ROWS {
            return Err(RenderError::TooManyRows {
                rows: rendered.rows.len(),
                max: MAX_ROWS,
            }
            .into());
        }

        Ok(rendered)
    }

    /// Map an activated control back to a navigation action.
    pub fn route(
        &self,
        ids: &ControlIds,
        control_id: &str,
        values: &[String],
        total_pages: usize,
    ) -> Result<NavAction, ComponentError> {
        let unrecognized = || ComponentError::Unrecognized {
            control_id: control_id.to_owned(),
        };
        let kind = ids.classify(control_id).ok_or_else(unrecognized)?;

        match self {
            ControlSurface::Buttons(_) => buttons::route(kind).ok_or_else(unrecognized),
            ControlSurface::Selector(config) => {
                select::route(config, kind, control_id, values, total_pages)
            }
            ControlSurface::Hybrid(config) => config.route(kind, control_id, values, total_pages),
        }
    }

    /// Number of pages reachable through this surface.
    pub fn accessible_page_count(&self, total_pages: usize) -> usize {
        match self {
            ControlSurface::Buttons(_) => total_pages,
            ControlSurface::Selector(config) => config.accessible_page_count(total_pages),
            ControlSurface::Hybrid(config) => config.accessible_page_count(total_pages),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_classify() {
        let ids = ControlIds::new("help-42");
        assert_eq!(ids.button(ButtonKind::Next), "help-42:nav:next");
        assert_eq!(
            ids.classify(&ids.button(ButtonKind::Counter)),
            Some(ControlId::Nav(ButtonKind::Counter))
        );
        assert_eq!(ids.classify(&ids.menu()), Some(ControlId::Menu));
    }

    #[test]
    fn foreign_and_malformed_ids_are_not_classified() {
        let ids = ControlIds::new("help");
        assert_eq!(ids.classify("helper:nav:next"), None);
        assert_eq!(ids.classify("other:nav:next"), None);
        assert_eq!(ids.classify("help:nav:sideways"), None);
        assert_eq!(ids.classify("help:menu:other"), None);
        assert_eq!(ids.classify("help"), None);
    }

    #[test]
    fn longest_suffix_matches_counter_id() {
        let ids = ControlIds::new("p");
        assert_eq!(ids.button(ButtonKind::Counter).len(), 1 + LONGEST_ID_SUFFIX);
        assert!(ids.menu().len() <= 1 + LONGEST_ID_SUFFIX);
    }

    #[test]
    fn disable_all_reaches_every_control() {
        let items = ["a", "b", "c"];
        let view = PageView::new(&items, 1);
        let mut rows = render_buttons(view, &ButtonConfig::default(), &ControlIds::new("t"));
        disable_all(&mut rows);
        assert!(
            rows.iter()
                .flat_map(|row| row.controls.iter())
                .all(Control::is_disabled)
        );
    }

    #[test]
    fn view_clamps_out_of_range_pages() {
        let items = [1, 2, 3];
        let view = PageView::new(&items, 9);
        assert_eq!(view.current_page, 2);
        assert!(view.is_last());
        assert_eq!(view.item(), Some(&3));
    }
}
