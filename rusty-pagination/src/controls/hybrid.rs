//! Buttons and selector combined over one shared position.

use serde::Serialize;

use crate::error::{ComponentError, PaginationError, ValidationError};

use super::{
    ButtonConfig, ControlId, ControlIds, NavAction, PageView, RenderedControls, SelectConfig,
    buttons, render_buttons, render_selector, select,
};

/// Row ordering of the two surfaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HybridLayout {
    /// Button row above the selector.
    #[default]
    ButtonsTop,
    /// Button row below the selector.
    ButtonsBottom,
    /// Selector above the button row.
    SelectorTop,
    /// Selector below the button row.
    SelectorBottom,
}

impl HybridLayout {
    pub fn selector_first(self) -> bool {
        matches!(self, HybridLayout::ButtonsBottom | HybridLayout::SelectorTop)
    }
}

pub struct HybridConfig<T> {
    pub buttons: ButtonConfig,
    pub selector: SelectConfig<T>,
    pub layout: HybridLayout,
    pub show_buttons: bool,
    pub show_selector: bool,
}

impl<T> Default for HybridConfig<T> {
    fn default() -> Self {
        Self {
            buttons: ButtonConfig::default(),
            selector: SelectConfig::default(),
            layout: HybridLayout::default(),
            show_buttons: true,
            show_selector: true,
        }
    }
}

impl<T> HybridConfig<T> {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.show_buttons && !self.show_selector {
            return Err(ValidationError::new(
                "hybrid",
                "buttons and selector both disabled",
                "at least one enabled control surface",
            ));
        }
        if self.show_buttons {
            self.buttons.validate()?;
        }
        if self.show_selector {
            self.selector.validate()?;
        }
        Ok(())
    }

    /// Delegate to whichever surface owns the identifier's namespace.
    pub(super) fn route(
        &self,
        kind: ControlId,
        control_id: &str,
        values: &[String],
        total_pages: usize,
    ) -> Result<NavAction, ComponentError> {
        let unrecognized = || ComponentError::Unrecognized {
            control_id: control_id.to_owned(),
        };

        match kind {
            ControlId::Nav(_) if self.show_buttons => buttons::route(kind).ok_or_else(unrecognized),
            ControlId::Menu if self.show_selector => {
                select::route(&self.selector, kind, control_id, values, total_pages)
            }
            _ => Err(unrecognized()),
        }
    }

    pub fn accessible_page_count(&self, total_pages: usize) -> usize {
        if self.show_buttons {
            total_pages
        } else {
            self.selector.accessible_page_count(total_pages)
        }
    }
}

/// Render both surfaces from the same view and merge them per the layout.
pub fn render_hybrid<T: Serialize>(
    view: PageView<'_, T>,
    config: &HybridConfig<T>,
    ids: &ControlIds,
) -> Result<RenderedControls, PaginationError> {
    let button_rows = if config.show_buttons {
        render_buttons(view, &config.buttons, ids)
    } else {
        Vec::new()
    };

    let (selector_rows, warnings) = if config.show_selector {
        let (row, warnings) = render_selector(view, &config.selector, ids)?;
        (vec![row], warnings)
    } else {
        (Vec::new(), Vec::new())
    };

    let rows = if config.layout.selector_first() {
        selector_rows.into_iter().chain(button_rows).collect()
    } else {
        button_rows.into_iter().chain(selector_rows).collect()
    };

    Ok(RenderedControls { rows, warnings })
}
