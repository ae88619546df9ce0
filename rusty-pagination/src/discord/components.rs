//! Conversion from control descriptors to twilight components.

use twilight_model::{
    channel::message::{
        EmojiReactionType,
        component::{
            ActionRow, Button, ButtonStyle as TwilightButtonStyle, Component, SelectMenu,
            SelectMenuOption, SelectMenuType,
        },
    },
    id::Id,
};

use crate::controls::{
    ButtonControl, ButtonStyle, Control, ControlRow, IconPlacement, SelectControl, SelectOption,
};
use crate::icon::Icon;

/// Convert rendered rows into action rows.
pub fn to_components(rows: &[ControlRow]) -> Vec<Component> {
    rows.iter()
        .map(|row| {
            Component::ActionRow(ActionRow {
                components: row.controls.iter().map(to_component).collect(),
            })
        })
        .collect()
}

fn to_component(control: &Control) -> Component {
    match control {
        Control::Button(button) => Component::Button(to_button(button)),
        Control::Select(select) => Component::SelectMenu(to_select_menu(select)),
    }
}

fn to_button(button: &ButtonControl) -> Button {
    // Buttons only carry a leading emoji, so trailing unicode icons join the label.
    let (emoji, label) = match (&button.icon, button.icon_placement) {
        (Some(icon), IconPlacement::Leading) => (to_emoji(icon), button.label.clone()),
        (Some(Icon::Unicode(symbol)), IconPlacement::Trailing) => {
            let label = match &button.label {
                Some(label) => format!("{label} {symbol}"),
                None => symbol.clone(),
            };
            (None, Some(label))
        }
        (Some(icon), IconPlacement::Trailing) => (to_emoji(icon), button.label.clone()),
        (None, _) => (None, button.label.clone()),
    };

    Button {
        custom_id: Some(button.id.clone()),
        disabled: button.disabled,
        emoji,
        label,
        style: to_button_style(button.style),
        url: None,
        sku_id: None,
    }
}

fn to_button_style(style: ButtonStyle) -> TwilightButtonStyle {
    match style {
        ButtonStyle::Primary => TwilightButtonStyle::Primary,
        ButtonStyle::Secondary => TwilightButtonStyle::Secondary,
        ButtonStyle::Success => TwilightButtonStyle::Success,
        ButtonStyle::Danger => TwilightButtonStyle::Danger,
    }
}

fn to_select_menu(select: &SelectControl) -> SelectMenu {
    SelectMenu {
        channel_types: None,
        custom_id: select.id.clone(),
        default_values: None,
        disabled: select.disabled,
        kind: SelectMenuType::Text,
        max_values: Some(1),
        min_values: Some(1),
        options: Some(select.options.iter().map(to_select_option).collect()),
        placeholder: select.placeholder.clone(),
    }
}

fn to_select_option(option: &SelectOption) -> SelectMenuOption {
    SelectMenuOption {
        default: option.default,
        description: option.description.clone(),
        emoji: None,
        label: option.label.clone(),
        value: option.value.clone(),
    }
}

fn to_emoji(icon: &Icon) -> Option<EmojiReactionType> {
    match icon {
        Icon::Unicode(symbol) => Some(EmojiReactionType::Unicode {
            name: symbol.clone(),
        }),
        Icon::Custom { name, id, animated } => Id::new_checked(*id).map(|id| {
            EmojiReactionType::Custom {
                animated: *animated,
                id,
                name: Some(name.clone()),
            }
        }),
    }
}
