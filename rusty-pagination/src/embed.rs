use twilight_model::channel::message::embed::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

/// Default embed color used across the bot UI.
pub const DEFAULT_EMBED_COLOR: u32 = 0x90_54_30;

/// Build a page embed whose footer shows `Page n/t` and an optional note.
///
/// `page` is zero-based, as handed to page renderers.
pub fn build_page_embed(
    title: &str,
    description: impl Into<String>,
    page: usize,
    total_pages: usize,
    footer_note: Option<&str>,
) -> anyhow::Result<Embed> {
    let total_pages = total_pages.max(1);
    let page = (page + 1).min(total_pages);

    let footer_text = match footer_note {
        Some(note) if !note.is_empty() && total_pages > 1 => {
            format!("Page {page}/{total_pages} • {note}")
        }
        Some(note) if !note.is_empty() => note.to_owned(),
        _ if total_pages > 1 => format!("Page {page}/{total_pages}"),
        _ => String::new(),
    };

    let builder = EmbedBuilder::new()
        .title(title)
        .color(DEFAULT_EMBED_COLOR)
        .description(description);

    let embed = if footer_text.is_empty() {
        builder.validate()?.build()
    } else {
        let footer = EmbedFooterBuilder::new(footer_text).build();
        builder.footer(footer).validate()?.build()
    };

    Ok(embed)
}
