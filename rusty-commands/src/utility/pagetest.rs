use serde::Serialize;
use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::CommandMeta;
use crate::session::launch;
use rusty_core::Context;
use rusty_pagination::embed::build_page_embed;
use rusty_pagination::page::{bulleted_pages, page_window, parse_one_based_page};
use rusty_pagination::{ControlSurface, HybridConfig, HybridLayout, PageContent, SelectConfig};

pub const META: CommandMeta = CommandMeta {
    name: "pagetest",
    desc: "Try out the pagination controls.",
    category: "utility",
    usage: "!pagetest [buttons|select|hybrid] [page]",
};

const ITEMS_PER_PAGE: usize = 5;
const SAMPLE_ITEM_COUNT: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SurfaceKind {
    Buttons,
    Select,
    Hybrid,
}

impl SurfaceKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "buttons" | "button" => Some(SurfaceKind::Buttons),
            "select" | "selector" | "menu" => Some(SurfaceKind::Select),
            "hybrid" | "both" => Some(SurfaceKind::Hybrid),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            SurfaceKind::Buttons => "buttons",
            SurfaceKind::Select => "select menu",
            SurfaceKind::Hybrid => "buttons + select menu",
        }
    }

    fn surface(self) -> ControlSurface<SamplePage> {
        let selector = SelectConfig::default().with_numbering(Some("Batch"), None);

        match self {
            SurfaceKind::Buttons => ControlSurface::default(),
            SurfaceKind::Select => ControlSurface::Selector(selector),
            SurfaceKind::Hybrid => ControlSurface::Hybrid(HybridConfig {
                selector,
                layout: HybridLayout::ButtonsTop,
                ..HybridConfig::default()
            }),
        }
    }
}

/// One page of sample items; `name` doubles as the select option description.
#[derive(Debug, Clone, Serialize)]
struct SamplePage {
    name: String,
    lines: String,
}

/// Pagination playground.
///
/// Inputs:
/// - optional surface: `buttons` (default), `select` or `hybrid`.
/// - optional one-based start page.
///
/// Error behavior:
/// - returns usage text on invalid arguments.
/// - returns bounds text when the requested page is out of range.
pub async fn run(
    ctx: Context,
    msg: Box<MessageCreate>,
    arg1: Option<&str>,
    arg_tail: Option<&str>,
) -> anyhow::Result<()> {
    let http = &ctx.http;
    let (kind, page_arg) = match arg1.map(|raw| (raw, SurfaceKind::parse(raw))) {
        Some((_, Some(kind))) => (kind, arg_tail),
        Some((raw, None)) => (SurfaceKind::Buttons, Some(raw)),
        None => (SurfaceKind::Buttons, None),
    };

    let Some(requested_page) = parse_one_based_page(page_arg) else {
        let usage = format!("Usage: `{}` (page starts at 1)", META.usage);
        http.create_message(msg.channel_id).content(&usage).await?;
        return Ok(());
    };

    let pages = build_sample_pages();
    if requested_page >= pages.len() {
        let out = format!(
            "Page {} does not exist. Available pages: 1-{}.",
            requested_page + 1,
            pages.len()
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let note = kind.name();
    launch(
        &ctx,
        msg.channel_id,
        msg.author.id,
        pages,
        kind.surface(),
        requested_page,
        move |page: &SamplePage, index, all| {
            build_page_embed("Pagination Test", page.lines.as_str(), index, all.len(), Some(note))
                .map(PageContent::Rich)
                .unwrap_or_else(|_| PageContent::Plain(page.lines.clone()))
        },
    )
    .await?;

    Ok(())
}

fn build_sample_pages() -> Vec<SamplePage> {
    let items: Vec<String> = (1..=SAMPLE_ITEM_COUNT)
        .map(|index| format!("Sample pagination item #{index}"))
        .collect();

    bulleted_pages(&items, ITEMS_PER_PAGE)
        .into_iter()
        .enumerate()
        .map(|(page, lines)| {
            let (start, end) = page_window(items.len(), ITEMS_PER_PAGE, page);
            SamplePage {
                name: format!("Items {}-{}", start + 1, end),
                lines,
            }
        })
        .collect()
}
