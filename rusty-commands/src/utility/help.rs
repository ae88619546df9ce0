use twilight_model::gateway::payload::incoming::MessageCreate;

use crate::session::launch;
use crate::{COMMANDS, CommandMeta};
use rusty_core::Context;
use rusty_pagination::embed::build_page_embed;
use rusty_pagination::page::{page_window, total_pages};
use rusty_pagination::{ButtonConfig, ControlSurface, PageContent};

pub const META: CommandMeta = CommandMeta {
    name: "help",
    desc: "Lists out all available commands.",
    category: "utility",
    usage: "!help [page|category]",
};

const HELP_COMMANDS_PER_PAGE: usize = 10;

/// Render the command catalog, optionally filtered by category or starting at a page.
pub async fn run(ctx: Context, msg: Box<MessageCreate>, arg1: Option<&str>) -> anyhow::Result<()> {
    let http = &ctx.http;
    let parsed_page = arg1.and_then(|raw| raw.parse::<usize>().ok().filter(|page| *page >= 1));
    let category = match (arg1, parsed_page) {
        (Some(raw), None) => Some(raw),
        _ => None,
    };

    let mut categories: Vec<&str> = COMMANDS.iter().map(|c| c.category).collect();
    categories.sort_unstable();
    categories.dedup();

    if let Some(wanted_category) = category
        && !categories.contains(&wanted_category)
    {
        let out = format!(
            "Unknown category `{wanted_category}`. Available: {}.",
            categories.join(", ")
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let pages = help_pages(category);
    if pages.is_empty() {
        http.create_message(msg.channel_id)
            .content("No commands are available.")
            .await?;
        return Ok(());
    }

    let requested_page = parsed_page.unwrap_or(1);
    if requested_page > pages.len() {
        let out = format!(
            "Page {requested_page} does not exist. Available pages: 1-{}.",
            pages.len()
        );
        http.create_message(msg.channel_id).content(&out).await?;
        return Ok(());
    }

    let footer_note = category.map(ToOwned::to_owned);
    let surface = ControlSurface::Buttons(ButtonConfig {
        show_edges: false,
        ..ButtonConfig::default()
    });

    launch(
        &ctx,
        msg.channel_id,
        msg.author.id,
        pages,
        surface,
        requested_page - 1,
        move |description: &String, index, all| {
            build_page_embed(
                "Available Commands",
                description.as_str(),
                index,
                all.len(),
                footer_note.as_deref(),
            )
            .map(PageContent::Rich)
            .unwrap_or_else(|_| PageContent::Plain(description.clone()))
        },
    )
    .await?;

    Ok(())
}

/// Page bodies listing the commands grouped by category.
fn help_pages(category: Option<&str>) -> Vec<String> {
    let commands = sorted_commands(category);
    let total = total_pages(commands.len(), HELP_COMMANDS_PER_PAGE);

    (0..total)
        .map(|page| {
            let (start, end) = page_window(commands.len(), HELP_COMMANDS_PER_PAGE, page);
            grouped_description(&commands[start..end])
        })
        .collect()
}

fn grouped_description(commands: &[&CommandMeta]) -> String {
    let mut out = String::new();
    let mut current_category = None;

    for command in commands {
        if current_category != Some(command.category) {
            if current_category.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("**{}**\n", command.category));
            current_category = Some(command.category);
        }
        out.push_str(&format!("`{}` - {}\n", command.usage, command.desc));
    }

    out.trim_end().to_owned()
}

fn sorted_commands(category: Option<&str>) -> Vec<&'static CommandMeta> {
    let mut filtered: Vec<&'static CommandMeta> = COMMANDS
        .iter()
        .filter(|cmd| match category {
            Some(wanted) => cmd.category == wanted,
            None => true,
        })
        .collect();

    filtered.sort_unstable_by(|left, right| {
        left.category
            .cmp(right.category)
            .then_with(|| left.name.cmp(right.name))
    });

    filtered
}
