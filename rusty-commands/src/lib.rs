pub mod session;
pub mod utility;

use tracing::debug;
use twilight_model::gateway::payload::incoming::{InteractionCreate, MessageCreate};

use rusty_core::Context;
use rusty_pagination::COMMAND_PREFIX;

// Global command meta data
pub struct CommandMeta {
    pub name: &'static str,
    pub desc: &'static str,
    pub category: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandMeta] = &[
    utility::help::META,
    utility::pagetest::META,
    // Add new commands here
];

/// Split a prefixed message into `(command, first argument, remaining text)`.
fn parse_command(content: &str) -> Option<(String, Option<&str>, Option<&str>)> {
    let content = content.trim().strip_prefix(COMMAND_PREFIX)?.trim();
    let mut command_and_rest = content.splitn(2, char::is_whitespace);
    let cmd = command_and_rest.next().unwrap_or("").to_ascii_lowercase();
    let rest = command_and_rest
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty());

    let (arg1, arg_tail) = match rest {
        Some(value) => {
            let mut args = value.splitn(2, char::is_whitespace);
            let first = args.next().filter(|arg| !arg.is_empty());
            let tail = args
                .next()
                .map(str::trim)
                .filter(|remaining| !remaining.is_empty());
            (first, tail)
        }
        None => (None, None),
    };

    Some((cmd, arg1, arg_tail))
}

pub async fn handle_message(ctx: Context, msg: Box<MessageCreate>) -> anyhow::Result<()> {
    if msg.author.bot {
        return Ok(());
    }

    let content_owned = msg.content.clone();
    let Some((cmd, arg1, arg_tail)) = parse_command(&content_owned) else {
        return Ok(());
    };

    match cmd.as_str() {
        "help" => utility::help::run(ctx.clone(), msg, arg1).await?,
        "pagetest" => utility::pagetest::run(ctx.clone(), msg, arg1, arg_tail).await?,
        // Add new commands here
        _ => {}
    }

    Ok(())
}

/// Forward component interactions to the pagination session that owns the message.
pub async fn handle_interaction(
    ctx: Context,
    interaction: Box<InteractionCreate>,
) -> anyhow::Result<()> {
    let handled = ctx.hub.dispatch(&ctx.http, &interaction).await?;
    if !handled {
        debug!(interaction_id = interaction.id.get(), "interaction not handled");
    }

    Ok(())
}
