use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use twilight_gateway::{EventTypeFlags, Intents, Shard, ShardId, StreamExt as _};
use twilight_http::Client;
use twilight_model::gateway::event::Event;

use rustls::crypto::ring::default_provider;

use rusty_commands::{handle_interaction, handle_message};
use rusty_core::{BotConfig, Context};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    info!(
        timeout_secs = config.pagination_timeout.as_secs(),
        after_timeout = %config.after_timeout,
        "pagination defaults loaded"
    );

    // Create a single shared HTTP Client
    let http = Arc::new(Client::new(config.token.clone()));
    let token = config.token.clone();
    let ctx = Context::new(Arc::clone(&http), config);

    // Declare which intents the bot has
    let intents = Intents::GUILDS | Intents::GUILD_MESSAGES | Intents::MESSAGE_CONTENT;

    // A shard is one Gateway WebSocket connection to Discord
    let mut shard = Shard::new(ShardId::new(0, 1), token, intents);

    info!("Rusty is connecting...");

    while let Some(item) = shard.next_event(EventTypeFlags::all()).await {
        let event = match item {
            Ok(event) => event,
            Err(source) => {
                error!(?source, "gateway event stream error");
                continue;
            }
        };

        match event {
            Event::Ready(_) => {
                info!("Rusty has successfully awoken!");
            }
            Event::MessageCreate(msg) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_message(ctx, msg).await {
                        error!(?source, "message handler failed");
                    }
                });
            }
            Event::InteractionCreate(interaction) => {
                let ctx = ctx.clone();
                tokio::spawn(async move {
                    if let Err(source) = handle_interaction(ctx, interaction).await {
                        error!(?source, "interaction handler failed");
                    }
                });
            }
            _ => {} // Ignore unused events
        }
    }
    Ok(()) // Return Success, shutdown cleanly
}
