use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use blahaj::commands::{create_all_handlers, BotContext, CommandRegistry, ShardManagerContainer};
use blahaj::components::{create_all_buttons, ComponentRegistry};
use blahaj::core::{Config, PresenceConfig};
use blahaj::events::MessageHooks;
use blahaj::{Dispatcher, Handler};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting blahaj...");

    let presences = PresenceConfig::load_or_default(&config.presence_config_path)?;
    info!(
        "📄 Loaded {} presence options from {}",
        presences.presences.len(),
        config.presence_config_path.display()
    );

    let commands = CommandRegistry::with_handlers(create_all_handlers());
    let components = ComponentRegistry::with_handlers(create_all_buttons());
    info!(
        "Registered {} command handlers and {} component handlers",
        commands.len(),
        components.len()
    );

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .user_agent("blahaj")
        .build()?;
    let messages = MessageHooks::new(http_client)?;

    let token = config.discord_token.clone();
    let bot = Arc::new(BotContext::new(config, presences));
    let handler = Handler::new(Dispatcher::new(bot, commands, components), messages);

    // Presences feed /raffle; message content feeds link rewriting and code expansion
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            error!("This could indicate:");
            error!("  - Invalid bot token format");
            error!("  - Network issues reaching Discord API");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
    }

    info!("Establishing WebSocket connection to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Discord API outage");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
