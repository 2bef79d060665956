//! Discord bot command handler.

use std::sync::Arc;
use tidings::{
    DiscordError, DiscordErrorKind, Sources, TidingsBot, TidingsCommands, TidingsConfig,
    TidingsHandler,
};

/// Start the Discord bot and run until it stops.
pub async fn run_bot(config: TidingsConfig) -> Result<(), Box<dyn std::error::Error>> {
    let token = config
        .discord()
        .token()
        .clone()
        .ok_or_else(|| DiscordError::new(DiscordErrorKind::InvalidToken))?;

    let sources = Arc::new(Sources::from_config(&config)?);
    let commands = Arc::new(TidingsCommands::new(
        sources,
        config.discord().command_prefix().clone(),
        *config.courses().max_suggestions(),
    ));
    let handler = TidingsHandler::new(commands, config.discord());

    let mut bot = TidingsBot::new(&token, handler).await?;
    bot.start().await?;
    Ok(())
}
