//! Discord bot client setup and lifecycle management.

use super::{DiscordError, DiscordErrorKind, TidingsHandler};
use serenity::Client;
use tracing::{info, instrument};

/// Discord bot client for Tidings.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use tidings_social::{TidingsBot, TidingsCommands, TidingsHandler};
/// use tidings_sources::{Sources, TidingsConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = TidingsConfig::load()?;
///     let sources = Arc::new(Sources::from_config(&config)?);
///     let commands = Arc::new(TidingsCommands::new(sources, "!", 10));
///     let handler = TidingsHandler::new(commands, config.discord());
///
///     let token = std::env::var("DISCORD_TOKEN")?;
///     let mut bot = TidingsBot::new(&token, handler).await?;
///     bot.start().await?;
///     Ok(())
/// }
/// ```
pub struct TidingsBot {
    client: Client,
}

impl TidingsBot {
    /// Create a new bot.
    ///
    /// # Errors
    /// Returns an error if the token is empty or the Serenity client fails to
    /// initialize.
    #[instrument(skip(token, handler), fields(token_len = token.len()))]
    pub async fn new(token: &str, handler: TidingsHandler) -> Result<Self, DiscordError> {
        info!("Initializing Tidings Discord bot");

        if token.trim().is_empty() {
            return Err(DiscordError::new(DiscordErrorKind::InvalidToken));
        }

        let intents = TidingsHandler::intents();
        info!("Building Serenity client with intents: {:?}", intents);

        let client = Client::builder(token.trim(), intents)
            .event_handler(handler)
            .await
            .map_err(|e| {
                DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                    "Failed to build client: {}",
                    e
                )))
            })?;

        info!("Serenity client built successfully");
        Ok(Self { client })
    }

    /// Start the bot. Runs until the connection closes for good.
    ///
    /// # Errors
    /// Returns an error if the client fails to start or hits a fatal error.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<(), DiscordError> {
        info!("Starting Discord bot");

        self.client.start().await.map_err(|e| {
            DiscordError::new(DiscordErrorKind::ConnectionFailed(format!(
                "Client error: {}",
                e
            )))
        })?;

        Ok(())
    }
}
