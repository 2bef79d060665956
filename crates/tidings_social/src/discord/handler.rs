//! Serenity event handler for the Tidings bot.

use super::DiscordResult;
use crate::{BotCommandExecutor, CommandInvocation, Reply, TidingsCommands};
use serenity::all::{CreateAttachment, CreateMessage, Ready};
use serenity::async_trait;
use serenity::client::{Context, EventHandler};
use serenity::collector::MessageCollector;
use serenity::model::channel::Message;
use serenity::model::gateway::GatewayIntents;
use std::sync::Arc;
use std::time::Duration;
use tidings_sources::DiscordConfig;
use tracing::{debug, error, info, instrument, warn};

/// Event handler for the Tidings Discord bot.
///
/// Messages starting with the command prefix are parsed and executed; every
/// reply is preceded by a short typing indicator. Messages from bots,
/// including this one, are ignored.
pub struct TidingsHandler {
    commands: Arc<TidingsCommands>,
    prefix: String,
    typing_delay: Duration,
    reply_timeout: Duration,
}

impl TidingsHandler {
    /// Create a handler from the `[discord]` settings.
    pub fn new(commands: Arc<TidingsCommands>, config: &DiscordConfig) -> Self {
        Self {
            commands,
            prefix: config.command_prefix().clone(),
            typing_delay: Duration::from_millis(*config.typing_delay_ms()),
            reply_timeout: Duration::from_secs(*config.reply_timeout_secs()),
        }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }

    /// Show the typing indicator for the configured delay.
    async fn typing(&self, ctx: &Context, msg: &Message) {
        if let Err(e) = msg.channel_id.broadcast_typing(&ctx.http).await {
            debug!(error = %e, "Failed to broadcast typing");
        }
        tokio::time::sleep(self.typing_delay).await;
    }

    async fn say(&self, ctx: &Context, msg: &Message, text: &str) -> DiscordResult<()> {
        self.typing(ctx, msg).await;
        msg.channel_id.say(&ctx.http, text).await?;
        Ok(())
    }

    async fn send_reply(&self, ctx: &Context, msg: &Message, reply: Reply) -> DiscordResult<()> {
        match reply {
            Reply::Text(text) => self.say(ctx, msg, &text).await,
            Reply::Image {
                filename,
                bytes,
                caption,
            } => {
                self.typing(ctx, msg).await;
                let mut message =
                    CreateMessage::new().add_file(CreateAttachment::bytes(bytes, filename));
                if let Some(caption) = caption {
                    message = message.content(caption);
                }
                msg.channel_id.send_message(&ctx.http, message).await?;
                Ok(())
            }
            Reply::Joke { setup, punchline } => {
                self.say(ctx, msg, &setup).await?;

                let answer = MessageCollector::new(&ctx.shard)
                    .author_id(msg.author.id)
                    .channel_id(msg.channel_id)
                    .timeout(self.reply_timeout)
                    .next()
                    .await;
                if answer.is_none() {
                    debug!(user_id = %msg.author.id, "No answer to the joke, telling the punchline anyway");
                }

                self.say(ctx, msg, &punchline).await
            }
        }
    }
}

#[async_trait]
impl EventHandler for TidingsHandler {
    /// Called when the bot successfully connects to Discord.
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_user = %ready.user.name,
            bot_id = %ready.user.id,
            guilds = ready.guilds.len(),
            "Discord bot connected and ready"
        );
    }

    #[instrument(skip(self, ctx, msg), fields(channel_id = %msg.channel_id, user_id = %msg.author.id))]
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(invocation) = CommandInvocation::parse(&msg.content, &self.prefix) else {
            return;
        };
        if !self.commands.supports_command(invocation.name()) {
            debug!(command = %invocation.name(), "Ignoring unknown command");
            return;
        }

        let sent = match self
            .commands
            .execute(invocation.name(), invocation.args())
            .await
        {
            Ok(reply) => self.send_reply(&ctx, &msg, reply).await,
            Err(e) => {
                warn!(command = %invocation.name(), error = %e, "Command failed");
                self.say(&ctx, &msg, &self.commands.error_reply(&e)).await
            }
        };
        if let Err(e) = sent {
            error!(command = %invocation.name(), error = %e, "Failed to send reply");
        }
    }
}
