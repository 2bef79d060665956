//! One-shot command handler.

use std::path::Path;
use std::sync::Arc;
use tidings::{BotCommandExecutor, CommandInvocation, Reply, Sources, TidingsCommands, TidingsConfig};

/// Run one command against the live APIs and print the reply.
///
/// Image replies are written to `out` when given.
pub async fn ask(
    config: &TidingsConfig,
    words: &[String],
    out: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let invocation = CommandInvocation::from_words(words).ok_or("no command given")?;

    let sources = Arc::new(Sources::from_config(config)?);
    let commands = TidingsCommands::new(
        sources,
        config.discord().command_prefix().clone(),
        *config.courses().max_suggestions(),
    );

    let reply = match commands.execute(invocation.name(), invocation.args()).await {
        Ok(reply) => reply,
        Err(e) => {
            println!("{}", commands.error_reply(&e));
            return Err(e.into());
        }
    };

    if let (Reply::Image { bytes, .. }, Some(out)) = (&reply, out) {
        std::fs::write(out, bytes)?;
        tracing::info!(path = %out.display(), size = bytes.len(), "Saved image");
    }

    println!("{}", reply);
    Ok(())
}
