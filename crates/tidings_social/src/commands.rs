//! The Tidings command set.

use crate::{BotCommandError, BotCommandErrorKind, BotCommandExecutor, BotCommandResult, Reply};
use async_trait::async_trait;
use std::fmt::Write;
use std::sync::Arc;
use tidings_cache::{CacheLookup, CatalogEntry, LookupResult};
use tidings_error::TidingsError;
use tidings_sources::{CourseDetails, Sources, WeatherReport};
use tracing::{debug, info, instrument, warn};

/// Command name, argument synopsis and one-line description.
struct CommandSpec {
    name: &'static str,
    synopsis: &'static str,
    about: &'static str,
}

const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "hello",
        synopsis: "",
        about: "Say hello.",
    },
    CommandSpec {
        name: "joke",
        synopsis: "",
        about: "Tell a joke. The punchline comes after you answer.",
    },
    CommandSpec {
        name: "meme",
        synopsis: "[template name]",
        about: "Post a random meme template, optionally one whose name contains the given text.",
    },
    CommandSpec {
        name: "weather",
        synopsis: "<location> [language]",
        about: "Current weather for a configured location, optionally translated.",
    },
    CommandSpec {
        name: "course",
        synopsis: "<course id or title words>",
        about: "Look up a course by id, or search course titles.",
    },
    CommandSpec {
        name: "help",
        synopsis: "[command]",
        about: "List commands, or show how to use one.",
    },
];

/// Older single-location weather commands, mapped to `weather <alias>`.
const WEATHER_ALIASES: &[(&str, &str)] = &[
    ("weather_germantown", "germantown"),
    ("weather_saigon", "saigon"),
];

/// Executes `hello`, `joke`, `meme`, `weather`, `course` and `help` against
/// the configured API clients.
pub struct TidingsCommands {
    sources: Arc<Sources>,
    prefix: String,
    max_suggestions: usize,
}

impl TidingsCommands {
    /// Create the command set. `prefix` only affects help texts.
    pub fn new(sources: Arc<Sources>, prefix: impl Into<String>, max_suggestions: usize) -> Self {
        Self {
            sources,
            prefix: prefix.into(),
            max_suggestions: max_suggestions.max(1),
        }
    }

    /// The API clients behind the commands.
    pub fn sources(&self) -> &Arc<Sources> {
        &self.sources
    }

    /// Message shown to the chat user when a command fails.
    pub fn error_reply(&self, err: &BotCommandError) -> String {
        match &err.kind {
            BotCommandErrorKind::CommandNotFound(name) => format!(
                "I don't know the command '{}'. Try {}help.",
                name, self.prefix
            ),
            BotCommandErrorKind::MissingArgument { command, arg_name } => format!(
                "Missing {}. Usage: {}",
                arg_name,
                self.usage(command).unwrap_or_default()
            ),
            BotCommandErrorKind::InvalidArgument { reason, .. } => reason.clone(),
            BotCommandErrorKind::ApiError { command, .. } => format!(
                "Sorry, I couldn't get an answer for {}{} right now. Please try again later.",
                self.prefix, command
            ),
        }
    }

    fn usage(&self, command: &str) -> Option<String> {
        let spec = COMMANDS.iter().find(|spec| spec.name == command)?;
        let usage = if spec.synopsis.is_empty() {
            format!("{}{}", self.prefix, spec.name)
        } else {
            format!("{}{} {}", self.prefix, spec.name, spec.synopsis)
        };
        Some(usage)
    }

    async fn joke(&self) -> BotCommandResult<Reply> {
        let joke = self
            .sources
            .jokes()
            .random()
            .await
            .map_err(|e| api_error("joke", e))?;
        Ok(Reply::Joke {
            setup: joke.setup().clone(),
            punchline: joke.punchline().clone(),
        })
    }

    async fn meme(&self, args: &[String]) -> BotCommandResult<Reply> {
        let memes = self.sources.memes();
        let name = args.join(" ");
        let chosen = if name.is_empty() {
            memes.random().await
        } else {
            memes.random_matching(&name).await
        }
        .map_err(|e| api_error("meme", e))?;

        let Some(meme) = chosen else {
            return Ok(Reply::text(if name.is_empty() {
                "No meme templates are available right now.".to_string()
            } else {
                format!("No meme template matches '{}'.", name)
            }));
        };

        let image = memes
            .download(&meme)
            .await
            .map_err(|e| api_error("meme", e))?;
        debug!(id = %meme.id(), "Sending meme");
        Ok(Reply::Image {
            filename: image.filename().clone(),
            bytes: image.bytes().clone(),
            caption: Some(meme.name().clone()),
        })
    }

    async fn weather(&self, args: &[String]) -> BotCommandResult<Reply> {
        let weather = self.sources.weather();
        let Some(alias) = args.first().map(|alias| alias.to_lowercase()) else {
            return Err(BotCommandError::new(BotCommandErrorKind::MissingArgument {
                command: "weather".to_string(),
                arg_name: "location".to_string(),
            }));
        };
        if weather.location_query(&alias).is_none() {
            return Err(BotCommandError::new(BotCommandErrorKind::InvalidArgument {
                command: "weather".to_string(),
                arg_name: "location".to_string(),
                reason: format!(
                    "I don't know the location '{}'. Known locations: {}.",
                    alias,
                    weather.locations().collect::<Vec<_>>().join(", ")
                ),
            }));
        }

        let (record, note) = match weather
            .current(&alias)
            .await
            .map_err(|e| api_error("weather", e))?
        {
            CacheLookup::Fresh(payload) | CacheLookup::Cached(payload) => (payload, None),
            CacheLookup::NotAvailable => {
                return Ok(Reply::text(format!(
                    "No weather data for {} yet. Try again in a minute.",
                    alias
                )));
            }
            CacheLookup::FetchFailed(e) => {
                warn!(alias = %alias, status = ?e.status(), detail = %e.detail(), "Weather refresh failed");
                let stale = weather
                    .cached(&alias)
                    .await
                    .map_err(|e| api_error("weather", e))?;
                match stale {
                    Some(payload) => (
                        payload,
                        Some("(Couldn't refresh just now; showing the last report.)"),
                    ),
                    None => return Err(BotCommandError::api("weather", e)),
                }
            }
        };

        let Some(mut report) =
            WeatherReport::from_record(Some(&record)).map_err(|e| BotCommandError::api("weather", e))?
        else {
            return Ok(Reply::text(format!("No weather data for {} yet.", alias)));
        };

        if let Some(language) = args.get(1) {
            report = self.translate_description(report, language).await;
        }

        let mut text = render_weather(&alias, &report);
        if let Some(note) = note {
            text.push('\n');
            text.push_str(note);
        }
        Ok(Reply::Text(text))
    }

    /// Translate the description, keeping the original when translation fails.
    async fn translate_description(&self, report: WeatherReport, language: &str) -> WeatherReport {
        let language = language.to_lowercase();
        if &language == self.sources.source_language() {
            return report;
        }
        let description = report.description().clone();
        match self
            .sources
            .translator()
            .translate(&description, self.sources.source_language(), &language)
            .await
        {
            Ok(translated) => report.with_description(translated),
            Err(e) => {
                warn!(language = %language, error = %e, "Translation failed, keeping original description");
                report
            }
        }
    }

    async fn course(&self, args: &[String]) -> BotCommandResult<Reply> {
        let key = args.join(" ");
        if key.is_empty() {
            return Err(BotCommandError::new(BotCommandErrorKind::MissingArgument {
                command: "course".to_string(),
                arg_name: "course id or title".to_string(),
            }));
        }

        let result = self
            .sources
            .courses()
            .lookup(&key)
            .await
            .map_err(|e| api_error("course", e))?;

        let text = match result {
            LookupResult::ExactMatch(payload) => match CourseDetails::from_record(&payload) {
                Ok(details) => render_course(&details),
                Err(e) => return Err(BotCommandError::api("course", e)),
            },
            LookupResult::FallbackMatches(matches) => {
                render_suggestions(&key, &matches, self.max_suggestions)
            }
            LookupResult::NotFound => format!("No course matches '{}'.", key),
        };
        Ok(Reply::Text(text))
    }

    fn help(&self, args: &[String]) -> BotCommandResult<Reply> {
        if let Some(command) = args.first() {
            let command = command.trim_start_matches(self.prefix.as_str());
            return self
                .command_help(command)
                .map(Reply::Text)
                .ok_or_else(|| {
                    BotCommandError::new(BotCommandErrorKind::CommandNotFound(command.to_lowercase()))
                });
        }

        let mut text = String::from("Commands:");
        for spec in COMMANDS {
            let _ = write!(
                text,
                "\n{} - {}",
                self.usage(spec.name).unwrap_or_default(),
                spec.about
            );
        }
        Ok(Reply::Text(text))
    }
}

impl std::fmt::Debug for TidingsCommands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TidingsCommands")
            .field("prefix", &self.prefix)
            .field("max_suggestions", &self.max_suggestions)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl BotCommandExecutor for TidingsCommands {
    fn platform(&self) -> &str {
        "tidings"
    }

    #[instrument(skip(self, args), fields(arg_count = args.len()))]
    async fn execute(&self, command: &str, args: &[String]) -> BotCommandResult<Reply> {
        info!("Executing command");

        if let Some((_, alias)) = WEATHER_ALIASES.iter().find(|(name, _)| *name == command) {
            let mut forwarded = vec![alias.to_string()];
            forwarded.extend(args.iter().cloned());
            return self.weather(&forwarded).await;
        }

        match command {
            "hello" => Ok(Reply::text("Hello there!")),
            "joke" => self.joke().await,
            "meme" => self.meme(args).await,
            "weather" => self.weather(args).await,
            "course" => self.course(args).await,
            "help" => self.help(args),
            _ => Err(BotCommandError::new(BotCommandErrorKind::CommandNotFound(
                command.to_string(),
            ))),
        }
    }

    fn supports_command(&self, command: &str) -> bool {
        COMMANDS.iter().any(|spec| spec.name == command)
            || WEATHER_ALIASES.iter().any(|(name, _)| *name == command)
    }

    fn supported_commands(&self) -> Vec<String> {
        COMMANDS
            .iter()
            .map(|spec| spec.name)
            .chain(WEATHER_ALIASES.iter().map(|(name, _)| *name))
            .map(str::to_string)
            .collect()
    }

    fn command_help(&self, command: &str) -> Option<String> {
        let command = command.to_lowercase();
        if let Some((name, alias)) = WEATHER_ALIASES.iter().find(|(name, _)| *name == command) {
            return Some(format!(
                "{}{} - Same as {}weather {}.",
                self.prefix, name, self.prefix, alias
            ));
        }
        let spec = COMMANDS.iter().find(|spec| spec.name == command)?;
        Some(format!(
            "{} - {}",
            self.usage(spec.name).unwrap_or_default(),
            spec.about
        ))
    }
}

#[track_caller]
fn api_error(command: &str, err: TidingsError) -> BotCommandError {
    warn!(command, error = %err, "API call failed");
    BotCommandError::api(command, err)
}

fn render_weather(alias: &str, report: &WeatherReport) -> String {
    let temp = report.temperature();
    let sun = report.sun_times();
    format!(
        "Weather for {} (UTC{:+}):\n\
         Temperature (average): {}°C\n\
         Temperature (feels like): {}°C\n\
         Temperature (min): {}°C\n\
         Temperature (max): {}°C\n\
         Sunrise: {}\n\
         Sunset: {}\n\
         Description: {}\n\
         Last Update: {}",
        alias,
        report.timezone_hours(),
        temp.average(),
        temp.feels_like(),
        temp.temp_min(),
        temp.temp_max(),
        sun.sunrise(),
        sun.sunset(),
        report.description(),
        report.observed_at()
    )
}

fn render_course(details: &CourseDetails) -> String {
    let mut text = format!("{}: {}", details.id(), details.name());
    if let Some(credits) = details.credits() {
        let _ = write!(text, " ({} credits)", credits);
    }
    if let Some(description) = details.description() {
        let _ = write!(text, "\n{}", description);
    }
    text
}

fn render_suggestions(key: &str, matches: &[CatalogEntry], limit: usize) -> String {
    let mut text = format!("No course with id '{}'. Did you mean:", key);
    for entry in matches.iter().take(limit) {
        let _ = write!(text, "\n{}: {}", entry.id(), entry.name());
    }
    if matches.len() > limit {
        let _ = write!(text, "\n...and {} more.", matches.len() - limit);
    }
    text
}
