//! Command execution tests against mocked APIs.

mod test_utils;

use serde_json::{Value as JsonValue, json};
use test_utils::mock_commands;
use tidings_social::{BotCommandErrorKind, BotCommandExecutor, Reply};
use tidings_sources::{CourseConfig, HttpResponse, TidingsConfig, WeatherConfig};

const WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";
const LIST_URL: &str = "https://api.umd.io/v1/courses/list";

fn args(words: &[&str]) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}

fn weather_record(description: &str) -> JsonValue {
    json!({
        "weather": [{"description": description}],
        "main": {"temp": 300.0, "feels_like": 298.0, "temp_min": 295.0, "temp_max": 305.0},
        "sys": {"sunrise": 1_700_000_000, "sunset": 1_700_040_000},
        "dt": 1_700_020_000,
        "timezone": 25200
    })
}

fn config() -> TidingsConfig {
    TidingsConfig::default()
        .with_weather(WeatherConfig::default().with_api_key("test-key".to_string()))
}

fn text(reply: Reply) -> String {
    match reply {
        Reply::Text(text) => text,
        other => panic!("expected text reply, got {:?}", other),
    }
}

#[tokio::test]
async fn test_hello() {
    let (commands, _http, _clock) = mock_commands(&config(), 1_000);
    let reply = commands.execute("hello", &[]).await.unwrap();
    assert_eq!(reply.as_text(), Some("Hello there!"));
}

#[tokio::test]
async fn test_joke_keeps_punchline_separate() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(
        "https://official-joke-api.appspot.com/random_joke",
        json!({"id": 1, "type": "general", "setup": "What do you call a fake noodle?", "punchline": "An impasta."}),
    );

    let reply = commands.execute("joke", &[]).await.unwrap();
    assert_eq!(
        reply,
        Reply::Joke {
            setup: "What do you call a fake noodle?".to_string(),
            punchline: "An impasta.".to_string(),
        }
    );
}

#[tokio::test]
async fn test_meme_is_sent_as_image() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(
        "https://api.imgflip.com/get_memes",
        json!({"success": true, "data": {"memes": [
            {"id": "61579", "name": "One Does Not Simply", "url": "https://i.imgflip.com/1bij.jpg", "width": 568, "height": 335}
        ]}}),
    );
    http.respond("https://i.imgflip.com/1bij.jpg", HttpResponse::new(200, vec![1, 2, 3]));

    let reply = commands.execute("meme", &[]).await.unwrap();
    assert_eq!(
        reply,
        Reply::Image {
            filename: "meme.jpg".to_string(),
            bytes: vec![1, 2, 3],
            caption: Some("One Does Not Simply".to_string()),
        }
    );
}

#[tokio::test]
async fn test_weather_reply_lists_every_field() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(WEATHER_URL, weather_record("scattered clouds"));

    let reply = text(commands.execute("weather", &args(&["germantown"])).await.unwrap());

    assert!(reply.starts_with("Weather for germantown (UTC+7):"));
    assert!(reply.contains("Temperature (average): 26.9°C"));
    assert!(reply.contains("Temperature (feels like): 24.9°C"));
    assert!(reply.contains("Temperature (min): 21.9°C"));
    assert!(reply.contains("Temperature (max): 31.9°C"));
    assert!(reply.contains("Description: scattered clouds"));
    assert!(reply.contains("Last Update: "));
}

#[tokio::test]
async fn test_legacy_weather_alias() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(WEATHER_URL, weather_record("light rain"));

    assert!(commands.supports_command("weather_saigon"));
    let reply = text(commands.execute("weather_saigon", &[]).await.unwrap());

    assert!(reply.contains("Description: light rain"));
    assert_eq!(http.requests()[0].param("q"), Some("Ho Chi Minh City"));
}

#[tokio::test]
async fn test_weather_description_translated() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(WEATHER_URL, weather_record("light rain"));
    http.respond_json(TRANSLATE_URL, json!([[["mưa nhẹ", "light rain", null, null, 1]], null, "en"]));

    let reply = text(commands.execute("weather", &args(&["saigon", "vi"])).await.unwrap());
    assert!(reply.contains("Description: mưa nhẹ"));
}

#[tokio::test]
async fn test_translation_failure_keeps_original_description() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(WEATHER_URL, weather_record("light rain"));
    http.fail_transport(TRANSLATE_URL);

    let reply = text(commands.execute("weather", &args(&["saigon", "fr"])).await.unwrap());
    assert!(reply.contains("Description: light rain"));
}

#[tokio::test]
async fn test_weather_requires_location() {
    let (commands, _http, _clock) = mock_commands(&config(), 1_000);

    let err = commands.execute("weather", &[]).await.unwrap_err();
    assert!(matches!(err.kind, BotCommandErrorKind::MissingArgument { .. }));
    assert_eq!(
        commands.error_reply(&err),
        "Missing location. Usage: !weather <location> [language]"
    );
}

#[tokio::test]
async fn test_unknown_location_lists_known_ones() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);

    let err = commands.execute("weather", &args(&["atlantis"])).await.unwrap_err();
    assert!(commands.error_reply(&err).contains("Known locations: germantown, saigon."));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn test_failed_refresh_shows_last_report() {
    let (commands, http, clock) = mock_commands(&config(), 1_000);
    http.respond_json(WEATHER_URL, weather_record("clear sky"));
    commands.execute("weather", &args(&["saigon"])).await.unwrap();

    clock.advance(60);
    http.respond(WEATHER_URL, HttpResponse::new(500, "upstream error"));
    let reply = text(commands.execute("weather", &args(&["saigon"])).await.unwrap());

    assert!(reply.contains("Description: clear sky"));
    assert!(reply.ends_with("(Couldn't refresh just now; showing the last report.)"));
}

#[tokio::test]
async fn test_failed_first_fetch_is_an_api_error() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond(WEATHER_URL, HttpResponse::new(401, "Invalid API key"));

    let err = commands.execute("weather", &args(&["saigon"])).await.unwrap_err();
    assert!(matches!(err.kind, BotCommandErrorKind::ApiError { .. }));
    assert!(commands.error_reply(&err).starts_with("Sorry"));
}

#[tokio::test]
async fn test_course_exact_match() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(
        "https://api.umd.io/v1/courses/CMSC131",
        json!([{"course_id": "CMSC131", "name": "Object-Oriented Programming I", "credits": "4", "description": "Introduction to programming."}]),
    );

    let reply = text(commands.execute("course", &args(&["CMSC131"])).await.unwrap());
    assert_eq!(
        reply,
        "CMSC131: Object-Oriented Programming I (4 credits)\nIntroduction to programming."
    );
}

#[tokio::test]
async fn test_course_suggestions_are_capped() {
    let config = config().with_courses(CourseConfig::default().with_max_suggestions(2));
    let (commands, http, _clock) = mock_commands(&config, 1_000);
    http.respond_json(
        LIST_URL,
        json!([
            {"course_id": "CMSC100", "name": "Intro to Computing"},
            {"course_id": "ENGL101", "name": "Academic Writing"},
            {"course_id": "PHYS161", "name": "General Physics: Introduction"},
            {"course_id": "ECON200", "name": "Introductory Economics"}
        ]),
    );

    let reply = text(commands.execute("course", &args(&["intro"])).await.unwrap());

    assert_eq!(
        reply,
        "No course with id 'intro'. Did you mean:\n\
         CMSC100: Intro to Computing\n\
         PHYS161: General Physics: Introduction\n\
         ...and 1 more."
    );
}

#[tokio::test]
async fn test_course_search_joins_words() {
    let (commands, http, _clock) = mock_commands(&config(), 1_000);
    http.respond_json(LIST_URL, json!([{"course_id": "ENGL101", "name": "Academic Writing"}]));

    let reply = text(commands.execute("course", &args(&["academic", "writing"])).await.unwrap());
    assert!(reply.contains("ENGL101: Academic Writing"));

    let reply = text(commands.execute("course", &args(&["nosuchcourse"])).await.unwrap());
    assert_eq!(reply, "No course matches 'nosuchcourse'.");
}

#[tokio::test]
async fn test_course_requires_argument() {
    let (commands, _http, _clock) = mock_commands(&config(), 1_000);
    let err = commands.execute("course", &[]).await.unwrap_err();
    assert!(matches!(err.kind, BotCommandErrorKind::MissingArgument { .. }));
}

#[tokio::test]
async fn test_help() {
    let (commands, _http, _clock) = mock_commands(&config(), 1_000);

    let reply = text(commands.execute("help", &[]).await.unwrap());
    for name in ["!hello", "!joke", "!meme", "!weather", "!course", "!help"] {
        assert!(reply.contains(name), "help is missing {}", name);
    }

    let reply = text(commands.execute("help", &args(&["!weather"])).await.unwrap());
    assert!(reply.starts_with("!weather <location> [language] - "));

    let err = commands.execute("help", &args(&["dance"])).await.unwrap_err();
    assert_eq!(err.kind, BotCommandErrorKind::CommandNotFound("dance".to_string()));
}

#[tokio::test]
async fn test_unknown_command() {
    let (commands, _http, _clock) = mock_commands(&config(), 1_000);

    assert!(!commands.supports_command("dance"));
    let err = commands.execute("dance", &[]).await.unwrap_err();
    assert_eq!(commands.error_reply(&err), "I don't know the command 'dance'. Try !help.");
    assert_eq!(commands.supported_commands().len(), 8);
}
