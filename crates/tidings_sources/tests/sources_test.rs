//! Joke, meme and translation client tests.

mod test_utils;

use serde_json::json;
use test_utils::mock_sources;
use tidings_error::TidingsErrorKind;
use tidings_sources::{HttpResponse, Meme, TidingsConfig};

const JOKE_URL: &str = "https://official-joke-api.appspot.com/random_joke";
const MEME_URL: &str = "https://api.imgflip.com/get_memes";
const TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

fn meme_list() -> serde_json::Value {
    json!({
        "success": true,
        "data": {"memes": [
            {"id": "181913649", "name": "Drake Hotline Bling", "url": "https://i.imgflip.com/30b1gx.jpg", "width": 1200, "height": 1200, "box_count": 2},
            {"id": "87743020", "name": "Two Buttons", "url": "https://i.imgflip.com/1g8my4.jpg", "width": 600, "height": 908, "box_count": 3}
        ]}
    })
}

#[tokio::test]
async fn test_joke_fields_decode() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(
        JOKE_URL,
        json!({"type": "programming", "setup": "Why do programmers prefer dark mode?", "punchline": "Because light attracts bugs.", "id": 17}),
    );

    let joke = sources.jokes().random().await.unwrap();
    assert_eq!(joke.kind(), "programming");
    assert_eq!(joke.punchline(), "Because light attracts bugs.");
    assert_eq!(*joke.id(), 17);
}

#[tokio::test]
async fn test_joke_failure_is_reported() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond(JOKE_URL, HttpResponse::new(500, "oops"));

    let err = sources.jokes().random().await.unwrap_err();
    match err.kind() {
        TidingsErrorKind::Fetch(e) => assert_eq!(e.status(), Some(500)),
        other => panic!("expected fetch error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_random_meme_comes_from_cached_list() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(MEME_URL, meme_list());

    for _ in 0..10 {
        let meme = sources.memes().random().await.unwrap().unwrap();
        assert!(["Drake Hotline Bling", "Two Buttons"].contains(&meme.name().as_str()));
    }
    assert_eq!(http.call_count(MEME_URL), 1);
}

#[tokio::test]
async fn test_empty_meme_list_yields_nothing() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(MEME_URL, json!({"success": true, "data": {"memes": []}}));

    assert!(sources.memes().random().await.unwrap().is_none());
}

#[tokio::test]
async fn test_meme_list_without_data_is_missing_field() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(MEME_URL, json!({"success": false, "error_message": "rate limited"}));

    let err = sources.memes().templates().await.unwrap_err();
    assert!(matches!(err.kind(), TidingsErrorKind::MissingField(_)));
}

#[tokio::test]
async fn test_meme_search_by_name() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(MEME_URL, meme_list());

    let meme = sources.memes().random_matching("drake").await.unwrap().unwrap();
    assert_eq!(meme.id(), "181913649");
    assert!(sources.memes().random_matching("distracted").await.unwrap().is_none());
}

#[tokio::test]
async fn test_meme_download_names_file_by_extension() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond("https://i.imgflip.com/30b1gx.jpg", HttpResponse::new(200, vec![0xFF, 0xD8, 0xFF]));

    let meme = Meme::new("181913649", "Drake Hotline Bling", "https://i.imgflip.com/30b1gx.jpg");
    let image = sources.memes().download(&meme).await.unwrap();
    assert_eq!(image.filename(), "meme.jpg");
    assert_eq!(image.bytes(), &vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_translation_sends_languages() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(TRANSLATE_URL, json!([[["mây rải rác", "scattered clouds", null, null, 1]], null, "en"]));

    let text = sources
        .translator()
        .translate("scattered clouds", "en", "vi")
        .await
        .unwrap();
    assert_eq!(text, "mây rải rác");

    let request = &http.requests()[0];
    assert_eq!(request.param("sl"), Some("en"));
    assert_eq!(request.param("tl"), Some("vi"));
    assert_eq!(request.param("q"), Some("scattered clouds"));
}
