//! Course client tests.

mod test_utils;

use serde_json::json;
use test_utils::mock_sources;
use tidings_cache::{CatalogEntry, LookupResult};
use tidings_error::TidingsErrorKind;
use tidings_sources::{CourseDetails, HttpResponse, TidingsConfig};

const LIST_URL: &str = "https://api.umd.io/v1/courses/list";

fn catalog() -> serde_json::Value {
    json!([
        {"course_id": "CMSC131", "name": "Object-Oriented Programming I"},
        {"course_id": "CMSC100", "name": "Bits and Bytes of Computer Science"},
        {"course_id": "MATH140", "name": "Calculus I"},
        {"course_id": "MATH141", "name": "Calculus II"}
    ])
}

#[tokio::test]
async fn test_exact_match_skips_catalog() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(
        "https://api.umd.io/v1/courses/CMSC131",
        json!([{"course_id": "CMSC131", "name": "Object-Oriented Programming I", "credits": "4"}]),
    );
    http.respond_json(LIST_URL, catalog());

    let result = sources.courses().lookup("CMSC131").await.unwrap();

    let LookupResult::ExactMatch(payload) = result else {
        panic!("expected exact match");
    };
    let details = CourseDetails::from_record(&payload).unwrap();
    assert_eq!(details.name(), "Object-Oriented Programming I");
    assert_eq!(http.call_count(LIST_URL), 0);
}

#[tokio::test]
async fn test_miss_falls_back_to_name_search() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(LIST_URL, catalog());

    let result = sources.courses().lookup("calculus").await.unwrap();

    assert_eq!(
        result,
        LookupResult::FallbackMatches(vec![
            CatalogEntry::new("MATH140", "Calculus I"),
            CatalogEntry::new("MATH141", "Calculus II"),
        ])
    );
}

#[tokio::test]
async fn test_nothing_matches() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond(
        "https://api.umd.io/v1/courses/nosuchcourse",
        HttpResponse::new(404, r#"{"error_code": 404}"#),
    );
    http.respond_json(LIST_URL, catalog());

    let result = sources.courses().lookup("nosuchcourse").await.unwrap();
    assert!(result.is_not_found());
}

#[tokio::test]
async fn test_free_text_skips_exact_request() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(LIST_URL, catalog());

    let result = sources.courses().lookup("object-oriented").await.unwrap();

    assert!(matches!(result, LookupResult::FallbackMatches(ref m) if m.len() == 1));
    let urls: Vec<_> = http.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(urls, vec![LIST_URL.to_string()]);
}

#[tokio::test]
async fn test_catalog_is_cached_between_lookups() {
    let (sources, http, clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(LIST_URL, catalog());

    sources.courses().lookup("calculus").await.unwrap();
    clock.advance(3_600);
    sources.courses().lookup("bits").await.unwrap();
    assert_eq!(http.call_count(LIST_URL), 1);

    clock.advance(86_400);
    sources.courses().lookup("bits").await.unwrap();
    assert_eq!(http.call_count(LIST_URL), 2);
}

#[tokio::test]
async fn test_catalog_refresh_failure_serves_stale_catalog() {
    let (sources, http, clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.respond_json(LIST_URL, catalog());
    sources.courses().catalog().await.unwrap();

    clock.advance(86_400);
    http.respond(LIST_URL, HttpResponse::new(503, "maintenance"));
    let catalog = sources.courses().catalog().await.unwrap();
    assert_eq!(catalog.len(), 4);
}

#[tokio::test]
async fn test_catalog_failure_without_cache_propagates() {
    let (sources, http, _clock) = mock_sources(&TidingsConfig::default(), 1_000);
    http.fail_transport(LIST_URL);

    let err = sources.courses().lookup("calculus").await.unwrap_err();
    assert!(matches!(err.kind(), TidingsErrorKind::Fetch(_)));
}
