//! Tests for endpoint descriptors

use super::*;
use crate::types::{Method, Scope};
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_user_ref_paths() {
    assert_eq!(UserRef::Me.path(), "/me");
    assert_eq!(UserRef::id("0123").path(), "/users/0123");
    assert_eq!(UserRef::from(None), UserRef::Me);
    assert_eq!(UserRef::from(Some("")), UserRef::Me);
    assert_eq!(UserRef::from(Some("42")), UserRef::id("42"));
}

#[test]
fn test_plain_path() {
    let endpoint = Endpoint::get("/me/videos");
    assert_eq!(endpoint.method(), Method::GET);
    assert_eq!(endpoint.path_and_query(), "/me/videos");
    assert_eq!(endpoint.page_path(2), "/me/videos?page=2");
}

#[test]
fn test_search_comes_before_fields() {
    let endpoint = Endpoint::get("/videos").fields(["uri", "name"]).search("cats");
    assert_eq!(endpoint.path_and_query(), "/videos?query=cats&fields=uri,name");
}

#[test]
fn test_page_is_appended_last() {
    let endpoint = Endpoint::get("/me/projects").fields(["name"]);
    assert_eq!(endpoint.page_path(3), "/me/projects?fields=name&page=3");
}

#[test]
fn test_search_term_is_encoded() {
    let endpoint = Endpoint::get("/videos").search("red & blue");
    assert_eq!(endpoint.path_and_query(), "/videos?query=red+%26+blue");
}

#[test]
fn test_fields_keep_literal_commas() {
    let endpoint = Endpoint::get("/me/videos").fields(["metadata.connections", "a&b"]);
    assert_eq!(
        endpoint.page_path(2),
        "/me/videos?fields=metadata.connections,a%26b&page=2"
    );
}

#[test]
fn test_fields_accumulate() {
    let endpoint = Endpoint::post("/me/live_events")
        .fields(["title", "uri"])
        .fields(["stream_key"]);
    assert_eq!(endpoint.requested_fields(), ["title", "uri", "stream_key"]);
}

#[test]
fn test_params_override_existing_keys() {
    let mut user = serde_json::Map::new();
    user.insert("title".to_string(), json!("Mine"));
    user.insert("privacy".to_string(), json!("unlisted"));

    let endpoint = Endpoint::post("/me/live_events")
        .param("title", "Default")
        .param("automatically_title_stream", true)
        .params(user);

    assert_eq!(
        serde_json::Value::Object(endpoint.body().clone()),
        json!({"title": "Mine", "automatically_title_stream": true, "privacy": "unlisted"})
    );
}

#[test]
fn test_requires_deduplicates() {
    let endpoint = Endpoint::delete("/me/live_events/1")
        .requires(Scope::Private)
        .requires(Scope::Delete)
        .requires(Scope::Private);
    assert_eq!(endpoint.required_scopes(), [Scope::Private, Scope::Delete]);
}

#[test]
fn test_projection_options() {
    let endpoint = Endpoint::get("/me/videos/1")
        .key("stats.plays")
        .pluck("0")
        .expect_status(200);
    assert_eq!(endpoint.projection().key.as_deref(), Some("stats.plays"));
    assert_eq!(endpoint.projection().get.as_deref(), Some("0"));
    assert_eq!(endpoint.expected_status(), Some(200));
}

#[test]
fn test_builder_leaves_original_untouched() {
    let base = Endpoint::get("/me/videos");
    let projected = base.clone().fields(["uri"]);
    assert_eq!(base.path_and_query(), "/me/videos");
    assert_eq!(projected.path_and_query(), "/me/videos?fields=uri");
}
