use reqwest::Method;
use serde_json::json;
use spotikit::RequestSpec;

#[test]
fn test_relative_url_joins_base() {
    let spec = RequestSpec::get("/artists/4NHQUGzhtTLFvgF5SZesLK");
    let url = spec.url("https://api.spotify.com/v1").unwrap();

    assert_eq!(
        url.as_str(),
        "https://api.spotify.com/v1/artists/4NHQUGzhtTLFvgF5SZesLK"
    );
    // no stray `?` when the spec carries no parameters
    assert_eq!(url.query(), None);
}

#[test]
fn test_query_parameters_round_trip_in_order() {
    // The provider is order-sensitive on some endpoints, so encoding must
    // preserve construction order exactly.
    let spec = RequestSpec::get("/artists/abc/albums")
        .query("include_groups", "album,single")
        .query("limit", 20)
        .query("offset", 40)
        .query("market", "DE");

    let url = spec.url("https://api.spotify.com/v1").unwrap();
    let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(
        decoded,
        vec![
            ("include_groups".to_string(), "album,single".to_string()),
            ("limit".to_string(), "20".to_string()),
            ("offset".to_string(), "40".to_string()),
            ("market".to_string(), "DE".to_string()),
        ]
    );
}

#[test]
fn test_query_values_are_encoded() {
    let spec = RequestSpec::get("/search").query("q", "artist:Tove Lo");
    let url = spec.url("https://api.spotify.com/v1").unwrap();

    // The raw URL must not contain the unencoded space
    assert!(!url.as_str().contains("artist:Tove Lo"));

    // but decoding must yield it back unchanged.
    let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(decoded, vec![("q".to_string(), "artist:Tove Lo".to_string())]);
}

#[test]
fn test_query_opt_skips_missing_values() {
    let spec = RequestSpec::get("/albums/abc/tracks")
        .query_opt("limit", Some(10))
        .query_opt("offset", None::<u32>)
        .query_opt("market", None::<&str>);

    let url = spec.url("http://localhost").unwrap();
    let decoded: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    assert_eq!(decoded, vec![("limit".to_string(), "10".to_string())]);
}

#[test]
fn test_absolute_spec_ignores_base() {
    // Provider-issued paging links are complete URLs and must be used
    // verbatim, whatever base the client is configured with.
    let next = "https://api.spotify.com/v1/albums/abc/tracks?offset=50&limit=50";
    let spec = RequestSpec::get_absolute(next);

    assert!(spec.is_absolute());
    let url = spec.url("http://127.0.0.1:9999").unwrap();
    assert_eq!(url.as_str(), next);
}

#[test]
fn test_methods_and_accessors() {
    assert_eq!(RequestSpec::get("/a").method(), &Method::GET);
    assert_eq!(RequestSpec::post("/a").method(), &Method::POST);
    assert_eq!(RequestSpec::put("/a").method(), &Method::PUT);
    assert_eq!(RequestSpec::delete("/a").method(), &Method::DELETE);

    let spec = RequestSpec::put("/me/following")
        .query("type", "artist")
        .body(json!({ "ids": ["x"] }))
        .scopes(&["user-follow-modify"]);

    assert_eq!(spec.query_params().len(), 1);
    assert_eq!(spec.request_body(), Some(&json!({ "ids": ["x"] })));
    assert_eq!(spec.required_scopes(), &["user-follow-modify"]);
}

#[test]
fn test_invalid_base_is_a_validation_error() {
    let spec = RequestSpec::get("/a");
    let err = spec.url("not a url").unwrap_err();
    assert!(matches!(err, spotikit::Error::Validation(_)));
}
