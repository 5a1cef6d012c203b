use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use spotikit::{
    AlbumGroup, AlbumGroups, AuthorizationGrant, Error, SpotifyClient, Token,
    types::{AddItemsRequest, CreatePlaylistRequest, TransferPlaybackRequest},
};

async fn spawn_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn fresh_token() -> Token {
    Token {
        access_token: "valid".to_string(),
        refresh_token: Some("refresh-1".to_string()),
        expires_at: Utc::now() + chrono::Duration::hours(1),
        scopes: Default::default(),
    }
}

fn test_client(base: &str) -> SpotifyClient {
    SpotifyClient::builder(AuthorizationGrant::Pkce {
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
    })
    .api_base_url(base)
    .token(fresh_token())
    .build()
    .unwrap()
}

// A client whose requests would all fail, for tests that must not reach
// the network at all.
fn offline_client() -> SpotifyClient {
    test_client("http://127.0.0.1:9")
}

fn artist_json(id: &str) -> Value {
    json!({ "id": id, "name": format!("Artist {id}") })
}

fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {id}"),
        "uri": format!("spotify:track:{id}"),
        "duration_ms": 180_000,
        "explicit": false
    })
}

fn album_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Album {id}"),
        "album_type": "album",
        "release_date": "2024-03-01",
        "release_date_precision": "day"
    })
}

// -- request validation, no network ----------------------------------------

#[tokio::test]
async fn test_oversized_id_lists_are_rejected_locally() {
    let client = offline_client();
    let ids: Vec<String> = (0..51).map(|i| format!("id-{i}")).collect();
    let refs: Vec<&str> = ids.iter().map(String::as_str).collect();

    let err = client.artists().get_several(&refs).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // albums cap out at 20 per request
    let err = client.albums().get_several(&refs[..21], None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = client.artists().get_several(&[]).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_out_of_range_limits_are_rejected_locally() {
    let client = offline_client();

    for limit in [0, 51] {
        let err = client
            .follow()
            .followed_artists(Some(limit), None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}

#[tokio::test]
async fn test_player_argument_validation() {
    let client = offline_client();

    let err = client.player().set_volume(101, None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let err = client.player().set_repeat("loop", None).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    // transfer takes exactly one device
    let request = TransferPlaybackRequest {
        device_ids: vec!["a".to_string(), "b".to_string()],
        play: false,
    };
    let err = client.player().transfer(&request).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let request = TransferPlaybackRequest { device_ids: vec![], play: false };
    let err = client.player().transfer(&request).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[tokio::test]
async fn test_playlist_argument_validation() {
    let client = offline_client();

    let request = CreatePlaylistRequest {
        name: String::new(),
        description: String::new(),
        public: false,
        collaborative: false,
    };
    let err = client.playlists().create("user-1", &request).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let request = AddItemsRequest {
        uris: (0..101).map(|i| format!("spotify:track:{i}")).collect(),
        position: None,
    };
    let err = client
        .playlists()
        .add_items("playlist-1", &request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let request = AddItemsRequest { uris: vec![], position: None };
    let err = client
        .playlists()
        .add_items("playlist-1", &request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

// -- lookups and envelopes --------------------------------------------------

#[tokio::test]
async fn test_get_several_keeps_per_id_misses_in_place() {
    let app = Router::new().route(
        "/artists",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("ids").map(String::as_str) != Some("a1,nope,a3") {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            Json(json!({ "artists": [artist_json("a1"), null, artist_json("a3")] }))
                .into_response()
        }),
    );
    let base = spawn_server(app).await;
    let client = test_client(&base);

    let artists = client
        .artists()
        .get_several(&["a1", "nope", "a3"])
        .await
        .unwrap();

    assert_eq!(artists.len(), 3);
    assert_eq!(artists[0].as_ref().unwrap().id, "a1");
    assert!(artists[1].is_none());
    assert_eq!(artists[2].as_ref().unwrap().id, "a3");
}

#[tokio::test]
async fn test_followed_artists_unwraps_envelope_and_exposes_cursor() {
    let app = Router::new().route(
        "/me/following",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("type").map(String::as_str) != Some("artist")
                || params.get("limit").map(String::as_str) != Some("2")
            {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            Json(json!({
                "artists": {
                    "items": [artist_json("a1"), artist_json("a2")],
                    "limit": 2,
                    "cursors": { "after": "a2" },
                    "total": 5
                }
            }))
            .into_response()
        }),
    );
    let base = spawn_server(app).await;
    let client = test_client(&base);

    let page = client.follow().followed_artists(Some(2), None).await.unwrap();

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.total, Some(5));
    assert_eq!(page.cursors.unwrap().after.as_deref(), Some("a2"));
}

#[tokio::test]
async fn test_is_following_returns_one_flag_per_id() {
    let app = Router::new().route(
        "/me/following/contains",
        get(|| async { Json(json!([true, false])) }),
    );
    let base = spawn_server(app).await;
    let client = test_client(&base);

    let flags = client
        .follow()
        .is_following_artists(&["a1", "a2"])
        .await
        .unwrap();

    assert_eq!(flags, vec![true, false]);
}

#[tokio::test]
async fn test_idle_playback_state_is_none() {
    // Idle players answer 204 with an empty body
    let app = Router::new().route("/me/player", get(|| async { StatusCode::NO_CONTENT }));
    let base = spawn_server(app).await;
    let client = test_client(&base);

    let state = client.player().playback_state(None).await.unwrap();
    assert!(state.is_none());
}

#[tokio::test]
async fn test_add_items_sends_uris_and_returns_snapshot() {
    let app = Router::new().route(
        "/playlists/playlist-1/tracks",
        post(|Json(body): Json<Value>| async move {
            if body["uris"] != json!(["spotify:track:t1", "spotify:track:t2"])
                || body["position"] != json!(0)
            {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
            Json(json!({ "snapshot_id": "snap-2" })).into_response()
        }),
    );
    let base = spawn_server(app).await;
    let client = test_client(&base);

    let request = AddItemsRequest {
        uris: vec!["spotify:track:t1".to_string(), "spotify:track:t2".to_string()],
        position: Some(0),
    };
    let snapshot = client
        .playlists()
        .add_items("playlist-1", &request)
        .await
        .unwrap();

    assert_eq!(snapshot, "snap-2");
}

#[tokio::test]
async fn test_default_market_fills_in_when_calls_pass_none() {
    let app = Router::new().route(
        "/artists/a1/top-tracks",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            match params.get("market").map(String::as_str) {
                Some("DE") => Json(json!({ "tracks": [track_json("t1")] })).into_response(),
                _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }),
    );
    let base = spawn_server(app).await;

    let client = SpotifyClient::builder(AuthorizationGrant::Pkce {
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
    })
    .api_base_url(&base)
    .default_market("DE")
    .token(fresh_token())
    .build()
    .unwrap();

    let tracks = client.artists().top_tracks("a1", None).await.unwrap();
    assert_eq!(tracks[0].id, "t1");
}

#[tokio::test]
async fn test_explicit_market_overrides_the_default() {
    let app = Router::new().route(
        "/artists/a1/top-tracks",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            match params.get("market").map(String::as_str) {
                Some("SE") => Json(json!({ "tracks": [] })).into_response(),
                _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            }
        }),
    );
    let base = spawn_server(app).await;

    let client = SpotifyClient::builder(AuthorizationGrant::Pkce {
        client_id: "test-client".to_string(),
        redirect_uri: "http://127.0.0.1:8080/callback".to_string(),
    })
    .api_base_url(&base)
    .default_market("DE")
    .token(fresh_token())
    .build()
    .unwrap();

    let tracks = client.artists().top_tracks("a1", Some("SE")).await.unwrap();
    assert!(tracks.is_empty());
}

// -- pagination -------------------------------------------------------------

#[tokio::test]
async fn test_next_page_follows_the_absolute_next_url() {
    // The next link must be absolute, so the router needs its own address
    // before it can be built.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let next_url = format!("{base}/artists/a1/albums?offset=1&limit=1");
    let app = Router::new().route(
        "/artists/a1/albums",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let next_url = next_url.clone();
            async move {
                match params.get("offset").map(String::as_str) {
                    Some("1") => Json(json!({
                        "items": [album_json("page2-album")],
                        "offset": 1,
                        "next": null
                    })),
                    _ => Json(json!({
                        "items": [album_json("page1-album")],
                        "offset": 0,
                        "next": next_url
                    })),
                }
            }
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = test_client(&base);

    let first = client
        .artists()
        .albums("a1", &AlbumGroups::default(), Some(1), None, None)
        .await
        .unwrap();
    assert_eq!(first.items[0].id, "page1-album");

    let second = client.next_page(&first).await.unwrap().unwrap();
    assert_eq!(second.items[0].id, "page2-album");

    // the last page has no successor
    assert!(client.next_page(&second).await.unwrap().is_none());
}

#[tokio::test]
async fn test_next_cursor_page_follows_the_absolute_next_url() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let played_at = "2026-08-01T12:00:00Z";
    let next_url = format!("{base}/me/player/recently-played?after=1000");
    let app = Router::new().route(
        "/me/player/recently-played",
        get(move |Query(params): Query<HashMap<String, String>>| {
            let next_url = next_url.clone();
            async move {
                match params.get("after").map(String::as_str) {
                    Some("1000") => Json(json!({
                        "items": [{ "track": track_json("t2"), "played_at": played_at }],
                        "next": null
                    })),
                    _ => Json(json!({
                        "items": [{ "track": track_json("t1"), "played_at": played_at }],
                        "next": next_url,
                        "cursors": { "after": "1000" }
                    })),
                }
            }
        }),
    );
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let client = test_client(&base);

    let first = client.player().recently_played(None, None, None).await.unwrap();
    assert_eq!(first.items[0].track.id, "t1");

    let second = client.next_cursor_page(&first).await.unwrap().unwrap();
    assert_eq!(second.items[0].track.id, "t2");
    assert!(client.next_cursor_page(&second).await.unwrap().is_none());
}

// -- album group parsing ----------------------------------------------------

#[test]
fn test_album_groups_default_and_all() {
    assert_eq!(AlbumGroups::default().to_string(), "album");
    assert_eq!(
        AlbumGroups::all().to_string(),
        "album,single,appears_on,compilation"
    );
    assert_eq!(AlbumGroups::all().iter().count(), 4);
}

#[test]
fn test_album_groups_parse_variants() {
    let groups: AlbumGroups = "album,single".parse().unwrap();
    assert_eq!(groups.to_string(), "album,single");

    // keyword, casing, hyphens and duplicates are all tolerated
    let groups: AlbumGroups = "ALL".parse().unwrap();
    assert_eq!(groups, AlbumGroups::all());

    let groups: AlbumGroups = "Appears-On, album, album".parse().unwrap();
    assert_eq!(groups.to_string(), "album,appears_on");

    let groups = AlbumGroups::from(&[AlbumGroup::Single, AlbumGroup::Album][..]);
    assert_eq!(groups.to_string(), "album,single");
}

#[test]
fn test_album_groups_parse_rejects_bad_input() {
    let err = "".parse::<AlbumGroups>().unwrap_err();
    assert!(matches!(err, Error::Validation(msg) if msg.contains("empty")));

    let err = "album,,single".parse::<AlbumGroups>().unwrap_err();
    assert!(matches!(err, Error::Validation(msg) if msg.contains("empty segment")));

    let err = "vinyl".parse::<AlbumGroups>().unwrap_err();
    assert!(matches!(err, Error::Validation(msg) if msg.contains("vinyl")));
}
