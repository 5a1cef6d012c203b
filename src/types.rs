//! Typed models mirroring the provider's JSON.
//!
//! Response structs carry the fields the wrappers expose and tolerate the
//! provider omitting optional ones. Paging comes in two shapes: offset
//! pages ([`Page`]) with `next`/`previous` links and cursor pages
//! ([`CursorPage`]) with an opaque `after` cursor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Paging envelopes
// ---------------------------------------------------------------------------

/// One page of an offset-paged result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub href: Option<String>,
    pub items: Vec<T>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Provider-issued absolute URL of the next page, if any.
    pub next: Option<String>,
    /// Provider-issued absolute URL of the previous page, if any.
    pub previous: Option<String>,
    pub total: Option<u64>,
}

/// One page of a cursor-paged result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorPage<T> {
    pub href: Option<String>,
    pub items: Vec<T>,
    pub limit: Option<u32>,
    /// Provider-issued absolute URL of the next page, if any.
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

/// Opaque positions for cursor paging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
    pub before: Option<String>,
}

// ---------------------------------------------------------------------------
// Shared fragments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

// ---------------------------------------------------------------------------
// Artists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
    pub popularity: Option<u32>,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Artist reference as embedded in albums and tracks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedArtist {
    pub id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Albums and tracks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedAlbum {
    pub id: String,
    pub name: String,
    pub album_type: String,
    /// Relation of the album to the queried artist (`album`, `single`,
    /// `appears_on`, `compilation`); only present on artist-album listings.
    pub album_group: Option<String>,
    pub release_date: String,
    pub release_date_precision: String,
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullAlbum {
    pub id: String,
    pub name: String,
    pub album_type: String,
    pub release_date: String,
    pub release_date_precision: String,
    pub total_tracks: Option<u32>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
    pub label: Option<String>,
    pub popularity: Option<u32>,
    pub tracks: Page<SimplifiedTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub track_number: Option<u32>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub duration_ms: u64,
    pub track_number: Option<u32>,
    #[serde(default)]
    pub explicit: bool,
    pub popularity: Option<u32>,
    pub album: Option<SimplifiedAlbum>,
    #[serde(default)]
    pub artists: Vec<SimplifiedArtist>,
}

// ---------------------------------------------------------------------------
// Shows and episodes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Show {
    pub id: String,
    pub name: String,
    pub description: String,
    pub publisher: String,
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub images: Vec<Image>,
    pub episodes: Option<Page<SimplifiedEpisode>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedShow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub publisher: String,
    pub total_episodes: Option<u32>,
    #[serde(default)]
    pub explicit: bool,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullEpisode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub release_date: String,
    pub duration_ms: u64,
    #[serde(default)]
    pub images: Vec<Image>,
    pub show: Option<SimplifiedShow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedEpisode {
    pub id: String,
    pub name: String,
    pub description: String,
    pub release_date: String,
    pub duration_ms: u64,
}

/// A show in the user's library, with the instant it was saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedShow {
    pub added_at: DateTime<Utc>,
    pub show: SimplifiedShow,
}

// ---------------------------------------------------------------------------
// Playlists
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub snapshot_id: String,
    pub owner: PublicUser,
    pub tracks: Option<Page<PlaylistItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimplifiedPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub public: Option<bool>,
    #[serde(default)]
    pub collaborative: bool,
    pub snapshot_id: String,
    pub owner: PublicUser,
}

/// One entry of a playlist. `track` is `None` for entries the provider can
/// no longer resolve (removed or market-restricted content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<DateTime<Utc>>,
    pub track: Option<FullTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsRequest {
    pub uris: Vec<String>,
    pub position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemsResponse {
    pub snapshot_id: String,
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Absent for restricted devices the provider will not address.
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub is_active: bool,
    pub volume_percent: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub device: Device,
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    #[serde(default)]
    pub shuffle_state: bool,
    pub repeat_state: Option<String>,
    pub item: Option<FullTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlaying {
    pub is_playing: bool,
    pub progress_ms: Option<u64>,
    pub item: Option<FullTrack>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayHistory {
    pub track: FullTrack,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayRequest {
    pub context_uri: Option<String>,
    pub uris: Option<Vec<String>>,
    pub position_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferPlaybackRequest {
    pub device_ids: Vec<String>,
    pub play: bool,
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

/// Envelope of `GET /me/following?type=artist`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: CursorPage<Artist>,
}

/// Envelope of `GET /artists`; unknown ids come back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralArtistsResponse {
    pub artists: Vec<Option<Artist>>,
}

/// Envelope of `GET /albums`; unknown ids come back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralAlbumsResponse {
    pub albums: Vec<Option<FullAlbum>>,
}

/// Envelope of `GET /shows`; unknown ids come back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralShowsResponse {
    pub shows: Vec<Option<SimplifiedShow>>,
}

/// Envelope of `GET /episodes`; unknown ids come back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeveralEpisodesResponse {
    pub episodes: Vec<Option<FullEpisode>>,
}

/// Envelope of `GET /artists/{id}/top-tracks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<FullTrack>,
}

/// Envelope of `GET /artists/{id}/related-artists`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedArtistsResponse {
    pub artists: Vec<Artist>,
}

/// Envelope of `GET /browse/new-releases`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReleasesResponse {
    pub albums: Page<SimplifiedAlbum>,
}

/// Envelope of `GET /me/player/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

// ---------------------------------------------------------------------------
// OAuth and error bodies
// ---------------------------------------------------------------------------

/// Body of a successful token-endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
}

/// Error body of the provider's token endpoint, per the OAuth contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthErrorBody {
    pub error: String,
    pub error_description: Option<String>,
}

/// Error body of regular API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub status: Option<u16>,
    pub message: String,
}
