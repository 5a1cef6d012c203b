//! Playback state and controls.
//!
//! The state endpoints answer 204 with an empty body when the user has no
//! active device; those map to `None`. Control endpoints answer with
//! nothing on success.

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{resolve_market, to_body, validate_limit},
    error::Error,
    request::RequestSpec,
    types::{
        CurrentlyPlaying, CursorPage, Device, DevicesResponse, PlayHistory, PlayRequest,
        PlaybackState, TransferPlaybackRequest,
    },
};

const READ_SCOPE: &str = "user-read-playback-state";
const MODIFY_SCOPE: &str = "user-modify-playback-state";

/// Player endpoints, borrowed off [`SpotifyClient::player`].
pub struct Player<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Player<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Player { client }
    }

    /// Fetches the current playback state, or `None` when no device is
    /// active.
    pub async fn playback_state(&self, market: Option<&str>) -> Result<Option<PlaybackState>> {
        let spec = RequestSpec::get("/me/player")
            .query_opt("market", resolve_market(self.client, market))
            .scopes(&[READ_SCOPE]);
        self.client.fetch_optional(&spec).await
    }

    /// Fetches the currently playing item, or `None` when nothing plays.
    pub async fn currently_playing(&self, market: Option<&str>) -> Result<Option<CurrentlyPlaying>> {
        let spec = RequestSpec::get("/me/player/currently-playing")
            .query_opt("market", resolve_market(self.client, market))
            .scopes(&["user-read-currently-playing"]);
        self.client.fetch_optional(&spec).await
    }

    /// Lists the user's available playback devices.
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let spec = RequestSpec::get("/me/player/devices").scopes(&[READ_SCOPE]);
        let response: DevicesResponse = self.client.fetch(&spec).await?;
        Ok(response.devices)
    }

    /// Transfers playback to another device. The provider accepts exactly
    /// one target at a time.
    pub async fn transfer(&self, request: &TransferPlaybackRequest) -> Result<()> {
        if request.device_ids.len() != 1 {
            return Err(Error::Validation(format!(
                "playback transfers target exactly one device, got {}",
                request.device_ids.len()
            )));
        }
        let spec = RequestSpec::put("/me/player")
            .body(to_body(request)?)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Starts or resumes playback, optionally of a specific context or
    /// track list.
    pub async fn play(&self, request: Option<&PlayRequest>, device_id: Option<&str>) -> Result<()> {
        let mut spec = RequestSpec::put("/me/player/play")
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        if let Some(request) = request {
            spec = spec.body(to_body(request)?);
        }
        self.client.send(&spec).await
    }

    /// Pauses playback.
    pub async fn pause(&self, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::put("/me/player/pause")
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Skips to the next item.
    pub async fn next(&self, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::post("/me/player/next")
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Skips to the previous item.
    pub async fn previous(&self, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::post("/me/player/previous")
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Seeks within the current item.
    pub async fn seek(&self, position_ms: u64, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::put("/me/player/seek")
            .query("position_ms", position_ms)
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Sets the playback volume, 0 to 100 percent.
    pub async fn set_volume(&self, volume_percent: u32, device_id: Option<&str>) -> Result<()> {
        if volume_percent > 100 {
            return Err(Error::Validation(format!(
                "volume must be between 0 and 100, got {volume_percent}"
            )));
        }
        let spec = RequestSpec::put("/me/player/volume")
            .query("volume_percent", volume_percent)
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Toggles shuffle.
    pub async fn set_shuffle(&self, state: bool, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::put("/me/player/shuffle")
            .query("state", state)
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Sets the repeat mode: `track`, `context` or `off`.
    pub async fn set_repeat(&self, state: &str, device_id: Option<&str>) -> Result<()> {
        if !matches!(state, "track" | "context" | "off") {
            return Err(Error::Validation(format!(
                "repeat state must be 'track', 'context' or 'off', got '{state}'"
            )));
        }
        let spec = RequestSpec::put("/me/player/repeat")
            .query("state", state)
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Appends an item to the playback queue.
    pub async fn add_to_queue(&self, uri: &str, device_id: Option<&str>) -> Result<()> {
        let spec = RequestSpec::post("/me/player/queue")
            .query("uri", uri)
            .query_opt("device_id", device_id)
            .scopes(&[MODIFY_SCOPE]);
        self.client.send(&spec).await
    }

    /// Fetches one cursor page of the user's recently played tracks.
    /// `after` and `before` are millisecond timestamps; page onward with
    /// [`next_cursor_page`](SpotifyClient::next_cursor_page).
    pub async fn recently_played(
        &self,
        limit: Option<u32>,
        after: Option<u64>,
        before: Option<u64>,
    ) -> Result<CursorPage<PlayHistory>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get("/me/player/recently-played")
            .query_opt("limit", limit)
            .query_opt("after", after)
            .query_opt("before", before)
            .scopes(&["user-read-recently-played"]);
        self.client.fetch(&spec).await
    }
}
