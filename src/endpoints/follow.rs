//! Following artists.

use serde_json::json;

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{join_ids, validate_id_count, validate_limit},
    request::RequestSpec,
    types::{Artist, CursorPage, FollowedArtistsResponse},
};

const MAX_IDS: usize = 50;

/// Follow endpoints, borrowed off [`SpotifyClient::follow`].
pub struct Follow<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Follow<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Follow { client }
    }

    /// Fetches one page of the artists the user follows.
    ///
    /// The provider wraps this page in an envelope, so its `next` link
    /// cannot be followed generically; page onward by passing
    /// `cursors.after` back as `after`.
    pub async fn followed_artists(
        &self,
        limit: Option<u32>,
        after: Option<&str>,
    ) -> Result<CursorPage<Artist>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get("/me/following")
            .query("type", "artist")
            .query_opt("limit", limit)
            .query_opt("after", after)
            .scopes(&["user-follow-read"]);
        let response: FollowedArtistsResponse = self.client.fetch(&spec).await?;
        Ok(response.artists)
    }

    /// Follows up to 50 artists.
    pub async fn follow_artists(&self, ids: &[&str]) -> Result<()> {
        validate_id_count(ids, MAX_IDS, "artist")?;
        let spec = RequestSpec::put("/me/following")
            .query("type", "artist")
            .body(json!({ "ids": ids }))
            .scopes(&["user-follow-modify"]);
        self.client.send(&spec).await
    }

    /// Unfollows up to 50 artists.
    pub async fn unfollow_artists(&self, ids: &[&str]) -> Result<()> {
        validate_id_count(ids, MAX_IDS, "artist")?;
        let spec = RequestSpec::delete("/me/following")
            .query("type", "artist")
            .body(json!({ "ids": ids }))
            .scopes(&["user-follow-modify"]);
        self.client.send(&spec).await
    }

    /// Checks whether the user follows each of up to 50 artists. The
    /// answer aligns with the id order.
    pub async fn is_following_artists(&self, ids: &[&str]) -> Result<Vec<bool>> {
        validate_id_count(ids, MAX_IDS, "artist")?;
        let spec = RequestSpec::get("/me/following/contains")
            .query("type", "artist")
            .query("ids", join_ids(ids))
            .scopes(&["user-follow-read"]);
        self.client.fetch(&spec).await
    }
}
