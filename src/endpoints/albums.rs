//! Album lookups, album tracks and the new-releases listing.

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{join_ids, resolve_market, validate_id_count, validate_limit},
    request::RequestSpec,
    types::{FullAlbum, NewReleasesResponse, Page, SeveralAlbumsResponse, SimplifiedAlbum,
        SimplifiedTrack},
};

/// Album bulk lookups are capped lower than the other resources.
const MAX_IDS: usize = 20;

/// Album endpoints, borrowed off [`SpotifyClient::albums`].
pub struct Albums<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Albums<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Albums { client }
    }

    /// Fetches one album by id, with its track listing.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<FullAlbum> {
        let spec = RequestSpec::get(format!("/albums/{id}"))
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches up to 20 albums in one call. Ids the provider does not know
    /// come back as `None` at their position.
    pub async fn get_several(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<FullAlbum>>> {
        validate_id_count(ids, MAX_IDS, "album")?;
        let spec = RequestSpec::get("/albums")
            .query("ids", join_ids(ids))
            .query_opt("market", resolve_market(self.client, market));
        let response: SeveralAlbumsResponse = self.client.fetch(&spec).await?;
        Ok(response.albums)
    }

    /// Fetches one page of an album's tracks.
    pub async fn tracks(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Page<SimplifiedTrack>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get(format!("/albums/{id}/tracks"))
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches one page of the provider's new-releases listing.
    ///
    /// The provider wraps this page in an envelope, so its `next` link
    /// cannot be followed generically; page onward by re-calling with a
    /// higher offset.
    pub async fn new_releases(
        &self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Page<SimplifiedAlbum>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get("/browse/new-releases")
            .query_opt("limit", limit)
            .query_opt("offset", offset);
        let response: NewReleasesResponse = self.client.fetch(&spec).await?;
        Ok(response.albums)
    }
}
