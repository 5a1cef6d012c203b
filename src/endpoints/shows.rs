//! Shows, episodes and the user's saved shows.

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{join_ids, resolve_market, validate_id_count, validate_limit},
    request::RequestSpec,
    types::{
        FullEpisode, Page, SavedShow, SeveralEpisodesResponse, SeveralShowsResponse, Show,
        SimplifiedEpisode, SimplifiedShow,
    },
};

const MAX_IDS: usize = 50;

/// Show and episode endpoints, borrowed off [`SpotifyClient::shows`].
pub struct Shows<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Shows<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Shows { client }
    }

    /// Fetches one show by id.
    pub async fn get(&self, id: &str, market: Option<&str>) -> Result<Show> {
        let spec = RequestSpec::get(format!("/shows/{id}"))
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches up to 50 shows in one call. Ids the provider does not know
    /// come back as `None` at their position.
    pub async fn get_several(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<SimplifiedShow>>> {
        validate_id_count(ids, MAX_IDS, "show")?;
        let spec = RequestSpec::get("/shows")
            .query("ids", join_ids(ids))
            .query_opt("market", resolve_market(self.client, market));
        let response: SeveralShowsResponse = self.client.fetch(&spec).await?;
        Ok(response.shows)
    }

    /// Fetches one page of a show's episodes.
    pub async fn episodes(
        &self,
        id: &str,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Page<SimplifiedEpisode>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get(format!("/shows/{id}/episodes"))
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches one episode by id.
    pub async fn get_episode(&self, id: &str, market: Option<&str>) -> Result<FullEpisode> {
        let spec = RequestSpec::get(format!("/episodes/{id}"))
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches up to 50 episodes in one call, with per-id `null`
    /// semantics.
    pub async fn get_several_episodes(
        &self,
        ids: &[&str],
        market: Option<&str>,
    ) -> Result<Vec<Option<FullEpisode>>> {
        validate_id_count(ids, MAX_IDS, "episode")?;
        let spec = RequestSpec::get("/episodes")
            .query("ids", join_ids(ids))
            .query_opt("market", resolve_market(self.client, market));
        let response: SeveralEpisodesResponse = self.client.fetch(&spec).await?;
        Ok(response.episodes)
    }

    /// Fetches one page of the shows saved in the user's library.
    pub async fn saved(&self, limit: Option<u32>, offset: Option<u32>) -> Result<Page<SavedShow>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get("/me/shows")
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .scopes(&["user-library-read"]);
        self.client.fetch(&spec).await
    }
}
