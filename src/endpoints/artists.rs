//! Artist lookups and discographies.

use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    Result,
    client::SpotifyClient,
    endpoints::{join_ids, resolve_market, validate_id_count, validate_limit},
    error::Error,
    request::RequestSpec,
    types::{
        Artist, FullTrack, Page, RelatedArtistsResponse, SeveralArtistsResponse, SimplifiedAlbum,
        TopTracksResponse,
    },
};

const MAX_IDS: usize = 50;

/// One relation an album can have to the queried artist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AlbumGroup {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl AlbumGroup {
    pub const ALL: [AlbumGroup; 4] = [
        AlbumGroup::Album,
        AlbumGroup::Single,
        AlbumGroup::AppearsOn,
        AlbumGroup::Compilation,
    ];
}

impl fmt::Display for AlbumGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AlbumGroup::Album => "album",
            AlbumGroup::Single => "single",
            AlbumGroup::AppearsOn => "appears_on",
            AlbumGroup::Compilation => "compilation",
        };
        write!(f, "{name}")
    }
}

/// The set of album groups an artist-albums listing should include.
///
/// Renders as the comma-separated `include_groups` parameter. Defaults to
/// albums only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumGroups(pub BTreeSet<AlbumGroup>);

impl AlbumGroups {
    pub fn all() -> Self {
        AlbumGroups(AlbumGroup::ALL.into_iter().collect())
    }

    pub fn iter(&self) -> impl Iterator<Item = AlbumGroup> + '_ {
        self.0.iter().copied()
    }
}

impl Default for AlbumGroups {
    fn default() -> Self {
        AlbumGroups(BTreeSet::from([AlbumGroup::Album]))
    }
}

impl From<&[AlbumGroup]> for AlbumGroups {
    fn from(groups: &[AlbumGroup]) -> Self {
        AlbumGroups(groups.iter().copied().collect())
    }
}

impl fmt::Display for AlbumGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|group| group.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{joined}")
    }
}

impl FromStr for AlbumGroups {
    type Err = Error;

    /// Parses a comma-separated list like `album,single`, accepting
    /// `appears-on` for `appears_on`, any casing, and the keyword `all`.
    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::Validation(
                "album group list cannot be empty".to_string(),
            ));
        }
        if input.eq_ignore_ascii_case("all") {
            return Ok(AlbumGroups::all());
        }

        let mut groups = BTreeSet::new();
        for segment in input.split(',') {
            let segment = segment.trim().to_ascii_lowercase().replace('-', "_");
            let group = match segment.as_str() {
                "album" => AlbumGroup::Album,
                "single" => AlbumGroup::Single,
                "appears_on" => AlbumGroup::AppearsOn,
                "compilation" => AlbumGroup::Compilation,
                "" => {
                    return Err(Error::Validation(
                        "album group list contains an empty segment".to_string(),
                    ));
                }
                other => {
                    return Err(Error::Validation(format!(
                        "invalid value '{other}' for album group"
                    )));
                }
            };
            groups.insert(group);
        }

        Ok(AlbumGroups(groups))
    }
}

/// Artist endpoints, borrowed off [`SpotifyClient::artists`].
pub struct Artists<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Artists<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Artists { client }
    }

    /// Fetches one artist by id.
    pub async fn get(&self, id: &str) -> Result<Artist> {
        self.client
            .fetch(&RequestSpec::get(format!("/artists/{id}")))
            .await
    }

    /// Fetches up to 50 artists in one call. Ids the provider does not
    /// know come back as `None` at their position.
    pub async fn get_several(&self, ids: &[&str]) -> Result<Vec<Option<Artist>>> {
        validate_id_count(ids, MAX_IDS, "artist")?;
        let spec = RequestSpec::get("/artists").query("ids", join_ids(ids));
        let response: SeveralArtistsResponse = self.client.fetch(&spec).await?;
        Ok(response.artists)
    }

    /// Fetches one page of an artist's discography, filtered to the given
    /// album groups. Page onward with
    /// [`next_page`](SpotifyClient::next_page).
    pub async fn albums(
        &self,
        id: &str,
        groups: &AlbumGroups,
        limit: Option<u32>,
        offset: Option<u32>,
        market: Option<&str>,
    ) -> Result<Page<SimplifiedAlbum>> {
        validate_limit(limit)?;
        let spec = RequestSpec::get(format!("/artists/{id}/albums"))
            .query("include_groups", groups)
            .query_opt("limit", limit)
            .query_opt("offset", offset)
            .query_opt("market", resolve_market(self.client, market));
        self.client.fetch(&spec).await
    }

    /// Fetches an artist's top tracks. The provider requires a market for
    /// this endpoint; the client's default market applies when the call
    /// passes none.
    pub async fn top_tracks(&self, id: &str, market: Option<&str>) -> Result<Vec<FullTrack>> {
        let spec = RequestSpec::get(format!("/artists/{id}/top-tracks"))
            .query_opt("market", resolve_market(self.client, market));
        let response: TopTracksResponse = self.client.fetch(&spec).await?;
        Ok(response.tracks)
    }

    /// Fetches artists similar to the given one.
    pub async fn related_artists(&self, id: &str) -> Result<Vec<Artist>> {
        let spec = RequestSpec::get(format!("/artists/{id}/related-artists"));
        let response: RelatedArtistsResponse = self.client.fetch(&spec).await?;
        Ok(response.artists)
    }
}
