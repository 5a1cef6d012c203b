//! User profiles.

use crate::{
    Result,
    client::SpotifyClient,
    request::RequestSpec,
    types::{PrivateUser, PublicUser},
};

/// User endpoints, borrowed off [`SpotifyClient::users`].
pub struct Users<'a> {
    client: &'a SpotifyClient,
}

impl<'a> Users<'a> {
    pub(crate) fn new(client: &'a SpotifyClient) -> Self {
        Users { client }
    }

    /// Fetches the profile of the authenticated user. Playlist creation
    /// takes its owner id from here.
    pub async fn me(&self) -> Result<PrivateUser> {
        self.client.fetch(&RequestSpec::get("/me")).await
    }

    /// Fetches a user's public profile.
    pub async fn get(&self, user_id: &str) -> Result<PublicUser> {
        self.client
            .fetch(&RequestSpec::get(format!("/users/{user_id}")))
            .await
    }
}
