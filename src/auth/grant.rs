//! The OAuth grant variants a client can be constructed with.

use crate::{Result, config};

/// Which OAuth 2.0 flow a client uses to obtain tokens, with the
/// credentials that flow needs.
///
/// Dispatched by match throughout the auth machinery; there is no trait
/// hierarchy behind this.
#[derive(Debug, Clone)]
pub enum AuthorizationGrant {
    /// Server-to-server access without a user context. Tokens carry no
    /// refresh token; expiry is handled by re-running the flow.
    ClientCredentials {
        client_id: String,
        client_secret: String,
    },
    /// The plain authorization-code flow for confidential applications.
    AuthorizationCode {
        client_id: String,
        client_secret: String,
        redirect_uri: String,
    },
    /// Authorization code with PKCE, for applications that cannot hold a
    /// secret. The code exchange proves possession of the code verifier
    /// instead.
    Pkce {
        client_id: String,
        redirect_uri: String,
    },
    /// The legacy implicit flow: the token arrives directly in the redirect
    /// fragment, with no refresh token. Callers must re-authenticate on
    /// expiry.
    Implicit {
        client_id: String,
        redirect_uri: String,
    },
}

impl AuthorizationGrant {
    /// The application's client id, present in every variant.
    pub fn client_id(&self) -> &str {
        match self {
            AuthorizationGrant::ClientCredentials { client_id, .. }
            | AuthorizationGrant::AuthorizationCode { client_id, .. }
            | AuthorizationGrant::Pkce { client_id, .. }
            | AuthorizationGrant::Implicit { client_id, .. } => client_id,
        }
    }

    /// The registered redirect URI, for the variants that have one.
    pub fn redirect_uri(&self) -> Option<&str> {
        match self {
            AuthorizationGrant::ClientCredentials { .. } => None,
            AuthorizationGrant::AuthorizationCode { redirect_uri, .. }
            | AuthorizationGrant::Pkce { redirect_uri, .. }
            | AuthorizationGrant::Implicit { redirect_uri, .. } => Some(redirect_uri),
        }
    }

    /// Credentials for a Basic authorization header, for the confidential
    /// variants. Public clients identify themselves in the form body
    /// instead.
    pub(crate) fn basic_credentials(&self) -> Option<(&str, &str)> {
        match self {
            AuthorizationGrant::ClientCredentials {
                client_id,
                client_secret,
            }
            | AuthorizationGrant::AuthorizationCode {
                client_id,
                client_secret,
                ..
            } => Some((client_id, client_secret)),
            AuthorizationGrant::Pkce { .. } | AuthorizationGrant::Implicit { .. } => None,
        }
    }

    /// Builds a client-credentials grant from `SPOTIKIT_CLIENT_ID` and
    /// `SPOTIKIT_CLIENT_SECRET`, loading `.env` first.
    pub fn client_credentials_from_env() -> Result<Self> {
        config::load_env();
        Ok(AuthorizationGrant::ClientCredentials {
            client_id: config::client_id()?,
            client_secret: config::client_secret()?,
        })
    }

    /// Builds an authorization-code grant from `SPOTIKIT_CLIENT_ID`,
    /// `SPOTIKIT_CLIENT_SECRET` and `SPOTIKIT_REDIRECT_URI`.
    pub fn authorization_code_from_env() -> Result<Self> {
        config::load_env();
        Ok(AuthorizationGrant::AuthorizationCode {
            client_id: config::client_id()?,
            client_secret: config::client_secret()?,
            redirect_uri: config::redirect_uri()?,
        })
    }

    /// Builds a PKCE grant from `SPOTIKIT_CLIENT_ID` and
    /// `SPOTIKIT_REDIRECT_URI`. No secret is read.
    pub fn pkce_from_env() -> Result<Self> {
        config::load_env();
        Ok(AuthorizationGrant::Pkce {
            client_id: config::client_id()?,
            redirect_uri: config::redirect_uri()?,
        })
    }

    /// Builds an implicit grant from `SPOTIKIT_CLIENT_ID` and
    /// `SPOTIKIT_REDIRECT_URI`.
    pub fn implicit_from_env() -> Result<Self> {
        config::load_env();
        Ok(AuthorizationGrant::Implicit {
            client_id: config::client_id()?,
            redirect_uri: config::redirect_uri()?,
        })
    }
}
