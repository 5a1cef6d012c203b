//! OAuth 2.0 flows against the provider's account service.
//!
//! Four grant variants are supported, dispatched as a sum type:
//!
//! - [`AuthorizationGrant::ClientCredentials`] for server-to-server access
//! - [`AuthorizationGrant::AuthorizationCode`] for confidential apps
//! - [`AuthorizationGrant::Pkce`] for apps that cannot hold a secret
//! - [`AuthorizationGrant::Implicit`] for the legacy fragment flow
//!
//! The [`Authenticator`] executes a grant against the token endpoint;
//! [`redirect`] turns a provider redirect URL back into a code or token,
//! independently of whatever UI produced it; [`listener`] is an optional
//! loopback server that captures the redirect for native apps.

pub mod authenticator;
pub mod grant;
pub mod listener;
pub mod pkce;
pub mod redirect;

pub use authenticator::{Authenticator, AuthorizationRequest};
pub use grant::AuthorizationGrant;
pub use listener::RedirectListener;
