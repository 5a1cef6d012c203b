//! Parsing of provider redirect URLs.
//!
//! The login surface itself (browser, webview, whatever the application
//! uses) is an external collaborator; all this module needs is the full
//! redirect URL it ended up on. Code flows deliver `code` and `state` in
//! the query; the implicit flow delivers the token in the fragment.

use chrono::{Duration, Utc};
use reqwest::Url;

use crate::{Result, error::Error, token::Token};

/// Extracts the authorization code from a code-flow redirect URL.
///
/// Verifies the `state` parameter against the value sent with the
/// authorization request and maps a provider `error` parameter to an auth
/// error.
pub fn parse_authorization_code(redirect_url: &str, expected_state: &str) -> Result<String> {
    let url = parse_url(redirect_url)?;
    let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();

    check_provider_error(&params)?;
    check_state(&params, expected_state)?;

    params
        .iter()
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.clone())
        .ok_or_else(|| Error::Validation("redirect URL carries no authorization code".to_string()))
}

/// Extracts a token from an implicit-flow redirect fragment.
///
/// The resulting token has no refresh token; the caller must
/// re-authenticate when it expires.
pub fn parse_token_fragment(redirect_url: &str, expected_state: &str) -> Result<Token> {
    let url = parse_url(redirect_url)?;
    let fragment = url
        .fragment()
        .ok_or_else(|| Error::Validation("redirect URL carries no token fragment".to_string()))?;

    // The fragment is itself urlencoded key=value pairs; reuse the query
    // parser on it.
    let fragment_url = parse_url(&format!("http://localhost/?{fragment}"))?;
    let params: Vec<(String, String)> = fragment_url.query_pairs().into_owned().collect();

    check_provider_error(&params)?;
    check_state(&params, expected_state)?;

    let access_token = params
        .iter()
        .find(|(key, _)| key == "access_token")
        .map(|(_, value)| value.clone())
        .ok_or_else(|| Error::Validation("token fragment carries no access token".to_string()))?;

    let expires_in = params
        .iter()
        .find(|(key, _)| key == "expires_in")
        .and_then(|(_, value)| value.parse::<i64>().ok())
        .unwrap_or(3600);

    Ok(Token {
        access_token,
        refresh_token: None,
        expires_at: Utc::now() + Duration::seconds(expires_in),
        scopes: Default::default(),
    })
}

fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Validation(format!("invalid redirect URL: {e}")))
}

fn check_provider_error(params: &[(String, String)]) -> Result<()> {
    if let Some((_, code)) = params.iter().find(|(key, _)| key == "error") {
        let description = params
            .iter()
            .find(|(key, _)| key == "error_description")
            .map(|(_, value)| value.clone())
            .unwrap_or_else(|| "authorization was denied by the provider".to_string());
        return Err(Error::Auth {
            code: code.clone(),
            description,
        });
    }
    Ok(())
}

fn check_state(params: &[(String, String)], expected_state: &str) -> Result<()> {
    match params.iter().find(|(key, _)| key == "state") {
        Some((_, state)) if state == expected_state => Ok(()),
        Some(_) => Err(Error::Auth {
            code: "state_mismatch".to_string(),
            description: "redirect state does not match the authorization request".to_string(),
        }),
        None => Err(Error::Auth {
            code: "state_missing".to_string(),
            description: "redirect URL carries no state parameter".to_string(),
        }),
    }
}
