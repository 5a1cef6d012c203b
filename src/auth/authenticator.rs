//! Grant execution against the provider's token endpoint.
//!
//! The [`Authenticator`] turns an [`AuthorizationGrant`] into a
//! [`Token`]: it builds authorization URLs, exchanges authorization codes,
//! runs the client-credentials flow and refreshes expired tokens. Any
//! non-2xx answer from the token endpoint surfaces as an auth error
//! carrying the provider's OAuth error code and description.

use reqwest::{Client, Url};

use crate::{
    Result,
    auth::{grant::AuthorizationGrant, pkce, redirect},
    config::ClientConfig,
    error::Error,
    token::Token,
    types::{AuthErrorBody, TokenResponse},
};

/// An authorization flow in progress: the URL to send the user to plus the
/// transient secrets needed to finish the flow when the redirect comes
/// back.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    url: String,
    state: String,
    verifier: Option<String>,
}

impl AuthorizationRequest {
    /// The provider authorization URL to open in a browser or webview.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The anti-forgery `state` sent with the request. The redirect must
    /// echo it back or the flow is rejected.
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Executes OAuth flows for one grant against one token endpoint.
pub struct Authenticator {
    http: Client,
    grant: AuthorizationGrant,
    authorize_url: String,
    token_url: String,
}

impl Authenticator {
    pub fn new(http: Client, grant: AuthorizationGrant, config: &ClientConfig) -> Self {
        Authenticator {
            http,
            grant,
            authorize_url: config.authorize_url.clone(),
            token_url: config.token_url.clone(),
        }
    }

    /// The grant this authenticator executes.
    pub fn grant(&self) -> &AuthorizationGrant {
        &self.grant
    }

    /// Starts a user authorization flow.
    ///
    /// Builds the provider authorization URL for the grant, with a fresh
    /// `state` and, for PKCE, a fresh code verifier and its S256 challenge.
    /// Fails for the client-credentials grant, which has no user-facing
    /// authorization step.
    ///
    /// # Example
    ///
    /// ```
    /// let request = authenticator.begin_authorization(&["user-follow-read"])?;
    /// println!("open {} in a browser", request.url());
    /// ```
    pub fn begin_authorization(&self, scopes: &[&str]) -> Result<AuthorizationRequest> {
        let redirect_uri = self.grant.redirect_uri().ok_or_else(|| {
            Error::Validation(
                "the client-credentials grant has no authorization step".to_string(),
            )
        })?;

        let response_type = match self.grant {
            AuthorizationGrant::Implicit { .. } => "token",
            _ => "code",
        };

        let state = pkce::generate_state();
        let scope = scopes.join(" ");

        let mut params: Vec<(&str, &str)> = vec![
            ("client_id", self.grant.client_id()),
            ("response_type", response_type),
            ("redirect_uri", redirect_uri),
            ("state", &state),
        ];
        if !scope.is_empty() {
            params.push(("scope", &scope));
        }

        let verifier = match self.grant {
            AuthorizationGrant::Pkce { .. } => Some(pkce::generate_code_verifier()),
            _ => None,
        };
        let challenge = verifier.as_deref().map(pkce::generate_code_challenge);
        if let Some(challenge) = &challenge {
            params.push(("code_challenge_method", "S256"));
            params.push(("code_challenge", challenge));
        }

        let url = Url::parse_with_params(&self.authorize_url, &params)
            .map_err(|e| Error::Validation(format!("invalid authorize URL: {e}")))?;

        Ok(AuthorizationRequest {
            url: url.into(),
            state,
            verifier,
        })
    }

    /// Finishes a user authorization flow from the redirect URL the
    /// provider sent the user back to.
    ///
    /// For code flows this parses and exchanges the authorization code; for
    /// the implicit flow the token is parsed straight out of the fragment.
    /// The redirect's `state` must match the one in `request`.
    pub async fn finish_authorization(
        &self,
        request: &AuthorizationRequest,
        redirect_url: &str,
    ) -> Result<Token> {
        match self.grant {
            AuthorizationGrant::Implicit { .. } => {
                redirect::parse_token_fragment(redirect_url, &request.state)
            }
            _ => {
                let code = redirect::parse_authorization_code(redirect_url, &request.state)?;
                self.exchange_code(&code, request.verifier.as_deref()).await
            }
        }
    }

    /// Exchanges an authorization code for an access and refresh token
    /// pair.
    ///
    /// PKCE grants prove possession of the code verifier in the form body;
    /// the plain authorization-code grant authenticates with the Basic
    /// header instead.
    pub async fn exchange_code(&self, code: &str, verifier: Option<&str>) -> Result<Token> {
        match &self.grant {
            AuthorizationGrant::Pkce {
                client_id,
                redirect_uri,
            } => {
                let verifier = verifier.ok_or_else(|| {
                    Error::Validation("PKCE code exchange requires the code verifier".to_string())
                })?;
                let form = vec![
                    ("grant_type", "authorization_code".to_string()),
                    ("client_id", client_id.clone()),
                    ("code", code.to_string()),
                    ("code_verifier", verifier.to_string()),
                    ("redirect_uri", redirect_uri.clone()),
                ];
                self.request_token(form, false, None).await
            }
            AuthorizationGrant::AuthorizationCode { redirect_uri, .. } => {
                let form = vec![
                    ("grant_type", "authorization_code".to_string()),
                    ("code", code.to_string()),
                    ("redirect_uri", redirect_uri.clone()),
                ];
                self.request_token(form, true, None).await
            }
            _ => Err(Error::Validation(
                "this grant has no authorization code to exchange".to_string(),
            )),
        }
    }

    /// Obtains a token through the client-credentials flow. Such tokens
    /// never carry a refresh token.
    pub async fn request_client_credentials_token(&self) -> Result<Token> {
        match self.grant {
            AuthorizationGrant::ClientCredentials { .. } => {
                let form = vec![("grant_type", "client_credentials".to_string())];
                self.request_token(form, true, None).await
            }
            _ => Err(Error::Validation(
                "the client-credentials flow requires a client-credentials grant".to_string(),
            )),
        }
    }

    /// Obtains a fresh token without user interaction.
    ///
    /// When the current token carries a refresh token, the refresh flow is
    /// run and the old refresh token is carried forward if the provider
    /// omits a new one. A client-credentials grant simply re-runs its flow,
    /// since its tokens never have a refresh path. Everything else fails
    /// with an auth error.
    pub async fn refresh(&self, current: Option<&Token>) -> Result<Token> {
        let refresh_token = current.and_then(|token| token.refresh_token.clone());

        match refresh_token {
            Some(refresh_token) => {
                let mut form = vec![
                    ("grant_type", "refresh_token".to_string()),
                    ("refresh_token", refresh_token.clone()),
                ];
                // Public clients identify themselves in the form; the
                // confidential ones use the Basic header.
                let use_basic = self.grant.basic_credentials().is_some();
                if !use_basic {
                    form.push(("client_id", self.grant.client_id().to_string()));
                }
                self.request_token(form, use_basic, Some(refresh_token)).await
            }
            None => match self.grant {
                AuthorizationGrant::ClientCredentials { .. } => {
                    self.request_client_credentials_token().await
                }
                _ => Err(Error::Auth {
                    code: "no_refresh_token".to_string(),
                    description: "no refresh token is available; re-authenticate the user"
                        .to_string(),
                }),
            },
        }
    }

    /// One POST against the token endpoint, mapping non-2xx answers to the
    /// provider's OAuth error code and description.
    async fn request_token(
        &self,
        form: Vec<(&str, String)>,
        use_basic: bool,
        carry_forward_refresh: Option<String>,
    ) -> Result<Token> {
        log::debug!("requesting token from {}", self.token_url);

        let mut request = self.http.post(&self.token_url).form(&form);
        if use_basic {
            if let Some((client_id, client_secret)) = self.grant.basic_credentials() {
                request = request.basic_auth(client_id, Some(client_secret));
            }
        }

        let response = request.send().await.map_err(Error::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body: AuthErrorBody = response.json().await.unwrap_or_default();
            let code = if body.error.is_empty() {
                format!("http_{}", status.as_u16())
            } else {
                body.error
            };
            let description = body
                .error_description
                .unwrap_or_else(|| "the token endpoint rejected the request".to_string());
            return Err(Error::Auth { code, description });
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        Ok(Token::from_response(token_response, carry_forward_refresh))
    }
}
