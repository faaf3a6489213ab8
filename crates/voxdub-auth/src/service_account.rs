use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use jwt_compact::{AlgorithmExt, Claims, Header, alg::Rsa};
use reqwest::Client;
use rsa::{RsaPrivateKey, pkcs8::DecodePrivateKey};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::AuthError;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME: Duration = Duration::from_secs(3600);
/// Tokens this close to expiry are refreshed before use
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Google service-account key document
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: String,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: Option<String>,
    pub private_key: SecretString,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Parse and sanity-check a service-account JSON document
    pub fn from_json(raw: &str) -> Result<Self, AuthError> {
        let key: Self = serde_json::from_str(raw).map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        if key.key_type != "service_account" {
            return Err(AuthError::InvalidKey(format!(
                "expected type \"service_account\", got \"{}\"",
                key.key_type
            )));
        }

        if key.client_email.is_empty() {
            return Err(AuthError::InvalidKey("client_email is empty".to_string()));
        }

        Ok(key)
    }
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

const fn default_expires_in() -> u64 {
    3600
}

struct AccessToken {
    value: SecretString,
    expires_at: Instant,
}

/// Mints and caches OAuth2 access tokens for a service account
pub(crate) struct TokenSource {
    key: ServiceAccountKey,
    signing_key: RsaPrivateKey,
    client: Client,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(key: ServiceAccountKey, client: Client) -> Result<Self, AuthError> {
        let signing_key = RsaPrivateKey::from_pkcs8_pem(key.private_key.expose_secret())
            .map_err(|e| AuthError::InvalidKey(format!("private_key is not a PKCS#8 RSA key: {e}")))?;

        Ok(Self {
            key,
            signing_key,
            client,
            cached: Mutex::new(None),
        })
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    /// Return a valid access token, exchanging a new assertion when needed
    ///
    /// The lock is held across the exchange so concurrent requests share a
    /// single refresh.
    pub async fn token(&self) -> Result<SecretString, AuthError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && token.expires_at > Instant::now() + REFRESH_MARGIN
        {
            return Ok(token.value.clone());
        }

        let fresh = self.exchange().await?;
        let value = fresh.value.clone();
        *cached = Some(fresh);

        Ok(value)
    }

    fn assertion(&self) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| AuthError::Signing(e.to_string()))?
            .as_secs();

        let claims = Claims::new(AssertionClaims {
            iss: &self.key.client_email,
            scope: CLOUD_PLATFORM_SCOPE,
            aud: &self.key.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME.as_secs(),
        });

        let mut header = Header::empty();
        if let Some(key_id) = &self.key.private_key_id {
            header = header.with_key_id(key_id.clone());
        }

        Rsa::rs256()
            .token(&header, &claims, &self.signing_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    async fn exchange(&self) -> Result<AccessToken, AuthError> {
        let assertion = self.assertion()?;

        tracing::debug!(client_email = %self.key.client_email, "requesting Google access token");

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("failed to reach token endpoint: {e}")))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("token endpoint error ({status}): {error_text}");
            return Err(AuthError::TokenExchange(format!("token endpoint returned {status}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::TokenExchange(format!("malformed token response: {e}")))?;

        Ok(AccessToken {
            value: SecretString::from(token.access_token),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        })
    }
}
