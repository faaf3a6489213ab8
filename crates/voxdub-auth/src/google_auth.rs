use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

use crate::{error::AuthError, service_account::ServiceAccountKey, service_account::TokenSource};

const API_KEY_HEADER: &str = "x-goog-api-key";

enum Method {
    ApiKey(SecretString),
    ServiceAccount(TokenSource),
}

/// Authorization shared by the speech, translation and synthesis clients
#[derive(Clone)]
pub struct GoogleAuth {
    method: Arc<Method>,
}

impl GoogleAuth {
    /// Authorize requests with a Google API key
    pub fn api_key(key: SecretString) -> Self {
        Self {
            method: Arc::new(Method::ApiKey(key)),
        }
    }

    /// Authorize requests with access tokens minted for a service account
    ///
    /// Tokens are fetched through `client` on first use and cached until
    /// shortly before they expire.
    pub fn service_account(key: ServiceAccountKey, client: Client) -> Result<Self, AuthError> {
        let source = TokenSource::new(key, client)?;

        Ok(Self {
            method: Arc::new(Method::ServiceAccount(source)),
        })
    }

    /// Short description for logs
    pub fn describe(&self) -> String {
        match self.method.as_ref() {
            Method::ApiKey(_) => "api key".to_string(),
            Method::ServiceAccount(source) => format!("service account {}", source.client_email()),
        }
    }

    /// Attach credentials to an outgoing request
    pub async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, AuthError> {
        match self.method.as_ref() {
            Method::ApiKey(key) => Ok(request.header(API_KEY_HEADER, key.expose_secret())),
            Method::ServiceAccount(source) => {
                let token = source.token().await?;
                Ok(request.bearer_auth(token.expose_secret()))
            }
        }
    }
}

impl std::fmt::Debug for GoogleAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAuth").field("method", &self.describe()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn api_key_is_sent_as_header() {
        let auth = GoogleAuth::api_key(SecretString::from("k-123"));
        let client = Client::new();

        let request = auth
            .authorize(client.get("http://localhost/"))
            .await
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()[API_KEY_HEADER], "k-123");
        assert!(request.headers().get(http::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn debug_output_hides_secret() {
        let auth = GoogleAuth::api_key(SecretString::from("very-secret"));
        let rendered = format!("{auth:?}");

        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("api key"));
    }
}
