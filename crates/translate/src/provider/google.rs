use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use voxdub_auth::GoogleAuth;

use crate::{
    error::TranslateError,
    types::{TranslationRequest, TranslationResponse},
};

use super::TranslateProvider;

const DEFAULT_TRANSLATE_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Google Cloud Translation (basic, v2)
pub struct GoogleTranslateProvider {
    client: Client,
    base_url: String,
    auth: GoogleAuth,
    name: String,
}

impl GoogleTranslateProvider {
    pub fn new(name: String, client: Client, auth: GoogleAuth, base_url: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_TRANSLATE_API_URL.to_string());

        Self {
            client,
            base_url,
            auth,
            name,
        }
    }
}

#[derive(Serialize)]
struct GoogleTranslateRequest<'a> {
    q: &'a str,
    target: &'a str,
    /// `text` keeps the service from HTML-escaping the output
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

#[derive(Deserialize)]
struct GoogleTranslateResponse {
    data: GoogleTranslations,
}

#[derive(Deserialize)]
struct GoogleTranslations {
    #[serde(default)]
    translations: Vec<GoogleTranslation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

fn wire_request(request: &TranslationRequest) -> GoogleTranslateRequest<'_> {
    GoogleTranslateRequest {
        q: &request.text,
        target: &request.target_language,
        format: "text",
        source: request.source_language.as_deref(),
    }
}

fn first_translation(response: GoogleTranslateResponse) -> crate::error::Result<TranslationResponse> {
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|translation| TranslationResponse {
            text: translation.translated_text,
            detected_source_language: translation.detected_source_language,
        })
        .ok_or(TranslateError::EmptyResponse)
}

#[async_trait]
impl TranslateProvider for GoogleTranslateProvider {
    async fn translate(&self, request: TranslationRequest) -> crate::error::Result<TranslationResponse> {
        let url = self.base_url.trim_end_matches('/');

        tracing::debug!(
            "Google translate request: target={}, input_len={}",
            request.target_language,
            request.text.len(),
        );

        let response = self
            .auth
            .authorize(self.client.post(url))
            .await?
            .json(&wire_request(&request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Google translate request failed: {e}");
                TranslateError::ConnectionError(format!("Failed to send request to Google Translate: {e}"))
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());

            tracing::error!("Google translate API error ({status}): {error_text}");

            return Err(match status.as_u16() {
                401 | 403 => TranslateError::AuthenticationFailed(error_text),
                400 => TranslateError::InvalidRequest(error_text),
                _ => TranslateError::ProviderApiError {
                    status: status.as_u16(),
                    message: error_text,
                },
            });
        }

        let result: GoogleTranslateResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse Google translate response: {e}");
            TranslateError::InternalError(Some(e.to_string()))
        })?;

        let translation = first_translation(result)?;

        tracing::debug!(
            "Google translation complete, output_len={}, detected={:?}",
            translation.text.len(),
            translation.detected_source_language,
        );

        Ok(translation)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
