pub(crate) mod google;

use async_trait::async_trait;

use crate::types::{TranslationRequest, TranslationResponse};

/// Trait for machine translation backends
#[async_trait]
pub trait TranslateProvider: Send + Sync {
    /// Translate a single text
    async fn translate(&self, request: TranslationRequest) -> crate::error::Result<TranslationResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
