pub(crate) mod google;

use async_trait::async_trait;

use crate::types::{RecognizeRequest, RecognizeResponse};

/// Trait for speech recognition backends
#[async_trait]
pub trait SttProvider: Send + Sync {
    /// Recognize speech in a complete audio file
    async fn recognize(&self, request: RecognizeRequest) -> crate::error::Result<RecognizeResponse>;

    /// Get the provider name
    fn name(&self) -> &str;
}
