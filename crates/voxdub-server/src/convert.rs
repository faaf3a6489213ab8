use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::StatusCode,
    response::IntoResponse,
};
use voxdub_pipeline::{ConvertError, SynthesizedAudio, UploadedAudio};

use crate::conversion::Conversion;

/// Multipart field carrying the audio file
const AUDIO_FIELD: &str = "audio";

/// Name assumed when the client sends none
const DEFAULT_FILENAME: &str = "audio.wav";

/// `POST /api/convert`
///
/// Credentials are checked before the body is read, so a misconfigured
/// server never consumes uploads.
pub async fn convert_handler(
    State(conversion): State<Conversion>,
    request: Request,
) -> Result<SynthesizedAudio, ConvertError> {
    let pipeline = conversion.pipeline()?;
    let upload = read_upload(request).await?;

    pipeline.run(upload).await
}

/// Any other method on `/api/convert`
pub async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
}

async fn read_upload(request: Request) -> Result<UploadedAudio, ConvertError> {
    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| ConvertError::Upload(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ConvertError::Upload(e.body_text()))?
    {
        if field.name() != Some(AUDIO_FIELD) {
            continue;
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_FILENAME)
            .to_string();
        let audio = field.bytes().await.map_err(|e| ConvertError::Upload(e.body_text()))?;

        tracing::debug!(%filename, bytes = audio.len(), "received upload");

        return Ok(UploadedAudio {
            audio: audio.to_vec(),
            filename,
        });
    }

    Err(ConvertError::Upload(format!("no `{AUDIO_FIELD}` field in form")))
}
