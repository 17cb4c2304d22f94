//! Request handlers.
//!
//! The multipart boundary maps form fields onto a [`BuildRequest`], hands it
//! to the pipeline, and turns the outcome into a download or an error
//! payload. The caller always receives exactly one of the two.

use axum::body::Body;
use axum::extract::multipart::Multipart;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use tokio_util::io::ReaderStream;

use crate::pipeline::{BuildOutcome, BuildRequest, Error};

use super::models::{ErrorResponse, HealthResponse};
use super::AppState;

/// GET /healthz — liveness probe.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /generate-apk — build and return a signed APK.
///
/// Accepts multipart/form-data with `appName` (text), `websiteURL` (text)
/// and `icon` (file, optional). Responds 400 when required fields are
/// missing or hostile, 500 with the captured diagnostic when a pipeline
/// stage fails, and 200 streaming the signed APK as an attachment on
/// success.
pub async fn generate_apk(State(state): State<AppState>, multipart: Multipart) -> Response {
    let request = match read_build_request(multipart).await {
        Ok(request) => request,
        Err(response) => return response,
    };

    match state.pipeline.build(request).await {
        Ok(outcome) => apk_download_response(outcome).await,
        Err(error) => pipeline_error_response(&error),
    }
}

/// Collects the known multipart fields into a [`BuildRequest`].
///
/// Unknown fields are drained and ignored. Field presence is not enforced
/// here; the pipeline's own validation names what is missing.
async fn read_build_request(mut multipart: Multipart) -> Result<BuildRequest, Response> {
    let mut request = BuildRequest::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(bad_request(format!("malformed multipart body: {e}"))),
        };

        // The name borrows the field, which the body readers consume
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("appName") => {
                request.app_name = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("unreadable appName field: {e}")))?;
            }
            Some("websiteURL") => {
                request.website_url = field
                    .text()
                    .await
                    .map_err(|e| bad_request(format!("unreadable websiteURL field: {e}")))?;
            }
            Some("icon") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| bad_request(format!("unreadable icon upload: {e}")))?;
                // Browsers submit an empty part when no file was chosen
                if !bytes.is_empty() {
                    request.icon = Some(bytes);
                }
            }
            _ => {}
        }
    }

    Ok(request)
}

fn bad_request(error: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
}

/// Maps the pipeline error taxonomy onto HTTP statuses: client errors 400,
/// everything else 500, the diagnostic text carried in the body either way.
fn pipeline_error_response(error: &Error) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        log::error!("Build failed: {error}");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

/// Streams the signed APK back as a downloadable attachment.
async fn apk_download_response(outcome: BuildOutcome) -> Response {
    let file = match tokio::fs::File::open(&outcome.signed_apk).await {
        Ok(file) => file,
        Err(e) => {
            log::error!(
                "Signed APK vanished before delivery at {}: {e}",
                outcome.signed_apk.display()
            );
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("signed APK could not be read back: {e}"),
                }),
            )
                .into_response();
        }
    };

    // Non-ASCII slugs cannot appear in a header value; fall back to a fixed
    // download name for those.
    let file_name = outcome.identity.signed_apk_name();
    let disposition = format!("attachment; filename=\"{file_name}\"");
    let disposition = if disposition.is_ascii() {
        disposition
    } else {
        "attachment; filename=\"application-signed.apk\"".to_string()
    };

    let body = Body::from_stream(ReaderStream::new(file));
    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/vnd.android.package-archive")
        .header(header::CONTENT_LENGTH, outcome.size)
        .header(header::CONTENT_DISPOSITION, disposition)
        .header("x-checksum-sha256", outcome.checksum.as_str())
        .body(body)
    {
        Ok(response) => response,
        Err(e) => {
            log::error!("Failed to assemble download response: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
