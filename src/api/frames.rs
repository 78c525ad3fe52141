use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::services::{FrameLibrary, RotationStatus};

/// Fetch the next frame
///
/// Returns the next converted frame as a file download. Frames are served in
/// shuffled order and none repeats until all of them have been sent.
#[utoipa::path(
    get,
    path = "/get-img-data",
    responses(
        (status = 200, description = "Frame listing", content_type = "text/plain"),
        (status = 404, description = "No frames converted yet"),
    ),
    tag = "Frames"
)]
pub async fn handle_get_img_data(
    State(library): State<Arc<FrameLibrary>>,
) -> Result<Response, ApiError> {
    let frame = library.next_frame().await?.ok_or(ApiError::NoFrames)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                content_disposition(&frame.name),
            ),
        ],
        frame.contents,
    )
        .into_response())
}

/// `attachment` header value with `name` as a quoted-string.
fn content_disposition(name: &str) -> String {
    let mut value = String::with_capacity(name.len() + 24);
    value.push_str("attachment; filename=\"");
    for c in name.chars() {
        match c {
            '"' | '\\' => {
                value.push('\\');
                value.push(c);
            }
            // Not representable in a header value.
            c if c.is_control() => value.push('_'),
            c => value.push(c),
        }
    }
    value.push('"');
    value
}

/// Rotation status
///
/// Picks up newly converted frames and reports how many are left in the
/// current cycle.
#[utoipa::path(
    get,
    path = "/status",
    responses(
        (status = 200, description = "Rotation counters", body = RotationStatus),
    ),
    tag = "Frames"
)]
pub async fn handle_status(
    State(library): State<Arc<FrameLibrary>>,
) -> Result<Json<RotationStatus>, ApiError> {
    Ok(Json(library.status().await?))
}
