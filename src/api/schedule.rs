use axum::{extract::State, response::Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::WakeWindow;
use crate::services::wake_interval;

/// Response for the wake-up interval query
#[derive(Debug, Serialize, ToSchema)]
pub struct WakeupIntervalResponse {
    /// Seconds until the frame should wake up again
    pub interval: u64,
}

/// Wake-up interval
///
/// Hourly during the day, otherwise the time left until the window opens.
#[utoipa::path(
    get,
    path = "/wakeup-interval",
    responses(
        (status = 200, description = "Seconds to sleep", body = WakeupIntervalResponse),
    ),
    tag = "Schedule"
)]
pub async fn handle_wakeup_interval(
    State(window): State<WakeWindow>,
) -> Json<WakeupIntervalResponse> {
    let now = chrono::Local::now().naive_local();
    let interval = wake_interval(now, &window);
    tracing::debug!(interval, "Wake-up interval requested");

    Json(WakeupIntervalResponse { interval })
}
