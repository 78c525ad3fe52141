pub mod frames;
pub mod schedule;

pub use frames::{handle_get_img_data, handle_status, __path_handle_get_img_data, __path_handle_status};
pub use schedule::{handle_wakeup_interval, WakeupIntervalResponse, __path_handle_wakeup_interval};

use utoipa::OpenApi;

use crate::services::RotationStatus;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "acep-frame API",
        description = "Serves converted frames to a 7-color e-paper photo frame",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(handle_get_img_data, handle_status, handle_wakeup_interval),
    components(schemas(RotationStatus, WakeupIntervalResponse)),
    tags(
        (name = "Frames", description = "Frame rotation and download"),
        (name = "Schedule", description = "Device wake-up scheduling")
    )
)]
pub struct ApiDoc;
