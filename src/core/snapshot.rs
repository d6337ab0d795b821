//! Serializable view of the session for the frontend.

use serde::Serialize;
use crate::core::{DepthSettings, LightSettings, Session};

const ADD_DEPTH_LABEL: &str = "Add 3D Depth";
const UPDATE_DEPTH_LABEL: &str = "Update Depth";

/// Everything the frontend renders, with images as embedded data URIs.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub status: &'static str,
    pub original_image: Option<String>,
    pub depth_map_image: Option<String>,
    pub final_image: Option<String>,
    /// Main preview: final image if present, else the original
    pub display_image: Option<String>,
    /// Side-by-side original/depth comparison is shown once a depth map exists
    pub show_comparison: bool,
    pub busy: bool,
    pub status_message: Option<String>,
    pub error: Option<String>,
    pub depth_settings: DepthSettings,
    pub light_settings: LightSettings,
    pub can_request_depth: bool,
    pub can_request_light: bool,
    pub depth_button_label: &'static str,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let original_image = session.original().map(|image| image.to_data_url());
        let depth_map_image = session.depth_map().map(|image| image.to_data_url());
        let final_image = session.final_image().map(|image| image.to_data_url());
        let display_image = final_image.clone().or_else(|| original_image.clone());
        let can_start = session.can_start();

        Self {
            status: session.status().as_str(),
            show_comparison: depth_map_image.is_some(),
            depth_button_label: if depth_map_image.is_some() {
                UPDATE_DEPTH_LABEL
            } else {
                ADD_DEPTH_LABEL
            },
            original_image,
            depth_map_image,
            final_image,
            display_image,
            busy: session.is_busy(),
            status_message: session.status_message().map(str::to_string),
            error: session.error().map(str::to_string),
            depth_settings: *session.depth_settings(),
            light_settings: session.light_settings().clone(),
            can_request_depth: can_start,
            can_request_light: can_start,
        }
    }
}
