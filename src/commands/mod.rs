//! Tauri command handlers for the frontend.
//!
//! This module exposes commands that can be invoked from the webview:
//! - [`upload_image`] / [`open_image`]: Set the original image
//! - [`request_depth`]: Generate a depth map
//! - [`request_light`]: Apply the custom light
//! - [`reset_session`]: Start over
//! - [`set_depth_settings`] / [`set_light_settings`]: Slider updates
//! - [`get_session`]: Current state

mod session;

pub use session::*;
