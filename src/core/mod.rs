//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`]: Application state managed by Tauri
//! - [`Session`]: The editing session and its transitions
//! - [`DepthSettings`] / [`LightSettings`]: User-adjustable parameters
//! - [`ImageAsset`]: An encoded image held by the session
//! - [`SessionSnapshot`]: What the frontend renders

mod image;
mod settings;
mod snapshot;
mod state;
pub mod session;

pub use image::ImageAsset;
pub use session::{Operation, Session, SessionStatus};
pub use settings::{DepthSettings, LightSettings};
pub use snapshot::SessionSnapshot;
pub use state::AppState;
