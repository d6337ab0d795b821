//! Request translation and the external image generation client.
//!
//! # Architecture
//!
//! - [`request`]: Pure builders mapping settings to a [`GenerationRequest`].
//! - [`gemini`]: [`GeminiClient`], the `generateContent` REST implementation of [`ImageGenerator`].

pub mod gemini;
pub mod request;

use std::future::Future;
use crate::core::ImageAsset;
use crate::utils::GenerationResult;

pub use gemini::GeminiClient;
pub use request::{
    GenerationRequest,
    HorizontalBucket,
    IntensityLevel,
    LightPosition,
    VerticalBucket,
    build_depth_request,
    build_light_request,
};

/// A service that turns an instruction plus inline images into one image.
///
/// Each call is a single independent round trip: implementations must not
/// retry, cache, or rate-limit.
pub trait ImageGenerator: Send + Sync + 'static {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = GenerationResult<ImageAsset>> + Send;
}
