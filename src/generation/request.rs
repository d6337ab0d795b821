//! Maps session settings to natural-language instructions for the image service.
//!
//! Both builders are pure: the same image and settings always produce the same
//! instruction and payload order.

use std::fmt;
use crate::core::{DepthSettings, ImageAsset, LightSettings};

/// Lower edge of the middle bucket; values below it fall in the first bucket.
const LOW_THRESHOLD: u8 = 33;
/// Upper edge of the middle bucket; values above it fall in the last bucket.
const HIGH_THRESHOLD: u8 = 66;

/// Instruction plus image payloads for one generation round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub instruction: String,
    pub images: Vec<ImageAsset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalBucket {
    Left,
    Center,
    Right,
}

impl HorizontalBucket {
    pub fn from_percent(x: u8) -> Self {
        if x < LOW_THRESHOLD {
            Self::Left
        } else if x > HIGH_THRESHOLD {
            Self::Right
        } else {
            Self::Center
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalBucket {
    Top,
    Middle,
    Bottom,
}

impl VerticalBucket {
    pub fn from_percent(y: u8) -> Self {
        if y < LOW_THRESHOLD {
            Self::Top
        } else if y > HIGH_THRESHOLD {
            Self::Bottom
        } else {
            Self::Middle
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

/// Discrete light direction derived from the x/y sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightPosition {
    pub vertical: VerticalBucket,
    pub horizontal: HorizontalBucket,
}

impl LightPosition {
    pub fn from_settings(settings: &LightSettings) -> Self {
        Self {
            vertical: VerticalBucket::from_percent(settings.y),
            horizontal: HorizontalBucket::from_percent(settings.x),
        }
    }
}

impl fmt::Display for LightPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.vertical, self.horizontal) {
            (VerticalBucket::Middle, HorizontalBucket::Center) => f.write_str("front"),
            (v, h) => write!(f, "{}-{}", v.as_str(), h.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityLevel {
    Soft,
    Moderate,
    Harsh,
}

impl IntensityLevel {
    pub fn from_percent(intensity: u8) -> Self {
        if intensity < LOW_THRESHOLD {
            Self::Soft
        } else if intensity > HIGH_THRESHOLD {
            Self::Harsh
        } else {
            Self::Moderate
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Soft => "soft",
            Self::Moderate => "moderate",
            Self::Harsh => "harsh",
        }
    }
}

/// Builds the grayscale depth map request. The payload is the original image only.
pub fn build_depth_request(original: &ImageAsset, settings: &DepthSettings) -> GenerationRequest {
    let instruction = format!(
        "Generate a detailed, high-contrast grayscale depth map for this image. \
         White should represent objects closest to the camera, and black should represent \
         objects farthest away. Adjust the depth focus based on this offset: {} \
         (where 0 is far focus, 100 is close focus). The output must be only the depth map \
         image, with no surrounding text, borders, or labels.",
        settings.offset
    );

    GenerationRequest {
        instruction,
        images: vec![original.clone()],
    }
}

/// Builds the re-lighting request. The depth map, when present, follows the
/// original in the payload and the instruction tells the model to use it.
pub fn build_light_request(
    original: &ImageAsset,
    settings: &LightSettings,
    depth_map: Option<&ImageAsset>,
) -> GenerationRequest {
    let position = LightPosition::from_settings(settings);
    let intensity = IntensityLevel::from_percent(settings.intensity);

    let mut instruction = String::from("Re-light this photo with a professional, cinematic quality.");

    if depth_map.is_some() {
        instruction.push_str(
            " Use the provided second image as a depth map to create realistic lighting and shadow falloff.",
        );
    }

    instruction.push_str(&format!(
        " Add a custom light source with these properties:\n\
         - Color: A {} light.\n\
         - Position: Coming from the {} of the frame.\n\
         - Intensity: A {} intensity.\n\
         The final result should be a beautifully re-lit version of the original photo. \
         Output only the edited image.",
        settings.color,
        position,
        intensity.as_str()
    ));

    let mut images = vec![original.clone()];
    if let Some(depth) = depth_map {
        images.push(depth.clone());
    }

    GenerationRequest { instruction, images }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo() -> ImageAsset {
        ImageAsset::new("image/jpeg", vec![1, 2, 3])
    }

    fn depth() -> ImageAsset {
        ImageAsset::new("image/png", vec![9, 9])
    }

    fn light(x: u8, y: u8, intensity: u8) -> LightSettings {
        LightSettings {
            x,
            y,
            intensity,
            ..LightSettings::default()
        }
    }

    #[test]
    fn depth_instruction_embeds_offset_verbatim() {
        for offset in 0..=100u8 {
            let request = build_depth_request(&photo(), &DepthSettings { offset });
            assert!(
                request.instruction.contains(&format!("offset: {offset} (")),
                "offset {offset} missing from instruction"
            );
        }
    }

    #[test]
    fn depth_request_describes_polarity_and_output() {
        let request = build_depth_request(&photo(), &DepthSettings { offset: 0 });
        assert!(request.instruction.contains("White should represent objects closest"));
        assert!(request.instruction.contains("0 is far focus, 100 is close focus"));
        assert!(request.instruction.contains("no surrounding text, borders, or labels"));
        assert_eq!(request.images, vec![photo()]);
    }

    #[test]
    fn horizontal_buckets_use_strict_bounds() {
        assert_eq!(HorizontalBucket::from_percent(0), HorizontalBucket::Left);
        assert_eq!(HorizontalBucket::from_percent(32), HorizontalBucket::Left);
        assert_eq!(HorizontalBucket::from_percent(33), HorizontalBucket::Center);
        assert_eq!(HorizontalBucket::from_percent(66), HorizontalBucket::Center);
        assert_eq!(HorizontalBucket::from_percent(67), HorizontalBucket::Right);
        assert_eq!(HorizontalBucket::from_percent(100), HorizontalBucket::Right);
    }

    #[test]
    fn vertical_buckets_use_strict_bounds() {
        assert_eq!(VerticalBucket::from_percent(32), VerticalBucket::Top);
        assert_eq!(VerticalBucket::from_percent(33), VerticalBucket::Middle);
        assert_eq!(VerticalBucket::from_percent(66), VerticalBucket::Middle);
        assert_eq!(VerticalBucket::from_percent(67), VerticalBucket::Bottom);
    }

    #[test]
    fn intensity_levels_use_strict_bounds() {
        assert_eq!(IntensityLevel::from_percent(32), IntensityLevel::Soft);
        assert_eq!(IntensityLevel::from_percent(33), IntensityLevel::Moderate);
        assert_eq!(IntensityLevel::from_percent(66), IntensityLevel::Moderate);
        assert_eq!(IntensityLevel::from_percent(67), IntensityLevel::Harsh);
    }

    #[test]
    fn only_middle_center_collapses_to_front() {
        for x in [10u8, 50, 90] {
            for y in [10u8, 50, 90] {
                let position = LightPosition::from_settings(&light(x, y, 50)).to_string();
                if x == 50 && y == 50 {
                    assert_eq!(position, "front");
                } else {
                    assert!(position.contains('-'), "{x},{y} gave {position}");
                    assert_ne!(position, "front");
                }
            }
        }
        assert_eq!(LightPosition::from_settings(&light(90, 10, 50)).to_string(), "top-right");
        assert_eq!(LightPosition::from_settings(&light(50, 90, 50)).to_string(), "bottom-center");
        assert_eq!(LightPosition::from_settings(&light(10, 50, 50)).to_string(), "middle-left");
    }

    #[test]
    fn light_request_with_depth_map() {
        let settings = LightSettings {
            color: "#ff0000".to_string(),
            ..light(10, 10, 80)
        };
        let request = build_light_request(&photo(), &settings, Some(&depth()));

        assert!(request.instruction.starts_with("Re-light this photo"));
        assert!(request.instruction.contains("second image as a depth map"));
        assert!(request.instruction.contains("A #ff0000 light."));
        assert!(request.instruction.contains("Coming from the top-left of the frame."));
        assert!(request.instruction.contains("A harsh intensity."));
        assert!(request.instruction.ends_with("Output only the edited image."));
        assert_eq!(request.images, vec![photo(), depth()]);
    }

    #[test]
    fn light_request_without_depth_map() {
        let request = build_light_request(&photo(), &light(50, 50, 20), None);

        assert!(!request.instruction.contains("depth map"));
        assert!(request.instruction.contains("Coming from the front of the frame."));
        assert!(request.instruction.contains("A soft intensity."));
        assert_eq!(request.images, vec![photo()]);
    }

    #[test]
    fn color_is_passed_through_unvalidated() {
        let settings = LightSettings {
            color: "warm sunset".to_string(),
            ..LightSettings::default()
        };
        let request = build_light_request(&photo(), &settings, None);
        assert!(request.instruction.contains("A warm sunset light."));
    }
}
