//! Parameters of a video (frame decoding) session.

use serde::{Deserialize, Serialize};

use crate::bag::{read_bag, write_bag, NativeBag};
use crate::image::ImageGeometry;
use crate::modes::ImagePixelFormat;
use crate::region::RegionDefinition;

/// Configuration for continuous frame decoding.
///
/// `width`, `height`, `stride` and `image_pixel_format` describe every frame
/// appended to the session. The frame filters (`region`, `threshold`, `fps`,
/// `auto_filter`) are hints for the engine: they take effect only when the
/// engine overrides `NativeEngine::decode_frame`, and the default decodes
/// each frame whole.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FrameDecodingParameters {
    /// Frames waiting to be decoded; further frames are dropped.
    pub max_queue_length: i32,
    /// Decoded frame results retained for later retrieval.
    pub max_result_queue_length: i32,
    pub width: i32,
    pub height: i32,
    pub stride: i32,
    pub image_pixel_format: ImagePixelFormat,
    /// Area of each frame to decode. Applied by engines that override
    /// `decode_frame` (the Dynamsoft engine does); ignored otherwise.
    #[serde(flatten)]
    pub region: RegionDefinition,
    /// Similarity threshold (0..=1) below which a frame is skipped as blurry.
    /// Only engines running their own frame filter read it.
    pub threshold: f64,
    /// Expected frame rate; 0 lets the engine estimate it. Only engines
    /// running their own frame filter read it.
    #[serde(rename = "FPS")]
    pub fps: i32,
    /// Non-zero enables filtering of blurry or duplicate frames. Only engines
    /// running their own frame filter read it.
    pub auto_filter: i32,
}

impl Default for FrameDecodingParameters {
    fn default() -> Self {
        Self {
            max_queue_length: 3,
            max_result_queue_length: 10,
            width: 0,
            height: 0,
            stride: 0,
            image_pixel_format: ImagePixelFormat::Grayscaled,
            region: RegionDefinition::default(),
            threshold: 0.1,
            fps: 0,
            auto_filter: 1,
        }
    }
}

impl FrameDecodingParameters {
    /// Defaults for frames of the given layout.
    pub fn for_frames(geometry: ImageGeometry) -> Self {
        Self {
            width: geometry.width,
            height: geometry.height,
            stride: geometry.stride,
            image_pixel_format: geometry.pixel_format,
            ..Self::default()
        }
    }

    pub fn from_bag(bag: &NativeBag) -> Result<Self, serde_json::Error> {
        read_bag(bag)
    }

    pub fn update_bag(&self, bag: &mut NativeBag) -> Result<(), serde_json::Error> {
        write_bag(self, bag)
    }

    pub fn to_bag(&self) -> Result<NativeBag, serde_json::Error> {
        let mut bag = NativeBag::new();
        self.update_bag(&mut bag)?;
        Ok(bag)
    }

    /// Layout of every frame in the session.
    pub fn geometry(&self) -> ImageGeometry {
        ImageGeometry {
            width: self.width,
            height: self.height,
            stride: self.stride,
            pixel_format: self.image_pixel_format,
        }
    }

    /// Capacity of the pending-frame queue (at least one slot).
    pub fn queue_capacity(&self) -> usize {
        usize::try_from(self.max_queue_length).unwrap_or(0).max(1)
    }

    /// Number of frame results retained (at least one).
    pub fn result_capacity(&self) -> usize {
        usize::try_from(self.max_result_queue_length)
            .unwrap_or(0)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    fn native_defaults() -> NativeBag {
        json!({
            "MaxQueueLength": 3,
            "MaxResultQueueLength": 10,
            "Width": 0,
            "Height": 0,
            "Stride": 0,
            "ImagePixelFormat": 2,
            "RegionTop": 0,
            "RegionLeft": 0,
            "RegionRight": 0,
            "RegionBottom": 0,
            "RegionMeasuredByPercentage": 0,
            "Threshold": 0.1,
            "FPS": 0,
            "AutoFilter": 1,
        })
        .as_object()
        .cloned()
        .expect("object")
    }

    #[test]
    fn engine_defaults_map_to_default() {
        let params = FrameDecodingParameters::from_bag(&native_defaults()).expect("read");
        assert_eq!(params, FrameDecodingParameters::default());
        assert_relative_eq!(params.threshold, 0.1);
    }

    #[test]
    fn write_of_read_reproduces_payload() {
        let mut native = native_defaults();
        native["Width"] = json!(640);
        native["Height"] = json!(480);
        native["Stride"] = json!(640);
        native["ImagePixelFormat"] = json!(42);
        let params = FrameDecodingParameters::from_bag(&native).expect("read");
        assert_eq!(params.image_pixel_format, ImagePixelFormat::Other(42));
        assert_eq!(params.to_bag().expect("write"), native);
    }

    #[test]
    fn geometry_follows_frame_fields() {
        let geometry = ImageGeometry::packed(320, 240, ImagePixelFormat::Rgb888);
        let params = FrameDecodingParameters::for_frames(geometry);
        assert_eq!(params.geometry(), geometry);
        assert_eq!(params.stride, 960);
        assert_eq!(params.max_queue_length, 3);
    }

    #[test]
    fn capacities_never_drop_to_zero() {
        let params = FrameDecodingParameters {
            max_queue_length: 0,
            max_result_queue_length: -4,
            ..FrameDecodingParameters::default()
        };
        assert_eq!(params.queue_capacity(), 1);
        assert_eq!(params.result_capacity(), 1);
    }
}
