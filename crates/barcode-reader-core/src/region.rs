use serde::{Deserialize, Serialize};

/// Region of interest as the engine stores it: four edges plus a unit flag.
///
/// With `measured_by_percentage == 1` the edges are percentages (0..=100) of
/// the image size; otherwise they are pixel coordinates. All-zero edges
/// select the whole image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionDefinition {
    #[serde(rename = "RegionTop")]
    pub top: i32,
    #[serde(rename = "RegionBottom")]
    pub bottom: i32,
    #[serde(rename = "RegionLeft")]
    pub left: i32,
    #[serde(rename = "RegionRight")]
    pub right: i32,
    #[serde(rename = "RegionMeasuredByPercentage")]
    pub measured_by_percentage: i32,
}

/// Interpreted form of a [`RegionDefinition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionBounds {
    /// The whole image.
    Full,
    Pixels {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
    /// Edges in percent of the image width/height.
    Percentage {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
}

/// Pixel-space rectangle; `right`/`bottom` are edge coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RegionDefinition {
    pub fn pixels(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            measured_by_percentage: 0,
        }
    }

    pub fn percentage(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
            measured_by_percentage: 1,
        }
    }

    #[inline]
    pub fn is_percentage(&self) -> bool {
        self.measured_by_percentage == 1
    }

    pub fn bounds(&self) -> RegionBounds {
        let Self {
            top,
            bottom,
            left,
            right,
            ..
        } = *self;
        if top == 0 && bottom == 0 && left == 0 && right == 0 {
            RegionBounds::Full
        } else if self.is_percentage() {
            RegionBounds::Percentage {
                left,
                top,
                right,
                bottom,
            }
        } else {
            RegionBounds::Pixels {
                left,
                top,
                right,
                bottom,
            }
        }
    }

    /// Resolve the region against an image of `width` x `height` pixels.
    pub fn to_pixels(&self, width: i32, height: i32) -> PixelRect {
        self.bounds().to_pixels(width, height)
    }
}

impl RegionBounds {
    /// Resolve to pixel edges, clamped to the image.
    pub fn to_pixels(&self, width: i32, height: i32) -> PixelRect {
        let width = width.max(0);
        let height = height.max(0);
        let clamp_x = |v: i32| v.clamp(0, width);
        let clamp_y = |v: i32| v.clamp(0, height);
        let scale = |pct: i32, size: i32| {
            (i64::from(pct.clamp(0, 100)) * i64::from(size) / 100) as i32
        };
        match *self {
            RegionBounds::Full => PixelRect {
                left: 0,
                top: 0,
                right: width,
                bottom: height,
            },
            RegionBounds::Pixels {
                left,
                top,
                right,
                bottom,
            } => PixelRect {
                left: clamp_x(left),
                top: clamp_y(top),
                right: clamp_x(right),
                bottom: clamp_y(bottom),
            },
            RegionBounds::Percentage {
                left,
                top,
                right,
                bottom,
            } => PixelRect {
                left: scale(left, width),
                top: scale(top, height),
                right: scale(right, width),
                bottom: scale(bottom, height),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_region_scales_with_image() {
        let region = RegionDefinition {
            top: 10,
            bottom: 90,
            left: 0,
            right: 100,
            measured_by_percentage: 1,
        };
        assert!(matches!(region.bounds(), RegionBounds::Percentage { .. }));
        let rect = region.to_pixels(200, 1000);
        assert_eq!(
            rect,
            PixelRect {
                left: 0,
                top: 100,
                right: 200,
                bottom: 900
            }
        );
    }

    #[test]
    fn pixel_region_is_clamped_not_scaled() {
        let region = RegionDefinition::pixels(10, 10, 90, 5000);
        assert!(matches!(region.bounds(), RegionBounds::Pixels { .. }));
        let rect = region.to_pixels(640, 480);
        assert_eq!(
            rect,
            PixelRect {
                left: 10,
                top: 10,
                right: 90,
                bottom: 480
            }
        );
    }

    #[test]
    fn zero_region_is_full_image() {
        let region = RegionDefinition::default();
        assert_eq!(region.bounds(), RegionBounds::Full);
        assert_eq!(region.to_pixels(4, 3).right, 4);
    }
}
