use serde::Deserialize;

use crate::format::{BarcodeFormat, BarcodeFormat2};
use crate::modes::{ResultCoordinateType, TerminatePhase};

/// A point in engine coordinates (pixels or percent, see
/// [`LocalizationResult::result_coordinate_type`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

/// Position of a detected symbol.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "RawLocalizationResult")]
pub struct LocalizationResult {
    pub terminate_phase: TerminatePhase,
    pub barcode_format: BarcodeFormat,
    pub barcode_format_string: String,
    pub barcode_format_2: BarcodeFormat2,
    pub barcode_format_string_2: String,
    /// Quadrilateral corners in the order the engine reports them. The
    /// starting corner and winding direction are engine-defined.
    pub localization_points: [Point; 4],
    /// Rotation angle in degrees.
    pub angle: i32,
    pub module_size: i32,
    pub page_number: i32,
    pub region_name: Option<String>,
    pub document_name: Option<String>,
    pub result_coordinate_type: ResultCoordinateType,
    pub accompanying_text_bytes: Vec<u8>,
    pub confidence: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawLocalizationResult {
    terminate_phase: TerminatePhase,
    barcode_format: BarcodeFormat,
    barcode_format_string: String,
    #[serde(rename = "BarcodeFormat_2")]
    barcode_format_2: BarcodeFormat2,
    #[serde(rename = "BarcodeFormatString_2")]
    barcode_format_string_2: String,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    x3: i32,
    y3: i32,
    x4: i32,
    y4: i32,
    angle: i32,
    module_size: i32,
    page_number: i32,
    #[serde(default)]
    region_name: Option<String>,
    #[serde(default)]
    document_name: Option<String>,
    result_coordinate_type: ResultCoordinateType,
    #[serde(default)]
    accompanying_text_bytes: Option<Vec<u8>>,
    confidence: i32,
}

impl From<RawLocalizationResult> for LocalizationResult {
    fn from(raw: RawLocalizationResult) -> Self {
        Self {
            terminate_phase: raw.terminate_phase,
            barcode_format: raw.barcode_format,
            barcode_format_string: raw.barcode_format_string,
            barcode_format_2: raw.barcode_format_2,
            barcode_format_string_2: raw.barcode_format_string_2,
            localization_points: [
                Point { x: raw.x1, y: raw.y1 },
                Point { x: raw.x2, y: raw.y2 },
                Point { x: raw.x3, y: raw.y3 },
                Point { x: raw.x4, y: raw.y4 },
            ],
            angle: raw.angle,
            module_size: raw.module_size,
            page_number: raw.page_number,
            region_name: raw.region_name,
            document_name: raw.document_name,
            result_coordinate_type: raw.result_coordinate_type,
            accompanying_text_bytes: raw.accompanying_text_bytes.unwrap_or_default(),
            confidence: raw.confidence,
        }
    }
}

impl LocalizationResult {
    /// Axis-aligned bounds of the quadrilateral as `[min_x, min_y, max_x, max_y]`.
    pub fn bounding_box(&self) -> [i32; 4] {
        let pts = &self.localization_points;
        let min_x = pts.iter().map(|p| p.x).min().unwrap_or(0);
        let min_y = pts.iter().map(|p| p.y).min().unwrap_or(0);
        let max_x = pts.iter().map(|p| p.x).max().unwrap_or(0);
        let max_y = pts.iter().map(|p| p.y).max().unwrap_or(0);
        [min_x, min_y, max_x, max_y]
    }
}
