//! Pipeline trace artifacts retained by the engine for diagnostics.

use serde::Deserialize;
use serde_json::Value;

use crate::bag::{null_as_default, read_list};
use crate::localization::{LocalizationResult, Point};
use crate::modes::{
    BarcodeComplementMode, BinarizationMode, ColourClusteringMode, ColourConversionMode,
    DeformationResistingMode, DpmCodeReadingMode, GrayscaleTransformationMode, ImagePixelFormat,
    ImagePreprocessingMode, IntermediateResultDataType, LocalizationMode, RegionPredetectionMode,
    TextFilterMode,
};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ImageData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bytes: Vec<u8>,
    pub width: i32,
    pub height: i32,
    pub stride: i32,
    pub image_pixel_format: ImagePixelFormat,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Contour {
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: Vec<Point>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineSegment {
    pub start_point: Point,
    pub end_point: Point,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lines_confidence_coefficients: Vec<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RegionOfInterest {
    #[serde(rename = "ROIId")]
    pub roi_id: i32,
    #[serde(rename = "Point")]
    pub point: Point,
    #[serde(rename = "Width")]
    pub width: i32,
    #[serde(rename = "Height")]
    pub height: i32,
}

/// Homogeneous list of pipeline artifacts, tagged by element type.
#[derive(Clone, Debug, PartialEq)]
pub enum IntermediateItems {
    Images(Vec<ImageData>),
    Contours(Vec<Contour>),
    LineSegments(Vec<LineSegment>),
    LocalizationResults(Vec<LocalizationResult>),
    RegionsOfInterest(Vec<RegionOfInterest>),
    /// Element type this crate does not know; items are not decoded.
    Unsupported(IntermediateResultDataType),
}

impl IntermediateItems {
    fn from_native(
        data_type: IntermediateResultDataType,
        value: &Value,
    ) -> Result<Option<Self>, serde_json::Error> {
        use IntermediateResultDataType as Kind;
        Ok(match data_type {
            Kind::Image => read_list(value)?.map(Self::Images),
            Kind::Contour => read_list(value)?.map(Self::Contours),
            Kind::LineSegment => read_list(value)?.map(Self::LineSegments),
            Kind::LocalizationResult => read_list(value)?.map(Self::LocalizationResults),
            Kind::RegionOfInterest => read_list(value)?.map(Self::RegionsOfInterest),
            Kind::Other(_) => value.is_array().then_some(Self::Unsupported(data_type)),
        })
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Images(v) => v.len(),
            Self::Contours(v) => v.len(),
            Self::LineSegments(v) => v.len(),
            Self::LocalizationResults(v) => v.len(),
            Self::RegionsOfInterest(v) => v.len(),
            Self::Unsupported(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One (mode, index) pair recording which priority-list entry produced an
/// artifact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeProvenance<M> {
    pub mode: M,
    /// Position of `mode` in its priority list.
    pub index: i32,
}

/// The algorithm variants that produced an intermediate result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntermediateProvenance {
    pub barcode_complement: ModeProvenance<BarcodeComplementMode>,
    pub deformation_resisting: ModeProvenance<DeformationResistingMode>,
    pub dpm_code_reading: ModeProvenance<DpmCodeReadingMode>,
    pub text_filter: ModeProvenance<TextFilterMode>,
    pub localization: ModeProvenance<LocalizationMode>,
    pub binarization: ModeProvenance<BinarizationMode>,
    pub image_preprocessing: ModeProvenance<ImagePreprocessingMode>,
    pub region_predetection: ModeProvenance<RegionPredetectionMode>,
    pub grayscale_transformation: ModeProvenance<GrayscaleTransformationMode>,
    pub colour_conversion: ModeProvenance<ColourConversionMode>,
    pub colour_clustering: ModeProvenance<ColourClusteringMode>,
}

/// An artifact from the engine's internal pipeline trace.
#[derive(Clone, Debug, PartialEq)]
pub struct IntermediateResult {
    pub data_type: IntermediateResultDataType,
    /// `None` when the engine reports no list for this entry.
    pub results: Option<IntermediateItems>,
    /// Raw `IntermediateResultTypes` bit identifying the pipeline stage.
    pub result_type: i32,
    pub provenance: IntermediateProvenance,
    pub rotation_matrix: Vec<f64>,
    pub roi_id: i32,
    pub scale_down_ratio: i32,
    pub frame_id: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawIntermediateResult {
    data_type: IntermediateResultDataType,
    #[serde(rename = "IMResults", default)]
    im_results: Value,
    result_type: i32,
    barcode_complement_mode: BarcodeComplementMode,
    #[serde(rename = "BCMIndex")]
    bcm_index: i32,
    deformation_resisting_mode: DeformationResistingMode,
    #[serde(rename = "DRMIndex")]
    drm_index: i32,
    #[serde(rename = "DPMCodeReadingMode")]
    dpm_code_reading_mode: DpmCodeReadingMode,
    #[serde(rename = "DPMCRMIndex")]
    dpmcrm_index: i32,
    text_filter_mode: TextFilterMode,
    #[serde(rename = "TFMIndex")]
    tfm_index: i32,
    localization_mode: LocalizationMode,
    #[serde(rename = "LMIndex")]
    lm_index: i32,
    binarization_mode: BinarizationMode,
    #[serde(rename = "BMIndex")]
    bm_index: i32,
    image_preprocessing_mode: ImagePreprocessingMode,
    #[serde(rename = "IPMIndex")]
    ipm_index: i32,
    region_predetection_mode: RegionPredetectionMode,
    #[serde(rename = "RPMIndex")]
    rpm_index: i32,
    grayscale_transformation_mode: GrayscaleTransformationMode,
    #[serde(rename = "GTMIndex")]
    gtm_index: i32,
    colour_conversion_mode: ColourConversionMode,
    #[serde(rename = "CICMIndex")]
    cicm_index: i32,
    colour_clustering_mode: ColourClusteringMode,
    #[serde(rename = "CCMIndex")]
    ccm_index: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    rotation_matrix: Vec<f64>,
    #[serde(rename = "ROIId")]
    roi_id: i32,
    scale_down_ratio: i32,
    frame_id: i32,
}

impl<'de> Deserialize<'de> for IntermediateResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawIntermediateResult::deserialize(deserializer)?;
        let results = IntermediateItems::from_native(raw.data_type, &raw.im_results)
            .map_err(serde::de::Error::custom)?;
        Ok(Self {
            data_type: raw.data_type,
            results,
            result_type: raw.result_type,
            provenance: IntermediateProvenance {
                barcode_complement: ModeProvenance {
                    mode: raw.barcode_complement_mode,
                    index: raw.bcm_index,
                },
                deformation_resisting: ModeProvenance {
                    mode: raw.deformation_resisting_mode,
                    index: raw.drm_index,
                },
                dpm_code_reading: ModeProvenance {
                    mode: raw.dpm_code_reading_mode,
                    index: raw.dpmcrm_index,
                },
                text_filter: ModeProvenance {
                    mode: raw.text_filter_mode,
                    index: raw.tfm_index,
                },
                localization: ModeProvenance {
                    mode: raw.localization_mode,
                    index: raw.lm_index,
                },
                binarization: ModeProvenance {
                    mode: raw.binarization_mode,
                    index: raw.bm_index,
                },
                image_preprocessing: ModeProvenance {
                    mode: raw.image_preprocessing_mode,
                    index: raw.ipm_index,
                },
                region_predetection: ModeProvenance {
                    mode: raw.region_predetection_mode,
                    index: raw.rpm_index,
                },
                grayscale_transformation: ModeProvenance {
                    mode: raw.grayscale_transformation_mode,
                    index: raw.gtm_index,
                },
                colour_conversion: ModeProvenance {
                    mode: raw.colour_conversion_mode,
                    index: raw.cicm_index,
                },
                colour_clustering: ModeProvenance {
                    mode: raw.colour_clustering_mode,
                    index: raw.ccm_index,
                },
            },
            rotation_matrix: raw.rotation_matrix,
            roi_id: raw.roi_id,
            scale_down_ratio: raw.scale_down_ratio,
            frame_id: raw.frame_id,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn intermediate(data_type: i32, items: Value) -> Value {
        json!({
            "DataType": data_type,
            "IMResults": items,
            "ResultType": 0x100,
            "BarcodeComplementMode": 0, "BCMIndex": -1,
            "DeformationResistingMode": 0, "DRMIndex": -1,
            "DPMCodeReadingMode": 0, "DPMCRMIndex": -1,
            "TextFilterMode": 2, "TFMIndex": 0,
            "LocalizationMode": 2, "LMIndex": 0,
            "BinarizationMode": 2, "BMIndex": 0,
            "ImagePreprocessingMode": 2, "IPMIndex": 0,
            "RegionPredetectionMode": 2, "RPMIndex": 0,
            "GrayscaleTransformationMode": 2, "GTMIndex": 0,
            "ColourConversionMode": 1, "CICMIndex": 0,
            "ColourClusteringMode": 0, "CCMIndex": -1,
            "RotationMatrix": [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            "ROIId": 0,
            "ScaleDownRatio": 1,
            "FrameId": -1
        })
    }

    #[test]
    fn contour_items_follow_data_type() {
        let value = intermediate(
            0x02,
            json!([{"Points": [{"X": 1, "Y": 2}, {"X": 3, "Y": 4}]}]),
        );
        let ir: IntermediateResult = serde_json::from_value(value).expect("intermediate");
        assert_eq!(ir.data_type, IntermediateResultDataType::Contour);
        match ir.results {
            Some(IntermediateItems::Contours(contours)) => {
                assert_eq!(contours.len(), 1);
                assert_eq!(contours[0].points[1], Point { x: 3, y: 4 });
            }
            other => panic!("unexpected items {other:?}"),
        }
        assert_eq!(
            ir.provenance.localization,
            ModeProvenance {
                mode: LocalizationMode::ConnectedBlocks,
                index: 0
            }
        );
        assert_eq!(ir.rotation_matrix.len(), 9);
    }

    #[test]
    fn region_of_interest_items() {
        let value = intermediate(
            0x10,
            json!([{"ROIId": 3, "Point": {"X": 5, "Y": 6}, "Width": 40, "Height": 20}]),
        );
        let ir: IntermediateResult = serde_json::from_value(value).expect("intermediate");
        let Some(IntermediateItems::RegionsOfInterest(rois)) = ir.results else {
            panic!("expected regions of interest");
        };
        assert_eq!(rois[0].roi_id, 3);
        assert_eq!(rois[0].width, 40);
    }

    #[test]
    fn unknown_data_type_keeps_entry_without_items() {
        let value = intermediate(0x40, json!([{"Anything": 1}]));
        let ir: IntermediateResult = serde_json::from_value(value).expect("intermediate");
        let items = ir.results.expect("list present");
        assert!(items.is_empty());

        let value = intermediate(0x01, Value::Null);
        let ir: IntermediateResult = serde_json::from_value(value).expect("intermediate");
        assert!(ir.results.is_none());
    }
}
