//! Typed view of the engine's public runtime settings.

use serde::{Deserialize, Serialize};

use crate::bag::{read_bag, write_bag, NativeBag};
use crate::format::{BarcodeFormat, BarcodeFormat2, IntermediateResultTypes};
use crate::modes::*;
use crate::region::{RegionBounds, RegionDefinition};

/// Runtime settings of a reader.
///
/// Field names follow the engine's keys. Reading a payload and writing it
/// back produces the same payload, including values without a named enum
/// variant and keys this struct does not model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicRuntimeSettings {
    pub terminate_phase: TerminatePhase,
    /// Maximum decode time in milliseconds.
    pub timeout: i32,
    pub max_algorithm_thread_count: i32,
    /// 0 means "as many as found".
    pub expected_barcodes_count: i32,
    pub barcode_format_ids: BarcodeFormat,
    #[serde(rename = "BarcodeFormatIds_2")]
    pub barcode_format_ids_2: BarcodeFormat2,
    #[serde(rename = "PDFRasterDPI")]
    pub pdf_raster_dpi: i32,
    /// Images larger than this on their shorter side are scaled down first.
    pub scale_down_threshold: i32,
    pub binarization_modes: ModeList<BinarizationMode>,
    pub localization_modes: ModeList<LocalizationMode>,
    pub colour_clustering_modes: ModeList<ColourClusteringMode>,
    pub colour_conversion_modes: ModeList<ColourConversionMode>,
    pub grayscale_transformation_modes: ModeList<GrayscaleTransformationMode>,
    pub region_predetection_modes: ModeList<RegionPredetectionMode>,
    pub image_preprocessing_modes: ModeList<ImagePreprocessingMode>,
    pub texture_detection_modes: ModeList<TextureDetectionMode>,
    pub text_filter_modes: ModeList<TextFilterMode>,
    #[serde(rename = "DPMCodeReadingModes")]
    pub dpm_code_reading_modes: ModeList<DpmCodeReadingMode>,
    pub deformation_resisting_modes: ModeList<DeformationResistingMode>,
    pub barcode_complement_modes: ModeList<BarcodeComplementMode>,
    pub barcode_colour_modes: ModeList<BarcodeColourMode>,
    pub text_result_order_modes: ModeList<TextResultOrderMode>,
    pub text_assisted_correction_mode: TextAssistedCorrectionMode,
    /// 0..=9.
    pub deblur_level: i32,
    pub intermediate_result_types: IntermediateResultTypes,
    pub intermediate_result_saving_mode: IntermediateResultSavingMode,
    pub result_coordinate_type: ResultCoordinateType,
    pub return_barcode_zone_clarity: i32,
    #[serde(flatten)]
    pub region: RegionDefinition,
    pub min_barcode_text_length: i32,
    /// 0..=100.
    pub min_result_confidence: i32,
    pub scale_up_modes: ModeList<ScaleUpMode>,
    pub accompanying_text_recognition_modes: ModeList<AccompanyingTextRecognitionMode>,
}

impl Default for PublicRuntimeSettings {
    /// Settings of a freshly created engine instance.
    fn default() -> Self {
        Self {
            terminate_phase: TerminatePhase::BarcodeRecognized,
            timeout: 10_000,
            max_algorithm_thread_count: 4,
            expected_barcodes_count: 0,
            barcode_format_ids: BarcodeFormat::ALL,
            barcode_format_ids_2: BarcodeFormat2::NULL,
            pdf_raster_dpi: 300,
            scale_down_threshold: 2300,
            binarization_modes: ModeList::from_priority(&[BinarizationMode::LocalBlock]),
            localization_modes: ModeList::from_priority(&[
                LocalizationMode::ConnectedBlocks,
                LocalizationMode::ScanDirectly,
                LocalizationMode::Statistics,
                LocalizationMode::Lines,
            ]),
            colour_clustering_modes: ModeList::default(),
            colour_conversion_modes: ModeList::from_priority(&[ColourConversionMode::General]),
            grayscale_transformation_modes: ModeList::from_priority(&[
                GrayscaleTransformationMode::Original,
            ]),
            region_predetection_modes: ModeList::from_priority(&[RegionPredetectionMode::General]),
            image_preprocessing_modes: ModeList::from_priority(&[ImagePreprocessingMode::General]),
            texture_detection_modes: ModeList::from_priority(&[
                TextureDetectionMode::GeneralWidthConcentration,
            ]),
            text_filter_modes: ModeList::from_priority(&[TextFilterMode::GeneralContour]),
            dpm_code_reading_modes: ModeList::default(),
            deformation_resisting_modes: ModeList::default(),
            barcode_complement_modes: ModeList::default(),
            barcode_colour_modes: ModeList::from_priority(&[BarcodeColourMode::DarkOnLight]),
            text_result_order_modes: ModeList::from_priority(&[
                TextResultOrderMode::Confidence,
                TextResultOrderMode::Position,
                TextResultOrderMode::Format,
            ]),
            text_assisted_correction_mode: TextAssistedCorrectionMode::Verifying,
            deblur_level: 9,
            intermediate_result_types: IntermediateResultTypes::NO_RESULT,
            intermediate_result_saving_mode: IntermediateResultSavingMode::Memory,
            result_coordinate_type: ResultCoordinateType::Pixel,
            return_barcode_zone_clarity: 0,
            region: RegionDefinition::default(),
            min_barcode_text_length: 0,
            min_result_confidence: 0,
            scale_up_modes: ModeList::from_priority(&[ScaleUpMode::Auto]),
            accompanying_text_recognition_modes: ModeList::default(),
        }
    }
}

impl PublicRuntimeSettings {
    /// Build typed settings from the engine's payload.
    pub fn from_bag(bag: &NativeBag) -> Result<Self, serde_json::Error> {
        read_bag(bag)
    }

    /// Overwrite every modelled key of `bag` with the values held here.
    pub fn update_bag(&self, bag: &mut NativeBag) -> Result<(), serde_json::Error> {
        write_bag(self, bag)
    }

    /// Standalone payload holding exactly the modelled keys.
    pub fn to_bag(&self) -> Result<NativeBag, serde_json::Error> {
        let mut bag = NativeBag::new();
        self.update_bag(&mut bag)?;
        Ok(bag)
    }

    pub fn region_bounds(&self) -> RegionBounds {
        self.region.bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const MODELLED_KEYS: usize = 37;

    fn mode_list(head: &[i32]) -> Value {
        let mut slots = vec![0; MODE_LIST_LEN];
        slots[..head.len()].copy_from_slice(head);
        json!(slots)
    }

    /// Payload as reported by a fresh engine.
    fn native_settings() -> NativeBag {
        json!({
            "TerminatePhase": 32,
            "Timeout": 10000,
            "MaxAlgorithmThreadCount": 4,
            "ExpectedBarcodesCount": 0,
            "BarcodeFormatIds": -32505857,
            "BarcodeFormatIds_2": 0,
            "PDFRasterDPI": 300,
            "ScaleDownThreshold": 2300,
            "BinarizationModes": mode_list(&[2]),
            "LocalizationModes": mode_list(&[2, 16, 4, 8]),
            "ColourClusteringModes": mode_list(&[]),
            "ColourConversionModes": mode_list(&[1]),
            "GrayscaleTransformationModes": mode_list(&[2]),
            "RegionPredetectionModes": mode_list(&[2]),
            "ImagePreprocessingModes": mode_list(&[2]),
            "TextureDetectionModes": mode_list(&[2]),
            "TextFilterModes": mode_list(&[2]),
            "DPMCodeReadingModes": mode_list(&[]),
            "DeformationResistingModes": mode_list(&[]),
            "BarcodeComplementModes": mode_list(&[]),
            "BarcodeColourModes": mode_list(&[1]),
            "TextResultOrderModes": mode_list(&[1, 2, 4]),
            "TextAssistedCorrectionMode": 2,
            "DeblurLevel": 9,
            "IntermediateResultTypes": 0,
            "IntermediateResultSavingMode": 1,
            "ResultCoordinateType": 1,
            "ReturnBarcodeZoneClarity": 0,
            "RegionTop": 0,
            "RegionBottom": 0,
            "RegionLeft": 0,
            "RegionRight": 0,
            "RegionMeasuredByPercentage": 0,
            "MinBarcodeTextLength": 0,
            "MinResultConfidence": 0,
            "ScaleUpModes": mode_list(&[1]),
            "AccompanyingTextRecognitionModes": mode_list(&[]),
        })
        .as_object()
        .cloned()
        .expect("settings object")
    }

    #[test]
    fn fresh_engine_payload_matches_default() {
        let settings = PublicRuntimeSettings::from_bag(&native_settings()).expect("read");
        assert_eq!(settings, PublicRuntimeSettings::default());
    }

    #[test]
    fn write_of_read_reproduces_payload() {
        let mut native = native_settings();
        native["LocalizationModes"] = json!([0x400, 2, 0, 0, 0, 0, 0, 0]);
        native["ResultCoordinateType"] = json!(0);
        native["TerminatePhase"] = json!(0x80);

        let settings = PublicRuntimeSettings::from_bag(&native).expect("read");
        assert_eq!(settings.result_coordinate_type, ResultCoordinateType::Other(0));
        assert_eq!(
            settings.localization_modes.get(0),
            Some(LocalizationMode::Other(0x400))
        );

        let written = settings.to_bag().expect("write");
        assert_eq!(written.len(), MODELLED_KEYS);
        assert_eq!(written, native);
    }

    #[test]
    fn percentage_region_survives_round_trip() {
        let mut settings = PublicRuntimeSettings::default();
        settings.region.top = 10;
        settings.region.bottom = 90;
        settings.region.measured_by_percentage = 1;

        let bag = settings.to_bag().expect("write");
        assert_eq!(bag["RegionTop"], json!(10));
        assert_eq!(bag["RegionBottom"], json!(90));
        assert_eq!(bag["RegionMeasuredByPercentage"], json!(1));

        let back = PublicRuntimeSettings::from_bag(&bag).expect("read");
        assert_eq!(back, settings);
        assert!(matches!(
            back.region_bounds(),
            RegionBounds::Percentage {
                top: 10,
                bottom: 90,
                ..
            }
        ));
    }

    #[test]
    fn update_keeps_unknown_engine_keys() {
        let mut native = native_settings();
        native.insert("FutureKey".into(), json!("kept"));
        let mut settings = PublicRuntimeSettings::from_bag(&native).expect("read");
        settings.timeout = 500;
        settings.update_bag(&mut native).expect("write");
        assert_eq!(native["Timeout"], json!(500));
        assert_eq!(native["FutureKey"], json!("kept"));
    }

    #[test]
    fn missing_key_is_reported() {
        let mut native = native_settings();
        native.remove("Timeout");
        let err = PublicRuntimeSettings::from_bag(&native).expect_err("must fail");
        assert!(err.to_string().contains("Timeout"));
    }

    #[test]
    fn default_mode_lists_have_expected_effective_prefix() {
        let settings = PublicRuntimeSettings::default();
        assert_eq!(
            settings.localization_modes.effective(),
            &[
                LocalizationMode::ConnectedBlocks,
                LocalizationMode::ScanDirectly,
                LocalizationMode::Statistics,
                LocalizationMode::Lines,
            ]
        );
        assert!(settings.deformation_resisting_modes.effective().is_empty());
    }
}
