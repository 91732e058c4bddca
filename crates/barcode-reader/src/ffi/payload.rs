//! Conversions between the C structs and the engine payloads the reader
//! consumes.

use std::ffi::{c_char, c_int, c_uchar, c_void, CStr};

use barcode_reader_core::{
    BarcodeFormat, DetailedKind, FrameDecodingParameters, IntermediateResultDataType, ModeList,
    PublicRuntimeSettings, RegionDefinition, MODE_LIST_LEN,
};
use serde_json::{json, Value};

use super::sys;

fn modes<M: From<i32>>(raw: &[c_int; MODE_LIST_LEN]) -> ModeList<M> {
    ModeList(raw.map(M::from))
}

fn raw_modes<M: Copy + Into<i32>>(list: &ModeList<M>) -> [c_int; MODE_LIST_LEN] {
    list.0.map(Into::into)
}

fn region_from_raw(raw: &sys::RegionDefinition) -> RegionDefinition {
    RegionDefinition {
        top: raw.regionTop,
        bottom: raw.regionBottom,
        left: raw.regionLeft,
        right: raw.regionRight,
        measured_by_percentage: raw.regionMeasuredByPercentage,
    }
}

fn region_into_raw(region: &RegionDefinition, raw: &mut sys::RegionDefinition) {
    raw.regionTop = region.top;
    raw.regionBottom = region.bottom;
    raw.regionLeft = region.left;
    raw.regionRight = region.right;
    raw.regionMeasuredByPercentage = region.measured_by_percentage;
}

pub fn settings_from_raw(raw: &sys::PublicRuntimeSettings) -> PublicRuntimeSettings {
    let further = &raw.furtherModes;
    PublicRuntimeSettings {
        terminate_phase: raw.terminatePhase.into(),
        timeout: raw.timeout,
        max_algorithm_thread_count: raw.maxAlgorithmThreadCount,
        expected_barcodes_count: raw.expectedBarcodesCount,
        barcode_format_ids: raw.barcodeFormatIds.into(),
        barcode_format_ids_2: raw.barcodeFormatIds_2.into(),
        pdf_raster_dpi: raw.pdfRasterDPI,
        scale_down_threshold: raw.scaleDownThreshold,
        binarization_modes: modes(&raw.binarizationModes),
        localization_modes: modes(&raw.localizationModes),
        colour_clustering_modes: modes(&further.colourClusteringModes),
        colour_conversion_modes: modes(&further.colourConversionModes),
        grayscale_transformation_modes: modes(&further.grayscaleTransformationModes),
        region_predetection_modes: modes(&further.regionPredetectionModes),
        image_preprocessing_modes: modes(&further.imagePreprocessingModes),
        texture_detection_modes: modes(&further.textureDetectionModes),
        text_filter_modes: modes(&further.textFilterModes),
        dpm_code_reading_modes: modes(&further.dpmCodeReadingModes),
        deformation_resisting_modes: modes(&further.deformationResistingModes),
        barcode_complement_modes: modes(&further.barcodeComplementModes),
        barcode_colour_modes: modes(&further.barcodeColourModes),
        text_result_order_modes: modes(&raw.textResultOrderModes),
        text_assisted_correction_mode: further.textAssistedCorrectionMode.into(),
        deblur_level: raw.deblurLevel,
        intermediate_result_types: raw.intermediateResultTypes.into(),
        intermediate_result_saving_mode: raw.intermediateResultSavingMode.into(),
        result_coordinate_type: raw.resultCoordinateType.into(),
        return_barcode_zone_clarity: raw.returnBarcodeZoneClarity,
        region: region_from_raw(&raw.region),
        min_barcode_text_length: raw.minBarcodeTextLength,
        min_result_confidence: raw.minResultConfidence,
        scale_up_modes: modes(&raw.scaleUpModes),
        accompanying_text_recognition_modes: modes(&further.accompanyingTextRecognitionModes),
    }
}

/// Write every modelled field into `raw`, leaving its reserved bytes as the
/// engine filled them.
pub fn settings_into_raw(settings: &PublicRuntimeSettings, raw: &mut sys::PublicRuntimeSettings) {
    raw.terminatePhase = settings.terminate_phase.into();
    raw.timeout = settings.timeout;
    raw.maxAlgorithmThreadCount = settings.max_algorithm_thread_count;
    raw.expectedBarcodesCount = settings.expected_barcodes_count;
    raw.barcodeFormatIds = settings.barcode_format_ids.into();
    raw.barcodeFormatIds_2 = settings.barcode_format_ids_2.into();
    raw.pdfRasterDPI = settings.pdf_raster_dpi;
    raw.scaleDownThreshold = settings.scale_down_threshold;
    raw.binarizationModes = raw_modes(&settings.binarization_modes);
    raw.localizationModes = raw_modes(&settings.localization_modes);
    let further = &mut raw.furtherModes;
    further.colourClusteringModes = raw_modes(&settings.colour_clustering_modes);
    further.colourConversionModes = raw_modes(&settings.colour_conversion_modes);
    further.grayscaleTransformationModes = raw_modes(&settings.grayscale_transformation_modes);
    further.regionPredetectionModes = raw_modes(&settings.region_predetection_modes);
    further.imagePreprocessingModes = raw_modes(&settings.image_preprocessing_modes);
    further.textureDetectionModes = raw_modes(&settings.texture_detection_modes);
    further.textFilterModes = raw_modes(&settings.text_filter_modes);
    further.dpmCodeReadingModes = raw_modes(&settings.dpm_code_reading_modes);
    further.deformationResistingModes = raw_modes(&settings.deformation_resisting_modes);
    further.barcodeComplementModes = raw_modes(&settings.barcode_complement_modes);
    further.barcodeColourModes = raw_modes(&settings.barcode_colour_modes);
    further.textAssistedCorrectionMode = settings.text_assisted_correction_mode.into();
    further.accompanyingTextRecognitionModes =
        raw_modes(&settings.accompanying_text_recognition_modes);
    raw.textResultOrderModes = raw_modes(&settings.text_result_order_modes);
    raw.deblurLevel = settings.deblur_level;
    raw.intermediateResultTypes = settings.intermediate_result_types.into();
    raw.intermediateResultSavingMode = settings.intermediate_result_saving_mode.into();
    raw.resultCoordinateType = settings.result_coordinate_type.into();
    raw.returnBarcodeZoneClarity = settings.return_barcode_zone_clarity;
    region_into_raw(&settings.region, &mut raw.region);
    raw.minBarcodeTextLength = settings.min_barcode_text_length;
    raw.minResultConfidence = settings.min_result_confidence;
    raw.scaleUpModes = raw_modes(&settings.scale_up_modes);
}

pub fn frame_parameters_from_raw(raw: &sys::FrameDecodingParameters) -> FrameDecodingParameters {
    FrameDecodingParameters {
        max_queue_length: raw.maxQueueLength,
        max_result_queue_length: raw.maxResultQueueLength,
        width: raw.width,
        height: raw.height,
        stride: raw.stride,
        image_pixel_format: raw.imagePixelFormat.into(),
        region: region_from_raw(&raw.region),
        threshold: f64::from(raw.threshold),
        fps: raw.fps,
        auto_filter: raw.autoFilter,
    }
}

/// Overwrite the region of `raw` with `region`; returns whether it changed.
pub fn replace_region(raw: &mut sys::PublicRuntimeSettings, region: &RegionDefinition) -> bool {
    if region_from_raw(&raw.region) == *region {
        return false;
    }
    region_into_raw(region, &mut raw.region);
    true
}

/// Read a NUL-terminated string; `None` for a null pointer.
///
/// # Safety
/// `ptr` is null or points to a NUL-terminated string.
pub unsafe fn text(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

/// # Safety
/// `ptr` is null or valid for `len` bytes.
unsafe fn bytes(ptr: *const c_uchar, len: c_int) -> Option<Vec<u8>> {
    let len = usize::try_from(len).ok()?;
    if ptr.is_null() {
        None
    } else {
        Some(std::slice::from_raw_parts(ptr, len).to_vec())
    }
}

/// # Safety
/// `ptr` is null or valid for `count` elements.
unsafe fn slice<'a, T>(ptr: *const T, count: c_int) -> &'a [T] {
    match usize::try_from(count) {
        Ok(count) if !ptr.is_null() => std::slice::from_raw_parts(ptr, count),
        _ => &[],
    }
}

fn point(p: &sys::DbrPoint) -> Value {
    json!({"X": p.x, "Y": p.y})
}

/// # Safety
/// Every pointer inside `raw` is null or valid for the lengths it states.
pub unsafe fn localization_value(raw: &sys::LocalizationResult) -> Value {
    json!({
        "TerminatePhase": raw.terminatePhase,
        "BarcodeFormat": raw.barcodeFormat,
        "BarcodeFormatString": text(raw.barcodeFormatString).unwrap_or_default(),
        "BarcodeFormat_2": raw.barcodeFormat_2,
        "BarcodeFormatString_2": text(raw.barcodeFormatString_2).unwrap_or_default(),
        "X1": raw.x1, "Y1": raw.y1,
        "X2": raw.x2, "Y2": raw.y2,
        "X3": raw.x3, "Y3": raw.y3,
        "X4": raw.x4, "Y4": raw.y4,
        "Angle": raw.angle,
        "ModuleSize": raw.moduleSize,
        "PageNumber": raw.pageNumber,
        "RegionName": text(raw.regionName),
        "DocumentName": text(raw.documentName),
        "ResultCoordinateType": raw.resultCoordinateType,
        "AccompanyingTextBytes": bytes(raw.accompanyingTextBytes, raw.accompanyingTextBytesLength),
        "Confidence": raw.confidence,
    })
}

/// Details block for `format`, `null` when the format has none.
///
/// # Safety
/// `ptr` is null or points to the details struct matching `format`.
unsafe fn detailed_value(format: c_int, ptr: *const c_void) -> Value {
    if ptr.is_null() {
        return Value::Null;
    }
    match DetailedKind::for_format(BarcodeFormat::from(format)) {
        Some(DetailedKind::OneD) => {
            let d = &*ptr.cast::<sys::OneDCodeDetails>();
            let start = bytes(d.startCharsBytes, d.startCharsBytesLength);
            let stop = bytes(d.stopCharsBytes, d.stopCharsBytesLength);
            let check = bytes(d.checkDigitBytes, d.checkDigitBytesLength);
            json!({
                "ModuleSize": d.moduleSize,
                "StartCharsBytes": start.unwrap_or_default(),
                "StopCharsBytes": stop.unwrap_or_default(),
                "CheckDigitBytes": check.unwrap_or_default(),
            })
        }
        Some(DetailedKind::QrCode) => {
            let d = &*ptr.cast::<sys::QRCodeDetails>();
            json!({
                "ModuleSize": d.moduleSize,
                "Rows": d.rows,
                "Columns": d.columns,
                "ErrorCorrectionLevel": d.errorCorrectionLevel,
                "Version": d.version,
                "Model": d.model,
            })
        }
        Some(DetailedKind::DataMatrix) => {
            let d = &*ptr.cast::<sys::DataMatrixDetails>();
            json!({
                "ModuleSize": d.moduleSize,
                "Rows": d.rows,
                "Columns": d.columns,
                "DataRegionRows": d.dataRegionRows,
                "DataRegionColumns": d.dataRegionColumns,
                "DataRegionNumber": d.dataRegionNumber,
            })
        }
        Some(DetailedKind::Pdf417) => {
            let d = &*ptr.cast::<sys::PDF417Details>();
            json!({
                "ModuleSize": d.moduleSize,
                "Rows": d.rows,
                "Columns": d.columns,
                "ErrorCorrectionLevel": d.errorCorrectionLevel,
            })
        }
        Some(DetailedKind::Aztec) => {
            let d = &*ptr.cast::<sys::AztecDetails>();
            json!({
                "ModuleSize": d.moduleSize,
                "Rows": d.rows,
                "Columns": d.columns,
                "LayerNumber": d.layerNumber,
            })
        }
        None => Value::Null,
    }
}

/// # Safety
/// Every pointer inside `raw` is null or valid for the lengths it states.
unsafe fn extended_value(raw: &sys::ExtendedResult) -> Value {
    let sampling = &raw.samplingImage;
    json!({
        "ResultType": raw.resultType,
        "BarcodeFormat": raw.barcodeFormat,
        "BarcodeFormatString": text(raw.barcodeFormatString).unwrap_or_default(),
        "BarcodeFormat_2": raw.barcodeFormat_2,
        "BarcodeFormatString_2": text(raw.barcodeFormatString_2).unwrap_or_default(),
        "Confidence": raw.confidence,
        "Bytes": bytes(raw.bytes, raw.bytesLength),
        "AccompanyingTextBytes": bytes(raw.accompanyingTextBytes, raw.accompanyingTextBytesLength),
        "Deformation": raw.deformation,
        "DetailedResult": detailed_value(raw.barcodeFormat, raw.detailedResult),
        "SamplingImage": {
            "Bytes": bytes(sampling.bytes, sampling.width.saturating_mul(sampling.height)),
            "Width": sampling.width,
            "Height": sampling.height,
        },
        "Clarity": raw.clarity,
    })
}

/// # Safety
/// Every pointer inside `raw` is null or valid for the lengths it states.
unsafe fn text_result_value(raw: &sys::TextResult) -> Value {
    let localization = match raw.localizationResult.as_ref() {
        Some(l) => localization_value(l),
        None => Value::Null,
    };
    let extended: Vec<Value> = slice(raw.results, raw.resultsCount)
        .iter()
        .filter_map(|&ptr| ptr.as_ref())
        .map(|r| extended_value(r))
        .collect();
    let extended = if extended.is_empty() {
        Value::Null
    } else {
        Value::Array(extended)
    };
    json!({
        "BarcodeFormat": raw.barcodeFormat,
        "BarcodeFormatString": text(raw.barcodeFormatString).unwrap_or_default(),
        "BarcodeFormat_2": raw.barcodeFormat_2,
        "BarcodeFormatString_2": text(raw.barcodeFormatString_2).unwrap_or_default(),
        "BarcodeText": text(raw.barcodeText).unwrap_or_default(),
        "BarcodeBytes": bytes(raw.barcodeBytes, raw.barcodeBytesLength),
        "LocalizationResult": localization,
        "DetailedResult": detailed_value(raw.barcodeFormat, raw.detailedResult),
        "ExtendedResults": extended,
    })
}

/// Text results as a list payload, or `null` when there are none.
///
/// # Safety
/// `array` and everything it points to come from the engine (or follow the
/// same layout) and are still alive.
pub unsafe fn text_results_value(array: &sys::TextResultArray) -> Value {
    let results: Vec<Value> = slice(array.results, array.resultsCount)
        .iter()
        .filter_map(|&ptr| ptr.as_ref())
        .map(|r| text_result_value(r))
        .collect();
    if results.is_empty() {
        Value::Null
    } else {
        Value::Array(results)
    }
}

/// # Safety
/// Every pointer in `items` is null or points to a struct of `data_type`.
unsafe fn intermediate_items(data_type: c_int, items: &[*const c_void]) -> Value {
    use IntermediateResultDataType as Kind;
    let kind = Kind::from(data_type);
    let values = items.iter().filter(|ptr| !ptr.is_null()).map(|&ptr| match kind {
        Kind::Image => {
            let d = &*ptr.cast::<sys::ImageData>();
            json!({
                "Bytes": bytes(d.bytes, d.bytesLength),
                "Width": d.width,
                "Height": d.height,
                "Stride": d.stride,
                "ImagePixelFormat": d.format,
            })
        }
        Kind::Contour => {
            let d = &*ptr.cast::<sys::Contour>();
            let points: Vec<Value> = slice(d.points, d.pointsCount).iter().map(point).collect();
            json!({"Points": points})
        }
        Kind::LineSegment => {
            let d = &*ptr.cast::<sys::LineSegment>();
            json!({
                "StartPoint": point(&d.startPoint),
                "EndPoint": point(&d.endPoint),
                "LinesConfidenceCoefficients": slice(d.linesConfidenceCoefficients, 4),
            })
        }
        Kind::LocalizationResult => localization_value(&*ptr.cast::<sys::LocalizationResult>()),
        Kind::RegionOfInterest => {
            let d = &*ptr.cast::<sys::RegionOfInterest>();
            json!({
                "ROIId": d.roiId,
                "Point": point(&d.point),
                "Width": d.width,
                "Height": d.height,
            })
        }
        Kind::Other(_) => Value::Null,
    });
    Value::Array(values.collect())
}

/// # Safety
/// Every pointer inside `raw` is null or valid for the lengths it states.
unsafe fn intermediate_value(raw: &sys::IntermediateResult) -> Value {
    let items = if raw.results.is_null() {
        Value::Null
    } else {
        intermediate_items(raw.dataType, slice(raw.results, raw.resultsCount))
    };
    json!({
        "DataType": raw.dataType,
        "IMResults": items,
        "ResultType": raw.resultType,
        "BarcodeComplementMode": raw.barcodeComplementMode, "BCMIndex": raw.bcmIndex,
        // not reported by this engine version
        "DeformationResistingMode": 0, "DRMIndex": -1,
        "DPMCodeReadingMode": raw.dpmCodeReadingMode, "DPMCRMIndex": raw.dpmcrmIndex,
        "TextFilterMode": raw.textFilterMode, "TFMIndex": raw.tfmIndex,
        "LocalizationMode": raw.localizationMode, "LMIndex": raw.lmIndex,
        "BinarizationMode": raw.binarizationMode, "BMIndex": raw.bmIndex,
        "ImagePreprocessingMode": raw.imagePreprocessingMode, "IPMIndex": raw.ipmIndex,
        "RegionPredetectionMode": raw.regionPredetectionMode, "RPMIndex": raw.rpmIndex,
        "GrayscaleTransformationMode": raw.grayscaleTransformationMode, "GTMIndex": raw.gtmIndex,
        "ColourConversionMode": raw.colourConversionMode, "CICMIndex": raw.cicmIndex,
        "ColourClusteringMode": raw.colourClusteringMode, "CCMIndex": raw.ccmIndex,
        "RotationMatrix": raw.rotationMatrix,
        "ROIId": raw.roiId,
        "ScaleDownRatio": raw.scaleDownRatio,
        "FrameId": raw.frameId,
    })
}

/// Intermediate results as a list payload, or `null` when there are none.
///
/// # Safety
/// Same contract as [`text_results_value`].
pub unsafe fn intermediate_results_value(array: &sys::IntermediateResultArray) -> Value {
    let results: Vec<Value> = slice(array.results, array.resultsCount)
        .iter()
        .filter_map(|&ptr| ptr.as_ref())
        .map(|r| intermediate_value(r))
        .collect();
    if results.is_empty() {
        Value::Null
    } else {
        Value::Array(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barcode_reader_core::{
        read_list, BinarizationMode, DetailedResult, IntermediateItems, IntermediateResult,
        LocalizationMode, Point, TextResult,
    };
    use std::ffi::CString;
    use std::ptr;

    #[test]
    fn settings_survive_the_c_layout() {
        let mut settings = PublicRuntimeSettings::default();
        settings.binarization_modes =
            ModeList::from_priority(&[BinarizationMode::Threshold, BinarizationMode::Other(77)]);
        settings.localization_modes = ModeList::from_priority(&[LocalizationMode::ScanDirectly]);
        settings.region.left = 25;
        settings.region.measured_by_percentage = 1;
        settings.timeout = 250;

        let mut raw: sys::PublicRuntimeSettings = sys::zeroed();
        settings_into_raw(&settings, &mut raw);
        assert_eq!(raw.region.regionLeft, 25);
        assert_eq!(raw.binarizationModes[1], 77);
        assert_eq!(settings_from_raw(&raw), settings);
    }

    #[test]
    fn region_replacement_reports_changes() {
        let mut raw: sys::PublicRuntimeSettings = sys::zeroed();
        assert!(!replace_region(&mut raw, &RegionDefinition::default()));
        let region = RegionDefinition {
            top: 10,
            bottom: 90,
            left: 0,
            right: 100,
            measured_by_percentage: 1,
        };
        assert!(replace_region(&mut raw, &region));
        assert_eq!(raw.region.regionBottom, 90);
        assert!(!replace_region(&mut raw, &region));
    }

    #[test]
    fn frame_defaults_widen_the_threshold() {
        let mut raw: sys::FrameDecodingParameters = sys::zeroed();
        raw.maxQueueLength = 3;
        raw.maxResultQueueLength = 10;
        raw.threshold = 0.5;
        raw.autoFilter = 1;
        let parameters = frame_parameters_from_raw(&raw);
        assert_eq!(parameters.max_queue_length, 3);
        assert_eq!(parameters.threshold, 0.5);
        assert_eq!(parameters.auto_filter, 1);
    }

    #[test]
    fn text_results_read_into_typed_results() {
        let format_name = CString::new("QR_CODE").unwrap();
        let barcode_text = CString::new("hello").unwrap();
        let payload = b"hello".to_vec();

        let mut localization: sys::LocalizationResult = sys::zeroed();
        localization.barcodeFormat = 0x0400_0000;
        localization.barcodeFormatString = format_name.as_ptr();
        (localization.x2, localization.x3, localization.y3, localization.y4) = (40, 40, 40, 40);
        localization.resultCoordinateType = 1;
        localization.confidence = 88;

        let details = sys::QRCodeDetails {
            moduleSize: 4,
            rows: 21,
            columns: 21,
            errorCorrectionLevel: 1,
            version: 1,
            model: 2,
        };

        let mut result: sys::TextResult = sys::zeroed();
        result.barcodeFormat = 0x0400_0000;
        result.barcodeFormatString = format_name.as_ptr();
        result.barcodeText = barcode_text.as_ptr();
        result.barcodeBytes = payload.as_ptr();
        result.barcodeBytesLength = payload.len() as c_int;
        result.localizationResult = &localization;
        result.detailedResult = (&details as *const sys::QRCodeDetails).cast();

        let results = [&result as *const sys::TextResult];
        let array = sys::TextResultArray {
            resultsCount: 1,
            results: results.as_ptr(),
        };

        let value = unsafe { text_results_value(&array) };
        let typed: Vec<TextResult> = read_list(&value).unwrap().unwrap();
        assert_eq!(typed.len(), 1);
        assert_eq!(typed[0].barcode_text, "hello");
        assert_eq!(typed[0].barcode_bytes, b"hello");
        assert_eq!(typed[0].barcode_format_string, "QR_CODE");
        assert_eq!(typed[0].localization_result.confidence, 88);
        assert_eq!(
            typed[0].localization_result.localization_points[2],
            Point { x: 40, y: 40 }
        );
        assert!(typed[0].localization_result.region_name.is_none());
        match &typed[0].detailed_result {
            Some(DetailedResult::QrCode(qr)) => assert_eq!((qr.rows, qr.model), (21, 2)),
            other => panic!("unexpected details: {other:?}"),
        }
        assert!(typed[0].extended_results.is_none());
    }

    #[test]
    fn empty_result_arrays_are_null() {
        let array = sys::TextResultArray {
            resultsCount: 0,
            results: ptr::null(),
        };
        assert!(unsafe { text_results_value(&array) }.is_null());
        let array = sys::IntermediateResultArray {
            results: ptr::null(),
            resultsCount: 3,
        };
        assert!(unsafe { intermediate_results_value(&array) }.is_null());
    }

    #[test]
    fn line_segments_keep_their_confidence_coefficients() {
        let coefficients = [80, 20, 0, 0];
        let segment = sys::LineSegment {
            startPoint: sys::DbrPoint { x: 0, y: 0 },
            endPoint: sys::DbrPoint { x: 10, y: 0 },
            linesConfidenceCoefficients: coefficients.as_ptr(),
        };
        let items = [(&segment as *const sys::LineSegment).cast::<c_void>()];

        let mut raw: sys::IntermediateResult = sys::zeroed();
        raw.dataType = 0x04;
        raw.results = items.as_ptr();
        raw.resultsCount = 1;
        raw.resultType = 0x200;
        raw.localizationMode = 8;
        raw.lmIndex = 3;
        raw.bcmIndex = -1;
        raw.scaleDownRatio = 1;
        raw.frameId = -1;
        let results = [&raw as *const sys::IntermediateResult];
        let array = sys::IntermediateResultArray {
            results: results.as_ptr(),
            resultsCount: 1,
        };

        let value = unsafe { intermediate_results_value(&array) };
        let typed: Vec<IntermediateResult> = read_list(&value).unwrap().unwrap();
        assert_eq!(typed[0].provenance.localization.index, 3);
        assert_eq!(typed[0].rotation_matrix.len(), 9);
        match &typed[0].results {
            Some(IntermediateItems::LineSegments(lines)) => {
                assert_eq!(lines[0].end_point, Point { x: 10, y: 0 });
                assert_eq!(lines[0].lines_confidence_coefficients, [80, 20, 0, 0]);
            }
            other => panic!("unexpected items: {other:?}"),
        }
    }
}
