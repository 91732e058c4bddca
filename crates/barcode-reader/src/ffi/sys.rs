//! Raw declarations of the Dynamsoft Barcode Reader 7.3 C API.
//!
//! Struct layouts mirror `DynamsoftBarcodeReader.h` of the 7.3 SDK; keep
//! them in step with the header shipped next to the library you link.
//! Result structs are only ever read through engine-owned pointers, so
//! their trailing reserved blocks are not declared.
#![allow(non_snake_case)]

use std::ffi::{c_char, c_double, c_float, c_int, c_uchar, c_void};

pub const MODE_SLOTS: usize = 8;

/// Plain C structs whose all-zero bit pattern is a valid value.
///
/// # Safety
/// Implementors may only hold integers, floats, raw pointers and arrays or
/// structs of those.
pub unsafe trait Plain: Sized {}

pub fn zeroed<T: Plain>() -> T {
    // SAFETY: `Plain` types accept the all-zero bit pattern.
    unsafe { std::mem::zeroed() }
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RegionDefinition {
    pub regionTop: c_int,
    pub regionLeft: c_int,
    pub regionRight: c_int,
    pub regionBottom: c_int,
    pub regionMeasuredByPercentage: c_int,
    pub reserved: [c_char; 64],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FurtherModes {
    pub colourClusteringModes: [c_int; MODE_SLOTS],
    pub colourConversionModes: [c_int; MODE_SLOTS],
    pub grayscaleTransformationModes: [c_int; MODE_SLOTS],
    pub regionPredetectionModes: [c_int; MODE_SLOTS],
    pub imagePreprocessingModes: [c_int; MODE_SLOTS],
    pub textureDetectionModes: [c_int; MODE_SLOTS],
    pub textFilterModes: [c_int; MODE_SLOTS],
    pub dpmCodeReadingModes: [c_int; MODE_SLOTS],
    pub deformationResistingModes: [c_int; MODE_SLOTS],
    pub barcodeComplementModes: [c_int; MODE_SLOTS],
    pub barcodeColourModes: [c_int; MODE_SLOTS],
    pub textAssistedCorrectionMode: c_int,
    pub accompanyingTextRecognitionModes: [c_int; MODE_SLOTS],
    pub reserved: [c_char; 32],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct PublicRuntimeSettings {
    pub terminatePhase: c_int,
    pub timeout: c_int,
    pub maxAlgorithmThreadCount: c_int,
    pub expectedBarcodesCount: c_int,
    pub barcodeFormatIds: c_int,
    pub barcodeFormatIds_2: c_int,
    pub pdfRasterDPI: c_int,
    pub scaleDownThreshold: c_int,
    pub binarizationModes: [c_int; MODE_SLOTS],
    pub localizationModes: [c_int; MODE_SLOTS],
    pub furtherModes: FurtherModes,
    pub deblurLevel: c_int,
    pub intermediateResultTypes: c_int,
    pub intermediateResultSavingMode: c_int,
    pub resultCoordinateType: c_int,
    pub textResultOrderModes: [c_int; MODE_SLOTS],
    pub returnBarcodeZoneClarity: c_int,
    pub region: RegionDefinition,
    pub minBarcodeTextLength: c_int,
    pub minResultConfidence: c_int,
    pub scaleUpModes: [c_int; MODE_SLOTS],
    pub reserved: [c_char; 64],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct FrameDecodingParameters {
    pub maxQueueLength: c_int,
    pub maxResultQueueLength: c_int,
    pub width: c_int,
    pub height: c_int,
    pub stride: c_int,
    pub imagePixelFormat: c_int,
    pub region: RegionDefinition,
    pub threshold: c_float,
    pub fps: c_int,
    pub autoFilter: c_int,
    pub reserved: [c_char; 32],
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct DbrPoint {
    pub x: c_int,
    pub y: c_int,
}

#[repr(C)]
pub struct LocalizationResult {
    pub terminatePhase: c_int,
    pub barcodeFormat: c_int,
    pub barcodeFormatString: *const c_char,
    pub barcodeFormat_2: c_int,
    pub barcodeFormatString_2: *const c_char,
    pub x1: c_int,
    pub y1: c_int,
    pub x2: c_int,
    pub y2: c_int,
    pub x3: c_int,
    pub y3: c_int,
    pub x4: c_int,
    pub y4: c_int,
    pub angle: c_int,
    pub moduleSize: c_int,
    pub pageNumber: c_int,
    pub regionName: *const c_char,
    pub documentName: *const c_char,
    pub resultCoordinateType: c_int,
    pub accompanyingTextBytes: *const c_uchar,
    pub accompanyingTextBytesLength: c_int,
    pub confidence: c_int,
}

#[repr(C)]
pub struct SamplingImageData {
    pub bytes: *const c_uchar,
    pub width: c_int,
    pub height: c_int,
}

#[repr(C)]
pub struct ExtendedResult {
    pub resultType: c_int,
    pub barcodeFormat: c_int,
    pub barcodeFormatString: *const c_char,
    pub barcodeFormat_2: c_int,
    pub barcodeFormatString_2: *const c_char,
    pub confidence: c_int,
    pub bytes: *const c_uchar,
    pub bytesLength: c_int,
    pub accompanyingTextBytes: *const c_uchar,
    pub accompanyingTextBytesLength: c_int,
    pub deformation: c_int,
    pub detailedResult: *const c_void,
    pub samplingImage: SamplingImageData,
    pub clarity: c_int,
}

#[repr(C)]
pub struct TextResult {
    pub barcodeFormat: c_int,
    pub barcodeFormatString: *const c_char,
    pub barcodeFormat_2: c_int,
    pub barcodeFormatString_2: *const c_char,
    pub barcodeText: *const c_char,
    pub barcodeBytes: *const c_uchar,
    pub barcodeBytesLength: c_int,
    pub localizationResult: *const LocalizationResult,
    pub detailedResult: *const c_void,
    pub resultsCount: c_int,
    pub results: *const *const ExtendedResult,
}

#[repr(C)]
pub struct TextResultArray {
    pub resultsCount: c_int,
    pub results: *const *const TextResult,
}

#[repr(C)]
pub struct OneDCodeDetails {
    pub moduleSize: c_int,
    pub startCharsBytes: *const c_uchar,
    pub startCharsBytesLength: c_int,
    pub stopCharsBytes: *const c_uchar,
    pub stopCharsBytesLength: c_int,
    pub checkDigitBytes: *const c_uchar,
    pub checkDigitBytesLength: c_int,
}

#[repr(C)]
pub struct QRCodeDetails {
    pub moduleSize: c_int,
    pub rows: c_int,
    pub columns: c_int,
    pub errorCorrectionLevel: c_int,
    pub version: c_int,
    pub model: c_int,
}

#[repr(C)]
pub struct DataMatrixDetails {
    pub moduleSize: c_int,
    pub rows: c_int,
    pub columns: c_int,
    pub dataRegionRows: c_int,
    pub dataRegionColumns: c_int,
    pub dataRegionNumber: c_int,
}

#[repr(C)]
pub struct PDF417Details {
    pub moduleSize: c_int,
    pub rows: c_int,
    pub columns: c_int,
    pub errorCorrectionLevel: c_int,
}

#[repr(C)]
pub struct AztecDetails {
    pub moduleSize: c_int,
    pub rows: c_int,
    pub columns: c_int,
    pub layerNumber: c_int,
}

#[repr(C)]
pub struct ImageData {
    pub bytesLength: c_int,
    pub bytes: *const c_uchar,
    pub width: c_int,
    pub height: c_int,
    pub stride: c_int,
    pub format: c_int,
}

#[repr(C)]
pub struct Contour {
    pub pointsCount: c_int,
    pub points: *const DbrPoint,
}

#[repr(C)]
pub struct LineSegment {
    pub startPoint: DbrPoint,
    pub endPoint: DbrPoint,
    /// Four entries when present.
    pub linesConfidenceCoefficients: *const c_int,
}

#[repr(C)]
pub struct RegionOfInterest {
    pub roiId: c_int,
    pub point: DbrPoint,
    pub width: c_int,
    pub height: c_int,
}

#[repr(C)]
pub struct IntermediateResult {
    pub dataType: c_int,
    pub results: *const *const c_void,
    pub resultsCount: c_int,
    pub resultType: c_int,
    pub barcodeComplementMode: c_int,
    pub bcmIndex: c_int,
    pub dpmCodeReadingMode: c_int,
    pub dpmcrmIndex: c_int,
    pub rotationMatrix: [c_double; 9],
    pub textFilterMode: c_int,
    pub tfmIndex: c_int,
    pub localizationMode: c_int,
    pub lmIndex: c_int,
    pub binarizationMode: c_int,
    pub bmIndex: c_int,
    pub imagePreprocessingMode: c_int,
    pub ipmIndex: c_int,
    pub roiId: c_int,
    pub regionPredetectionMode: c_int,
    pub rpmIndex: c_int,
    pub grayscaleTransformationMode: c_int,
    pub gtmIndex: c_int,
    pub colourConversionMode: c_int,
    pub cicmIndex: c_int,
    pub colourClusteringMode: c_int,
    pub ccmIndex: c_int,
    pub scaleDownRatio: c_int,
    pub frameId: c_int,
}

#[repr(C)]
pub struct IntermediateResultArray {
    pub results: *const *const IntermediateResult,
    pub resultsCount: c_int,
}

unsafe impl Plain for RegionDefinition {}
unsafe impl Plain for FurtherModes {}
unsafe impl Plain for PublicRuntimeSettings {}
unsafe impl Plain for FrameDecodingParameters {}
unsafe impl Plain for DbrPoint {}
unsafe impl Plain for LocalizationResult {}
unsafe impl Plain for SamplingImageData {}
unsafe impl Plain for ExtendedResult {}
unsafe impl Plain for TextResult {}
unsafe impl Plain for TextResultArray {}
unsafe impl Plain for OneDCodeDetails {}
unsafe impl Plain for IntermediateResult {}
unsafe impl Plain for IntermediateResultArray {}

#[cfg(feature = "dbr")]
#[link(name = "DynamsoftBarcodeReader")]
extern "C" {
    pub fn DBR_CreateInstance() -> *mut c_void;
    pub fn DBR_DestroyInstance(barcodeReader: *mut c_void);
    pub fn DBR_GetVersion() -> *const c_char;
    pub fn DBR_GetErrorString(errorCode: c_int) -> *const c_char;

    pub fn DBR_InitLicense(barcodeReader: *mut c_void, pLicense: *const c_char) -> c_int;
    pub fn DBR_InitLicenseFromServer(
        barcodeReader: *mut c_void,
        pLicenseServer: *const c_char,
        pLicenseKey: *const c_char,
    ) -> c_int;
    pub fn DBR_InitLicenseFromLicenseContent(
        barcodeReader: *mut c_void,
        pLicenseKey: *const c_char,
        pLicenseContent: *const c_char,
    ) -> c_int;
    pub fn DBR_OutputLicenseToStringPtr(
        barcodeReader: *mut c_void,
        pContent: *mut *mut c_char,
    ) -> c_int;
    pub fn DBR_FreeLicenseString(pContent: *mut *mut c_char);

    pub fn DBR_GetRuntimeSettings(
        barcodeReader: *mut c_void,
        pSettings: *mut PublicRuntimeSettings,
    ) -> c_int;
    pub fn DBR_UpdateRuntimeSettings(
        barcodeReader: *mut c_void,
        pSettings: *mut PublicRuntimeSettings,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_ResetRuntimeSettings(barcodeReader: *mut c_void) -> c_int;
    pub fn DBR_SetModeArgument(
        barcodeReader: *mut c_void,
        pModesName: *const c_char,
        index: c_int,
        pArgumentName: *const c_char,
        pArgumentValue: *const c_char,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_GetModeArgument(
        barcodeReader: *mut c_void,
        pModesName: *const c_char,
        index: c_int,
        pArgumentName: *const c_char,
        pValueBuffer: *mut c_char,
        valueBufferLen: c_int,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;

    pub fn DBR_InitRuntimeSettingsWithString(
        barcodeReader: *mut c_void,
        content: *const c_char,
        conflictMode: c_int,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_InitRuntimeSettingsWithFile(
        barcodeReader: *mut c_void,
        pFilePath: *const c_char,
        conflictMode: c_int,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_AppendTplStringToRuntimeSettings(
        barcodeReader: *mut c_void,
        content: *const c_char,
        conflictMode: c_int,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_AppendTplFileToRuntimeSettings(
        barcodeReader: *mut c_void,
        pFilePath: *const c_char,
        conflictMode: c_int,
        szErrorMsgBuffer: *mut c_char,
        errorMsgBufferLen: c_int,
    ) -> c_int;
    pub fn DBR_OutputSettingsToStringPtr(
        barcodeReader: *mut c_void,
        ppContent: *mut *mut c_char,
        pSettingsName: *const c_char,
    ) -> c_int;
    pub fn DBR_FreeSettingsString(ppContent: *mut *mut c_char);
    pub fn DBR_OutputSettingsToFile(
        barcodeReader: *mut c_void,
        pFilePath: *const c_char,
        pSettingsName: *const c_char,
    ) -> c_int;
    pub fn DBR_GetParameterTemplateCount(barcodeReader: *mut c_void) -> c_int;
    pub fn DBR_GetParameterTemplateName(
        barcodeReader: *mut c_void,
        index: c_int,
        szNameBuffer: *mut c_char,
        nameBufferLen: c_int,
    ) -> c_int;

    pub fn DBR_DecodeFile(
        barcodeReader: *mut c_void,
        pFileName: *const c_char,
        pTemplateName: *const c_char,
    ) -> c_int;
    pub fn DBR_DecodeBuffer(
        barcodeReader: *mut c_void,
        pBufferBytes: *const c_uchar,
        width: c_int,
        height: c_int,
        stride: c_int,
        format: c_int,
        pTemplateName: *const c_char,
    ) -> c_int;
    pub fn DBR_DecodeFileInMemory(
        barcodeReader: *mut c_void,
        pFileBytes: *const c_uchar,
        fileSize: c_int,
        pTemplateName: *const c_char,
    ) -> c_int;

    pub fn DBR_GetAllTextResults(
        barcodeReader: *mut c_void,
        pResults: *mut *mut TextResultArray,
    ) -> c_int;
    pub fn DBR_FreeTextResults(pResults: *mut *mut TextResultArray);
    pub fn DBR_GetIntermediateResults(
        barcodeReader: *mut c_void,
        pResults: *mut *mut IntermediateResultArray,
    ) -> c_int;
    pub fn DBR_FreeIntermediateResults(pResults: *mut *mut IntermediateResultArray);

    pub fn DBR_InitFrameDecodingParameters(
        barcodeReader: *mut c_void,
        pParameters: *mut FrameDecodingParameters,
    ) -> c_int;
}
