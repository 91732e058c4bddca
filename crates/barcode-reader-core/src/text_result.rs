use serde::Deserialize;
use serde_json::Value;

use crate::bag::read_list;
use crate::detailed::DetailedResult;
use crate::format::{BarcodeFormat, BarcodeFormat2};
use crate::localization::LocalizationResult;
use crate::modes::ResultType;

/// Snapshot of the sampled barcode zone attached to an extended result.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SamplingImageData {
    #[serde(default, deserialize_with = "crate::bag::null_as_default")]
    pub bytes: Vec<u8>,
    pub width: i32,
    pub height: i32,
}

/// A candidate or alternate decode of the same symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtendedResult {
    pub result_type: ResultType,
    pub barcode_format: BarcodeFormat,
    pub barcode_format_string: String,
    pub barcode_format_2: BarcodeFormat2,
    pub barcode_format_string_2: String,
    pub confidence: i32,
    pub bytes: Vec<u8>,
    pub accompanying_text_bytes: Vec<u8>,
    pub deformation: i32,
    pub detailed_result: Option<DetailedResult>,
    pub sampling_image: SamplingImageData,
    pub clarity: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawExtendedResult {
    result_type: ResultType,
    barcode_format: BarcodeFormat,
    barcode_format_string: String,
    #[serde(rename = "BarcodeFormat_2")]
    barcode_format_2: BarcodeFormat2,
    #[serde(rename = "BarcodeFormatString_2")]
    barcode_format_string_2: String,
    confidence: i32,
    #[serde(default)]
    bytes: Option<Vec<u8>>,
    #[serde(default)]
    accompanying_text_bytes: Option<Vec<u8>>,
    deformation: i32,
    #[serde(default)]
    detailed_result: Option<Value>,
    sampling_image: SamplingImageData,
    clarity: i32,
}

impl<'de> Deserialize<'de> for ExtendedResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawExtendedResult::deserialize(deserializer)?;
        let detailed_result =
            DetailedResult::from_native(raw.barcode_format, raw.detailed_result.as_ref())
                .map_err(serde::de::Error::custom)?;
        Ok(Self {
            result_type: raw.result_type,
            barcode_format: raw.barcode_format,
            barcode_format_string: raw.barcode_format_string,
            barcode_format_2: raw.barcode_format_2,
            barcode_format_string_2: raw.barcode_format_string_2,
            confidence: raw.confidence,
            bytes: raw.bytes.unwrap_or_default(),
            accompanying_text_bytes: raw.accompanying_text_bytes.unwrap_or_default(),
            deformation: raw.deformation,
            detailed_result,
            sampling_image: raw.sampling_image,
            clarity: raw.clarity,
        })
    }
}

/// One decoded barcode.
#[derive(Clone, Debug, PartialEq)]
pub struct TextResult {
    pub barcode_format: BarcodeFormat,
    pub barcode_format_string: String,
    pub barcode_format_2: BarcodeFormat2,
    pub barcode_format_string_2: String,
    pub barcode_text: String,
    pub barcode_bytes: Vec<u8>,
    pub localization_result: LocalizationResult,
    pub detailed_result: Option<DetailedResult>,
    /// `None` when the engine reports no extended result list.
    pub extended_results: Option<Vec<ExtendedResult>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawTextResult {
    barcode_format: BarcodeFormat,
    barcode_format_string: String,
    #[serde(rename = "BarcodeFormat_2")]
    barcode_format_2: BarcodeFormat2,
    #[serde(rename = "BarcodeFormatString_2")]
    barcode_format_string_2: String,
    barcode_text: String,
    #[serde(default)]
    barcode_bytes: Option<Vec<u8>>,
    localization_result: LocalizationResult,
    #[serde(default)]
    detailed_result: Option<Value>,
    #[serde(default)]
    extended_results: Value,
}

impl<'de> Deserialize<'de> for TextResult {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawTextResult::deserialize(deserializer)?;
        let detailed_result =
            DetailedResult::from_native(raw.barcode_format, raw.detailed_result.as_ref())
                .map_err(serde::de::Error::custom)?;
        let extended_results =
            read_list::<ExtendedResult>(&raw.extended_results).map_err(serde::de::Error::custom)?;
        Ok(Self {
            barcode_format: raw.barcode_format,
            barcode_format_string: raw.barcode_format_string,
            barcode_format_2: raw.barcode_format_2,
            barcode_format_string_2: raw.barcode_format_string_2,
            barcode_text: raw.barcode_text,
            barcode_bytes: raw.barcode_bytes.unwrap_or_default(),
            localization_result: raw.localization_result,
            detailed_result,
            extended_results,
        })
    }
}
