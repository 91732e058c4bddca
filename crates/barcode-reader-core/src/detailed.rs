//! Symbology-specific result details.

use serde::de::Error as _;
use serde::Deserialize;
use serde_json::Value;

use crate::format::BarcodeFormat;

/// Details of a linear (1D) barcode.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OneDDetails {
    pub module_size: i32,
    pub start_chars_bytes: Vec<u8>,
    pub stop_chars_bytes: Vec<u8>,
    pub check_digit_bytes: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QrCodeDetails {
    pub module_size: i32,
    pub rows: i32,
    pub columns: i32,
    pub error_correction_level: i32,
    pub version: i32,
    pub model: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DataMatrixDetails {
    pub module_size: i32,
    pub rows: i32,
    pub columns: i32,
    pub data_region_rows: i32,
    pub data_region_columns: i32,
    pub data_region_number: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Pdf417Details {
    pub module_size: i32,
    pub rows: i32,
    pub columns: i32,
    pub error_correction_level: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AztecDetails {
    pub module_size: i32,
    pub rows: i32,
    pub columns: i32,
    pub layer_number: i32,
}

/// Symbology-specific details, one variant per supported family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailedResult {
    OneD(OneDDetails),
    QrCode(QrCodeDetails),
    DataMatrix(DataMatrixDetails),
    Pdf417(Pdf417Details),
    Aztec(AztecDetails),
}

/// Which [`DetailedResult`] variant a format selects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailedKind {
    OneD,
    QrCode,
    DataMatrix,
    Pdf417,
    Aztec,
}

impl DetailedKind {
    /// Select the details variant for a reported format.
    ///
    /// Any 1D bit wins, even when other bits are set; after that only exact
    /// matches against the four 2D formats select a variant.
    pub fn for_format(format: BarcodeFormat) -> Option<Self> {
        if format.is_oned() {
            Some(Self::OneD)
        } else if format == BarcodeFormat::QR_CODE {
            Some(Self::QrCode)
        } else if format == BarcodeFormat::DATAMATRIX {
            Some(Self::DataMatrix)
        } else if format == BarcodeFormat::PDF417 {
            Some(Self::Pdf417)
        } else if format == BarcodeFormat::AZTEC {
            Some(Self::Aztec)
        } else {
            None
        }
    }
}

impl DetailedResult {
    /// Build the details for `format` from the engine's `DetailedResult` value.
    ///
    /// Formats without a details variant yield `None` whatever the payload.
    pub fn from_native(
        format: BarcodeFormat,
        value: Option<&Value>,
    ) -> Result<Option<Self>, serde_json::Error> {
        let Some(kind) = DetailedKind::for_format(format) else {
            return Ok(None);
        };
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => {
                return Err(serde_json::Error::custom(format!(
                    "missing DetailedResult for {kind:?} format {:#x}",
                    format.bits()
                )))
            }
        };
        let details = match kind {
            DetailedKind::OneD => Self::OneD(OneDDetails::deserialize(value)?),
            DetailedKind::QrCode => Self::QrCode(QrCodeDetails::deserialize(value)?),
            DetailedKind::DataMatrix => Self::DataMatrix(DataMatrixDetails::deserialize(value)?),
            DetailedKind::Pdf417 => Self::Pdf417(Pdf417Details::deserialize(value)?),
            DetailedKind::Aztec => Self::Aztec(AztecDetails::deserialize(value)?),
        };
        Ok(Some(details))
    }

    pub fn kind(&self) -> DetailedKind {
        match self {
            Self::OneD(_) => DetailedKind::OneD,
            Self::QrCode(_) => DetailedKind::QrCode,
            Self::DataMatrix(_) => DetailedKind::DataMatrix,
            Self::Pdf417(_) => DetailedKind::Pdf417,
            Self::Aztec(_) => DetailedKind::Aztec,
        }
    }

    /// Module size shared by every variant.
    pub fn module_size(&self) -> i32 {
        match self {
            Self::OneD(d) => d.module_size,
            Self::QrCode(d) => d.module_size,
            Self::DataMatrix(d) => d.module_size,
            Self::Pdf417(d) => d.module_size,
            Self::Aztec(d) => d.module_size,
        }
    }
}
