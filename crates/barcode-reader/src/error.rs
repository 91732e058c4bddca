use barcode_reader_core::{ErrorCategory, ErrorCode, ImageGeometryError};

use crate::{NativeEngine, NativeFailure};

/// Errors produced by [`BarcodeReader`](crate::BarcodeReader).
#[derive(thiserror::Error, Debug)]
pub enum BarcodeReaderError {
    /// The engine rejected a call; `message` is the engine's own text.
    #[error("{message}")]
    Native { code: ErrorCode, message: String },

    #[error("invalid image buffer length (expected at least {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },

    #[error("invalid image geometry (width={width}, height={height}, stride={stride})")]
    InvalidGeometry { width: i32, height: i32, stride: i32 },

    #[error("video mode is not running")]
    VideoModeNotRunning,

    #[error("engine payload has an unexpected shape: {0}")]
    Bag(#[from] serde_json::Error),
}

impl BarcodeReaderError {
    /// Build a [`Native`](Self::Native) error from a status code, taking the
    /// message from the engine when it has one.
    pub fn from_engine<E: NativeEngine + ?Sized>(engine: &E, code: i32) -> Self {
        let status = ErrorCode::from(code);
        let mut message = engine.error_string(code);
        if message.is_empty() {
            message = status.description().to_owned();
        }
        Self::Native {
            code: status,
            message,
        }
    }

    /// Build a [`Native`](Self::Native) error from a rejected call, keeping
    /// the engine's call-specific message when it wrote one.
    pub fn from_failure<E: NativeEngine + ?Sized>(engine: &E, failure: NativeFailure) -> Self {
        if failure.message.is_empty() {
            return Self::from_engine(engine, failure.code);
        }
        Self::Native {
            code: ErrorCode::from(failure.code),
            message: failure.message,
        }
    }

    /// Status code for engine-reported errors.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Native { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.code().map(ErrorCode::category)
    }
}

impl From<ImageGeometryError> for BarcodeReaderError {
    fn from(err: ImageGeometryError) -> Self {
        match err {
            ImageGeometryError::InvalidDimensions {
                width,
                height,
                stride,
            } => Self::InvalidGeometry {
                width,
                height,
                stride,
            },
            ImageGeometryError::BufferTooSmall { expected, got } => {
                Self::InvalidBuffer { expected, got }
            }
        }
    }
}

/// Turn a status code into `Ok(())` or a [`BarcodeReaderError::Native`].
pub(crate) fn check<E: NativeEngine + ?Sized>(
    engine: &E,
    code: i32,
) -> Result<(), BarcodeReaderError> {
    if ErrorCode::from(code).is_ok() {
        Ok(())
    } else {
        Err(BarcodeReaderError::from_engine(engine, code))
    }
}
