//! Typed value objects for a barcode recognition engine.
//!
//! The engine exchanges everything as untyped key/value payloads
//! ([`NativeBag`]) and raw `i32` codes. This crate gives those payloads a
//! typed shape: barcode format masks, algorithm mode lists, runtime
//! settings, decode results, intermediate pipeline artifacts and status
//! codes. It performs no recognition itself and does not depend on any
//! engine implementation.
//!
//! Conversions are lossless: enum values the crate does not name are kept
//! in `Other(i32)` variants, and writing settings back only touches the keys
//! they model.

#[macro_use]
mod macros;

mod bag;
mod detailed;
mod error_code;
mod format;
mod frame;
mod image;
mod intermediate;
mod localization;
mod logger;
mod modes;
mod region;
mod settings;
mod text_result;

pub use bag::{read_bag, read_list, write_bag, NativeBag};
pub use detailed::{
    AztecDetails, DataMatrixDetails, DetailedKind, DetailedResult, OneDDetails, Pdf417Details,
    QrCodeDetails,
};
pub use error_code::{ErrorCategory, ErrorCode};
pub use format::{BarcodeFormat, BarcodeFormat2, IntermediateResultTypes};
pub use frame::FrameDecodingParameters;
pub use image::{bytes_per_pixel, ImageGeometry, ImageGeometryError};
pub use intermediate::{
    Contour, ImageData, IntermediateItems, IntermediateProvenance, IntermediateResult,
    LineSegment, ModeProvenance, RegionOfInterest,
};
pub use localization::{LocalizationResult, Point};
pub use modes::*;
pub use region::{PixelRect, RegionBounds, RegionDefinition};
pub use settings::PublicRuntimeSettings;
pub use text_result::{ExtendedResult, SamplingImageData, TextResult};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init, init_from_env, init_with_level, LoggerConfig, LOG_ENV};
