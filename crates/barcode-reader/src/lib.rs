//! Typed client facade over an external barcode recognition engine.
//!
//! This crate provides:
//! - [`NativeEngine`], the call surface an engine implementation supplies
//! - [`BarcodeReader`], which turns the engine's status codes and untyped
//!   payloads into typed results and [`BarcodeReaderError`]s
//! - a video mode that decodes appended frames on an owned worker thread
//! - (feature `image`) helpers decoding `image::DynamicImage` values
//! - (feature `dbr`) `DbrEngine`, an engine over the Dynamsoft Barcode
//!   Reader C library
//!
//! ## Quickstart
//!
//! ```no_run
//! use barcode_reader::{BarcodeReader, NativeEngine};
//!
//! # fn run<E: NativeEngine + Send + 'static>(engine: E) -> Result<(), barcode_reader::BarcodeReaderError> {
//! let reader = BarcodeReader::new(engine);
//! reader.init_license("t0260NQAAA...")?;
//!
//! let mut settings = reader.get_runtime_settings().unwrap_or_default();
//! settings.expected_barcodes_count = 1;
//! reader.update_runtime_settings(&settings)?;
//!
//! for result in reader.decode_file("label.png", "")? {
//!     println!("{}: {}", result.barcode_format_string, result.barcode_text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Decode status handling
//!
//! A decode that ends with a clean success, a timeout or one of the
//! per-symbology license warnings still returns whatever results the engine
//! found (see [`ErrorCode::DECODE_TOLERATED`](core::ErrorCode::DECODE_TOLERATED)).
//! Every other status is returned as [`BarcodeReaderError::Native`] carrying
//! the engine's message.
//!
//! ## API map
//! - `barcode_reader::core`: value objects (formats, modes, settings, results,
//!   status codes, logger).
//! - `barcode_reader::BarcodeReader`: license, settings, templates, decode,
//!   intermediate results, video mode.
//! - `barcode_reader::convert` (feature `image`): `image` buffers to engine
//!   buffers.

pub use barcode_reader_core as core;

pub use barcode_reader_core::{
    ConflictMode, ErrorCode, FrameDecodingParameters, ImageGeometry, ImagePixelFormat,
    IntermediateResult, PublicRuntimeSettings, TextResult,
};

mod engine;
mod error;
mod reader;
mod video;

#[cfg(feature = "image")]
pub mod convert;

#[cfg(any(test, feature = "dbr"))]
mod ffi;

pub use engine::{NativeEngine, NativeFailure, NativeResult};
pub use error::BarcodeReaderError;
pub use reader::BarcodeReader;
pub use video::FrameResult;

#[cfg(feature = "dbr")]
pub use ffi::DbrEngine;
