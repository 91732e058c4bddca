//! Binding to the Dynamsoft Barcode Reader C library.
//!
//! The `dbr` feature links `DynamsoftBarcodeReader` and exposes
//! [`DbrEngine`]. Point the linker at the SDK's library directory, for
//! example with `RUSTFLAGS="-L /opt/dynamsoft/lib"`. Without the feature
//! only the struct conversions are compiled, for their tests.
#![cfg_attr(not(feature = "dbr"), allow(dead_code))]

mod payload;
mod sys;

#[cfg(feature = "dbr")]
mod instance;

#[cfg(feature = "dbr")]
pub use instance::DbrEngine;
