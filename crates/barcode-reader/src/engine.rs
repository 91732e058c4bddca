//! The call surface consumed from a recognition engine.

use std::path::Path;

use barcode_reader_core::{ConflictMode, FrameDecodingParameters, ImageGeometry, NativeBag};
use serde_json::Value;

/// A call the engine rejected: its status code and the message the engine
/// wrote for this particular call.
///
/// Settings, template and mode-argument calls report messages such as the
/// offending JSON key, which the generic text for the code does not carry.
/// An empty `message` means the engine gave none; the reader then falls back
/// to [`NativeEngine::error_string`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NativeFailure {
    pub code: i32,
    pub message: String,
}

impl NativeFailure {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl From<i32> for NativeFailure {
    /// A failure with no call-specific message.
    fn from(code: i32) -> Self {
        Self {
            code,
            message: String::new(),
        }
    }
}

/// Outcome of an engine call that can carry its own failure message.
pub type NativeResult<T = ()> = Result<T, NativeFailure>;

/// A barcode recognition engine instance.
///
/// License, settings, mode-argument and template calls return a
/// [`NativeResult`] so the engine's per-call message reaches the caller.
/// Decode and export-to-file calls report only the raw code (`0` on
/// success, see [`ErrorCode`](barcode_reader_core::ErrorCode)), whose text
/// comes from [`error_string`](Self::error_string). Results of the most
/// recent decode are retrieved with separate calls, as untyped payloads.
/// [`BarcodeReader`](crate::BarcodeReader) owns exactly one engine and
/// translates everything into typed values.
pub trait NativeEngine {
    /// Activate with a product key.
    fn init_license(&mut self, license: &str) -> NativeResult;

    /// Activate against a license server for online verification.
    fn init_license_from_server(&mut self, server: &str, license_key: &str) -> NativeResult;

    /// Activate from content previously exported by
    /// [`output_license_to_string`](Self::output_license_to_string).
    fn init_license_from_license_content(&mut self, license_key: &str, content: &str)
        -> NativeResult;

    /// Export the current license for offline verification.
    fn output_license_to_string(&mut self) -> NativeResult<String>;

    /// Current runtime settings payload.
    fn runtime_settings(&mut self) -> NativeBag;

    fn update_runtime_settings(&mut self, settings: &NativeBag) -> NativeResult;

    fn reset_runtime_settings(&mut self) -> NativeResult;

    /// Set an optional argument of the mode at `index` of the list `modes_name`.
    fn set_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
        argument_value: &str,
    ) -> NativeResult;

    fn get_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
    ) -> NativeResult<String>;

    fn init_runtime_settings_with_string(
        &mut self,
        json: &str,
        conflict: ConflictMode,
    ) -> NativeResult;

    fn init_runtime_settings_with_file(&mut self, path: &Path, conflict: ConflictMode)
        -> NativeResult;

    fn append_template_string(&mut self, json: &str, conflict: ConflictMode) -> NativeResult;

    fn append_template_file(&mut self, path: &Path, conflict: ConflictMode) -> NativeResult;

    fn output_settings_to_json_string(&mut self) -> NativeResult<String>;

    fn output_settings_to_json_file(&mut self, path: &Path) -> i32;

    fn template_names(&mut self) -> Vec<String>;

    /// Decode an image file. An empty `template` uses the current settings.
    fn decode_file(&mut self, path: &Path, template: &str) -> i32;

    /// Decode raw pixels laid out as `geometry` describes.
    fn decode_buffer(&mut self, buffer: &[u8], geometry: &ImageGeometry, template: &str) -> i32;

    /// Decode an encoded image file held in memory.
    fn decode_file_stream(&mut self, bytes: &[u8], template: &str) -> i32;

    /// Decode one video frame.
    ///
    /// The default decodes the frame as a plain buffer with
    /// [`parameters.geometry()`](FrameDecodingParameters::geometry) and
    /// ignores the frame filters (`threshold`, `fps`, `auto_filter`,
    /// `region`). Engines that filter frames override this.
    fn decode_frame(
        &mut self,
        frame: &[u8],
        parameters: &FrameDecodingParameters,
        template: &str,
    ) -> i32 {
        self.decode_buffer(frame, &parameters.geometry(), template)
    }

    /// Text results of the last decode: a list of result payloads, or
    /// `null` when nothing was found.
    fn text_results(&mut self) -> Value;

    /// Intermediate results of the last decode, or `null`.
    fn intermediate_results(&mut self) -> Value;

    /// Default frame decoding parameters payload.
    fn frame_decoding_parameters(&mut self) -> NativeBag;

    /// Generic message for a status code.
    fn error_string(&self, code: i32) -> String;

    fn version(&self) -> String;
}
