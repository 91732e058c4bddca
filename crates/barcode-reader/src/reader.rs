//! The typed client over a [`NativeEngine`].

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use barcode_reader_core::{
    read_list, ConflictMode, ErrorCode, FrameDecodingParameters, ImageGeometry,
    IntermediateResult, PublicRuntimeSettings, TextResult,
};
use log::{debug, error, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::error::check;
use crate::video::{FrameResult, VideoSession};
use crate::{BarcodeReaderError, NativeEngine, NativeResult};

/// Barcode reader bound to one engine instance.
///
/// Engine calls go through an internal lock so a running video session can
/// share the engine with the caller; the reader itself expects a single
/// owner.
pub struct BarcodeReader<E: NativeEngine + Send + 'static> {
    engine: Arc<Mutex<E>>,
    video: Option<VideoSession>,
}

impl<E: NativeEngine + Send + 'static> BarcodeReader<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            video: None,
        }
    }

    /// Version of this crate.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    pub fn engine_version(&self) -> String {
        self.engine().version()
    }

    /// Engine message for a status code.
    pub fn get_error_string(&self, code: i32) -> String {
        self.engine().error_string(code)
    }

    fn engine(&self) -> MutexGuard<'_, E> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn call<T>(
        &self,
        f: impl FnOnce(&mut E) -> NativeResult<T>,
    ) -> Result<T, BarcodeReaderError> {
        let mut engine = self.engine();
        f(&mut *engine).map_err(|failure| {
            debug!("engine call returned {}", failure.code);
            BarcodeReaderError::from_failure(&*engine, failure)
        })
    }

    // License

    pub fn init_license(&self, license: &str) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.init_license(license))
    }

    pub fn init_license_from_server(
        &self,
        server: &str,
        license_key: &str,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.init_license_from_server(server, license_key))
    }

    pub fn init_license_from_license_content(
        &self,
        license_key: &str,
        content: &str,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.init_license_from_license_content(license_key, content))
    }

    /// Export the license for offline activation.
    pub fn output_license_to_string(&self) -> Result<String, BarcodeReaderError> {
        self.call(|e| e.output_license_to_string())
    }

    // Runtime settings

    /// Current settings, or `None` (logged) when the engine payload cannot be
    /// mapped.
    pub fn get_runtime_settings(&self) -> Option<PublicRuntimeSettings> {
        let bag = self.engine().runtime_settings();
        match PublicRuntimeSettings::from_bag(&bag) {
            Ok(settings) => Some(settings),
            Err(err) => {
                error!("failed to read runtime settings: {err}");
                None
            }
        }
    }

    /// Apply `settings` on top of the engine's current settings.
    ///
    /// Keys the engine reports but [`PublicRuntimeSettings`] does not model
    /// are sent back unchanged. A mapping failure is logged and the current
    /// payload is forwarded as is.
    pub fn update_runtime_settings(
        &self,
        settings: &PublicRuntimeSettings,
    ) -> Result<(), BarcodeReaderError> {
        let mut engine = self.engine();
        let mut bag = engine.runtime_settings();
        if let Err(err) = settings.update_bag(&mut bag) {
            error!("failed to write runtime settings: {err}");
        }
        engine.update_runtime_settings(&bag).map_err(|failure| {
            debug!("update_runtime_settings returned {}", failure.code);
            BarcodeReaderError::from_failure(&*engine, failure)
        })
    }

    pub fn reset_runtime_settings(&self) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.reset_runtime_settings())
    }

    /// Set an optional argument of one entry of a mode list, e.g.
    /// `("BinarizationModes", 0, "EnableFillBinaryVacancy", "1")`.
    pub fn set_mode_argument(
        &self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
        argument_value: &str,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.set_mode_argument(modes_name, index, argument_name, argument_value))
    }

    pub fn get_mode_argument(
        &self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
    ) -> Result<String, BarcodeReaderError> {
        self.call(|e| e.get_mode_argument(modes_name, index, argument_name))
    }

    // Templates

    pub fn init_runtime_settings_with_string(
        &self,
        json: &str,
        conflict: ConflictMode,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.init_runtime_settings_with_string(json, conflict))
    }

    pub fn init_runtime_settings_with_file(
        &self,
        path: impl AsRef<Path>,
        conflict: ConflictMode,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.init_runtime_settings_with_file(path.as_ref(), conflict))
    }

    pub fn append_template_string_to_runtime_settings(
        &self,
        json: &str,
        conflict: ConflictMode,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.append_template_string(json, conflict))
    }

    pub fn append_template_file_to_runtime_settings(
        &self,
        path: impl AsRef<Path>,
        conflict: ConflictMode,
    ) -> Result<(), BarcodeReaderError> {
        self.call(|e| e.append_template_file(path.as_ref(), conflict))
    }

    pub fn output_settings_to_json_string(&self) -> Result<String, BarcodeReaderError> {
        self.call(|e| e.output_settings_to_json_string())
    }

    pub fn output_settings_to_json_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<(), BarcodeReaderError> {
        let mut engine = self.engine();
        let code = engine.output_settings_to_json_file(path.as_ref());
        debug!("output_settings_to_json_file returned {code}");
        check(&*engine, code)
    }

    pub fn get_all_template_names(&self) -> Vec<String> {
        self.engine().template_names()
    }

    // Synchronous decode

    /// Decode an image file. An empty `template` uses the current settings.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, path), fields(path = %path.as_ref().display()))
    )]
    pub fn decode_file(
        &self,
        path: impl AsRef<Path>,
        template: &str,
    ) -> Result<Vec<TextResult>, BarcodeReaderError> {
        let mut engine = self.engine();
        let code = engine.decode_file(path.as_ref(), template);
        collect_text_results(&mut *engine, code)
    }

    /// Decode a raw pixel buffer.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, buffer),
            fields(width = geometry.width, height = geometry.height, len = buffer.len())
        )
    )]
    pub fn decode_buffer(
        &self,
        buffer: &[u8],
        geometry: ImageGeometry,
        template: &str,
    ) -> Result<Vec<TextResult>, BarcodeReaderError> {
        geometry.validate_len(buffer.len())?;
        let mut engine = self.engine();
        let code = engine.decode_buffer(buffer, &geometry, template);
        collect_text_results(&mut *engine, code)
    }

    /// Decode an encoded image (PNG, JPEG, PDF, ...) held in memory.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, bytes), fields(len = bytes.len()))
    )]
    pub fn decode_file_stream(
        &self,
        bytes: &[u8],
        template: &str,
    ) -> Result<Vec<TextResult>, BarcodeReaderError> {
        let mut engine = self.engine();
        let code = engine.decode_file_stream(bytes, template);
        collect_text_results(&mut *engine, code)
    }

    /// Decode an `image` crate image as an RGB_888 buffer.
    #[cfg(feature = "image")]
    pub fn decode_image(
        &self,
        image: &::image::DynamicImage,
        template: &str,
    ) -> Result<Vec<TextResult>, BarcodeReaderError> {
        let (buffer, geometry) = crate::convert::rgb_buffer(image)?;
        self.decode_buffer(&buffer, geometry, template)
    }

    /// Pipeline artifacts of the last decode, if any were retained.
    pub fn get_all_intermediate_results(
        &self,
    ) -> Result<Option<Vec<IntermediateResult>>, BarcodeReaderError> {
        let raw = self.engine().intermediate_results();
        Ok(read_list(&raw)?)
    }

    // Video mode

    /// Engine defaults for a video session.
    pub fn init_frame_decoding_parameters(
        &self,
    ) -> Result<FrameDecodingParameters, BarcodeReaderError> {
        let bag = self.engine().frame_decoding_parameters();
        Ok(FrameDecodingParameters::from_bag(&bag)?)
    }

    /// Start decoding appended frames on a worker thread.
    ///
    /// `callback` runs on the worker for every decoded frame until
    /// [`stop_video_mode`](Self::stop_video_mode) returns.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "info",
            skip(self, parameters, callback),
            fields(width = parameters.width, height = parameters.height)
        )
    )]
    pub fn start_video_mode<F>(
        &mut self,
        parameters: FrameDecodingParameters,
        callback: F,
        template: &str,
    ) -> Result<(), BarcodeReaderError>
    where
        F: FnMut(&FrameResult) + Send + 'static,
    {
        if self.video.is_some() {
            return Err(self.native_error(ErrorCode::FrameDecodingThreadExists));
        }
        let session = VideoSession::start(
            Arc::clone(&self.engine),
            parameters,
            template.to_owned(),
            callback,
        )
        .map_err(|err| {
            error!("failed to spawn video worker: {err}");
            self.native_error(ErrorCode::Unknown)
        })?;
        self.video = Some(session);
        debug!("video mode started");
        Ok(())
    }

    /// Queue a frame laid out as the session's frame parameters describe.
    ///
    /// Returns the frame id; ids increase by one per call, starting at 0 for
    /// each session. When the queue is full the frame is dropped.
    pub fn append_video_frame(
        &mut self,
        frame: impl Into<Vec<u8>>,
    ) -> Result<u64, BarcodeReaderError> {
        self.video
            .as_mut()
            .ok_or(BarcodeReaderError::VideoModeNotRunning)?
            .append(frame.into())
    }

    /// Stop the session, after the worker finishes the frames already queued.
    pub fn stop_video_mode(&mut self) -> Result<(), BarcodeReaderError> {
        match self.video.take() {
            Some(session) => {
                session.stop();
                debug!("video mode stopped");
                Ok(())
            }
            None => Err(self.native_error(ErrorCode::StopDecodingThreadFailed)),
        }
    }

    /// Frames waiting to be decoded. Advisory; 0 when idle.
    pub fn get_length_of_frame_queue(&self) -> usize {
        self.video.as_ref().map_or(0, VideoSession::queue_len)
    }

    /// The most recent frame results, oldest first.
    pub fn recent_frame_results(&self) -> Vec<FrameResult> {
        self.video
            .as_ref()
            .map(VideoSession::recent_results)
            .unwrap_or_default()
    }

    pub fn is_video_mode_running(&self) -> bool {
        self.video.is_some()
    }

    fn native_error(&self, code: ErrorCode) -> BarcodeReaderError {
        BarcodeReaderError::from_engine(&*self.engine(), code.value())
    }
}

impl<E: NativeEngine + Send + 'static> Drop for BarcodeReader<E> {
    fn drop(&mut self) {
        if let Some(session) = self.video.take() {
            debug!("stopping video mode on drop");
            session.stop();
        }
    }
}

/// Fetch the results of a decode that returned `code`.
///
/// Only tolerated statuses fetch results; any other status is an error.
pub(crate) fn collect_text_results<E: NativeEngine + ?Sized>(
    engine: &mut E,
    code: i32,
) -> Result<Vec<TextResult>, BarcodeReaderError> {
    let status = ErrorCode::from(code);
    if !status.is_decode_tolerated() {
        debug!("decode failed with {code}");
        return Err(BarcodeReaderError::from_engine(engine, code));
    }
    if !status.is_ok() {
        warn!("decode finished with {status:?} ({code}), returning available results");
    }
    let raw = engine.text_results();
    let results = read_list::<TextResult>(&raw)?.unwrap_or_default();
    debug!("decode returned {} result(s)", results.len());
    Ok(results)
}
