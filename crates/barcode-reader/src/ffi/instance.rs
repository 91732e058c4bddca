//! [`NativeEngine`] over a Dynamsoft Barcode Reader instance.

use std::ffi::{c_char, c_int, c_void, CString};
use std::path::Path;
use std::ptr::{self, NonNull};

use barcode_reader_core::{
    ConflictMode, ErrorCode, FrameDecodingParameters, ImageGeometry, NativeBag,
    PublicRuntimeSettings,
};
use log::{debug, error, warn};
use serde_json::Value;

use super::{payload, sys};
use crate::{NativeEngine, NativeFailure, NativeResult};

const MESSAGE_LEN: usize = 256;
const VALUE_LEN: usize = 512;
const NAME_LEN: usize = 256;
const CURRENT_SETTINGS: &str = "CurrentRuntimeSettings";

/// One instance of the Dynamsoft Barcode Reader library.
///
/// ```no_run
/// use barcode_reader::{BarcodeReader, DbrEngine};
///
/// let engine = DbrEngine::new().expect("engine instance");
/// let reader = BarcodeReader::new(engine);
/// reader.init_license("t0260NQAAA...")?;
/// let results = reader.decode_file("label.png", "")?;
/// # Ok::<(), barcode_reader::BarcodeReaderError>(())
/// ```
pub struct DbrEngine {
    handle: NonNull<c_void>,
}

// SAFETY: an instance has no thread affinity. `BarcodeReader` serialises
// every call through its lock.
unsafe impl Send for DbrEngine {}

impl DbrEngine {
    /// Create an instance; `None` when the library cannot allocate one.
    pub fn new() -> Option<Self> {
        // SAFETY: no preconditions.
        let handle = unsafe { sys::DBR_CreateInstance() };
        let handle = NonNull::new(handle)?;
        debug!("created engine instance");
        Some(Self { handle })
    }

    fn raw(&self) -> *mut c_void {
        self.handle.as_ptr()
    }

    fn current_settings(&self) -> NativeResult<sys::PublicRuntimeSettings> {
        let mut raw: sys::PublicRuntimeSettings = sys::zeroed();
        // SAFETY: `raw` is a writable settings struct.
        status(unsafe { sys::DBR_GetRuntimeSettings(self.raw(), &mut raw) })?;
        Ok(raw)
    }

    fn write_settings(&mut self, raw: &mut sys::PublicRuntimeSettings) -> NativeResult {
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: `raw` came from the engine; `message` holds `len` bytes.
            unsafe { sys::DBR_UpdateRuntimeSettings(handle, raw, message, len) }
        })
    }
}

impl Drop for DbrEngine {
    fn drop(&mut self) {
        // SAFETY: the handle came from `DBR_CreateInstance` and is released once.
        unsafe { sys::DBR_DestroyInstance(self.raw()) };
    }
}

fn status(code: c_int) -> NativeResult {
    if code == 0 {
        Ok(())
    } else {
        Err(code.into())
    }
}

fn buffer_text(buffer: &[c_char]) -> String {
    let bytes: Vec<u8> = buffer
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Run a call that writes its failure message into a caller buffer.
fn with_message(call: impl FnOnce(*mut c_char, c_int) -> c_int) -> NativeResult {
    let mut message = [0 as c_char; MESSAGE_LEN];
    let code = call(message.as_mut_ptr(), MESSAGE_LEN as c_int);
    if code == 0 {
        Ok(())
    } else {
        Err(NativeFailure::new(code, buffer_text(&message)))
    }
}

fn c_string(value: &str) -> NativeResult<CString> {
    CString::new(value).map_err(|_| {
        NativeFailure::new(
            ErrorCode::ParameterValueInvalid.value(),
            format!("{value:?} contains a NUL byte"),
        )
    })
}

fn c_path(path: &Path) -> NativeResult<CString> {
    let path = path.to_str().ok_or_else(|| {
        NativeFailure::new(
            ErrorCode::FileNotFound.value(),
            format!("{} is not valid UTF-8", path.display()),
        )
    })?;
    c_string(path)
}

/// Status code of a decode whose arguments could not be converted.
fn rejected(failure: NativeFailure) -> i32 {
    warn!("decode arguments rejected: {}", failure.message);
    failure.code
}

impl NativeEngine for DbrEngine {
    fn init_license(&mut self, license: &str) -> NativeResult {
        let license = c_string(license)?;
        // SAFETY: NUL-terminated argument that outlives the call.
        status(unsafe { sys::DBR_InitLicense(self.raw(), license.as_ptr()) })
    }

    fn init_license_from_server(&mut self, server: &str, license_key: &str) -> NativeResult {
        let server = c_string(server)?;
        let key = c_string(license_key)?;
        // SAFETY: NUL-terminated arguments that outlive the call.
        status(unsafe { sys::DBR_InitLicenseFromServer(self.raw(), server.as_ptr(), key.as_ptr()) })
    }

    fn init_license_from_license_content(
        &mut self,
        license_key: &str,
        content: &str,
    ) -> NativeResult {
        let key = c_string(license_key)?;
        let content = c_string(content)?;
        // SAFETY: NUL-terminated arguments that outlive the call.
        status(unsafe {
            sys::DBR_InitLicenseFromLicenseContent(self.raw(), key.as_ptr(), content.as_ptr())
        })
    }

    fn output_license_to_string(&mut self) -> NativeResult<String> {
        let mut content: *mut c_char = ptr::null_mut();
        // SAFETY: the engine allocates `content`, released below.
        let code = unsafe { sys::DBR_OutputLicenseToStringPtr(self.raw(), &mut content) };
        let license = unsafe { payload::text(content) }.unwrap_or_default();
        if !content.is_null() {
            unsafe { sys::DBR_FreeLicenseString(&mut content) };
        }
        status(code).map(|()| license)
    }

    fn runtime_settings(&mut self) -> NativeBag {
        let raw = match self.current_settings() {
            Ok(raw) => raw,
            Err(failure) => {
                error!("DBR_GetRuntimeSettings returned {}", failure.code);
                return NativeBag::new();
            }
        };
        payload::settings_from_raw(&raw)
            .to_bag()
            .unwrap_or_else(|err| {
                error!("failed to encode runtime settings: {err}");
                NativeBag::new()
            })
    }

    fn update_runtime_settings(&mut self, settings: &NativeBag) -> NativeResult {
        let settings = PublicRuntimeSettings::from_bag(settings).map_err(|err| {
            NativeFailure::new(
                ErrorCode::ParameterValueInvalid.value(),
                format!("unreadable settings payload: {err}"),
            )
        })?;
        let mut raw = self.current_settings()?;
        payload::settings_into_raw(&settings, &mut raw);
        self.write_settings(&mut raw)
    }

    fn reset_runtime_settings(&mut self) -> NativeResult {
        // SAFETY: valid handle.
        status(unsafe { sys::DBR_ResetRuntimeSettings(self.raw()) })
    }

    fn set_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
        argument_value: &str,
    ) -> NativeResult {
        let index = c_int::try_from(index).map_err(|_| {
            NativeFailure::new(ErrorCode::SetModeArgumentError.value(), "index out of range")
        })?;
        let modes_name = c_string(modes_name)?;
        let argument_name = c_string(argument_name)?;
        let argument_value = c_string(argument_value)?;
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated arguments; `message` holds `len` bytes.
            unsafe {
                sys::DBR_SetModeArgument(
                    handle,
                    modes_name.as_ptr(),
                    index,
                    argument_name.as_ptr(),
                    argument_value.as_ptr(),
                    message,
                    len,
                )
            }
        })
    }

    fn get_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
    ) -> NativeResult<String> {
        let index = c_int::try_from(index).map_err(|_| {
            NativeFailure::new(ErrorCode::GetModeArgumentError.value(), "index out of range")
        })?;
        let modes_name = c_string(modes_name)?;
        let argument_name = c_string(argument_name)?;
        let mut value = [0 as c_char; VALUE_LEN];
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated arguments; both buffers hold their stated length.
            unsafe {
                sys::DBR_GetModeArgument(
                    handle,
                    modes_name.as_ptr(),
                    index,
                    argument_name.as_ptr(),
                    value.as_mut_ptr(),
                    VALUE_LEN as c_int,
                    message,
                    len,
                )
            }
        })?;
        Ok(buffer_text(&value))
    }

    fn init_runtime_settings_with_string(
        &mut self,
        json: &str,
        conflict: ConflictMode,
    ) -> NativeResult {
        let json = c_string(json)?;
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated template; `message` holds `len` bytes.
            unsafe {
                sys::DBR_InitRuntimeSettingsWithString(
                    handle,
                    json.as_ptr(),
                    conflict.value(),
                    message,
                    len,
                )
            }
        })
    }

    fn init_runtime_settings_with_file(
        &mut self,
        path: &Path,
        conflict: ConflictMode,
    ) -> NativeResult {
        let path = c_path(path)?;
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated path; `message` holds `len` bytes.
            unsafe {
                sys::DBR_InitRuntimeSettingsWithFile(
                    handle,
                    path.as_ptr(),
                    conflict.value(),
                    message,
                    len,
                )
            }
        })
    }

    fn append_template_string(&mut self, json: &str, conflict: ConflictMode) -> NativeResult {
        let json = c_string(json)?;
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated template; `message` holds `len` bytes.
            unsafe {
                sys::DBR_AppendTplStringToRuntimeSettings(
                    handle,
                    json.as_ptr(),
                    conflict.value(),
                    message,
                    len,
                )
            }
        })
    }

    fn append_template_file(&mut self, path: &Path, conflict: ConflictMode) -> NativeResult {
        let path = c_path(path)?;
        let handle = self.raw();
        with_message(|message, len| {
            // SAFETY: NUL-terminated path; `message` holds `len` bytes.
            unsafe {
                sys::DBR_AppendTplFileToRuntimeSettings(
                    handle,
                    path.as_ptr(),
                    conflict.value(),
                    message,
                    len,
                )
            }
        })
    }

    fn output_settings_to_json_string(&mut self) -> NativeResult<String> {
        let name = c_string(CURRENT_SETTINGS)?;
        let mut content: *mut c_char = ptr::null_mut();
        // SAFETY: the engine allocates `content`, released below.
        let code =
            unsafe { sys::DBR_OutputSettingsToStringPtr(self.raw(), &mut content, name.as_ptr()) };
        let json = unsafe { payload::text(content) }.unwrap_or_default();
        if !content.is_null() {
            unsafe { sys::DBR_FreeSettingsString(&mut content) };
        }
        status(code).map(|()| json)
    }

    fn output_settings_to_json_file(&mut self, path: &Path) -> i32 {
        let (path, name) = match c_path(path).and_then(|p| Ok((p, c_string(CURRENT_SETTINGS)?))) {
            Ok(args) => args,
            Err(failure) => return failure.code,
        };
        // SAFETY: NUL-terminated arguments that outlive the call.
        unsafe { sys::DBR_OutputSettingsToFile(self.raw(), path.as_ptr(), name.as_ptr()) }
    }

    fn template_names(&mut self) -> Vec<String> {
        // SAFETY: valid handle.
        let count = unsafe { sys::DBR_GetParameterTemplateCount(self.raw()) };
        (0..count)
            .filter_map(|index| {
                let mut name = [0 as c_char; NAME_LEN];
                // SAFETY: `name` holds `NAME_LEN` bytes.
                let code = unsafe {
                    sys::DBR_GetParameterTemplateName(
                        self.raw(),
                        index,
                        name.as_mut_ptr(),
                        NAME_LEN as c_int,
                    )
                };
                if code != 0 {
                    warn!("DBR_GetParameterTemplateName({index}) returned {code}");
                    return None;
                }
                Some(buffer_text(&name))
            })
            .collect()
    }

    fn decode_file(&mut self, path: &Path, template: &str) -> i32 {
        let (path, template) = match c_path(path).and_then(|p| Ok((p, c_string(template)?))) {
            Ok(args) => args,
            Err(failure) => return rejected(failure),
        };
        // SAFETY: NUL-terminated arguments that outlive the call.
        unsafe { sys::DBR_DecodeFile(self.raw(), path.as_ptr(), template.as_ptr()) }
    }

    fn decode_buffer(&mut self, buffer: &[u8], geometry: &ImageGeometry, template: &str) -> i32 {
        let template = match c_string(template) {
            Ok(template) => template,
            Err(failure) => return rejected(failure),
        };
        // SAFETY: the reader validated `buffer` against `geometry`.
        unsafe {
            sys::DBR_DecodeBuffer(
                self.raw(),
                buffer.as_ptr(),
                geometry.width,
                geometry.height,
                geometry.stride,
                geometry.pixel_format.value(),
                template.as_ptr(),
            )
        }
    }

    fn decode_file_stream(&mut self, bytes: &[u8], template: &str) -> i32 {
        let Ok(len) = c_int::try_from(bytes.len()) else {
            return rejected(NativeFailure::new(
                ErrorCode::DibBufferInvalid.value(),
                format!("{} bytes exceed the engine's file size limit", bytes.len()),
            ));
        };
        let template = match c_string(template) {
            Ok(template) => template,
            Err(failure) => return rejected(failure),
        };
        // SAFETY: `bytes` holds `len` bytes; the template is NUL-terminated.
        unsafe { sys::DBR_DecodeFileInMemory(self.raw(), bytes.as_ptr(), len, template.as_ptr()) }
    }

    /// Decode one frame, applying the session region through the runtime
    /// settings for the duration of the call.
    ///
    /// The engine's frame filters (`threshold`, `fps`, `auto_filter`) belong
    /// to its own asynchronous frame pipeline and have no synchronous
    /// counterpart, so they are not applied here.
    fn decode_frame(
        &mut self,
        frame: &[u8],
        parameters: &FrameDecodingParameters,
        template: &str,
    ) -> i32 {
        let saved = match self.current_settings() {
            Ok(raw) => raw,
            Err(failure) => return failure.code,
        };
        let mut framed = saved;
        if !payload::replace_region(&mut framed, &parameters.region) {
            return self.decode_buffer(frame, &parameters.geometry(), template);
        }
        if let Err(failure) = self.write_settings(&mut framed) {
            warn!("frame region rejected: {}", failure.message);
            return failure.code;
        }
        let code = self.decode_buffer(frame, &parameters.geometry(), template);
        let mut saved = saved;
        if let Err(failure) = self.write_settings(&mut saved) {
            error!("failed to restore the region after a frame: {}", failure.message);
        }
        code
    }

    fn text_results(&mut self) -> Value {
        let mut array: *mut sys::TextResultArray = ptr::null_mut();
        // SAFETY: the engine allocates `array`, released below.
        let code = unsafe { sys::DBR_GetAllTextResults(self.raw(), &mut array) };
        if code != 0 {
            debug!("DBR_GetAllTextResults returned {code}");
        }
        // SAFETY: a non-null array is engine-owned and alive until freed.
        let Some(results) = (unsafe { array.as_ref() }) else {
            return Value::Null;
        };
        let value = unsafe { payload::text_results_value(results) };
        unsafe { sys::DBR_FreeTextResults(&mut array) };
        value
    }

    fn intermediate_results(&mut self) -> Value {
        let mut array: *mut sys::IntermediateResultArray = ptr::null_mut();
        // SAFETY: the engine allocates `array`, released below.
        let code = unsafe { sys::DBR_GetIntermediateResults(self.raw(), &mut array) };
        if code != 0 {
            debug!("DBR_GetIntermediateResults returned {code}");
        }
        // SAFETY: a non-null array is engine-owned and alive until freed.
        let Some(results) = (unsafe { array.as_ref() }) else {
            return Value::Null;
        };
        let value = unsafe { payload::intermediate_results_value(results) };
        unsafe { sys::DBR_FreeIntermediateResults(&mut array) };
        value
    }

    fn frame_decoding_parameters(&mut self) -> NativeBag {
        let mut raw: sys::FrameDecodingParameters = sys::zeroed();
        // SAFETY: `raw` is a writable parameters struct.
        let code = unsafe { sys::DBR_InitFrameDecodingParameters(self.raw(), &mut raw) };
        if code != 0 {
            error!("DBR_InitFrameDecodingParameters returned {code}");
            return NativeBag::new();
        }
        payload::frame_parameters_from_raw(&raw)
            .to_bag()
            .unwrap_or_else(|err| {
                error!("failed to encode frame parameters: {err}");
                NativeBag::new()
            })
    }

    fn error_string(&self, code: i32) -> String {
        // SAFETY: the engine returns a static string or null.
        unsafe { payload::text(sys::DBR_GetErrorString(code)) }.unwrap_or_default()
    }

    fn version(&self) -> String {
        // SAFETY: the engine returns a static string or null.
        unsafe { payload::text(sys::DBR_GetVersion()) }.unwrap_or_default()
    }
}
