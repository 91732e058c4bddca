//! Scripted in-memory engine and payload fixtures shared by the integration
//! tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use barcode_reader::core::{
    ConflictMode, FrameDecodingParameters, ImageGeometry, NativeBag, PublicRuntimeSettings,
};
use barcode_reader::{NativeEngine, NativeFailure, NativeResult};
use serde_json::{json, Value};

pub const QR_CODE: i32 = 0x0400_0000;
pub const CODE_128: i32 = 0x2;

/// Engine message for `code`, as the fake reports it.
pub fn message_for(code: i32) -> String {
    match code {
        0 => "Successful.".to_owned(),
        -10005 => "The file is not found.".to_owned(),
        -10030 => "Failed to parse JSON string.".to_owned(),
        -10049 => "Frame decoding thread already exists.".to_owned(),
        -10050 => "Failed to stop the frame decoding thread.".to_owned(),
        other => format!("engine error {other}"),
    }
}

/// Bare status code as a call outcome, with no call-specific message.
fn status(code: i32) -> NativeResult {
    if code == 0 {
        Ok(())
    } else {
        Err(code.into())
    }
}

/// Calls observed by the engine, shared with the test after the engine has
/// been moved into a reader.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }

    pub fn last_settings(&self) -> Option<Value> {
        self.entries()
            .iter()
            .rev()
            .find_map(|e| e.strip_prefix("update_runtime_settings ").map(str::to_owned))
            .map(|s| serde_json::from_str(&s).expect("journal json"))
    }
}

/// Blocks the engine inside a frame decode until the test releases it.
pub struct FrameGate {
    pub started: Sender<()>,
    pub release: Receiver<()>,
}

pub struct FakeEngine {
    pub journal: Journal,
    pub license: Option<String>,
    pub license_status: i32,
    pub settings: NativeBag,
    pub update_failure: Option<NativeFailure>,
    pub frame_defaults: NativeBag,
    pub templates: Vec<String>,
    pub mode_arguments: HashMap<(String, usize, String), String>,
    pub decode_status: i32,
    pub text_results: Value,
    pub intermediate_results: Value,
    pub gate: Option<FrameGate>,
}

impl FakeEngine {
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut settings = PublicRuntimeSettings::default()
            .to_bag()
            .expect("default settings");
        settings.insert("EngineOnlyKey".into(), json!("kept"));
        Self {
            journal: Journal::default(),
            license: None,
            license_status: 0,
            settings,
            update_failure: None,
            frame_defaults: FrameDecodingParameters::default()
                .to_bag()
                .expect("default frame parameters"),
            templates: vec!["default".to_owned()],
            mode_arguments: HashMap::new(),
            decode_status: 0,
            text_results: Value::Null,
            intermediate_results: Value::Null,
            gate: None,
        }
    }

    pub fn with_results(mut self, status: i32, results: Value) -> Self {
        self.decode_status = status;
        self.text_results = results;
        self
    }

    fn template_name(json: &str) -> NativeResult<String> {
        let value: Value = serde_json::from_str(json).map_err(|err| {
            NativeFailure::new(-10030, format!("Failed to parse JSON string: {err}."))
        })?;
        value
            .get("ImageParameter")
            .and_then(|p| p.get("Name"))
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| {
                NativeFailure::new(-10034, "ImageParameter: the Name key is missing.")
            })
    }

    fn load_template(&mut self, json: &str, conflict: ConflictMode, replace: bool) -> NativeResult {
        let name = Self::template_name(json)?;
        if replace && conflict == ConflictMode::Overwrite {
            self.templates.clear();
        }
        let exists = self.templates.contains(&name);
        match (exists, conflict) {
            (false, _) => self.templates.push(name),
            (true, ConflictMode::Ignore) => {}
            (true, _) => {
                self.journal.push(format!("overwrote {name}"));
            }
        }
        Ok(())
    }

    fn settings_json(&self) -> String {
        json!({
            "Version": "3.0",
            "ImageParameter": {"Name": self.templates.first().cloned().unwrap_or_default()},
            "Settings": Value::Object(self.settings.clone()),
        })
        .to_string()
    }
}

impl NativeEngine for FakeEngine {
    fn init_license(&mut self, license: &str) -> NativeResult {
        self.journal.push(format!("init_license {license}"));
        if self.license_status == 0 {
            self.license = Some(license.to_owned());
        }
        status(self.license_status)
    }

    fn init_license_from_server(&mut self, server: &str, license_key: &str) -> NativeResult {
        self.journal
            .push(format!("init_license_from_server {server} {license_key}"));
        status(self.license_status)
    }

    fn init_license_from_license_content(
        &mut self,
        license_key: &str,
        content: &str,
    ) -> NativeResult {
        self.journal
            .push(format!("init_license_from_license_content {license_key} {content}"));
        if self.license_status == 0 {
            self.license = Some(content.to_owned());
        }
        status(self.license_status)
    }

    fn output_license_to_string(&mut self) -> NativeResult<String> {
        self.license
            .clone()
            .ok_or_else(|| NativeFailure::from(-10042))
    }

    fn runtime_settings(&mut self) -> NativeBag {
        self.settings.clone()
    }

    fn update_runtime_settings(&mut self, settings: &NativeBag) -> NativeResult {
        self.journal.push(format!(
            "update_runtime_settings {}",
            Value::Object(settings.clone())
        ));
        match &self.update_failure {
            Some(failure) => Err(failure.clone()),
            None => {
                self.settings = settings.clone();
                Ok(())
            }
        }
    }

    fn reset_runtime_settings(&mut self) -> NativeResult {
        self.settings = PublicRuntimeSettings::default()
            .to_bag()
            .expect("default settings");
        Ok(())
    }

    fn set_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
        argument_value: &str,
    ) -> NativeResult {
        if !modes_name.ends_with("Modes") || index >= 8 {
            return Err(NativeFailure::new(
                -10051,
                format!("{modes_name}[{index}] does not exist."),
            ));
        }
        self.mode_arguments.insert(
            (modes_name.to_owned(), index, argument_name.to_owned()),
            argument_value.to_owned(),
        );
        Ok(())
    }

    fn get_mode_argument(
        &mut self,
        modes_name: &str,
        index: usize,
        argument_name: &str,
    ) -> NativeResult<String> {
        self.mode_arguments
            .get(&(modes_name.to_owned(), index, argument_name.to_owned()))
            .cloned()
            .ok_or_else(|| {
                NativeFailure::new(
                    -10055,
                    format!("{argument_name} is not set on {modes_name}[{index}]."),
                )
            })
    }

    fn init_runtime_settings_with_string(
        &mut self,
        json: &str,
        conflict: ConflictMode,
    ) -> NativeResult {
        self.load_template(json, conflict, true)
    }

    fn init_runtime_settings_with_file(
        &mut self,
        path: &Path,
        conflict: ConflictMode,
    ) -> NativeResult {
        let json = std::fs::read_to_string(path).map_err(|_| NativeFailure::from(-10005))?;
        self.load_template(&json, conflict, true)
    }

    fn append_template_string(&mut self, json: &str, conflict: ConflictMode) -> NativeResult {
        self.load_template(json, conflict, false)
    }

    fn append_template_file(&mut self, path: &Path, conflict: ConflictMode) -> NativeResult {
        let json = std::fs::read_to_string(path).map_err(|_| NativeFailure::from(-10005))?;
        self.load_template(&json, conflict, false)
    }

    fn output_settings_to_json_string(&mut self) -> NativeResult<String> {
        Ok(self.settings_json())
    }

    fn output_settings_to_json_file(&mut self, path: &Path) -> i32 {
        match std::fs::write(path, self.settings_json()) {
            Ok(()) => 0,
            Err(_) => -10005,
        }
    }

    fn template_names(&mut self) -> Vec<String> {
        self.templates.clone()
    }

    fn decode_file(&mut self, path: &Path, template: &str) -> i32 {
        self.journal
            .push(format!("decode_file {} [{template}]", path.display()));
        self.decode_status
    }

    fn decode_buffer(&mut self, buffer: &[u8], geometry: &ImageGeometry, template: &str) -> i32 {
        if let Some(gate) = &self.gate {
            let _ = gate.started.send(());
            let _ = gate.release.recv();
        }
        self.journal.push(format!(
            "decode_buffer {} {}x{} stride={} [{template}]",
            buffer.len(),
            geometry.width,
            geometry.height,
            geometry.stride
        ));
        self.decode_status
    }

    fn decode_file_stream(&mut self, bytes: &[u8], template: &str) -> i32 {
        self.journal
            .push(format!("decode_file_stream {} [{template}]", bytes.len()));
        self.decode_status
    }

    fn text_results(&mut self) -> Value {
        self.text_results.clone()
    }

    fn intermediate_results(&mut self) -> Value {
        self.intermediate_results.clone()
    }

    fn frame_decoding_parameters(&mut self) -> NativeBag {
        self.frame_defaults.clone()
    }

    fn error_string(&self, code: i32) -> String {
        message_for(code)
    }

    fn version(&self) -> String {
        "7.3.0.0".to_owned()
    }
}

pub fn localization(format: i32) -> Value {
    json!({
        "TerminatePhase": 32,
        "BarcodeFormat": format,
        "BarcodeFormatString": "",
        "BarcodeFormat_2": 0,
        "BarcodeFormatString_2": "",
        "X1": 0, "Y1": 0, "X2": 50, "Y2": 0, "X3": 50, "Y3": 50, "X4": 0, "Y4": 50,
        "Angle": 0,
        "ModuleSize": 2,
        "PageNumber": 0,
        "RegionName": "",
        "DocumentName": "",
        "ResultCoordinateType": 1,
        "AccompanyingTextBytes": null,
        "Confidence": 90
    })
}

/// A text result payload; 1D formats get 1D details, everything else gets
/// the 2D fields.
pub fn text_result(format: i32, text: &str) -> Value {
    let details = if format & 0x7FF != 0 {
        json!({
            "ModuleSize": 2,
            "StartCharsBytes": [],
            "StopCharsBytes": [],
            "CheckDigitBytes": []
        })
    } else {
        json!({
            "ModuleSize": 4,
            "Rows": 25,
            "Columns": 25,
            "ErrorCorrectionLevel": 2,
            "Version": 2,
            "Model": 2
        })
    };
    json!({
        "BarcodeFormat": format,
        "BarcodeFormatString": "",
        "BarcodeFormat_2": 0,
        "BarcodeFormatString_2": "",
        "BarcodeText": text,
        "BarcodeBytes": text.as_bytes(),
        "LocalizationResult": localization(format),
        "DetailedResult": details,
        "ExtendedResults": null
    })
}

pub fn line_segment_intermediate() -> Value {
    json!({
        "DataType": 4,
        "IMResults": [{
            "StartPoint": {"X": 0, "Y": 0},
            "EndPoint": {"X": 10, "Y": 0},
            "LinesConfidenceCoefficients": [80, 20]
        }],
        "ResultType": 0x200,
        "BarcodeComplementMode": 0, "BCMIndex": -1,
        "DeformationResistingMode": 0, "DRMIndex": -1,
        "DPMCodeReadingMode": 0, "DPMCRMIndex": -1,
        "TextFilterMode": 0, "TFMIndex": -1,
        "LocalizationMode": 8, "LMIndex": 3,
        "BinarizationMode": 2, "BMIndex": 0,
        "ImagePreprocessingMode": 2, "IPMIndex": 0,
        "RegionPredetectionMode": 2, "RPMIndex": 0,
        "GrayscaleTransformationMode": 2, "GTMIndex": 0,
        "ColourConversionMode": 1, "CICMIndex": 0,
        "ColourClusteringMode": 0, "CCMIndex": -1,
        "RotationMatrix": null,
        "ROIId": 0,
        "ScaleDownRatio": 1,
        "FrameId": -1
    })
}
