//! Status codes returned by the recognition engine.

native_enum! {
    /// Every status code the engine can return.
    pub enum ErrorCode {
        Ok = 0,
        Unknown = -10000,
        NoMemory = -10001,
        NullPointer = -10002,
        LicenseInvalid = -10003,
        LicenseExpired = -10004,
        FileNotFound = -10005,
        FiletypeNotSupported = -10006,
        BppNotSupported = -10007,
        IndexInvalid = -10008,
        BarcodeFormatInvalid = -10009,
        CustomRegionInvalid = -10010,
        MaxBarcodeNumberInvalid = -10011,
        ImageReadFailed = -10012,
        TiffReadFailed = -10013,
        QrLicenseInvalid = -10016,
        OneDLicenseInvalid = -10017,
        DibBufferInvalid = -10018,
        Pdf417LicenseInvalid = -10019,
        DatamatrixLicenseInvalid = -10020,
        PdfReadFailed = -10021,
        PdfDllMissing = -10022,
        PageNumberInvalid = -10023,
        CustomSizeInvalid = -10024,
        CustomModuleSizeInvalid = -10025,
        RecognitionTimeout = -10026,
        JsonParseFailed = -10030,
        JsonTypeInvalid = -10031,
        JsonKeyInvalid = -10032,
        JsonValueInvalid = -10033,
        JsonNameKeyMissing = -10034,
        JsonNameValueDuplicated = -10035,
        TemplateNameInvalid = -10036,
        JsonNameReferenceInvalid = -10037,
        ParameterValueInvalid = -10038,
        DomainNotMatched = -10039,
        ReservedInfoNotMatched = -10040,
        AztecLicenseInvalid = -10041,
        LicenseDllMissing = -10042,
        LicenseKeyNotMatched = -10043,
        RequestedFailed = -10044,
        LicenseInitFailed = -10045,
        PatchcodeLicenseInvalid = -10046,
        PostalcodeLicenseInvalid = -10047,
        DpmLicenseInvalid = -10048,
        FrameDecodingThreadExists = -10049,
        StopDecodingThreadFailed = -10050,
        SetModeArgumentError = -10051,
        LicenseContentInvalid = -10052,
        LicenseKeyInvalid = -10053,
        LicenseDeviceRunsOut = -10054,
        GetModeArgumentError = -10055,
        IrtLicenseInvalid = -10056,
        MaxicodeLicenseInvalid = -10057,
        Gs1DatabarLicenseInvalid = -10058,
        Gs1CompositeLicenseInvalid = -10059,
    }
}

/// Coarse grouping of [`ErrorCode`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The call succeeded.
    Success,
    /// Invalid, expired or missing license; device quota exhausted.
    License,
    /// Unreadable or unsupported input.
    Input,
    /// Template / JSON settings problems.
    Template,
    /// Invalid region, size, page or mode argument.
    Parameter,
    /// Timeouts, decode-thread lifecycle, memory and unknown failures.
    Runtime,
}

impl ErrorCode {
    /// Codes after which a decode call still yields usable results.
    ///
    /// Decoding proceeds to fetch results for a clean success, a timeout and
    /// the per-symbology license warnings listed here. Every other non-zero
    /// code is fatal.
    pub const DECODE_TOLERATED: [ErrorCode; 14] = [
        ErrorCode::Ok,
        ErrorCode::LicenseExpired,
        ErrorCode::LicenseInvalid,
        ErrorCode::RecognitionTimeout,
        ErrorCode::OneDLicenseInvalid,
        ErrorCode::QrLicenseInvalid,
        ErrorCode::Pdf417LicenseInvalid,
        ErrorCode::AztecLicenseInvalid,
        ErrorCode::DatamatrixLicenseInvalid,
        ErrorCode::Gs1DatabarLicenseInvalid,
        ErrorCode::Gs1CompositeLicenseInvalid,
        ErrorCode::MaxicodeLicenseInvalid,
        ErrorCode::PatchcodeLicenseInvalid,
        ErrorCode::PostalcodeLicenseInvalid,
    ];

    #[inline]
    pub fn is_ok(self) -> bool {
        self == ErrorCode::Ok
    }

    /// True if a decode call returning this code should still fetch results.
    pub fn is_decode_tolerated(self) -> bool {
        Self::DECODE_TOLERATED.contains(&self)
    }

    pub fn category(self) -> ErrorCategory {
        use ErrorCode::*;
        match self {
            Ok => ErrorCategory::Success,
            LicenseInvalid
            | LicenseExpired
            | QrLicenseInvalid
            | OneDLicenseInvalid
            | Pdf417LicenseInvalid
            | DatamatrixLicenseInvalid
            | DomainNotMatched
            | ReservedInfoNotMatched
            | AztecLicenseInvalid
            | LicenseDllMissing
            | LicenseKeyNotMatched
            | RequestedFailed
            | LicenseInitFailed
            | PatchcodeLicenseInvalid
            | PostalcodeLicenseInvalid
            | DpmLicenseInvalid
            | LicenseContentInvalid
            | LicenseKeyInvalid
            | LicenseDeviceRunsOut
            | IrtLicenseInvalid
            | MaxicodeLicenseInvalid
            | Gs1DatabarLicenseInvalid
            | Gs1CompositeLicenseInvalid => ErrorCategory::License,
            FileNotFound | FiletypeNotSupported | BppNotSupported | ImageReadFailed
            | TiffReadFailed | DibBufferInvalid | PdfReadFailed | PdfDllMissing => {
                ErrorCategory::Input
            }
            JsonParseFailed
            | JsonTypeInvalid
            | JsonKeyInvalid
            | JsonValueInvalid
            | JsonNameKeyMissing
            | JsonNameValueDuplicated
            | TemplateNameInvalid
            | JsonNameReferenceInvalid => ErrorCategory::Template,
            IndexInvalid
            | BarcodeFormatInvalid
            | CustomRegionInvalid
            | MaxBarcodeNumberInvalid
            | PageNumberInvalid
            | CustomSizeInvalid
            | CustomModuleSizeInvalid
            | ParameterValueInvalid
            | SetModeArgumentError
            | GetModeArgumentError => ErrorCategory::Parameter,
            Unknown
            | NoMemory
            | NullPointer
            | RecognitionTimeout
            | FrameDecodingThreadExists
            | StopDecodingThreadFailed
            | Other(_) => ErrorCategory::Runtime,
        }
    }

    /// The engine's documented message for this code.
    ///
    /// Engines report their own strings; this table is what the facade falls
    /// back to when an engine returns an empty message.
    pub fn description(self) -> &'static str {
        use ErrorCode::*;
        match self {
            Ok => "Successful.",
            Unknown => "Unknown error.",
            NoMemory => "Not enough memory to perform the operation.",
            NullPointer => "Null pointer.",
            LicenseInvalid => "The license is invalid.",
            LicenseExpired => "The license has expired.",
            FileNotFound => "The file is not found.",
            FiletypeNotSupported => "The file type is not supported.",
            BppNotSupported => "The BPP (Bits Per Pixel) is not supported.",
            IndexInvalid => "The index is invalid.",
            BarcodeFormatInvalid => "The barcode format is invalid.",
            CustomRegionInvalid => "The input region value parameter is invalid.",
            MaxBarcodeNumberInvalid => "The maximum barcode number is invalid.",
            ImageReadFailed => "Failed to read the image.",
            TiffReadFailed => "Failed to read the TIFF image.",
            QrLicenseInvalid => "The QR Code license is invalid.",
            OneDLicenseInvalid => "The 1D Barcode license is invalid.",
            DibBufferInvalid => "The DIB (Device-Independent Bitmaps) buffer is invalid.",
            Pdf417LicenseInvalid => "The PDF417 license is invalid.",
            DatamatrixLicenseInvalid => "The DATAMATRIX license is invalid.",
            PdfReadFailed => "Failed to read the PDF file.",
            PdfDllMissing => "The PDF DLL is missing.",
            PageNumberInvalid => "The page number is invalid.",
            CustomSizeInvalid => "The custom size is invalid.",
            CustomModuleSizeInvalid => "The custom module size is invalid.",
            RecognitionTimeout => "Recognition timeout.",
            JsonParseFailed => "Failed to parse JSON string.",
            JsonTypeInvalid => "The value type is invalid.",
            JsonKeyInvalid => "The key is unrecognized.",
            JsonValueInvalid => "The value is invalid or out of range.",
            JsonNameKeyMissing => "The mandatory key \"Name\" is missing.",
            JsonNameValueDuplicated => "The value of the key \"Name\" is duplicated.",
            TemplateNameInvalid => "The template name is invalid.",
            JsonNameReferenceInvalid => "The name reference is invalid.",
            ParameterValueInvalid => "The parameter value is invalid or out of range.",
            DomainNotMatched => "The domain of your current site does not match the domain bound in the current product key.",
            ReservedInfoNotMatched => "The reserved info does not match the reserved info bound in the current product key.",
            AztecLicenseInvalid => "The AZTEC license is invalid.",
            LicenseDllMissing => "The License DLL is missing.",
            LicenseKeyNotMatched => "The license key does not match the license content.",
            RequestedFailed => "Failed to request the license content.",
            LicenseInitFailed => "Failed to init the license.",
            PatchcodeLicenseInvalid => "The Patchcode license is invalid.",
            PostalcodeLicenseInvalid => "The Postal code license is invalid.",
            DpmLicenseInvalid => "The DPM license is invalid.",
            FrameDecodingThreadExists => "The frame decoding thread already exists.",
            StopDecodingThreadFailed => "Failed to stop the frame decoding thread.",
            SetModeArgumentError => "Failed to set mode's argument.",
            LicenseContentInvalid => "The license content is invalid.",
            LicenseKeyInvalid => "The license key is invalid.",
            LicenseDeviceRunsOut => "The device number in the license key runs out.",
            GetModeArgumentError => "Failed to get mode's argument.",
            IrtLicenseInvalid => "The Intermediate Result Types license is invalid.",
            MaxicodeLicenseInvalid => "The Maxicode license is invalid.",
            Gs1DatabarLicenseInvalid => "The GS1 Databar license is invalid.",
            Gs1CompositeLicenseInvalid => "The GS1 Composite code license is invalid.",
            Other(_) => "Unknown error.",
        }
    }
}
