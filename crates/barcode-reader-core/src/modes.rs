//! Engine enumerations: algorithm modes, pixel formats and result kinds.
//!
//! Mode enums fill the fixed-length priority lists of
//! [`PublicRuntimeSettings`](crate::PublicRuntimeSettings). Each one has a
//! `Skip` value that ends evaluation of its list.

use serde::{Deserialize, Serialize};

/// Number of slots in every mode priority list.
pub const MODE_LIST_LEN: usize = 8;

/// A mode enum that can appear in a [`ModeList`].
pub trait PriorityMode: Copy + PartialEq {
    /// The value that terminates evaluation of a priority list.
    const SKIP: Self;
}

/// Fixed-length ordered list of modes; earlier entries have higher priority.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "M: Serialize",
    deserialize = "M: Deserialize<'de>"
))]
pub struct ModeList<M>(pub [M; MODE_LIST_LEN]);

impl<M: PriorityMode> ModeList<M> {
    /// Build a list from the highest-priority modes, padding with `SKIP`.
    ///
    /// Entries beyond the list capacity are ignored.
    pub fn from_priority(modes: &[M]) -> Self {
        let mut slots = [M::SKIP; MODE_LIST_LEN];
        for (slot, mode) in slots.iter_mut().zip(modes) {
            *slot = *mode;
        }
        Self(slots)
    }

    /// Modes the engine will actually try, in order (everything before the
    /// first `SKIP`).
    pub fn effective(&self) -> &[M] {
        let end = self
            .0
            .iter()
            .position(|m| *m == M::SKIP)
            .unwrap_or(MODE_LIST_LEN);
        &self.0[..end]
    }

    pub fn get(&self, index: usize) -> Option<M> {
        self.0.get(index).copied()
    }

    /// Replace the mode at `index`; returns `false` when out of range.
    pub fn set(&mut self, index: usize, mode: M) -> bool {
        match self.0.get_mut(index) {
            Some(slot) => {
                *slot = mode;
                true
            }
            None => false,
        }
    }
}

impl<M: PriorityMode> Default for ModeList<M> {
    fn default() -> Self {
        Self([M::SKIP; MODE_LIST_LEN])
    }
}

macro_rules! priority_mode {
    ($($name:ident),+ $(,)?) => {
        $(
            impl PriorityMode for $name {
                const SKIP: Self = Self::Skip;
            }
        )+
    };
}

native_enum! {
    /// Pixel layout of a raw image buffer.
    pub enum ImagePixelFormat {
        Binary = 0,
        BinaryInverted = 1,
        Grayscaled = 2,
        Nv21 = 3,
        Rgb565 = 4,
        Rgb555 = 5,
        Rgb888 = 6,
        Argb8888 = 7,
        Rgb161616 = 8,
        Argb16161616 = 9,
    }
}

native_enum! {
    pub enum BinarizationMode {
        Skip = 0x00,
        Auto = 0x01,
        LocalBlock = 0x02,
    }
}

native_enum! {
    pub enum LocalizationMode {
        Skip = 0x00,
        Auto = 0x01,
        ConnectedBlocks = 0x02,
        Statistics = 0x04,
        Lines = 0x08,
        ScanDirectly = 0x10,
        StatisticsMarks = 0x20,
        StatisticsPostalCode = 0x40,
    }
}

native_enum! {
    pub enum ColourClusteringMode {
        Skip = 0x00,
        Auto = 0x01,
        GeneralHsv = 0x02,
    }
}

native_enum! {
    pub enum ColourConversionMode {
        Skip = 0x00,
        General = 0x01,
    }
}

native_enum! {
    pub enum GrayscaleTransformationMode {
        Skip = 0x00,
        Inverted = 0x01,
        Original = 0x02,
    }
}

native_enum! {
    pub enum RegionPredetectionMode {
        Skip = 0x00,
        Auto = 0x01,
        General = 0x02,
        GeneralRgbContrast = 0x04,
        GeneralGrayContrast = 0x08,
        GeneralHsvContrast = 0x10,
    }
}

native_enum! {
    pub enum ImagePreprocessingMode {
        Skip = 0x00,
        Auto = 0x01,
        General = 0x02,
        GrayEqualize = 0x04,
        GraySmooth = 0x08,
        SharpenSmooth = 0x10,
    }
}

native_enum! {
    pub enum TextureDetectionMode {
        Skip = 0x00,
        Auto = 0x01,
        GeneralWidthConcentration = 0x02,
    }
}

native_enum! {
    pub enum TextFilterMode {
        Skip = 0x00,
        Auto = 0x01,
        GeneralContour = 0x02,
    }
}

native_enum! {
    /// Direct part marking (DPM) code reading.
    pub enum DpmCodeReadingMode {
        Skip = 0x00,
        Auto = 0x01,
        General = 0x02,
    }
}

native_enum! {
    pub enum DeformationResistingMode {
        Skip = 0x00,
        Auto = 0x01,
        General = 0x02,
    }
}

native_enum! {
    /// Completion of partially damaged symbols.
    pub enum BarcodeComplementMode {
        Skip = 0x00,
        Auto = 0x01,
        General = 0x02,
    }
}

native_enum! {
    pub enum BarcodeColourMode {
        Skip = 0x00,
        DarkOnLight = 0x01,
        LightOnDark = 0x02,
        DarkOnDark = 0x04,
        LightOnLight = 0x08,
        DarkLightMixed = 0x10,
        DarkOnLightDarkSurrounding = 0x20,
    }
}

native_enum! {
    pub enum TextResultOrderMode {
        Skip = 0x00,
        Confidence = 0x01,
        Position = 0x02,
        Format = 0x04,
    }
}

native_enum! {
    /// Sampling used when scaling up linear codes with small modules.
    pub enum ScaleUpMode {
        Skip = 0x00,
        Auto = 0x01,
        LinearInterpolation = 0x02,
        NearestNeighbourInterpolation = 0x04,
    }
}

native_enum! {
    pub enum AccompanyingTextRecognitionMode {
        Skip = 0x00,
        General = 0x01,
    }
}

native_enum! {
    pub enum TextAssistedCorrectionMode {
        Skip = 0x00,
        Auto = 0x01,
        Verifying = 0x02,
        VerifyingPatching = 0x04,
    }
}

priority_mode!(
    BinarizationMode,
    LocalizationMode,
    ColourClusteringMode,
    ColourConversionMode,
    GrayscaleTransformationMode,
    RegionPredetectionMode,
    ImagePreprocessingMode,
    TextureDetectionMode,
    TextFilterMode,
    DpmCodeReadingMode,
    DeformationResistingMode,
    BarcodeComplementMode,
    BarcodeColourMode,
    TextResultOrderMode,
    ScaleUpMode,
    AccompanyingTextRecognitionMode,
);

native_enum! {
    /// Pipeline phase after which the engine stops.
    pub enum TerminatePhase {
        RegionPredetected = 0x01,
        ImagePreprocessed = 0x02,
        ImageBinarized = 0x04,
        BarcodeLocalized = 0x08,
        BarcodeTypeDetermined = 0x10,
        BarcodeRecognized = 0x20,
    }
}

native_enum! {
    pub enum IntermediateResultSavingMode {
        Memory = 0x01,
        Filesystem = 0x02,
        Both = 0x04,
    }
}

native_enum! {
    /// Unit of reported coordinates.
    pub enum ResultCoordinateType {
        Pixel = 0x01,
        Percentage = 0x02,
    }
}

native_enum! {
    /// Kind of an extended (candidate) result.
    pub enum ResultType {
        StandardText = 0,
        RawText = 1,
        CandidateText = 2,
        PartialText = 3,
    }
}

native_enum! {
    /// Element type of an intermediate result list.
    pub enum IntermediateResultDataType {
        Image = 0x01,
        Contour = 0x02,
        LineSegment = 0x04,
        LocalizationResult = 0x08,
        RegionOfInterest = 0x10,
    }
}

native_enum! {
    /// Policy for template names that already exist when loading templates.
    pub enum ConflictMode {
        /// Keep the existing template and ignore the incoming one.
        Ignore = 1,
        /// Replace existing settings with the incoming ones.
        Overwrite = 2,
    }
}

impl Default for ConflictMode {
    fn default() -> Self {
        Self::Overwrite
    }
}
