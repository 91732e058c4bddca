//! Barcode format bitmasks.
//!
//! The engine splits symbologies over two independent 32-bit groups. A
//! decoded result reports one bit (or a family mask) per group; settings use
//! the same masks to select what the engine should look for.

native_flags! {
    /// Barcode formats in group 1.
    pub struct BarcodeFormat {
        const NULL = 0x00;
        /// Every format in group 1.
        const ALL = -32_505_857;
        /// Union of all linear (1D) formats.
        const ONED = 0x0000_07FF;
        /// Union of all GS1 DataBar formats.
        const GS1_DATABAR = 0x0003_F800;
        const CODE_39 = 0x1;
        const CODE_128 = 0x2;
        const CODE_93 = 0x4;
        const CODABAR = 0x8;
        const ITF = 0x10;
        const EAN_13 = 0x20;
        const EAN_8 = 0x40;
        const UPC_A = 0x80;
        const UPC_E = 0x100;
        const INDUSTRIAL_25 = 0x200;
        const CODE_39_EXTENDED = 0x400;
        const GS1_DATABAR_OMNIDIRECTIONAL = 0x800;
        const GS1_DATABAR_TRUNCATED = 0x1000;
        const GS1_DATABAR_STACKED = 0x2000;
        const GS1_DATABAR_STACKED_OMNIDIRECTIONAL = 0x4000;
        const GS1_DATABAR_EXPANDED = 0x8000;
        const GS1_DATABAR_EXPANDED_STACKED = 0x1_0000;
        const GS1_DATABAR_LIMITED = 0x2_0000;
        const PATCHCODE = 0x0004_0000;
        const MICRO_PDF417 = 0x0008_0000;
        const PDF417 = 0x0200_0000;
        const QR_CODE = 0x0400_0000;
        const DATAMATRIX = 0x0800_0000;
        const AZTEC = 0x1000_0000;
        const MAXICODE = 0x2000_0000;
        const MICRO_QR = 0x4000_0000;
        const GS1_COMPOSITE = i32::MIN;
    }
}

native_flags! {
    /// Barcode formats in group 2 (postal and non-standard codes).
    pub struct BarcodeFormat2 {
        const NULL = 0x00;
        const NONSTANDARD_BARCODE = 0x01;
        /// Union of all postal formats.
        const POSTALCODE = 0x01F0_0000;
        const USPSINTELLIGENTMAIL = 0x0010_0000;
        const POSTNET = 0x0020_0000;
        const PLANET = 0x0040_0000;
        const AUSTRALIANPOST = 0x0080_0000;
        const RM4SCC = 0x0100_0000;
    }
}

native_flags! {
    /// Pipeline stages whose intermediate artifacts the engine should keep.
    pub struct IntermediateResultTypes {
        const NO_RESULT = 0x00;
        const ORIGINAL_IMAGE = 0x01;
        const COLOUR_CLUSTERED_IMAGE = 0x02;
        const COLOUR_CONVERTED_GRAYSCALE_IMAGE = 0x04;
        const TRANSFORMED_GRAYSCALE_IMAGE = 0x08;
        const PREDETECTED_REGION = 0x10;
        const PREPROCESSED_IMAGE = 0x20;
        const BINARIZED_IMAGE = 0x40;
        const TEXT_ZONE = 0x80;
        const CONTOUR = 0x100;
        const LINE_SEGMENT = 0x200;
        const FORM = 0x400;
        const SEGMENTATION_BLOCK = 0x800;
        const TYPED_BARCODE_ZONE = 0x1000;
    }
}

impl BarcodeFormat {
    /// True if any linear (1D) bit is set.
    #[inline]
    pub const fn is_oned(self) -> bool {
        self.intersects(Self::ONED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oned_mask_covers_linear_formats_only() {
        assert!(BarcodeFormat::CODE_128.is_oned());
        assert!(BarcodeFormat::CODE_39_EXTENDED.is_oned());
        assert!(!BarcodeFormat::QR_CODE.is_oned());
        assert!(!BarcodeFormat::GS1_DATABAR_LIMITED.is_oned());
    }

    #[test]
    fn all_mask_includes_common_formats() {
        for f in [
            BarcodeFormat::CODE_39,
            BarcodeFormat::QR_CODE,
            BarcodeFormat::PDF417,
            BarcodeFormat::DATAMATRIX,
            BarcodeFormat::AZTEC,
        ] {
            assert!(BarcodeFormat::ALL.contains(f), "{f:?} missing from ALL");
        }
    }

    #[test]
    fn bitor_combines_groups() {
        let mask = BarcodeFormat::QR_CODE | BarcodeFormat::EAN_13;
        assert!(mask.contains(BarcodeFormat::QR_CODE));
        assert!(mask.is_oned());
        assert_eq!(mask.bits(), 0x0400_0020);
    }

    #[test]
    fn gs1_composite_is_sign_bit() {
        assert_eq!(BarcodeFormat::GS1_COMPOSITE.bits() as u32, 0x8000_0000);
        assert!(BarcodeFormat2::POSTALCODE.contains(BarcodeFormat2::RM4SCC));
    }
}
