#![allow(
    clippy::items_after_test_module,
    mixed_script_confusables,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;
mod error;

pub use builder::QRBuilder;
pub use common::mask::MaskPattern;
pub use common::metadata::{ECLevel, Version};
pub use error::{QRError, QRResult};
pub(crate) use common::*;

#[cfg(test)]
pub(crate) use builder::Module;

use builder::QR;

/// A finished QR code symbol: the module grid plus the metadata needed to
/// render or decode it.
#[derive(Debug, Clone)]
pub struct QRSymbol {
    pub width: usize,
    pub version: Version,
    pub ec_level: ECLevel,
    pub mask: MaskPattern,
    /// Row-major module grid, one byte per module: `0x00` for a dark module,
    /// `0xFF` for a light one. Does not include quiet zone padding.
    pub modules: Vec<u8>,
}

impl From<QR> for QRSymbol {
    fn from(qr: QR) -> Self {
        let width = qr.width();
        let modules = (0..width as i32)
            .flat_map(|r| (0..width as i32).map(move |c| (r, c)))
            .map(|(r, c)| if *qr.get(r, c) == common::metadata::Color::Dark { 0x00 } else { 0xFF })
            .collect();

        Self {
            width,
            version: qr.version(),
            ec_level: qr.ec_level(),
            mask: qr.mask().expect("QR should have a mask applied"),
            modules,
        }
    }
}

/// Encodes `data` into a QR symbol, choosing the smallest version whose L-level
/// capacity fits the data, then raising the error correction level as high as
/// that version still allows, and picking the best mask pattern. Returns
/// `None` if `data` doesn't fit any version at the lowest error correction
/// level.
pub fn encode(data: &[u8]) -> Option<QRSymbol> {
    encode_result(data).ok()
}

/// Encodes `data` into a QR symbol at a fixed version and error correction
/// level. Returns `None` if the data does not fit.
pub fn encode_fixed(data: &[u8], version: Version, ec_level: ECLevel) -> Option<QRSymbol> {
    encode_fixed_result(data, version, ec_level).ok()
}

fn encode_result(data: &[u8]) -> QRResult<QRSymbol> {
    let (_, ver) = common::codec::encode(data, ECLevel::L)?;

    let mut best_ecl = ECLevel::L;
    for ecl in [ECLevel::M, ECLevel::Q, ECLevel::H] {
        if common::codec::encode_with_version(data, ver, ecl).is_ok() {
            best_ecl = ecl;
        } else {
            break;
        }
    }

    let qr = QRBuilder::new(data).version(ver).ec_level(best_ecl).build()?;
    Ok(qr.into())
}

fn encode_fixed_result(data: &[u8], version: Version, ec_level: ECLevel) -> QRResult<QRSymbol> {
    let qr = QRBuilder::new(data).version(version).ec_level(ec_level).build()?;
    Ok(qr.into())
}
