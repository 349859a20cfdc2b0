//! # Pix static payment codes
//!
//! Builds the copy-and-paste / QR payload ("BR Code") for a Pix transfer to the store:
//! nested TLV fields ([`tlv`]), a normalized merchant key ([`key`]), merchant metadata
//! reduced to the allowed alphabet ([`text`]) and a trailing CRC16 ([`crc`]).
//!
//! Everything here is pure string work with no I/O. The same inputs always produce the
//! same payload, which is why [`PixPayloadGenerator`] can memoize by amount.
//!
//! ```rust
//! use rust_decimal_macros::dec;
//! use storefront_checkout::pix::{verify_checksum, PixPayloadGenerator};
//!
//! let generator = PixPayloadGenerator::new("loja@example.com", "Minha Loja", "São Paulo");
//! let payload = generator.payload(dec!(95)).unwrap();
//! assert!(payload.starts_with("000201"));
//! assert!(verify_checksum(&payload));
//! ```

pub mod crc;
pub mod key;
pub mod payload;
pub mod text;
pub mod tlv;

pub use crc::{crc16, verify_checksum};
pub use key::{normalize_key, PixKey, PixKeyKind};
pub use payload::{build_payload, PixPayloadGenerator};

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures while encoding a payload.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PixError {
    /// TLV lengths are two decimal digits, so a value may hold at most 99 bytes.
    #[error("Field {tag} is {len} bytes long (max {max})", max = tlv::MAX_VALUE_LEN)]
    FieldTooLong { tag: String, len: usize },

    /// The checksum runs over bytes, so every value must be plain ASCII.
    #[error("Field {tag} contains non-ASCII characters")]
    NonAscii { tag: String },

    /// Amounts must be positive and fit the 13-character amount field.
    #[error("Invalid amount: {0}")]
    InvalidAmount(Decimal),

    #[error("Pix key is empty")]
    EmptyKey,
}
