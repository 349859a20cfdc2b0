//! Merchant key classification.
//!
//! A Pix key is an e-mail, a phone number, a company (CNPJ) or personal (CPF) tax ID, or
//! a random token issued by the bank. Merchants paste it in whatever shape they have;
//! [`normalize_key`] turns it into the form banks expect on the wire.

use serde::{Deserialize, Serialize};

const PUNCTUATION: [char; 5] = ['.', '-', '/', '(', ')'];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixKeyKind {
    Email,
    Phone,
    Cnpj,
    Cpf,
    Random,
    /// Nothing matched; punctuation was stripped and the rest kept.
    Other,
}

/// A normalized key and what it was recognised as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixKey {
    pub kind: PixKeyKind,
    pub value: String,
}

/// Classifies and normalizes a raw key. Never fails; the result contains no whitespace.
///
/// | input shape | result |
/// |---|---|
/// | contains `@` | lower-cased e-mail |
/// | leading `+` with digits | phone, `+` and digits kept |
/// | 10 or 11 digits | phone, prefixed with `+55` |
/// | 14 digits | CNPJ, digits only |
/// | 11 digits written as `000.000.000-00` | CPF, digits only |
/// | longer than 20 characters | random token, unchanged |
/// | anything else | punctuation `. - / ( )` stripped |
///
/// A bare 11-digit string is read as a mobile number. Both shapes are 11 digits long, so
/// a CPF is recognised only by its dotted formatting.
pub fn normalize_key(raw: &str) -> PixKey {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let stripped: String = compact.chars().filter(|c| !PUNCTUATION.contains(c)).collect();
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    if compact.contains('@') {
        return key(PixKeyKind::Email, compact.to_lowercase());
    }
    if let Some(rest) = stripped.strip_prefix('+') {
        if all_digits(rest) {
            return key(PixKeyKind::Phone, stripped);
        }
    }
    if all_digits(&stripped) {
        match stripped.len() {
            11 if compact.contains('.') => return key(PixKeyKind::Cpf, stripped),
            10 | 11 => return key(PixKeyKind::Phone, format!("+55{stripped}")),
            14 => return key(PixKeyKind::Cnpj, stripped),
            _ => {}
        }
    }
    if compact.chars().count() > 20 {
        return key(PixKeyKind::Random, compact);
    }
    key(PixKeyKind::Other, stripped)
}

fn key(kind: PixKeyKind, value: String) -> PixKey {
    PixKey { kind, value }
}
