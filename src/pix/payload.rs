//! Payload assembly.

use super::crc::{checksum, CRC_PREFIX};
use super::key::{normalize_key, PixKey};
use super::text::{merchant_city, merchant_name};
use super::tlv::field;
use super::PixError;
use crate::model::round_money;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::debug;

const GUI: &str = "BR.GOV.BCB.PIX";
const MERCHANT_CATEGORY_CODE: &str = "0000";
const CURRENCY_BRL: &str = "986";
const COUNTRY_CODE: &str = "BR";
/// Static codes carry no transaction id.
const TXID_PLACEHOLDER: &str = "***";
const AMOUNT_MAX_LEN: usize = 13;

pub const DEFAULT_MERCHANT_NAME: &str = "LOJA";
pub const DEFAULT_MERCHANT_CITY: &str = "SAO PAULO";

/// `1234.5` → `"1234.50"`: two decimals, a dot, no grouping.
fn format_amount(amount: Decimal) -> Result<String, PixError> {
    let rounded = round_money(amount);
    if rounded <= Decimal::ZERO {
        return Err(PixError::InvalidAmount(amount));
    }
    let text = format!("{rounded:.2}");
    if text.len() > AMOUNT_MAX_LEN {
        return Err(PixError::InvalidAmount(amount));
    }
    Ok(text)
}

fn assemble(key: &str, amount: Decimal, name: &str, city: &str) -> Result<String, PixError> {
    if key.is_empty() {
        return Err(PixError::EmptyKey);
    }
    let account = field("00", GUI)? + &field("01", key)?;
    let additional = field("05", TXID_PLACEHOLDER)?;

    let mut payload = String::with_capacity(160);
    payload += &field("00", "01")?;
    payload += &field("26", &account)?;
    payload += &field("52", MERCHANT_CATEGORY_CODE)?;
    payload += &field("53", CURRENCY_BRL)?;
    payload += &field("54", &format_amount(amount)?)?;
    payload += &field("58", COUNTRY_CODE)?;
    payload += &field("59", name)?;
    payload += &field("60", city)?;
    payload += &field("62", &additional)?;
    payload += CRC_PREFIX;

    let crc = checksum(&payload);
    payload += &crc;
    Ok(payload)
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

/// One-shot payload for a raw key and raw merchant metadata.
pub fn build_payload(
    raw_key: &str,
    amount: Decimal,
    name: &str,
    city: &str,
) -> Result<String, PixError> {
    PixPayloadGenerator::new(raw_key, name, city).payload(amount)
}

/// Payload builder bound to one merchant.
///
/// The key is normalized and the name and city sanitized once, at construction. A blank
/// name or city falls back to [`DEFAULT_MERCHANT_NAME`] / [`DEFAULT_MERCHANT_CITY`].
/// Payloads are cached per amount.
pub struct PixPayloadGenerator {
    key: PixKey,
    merchant_name: String,
    merchant_city: String,
    cache: Mutex<HashMap<Decimal, String>>,
}

impl PixPayloadGenerator {
    pub fn new(raw_key: &str, name: &str, city: &str) -> Self {
        Self {
            key: normalize_key(raw_key),
            merchant_name: or_default(merchant_name(name), DEFAULT_MERCHANT_NAME),
            merchant_city: or_default(merchant_city(city), DEFAULT_MERCHANT_CITY),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn key(&self) -> &PixKey {
        &self.key
    }

    pub fn merchant_name(&self) -> &str {
        &self.merchant_name
    }

    pub fn merchant_city(&self) -> &str {
        &self.merchant_city
    }

    /// The payload for `amount`.
    ///
    /// # Errors
    /// [`PixError::InvalidAmount`] unless `amount` rounds to a positive value,
    /// [`PixError::EmptyKey`], or a TLV error when the key does not fit a field.
    pub fn payload(&self, amount: Decimal) -> Result<String, PixError> {
        let amount = round_money(amount);
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(hit) = cache.get(&amount) {
            return Ok(hit.clone());
        }
        let payload = assemble(
            &self.key.value,
            amount,
            &self.merchant_name,
            &self.merchant_city,
        )?;
        debug!(kind = ?self.key.kind, %amount, "Pix payload generated");
        cache.insert(amount, payload.clone());
        Ok(payload)
    }
}
