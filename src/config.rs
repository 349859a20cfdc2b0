//! Store settings.
//!
//! Layered with the `config` crate: built-in defaults, then an optional TOML file, then
//! environment variables prefixed `STOREFRONT__` (e.g. `STOREFRONT__PIX_KEY`).

use crate::pix::{build_payload, PixError};
use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const DEFAULT_CONFIG_FILE: &str = "storefront.toml";
const ENV_PREFIX: &str = "STOREFRONT";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("pix_discount_percent must be between 0 and 100, got {0}")]
    DiscountOutOfRange(Decimal),

    #[error("pix_key must not be empty")]
    MissingPixKey,

    #[error("pix_key cannot be encoded in a payment code: {0}")]
    InvalidPixKey(PixError),

    #[error("whatsapp_phone must contain digits only, got {0:?}")]
    InvalidPhone(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreSettings {
    /// Identifies this store in logs.
    pub store_id: String,
    pub merchant_name: String,
    pub merchant_city: String,
    /// Raw Pix key; normalized when payloads are built.
    pub pix_key: String,
    /// Merchant number for the order-summary deep link, country code included.
    pub whatsapp_phone: String,
    /// Discount granted to Pix payments, in percent.
    pub pix_discount_percent: Decimal,
    pub cart_path: PathBuf,
}

impl StoreSettings {
    /// Checks the constraints serde cannot express.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.pix_discount_percent < Decimal::ZERO
            || self.pix_discount_percent > Decimal::ONE_HUNDRED
        {
            return Err(SettingsError::DiscountOutOfRange(self.pix_discount_percent));
        }
        if self.pix_key.trim().is_empty() {
            return Err(SettingsError::MissingPixKey);
        }
        // The key must fit a payment code.
        build_payload(
            &self.pix_key,
            Decimal::ONE,
            &self.merchant_name,
            &self.merchant_city,
        )
        .map_err(SettingsError::InvalidPixKey)?;
        let phone = &self.whatsapp_phone;
        if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
            return Err(SettingsError::InvalidPhone(phone.clone()));
        }
        Ok(())
    }
}

fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Config::builder()
        .set_default("store_id", "default")?
        .set_default("merchant_name", "Minha Loja")?
        .set_default("merchant_city", "Sao Paulo")?
        .set_default("pix_key", "")?
        .set_default("whatsapp_phone", "5511999999999")?
        .set_default("pix_discount_percent", 5)?
        .set_default("cart_path", ".storefront/cart.json")
}

/// Loads settings from `storefront.toml` in the working directory (if present) and the
/// environment.
pub fn load_settings() -> Result<StoreSettings, SettingsError> {
    load_settings_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Like [`load_settings`], reading the file at `path` instead. A missing file is fine.
pub fn load_settings_from(path: &Path) -> Result<StoreSettings, SettingsError> {
    let settings: StoreSettings = builder()?
        .add_source(File::from(path).required(false))
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?
        .try_deserialize()?;
    settings.validate()?;
    info!(
        store_id = %settings.store_id,
        merchant = %settings.merchant_name,
        pix_discount = %settings.pix_discount_percent,
        "Settings loaded"
    );
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = write_config(
            r#"
            merchant_name = "Açaí da Praia"
            pix_key = "loja@example.com"
            pix_discount_percent = 7.5
            "#,
        );

        let settings = load_settings_from(file.path()).unwrap();
        assert_eq!(settings.merchant_name, "Açaí da Praia");
        assert_eq!(settings.merchant_city, "Sao Paulo");
        assert_eq!(settings.pix_discount_percent, dec!(7.5));
    }

    #[test]
    fn test_empty_pix_key_is_rejected() {
        let file = write_config(r#"merchant_name = "Loja""#);
        assert!(matches!(
            load_settings_from(file.path()),
            Err(SettingsError::MissingPixKey)
        ));
    }

    #[test]
    fn test_unencodable_pix_key_is_rejected() {
        let long_key = format!("pix_key = \"{}\"", "k".repeat(90));
        let file = write_config(&long_key);
        assert!(matches!(
            load_settings_from(file.path()),
            Err(SettingsError::InvalidPixKey(PixError::FieldTooLong { .. }))
        ));

        let file = write_config(r#"pix_key = "chave-ção""#);
        assert!(matches!(
            load_settings_from(file.path()),
            Err(SettingsError::InvalidPixKey(PixError::NonAscii { .. }))
        ));
    }

    #[test]
    fn test_discount_out_of_range() {
        let file = write_config(
            r#"
            pix_key = "loja@example.com"
            pix_discount_percent = 120
            "#,
        );
        assert!(matches!(
            load_settings_from(file.path()),
            Err(SettingsError::DiscountOutOfRange(_))
        ));
    }

    #[test]
    fn test_phone_must_be_digits() {
        let file = write_config(
            r#"
            pix_key = "loja@example.com"
            whatsapp_phone = "+55 11 9999-9999"
            "#,
        );
        assert!(matches!(
            load_settings_from(file.path()),
            Err(SettingsError::InvalidPhone(_))
        ));
    }
}
