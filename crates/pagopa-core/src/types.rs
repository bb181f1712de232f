//! # Payment Primitive Newtypes
//!
//! Domain-primitive newtypes for the values exchanged with the pagoPA node.
//! Each primitive is a distinct type: you cannot pass an [`Iuv`] where an
//! [`Iban`] is expected.
//!
//! ## Validation
//!
//! Every string primitive validates at construction time and on
//! deserialization. Anchoring follows the upstream validators exactly:
//!
//! | Type | Pattern | Anchored |
//! |------|---------|----------|
//! | [`Iban`] | `[a-zA-Z]{2}[0-9]{2}[a-zA-Z0-9]{1,30}` | no |
//! | [`FiscalCode`] | 16-char surname/name/birth/checksum layout | yes |
//! | [`Iuv`] | `[0-9]{15}\|[0-9]{17}` | no |
//! | [`StationCode`] | `[0-9]{2}` | no |
//! | [`CodiceContestoPagamento`] | `[a-zA-Z0-9]{1,35}` | yes |
//!
//! An unanchored pattern accepts any value that *contains* a match. Do not
//! tighten these: the node applies the same test and a stricter proxy would
//! reject notices the node accepts.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Implement `Deserialize` for a string newtype by routing through its
/// `new()` constructor, so invalid values are rejected at decode time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Implement `Display` and `as_str()` for a string newtype.
macro_rules! impl_string_access {
    ($ty:ident) => {
        impl $ty {
            /// Access the validated string value.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern is a valid regex literal")
}

static IBAN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| compile("[a-zA-Z]{2}[0-9]{2}[a-zA-Z0-9]{1,30}"));

static FISCAL_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    compile(
        "^[A-Z]{6}[0-9LMNPQRSTUV]{2}[ABCDEHLMPRST][0-9LMNPQRSTUV]{2}[A-Z][0-9LMNPQRSTUV]{3}[A-Z]$",
    )
});

static IUV_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile("[0-9]{15}|[0-9]{17}"));

static STATION_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile("[0-9]{2}"));

static SESSION_TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| compile("^[a-zA-Z0-9]{1,35}$"));

// ---------------------------------------------------------------------------
// Pattern-validated strings
// ---------------------------------------------------------------------------

/// International Bank Account Number of the beneficiary's credit account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iban(String);

impl_validating_deserialize!(Iban);
impl_string_access!(Iban);

impl Iban {
    /// Create an IBAN, validating the country/check/BBAN layout.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIban`] if no part of the value
    /// matches the IBAN pattern.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !IBAN_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidIban(s));
        }
        Ok(Self(s))
    }
}

/// Italian fiscal code (codice fiscale) of a natural person.
///
/// Exactly 16 characters: surname (3), name (3), birth year (2), birth
/// month letter, birth day (2), municipality (letter + 3), check letter.
/// Digits in numeric positions may be replaced by the omocodia letters
/// `LMNPQRSTUV`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FiscalCode(String);

impl_validating_deserialize!(FiscalCode);
impl_string_access!(FiscalCode);

impl FiscalCode {
    /// Create a fiscal code, validating the full 16-character layout.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFiscalCode`] unless the whole value
    /// matches. Lowercase input is rejected, not normalized.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !FISCAL_CODE_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidFiscalCode(s));
        }
        Ok(Self(s))
    }
}

/// Identificativo Univoco di Versamento, the payment notice number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Iuv(String);

impl_validating_deserialize!(Iuv);
impl_string_access!(Iuv);

impl Iuv {
    /// Create an IUV.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidIuv`] if the value contains no run
    /// of 15 (or 17) decimal digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !IUV_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidIuv(s));
        }
        Ok(Self(s))
    }
}

/// Two-digit code of the creditor's station (CodStazPA).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StationCode(String);

impl_validating_deserialize!(StationCode);
impl_string_access!(StationCode);

impl StationCode {
    /// Create a station code.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStationCode`] if the value contains
    /// no pair of digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !STATION_CODE_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidStationCode(s));
        }
        Ok(Self(s))
    }
}

/// Session context token (codiceContestoPagamento).
///
/// Minted once per check/activation flow by
/// [`generate_codice_contesto_pagamento`](crate::token::generate_codice_contesto_pagamento)
/// and echoed by every later call of the flow so the node can correlate
/// them. The node caps it at 35 characters (`Max35Text`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CodiceContestoPagamento(String);

impl_validating_deserialize!(CodiceContestoPagamento);
impl_string_access!(CodiceContestoPagamento);

impl CodiceContestoPagamento {
    /// Create a session token from its textual form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSessionToken`] unless the value is
    /// 1–35 ASCII alphanumeric characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !SESSION_TOKEN_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidSessionToken(s));
        }
        Ok(Self(s))
    }
}

/// Payment instance identifier (idPagamento) assigned by the node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IdPagamento(String);

impl_validating_deserialize!(IdPagamento);
impl_string_access!(IdPagamento);

impl IdPagamento {
    /// Maximum length accepted by the node.
    pub const MAX_LEN: usize = 35;

    /// Create a payment instance identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPaymentId`] if the value is blank or
    /// longer than [`Self::MAX_LEN`] characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() || s.chars().count() > Self::MAX_LEN {
            return Err(ValidationError::InvalidPaymentId(s));
        }
        Ok(Self(s))
    }
}

// ---------------------------------------------------------------------------
// AuxDigit
// ---------------------------------------------------------------------------

/// Auxiliary digit of the notice code; selects the creditor's routing mode.
///
/// Serialized as the bare digit string (`"0"`..`"3"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuxDigit {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl AuxDigit {
    /// Returns the digit string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Zero => "0",
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
        }
    }
}

impl fmt::Display for AuxDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuxDigit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(Self::Zero),
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            other => Err(ValidationError::InvalidAuxDigit(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Importo
// ---------------------------------------------------------------------------

/// Monetary amount in euro, within the node's inclusive range.
///
/// Serialized as a JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Importo(Decimal);

impl Importo {
    /// Smallest accepted amount: 0.11.
    pub const MIN: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

    /// Largest accepted amount: 999999.99.
    pub const MAX: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 2);

    /// Create an amount, validating the inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AmountOutOfRange`] if the value is below
    /// [`Self::MIN`] or above [`Self::MAX`].
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Self::MIN || value > Self::MAX {
            return Err(ValidationError::AmountOutOfRange(value.to_string()));
        }
        Ok(Self(value))
    }

    /// Access the decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl<'de> Deserialize<'de> for Importo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Importo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// CodiceIdRpt
// ---------------------------------------------------------------------------

/// Payment identifier (CodiceIdRPT): the composite key of a notice.
///
/// `CF`, `AuxDigit` and `CodIUV` are mandatory. `CodStazPA` is optional
/// here; whether a given AuxDigit requires it is decided by the node, which
/// treats its absence as a different routing mode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CodiceIdRpt {
    #[serde(rename = "CF")]
    cf: FiscalCode,
    #[serde(rename = "AuxDigit")]
    aux_digit: AuxDigit,
    #[serde(rename = "CodStazPA", default, skip_serializing_if = "Option::is_none")]
    cod_staz_pa: Option<StationCode>,
    #[serde(rename = "CodIUV")]
    cod_iuv: Iuv,
}

impl CodiceIdRpt {
    /// Assemble a payment identifier from validated parts.
    pub fn new(
        cf: FiscalCode,
        aux_digit: AuxDigit,
        cod_iuv: Iuv,
        cod_staz_pa: Option<StationCode>,
    ) -> Self {
        Self {
            cf,
            aux_digit,
            cod_staz_pa,
            cod_iuv,
        }
    }

    /// Creditor's fiscal code.
    pub fn cf(&self) -> &FiscalCode {
        &self.cf
    }

    /// Auxiliary digit.
    pub fn aux_digit(&self) -> AuxDigit {
        self.aux_digit
    }

    /// Creditor station code, if present.
    pub fn cod_staz_pa(&self) -> Option<&StationCode> {
        self.cod_staz_pa.as_ref()
    }

    /// Notice number.
    pub fn cod_iuv(&self) -> &Iuv {
        &self.cod_iuv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -- Iban --

    #[test]
    fn iban_valid_examples() {
        assert!(Iban::new("IT60X0542811101000000123456").is_ok());
        assert!(Iban::new("DE89370400440532013000").is_ok());
        assert!(Iban::new("it60x0542811101000000123456").is_ok());
    }

    #[test]
    fn iban_rejects_invalid() {
        assert!(Iban::new("").is_err());
        assert!(Iban::new("1234567890").is_err());
        assert!(Iban::new("IT60").is_err()); // no BBAN character
        assert!(Iban::new("IT6X0542811101000000123456").is_err()); // one check digit
        assert!(Iban::new("it-60-x").is_err());
    }

    #[test]
    fn iban_matches_anywhere_in_value() {
        // Same substring test the node applies.
        assert!(Iban::new("  IT60X0542811101000000123456  ").is_ok());
    }

    #[test]
    fn iban_error_variant() {
        assert!(matches!(
            Iban::new("nope"),
            Err(ValidationError::InvalidIban(_))
        ));
    }

    proptest! {
        #[test]
        fn iban_pattern_values_roundtrip(s in "[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}") {
            let iban = Iban::new(s.clone()).unwrap();
            prop_assert_eq!(iban.as_str(), s.as_str());
            let json = serde_json::to_string(&iban).unwrap();
            let back: Iban = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, iban);
        }

        #[test]
        fn iban_rejects_digit_only_values(s in "[0-9]{0,40}") {
            prop_assert!(Iban::new(s).is_err());
        }

        #[test]
        fn iban_rejects_letter_only_values(s in "[A-Za-z]{0,40}") {
            prop_assert!(Iban::new(s).is_err());
        }
    }

    // -- FiscalCode --

    #[test]
    fn fiscal_code_valid() {
        let cf = FiscalCode::new("RSSMRA80A01H501U").unwrap();
        assert_eq!(cf.as_str(), "RSSMRA80A01H501U");
    }

    #[test]
    fn fiscal_code_omocodia_letters() {
        assert!(FiscalCode::new("RSSMRAURALMHRQVU").is_ok());
    }

    #[test]
    fn fiscal_code_is_anchored() {
        assert!(FiscalCode::new("XRSSMRA80A01H501U").is_err());
        assert!(FiscalCode::new("RSSMRA80A01H501UX").is_err());
        assert!(FiscalCode::new(" RSSMRA80A01H501U").is_err());
    }

    #[test]
    fn fiscal_code_rejects_invalid() {
        assert!(FiscalCode::new("").is_err());
        assert!(FiscalCode::new("rssmra80a01h501u").is_err()); // lowercase
        assert!(FiscalCode::new("RSSMRA80Z01H501U").is_err()); // Z is not a month
        assert!(FiscalCode::new("RSSMRA80A01H501").is_err()); // 15 chars
    }

    // -- Iuv --

    #[test]
    fn iuv_valid_lengths() {
        assert!(Iuv::new("123456789012345").is_ok());
        assert!(Iuv::new("12345678901234567").is_ok());
    }

    #[test]
    fn iuv_rejects_invalid() {
        assert!(Iuv::new("").is_err());
        assert!(Iuv::new("12345678901234").is_err()); // 14 digits
        assert!(Iuv::new("1234567890ABCDE").is_err());
    }

    #[test]
    fn iuv_is_unanchored() {
        // 16 digits contain a 15-digit run; the node accepts it too.
        assert!(Iuv::new("1234567890123456").is_ok());
        assert!(Iuv::new("RF123456789012345").is_ok());
    }

    proptest! {
        #[test]
        fn iuv_accepts_any_fifteen_digit_run(s in "[0-9]{15}") {
            prop_assert!(Iuv::new(s).is_ok());
        }

        #[test]
        fn iuv_rejects_short_digit_runs(s in "[0-9]{0,14}") {
            prop_assert!(Iuv::new(s).is_err());
        }
    }

    // -- StationCode --

    #[test]
    fn station_code_valid() {
        assert!(StationCode::new("02").is_ok());
    }

    #[test]
    fn station_code_rejects_invalid() {
        assert!(StationCode::new("").is_err());
        assert!(StationCode::new("2").is_err());
        assert!(StationCode::new("AB").is_err());
    }

    // -- AuxDigit --

    #[test]
    fn aux_digit_parse_and_display() {
        for (s, d) in [
            ("0", AuxDigit::Zero),
            ("1", AuxDigit::One),
            ("2", AuxDigit::Two),
            ("3", AuxDigit::Three),
        ] {
            assert_eq!(s.parse::<AuxDigit>().unwrap(), d);
            assert_eq!(d.to_string(), s);
        }
        assert!(matches!(
            "4".parse::<AuxDigit>(),
            Err(ValidationError::InvalidAuxDigit(_))
        ));
    }

    #[test]
    fn aux_digit_serializes_as_digit_string() {
        assert_eq!(serde_json::to_string(&AuxDigit::Two).unwrap(), "\"2\"");
        let d: AuxDigit = serde_json::from_str("\"3\"").unwrap();
        assert_eq!(d, AuxDigit::Three);
        assert!(serde_json::from_str::<AuxDigit>("\"4\"").is_err());
        assert!(serde_json::from_str::<AuxDigit>("0").is_err()); // number, not string
    }

    // -- Importo --

    #[test]
    fn importo_boundaries() {
        assert!(Importo::new(Decimal::new(11, 2)).is_ok());
        assert!(Importo::new(Decimal::new(99_999_999, 2)).is_ok());
        assert!(Importo::new(Decimal::new(10, 2)).is_err());
        assert!(Importo::new(Decimal::new(100_000_000, 2)).is_err());
    }

    #[test]
    fn importo_rejects_zero_and_negative() {
        assert!(Importo::new(Decimal::ZERO).is_err());
        assert!(Importo::new(Decimal::new(-500, 2)).is_err());
    }

    #[test]
    fn importo_decodes_from_json_number() {
        let amount: Importo = serde_json::from_str("120.5").unwrap();
        assert_eq!(amount.value(), Decimal::new(1205, 1));
        assert!(serde_json::from_str::<Importo>("0.1").is_err());
        assert!(serde_json::from_str::<Importo>("1000000").is_err());
    }

    #[test]
    fn importo_serializes_as_json_number() {
        let amount = Importo::new(Decimal::new(1205, 1)).unwrap();
        assert_eq!(serde_json::to_string(&amount).unwrap(), "120.5");
    }

    proptest! {
        #[test]
        fn importo_accepted_iff_in_range(cents in -1_000_000i64..200_000_000i64) {
            let value = Decimal::new(cents, 2);
            let in_range = (11..=99_999_999).contains(&cents);
            prop_assert_eq!(Importo::new(value).is_ok(), in_range);
        }
    }

    // -- CodiceContestoPagamento --

    #[test]
    fn session_token_valid() {
        assert!(CodiceContestoPagamento::new("a").is_ok());
        assert!(CodiceContestoPagamento::new("8f7c2e1a0b3d11efb0a1d5f3c2e4a6b8").is_ok());
        assert!(CodiceContestoPagamento::new("A".repeat(35)).is_ok());
    }

    #[test]
    fn session_token_rejects_invalid() {
        assert!(CodiceContestoPagamento::new("").is_err());
        assert!(CodiceContestoPagamento::new("A".repeat(36)).is_err());
        // Hyphenated UUIDs are 36 characters and contain dashes.
        assert!(CodiceContestoPagamento::new("8f7c2e1a-0b3d-11ef-b0a1-d5f3c2e4a6b8").is_err());
        assert!(CodiceContestoPagamento::new("abc def").is_err());
    }

    // -- IdPagamento --

    #[test]
    fn id_pagamento_valid() {
        assert_eq!(IdPagamento::new("PAY-0001").unwrap().as_str(), "PAY-0001");
        assert!(IdPagamento::new("x".repeat(IdPagamento::MAX_LEN)).is_ok());
    }

    #[test]
    fn id_pagamento_rejects_invalid() {
        assert!(IdPagamento::new("").is_err());
        assert!(IdPagamento::new("   ").is_err());
        assert!(IdPagamento::new("x".repeat(IdPagamento::MAX_LEN + 1)).is_err());
    }

    // -- CodiceIdRpt --

    fn sample_id() -> CodiceIdRpt {
        CodiceIdRpt::new(
            FiscalCode::new("RSSMRA80A01H501U").unwrap(),
            AuxDigit::Zero,
            Iuv::new("123456789012345").unwrap(),
            None,
        )
    }

    #[test]
    fn codice_id_rpt_wire_names() {
        let json = serde_json::to_value(sample_id()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "CF": "RSSMRA80A01H501U",
                "AuxDigit": "0",
                "CodIUV": "123456789012345"
            })
        );
    }

    #[test]
    fn codice_id_rpt_station_code_optional() {
        let decoded: CodiceIdRpt = serde_json::from_value(serde_json::json!({
            "CF": "RSSMRA80A01H501U",
            "AuxDigit": "3",
            "CodStazPA": "02",
            "CodIUV": "123456789012345"
        }))
        .unwrap();
        assert_eq!(decoded.cod_staz_pa().map(StationCode::as_str), Some("02"));
        assert_eq!(decoded.aux_digit(), AuxDigit::Three);
    }

    #[test]
    fn codice_id_rpt_rejects_missing_or_invalid_parts() {
        assert!(serde_json::from_value::<CodiceIdRpt>(serde_json::json!({
            "AuxDigit": "0",
            "CodIUV": "123456789012345"
        }))
        .is_err());
        assert!(serde_json::from_value::<CodiceIdRpt>(serde_json::json!({
            "CF": "RSSMRA80A01H501U",
            "AuxDigit": "7",
            "CodIUV": "123456789012345"
        }))
        .is_err());
        assert!(serde_json::from_value::<CodiceIdRpt>(serde_json::json!({
            "CF": "RSSMRA80A01H501U",
            "AuxDigit": "0",
            "CodIUV": "123"
        }))
        .is_err());
    }
}
