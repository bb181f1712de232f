//! pagoPA node identifier configuration.
//!
//! The four identifiers every node call carries: PSP, intermediary, channel
//! and channel password. Process-wide, but passed explicitly into each
//! converter so conversions stay pure.

/// Identifiers assigned to this PSP by the pagoPA node.
///
/// Custom `Debug` implementation redacts the `password` field
/// to prevent credential leakage in log output.
#[derive(Clone, PartialEq, Eq)]
pub struct PagoPaConfig {
    /// Payment service provider identifier (`identificativoPSP`).
    pub identificativo_psp: String,
    /// Intermediary identifier (`identificativoIntermediarioPSP`).
    pub identificativo_intermediario_psp: String,
    /// Channel identifier (`identificativoCanale`).
    pub identificativo_canale: String,
    /// Channel password/token (`password`).
    pub password: String,
}

impl std::fmt::Debug for PagoPaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagoPaConfig")
            .field("identificativo_psp", &self.identificativo_psp)
            .field(
                "identificativo_intermediario_psp",
                &self.identificativo_intermediario_psp,
            )
            .field("identificativo_canale", &self.identificativo_canale)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl PagoPaConfig {
    /// Build a configuration from explicit values.
    pub fn new(
        identificativo_psp: impl Into<String>,
        identificativo_intermediario_psp: impl Into<String>,
        identificativo_canale: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            identificativo_psp: identificativo_psp.into(),
            identificativo_intermediario_psp: identificativo_intermediario_psp.into(),
            identificativo_canale: identificativo_canale.into(),
            password: password.into(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Variables (all required, non-empty):
    /// - `PAGOPA_ID_PSP`
    /// - `PAGOPA_ID_INT_PSP`
    /// - `PAGOPA_ID_CANALE`
    /// - `PAGOPA_PASSWORD`
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            identificativo_psp: required_var("PAGOPA_ID_PSP")?,
            identificativo_intermediario_psp: required_var("PAGOPA_ID_INT_PSP")?,
            identificativo_canale: required_var("PAGOPA_ID_CANALE")?,
            password: required_var("PAGOPA_PASSWORD")?,
        })
    }
}

fn required_var(var: &str) -> Result<String, ConfigError> {
    match std::env::var(var) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        Ok(_) => Err(ConfigError::Empty(var.to_string())),
        Err(_) => Err(ConfigError::Missing(var.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(String),
    #[error("{0} environment variable must not be empty")]
    Empty(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_populates_all_fields() {
        let cfg = PagoPaConfig::new("PSP1", "INT1", "CH1", "TOK1");
        assert_eq!(cfg.identificativo_psp, "PSP1");
        assert_eq!(cfg.identificativo_intermediario_psp, "INT1");
        assert_eq!(cfg.identificativo_canale, "CH1");
        assert_eq!(cfg.password, "TOK1");
    }

    #[test]
    fn debug_redacts_password() {
        let cfg = PagoPaConfig::new("PSP1", "INT1", "CH1", "super-secret");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("[REDACTED]"));
        assert!(dbg.contains("PSP1"));
    }

    #[test]
    fn required_var_reports_missing() {
        let err = required_var("PAGOPA_TEST_NONEXISTENT_VAR_4821").unwrap_err();
        assert!(matches!(err, ConfigError::Missing(ref v) if v == "PAGOPA_TEST_NONEXISTENT_VAR_4821"));
    }

    #[test]
    fn required_var_rejects_blank() {
        std::env::set_var("PAGOPA_TEST_BLANK_VAR_4821", "   ");
        let result = required_var("PAGOPA_TEST_BLANK_VAR_4821");
        std::env::remove_var("PAGOPA_TEST_BLANK_VAR_4821");
        assert!(matches!(result, Err(ConfigError::Empty(_))));
    }

    #[test]
    fn required_var_reads_value() {
        std::env::set_var("PAGOPA_TEST_SET_VAR_4821", "CH9");
        let result = required_var("PAGOPA_TEST_SET_VAR_4821");
        std::env::remove_var("PAGOPA_TEST_SET_VAR_4821");
        assert_eq!(result.unwrap(), "CH9");
    }
}
