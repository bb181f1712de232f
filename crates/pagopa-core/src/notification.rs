//! Notification subscription types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::FiscalCode;

/// Direction of a notification subscription change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationSubscriptionRequestType {
    Activation,
    Deactivation,
}

impl NotificationSubscriptionRequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activation => "ACTIVATION",
            Self::Deactivation => "DEACTIVATION",
        }
    }
}

impl fmt::Display for NotificationSubscriptionRequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to (un)subscribe a device installation to payment notifications
/// for a citizen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSubscriptionRequest")]
pub struct NotificationSubscriptionRequest {
    fiscal_code: FiscalCode,
    installation_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSubscriptionRequest {
    fiscal_code: FiscalCode,
    installation_id: String,
}

impl TryFrom<RawSubscriptionRequest> for NotificationSubscriptionRequest {
    type Error = ValidationError;

    fn try_from(raw: RawSubscriptionRequest) -> Result<Self, Self::Error> {
        Self::new(raw.fiscal_code, raw.installation_id)
    }
}

impl NotificationSubscriptionRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidInstallationId`] if the installation
    /// id is blank.
    pub fn new(
        fiscal_code: FiscalCode,
        installation_id: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let installation_id = installation_id.into();
        if installation_id.trim().is_empty() {
            return Err(ValidationError::InvalidInstallationId(installation_id));
        }
        Ok(Self {
            fiscal_code,
            installation_id,
        })
    }

    pub fn fiscal_code(&self) -> &FiscalCode {
        &self.fiscal_code
    }

    pub fn installation_id(&self) -> &str {
        &self.installation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationSubscriptionRequestType::Activation).unwrap(),
            "\"ACTIVATION\""
        );
        assert_eq!(
            NotificationSubscriptionRequestType::Deactivation.to_string(),
            "DEACTIVATION"
        );
    }

    #[test]
    fn subscription_request_decodes() {
        let req: NotificationSubscriptionRequest = serde_json::from_value(json!({
            "fiscalCode": "RSSMRA80A01H501U",
            "installationId": "device-42"
        }))
        .unwrap();
        assert_eq!(req.fiscal_code().as_str(), "RSSMRA80A01H501U");
        assert_eq!(req.installation_id(), "device-42");
    }

    #[test]
    fn subscription_request_rejects_blank_installation() {
        let result = serde_json::from_value::<NotificationSubscriptionRequest>(json!({
            "fiscalCode": "RSSMRA80A01H501U",
            "installationId": "  "
        }));
        assert!(result.is_err());
    }

    #[test]
    fn subscription_request_rejects_bad_fiscal_code() {
        let result = serde_json::from_value::<NotificationSubscriptionRequest>(json!({
            "fiscalCode": "rssmra80a01h501u",
            "installationId": "device-42"
        }));
        assert!(result.is_err());
    }
}
