//! Item domain types and request validation

use crate::core::validation::email::EmailValidator;
use crate::utils::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of an item name
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of an item description
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Lifecycle status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    New,
    Processed,
    Cancelled,
}

impl ItemStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::New => "NEW",
            ItemStatus::Processed => "PROCESSED",
            ItemStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(ItemStatus::New),
            "PROCESSED" => Ok(ItemStatus::Processed),
            "CANCELLED" => Ok(ItemStatus::Cancelled),
            other => Err(format!("unknown item status: {}", other)),
        }
    }
}

/// A persisted item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Store-assigned identifier, stable for the item's lifetime
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub email: String,
}

/// A validated item that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub status: ItemStatus,
    pub email: String,
}

/// DTO for creating or updating an item
///
/// All fields arrive optional so that missing values surface as validation
/// messages rather than deserialization faults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
}

impl ItemRequest {
    /// Validate every field, collecting all failing constraints.
    ///
    /// Messages are prefixed with the field name and returned in declaration
    /// order. The email deliverability check runs only when the email is
    /// present and non-blank; it performs one DNS MX lookup.
    pub async fn validate(&self, email: &EmailValidator) -> Result<NewItem, ServiceError> {
        let mut errors = Vec::new();

        let name = self.name.clone().unwrap_or_default();
        if name.trim().is_empty() {
            errors.push("name: Name is required".to_string());
        } else if name.chars().count() > MAX_NAME_LEN {
            errors.push(format!(
                "name: Name cannot exceed {} characters",
                MAX_NAME_LEN
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                errors.push(format!(
                    "description: Description cannot exceed {} characters",
                    MAX_DESCRIPTION_LEN
                ));
            }
        }

        let status = match self.status.as_deref() {
            None => {
                errors.push("status: Status is required".to_string());
                None
            }
            Some(raw) => match raw.parse::<ItemStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    errors.push(
                        "status: Status must be one of NEW, PROCESSED, CANCELLED".to_string(),
                    );
                    None
                }
            },
        };

        let address = self.email.clone().unwrap_or_default();
        if address.trim().is_empty() {
            errors.push("email: Email is required".to_string());
        } else if !email.is_deliverable(&address).await {
            errors.push("email: Email address is not deliverable".to_string());
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        Ok(NewItem {
            name,
            description: self.description.clone(),
            // status is always Some here, the None arms pushed an error
            status: status.expect("validated status"),
            email: address,
        })
    }
}
