use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{timestamp, validate_not_blank};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransformerType {
    #[serde(alias = "BULK")]
    Bulk,
    #[default]
    #[serde(alias = "DISTRIBUTION")]
    Distribution,
}

impl fmt::Display for TransformerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformerType::Bulk => write!(f, "Bulk"),
            TransformerType::Distribution => write!(f, "Distribution"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformer {
    pub id: String,
    pub transformer_no: String,
    pub pole_no: String,
    #[serde(default)]
    pub region: String,
    #[serde(rename = "type", default)]
    pub transformer_type: TransformerType,
    #[serde(default)]
    pub location_details: String,
    #[serde(default)]
    pub is_starred: Option<bool>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Transformer {
    pub fn starred(&self) -> bool {
        self.is_starred.unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransformer {
    pub transformer_no: String,
    pub pole_no: String,
    pub region: String,
    #[serde(rename = "type")]
    pub transformer_type: TransformerType,
    pub location_details: String,
}

/// Form state of the "add transformer" dialog.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct TransformerDraft {
    #[validate(custom(function = "validate_not_blank", message = "Transformer number is required"))]
    pub transformer_no: String,

    #[validate(custom(function = "validate_not_blank", message = "Pole number is required"))]
    pub pole_no: String,

    pub region: String,
    pub transformer_type: TransformerType,
    pub location_details: String,
}

impl From<TransformerDraft> for NewTransformer {
    fn from(draft: TransformerDraft) -> Self {
        NewTransformer {
            transformer_no: draft.transformer_no.trim().to_string(),
            pole_no: draft.pole_no.trim().to_string(),
            region: draft.region.trim().to_string(),
            transformer_type: draft.transformer_type,
            location_details: draft.location_details.trim().to_string(),
        }
    }
}
