use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{thermal_image::ThermalImage, timestamp, validate_not_blank};

/// Inspection progress as reported by the service.
///
/// Values outside the known set are kept verbatim in `Unknown` so they can
/// still be listed; the client never validates transitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InspectionStatus {
    Pending,
    InProgress,
    Completed,
    Unknown(String),
}

impl InspectionStatus {
    pub fn label(&self) -> &str {
        match self {
            InspectionStatus::Pending => "Pending",
            InspectionStatus::InProgress => "In Progress",
            InspectionStatus::Completed => "Completed",
            InspectionStatus::Unknown(raw) => raw,
        }
    }

    /// CSS-style class of the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            InspectionStatus::Pending => "pending",
            InspectionStatus::InProgress => "in-progress",
            InspectionStatus::Completed => "completed",
            InspectionStatus::Unknown(_) => "unknown",
        }
    }

    /// Spelling used by the status update endpoint.
    pub fn wire_value(&self) -> &str {
        match self {
            InspectionStatus::Pending => "PENDING",
            InspectionStatus::InProgress => "IN_PROGRESS",
            InspectionStatus::Completed => "COMPLETED",
            InspectionStatus::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, InspectionStatus::Unknown(_))
    }
}

impl From<String> for InspectionStatus {
    fn from(raw: String) -> Self {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "pending" => InspectionStatus::Pending,
            "inprogress" => InspectionStatus::InProgress,
            "completed" => InspectionStatus::Completed,
            _ => InspectionStatus::Unknown(raw),
        }
    }
}

impl From<&str> for InspectionStatus {
    fn from(raw: &str) -> Self {
        InspectionStatus::from(raw.to_string())
    }
}

/// Records and payloads carry the same spelling as the status endpoint.
impl From<InspectionStatus> for String {
    fn from(status: InspectionStatus) -> Self {
        match status {
            InspectionStatus::Unknown(raw) => raw,
            known => known.wire_value().to_string(),
        }
    }
}

impl fmt::Display for InspectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: String,
    pub inspection_no: String,
    pub transformer_id: String,
    #[serde(with = "timestamp")]
    pub inspected_date: DateTime<Utc>,
    #[serde(default, with = "timestamp::option")]
    pub maintenance_date: Option<DateTime<Utc>>,
    pub status: InspectionStatus,
    pub inspected_by: String,
    #[serde(default)]
    pub thermal_images: Vec<ThermalImage>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInspection {
    pub inspection_no: String,
    pub transformer_id: String,
    #[serde(with = "timestamp")]
    pub inspected_date: DateTime<Utc>,
    #[serde(default, with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub maintenance_date: Option<DateTime<Utc>>,
    pub status: InspectionStatus,
    pub inspected_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body of the notes update; blank text clears the notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectionNotesUpdate {
    pub notes: String,
}

/// Form state of the "new inspection" dialog.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct InspectionDraft {
    #[validate(custom(function = "validate_not_blank", message = "Inspection number is required"))]
    pub inspection_no: String,

    #[validate(custom(function = "validate_not_blank", message = "Please select a transformer"))]
    pub transformer_id: String,

    #[validate(required(message = "Please select an inspection date"))]
    pub inspected_date: Option<DateTime<Utc>>,

    pub maintenance_date: Option<DateTime<Utc>>,

    #[validate(custom(function = "validate_not_blank", message = "Inspector name is required"))]
    pub inspected_by: String,

    pub notes: String,
}

impl InspectionDraft {
    /// Builds the create payload. New inspections always start as pending.
    pub fn to_new_inspection(&self) -> Option<NewInspection> {
        let inspected_date = self.inspected_date?;
        let notes = self.notes.trim();

        Some(NewInspection {
            inspection_no: self.inspection_no.trim().to_string(),
            transformer_id: self.transformer_id.trim().to_string(),
            inspected_date,
            maintenance_date: self.maintenance_date,
            status: InspectionStatus::Pending,
            inspected_by: self.inspected_by.trim().to_string(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}
