//! Maintenance records raised from an inspection.
//!
//! A record starts as a draft that can be edited and deleted. Finalizing it
//! freezes it for good.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{timestamp, validate_not_blank};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceStatus {
    #[default]
    Draft,
    Finalized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BaselineCondition {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformerStatus {
    Working,
    NotWorking,
    PartiallyWorking,
}

/// Transformer class as recorded on the work-data sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformerClass {
    Distribution,
    Power,
    Instrument,
    AutoTransformer,
}

/// Anomaly copied onto the record from the inspection's analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAnomaly {
    pub id: String,
    #[serde(default)]
    pub box_number: Option<u32>,
    pub class_id: i32,
    pub class_name: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    pub bbox_x1: f64,
    pub bbox_y1: f64,
    pub bbox_x2: f64,
    pub bbox_y2: f64,
    #[serde(default)]
    pub source: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Fields an engineer fills in. Absent fields are left out of update bodies
/// so the service keeps their stored values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceDetails {
    // maintenance sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_inspection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervised_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gang_tech1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gang_tech2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gang_tech3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gang_helpers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rectified_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_inspector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css_inspector_date: Option<String>,

    // work-data sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pole_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_front: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub load_growth_kva: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_condition: Option<BaselineCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_status: Option<TransformerStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformer_type: Option<TransformerClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_serial_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_maker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_content: Option<BTreeMap<String, bool>>,

    // first round of readings, per phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_voltage_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_voltage_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_voltage_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_current_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_current_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_current_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_power_factor_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_power_factor_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_power_factor_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_kw_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_kw_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_kw_b: Option<f64>,

    // second round of readings, per phase
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_voltage_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_voltage_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_voltage_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_current_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_current_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_current_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_power_factor_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_power_factor_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_power_factor_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_kw_r: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_kw_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_kw_b: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_inspection_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engineer_remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub record_number: String,
    pub transformer_id: String,
    #[serde(default)]
    pub transformer_code: String,
    pub inspection_id: String,
    #[serde(default)]
    pub inspection_number: String,

    #[serde(default)]
    pub inspection_date: Option<String>,
    #[serde(default)]
    pub weather_condition: Option<String>,
    #[serde(default)]
    pub thermal_image_url: Option<String>,
    #[serde(default)]
    pub anomaly_count: u32,

    #[serde(flatten)]
    pub details: MaintenanceDetails,

    #[serde(default)]
    pub status: MaintenanceStatus,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub finalized_by: Option<String>,
    #[serde(default, with = "timestamp::option")]
    pub finalized_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub anomalies: Vec<MaintenanceAnomaly>,
}

impl MaintenanceRecord {
    pub fn is_editable(&self) -> bool {
        self.status == MaintenanceStatus::Draft
    }

    /// Fails with a conflict once the record has been finalized.
    pub fn ensure_editable(&self) -> Result<(), AppError> {
        if self.is_editable() {
            return Ok(());
        }
        Err(AppError::Conflict(format!(
            "Maintenance record {} is finalized and can no longer be changed",
            self.record_number
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRecordRequest {
    pub inspection_id: String,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRecordRequest {
    #[serde(flatten)]
    pub details: MaintenanceDetails,

    #[validate(custom(function = "validate_not_blank", message = "Please enter your name"))]
    pub updated_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeMaintenanceRecordRequest {
    #[validate(custom(function = "validate_not_blank", message = "Please enter your name"))]
    pub finalized_by: String,
}

/// Form state of the "new maintenance record" action.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct MaintenanceRecordDraft {
    #[validate(custom(function = "validate_not_blank", message = "Please select an inspection"))]
    pub inspection_id: String,

    #[validate(custom(function = "validate_not_blank", message = "Please enter your name"))]
    pub created_by: String,
}

impl MaintenanceRecordDraft {
    pub fn for_author(created_by: &str) -> Self {
        MaintenanceRecordDraft {
            inspection_id: String::new(),
            created_by: created_by.to_string(),
        }
    }

    pub fn into_request(self) -> CreateMaintenanceRecordRequest {
        CreateMaintenanceRecordRequest {
            inspection_id: self.inspection_id.trim().to_string(),
            created_by: self.created_by.trim().to_string(),
        }
    }
}
