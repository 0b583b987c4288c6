use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageType {
    #[serde(alias = "BASELINE")]
    Baseline,
    #[serde(alias = "MAINTENANCE")]
    Maintenance,
}

impl ImageType {
    pub fn wire_value(&self) -> &'static str {
        match self {
            ImageType::Baseline => "BASELINE",
            ImageType::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for ImageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageType::Baseline => write!(f, "Baseline"),
            ImageType::Maintenance => write!(f, "Maintenance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnvironmentalCondition {
    #[serde(alias = "SUNNY")]
    Sunny,
    #[serde(alias = "CLOUDY")]
    Cloudy,
    #[serde(alias = "RAINY")]
    Rainy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub file_size: u64,
    pub dimensions: Dimensions,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalImage {
    pub id: String,
    pub transformer_id: String,
    #[serde(alias = "publicUrl")]
    pub image_url: String,
    #[serde(rename = "type")]
    pub image_type: ImageType,
    #[serde(default, alias = "envCondition")]
    pub environmental_condition: Option<EnvironmentalCondition>,
    #[serde(alias = "uploadedAt", with = "timestamp")]
    pub upload_date: DateTime<Utc>,
    pub uploader: String,
    #[serde(default)]
    pub metadata: Option<ImageMetadata>,
}
