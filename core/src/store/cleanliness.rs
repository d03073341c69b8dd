use crate::types::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HygieneStatus {
    Clean,
    Pending,
    Critical,
    Scanning,
}

/// A bounding box from the litter detector, in percent of frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Detection {
    pub x:          f64,
    pub y:          f64,
    pub w:          f64,
    pub h:          f64,
    pub label:      String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanlinessZone {
    pub id:         EntityId,
    pub name:       String,
    pub image:      String,
    pub status:     HygieneStatus,
    /// 0..=100.
    pub score:      u8,
    pub detections: Vec<Detection>,
}
