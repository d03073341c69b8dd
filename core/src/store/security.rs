use crate::types::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneKind {
    Classroom,
    Corridor,
    CommonArea,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedStatus {
    Safe,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Activity {
    Studying,
    Gathering,
    Fighting,
    Loitering,
    Empty,
}

/// One monitored zone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityFeed {
    pub id:                  EntityId,
    pub location:            String,
    pub zone:                ZoneKind,
    pub status:              FeedStatus,
    pub staff_detected:      bool,
    pub head_count:          u32,
    pub activity:            Activity,
    /// Individuals matched against the watch list.
    pub flagged_individuals: u32,
    pub cam_url:             String,
}
