use crate::types::{EntityId, Kilowatts};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomState {
    Optimal,
    Wastage,
    Off,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerSource {
    Solar,
    Grid,
    Hybrid,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceKind {
    Hvac,
    Light,
    Misc,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceState {
    On,
    Off,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub name:   String,
    pub power:  Kilowatts,
    pub kind:   DeviceKind,
    pub status: DeviceState,
}

impl Device {
    pub fn is_on(&self) -> bool {
        self.status == DeviceState::On
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomStatus {
    pub id:                EntityId,
    pub name:              String,
    pub is_occupied:       bool,
    pub power_consumption: Kilowatts,
    pub status:            RoomState,
    pub source:            PowerSource,
    pub devices:           Vec<Device>,
    pub cam_feed:          Option<String>,
}

impl RoomStatus {
    /// Drawing power with nobody in the room.
    pub fn is_wasting(&self) -> bool {
        !self.is_occupied && self.devices.iter().any(Device::is_on)
    }

    /// Flag the room as wasting: vacant, every device on.
    pub fn mark_wastage(&mut self) {
        self.status = RoomState::Wastage;
        self.is_occupied = false;
        for device in &mut self.devices {
            device.status = DeviceState::On;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(occupied: bool, device_on: bool) -> RoomStatus {
        RoomStatus {
            id: "201".into(),
            name: "Seminar Room".into(),
            is_occupied: occupied,
            power_consumption: 0.4,
            status: RoomState::Optimal,
            source: PowerSource::Grid,
            devices: vec![Device {
                name: "Lights".into(),
                power: 0.4,
                kind: DeviceKind::Light,
                status: if device_on { DeviceState::On } else { DeviceState::Off },
            }],
            cam_feed: None,
        }
    }

    #[test]
    fn mark_wastage_vacates_and_powers_devices() {
        let mut r = room(true, false);
        r.mark_wastage();
        assert_eq!(r.status, RoomState::Wastage);
        assert!(!r.is_occupied);
        assert!(r.devices.iter().all(Device::is_on));
        assert!(r.is_wasting());
    }

    #[test]
    fn occupied_room_is_not_wasting() {
        assert!(!room(true, true).is_wasting());
        assert!(!room(false, false).is_wasting());
    }
}
