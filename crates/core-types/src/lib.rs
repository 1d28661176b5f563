use std::fmt;

use thiserror::Error;
use uuid::Uuid;

/// Shared error envelope for the Vigil core crates.
#[derive(Debug, Error, Clone)]
pub enum CoreError {
    #[error("{message}")]
    Message { message: String },
}

impl CoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }
}

/// Identity of a camera record, stable for the registry's lifetime.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct CameraId(pub String);

impl CameraId {
    /// Builds the zero-padded monotonic id used by the registry (`CAM-01`).
    pub fn from_index(index: usize) -> Self {
        Self(format!("CAM-{:02}", index))
    }

    /// Numeric suffix of a registry-assigned id, if the id carries one.
    pub fn suffix(&self) -> Option<usize> {
        self.0.rsplit('-').next()?.parse().ok()
    }
}

impl fmt::Display for CameraId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DetectionId(pub String);

impl DetectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for DetectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DetectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed site zones a camera can be assigned to.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Zone {
    Gate,
    Warehouse,
    Office,
    Yard,
    Parking,
    Entrance,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Gate,
        Zone::Warehouse,
        Zone::Office,
        Zone::Yard,
        Zone::Parking,
        Zone::Entrance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Zone::Gate => "Gate",
            Zone::Warehouse => "Warehouse",
            Zone::Office => "Office",
            Zone::Yard => "Yard",
            Zone::Parking => "Parking",
            Zone::Entrance => "Entrance",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Object labels the simulated classifier can emit.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ObjectClass {
    Person,
    Vehicle,
    Leaf,
    Shadow,
    Insect,
    Light,
    None,
}

impl ObjectClass {
    pub fn name(self) -> &'static str {
        match self {
            ObjectClass::Person => "Person",
            ObjectClass::Vehicle => "Vehicle",
            ObjectClass::Leaf => "Leaf",
            ObjectClass::Shadow => "Shadow",
            ObjectClass::Insect => "Insect",
            ObjectClass::Light => "Light",
            ObjectClass::None => "None",
        }
    }
}

impl fmt::Display for ObjectClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operator disposition of a detection.
#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AlertAction {
    Pending,
    Real,
    False,
}

impl Default for AlertAction {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for AlertAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertAction::Pending => "Pending",
            AlertAction::Real => "Real",
            AlertAction::False => "False",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_ids_are_zero_padded() {
        assert_eq!(CameraId::from_index(1).0, "CAM-01");
        assert_eq!(CameraId::from_index(12).0, "CAM-12");
        assert_eq!(CameraId::from_index(7).suffix(), Some(7));
    }

    #[test]
    fn detection_ids_are_unique() {
        assert_ne!(DetectionId::new(), DetectionId::new());
    }

    #[test]
    fn zone_list_covers_every_variant() {
        assert_eq!(Zone::ALL.len(), 6);
        assert_eq!(Zone::ALL[0].name(), "Gate");
        assert_eq!(Zone::ALL[5].name(), "Entrance");
    }
}
