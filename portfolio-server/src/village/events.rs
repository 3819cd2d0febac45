//! Village Events
//!
//! Events produced by the per-frame update and the scene gate, consumed by
//! the info panel, the mini-map caption and logging.

use serde::Serialize;

use super::scene_mode::SceneMode;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum VillageEventData {
    /// Player walked into a location zone
    LocationEntered {
        zone_id: &'static str,
    },

    /// Player walked out of the zone they last entered
    LocationExited {
        zone_id: &'static str,
    },

    /// Scene gate changed mode
    SceneModeChanged {
        from: SceneMode,
        to: SceneMode,
    },
}

/// An event stamped with the scene clock.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VillageEvent {
    /// Seconds since the scene started
    pub at: f32,

    /// Event data
    pub data: VillageEventData,
}

impl VillageEvent {
    /// Create a new event.
    pub fn new(at: f32, data: VillageEventData) -> Self {
        Self { at, data }
    }

    /// Create location entered event.
    pub fn location_entered(at: f32, zone_id: &'static str) -> Self {
        Self::new(at, VillageEventData::LocationEntered { zone_id })
    }

    /// Create location exited event.
    pub fn location_exited(at: f32, zone_id: &'static str) -> Self {
        Self::new(at, VillageEventData::LocationExited { zone_id })
    }

    /// Create scene mode changed event.
    pub fn scene_mode_changed(at: f32, from: SceneMode, to: SceneMode) -> Self {
        Self::new(at, VillageEventData::SceneModeChanged { from, to })
    }

    /// Zone id for location events.
    pub fn zone_id(&self) -> Option<&'static str> {
        match self.data {
            VillageEventData::LocationEntered { zone_id }
            | VillageEventData::LocationExited { zone_id } => Some(zone_id),
            VillageEventData::SceneModeChanged { .. } => None,
        }
    }
}
