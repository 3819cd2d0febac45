//! Mini-map Projector
//!
//! Projects world X/Z onto a square top-down map and lays out the landmark
//! markers, the player marker and the caption. Output is plain pixel
//! geometry; the host draws it.

use serde::Serialize;

use super::controller::PlayerSnapshot;
use super::layout::{Landmark, LandmarkCategory, WORLD_HALF_EXTENT};

/// Map edge length while collapsed.
pub const COLLAPSED_SIZE: f32 = 180.0;

/// Map edge length while expanded.
pub const EXPANDED_SIZE: f32 = 280.0;

/// Summary hall marker edge.
pub const HALL_MARKER_SIZE: f32 = 12.0;

/// Regular marker edge.
pub const MARKER_SIZE: f32 = 8.0;

/// Player dot offset from its projected point.
pub const PLAYER_MARKER_OFFSET: f32 = 3.0;

/// Project one world coordinate onto a map of `map_size` pixels.
#[inline]
pub fn project(world: f32, map_size: f32) -> f32 {
    ((world + WORLD_HALF_EXTENT) / (WORLD_HALF_EXTENT * 2.0)) * map_size
}

/// Color palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum Theme {
    /// Daylight palette
    #[default]
    Day,
    /// Night palette (reds)
    Night,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

/// Marker fill for a landmark category, as a `#rrggbb` string.
pub fn marker_color(category: LandmarkCategory, theme: Theme) -> &'static str {
    use LandmarkCategory::*;

    match theme {
        Theme::Day => match category {
            SummaryHall => "#FF6347",
            Education => "#9b59b6",
            WorkExperience => "#3498db",
            Skills => "#2ecc71",
            Certifications => "#3498db",
            Projects => "#f39c12",
            Other => "#95a5a6",
        },
        Theme::Night => match category {
            SummaryHall => "#c41e3a",
            Education => "#d81f44",
            WorkExperience => "#b01c36",
            Skills => "#e32f4c",
            Certifications => "#a71a32",
            Projects => "#f04c64",
            Other => "#7d1425",
        },
    }
}

/// A landmark square on the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MapMarker {
    /// Landmark id
    pub id: &'static str,
    /// Left edge in map pixels
    pub left: f32,
    /// Top edge in map pixels
    pub top: f32,
    /// Edge length
    pub size: f32,
    /// Fill color
    pub color: &'static str,
    /// Rotation in degrees
    pub rotation_deg: f32,
    /// Player is currently at this landmark
    pub active: bool,
}

/// The player dot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlayerMarker {
    /// Left edge in map pixels
    pub left: f32,
    /// Top edge in map pixels
    pub top: f32,
    /// Heading in radians
    pub rotation: f32,
}

/// Everything needed to draw the map for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MiniMapFrame {
    /// Map edge length
    pub size: f32,
    /// Landmark markers in input order
    pub markers: Vec<MapMarker>,
    /// Player dot
    pub player: PlayerMarker,
    /// Name of the current location, if it is a known landmark
    pub caption: Option<&'static str>,
    /// Scale bar is drawn only when expanded
    pub show_scale: bool,
}

/// Mini-map view state.
#[derive(Clone, Debug, Default)]
pub struct MiniMap {
    expanded: bool,
    theme: Theme,
}

impl MiniMap {
    /// Collapsed day-theme map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if expanded.
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Flip between collapsed and expanded. Only the size changes.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Current palette.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Switch palette.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Current edge length.
    pub fn size(&self) -> f32 {
        if self.expanded {
            EXPANDED_SIZE
        } else {
            COLLAPSED_SIZE
        }
    }

    /// Lay out one frame.
    pub fn render(
        &self,
        player: &PlayerSnapshot,
        landmarks: &[Landmark],
        current: Option<&str>,
    ) -> MiniMapFrame {
        let size = self.size();

        let markers = landmarks
            .iter()
            .map(|landmark| {
                let hall = landmark.category == LandmarkCategory::SummaryHall;
                let edge = if hall { HALL_MARKER_SIZE } else { MARKER_SIZE };
                MapMarker {
                    id: landmark.id,
                    left: project(landmark.x, size) - edge / 2.0,
                    top: project(landmark.z, size) - edge / 2.0,
                    size: edge,
                    color: marker_color(landmark.category, self.theme),
                    rotation_deg: if hall { 45.0 } else { 0.0 },
                    active: current == Some(landmark.id),
                }
            })
            .collect();

        let player_marker = PlayerMarker {
            left: project(player.position.x, size) - PLAYER_MARKER_OFFSET,
            top: project(player.position.z, size) - PLAYER_MARKER_OFFSET,
            rotation: player.rotation_y,
        };

        let caption = current
            .and_then(|id| landmarks.iter().find(|l| l.id == id))
            .map(|l| l.name);

        MiniMapFrame {
            size,
            markers,
            player: player_marker,
            caption,
            show_scale: self.expanded,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::core::Vec3;
    use crate::village::controller::PlayerState;
    use crate::village::layout::LANDMARKS;

    #[test]
    fn test_project_edges_and_center() {
        assert_eq!(project(-150.0, 180.0), 0.0);
        assert_eq!(project(0.0, 180.0), 90.0);
        assert_eq!(project(150.0, 180.0), 180.0);
        assert_eq!(project(0.0, 280.0), 140.0);
    }

    #[test]
    fn test_spawn_player_marker() {
        let map = MiniMap::new();
        let frame = map.render(&PlayerState::default(), &LANDMARKS, None);

        // (10 + 150) / 300 * 180 = 96
        assert!((frame.player.left - 87.0).abs() < 1e-4);
        assert!((frame.player.top - 93.0).abs() < 1e-4);
        assert_eq!(frame.player.rotation, 0.0);
    }

    #[test]
    fn test_hall_marker_is_larger_and_rotated() {
        let frame = MiniMap::new().render(&PlayerState::default(), &LANDMARKS, None);

        let hall = &frame.markers[0];
        assert_eq!(hall.id, "konohaVillage");
        assert_eq!(hall.size, 12.0);
        assert_eq!(hall.rotation_deg, 45.0);
        assert_eq!(hall.left, 84.0);

        let education = &frame.markers[1];
        assert_eq!(education.size, 8.0);
        assert_eq!(education.rotation_deg, 0.0);
        // (-50 + 150) / 300 * 180 - 4 = 56
        assert!((education.left - 56.0).abs() < 1e-4);
    }

    #[test]
    fn test_toggle_changes_only_size() {
        let mut map = MiniMap::new();
        let player = PlayerState::default();
        let before = map.render(&player, &LANDMARKS, Some("skills"));

        map.toggle_expanded();
        let after = map.render(&player, &LANDMARKS, Some("skills"));

        assert_eq!(before.size, 180.0);
        assert_eq!(after.size, 280.0);
        assert!(!before.show_scale);
        assert!(after.show_scale);
        assert_eq!(before.caption, after.caption);
        assert_eq!(before.markers.len(), after.markers.len());

        map.toggle_expanded();
        assert_eq!(map.render(&player, &LANDMARKS, Some("skills")), before);
    }

    #[test]
    fn test_active_marker_and_caption() {
        let frame = MiniMap::new().render(&PlayerState::default(), &LANDMARKS, Some("skills"));

        let active: Vec<_> = frame.markers.iter().filter(|m| m.active).map(|m| m.id).collect();
        assert_eq!(active, vec!["skills"]);
        assert_eq!(frame.caption, Some("Skill Forge"));
    }

    #[test]
    fn test_unknown_location_has_no_caption() {
        let frame = MiniMap::new().render(&PlayerState::default(), &LANDMARKS, Some("nowhere"));
        assert!(frame.caption.is_none());
        assert!(frame.markers.iter().all(|m| !m.active));
    }

    #[test]
    fn test_theme_palettes() {
        assert_eq!(marker_color(LandmarkCategory::SummaryHall, Theme::Day), "#FF6347");
        assert_eq!(marker_color(LandmarkCategory::SummaryHall, Theme::Night), "#c41e3a");
        assert_eq!(marker_color(LandmarkCategory::Other, Theme::Night), "#7d1425");
        assert_eq!(
            marker_color(LandmarkCategory::WorkExperience, Theme::Day),
            marker_color(LandmarkCategory::Certifications, Theme::Day)
        );

        let mut map = MiniMap::new();
        map.set_theme(map.theme().toggled());
        let frame = map.render(&PlayerState::default(), &LANDMARKS, None);
        assert_eq!(frame.markers[6].color, "#e32f4c");
    }

    proptest! {
        #[test]
        fn prop_render_is_pure(
            x in -150.0f32..150.0,
            z in -150.0f32..150.0,
            yaw in -7.0f32..7.0,
            expanded in any::<bool>(),
        ) {
            let mut map = MiniMap::new();
            if expanded {
                map.toggle_expanded();
            }
            let player = PlayerState {
                position: Vec3::new(x, 1.0, z),
                rotation_y: yaw,
                vertical_look_angle: 0.0,
            };

            let a = map.render(&player, &LANDMARKS, Some("projects"));
            let b = map.render(&player, &LANDMARKS, Some("projects"));
            prop_assert_eq!(&a, &b);

            // In-bounds positions land on the map
            let center_x = a.player.left + PLAYER_MARKER_OFFSET;
            let center_z = a.player.top + PLAYER_MARKER_OFFSET;
            prop_assert!(center_x >= 0.0 && center_x <= a.size);
            prop_assert!(center_z >= 0.0 && center_z <= a.size);
        }
    }
}
