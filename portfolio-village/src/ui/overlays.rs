//! Map legend and controls overlays

use bevy::prelude::*;

use portfolio::village::layout::{LandmarkCategory, LANDMARKS};
use portfolio::village::minimap::marker_color;
use portfolio::village::Theme;

use crate::game::DayNight;
use super::{spawn_button, HudState, HudUI};

/// Help overlay shown from the HUD
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    Legend,
    Controls,
}

impl Overlay {
    /// Pressing the open overlay's button closes it; any other button
    /// replaces it.
    pub fn toggle(current: Option<Overlay>, pressed: Overlay) -> Option<Overlay> {
        if current == Some(pressed) {
            None
        } else {
            Some(pressed)
        }
    }
}

/// Opens or closes an overlay (HUD buttons and each overlay's close button)
#[derive(Component)]
pub struct OverlayButton(pub Overlay);

/// Overlay root
#[derive(Component)]
pub struct OverlayPanel(pub Overlay);

/// Legend color chip for a landmark category
#[derive(Component)]
pub struct LegendSwatch(pub LandmarkCategory);

const CONTROLS: [(&str, &[&str]); 4] = [
    ("Movement", &["W - Move Backward", "S - Move Forward", "A - Turn Left", "D - Turn Right"]),
    ("Camera", &["Hold Left Mouse Button and move the mouse to look around", "Touch: drag a second finger"]),
    ("Touch", &["Left pad - joystick", "Right buttons - step in one direction"]),
    ("Village", &["E - Details for this location", "M - Expand the map", "N - Day / night", "V - 2D view", "Esc - Close details"]),
];

/// Compass label for a world position, north being -Z.
pub fn compass(x: f32, z: f32) -> &'static str {
    const NAMES: [[&str; 3]; 3] = [
        ["Northwest", "North", "Northeast"],
        ["West", "Center", "East"],
        ["Southwest", "South", "Southeast"],
    ];
    let band = |v: f32| if v < 0.0 { 0 } else if v > 0.0 { 2 } else { 1 };
    NAMES[band(z)][band(x)]
}

fn swatch_color(category: LandmarkCategory, theme: Theme) -> Color {
    Srgba::hex(marker_color(category, theme)).map(Color::from).unwrap_or(Color::WHITE)
}

fn overlay_root(kind: Overlay) -> impl Bundle {
    (
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            top: Val::Px(120.0),
            width: Val::Px(300.0),
            max_height: Val::Percent(80.0),
            padding: UiRect::all(Val::Px(14.0)),
            flex_direction: FlexDirection::Column,
            border: UiRect::all(Val::Px(2.0)),
            overflow: Overflow::scroll_y(),
            display: Display::None,
            ..default()
        },
        BorderColor(Color::srgb(1.0, 0.55, 0.1)),
        BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.9)),
        OverlayPanel(kind),
        HudUI,
    )
}

fn heading(parent: &mut ChildBuilder, text: &str, size: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.55, 0.1)),
        Node {
            margin: UiRect::vertical(Val::Px(4.0)),
            ..default()
        },
    ));
}

fn line(parent: &mut ChildBuilder, text: &str) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(Color::srgb(0.85, 0.85, 0.9)),
    ));
}

pub fn setup_overlays(mut commands: Commands, day_night: Res<DayNight>) {
    commands.spawn(overlay_root(Overlay::Legend)).with_children(|panel| {
        heading(panel, "Village Map Legend", 20.0);
        line(panel, "Explore the buildings to learn about skills, experience and projects.");
        for landmark in LANDMARKS.iter() {
            panel.spawn(Node {
                flex_direction: FlexDirection::Row,
                align_items: AlignItems::Center,
                column_gap: Val::Px(8.0),
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            }).with_children(|row| {
                row.spawn((
                    Node {
                        width: Val::Px(10.0),
                        height: Val::Px(10.0),
                        ..default()
                    },
                    BackgroundColor(swatch_color(landmark.category, day_night.theme)),
                    LegendSwatch(landmark.category),
                ));
                line(row, &format!("{} - {}", compass(landmark.x, landmark.z), landmark.name));
            });
        }
        spawn_button(panel, "CLOSE LEGEND", OverlayButton(Overlay::Legend));
    });

    commands.spawn(overlay_root(Overlay::Controls)).with_children(|panel| {
        heading(panel, "Controls", 20.0);
        for (section, entries) in CONTROLS {
            heading(panel, section, 15.0);
            for entry in entries {
                line(panel, entry);
            }
        }
        spawn_button(panel, "CLOSE CONTROLS", OverlayButton(Overlay::Controls));
    });
}

pub fn handle_overlay_buttons(
    mut hud: ResMut<HudState>,
    interactions: Query<(&Interaction, &OverlayButton), Changed<Interaction>>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction == Interaction::Pressed {
            hud.overlay = Overlay::toggle(hud.overlay, button.0);
        }
    }
}

pub fn update_overlays(hud: Res<HudState>, mut panels: Query<(&OverlayPanel, &mut Node)>) {
    for (panel, mut node) in panels.iter_mut() {
        let display = if hud.overlay == Some(panel.0) { Display::Flex } else { Display::None };
        if node.display != display {
            node.display = display;
        }
    }
}

/// Keep legend chips in step with the mini-map palette.
pub fn recolor_legend(
    day_night: Res<DayNight>,
    mut swatches: Query<(&LegendSwatch, &mut BackgroundColor)>,
) {
    if !day_night.is_changed() {
        return;
    }
    for (swatch, mut color) in swatches.iter_mut() {
        color.0 = swatch_color(swatch.0, day_night.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_toggle() {
        assert_eq!(Overlay::toggle(None, Overlay::Legend), Some(Overlay::Legend));
        assert_eq!(Overlay::toggle(Some(Overlay::Legend), Overlay::Legend), None);
        // Opening one replaces the other
        assert_eq!(Overlay::toggle(Some(Overlay::Legend), Overlay::Controls), Some(Overlay::Controls));
    }

    #[test]
    fn test_compass_labels() {
        assert_eq!(compass(0.0, 0.0), "Center");
        assert_eq!(compass(0.0, -50.0), "North");
        assert_eq!(compass(0.0, 50.0), "South");
        assert_eq!(compass(-50.0, 0.0), "West");
        assert_eq!(compass(-50.0, -50.0), "Northwest");
        assert_eq!(compass(50.0, 50.0), "Southeast");
    }

    #[test]
    fn test_legend_directions_for_hall_and_gate() {
        let hall = LANDMARKS.iter().find(|l| l.id == "konohaVillage").unwrap();
        assert_eq!(compass(hall.x, hall.z), "Center");
        let gate = LANDMARKS.iter().find(|l| l.id == "gate").unwrap();
        assert_eq!(compass(gate.x, gate.z), "North");
    }

    #[test]
    fn test_controls_list_inverted_walk_keys() {
        let (_, movement) = CONTROLS[0];
        assert!(movement.contains(&"W - Move Backward"));
        assert!(movement.contains(&"S - Move Forward"));
    }
}
