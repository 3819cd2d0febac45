//! Mini-map overlay

use bevy::prelude::*;

use portfolio::village::layout::LANDMARKS;

use crate::game::{DayNight, Village};
use super::{HudState, HudUI};

/// Map frame (top right)
#[derive(Component)]
pub struct MiniMapRoot;

/// Clickable landmark marker
#[derive(Component)]
pub struct MapMarkerButton(pub &'static str);

/// Player arrow
#[derive(Component)]
pub struct PlayerDot;

/// Current zone name under the map
#[derive(Component)]
pub struct MiniMapCaption;

/// Scale bar, shown when expanded
#[derive(Component)]
pub struct ScaleBar;

pub fn setup_minimap(mut commands: Commands, hud: Res<HudState>) {
    let size = hud.minimap.size();

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            right: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            ..default()
        },
        HudUI,
    )).with_children(|parent| {
        parent.spawn((
            Node {
                width: Val::Px(size),
                height: Val::Px(size),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderColor(Color::srgb(1.0, 0.55, 0.1)),
            BackgroundColor(Color::srgba(0.05, 0.08, 0.05, 0.75)),
            MiniMapRoot,
        )).with_children(|map| {
            for landmark in LANDMARKS.iter() {
                map.spawn((
                    Button,
                    Node {
                        position_type: PositionType::Absolute,
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                    MapMarkerButton(landmark.id),
                ));
            }

            map.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Px(6.0),
                    height: Val::Px(6.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(1.0, 0.2, 0.2)),
                PlayerDot,
            ));

            map.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(6.0),
                    left: Val::Px(6.0),
                    width: Val::Px(40.0),
                    height: Val::Px(2.0),
                    display: Display::None,
                    ..default()
                },
                BackgroundColor(Color::WHITE),
                ScaleBar,
            ));
        });

        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                margin: UiRect::top(Val::Px(6.0)),
                ..default()
            },
            MiniMapCaption,
        ));
    });
}

/// Lay out markers and the player arrow from the current snapshot.
pub fn update_minimap(
    village: Res<Village>,
    day_night: Res<DayNight>,
    mut hud: ResMut<HudState>,
    mut root: Query<&mut Node, (With<MiniMapRoot>, Without<MapMarkerButton>, Without<PlayerDot>, Without<ScaleBar>)>,
    mut markers: Query<(&MapMarkerButton, &mut Node, &mut BackgroundColor, &mut Transform), (Without<MiniMapRoot>, Without<PlayerDot>)>,
    mut player: Query<(&mut Node, &mut Transform), (With<PlayerDot>, Without<MiniMapRoot>, Without<MapMarkerButton>)>,
    mut scale: Query<&mut Node, (With<ScaleBar>, Without<MiniMapRoot>, Without<MapMarkerButton>, Without<PlayerDot>)>,
    mut caption: Query<&mut Text, With<MiniMapCaption>>,
) {
    if hud.minimap.theme() != day_night.theme {
        hud.minimap.set_theme(day_night.theme);
    }

    let snapshot = village.controller.state();
    let frame = hud.minimap.render(&snapshot, &LANDMARKS, village.controller.current_location());

    if let Ok(mut node) = root.get_single_mut() {
        node.width = Val::Px(frame.size);
        node.height = Val::Px(frame.size);
    }

    for (button, mut node, mut color, mut transform) in markers.iter_mut() {
        let Some(marker) = frame.markers.iter().find(|m| m.id == button.0) else {
            continue;
        };
        let edge = if marker.active { marker.size * 1.5 } else { marker.size };
        let shift = (edge - marker.size) / 2.0;
        node.left = Val::Px(marker.left - shift);
        node.top = Val::Px(marker.top - shift);
        node.width = Val::Px(edge);
        node.height = Val::Px(edge);
        color.0 = Srgba::hex(marker.color).map(Color::from).unwrap_or(Color::WHITE);
        transform.rotation = Quat::from_rotation_z(-marker.rotation_deg.to_radians());
    }

    if let Ok((mut node, mut transform)) = player.get_single_mut() {
        node.left = Val::Px(frame.player.left);
        node.top = Val::Px(frame.player.top);
        transform.rotation = Quat::from_rotation_z(-frame.player.rotation);
    }

    if let Ok(mut node) = scale.get_single_mut() {
        node.display = if frame.show_scale { Display::Flex } else { Display::None };
    }

    if let Ok(mut text) = caption.get_single_mut() {
        let label = frame.caption.unwrap_or("");
        if text.as_str() != label {
            **text = label.to_string();
        }
    }
}

/// Clicking a marker opens that location's panel.
pub fn handle_marker_clicks(
    time: Res<Time>,
    mut hud: ResMut<HudState>,
    interactions: Query<(&Interaction, &MapMarkerButton), Changed<Interaction>>,
) {
    for (interaction, button) in interactions.iter() {
        if *interaction == Interaction::Pressed {
            hud.panel.select(button.0, time.elapsed_secs());
        }
    }
}
