//! UI module - loading screen, HUD, help overlays, info panel and the 2D fallback

use bevy::prelude::*;

use portfolio::village::layout::landmark;
use portfolio::village::{InfoPanel, MiniMap, VillageEventData};

use crate::AppState;
use crate::game::{ToggleView, Village, VillageNotice};

mod minimap;
mod overlays;
mod panels;

pub use overlays::Overlay;

/// How long the "entered" notice stays up, in seconds
const NOTICE_SECS: f32 = 3.0;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<HudState>()
            .add_systems(Startup, panels::setup_info_panel)
            .add_systems(OnEnter(AppState::Loading), setup_loading_ui)
            .add_systems(OnExit(AppState::Loading), cleanup::<LoadingUI>)
            .add_systems(OnEnter(AppState::SceneActive), (
                setup_hud,
                minimap::setup_minimap,
                overlays::setup_overlays,
                panels::setup_touch_controls,
            ))
            .add_systems(OnExit(AppState::SceneActive), (cleanup::<HudUI>, release_joystick))
            .add_systems(OnEnter(AppState::FallbackActive), panels::setup_fallback_ui)
            .add_systems(OnExit(AppState::FallbackActive), cleanup::<panels::FallbackUI>)
            .add_systems(Update, (
                update_loading_ui.run_if(in_state(AppState::Loading)),
                (
                    handle_notices,
                    update_notice,
                    panel_hotkeys,
                    minimap::update_minimap,
                    minimap::handle_marker_clicks,
                    panels::handle_dpad,
                    panels::update_joystick_knob,
                    overlays::handle_overlay_buttons,
                    overlays::update_overlays,
                    overlays::recolor_legend,
                ).run_if(in_state(AppState::SceneActive)),
                panels::handle_card_clicks.run_if(in_state(AppState::FallbackActive)),
                handle_view_buttons,
                panels::update_info_panel,
                panels::handle_close_button,
            ));
    }
}

// ============================================================================
// RESOURCES
// ============================================================================

/// UI-side view state
#[derive(Resource, Default)]
pub struct HudState {
    pub minimap: MiniMap,
    pub panel: InfoPanel,
    /// Notice text and the time it expires
    pub notice: Option<(String, f32)>,
    /// Open help overlay, if any
    pub overlay: Option<Overlay>,
}

// ============================================================================
// MARKERS
// ============================================================================

/// Loading overlay
#[derive(Component)]
struct LoadingUI;

/// Loading bar fill
#[derive(Component)]
struct ProgressFill;

/// Loading percentage label
#[derive(Component)]
struct ProgressText;

/// Everything shown only while walking
#[derive(Component)]
pub struct HudUI;

/// "Entered ..." banner
#[derive(Component)]
struct NoticeText;

/// Switches between the 3D scene and the 2D cards
#[derive(Component)]
pub struct ViewToggleButton;

// ============================================================================
// LOADING SCREEN
// ============================================================================

fn setup_loading_ui(mut commands: Commands) {
    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
        LoadingUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("LOADING KONOHA VILLAGE"),
            TextFont {
                font_size: 36.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.55, 0.1)),
            Node {
                margin: UiRect::bottom(Val::Px(24.0)),
                ..default()
            },
        ));

        parent.spawn((
            Node {
                width: Val::Px(320.0),
                height: Val::Px(12.0),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor(Color::srgb(1.0, 0.55, 0.1)),
            BackgroundColor(Color::srgb(0.12, 0.12, 0.15)),
        )).with_children(|bar| {
            bar.spawn((
                Node {
                    width: Val::Percent(0.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(Color::srgb(1.0, 0.55, 0.1)),
                ProgressFill,
            ));
        });

        parent.spawn((
            Text::new("0%"),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 0.7, 0.75)),
            Node {
                margin: UiRect::top(Val::Px(12.0)),
                ..default()
            },
            ProgressText,
        ));

        spawn_button(parent, "SWITCH TO 2D VIEW", ViewToggleButton);
    });
}

fn update_loading_ui(
    time: Res<Time>,
    village: Res<Village>,
    mut fill: Query<&mut Node, With<ProgressFill>>,
    mut label: Query<&mut Text, With<ProgressText>>,
) {
    let progress = village.gate.progress(time.elapsed_secs());
    if let Ok(mut node) = fill.get_single_mut() {
        node.width = Val::Percent(progress as f32);
    }
    if let Ok(mut text) = label.get_single_mut() {
        **text = format!("{progress}%");
    }
}

// ============================================================================
// HUD
// ============================================================================

fn setup_hud(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(16.0),
            left: Val::Px(16.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        HudUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("WASD move | drag to look | E info | M map | N day/night | V 2D view"),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        ));

        parent.spawn(Node {
            flex_direction: FlexDirection::Row,
            column_gap: Val::Px(8.0),
            ..default()
        }).with_children(|row| {
            spawn_button(row, "MAP LEGEND", overlays::OverlayButton(Overlay::Legend));
            spawn_button(row, "CONTROLS", overlays::OverlayButton(Overlay::Controls));
            spawn_button(row, "2D VIEW", ViewToggleButton);
        });
    });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(80.0),
            width: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            ..default()
        },
        HudUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.8, 0.3)),
            NoticeText,
        ));
    });
}

/// Zone entry opens the info panel and shows a banner.
fn handle_notices(
    time: Res<Time>,
    mut hud: ResMut<HudState>,
    mut notices: EventReader<VillageNotice>,
) {
    let now = time.elapsed_secs();
    for VillageNotice(event) in notices.read() {
        if let VillageEventData::LocationEntered { zone_id } = &event.data {
            let zone_id = *zone_id;
            let name = landmark(zone_id).map_or(zone_id, |l| l.name);
            hud.notice = Some((format!("Entered {name}"), now + NOTICE_SECS));
            hud.panel.select(zone_id, now);
        }
    }
}

fn update_notice(
    time: Res<Time>,
    mut hud: ResMut<HudState>,
    mut text: Query<&mut Text, With<NoticeText>>,
) {
    let Ok(mut text) = text.get_single_mut() else {
        return;
    };
    let now = time.elapsed_secs();
    if hud.notice.as_ref().is_some_and(|(_, until)| *until < now) {
        hud.notice = None;
        text.clear();
        return;
    }
    if let Some((message, _)) = &hud.notice {
        if **text != *message {
            **text = message.clone();
        }
    }
}

/// `E` opens the panel for the current zone, `Escape` closes it, `M`
/// resizes the map.
fn panel_hotkeys(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    village: Res<Village>,
    mut hud: ResMut<HudState>,
) {
    if keyboard.just_pressed(KeyCode::KeyE) {
        if let Some(zone) = village.controller.current_location() {
            hud.panel.select(zone, time.elapsed_secs());
        }
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        hud.panel.close();
    }
    if keyboard.just_pressed(KeyCode::KeyM) {
        hud.minimap.toggle_expanded();
    }
}

fn handle_view_buttons(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ViewToggleButton>)>,
    mut toggles: EventWriter<ToggleView>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed {
            toggles.send(ToggleView);
        }
    }
}

/// Drop any joystick touch or held D-pad direction when leaving the scene.
fn release_joystick(mut village: ResMut<Village>, mut hud: ResMut<HudState>) {
    village.joystick.reset();
    hud.overlay = None;
}

fn cleanup<T: Component>(
    mut commands: Commands,
    query: Query<Entity, With<T>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

/// Spawn a labelled button carrying `marker`.
pub fn spawn_button(parent: &mut ChildBuilder, text: &str, marker: impl Component) {
    parent.spawn((
        Button,
        Node {
            margin: UiRect::top(Val::Px(12.0)),
            padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BorderColor(Color::srgb(1.0, 0.55, 0.1)),
        BackgroundColor(Color::srgba(0.1, 0.1, 0.12, 0.85)),
        marker,
    )).with_children(|parent| {
        parent.spawn((
            Text::new(text),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::WHITE),
        ));
    });
}
