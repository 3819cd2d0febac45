//! Info panel, 2D fallback cards and the on-screen touch controls

use bevy::prelude::*;

use portfolio::village::layout::LOCATION_INFO;
use portfolio::village::{FallbackReason, InputEvent, SceneMode};

use crate::game::{SceneInput, Village, DPAD_SIZE, JOYSTICK_SIZE, PAD_MARGIN};
use super::{spawn_button, HudState, HudUI, ViewToggleButton};

/// Characters of description shown on a fallback card
const CARD_PREVIEW_CHARS: usize = 150;

// ============================================================================
// INFO PANEL
// ============================================================================

#[derive(Component)]
pub struct InfoPanelRoot;

#[derive(Component)]
pub struct InfoTitle;

#[derive(Component)]
pub struct InfoBody;

#[derive(Component)]
pub struct InfoSkills;

#[derive(Component)]
pub struct CloseButton;

/// Panel lives for the whole session and is shown over either view.
pub fn setup_info_panel(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(16.0),
            bottom: Val::Px(16.0),
            width: Val::Px(380.0),
            padding: UiRect::all(Val::Px(16.0)),
            flex_direction: FlexDirection::Column,
            border: UiRect::all(Val::Px(2.0)),
            display: Display::None,
            ..default()
        },
        BorderColor(Color::srgb(1.0, 0.55, 0.1)),
        BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.92)),
        GlobalZIndex(10),
        InfoPanelRoot,
    )).with_children(|parent| {
        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.55, 0.1)),
            InfoTitle,
        ));
        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(Color::srgb(0.85, 0.85, 0.9)),
            Node {
                margin: UiRect::vertical(Val::Px(10.0)),
                ..default()
            },
            InfoBody,
        ));
        parent.spawn((
            Text::new(""),
            TextFont {
                font_size: 13.0,
                ..default()
            },
            TextColor(Color::srgb(0.5, 0.85, 0.6)),
            InfoSkills,
        ));
        spawn_button(parent, "CLOSE", CloseButton);
    });
}

pub fn update_info_panel(
    time: Res<Time>,
    mut hud: ResMut<HudState>,
    mut root: Query<&mut Node, With<InfoPanelRoot>>,
    mut title: Query<&mut Text, (With<InfoTitle>, Without<InfoBody>, Without<InfoSkills>)>,
    mut body: Query<&mut Text, (With<InfoBody>, Without<InfoTitle>, Without<InfoSkills>)>,
    mut skills: Query<&mut Text, (With<InfoSkills>, Without<InfoTitle>, Without<InfoBody>)>,
) {
    if hud.panel.tick(time.elapsed_secs()) {
        debug!(location = ?hud.panel.active(), "Info panel shown");
    }

    let Ok(mut node) = root.get_single_mut() else {
        return;
    };

    let Some(info) = hud.panel.content() else {
        if node.display != Display::None {
            node.display = Display::None;
        }
        return;
    };

    node.display = Display::Flex;
    if let Ok(mut text) = title.get_single_mut() {
        if text.as_str() != info.title {
            **text = info.title.to_string();
            if let Ok(mut text) = body.get_single_mut() {
                **text = info.description.to_string();
            }
            if let Ok(mut text) = skills.get_single_mut() {
                **text = info.skills.join("  ·  ");
            }
        }
    }
}

pub fn handle_close_button(
    mut hud: ResMut<HudState>,
    interactions: Query<&Interaction, (Changed<Interaction>, With<CloseButton>)>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed {
            hud.panel.close();
        }
    }
}

// ============================================================================
// 2D FALLBACK
// ============================================================================

/// Fallback view root
#[derive(Component)]
pub struct FallbackUI;

/// Card for one location
#[derive(Component)]
pub struct LocationCard(pub &'static str);

fn fallback_heading(mode: SceneMode) -> &'static str {
    match mode {
        SceneMode::FallbackActive(FallbackReason::LoadFailed) => "The 3D village could not be loaded.",
        SceneMode::FallbackActive(FallbackReason::Timeout) => "The 3D village took too long to load.",
        SceneMode::FallbackActive(FallbackReason::RuntimeError) => "The 3D village stopped unexpectedly.",
        _ => "Exploring in 2D.",
    }
}

pub fn setup_fallback_ui(mut commands: Commands, village: Res<Village>) {
    let heading = fallback_heading(village.gate.mode());

    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            padding: UiRect::all(Val::Px(24.0)),
            overflow: Overflow::scroll_y(),
            ..default()
        },
        BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
        FallbackUI,
    )).with_children(|parent| {
        parent.spawn((
            Text::new("KONOHA VILLAGE"),
            TextFont {
                font_size: 40.0,
                ..default()
            },
            TextColor(Color::srgb(1.0, 0.55, 0.1)),
        ));
        parent.spawn((
            Text::new(heading),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 0.7, 0.75)),
            Node {
                margin: UiRect::vertical(Val::Px(8.0)),
                ..default()
            },
        ));

        spawn_button(parent, "TRY 3D VIEW", ViewToggleButton);

        parent.spawn(Node {
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::Wrap,
            justify_content: JustifyContent::Center,
            margin: UiRect::top(Val::Px(16.0)),
            ..default()
        }).with_children(|grid| {
            for info in LOCATION_INFO.iter() {
                grid.spawn((
                    Button,
                    Node {
                        width: Val::Px(300.0),
                        margin: UiRect::all(Val::Px(8.0)),
                        padding: UiRect::all(Val::Px(12.0)),
                        flex_direction: FlexDirection::Column,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BorderColor(Color::srgb(0.4, 0.4, 0.45)),
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.13)),
                    LocationCard(info.id),
                )).with_children(|card| {
                    card.spawn((
                        Text::new(info.title),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                    ));
                    card.spawn((
                        Text::new(info.preview(CARD_PREVIEW_CHARS)),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.75, 0.75, 0.8)),
                        Node {
                            margin: UiRect::vertical(Val::Px(6.0)),
                            ..default()
                        },
                    ));
                    card.spawn((
                        Text::new(info.skills.join(" · ")),
                        TextFont {
                            font_size: 12.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.5, 0.85, 0.6)),
                    ));
                });
            }
        });
    });
}

pub fn handle_card_clicks(
    time: Res<Time>,
    mut hud: ResMut<HudState>,
    mut cards: Query<(&Interaction, &LocationCard, &mut BorderColor), Changed<Interaction>>,
) {
    for (interaction, card, mut border) in cards.iter_mut() {
        match *interaction {
            Interaction::Pressed => hud.panel.select(card.0, time.elapsed_secs()),
            Interaction::Hovered => border.0 = Color::srgb(1.0, 0.55, 0.1),
            Interaction::None => border.0 = Color::srgb(0.4, 0.4, 0.45),
        }
    }
}

// ============================================================================
// TOUCH CONTROLS
// ============================================================================

/// Knob diameter on the joystick pad
const KNOB_SIZE: f32 = 64.0;

/// Direction button carrying its key identifier
#[derive(Component)]
pub struct DpadButton(pub &'static str);

/// Joystick knob, offset from the pad center
#[derive(Component)]
pub struct JoystickKnob;

/// Joystick pad bottom-left, D-pad bottom-right.
pub fn setup_touch_controls(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(PAD_MARGIN),
            bottom: Val::Px(PAD_MARGIN),
            width: Val::Px(JOYSTICK_SIZE),
            height: Val::Px(JOYSTICK_SIZE),
            ..default()
        },
        BorderRadius::MAX,
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.2)),
        HudUI,
    )).with_children(|pad| {
        pad.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px((JOYSTICK_SIZE - KNOB_SIZE) / 2.0),
                top: Val::Px((JOYSTICK_SIZE - KNOB_SIZE) / 2.0),
                width: Val::Px(KNOB_SIZE),
                height: Val::Px(KNOB_SIZE),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BorderRadius::MAX,
            BorderColor(Color::srgba(1.0, 1.0, 1.0, 0.5)),
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.3)),
            JoystickKnob,
        ));
    });

    let cell = DPAD_SIZE / 3.0;

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(PAD_MARGIN),
            bottom: Val::Px(PAD_MARGIN),
            width: Val::Px(DPAD_SIZE),
            height: Val::Px(DPAD_SIZE),
            ..default()
        },
        HudUI,
    )).with_children(|pad| {
        for (key, label, col, row) in [
            ("w", "▲", 1.0, 0.0),
            ("a", "◀", 0.0, 1.0),
            ("d", "▶", 2.0, 1.0),
            ("s", "▼", 1.0, 2.0),
        ] {
            pad.spawn((
                Button,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(col * cell),
                    top: Val::Px(row * cell),
                    width: Val::Px(cell),
                    height: Val::Px(cell),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.2)),
                DpadButton(key),
            )).with_children(|button| {
                button.spawn((
                    Text::new(label),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            });
        }
    });
}

/// Held D-pad buttons become synthetic direction keys.
pub fn handle_dpad(
    mut village: ResMut<Village>,
    mut input: ResMut<SceneInput>,
    mut buttons: Query<(&Interaction, &DpadButton, &mut BackgroundColor), Changed<Interaction>>,
) {
    for (interaction, button, mut color) in buttons.iter_mut() {
        let pressed = *interaction == Interaction::Pressed;
        color.0 = if pressed {
            Color::srgba(1.0, 0.55, 0.1, 0.6)
        } else {
            Color::srgba(1.0, 1.0, 1.0, 0.2)
        };
        let flags = village.joystick.press(button.0, pressed);
        input.apply(InputEvent::Directions(flags));
    }
}

/// Follow the joystick knob; highlight it while a touch owns it.
pub fn update_joystick_knob(
    village: Res<Village>,
    mut knobs: Query<(&mut Node, &mut BorderColor), With<JoystickKnob>>,
) {
    let Ok((mut node, mut border)) = knobs.get_single_mut() else {
        return;
    };
    let (dx, dy) = village.joystick.knob();
    let rest = (JOYSTICK_SIZE - KNOB_SIZE) / 2.0;
    node.left = Val::Px(rest + dx);
    node.top = Val::Px(rest + dy);
    border.0 = if village.joystick.is_active() {
        Color::srgb(1.0, 0.55, 0.1)
    } else {
        Color::srgba(1.0, 1.0, 1.0, 0.5)
    };
}
