//! Heads-up display: speed, altitude above ground, stamina, capture state.
//!
//! Pure reader of the [`Metrics`] snapshot; the tick system is the only
//! writer, so the HUD always shows the latest complete frame.

use bevy::prelude::*;
use sim::movement::SPRINT_MIN_STAMINA;
use sim::Metrics;

use super::styles::*;

#[derive(Component)]
struct SpeedText;

#[derive(Component)]
struct AltitudeText;

#[derive(Component)]
struct StaminaFill;

#[derive(Component)]
struct CaptureText;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud);
        app.add_systems(
            Update,
            (update_readouts, update_stamina_bar, update_capture_text),
        );
    }
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            BackgroundColor(HUD_PANEL),
            BorderRadius::all(Val::Px(4.0)),
            // Never intercept the capture click.
            Pickable::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                SpeedText,
                Text::new("SPD   0.0 m/s"),
                hud_text_style(),
                TextColor(TEXT_COLOR),
            ));
            parent.spawn((
                AltitudeText,
                Text::new("ALT   0.0 m"),
                hud_text_style(),
                TextColor(TEXT_COLOR),
            ));

            // Stamina bar: fixed track, fill width follows the snapshot.
            parent
                .spawn((
                    Node {
                        width: Val::Px(180.0),
                        height: Val::Px(10.0),
                        ..default()
                    },
                    BackgroundColor(BAR_TRACK),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        StaminaFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(STAMINA_OK),
                    ));
                });

            parent.spawn((
                CaptureText,
                Text::new("RELEASED"),
                hud_text_style(),
                TextColor(TEXT_MUTED),
            ));
        });
}

fn update_readouts(
    metrics: Res<Metrics>,
    mut speed_query: Query<&mut Text, With<SpeedText>>,
    mut altitude_query: Query<&mut Text, (With<AltitudeText>, Without<SpeedText>)>,
) {
    if let Ok(mut text) = speed_query.single_mut() {
        text.0 = format!("SPD {:>5.1} m/s", metrics.speed);
    }
    if let Ok(mut text) = altitude_query.single_mut() {
        text.0 = format!("ALT {:>5.1} m", metrics.altitude);
    }
}

fn update_stamina_bar(
    metrics: Res<Metrics>,
    mut fill_query: Query<(&mut Node, &mut BackgroundColor), With<StaminaFill>>,
) {
    let Ok((mut node, mut color)) = fill_query.single_mut() else {
        return;
    };
    node.width = Val::Percent(metrics.stamina.clamp(0.0, 100.0));
    *color = if metrics.stamina <= SPRINT_MIN_STAMINA {
        BackgroundColor(STAMINA_LOW)
    } else {
        BackgroundColor(STAMINA_OK)
    };
}

fn update_capture_text(
    metrics: Res<Metrics>,
    mut capture_query: Query<(&mut Text, &mut TextColor), With<CaptureText>>,
) {
    let Ok((mut text, mut color)) = capture_query.single_mut() else {
        return;
    };
    if metrics.captured {
        text.0 = "CAPTURED".to_string();
        *color = TextColor(TEXT_COLOR);
    } else {
        text.0 = "RELEASED".to_string();
        *color = TextColor(TEXT_MUTED);
    }
}
