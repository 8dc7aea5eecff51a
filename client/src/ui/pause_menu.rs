//! Pause overlay shown while the view is released.
//!
//! Doubles as the start screen: the state machine begins in `Paused`, so the
//! first thing the player sees is this overlay on top of the live scene.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::styles::*;
use crate::states::GameState;

pub struct PauseMenuPlugin;

impl Plugin for PauseMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Paused), spawn_pause_menu);
        app.add_systems(OnExit(GameState::Paused), despawn_pause_menu);
        app.add_systems(
            Update,
            (button_interactions, handle_pause_actions).run_if(in_state(GameState::Paused)),
        );
    }
}

/// Marker for the pause menu root
#[derive(Component)]
struct PauseMenuRoot;

/// Pause menu button actions
#[derive(Component, Clone, Copy)]
enum PauseButton {
    Roam,
    Quit,
}

fn spawn_pause_menu(mut commands: Commands) {
    commands
        .spawn((
            PauseMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(OVERLAY_BACKDROP),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("OVERLAND"),
                title_text_style(),
                TextColor(TEXT_COLOR),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_button(parent, "ROAM", PauseButton::Roam);
            spawn_button(parent, "QUIT", PauseButton::Quit);

            parent.spawn((
                Text::new("Click to capture the mouse - WASD move, Shift sprint, Ctrl crouch, Space jump, Esc releases"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_MUTED),
                Node {
                    margin: UiRect::top(Val::Px(30.0)),
                    ..default()
                },
            ));
        });
}

fn spawn_button(parent: &mut ChildSpawnerCommands<'_>, text: &str, action: PauseButton) {
    parent
        .spawn((
            Button,
            action,
            button_style(),
            BackgroundColor(BUTTON_NORMAL),
            BorderRadius::all(Val::Px(4.0)),
        ))
        .with_children(|btn| {
            btn.spawn((Text::new(text), button_text_style(), TextColor(TEXT_COLOR)));
        });
}

fn despawn_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

fn button_interactions(
    mut buttons: Query<(&Interaction, &mut BackgroundColor), (Changed<Interaction>, With<Button>)>,
) {
    for (interaction, mut bg_color) in buttons.iter_mut() {
        *bg_color = match interaction {
            Interaction::Pressed => BackgroundColor(BUTTON_PRESSED),
            Interaction::Hovered => BackgroundColor(BUTTON_HOVERED),
            Interaction::None => BackgroundColor(BUTTON_NORMAL),
        };
    }
}

fn handle_pause_actions(
    buttons: Query<(&Interaction, &PauseButton), Changed<Interaction>>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: MessageWriter<AppExit>,
) {
    for (interaction, action) in buttons.iter() {
        if *interaction == Interaction::Pressed {
            match action {
                PauseButton::Roam => {
                    next_state.set(GameState::Roaming);
                }
                PauseButton::Quit => {
                    info!("Quitting");
                    exit.write(AppExit::Success);
                }
            }
        }
    }
}
