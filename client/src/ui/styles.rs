//! Shared UI styles - cool highland palette

use bevy::prelude::*;

/// Translucent backdrop behind the pause overlay
pub const OVERLAY_BACKDROP: Color = Color::srgba(0.02, 0.04, 0.07, 0.65);

/// Translucent panel behind the HUD readouts
pub const HUD_PANEL: Color = Color::srgba(0.03, 0.05, 0.08, 0.45);

/// Button colors - dark slate with a cold highlight
pub const BUTTON_NORMAL: Color = Color::srgb(0.09, 0.12, 0.16);
pub const BUTTON_HOVERED: Color = Color::srgb(0.14, 0.20, 0.26);
pub const BUTTON_PRESSED: Color = Color::srgb(0.20, 0.32, 0.42);

/// Text colors
pub const TEXT_COLOR: Color = Color::srgb(0.88, 0.92, 0.95);
pub const TEXT_MUTED: Color = Color::srgb(0.45, 0.52, 0.58);

/// Stamina bar
pub const BAR_TRACK: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);
pub const STAMINA_OK: Color = Color::srgb(0.35, 0.75, 0.45);
pub const STAMINA_LOW: Color = Color::srgb(0.85, 0.35, 0.25);

/// Standard button style
pub fn button_style() -> Node {
    Node {
        width: Val::Px(260.0),
        height: Val::Px(50.0),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        margin: UiRect::all(Val::Px(8.0)),
        border: UiRect::all(Val::Px(2.0)),
        ..default()
    }
}

/// Standard button text style
pub fn button_text_style() -> TextFont {
    TextFont {
        font_size: 20.0,
        ..default()
    }
}

/// Title text style
pub fn title_text_style() -> TextFont {
    TextFont {
        font_size: 64.0,
        ..default()
    }
}

/// HUD readout text style
pub fn hud_text_style() -> TextFont {
    TextFont {
        font_size: 16.0,
        ..default()
    }
}
