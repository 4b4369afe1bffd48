use bevy::prelude::*;

/// White text on the dark space backgrounds
pub const LABEL_TEXT: Color = Color::WHITE;

/// Dimmed text for secondary lines
pub const SUBTITLE_TEXT: Color = Color::srgb(0.75, 0.78, 0.85);

/// White text for headers
pub const HEADER_TEXT: Color = Color::WHITE;

/// White text for buttons
pub const BUTTON_TEXT: Color = Color::WHITE;
/// #1d2a4d
pub const BUTTON_BACKGROUND: Color = Color::srgb(0.114, 0.165, 0.302);
/// #33477f
pub const BUTTON_HOVERED_BACKGROUND: Color = Color::srgb(0.200, 0.278, 0.498);
/// #121a30
pub const BUTTON_PRESSED_BACKGROUND: Color = Color::srgb(0.071, 0.102, 0.188);

/// #070b17
pub const SPACE_BACKGROUND: Color = Color::srgb(0.027, 0.043, 0.090);
