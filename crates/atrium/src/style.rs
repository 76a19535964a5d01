//! Theme and styling types.
//!
//! Widgets read every color, font, and spacing value they paint with from a
//! [`Theme`] owned by the desktop; nothing is hard-coded in the paint
//! methods. Swapping the theme restyles the whole tree on the next draw.
//!
//! # Example
//!
//! ```
//! use atrium::style::Theme;
//!
//! let theme = Theme::light();
//! assert_ne!(theme.back.normal, Theme::default().back.normal);
//! ```

use atrium_render::{Color, Font};

/// Horizontal text alignment within a widget's content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align text to the left edge.
    #[default]
    Left,
    /// Center text horizontally.
    Center,
    /// Align text to the right edge.
    Right,
}

/// A color for each interactive widget state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateColors {
    /// Color in the resting state.
    pub normal: Color,
    /// Color while the cursor hovers the widget.
    pub hovered: Color,
    /// Color while a press is held on the widget.
    pub pressed: Color,
    /// Color while a checkable widget is toggled on.
    pub toggled: Color,
}

impl StateColors {
    /// Create state colors with the same color for every state.
    pub fn uniform(color: Color) -> Self {
        Self {
            normal: color,
            hovered: color,
            pressed: color,
            toggled: color,
        }
    }
}

/// Colors, font, and spacing shared by the widget tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Background color per widget state.
    pub back: StateColors,
    /// Text color per widget state.
    pub fore: StateColors,
    /// Background of editable text fields and list rows.
    pub field_back: Color,
    /// Background of selected text and selected rows.
    pub selection: Color,
    /// Caret color in text widgets.
    pub caret: Color,
    /// Border color for outlined widgets.
    pub border: Color,
    /// Font for all widget text.
    pub font: Font,
    /// Inner padding between a widget's edge and its content, in pixels.
    pub padding: f32,
    /// Default horizontal alignment for widget text.
    pub alignment: Alignment,
}

impl Default for Theme {
    /// The dark theme.
    fn default() -> Self {
        Self {
            back: StateColors {
                normal: Color::from_rgb8(58, 58, 62),
                hovered: Color::from_rgb8(72, 72, 78),
                pressed: Color::from_rgb8(38, 38, 42),
                toggled: Color::from_rgb8(52, 84, 128),
            },
            fore: StateColors {
                normal: Color::from_rgb8(224, 224, 224),
                hovered: Color::from_rgb8(240, 240, 240),
                pressed: Color::from_rgb8(200, 200, 200),
                toggled: Color::from_rgb8(240, 244, 250),
            },
            field_back: Color::from_rgb8(30, 30, 33),
            selection: Color::from_rgb8(52, 84, 128),
            caret: Color::from_rgb8(230, 230, 230),
            border: Color::from_rgb8(96, 96, 102),
            font: Font::default(),
            padding: 4.0,
            alignment: Alignment::Left,
        }
    }
}

impl Theme {
    /// A light theme counterpart to [`Theme::default`].
    pub fn light() -> Self {
        Self {
            back: StateColors {
                normal: Color::from_rgb8(225, 225, 228),
                hovered: Color::from_rgb8(210, 214, 222),
                pressed: Color::from_rgb8(188, 192, 200),
                toggled: Color::from_rgb8(168, 196, 235),
            },
            fore: StateColors {
                normal: Color::from_rgb8(28, 28, 30),
                hovered: Color::from_rgb8(18, 18, 20),
                pressed: Color::from_rgb8(10, 10, 12),
                toggled: Color::from_rgb8(16, 30, 52),
            },
            field_back: Color::from_rgb8(250, 250, 252),
            selection: Color::from_rgb8(168, 196, 235),
            caret: Color::from_rgb8(20, 20, 22),
            border: Color::from_rgb8(140, 140, 148),
            font: Font::default(),
            padding: 4.0,
            alignment: Alignment::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_state_colors() {
        let colors = StateColors::uniform(Color::RED);
        assert_eq!(colors.normal, Color::RED);
        assert_eq!(colors.hovered, Color::RED);
        assert_eq!(colors.pressed, Color::RED);
        assert_eq!(colors.toggled, Color::RED);
    }

    #[test]
    fn test_light_theme_differs_from_dark() {
        let dark = Theme::default();
        let light = Theme::light();
        assert_ne!(dark.back.normal, light.back.normal);
        assert_ne!(dark.fore.normal, light.fore.normal);
    }
}
