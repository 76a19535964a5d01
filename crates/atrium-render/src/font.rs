//! Font descriptions.
//!
//! A [`Font`] names the styling a host's text stack should use when measuring
//! and drawing a run of text. It never references font data directly; the
//! renderer resolves the description against whatever glyph source it owns.

/// A font family selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FontFamily {
    /// A specific font family by name.
    Name(String),
    /// Generic serif family.
    Serif,
    /// Generic sans-serif family.
    #[default]
    SansSerif,
    /// Generic monospace family.
    Monospace,
}

/// A font weight on the standard 100-900 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Light weight (300).
    pub const LIGHT: Self = Self(300);
    /// Normal weight (400).
    pub const NORMAL: Self = Self(400);
    /// Medium weight (500).
    pub const MEDIUM: Self = Self(500);
    /// Bold weight (700).
    pub const BOLD: Self = Self(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::NORMAL
    }
}

/// A font slant style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    /// Normal upright style.
    #[default]
    Normal,
    /// Italic style.
    Italic,
}

/// A complete font specification: family, size, weight, and slant.
///
/// # Example
///
/// ```
/// use atrium_render::{Font, FontFamily, FontWeight};
///
/// let body = Font::new(FontFamily::SansSerif, 14.0);
/// let heading = body.with_size(20.0).with_weight(FontWeight::BOLD);
/// assert_eq!(heading.size(), 20.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    family: FontFamily,
    size: f32,
    weight: FontWeight,
    style: FontStyle,
}

impl Font {
    /// Create a new font with the given family and size.
    pub fn new(family: FontFamily, size: f32) -> Self {
        Self {
            family,
            size,
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    /// Get the font family.
    pub fn family(&self) -> &FontFamily {
        &self.family
    }

    /// Get the font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Get the font weight.
    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Get the font style.
    pub fn style(&self) -> FontStyle {
        self.style
    }

    /// Create a copy of this font with a different size.
    pub fn with_size(&self, size: f32) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// Create a copy of this font with a different weight.
    pub fn with_weight(&self, weight: FontWeight) -> Self {
        Self {
            weight,
            ..self.clone()
        }
    }

    /// Create a copy of this font with a different style.
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            style,
            ..self.clone()
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new(FontFamily::SansSerif, 14.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_defaults() {
        let font = Font::default();
        assert_eq!(*font.family(), FontFamily::SansSerif);
        assert_eq!(font.size(), 14.0);
        assert_eq!(font.weight(), FontWeight::NORMAL);
        assert_eq!(font.style(), FontStyle::Normal);
    }

    #[test]
    fn test_font_with_variants() {
        let font = Font::new(FontFamily::Monospace, 12.0)
            .with_weight(FontWeight::BOLD)
            .with_style(FontStyle::Italic);
        assert_eq!(*font.family(), FontFamily::Monospace);
        assert_eq!(font.weight(), FontWeight::BOLD);
        assert_eq!(font.style(), FontStyle::Italic);
        // Original size carried through
        assert_eq!(font.size(), 12.0);
    }

    #[test]
    fn test_weight_ordering() {
        assert!(FontWeight::LIGHT < FontWeight::NORMAL);
        assert!(FontWeight::NORMAL < FontWeight::BOLD);
    }
}
