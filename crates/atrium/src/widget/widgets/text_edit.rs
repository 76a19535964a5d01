//! Shared machinery for the text-editing widgets.
//!
//! [`TextBox`](super::TextBox) and [`TextArea`](super::TextArea) both keep a
//! byte-indexed buffer with every index on a `char` boundary. The helpers
//! here translate between pixels and indices by scanning cumulative measured
//! prefix widths, move across chars, words, and lines, and decide which
//! characters a widget accepts.

use atrium_render::{Font, TextMeasure};
use unicode_segmentation::UnicodeSegmentation;

use crate::input::{Key, KeyboardModifiers};

// =============================================================================
// Character Acceptance
// =============================================================================

/// Which typed or pasted characters a text widget accepts.
///
/// Letters and digits have independent toggles. Everything else printable is
/// a "special": those consult an allow-list when one is set, and are all
/// accepted when it is unset. Control characters are never accepted here;
/// newline handling is the caller's concern.
#[derive(Debug, Clone, Default)]
pub struct CharFilter {
    /// Reject alphabetic characters when set.
    no_letters: bool,

    /// Reject numeric characters when set.
    no_digits: bool,

    /// Allow-list for special characters. `None` allows all of them.
    specials: Option<String>,
}

impl CharFilter {
    /// A filter that accepts everything printable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether alphabetic characters are accepted.
    pub fn set_letters(&mut self, allow: bool) {
        self.no_letters = !allow;
    }

    /// Set whether numeric characters are accepted.
    pub fn set_digits(&mut self, allow: bool) {
        self.no_digits = !allow;
    }

    /// Restrict special characters to the given set, or lift the
    /// restriction with `None`.
    pub fn set_specials(&mut self, specials: Option<&str>) {
        self.specials = specials.map(str::to_owned);
    }

    /// Check whether a single character passes the filter.
    pub fn accepts(&self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if c.is_alphabetic() {
            return !self.no_letters;
        }
        if c.is_numeric() {
            return !self.no_digits;
        }
        match &self.specials {
            Some(list) => list.contains(c),
            None => true,
        }
    }

    /// The character a key press inserts, if any.
    ///
    /// Shifted digit keys try their shifted symbol first; when the symbol is
    /// filtered out but digits are allowed, they fall through to the plain
    /// digit.
    pub fn char_for_key(&self, key: Key, modifiers: KeyboardModifiers) -> Option<char> {
        if modifiers.control || modifiers.alt {
            return None;
        }
        if modifiers.shift {
            let c = key.shifted_char()?;
            if self.accepts(c) {
                return Some(c);
            }
            if key.is_digit() {
                let digit = key.unshifted_char()?;
                if self.accepts(digit) {
                    return Some(digit);
                }
            }
            return None;
        }
        key.unshifted_char().filter(|&c| self.accepts(c))
    }

    /// Filter pasted text down to acceptable characters.
    ///
    /// `\r\n` and lone `\r` normalize to `\n`, kept only when
    /// `allow_newlines` is set.
    pub fn filter_text(&self, text: &str, allow_newlines: bool) -> String {
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\r' {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if allow_newlines {
                    out.push('\n');
                }
            } else if c == '\n' {
                if allow_newlines {
                    out.push('\n');
                }
            } else if self.accepts(c) {
                out.push(c);
            }
        }
        out
    }
}

// =============================================================================
// Index Movement
// =============================================================================

/// The index one char left of `i`, stopping at 0.
pub(crate) fn prev_char(text: &str, i: usize) -> usize {
    text[..i].chars().next_back().map_or(0, |c| i - c.len_utf8())
}

/// The index one char right of `i`, stopping at the end.
pub(crate) fn next_char(text: &str, i: usize) -> usize {
    text[i..].chars().next().map_or(i, |c| i + c.len_utf8())
}

fn is_word_segment(segment: &str) -> bool {
    segment.chars().any(|c| !c.is_whitespace())
}

/// The start of the word left of `i`, or 0.
pub(crate) fn prev_word(text: &str, i: usize) -> usize {
    text.split_word_bound_indices()
        .filter(|(start, segment)| *start < i && is_word_segment(segment))
        .map(|(start, _)| start)
        .last()
        .unwrap_or(0)
}

/// The start of the word right of `i`, or the end of the buffer.
pub(crate) fn next_word(text: &str, i: usize) -> usize {
    text.split_word_bound_indices()
        .find(|(start, segment)| *start > i && is_word_segment(segment))
        .map(|(start, _)| start)
        .unwrap_or(text.len())
}

/// The word-bound segment containing `i`, for double-click selection.
pub(crate) fn word_range(text: &str, i: usize) -> (usize, usize) {
    for (start, segment) in text.split_word_bound_indices() {
        let end = start + segment.len();
        if i < end || (i == end && end == text.len()) {
            return (start, end);
        }
    }
    (text.len(), text.len())
}

// =============================================================================
// Line Boundaries
// =============================================================================

/// The index just after the previous `\n`, or 0.
pub(crate) fn line_start(text: &str, i: usize) -> usize {
    text[..i].rfind('\n').map_or(0, |p| p + 1)
}

/// The index of the next `\n`, or the end of the buffer.
pub(crate) fn line_end(text: &str, i: usize) -> usize {
    text[i..].find('\n').map_or(text.len(), |p| i + p)
}

// =============================================================================
// Pixel Mapping
// =============================================================================

/// Measured width of `line[..end]`.
pub(crate) fn prefix_width(
    measure: &dyn TextMeasure,
    font: &Font,
    line: &str,
    end: usize,
) -> f32 {
    measure.measure(font, &line[..end]).width
}

/// The char boundary in `line` nearest to pixel offset `x`.
///
/// Scans cumulative prefix widths; a position inside a glyph resolves to
/// whichever boundary is nearer (ties past the half-glyph point go right).
pub(crate) fn index_at_x(measure: &dyn TextMeasure, font: &Font, line: &str, x: f32) -> usize {
    if x <= 0.0 {
        return 0;
    }
    let mut before = 0.0;
    for (start, c) in line.char_indices() {
        let after = prefix_width(measure, font, line, start + c.len_utf8());
        if x < before + (after - before) / 2.0 {
            return start;
        }
        before = after;
    }
    line.len()
}

/// Adjust a scroll offset so `target` lies inside the padded view.
///
/// Offsets only move when the target has left `[offset + padding,
/// offset + view - padding]`; they never go negative.
pub(crate) fn reveal_offset(offset: f32, target: f32, view: f32, padding: f32) -> f32 {
    let pad = padding.min(view / 2.0);
    if target < offset + pad {
        (target - pad).max(0.0)
    } else if target > offset + view - pad {
        target - view + pad
    } else {
        offset
    }
}

#[cfg(test)]
mod tests {
    use atrium_render::FixedMetrics;

    use super::*;

    #[test]
    fn test_filter_toggles() {
        let mut filter = CharFilter::new();
        assert!(filter.accepts('a'));
        assert!(filter.accepts('7'));
        assert!(filter.accepts('@'));
        assert!(!filter.accepts('\u{7}'));

        filter.set_letters(false);
        assert!(!filter.accepts('a'));
        assert!(filter.accepts('7'));

        filter.set_specials(Some(".-"));
        assert!(filter.accepts('.'));
        assert!(filter.accepts('-'));
        assert!(!filter.accepts('@'));
    }

    #[test]
    fn test_shifted_digit_falls_through() {
        let mut filter = CharFilter::new();
        filter.set_letters(false);
        filter.set_specials(Some(""));

        // '@' is filtered out, digits are not: Shift+2 produces '2'.
        assert_eq!(
            filter.char_for_key(Key::Digit2, KeyboardModifiers::SHIFT),
            Some('2'),
        );

        filter.set_specials(Some("@"));
        assert_eq!(
            filter.char_for_key(Key::Digit2, KeyboardModifiers::SHIFT),
            Some('@'),
        );

        filter.set_digits(false);
        filter.set_specials(Some(""));
        assert_eq!(filter.char_for_key(Key::Digit2, KeyboardModifiers::SHIFT), None);
    }

    #[test]
    fn test_filter_text_strips_and_normalizes() {
        let filter = CharFilter::new();
        assert_eq!(filter.filter_text("a\r\nb\rc\x07d", true), "a\nb\ncd");
        assert_eq!(filter.filter_text("a\r\nb\rc", false), "abc");
    }

    #[test]
    fn test_char_steps_respect_boundaries() {
        let text = "aé b";
        let after_a = next_char(text, 0);
        assert_eq!(after_a, 1);
        let after_e = next_char(text, after_a);
        assert_eq!(after_e, 1 + 'é'.len_utf8());
        assert_eq!(prev_char(text, after_e), 1);
        assert_eq!(prev_char(text, 0), 0);
        assert_eq!(next_char(text, text.len()), text.len());
    }

    #[test]
    fn test_word_navigation() {
        let text = "one  two three";
        assert_eq!(next_word(text, 0), 5);
        assert_eq!(next_word(text, 5), 9);
        assert_eq!(next_word(text, 10), text.len());
        assert_eq!(prev_word(text, text.len()), 9);
        assert_eq!(prev_word(text, 9), 5);
        assert_eq!(prev_word(text, 2), 0);
    }

    #[test]
    fn test_word_range_for_double_click() {
        let text = "hello world";
        assert_eq!(word_range(text, 2), (0, 5));
        assert_eq!(word_range(text, 7), (6, 11));
        // On the space between words.
        assert_eq!(word_range(text, 5), (5, 6));
    }

    #[test]
    fn test_line_boundaries() {
        let text = "ab\ncde\nf";
        assert_eq!(line_start(text, 1), 0);
        assert_eq!(line_end(text, 1), 2);
        assert_eq!(line_start(text, 4), 3);
        assert_eq!(line_end(text, 4), 6);
        assert_eq!(line_start(text, 8), 7);
        assert_eq!(line_end(text, 8), 8);
    }

    #[test]
    fn test_index_at_x_half_glyph_tie_break() {
        // FixedMetrics: every glyph advances 7px.
        let metrics = FixedMetrics::default();
        let font = Font::default();
        assert_eq!(index_at_x(&metrics, &font, "abc", -1.0), 0);
        assert_eq!(index_at_x(&metrics, &font, "abc", 3.4), 0);
        assert_eq!(index_at_x(&metrics, &font, "abc", 3.6), 1);
        assert_eq!(index_at_x(&metrics, &font, "abc", 17.4), 2);
        assert_eq!(index_at_x(&metrics, &font, "abc", 17.6), 3);
        assert_eq!(index_at_x(&metrics, &font, "abc", 100.0), 3);
    }

    #[test]
    fn test_reveal_offset_moves_only_when_outside() {
        // View 100px, padding 4.
        assert_eq!(reveal_offset(0.0, 50.0, 100.0, 4.0), 0.0);
        // Past the right edge: scroll so the target sits at the padded edge.
        assert_eq!(reveal_offset(0.0, 120.0, 100.0, 4.0), 24.0);
        // Back inside: unchanged.
        assert_eq!(reveal_offset(24.0, 120.0, 100.0, 4.0), 24.0);
        // Left of the view: scroll back, clamped at zero.
        assert_eq!(reveal_offset(24.0, 10.0, 100.0, 4.0), 6.0);
        assert_eq!(reveal_offset(24.0, 2.0, 100.0, 4.0), 0.0);
    }
}
