//! Font metrics.
//!
//! Glyph rendering is the backend's business; layout only needs sizes.

use std::fmt;

use crate::types::Vec2;

pub trait Font: fmt::Debug {
    /// Size of `text` rendered at `size` pixels.
    fn measure(&self, text: &str, size: f32) -> Vec2;
}

/// Fixed-advance font. Metrics are fractions of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    pub advance: f32,
    pub line_height: f32,
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self {
            advance: 0.6,
            line_height: 1.2,
        }
    }
}

impl Font for MonospaceFont {
    fn measure(&self, text: &str, size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let (columns, lines) = text
            .split('\n')
            .fold((0usize, 0usize), |(columns, lines), line| {
                (columns.max(line.chars().count()), lines + 1)
            });
        Vec2::new(
            columns as f32 * self.advance * size,
            lines as f32 * self.line_height * size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let font = MonospaceFont {
            advance: 0.5,
            line_height: 1.0,
        };
        assert_eq!(font.measure("", 10.0), Vec2::ZERO);
        assert_eq!(font.measure("abcd", 10.0), Vec2::new(20.0, 10.0));
        assert_eq!(font.measure("ab\nabcdef", 10.0), Vec2::new(30.0, 20.0));
    }
}
