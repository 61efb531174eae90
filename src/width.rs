//! Text measurement for the layout engine.
//!
//! The engine only needs a deterministic, side-effect free `&str -> width`
//! mapping. `CellMeasure` derives one from the terminal display width of the
//! label so the crate works without a font backend.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    let clean = strip_ansi_escapes::strip(text);
    let clean_str = String::from_utf8_lossy(&clean);
    unicode_width::UnicodeWidthStr::width(&*clean_str)
}

/// Measures the rendered width of a label.
///
/// Implementations must return the same width for the same label every time,
/// or placement and content height drift apart.
pub trait TextMeasure: Send + Sync {
    fn measure_width(&self, label: &str) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> f32 + Send + Sync,
{
    fn measure_width(&self, label: &str) -> f32 {
        self(label)
    }
}

/// Fixed pixel width per display cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMeasure {
    pub px_per_cell: f32,
}

impl CellMeasure {
    pub const fn new(px_per_cell: f32) -> Self {
        Self { px_per_cell }
    }
}

impl Default for CellMeasure {
    fn default() -> Self {
        Self { px_per_cell: 6.0 }
    }
}

impl TextMeasure for CellMeasure {
    fn measure_width(&self, label: &str) -> f32 {
        display_width(label) as f32 * self.px_per_cell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_ignores_ansi_sequences() {
        assert_eq!(display_width("\x1b[31mRivulet\x1b[0m"), 7);
    }

    #[test]
    fn wide_glyphs_take_two_cells() {
        assert_eq!(display_width("猫"), 2);
    }

    #[test]
    fn cell_measure_scales_by_cell_width() {
        let measure = CellMeasure::new(5.0);
        assert_eq!(measure.measure_width("Monk"), 20.0);
    }

    #[test]
    fn closures_measure_labels() {
        let measure = |label: &str| label.len() as f32 * 2.0;
        assert_eq!(measure.measure_width("Hunter"), 12.0);
    }
}
