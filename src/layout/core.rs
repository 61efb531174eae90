use serde::{Deserialize, Serialize};

use crate::catalog::{VariantId, VariantInfo};
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::palette::Rgb;
use crate::runtime::PanelCommand;
use crate::width::TextMeasure;

/// Spacing constants shared by placement and content-height accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutMetrics {
    pub scrollbar_width: f32,
    pub checkbox_size: f32,
    pub line_height: f32,
    pub big_line_height: f32,
    pub big_pad: f32,
    pub small_pad: f32,
    pub sep_pad: f32,
    pub divider_thickness: f32,
    /// Content height reported for a panel with nothing in it.
    pub empty_content_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            scrollbar_width: 20.0,
            checkbox_size: 24.0,
            line_height: 20.0,
            big_line_height: 30.0,
            big_pad: 12.0,
            small_pad: 6.0,
            sep_pad: 18.0,
            divider_thickness: 2.0,
            empty_content_height: 0.0,
        }
    }
}

impl LayoutMetrics {
    /// Parse a (possibly partial) override document; missing keys keep their defaults.
    pub fn from_json_str(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn edge_pad(&self) -> f32 {
        self.small_pad
    }

    pub fn checkbox_line_height(&self) -> f32 {
        self.checkbox_size + self.small_pad
    }

    pub fn queue_token_inset(&self) -> f32 {
        self.edge_pad() + self.sep_pad
    }

    /// Width left for tokens after the scrollbar, both edge pads and `inset`.
    pub fn available_width(&self, panel_width: f32, inset: f32) -> f32 {
        panel_width - self.scrollbar_width - 2.0 * self.edge_pad() - inset
    }
}

/// Collaborators a layout pass reads from.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub metrics: &'a LayoutMetrics,
    /// Catalog variants in display order.
    pub variants: &'a [VariantInfo],
    pub measure: &'a dyn TextMeasure,
}

/// What a placed item is, along with the identifiers it acts on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    DeleteButton {
        region: String,
    },
    RegionLabel {
        text: String,
    },
    Checkbox {
        region: String,
        variant: VariantId,
        checked: bool,
    },
    VariantLabel {
        variant: VariantId,
        text: String,
    },
    Header {
        text: String,
    },
    EntryLabel {
        index: usize,
        text: String,
    },
    Divider,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    pub kind: ItemKind,
    pub position: Point,
    pub size: Size,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
}

impl PlacedItem {
    pub fn new(kind: ItemKind, position: Point, size: Size) -> Self {
        Self {
            kind,
            position,
            size,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// Command to dispatch when the item is activated, if it is interactive.
    pub fn action(&self) -> Option<PanelCommand> {
        match &self.kind {
            ItemKind::DeleteButton { region } => Some(PanelCommand::RemoveRegion(region.clone())),
            ItemKind::Checkbox {
                region, variant, ..
            } => Some(PanelCommand::ToggleVariant {
                region: region.clone(),
                variant: variant.clone(),
            }),
            _ => None,
        }
    }
}

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelLayout {
    pub items: Vec<PlacedItem>,
    /// Every downward step the cursor took, in placement order.
    pub line_advances: Vec<f32>,
    /// Fixed padding added on top of the line advances.
    pub chrome: f32,
    pub content_height: f32,
}

impl PanelLayout {
    pub fn empty(metrics: &LayoutMetrics) -> Self {
        Self {
            items: Vec::new(),
            line_advances: Vec::new(),
            chrome: metrics.empty_content_height,
            content_height: metrics.empty_content_height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items were placed relative to the content top at `y = 0`; move them into
    /// the bottom-anchored frame once the total height is known.
    pub(crate) fn finish(mut items: Vec<PlacedItem>, cursor: LineCursor, chrome: f32) -> Self {
        let line_advances = cursor.advances;
        let content_height = chrome + line_advances.iter().sum::<f32>();
        for item in &mut items {
            item.position = item.position.offset_y(content_height);
        }
        Self {
            items,
            line_advances,
            chrome,
            content_height,
        }
    }
}

/// Vertical cursor that records every line it steps over.
#[derive(Debug)]
pub(crate) struct LineCursor {
    y: f32,
    advances: Vec<f32>,
}

impl LineCursor {
    pub(crate) fn new(start: f32) -> Self {
        Self {
            y: start,
            advances: Vec::new(),
        }
    }

    pub(crate) fn advance(&mut self, height: f32) {
        self.y -= height;
        self.advances.push(height);
    }

    pub(crate) fn y(&self) -> f32 {
        self.y
    }
}

/// Left-to-right packing state for one block of tokens.
#[derive(Debug)]
pub(crate) struct TokenWrap {
    available: f32,
    padding: f32,
    x: f32,
    lines: usize,
}

impl TokenWrap {
    pub(crate) fn new(available: f32, padding: f32) -> Self {
        Self {
            available,
            padding,
            x: 0.0,
            lines: 1,
        }
    }

    /// Reserve `width` on the current line, breaking to a new line first when
    /// it would overflow. The check also applies at the start of a line, so a
    /// token wider than the whole line is pushed down one line and overhangs.
    pub(crate) fn place(&mut self, width: f32, cursor: &mut LineCursor, line_height: f32) -> f32 {
        if self.x + width > self.available {
            self.x = 0.0;
            self.lines += 1;
            cursor.advance(line_height);
        }
        let x = self.x;
        self.x += width + self.padding;
        x
    }

    pub(crate) fn lines(&self) -> usize {
        self.lines
    }
}

/// Where a token landed: x offset within its block and zero-based line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrappedToken {
    pub x: f32,
    pub line: usize,
}

/// Pack `widths` into lines of `available` width with `padding` between tokens.
pub fn wrap_tokens(widths: &[f32], available: f32, padding: f32) -> Vec<WrappedToken> {
    let mut cursor = LineCursor::new(0.0);
    let mut wrap = TokenWrap::new(available, padding);
    widths
        .iter()
        .map(|&width| {
            let x = wrap.place(width, &mut cursor, 1.0);
            WrappedToken {
                x,
                line: wrap.lines() - 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_fill_a_line_before_wrapping() {
        let placed = wrap_tokens(&[30.0, 30.0, 30.0], 100.0, 10.0);
        assert_eq!(
            placed,
            vec![
                WrappedToken { x: 0.0, line: 0 },
                WrappedToken { x: 40.0, line: 0 },
                WrappedToken { x: 0.0, line: 1 },
            ]
        );
    }

    #[test]
    fn exact_fit_stays_on_the_line() {
        let placed = wrap_tokens(&[45.0, 45.0], 100.0, 10.0);
        assert_eq!(placed[1], WrappedToken { x: 55.0, line: 0 });
    }

    #[test]
    fn oversized_token_breaks_before_itself() {
        assert_eq!(
            wrap_tokens(&[150.0], 100.0, 10.0),
            vec![WrappedToken { x: 0.0, line: 1 }]
        );

        // The overhang leaves no room, so the next token breaks again.
        let placed = wrap_tokens(&[150.0, 20.0], 100.0, 10.0);
        assert_eq!(placed[0], WrappedToken { x: 0.0, line: 1 });
        assert_eq!(placed[1], WrappedToken { x: 0.0, line: 2 });
    }

    #[test]
    fn oversized_first_token_steps_the_cursor() {
        let mut cursor = LineCursor::new(0.0);
        let mut wrap = TokenWrap::new(50.0, 5.0);
        assert_eq!(wrap.place(80.0, &mut cursor, 20.0), 0.0);
        assert_eq!(cursor.y(), -20.0);
        assert_eq!(wrap.lines(), 2);
    }

    #[test]
    fn wrapping_steps_the_cursor_down() {
        let mut cursor = LineCursor::new(0.0);
        let mut wrap = TokenWrap::new(50.0, 5.0);
        wrap.place(40.0, &mut cursor, 20.0);
        wrap.place(40.0, &mut cursor, 20.0);
        assert_eq!(cursor.y(), -20.0);
        assert_eq!(wrap.lines(), 2);
    }

    #[test]
    fn metrics_accept_partial_overrides() {
        let metrics = LayoutMetrics::from_json_str(r#"{ "line_height": 16.0 }"#).unwrap();
        assert_eq!(metrics.line_height, 16.0);
        assert_eq!(metrics.checkbox_size, 24.0);
        assert_eq!(metrics.checkbox_line_height(), 30.0);
        assert_eq!(metrics.queue_token_inset(), 24.0);
    }

    #[test]
    fn metrics_reject_malformed_documents() {
        assert!(LayoutMetrics::from_json_str("{ line_height: }").is_err());
    }

    #[test]
    fn only_controls_carry_actions() {
        let delete = PlacedItem::new(
            ItemKind::DeleteButton {
                region: "Outskirts".into(),
            },
            Point::default(),
            Size::square(20.0),
        );
        assert_eq!(
            delete.action(),
            Some(PanelCommand::RemoveRegion("Outskirts".into()))
        );

        let header = PlacedItem::new(
            ItemKind::Header {
                text: "Current:".into(),
            },
            Point::default(),
            Size::default(),
        );
        assert_eq!(header.action(), None);
    }
}
