use crate::geometry::{Point, Size};
use crate::palette::{MEDIUM_GREY, enabled_color};
use crate::queue::QueueEntry;

use super::core::{ItemKind, LayoutContext, LineCursor, PanelLayout, PlacedItem, TokenWrap};

pub const CURRENT_HEADER: &str = "Current:";
pub const QUEUED_HEADER: &str = "Queued:";

/// Lay out the queue panel.
///
/// The head entry sits under a "Current:" header; when more entries follow, a
/// divider and a "Queued:" header separate it from the rest. Each entry shows
/// `"{index}. {name}"` and its variant labels wrapped beneath it.
pub fn layout_queue(entries: &[QueueEntry], width: f32, ctx: &LayoutContext<'_>) -> PanelLayout {
    let m = ctx.metrics;
    if entries.is_empty() {
        return PanelLayout::empty(m);
    }

    let edge = m.edge_pad();
    let inset = m.queue_token_inset();
    let available = m.available_width(width, inset);

    let mut items = Vec::new();
    let mut cursor = LineCursor::new(m.big_pad - edge);

    for (idx, entry) in entries.iter().enumerate() {
        let index = idx + 1;
        cursor.advance(m.line_height + m.big_pad);

        if idx == 0 {
            cursor.advance(m.big_line_height - m.line_height);
            items.push(header(CURRENT_HEADER, edge, cursor.y(), ctx));
            cursor.advance(m.line_height);
        }

        let text = format!("{index}. {}", entry.name());
        items.push(PlacedItem::new(
            ItemKind::EntryLabel {
                index,
                text: text.clone(),
            },
            Point::new(edge + m.small_pad, cursor.y()),
            Size::new(ctx.measure.measure_width(&text), m.line_height),
        ));
        cursor.advance(m.line_height);

        let mut wrap = TokenWrap::new(available, m.big_pad);
        for info in ctx
            .variants
            .iter()
            .filter(|info| entry.variants().contains(&info.id))
        {
            let label_width = ctx.measure.measure_width(&info.label);
            let x = wrap.place(label_width, &mut cursor, m.line_height);
            items.push(
                PlacedItem::new(
                    ItemKind::VariantLabel {
                        variant: info.id.clone(),
                        text: info.label.clone(),
                    },
                    Point::new(x + inset, cursor.y()),
                    Size::new(label_width, m.line_height),
                )
                .with_color(enabled_color(info.base_color)),
            );
        }

        if idx == 0 && entries.len() > 1 {
            cursor.advance(m.small_pad);
            items.push(
                PlacedItem::new(
                    ItemKind::Divider,
                    Point::new(edge, cursor.y()),
                    Size::new(m.available_width(width, 0.0), m.divider_thickness),
                )
                .with_color(MEDIUM_GREY),
            );
            cursor.advance(m.divider_thickness + m.small_pad + m.big_line_height);
            items.push(header(QUEUED_HEADER, edge, cursor.y(), ctx));
        }
    }

    PanelLayout::finish(items, cursor, m.big_pad)
}

fn header(text: &str, x: f32, y: f32, ctx: &LayoutContext<'_>) -> PlacedItem {
    PlacedItem::new(
        ItemKind::Header {
            text: text.to_string(),
        },
        Point::new(x, y),
        Size::new(ctx.measure.measure_width(text), ctx.metrics.big_line_height),
    )
}
