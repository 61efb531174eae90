use crate::geometry::{Point, Size};
use crate::palette::{DELETE_RED, display_color};
use crate::selection::PendingEntry;

use super::core::{ItemKind, LayoutContext, LineCursor, PanelLayout, PlacedItem, TokenWrap};

/// Lay out the pending panel.
///
/// Each staged region gets a header line (delete control and region name)
/// followed by wrapped rows of checkbox + label pairs, one pair per catalog
/// variant whether or not it is ticked.
pub fn layout_pending(
    entries: &[PendingEntry],
    width: f32,
    ctx: &LayoutContext<'_>,
) -> PanelLayout {
    let m = ctx.metrics;
    if entries.is_empty() {
        return PanelLayout::empty(m);
    }

    let edge = m.edge_pad();
    let row_height = m.checkbox_line_height();
    let available = m.available_width(width, 0.0);

    let mut items = Vec::new();
    let mut cursor = LineCursor::new(m.sep_pad - m.big_pad);

    for entry in entries {
        cursor.advance(m.line_height + m.sep_pad);
        items.push(
            PlacedItem::new(
                ItemKind::DeleteButton {
                    region: entry.name.clone(),
                },
                Point::new(edge, cursor.y()),
                Size::square(m.line_height),
            )
            .with_color(DELETE_RED),
        );
        items.push(PlacedItem::new(
            ItemKind::RegionLabel {
                text: entry.name.clone(),
            },
            Point::new(edge + m.line_height + m.small_pad, cursor.y()),
            Size::new(ctx.measure.measure_width(&entry.name), m.line_height),
        ));

        cursor.advance(row_height);
        let mut wrap = TokenWrap::new(available, m.big_pad);
        for info in ctx.variants {
            let label_width = ctx.measure.measure_width(&info.label);
            let x = wrap.place(
                m.checkbox_size + m.big_pad + label_width,
                &mut cursor,
                row_height,
            );
            let checked = entry.variants.contains(&info.id);
            let color = display_color(info.base_color, checked);

            items.push(
                PlacedItem::new(
                    ItemKind::Checkbox {
                        region: entry.name.clone(),
                        variant: info.id.clone(),
                        checked,
                    },
                    Point::new(edge + x, cursor.y()),
                    Size::square(m.checkbox_size),
                )
                .with_color(color),
            );
            items.push(
                PlacedItem::new(
                    ItemKind::VariantLabel {
                        variant: info.id.clone(),
                        text: info.label.clone(),
                    },
                    Point::new(x + m.checkbox_size + m.big_pad, cursor.y()),
                    Size::new(label_width, m.line_height),
                )
                .with_color(color),
            );
        }
    }

    PanelLayout::finish(items, cursor, 2.0 * m.big_pad)
}
