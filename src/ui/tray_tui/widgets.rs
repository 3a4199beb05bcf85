use ratatui::{prelude::*, widgets::Gauge};

use crate::tray::{Bitmap, Rgba};

/// Edge length, in bitmap pixels, of the downscaled icon preview
pub const PREVIEW_PIXELS: u32 = 16;

/// Create a gauge with color based on value thresholds
pub fn colored_gauge<'a>(value: f64, label: &'a str) -> Gauge<'a> {
    let color = match value {
        v if v < 50.0 => Color::Cyan,
        v if v < 75.0 => Color::LightYellow,
        v if v < 90.0 => Color::LightRed,
        _ => Color::Red,
    };

    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((value / 100.0).clamp(0.0, 1.0))
        .label(label)
}

/// Tray icon drawn with half blocks: each cell shows two stacked pixels.
pub struct IconPreview<'a> {
    bitmap: Option<&'a Bitmap>,
}

impl<'a> IconPreview<'a> {
    pub fn new(bitmap: Option<&'a Bitmap>) -> Self {
        Self { bitmap }
    }
}

impl Widget for IconPreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(bitmap) = self.bitmap else {
            return;
        };

        let step = (bitmap.width() / PREVIEW_PIXELS).max(1);
        let cols = area.width.min(PREVIEW_PIXELS as u16);
        let rows = area.height.min((PREVIEW_PIXELS / 2) as u16);

        for row in 0..rows {
            for col in 0..cols {
                let x = col as u32 * step;
                let top = sample_block(bitmap, x, row as u32 * 2 * step, step);
                let bottom = sample_block(bitmap, x, (row as u32 * 2 + 1) * step, step);

                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol("▀")
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }
}

/// Darkest opaque pixel of a `step`x`step` block, so thin strokes survive
/// downscaling.
fn sample_block(bitmap: &Bitmap, x0: u32, y0: u32, step: u32) -> Rgba {
    let mut best: Option<(u32, Rgba)> = None;
    for y in y0..y0 + step {
        for x in x0..x0 + step {
            let Some(px) = bitmap.get(x, y) else {
                continue;
            };
            if px.is_transparent() {
                continue;
            }
            let luma = px.r as u32 * 299 + px.g as u32 * 587 + px.b as u32 * 114;
            if best.map_or(true, |(l, _)| luma < l) {
                best = Some((luma, px));
            }
        }
    }
    best.map(|(_, px)| px).unwrap_or(Rgba::TRANSPARENT)
}

fn to_color(px: Rgba) -> Color {
    if px.is_transparent() {
        Color::Reset
    } else {
        Color::Rgb(px.r, px.g, px.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_block_prefers_ink() {
        let mut bitmap = Bitmap::new(4, 4);
        bitmap.fill_rect(0, 0, 4, 4, Rgba::WHITE);
        bitmap.put_pixel(2, 1, Rgba::BLACK);
        assert_eq!(sample_block(&bitmap, 0, 0, 4), Rgba::BLACK);
    }

    #[test]
    fn test_sample_block_transparent() {
        let bitmap = Bitmap::new(4, 4);
        assert_eq!(sample_block(&bitmap, 0, 0, 4), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_preview_renders_half_blocks() {
        let mut bitmap = Bitmap::new(64, 64);
        bitmap.fill_rect(0, 0, 64, 64, Rgba::WHITE);

        let area = Rect::new(0, 0, 16, 8);
        let mut buf = Buffer::empty(area);
        IconPreview::new(Some(&bitmap)).render(area, &mut buf);

        let cell = buf.cell((0, 0)).unwrap();
        assert_eq!(cell.symbol(), "▀");
        assert_eq!(cell.fg, Color::Rgb(255, 255, 255));
    }
}
