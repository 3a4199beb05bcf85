//! Built-in 5x7 bitmap font for the icon label.
//! Only the characters a usage label can contain are present.

use super::bitmap::{Bitmap, Rgba};

pub const GLYPH_WIDTH: i32 = 5;
pub const GLYPH_HEIGHT: i32 = 7;

/// Largest pixel scale a glyph is drawn at
const MAX_SCALE: i32 = 5;
/// Horizontal space kept free on each side of the label
const MARGIN: i32 = 4;

/// One byte per row, bit 4 = leftmost column
static GLYPHS: &[(char, [u8; 7])] = &[
    ('0', [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
    ('1', [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
    ('2', [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
    ('3', [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
    ('4', [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
    ('5', [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
    ('6', [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
    ('7', [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
    ('8', [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
    ('9', [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
    ('M', [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
    ('%', [0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011]),
];

fn glyph(ch: char) -> Option<&'static [u8; 7]> {
    GLYPHS.iter().find(|(c, _)| *c == ch).map(|(_, rows)| rows)
}

/// Width in unscaled pixels, one column of spacing between glyphs
pub fn measure(text: &str) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 {
        0
    } else {
        n * GLYPH_WIDTH + (n - 1)
    }
}

/// Largest scale at which `text` fits `width` minus the margins
pub fn fit_scale(text: &str, width: u32) -> i32 {
    let measured = measure(text).max(1);
    ((width as i32 - 2 * MARGIN) / measured).clamp(1, MAX_SCALE)
}

pub fn draw_char(bitmap: &mut Bitmap, x: i32, y: i32, ch: char, scale: i32, color: Rgba) {
    let Some(rows) = glyph(ch) else {
        return;
    };

    for (row, bits) in rows.iter().enumerate() {
        for col in 0..GLYPH_WIDTH {
            if bits & (0x10 >> col) != 0 {
                bitmap.fill_rect(
                    x + col * scale,
                    y + row as i32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
    }
}

/// Draw `text` centered on the bitmap, shifted down by `y_offset` pixels.
pub fn draw_text_centered(bitmap: &mut Bitmap, text: &str, color: Rgba, y_offset: i32) {
    let scale = fit_scale(text, bitmap.width());
    let text_width = measure(text) * scale;
    let text_height = GLYPH_HEIGHT * scale;

    let mut x = (bitmap.width() as i32 - text_width) / 2;
    let y = (bitmap.height() as i32 - text_height) / 2 + y_offset;

    for ch in text.chars() {
        draw_char(bitmap, x, y, ch, scale, color);
        x += (GLYPH_WIDTH + 1) * scale;
    }
}
