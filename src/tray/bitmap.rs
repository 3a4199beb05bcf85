//! RGBA raster used to compose tray icons.

use once_cell::sync::Lazy;

/// Edge length of the tray icon bitmap
pub const ICON_SIZE: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Bitmap {
    /// A fully transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Writes outside the bitmap are clipped.
    pub fn put_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color;
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        for py in y..y + h {
            for px in x..x + w {
                self.put_pixel(px, py, color);
            }
        }
    }

    /// Filled rectangle with quarter-circle corners of radius `r`
    pub fn fill_rounded_rect(&mut self, x: i32, y: i32, w: i32, h: i32, r: i32, color: Rgba) {
        let r = r.min(w / 2).min(h / 2).max(0);
        for py in y..y + h {
            for px in x..x + w {
                let cx = if px < x + r {
                    x + r
                } else if px >= x + w - r {
                    x + w - r - 1
                } else {
                    px
                };
                let cy = if py < y + r {
                    y + r
                } else if py >= y + h - r {
                    y + h - r - 1
                } else {
                    py
                };
                let (dx, dy) = (px - cx, py - cy);
                if dx * dx + dy * dy <= r * r {
                    self.put_pixel(px, py, color);
                }
            }
        }
    }

    /// Pixels as BGRA bytes, rows top-down (the GDI bitmap layout)
    pub fn to_bgra_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.b, p.g, p.r, p.a])
            .collect()
    }
}

static TEMPLATE: Lazy<Bitmap> = Lazy::new(build_template);

/// The icon template: a light chip body with pins on every side.
pub fn template() -> &'static Bitmap {
    &TEMPLATE
}

fn build_template() -> Bitmap {
    let size = ICON_SIZE as i32;
    let mut bitmap = Bitmap::new(ICON_SIZE, ICON_SIZE);

    let pin = Rgba::new(200, 200, 200, 255);
    let body = Rgba::new(236, 236, 236, 255);

    // Pins: 4 per side, 3px wide, 4px long
    for i in 0..4 {
        let offset = 14 + i * 11;
        bitmap.fill_rect(offset, 0, 3, 4, pin);
        bitmap.fill_rect(offset, size - 4, 3, 4, pin);
        bitmap.fill_rect(0, offset, 4, 3, pin);
        bitmap.fill_rect(size - 4, offset, 4, 3, pin);
    }

    bitmap.fill_rounded_rect(3, 3, size - 6, size - 6, 8, body);
    bitmap
}
