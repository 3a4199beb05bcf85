// GDI icon handles built from composed bitmaps

use std::ptr::null_mut;

use windows_sys::Win32::Graphics::Gdi::{CreateBitmap, DeleteObject, HBITMAP};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateIconIndirect, DestroyIcon, HICON, ICONINFO,
};

use crate::error::{Result, UsagePinError};
use crate::tray::Bitmap;

/// Owned `HICON`, destroyed on drop.
#[derive(Debug)]
pub struct GdiIcon {
    handle: HICON,
}

impl GdiIcon {
    /// Build a 32-bit icon; per-pixel alpha comes from the color bitmap, the
    /// mask is all zeros.
    pub fn from_bitmap(bitmap: &Bitmap) -> Result<Self> {
        let width = bitmap.width() as i32;
        let height = bitmap.height() as i32;
        let pixels = bitmap.to_bgra_bytes();

        // 1 bpp rows are WORD aligned
        let mask_stride = ((bitmap.width() + 15) / 16 * 2) as usize;
        let mask = vec![0u8; mask_stride * bitmap.height() as usize];

        let color = OwnedBitmap::create(width, height, 32, pixels.as_ptr())?;
        let mask = OwnedBitmap::create(width, height, 1, mask.as_ptr())?;

        let info = ICONINFO {
            fIcon: 1,
            xHotspot: 0,
            yHotspot: 0,
            hbmMask: mask.0,
            hbmColor: color.0,
        };

        // The icon copies both bitmaps; they are released when this returns
        let handle = unsafe { CreateIconIndirect(&info) };
        if handle.is_null() {
            return Err(UsagePinError::icon(format!(
                "CreateIconIndirect failed: {}",
                std::io::Error::last_os_error()
            )));
        }

        Ok(Self { handle })
    }

    pub fn handle(&self) -> HICON {
        self.handle
    }
}

impl Drop for GdiIcon {
    fn drop(&mut self) {
        if unsafe { DestroyIcon(self.handle) } == 0 {
            log::debug!(
                "DestroyIcon failed: {}",
                std::io::Error::last_os_error()
            );
        }
    }
}

struct OwnedBitmap(HBITMAP);

impl OwnedBitmap {
    fn create(width: i32, height: i32, bits_per_pixel: u32, bits: *const u8) -> Result<Self> {
        let handle = unsafe { CreateBitmap(width, height, 1, bits_per_pixel, bits.cast()) };
        if handle.is_null() {
            return Err(UsagePinError::icon(format!(
                "CreateBitmap ({} bpp) failed: {}",
                bits_per_pixel,
                std::io::Error::last_os_error()
            )));
        }
        Ok(Self(handle))
    }
}

impl Drop for OwnedBitmap {
    fn drop(&mut self) {
        if !self.0.is_null() {
            unsafe { DeleteObject(self.0) };
            self.0 = null_mut();
        }
    }
}
