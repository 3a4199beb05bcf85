// Notification area plumbing: a message-only window and Shell_NotifyIconW

use std::mem::{size_of, zeroed};
use std::ptr::{null, null_mut};

use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, WPARAM};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Shell::{
    Shell_NotifyIconW, NIF_ICON, NIF_MESSAGE, NIF_TIP, NIM_ADD, NIM_DELETE, NIM_MODIFY,
    NOTIFYICONDATAW,
};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, PostMessageW, PostQuitMessage,
    RegisterClassW, HWND_MESSAGE, WM_APP, WM_LBUTTONUP, WM_RBUTTONUP, WNDCLASSW,
};

use super::icon::GdiIcon;
use crate::error::{Result, UsagePinError};
use crate::tray::{Bitmap, IconBackend};

/// Callback message the shell sends for icon mouse events
pub const WM_TRAY_CALLBACK: u32 = WM_APP + 1;
/// Posted to the message queue when the icon is left-clicked
pub const WM_TRAY_TOGGLE: u32 = WM_APP + 2;

const TRAY_ICON_ID: u32 = 1;
const CLASS_NAME: &str = "UsagePinTrayWindow";

pub(crate) fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    if msg == WM_TRAY_CALLBACK {
        match (lparam as u32) & 0xFFFF {
            WM_RBUTTONUP => PostQuitMessage(0),
            WM_LBUTTONUP => {
                PostMessageW(hwnd, WM_TRAY_TOGGLE, 0, 0);
            }
            _ => {}
        }
        return 0;
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

/// Hidden message-only window that receives tray callbacks.
pub struct MessageWindow {
    hwnd: HWND,
}

impl MessageWindow {
    pub fn create() -> Result<Self> {
        let class_name = wide(CLASS_NAME);

        let hwnd = unsafe {
            let instance = GetModuleHandleW(null());
            let class = WNDCLASSW {
                lpfnWndProc: Some(window_proc),
                hInstance: instance,
                lpszClassName: class_name.as_ptr(),
                ..zeroed()
            };
            // A second registration fails harmlessly; CreateWindowExW reports real errors
            RegisterClassW(&class);

            CreateWindowExW(
                0,
                class_name.as_ptr(),
                class_name.as_ptr(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                null_mut(),
                instance,
                null(),
            )
        };

        if hwnd.is_null() {
            return Err(UsagePinError::platform(format!(
                "CreateWindowExW failed: {}",
                std::io::Error::last_os_error()
            )));
        }

        Ok(Self { hwnd })
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }
}

impl Drop for MessageWindow {
    fn drop(&mut self) {
        unsafe { DestroyWindow(self.hwnd) };
    }
}

/// Icon backend for the Windows notification area.
pub struct NotifyAreaBackend {
    hwnd: HWND,
    added: bool,
}

impl NotifyAreaBackend {
    pub fn new(window: &MessageWindow) -> Self {
        Self {
            hwnd: window.hwnd(),
            added: false,
        }
    }

    fn notify_data(&self) -> NOTIFYICONDATAW {
        let mut data: NOTIFYICONDATAW = unsafe { zeroed() };
        data.cbSize = size_of::<NOTIFYICONDATAW>() as u32;
        data.hWnd = self.hwnd;
        data.uID = TRAY_ICON_ID;
        data
    }
}

impl IconBackend for NotifyAreaBackend {
    type Icon = GdiIcon;

    fn create_icon(&mut self, bitmap: &Bitmap) -> Result<GdiIcon> {
        GdiIcon::from_bitmap(bitmap)
    }

    fn assign(&mut self, icon: &GdiIcon, tooltip: &str) -> Result<()> {
        let mut data = self.notify_data();
        data.uFlags = NIF_ICON | NIF_TIP | NIF_MESSAGE;
        data.uCallbackMessage = WM_TRAY_CALLBACK;
        data.hIcon = icon.handle();

        // szTip holds 127 characters plus the terminator
        let max = data.szTip.len() - 1;
        for (slot, unit) in data.szTip.iter_mut().zip(tooltip.encode_utf16().take(max)) {
            *slot = unit;
        }

        let message = if self.added { NIM_MODIFY } else { NIM_ADD };
        if unsafe { Shell_NotifyIconW(message, &data) } == 0 {
            return Err(UsagePinError::icon("Shell_NotifyIconW rejected the icon"));
        }
        self.added = true;
        Ok(())
    }
}

impl Drop for NotifyAreaBackend {
    fn drop(&mut self) {
        if self.added {
            let data = self.notify_data();
            unsafe { Shell_NotifyIconW(NIM_DELETE, &data) };
        }
    }
}
