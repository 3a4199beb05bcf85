//! Native Windows tray.
//!
//! Runs the same tray loop as the terminal frontend, but the icon lives in the
//! notification area. Left click toggles CPU/GPU, right click exits.

mod icon;
mod notify;

pub use icon::GdiIcon;
pub use notify::{MessageWindow, NotifyAreaBackend, WM_TRAY_CALLBACK, WM_TRAY_TOGGLE};

use std::mem::zeroed;
use std::ptr::null_mut;
use std::sync::Arc;
use std::time::Duration;

use windows_sys::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, KillTimer, SetTimer, TranslateMessage, MSG, WM_TIMER,
};

use crate::core::config::Configuration;
use crate::core::context::UsageContext;
use crate::core::dispatch::{Dispatcher, UiMessage};
use crate::core::system_monitor::{Scheduler, SysinfoMonitor, TrayPoller};
use crate::error::{Result, UsagePinError};
use crate::tray::{template, IconRenderer};

const DRAIN_TIMER_ID: usize = 1;
const DRAIN_INTERVAL_MS: u32 = 50;

/// Run the notification area icon until the user right-clicks it.
pub fn run_native_tray(configuration: Configuration, period: Duration) -> Result<()> {
    let scheduler = Scheduler::new()?;
    let context = UsageContext::new(Box::new(SysinfoMonitor::new()), configuration);
    let (dispatcher, mut queue) = Dispatcher::channel();

    let window = MessageWindow::create()?;
    let poller = Arc::new(TrayPoller::new(context.clone(), dispatcher));
    let mut renderer = IconRenderer::new(
        NotifyAreaBackend::new(&window),
        template().clone(),
        poller.render_guard(),
    );

    let tick_poller = Arc::clone(&poller);
    let _tray_timer = scheduler.every("tray", period, move || {
        tick_poller.tick();
    });

    // Render the first reading without waiting a full period
    poller.tick();

    if unsafe { SetTimer(window.hwnd(), DRAIN_TIMER_ID, DRAIN_INTERVAL_MS, None) } == 0 {
        return Err(UsagePinError::platform(format!(
            "SetTimer failed: {}",
            std::io::Error::last_os_error()
        )));
    }

    log::info!("Native tray started ({} ms)", period.as_millis());

    let mut msg: MSG = unsafe { zeroed() };
    loop {
        let status = unsafe { GetMessageW(&mut msg, null_mut(), 0, 0) };
        if status == 0 {
            break;
        }
        if status == -1 {
            return Err(UsagePinError::platform(format!(
                "GetMessageW failed: {}",
                std::io::Error::last_os_error()
            )));
        }

        match msg.message {
            WM_TIMER if msg.wParam == DRAIN_TIMER_ID => {
                for message in queue.drain() {
                    if let UiMessage::Tray(update) = message {
                        renderer.render(&poller.retarget(update));
                    }
                }
            }
            WM_TRAY_TOGGLE => {
                let target = context.usage_target().toggled();
                context.set_usage_target(target)?;
                log::info!("Tray now shows {}", target);
                renderer.render(&poller.read_now());
            }
            _ => unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            },
        }
    }

    unsafe { KillTimer(window.hwnd(), DRAIN_TIMER_ID) };
    log::info!(
        "Native tray stopped after {} renders ({} skipped)",
        renderer.rendered(),
        renderer.failed()
    );

    // Remove the icon before the window goes away
    drop(renderer);
    Ok(())
}
