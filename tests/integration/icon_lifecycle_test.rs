use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use usagepin::core::dispatch::TrayUpdate;
use usagepin::error::{Result, UsagePinError};
use usagepin::tray::{
    template, Bitmap, HandleLedger, IconBackend, IconRenderer, MemoryIcon, MemoryIconBackend,
};
use usagepin::UsageTarget;

fn cpu(usage: f32) -> TrayUpdate {
    TrayUpdate {
        target: UsageTarget::Cpu,
        usage,
    }
}

#[test]
fn test_each_render_releases_the_previous_handle() {
    let ledger = HandleLedger::new();
    let mut renderer = IconRenderer::new(
        MemoryIconBackend::with_ledger(Arc::clone(&ledger)),
        template().clone(),
        Arc::new(AtomicBool::new(false)),
    );

    for n in 1..=25u64 {
        assert!(renderer.render(&cpu(n as f32)));
        assert_eq!(ledger.created(), n);
        assert_eq!(ledger.destroyed(), n - 1);
        assert_eq!(ledger.live(), 1);
    }

    assert_eq!(
        renderer.backend().assigned(),
        renderer.current().map(|icon| icon.id())
    );

    drop(renderer);
    assert_eq!(ledger.live(), 0);
}

/// Backend that can be told to fail either step
struct FlakyBackend {
    inner: MemoryIconBackend,
    fail_create: bool,
    fail_assign: bool,
}

impl IconBackend for FlakyBackend {
    type Icon = MemoryIcon;

    fn create_icon(&mut self, bitmap: &Bitmap) -> Result<MemoryIcon> {
        if self.fail_create {
            return Err(UsagePinError::icon("out of GDI handles"));
        }
        self.inner.create_icon(bitmap)
    }

    fn assign(&mut self, icon: &MemoryIcon, tooltip: &str) -> Result<()> {
        if self.fail_assign {
            return Err(UsagePinError::icon("tray rejected the icon"));
        }
        self.inner.assign(icon, tooltip)
    }
}

fn flaky_renderer(ledger: &Arc<HandleLedger>) -> (IconRenderer<FlakyBackend>, Arc<AtomicBool>) {
    let flag = Arc::new(AtomicBool::new(false));
    let backend = FlakyBackend {
        inner: MemoryIconBackend::with_ledger(Arc::clone(ledger)),
        fail_create: false,
        fail_assign: false,
    };
    (
        IconRenderer::new(backend, template().clone(), Arc::clone(&flag)),
        flag,
    )
}

#[test]
fn test_failed_create_keeps_previous_icon() {
    let ledger = HandleLedger::new();
    let (mut renderer, flag) = flaky_renderer(&ledger);

    assert!(renderer.render(&cpu(10.0)));
    let first = renderer.current().map(|icon| icon.id());

    renderer.backend_mut().fail_create = true;
    flag.store(true, Ordering::Release);
    assert!(!renderer.render(&cpu(90.0)));

    assert_eq!(renderer.current().map(|icon| icon.id()), first);
    assert_eq!(renderer.tooltip(), "CPU Usage: 10%");
    assert_eq!(renderer.failed(), 1);
    assert!(!flag.load(Ordering::Acquire));

    // The next tick simply tries again
    renderer.backend_mut().fail_create = false;
    assert!(renderer.render(&cpu(90.0)));
    assert_eq!(renderer.tooltip(), "CPU Usage: 90%");
}

#[test]
fn test_failed_assign_releases_the_new_handle() {
    let ledger = HandleLedger::new();
    let (mut renderer, _flag) = flaky_renderer(&ledger);

    assert!(renderer.render(&cpu(10.0)));
    let first = renderer.current().map(|icon| icon.id());

    renderer.backend_mut().fail_assign = true;
    assert!(!renderer.render(&cpu(20.0)));

    assert_eq!(renderer.current().map(|icon| icon.id()), first);
    assert_eq!(ledger.created(), 2);
    assert_eq!(ledger.live(), 1);
}
