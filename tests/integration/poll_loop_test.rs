use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use usagepin::core::dispatch::{Dispatcher, UiMessage};
use usagepin::core::system_monitor::{Scheduler, TickOutcome, TrayPoller};
use usagepin::core::usage::usage_label;
use usagepin::tray::{template, IconRenderer, MemoryIconBackend};
use usagepin::ui::tray_tui::{TrayApp, TrayEvent};
use usagepin::{Configuration, UsageContext, UsageTarget};

use super::support::FakeMonitor;

fn tray_update(messages: Vec<UiMessage>) -> Vec<(UsageTarget, f32)> {
    messages
        .into_iter()
        .filter_map(|m| match m {
            UiMessage::Tray(update) => Some((update.target, update.usage)),
            UiMessage::Report(_) => None,
        })
        .collect()
}

#[test]
fn test_tick_records_both_histories_and_enqueues_selected_metric() {
    let monitor = FakeMonitor::with_gpus(&["GPU A"], &[64.0]);
    monitor.set_cpu(12.0);
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let poller = TrayPoller::new(context.clone(), dispatcher);

    assert_eq!(poller.tick(), TickOutcome::Enqueued);
    assert_eq!(tray_update(queue.drain()), vec![(UsageTarget::Cpu, 12.0)]);

    assert_eq!(context.history(UsageTarget::Cpu).lock().latest().map(|s| s.value), Some(12));
    assert_eq!(context.history(UsageTarget::Gpu).lock().latest().map(|s| s.value), Some(64));
}

#[test]
fn test_tick_follows_target_switch() {
    let monitor = FakeMonitor::with_gpus(&["GPU A"], &[77.0]);
    monitor.set_cpu(5.0);
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let poller = TrayPoller::new(context.clone(), dispatcher);

    context.set_usage_target(UsageTarget::Gpu).unwrap();
    poller.tick();
    assert_eq!(tray_update(queue.drain()), vec![(UsageTarget::Gpu, 77.0)]);
}

#[test]
fn test_tick_dropped_while_render_pending() {
    let monitor = FakeMonitor::new();
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let poller = TrayPoller::new(context.clone(), dispatcher);
    let guard = poller.render_guard();

    assert_eq!(poller.tick(), TickOutcome::Enqueued);
    assert!(guard.load(Ordering::Acquire));
    assert_eq!(poller.tick(), TickOutcome::Dropped);
    assert_eq!(queue.drain().len(), 1);

    // History still grows for dropped ticks
    assert_eq!(context.history(UsageTarget::Cpu).lock().len(), 2);

    // Completing the render re-arms the poller
    let mut renderer = IconRenderer::new(MemoryIconBackend::new(), template().clone(), guard);
    renderer.render(&usagepin::core::dispatch::TrayUpdate {
        target: UsageTarget::Cpu,
        usage: 0.0,
    });
    assert_eq!(poller.tick(), TickOutcome::Enqueued);
}

#[test]
fn test_tick_reports_closed_ui() {
    let context = UsageContext::new(FakeMonitor::new().boxed(), Configuration::in_memory());
    let (dispatcher, queue) = Dispatcher::channel();
    let poller = TrayPoller::new(context, dispatcher);
    let guard = poller.render_guard();

    drop(queue);
    assert_eq!(poller.tick(), TickOutcome::Closed);
    assert!(!guard.load(Ordering::Acquire));
}

#[test]
fn test_out_of_range_readings_are_clamped() {
    let monitor = FakeMonitor::new();
    monitor.set_cpu(250.0);
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, _queue) = Dispatcher::channel();
    let poller = TrayPoller::new(context.clone(), dispatcher);

    poller.tick();
    monitor.set_cpu(-3.0);
    poller.render_guard().store(false, Ordering::Release);
    poller.tick();

    let values: Vec<u8> = context
        .history(UsageTarget::Cpu)
        .lock()
        .iter()
        .map(|s| s.value)
        .collect();
    assert_eq!(values, vec![100, 0]);
}

#[test]
fn test_labels() {
    assert_eq!(usage_label(37.2), "37");
    assert_eq!(usage_label(99.6), "100");
    assert_eq!(usage_label(100.0), "M");
    assert_eq!(usage_label(180.0), "M");
    assert_eq!(usage_label(-5.0), "0");
}

#[test]
fn test_saturated_icon_shows_sentinel() {
    let context = UsageContext::new(FakeMonitor::new().boxed(), Configuration::in_memory());
    let (dispatcher, _queue) = Dispatcher::channel();
    let mut app = TrayApp::new(context, dispatcher);

    app.apply(UiMessage::Tray(usagepin::core::dispatch::TrayUpdate {
        target: UsageTarget::Cpu,
        usage: 100.0,
    }));

    let shown = app.renderer.current().map(|icon| icon.bitmap().clone());
    assert_eq!(shown, Some(app.renderer.compose("M")));
    assert_eq!(app.renderer.tooltip(), "CPU Usage: 100%");
}

#[test]
fn test_scheduled_tray_timer_drives_renders() {
    let monitor = FakeMonitor::new();
    monitor.set_cpu(33.0);
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let mut app = TrayApp::new(context, dispatcher);

    let scheduler = Scheduler::new().unwrap();
    let timer = app.start_tray_timer(&scheduler, Duration::from_millis(20));

    // Stand-in for the UI loop
    let deadline = Instant::now() + Duration::from_secs(2);
    while app.renderer.rendered() < 3 && Instant::now() < deadline {
        for message in queue.drain() {
            app.apply(message);
        }
        std::thread::sleep(Duration::from_millis(5));
    }

    drop(timer);
    assert!(app.renderer.rendered() >= 3);
    assert_eq!(app.renderer.tooltip(), "CPU Usage: 33%");
    assert_eq!(scheduler.active_timers(), 0);
}

#[test]
fn test_target_switch_redraws_even_with_a_render_queued() {
    let monitor = FakeMonitor::with_gpus(&["GPU A"], &[77.0]);
    monitor.set_cpu(5.0);
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let mut app = TrayApp::new(context.clone(), dispatcher);
    let scheduler = Scheduler::new().unwrap();

    // Nothing drains the queue, so the first CPU render stays pending and
    // every later tick is dropped
    let timer = app.start_tray_timer(&scheduler, Duration::from_millis(10));
    let deadline = Instant::now() + Duration::from_secs(2);
    while context.history(UsageTarget::Cpu).lock().is_empty() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    drop(timer);
    std::thread::sleep(Duration::from_millis(30));

    let samples_before = context.history(UsageTarget::Cpu).lock().len();
    app.handle_event(TrayEvent::SelectTarget(UsageTarget::Gpu), &scheduler)
        .unwrap();
    assert_eq!(app.renderer.tooltip(), "GPU Usage: 77%");

    // The stale CPU render is applied afterwards and must not win
    let queued = queue.drain();
    assert!(!queued.is_empty());
    for message in queued {
        app.apply(message);
    }
    assert_eq!(app.renderer.tooltip(), "GPU Usage: 77%");

    // Switching does not record extra samples
    assert_eq!(context.history(UsageTarget::Cpu).lock().len(), samples_before);
}
