use std::time::{Duration, Instant};

use tempfile::TempDir;
use usagepin::core::dispatch::{Dispatcher, UiMessage};
use usagepin::core::system_monitor::Scheduler;
use usagepin::ui::report::ReportWindow;
use usagepin::{Configuration, UsageContext, UsageTarget};

use super::support::FakeMonitor;

fn window(monitor: &FakeMonitor, config: Configuration) -> (ReportWindow, UsageContext) {
    let context = UsageContext::new(monitor.boxed(), config);
    let (dispatcher, _queue) = Dispatcher::channel();
    (ReportWindow::new(context.clone(), dispatcher), context)
}

#[test]
fn test_open_reads_synchronously() {
    let monitor = FakeMonitor::with_gpus(&["GPU A"], &[50.0]);
    monitor.set_cpu(41.7);
    let (mut report, _) = window(&monitor, Configuration::in_memory());
    let scheduler = Scheduler::new().unwrap();

    assert!(report.open(&scheduler));
    let view = report.view();
    assert_eq!(view.cpu_name, "Fake CPU");
    assert_eq!(view.cpu_text, "42% / 45°C");
    assert_eq!(view.gpu_name, "GPU A");
    assert_eq!(view.gpu_text, "50%");
    assert_eq!(view.memory_text, "8 GB / 16 GB");
    assert_eq!(view.network_text, "U: 1 KB/s D: 4 KB/s");
}

#[test]
fn test_open_twice_runs_one_timer() {
    let monitor = FakeMonitor::new();
    let (mut report, _) = window(&monitor, Configuration::in_memory());
    let scheduler = Scheduler::new().unwrap();

    assert!(report.open(&scheduler));
    assert!(!report.open(&scheduler));
    assert_eq!(scheduler.active_timers(), 1);

    assert!(report.close());
    assert!(!report.close());
    assert_eq!(scheduler.active_timers(), 0);

    // Reopening after a close starts a fresh timer
    assert!(report.open(&scheduler));
    assert_eq!(scheduler.active_timers(), 1);
    drop(report);
    assert_eq!(scheduler.active_timers(), 0);
}

#[test]
fn test_focus_loss_closes() {
    let monitor = FakeMonitor::new();
    let (mut report, _) = window(&monitor, Configuration::in_memory());
    let scheduler = Scheduler::new().unwrap();

    report.open(&scheduler);
    assert!(report.on_focus_lost());
    assert!(!report.is_open());
    assert_eq!(scheduler.active_timers(), 0);
}

#[test]
fn test_refresh_timer_delivers_readings() {
    let monitor = FakeMonitor::new();
    let context = UsageContext::new(monitor.boxed(), Configuration::in_memory());
    let (dispatcher, mut queue) = Dispatcher::channel();
    let mut report = ReportWindow::new(context, dispatcher);
    let scheduler = Scheduler::new().unwrap();

    report.open(&scheduler);
    monitor.set_cpu(88.0);

    let deadline = Instant::now() + Duration::from_secs(3);
    let mut delivered = None;
    while delivered.is_none() && Instant::now() < deadline {
        delivered = queue.drain().into_iter().find_map(|m| match m {
            UiMessage::Report(readings) => Some(readings),
            UiMessage::Tray(_) => None,
        });
        std::thread::sleep(Duration::from_millis(20));
    }

    let readings = delivered.expect("report timer never fired");
    report.apply(&readings);
    assert_eq!(report.view().cpu_usage, 88.0);
}

#[test]
fn test_single_gpu_hides_selector() {
    let monitor = FakeMonitor::with_gpus(&["Only GPU"], &[10.0]);
    let (mut report, _) = window(&monitor, Configuration::in_memory());
    let scheduler = Scheduler::new().unwrap();

    report.open(&scheduler);
    assert!(report.view().gpu_selector.is_none());
    assert!(!report.select_gpu(0).unwrap());
}

#[test]
fn test_gpu_selection_persists_and_retargets() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let monitor = FakeMonitor::with_gpus(&["GPU A", "GPU B"], &[10.0, 90.0]);
    let (mut report, context) = window(&monitor, Configuration::load_from(&path).unwrap());
    let scheduler = Scheduler::new().unwrap();

    report.open(&scheduler);
    let selector = report.view().gpu_selector.clone().unwrap();
    assert_eq!(selector.names, vec!["GPU A", "GPU B"]);
    assert_eq!(selector.selected, 0);

    assert!(report.select_gpu(1).unwrap());
    assert_eq!(report.view().gpu_name, "GPU B");
    assert_eq!(report.view().gpu_text, "90%");
    assert_eq!(context.gpu_index(), 1);
    assert_eq!(Configuration::load_from(&path).unwrap().gpu_index(), 1);

    assert!(!report.select_gpu(5).unwrap());
    assert_eq!(context.gpu_index(), 1);

    // Wraps around
    assert!(report.cycle_gpu(1).unwrap());
    assert_eq!(report.view().gpu_name, "GPU A");
}

#[test]
fn test_persisted_gpu_index_applies_on_start() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    Configuration::load_from(&path)
        .unwrap()
        .set_gpu_index(1)
        .unwrap();

    let monitor = FakeMonitor::with_gpus(&["GPU A", "GPU B"], &[10.0, 90.0]);
    let (mut report, _) = window(&monitor, Configuration::load_from(&path).unwrap());
    let scheduler = Scheduler::new().unwrap();

    report.open(&scheduler);
    assert_eq!(report.view().gpu_name, "GPU B");
    assert_eq!(report.view().gpu_selector.as_ref().map(|s| s.selected), Some(1));
}

#[test]
fn test_target_toggle_is_exclusive_and_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let monitor = FakeMonitor::new();
    let (mut report, context) = window(&monitor, Configuration::load_from(&path).unwrap());

    assert!(report.view().is_selected(UsageTarget::Cpu));
    assert!(!report.view().is_selected(UsageTarget::Gpu));

    report.select_target(UsageTarget::Gpu).unwrap();
    assert!(report.view().is_selected(UsageTarget::Gpu));
    assert!(!report.view().is_selected(UsageTarget::Cpu));
    assert_eq!(context.usage_target(), UsageTarget::Gpu);
    assert_eq!(
        Configuration::load_from(&path).unwrap().usage_target(),
        UsageTarget::Gpu
    );

    assert_eq!(report.toggle_target().unwrap(), UsageTarget::Cpu);
    assert!(report.view().is_selected(UsageTarget::Cpu));
}

#[test]
fn test_chart_follows_target() {
    let monitor = FakeMonitor::new();
    let (mut report, context) = window(&monitor, Configuration::in_memory());

    context.history(UsageTarget::Cpu).lock().push_usage(20.0);
    context.history(UsageTarget::Gpu).lock().push_usage(70.0);

    let latest = |report: &ReportWindow| report.chart_history().lock().latest().map(|s| s.value);
    assert_eq!(latest(&report), Some(20));

    report.select_target(UsageTarget::Gpu).unwrap();
    assert_eq!(latest(&report), Some(70));
}

#[test]
fn test_battery_rows_follow_capabilities() {
    let scheduler = Scheduler::new().unwrap();

    let desktop = FakeMonitor::new();
    let (mut report, _) = window(&desktop, Configuration::in_memory());
    report.open(&scheduler);
    assert!(!report.view().show_battery);
    assert!(!report.view().show_battery_health);
    report.close();

    let laptop = FakeMonitor::new();
    laptop.state.lock().battery = Some((81.0, -7.0));
    let (mut report, _) = window(&laptop, Configuration::in_memory());
    report.open(&scheduler);
    assert!(report.view().show_battery);
    assert!(!report.view().show_battery_health);
    assert_eq!(report.view().battery_text.as_deref(), Some("81% / -7.0 W"));
    report.close();

    laptop.state.lock().battery_health = Some(93.4);
    let (mut report, _) = window(&laptop, Configuration::in_memory());
    report.open(&scheduler);
    assert!(report.view().show_battery_health);
    assert_eq!(report.view().battery_health_text.as_deref(), Some("93%"));
}
