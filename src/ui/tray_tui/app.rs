use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyEventKind, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::core::config::Configuration;
use crate::core::context::UsageContext;
use crate::core::dispatch::{Dispatcher, UiMessage, UiQueue};
use crate::core::system_monitor::{PeriodicTimer, Scheduler, SysinfoMonitor, TrayPoller};
use crate::core::usage::UsageTarget;
use crate::tray::{template, IconRenderer, MemoryIconBackend};
use crate::ui::report::ReportWindow;

use super::event_handler::{map_key, TrayEvent};
use super::render::{main_layout, render_ui, report_area};

/// How long the UI thread waits for input before draining the queue
const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Tray application state (UI thread)
pub struct TrayApp {
    pub renderer: IconRenderer<MemoryIconBackend>,
    pub report: ReportWindow,
    pub should_quit: bool,
    pub show_help: bool,
    tray_poller: Arc<TrayPoller>,
}

impl TrayApp {
    pub fn new(context: UsageContext, dispatcher: Dispatcher) -> Self {
        let tray_poller = Arc::new(TrayPoller::new(context.clone(), dispatcher.clone()));
        let renderer = IconRenderer::new(
            MemoryIconBackend::new(),
            template().clone(),
            tray_poller.render_guard(),
        );

        Self {
            renderer,
            report: ReportWindow::new(context, dispatcher),
            should_quit: false,
            show_help: false,
            tray_poller,
        }
    }

    /// Start the tray tick on the scheduler
    pub fn start_tray_timer(&self, scheduler: &Scheduler, period: Duration) -> PeriodicTimer {
        let poller = Arc::clone(&self.tray_poller);
        scheduler.every("tray", period, move || {
            poller.tick();
        })
    }

    /// Apply a message marshaled from a timer task
    pub fn apply(&mut self, message: UiMessage) {
        match message {
            UiMessage::Tray(update) => {
                let update = self.tray_poller.retarget(update);
                self.renderer.render(&update);
            }
            UiMessage::Report(readings) => {
                // A tick can land just after the view closed
                if self.report.is_open() {
                    self.report.apply(&readings);
                }
            }
        }
    }

    /// Handle keyboard/mouse/focus events
    pub fn handle_event(&mut self, event: TrayEvent, scheduler: &Scheduler) -> Result<()> {
        match event {
            TrayEvent::Quit => self.should_quit = true,
            TrayEvent::ToggleHelp => self.show_help = !self.show_help,
            TrayEvent::OpenReport => {
                self.report.open(scheduler);
            }
            TrayEvent::CloseReport => {
                self.report.close();
            }
            TrayEvent::FocusLost => {
                self.report.on_focus_lost();
            }
            TrayEvent::SelectTarget(target) => self.select_target(target)?,
            TrayEvent::ToggleTarget => {
                let target = self.report.view().target.toggled();
                self.select_target(target)?;
            }
            TrayEvent::NextGpu => {
                self.report.cycle_gpu(1).context("Failed to select GPU")?;
            }
            TrayEvent::PrevGpu => {
                self.report.cycle_gpu(-1).context("Failed to select GPU")?;
            }
            TrayEvent::None => {}
        }
        Ok(())
    }

    /// Persist the target and redraw the tray right away. Renders already
    /// queued for the old target are retargeted in `apply`.
    fn select_target(&mut self, target: UsageTarget) -> Result<()> {
        self.report
            .select_target(target)
            .context("Failed to save usage target")?;
        let update = self.tray_poller.read_now();
        self.renderer.render(&update);
        Ok(())
    }
}

/// Map a left click: the tray strip opens the report, anywhere outside an
/// open report dismisses it.
pub fn map_click(column: u16, row: u16, area: Rect, report_open: bool) -> TrayEvent {
    let (_, strip) = main_layout(area);
    let inside = |r: Rect| column >= r.x && column < r.right() && row >= r.y && row < r.bottom();

    if inside(strip) {
        if report_open {
            TrayEvent::CloseReport
        } else {
            TrayEvent::OpenReport
        }
    } else if report_open && !inside(report_area(area)) {
        TrayEvent::CloseReport
    } else {
        TrayEvent::None
    }
}

/// Configuration for the tray app
#[derive(Debug, Clone)]
pub struct TrayAppConfig {
    pub tray_interval: Duration,
}

impl TrayAppConfig {
    pub fn from_configuration(config: &Configuration) -> Self {
        Self {
            tray_interval: Duration::from_millis(config.tray_interval_ms()),
        }
    }
}

/// Run the tray TUI application
pub fn run_tray_app(configuration: Configuration, interval_override: Option<u64>) -> Result<()> {
    let mut config = TrayAppConfig::from_configuration(&configuration);
    if let Some(ms) = interval_override.filter(|&ms| ms > 0) {
        config.tray_interval = Duration::from_millis(ms);
    }

    let scheduler = Scheduler::new().context("Failed to start timers")?;
    let context = UsageContext::new(Box::new(SysinfoMonitor::new()), configuration);
    let (dispatcher, queue) = Dispatcher::channel();
    let mut app = TrayApp::new(context, dispatcher);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange
    )
    .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let tray_timer = app.start_tray_timer(&scheduler, config.tray_interval);
    let result = event_loop(&mut terminal, &mut app, &scheduler, queue);

    app.report.close();
    drop(tray_timer);

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    log::info!(
        "Tray stopped after {} renders ({} skipped)",
        app.renderer.rendered(),
        app.renderer.failed()
    );

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TrayApp,
    scheduler: &Scheduler,
    mut queue: UiQueue,
) -> Result<()> {
    loop {
        let frame = terminal.draw(|frame| render_ui(frame, app))?;
        let area = frame.area;

        if event::poll(UI_POLL_INTERVAL).context("Event poll failed")? {
            let tray_event = match event::read().context("Event read failed")? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    map_key(key.code, app.report.is_open())
                }
                Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    map_click(mouse.column, mouse.row, area, app.report.is_open())
                }
                Event::FocusLost => TrayEvent::FocusLost,
                _ => TrayEvent::None,
            };
            app.handle_event(tray_event, scheduler)?;
        }

        for message in queue.drain() {
            app.apply(message);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
