use crossterm::event::KeyCode;

use crate::core::usage::UsageTarget;

/// Events that can occur in the tray TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// Quit the application
    Quit,
    /// Toggle help overlay
    ToggleHelp,
    /// Open the report view (tray icon click)
    OpenReport,
    /// Close the report view
    CloseReport,
    /// The terminal lost input focus
    FocusLost,
    /// Pick the metric shown by the tray and the chart
    SelectTarget(UsageTarget),
    /// Flip between CPU and GPU
    ToggleTarget,
    /// Select the next GPU adapter
    NextGpu,
    /// Select the previous GPU adapter
    PrevGpu,
    /// No action
    None,
}

/// Map a key press; `Esc` closes the report first, then quits.
pub fn map_key(code: KeyCode, report_open: bool) -> TrayEvent {
    match code {
        KeyCode::Char('q') => TrayEvent::Quit,
        KeyCode::Esc if report_open => TrayEvent::CloseReport,
        KeyCode::Esc => TrayEvent::Quit,
        KeyCode::Char('?') | KeyCode::Char('h') => TrayEvent::ToggleHelp,
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') if !report_open => {
            TrayEvent::OpenReport
        }
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char(' ') => TrayEvent::CloseReport,
        KeyCode::Char('c') => TrayEvent::SelectTarget(UsageTarget::Cpu),
        KeyCode::Char('g') => TrayEvent::SelectTarget(UsageTarget::Gpu),
        KeyCode::Tab | KeyCode::BackTab => TrayEvent::ToggleTarget,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(']') => TrayEvent::NextGpu,
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('[') => TrayEvent::PrevGpu,
        _ => TrayEvent::None,
    }
}
