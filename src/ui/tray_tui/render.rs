use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Wrap},
};

use super::app::TrayApp;
use super::widgets::{colored_gauge, IconPreview, PREVIEW_PIXELS};
use crate::core::usage::UsageTarget;
use crate::ui::report::ReportView;

/// Rows taken by the tray strip (icon preview plus borders)
pub const STRIP_HEIGHT: u16 = (PREVIEW_PIXELS / 2) as u16 + 2;

const REPORT_WIDTH: u16 = 64;
const REPORT_HEIGHT: u16 = 26;

/// Split the screen into the main area and the tray strip
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(STRIP_HEIGHT)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Where the report popup sits: bottom-right of the main area, above the tray
pub fn report_area(area: Rect) -> Rect {
    let (main, _) = main_layout(area);
    let width = REPORT_WIDTH.min(main.width);
    let height = REPORT_HEIGHT.min(main.height);
    Rect::new(
        main.x + main.width - width,
        main.y + main.height - height,
        width,
        height,
    )
}

/// Main render function
pub fn render_ui(frame: &mut Frame, app: &TrayApp) {
    let area = frame.area();
    let (main, strip) = main_layout(area);

    render_idle(frame, main);
    render_tray_strip(frame, strip, app);

    if app.report.is_open() {
        render_report(frame, report_area(area), app);
    }

    if app.show_help {
        render_help_overlay(frame, main);
    }
}

fn render_idle(frame: &mut Frame, area: Rect) {
    let hint = Paragraph::new(vec![
        Line::from(""),
        Line::from("Click the tray icon or press Enter to open the report."),
        Line::from("Press ? for help, q to quit.").dark_gray(),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(hint, area);
}

fn render_tray_strip(frame: &mut Frame, area: Rect, app: &TrayApp) {
    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Tray ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PREVIEW_PIXELS as u16 + 2),
            Constraint::Min(0),
        ])
        .split(inner);

    let icon = app.renderer.current().map(|icon| icon.bitmap());
    let icon_area = Rect::new(
        chunks[0].x + 1,
        chunks[0].y,
        chunks[0].width.saturating_sub(1),
        chunks[0].height,
    );
    frame.render_widget(IconPreview::new(icon), icon_area);

    let tooltip = if app.renderer.tooltip().is_empty() {
        "Waiting for the first reading...".to_string()
    } else {
        app.renderer.tooltip().to_string()
    };

    let text = vec![
        Line::from(Span::styled(
            tooltip,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Version {}", env!("CARGO_PKG_VERSION"))).dark_gray(),
        Line::from("Enter: report  Tab: CPU/GPU  q: quit").dark_gray(),
    ];
    frame.render_widget(Paragraph::new(text), chunks[1]);
}

fn render_report(frame: &mut Frame, area: Rect, app: &TrayApp) {
    let view = app.report.view();

    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Report ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(1), // Target toggle
        Constraint::Length(1), // CPU name
        Constraint::Length(1), // CPU gauge
        Constraint::Length(1), // GPU name
        Constraint::Length(1), // GPU gauge
        Constraint::Min(6),    // Chart
        Constraint::Length(1), // Memory
        Constraint::Length(1), // Network
    ];
    if view.show_battery {
        constraints.push(Constraint::Length(1));
    }
    if view.show_battery_health {
        constraints.push(Constraint::Length(1));
    }
    if view.gpu_selector.is_some() {
        constraints.push(Constraint::Length(1));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    frame.render_widget(Paragraph::new(target_toggle_line(view)), chunks[0]);

    frame.render_widget(
        Paragraph::new(labeled("CPU", &view.cpu_name)),
        chunks[1],
    );
    frame.render_widget(
        colored_gauge(view.cpu_usage as f64, &view.cpu_text),
        chunks[2],
    );
    frame.render_widget(
        Paragraph::new(labeled("GPU", &view.gpu_name)),
        chunks[3],
    );
    frame.render_widget(
        colored_gauge(view.gpu_usage as f64, &view.gpu_text),
        chunks[4],
    );

    render_chart(frame, chunks[5], app);

    frame.render_widget(
        Paragraph::new(labeled("Memory", &view.memory_text)),
        chunks[6],
    );
    frame.render_widget(
        Paragraph::new(labeled("Network", &view.network_text)),
        chunks[7],
    );

    let mut next = 8;
    if view.show_battery {
        let text = view.battery_text.as_deref().unwrap_or("-");
        frame.render_widget(Paragraph::new(labeled("Battery", text)), chunks[next]);
        next += 1;
    }
    if view.show_battery_health {
        let text = view.battery_health_text.as_deref().unwrap_or("-");
        frame.render_widget(Paragraph::new(labeled("Health", text)), chunks[next]);
        next += 1;
    }
    if let Some(selector) = &view.gpu_selector {
        let name = selector
            .names
            .get(selector.selected)
            .map(String::as_str)
            .unwrap_or("-");
        let line = Line::from(vec![
            Span::styled("Adapter  ", Style::default().fg(Color::DarkGray)),
            Span::raw(format!(
                "◀ {} ▶ ({}/{})",
                name,
                selector.selected + 1,
                selector.names.len()
            )),
        ]);
        frame.render_widget(Paragraph::new(line), chunks[next]);
    }
}

fn target_toggle_line(view: &ReportView) -> Line<'static> {
    let mut spans = Vec::new();
    for target in UsageTarget::all() {
        let (mark, style) = if view.is_selected(target) {
            (
                "(•) ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("( ) ", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(format!("{}{}   ", mark, target), style));
    }
    Line::from(spans)
}

fn labeled<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn render_chart(frame: &mut Frame, area: Rect, app: &TrayApp) {
    let target = app.report.view().target;
    let (points, capacity) = {
        let history = app.report.chart_history();
        let history = history.lock();
        (history.chart_points(), history.capacity())
    };

    let color = match target {
        UsageTarget::Cpu => Color::Cyan,
        UsageTarget::Gpu => Color::LightMagenta,
    };

    let dataset = Dataset::default()
        .name(target.as_str())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!(" {} usage history ", target))
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .x_axis(Axis::default().bounds([0.0, capacity.saturating_sub(1).max(1) as f64]))
        .y_axis(
            Axis::default()
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );

    frame.render_widget(chart, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let help_text = vec![
        Line::from("Keyboard Shortcuts".bold()),
        Line::from(""),
        Line::from("  Enter / r     Open or close the report"),
        Line::from("  Esc           Close the report, then quit"),
        Line::from("  c / g         Show CPU or GPU usage"),
        Line::from("  Tab           Toggle CPU / GPU"),
        Line::from("  ↑ / ↓         Select GPU adapter"),
        Line::from("  ? / h         Toggle this help"),
        Line::from("  q             Quit"),
        Line::from(""),
        Line::from("The report closes when the terminal loses focus.").dark_gray(),
    ];

    let width = 54.min(area.width);
    let height = (help_text.len() as u16 + 2).min(area.height);
    let popup = Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    );

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(help_text)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Help ")),
        popup,
    );
}
