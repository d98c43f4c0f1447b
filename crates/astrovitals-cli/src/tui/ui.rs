//! TUI rendering: everything is read back from the display state.
//!
//! ┌──────────────────────────────────────────────────────────┐
//! │  🚀 AstroVitals   Local Edge   00:42   60 fps             │
//! ├───────────┬───────────┬───────────┬───────────┬──────────┤
//! │ Heart Rate│ SpO2      │ Body Temp │ Respiration│ BP       │
//! │  72 bpm   │  98 %     │  36.6 °C  │  16 rpm   │ 120/80   │
//! ├───────────┴──────────┬┴───────────┴───────────┴──────────┤
//! │  HR trend            │  ECG                               │
//! │  ───~~~───           │  _/\_/^\___/\_/^\__                │
//! ├──────────────────────┼────────────────────────────────────┤
//! │  Anomaly detection   │  Forecast                          │
//! │  ████░░░░ 15% Low    │  predicted ± band                  │
//! ├──────────────────────┴────────────────────────────────────┤
//! │  c: inference mode   a: assistant   p: pause   q: quit    │
//! └──────────────────────────────────────────────────────────┘

use super::app::App;
use astrovitals_core::forecast;
use astrovitals_core::{MetricKind, Series, Slot, StyleSlot};
use ratatui::{prelude::*, widgets::*};

/// Fixed y range of the heart-rate trend chart.
const TREND_Y: [f64; 2] = [50.0, 120.0];
/// Fixed y range of the ECG chart.
const ECG_Y: [f64; 2] = [-2.0, 2.0];

pub fn draw(f: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // title
            Constraint::Length(4),  // vitals
            Constraint::Min(8),     // live charts
            Constraint::Length(10), // anomaly + forecast
            Constraint::Length(1),  // keys
        ])
        .split(f.area());

    draw_title(f, rows[0], app);
    draw_vitals(f, rows[1], app);
    draw_live_charts(f, rows[2], app);
    draw_insights(f, rows[3], app);
    draw_keys(f, rows[4]);
    draw_notification(f, app);
}

fn draw_title(f: &mut Frame, area: Rect, app: &App) {
    let secs = app.elapsed().as_secs();
    let mode = app.dashboard().inference_mode();
    let paused = if app.is_paused() { "  ⏸ paused" } else { "" };
    let seed = match app.seed() {
        Some(s) => format!("  seed {s}"),
        None => String::new(),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Line::from(vec![
            Span::styled(" 🚀 AstroVitals ", Style::default().bold().fg(Color::Cyan)),
            Span::raw("  model: "),
            Span::styled(mode.label(), Style::default().bold().fg(Color::Yellow)),
            Span::styled(
                format!(
                    "  {:02}:{:02}  {} fps{seed}{paused} ",
                    secs / 60,
                    secs % 60,
                    app.fps()
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]));

    f.render_widget(block, area);
}

fn draw_vitals(f: &mut Frame, area: Rect, app: &App) {
    let cards = [
        (MetricKind::HeartRate.label(), Slot::HeartRate, MetricKind::HeartRate.unit()),
        (MetricKind::Spo2.label(), Slot::Spo2, MetricKind::Spo2.unit()),
        (MetricKind::Temperature.label(), Slot::Temperature, MetricKind::Temperature.unit()),
        (MetricKind::Respiration.label(), Slot::Respiration, MetricKind::Respiration.unit()),
        ("Blood Pressure", Slot::BloodPressure, MetricKind::BpSystolic.unit()),
    ];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (i, (label, slot, unit)) in cards.into_iter().enumerate() {
        let value = app.display().text(slot);
        let line = Line::from(vec![
            Span::styled(value, Style::default().bold().fg(Color::White)),
            Span::styled(format!(" {unit}"), Style::default().fg(Color::DarkGray)),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {label} "));
        let p = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, cols[i]);
    }
}

fn draw_live_charts(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let display = app.display();

    let trend = display.series(Series::Trend);
    let latest = trend.latest();
    draw_series_chart(
        f,
        cols[0],
        &trend.points(),
        format!(" Heart-rate trend  {latest:.0} bpm "),
        Color::Red,
        TREND_Y,
    );

    let ecg = display.series(Series::Waveform);
    let segment = app
        .dashboard()
        .last_sample()
        .map_or("—", |s| s.segment.label());
    draw_series_chart(
        f,
        cols[1],
        &ecg.points(),
        format!(" ECG  lead II  {segment} "),
        Color::Green,
        ECG_Y,
    );
}

fn draw_series_chart(
    f: &mut Frame,
    area: Rect,
    data: &[(f64, f64)],
    title: String,
    color: Color,
    y: [f64; 2],
) {
    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color))
            .data(data),
    ];

    let x_max = (data.len().saturating_sub(1) as f64).max(1.0);
    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title(title))
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds(y).labels(vec![
            Line::from(format!("{:.0}", y[0])),
            Line::from(format!("{:.0}", y[1])),
        ]));

    f.render_widget(chart, area);
}

fn draw_insights(f: &mut Frame, area: Rect, app: &App) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    draw_anomaly(f, cols[0], app);
    draw_forecast(f, cols[1], app);
}

fn draw_anomaly(f: &mut Frame, area: Rect, app: &App) {
    let display = app.display();
    let alert = display.class(StyleSlot::AnomalyIndicator) == "alert";
    let accent = if alert { Color::Red } else { Color::Green };
    let risk_color = if display.class(StyleSlot::RiskLabel) == "warning-text" {
        Color::Red
    } else {
        Color::Green
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(" Anomaly detection ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status
            Constraint::Length(1), // meter
            Constraint::Length(1), // risk label
            Constraint::Min(1),    // factors
        ])
        .split(inner);

    let marker = if alert { "▲ " } else { "● " };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(marker, Style::default().fg(accent)),
        Span::styled(
            display.text(Slot::AnomalyStatus),
            Style::default().bold().fg(accent),
        ),
    ]));
    f.render_widget(status, parts[0]);

    let meter_color = if display.class(StyleSlot::RiskMeter) == "high" {
        Color::Red
    } else {
        Color::Green
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(meter_color).bg(Color::DarkGray))
        .percent(u16::from(display.meter()));
    f.render_widget(gauge, parts[1]);

    let risk = Paragraph::new(Line::from(vec![
        Span::raw("Risk: "),
        Span::styled(
            display.text(Slot::RiskLabel),
            Style::default().bold().fg(risk_color),
        ),
    ]));
    f.render_widget(risk, parts[2]);

    let factors: Vec<ListItem> = display
        .factors()
        .iter()
        .map(|factor| ListItem::new(format!("• {factor}")))
        .collect();
    let list = List::new(factors).style(Style::default().fg(Color::Gray));
    f.render_widget(list, parts[3]);
}

fn draw_forecast(f: &mut Frame, area: Rect, app: &App) {
    let predicted = forecast::series(&forecast::PREDICTED);
    let lower = forecast::series(&forecast::LOWER);
    let upper = forecast::series(&forecast::UPPER);
    let (y_min, y_max) = forecast::y_bounds();
    let last = (forecast::LABELS.len() - 1) as f64;

    let band = Style::default().fg(Color::DarkGray);
    let datasets = vec![
        Dataset::default()
            .name("upper")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(band)
            .data(&upper),
        Dataset::default()
            .name("lower")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(band)
            .data(&lower),
        Dataset::default()
            .name("predicted")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Magenta))
            .data(&predicted),
    ];

    let mode = app.dashboard().inference_mode();
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Forecast · {} ", mode.label())),
        )
        .x_axis(Axis::default().bounds([0.0, last]).labels(vec![
            Line::from(forecast::LABELS[0]),
            Line::from(forecast::LABELS[4]),
            Line::from(forecast::LABELS[forecast::LABELS.len() - 1]),
        ]))
        .y_axis(Axis::default().bounds([y_min, y_max]).labels(vec![
            Line::from(format!("{y_min:.0}")),
            Line::from(format!("{y_max:.0}")),
        ]));

    f.render_widget(chart, area);
}

fn draw_notification(f: &mut Frame, app: &App) {
    let Some(message) = app.display().latest_notification() else {
        return;
    };

    let area = centered(f.area(), 60, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Notice (d to dismiss) ");
    let p = Paragraph::new(message)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(block);
    f.render_widget(Clear, area);
    f.render_widget(p, area);
}

fn draw_keys(f: &mut Frame, area: Rect) {
    let bar = Paragraph::new(
        " c: toggle inference   a: ask assistant   p: pause   d: dismiss   q: quit",
    )
    .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(bar, area);
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
