//! Dashboard layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, Paragraph};

use crate::model::generation::MONTH_NAMES;

use super::runtime::{App, ChartView};
use super::style;

/// Renders the full dashboard frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(3), // self-consumption gauge
            Constraint::Length(5), // status panel
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.view {
        ChartView::Cashflow => render_cashflow_chart(frame, app, chunks[1]),
        ChartView::MonthlyEnergy => render_energy_chart(frame, app, chunks[1]),
    }
    render_self_use_gauge(frame, app, chunks[2]);
    render_status(frame, app, chunks[3]);
    render_footer(frame, chunks[4]);
}

/// Header bar: preset name and the editable scenario parameters.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let ev_label = if app.scenario.ev.enabled { "EV" } else { "no EV" };

    let header = Line::from(vec![
        Span::styled(
            " SOLAR-ECON ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ {:.1} kWp │ {:.0} kWh battery │ {} │ {} ",
            app.scenario.system.kwp,
            app.scenario.system.battery_kwh,
            app.heating_label(),
            ev_label,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Cumulative cashflow chart, PV-only vs PV + battery.
fn render_cashflow_chart(frame: &mut Frame, app: &App, area: Rect) {
    let pv_data: Vec<(f64, f64)> = app
        .projection
        .cashflow_pv_only
        .years
        .iter()
        .map(|y| (y.year as f64, y.cumulative_gbp))
        .collect();

    let battery_data: Vec<(f64, f64)> = app
        .projection
        .cashflow_with_battery
        .years
        .iter()
        .map(|y| (y.year as f64, y.cumulative_gbp))
        .collect();

    let y_bounds = style::auto_bounds_y(&pv_data, &battery_data);
    let x_hi = pv_data.last().map_or(1.0, |p| p.0);

    let datasets = vec![
        Dataset::default()
            .name("PV only")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::PV_ONLY_COLOR))
            .data(&pv_data),
        Dataset::default()
            .name("PV + battery")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::BATTERY_COLOR))
            .data(&battery_data),
    ];

    let y_label_lo = format!("£{:.0}", y_bounds[0]);
    let y_label_hi = format!("£{:.0}", y_bounds[1]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Cumulative Cashflow ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("year")
                .bounds([1.0, x_hi])
                .labels(vec!["1".to_string(), format!("{x_hi:.0}")]),
        )
        .y_axis(
            Axis::default()
                .title("GBP")
                .bounds(y_bounds)
                .labels(vec![y_label_lo, y_label_hi]),
        );

    frame.render_widget(chart, area);
}

/// Monthly generation vs consumption chart.
fn render_energy_chart(frame: &mut Frame, app: &App, area: Rect) {
    let gen_data: Vec<(f64, f64)> = app
        .projection
        .monthly_generation_kwh
        .iter()
        .enumerate()
        .map(|(i, &kwh)| (i as f64 + 1.0, kwh))
        .collect();

    let cons_data: Vec<(f64, f64)> = app
        .projection
        .monthly_consumption_kwh
        .iter()
        .enumerate()
        .map(|(i, &kwh)| (i as f64 + 1.0, kwh))
        .collect();

    let y_bounds = style::auto_bounds_y(&gen_data, &cons_data);

    let datasets = vec![
        Dataset::default()
            .name("Generation")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::GENERATION_COLOR))
            .data(&gen_data),
        Dataset::default()
            .name("Consumption")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(style::CONSUMPTION_COLOR))
            .data(&cons_data),
    ];

    let y_label_lo = format!("{:.0}", y_bounds[0]);
    let y_label_hi = format!("{:.0}", y_bounds[1]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Monthly Energy ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("month")
                .bounds([1.0, 12.0])
                .labels(vec![
                    MONTH_NAMES[0].to_string(),
                    MONTH_NAMES[5].to_string(),
                    MONTH_NAMES[11].to_string(),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("kWh")
                .bounds(y_bounds)
                .labels(vec![y_label_lo, y_label_hi]),
        );

    frame.render_widget(chart, area);
}

/// Self-consumption gauge for the current scenario.
fn render_self_use_gauge(frame: &mut Frame, app: &App, area: Rect) {
    let share = app.projection.balance.self_consumption_share();
    let color = style::self_use_color(share);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Self-consumption ")
                .borders(Borders::ALL),
        )
        .gauge_style(Style::default().fg(color))
        .ratio(share.clamp(0.0, 1.0))
        .label(format!("{:.0}%", share * 100.0));
    frame.render_widget(gauge, area);
}

/// Status panel with headline financials for both variants.
fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let p = &app.projection;
    let payback = |y: Option<usize>| match y {
        Some(y) => format!("yr {y}"),
        None => "none".to_string(),
    };

    let lines = vec![
        Line::from(format!(
            "  generation={:>6.0} kWh  demand={:>6.0} kWh  import={:>6.0} kWh",
            p.generation.realistic_kwh,
            p.balance.total_demand_kwh,
            p.active_grid_import_kwh(),
        )),
        Line::from(format!(
            "  PV only:      save £{:>7.0}/yr  payback {:>5}  NPV £{:>8.0}",
            p.annual_pv_only.net_saving_gbp,
            payback(p.cashflow_pv_only.payback_year),
            p.cashflow_pv_only.npv_gbp,
        )),
        Line::from(format!(
            "  PV + battery: save £{:>7.0}/yr  payback {:>5}  NPV £{:>8.0}",
            p.annual_with_battery.net_saving_gbp,
            payback(p.cashflow_with_battery.payback_year),
            p.cashflow_with_battery.npv_gbp,
        )),
    ];

    let block = Block::default().title(" Economics ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ←/→:kWp  b/B:Battery  e:EV  m:Heating  Tab:Chart  1/2/3:Preset  r:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
