//! Color constants and auto-scaling helpers for the dashboard.

use ratatui::style::Color;

/// PV-only cashflow line color.
pub const PV_ONLY_COLOR: Color = Color::Cyan;
/// PV + battery cashflow line color.
pub const BATTERY_COLOR: Color = Color::Green;
/// Monthly generation line color.
pub const GENERATION_COLOR: Color = Color::Yellow;
/// Monthly consumption line color.
pub const CONSUMPTION_COLOR: Color = Color::Red;
/// Self-consumption gauge color when high (>= 60%).
pub const SELF_USE_HIGH: Color = Color::Green;
/// Self-consumption gauge color when medium (>= 35%).
pub const SELF_USE_MID: Color = Color::Yellow;
/// Self-consumption gauge color when low (< 35%).
pub const SELF_USE_LOW: Color = Color::Red;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Returns a color based on the self-consumption share.
pub fn self_use_color(share: f64) -> Color {
    if share >= 0.6 {
        SELF_USE_HIGH
    } else if share >= 0.35 {
        SELF_USE_MID
    } else {
        SELF_USE_LOW
    }
}

/// Computes Y-axis bounds from two chart series with 10% padding.
pub fn auto_bounds_y(a: &[(f64, f64)], b: &[(f64, f64)]) -> [f64; 2] {
    let all = a.iter().chain(b.iter()).map(|&(_, y)| y);
    let min = all.clone().fold(f64::INFINITY, f64::min);
    let max = all.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() || !max.is_finite() {
        return [-1.0, 1.0];
    }
    let range = (max - min).max(0.1);
    let pad = range * 0.1;
    [min - pad, max + pad]
}
