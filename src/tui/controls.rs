//! Keyboard input handling for the dashboard.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Right | KeyCode::Up => app.adjust_kwp(0.5),
        KeyCode::Left | KeyCode::Down => app.adjust_kwp(-0.5),
        KeyCode::Char('B') => app.adjust_battery(1.0),
        KeyCode::Char('b') => app.adjust_battery(-1.0),
        KeyCode::Char('e') => app.toggle_ev(),
        KeyCode::Char('m') => app.cycle_heating(),
        KeyCode::Tab => app.toggle_view(),
        KeyCode::Char('1') => app.switch_preset("baseline"),
        KeyCode::Char('2') => app.switch_preset("heat_pump_ev"),
        KeyCode::Char('3') => app.switch_preset("financed"),
        KeyCode::Char('r') => app.restart(),
        _ => {}
    }
}
