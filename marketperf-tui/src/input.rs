//! Keyboard input dispatch: global keys first, then the focused pane.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Focus, CURSOR_JUMP};

/// Handle a key event, re-running the comparison when the selection changes.
pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Global keys.
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus = app.focus.prev();
            } else {
                app.focus = app.focus.next();
            }
            return;
        }
        KeyCode::BackTab => {
            app.focus = app.focus.prev();
            return;
        }
        KeyCode::Char('i') => {
            app.toggle_inflation();
            return;
        }
        _ => {}
    }

    // 2. Pane-specific keys.
    match app.focus {
        Focus::Periods | Focus::Instruments => handle_list_key(app, key),
        Focus::Chart => handle_chart_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) {
    let Some(list) = app.focused_list() else {
        return;
    };
    let changed = match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            list.move_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            list.move_up();
            false
        }
        KeyCode::Char(' ') | KeyCode::Enter => {
            list.toggle();
            true
        }
        KeyCode::Char('c') => {
            list.clear();
            true
        }
        _ => false,
    };
    if changed {
        app.recompute();
    }
}

fn handle_chart_key(app: &mut AppState, key: KeyEvent) {
    let jump = CURSOR_JUMP as isize;
    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(-1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(1),
        KeyCode::Char('H') => app.move_cursor(-jump),
        KeyCode::Char('L') => app.move_cursor(jump),
        KeyCode::Home => app.cursor_day = 0,
        KeyCode::End => app.move_cursor(isize::MAX),
        _ => {}
    }
}

/// Key bindings help text.
pub fn key_bindings_help() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Tab/S-Tab", "Focus"),
        ("j/k", "Move"),
        ("Space", "Select"),
        ("c", "Clear"),
        ("i", "Inflation"),
        ("h/l H/L", "Cursor"),
        ("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::fixture_app;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::from(code));
    }

    #[test]
    fn quit_on_q_and_esc() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = fixture_app();
        press(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn tab_and_backtab_cycle_focus() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Instruments);
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Chart);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = fixture_app();
        let mut key = KeyEvent::from(KeyCode::Char('q'));
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }

    #[test]
    fn space_selects_and_recomputes() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.periods.picked_count(), 1);
        assert_eq!(app.instruments.picked_count(), 1);
        assert!(app.chart.is_some());

        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.instruments.picked_count(), 0);
        assert!(app.chart.is_none());
    }

    #[test]
    fn i_toggles_inflation_from_any_pane() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('i'));
        assert!(app.inflation_adjusted);
        press(&mut app, KeyCode::Char('i'));
        assert!(!app.inflation_adjusted);
    }

    #[test]
    fn chart_keys_move_the_day_cursor() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Chart);

        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.cursor_day, 2);
        press(&mut app, KeyCode::Char('L'));
        assert_eq!(app.cursor_day, 22);
        press(&mut app, KeyCode::Char('H'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.cursor_day, 1);
        press(&mut app, KeyCode::End);
        assert_eq!(app.cursor_day, app.chart.as_ref().unwrap().max_day());
    }

    #[test]
    fn j_k_move_in_focused_list_only() {
        let mut app = fixture_app();
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.periods.cursor, 1);
        assert_eq!(app.instruments.cursor, 0);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.instruments.cursor, 2);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.instruments.cursor, 1);
    }
}
