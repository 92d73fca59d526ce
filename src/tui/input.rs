//! Input handling and keybindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::StatusFilter;

use super::dashboard::{Dashboard, InputMode};

/// Result of handling a key event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    /// No action, continue.
    None,
    /// Quit the application.
    Quit,
    /// Run a refresh cycle now.
    Refresh,
    /// Open (or reopen) the details panel for the selected row.
    OpenDetails,
    /// Open the settings modal.
    OpenSettings,
    /// Submit the settings modal.
    SaveSettings,
}

/// Handles key input and updates the dashboard.
pub fn handle_key(dash: &mut Dashboard, key: KeyEvent) -> KeyAction {
    if dash.show_quit_confirm {
        return handle_quit_confirm(dash, key);
    }
    match dash.input_mode {
        InputMode::Normal => handle_normal_mode(dash, key),
        InputMode::Namespace | InputMode::Workload => handle_text_filter_mode(dash, key),
        InputMode::Retention => handle_retention_mode(dash, key),
    }
}

fn handle_quit_confirm(dash: &mut Dashboard, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q') => {
            dash.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            dash.show_quit_confirm = false;
            KeyAction::Quit
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => {
            dash.show_quit_confirm = false;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(dash: &mut Dashboard, key: KeyEvent) -> KeyAction {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            dash.show_quit_confirm = true;
            KeyAction::None
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,

        // Status filter buttons (blocked while a popup covers the table)
        KeyCode::Char('1') | KeyCode::Char('2') | KeyCode::Char('3') | KeyCode::Char('4')
            if dash.any_popup_open() =>
        {
            dash.status_message = Some("Close popup (Esc) before changing filters".to_string());
            KeyAction::None
        }
        KeyCode::Char('1') => {
            dash.set_status_filter(StatusFilter::All);
            KeyAction::None
        }
        KeyCode::Char('2') => {
            dash.set_status_filter(StatusFilter::Disrupted);
            KeyAction::None
        }
        KeyCode::Char('3') => {
            dash.set_status_filter(StatusFilter::Oom);
            KeyAction::None
        }
        KeyCode::Char('4') => {
            dash.set_status_filter(StatusFilter::Termination);
            KeyAction::None
        }

        // Row navigation, or popup scroll when one is open
        KeyCode::Up | KeyCode::Char('k') => {
            if dash.show_help {
                dash.help_scroll = dash.help_scroll.saturating_sub(1);
            } else if dash.details.visible {
                dash.details.scroll = dash.details.scroll.saturating_sub(1);
            } else {
                dash.table.select_up();
            }
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if dash.show_help {
                dash.help_scroll = dash.help_scroll.saturating_add(1);
            } else if dash.details.visible {
                // Clamped during render
                dash.details.scroll = dash.details.scroll.saturating_add(1);
            } else {
                dash.table.select_down();
            }
            KeyAction::None
        }
        KeyCode::PageUp => {
            if dash.show_help {
                dash.help_scroll = dash.help_scroll.saturating_sub(10);
            } else if dash.details.visible {
                dash.details.scroll = dash.details.scroll.saturating_sub(10);
            } else {
                dash.table.page_up(20);
            }
            KeyAction::None
        }
        KeyCode::PageDown => {
            if dash.show_help {
                dash.help_scroll = dash.help_scroll.saturating_add(10);
            } else if dash.details.visible {
                dash.details.scroll = dash.details.scroll.saturating_add(10);
            } else {
                dash.table.page_down(20);
            }
            KeyAction::None
        }
        KeyCode::Home => {
            if !dash.any_popup_open() {
                dash.table.select_first();
            }
            KeyAction::None
        }
        KeyCode::End => {
            if !dash.any_popup_open() {
                dash.table.select_last();
            }
            KeyAction::None
        }

        // Sorting
        KeyCode::Char('s') | KeyCode::Char('S') => {
            dash.next_sort_column();
            KeyAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            dash.toggle_sort_direction();
            KeyAction::None
        }

        // Text filters
        KeyCode::Char('/') | KeyCode::Char('n') => {
            dash.input_mode = InputMode::Namespace;
            KeyAction::None
        }
        KeyCode::Char('w') | KeyCode::Char('W') => {
            dash.input_mode = InputMode::Workload;
            KeyAction::None
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            dash.cycle_kind_filter();
            KeyAction::None
        }

        // Pause/Resume the refresh timer
        KeyCode::Char(' ') => {
            dash.paused = !dash.paused;
            KeyAction::None
        }

        // Manual refresh
        KeyCode::Char('u') | KeyCode::Char('U') | KeyCode::F(5) => KeyAction::Refresh,

        // Settings modal
        KeyCode::Char('o') | KeyCode::Char('O') => {
            if dash.any_popup_open() {
                KeyAction::None
            } else {
                KeyAction::OpenSettings
            }
        }

        // Help popup
        KeyCode::Char('?') | KeyCode::Char('H') => {
            dash.show_help = !dash.show_help;
            if dash.show_help {
                dash.help_scroll = 0;
            }
            KeyAction::None
        }

        // Details panel (Enter toggles for the selected workload)
        KeyCode::Enter => {
            if dash.details.visible {
                dash.details.close();
                KeyAction::None
            } else if dash.settings.visible || dash.show_help {
                KeyAction::None
            } else {
                KeyAction::OpenDetails
            }
        }

        // Close popups and clear the status line with Escape
        KeyCode::Esc => {
            dash.status_message = None;
            if dash.details.visible {
                dash.details.close();
            } else if dash.settings.visible {
                dash.settings.close();
                dash.input_mode = InputMode::Normal;
            } else if dash.show_help {
                dash.show_help = false;
            }
            KeyAction::None
        }

        _ => KeyAction::None,
    }
}

/// Handles keys while editing the namespace or workload text filter. Edits
/// apply in real time, like typing into the filter inputs.
fn handle_text_filter_mode(dash: &mut Dashboard, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            active_input(dash).clear();
            dash.input_mode = InputMode::Normal;
            dash.apply_live_filter();
            KeyAction::None
        }
        KeyCode::Enter => {
            // Filter is already applied in real time, just leave the mode
            dash.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Backspace => {
            active_input(dash).pop();
            dash.apply_live_filter();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            active_input(dash).push(c);
            dash.apply_live_filter();
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

fn active_input(dash: &mut Dashboard) -> &mut String {
    match dash.input_mode {
        InputMode::Workload => &mut dash.workload_input,
        _ => &mut dash.namespace_input,
    }
}

/// Handles keys while the settings modal owns the input.
fn handle_retention_mode(dash: &mut Dashboard, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            dash.settings.close();
            dash.input_mode = InputMode::Normal;
            KeyAction::None
        }
        KeyCode::Enter => KeyAction::SaveSettings,
        KeyCode::Backspace => {
            dash.settings.input.pop();
            dash.settings.error = None;
            KeyAction::None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                return KeyAction::None;
            }
            dash.settings.input.push(c);
            dash.settings.error = None;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PersistentViewState, StateStore};
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn dashboard() -> (Dashboard, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        let dash = Dashboard::new(
            PersistentViewState::load(store),
            "mock://cluster".to_string(),
        );
        (dash, dir)
    }

    #[test]
    fn status_filter_switches_with_number_keys() {
        let (mut dash, _dir) = dashboard();
        assert_eq!(dash.view_state.active_filter(), StatusFilter::All);

        let action = handle_key(&mut dash, key(KeyCode::Char('3')));
        assert_eq!(action, KeyAction::None);
        assert_eq!(dash.view_state.active_filter(), StatusFilter::Oom);

        let _ = handle_key(&mut dash, key(KeyCode::Char('1')));
        assert_eq!(dash.view_state.active_filter(), StatusFilter::All);
    }

    #[test]
    fn quit_requires_confirmation_and_quits_on_qq() {
        let (mut dash, _dir) = dashboard();

        let action = handle_key(&mut dash, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::None);
        assert!(dash.show_quit_confirm);

        let action = handle_key(&mut dash, key(KeyCode::Char('q')));
        assert_eq!(action, KeyAction::Quit);
        assert!(!dash.show_quit_confirm);
    }

    #[test]
    fn quit_confirmation_cancels_on_esc() {
        let (mut dash, _dir) = dashboard();

        let _ = handle_key(&mut dash, key(KeyCode::Char('q')));
        assert!(dash.show_quit_confirm);

        let action = handle_key(&mut dash, key(KeyCode::Esc));
        assert_eq!(action, KeyAction::None);
        assert!(!dash.show_quit_confirm);
    }

    #[test]
    fn namespace_filter_applies_while_typing() {
        let (mut dash, _dir) = dashboard();

        let _ = handle_key(&mut dash, key(KeyCode::Char('/')));
        assert_eq!(dash.input_mode, InputMode::Namespace);

        let _ = handle_key(&mut dash, key(KeyCode::Char('p')));
        let _ = handle_key(&mut dash, key(KeyCode::Char('r')));
        assert_eq!(dash.namespace_input, "pr");

        // Enter keeps the filter, Esc would clear it
        let _ = handle_key(&mut dash, key(KeyCode::Enter));
        assert_eq!(dash.input_mode, InputMode::Normal);
        assert_eq!(dash.namespace_input, "pr");
    }

    #[test]
    fn escape_cancels_text_filter() {
        let (mut dash, _dir) = dashboard();

        let _ = handle_key(&mut dash, key(KeyCode::Char('w')));
        let _ = handle_key(&mut dash, key(KeyCode::Char('a')));
        assert_eq!(dash.workload_input, "a");

        let _ = handle_key(&mut dash, key(KeyCode::Esc));
        assert_eq!(dash.input_mode, InputMode::Normal);
        assert_eq!(dash.workload_input, "");
    }

    #[test]
    fn filter_keys_blocked_when_popup_open() {
        let (mut dash, _dir) = dashboard();
        dash.show_help = true;

        let _ = handle_key(&mut dash, key(KeyCode::Char('2')));
        assert_eq!(dash.view_state.active_filter(), StatusFilter::All);
        assert!(dash.status_message.is_some());

        // After closing the popup the key works again
        let _ = handle_key(&mut dash, key(KeyCode::Esc));
        assert!(!dash.show_help);
        assert!(dash.status_message.is_none());

        let _ = handle_key(&mut dash, key(KeyCode::Char('2')));
        assert_eq!(dash.view_state.active_filter(), StatusFilter::Disrupted);
    }

    #[test]
    fn space_toggles_pause() {
        let (mut dash, _dir) = dashboard();
        assert!(!dash.paused);
        let _ = handle_key(&mut dash, key(KeyCode::Char(' ')));
        assert!(dash.paused);
        let _ = handle_key(&mut dash, key(KeyCode::Char(' ')));
        assert!(!dash.paused);
    }

    #[test]
    fn enter_requests_details_and_toggles_closed() {
        let (mut dash, _dir) = dashboard();

        let action = handle_key(&mut dash, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::OpenDetails);

        dash.details.visible = true;
        let action = handle_key(&mut dash, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::None);
        assert!(!dash.details.visible);
    }

    #[test]
    fn retention_mode_routes_digits_to_modal() {
        let (mut dash, _dir) = dashboard();
        dash.input_mode = InputMode::Retention;
        dash.settings.visible = true;

        let _ = handle_key(&mut dash, key(KeyCode::Char('4')));
        let _ = handle_key(&mut dash, key(KeyCode::Char('8')));
        assert_eq!(dash.settings.input, "48");

        let action = handle_key(&mut dash, key(KeyCode::Enter));
        assert_eq!(action, KeyAction::SaveSettings);
    }

    #[test]
    fn sort_keys_cycle_and_reverse() {
        let (mut dash, _dir) = dashboard();

        let _ = handle_key(&mut dash, key(KeyCode::Char('s')));
        let sort = dash.view_state.sort().unwrap();
        assert_eq!(sort.column, 0);
        assert!(sort.ascending);

        let _ = handle_key(&mut dash, key(KeyCode::Char('r')));
        let sort = dash.view_state.sort().unwrap();
        assert_eq!(sort.column, 0);
        assert!(!sort.ascending);

        let _ = handle_key(&mut dash, key(KeyCode::Char('s')));
        let sort = dash.view_state.sort().unwrap();
        assert_eq!(sort.column, 1);
        assert!(sort.ascending);
    }
}
