//! Keyboard input handling for the TUI.
//!
//! Translates key events into `App` state changes. Ctrl+C is handled by the
//! main loop before anything here runs.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use staffbook_core::form::FieldKind;

use crate::app::{App, AppState, EditMode, ViewState};

/// Handle keyboard input. Returns true if the app should quit.
pub fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // The loading overlay swallows input until every request is answered
    if app.is_loading() {
        return Ok(false);
    }

    match app.state.clone() {
        AppState::ShowingHelp => {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                app.state = AppState::Normal;
            }
            Ok(false)
        }
        AppState::ConfirmingQuit => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    app.state = AppState::Quitting;
                    return Ok(true);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            Ok(false)
        }
        AppState::ConfirmingDelete(_) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    app.state = AppState::Normal;
                }
                _ => {}
            }
            Ok(false)
        }
        AppState::Quitting => Ok(true),
        AppState::Normal => match app.view.clone() {
            ViewState::Listing => handle_list_input(app, key),
            ViewState::Editing(mode) => handle_form_input(app, &mode, key),
        },
    }
}

fn handle_list_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),
        KeyCode::Char('a') => app.start_create(),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_selected(),
        KeyCode::Char('n') => app.cycle_sort(),
        KeyCode::Char('u') => app.fetch_employees(),
        _ => {}
    }
    Ok(false)
}

fn handle_form_input(app: &mut App, mode: &EditMode, key: KeyEvent) -> Result<bool> {
    let field = app.form_focus;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        if let (KeyCode::Char('d'), EditMode::Updating(id)) = (key.code, mode) {
            app.request_delete(id.clone());
        }
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Enter => app.submit(),
        KeyCode::Tab | KeyCode::Down => app.form_focus = field.next(),
        KeyCode::BackTab | KeyCode::Up => app.form_focus = field.prev(),
        KeyCode::Backspace => app.form.pop_char(field),
        KeyCode::Left | KeyCode::Right if field.kind() == FieldKind::Choice => {
            app.form.cycle_choice(field, key.code == KeyCode::Right);
        }
        KeyCode::Left | KeyCode::Right if field.kind() == FieldKind::Toggle => {
            app.form.toggle(field);
        }
        KeyCode::Char(' ') if field.kind() == FieldKind::Choice => {
            app.form.cycle_choice(field, true);
        }
        KeyCode::Char(' ') if field.kind() == FieldKind::Toggle => {
            app.form.toggle(field);
        }
        KeyCode::Char(c) => {
            app.form.push_char(field, c);
        }
        _ => {}
    }
    Ok(false)
}
