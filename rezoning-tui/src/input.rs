//! Keyboard input dispatch — blocking notice → guide shortcuts → text entry
//! → host keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use rezoning_core::{Key, KeyPress};

use crate::app::AppState;
use crate::view;

/// Translate a crossterm key event. Keys the guide has no use for map to
/// `None`.
pub fn to_key_press(event: KeyEvent) -> Option<KeyPress> {
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Backspace,
        _ => return None,
    };
    Some(KeyPress {
        key,
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        meta: event.modifiers.contains(KeyModifiers::SUPER),
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
    })
}

pub fn handle_key(app: &mut AppState, event: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if event.kind != KeyEventKind::Press {
        return;
    }

    // 1. A blocking notice swallows the next key.
    if app.guide.notifications().blocking().is_some() {
        app.guide.acknowledge_alert();
        return;
    }

    let Some(press) = to_key_press(event) else {
        return;
    };
    let tab_before = app.active_tab();

    // 2. Guide shortcuts, Escape, tab-list arrows.
    if !app.guide.handle_key(press).is_consumed() {
        // 3. Text entry into the focused field.
        if !edit_field(app, press) {
            // 4. Host keys.
            handle_host_key(app, press);
        }
    }

    if app.active_tab() != tab_before {
        let (labels, selected) = view::tab_labels(&app.guide);
        if let Some(label) = labels.get(selected) {
            app.guide.announce(&format!("Showing {label}"));
        }
    }
    app.sync_scroll();
}

/// Returns true if `press` edited the focused text field.
fn edit_field(app: &mut AppState, press: KeyPress) -> bool {
    let Some(field) = app.focused_text_field() else {
        return false;
    };
    let mut value = app.guide.field_value(field);
    match press.key {
        Key::Char(c) if !press.is_command() => value.push(c),
        Key::Backspace => {
            value.pop();
        }
        _ => return false,
    }
    app.guide.input(field, &value);
    true
}

fn handle_host_key(app: &mut AppState, press: KeyPress) {
    match press.key {
        Key::Char('c') if press.ctrl => app.quit(),
        Key::Char('q') if !press.is_command() => app.quit(),
        // Terminals rarely deliver Ctrl+/; `?` opens the same summary.
        Key::Char('?') => app.guide.show_shortcuts(),
        Key::Tab => app.guide.focus_next(),
        Key::BackTab => app.guide.focus_prev(),
        Key::Enter | Key::Char(' ') => app.guide.activate_focused(),
        Key::Down | Key::Char('j') => app.scroll_by(1),
        Key::Up | Key::Char('k') => app.scroll_by(-1),
        _ => {}
    }
}
