use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use super::state::AppState;
use crate::catalog::CATEGORIES;

/// Main event handler.
pub fn handle_event(event: Event, state: &mut AppState) {
    if let Event::Key(key_event) = event {
        handle_key(key_event, state);
    }
}

fn handle_key(event: KeyEvent, state: &mut AppState) {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match event.code {
        KeyCode::Left => {
            state.previous_page();
            restart_timer(state);
        }
        KeyCode::Right => {
            state.next_page();
            restart_timer(state);
        }
        KeyCode::Char('[') => state.drag_strip(-1.0),
        KeyCode::Char(']') => state.drag_strip(1.0),
        KeyCode::Enter => {
            let id = state.selector.visible().id;
            state.select_category(id);
        }
        KeyCode::Char(c @ '1'..='6') => {
            let index = c as usize - '1' as usize;
            state.select_category(CATEGORIES[index].id);
        }
        KeyCode::Char('r') => state.retry(),
        KeyCode::Char('q') | KeyCode::Esc => {
            state.should_quit = true;
        }
        _ => {}
    }
}

/// Manual paging pushes the next auto-advance back a full interval.
fn restart_timer(state: &mut AppState) {
    if state.auto_advance.is_running() {
        state.auto_advance.start(Instant::now());
    }
}
