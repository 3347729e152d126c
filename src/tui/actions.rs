use std::time::Instant;

use super::state::AppState;
use crate::controller::Phase;

/// Process the current state: apply finished fetches, then run timers.
pub fn process_state(state: &mut AppState) {
    let now = Instant::now();
    state.drain_completions(now);

    if state.controller.phase() == Phase::Ready && state.auto_advance.poll(now) {
        state.next_page();
    }
}
