use super::{AppState, FocusStateResponse};

pub fn set_focus_mode(state: &AppState, enabled: bool) {
    state.focus.set_enabled(enabled);
}

pub fn get_focus_state(state: &AppState) -> FocusStateResponse {
    FocusStateResponse::from(state.focus.get_state())
}
