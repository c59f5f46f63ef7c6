use dioxus::prelude::*;
use crate::models::CallView;

/// Global call view, mirrored from the call controller
pub static CALL_VIEW: GlobalSignal<CallView> = Signal::global(CallView::default);

pub fn publish(view: &CallView) {
    let mut state = CALL_VIEW.write();
    if *state != *view {
        *state = view.clone();
    }
}
