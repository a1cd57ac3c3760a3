//! JavaScript bridge for the UI shell
//!
//! Messages are passed via CustomEvents on the window object, with the JSON
//! encoding in `detail`.

use std::cell::RefCell;
use std::collections::VecDeque;

use drawboard_ipc::{BoardToUi, UiToBoard, decode_ui_message, encode_board_message};
use wasm_bindgen::prelude::*;

/// Event the UI dispatches on `window` to reach the board
pub const UI_TO_BOARD_EVENT: &str = "drawboard:ui-to-board";
/// Event the board dispatches on `window` to reach the UI
pub const BOARD_TO_UI_EVENT: &str = "drawboard:board-to-ui";

thread_local! {
    /// Queue of messages received from the UI
    static MESSAGE_QUEUE: RefCell<VecDeque<UiToBoard>> = const { RefCell::new(VecDeque::new()) };
}

/// Initialize the JavaScript event listener
pub fn init_bridge() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;

    let closure = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
        let Some(detail) = event.detail().as_string() else {
            web_sys::console::warn_1(&"UI message without string detail".into());
            return;
        };
        match decode_ui_message(&detail) {
            Ok(msg) => MESSAGE_QUEUE.with(|queue| queue.borrow_mut().push_back(msg)),
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to parse UI message: {}", e).into());
            }
        }
    }) as Box<dyn FnMut(_)>);

    window.add_event_listener_with_callback(UI_TO_BOARD_EVENT, closure.as_ref().unchecked_ref())?;

    // Lives as long as the page
    closure.forget();

    web_sys::console::log_1(&"Drawboard WASM bridge initialized".into());
    Ok(())
}

/// Poll for the next message from the UI (non-blocking)
pub fn poll_ui_message() -> Option<UiToBoard> {
    MESSAGE_QUEUE.with(|queue| queue.borrow_mut().pop_front())
}

/// Send a message to the UI
pub fn send_to_ui(msg: &BoardToUi) {
    if let Err(e) = dispatch(msg) {
        web_sys::console::error_2(&"Failed to send board message:".into(), &e);
    }
}

fn dispatch(msg: &BoardToUi) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let json = encode_board_message(msg).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let init = web_sys::CustomEventInit::new();
    init.set_detail(&JsValue::from_str(&json));
    let event = web_sys::CustomEvent::new_with_event_init_dict(BOARD_TO_UI_EVENT, &init)?;

    window.dispatch_event(&event)?;
    Ok(())
}
