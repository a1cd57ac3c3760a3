//! Drawboard WASM build
//!
//! Runs the drawing board inside the browser. Strokes rasterize into the
//! board's own pixel buffer and each animation frame copies it onto an HTML
//! canvas. The UI shell talks to the board through CustomEvents on window
//! (see [`bridge`]) or through the exported [`Drawboard`] handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use drawboard_config::{DisplayConfig, MAX_BRUSH_SIZE, MIN_BRUSH_SIZE};
use drawboard_ipc::{
    BoardToUi, BrushCommand, BrushKind, ExportFormat, ExportRequest, InputEvent, UiToBoard,
};
use painting::{DownloadSink, DrawingBoard, HashScatter};
use wasm_bindgen::prelude::*;
use web_sys::{AddEventListenerOptions, CanvasRenderingContext2d, Document, HtmlCanvasElement};

mod bridge;
mod download;
mod input;
mod present;

use download::AnchorDownload;

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    bridge::init_bridge()
}

/// Suggested brush size slider bounds, `[min, max]` in CSS pixels
#[wasm_bindgen(js_name = brushSizeRange)]
pub fn brush_size_range() -> Vec<f32> {
    vec![MIN_BRUSH_SIZE, MAX_BRUSH_SIZE]
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

fn send_all(replies: Vec<BoardToUi>) {
    for reply in &replies {
        bridge::send_to_ui(reply);
    }
}

/// State shared between the handle, the DOM listeners and the frame loop
struct Mounted {
    board: DrawingBoard,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    document: Document,
    dirty: bool,
}

impl Mounted {
    fn apply_input(&mut self, event: &InputEvent) {
        if self.board.handle_input(event).is_some() {
            self.dirty = true;
        }
    }

    /// Apply a UI message, returning the replies for the UI.
    ///
    /// Replies are sent by the caller once the state borrow is released, so
    /// UI listeners may call back into the handle.
    fn apply(&mut self, msg: &UiToBoard) -> Vec<BoardToUi> {
        let reply = self.board.handle_message(msg, now_ms());

        match msg {
            UiToBoard::Input(_) => self.dirty = true,
            UiToBoard::Resize { .. } => {
                if let Some(surface) = self.board.surface() {
                    if let Err(e) = present::fit_canvas(&self.canvas, surface) {
                        web_sys::console::error_2(&"Failed to resize canvas:".into(), &e);
                    }
                }
                self.dirty = true;
            }
            UiToBoard::BrushCommand(_) | UiToBoard::Export(_) => {}
        }

        let Some(reply) = reply else {
            return Vec::new();
        };
        let mut replies = Vec::with_capacity(2);
        if let BoardToUi::ExportReady {
            filename, data_url, ..
        } = &reply
        {
            let mut sink = AnchorDownload::new(self.document.clone());
            if let Err(e) = sink.deliver(filename, data_url) {
                replies.push(BoardToUi::Error {
                    code: "download_failed".to_string(),
                    message: e.to_string(),
                });
            }
        }
        replies.push(reply);
        replies
    }

    fn present_if_dirty(&mut self) {
        if !self.dirty {
            return;
        }
        if let Some(surface) = self.board.surface() {
            if let Err(e) = present::present(&self.ctx, surface) {
                web_sys::console::error_2(&"Failed to present surface:".into(), &e);
            }
        }
        self.dirty = false;
    }
}

type Listener = Closure<dyn FnMut(web_sys::Event)>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// A drawing board mounted on a canvas element
#[wasm_bindgen]
pub struct Drawboard {
    state: Rc<RefCell<Mounted>>,
    listeners: Vec<(&'static str, Listener)>,
    running: Rc<Cell<bool>>,
}

#[wasm_bindgen]
impl Drawboard {
    /// Mount on the canvas with id `canvas_id`, `width` x `height` CSS pixels
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, width: u32, height: u32) -> Result<Drawboard, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;
        let ctx = present::context_2d(&canvas)?;

        let dpr = window.device_pixel_ratio() as f32;
        let display = DisplayConfig::new(width, height).with_device_pixel_ratio(dpr);
        // Fresh spray pattern per page load
        let scatter = HashScatter::from_unit(js_sys::Math::random());
        let mut board = DrawingBoard::with_scatter(display, scatter);
        board.mount();
        if let Some(surface) = board.surface() {
            present::fit_canvas(&canvas, surface)?;
        }

        let state = Rc::new(RefCell::new(Mounted {
            board,
            canvas,
            ctx,
            document,
            dirty: true,
        }));

        let mut handle = Drawboard {
            state,
            listeners: Vec::new(),
            running: Rc::new(Cell::new(true)),
        };
        handle.attach_listeners()?;
        handle.start_frame_loop()?;

        bridge::send_to_ui(&BoardToUi::SurfaceReady { width, height });
        web_sys::console::log_1(&format!("Drawboard mounted on #{}", canvas_id).into());
        Ok(handle)
    }

    /// Resize to `width` x `height` CSS pixels. Clears the drawing.
    pub fn resize(&self, width: u32, height: u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0);
        let replies = self.state.borrow_mut().apply(&UiToBoard::Resize {
            width,
            height,
            device_pixel_ratio: dpr,
        });
        send_all(replies);
    }

    /// `pencil`, `brush` or `spray`
    #[wasm_bindgen(js_name = setBrush)]
    pub fn set_brush(&self, kind: &str) -> Result<(), JsValue> {
        let kind: BrushKind = kind.parse().map_err(js_error)?;
        self.brush(BrushCommand::SetKind { kind });
        Ok(())
    }

    #[wasm_bindgen(js_name = setSize)]
    pub fn set_size(&self, size: f32) {
        self.brush(BrushCommand::SetSize { size });
    }

    /// `#RRGGBB`; returns false (keeping the current color) if invalid
    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&self, hex: &str) -> bool {
        self.state.borrow_mut().board.set_color(hex)
    }

    #[wasm_bindgen(js_name = setOpacity)]
    pub fn set_opacity(&self, opacity: f32) {
        self.brush(BrushCommand::SetOpacity { opacity });
    }

    /// Export as `png` or `jpeg` and start the download
    pub fn export(&self, format: &str) -> Result<(), JsValue> {
        let format: ExportFormat = format.parse().map_err(js_error)?;
        let replies = self
            .state
            .borrow_mut()
            .apply(&UiToBoard::Export(ExportRequest { format }));
        send_all(replies);
        Ok(())
    }

    /// Detach from the canvas. The handle is unusable afterwards.
    pub fn unmount(mut self) -> Result<(), JsValue> {
        self.running.set(false);
        let state = self.state.borrow();
        for (name, listener) in self.listeners.drain(..) {
            state
                .canvas
                .remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        }
        drop(state);
        self.state.borrow_mut().board.unmount();
        web_sys::console::log_1(&"Drawboard unmounted".into());
        Ok(())
    }
}

impl Drawboard {
    fn brush(&self, command: BrushCommand) {
        self.state.borrow_mut().board.apply_brush_command(&command);
    }

    fn attach_listeners(&mut self) -> Result<(), JsValue> {
        let canvas = self.state.borrow().canvas.clone();

        for name in input::MOUSE_EVENTS {
            let listener = self.input_listener();
            canvas.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
            self.listeners.push((name, listener));
        }

        // Non-passive so preventDefault can stop scrolling and zooming
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for name in input::TOUCH_EVENTS {
            let listener = self.input_listener();
            canvas.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                listener.as_ref().unchecked_ref(),
                &options,
            )?;
            self.listeners.push((name, listener));
        }
        Ok(())
    }

    fn input_listener(&self) -> Listener {
        let state = Rc::clone(&self.state);
        Closure::wrap(Box::new(move |event: web_sys::Event| {
            let mut state = state.borrow_mut();
            let rect = state.canvas.get_bounding_client_rect();
            let Some(input) = input::translate(&event, &rect) else {
                return;
            };
            if input.is_touch() {
                event.prevent_default();
            }
            state.apply_input(&input);
        }) as Box<dyn FnMut(_)>)
    }

    /// Drain bridge messages and present once per animation frame
    fn start_frame_loop(&self) -> Result<(), JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = Rc::clone(&callback);
        let state = Rc::clone(&self.state);
        let running = Rc::clone(&self.running);

        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running.get() {
                // Dropping the closure ends the loop
                let _ = next.borrow_mut().take();
                return;
            }

            while let Some(msg) = bridge::poll_ui_message() {
                let replies = state.borrow_mut().apply(&msg);
                send_all(replies);
            }
            state.borrow_mut().present_if_dirty();

            if let Some(cb) = next.borrow().as_ref() {
                if let Err(e) = request_animation_frame(cb) {
                    web_sys::console::error_2(&"Frame loop stopped:".into(), &e);
                }
            }
        }) as Box<dyn FnMut()>));

        match callback.borrow().as_ref() {
            Some(cb) => request_animation_frame(cb),
            None => Ok(()),
        }
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
