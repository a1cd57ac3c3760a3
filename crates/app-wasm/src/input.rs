//! DOM mouse and touch events to board input

use drawboard_ipc::{InputEvent, PointerSample};
use wasm_bindgen::JsCast;
use web_sys::{DomRect, Event, MouseEvent, TouchEvent};

/// DOM events the canvas listens to
pub const MOUSE_EVENTS: [&str; 4] = ["mousedown", "mousemove", "mouseup", "mouseleave"];
pub const TOUCH_EVENTS: [&str; 3] = ["touchstart", "touchmove", "touchend"];

/// Translate a DOM event into board input, measuring against `rect`
/// (the canvas bounding box at the time of the event).
pub fn translate(event: &Event, rect: &DomRect) -> Option<InputEvent> {
    let samples = if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        vec![PointerSample::new(
            mouse.client_x() as f32,
            mouse.client_y() as f32,
            rect.left() as f32,
            rect.top() as f32,
        )]
    } else if let Some(touch) = event.dyn_ref::<TouchEvent>() {
        let touches = touch.touches();
        (0..touches.length())
            .filter_map(|i| touches.item(i))
            .map(|t| {
                PointerSample::new(
                    t.client_x() as f32,
                    t.client_y() as f32,
                    rect.left() as f32,
                    rect.top() as f32,
                )
            })
            .collect()
    } else {
        return None;
    };

    input_event(&event.type_(), samples)
}

/// Build the input event for DOM event `name` carrying `samples`
pub fn input_event(name: &str, samples: Vec<PointerSample>) -> Option<InputEvent> {
    let first = samples.first().copied();
    match name {
        "mousedown" => first.map(InputEvent::PointerDown),
        "mousemove" => first.map(InputEvent::PointerMove),
        "mouseup" => Some(InputEvent::PointerUp),
        "mouseleave" => Some(InputEvent::PointerLeave),
        "touchstart" => Some(InputEvent::TouchStart(samples)),
        "touchmove" => Some(InputEvent::TouchMove(samples)),
        "touchend" => Some(InputEvent::TouchEnd),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_names() {
        let sample = PointerSample::new(15.0, 25.0, 5.0, 5.0);
        assert_eq!(
            input_event("mousedown", vec![sample]),
            Some(InputEvent::PointerDown(sample))
        );
        assert_eq!(
            input_event("mousemove", vec![sample]),
            Some(InputEvent::PointerMove(sample))
        );
        assert_eq!(input_event("mouseup", vec![sample]), Some(InputEvent::PointerUp));
        assert_eq!(input_event("mouseleave", Vec::new()), Some(InputEvent::PointerLeave));
        assert_eq!(input_event("mousedown", Vec::new()), None);
    }

    #[test]
    fn test_touch_names() {
        let touches = vec![PointerSample::at(1.0, 1.0), PointerSample::at(2.0, 2.0)];
        assert_eq!(
            input_event("touchstart", touches.clone()),
            Some(InputEvent::TouchStart(touches))
        );
        assert_eq!(input_event("touchend", Vec::new()), Some(InputEvent::TouchEnd));
        assert_eq!(input_event("wheel", Vec::new()), None);
    }

    #[test]
    fn test_listened_events_all_translate() {
        for name in MOUSE_EVENTS.iter().chain(TOUCH_EVENTS.iter()) {
            assert!(input_event(name, vec![PointerSample::at(0.0, 0.0)]).is_some(), "{name}");
        }
    }

    #[test]
    fn test_only_touch_events_suppress_default_gestures() {
        let sample = || vec![PointerSample::at(3.0, 4.0)];
        for name in TOUCH_EVENTS {
            assert!(input_event(name, sample()).unwrap().is_touch(), "{name}");
        }
        for name in MOUSE_EVENTS {
            assert!(!input_event(name, sample()).unwrap().is_touch(), "{name}");
        }
    }
}
