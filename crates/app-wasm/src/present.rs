//! Copying the board's pixels onto the canvas

use painting::CpuSurface;
use wasm_bindgen::prelude::*;
use wasm_bindgen::Clamped;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

/// Size the canvas backing store to the surface's physical pixels and its
/// CSS box to the logical size.
pub fn fit_canvas(canvas: &HtmlCanvasElement, surface: &CpuSurface) -> Result<(), JsValue> {
    let (physical_width, physical_height) = surface.physical_size();
    let (width, height) = surface.logical_size();

    canvas.set_width(physical_width);
    canvas.set_height(physical_height);

    let style = canvas.style();
    style.set_property("width", &format!("{}px", width))?;
    style.set_property("height", &format!("{}px", height))?;
    // Touch drags draw instead of scrolling
    style.set_property("touch-action", "none")?;
    Ok(())
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

/// Blit the whole surface at the canvas origin
pub fn present(ctx: &CanvasRenderingContext2d, surface: &CpuSurface) -> Result<(), JsValue> {
    let (width, height) = surface.physical_size();
    let bytes = surface.to_rgba8();
    let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&bytes), width, height)?;
    ctx.put_image_data(&image, 0.0, 0.0)
}
