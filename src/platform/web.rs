//! Browser front end
//!
//! Shapes go through the wgpu pipeline; text is written to a DOM element
//! overlaid on the canvas. DOM listeners push input into a shared queue that
//! the frame loop drains.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlCanvasElement, KeyboardEvent, TouchEvent};

use super::key_to_input;
use crate::color::Color;
use crate::presentation::{InputEvent, Presenter};
use crate::renderer::{RenderState, VertexBatch};
use crate::sim::Rect;

pub type InputQueue = Rc<RefCell<Vec<InputEvent>>>;

pub struct WebPresenter {
    render_state: RenderState,
    batch: VertexBatch,
    hud: Option<Element>,
    hud_lines: Vec<String>,
    input: InputQueue,
}

impl WebPresenter {
    pub fn new(render_state: RenderState, hud: Option<Element>) -> Self {
        Self {
            render_state,
            batch: VertexBatch::default(),
            hud,
            hud_lines: Vec::new(),
            input: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn input_queue(&self) -> InputQueue {
        self.input.clone()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.render_state.resize(width, height);
    }
}

impl Presenter for WebPresenter {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.batch.push_rect(&rect, color);
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.batch.push_circle(center, radius, color);
    }

    fn draw_text(&mut self, text: &str, _position: Vec2, _color: Color) {
        self.hud_lines.push(text.to_string());
    }

    fn present_frame(&mut self) {
        match self.render_state.render(self.batch.vertices()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) => {
                let (w, h) = self.render_state.size();
                self.render_state.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
            Err(e) => log::warn!("Render error: {:?}", e),
        }
        self.batch.clear();

        if let Some(hud) = &self.hud {
            let text = self.hud_lines.join("\n");
            if hud.text_content().as_deref() != Some(text.as_str()) {
                hud.set_text_content(Some(&text));
            }
        }
        self.hud_lines.clear();
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut *self.input.borrow_mut())
    }

    /// requestAnimationFrame paces the browser loop
    fn tick_delay(&mut self, _target_hz: u32) {}
}

/// Keyboard on the window, taps on the canvas
pub fn attach_input(canvas: &HtmlCanvasElement, queue: InputQueue) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;

    {
        let queue = queue.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            if let Some(input) = key_to_input(&event.key()) {
                event.prevent_default();
                queue.borrow_mut().push(input);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            event.prevent_default();
            queue.borrow_mut().push(InputEvent::JumpPressed);
        });
        canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}
