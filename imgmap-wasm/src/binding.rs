//! Image element wiring: a `load` listener plus a polling fallback, both
//! feeding one [`LoadWatch`] so the mapper initializes exactly once per
//! source.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use imgmap::load::POLL_INTERVAL_MS;
use imgmap::{LoadStatus, LoadWatch, Sizing};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

use crate::{interop, listener, Core};

#[derive(Default)]
struct LoadState {
    watch: Cell<LoadWatch>,
    timer: Cell<Option<i32>>,
}

impl LoadState {
    fn stop_timer(&self) {
        if let (Some(id), Some(window)) = (self.timer.take(), web_sys::window()) {
            window.clear_interval_with_handle(id);
        }
    }
}

pub fn apply_image_size(img: &HtmlImageElement, sizing: &Sizing) {
    if let Some(w) = sizing.image.width {
        img.set_width(w.max(0.0).round() as u32);
    }
    if let Some(h) = sizing.image.height {
        img.set_height(h.max(0.0).round() as u32);
    }
}

fn check(core: &Weak<RefCell<Core>>, img: &HtmlImageElement, state: &LoadState) {
    let Some(core) = core.upgrade() else { return };
    if state.watch.get().is_done() {
        return;
    }
    match LoadStatus::classify(img.complete(), f64::from(img.natural_width())) {
        LoadStatus::Pending => return,
        LoadStatus::Failed => {
            state.stop_timer();
            log::warn!("image failed to load: '{}'", img.src());
            return;
        }
        LoadStatus::Ready => {}
    }
    // Busy mapper: the next poll tick retries.
    let Ok(mut guard) = core.try_borrow_mut() else { return };
    let mut watch = state.watch.get();
    watch.observe(true);
    state.watch.set(watch);
    state.stop_timer();
    let sizing = guard.on_image_loaded(interop::image_info(img));
    let calls = guard.listener_mut().take_pending();
    drop(guard);
    log::debug!("image ready: {:?}", sizing.canvas);
    apply_image_size(img, &sizing);
    listener::dispatch(calls);
}

pub struct Binding {
    img: HtmlImageElement,
    core: Weak<RefCell<Core>>,
    state: Rc<LoadState>,
    on_load: Closure<dyn FnMut()>,
    poll: Closure<dyn FnMut()>,
}

impl Binding {
    pub fn new(core: &Rc<RefCell<Core>>, img: HtmlImageElement) -> Result<Binding, JsValue> {
        let state = Rc::new(LoadState::default());
        let make = || {
            let (core, img, state) = (Rc::downgrade(core), img.clone(), state.clone());
            Closure::wrap(Box::new(move || check(&core, &img, &state)) as Box<dyn FnMut()>)
        };
        let on_load = make();
        let poll = make();
        img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
        Ok(Binding {
            img,
            core: Rc::downgrade(core),
            state,
            on_load,
            poll,
        })
    }

    pub fn img(&self) -> &HtmlImageElement {
        &self.img
    }

    pub fn is_loaded(&self) -> bool {
        self.state.watch.get().is_done()
    }

    /// Whether the load poll is still running.
    pub fn is_waiting(&self) -> bool {
        self.state.timer.get().is_some()
    }

    /// Check now and, if the image is still pending, poll until it is.
    pub fn start(&self) -> Result<(), JsValue> {
        check(&self.core, &self.img, &self.state);
        let failed = LoadStatus::classify(self.img.complete(), f64::from(self.img.natural_width()))
            == LoadStatus::Failed;
        if self.is_loaded() || failed || self.is_waiting() {
            return Ok(());
        }
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            self.poll.as_ref().unchecked_ref(),
            POLL_INTERVAL_MS as i32,
        )?;
        self.state.timer.set(Some(id));
        Ok(())
    }

    /// Point the element at a new source and wait for it again.
    pub fn reload(&self, src: &str) -> Result<(), JsValue> {
        self.state.stop_timer();
        let mut watch = self.state.watch.get();
        watch.rearm();
        self.state.watch.set(watch);
        if !src.is_empty() {
            self.img.set_src(src);
        }
        self.start()
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.state.stop_timer();
        let _ = self
            .img
            .remove_event_listener_with_callback("load", self.on_load.as_ref().unchecked_ref());
    }
}
