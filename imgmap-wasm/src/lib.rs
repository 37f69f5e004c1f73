use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
mod api;
mod binding;
mod canvas;
mod error;
mod interop;
mod listener;
mod options;

pub use canvas::CanvasSurface;

pub(crate) type Core = imgmap::ImageMapper<CanvasSurface, listener::JsListener>;

#[wasm_bindgen]
pub struct ImageMapper {
    pub(crate) inner: Rc<RefCell<Core>>,
    pub(crate) img: options::ImgSlot,
    pub(crate) computed: RefCell<options::ComputedCache>,
    pub(crate) binding: Option<binding::Binding>,
}

/// Mutate the core, then run the host callbacks it queued once the borrow is
/// gone. `None` when the core is already borrowed, which only happens when a
/// width/height function calls back into the mapper mid-resolve.
pub(crate) fn with_core<R>(inner: &RefCell<Core>, f: impl FnOnce(&mut Core) -> R) -> Option<R> {
    let (out, calls) = {
        let Ok(mut core) = inner.try_borrow_mut() else {
            log::warn!("mapper busy; call dropped");
            return None;
        };
        let out = f(&mut core);
        (out, core.listener_mut().take_pending())
    };
    listener::dispatch(calls);
    Some(out)
}

impl ImageMapper {
    pub(crate) fn rs_new(
        opts: options::Options,
        img: options::ImgSlot,
        computed: options::ComputedCache,
    ) -> ImageMapper {
        let listener = listener::JsListener::new(opts.callbacks, img.clone());
        let core = Core::new(opts.config, opts.map.unwrap_or_default(), listener);
        ImageMapper {
            inner: Rc::new(RefCell::new(core)),
            img,
            computed: RefCell::new(computed),
            binding: None,
        }
    }

    pub(crate) fn with_core<R>(&self, f: impl FnOnce(&mut Core) -> R) -> Option<R> {
        with_core(&self.inner, f)
    }

    pub(crate) fn read<R>(&self, f: impl FnOnce(&Core) -> R) -> Option<R> {
        match self.inner.try_borrow() {
            Ok(core) => Some(f(&core)),
            Err(_) => {
                log::warn!("mapper busy; query skipped");
                None
            }
        }
    }

    pub(crate) fn rs_update(&self, opts: options::Options) -> bool {
        let changed = self.with_core(|core| {
            let src_changed = core.config().src != opts.config.src;
            core.listener_mut().callbacks = opts.callbacks;
            let map = opts.map.unwrap_or_else(|| core.stored().clone());
            let resynced = core.on_config_changed(opts.config, map);
            (src_changed, resynced, core.sizing(), core.config().src.clone())
        });
        let Some((src_changed, resynced, sizing, src)) = changed else {
            return false;
        };
        if let Some(b) = &self.binding {
            if src_changed {
                if let Err(e) = b.reload(&src) {
                    log::error!("image reload failed: {e:?}");
                }
            } else if resynced && b.is_loaded() {
                binding::apply_image_size(b.img(), &sizing);
            }
        }
        resynced
    }
}
