use std::str::FromStr;

use imgmap::geometry::limits;
use imgmap::{ImageInfo, Point, PointerKind};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlImageElement};

use crate::binding::{apply_image_size, Binding};
use crate::canvas::CanvasSurface;
use crate::interop::{new_obj, set_kv, size_obj, to_js};
use crate::options::{self, ComputedCache, Options};
use crate::{error, ImageMapper};

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Route `log` output to the browser console. Safe to call more than once.
#[wasm_bindgen]
pub fn init_logging() {
    #[cfg(feature = "console_log")]
    let _ = console_log::init_with_level(log::Level::Info);
}

fn finite(name: &str, v: f64) -> Result<f64, JsValue> {
    if v.is_finite() { Ok(v) } else { Err(error::non_finite(name)) }
}

fn size_param(name: &str, v: f64) -> Result<f64, JsValue> {
    let v = finite(name, v)?;
    if !(0.0..=limits::COORD_MAX).contains(&v) {
        return Err(error::out_of_range(name, 0.0, limits::COORD_MAX, v));
    }
    Ok(v)
}

fn prevent_obj(index: usize, prevent: bool) -> JsValue {
    let o = new_obj();
    set_kv(&o, "index", &JsValue::from_f64(index as f64));
    set_kv(&o, "preventDefault", &JsValue::from_bool(prevent));
    o.into()
}

#[wasm_bindgen]
impl ImageMapper {
    /// Lenient constructor: options that fail to parse are logged and the
    /// defaults used instead.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> ImageMapper {
        let img = options::ImgSlot::default();
        let mut computed = ComputedCache::default();
        let opts = match options::parse(&options, &mut computed, &img, false) {
            Ok(o) => o,
            Err((code, msg)) => {
                log::warn!("ignoring options ({code}): {msg}");
                computed = ComputedCache::default();
                Options::default()
            }
        };
        ImageMapper::rs_new(opts, img, computed)
    }

    pub fn new_res(options: JsValue) -> JsValue {
        let img = options::ImgSlot::default();
        let mut computed = ComputedCache::default();
        match options::parse(&options, &mut computed, &img, true) {
            Ok(opts) => error::ok(ImageMapper::rs_new(opts, img, computed).into()),
            Err((code, msg)) => error::err(code, msg, None),
        }
    }

    /// Apply new options. Returns whether anything was recomputed.
    pub fn update(&self, options: JsValue) -> bool {
        let parsed = options::parse(&options, &mut self.computed.borrow_mut(), &self.img, false);
        match parsed {
            Ok(opts) => self.rs_update(opts),
            Err((code, msg)) => {
                log::warn!("update ignored ({code}): {msg}");
                false
            }
        }
    }

    pub fn update_res(&self, options: JsValue) -> JsValue {
        let parsed = options::parse(&options, &mut self.computed.borrow_mut(), &self.img, true);
        match parsed {
            Ok(opts) => error::ok(JsValue::from_bool(self.rs_update(opts))),
            Err((code, msg)) => error::err(code, msg, None),
        }
    }

    /// Bind to an image element and the canvas laid over it. Initialization
    /// runs once the image reports complete, via its load event or polling.
    pub fn attach(&mut self, img: HtmlImageElement, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let surface = CanvasSurface::new(canvas)?;
        self.binding = None;
        *self.img.borrow_mut() = Some(img.clone());
        let src = self.read(|core| core.config().src.clone()).unwrap_or_default();
        if !src.is_empty() && img.get_attribute("src").as_deref() != Some(src.as_str()) {
            img.set_src(&src);
        }
        self.with_core(|core| core.attach_surface(surface));
        let binding = Binding::new(&self.inner, img)?;
        binding.start()?;
        self.binding = Some(binding);
        log::debug!("attached; loaded={}", self.is_loaded());
        Ok(())
    }

    pub fn detach(&mut self) {
        self.binding = None;
        *self.img.borrow_mut() = None;
        self.with_core(|core| core.detach_surface());
    }

    /// True while a bound image is still being polled for completion.
    pub fn is_waiting(&self) -> bool {
        self.binding.as_ref().is_some_and(Binding::is_waiting)
    }

    /// Re-measure the bound image after a layout change.
    pub fn refresh(&self) -> JsValue {
        let Some(b) = self.binding.as_ref().filter(|b| b.is_loaded()) else {
            return JsValue::NULL;
        };
        let info = crate::interop::image_info(b.img());
        let Some(sizing) = self.with_core(|core| core.refresh_image(info)) else {
            return JsValue::NULL;
        };
        apply_image_size(b.img(), &sizing);
        to_js(&sizing)
    }

    /// Initialize from host-supplied measurements instead of a bound element.
    pub fn load_image(&self, natural_width: f64, natural_height: f64, client_width: f64, client_height: f64) -> JsValue {
        let info = ImageInfo { natural_width, natural_height, client_width, client_height };
        self.with_core(|core| core.on_image_loaded(info))
            .map_or(JsValue::NULL, |sizing| to_js(&sizing))
    }

    pub fn load_image_res(&self, natural_width: f64, natural_height: f64, client_width: f64, client_height: f64) -> JsValue {
        let checked = (|| {
            Ok::<_, JsValue>(ImageInfo {
                natural_width: size_param("natural_width", natural_width)?,
                natural_height: size_param("natural_height", natural_height)?,
                client_width: size_param("client_width", client_width)?,
                client_height: size_param("client_height", client_height)?,
            })
        })();
        let info = match checked {
            Ok(info) => info,
            Err(e) => return e,
        };
        match self.with_core(|core| core.on_image_loaded(info)) {
            Some(sizing) => error::ok(to_js(&sizing)),
            None => error::busy(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.read(|core| core.is_loaded()).unwrap_or(false)
    }

    pub fn set_parent_width(&self, width: f64) -> bool {
        let changed = self.with_core(|core| (core.set_parent_width(width), core.sizing()));
        let Some((resynced, sizing)) = changed else { return false };
        if resynced {
            if let Some(b) = self.binding.as_ref().filter(|b| b.is_loaded()) {
                apply_image_size(b.img(), &sizing);
            }
        }
        resynced
    }

    pub fn set_parent_width_res(&self, width: f64) -> JsValue {
        match size_param("width", width) {
            Ok(w) => error::ok(JsValue::from_bool(self.set_parent_width(w))),
            Err(e) => e,
        }
    }

    /// Deliver a region event. Returns true when the host should call
    /// `preventDefault` on the originating event.
    pub fn pointer(&self, kind: &str, index: u32) -> bool {
        match PointerKind::from_str(kind) {
            Ok(k) => self.with_core(|core| core.on_pointer(k, index as usize)).unwrap_or(false),
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    pub fn pointer_res(&self, kind: &str, index: u32) -> JsValue {
        let k = match PointerKind::from_str(kind) {
            Ok(k) => k,
            Err(e) => return error::map_error(&e),
        };
        let res = self.with_core(|core| {
            if !core.is_loaded() {
                return error::not_loaded();
            }
            if core.area(index as usize).is_none() {
                return error::invalid_index(index, core.working().len());
            }
            error::ok(JsValue::from_bool(core.on_pointer(k, index as usize)))
        });
        res.unwrap_or_else(error::busy)
    }

    /// Region event by display-space position; false when nothing was hit.
    pub fn pointer_at(&self, kind: &str, x: f64, y: f64) -> bool {
        let Ok(k) = PointerKind::from_str(kind) else { return false };
        self.with_core(|core| core.on_pointer_at(k, Point::new(x, y)))
            .flatten()
            .unwrap_or(false)
    }

    /// `{ index, preventDefault }` for a hit, `null` for a miss.
    pub fn pointer_at_res(&self, kind: &str, x: f64, y: f64) -> JsValue {
        let k = match PointerKind::from_str(kind) {
            Ok(k) => k,
            Err(e) => return error::map_error(&e),
        };
        if let Err(e) = finite("x", x).and_then(|_| finite("y", y)) {
            return e;
        }
        let res = self.with_core(|core| {
            let index = core.area_at(Point::new(x, y))?;
            Some((index, core.on_pointer(k, index)))
        });
        match res {
            Some(Some((index, prevent))) => error::ok(prevent_obj(index, prevent)),
            Some(None) => error::ok(JsValue::NULL),
            None => error::busy(),
        }
    }

    pub fn image_click(&self, x: f64, y: f64) {
        self.with_core(|core| core.image_click(Point::new(x, y)));
    }

    pub fn image_mouse_move(&self, x: f64, y: f64) {
        self.with_core(|core| core.image_mouse_move(Point::new(x, y)));
    }

    pub fn clear_highlighted_area(&self) {
        self.with_core(|core| core.clear_highlighted_area());
    }

    /// Displayed areas with scaled coordinates and centers, in map order.
    pub fn areas(&self) -> JsValue {
        self.read(|core| to_js(&core.areas())).unwrap_or(JsValue::NULL)
    }

    pub fn area(&self, index: u32) -> JsValue {
        self.read(|core| core.area(index as usize).map_or(JsValue::NULL, |a| to_js(&a)))
            .unwrap_or(JsValue::NULL)
    }

    /// Current working map, highlights included.
    pub fn map(&self) -> JsValue {
        self.read(|core| to_js(core.working())).unwrap_or(JsValue::NULL)
    }

    pub fn dimensions(&self) -> JsValue {
        self.read(|core| size_obj(core.sizing().canvas)).unwrap_or(JsValue::NULL)
    }

    pub fn sizing(&self) -> JsValue {
        self.read(|core| to_js(&core.sizing())).unwrap_or(JsValue::NULL)
    }
}
