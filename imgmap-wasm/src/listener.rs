use std::cell::RefCell;
use std::rc::Rc;

use imgmap::{DisplayRegion, MapperListener, Point, PointerKind, Size};
use js_sys::{Array, Function};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

use crate::interop::{get_kv, new_obj, set_kv, size_obj, to_js};

/// Host callbacks read from the options object. Missing or non-function
/// entries are `None`.
#[derive(Clone, Default)]
pub struct Callbacks {
    pub on_load: Option<Function>,
    pub on_image_click: Option<Function>,
    pub on_image_mouse_move: Option<Function>,
    pub on_click: Option<Function>,
    pub on_mouse_enter: Option<Function>,
    pub on_mouse_leave: Option<Function>,
    pub on_mouse_move: Option<Function>,
    pub on_mouse_down: Option<Function>,
    pub on_mouse_up: Option<Function>,
    pub on_touch_start: Option<Function>,
    pub on_touch_end: Option<Function>,
}

pub const CALLBACK_KEYS: &[&str] = &[
    "onLoad",
    "onImageClick",
    "onImageMouseMove",
    "onClick",
    "onMouseEnter",
    "onMouseLeave",
    "onMouseMove",
    "onMouseDown",
    "onMouseUp",
    "onTouchStart",
    "onTouchEnd",
];

fn function(options: &JsValue, key: &str) -> Option<Function> {
    let v = get_kv(options, key);
    v.is_function().then(|| v.unchecked_into::<Function>())
}

impl Callbacks {
    pub fn from_options(options: &JsValue) -> Callbacks {
        Callbacks {
            on_load: function(options, "onLoad"),
            on_image_click: function(options, "onImageClick"),
            on_image_mouse_move: function(options, "onImageMouseMove"),
            on_click: function(options, "onClick"),
            on_mouse_enter: function(options, "onMouseEnter"),
            on_mouse_leave: function(options, "onMouseLeave"),
            on_mouse_move: function(options, "onMouseMove"),
            on_mouse_down: function(options, "onMouseDown"),
            on_mouse_up: function(options, "onMouseUp"),
            on_touch_start: function(options, "onTouchStart"),
            on_touch_end: function(options, "onTouchEnd"),
        }
    }

    fn for_kind(&self, kind: PointerKind) -> Option<&Function> {
        match kind {
            PointerKind::Click => self.on_click.as_ref(),
            PointerKind::MouseEnter => self.on_mouse_enter.as_ref(),
            PointerKind::MouseLeave => self.on_mouse_leave.as_ref(),
            PointerKind::MouseMove => self.on_mouse_move.as_ref(),
            PointerKind::MouseDown => self.on_mouse_down.as_ref(),
            PointerKind::MouseUp => self.on_mouse_up.as_ref(),
            PointerKind::TouchStart => self.on_touch_start.as_ref(),
            PointerKind::TouchEnd => self.on_touch_end.as_ref(),
        }
    }
}

fn point_obj(at: Point) -> JsValue {
    let o = new_obj();
    set_kv(&o, "x", &JsValue::from_f64(at.x));
    set_kv(&o, "y", &JsValue::from_f64(at.y));
    o.into()
}

/// A host callback with its arguments, held until the mapper is released.
pub struct PendingCall {
    f: Function,
    args: Array,
    name: &'static str,
}

/// Run queued callbacks in order. A throwing callback is logged and the
/// rest still run.
pub fn dispatch(calls: Vec<PendingCall>) {
    for call in calls {
        if let Err(e) = call.f.apply(&JsValue::NULL, &call.args) {
            log::error!("{} callback threw: {e:?}", call.name);
        }
    }
}

/// Collects mapper events for JS functions. Nothing is called while the
/// mapper is borrowed, so callbacks may freely call back into it.
pub struct JsListener {
    pub callbacks: Callbacks,
    pub img: Rc<RefCell<Option<HtmlImageElement>>>,
    pending: Vec<PendingCall>,
}

impl JsListener {
    pub fn new(callbacks: Callbacks, img: Rc<RefCell<Option<HtmlImageElement>>>) -> JsListener {
        JsListener { callbacks, img, pending: Vec::new() }
    }

    pub fn take_pending(&mut self) -> Vec<PendingCall> {
        std::mem::take(&mut self.pending)
    }

    fn queue(&mut self, f: Option<Function>, name: &'static str, args: &[JsValue]) {
        if let Some(f) = f {
            let args = args.iter().collect();
            self.pending.push(PendingCall { f, args, name });
        }
    }

    fn img_value(&self) -> JsValue {
        self.img
            .borrow()
            .as_ref()
            .map_or(JsValue::NULL, |el| JsValue::from(el.clone()))
    }
}

impl MapperListener for JsListener {
    fn on_load(&mut self, size: Size) {
        let f = self.callbacks.on_load.clone();
        let args = [self.img_value(), size_obj(size)];
        self.queue(f, "onLoad", &args);
    }

    fn on_image_click(&mut self, at: Point) {
        let f = self.callbacks.on_image_click.clone();
        self.queue(f, "onImageClick", &[point_obj(at)]);
    }

    fn on_image_mouse_move(&mut self, at: Point) {
        let f = self.callbacks.on_image_mouse_move.clone();
        self.queue(f, "onImageMouseMove", &[point_obj(at)]);
    }

    /// A registered click handler always takes over the link default.
    fn on_area(&mut self, kind: PointerKind, area: &DisplayRegion) -> bool {
        let Some(f) = self.callbacks.for_kind(kind).cloned() else {
            return false;
        };
        let index = JsValue::from_f64(area.index as f64);
        self.queue(Some(f), kind.as_str(), &[to_js(area), index]);
        true
    }
}
