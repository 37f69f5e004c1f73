use imgmap::{ImageInfo, Size};
use js_sys::{Object, Reflect};
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::HtmlImageElement;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn get_kv(obj: &JsValue, k: &str) -> JsValue {
    Reflect::get(obj, &JsValue::from_str(k)).unwrap_or(JsValue::UNDEFINED)
}

/// Plain JS objects and arrays, never `Map`s, so flattened author fields
/// read like the input did.
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

pub fn size_obj(size: Size) -> JsValue {
    let o = new_obj();
    set_kv(&o, "width", &JsValue::from_f64(size.width));
    set_kv(&o, "height", &JsValue::from_f64(size.height));
    o.into()
}

pub fn image_info(img: &HtmlImageElement) -> ImageInfo {
    ImageInfo {
        natural_width: img.natural_width() as f64,
        natural_height: img.natural_height() as f64,
        client_width: img.client_width() as f64,
        client_height: img.client_height() as f64,
    }
}
