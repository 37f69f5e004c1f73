use std::cell::RefCell;
use std::rc::Rc;

use imgmap::geometry::limits;
use imgmap::{Dimension, MapperConfig, RegionMap};
use js_sys::{Function, Object};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

use crate::interop::{get_kv, new_obj, set_kv, to_js};
use crate::listener::{Callbacks, CALLBACK_KEYS};

pub type ImgSlot = Rc<RefCell<Option<HtmlImageElement>>>;
pub type OptionsError = (&'static str, String);

/// Function-valued `width`/`height` seen last time. Passing the same JS
/// function again must yield the same [`Dimension`] or every update would
/// look like a change.
#[derive(Clone, Default)]
pub struct ComputedCache {
    width: Option<(Function, Dimension)>,
    height: Option<(Function, Dimension)>,
}

#[derive(Default)]
pub struct Options {
    pub config: MapperConfig,
    /// `None` when the options carry no `map`; the current one is kept.
    pub map: Option<RegionMap>,
    pub callbacks: Callbacks,
}

const RESERVED: &[&str] = &["map", "width", "height"];

fn computed(func: Function, img: ImgSlot) -> Dimension {
    Dimension::computed(move |info| {
        let arg = match img.borrow().as_ref() {
            Some(el) => JsValue::from(el.clone()),
            None => to_js(info),
        };
        func.call1(&JsValue::NULL, &arg)
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(f64::NAN)
    })
}

fn dimension(
    value: &JsValue,
    cache: &mut Option<(Function, Dimension)>,
    img: &ImgSlot,
    name: &str,
) -> Result<Dimension, OptionsError> {
    if value.is_function() {
        let func = value.clone().unchecked_into::<Function>();
        if let Some((prev, dim)) = cache.as_ref() {
            if Object::is(prev, &func) {
                return Ok(dim.clone());
            }
        }
        let dim = computed(func.clone(), img.clone());
        *cache = Some((func, dim.clone()));
        return Ok(dim);
    }
    *cache = None;
    if value.is_undefined() || value.is_null() {
        return Ok(Dimension::Auto);
    }
    match value.as_f64() {
        Some(v) if v.is_finite() => Ok(Dimension::from(v)),
        Some(_) => Err(("non_finite", format!("parameter '{}' must be finite", name))),
        None => Err(("invalid_options", format!("'{}' must be a number or a function", name))),
    }
}

fn check_config(config: &MapperConfig) -> Result<(), OptionsError> {
    if !limits::in_width_bounds(config.line_width) {
        return Err(("out_of_range", format!("lineWidth {} out of range", config.line_width)));
    }
    let literal = |d: &Dimension| match d {
        Dimension::Px(v) => *v,
        _ => 0.0,
    };
    let checked = [
        ("imgWidth", config.img_width),
        ("parentWidth", config.parent_width),
        ("width", literal(&config.width)),
        ("height", literal(&config.height)),
    ];
    for (name, v) in checked {
        if !v.is_finite() {
            return Err(("non_finite", format!("parameter '{}' must be finite", name)));
        }
        if !(0.0..=limits::COORD_MAX).contains(&v) {
            return Err(("out_of_range", format!("parameter '{}' out of range", name)));
        }
    }
    Ok(())
}

fn to_json(v: JsValue) -> Result<serde_json::Value, OptionsError> {
    serde_wasm_bindgen::from_value(v).map_err(|e| ("invalid_options", e.to_string()))
}

/// Split a JS options object into configuration, map and callbacks.
/// `strict` additionally validates the map and numeric ranges.
pub fn parse(
    options: &JsValue,
    cache: &mut ComputedCache,
    img: &ImgSlot,
    strict: bool,
) -> Result<Options, OptionsError> {
    if options.is_undefined() || options.is_null() {
        *cache = ComputedCache::default();
        return Ok(Options::default());
    }
    if !options.is_object() {
        return Err(("invalid_options", "options must be an object".to_string()));
    }

    let plain = new_obj();
    for key in Object::keys(options.unchecked_ref::<Object>()).iter() {
        let Some(name) = key.as_string() else { continue };
        if RESERVED.contains(&name.as_str()) || CALLBACK_KEYS.contains(&name.as_str()) {
            continue;
        }
        let v = get_kv(options, &name);
        if !v.is_function() {
            set_kv(&plain, &name, &v);
        }
    }
    let mut config: MapperConfig = serde_json::from_value(to_json(plain.into())?)
        .map_err(|e| ("invalid_options", e.to_string()))?;
    config.width = dimension(&get_kv(options, "width"), &mut cache.width, img, "width")?;
    config.height = dimension(&get_kv(options, "height"), &mut cache.height, img, "height")?;
    if strict {
        check_config(&config)?;
    }

    let map_value = get_kv(options, "map");
    let map = if map_value.is_undefined() || map_value.is_null() {
        None
    } else {
        let value = to_json(map_value)?;
        let map = if strict {
            RegionMap::from_json_value(value, &config.area_key_name)
        } else {
            serde_json::from_value(value).map_err(Into::into)
        };
        Some(map.map_err(|e| (e.code(), e.to_string()))?)
    };

    Ok(Options {
        config,
        map,
        callbacks: Callbacks::from_options(options),
    })
}
