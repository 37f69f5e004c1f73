use imgmap::scale::center;
use imgmap::sizing::resolve;
use imgmap::{Dimension, ImageInfo, MapperConfig, Scaler, Shape};

fn image(natural: (f64, f64), client: (f64, f64)) -> ImageInfo {
    ImageInfo {
        natural_width: natural.0,
        natural_height: natural.1,
        client_width: client.0,
        client_height: client.1,
    }
}

#[test]
fn fixed_width_scales_rect_and_center() {
    let cfg = MapperConfig {
        width: Dimension::Px(100.0),
        img_width: 200.0,
        ..Default::default()
    };
    let s = Scaler::new(&cfg, None);
    assert_eq!(s, Scaler::Fixed { factor: 0.5 });
    let scaled = s.scale(&[0.0, 0.0, 100.0, 100.0]);
    assert_eq!(scaled, vec![0.0, 0.0, 50.0, 50.0]);
    assert_eq!(center(&Shape::Rect, &scaled), [25.0, 25.0]);
}

#[test]
fn responsive_circle_follows_parent_width() {
    let cfg = MapperConfig {
        responsive: true,
        parent_width: 250.0,
        ..Default::default()
    };
    let img = image((500.0, 400.0), (250.0, 200.0));
    let s = Scaler::new(&cfg, Some(&img));
    let scaled = s.scale(&[50.0, 50.0, 20.0]);
    assert_eq!(scaled, vec![25.0, 25.0, 10.0]);
    assert_eq!(center(&Shape::Circle, &scaled), [25.0, 25.0]);
}

#[test]
fn responsive_without_parent_or_image_uses_static_factor() {
    let cfg = MapperConfig {
        responsive: true,
        width: Dimension::Px(300.0),
        img_width: 600.0,
        ..Default::default()
    };
    assert_eq!(Scaler::new(&cfg, None), Scaler::Fixed { factor: 0.5 });
    let img = image((0.0, 0.0), (0.0, 0.0));
    let cfg = MapperConfig { parent_width: 100.0, ..cfg };
    assert_eq!(Scaler::new(&cfg, Some(&img)), Scaler::Fixed { factor: 0.5 });
}

#[test]
fn unset_width_or_reference_means_identity() {
    let cfg = MapperConfig {
        img_width: 400.0,
        ..Default::default()
    };
    assert_eq!(Scaler::new(&cfg, None).scale(&[10.0, 20.0]), vec![10.0, 20.0]);
    let cfg = MapperConfig {
        width: Dimension::Px(400.0),
        img_width: 0.0,
        ..Default::default()
    };
    assert_eq!(Scaler::new(&cfg, None).scale(&[10.0, 20.0]), vec![10.0, 20.0]);
}

#[test]
fn computed_width_drives_factor_once_image_known() {
    let cfg = MapperConfig {
        width: Dimension::computed(|i| i.client_width / 2.0),
        img_width: 600.0,
        ..Default::default()
    };
    assert_eq!(Scaler::new(&cfg, None), Scaler::Fixed { factor: 1.0 });
    let img = image((1200.0, 800.0), (600.0, 400.0));
    assert_eq!(Scaler::new(&cfg, Some(&img)), Scaler::Fixed { factor: 0.5 });
}

#[test]
fn poly_center_is_point_mean() {
    let c = center(&Shape::Poly, &[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
    assert_eq!(c, [5.0, 5.0]);
    assert_eq!(center(&Shape::Poly, &[]), [0.0, 0.0]);
}

#[test]
fn sizing_auto_uses_client_size() {
    let img = image((1000.0, 500.0), (800.0, 400.0));
    let s = resolve(&MapperConfig::default(), &img);
    assert_eq!((s.canvas.width, s.canvas.height), (800.0, 400.0));
    assert_eq!(s.image.width, None);
    assert_eq!(s.image.height, None);
}

#[test]
fn sizing_natural_uses_intrinsic_size() {
    let img = image((1000.0, 500.0), (800.0, 400.0));
    let cfg = MapperConfig {
        natural: true,
        ..Default::default()
    };
    let s = resolve(&cfg, &img);
    assert_eq!((s.canvas.width, s.canvas.height), (1000.0, 500.0));
    assert_eq!(s.image.width, None);

    let cfg = MapperConfig {
        natural: true,
        width: Dimension::Px(300.0),
        ..Default::default()
    };
    let s = resolve(&cfg, &img);
    assert_eq!(s.canvas.width, 1000.0);
    assert_eq!(s.image.width, Some(1000.0));
}

#[test]
fn sizing_literal_width_sets_image_axis_only() {
    let img = image((1000.0, 500.0), (800.0, 400.0));
    let cfg = MapperConfig {
        width: Dimension::Px(300.0),
        ..Default::default()
    };
    let s = resolve(&cfg, &img);
    assert_eq!((s.canvas.width, s.canvas.height), (300.0, 400.0));
    assert_eq!(s.image.width, Some(300.0));
    assert_eq!(s.image.height, None);
}

#[test]
fn sizing_responsive_uses_parent_width_and_client_height() {
    let img = image((1000.0, 500.0), (640.0, 320.0));
    let cfg = MapperConfig {
        responsive: true,
        parent_width: 640.0,
        ..Default::default()
    };
    let s = resolve(&cfg, &img);
    assert_eq!((s.canvas.width, s.canvas.height), (640.0, 320.0));
    assert_eq!(s.image.width, Some(640.0));
    assert_eq!(s.image.height, Some(320.0));
}

#[test]
fn sizing_rejects_bad_computed_values() {
    let img = image((1000.0, 500.0), (800.0, 400.0));
    for bad in [f64::NAN, f64::INFINITY, 0.0, -5.0] {
        let cfg = MapperConfig {
            width: Dimension::computed(move |_| bad),
            height: Dimension::computed(|i| i.natural_height / 2.0),
            ..Default::default()
        };
        let s = resolve(&cfg, &img);
        assert_eq!(s.canvas.width, 800.0, "fallback for {bad}");
        assert_eq!(s.canvas.height, 250.0);
        assert_eq!(s.image.width, Some(800.0));
        assert_eq!(s.image.height, Some(250.0));
    }
}

#[test]
fn literal_zero_dimension_is_unset() {
    let d: Dimension = serde_json::from_value(serde_json::json!(0)).unwrap();
    assert!(!d.is_set());
    let d: Dimension = serde_json::from_value(serde_json::json!(320)).unwrap();
    assert!(d.same_as(&Dimension::Px(320.0)));
    assert!(Dimension::Auto.same_as(&Dimension::Px(0.0)));
}
