use imgmap::{
    Dimension, HighlightPolicy, ImageInfo, ImageMapper, MapperConfig, PointerKind, Recorder,
    Region, RegionMap, Scaler, Size,
};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Click { idx: u8 },
    Enter { idx: u8 },
    Leave { idx: u8 },
    Reset,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(|idx| Op::Click { idx }),
        1 => any::<u8>().prop_map(|idx| Op::Enter { idx }),
        1 => any::<u8>().prop_map(|idx| Op::Leave { idx }),
        1 => Just(Op::Reset),
    ]
}

/// (prefilled, active) per region.
fn map_strategy() -> impl Strategy<Value = RegionMap> {
    prop::collection::vec((any::<bool>(), prop::bool::weighted(0.85)), 1..8).prop_map(|flags| {
        let regions = flags
            .into_iter()
            .enumerate()
            .map(|(i, (prefilled, active))| {
                let x = i as f64 * 20.0;
                let mut r = Region::new("rect", vec![x, 0.0, x + 10.0, 10.0]).with_id(format!("r{i}"));
                if prefilled {
                    r = r.with_highlight("red");
                }
                if !active {
                    r = r.inactive();
                }
                r
            })
            .collect();
        RegionMap::new("prop", regions)
    })
}

fn policy_strategy() -> impl Strategy<Value = HighlightPolicy> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(stay, multi, toggle)| HighlightPolicy { stay, multi, toggle })
}

fn mapper(map: RegionMap, policy: HighlightPolicy) -> ImageMapper<Recorder> {
    let config = MapperConfig {
        stay_highlighted: policy.stay,
        stay_multi_highlighted: policy.multi,
        toggle_highlighted: policy.toggle,
        width: Dimension::Px(100.0),
        img_width: 200.0,
        ..Default::default()
    };
    let mut m = ImageMapper::new(config, map, ());
    m.attach_surface(Recorder::new());
    m.on_image_loaded(ImageInfo::new(Size::new(200.0, 100.0), Size::new(100.0, 50.0)));
    m
}

fn apply_op(m: &mut ImageMapper<Recorder>, op: Op) {
    let n = m.working().len();
    match op {
        Op::Click { idx } => {
            m.on_pointer(PointerKind::Click, idx as usize % n);
        }
        Op::Enter { idx } => {
            m.on_pointer(PointerKind::MouseEnter, idx as usize % n);
        }
        Op::Leave { idx } => {
            m.on_pointer(PointerKind::MouseLeave, idx as usize % n);
        }
        Op::Reset => m.clear_highlighted_area(),
    }
}

fn lit(map: &RegionMap) -> Vec<usize> {
    map.highlighted().map(|(i, _)| i).collect()
}

fn assert_invariants(m: &ImageMapper<Recorder>) {
    let stored = m.stored();
    let working = m.working();
    assert!(working.same_outline(stored), "clicks may only change highlights");
    // Authored highlights survive any sequence.
    for i in lit(stored) {
        assert!(working.regions[i].highlight.is_highlighted(), "region {i} lost its input highlight");
    }
    // Inactive regions never gain a highlight.
    for (i, r) in working.regions.iter().enumerate() {
        if !r.active {
            assert_eq!(r.highlight, stored.regions[i].highlight, "inactive region {i} changed");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 2_000, .. ProptestConfig::default() })]

    #[test]
    fn click_sequences_keep_invariants(
        map in map_strategy(),
        policy in policy_strategy(),
        seq in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let mut m = mapper(map, policy);
        for op in seq {
            apply_op(&mut m, op);
            assert_invariants(&m);
        }
        m.clear_highlighted_area();
        prop_assert_eq!(m.working(), m.stored());
    }

    #[test]
    fn stay_alone_keeps_at_most_one_click_highlight(
        map in map_strategy(),
        clicks in prop::collection::vec(any::<u8>(), 1..20),
    ) {
        let policy = HighlightPolicy { stay: true, ..Default::default() };
        let mut m = mapper(map, policy);
        let base = lit(m.stored()).len();
        for idx in clicks {
            let n = m.working().len();
            m.on_pointer(PointerKind::Click, idx as usize % n);
            prop_assert!(lit(m.working()).len() <= base + 1);
        }
    }

    #[test]
    fn multi_never_drops_existing_highlights(
        map in map_strategy(),
        clicks in prop::collection::vec(any::<u8>(), 1..20),
    ) {
        let policy = HighlightPolicy { multi: true, ..Default::default() };
        let mut m = mapper(map, policy);
        for idx in clicks {
            let before = lit(m.working());
            let n = m.working().len();
            m.on_pointer(PointerKind::Click, idx as usize % n);
            let after = lit(m.working());
            prop_assert!(before.iter().all(|i| after.contains(i)));
        }
    }

    #[test]
    fn scaling_preserves_count_and_is_pure(
        coords in prop::collection::vec(-10_000.0f64..10_000.0, 0..32),
        width in 1.0f64..4_000.0,
        img_width in 0.0f64..4_000.0,
    ) {
        let config = MapperConfig {
            width: Dimension::Px(width),
            img_width,
            ..Default::default()
        };
        let s = Scaler::new(&config, None);
        let once = s.scale(&coords);
        prop_assert_eq!(once.len(), coords.len());
        prop_assert_eq!(&once, &s.scale(&coords));
        if img_width == 0.0 {
            prop_assert_eq!(&once, &coords);
        }
    }
}
