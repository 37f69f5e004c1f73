use imgmap::{ClickOutcome, Highlight, HighlightPolicy, HighlightState, Region, RegionMap};

const FILL: &str = "rgba(255, 255, 255, 0.5)";

fn three() -> RegionMap {
    RegionMap::new(
        "m",
        vec![
            Region::new("rect", vec![0.0, 0.0, 10.0, 10.0]).with_id("a"),
            Region::new("circle", vec![20.0, 20.0, 5.0]).with_id("b").with_fill("blue"),
            Region::new("poly", vec![30.0, 30.0, 40.0, 30.0, 35.0, 40.0]).with_id("c"),
        ],
    )
}

fn stay() -> HighlightPolicy {
    HighlightPolicy { stay: true, ..Default::default() }
}

fn multi() -> HighlightPolicy {
    HighlightPolicy { multi: true, ..Default::default() }
}

fn lit(state: &HighlightState) -> Vec<usize> {
    state.working().highlighted().map(|(i, _)| i).collect()
}

#[test]
fn multi_accumulates_highlights() {
    let mut st = HighlightState::new(three(), "id");
    assert_eq!(
        st.click(0, multi(), FILL),
        ClickOutcome::Committed { highlighted: true, repaint: false }
    );
    st.click(1, multi(), FILL);
    assert_eq!(lit(&st), vec![0, 1]);
    assert_eq!(st.working().regions[0].highlight, Highlight::Highlighted(FILL.into()));
    assert_eq!(st.working().regions[1].highlight, Highlight::Highlighted("blue".into()));
    assert!(st.working().regions[2].highlight.is_normal());
}

#[test]
fn stay_keeps_only_last_click() {
    let mut st = HighlightState::new(three(), "id");
    assert_eq!(
        st.click(0, stay(), FILL),
        ClickOutcome::Committed { highlighted: true, repaint: true }
    );
    st.click(2, stay(), FILL);
    assert_eq!(lit(&st), vec![2]);
    assert!(st.stored().highlighted().next().is_none(), "stored map must stay pristine");
}

#[test]
fn toggle_clears_on_second_click() {
    let policy = HighlightPolicy { stay: true, toggle: true, ..Default::default() };
    let mut st = HighlightState::new(three(), "id");
    st.click(1, policy, FILL);
    assert_eq!(lit(&st), vec![1]);
    assert_eq!(
        st.click(1, policy, FILL),
        ClickOutcome::Committed { highlighted: false, repaint: true }
    );
    assert!(lit(&st).is_empty());
}

#[test]
fn toggle_with_multi_clears_only_the_clicked_region() {
    let policy = HighlightPolicy { multi: true, toggle: true, ..Default::default() };
    let mut st = HighlightState::new(three(), "id");
    st.click(0, policy, FILL);
    st.click(2, policy, FILL);
    st.click(0, policy, FILL);
    assert_eq!(lit(&st), vec![2]);
}

#[test]
fn toggle_never_removes_authored_highlight() {
    let mut map = three();
    map.regions[0] = map.regions[0].clone().with_highlight("red");
    let policy = HighlightPolicy { stay: true, toggle: true, ..Default::default() };
    let mut st = HighlightState::new(map, "id");
    for _ in 0..3 {
        st.click(0, policy, FILL);
        assert!(st.working().regions[0].highlight.is_highlighted());
    }
}

#[test]
fn toggle_alone_does_not_add_highlight() {
    let policy = HighlightPolicy { toggle: true, ..Default::default() };
    let mut st = HighlightState::new(three(), "id");
    assert_eq!(
        st.click(0, policy, FILL),
        ClickOutcome::Committed { highlighted: false, repaint: true }
    );
    assert!(lit(&st).is_empty());
}

#[test]
fn inactive_region_or_no_policy_is_ignored() {
    let mut map = three();
    map.regions[1] = map.regions[1].clone().inactive();
    let mut st = HighlightState::new(map, "id");
    let all = HighlightPolicy { stay: true, multi: true, toggle: true };
    assert_eq!(st.click(1, all, FILL), ClickOutcome::Ignored);
    assert_eq!(st.click(0, HighlightPolicy::default(), FILL), ClickOutcome::Ignored);
    assert_eq!(st.click(99, all, FILL), ClickOutcome::Ignored);
    assert!(lit(&st).is_empty());
}

#[test]
fn positional_keys_when_ids_missing() {
    let map = RegionMap::new(
        "m",
        vec![
            Region::new("rect", vec![0.0, 0.0, 1.0, 1.0]),
            Region::new("rect", vec![0.0, 0.0, 1.0, 1.0]),
        ],
    );
    let mut st = HighlightState::new(map, "id");
    st.click(1, multi(), FILL);
    assert_eq!(lit(&st), vec![1]);
}

#[test]
fn custom_key_field_is_used_for_identity() {
    let map = RegionMap::new(
        "m",
        vec![
            Region::new("rect", vec![0.0, 0.0, 1.0, 1.0]).with_attr("slug", "x"),
            Region::new("rect", vec![2.0, 2.0, 3.0, 3.0]).with_attr("slug", "y"),
        ],
    );
    let policy = HighlightPolicy { stay: true, toggle: true, ..Default::default() };
    let mut st = HighlightState::new(map, "slug");
    st.click(1, policy, FILL);
    assert_eq!(lit(&st), vec![1]);
    st.click(1, policy, FILL);
    assert!(lit(&st).is_empty());
}

#[test]
fn reset_restores_stored_map() {
    let mut st = HighlightState::new(three(), "id");
    st.click(0, multi(), FILL);
    st.click(2, multi(), FILL);
    st.reset();
    assert_eq!(st.working(), st.stored());
    assert_eq!(st.highlighted_count(), 0);
}
