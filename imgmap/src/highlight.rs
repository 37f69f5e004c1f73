//! Persistent highlight state: a pristine stored map plus the working copy
//! that clicks edit.

use crate::model::{Highlight, RegionMap};

/// Which click policies are enabled. More than one may be on; `multi`
/// decides where updates are derived from, `toggle` whether a second click
/// clears.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HighlightPolicy {
    pub stay: bool,
    pub multi: bool,
    pub toggle: bool,
}

impl HighlightPolicy {
    pub fn any(&self) -> bool {
        self.stay || self.multi || self.toggle
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Inactive region, unknown index, or no policy enabled.
    Ignored,
    /// Working map replaced. `repaint` asks the overlay for a clear and a
    /// full repaint; multi-highlight commits leave the overlay as is.
    Committed { highlighted: bool, repaint: bool },
}

#[derive(Clone, Debug, Default)]
pub struct HighlightState {
    working: RegionMap,
    stored: RegionMap,
    key_field: String,
}

impl HighlightState {
    pub fn new(map: RegionMap, key_field: &str) -> Self {
        HighlightState {
            working: map.clone(),
            stored: map,
            key_field: key_field.to_string(),
        }
    }

    pub fn working(&self) -> &RegionMap {
        &self.working
    }

    pub fn stored(&self) -> &RegionMap {
        &self.stored
    }

    pub fn key_field(&self) -> &str {
        &self.key_field
    }

    /// Drop every click-made highlight.
    pub fn reset(&mut self) {
        self.working = self.stored.clone();
    }

    pub fn highlighted_count(&self) -> usize {
        self.working.highlighted().count()
    }

    pub fn click(&mut self, index: usize, policy: HighlightPolicy, default_fill: &str) -> ClickOutcome {
        let Some(area) = self.working.regions.get(index) else {
            return ClickOutcome::Ignored;
        };
        if !area.active || !policy.any() {
            return ClickOutcome::Ignored;
        }
        let field = self.key_field.as_str();
        let key = self.working.key_of(index, field);
        let mut updated = area.clone();

        if policy.toggle && updated.highlight.is_highlighted() {
            let original = self.stored.find(&key, field);
            if original.is_some_and(|r| r.highlight.is_normal()) {
                updated.highlight = Highlight::Normal;
            }
        } else if policy.stay || policy.multi {
            let color = area.fill_color.as_deref().unwrap_or(default_fill);
            updated.highlight = Highlight::Highlighted(color.to_string());
        }

        let source = if policy.multi { &self.working } else { &self.stored };
        let regions = source
            .regions
            .iter()
            .enumerate()
            .map(|(i, cur)| {
                if source.key_of(i, field) == key {
                    updated.clone()
                } else {
                    cur.clone()
                }
            })
            .collect();
        let highlighted = updated.highlight.is_highlighted();
        log::debug!("click {key}: highlighted={highlighted} policy={policy:?}");
        self.working = RegionMap {
            name: self.working.name.clone(),
            regions,
        };
        ClickOutcome::Committed {
            highlighted,
            repaint: !policy.multi,
        }
    }
}
