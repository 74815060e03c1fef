use serde::Serialize;
use std::fmt;
use web_sys::js_sys;

use crate::config::AB_VARIANT_STORAGE_KEY;
use crate::utils::storage::{BrowserStorage, KeyValueStore};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Variant {
    A,
    B,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::A => "A",
            Variant::B => "B",
        }
    }

    pub fn from_roll(roll: f64) -> Self {
        if roll < 0.5 {
            Variant::A
        } else {
            Variant::B
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "A" => Some(Variant::A),
            "B" => Some(Variant::B),
            _ => None,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the variant already stored for this session, assigning and
/// storing a fresh one from `roll` when there is none.
pub fn resolve_variant(store: &impl KeyValueStore, roll: impl FnOnce() -> f64) -> Variant {
    if let Some(existing) = store.get_item(AB_VARIANT_STORAGE_KEY).as_deref().and_then(Variant::parse) {
        return existing;
    }
    let assigned = Variant::from_roll(roll());
    if let Err(e) = store.set_item(AB_VARIANT_STORAGE_KEY, assigned.as_str()) {
        log::warn!("Could not persist A/B variant: {}", e);
    }
    assigned
}

/// Session-sticky variant for this tab. Falls back to A without storage.
pub fn get_ab_variant() -> Variant {
    match BrowserStorage::session() {
        Some(store) => resolve_variant(&store, js_sys::Math::random),
        None => Variant::A,
    }
}
