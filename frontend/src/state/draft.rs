use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::state::locality;

pub const BUDGET_FLOOR_K: u32 = 10;
pub const BUDGET_CEIL_K: u32 = 200;
pub const BUDGET_STEP_K: u32 = 5;
pub const DEFAULT_BUDGET_MIN_K: u32 = 40;
pub const DEFAULT_BUDGET_MAX_K: u32 = 60;
pub const PHONE_DIGITS: usize = 10;

/// Returned by the strict `FromStr` impls when a select value is not one of
/// the known codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice(pub String);

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown choice: {}", self.0)
    }
}

/// Lowercases and drops everything but ASCII alphanumerics and `+`, so
/// "Malad-West", "malad_west" and "MALAD WEST" compare equal.
fn loose_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Area {
    #[serde(rename = "Malad West")]
    MaladWest,
    #[serde(rename = "Malad East")]
    MaladEast,
    #[serde(rename = "Kandivali West")]
    KandivaliWest,
    #[serde(rename = "Kandivali East")]
    KandivaliEast,
    #[serde(rename = "Borivali West")]
    BorivaliWest,
    #[serde(rename = "Borivali East")]
    BorivaliEast,
}

impl Area {
    pub const ALL: [Area; 6] = [
        Area::MaladWest,
        Area::MaladEast,
        Area::KandivaliWest,
        Area::KandivaliEast,
        Area::BorivaliWest,
        Area::BorivaliEast,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Area::MaladWest => "Malad West",
            Area::MaladEast => "Malad East",
            Area::KandivaliWest => "Kandivali West",
            Area::KandivaliEast => "Kandivali East",
            Area::BorivaliWest => "Borivali West",
            Area::BorivaliEast => "Borivali East",
        }
    }

    /// Case-insensitive match that ignores separators.
    pub fn parse_loose(raw: &str) -> Option<Self> {
        let key = loose_key(raw);
        Self::ALL.into_iter().find(|a| loose_key(a.label()) == key)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Area {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.label() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Bhk {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
}

impl Bhk {
    pub const ALL: [Bhk; 2] = [Bhk::One, Bhk::Two];

    pub fn code(self) -> &'static str {
        match self {
            Bhk::One => "1",
            Bhk::Two => "2",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Bhk::One => "1 BHK",
            Bhk::Two => "2 BHK",
        }
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        match loose_key(raw).as_str() {
            "1" | "1bhk" => Some(Bhk::One),
            "2" | "2bhk" => Some(Bhk::Two),
            _ => None,
        }
    }
}

impl FromStr for Bhk {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Furnishing {
    #[serde(rename = "F")]
    Furnished,
    #[serde(rename = "S")]
    SemiFurnished,
    #[serde(rename = "U")]
    Unfurnished,
}

impl Furnishing {
    pub const ALL: [Furnishing; 3] = [
        Furnishing::Furnished,
        Furnishing::SemiFurnished,
        Furnishing::Unfurnished,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Furnishing::Furnished => "F",
            Furnishing::SemiFurnished => "S",
            Furnishing::Unfurnished => "U",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Furnishing::Furnished => "Furnished",
            Furnishing::SemiFurnished => "Semi-Furnished",
            Furnishing::Unfurnished => "Unfurnished",
        }
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        match loose_key(raw).as_str() {
            "f" | "furnished" | "full" | "fullyfurnished" => Some(Furnishing::Furnished),
            "s" | "semi" | "semifurnished" => Some(Furnishing::SemiFurnished),
            "u" | "unfurnished" => Some(Furnishing::Unfurnished),
            _ => None,
        }
    }
}

impl FromStr for Furnishing {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum MoveIn {
    Immediate,
    #[serde(rename = "7")]
    Within7Days,
    #[serde(rename = "15")]
    Within15Days,
    #[serde(rename = "30+")]
    After30Days,
}

impl MoveIn {
    pub const ALL: [MoveIn; 4] = [
        MoveIn::Immediate,
        MoveIn::Within7Days,
        MoveIn::Within15Days,
        MoveIn::After30Days,
    ];

    pub fn code(self) -> &'static str {
        match self {
            MoveIn::Immediate => "Immediate",
            MoveIn::Within7Days => "7",
            MoveIn::Within15Days => "15",
            MoveIn::After30Days => "30+",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveIn::Immediate => "Immediate",
            MoveIn::Within7Days => "7 days",
            MoveIn::Within15Days => "15 days",
            MoveIn::After30Days => "30+ days",
        }
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        match loose_key(raw).as_str() {
            "immediate" | "now" | "0" => Some(MoveIn::Immediate),
            "7" | "7d" | "7days" => Some(MoveIn::Within7Days),
            "15" | "15d" | "15days" => Some(MoveIn::Within15Days),
            "30" | "30+" | "30d" | "30days" | "30+days" => Some(MoveIn::After30Days),
            _ => None,
        }
    }
}

impl FromStr for MoveIn {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Profile {
    Family,
    Bachelor,
    Company,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Family, Profile::Bachelor, Profile::Company];

    pub fn code(self) -> &'static str {
        match self {
            Profile::Family => "Family",
            Profile::Bachelor => "Bachelor",
            Profile::Company => "Company",
        }
    }

    pub fn parse_loose(raw: &str) -> Option<Self> {
        match loose_key(raw).as_str() {
            "family" => Some(Profile::Family),
            "bachelor" | "bachelors" => Some(Profile::Bachelor),
            "company" | "corporate" => Some(Profile::Company),
            _ => None,
        }
    }
}

impl FromStr for Profile {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.code() == s)
            .ok_or_else(|| UnknownChoice(s.to_string()))
    }
}

/// Select-backed fields that the form may clear back to "unselected".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChoiceField {
    Area,
    Bhk,
    Furnishing,
    MoveIn,
    Profile,
}

/// The in-progress lead shared by every component on the page.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub name: String,
    /// Digits only, at most ten.
    pub phone: String,
    pub area: Option<Area>,
    pub locality: String,
    pub budget_min_k: u32,
    pub budget_max_k: u32,
    pub bhk: Option<Bhk>,
    pub furnishing: Option<Furnishing>,
    pub move_in: Option<MoveIn>,
    pub profile: Option<Profile>,
    pub notes: String,
    /// Millisecond timestamp of the last URL prefill, if any.
    pub prefill_ts: Option<i64>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            area: Some(Area::MaladWest),
            locality: String::new(),
            budget_min_k: DEFAULT_BUDGET_MIN_K,
            budget_max_k: DEFAULT_BUDGET_MAX_K,
            bhk: Some(Bhk::One),
            furnishing: Some(Furnishing::SemiFurnished),
            move_in: Some(MoveIn::Immediate),
            profile: Some(Profile::Family),
            notes: String::new(),
            prefill_ts: None,
        }
    }
}

/// A partial draft. `None` means "leave as is".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftPatch {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub area: Option<Area>,
    pub locality: Option<String>,
    pub budget_min_k: Option<u32>,
    pub budget_max_k: Option<u32>,
    pub bhk: Option<Bhk>,
    pub furnishing: Option<Furnishing>,
    pub move_in: Option<MoveIn>,
    pub profile: Option<Profile>,
    pub notes: Option<String>,
    pub prefill_ts: Option<i64>,
}

impl DraftPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn budget(min_k: u32, max_k: u32) -> Self {
        Self {
            budget_min_k: Some(min_k),
            budget_max_k: Some(max_k),
            ..Default::default()
        }
    }
}

/// Strips everything but ASCII digits and keeps the first ten.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Clamps into 10..=200 and rounds to the nearest multiple of 5.
pub fn snap_budget(value_k: u32) -> u32 {
    let clamped = value_k.clamp(BUDGET_FLOOR_K, BUDGET_CEIL_K);
    let snapped = (clamped + BUDGET_STEP_K / 2) / BUDGET_STEP_K * BUDGET_STEP_K;
    snapped.clamp(BUDGET_FLOOR_K, BUDGET_CEIL_K)
}

pub fn budget_range_label(min_k: u32, max_k: u32) -> String {
    let round = |k: u32| (k + BUDGET_STEP_K / 2) / BUDGET_STEP_K * BUDGET_STEP_K;
    format!("{}-{}k", round(min_k), round(max_k))
}

/// Resolves a budget update against the current bounds so that min stays
/// strictly below max: moving one bound past the other drags it along.
fn resolve_budget(current: (u32, u32), min_k: Option<u32>, max_k: Option<u32>) -> (u32, u32) {
    let (cur_min, cur_max) = current;
    match (min_k, max_k) {
        (None, None) => (cur_min, cur_max),
        (Some(min), None) => {
            let min = snap_budget(min).min(BUDGET_CEIL_K - BUDGET_STEP_K);
            let max = if cur_max <= min { min + BUDGET_STEP_K } else { cur_max };
            (min, max)
        }
        (None, Some(max)) => {
            let max = snap_budget(max).max(BUDGET_FLOOR_K + BUDGET_STEP_K);
            let min = if cur_min >= max { max - BUDGET_STEP_K } else { cur_min };
            (min, max)
        }
        (Some(min), Some(max)) => {
            let min = snap_budget(min).min(BUDGET_CEIL_K - BUDGET_STEP_K);
            let max = snap_budget(max);
            if max <= min {
                (min, min + BUDGET_STEP_K)
            } else {
                (min, max)
            }
        }
    }
}

impl Draft {
    /// Shallow merge, last patch wins. The phone is re-normalized, the budget
    /// pair re-clamped, and an area change drops a locality that belongs to a
    /// different area.
    pub fn merge(&self, patch: DraftPatch) -> Draft {
        let mut next = self.clone();
        let area_changed = patch.area.is_some() && patch.area != self.area;

        if let Some(name) = patch.name {
            next.name = name;
        }
        if let Some(phone) = patch.phone {
            next.phone = normalize_phone(&phone);
        }
        if let Some(area) = patch.area {
            next.area = Some(area);
        }
        if let Some(locality) = patch.locality {
            next.locality = locality;
        }
        let (min, max) = resolve_budget(
            (self.budget_min_k, self.budget_max_k),
            patch.budget_min_k,
            patch.budget_max_k,
        );
        next.budget_min_k = min;
        next.budget_max_k = max;
        if let Some(bhk) = patch.bhk {
            next.bhk = Some(bhk);
        }
        if let Some(furnishing) = patch.furnishing {
            next.furnishing = Some(furnishing);
        }
        if let Some(move_in) = patch.move_in {
            next.move_in = Some(move_in);
        }
        if let Some(profile) = patch.profile {
            next.profile = Some(profile);
        }
        if let Some(notes) = patch.notes {
            next.notes = notes;
        }
        if let Some(ts) = patch.prefill_ts {
            next.prefill_ts = Some(ts);
        }

        if area_changed {
            if let Some(area) = next.area {
                next.locality = locality::reconcile(area, &next.locality);
            }
        }
        next
    }

    pub fn clear(&self, field: ChoiceField) -> Draft {
        let mut next = self.clone();
        match field {
            ChoiceField::Area => next.area = None,
            ChoiceField::Bhk => next.bhk = None,
            ChoiceField::Furnishing => next.furnishing = None,
            ChoiceField::MoveIn => next.move_in = None,
            ChoiceField::Profile => next.profile = None,
        }
        next
    }

    pub fn has_valid_phone(&self) -> bool {
        self.phone.len() == PHONE_DIGITS
    }

    pub fn budget_range(&self) -> String {
        budget_range_label(self.budget_min_k, self.budget_max_k)
    }

    pub fn was_prefilled(&self) -> bool {
        self.prefill_ts.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_normalization_strips_and_truncates() {
        assert_eq!(normalize_phone("+91 98765-43210"), "9198765432");
        assert_eq!(normalize_phone("98765 43210 ext 9"), "9876543210");
        assert_eq!(normalize_phone("abc"), "");
    }

    #[test]
    fn phone_normalization_is_idempotent() {
        let once = normalize_phone("(987) 654-3210");
        assert_eq!(once, "9876543210");
        assert_eq!(normalize_phone(&once), once);
    }

    #[test]
    fn merge_normalizes_phone() {
        let draft = Draft::default().merge(DraftPatch {
            phone: Some("98765-432".into()),
            ..Default::default()
        });
        assert_eq!(draft.phone, "98765432");
        assert!(!draft.has_valid_phone());
    }

    #[test]
    fn raising_min_past_max_pushes_max_up() {
        let draft = Draft::default().merge(DraftPatch {
            budget_min_k: Some(80),
            ..Default::default()
        });
        assert_eq!((draft.budget_min_k, draft.budget_max_k), (80, 85));
    }

    #[test]
    fn lowering_max_past_min_pulls_min_down() {
        let draft = Draft::default().merge(DraftPatch {
            budget_max_k: Some(20),
            ..Default::default()
        });
        assert_eq!((draft.budget_min_k, draft.budget_max_k), (15, 20));
    }

    #[test]
    fn budget_edges_keep_a_gap() {
        let top = Draft::default().merge(DraftPatch {
            budget_min_k: Some(500),
            ..Default::default()
        });
        assert_eq!((top.budget_min_k, top.budget_max_k), (195, 200));

        let bottom = Draft::default().merge(DraftPatch {
            budget_max_k: Some(0),
            ..Default::default()
        });
        assert_eq!((bottom.budget_min_k, bottom.budget_max_k), (10, 15));
    }

    #[test]
    fn budget_invariant_holds_over_a_walk_of_updates() {
        let mut draft = Draft::default();
        for value in (0..=220).step_by(7) {
            draft = draft.merge(DraftPatch {
                budget_min_k: Some(value),
                ..Default::default()
            });
            assert!(draft.budget_min_k < draft.budget_max_k, "min update {value}");
            draft = draft.merge(DraftPatch {
                budget_max_k: Some(220 - value),
                ..Default::default()
            });
            assert!(draft.budget_min_k < draft.budget_max_k, "max update {value}");
        }
    }

    #[test]
    fn budget_range_label_rounds_to_five() {
        assert_eq!(budget_range_label(42, 61), "40-60k");
        assert_eq!(Draft::default().budget_range(), "40-60k");
    }

    #[test]
    fn area_change_drops_locality_of_other_area() {
        let draft = Draft::default().merge(DraftPatch {
            locality: Some("Evershine Nagar".into()),
            ..Default::default()
        });
        let moved = draft.merge(DraftPatch {
            area: Some(Area::BorivaliEast),
            ..Default::default()
        });
        assert_eq!(moved.locality, "");

        let free_text = draft
            .merge(DraftPatch {
                locality: Some("near the station".into()),
                ..Default::default()
            })
            .merge(DraftPatch {
                area: Some(Area::KandivaliWest),
                ..Default::default()
            });
        assert_eq!(free_text.locality, "near the station");
    }

    #[test]
    fn loose_parsing_matches_case_and_separators() {
        assert_eq!(Area::parse_loose("malad-west"), Some(Area::MaladWest));
        assert_eq!(Area::parse_loose("BORIVALI_EAST"), Some(Area::BorivaliEast));
        assert_eq!(Area::parse_loose("malad"), None);
        assert_eq!(Furnishing::parse_loose("Semi-Furnished"), Some(Furnishing::SemiFurnished));
        assert_eq!(MoveIn::parse_loose("30 "), Some(MoveIn::After30Days));
        assert_eq!(Bhk::parse_loose("2BHK"), Some(Bhk::Two));
        assert_eq!(Profile::parse_loose("penthouse"), None);
    }

    #[test]
    fn strict_parsing_uses_wire_codes() {
        assert_eq!("Kandivali East".parse::<Area>(), Ok(Area::KandivaliEast));
        assert_eq!("S".parse::<Furnishing>(), Ok(Furnishing::SemiFurnished));
        assert!("".parse::<Bhk>().is_err());
    }

    #[test]
    fn clear_unsets_only_the_named_field() {
        let draft = Draft::default().clear(ChoiceField::Bhk);
        assert_eq!(draft.bhk, None);
        assert_eq!(draft.profile, Some(Profile::Family));
    }
}
