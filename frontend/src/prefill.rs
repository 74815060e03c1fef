use url::{form_urlencoded, Url};

use crate::state::draft::{
    normalize_phone, snap_budget, Area, Bhk, DraftPatch, Furnishing, MoveIn, Profile,
    BUDGET_CEIL_K, BUDGET_STEP_K,
};

const MAX_TEXT_LEN: usize = 80;

/// What a landing URL asks of the page: fields to seed and whether to bring
/// the lead form into view.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Prefill {
    pub patch: DraftPatch,
    pub auto_scroll: bool,
}

/// Decoded query pairs of an absolute or relative URL, in order.
pub(crate) fn query_pairs(href: &str) -> Vec<(String, String)> {
    let query = match Url::parse(href) {
        Ok(url) => url.query().unwrap_or_default().to_string(),
        Err(_) => href
            .split_once('?')
            .map(|(_, q)| q.split('#').next().unwrap_or_default().to_string())
            .unwrap_or_default(),
    };
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn parse_budget(raw: &str) -> Option<u32> {
    let trimmed = raw.trim().trim_end_matches(['k', 'K']).trim();
    trimmed.parse::<u32>().ok().map(snap_budget)
}

fn clean_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(MAX_TEXT_LEN).collect())
    }
}

fn is_truthy(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "lead"
    )
}

pub fn parse_prefill_from_url(href: &str) -> Prefill {
    parse_prefill_pairs(query_pairs(href))
}

/// Maps recognized parameters onto a draft patch. Unknown keys are ignored
/// and values that fail to parse are dropped rather than defaulted. Later
/// duplicates win.
pub fn parse_prefill_pairs(pairs: Vec<(String, String)>) -> Prefill {
    let mut prefill = Prefill::default();
    let patch = &mut prefill.patch;

    for (key, value) in pairs {
        match key.to_ascii_lowercase().as_str() {
            "area" => patch.area = Area::parse_loose(&value).or(patch.area),
            "bhk" => patch.bhk = Bhk::parse_loose(&value).or(patch.bhk),
            "furnishing" => {
                patch.furnishing = Furnishing::parse_loose(&value).or(patch.furnishing)
            }
            "movein" => patch.move_in = MoveIn::parse_loose(&value).or(patch.move_in),
            "profile" => patch.profile = Profile::parse_loose(&value).or(patch.profile),
            "budgetmin" | "min" => {
                patch.budget_min_k = parse_budget(&value).or(patch.budget_min_k)
            }
            "budgetmax" | "max" => {
                patch.budget_max_k = parse_budget(&value).or(patch.budget_max_k)
            }
            "name" => patch.name = clean_text(&value).or(patch.name.take()),
            "locality" => patch.locality = clean_text(&value).or(patch.locality.take()),
            "phone" => {
                let digits = normalize_phone(&value);
                if !digits.is_empty() {
                    patch.phone = Some(digits);
                }
            }
            "scroll" => prefill.auto_scroll = is_truthy(&value),
            _ => {}
        }
    }

    if let (Some(min), Some(max)) = (patch.budget_min_k, patch.budget_max_k) {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let (lo, hi) = if lo == hi {
            if hi == BUDGET_CEIL_K {
                (hi - BUDGET_STEP_K, hi)
            } else {
                (lo, lo + BUDGET_STEP_K)
            }
        } else {
            (lo, hi)
        };
        patch.budget_min_k = Some(lo);
        patch.budget_max_k = Some(hi);
    }

    prefill
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::{Draft, BUDGET_FLOOR_K};

    #[test]
    fn full_query_maps_every_field() {
        let prefill = parse_prefill_from_url(
            "https://rent.example/malad?area=malad-east&bhk=2&budgetMin=33&budgetMax=90k\
             &moveIn=15&profile=bachelor&furnishing=semi&name=%20Asha%20&phone=%2B91-98765-43210\
             &locality=Kurar%20Village&scroll=1",
        );
        let patch = prefill.patch;
        assert!(prefill.auto_scroll);
        assert_eq!(patch.area, Some(Area::MaladEast));
        assert_eq!(patch.bhk, Some(Bhk::Two));
        assert_eq!(patch.budget_min_k, Some(35));
        assert_eq!(patch.budget_max_k, Some(90));
        assert_eq!(patch.move_in, Some(MoveIn::Within15Days));
        assert_eq!(patch.profile, Some(Profile::Bachelor));
        assert_eq!(patch.furnishing, Some(Furnishing::SemiFurnished));
        assert_eq!(patch.name.as_deref(), Some("Asha"));
        assert_eq!(patch.phone.as_deref(), Some("9198765432"));
        assert_eq!(patch.locality.as_deref(), Some("Kurar Village"));
        assert_eq!(patch.prefill_ts, None);
    }

    #[test]
    fn unknown_params_and_bad_enums_are_dropped() {
        let prefill = parse_prefill_from_url(
            "/?utm_source=google&area=andheri&bhk=5&furnishing=luxury&foo=bar&moveIn=never",
        );
        assert!(prefill.patch.is_empty());
        assert!(!prefill.auto_scroll);
    }

    #[test]
    fn budgets_are_clamped_and_ordered() {
        let prefill = parse_prefill_from_url("/?budgetMin=900&budgetMax=3");
        assert_eq!(prefill.patch.budget_min_k, Some(BUDGET_FLOOR_K));
        assert_eq!(prefill.patch.budget_max_k, Some(BUDGET_CEIL_K));

        let equal = parse_prefill_from_url("/?min=200&max=200");
        assert_eq!(equal.patch.budget_min_k, Some(195));
        assert_eq!(equal.patch.budget_max_k, Some(200));

        let garbage = parse_prefill_from_url("/?budgetMin=cheap");
        assert_eq!(garbage.patch.budget_min_k, None);
    }

    #[test]
    fn plus_decoded_as_space_still_matches() {
        let prefill = parse_prefill_from_url("/?moveIn=30+&area=Borivali+West");
        assert_eq!(prefill.patch.move_in, Some(MoveIn::After30Days));
        assert_eq!(prefill.patch.area, Some(Area::BorivaliWest));
    }

    #[test]
    fn parsing_is_idempotent() {
        let href = "/kandivali?area=Kandivali%20West&phone=98765&scroll=lead";
        assert_eq!(parse_prefill_from_url(href), parse_prefill_from_url(href));
    }

    #[test]
    fn later_duplicate_wins_but_bad_value_keeps_earlier() {
        let prefill = parse_prefill_from_url("/?bhk=1&bhk=2&profile=company&profile=alien");
        assert_eq!(prefill.patch.bhk, Some(Bhk::Two));
        assert_eq!(prefill.patch.profile, Some(Profile::Company));
    }

    #[test]
    fn applying_patch_keeps_draft_valid() {
        let prefill = parse_prefill_from_url("/?budgetMin=150&name=%20%20&phone=abc");
        assert!(prefill.patch.name.is_none());
        assert!(prefill.patch.phone.is_none());
        let draft = Draft::default().merge(prefill.patch);
        assert_eq!((draft.budget_min_k, draft.budget_max_k), (150, 155));
    }

    #[test]
    fn relative_href_without_query_is_empty() {
        assert_eq!(parse_prefill_from_url("/malad"), Prefill::default());
        assert_eq!(parse_prefill_from_url("/malad?area=Malad%20West#lead").patch.area, Some(Area::MaladWest));
    }
}
