use crate::state::draft::Area;

const MALAD_WEST: &[&str] = &["Evershine Nagar", "Mindspace", "Marve Road", "Orlem", "Malvani", "Link Road"];
const MALAD_EAST: &[&str] = &["Kurar Village", "Pathanwadi", "Dindoshi", "Rani Sati Marg", "Pushpa Park"];
const KANDIVALI_WEST: &[&str] = &["Mahavir Nagar", "Charkop", "Dahanukar Wadi", "Poisar", "Irani Wadi"];
const KANDIVALI_EAST: &[&str] = &["Thakur Village", "Lokhandwala Township", "Samta Nagar", "Akurli Road", "Ashok Nagar"];
const BORIVALI_WEST: &[&str] = &["IC Colony", "Gorai", "Shimpoli", "Chikuwadi", "LIC Colony", "Vazira Naka"];
const BORIVALI_EAST: &[&str] = &["Devipada", "Magathane", "Rajendra Nagar", "Kulupwadi", "Shrikrishna Nagar"];

pub fn localities(area: Area) -> &'static [&'static str] {
    match area {
        Area::MaladWest => MALAD_WEST,
        Area::MaladEast => MALAD_EAST,
        Area::KandivaliWest => KANDIVALI_WEST,
        Area::KandivaliEast => KANDIVALI_EAST,
        Area::BorivaliWest => BORIVALI_WEST,
        Area::BorivaliEast => BORIVALI_EAST,
    }
}

/// The area a known locality belongs to, matched case-insensitively.
pub fn area_of(locality: &str) -> Option<Area> {
    let wanted = locality.trim();
    if wanted.is_empty() {
        return None;
    }
    Area::ALL
        .into_iter()
        .find(|area| localities(*area).iter().any(|l| l.eq_ignore_ascii_case(wanted)))
}

/// Keeps free text and localities of `area`; a locality known to belong to a
/// different area is reset to empty.
pub fn reconcile(area: Area, locality: &str) -> String {
    match area_of(locality) {
        Some(owner) if owner != area => String::new(),
        Some(_) => canonical(area, locality).unwrap_or_else(|| locality.to_string()),
        None => locality.to_string(),
    }
}

fn canonical(area: Area, locality: &str) -> Option<String> {
    localities(area)
        .iter()
        .find(|l| l.eq_ignore_ascii_case(locality.trim()))
        .map(|l| l.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_area_has_localities() {
        for area in Area::ALL {
            assert!(!localities(area).is_empty(), "{area}");
        }
    }

    #[test]
    fn localities_are_unique_across_areas() {
        for area in Area::ALL {
            for l in localities(area) {
                assert_eq!(area_of(l), Some(area), "{l}");
            }
        }
    }

    #[test]
    fn reconcile_resets_foreign_locality() {
        assert_eq!(reconcile(Area::BorivaliWest, "charkop"), "");
        assert_eq!(reconcile(Area::KandivaliWest, "charkop"), "Charkop");
        assert_eq!(reconcile(Area::MaladEast, "opposite the mall"), "opposite the mall");
        assert_eq!(reconcile(Area::MaladEast, ""), "");
    }
}
