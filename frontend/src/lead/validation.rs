use std::collections::BTreeMap;
use std::fmt;

use crate::state::draft::{Draft, BUDGET_CEIL_K, BUDGET_FLOOR_K};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Phone,
    Area,
    Budget,
    Bhk,
    Furnishing,
    MoveIn,
    Profile,
}

impl Field {
    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Area => "area",
            Field::Budget => "budget",
            Field::Bhk => "bhk",
            Field::Furnishing => "furnishing",
            Field::MoveIn => "moveIn",
            Field::Profile => "profile",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Per-field messages, ordered the way the fields appear in the form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn fields(&self) -> Vec<Field> {
        self.0.keys().copied().collect()
    }

    pub fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn extend(&mut self, other: FieldErrors) {
        self.0.extend(other.0);
    }

    /// The single message shown when several fields are blocking.
    pub fn summary(&self) -> String {
        match self.0.values().next() {
            Some(first) if self.0.len() == 1 => first.to_string(),
            Some(first) => format!("{} ({} fields need attention)", first, self.0.len()),
            None => String::new(),
        }
    }

    fn insert(&mut self, field: Field, message: &'static str) {
        self.0.insert(field, message);
    }
}

pub fn validate_contact(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if draft.name.trim().is_empty() {
        errors.insert(Field::Name, "Please enter your name.");
    }
    if !draft.has_valid_phone() {
        errors.insert(Field::Phone, "WhatsApp number must be exactly 10 digits.");
    }
    if draft.area.is_none() {
        errors.insert(Field::Area, "Please select an area.");
    }
    errors
}

pub fn validate_preferences(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if draft.bhk.is_none() {
        errors.insert(Field::Bhk, "Please select BHK.");
    }
    if draft.furnishing.is_none() {
        errors.insert(Field::Furnishing, "Please select furnishing.");
    }
    if draft.move_in.is_none() {
        errors.insert(Field::MoveIn, "Please select move-in timeline.");
    }
    if draft.profile.is_none() {
        errors.insert(Field::Profile, "Please select profile.");
    }
    errors
}

/// Both steps plus the budget bounds, re-checked right before submission.
pub fn validate_all(draft: &Draft) -> FieldErrors {
    let mut errors = validate_contact(draft);
    errors.extend(validate_preferences(draft));
    let in_range = (BUDGET_FLOOR_K..=BUDGET_CEIL_K).contains(&draft.budget_min_k)
        && (BUDGET_FLOOR_K..=BUDGET_CEIL_K).contains(&draft.budget_max_k);
    if !in_range || draft.budget_min_k >= draft.budget_max_k {
        errors.insert(Field::Budget, "Budget range looks incorrect.");
    }
    errors
}
