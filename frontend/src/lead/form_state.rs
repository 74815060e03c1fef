use std::rc::Rc;
use yew::prelude::Reducible;

use crate::config::normalize_endpoint;
use crate::lead::client::LeadAccepted;
use crate::lead::error::LeadError;
use crate::lead::validation::{validate_all, validate_contact, validate_preferences, Field, FieldErrors};
use crate::state::draft::Draft;

pub const STEP_COUNT: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Contact,
    Preferences,
    Review,
}

impl Step {
    pub fn number(self) -> u8 {
        match self {
            Step::Contact => 1,
            Step::Preferences => 2,
            Step::Review => 3,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Contact => "Contact",
            Step::Preferences => "Preferences",
            Step::Review => "Review",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Contact => Some(Step::Preferences),
            Step::Preferences => Some(Step::Review),
            Step::Review => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Contact => None,
            Step::Preferences => Some(Step::Contact),
            Step::Review => Some(Step::Preferences),
        }
    }
}

/// What must hold on `step` before moving forward from it.
pub fn validate_step(step: Step, draft: &Draft) -> FieldErrors {
    match step {
        Step::Contact => validate_contact(draft),
        Step::Preferences => validate_preferences(draft),
        Step::Review => validate_all(draft),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StepOutcome {
    Advanced(Step),
    Blocked(FieldErrors),
    Stayed,
}

#[derive(Debug)]
pub enum SubmitGate {
    Ready,
    /// A request from this form is already in flight.
    Busy,
    NotOnReview,
    Rejected(LeadError),
}

/// Wizard state layered over the shared draft. Field values are never held
/// here, only where the user is and what the last attempt produced.
#[derive(Clone, Debug, PartialEq)]
pub struct LeadFormState {
    pub step: Step,
    pub field_errors: FieldErrors,
    pub submitting: bool,
    pub success_lead_id: Option<String>,
    pub error: Option<String>,
    /// Minted on each entry to Review and reused by every retry from it.
    pub idempotency_key: Option<String>,
}

impl Default for LeadFormState {
    fn default() -> Self {
        Self {
            step: Step::Contact,
            field_errors: FieldErrors::default(),
            submitting: false,
            success_lead_id: None,
            error: None,
            idempotency_key: None,
        }
    }
}

impl LeadFormState {
    pub fn next(&mut self, draft: &Draft, new_key: impl FnOnce() -> String) -> StepOutcome {
        if self.submitting {
            return StepOutcome::Stayed;
        }
        let errors = validate_step(self.step, draft);
        if !errors.is_empty() {
            self.field_errors = errors.clone();
            return StepOutcome::Blocked(errors);
        }
        let Some(next) = self.step.next() else {
            return StepOutcome::Stayed;
        };
        self.step = next;
        self.field_errors = FieldErrors::default();
        self.error = None;
        if next == Step::Review {
            self.idempotency_key = Some(new_key());
        }
        StepOutcome::Advanced(next)
    }

    /// Always allowed, even with a request in flight. Values stay in the
    /// draft; only messages are cleared.
    pub fn back(&mut self) -> bool {
        match self.step.prev() {
            Some(prev) => {
                self.step = prev;
                self.error = None;
                self.field_errors = FieldErrors::default();
                self.success_lead_id = None;
                true
            }
            None => false,
        }
    }

    pub fn field_edited(&mut self, field: Field) {
        self.field_errors.remove(field);
    }

    pub fn submit_gate(&self, draft: &Draft, endpoint: Option<&str>) -> SubmitGate {
        if self.submitting {
            return SubmitGate::Busy;
        }
        if self.step != Step::Review {
            return SubmitGate::NotOnReview;
        }
        if normalize_endpoint(endpoint).is_none() {
            return SubmitGate::Rejected(LeadError::Configuration);
        }
        let errors = validate_all(draft);
        if !errors.is_empty() {
            return SubmitGate::Rejected(LeadError::Validation(errors));
        }
        SubmitGate::Ready
    }

    pub fn start_submit(&mut self) {
        self.submitting = true;
        self.error = None;
        self.success_lead_id = None;
    }

    pub fn reject(&mut self, err: &LeadError) {
        self.submitting = false;
        self.error = Some(err.to_string());
        if let LeadError::Validation(errors) = err {
            self.field_errors = errors.clone();
        }
    }

    /// Stays on Review either way so a failed attempt can be retried as-is.
    pub fn finish(&mut self, result: &Result<LeadAccepted, LeadError>) {
        match result {
            Ok(accepted) => {
                self.submitting = false;
                self.error = None;
                self.field_errors = FieldErrors::default();
                self.success_lead_id = Some(accepted.lead_id.clone());
            }
            Err(err) => self.reject(err),
        }
    }

    pub fn start_over(&mut self) {
        *self = Self::default();
    }

    pub fn can_submit(&self) -> bool {
        self.step == Step::Review && !self.submitting && self.success_lead_id.is_none()
    }
}

pub enum FormAction {
    Next { draft: Draft, key: String },
    Back,
    FieldEdited(Field),
    SubmitStarted,
    Rejected(LeadError),
    Finished(Result<LeadAccepted, LeadError>),
    StartOver,
}

impl Reducible for LeadFormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::Next { draft, key } => {
                next.next(&draft, || key);
            }
            FormAction::Back => {
                next.back();
            }
            FormAction::FieldEdited(field) => next.field_edited(field),
            FormAction::SubmitStarted => next.start_submit(),
            FormAction::Rejected(err) => next.reject(&err),
            FormAction::Finished(result) => next.finish(&result),
            FormAction::StartOver => next.start_over(),
        }
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::{Area, ChoiceField, DraftPatch};

    const ENDPOINT: Option<&str> = Some("https://leads.example/exec");

    fn contact(name: &str, phone: &str) -> Draft {
        Draft::default().merge(DraftPatch {
            name: Some(name.into()),
            phone: Some(phone.into()),
            area: Some(Area::MaladWest),
            ..Default::default()
        })
    }

    fn at_review(draft: &Draft) -> LeadFormState {
        let mut state = LeadFormState::default();
        assert_eq!(state.next(draft, || "k1".into()), StepOutcome::Advanced(Step::Preferences));
        assert_eq!(state.next(draft, || "k1".into()), StepOutcome::Advanced(Step::Review));
        state
    }

    #[test]
    fn empty_name_blocks_step_one() {
        let mut state = LeadFormState::default();
        match state.next(&contact("", "9876543210"), String::new) {
            StepOutcome::Blocked(errors) => assert_eq!(errors.fields(), vec![Field::Name]),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(state.step, Step::Contact);
        assert!(state.field_errors.get(Field::Name).is_some());
    }

    #[test]
    fn short_phone_blocks_step_one() {
        let mut state = LeadFormState::default();
        match state.next(&contact("Asha", "98765432"), String::new) {
            StepOutcome::Blocked(errors) => assert_eq!(errors.fields(), vec![Field::Phone]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn valid_contact_advances() {
        let mut state = LeadFormState::default();
        assert_eq!(
            state.next(&contact("Asha", "9876543210"), String::new),
            StepOutcome::Advanced(Step::Preferences)
        );
        assert!(state.idempotency_key.is_none());
    }

    #[test]
    fn cleared_preference_blocks_step_two() {
        let draft = contact("Asha", "9876543210");
        let mut state = LeadFormState::default();
        state.next(&draft, String::new);
        let cleared = draft.clear(ChoiceField::Bhk);
        assert!(matches!(state.next(&cleared, String::new), StepOutcome::Blocked(_)));
        assert_eq!(state.step, Step::Preferences);
    }

    #[test]
    fn entering_review_mints_a_key_each_time() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        assert_eq!(state.idempotency_key.as_deref(), Some("k1"));
        assert!(state.back());
        state.next(&draft, || "k2".into());
        assert_eq!(state.idempotency_key.as_deref(), Some("k2"));
    }

    #[test]
    fn back_clears_error_and_keeps_draft() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        state.error = Some("server busy".into());
        assert!(state.back());
        assert_eq!(state.step, Step::Preferences);
        assert_eq!(state.error, None);
        assert!(state.back());
        assert!(!state.back());
        assert_eq!(state.step, Step::Contact);
        assert_eq!(draft.name, "Asha");
    }

    #[test]
    fn gate_requires_review_and_endpoint() {
        let draft = contact("Asha", "9876543210");
        let state = LeadFormState::default();
        assert!(matches!(state.submit_gate(&draft, ENDPOINT), SubmitGate::NotOnReview));

        let state = at_review(&draft);
        assert!(matches!(
            state.submit_gate(&draft, None),
            SubmitGate::Rejected(LeadError::Configuration)
        ));
        assert!(matches!(state.submit_gate(&draft, ENDPOINT), SubmitGate::Ready));
    }

    #[test]
    fn gate_rechecks_draft_changed_by_another_writer() {
        let draft = contact("Asha", "9876543210");
        let state = at_review(&draft);
        let changed = draft.merge(DraftPatch {
            phone: Some("123".into()),
            ..Default::default()
        });
        match state.submit_gate(&changed, ENDPOINT) {
            SubmitGate::Rejected(err @ LeadError::Validation(_)) => {
                assert_eq!(err.to_string(), "WhatsApp number must be exactly 10 digits.")
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn in_flight_submission_blocks_a_second_one() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        state.start_submit();
        assert!(matches!(state.submit_gate(&draft, ENDPOINT), SubmitGate::Busy));
        assert_eq!(state.next(&draft, String::new), StepOutcome::Stayed);
    }

    #[test]
    fn back_works_mid_submit_and_finish_still_lands() {
        let draft = contact("Asha", "9876543210");
        let state = Rc::new(at_review(&draft))
            .reduce(FormAction::SubmitStarted)
            .reduce(FormAction::Back);
        assert_eq!(state.step, Step::Preferences);
        assert!(state.submitting);

        let state = state.reduce(FormAction::Finished(Err(LeadError::Network("reset".into()))));
        assert!(!state.submitting);
        assert_eq!(state.step, Step::Preferences);
        assert_eq!(state.error.as_deref(), Some("Network error. Please try again."));
    }

    #[test]
    fn success_shows_lead_id() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        state.start_submit();
        state.finish(&Ok(LeadAccepted { lead_id: "L123".into() }));
        assert_eq!(state.success_lead_id.as_deref(), Some("L123"));
        assert!(!state.submitting);
        assert!(!state.can_submit());
    }

    #[test]
    fn failure_stays_on_review_ready_to_retry() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        state.start_submit();
        state.finish(&Err(LeadError::RemoteRejection {
            status: 500,
            message: "server busy".into(),
        }));
        assert_eq!(state.step, Step::Review);
        assert_eq!(state.error.as_deref(), Some("server busy"));
        assert_eq!(state.idempotency_key.as_deref(), Some("k1"));
        assert!(state.can_submit());
        assert!(matches!(state.submit_gate(&draft, ENDPOINT), SubmitGate::Ready));
    }

    #[test]
    fn start_over_returns_to_contact() {
        let draft = contact("Asha", "9876543210");
        let mut state = at_review(&draft);
        state.finish(&Ok(LeadAccepted { lead_id: "L9".into() }));
        state.start_over();
        assert_eq!(state, LeadFormState::default());
    }

    #[test]
    fn reducer_applies_actions_in_order() {
        let draft = contact("Asha", "9876543210");
        let state = Rc::new(LeadFormState::default())
            .reduce(FormAction::Next { draft: draft.clone(), key: "a".into() })
            .reduce(FormAction::Next { draft, key: "b".into() })
            .reduce(FormAction::SubmitStarted)
            .reduce(FormAction::Finished(Err(LeadError::Network("reset".into()))));
        assert_eq!(state.step, Step::Review);
        assert_eq!(state.idempotency_key.as_deref(), Some("b"));
        assert_eq!(state.error.as_deref(), Some("Network error. Please try again."));
    }
}
