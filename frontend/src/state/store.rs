use std::rc::Rc;
use yew::prelude::*;

use crate::state::draft::{ChoiceField, Draft, DraftPatch};

pub enum DraftAction {
    Patch(DraftPatch),
    Clear(ChoiceField),
}

impl Reducible for Draft {
    type Action = DraftAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let next = match action {
            DraftAction::Patch(patch) => self.merge(patch),
            DraftAction::Clear(field) => self.clear(field),
        };
        if next == *self {
            self
        } else {
            Rc::new(next)
        }
    }
}

/// Handle to the tab-wide draft. Every mutation goes through `Draft::merge`
/// via the reducer, and every component holding the handle re-renders on
/// change.
#[derive(Clone, PartialEq)]
pub struct DraftStore {
    handle: UseReducerHandle<Draft>,
}

impl DraftStore {
    pub fn draft(&self) -> &Draft {
        &self.handle
    }

    pub fn get(&self) -> Draft {
        (*self.handle).clone()
    }

    pub fn set(&self, patch: DraftPatch) {
        if !patch.is_empty() {
            self.handle.dispatch(DraftAction::Patch(patch));
        }
    }

    pub fn clear(&self, field: ChoiceField) {
        self.handle.dispatch(DraftAction::Clear(field));
    }
}

#[derive(Properties, PartialEq)]
pub struct DraftProviderProps {
    pub children: Children,
}

#[function_component(DraftProvider)]
pub fn draft_provider(props: &DraftProviderProps) -> Html {
    let handle = use_reducer(Draft::default);
    let store = DraftStore { handle };

    html! {
        <ContextProvider<DraftStore> context={store}>
            { for props.children.iter() }
        </ContextProvider<DraftStore>>
    }
}

#[hook]
pub fn use_lead_draft() -> DraftStore {
    use_context::<DraftStore>().expect("use_lead_draft called outside DraftProvider")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::draft::Area;

    #[test]
    fn patch_is_shallow_merge_last_write_wins() {
        let draft = Rc::new(Draft::default());
        let draft = draft.reduce(DraftAction::Patch(DraftPatch {
            name: Some("Asha".into()),
            area: Some(Area::KandivaliEast),
            ..Default::default()
        }));
        let draft = draft.reduce(DraftAction::Patch(DraftPatch {
            name: Some("Asha K".into()),
            ..Default::default()
        }));
        assert_eq!(draft.name, "Asha K");
        assert_eq!(draft.area, Some(Area::KandivaliEast));
    }

    #[test]
    fn no_op_patch_keeps_the_same_allocation() {
        let draft = Rc::new(Draft::default());
        let same = Rc::clone(&draft).reduce(DraftAction::Patch(DraftPatch {
            area: Some(Area::MaladWest),
            ..Default::default()
        }));
        assert!(Rc::ptr_eq(&draft, &same));
    }

    #[test]
    fn clear_action_unsets_choice() {
        let draft = Rc::new(Draft::default()).reduce(DraftAction::Clear(ChoiceField::Area));
        assert_eq!(draft.area, None);
    }
}
