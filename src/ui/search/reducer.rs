use crate::ui::mvi::Reducer;

use super::intent::SearchIntent;
use super::state::SearchState;

pub struct SearchReducer;

impl Reducer for SearchReducer {
    type State = SearchState;
    type Intent = SearchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            SearchIntent::Edit { text, now } => SearchState {
                draft: text,
                deadline: Some(now + state.quiet_period),
                ..state
            },
            SearchIntent::Elapsed { now } => match state.deadline {
                Some(deadline) if now >= deadline => state.commit_draft(),
                _ => state,
            },
            SearchIntent::Submit => state.commit_draft(),
            SearchIntent::Clear => SearchState {
                draft: String::new(),
                ..state
            }
            .commit_draft(),
            SearchIntent::External { committed } => {
                // Our own commits echo back with the same text.
                if committed == state.committed {
                    return state;
                }
                SearchState {
                    draft: committed.clone(),
                    committed,
                    deadline: None,
                    ..state
                }
            }
        }
    }
}
