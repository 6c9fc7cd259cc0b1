use crate::ui::mvi::Reducer;

use super::intent::FetchIntent;
use super::state::FetchSnapshot;

/// Applies fetch lifecycle events, dropping outcomes of superseded fetches.
pub struct FetchReducer;

impl Reducer for FetchReducer {
    type State = FetchSnapshot;
    type Intent = FetchIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            FetchIntent::Started { generation, key } => {
                if generation <= state.generation {
                    return state;
                }
                FetchSnapshot {
                    loading: true,
                    error: None,
                    generation,
                    key: Some(key),
                    ..state
                }
            }
            FetchIntent::Succeeded { generation, page } => {
                if !state.is_current(generation) {
                    return state;
                }
                state.publish(page)
            }
            FetchIntent::Failed {
                generation,
                message,
            } => {
                if !state.is_current(generation) {
                    return state;
                }
                // Keep the last good rows on screen next to the error.
                FetchSnapshot {
                    loading: false,
                    error: Some(message),
                    ..state
                }
            }
        }
    }
}
