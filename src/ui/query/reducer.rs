use crate::ui::mvi::Reducer;

use super::intent::QueryIntent;
use super::state::QueryState;

pub struct QueryReducer;

impl Reducer for QueryReducer {
    type State = QueryState;
    type Intent = QueryIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            QueryIntent::SetFilter(text) => {
                let filter = text.trim();
                if filter == state.filter {
                    return state;
                }
                QueryState {
                    filter: filter.to_string(),
                    page: 1,
                    ..state
                }
            }
            QueryIntent::SetPage(page) => QueryState {
                page: page.max(1),
                ..state
            },
            QueryIntent::SetSort(sort) => {
                if sort == state.sort {
                    return state;
                }
                QueryState {
                    sort,
                    page: 1,
                    ..state
                }
            }
            QueryIntent::Reset => QueryState::default(),
        }
    }
}
