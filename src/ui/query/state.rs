//! Canonical list query and its shareable-location encoding.

use crate::catalog::{ListParams, SortDirection, SortField, SortSpec};
use crate::ui::mvi::UiState;

use super::location::Location;

pub const FILTER_KEY: &str = "q";
pub const PAGE_KEY: &str = "page";
pub const SORT_BY_KEY: &str = "sortBy";
pub const SORT_DIR_KEY: &str = "sortDir";

/// What the user is looking at: filter text, page and optional sort.
///
/// Always derived from a [`Location`]; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryState {
    /// Trimmed; empty means "no filter".
    pub filter: String,
    /// One-based.
    pub page: usize,
    pub sort: Option<SortSpec>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 1,
            sort: None,
        }
    }
}

impl UiState for QueryState {}

impl QueryState {
    /// Decodes the recognised keys. Missing or malformed values fall back
    /// to their defaults; a `sortDir` without a valid `sortBy` is ignored.
    pub fn from_location(location: &Location) -> Self {
        let filter = location
            .get(FILTER_KEY)
            .map(str::trim)
            .unwrap_or_default()
            .to_string();
        let page = location
            .get(PAGE_KEY)
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let sort = location
            .get(SORT_BY_KEY)
            .and_then(SortField::parse)
            .map(|field| {
                let direction = location
                    .get(SORT_DIR_KEY)
                    .map(SortDirection::parse)
                    .unwrap_or_default();
                SortSpec::new(field, direction)
            });

        Self { filter, page, sort }
    }

    /// Writes the recognised keys into `location`, leaving every other
    /// parameter where it was.
    pub fn write_to(&self, location: &mut Location) {
        let filter = self.filter.trim();
        if filter.is_empty() {
            location.remove(FILTER_KEY);
        } else {
            location.set(FILTER_KEY, filter);
        }

        location.set(PAGE_KEY, self.page.max(1).to_string());

        match self.sort {
            Some(sort) => {
                location.set(SORT_BY_KEY, sort.field.as_str());
                location.set(SORT_DIR_KEY, sort.direction.as_str());
            }
            None => {
                location.remove(SORT_BY_KEY);
                location.remove(SORT_DIR_KEY);
            }
        }
    }

    /// The query key for a fetch of `page_size` rows.
    pub fn to_params(&self, page_size: usize) -> ListParams {
        ListParams {
            filter: self.filter.clone(),
            page: self.page,
            page_size,
            sort: self.sort,
        }
    }
}
