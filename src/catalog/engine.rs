//! Reference list semantics: filter, then sort, then paginate.
//!
//! Any backend serving the console must reproduce these rules exactly;
//! [`MemoryStore`](crate::store::MemoryStore) and the HTTP server both
//! delegate to [`run_query`].

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::product::Product;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Numeric columns the list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Price,
    Stock,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::Stock => "stock",
        }
    }

    /// Parses the wire name. Anything else means "unsorted".
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "price" => Some(Self::Price),
            "stock" => Some(Self::Stock),
            _ => None,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Price => a.price.cmp(&b.price),
            Self::Stock => a.stock.cmp(&b.stock),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// `desc` (any case) is descending; everything else is ascending.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            Self::Descending
        } else {
            Self::Ascending
        }
    }
}

/// Sort field and direction always travel together, so a direction
/// without a field cannot be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.as_str(), self.direction.as_str())
    }
}

/// The query key: every parameter that determines a result page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListParams {
    pub filter: String,
    pub page: usize,
    pub page_size: usize,
    pub sort: Option<SortSpec>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            filter: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

/// One page of results plus the numbers needed to render a pager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub items: Vec<Product>,
    /// The page actually served, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Lower-cased, whitespace-separated keywords; empty pieces are dropped.
pub fn keywords(filter: &str) -> Vec<String> {
    filter
        .split_whitespace()
        .map(str::to_lowercase)
        .collect()
}

/// Keeps records whose lower-cased name contains every keyword.
///
/// Always returns a fresh vector in storage order.
pub fn filter_records(records: &[Product], filter: &str) -> Vec<Product> {
    let keywords = keywords(filter);
    if keywords.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|product| {
            let name = product.name.to_lowercase();
            keywords.iter().all(|kw| name.contains(kw.as_str()))
        })
        .cloned()
        .collect()
}

/// Stable numeric sort. Descending reverses the comparator, so records
/// with equal keys keep their relative order in both directions.
pub fn sort_records(records: &mut [Product], sort: Option<SortSpec>) {
    let Some(SortSpec { field, direction }) = sort else {
        return;
    };
    records.sort_by(|a, b| {
        let ordering = field.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Number of pages needed for `total` records; never less than one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Slices out the requested page, clamping it into `[1, total_pages]`.
///
/// The returned `page` is the clamped one so callers can detect drift.
/// `page_size` is echoed back untouched.
pub fn paginate(records: Vec<Product>, page: usize, page_size: usize) -> ResultPage {
    let total = records.len();
    let total_pages = total_pages(total, page_size);
    let page = page.clamp(1, total_pages);
    let per_page = page_size.max(1);
    let items = records
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    ResultPage {
        items,
        page,
        page_size,
        total,
        total_pages,
    }
}

/// Filter, sort and paginate `records` for `params`. Pure: the source
/// slice is never reordered.
pub fn run_query(records: &[Product], params: &ListParams) -> ResultPage {
    let mut matched = filter_records(records, &params.filter);
    sort_records(&mut matched, params.sort);
    paginate(matched, params.page, params.page_size)
}
