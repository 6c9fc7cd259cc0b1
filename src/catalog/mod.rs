//! Product catalogue domain: records, validation and the reference query
//! semantics shared by every store implementation.

pub mod engine;
pub mod product;
pub mod seed;

pub use engine::{
    run_query, ListParams, ResultPage, SortDirection, SortField, SortSpec, DEFAULT_PAGE_SIZE,
};
pub use product::{
    NewProduct, Product, ProductChanges, ProductInput, ProductPatch, ProductStatus,
    ValidationError,
};
