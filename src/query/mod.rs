//! List-request handling: filter translation and pagination.

pub mod filter;
pub mod pagination;

pub use filter::{
    AppliedFilters, Condition, FilterField, ListParams, RegistrationQuery, TranslatedQuery,
    parse_timestamp, translate,
};
pub use pagination::{PageRequest, Pagination};
