pub mod domain;
pub mod error;
pub mod query;
pub mod rules;

pub use domain::*;
pub use error::CoreError;
pub use query::{Filter, FilterGroup, FilterOperator, SearchQuery};
pub use rules::*;
