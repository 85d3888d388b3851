//! Search domain

mod query;

pub use query::Query;
