//! Checkout infrastructure

mod storage;

pub use storage::RepositoryCheckoutStorage;
