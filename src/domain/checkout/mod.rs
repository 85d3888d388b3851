//! Checkout domain - storage contract consumed by the checkout integration

mod storage;

pub use storage::*;
