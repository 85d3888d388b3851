//! Infrastructure layer - storage backends, repositories and runtime setup

pub mod checkout;
pub mod delivery;
pub mod logging;
pub mod storage;
