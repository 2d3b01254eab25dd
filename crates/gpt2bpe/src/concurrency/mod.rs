//! # Concurrency Utilities

pub mod pool_toy;
pub mod threads;

pub use pool_toy::PoolToy;
