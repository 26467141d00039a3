//! Domain ports (interfaces)

pub mod providers;

pub use providers::*;
