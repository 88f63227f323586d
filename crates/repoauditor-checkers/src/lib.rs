//! The `Checker` trait, its registry, and the built-in health checkers
//! (§4.6, §4.7).

pub mod checker;
pub mod checkers;
pub mod registry;

pub use checker::{CheckContext, Checker, RepositoryContext};
pub use registry::CheckerRegistry;
