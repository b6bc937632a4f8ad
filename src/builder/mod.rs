//! Builder API for assembling transition systems and morphisms.
//!
//! Builders are mutable accumulators consumed by a single terminal `build`
//! call that returns a `Result`; a partially built system or morphism is
//! never observable.

pub mod error;
pub mod macros;
pub mod morphism;
pub mod system;

pub use error::{BuildError, SystemRole};
pub use morphism::MorphismBuilder;
pub use system::SystemBuilder;
