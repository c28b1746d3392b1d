//! Types library for the custodial conversion agent
//!
//! Value types shared by the agent, its execution environment and its external
//! collaborators. Every type validates itself on construction and on
//! deserialization, so an instance in hand is always well formed.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Account addresses, asset identifiers, registry service identifiers
//! - `numeric`: Minimum conversion rate and minimum-return arithmetic
//! - `path`: Conversion route from native currency to the target asset
//! - `errors`: Validation error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod path;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::path::*;
    pub use crate::errors::*;
}
