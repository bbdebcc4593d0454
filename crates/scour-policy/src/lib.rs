//! Scour sanitization policies
//!
//! The `Policy` allow-list value, the per-token filter it parameterizes,
//! inline-style declaration filtering, and the named-policy registry with
//! its injected host-configuration source.

mod css;
mod filter;
mod policy;
mod registry;

pub use filter::{DisallowedTags, FilterOptions, PolicyFilter};
pub use policy::Policy;
pub use registry::{ConfigSource, GENERAL, PolicyConfig, RESTRICTED, Registry, RegistryError};
