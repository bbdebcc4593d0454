//! Named-policy registry
//!
//! An explicit service object, not ambient global state: the host's
//! configuration source is injected at construction and consulted only on
//! lookup miss. Lookup never falls back to a default policy silently;
//! weakening a requested policy would be a security regression.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Deserialize;

use crate::policy::Policy;

/// Names of the two built-in policies registered by every `Registry`.
pub const GENERAL: &str = "General";
pub const RESTRICTED: &str = "Restricted";

/// Registry and configuration errors. Markup defects never surface here;
/// these are the only errors the pipeline propagates to callers.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no policy named `{0}` is registered or configured")]
    NotFound(String),

    #[error("invalid configuration for policy `{policy}`: {reason}")]
    Configuration { policy: String, reason: String },
}

/// An allow-list triple as the host application configures it, e.g.
/// deserialized from its own config files.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    pub elements: Vec<String>,
    pub attributes: Vec<String>,
    #[serde(default)]
    pub css: Vec<String>,
}

impl PolicyConfig {
    /// Validate the configured names and build a [`Policy`].
    ///
    /// Fails at construction time, not at use time: a name that is empty or
    /// contains markup-significant characters could itself corrupt output,
    /// so it is rejected here.
    pub fn build(&self, policy_name: &str) -> Result<Policy, RegistryError> {
        for (kind, names) in [
            ("element", &self.elements),
            ("attribute", &self.attributes),
            ("css property", &self.css),
        ] {
            for name in names {
                if !is_valid_name(name) {
                    return Err(RegistryError::Configuration {
                        policy: policy_name.to_owned(),
                        reason: format!("invalid {kind} name `{name}`"),
                    });
                }
            }
        }
        Ok(Policy::new(&self.elements, &self.attributes, &self.css))
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '&' | '"' | '\'' | '=' | '/'))
}

/// Read-only capability through which the registry reaches the host's
/// policy configuration. The registry does not know or care how the host
/// stores or loads it.
pub trait ConfigSource: Send + Sync {
    fn get(&self, name: &str) -> Option<PolicyConfig>;
}

/// Maps human-readable names to shared [`Policy`] values.
///
/// Registration is last-write-wins. Lookup misses consult the injected
/// [`ConfigSource`], lazily building and registering the policy on success;
/// concurrent lookups of the same unregistered name may build it twice, and
/// the last registration wins.
pub struct Registry {
    policies: RwLock<HashMap<String, Arc<Policy>>>,
    source: Option<Box<dyn ConfigSource>>,
}

impl Registry {
    /// A registry with the built-ins and no external fallback.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// A registry that resolves unknown names against `source`.
    pub fn with_source(source: Box<dyn ConfigSource>) -> Self {
        Self::build(Some(source))
    }

    fn build(source: Option<Box<dyn ConfigSource>>) -> Self {
        let registry = Self {
            policies: RwLock::new(HashMap::new()),
            source,
        };
        registry.register(GENERAL, Policy::general());
        registry.register(RESTRICTED, Policy::restricted());
        registry
    }

    /// Insert or overwrite a named policy.
    pub fn register(&self, name: &str, policy: Policy) {
        let _ = self
            .policies
            .write()
            .expect("policy registry lock poisoned")
            .insert(name.to_owned(), Arc::new(policy));
    }

    /// Resolve a named policy, lazily constructing it from the configuration
    /// source on a registry miss.
    pub fn lookup(&self, name: &str) -> Result<Arc<Policy>, RegistryError> {
        if let Some(policy) = self
            .policies
            .read()
            .expect("policy registry lock poisoned")
            .get(name)
        {
            return Ok(Arc::clone(policy));
        }

        let config = self
            .source
            .as_ref()
            .and_then(|source| source.get(name))
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;

        let policy = Arc::new(config.build(name)?);
        tracing::debug!("registering policy `{name}` from configuration source");
        let _ = self
            .policies
            .write()
            .expect("policy registry lock poisoned")
            .insert(name.to_owned(), Arc::clone(&policy));
        Ok(policy)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
