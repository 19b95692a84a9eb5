use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// String-keyed arguments as they appear on the wire.
///
/// Ordered so that serialized tool results are deterministic.
pub type ToolArgs = BTreeMap<String, String>;

/// String-keyed result map serialized back into a `tool` transcript entry.
pub type ToolOutput = BTreeMap<String, String>;

/// Failure reported by a capability instead of a result map.
///
/// The dispatch loop turns this into tool-result text for the model rather
/// than aborting the turn.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait Capability: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    async fn call(&self, args: &ToolArgs) -> std::result::Result<ToolOutput, CapabilityError>;
}

/// Name and usage line advertised for a registered capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityDescription {
    pub name: String,
    pub description: String,
}

/// Fixed mapping from capability name to implementation.
///
/// The set of registered names is decided at startup and never grows at
/// runtime; the model can only ever invoke what is in here.
#[derive(Default, Clone)]
pub struct CapabilityRegistry {
    capabilities: HashMap<String, Arc<dyn Capability>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            capabilities: HashMap::new(),
        }
    }

    pub fn register<C: Capability + 'static>(&mut self, capability: C) {
        self.capabilities
            .insert(capability.name().to_string(), Arc::new(capability));
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Capability>> {
        self.capabilities.get(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.capabilities.keys().cloned().collect()
    }

    pub fn describe(&self) -> Vec<CapabilityDescription> {
        let mut described: Vec<_> = self
            .capabilities
            .values()
            .map(|capability| CapabilityDescription {
                name: capability.name().to_string(),
                description: capability.description().to_string(),
            })
            .collect();
        described.sort_by(|a, b| a.name.cmp(&b.name));
        described
    }

    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }
}
