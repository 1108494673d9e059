//! Tool Registry - the live set of callable tools.
//!
//! The registry holds an immutable snapshot of `name -> entry` behind a
//! lock that is only held long enough to clone or swap an `Arc`:
//! - readers (`lookup`, `list`) clone the current snapshot and release the
//!   lock before touching any entry
//! - writers (`register`, `revoke`) build a new map from the current one and
//!   swap it in while holding the write lock, so mutations are serialized
//!
//! Every mutation that changes the tool set publishes the new generation on
//! a watch channel; sessions subscribe to it to learn about list changes.
//!
//! Handlers never run under the lock. A handler may therefore call back into
//! the registry (as `add_tool` and `delete_tool` do) without deadlocking, and
//! a call that already resolved its entry keeps running against it even if
//! the entry is replaced or revoked meanwhile.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rmcp::model::Tool;
use tokio::sync::watch;
use tracing::info;

use super::contract::ParamContract;
use super::error::ToolError;
use super::handler::ToolHandler;

// ============================================================================
// Entries
// ============================================================================

/// A registered tool: metadata plus the handler that runs it.
pub struct ToolEntry {
    name: String,
    description: String,
    contract: ParamContract,
    handler: Box<dyn ToolHandler>,
}

impl ToolEntry {
    /// Create an entry. The name must not be empty.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        contract: ParamContract,
        handler: impl ToolHandler + 'static,
    ) -> Result<Self, ToolError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ToolError::invalid_specification(
                "tool name must not be empty",
            ));
        }
        Ok(Self {
            name,
            description: description.into(),
            contract,
            handler: Box::new(handler),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn contract(&self) -> &ParamContract {
        &self.contract
    }

    pub fn handler(&self) -> &dyn ToolHandler {
        self.handler.as_ref()
    }

    /// Copy of the entry's metadata.
    pub fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name.clone(),
            description: self.description.clone(),
            contract: self.contract.clone(),
        }
    }
}

impl std::fmt::Debug for ToolEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

/// Metadata of a registered tool, detached from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub contract: ParamContract,
}

impl ToolDescriptor {
    /// Create a Tool model for `tools/list`.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.clone().into(),
            description: Some(self.description.clone().into()),
            input_schema: Arc::new(self.contract.to_input_schema()),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

// ============================================================================
// Tool Registry
// ============================================================================

#[derive(Default)]
struct Snapshot {
    generation: u64,
    entries: HashMap<String, Arc<ToolEntry>>,
}

/// Shared handle to the live tool set.
///
/// Cloning the handle shares the same registry.
#[derive(Clone)]
pub struct ToolRegistry {
    current: Arc<RwLock<Arc<Snapshot>>>,
    changes: Arc<watch::Sender<u64>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            current: Arc::default(),
            changes: Arc::new(changes),
        }
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    /// Insert an entry, replacing any entry of the same name.
    ///
    /// Returns the replaced entry, if any.
    pub fn register(&self, entry: ToolEntry) -> Option<Arc<ToolEntry>> {
        let name = entry.name.clone();
        let entry = Arc::new(entry);

        let previous = {
            let mut current = self.current.write();
            let mut entries = current.entries.clone();
            let previous = entries.insert(name.clone(), entry);
            let generation = current.generation + 1;
            *current = Arc::new(Snapshot {
                generation,
                entries,
            });
            self.changes.send_replace(generation);
            previous
        };

        if previous.is_some() {
            info!(tool = %name, "Replaced tool");
        } else {
            info!(tool = %name, "Registered tool");
        }
        previous
    }

    /// Remove the entry for `name`, if present.
    ///
    /// Removing an absent name is a no-op. Returns whether an entry was removed.
    pub fn revoke(&self, name: &str) -> bool {
        let removed = {
            let mut current = self.current.write();
            if !current.entries.contains_key(name) {
                false
            } else {
                let mut entries = current.entries.clone();
                entries.remove(name);
                let generation = current.generation + 1;
                *current = Arc::new(Snapshot {
                    generation,
                    entries,
                });
                self.changes.send_replace(generation);
                true
            }
        };

        if removed {
            info!(tool = %name, "Revoked tool");
        } else {
            info!(tool = %name, "Revoke requested for absent tool");
        }
        removed
    }

    /// Current entry for `name`.
    pub fn lookup(&self, name: &str) -> Result<Arc<ToolEntry>, ToolError> {
        self.snapshot()
            .entries
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Point-in-time copy of every entry's metadata, sorted by name.
    pub fn list(&self) -> Vec<ToolDescriptor> {
        let snapshot = self.snapshot();
        let mut tools: Vec<_> = snapshot.entries.values().map(|e| e.descriptor()).collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Names of all current tools, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.snapshot().entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.snapshot().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Counter bumped by every mutation that changed the tool set.
    pub fn generation(&self) -> u64 {
        self.snapshot().generation
    }

    /// Receiver that wakes on every later change of the tool set.
    ///
    /// The generation current at subscription time counts as seen, so the
    /// first `changed()` resolves only after the next mutation.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tool_names())
            .field("generation", &self.generation())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::contract::ParamSpec;
    use crate::domains::tools::handler::testing::FixedHandler;

    fn entry(name: &str, params: Vec<ParamSpec>) -> ToolEntry {
        ToolEntry::new(
            name,
            format!("{} tool", name),
            ParamContract::new(params).unwrap(),
            FixedHandler("ok"),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_unregistered_is_not_found() {
        let registry = ToolRegistry::new();
        assert_eq!(
            registry.lookup("greet").unwrap_err(),
            ToolError::not_found("greet")
        );
    }

    #[test]
    fn test_register_then_lookup() {
        let registry = ToolRegistry::new();
        registry.register(entry("greet", vec![ParamSpec::required("name")]));

        for _ in 0..3 {
            let found = registry.lookup("greet").unwrap();
            assert_eq!(found.name(), "greet");
            assert_eq!(found.description(), "greet tool");
            assert_eq!(found.contract().params(), &[ParamSpec::required("name")]);
        }
    }

    #[test]
    fn test_reregister_is_last_write_wins() {
        let registry = ToolRegistry::new();
        assert!(
            registry
                .register(entry("greet", vec![ParamSpec::required("name")]))
                .is_none()
        );
        let previous = registry.register(entry("greet", vec![ParamSpec::optional("nick")]));
        assert!(previous.is_some());

        let found = registry.lookup("greet").unwrap();
        assert_eq!(found.contract().params(), &[ParamSpec::optional("nick")]);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_revoke_is_idempotent() {
        let registry = ToolRegistry::new();
        registry.register(entry("greet", vec![]));

        assert!(registry.revoke("greet"));
        assert!(!registry.revoke("greet"));
        assert!(matches!(
            registry.lookup("greet"),
            Err(ToolError::NotFound(_))
        ));
    }

    #[test]
    fn test_revoke_absent_does_not_bump_generation() {
        let registry = ToolRegistry::new();
        let before = registry.generation();
        registry.revoke("missing");
        assert_eq!(registry.generation(), before);

        registry.register(entry("a", vec![]));
        assert_eq!(registry.generation(), before + 1);
    }

    #[test]
    fn test_subscribers_see_only_real_changes() {
        let registry = ToolRegistry::new();
        registry.register(entry("greet", vec![]));

        let mut changes = registry.subscribe();
        assert!(!changes.has_changed().unwrap());

        registry.revoke("missing");
        assert!(!changes.has_changed().unwrap());

        registry.register(entry("echo", vec![]));
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), 2);

        registry.revoke("greet");
        assert!(changes.has_changed().unwrap());
        assert_eq!(*changes.borrow_and_update(), registry.generation());
    }

    #[test]
    fn test_list_is_sorted_snapshot() {
        let registry = ToolRegistry::new();
        registry.register(entry("zeta", vec![]));
        registry.register(entry("alpha", vec![ParamSpec::optional("x")]));

        let listed = registry.list();
        registry.revoke("zeta");

        let names: Vec<_> = listed.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert_eq!(registry.tool_names(), vec!["alpha".to_string()]);
    }

    #[test]
    fn test_resolved_entry_survives_revoke() {
        let registry = ToolRegistry::new();
        registry.register(entry("greet", vec![]));
        let held = registry.lookup("greet").unwrap();
        registry.revoke("greet");
        assert_eq!(held.name(), "greet");
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = ToolEntry::new("", "", ParamContract::empty(), FixedHandler("ok"));
        assert!(matches!(result, Err(ToolError::InvalidSpecification(_))));
    }

    #[test]
    fn test_descriptor_to_tool() {
        let registry = ToolRegistry::new();
        registry.register(entry("greet", vec![ParamSpec::required("name")]));
        let tool = registry.list()[0].to_tool();
        assert_eq!(tool.name, "greet");
        assert_eq!(tool.description.as_deref(), Some("greet tool"));
        assert_eq!(tool.input_schema["required"], serde_json::json!(["name"]));
    }

    #[test]
    fn test_concurrent_register_and_lookup() {
        let registry = ToolRegistry::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        let name = format!("tool_{}_{}", i, j);
                        registry.register(entry(&name, vec![ParamSpec::required("x")]));
                        let found = registry.lookup(&name).unwrap();
                        assert_eq!(found.name(), name);
                        let _ = registry.list();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(registry.len(), 400);
        assert_eq!(registry.generation(), 400);
    }
}
