//! JSON-backed pattern store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StoreError;

use super::{default_rules, Rule, RuleSet};

/// Durable registry of named extraction rules.
///
/// The backing document is a single UTF-8 JSON object mapping rule name
/// to rule. It is read fresh on every operation and rewritten whole on
/// every mutation; nothing is cached between calls. An absent document
/// is seeded with the built-in default rules and persisted before the
/// first read returns. A document that exists but fails to parse is
/// fatal to every operation until it is repaired or removed.
pub struct PatternStore {
    path: PathBuf,
}

impl PatternStore {
    /// Create a store backed by the given document path. The document is
    /// not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rules, in document order.
    pub fn list(&self) -> Result<RuleSet, StoreError> {
        self.load()
    }

    /// The matching expression stored under `name`, if any.
    pub fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.get(name).map(|rule| rule.pattern.clone()))
    }

    /// The full rule stored under `name`, if any.
    pub fn get_rule(&self, name: &str) -> Result<Option<Rule>, StoreError> {
        Ok(self.load()?.get(name).cloned())
    }

    /// Insert or overwrite the rule under `name` and persist the whole
    /// store. Overwriting with an identical rule is harmless.
    pub fn set(&self, name: &str, rule: Rule) -> Result<(), StoreError> {
        let mut rules = self.load()?;
        rules.insert(name.to_string(), rule);
        self.save(&rules)?;
        debug!("stored rule {name:?}");
        Ok(())
    }

    /// Delete the rule under `name` and persist. Removing an unknown
    /// name is a no-op, not an error.
    pub fn remove(&self, name: &str) -> Result<(), StoreError> {
        let mut rules = self.load()?;
        // shift_remove keeps the remaining rules in document order.
        if rules.shift_remove(name).is_some() {
            self.save(&rules)?;
            debug!("removed rule {name:?}");
        }
        Ok(())
    }

    fn load(&self) -> Result<RuleSet, StoreError> {
        if !self.path.exists() {
            let rules = default_rules();
            self.save(&rules)?;
            debug!(
                "seeded {} default rules at {}",
                rules.len(),
                self.path.display()
            );
            return Ok(rules);
        }

        let contents = fs::read_to_string(&self.path)?;
        serde_json::from_str(&contents).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }

    fn save(&self, rules: &RuleSet) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(rules)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
