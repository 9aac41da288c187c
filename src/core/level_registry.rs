//! Severity registry mapping level values to names
//!
//! A registry is created once during setup, extended with custom levels
//! (for example NOTICE) and then only read. It is shared behind an `Arc` by
//! every logger that resolves level names.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Default)]
struct RegistryState {
    names: BTreeMap<LogLevel, String>,
    values: HashMap<String, LogLevel>,
}

impl RegistryState {
    fn insert(&mut self, name: String, level: LogLevel) {
        // Drop stale reverse entries so both directions stay consistent
        if let Some(old_level) = self.values.remove(&name) {
            if self.names.get(&old_level) == Some(&name) {
                self.names.remove(&old_level);
            }
        }
        if let Some(old_name) = self.names.insert(level, name.clone()) {
            if self.values.get(&old_name) == Some(&level) {
                self.values.remove(&old_name);
            }
        }
        self.values.insert(name, level);
    }
}

#[derive(Debug)]
pub struct LevelRegistry {
    state: RwLock<RegistryState>,
}

impl LevelRegistry {
    /// Registry seeded with the standard levels (NOTSET through CRITICAL)
    ///
    /// NOTICE is a custom level and has to be registered explicitly.
    #[must_use]
    pub fn new() -> Self {
        let mut state = RegistryState::default();
        for level in [
            LogLevel::NOTSET,
            LogLevel::DEBUG,
            LogLevel::INFO,
            LogLevel::WARNING,
            LogLevel::ERROR,
            LogLevel::CRITICAL,
        ] {
            if let Some(name) = level.builtin_name() {
                state.insert(name.to_string(), level);
            }
        }
        Self {
            state: RwLock::new(state),
        }
    }

    /// Register `name` (uppercased) for the severity `value`.
    ///
    /// Existing registrations for either the name or the value are replaced
    /// without complaint. Use [`LevelRegistry::register_level_strict`] to
    /// reject conflicts instead.
    pub fn register_level(&self, name: &str, value: u32) {
        let name = name.to_uppercase();
        let level = LogLevel::new(value);
        self.state.write().insert(name, level);
    }

    /// Register a level, failing if the name or value is already bound to a
    /// different pairing. Re-registering the identical pairing is accepted.
    pub fn register_level_strict(&self, name: &str, value: u32) -> Result<()> {
        let name = name.to_uppercase();
        let level = LogLevel::new(value);
        let mut state = self.state.write();

        if let Some(existing) = state.names.get(&level) {
            if *existing != name {
                return Err(LoggerError::duplicate_level(
                    name,
                    level.value(),
                    existing.clone(),
                ));
            }
        }
        if let Some(existing_level) = state.values.get(&name) {
            if *existing_level != level {
                return Err(LoggerError::duplicate_level(
                    name.clone(),
                    level.value(),
                    format!("{} ({})", name, existing_level.value()),
                ));
            }
        }

        state.insert(name, level);
        Ok(())
    }

    /// Name registered for `level`, or `Level {n}` when unknown
    pub fn level_name(&self, level: LogLevel) -> String {
        self.state
            .read()
            .names
            .get(&level)
            .cloned()
            .unwrap_or_else(|| format!("Level {}", level.value()))
    }

    /// Case-insensitive lookup of a level by name
    pub fn level_value(&self, name: &str) -> Option<LogLevel> {
        self.state.read().values.get(&name.to_uppercase()).copied()
    }

    /// Resolve a lowercase logging method name (`notice`, `warning`, ...)
    pub fn method_level(&self, method: &str) -> Option<LogLevel> {
        if method.chars().any(char::is_uppercase) {
            return None;
        }
        self.level_value(method)
    }

    /// Snapshot of all registrations, ascending by value
    pub fn levels(&self) -> Vec<(LogLevel, String)> {
        self.state
            .read()
            .names
            .iter()
            .map(|(level, name)| (*level, name.clone()))
            .collect()
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}
