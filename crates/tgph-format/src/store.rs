// File: crates/tgph-format/src/store.rs
// Summary: Read-only lookup over decoded containers by exact name or substring.

use thiserror::Error;

use crate::container::Container;
use crate::document::Tgph;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("no container named {0:?}")]
    NotFound(String),

    /// Exact-name lookup must be unique. Duplicate names are a data
    /// error the caller has to see, not a choice the store makes.
    #[error("container name {0:?} matches more than one container")]
    Ambiguous(String),
}

/// Owns every decoded container for the lifetime of one snapshot.
/// Construction happens once, after decode; there is no mutation API.
pub struct ContainerStore {
    containers: Vec<Container>,
}

impl ContainerStore {
    pub fn new(containers: Vec<Container>) -> Self {
        Self { containers }
    }

    pub fn from_document(document: Tgph) -> Self {
        Self::new(document.containers)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.iter()
    }

    /// The unique container with exactly this name.
    pub fn by_exact_name(&self, name: &str) -> Result<&Container, LookupError> {
        let mut matches = self.containers.iter().filter(|c| c.name == name);
        let first = matches.next().ok_or_else(|| LookupError::NotFound(name.to_string()))?;
        if matches.next().is_some() {
            return Err(LookupError::Ambiguous(name.to_string()));
        }
        Ok(first)
    }

    /// All containers whose name contains `needle`, in decode order.
    pub fn by_name_contains(&self, needle: &str) -> Vec<&Container> {
        self.containers.iter().filter(|c| c.name.contains(needle)).collect()
    }
}
