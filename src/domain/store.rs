//! Named descriptor store
//!
//! Stages reference descriptors by name. The store owns the descriptors and
//! remembers which ones changed so the workspace only rewrites those files.

use std::collections::{BTreeMap, BTreeSet};

use super::descriptor::PackageDescriptor;

#[derive(Debug, Default, Clone)]
pub struct DescriptorStore {
    descriptors: BTreeMap<String, PackageDescriptor>,
    dirty: BTreeSet<String>,
}

impl DescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already persisted descriptors (nothing is dirty)
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = PackageDescriptor>) -> Self {
        Self {
            descriptors: descriptors
                .into_iter()
                .map(|d| (d.name.clone(), d))
                .collect(),
            dirty: BTreeSet::new(),
        }
    }

    /// Return the stored descriptor with this name, storing `descriptor` first
    /// if there is none. Identity is the name; other fields of an incoming
    /// duplicate are ignored.
    pub fn intern(&mut self, descriptor: PackageDescriptor) -> &PackageDescriptor {
        let name = descriptor.name.clone();
        if !self.descriptors.contains_key(&name) {
            self.dirty.insert(name.clone());
        }
        self.descriptors.entry(name).or_insert(descriptor)
    }

    pub fn get(&self, name: &str) -> Option<&PackageDescriptor> {
        self.descriptors.get(name)
    }

    /// Mutable access; the descriptor is marked for saving
    pub fn get_mut(&mut self, name: &str) -> Option<&mut PackageDescriptor> {
        let descriptor = self.descriptors.get_mut(name)?;
        self.dirty.insert(name.to_string());
        Some(descriptor)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.descriptors.contains_key(name)
    }

    /// Forget a descriptor. Stages still naming it now hold a dangling reference.
    #[allow(dead_code)] // used in tests
    pub fn remove(&mut self, name: &str) -> Option<PackageDescriptor> {
        self.dirty.remove(name);
        self.descriptors.remove(name)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[allow(dead_code)] // used in tests
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Descriptors changed since the last [`DescriptorStore::mark_clean`]
    pub fn dirty(&self) -> impl Iterator<Item = &PackageDescriptor> {
        self.dirty.iter().filter_map(|n| self.descriptors.get(n))
    }

    pub fn mark_clean(&mut self) {
        self.dirty.clear();
    }
}
