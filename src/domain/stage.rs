//! Workflow stages
//!
//! A [`StageRegistry`] is a named, ordered list of package names for one
//! phase of a project workflow. Descriptors themselves live in the
//! [`DescriptorStore`]; the stage only holds references by name.
//!
//! Each stage caches three partitions that are recomputed on every
//! reconciliation and never persisted:
//!
//! - `installed` / `not_installed`: the stage's own packages, split by
//!   installed status
//! - `available`: catalog packages that are not part of the stage

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::capability::{ExternalState, Installer};
use super::descriptor::PackageDescriptor;
use super::report::{BatchReport, InstallFailure, IntegrityWarning};
use super::store::DescriptorStore;

/// Derived, non-persisted view of a stage relative to a catalog
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Partitions {
    pub installed: Vec<String>,
    pub not_installed: Vec<String>,
    pub available: Vec<PackageDescriptor>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StageRegistry {
    pub name: String,

    /// Package names in display order
    #[serde(default, rename = "packages")]
    descriptors: Vec<String>,

    #[serde(skip)]
    partitions: Partitions,
}

/// Case-insensitive substring match used by list filters
pub fn matches_filter(name: &str, filter: Option<&str>) -> bool {
    match filter {
        None | Some("") => true,
        Some(f) => name.to_lowercase().contains(&f.to_lowercase()),
    }
}

impl StageRegistry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Package names in stored order
    pub fn descriptor_names(&self) -> &[String] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn partitions(&self) -> &Partitions {
        &self.partitions
    }

    pub fn installed(&self) -> &[String] {
        &self.partitions.installed
    }

    pub fn not_installed(&self) -> &[String] {
        &self.partitions.not_installed
    }

    pub fn available(&self) -> &[PackageDescriptor] {
        &self.partitions.available
    }

    pub fn installed_count(&self) -> usize {
        self.partitions.installed.len()
    }

    pub fn not_installed_count(&self) -> usize {
        self.partitions.not_installed.len()
    }

    /// Partitions narrowed to names matching `filter` (see [`matches_filter`])
    pub fn matching(&self, filter: Option<&str>) -> Partitions {
        let keep = |name: &String| matches_filter(name, filter);
        Partitions {
            installed: self.partitions.installed.iter().filter(|n| keep(n)).cloned().collect(),
            not_installed: self
                .partitions
                .not_installed
                .iter()
                .filter(|n| keep(n))
                .cloned()
                .collect(),
            available: self
                .partitions
                .available
                .iter()
                .filter(|d| keep(&d.name))
                .cloned()
                .collect(),
        }
    }

    /// Position of the first entry with this name
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.descriptors.iter().position(|n| n == name)
    }

    /// Membership by name. Two descriptors with the same name are the same package.
    pub fn contains(&self, descriptor: &PackageDescriptor) -> bool {
        self.contains_name(&descriptor.name)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.position_of(name).is_some()
    }

    /// Add a package to the stage.
    ///
    /// If the store already holds a descriptor with the same name that one is
    /// used instead of `descriptor`. Adding a name the stage already contains
    /// only refreshes its installed/not-installed membership. Returns whether
    /// a new entry was appended.
    pub fn add(
        &mut self,
        descriptor: PackageDescriptor,
        store: &mut DescriptorStore,
        state: &dyn ExternalState,
    ) -> bool {
        let stored = store.intern(descriptor);
        let name = stored.name.clone();
        let installed = stored.is_installed(state);

        let appended = !self.contains_name(&name);
        if appended {
            self.descriptors.push(name.clone());
        }

        self.set_membership(&name, installed);
        self.partitions.available.retain(|d| d.name != name);
        appended
    }

    /// Remove every entry named `name`, returning how many were removed.
    ///
    /// Duplicate names should not occur; all of them are removed if they do.
    /// The removed package is listed as available until the next
    /// reconciliation recomputes the partitions from the catalog.
    pub fn remove(&mut self, name: &str, store: &DescriptorStore) -> usize {
        let before = self.descriptors.len();
        self.descriptors.retain(|n| n != name);
        let removed = before - self.descriptors.len();

        if removed > 0 {
            self.partitions.installed.retain(|n| n != name);
            self.partitions.not_installed.retain(|n| n != name);
            if let Some(descriptor) = store.get(name) {
                if !self.partitions.available.iter().any(|d| d.name == name) {
                    self.partitions.available.push(descriptor.clone());
                }
            }
        }

        removed
    }

    /// Recompute all three partitions against `catalog`.
    ///
    /// Catalog entries found in the stage are classified by the stage's own
    /// descriptor; the rest become available. Stage packages missing from the
    /// catalog are classified afterwards in stored order, so every package of
    /// the stage lands in exactly one of `installed` and `not_installed`.
    /// Entries whose descriptor is gone from the store are dropped first and
    /// returned as warnings.
    pub fn reconcile(
        &mut self,
        catalog: &[PackageDescriptor],
        store: &DescriptorStore,
        state: &dyn ExternalState,
    ) -> Vec<IntegrityWarning> {
        let warnings = self.drop_dangling(store);
        let mut partitions = Partitions::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for item in catalog {
            if !seen.insert(item.name.as_str()) {
                continue;
            }

            if self.contains_name(&item.name) {
                classify_into(&mut partitions, &item.name, store, state);
            } else {
                partitions.available.push(item.clone());
            }
        }

        for name in &self.descriptors {
            if seen.insert(name.as_str()) {
                classify_into(&mut partitions, name, store, state);
            }
        }

        self.partitions = partitions;
        warnings
    }

    /// Install every package of the stage that is not installed yet, in stored order.
    ///
    /// Entries whose descriptor is gone from the store are dropped and
    /// reported as warnings. One failing install never stops the batch.
    pub fn install_all_missing(
        &mut self,
        store: &mut DescriptorStore,
        installer: &dyn Installer,
        state: &dyn ExternalState,
    ) -> BatchReport {
        self.install_all_missing_with(store, installer, state, |_| {})
    }

    /// Like [`StageRegistry::install_all_missing`], calling `on_item` with each
    /// package name before it is installed.
    pub fn install_all_missing_with(
        &mut self,
        store: &mut DescriptorStore,
        installer: &dyn Installer,
        state: &dyn ExternalState,
        mut on_item: impl FnMut(&str),
    ) -> BatchReport {
        let mut report = BatchReport {
            warnings: self.drop_dangling(store),
            ..BatchReport::default()
        };

        for name in self.descriptors.clone() {
            let Some(descriptor) = store.get(&name) else {
                continue;
            };

            if descriptor.is_installed(state) {
                continue;
            }

            on_item(&name);
            let Some(descriptor) = store.get_mut(&name) else {
                continue;
            };
            match descriptor.install(installer) {
                Ok(()) => {
                    tracing::debug!(stage = %self.name, package = %name, "installed");
                    self.set_membership(&name, true);
                    report.succeeded.push(name);
                }
                Err(error) => {
                    tracing::debug!(stage = %self.name, package = %name, "install failed: {error}");
                    report.failed.push(InstallFailure { name, error });
                }
            }
        }

        report
    }

    /// Remove every entry whose descriptor is missing from `store`
    fn drop_dangling(&mut self, store: &DescriptorStore) -> Vec<IntegrityWarning> {
        let dangling: Vec<String> = self
            .descriptors
            .iter()
            .filter(|name| !store.contains(name))
            .cloned()
            .collect();

        let mut warnings = Vec::new();
        for name in dangling {
            if !self.contains_name(&name) {
                continue;
            }
            self.descriptors.retain(|n| *n != name);
            self.partitions.installed.retain(|n| *n != name);
            self.partitions.not_installed.retain(|n| *n != name);

            let warning = IntegrityWarning::DanglingReference {
                name,
                stage: self.name.clone(),
            };
            tracing::warn!("{warning}");
            warnings.push(warning);
        }
        warnings
    }

    fn set_membership(&mut self, name: &str, installed: bool) {
        self.partitions.installed.retain(|n| n != name);
        self.partitions.not_installed.retain(|n| n != name);
        if installed {
            self.partitions.installed.push(name.to_string());
        } else {
            self.partitions.not_installed.push(name.to_string());
        }
    }
}

fn classify_into(
    partitions: &mut Partitions,
    name: &str,
    store: &DescriptorStore,
    state: &dyn ExternalState,
) {
    let Some(descriptor) = store.get(name) else {
        return;
    };
    if descriptor.is_installed(state) {
        partitions.installed.push(name.to_string());
    } else {
        partitions.not_installed.push(name.to_string());
    }
}
