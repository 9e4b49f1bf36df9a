//! Periodic catalog refresh
//!
//! The [`Refresher`] is a two-state poller driven by [`Refresher::tick`]:
//!
//! - `Idle`: once the refresh interval has passed, gather local archives and
//!   known git URIs, start a registry search and move to `Searching`
//! - `Searching`: poll the search; when it finishes, merge all sources into
//!   the catalog, reconcile every stage and return to `Idle`
//!
//! A second search is never started while one is outstanding. Nothing here
//! blocks: the registry search runs on its own thread and is polled.

pub mod sources;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::domain::{
    DescriptorProfile, DescriptorStore, ExternalState, PackageDescriptor, RegistrySource,
    WorkflowRegistry,
};
use crate::error::Result;
use crate::registry::{RegistryIndex, SearchHandle, SearchPoll};

/// Where the catalog is gathered from, apart from the registry
#[derive(Debug, Clone, Default)]
pub struct CatalogSources {
    pub asset_cache: PathBuf,
    pub archive_extension: String,
    pub known_git_uris: Vec<String>,
    pub profiles: Vec<DescriptorProfile>,
}

impl CatalogSources {
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        Self {
            asset_cache: settings.asset_cache_path(root),
            archive_extension: settings.archive_extension().to_string(),
            known_git_uris: settings.known_git_uris.clone(),
            profiles: settings.profiles.clone(),
        }
    }

    /// Local archives followed by known git packages
    fn gather(&self) -> Result<Vec<PackageDescriptor>> {
        let mut found =
            sources::local_descriptors(&self.asset_cache, &self.archive_extension, &self.profiles)?;
        found.extend(sources::git_descriptors(&self.known_git_uris));
        Ok(found)
    }
}

enum RefreshState {
    Idle,
    Searching {
        gathered: Vec<PackageDescriptor>,
        search: SearchHandle,
    },
}

pub struct Refresher {
    sources: CatalogSources,
    registry: Arc<dyn RegistrySource>,
    interval: Duration,
    next_refresh: Option<Instant>,
    state: RefreshState,
    catalog: Vec<PackageDescriptor>,
    completed: usize,
}

impl Refresher {
    pub fn new(
        sources: CatalogSources,
        registry: Arc<dyn RegistrySource>,
        interval: Duration,
    ) -> Self {
        Self {
            sources,
            registry,
            interval,
            next_refresh: None,
            state: RefreshState::Idle,
            catalog: Vec::new(),
            completed: 0,
        }
    }

    /// Refresher reading the registry index named in the settings
    pub fn from_settings(root: &Path, settings: &Settings) -> Self {
        let index = settings
            .registry_index
            .as_deref()
            .map(|path| Settings::resolve(root, path));
        Self::new(
            CatalogSources::from_settings(root, settings),
            Arc::new(RegistryIndex::new(index)),
            settings.refresh_interval(),
        )
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, RefreshState::Searching { .. })
    }

    /// Whether the next tick would start a refresh
    pub fn is_due(&self, now: Instant) -> bool {
        !self.is_searching() && self.next_refresh.is_none_or(|due| now >= due)
    }

    /// Catalog from the last completed refresh
    pub fn catalog(&self) -> &[PackageDescriptor] {
        &self.catalog
    }

    /// Number of refreshes completed so far
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Advance the poller.
    ///
    /// Returns the new catalog when this tick completed a refresh. Failing
    /// to scan the local sources is an error; a failed registry search is
    /// logged and the refresh completes without registry packages.
    pub fn tick(
        &mut self,
        now: Instant,
        workflow: &mut WorkflowRegistry,
        store: &DescriptorStore,
        state: &dyn ExternalState,
    ) -> Result<Option<&[PackageDescriptor]>> {
        if matches!(self.state, RefreshState::Idle) {
            if self.next_refresh.is_some_and(|due| now < due) {
                return Ok(None);
            }

            let gathered = self.sources.gather()?;
            tracing::debug!(found = gathered.len(), "refresh started");
            self.state = RefreshState::Searching {
                gathered,
                search: SearchHandle::start(Arc::clone(&self.registry)),
            };
            self.next_refresh = Some(now + self.interval);
        }

        let RefreshState::Searching { search, .. } = &self.state else {
            return Ok(None);
        };
        let result = match search.poll() {
            SearchPoll::Pending => return Ok(None),
            SearchPoll::Done(result) => result,
        };

        let RefreshState::Searching { gathered, .. } =
            std::mem::replace(&mut self.state, RefreshState::Idle)
        else {
            return Ok(None);
        };

        let registry = match result {
            Ok(entries) => sources::registry_descriptors(&entries),
            Err(e) => {
                tracing::error!("{e}");
                Vec::new()
            }
        };

        self.catalog = sources::merge([gathered, registry]);
        workflow.reconcile_all(&self.catalog, store, state);
        self.completed += 1;
        tracing::debug!(catalog = self.catalog.len(), "refresh completed");
        Ok(Some(&self.catalog))
    }

    /// Abandon an outstanding search; the next tick starts over once due
    pub fn cancel(&mut self) {
        if self.is_searching() {
            tracing::debug!("refresh cancelled");
        }
        self.state = RefreshState::Idle;
    }

    /// Make the next tick start a refresh regardless of the interval
    pub fn force_due(&mut self) {
        self.next_refresh = None;
    }

    /// Tick until one refresh completes, polling every `poll_interval`.
    ///
    /// Gives up after `max_polls` ticks, cancelling the search and leaving
    /// the stages as they were.
    pub fn run_until_refreshed(
        &mut self,
        workflow: &mut WorkflowRegistry,
        store: &DescriptorStore,
        state: &dyn ExternalState,
        poll_interval: Duration,
        max_polls: usize,
    ) -> Result<bool> {
        self.force_due();
        for _ in 0..max_polls {
            if self.tick(Instant::now(), workflow, store, state)?.is_some() {
                return Ok(true);
            }
            std::thread::sleep(poll_interval);
        }

        tracing::warn!("Registry search did not finish; catalog not refreshed");
        self.cancel();
        Ok(false)
    }
}
