//! Time-bounded station catalog cache.
//!
//! Readers get an `Arc` snapshot; a reload builds a new catalog and swaps the
//! `Arc`, so plans already running keep the catalog they started with.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{Error, Result};

use super::{StationCatalog, StationSource};

/// Default time a loaded catalog is served before reloading.
pub const DEFAULT_CATALOG_TTL: Duration = Duration::from_secs(15 * 60);

struct Snapshot {
    catalog: Arc<StationCatalog>,
    loaded_at: Instant,
}

/// Caches the catalog produced by a [`StationSource`].
pub struct CatalogCache<S> {
    source: S,
    ttl: Duration,
    current: RwLock<Option<Snapshot>>,
}

impl<S: StationSource> CatalogCache<S> {
    pub fn new(source: S) -> Self {
        Self::with_ttl(source, DEFAULT_CATALOG_TTL)
    }

    pub fn with_ttl(source: S, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            current: RwLock::new(None),
        }
    }

    /// Current catalog, reloading first if the cached copy is older than the TTL.
    ///
    /// A failed reload keeps serving the previous catalog; it only errors when
    /// nothing has been loaded yet.
    pub fn get(&self) -> Result<Arc<StationCatalog>> {
        {
            let guard = self.current.read().unwrap_or_else(|p| p.into_inner());
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.loaded_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&snapshot.catalog));
                }
            }
        }
        self.reload(false)
    }

    /// Reload from the source regardless of age.
    pub fn refresh(&self) -> Result<Arc<StationCatalog>> {
        self.reload(true)
    }

    fn reload(&self, force: bool) -> Result<Arc<StationCatalog>> {
        let mut guard = self.current.write().unwrap_or_else(|p| p.into_inner());

        // Another caller may have reloaded while we waited for the lock.
        if !force {
            if let Some(snapshot) = guard.as_ref() {
                if snapshot.loaded_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&snapshot.catalog));
                }
            }
        }

        match self.source.load() {
            Ok(catalog) => {
                info!(
                    source = %self.source.describe(),
                    stations = catalog.len(),
                    "station catalog refreshed"
                );
                let catalog = Arc::new(catalog);
                *guard = Some(Snapshot {
                    catalog: Arc::clone(&catalog),
                    loaded_at: Instant::now(),
                });
                Ok(catalog)
            }
            Err(err) => match guard.as_ref() {
                Some(snapshot) => {
                    warn!(
                        source = %self.source.describe(),
                        error = %err,
                        "station catalog reload failed; serving previous catalog"
                    );
                    Ok(Arc::clone(&snapshot.catalog))
                }
                None => Err(Error::CatalogUnavailable {
                    source_name: self.source.describe(),
                    message: err.to_string(),
                }),
            },
        }
    }
}
