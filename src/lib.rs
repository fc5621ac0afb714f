// src/lib.rs

pub mod achievements;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod report;
pub mod roster;
pub mod store;
pub mod tracker;

pub use crate::error::{Error, StoreError};
pub use crate::roster::{Delta, Roster, RosterComparison, RosterEntry, compare_rosters};
pub use crate::store::{FileStore, MemoryStore, SnapshotStore};
pub use crate::tracker::Tracker;

use anyhow::Result;
use std::sync::Arc;

use config::Settings;

/// Globalny kontekst aplikacji: konfiguracja + tracker na wybranym magazynie.
#[derive(Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub tracker: Tracker,
}

impl AppContext {
    /// Bootstrap:
    /// - logi
    /// - magazyn plikowy w `storage.data_dir`
    pub fn bootstrap(settings: Settings) -> Result<Arc<Self>> {
        // 1) logi
        logging::init(&settings);

        // 2) magazyn
        let dir = std::path::PathBuf::from(&settings.storage.data_dir);
        std::fs::create_dir_all(&dir)?;
        let store: Arc<dyn SnapshotStore> = Arc::new(FileStore::new(dir));

        tracing::info!(
            app = %settings.app.name,
            env = %settings.env,
            data_dir = %settings.storage.data_dir,
            "bootstrapped"
        );

        Ok(Arc::new(Self {
            tracker: Tracker::new(store),
            settings,
        }))
    }

    /// Kontekst na dowolnym magazynie (np. `MemoryStore` w testach), bez logów.
    pub fn new_testing(settings: Settings, store: Arc<dyn SnapshotStore>) -> Arc<Self> {
        Arc::new(Self {
            settings,
            tracker: Tracker::new(store),
        })
    }

    /// Publikator raportów, jeśli skonfigurowano token i kanał.
    pub fn publisher(&self) -> Option<discord::Publisher> {
        discord::Publisher::from_settings(&self.settings)
    }

    /// Środowisko: "production" | "development".
    #[inline]
    pub fn env(&self) -> &str {
        &self.settings.env
    }
}
