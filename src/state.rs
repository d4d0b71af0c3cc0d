use std::sync::Arc;

use sqlx::MySqlPool;

use crate::ledger::Ledger;
use crate::model::cohort::Cohort;
use crate::store::mysql::{MySqlDirectory, MySqlStore};
use crate::store::{PersonDirectory, RecordStore};

/// Ledger collaborators behind their ports. Handlers never touch a concrete
/// backend directly.
pub struct AppState {
    store: Arc<dyn RecordStore>,
    directory: Arc<dyn PersonDirectory>,
}

impl AppState {
    pub fn mysql(pool: MySqlPool) -> Self {
        Self {
            store: Arc::new(MySqlStore::new(pool.clone())),
            directory: Arc::new(MySqlDirectory::new(pool)),
        }
    }

    pub fn with_adapters(
        store: Arc<dyn RecordStore>,
        directory: Arc<dyn PersonDirectory>,
    ) -> Self {
        Self { store, directory }
    }

    pub fn ledger(&self, cohort: Cohort) -> Ledger<'_> {
        Ledger::new(cohort, self.store.as_ref(), self.directory.as_ref())
    }
}
