use std::sync::Arc;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Service,
    store::{RecordStore, SeaOrmStore},
};

mod exports;
mod members;
mod plannings;
mod profiles;
mod services;

pub use plannings::{QuickEditRequest, QuickEditTarget, SavedPlanning};

/// Entry point of the domain: every operation goes through the injected
/// [`RecordStore`].
#[derive(Clone)]
pub struct Engine {
    store: Arc<dyn RecordStore>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").finish_non_exhaustive()
    }
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    async fn require_service(&self, service_id: Uuid) -> ResultEngine<Service> {
        self.store
            .get_service(service_id)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("service not exists".to_string()))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    store: Option<Arc<dyn RecordStore>>,
}

impl EngineBuilder {
    /// Pass the required database; records are read and written through a
    /// [`SeaOrmStore`].
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.store = Some(Arc::new(SeaOrmStore::new(db)));
        self
    }

    /// Pass any record store implementation.
    pub fn store(mut self, store: Arc<dyn RecordStore>) -> EngineBuilder {
        self.store = Some(store);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        let store = self
            .store
            .ok_or_else(|| EngineError::Store("no record store configured".to_string()))?;
        Ok(Engine { store })
    }
}
