// src/store/modality_repo.rs

use std::collections::HashSet;

use crate::common::error::AppError;
use crate::models::event::EventModalities;
use crate::store::kv::Store;

const COLLECTION: &str = "event_modalities";

// Repositório da associação Evento <-> Modalidades (um registro por evento).
#[derive(Clone)]
pub struct ModalityRepository {
    store: Store,
}

impl ModalityRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_by_event(&self, event_id: &str) -> Result<Option<EventModalities>, AppError> {
        let records: Vec<EventModalities> = self.store.load(COLLECTION).await?;
        Ok(records.into_iter().find(|r| r.event_id == event_id))
    }

    /// Define o conjunto de modalidades de um evento (substitui o anterior).
    pub async fn set_for_event(
        &self,
        event_id: &str,
        modality_ids: Vec<String>,
    ) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let mut records: Vec<EventModalities> = self.store.load(COLLECTION).await?;
        match records.iter_mut().find(|r| r.event_id == event_id) {
            Some(existing) => existing.modality_ids = modality_ids,
            None => records.push(EventModalities {
                event_id: event_id.to_string(),
                modality_ids,
            }),
        }
        self.store.save(COLLECTION, &records).await?;
        Ok(())
    }

    /// União das modalidades permitidas por todos os eventos informados.
    pub async fn allowed_for_events(
        &self,
        event_ids: &[String],
    ) -> Result<HashSet<String>, AppError> {
        let records: Vec<EventModalities> = self.store.load(COLLECTION).await?;
        Ok(records
            .into_iter()
            .filter(|r| event_ids.contains(&r.event_id))
            .flat_map(|r| r.modality_ids)
            .collect())
    }
}
