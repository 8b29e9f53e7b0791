// src/store/school_repo.rs

use crate::common::error::AppError;
use crate::models::school::School;
use crate::store::kv::Store;

const COLLECTION: &str = "schools";

#[derive(Clone)]
pub struct SchoolRepository {
    store: Store,
}

impl SchoolRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // Busca uma escola pelo seu ID
    pub async fn find_by_id(&self, id: &str) -> Result<Option<School>, AppError> {
        let schools: Vec<School> = self.store.load(COLLECTION).await?;
        Ok(schools.into_iter().find(|s| s.id == id))
    }

    pub async fn list(&self) -> Result<Vec<School>, AppError> {
        Ok(self.store.load(COLLECTION).await?)
    }

    /// Insere ou substitui o registro da escola (chave: id).
    pub async fn upsert(&self, school: School) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let mut schools: Vec<School> = self.store.load(COLLECTION).await?;
        match schools.iter_mut().find(|s| s.id == school.id) {
            Some(existing) => *existing = school,
            None => schools.push(school),
        }
        self.store.save(COLLECTION, &schools).await?;
        Ok(())
    }
}
