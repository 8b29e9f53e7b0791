// src/store/technician_repo.rs

use chrono::Utc;

use crate::common::error::AppError;
use crate::models::school::TechnicianLink;
use crate::store::kv::Store;

const COLLECTION: &str = "school_technicians";

#[derive(Clone)]
pub struct TechnicianRepository {
    store: Store,
}

impl TechnicianRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<TechnicianLink>, AppError> {
        let links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        Ok(links.into_iter().find(|l| l.id == id))
    }

    pub async fn find_by_school_and_user(
        &self,
        school_id: &str,
        user_id: &str,
    ) -> Result<Option<TechnicianLink>, AppError> {
        let links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        Ok(links
            .into_iter()
            .find(|l| l.school_id == school_id && l.user_id == user_id))
    }

    pub async fn list_by_school(&self, school_id: &str) -> Result<Vec<TechnicianLink>, AppError> {
        let links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        Ok(links.into_iter().filter(|l| l.school_id == school_id).collect())
    }

    /// Insere um vínculo novo. A verificação de duplicidade do par
    /// (schoolId, userId) acontece aqui, sob o mutex da coleção, para que
    /// verificar-e-gravar seja uma sequência única.
    pub async fn insert(&self, link: TechnicianLink) -> Result<TechnicianLink, AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let mut links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        if links
            .iter()
            .any(|l| l.school_id == link.school_id && l.user_id == link.user_id)
        {
            return Err(AppError::TechnicianAlreadyLinked);
        }
        links.push(link.clone());
        self.store.save(COLLECTION, &links).await?;
        Ok(link)
    }

    /// Sobrescreve o conjunto de modalidades do vínculo.
    pub async fn update_permissions(
        &self,
        link_id: &str,
        modality_ids: Vec<String>,
    ) -> Result<TechnicianLink, AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let mut links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        let link = links
            .iter_mut()
            .find(|l| l.id == link_id)
            .ok_or(AppError::TechnicianLinkNotFound)?;
        link.allowed_modality_ids = modality_ids;
        link.updated_at = Some(Utc::now());
        let updated = link.clone();

        self.store.save(COLLECTION, &links).await?;
        Ok(updated)
    }

    /// Remove o vínculo pelo id. Ausente não é erro.
    pub async fn remove(&self, link_id: &str) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let links: Vec<TechnicianLink> = self.store.load(COLLECTION).await?;
        let remaining: Vec<TechnicianLink> =
            links.into_iter().filter(|l| l.id != link_id).collect();
        self.store.save(COLLECTION, &remaining).await?;
        Ok(())
    }
}
