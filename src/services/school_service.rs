// src/services/school_service.rs

use validator::Validate;

use crate::common::error::AppError;
use crate::models::school::{LinkEventsPayload, School};
use crate::store::SchoolRepository;

#[derive(Clone)]
pub struct SchoolService {
    school_repo: SchoolRepository,
}

impl SchoolService {
    pub fn new(school_repo: SchoolRepository) -> Self {
        Self { school_repo }
    }

    pub async fn find_school(&self, school_id: &str) -> Result<School, AppError> {
        self.school_repo
            .find_by_id(school_id)
            .await?
            .ok_or(AppError::SchoolNotFound)
    }

    /// Vincula eventos à escola, mesclando com os vínculos existentes
    /// sem duplicatas. O campo legado `eventId` não é tocado: continua
    /// sendo honrado pela normalização na leitura.
    pub async fn link_events(&self, payload: LinkEventsPayload) -> Result<School, AppError> {
        payload.validate()?;

        let mut school = self.find_school(&payload.school_id).await?;
        for event_id in payload.event_ids {
            if !school.event_ids.contains(&event_id) {
                school.event_ids.push(event_id);
            }
        }
        self.school_repo.upsert(school.clone()).await?;
        tracing::info!(
            "Escola '{}' agora vinculada a {} evento(s)",
            school.id,
            school.linked_event_ids().len()
        );
        Ok(school)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::kv::Store;

    fn school(id: &str, event_ids: &[&str], legacy: Option<&str>) -> School {
        School {
            id: id.to_string(),
            name: format!("Escola {id}"),
            event_ids: event_ids.iter().map(|s| s.to_string()).collect(),
            event_id: legacy.map(|s| s.to_string()),
        }
    }

    fn payload(school_id: &str, event_ids: &[&str]) -> LinkEventsPayload {
        LinkEventsPayload {
            school_id: school_id.to_string(),
            event_ids: event_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn linking_merges_without_duplicates() {
        let repo = SchoolRepository::new(Store::in_memory());
        repo.upsert(school("s1", &["e1"], None)).await.unwrap();
        let svc = SchoolService::new(repo);

        let updated = svc.link_events(payload("s1", &["e1", "e2"])).await.unwrap();
        assert_eq!(updated.event_ids, vec!["e1", "e2"]);
    }

    #[tokio::test]
    async fn linking_preserves_the_legacy_field() {
        let repo = SchoolRepository::new(Store::in_memory());
        repo.upsert(school("s1", &[], Some("e0"))).await.unwrap();
        let svc = SchoolService::new(repo);

        let updated = svc.link_events(payload("s1", &["e1"])).await.unwrap();
        assert_eq!(updated.event_id.as_deref(), Some("e0"));
        assert_eq!(updated.linked_event_ids(), vec!["e1", "e0"]);
    }

    #[tokio::test]
    async fn linking_an_unknown_school_is_not_found() {
        let svc = SchoolService::new(SchoolRepository::new(Store::in_memory()));
        let result = svc.link_events(payload("nope", &["e1"])).await;
        assert!(matches!(result, Err(AppError::SchoolNotFound)));
    }

    #[tokio::test]
    async fn linking_nothing_fails_validation() {
        let repo = SchoolRepository::new(Store::in_memory());
        repo.upsert(school("s1", &[], None)).await.unwrap();
        let svc = SchoolService::new(repo);

        let result = svc.link_events(payload("s1", &[])).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
