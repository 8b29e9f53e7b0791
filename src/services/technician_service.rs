// src/services/technician_service.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;
use crate::models::school::{AddTechnicianPayload, TechnicianLink};
use crate::store::{ModalityRepository, SchoolRepository, TechnicianRepository};

#[derive(Clone)]
pub struct TechnicianService {
    school_repo: SchoolRepository,
    modality_repo: ModalityRepository,
    technician_repo: TechnicianRepository,
}

impl TechnicianService {
    pub fn new(
        school_repo: SchoolRepository,
        modality_repo: ModalityRepository,
        technician_repo: TechnicianRepository,
    ) -> Self {
        Self {
            school_repo,
            modality_repo,
            technician_repo,
        }
    }

    /// Vincula um técnico a uma escola com um conjunto de modalidades
    /// permitidas. O conjunto precisa caber na união das modalidades dos
    /// eventos vinculados à escola.
    pub async fn add_technician(
        &self,
        payload: AddTechnicianPayload,
    ) -> Result<TechnicianLink, AppError> {
        payload.validate()?;

        // 1. Conjunto vazio dispensa a validação cruzada: "nenhuma
        //    modalidade atribuída" não tem o que conferir.
        if !payload.modality_ids.is_empty() {
            // 2. Resolve a escola
            let school = self
                .school_repo
                .find_by_id(&payload.school_id)
                .await?
                .ok_or(AppError::SchoolNotFound)?;

            // 3. Eventos vinculados (união do campo novo com o legado)
            let event_ids = school.linked_event_ids();

            // 4. Escola sem eventos não tem contra o que validar
            if event_ids.is_empty() {
                return Err(AppError::SchoolWithoutEvents);
            }

            // 5. União das modalidades permitidas por todos esses eventos
            let allowed = self.modality_repo.allowed_for_events(&event_ids).await?;

            // 6. Toda modalidade pedida precisa estar na união; o erro
            //    nomeia cada id inválido, na íntegra
            let invalid: Vec<String> = payload
                .modality_ids
                .iter()
                .filter(|m| !allowed.contains(*m))
                .cloned()
                .collect();
            if !invalid.is_empty() {
                return Err(AppError::ModalitiesNotAllowed(invalid));
            }
        }

        // 7-8. Duplicidade do par (schoolId, userId) e persistência: o
        //      repositório faz a checagem e a gravação sob o mutex da
        //      coleção.
        let link = self
            .technician_repo
            .insert(TechnicianLink {
                id: Uuid::new_v4().to_string(),
                school_id: payload.school_id,
                user_id: payload.user_id,
                allowed_modality_ids: payload.modality_ids,
                created_at: Utc::now(),
                updated_at: None,
            })
            .await?;

        tracing::info!(
            "Técnico '{}' vinculado à escola '{}' com {} modalidade(s)",
            link.user_id,
            link.school_id,
            link.allowed_modality_ids.len()
        );
        Ok(link)
    }

    /// Sobrescreve o conjunto de modalidades de um vínculo existente.
    ///
    /// TODO: decidir com o produto se a atualização deve revalidar as
    /// modalidades contra os eventos da escola — hoje só o
    /// `add_technician` valida, e a atualização confia na validação
    /// anterior.
    pub async fn update_technician_permissions(
        &self,
        link_id: &str,
        modality_ids: Vec<String>,
    ) -> Result<TechnicianLink, AppError> {
        self.technician_repo
            .update_permissions(link_id, modality_ids)
            .await
    }

    /// Remove o vínculo pelo id. Ausente não é erro.
    pub async fn remove_technician(&self, link_id: &str) -> Result<(), AppError> {
        self.technician_repo.remove(link_id).await
    }

    pub async fn list_technicians(&self, school_id: &str) -> Result<Vec<TechnicianLink>, AppError> {
        self.technician_repo.list_by_school(school_id).await
    }
}
