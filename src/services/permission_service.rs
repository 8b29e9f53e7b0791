// src/services/permission_service.rs

use crate::common::error::AppError;
use crate::models::user::{EventRole, User, UserRole};
use crate::store::TeamRepository;

#[derive(Clone)]
pub struct PermissionService {
    team_repo: TeamRepository,
}

impl PermissionService {
    pub fn new(team_repo: TeamRepository) -> Self {
        Self { team_repo }
    }

    /// Resolve uma capacidade global do usuário. A ordem das regras importa:
    /// admin é incondicional, o conjunto legado de permissões vem antes das
    /// regras por papel.
    pub fn has_global_permission(&self, user: Option<&User>, permission: &str) -> bool {
        let Some(user) = user else {
            return false;
        };
        if user.role == UserRole::Admin {
            return true;
        }
        // Conjunto legado de capacidades em texto livre
        if user.permissions.iter().any(|p| p == permission) {
            return true;
        }
        match user.role {
            UserRole::SchoolAdmin => permission.starts_with("gerir_"),
            UserRole::Producer => permission.contains("evento"),
            _ => false,
        }
    }

    /// Papel do usuário em um evento. Admin global é `owner` de todo
    /// evento — computado, nunca persistido.
    pub async fn get_event_role(
        &self,
        user: Option<&User>,
        event_id: &str,
    ) -> Result<Option<EventRole>, AppError> {
        let Some(user) = user else {
            return Ok(None);
        };
        if user.role == UserRole::Admin {
            return Ok(Some(EventRole::Owner));
        }
        self.team_repo.find_role(&user.id, event_id).await
    }

    pub async fn can_manage_event(
        &self,
        user: Option<&User>,
        event_id: &str,
    ) -> Result<bool, AppError> {
        let role = self.get_event_role(user, event_id).await?;
        Ok(role.is_some_and(|r| r.can_manage()))
    }

    /// Guarda para a camada chamadora: falha com PermissionDenied quando o
    /// usuário não pode gerir o evento.
    pub async fn ensure_can_manage(
        &self,
        user: Option<&User>,
        event_id: &str,
    ) -> Result<(), AppError> {
        if self.can_manage_event(user, event_id).await? {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(format!(
                "Você não pode gerir o evento '{event_id}'."
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::TeamMember;
    use crate::store::kv::Store;
    use chrono::Utc;

    fn service() -> PermissionService {
        PermissionService::new(TeamRepository::new(Store::in_memory()))
    }

    fn user(id: &str, role: UserRole, permissions: &[&str]) -> User {
        User {
            id: id.to_string(),
            role,
            school_id: None,
            permissions: permissions.iter().map(|s| s.to_string()).collect(),
        }
    }

    async fn grant(svc: &PermissionService, user_id: &str, event_id: &str, role: EventRole) {
        svc.team_repo
            .upsert(TeamMember {
                user_id: user_id.to_string(),
                event_id: event_id.to_string(),
                role,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    // --- permissões globais ---

    #[test]
    fn null_user_has_nothing() {
        assert!(!service().has_global_permission(None, "gerir_escolas"));
    }

    #[test]
    fn admin_has_everything() {
        let svc = service();
        let admin = user("u1", UserRole::Admin, &[]);
        assert!(svc.has_global_permission(Some(&admin), "qualquer_coisa"));
    }

    #[test]
    fn legacy_permission_set_is_honored_before_role_rules() {
        let svc = service();
        let participant = user("u1", UserRole::Participant, &["ver_relatorios"]);
        assert!(svc.has_global_permission(Some(&participant), "ver_relatorios"));
        assert!(!svc.has_global_permission(Some(&participant), "outra"));
    }

    #[test]
    fn school_admin_gets_gerir_prefix() {
        let svc = service();
        let school_admin = user("u1", UserRole::SchoolAdmin, &[]);
        assert!(svc.has_global_permission(Some(&school_admin), "gerir_tecnicos"));
        assert!(!svc.has_global_permission(Some(&school_admin), "criar_evento"));
    }

    #[test]
    fn producer_gets_evento_substring() {
        let svc = service();
        let producer = user("u1", UserRole::Producer, &[]);
        assert!(svc.has_global_permission(Some(&producer), "criar_evento"));
        assert!(svc.has_global_permission(Some(&producer), "gerir_eventos"));
        assert!(!svc.has_global_permission(Some(&producer), "gerir_escolas"));
    }

    #[test]
    fn technician_and_participant_have_no_role_rule() {
        let svc = service();
        let tech = user("u1", UserRole::Technician, &[]);
        assert!(!svc.has_global_permission(Some(&tech), "gerir_tecnicos"));
    }

    // --- papel por evento ---

    #[tokio::test]
    async fn admin_is_owner_of_every_event_without_any_grant() {
        let svc = service();
        let admin = user("u1", UserRole::Admin, &[]);
        let role = svc.get_event_role(Some(&admin), "e-qualquer").await.unwrap();
        assert_eq!(role, Some(EventRole::Owner));
    }

    #[tokio::test]
    async fn null_user_has_no_event_role() {
        let svc = service();
        assert!(svc.get_event_role(None, "e1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stored_grant_is_returned_for_non_admins() {
        let svc = service();
        grant(&svc, "u1", "e1", EventRole::Assistant).await;
        let producer = user("u1", UserRole::Producer, &[]);

        let role = svc.get_event_role(Some(&producer), "e1").await.unwrap();
        assert_eq!(role, Some(EventRole::Assistant));
        assert!(svc.get_event_role(Some(&producer), "e2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn owner_and_assistant_manage_observer_does_not() {
        let svc = service();
        grant(&svc, "u1", "e1", EventRole::Owner).await;
        grant(&svc, "u2", "e1", EventRole::Assistant).await;
        grant(&svc, "u3", "e1", EventRole::Observer).await;

        let u1 = user("u1", UserRole::Producer, &[]);
        let u2 = user("u2", UserRole::Participant, &[]);
        let u3 = user("u3", UserRole::Participant, &[]);
        let u4 = user("u4", UserRole::Participant, &[]);

        assert!(svc.can_manage_event(Some(&u1), "e1").await.unwrap());
        assert!(svc.can_manage_event(Some(&u2), "e1").await.unwrap());
        assert!(!svc.can_manage_event(Some(&u3), "e1").await.unwrap());
        assert!(!svc.can_manage_event(Some(&u4), "e1").await.unwrap());
    }

    #[tokio::test]
    async fn ensure_can_manage_denies_with_a_message() {
        let svc = service();
        let stranger = user("u9", UserRole::Participant, &[]);
        let result = svc.ensure_can_manage(Some(&stranger), "e1").await;
        assert!(matches!(result, Err(AppError::PermissionDenied(_))));
    }
}
