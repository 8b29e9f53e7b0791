// src/services/team_service.rs

use chrono::Utc;

use crate::common::error::AppError;
use crate::models::user::{EventRole, TeamMember, User};
use crate::store::TeamRepository;

#[derive(Clone)]
pub struct TeamService {
    team_repo: TeamRepository,
}

impl TeamService {
    pub fn new(team_repo: TeamRepository) -> Self {
        Self { team_repo }
    }

    /// Concede (ou substitui) o papel do usuário no evento.
    /// Última escrita vence; papéis não são mesclados.
    pub async fn add_team_member(
        &self,
        user_id: &str,
        event_id: &str,
        role: EventRole,
    ) -> Result<(), AppError> {
        self.team_repo
            .upsert(TeamMember {
                user_id: user_id.to_string(),
                event_id: event_id.to_string(),
                role,
                created_at: Utc::now(),
            })
            .await?;
        tracing::info!(
            "Papel '{:?}' concedido ao usuário '{}' no evento '{}'",
            role, user_id, event_id
        );
        Ok(())
    }

    /// Revoga a concessão do par, se existir. Ausente não é erro.
    pub async fn remove_team_member(&self, user_id: &str, event_id: &str) -> Result<(), AppError> {
        self.team_repo.remove(user_id, event_id).await
    }

    /// Ao criar um evento, quem criou vira `owner`. Esta é a única
    /// concessão automática do sistema; todas as outras são explícitas.
    ///
    /// O registro do evento em si vive fora deste núcleo, então a criação
    /// do evento e esta concessão são duas escritas separadas: entre elas,
    /// um leitor concorrente observa um evento sem owner. Estado
    /// intermediário conhecido e tolerado.
    pub async fn on_event_created(&self, creator: &User, event_id: &str) -> Result<(), AppError> {
        self.add_team_member(&creator.id, event_id, EventRole::Owner)
            .await
    }

    pub async fn get_team_members(&self, event_id: &str) -> Result<Vec<TeamMember>, AppError> {
        self.team_repo.list_by_event(event_id).await
    }
}
