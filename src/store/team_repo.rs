// src/store/team_repo.rs

use std::collections::BTreeMap;

use crate::common::error::AppError;
use crate::models::user::{EventRole, TeamMember};
use crate::store::kv::Store;

const COLLECTION: &str = "event_team";

// O repositório da equipe de eventos, responsável por todas as interações
// com a coleção de concessões (userId, eventId) -> papel.
#[derive(Clone)]
pub struct TeamRepository {
    store: Store,
}

impl TeamRepository {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    // Busca o papel de um usuário em um evento
    pub async fn find_role(
        &self,
        user_id: &str,
        event_id: &str,
    ) -> Result<Option<EventRole>, AppError> {
        let members: Vec<TeamMember> = self.store.load(COLLECTION).await?;
        Ok(members
            .into_iter()
            .find(|m| m.user_id == user_id && m.event_id == event_id)
            .map(|m| m.role))
    }

    // Lista todos os membros da equipe de um evento (ordem sem significado)
    pub async fn list_by_event(&self, event_id: &str) -> Result<Vec<TeamMember>, AppError> {
        let members: Vec<TeamMember> = self.store.load(COLLECTION).await?;
        Ok(members
            .into_iter()
            .filter(|m| m.event_id == event_id)
            .collect())
    }

    /// Upsert: a última escrita vence, sem mesclagem de papéis.
    pub async fn upsert(&self, member: TeamMember) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        // 1. Carrega o snapshot e o indexa pela chave natural. O mapa
        //    garante estruturalmente "no máximo um registro por par".
        let members: Vec<TeamMember> = self.store.load(COLLECTION).await?;
        let mut by_key: BTreeMap<(String, String), TeamMember> =
            members.into_iter().map(|m| (m.key(), m)).collect();

        // 2. Substitui qualquer concessão anterior do mesmo par
        by_key.insert(member.key(), member);

        // 3. Grava o snapshot inteiro de volta
        let records: Vec<TeamMember> = by_key.into_values().collect();
        self.store.save(COLLECTION, &records).await?;
        Ok(())
    }

    /// Remove a concessão do par, se existir. Ausente não é erro.
    pub async fn remove(&self, user_id: &str, event_id: &str) -> Result<(), AppError> {
        let _guard = self.store.lock(COLLECTION).await;

        let members: Vec<TeamMember> = self.store.load(COLLECTION).await?;
        let remaining: Vec<TeamMember> = members
            .into_iter()
            .filter(|m| !(m.user_id == user_id && m.event_id == event_id))
            .collect();
        self.store.save(COLLECTION, &remaining).await?;
        Ok(())
    }
}
