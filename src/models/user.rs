// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Enums ---

// Papel global do usuário no sistema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Producer,
    SchoolAdmin,
    Technician,
    Participant,
}

// Papel do usuário dentro de um evento específico.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventRole {
    Owner,
    Assistant,
    Observer,
}

impl EventRole {
    /// Owner e Assistant podem gerir o evento; Observer apenas visualiza.
    pub fn can_manage(&self) -> bool {
        matches!(self, EventRole::Owner | EventRole::Assistant)
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub role: UserRole,
    pub school_id: Option<String>,

    // Conjunto legado de capacidades em texto livre, ainda honrado
    // pelo resolvedor de permissões.
    #[serde(default)]
    pub permissions: Vec<String>,
}

// A "Ponte" Usuário-Evento: no máximo um registro por par (userId, eventId).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub user_id: String,
    pub event_id: String,
    pub role: EventRole,
    pub created_at: DateTime<Utc>,
}

impl TeamMember {
    // Chave natural do registro.
    pub fn key(&self) -> (String, String) {
        (self.user_id.clone(), self.event_id.clone())
    }
}
