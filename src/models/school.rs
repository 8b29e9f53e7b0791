// src/models/school.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ---
// 1. School (A "Escola")
// ---
// Uma escola pode estar vinculada a vários eventos via `eventIds`;
// registros antigos ainda carregam o campo único `eventId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub event_ids: Vec<String>,

    // Campo legado (um único evento). Depreciado, mas ainda honrado.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl School {
    /// Ponto único de normalização: une `eventIds` e o `eventId` legado,
    /// sem duplicatas, preservando a ordem de inserção. Nenhuma outra
    /// parte do código deve ramificar sobre a presença dos campos.
    pub fn linked_event_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for id in self.event_ids.iter().chain(self.event_id.iter()) {
            if !ids.iter().any(|existing| existing == id) {
                ids.push(id.clone());
            }
        }
        ids
    }
}

// ---
// 2. TechnicianLink (A "Ponte" Escola-Técnico)
// ---
// No máximo um vínculo ativo por par (schoolId, userId).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicianLink {
    pub id: String,
    pub school_id: String,
    pub user_id: String,
    pub allowed_modality_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

// ---
// Payloads
// ---

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddTechnicianPayload {
    #[validate(length(min = 1, message = "O campo 'schoolId' é obrigatório."))]
    pub school_id: String,

    #[validate(length(min = 1, message = "O campo 'userId' é obrigatório."))]
    pub user_id: String,

    // Um conjunto vazio é aceitável: "nenhuma modalidade atribuída".
    #[serde(default)]
    pub modality_ids: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkEventsPayload {
    #[validate(length(min = 1, message = "O campo 'schoolId' é obrigatório."))]
    pub school_id: String,

    #[validate(length(min = 1, message = "Informe ao menos um evento."))]
    pub event_ids: Vec<String>,
}
