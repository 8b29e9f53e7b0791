// src/models/event.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Enums ---

// Status administrativo: definido manualmente pelo produtor do evento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminStatus {
    Rascunho,
    Publicado,
    Reaberto,
    Suspenso,
    Cancelado,
    Arquivado,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Rascunho => "RASCUNHO",
            AdminStatus::Publicado => "PUBLICADO",
            AdminStatus::Reaberto => "REABERTO",
            AdminStatus::Suspenso => "SUSPENSO",
            AdminStatus::Cancelado => "CANCELADO",
            AdminStatus::Arquivado => "ARQUIVADO",
        }
    }

    /// Um evento é editável apenas em RASCUNHO ou PUBLICADO.
    /// Decisão de negócio: as datas NÃO entram nesta regra.
    pub fn is_editable(&self) -> bool {
        matches!(self, AdminStatus::Rascunho | AdminStatus::Publicado)
    }
}

// Status temporal: sempre derivado das datas na leitura, nunca persistido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeStatus {
    Agendado,
    Ativo,
    Encerrado,
}

impl TimeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeStatus::Agendado => "AGENDADO",
            TimeStatus::Ativo => "ATIVO",
            TimeStatus::Encerrado => "ENCERRADO",
        }
    }
}

// Cor de exibição do evento nas listagens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventColor {
    Gray,
    Blue,
    Green,
    Orange,
    DarkGray,
    Amber,
    Red,
}

impl EventColor {
    pub fn hex(&self) -> &'static str {
        match self {
            EventColor::Gray => "#9E9E9E",
            EventColor::Blue => "#2196F3",
            EventColor::Green => "#4CAF50",
            EventColor::Orange => "#FF9800",
            EventColor::DarkGray => "#616161",
            EventColor::Amber => "#FFC107",
            EventColor::Red => "#F44336",
        }
    }
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub admin_status: AdminStatus,
}

// Associação Evento <-> Modalidades, mantida de forma independente por evento.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventModalities {
    pub event_id: String,
    pub modality_ids: Vec<String>,
}
