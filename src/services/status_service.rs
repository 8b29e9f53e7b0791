// src/services/status_service.rs

use chrono::{DateTime, Utc};

use crate::models::event::{Event, EventColor, TimeStatus};

// Funções puras: nada aqui toca o armazenamento e nenhum resultado é
// persistido. O status temporal depende do relógio, então é recalculado
// a cada leitura.

/// Deriva o status temporal a partir do intervalo de datas.
/// Sem uma das datas não dá para saber se o evento começou ou terminou,
/// então por convenção ele fica AGENDADO.
pub fn time_status(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> TimeStatus {
    let (Some(start), Some(end)) = (start, end) else {
        return TimeStatus::Agendado;
    };
    if now < start {
        TimeStatus::Agendado
    } else if now > end {
        TimeStatus::Encerrado
    } else {
        TimeStatus::Ativo
    }
}

pub fn event_time_status(event: &Event, now: DateTime<Utc>) -> TimeStatus {
    time_status(event.start_date, event.end_date, now)
}

/// Status temporal contra o relógio atual.
pub fn time_status_now(event: &Event) -> TimeStatus {
    event_time_status(event, Utc::now())
}

fn normalize(status: &str) -> String {
    status.trim().to_uppercase()
}

/// Resolve a cor de exibição do evento a partir do par
/// (status temporal, status administrativo). Os dois lados são
/// normalizados antes da comparação; entradas vazias ou desconhecidas
/// caem nas camadas de fallback.
pub fn event_color(time_status: &str, admin_status: &str) -> EventColor {
    let time = normalize(time_status);
    let admin = normalize(admin_status);

    // Tabela de pares exatos (a primeira correspondência vence)
    match (time.as_str(), admin.as_str()) {
        ("AGENDADO", "RASCUNHO") => return EventColor::Gray,
        ("AGENDADO", "PUBLICADO") => return EventColor::Blue,
        ("ATIVO", "PUBLICADO") => return EventColor::Green,
        ("ATIVO", "SUSPENSO") => return EventColor::Orange,
        ("ENCERRADO", "PUBLICADO") => return EventColor::DarkGray,
        ("ENCERRADO", "REABERTO") => return EventColor::Amber,
        ("ENCERRADO", "CANCELADO") => return EventColor::Red,
        _ => {}
    }

    // Camadas de fallback, em ordem fixa de prioridade
    if admin == "CANCELADO" {
        return EventColor::Red;
    }
    if admin == "REABERTO" {
        return EventColor::Amber;
    }
    if admin == "SUSPENSO" {
        return EventColor::Orange;
    }
    // EM_ANDAMENTO: valor legado ainda presente em registros antigos
    if time == "ATIVO" || time == "EM_ANDAMENTO" {
        return EventColor::Green;
    }
    EventColor::Gray
}

pub fn event_color_for(event: &Event, now: DateTime<Utc>) -> EventColor {
    event_color(
        event_time_status(event, now).as_str(),
        event.admin_status.as_str(),
    )
}

/// Cor de exibição contra o relógio atual.
pub fn event_color_now(event: &Event) -> EventColor {
    event_color_for(event, Utc::now())
}

/// Um evento é editável apenas em RASCUNHO ou PUBLICADO. As datas NÃO
/// entram nesta regra: é uma decisão de negócio, não um descuido.
pub fn is_editable(admin_status: &str) -> bool {
    matches!(normalize(admin_status).as_str(), "RASCUNHO" | "PUBLICADO")
}
