// src/config.rs

use std::env;
use std::sync::Arc;

use crate::services::{PermissionService, SchoolService, TeamService, TechnicianService};
use crate::store::kv::{JsonFileStore, Store};
use crate::store::{
    ModalityRepository, SchoolRepository, TeamRepository, TechnicianRepository, UserRepository,
};

// Inicializa o logger. Chamar uma única vez, na borda da aplicação.
pub fn init_tracing() {
    tracing_subscriber::fmt().with_target(false).compact().init();
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub user_repo: UserRepository,
    pub permission_service: PermissionService,
    pub team_service: TeamService,
    pub school_service: SchoolService,
    pub technician_service: TechnicianService,
}

impl AppState {
    // Carrega as configurações do ambiente e monta o estado.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        // EVENTOS_DATA_DIR definida => coleções em arquivos JSON;
        // ausente => armazenamento em memória (útil em desenvolvimento).
        let store = match env::var("EVENTOS_DATA_DIR") {
            Ok(dir) => {
                let backend = JsonFileStore::open(dir.clone().into()).await?;
                tracing::info!("✅ Armazenamento pronto em '{}'", dir);
                Store::new(Arc::new(backend))
            }
            Err(_) => {
                tracing::info!("EVENTOS_DATA_DIR não definida; usando armazenamento em memória");
                Store::in_memory()
            }
        };

        Ok(Self::with_store(store))
    }

    // Monta o estado sobre um Store já construído (testes, embutir com
    // outro backend).
    pub fn with_store(store: Store) -> Self {
        // --- Monta o gráfico de dependências ---
        let team_repo = TeamRepository::new(store.clone());
        let school_repo = SchoolRepository::new(store.clone());
        let modality_repo = ModalityRepository::new(store.clone());
        let technician_repo = TechnicianRepository::new(store.clone());
        let user_repo = UserRepository::new(store.clone());

        let permission_service = PermissionService::new(team_repo.clone());
        let team_service = TeamService::new(team_repo);
        let school_service = SchoolService::new(school_repo.clone());
        let technician_service =
            TechnicianService::new(school_repo, modality_repo, technician_repo);

        Self {
            store,
            user_repo,
            permission_service,
            team_service,
            school_service,
            technician_service,
        }
    }
}
