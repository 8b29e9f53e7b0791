pub mod kv;
pub use kv::{JsonFileStore, KvStore, MemoryStore, Store, StoreError};
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod school_repo;
pub use school_repo::SchoolRepository;
pub mod modality_repo;
pub use modality_repo::ModalityRepository;
pub mod technician_repo;
pub use technician_repo::TechnicianRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
