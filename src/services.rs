pub mod status_service;
pub mod permission_service;
pub use permission_service::PermissionService;
pub mod team_service;
pub use team_service::TeamService;
pub mod school_service;
pub use school_service::SchoolService;
pub mod technician_service;
pub use technician_service::TechnicianService;
