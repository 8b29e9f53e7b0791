pub mod event;
pub use event::{AdminStatus, Event, EventColor, EventModalities, TimeStatus};
pub mod user;
pub use user::{EventRole, TeamMember, User, UserRole};
pub mod school;
pub use school::{AddTechnicianPayload, LinkEventsPayload, School, TechnicianLink};
