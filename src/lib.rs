//! Classroom service: CRUD over classrooms backed by PostgreSQL, exposed over HTTP.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod migration;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{DatabaseSettings, Settings};
pub use error::{AppError, ConfigError, FieldError, ValidationErrors};
pub use migration::apply_migrations;
pub use models::{Classroom, ClassroomPatch, NewClassroom, Student};
pub use repository::{ClassroomRepository, MemoryClassroomRepository, PgClassroomRepository};
pub use routes::{app, classroom_routes, common_routes};
pub use service::{ClassroomService, Page, RequestValidator};
pub use state::AppState;
pub use store::{connect_pool, ensure_database_exists};
