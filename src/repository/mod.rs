//! Classroom persistence contract and its implementations.

mod memory;
mod postgres;

pub use memory::MemoryClassroomRepository;
pub use postgres::PgClassroomRepository;

use crate::error::AppError;
use crate::models::{Classroom, ClassroomPatch, NewClassroom};
use async_trait::async_trait;

/// Everything the service needs from the store. Each call is one round trip; nothing is cached.
#[async_trait]
pub trait ClassroomRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Classroom>, AppError>;

    /// Exact, case-sensitive match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Classroom>, AppError>;

    /// Page in insertion (id) order. Both arguments are expected to be non-negative.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Classroom>, AppError>;

    /// Insert with a fresh id. A name already held by another row fails with `Conflict`.
    async fn insert(&self, new: &NewClassroom) -> Result<Classroom, AppError>;

    /// Write the present patch fields to `current`'s row. `None` when the row vanished meanwhile.
    async fn apply_update(
        &self,
        current: &Classroom,
        patch: &ClassroomPatch,
    ) -> Result<Option<Classroom>, AppError>;

    /// Hard delete. Returns false if the row was already gone.
    async fn delete(&self, classroom: &Classroom) -> Result<bool, AppError>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<(), AppError>;
}
