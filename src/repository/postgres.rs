//! PostgreSQL-backed repository.

use super::ClassroomRepository;
use crate::error::AppError;
use crate::models::{Classroom, ClassroomPatch, NewClassroom};
use async_trait::async_trait;
use sqlx::PgPool;

const COLUMNS: &str = "id, class_name, class_teacher";

#[derive(Clone)]
pub struct PgClassroomRepository {
    pool: PgPool,
}

impl PgClassroomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassroomRepository for PgClassroomRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Classroom>, AppError> {
        let sql = format!("SELECT {} FROM classrooms WHERE id = $1", COLUMNS);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Classroom>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Classroom>, AppError> {
        let sql = format!(
            "SELECT {} FROM classrooms WHERE class_name = $1 ORDER BY id LIMIT 1",
            COLUMNS
        );
        tracing::debug!(sql = %sql, name, "query");
        let row = sqlx::query_as::<_, Classroom>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Classroom>, AppError> {
        let sql = format!(
            "SELECT {} FROM classrooms ORDER BY id OFFSET $1 LIMIT $2",
            COLUMNS
        );
        tracing::debug!(sql = %sql, offset, limit, "query");
        let rows = sqlx::query_as::<_, Classroom>(&sql)
            .bind(offset.max(0))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn insert(&self, new: &NewClassroom) -> Result<Classroom, AppError> {
        let sql = format!(
            "INSERT INTO classrooms (class_name, class_teacher) VALUES ($1, $2) RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, class_name = %new.class_name, "query");
        sqlx::query_as::<_, Classroom>(&sql)
            .bind(&new.class_name)
            .bind(&new.class_teacher)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::from_store)
    }

    async fn apply_update(
        &self,
        current: &Classroom,
        patch: &ClassroomPatch,
    ) -> Result<Option<Classroom>, AppError> {
        let sql = format!(
            "UPDATE classrooms SET class_name = COALESCE($2, class_name), class_teacher = COALESCE($3, class_teacher) WHERE id = $1 RETURNING {}",
            COLUMNS
        );
        tracing::debug!(sql = %sql, id = current.id, patch = ?patch, "query");
        sqlx::query_as::<_, Classroom>(&sql)
            .bind(current.id)
            .bind(patch.class_name.as_deref())
            .bind(patch.class_teacher.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::from_store)
    }

    async fn delete(&self, classroom: &Classroom) -> Result<bool, AppError> {
        let sql = "DELETE FROM classrooms WHERE id = $1";
        tracing::debug!(sql = %sql, id = classroom.id, "query");
        let result = sqlx::query(sql).bind(classroom.id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
