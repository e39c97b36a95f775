//! Classroom business rules on top of [`ClassroomRepository`].

use crate::error::AppError;
use crate::models::{Classroom, ClassroomPatch, NewClassroom};
use crate::repository::ClassroomRepository;
use crate::service::validation::Page;
use std::sync::Arc;

/// Stateless between calls: every operation re-reads from the repository.
///
/// The name check and the write are separate round trips. Two concurrent writers
/// can both pass the check; the unique index on `class_name` then rejects the
/// second write, which surfaces as the same `Conflict`.
#[derive(Clone)]
pub struct ClassroomService {
    repo: Arc<dyn ClassroomRepository>,
}

impl ClassroomService {
    pub fn new(repo: Arc<dyn ClassroomRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn ClassroomRepository> {
        &self.repo
    }

    pub async fn list(&self, page: Page) -> Result<Vec<Classroom>, AppError> {
        self.repo.list(page.skip, page.limit).await
    }

    pub async fn get(&self, id: i32) -> Result<Classroom, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::classroom_not_found(id))
    }

    pub async fn create(&self, input: NewClassroom) -> Result<Classroom, AppError> {
        if self.repo.find_by_name(&input.class_name).await?.is_some() {
            tracing::debug!(class_name = %input.class_name, "create rejected: name taken");
            return Err(AppError::name_taken());
        }
        let created = self.repo.insert(&input).await?;
        tracing::info!(id = created.id, class_name = %created.class_name, "classroom created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, patch: ClassroomPatch) -> Result<Classroom, AppError> {
        let current = self.get(id).await?;
        if let Some(name) = &patch.class_name {
            if *name != current.class_name && self.repo.find_by_name(name).await?.is_some() {
                tracing::debug!(id, class_name = %name, "update rejected: name taken");
                return Err(AppError::name_taken());
            }
        }
        if patch.is_empty() {
            return Ok(current);
        }
        let updated = self
            .repo
            .apply_update(&current, &patch)
            .await?
            .ok_or_else(|| AppError::classroom_not_found(id))?;
        tracing::info!(id, "classroom updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let current = self.get(id).await?;
        if !self.repo.delete(&current).await? {
            return Err(AppError::classroom_not_found(id));
        }
        tracing::info!(id, "classroom deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryClassroomRepository;

    fn service() -> (ClassroomService, Arc<MemoryClassroomRepository>) {
        let repo = Arc::new(MemoryClassroomRepository::new());
        (ClassroomService::new(repo.clone()), repo)
    }

    fn new_room(name: &str, teacher: &str) -> NewClassroom {
        NewClassroom {
            class_name: name.into(),
            class_teacher: teacher.into(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (svc, _) = service();
        let created = svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        let fetched = svc.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.class_name, "Room A");
        assert_eq!(fetched.class_teacher, "Ms. Lee");
    }

    #[tokio::test]
    async fn create_with_taken_name_conflicts_without_insert() {
        let (svc, repo) = service();
        svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        let err = svc.create(new_room("Room A", "Mr. Kim")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.classroom_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_and_mutate_nothing() {
        let (svc, repo) = service();
        svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();

        assert!(matches!(svc.get(99).await, Err(AppError::NotFound(_))));
        let patch = ClassroomPatch {
            class_name: Some("Room Z".into()),
            class_teacher: None,
        };
        assert!(matches!(svc.update(99, patch).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(99).await, Err(AppError::NotFound(_))));

        let rows = svc.list(Page::default()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].class_name, "Room A");
        assert_eq!(repo.classroom_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn partial_update_keeps_unsupplied_fields() {
        let (svc, _) = service();
        let room = svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();

        let updated = svc
            .update(
                room.id,
                ClassroomPatch {
                    class_name: None,
                    class_teacher: Some("Mr. Kim".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.class_name, "Room A");
        assert_eq!(updated.class_teacher, "Mr. Kim");

        let updated = svc
            .update(
                room.id,
                ClassroomPatch {
                    class_name: Some("Room B".into()),
                    class_teacher: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.class_name, "Room B");
        assert_eq!(updated.class_teacher, "Mr. Kim");
    }

    #[tokio::test]
    async fn renaming_to_own_name_never_conflicts() {
        let (svc, _) = service();
        let room = svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        let updated = svc
            .update(
                room.id,
                ClassroomPatch {
                    class_name: Some("Room A".into()),
                    class_teacher: Some("Mr. Kim".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.class_name, "Room A");
        assert_eq!(updated.class_teacher, "Mr. Kim");
    }

    #[tokio::test]
    async fn renaming_onto_another_rooms_name_conflicts() {
        let (svc, _) = service();
        svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        let b = svc.create(new_room("Room B", "Mr. Kim")).await.unwrap();
        let err = svc
            .update(
                b.id,
                ClassroomPatch {
                    class_name: Some("Room A".into()),
                    class_teacher: Some("changed".into()),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let unchanged = svc.get(b.id).await.unwrap();
        assert_eq!(unchanged, b);
    }

    #[tokio::test]
    async fn empty_patch_returns_current_row() {
        let (svc, _) = service();
        let room = svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        let same = svc.update(room.id, ClassroomPatch::default()).await.unwrap();
        assert_eq!(same, room);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (svc, _) = service();
        let room = svc.create(new_room("Room A", "Ms. Lee")).await.unwrap();
        svc.delete(room.id).await.unwrap();
        assert!(matches!(svc.get(room.id).await, Err(AppError::NotFound(_))));
        assert!(matches!(svc.delete(room.id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_pages_in_insertion_order() {
        let (svc, _) = service();
        for (name, teacher) in [("A", "t1"), ("B", "t2"), ("C", "t3")] {
            svc.create(new_room(name, teacher)).await.unwrap();
        }
        let first: Vec<String> = svc
            .list(Page::new(0, 2))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.class_name)
            .collect();
        assert_eq!(first, vec!["A", "B"]);
        let rest: Vec<String> = svc
            .list(Page::new(2, 2))
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.class_name)
            .collect();
        assert_eq!(rest, vec!["C"]);
        assert!(svc.list(Page::new(-5, -5)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn storage_failures_propagate_unmasked() {
        let (svc, repo) = service();
        repo.set_unavailable(true);
        assert!(matches!(svc.list(Page::default()).await, Err(AppError::Storage(_))));
        assert!(matches!(
            svc.create(new_room("Room A", "Ms. Lee")).await,
            Err(AppError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_same_name_creates_leave_one_row() {
        let (svc, repo) = service();
        let a = svc.clone();
        let b = svc.clone();
        let (ra, rb) = tokio::join!(
            tokio::spawn(async move { a.create(new_room("Room A", "Ms. Lee")).await }),
            tokio::spawn(async move { b.create(new_room("Room A", "Mr. Kim")).await }),
        );
        let results = [ra.unwrap(), rb.unwrap()];
        let ok = results.iter().filter(|r| r.is_ok()).count();
        let conflicts = results
            .iter()
            .filter(|r| matches!(r, Err(AppError::Conflict(_))))
            .count();
        assert_eq!((ok, conflicts), (1, 1));
        assert_eq!(repo.classroom_count().unwrap(), 1);
    }
}
