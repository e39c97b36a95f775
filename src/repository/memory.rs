//! In-process repository: same contract as the PostgreSQL one, including the
//! unique `class_name` index and `ON DELETE SET NULL` for students.

use super::ClassroomRepository;
use crate::error::AppError;
use crate::models::{Classroom, ClassroomPatch, NewClassroom, Student};
use async_trait::async_trait;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct MemoryState {
    classrooms: Vec<Classroom>,
    students: Vec<Student>,
    next_classroom_id: i32,
    next_student_id: i32,
    unavailable: bool,
}

#[derive(Default)]
pub struct MemoryClassroomRepository {
    state: Mutex<MemoryState>,
}

impl MemoryClassroomRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, AppError> {
        let guard = self
            .state
            .lock()
            .map_err(|_| AppError::Storage("memory store poisoned".into()))?;
        if guard.unavailable {
            return Err(AppError::Storage("store unavailable".into()));
        }
        Ok(guard)
    }

    /// Test hook: make every subsequent call fail with `Storage`, as if the connection dropped.
    pub fn set_unavailable(&self, unavailable: bool) {
        if let Ok(mut guard) = self.state.lock() {
            guard.unavailable = unavailable;
        }
    }

    pub fn classroom_count(&self) -> Result<usize, AppError> {
        Ok(self.lock()?.classrooms.len())
    }

    /// Test hook for the `ON DELETE SET NULL` rule; the service has no student operations.
    /// A `classroom_id` that does not exist is a foreign-key failure.
    pub fn insert_student(
        &self,
        name: &str,
        age: i32,
        classroom_id: Option<i32>,
    ) -> Result<Student, AppError> {
        let mut state = self.lock()?;
        if let Some(cid) = classroom_id {
            if !state.classrooms.iter().any(|c| c.id == cid) {
                return Err(AppError::Storage(format!(
                    "foreign key violation: classroom {} does not exist",
                    cid
                )));
            }
        }
        let id = next_id(state.next_student_id)?;
        state.next_student_id = id;
        let student = Student {
            id,
            name: name.to_string(),
            age,
            classroom_id,
        };
        state.students.push(student.clone());
        Ok(student)
    }

    /// Test hook, see [`Self::insert_student`].
    pub fn find_student(&self, id: i32) -> Result<Option<Student>, AppError> {
        Ok(self.lock()?.students.iter().find(|s| s.id == id).cloned())
    }
}

fn next_id(last: i32) -> Result<i32, AppError> {
    last.checked_add(1)
        .ok_or_else(|| AppError::Storage("id sequence exhausted".into()))
}

fn name_held_by_other(state: &MemoryState, name: &str, id: Option<i32>) -> bool {
    state
        .classrooms
        .iter()
        .any(|c| c.class_name == name && Some(c.id) != id)
}

#[async_trait]
impl ClassroomRepository for MemoryClassroomRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Classroom>, AppError> {
        Ok(self.lock()?.classrooms.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Classroom>, AppError> {
        Ok(self
            .lock()?
            .classrooms
            .iter()
            .find(|c| c.class_name == name)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Classroom>, AppError> {
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        Ok(self
            .lock()?
            .classrooms
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert(&self, new: &NewClassroom) -> Result<Classroom, AppError> {
        let mut state = self.lock()?;
        if name_held_by_other(&state, &new.class_name, None) {
            return Err(AppError::name_taken());
        }
        let id = next_id(state.next_classroom_id)?;
        state.next_classroom_id = id;
        let row = Classroom {
            id,
            class_name: new.class_name.clone(),
            class_teacher: new.class_teacher.clone(),
        };
        state.classrooms.push(row.clone());
        Ok(row)
    }

    async fn apply_update(
        &self,
        current: &Classroom,
        patch: &ClassroomPatch,
    ) -> Result<Option<Classroom>, AppError> {
        let mut state = self.lock()?;
        if let Some(name) = &patch.class_name {
            if name_held_by_other(&state, name, Some(current.id)) {
                return Err(AppError::name_taken());
            }
        }
        let Some(row) = state.classrooms.iter_mut().find(|c| c.id == current.id) else {
            return Ok(None);
        };
        *row = patch.apply_to(row);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, classroom: &Classroom) -> Result<bool, AppError> {
        let mut state = self.lock()?;
        let before = state.classrooms.len();
        state.classrooms.retain(|c| c.id != classroom.id);
        if state.classrooms.len() == before {
            return Ok(false);
        }
        for student in state.students.iter_mut() {
            if student.classroom_id == Some(classroom.id) {
                student.classroom_id = None;
            }
        }
        Ok(true)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.lock().map(|_| ())
    }
}
