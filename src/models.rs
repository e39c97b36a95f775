//! Row types for the `classrooms` and `students` tables.

use serde::{Deserialize, Serialize};

/// A classroom as stored. Also the response view: `id`, `class_name`, `class_teacher`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Classroom {
    pub id: i32,
    pub class_name: String,
    pub class_teacher: String,
}

/// Validated input for a new classroom; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClassroom {
    pub class_name: String,
    pub class_teacher: String,
}

/// Partial update. `None` leaves the column untouched; `Some` is written verbatim, even when empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomPatch {
    pub class_name: Option<String>,
    pub class_teacher: Option<String>,
}

impl ClassroomPatch {
    pub fn is_empty(&self) -> bool {
        self.class_name.is_none() && self.class_teacher.is_none()
    }

    /// Copy of `current` with the present fields replaced.
    pub fn apply_to(&self, current: &Classroom) -> Classroom {
        Classroom {
            id: current.id,
            class_name: self
                .class_name
                .clone()
                .unwrap_or_else(|| current.class_name.clone()),
            class_teacher: self
                .class_teacher
                .clone()
                .unwrap_or_else(|| current.class_teacher.clone()),
        }
    }
}

/// A student row. `classroom_id` is nulled when its classroom is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub classroom_id: Option<i32>,
}
