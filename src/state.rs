//! Shared application state for all routes.

use crate::service::ClassroomService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub classrooms: ClassroomService,
    /// Used by the root greeting.
    pub project_name: Arc<str>,
}

impl AppState {
    pub fn new(classrooms: ClassroomService, project_name: impl Into<Arc<str>>) -> Self {
        Self {
            classrooms,
            project_name: project_name.into(),
        }
    }
}
