//! ClassroomService: uniqueness- and existence-checked CRUD, plus request validation.

mod classroom;
mod validation;
pub use classroom::ClassroomService;
pub use validation::{Page, RequestValidator, DEFAULT_LIMIT, DEFAULT_SKIP};
