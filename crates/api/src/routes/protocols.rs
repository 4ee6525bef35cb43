//! Route definitions for protocols and scheduled tasks.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{protocol, scheduled_task};
use crate::state::AppState;

/// Routes mounted at `/protocols` and `/tasks`.
///
/// ```text
/// GET    /protocols                      -> list (with task templates)
/// POST   /protocols                      -> create
/// GET    /protocols/{id}                 -> get_by_id (with task templates)
/// PUT    /protocols/{id}                 -> update
/// DELETE /protocols/{id}                 -> delete (409 if tasks outstanding)
/// POST   /protocols/{id}/tasks           -> create task template
/// PUT    /protocols/{id}/tasks/{task_id} -> update task template
/// DELETE /protocols/{id}/tasks/{task_id} -> delete task template
///
/// GET    /tasks                -> list (?due_before=&include_completed=)
/// POST   /tasks                -> manual create
/// GET    /tasks/{id}           -> get_by_id
/// POST   /tasks/{id}/complete  -> complete
/// DELETE /tasks/{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/protocols", get(protocol::list).post(protocol::create))
        .route(
            "/protocols/{id}",
            get(protocol::get_by_id)
                .put(protocol::update)
                .delete(protocol::delete),
        )
        .route("/protocols/{id}/tasks", post(protocol::create_task))
        .route(
            "/protocols/{id}/tasks/{task_id}",
            put(protocol::update_task).delete(protocol::delete_task),
        )
        .route(
            "/tasks",
            get(scheduled_task::list).post(scheduled_task::create),
        )
        .route(
            "/tasks/{id}",
            get(scheduled_task::get_by_id).delete(scheduled_task::delete),
        )
        .route("/tasks/{id}/complete", post(scheduled_task::complete))
}
