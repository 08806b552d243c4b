/// Task endpoints
///
/// # Endpoints
///
/// - `GET /` — list the current user's tasks
/// - `GET /add` / `POST /add` — create a task
/// - `GET /edit/:id` / `POST /edit/:id` — edit a task
/// - `GET /delete/:id` — delete a task
///
/// All handlers run behind the session middleware and take the owner id
/// from the [`CurrentUser`] principal, never from the request. Every
/// store query is scoped by `(task id AND owner id)` — reaching for
/// another user's task yields a 404 on read and a silent no-op on write.
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Extension, Form,
};
use serde::Deserialize;
use ticklist_shared::{
    auth::session::CurrentUser,
    models::task::{CreateTask, Task, UpdateTask},
};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::{WebError, WebResult},
    views,
};

/// Task form payload, shared by add and edit
///
/// `Option` distinguishes a field missing from the form (a 400) from one
/// submitted empty (accepted — empty titles are allowed). The completed
/// checkbox is simply absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    /// Task title
    pub title: Option<String>,

    /// Task description
    pub description: Option<String>,

    /// Checkbox; present iff checked
    pub completed: Option<String>,
}

/// Lists the current user's tasks
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> WebResult<Html<String>> {
    let tasks = Task::list_by_owner(&state.db, user.id).await?;

    Ok(Html(views::task_list_page(&user.username, &tasks, None)))
}

/// Shows the add-task form
pub async fn show_add(Extension(user): Extension<CurrentUser>) -> Html<String> {
    Html(views::add_task_page(&user.username))
}

/// Creates a task owned by the current user
///
/// New tasks always start incomplete.
pub async fn add(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Form(form): Form<TaskForm>,
) -> WebResult<Redirect> {
    let title = form.title.ok_or(WebError::MissingField("title"))?;
    let description = form
        .description
        .ok_or(WebError::MissingField("description"))?;

    let task = Task::create(
        &state.db,
        CreateTask {
            owner_id: user.id,
            title,
            description,
        },
    )
    .await?;
    tracing::debug!(task_id = %task.id, owner_id = %user.id, "Created task");

    Ok(Redirect::to("/"))
}

/// Shows the edit form pre-filled with the task
///
/// A task that does not exist — or belongs to someone else — renders the
/// explicit not-found page rather than leaking or crashing.
pub async fn show_edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> WebResult<Html<String>> {
    let task = Task::find_by_id_and_owner(&state.db, task_id, user.id)
        .await?
        .ok_or(WebError::NotFound)?;

    Ok(Html(views::edit_task_page(&user.username, &task)))
}

/// Applies an edit to the task
///
/// The update is scoped by owner in the store; a mismatched owner affects
/// zero rows and the handler still redirects — intentional no-op, not an
/// error.
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
    Form(form): Form<TaskForm>,
) -> WebResult<Redirect> {
    let title = form.title.ok_or(WebError::MissingField("title"))?;
    let description = form
        .description
        .ok_or(WebError::MissingField("description"))?;
    let completed = form.completed.is_some();

    let updated = Task::update_owned(
        &state.db,
        task_id,
        user.id,
        UpdateTask {
            title,
            description,
            completed,
        },
    )
    .await?;

    if updated.is_none() {
        tracing::debug!(task_id = %task_id, owner_id = %user.id, "Update matched no task");
    }

    Ok(Redirect::to("/"))
}

/// Deletes the task
///
/// Idempotent and owner-scoped; deleting a missing or foreign task is a
/// silent no-op.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(task_id): Path<Uuid>,
) -> WebResult<Redirect> {
    let removed = Task::delete_owned(&state.db, task_id, user.id).await?;

    if !removed {
        tracing::debug!(task_id = %task_id, owner_id = %user.id, "Delete matched no task");
    }

    Ok(Redirect::to("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_form_checkbox_semantics() {
        // Browsers send the field only when checked; any value means true.
        let checked: TaskForm = serde_urlencoded_from("title=a&description=b&completed=on");
        assert!(checked.completed.is_some());

        let unchecked: TaskForm = serde_urlencoded_from("title=a&description=b");
        assert!(unchecked.completed.is_none());
    }

    #[test]
    fn test_task_form_missing_vs_empty_fields() {
        let empty: TaskForm = serde_urlencoded_from("title=&description=");
        assert_eq!(empty.title.as_deref(), Some(""));
        assert_eq!(empty.description.as_deref(), Some(""));

        let missing: TaskForm = serde_urlencoded_from("");
        assert!(missing.title.is_none());
        assert!(missing.description.is_none());
    }

    fn serde_urlencoded_from(query: &str) -> TaskForm {
        serde_urlencoded::from_str(query).expect("form should deserialize")
    }
}
