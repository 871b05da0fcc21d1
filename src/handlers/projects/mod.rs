use sqlx::PgPool;

use crate::database::models::project::Project;

mod create;
mod delete;
mod get;
mod list;
mod update;
pub mod validation;

pub use create::project_create;
pub use delete::project_delete;
pub use get::project_get;
pub use list::project_list;
pub use update::project_update;

/// Owner scoping lives in the predicate itself: a row that exists but is
/// owned by someone else looks exactly like a row that does not exist.
pub(crate) async fn fetch_owned(
    pool: &PgPool,
    id: i64,
    user_id: i64,
) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
