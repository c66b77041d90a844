use crate::blog::PostID;
use crate::error::AppError;
use crate::routes::found;
use crate::state::SharedState;
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::response::Response;

/// Deletes without confirmation and always sends the visitor back home.
pub(super) async fn get(
    State(state): SharedState,
    Path(post_id): Path<String>,
) -> Result<Response, AppError> {
    let Ok(post_id) = post_id.parse::<PostID>() else {
        tracing::warn!("Ignoring delete for invalid post id {post_id:?}");
        return Ok(found("/"));
    };

    match state.store.delete(post_id).await {
        Ok(()) => tracing::info!("Deleted post {post_id}"),
        Err(StoreError::NotFound) => tracing::warn!("Tried to delete missing post {post_id}"),
        Err(err) => return Err(err.into()),
    }

    Ok(found("/"))
}
