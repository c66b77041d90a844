use crate::error::AppError;
use crate::routes::parse_id;
use crate::state::SharedState;
use axum::extract::{Path, State};
use axum::response::Html;

pub(super) async fn get(
    State(state): SharedState,
    Path(post_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let post_id = parse_id(&post_id)?;
    let post = state.store.get(post_id).await?;

    let body = post.body.clone();
    let body_html = match tokio::task::spawn_blocking(move || crate::views::render_body(&body)).await
    {
        Ok(it) => it,
        Err(err) => {
            return Err(AppError::Internal(format!(
                "Couldn't render body for post {post_id}: {err}"
            )))
        }
    };

    Ok(Html(crate::views::post(&post, &body_html).into_string()))
}
