use super::form::{page, FormTarget, PostForm};
use crate::error::AppError;
use crate::routes::form::check_token;
use crate::routes::{found, parse_id};
use crate::state::SharedState;
use crate::store::StoreError;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

pub(super) async fn get(
    State(state): SharedState,
    Path(post_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let post_id = parse_id(&post_id)?;
    let post = state.store.get(post_id).await?;

    Ok(page(&state, FormTarget::Edit(post_id), &post.fields(), None))
}

pub(super) async fn post(
    State(state): SharedState,
    Path(post_id): Path<String>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let post_id = parse_id(&post_id)?;
    // a missing post is a 404 even when the submission itself is bad
    state.store.get(post_id).await?;

    let (fields, token) = form.into_parts();
    let target = FormTarget::Edit(post_id);

    if let Err(err) = check_token(&state, &token) {
        return Ok(page(&state, target, &fields, Some(err)).into_response());
    }

    match state.store.update(post_id, fields.clone()).await {
        Ok(post) => {
            tracing::info!("Updated post {post_id} {:?}", post.title);
            Ok(found(&format!("/{post_id}")))
        }
        Err(StoreError::Validation(err)) => {
            Ok(page(&state, target, &fields, Some(err.into())).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
