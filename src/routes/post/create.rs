use super::form::{page, FormTarget, PostForm};
use crate::blog::PostFields;
use crate::error::AppError;
use crate::routes::form::check_token;
use crate::routes::found;
use crate::state::SharedState;
use crate::store::StoreError;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;

pub(super) async fn get(State(state): SharedState) -> Html<String> {
    page(&state, FormTarget::New, &PostFields::default(), None)
}

pub(super) async fn post(
    State(state): SharedState,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let (fields, token) = form.into_parts();

    if let Err(err) = check_token(&state, &token) {
        return Ok(page(&state, FormTarget::New, &fields, Some(err)).into_response());
    }

    match state.store.insert(fields.clone(), crate::blog::today()).await {
        Ok(post) => {
            tracing::info!("Created post {} {:?}", post.id, post.title);
            Ok(found("/"))
        }
        Err(StoreError::Validation(err)) => {
            Ok(page(&state, FormTarget::New, &fields, Some(err.into())).into_response())
        }
        Err(err) => Err(err.into()),
    }
}
