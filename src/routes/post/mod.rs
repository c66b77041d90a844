use crate::state::NestedRouter;
use axum::routing::get;

mod create;
mod delete;
mod edit;
mod form;
mod show;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/:id", get(show::get))
        .route("/new-post", get(create::get).post(create::post))
        .route("/edit-post/:id", get(edit::get).post(edit::post))
        .route("/delete/:id", get(delete::get))
}
