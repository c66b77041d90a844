use crate::blog::{PostFields, PostID};
use crate::routes::form::FormError;
use crate::state::State;
use crate::views::PostFormView;
use axum::response::Html;
use serde::Deserialize;

/// Field names match the inputs rendered by `views::post_form`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct PostForm {
    title: String,
    sub_title: String,
    author: String,
    image_url: String,
    body: String,
    csrf_token: String,
}

impl PostForm {
    /// Returns the post fields and the form token.
    pub(super) fn into_parts(self) -> (PostFields, String) {
        let fields = PostFields {
            title: self.title,
            subtitle: self.sub_title,
            author: self.author,
            img_url: self.image_url,
            body: self.body,
        };
        (fields, self.csrf_token)
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) enum FormTarget {
    New,
    Edit(PostID),
}

/// Renders the authoring form with a fresh token, keeping whatever was entered.
pub(super) fn page(
    state: &State,
    target: FormTarget,
    fields: &PostFields,
    error: Option<FormError>,
) -> Html<String> {
    let (heading, action) = match target {
        FormTarget::New => ("New Post", String::from("/new-post")),
        FormTarget::Edit(post_id) => ("Edit Post", format!("/edit-post/{post_id}")),
    };

    Html(
        crate::views::post_form(&PostFormView {
            heading,
            action,
            fields,
            token: state.form_token(),
            error: error.map(|err| err.to_string()),
        })
        .into_string(),
    )
}
