use axum::response::Html;

pub(super) async fn get() -> Html<String> {
    Html(crate::views::about().into_string())
}
