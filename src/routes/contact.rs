use crate::error::AppError;
use crate::mail::ContactMessage;
use crate::state::SharedState;
use crate::views::ContactView;
use axum::extract;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

const SUCCESS_MESSAGE: &str = "Successfully sent your message";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
}

pub(super) async fn get() -> Html<String> {
    page(&ContactMessage::default(), None, None)
}

/// Relays the message and waits for the relay before answering.
pub(super) async fn post(
    extract::State(state): SharedState,
    Form(form): Form<ContactForm>,
) -> Result<Html<String>, AppError> {
    let message = ContactMessage {
        name: form.name,
        email: form.email,
        phone: form.phone,
        message: form.message,
    };

    if let Err(err) = message.validate() {
        return Ok(page(&message, Some(err.to_string()), None));
    }

    let sender = message.email.clone();
    if let Err(err) = state.relay.send(message.into_mail()).await {
        tracing::error!("Error relaying contact message from {sender:?}: {err}");
        return Err(err.into());
    }
    tracing::info!("Relayed contact message from {sender:?}");

    Ok(page(&ContactMessage::default(), None, Some(SUCCESS_MESSAGE)))
}

fn page(values: &ContactMessage, error: Option<String>, success: Option<&str>) -> Html<String> {
    Html(
        crate::views::contact(&ContactView {
            values,
            error,
            success,
        })
        .into_string(),
    )
}
