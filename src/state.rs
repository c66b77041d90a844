use crate::mail::MailRelay;
use crate::store::PostStore;
use std::sync::Arc;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

/// Everything a handler may touch, built once in `main` and shared read-only.
pub struct State {
    pub store: PostStore,
    pub relay: Box<dyn MailRelay>,
    secret_key: String,
}

impl State {
    pub fn new(store: PostStore, relay: impl MailRelay, secret_key: String) -> State {
        State {
            store,
            relay: Box::new(relay),
            secret_key,
        }
    }

    pub fn form_token(&self) -> String {
        crate::csrf::issue(&self.secret_key)
    }

    pub fn check_form_token(&self, token: &str) -> bool {
        crate::csrf::verify(&self.secret_key, token)
    }
}
