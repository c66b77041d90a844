use crate::blog::ValidationError;
use crate::state::State;

/// Why a submitted form was sent back to the visitor instead of being saved.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FormError {
    #[error("This form has expired, please submit it again")]
    BadToken,
    #[error("{0}")]
    Invalid(#[from] ValidationError),
}

pub(crate) fn check_token(state: &State, token: &str) -> Result<(), FormError> {
    if state.check_form_token(token) {
        Ok(())
    } else {
        Err(FormError::BadToken)
    }
}
