use rand::{RngCore, SeedableRng};

pub type PostID = i64;

pub const SITE_NAME: &str = "Grit Blog";
pub const NONCE_BYTES: usize = 16;
pub const SECRET_BYTES: usize = 32;

pub const FORM_TOKEN_TTL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: PostID,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub author: String,
    pub img_url: String,
    // fixed at creation, never recomputed
    pub date: String,
}

/// The editable part of a post. Everything except `id` and `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("a post titled {0:?} already exists")]
    DuplicateTitle(String),
}

impl PostFields {
    /// Checks the required fields in form order, reporting the first blank one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&[
            ("Title", self.title.as_str()),
            ("Subtitle", self.subtitle.as_str()),
            ("Author", self.author.as_str()),
            ("Image URL", self.img_url.as_str()),
            ("Body", self.body.as_str()),
        ])
    }
}

/// Fails with the name of the first field that is empty or only whitespace.
pub fn require(fields: &[(&'static str, &str)]) -> Result<(), ValidationError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ValidationError::MissingField(*name)),
        None => Ok(()),
    }
}

impl Post {
    pub fn fields(&self) -> PostFields {
        PostFields {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
            img_url: self.img_url.clone(),
            body: self.body.clone(),
        }
    }
}

/// Formats a creation date the way posts display it, e.g. `June 05, 2024`.
pub fn creation_date(date: chrono::NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn today() -> String {
    creation_date(chrono::Local::now().date_naive())
}

pub fn get_random_hex_string<const LEN: usize>() -> String {
    let mut bytes = [0u8; LEN];
    rand_chacha::ChaCha20Rng::from_entropy().fill_bytes(&mut bytes);

    hex::encode(bytes)
}
