//! SQLite-backed post storage.
//!
//! Every operation opens its own connection on a blocking thread, so the
//! store is cheap to clone and needs no locking of its own. Atomicity and
//! title uniqueness are left to SQLite.

use crate::blog::{Post, PostFields, PostID, ValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS blog_posts (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    title    VARCHAR(250) NOT NULL UNIQUE,
    subtitle VARCHAR(250) NOT NULL,
    date     VARCHAR(250) NOT NULL,
    body     TEXT NOT NULL,
    author   VARCHAR(250) NOT NULL,
    img_url  VARCHAR(250) NOT NULL
);
";

const SELECT_POST: &str = "SELECT id, title, subtitle, date, body, author, img_url FROM blog_posts";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct PostStore {
    path: Arc<PathBuf>,
}

impl PostStore {
    /// Does not touch the database; call [`PostStore::migrate`] before serving.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the schema if it is missing. Safe to run on every startup.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        self.run(|conn| {
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
                row.get::<_, String>(0)
            })?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await
    }

    /// All posts in insertion order.
    pub async fn list(&self) -> Result<Vec<Post>, StoreError> {
        self.run(|conn| {
            let mut statement = conn.prepare(&format!("{SELECT_POST} ORDER BY id"))?;
            let posts = statement
                .query_map([], post_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(posts)
        })
        .await
    }

    pub async fn get(&self, id: PostID) -> Result<Post, StoreError> {
        self.run(move |conn| select_post(conn, id)).await
    }

    pub async fn insert(&self, fields: PostFields, date: String) -> Result<Post, StoreError> {
        fields.validate()?;

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO blog_posts (title, subtitle, date, body, author, img_url)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    fields.title,
                    fields.subtitle,
                    date,
                    fields.body,
                    fields.author,
                    fields.img_url
                ],
            )
            .map_err(|err| title_conflict(err, &fields.title))?;

            Ok(Post {
                id: conn.last_insert_rowid(),
                title: fields.title,
                subtitle: fields.subtitle,
                body: fields.body,
                author: fields.author,
                img_url: fields.img_url,
                date,
            })
        })
        .await
    }

    /// Replaces the editable fields of a post. The creation date is kept.
    pub async fn update(&self, id: PostID, fields: PostFields) -> Result<Post, StoreError> {
        fields.validate()?;

        self.run(move |conn| {
            let tx = conn.transaction()?;
            let changed = tx
                .execute(
                    "UPDATE blog_posts
                     SET title = ?1, subtitle = ?2, body = ?3, author = ?4, img_url = ?5
                     WHERE id = ?6",
                    params![
                        fields.title,
                        fields.subtitle,
                        fields.body,
                        fields.author,
                        fields.img_url,
                        id
                    ],
                )
                .map_err(|err| title_conflict(err, &fields.title))?;
            if changed == 0 {
                return Err(StoreError::NotFound);
            }

            let post = select_post(&tx, id)?;
            tx.commit()?;
            Ok(post)
        })
        .await
    }

    /// Deleting an id that is already gone reports `NotFound`.
    pub async fn delete(&self, id: PostID) -> Result<(), StoreError> {
        self.run(move |conn| {
            match conn.execute("DELETE FROM blog_posts WHERE id = ?1", [id])? {
                0 => Err(StoreError::NotFound),
                _ => Ok(()),
            }
        })
        .await
    }

    async fn run<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<T, StoreError> {
            let mut conn = Connection::open(path.as_path())?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            op(&mut conn)
        })
        .await?
    }
}

fn select_post(conn: &Connection, id: PostID) -> Result<Post, StoreError> {
    conn.query_row(&format!("{SELECT_POST} WHERE id = ?1"), [id], post_from_row)
        .optional()?
        .ok_or(StoreError::NotFound)
}

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get("id")?,
        title: row.get("title")?,
        subtitle: row.get("subtitle")?,
        date: row.get("date")?,
        body: row.get("body")?,
        author: row.get("author")?,
        img_url: row.get("img_url")?,
    })
}

fn title_conflict(err: rusqlite::Error, title: &str) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            ValidationError::DuplicateTitle(title.to_owned()).into()
        }
        err => err.into(),
    }
}
