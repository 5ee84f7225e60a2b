//! SQLite-backed poll store.
//!
//! One pool serves both [`PollRepo`] and [`VoteRepo`]. Option vote counts are
//! never stored; they are counted from `votes` on every read, so a fetch
//! always reflects the votes committed so far. Ids are stored as UUID text and
//! timestamps as RFC 3339 text.

use std::fmt::Display;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use ballotbox_domain::{
    OptionText, Poll, PollDescription, PollId, PollOption, PollOptionId, PollTitle, UserId, Vote,
};

use crate::infrastructure::ports::{PollRepo, RecordVoteError, RepoError, VoteRepo};

const SCHEMA: [&str; 5] = [
    r#"
    CREATE TABLE IF NOT EXISTS polls (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        creator_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        expires_at TEXT,
        is_active INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS poll_options (
        id TEXT PRIMARY KEY,
        poll_id TEXT NOT NULL REFERENCES polls(id) ON DELETE CASCADE,
        position INTEGER NOT NULL,
        text TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS votes (
        id TEXT PRIMARY KEY,
        poll_id TEXT NOT NULL REFERENCES polls(id) ON DELETE CASCADE,
        option_id TEXT NOT NULL REFERENCES poll_options(id) ON DELETE CASCADE,
        user_id TEXT NOT NULL,
        created_at TEXT NOT NULL,
        UNIQUE (poll_id, user_id)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_poll_options_poll ON poll_options(poll_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_votes_option ON votes(option_id)",
];

/// Writers take the write lock up front so they queue on the busy timeout
/// instead of failing a read-to-write lock upgrade.
const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

const POLL_COLUMNS: &str =
    "id, title, description, creator_id, created_at, expires_at, is_active";

/// SQLite implementation of the poll store.
#[derive(Clone)]
pub struct SqlitePollStore {
    pool: SqlitePool,
}

impl SqlitePollStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub async fn new(db_path: &str) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, RepoError> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::database("migrate", e))?;
        }

        Ok(Self { pool })
    }

    async fn load_options(&self, poll_id: &str) -> Result<Vec<PollOption>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT o.id, o.text, COUNT(v.id) AS vote_count
            FROM poll_options o
            LEFT JOIN votes v ON v.option_id = o.id
            WHERE o.poll_id = ?
            GROUP BY o.id, o.text, o.position
            ORDER BY o.position
            "#,
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("load_options", e))?;

        rows.iter().map(row_to_option).collect()
    }

    async fn hydrate(&self, rows: Vec<SqliteRow>) -> Result<Vec<Poll>, RepoError> {
        let mut polls = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = column(row, "id")?;
            let options = self.load_options(&id).await?;
            polls.push(row_to_poll(row)?.with_options(options));
        }
        Ok(polls)
    }
}

#[async_trait]
impl PollRepo for SqlitePollStore {
    async fn get(&self, id: PollId) -> Result<Option<Poll>, RepoError> {
        let row = sqlx::query(&format!("SELECT {POLL_COLUMNS} FROM polls WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_poll", e))?;

        match row {
            Some(row) => Ok(self.hydrate(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn save(&self, poll: &Poll) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin_with(BEGIN_WRITE)
            .await
            .map_err(|e| RepoError::database("save_poll", e))?;

        sqlx::query(
            r#"
            INSERT INTO polls (id, title, description, creator_id, created_at, expires_at, is_active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(poll.id().to_string())
        .bind(poll.title().as_str())
        .bind(poll.description().map(|d| d.as_str().to_string()))
        .bind(poll.creator_id().to_string())
        .bind(poll.created_at().to_rfc3339())
        .bind(poll.expires_at().map(|dt| dt.to_rfc3339()))
        .bind(poll.is_active())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepoError::database("save_poll", e))?;

        for (position, option) in poll.options().iter().enumerate() {
            sqlx::query(
                "INSERT INTO poll_options (id, poll_id, position, text) VALUES (?, ?, ?, ?)",
            )
            .bind(option.id.to_string())
            .bind(poll.id().to_string())
            .bind(position as i64)
            .bind(option.text.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepoError::database("save_poll_option", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("save_poll", e))?;

        tracing::debug!(poll_id = %poll.id(), options = poll.options().len(), "Saved poll");
        Ok(())
    }

    async fn list_active(&self) -> Result<Vec<Poll>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {POLL_COLUMNS} FROM polls WHERE is_active = 1 ORDER BY created_at DESC, rowid DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_active_polls", e))?;

        self.hydrate(rows).await
    }

    async fn list_by_creator(&self, creator_id: UserId) -> Result<Vec<Poll>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {POLL_COLUMNS} FROM polls WHERE creator_id = ? ORDER BY created_at DESC, rowid DESC"
        ))
        .bind(creator_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_polls_by_creator", e))?;

        self.hydrate(rows).await
    }

    async fn set_active(&self, id: PollId, is_active: bool) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE polls SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("set_poll_active", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Poll", id));
        }
        Ok(())
    }
}

#[async_trait]
impl VoteRepo for SqlitePollStore {
    async fn get_viewer_vote(
        &self,
        poll_id: PollId,
        user_id: UserId,
    ) -> Result<Option<PollOptionId>, RepoError> {
        let row = sqlx::query("SELECT option_id FROM votes WHERE poll_id = ? AND user_id = ?")
            .bind(poll_id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_viewer_vote", e))?;

        row.map(|row| column::<String>(&row, "option_id").and_then(|raw| parse_id(&raw)))
            .transpose()
    }

    async fn record(&self, vote: &Vote) -> Result<(), RecordVoteError> {
        let mut tx = self
            .pool
            .begin_with(BEGIN_WRITE)
            .await
            .map_err(|e| RepoError::database("record_vote", e))?;

        let option = sqlx::query("SELECT 1 FROM poll_options WHERE id = ? AND poll_id = ?")
            .bind(vote.option_id.to_string())
            .bind(vote.poll_id.to_string())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepoError::database("record_vote", e))?;
        if option.is_none() {
            return Err(RecordVoteError::OptionNotInPoll);
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO votes (id, poll_id, option_id, user_id, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(vote.id.to_string())
        .bind(vote.poll_id.to_string())
        .bind(vote.option_id.to_string())
        .bind(vote.user_id.to_string())
        .bind(vote.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {}
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(RecordVoteError::AlreadyVoted);
            }
            Err(e) => return Err(RepoError::database("record_vote", e).into()),
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("record_vote", e))?;

        tracing::debug!(poll_id = %vote.poll_id, option_id = %vote.option_id, "Recorded vote");
        Ok(())
    }
}

fn row_to_poll(row: &SqliteRow) -> Result<Poll, RepoError> {
    let id: PollId = parse_id(&column::<String>(row, "id")?)?;
    let title = PollTitle::new(column::<String>(row, "title")?).map_err(RepoError::serialization)?;
    let description = column::<Option<String>>(row, "description")?
        .map(PollDescription::new)
        .transpose()
        .map_err(RepoError::serialization)?;
    let creator_id: UserId = parse_id(&column::<String>(row, "creator_id")?)?;
    let created_at = parse_time(&column::<String>(row, "created_at")?)?;
    let expires_at = column::<Option<String>>(row, "expires_at")?
        .as_deref()
        .map(parse_time)
        .transpose()?;
    let is_active: bool = column(row, "is_active")?;

    Ok(Poll::new(title, creator_id, created_at)
        .with_id(id)
        .with_description(description)
        .with_expires_at(expires_at)
        .with_active(is_active))
}

fn row_to_option(row: &SqliteRow) -> Result<PollOption, RepoError> {
    let id: PollOptionId = parse_id(&column::<String>(row, "id")?)?;
    let text = OptionText::new(column::<String>(row, "text")?).map_err(RepoError::serialization)?;
    let count: i64 = column(row, "vote_count")?;
    let count = u32::try_from(count)
        .map_err(|_| RepoError::serialization(format!("vote count out of range: {count}")))?;

    Ok(PollOption::new(text).with_id(id).with_vote_count(count))
}

fn column<'r, T>(row: &'r SqliteRow, name: &'static str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepoError::serialization(format!("{name}: {e}")))
}

fn parse_id<T>(raw: &str) -> Result<T, RepoError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(RepoError::serialization)
}

fn parse_time(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("timestamp '{raw}': {e}")))
}
