use crate::traits::NewsRepository;
use crate::types::{NewsError, NewsItem, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS news
(guid TEXT PRIMARY KEY NOT NULL, title TEXT, date TEXT, link TEXT)
"#;

pub struct NewsStore {
    db: SqlitePool,
}

impl NewsStore {
    /// Opens (creating if needed) a database file in WAL mode so searches
    /// keep running while an upsert is in flight.
    pub async fn connect(path: &Path) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let db = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await?;

        info!("Opened news database at {}", path.display());
        Ok(Self { db })
    }

    /// A private in-memory database; a single connection keeps it alive.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let db = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Ok(Self { db })
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM news")
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    pub async fn close(&self) {
        self.db.close().await;
    }
}

fn news_item_from_row(row: &SqliteRow) -> Result<NewsItem> {
    Ok(NewsItem {
        guid: row.try_get("guid")?,
        title: row.try_get::<Option<String>, _>("title")?.unwrap_or_default(),
        date: row.try_get::<Option<String>, _>("date")?.unwrap_or_default(),
        link: row.try_get::<Option<String>, _>("link")?.unwrap_or_default(),
    })
}

#[async_trait]
impl NewsRepository for NewsStore {
    async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.db).await?;
        Ok(())
    }

    async fn upsert(&self, items: &[NewsItem]) -> Result<usize> {
        if let Some(position) = items.iter().position(|item| item.guid.is_empty()) {
            return Err(NewsError::EmptyGuid { position });
        }

        // REPLACE rewrites the row, so an edited item moves to the top of
        // the recency order.
        let mut tx = self.db.begin().await?;
        for item in items {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO news (guid, title, date, link)
                VALUES (?1, ?2, ?3, ?4)
                "#,
            )
            .bind(&item.guid)
            .bind(&item.title)
            .bind(&item.date)
            .bind(&item.link)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        debug!("Upserted {} news items", items.len());
        Ok(items.len())
    }

    async fn search(&self, term: &str) -> Result<Vec<NewsItem>> {
        // instr() keeps the match literal and case-sensitive, unlike LIKE.
        let rows = sqlx::query(
            r#"
            SELECT guid, title, date, link FROM news
            WHERE ?1 = '' OR instr(title, ?1) > 0
            ORDER BY rowid DESC
            "#,
        )
        .bind(term)
        .fetch_all(&self.db)
        .await?;

        rows.iter().map(news_item_from_row).collect()
    }
}
