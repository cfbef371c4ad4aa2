use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use na_core::{
    format_serving_date, AnalysisResult, ArticleDocument, ArticleId, ArticleStore, Error, Result,
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqliteRow};
use sqlx::Row;

use crate::{StorageBackend, StoreConfig};

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS articles (
        id TEXT PRIMARY KEY,
        serving_date TEXT,
        content_col TEXT NOT NULL,
        gpt_result TEXT
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS articles_serving_date ON articles (serving_date)
    "#,
];

fn storage_err(context: &str) -> impl FnOnce(sqlx::Error) -> Error + '_ {
    move |e| Error::Storage(format!("{}: {}", context, e))
}

/// Articles kept in a single SQLite table, JSON columns for nested fields.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn open(uri: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(uri)
            .map_err(storage_err("Invalid SQLite URI"))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(storage_err("Failed to connect to database"))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Storage(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self { pool })
    }

    /// Insert or replace a whole article.
    pub async fn insert(&self, article: &ArticleDocument) -> Result<()> {
        let content_col = serde_json::to_string(&article.content_col)?;
        let gpt_result = article
            .gpt_result
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles (id, serving_date, content_col, gpt_result)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(article.id.key())
        .bind(article.serving_date.map(format_serving_date))
        .bind(content_col)
        .bind(gpt_result)
        .execute(&self.pool)
        .await
        .map_err(storage_err("Failed to store article"))?;

        Ok(())
    }

    fn article_from_row(row: &SqliteRow) -> Result<ArticleDocument> {
        let id: String = row.try_get("id").map_err(storage_err("Bad id column"))?;
        let serving_date: Option<String> =
            row.try_get("serving_date").map_err(storage_err("Bad serving_date column"))?;
        let content_col: String =
            row.try_get("content_col").map_err(storage_err("Bad content_col column"))?;
        let gpt_result: Option<String> =
            row.try_get("gpt_result").map_err(storage_err("Bad gpt_result column"))?;

        Ok(ArticleDocument {
            id: ArticleId::parse(&id)?,
            content_col: serde_json::from_str(&content_col)?,
            serving_date: serving_date
                .as_deref()
                .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()),
            gpt_result: gpt_result.as_deref().map(serde_json::from_str).transpose()?,
        })
    }
}

#[async_trait]
impl StorageBackend for SqliteStore {
    const SCHEMES: &'static [&'static str] = &["sqlite"];

    async fn connect(config: &StoreConfig) -> Result<Self> {
        Self::open(&config.uri).await
    }
}

#[async_trait]
impl ArticleStore for SqliteStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<ArticleDocument>> {
        let row = sqlx::query("SELECT * FROM articles WHERE id = ?")
            .bind(id.key())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_err("Failed to get article"))?;

        row.as_ref().map(Self::article_from_row).transpose()
    }

    async fn find_by_serving_date(&self, date: NaiveDate, limit: usize) -> Result<Vec<ArticleDocument>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM articles
            WHERE serving_date = ?
            ORDER BY rowid
            LIMIT ?
            "#,
        )
        .bind(format_serving_date(date))
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_err("Failed to get articles by serving date"))?;

        rows.iter().map(Self::article_from_row).collect()
    }

    async fn save_analysis(&self, id: &ArticleId, result: &AnalysisResult) -> Result<()> {
        let outcome = sqlx::query("UPDATE articles SET gpt_result = ? WHERE id = ?")
            .bind(serde_json::to_string(result)?)
            .bind(id.key())
            .execute(&self.pool)
            .await
            .map_err(storage_err("Failed to save analysis"))?;

        if outcome.rows_affected() == 0 {
            return Err(Error::NotFound(format!("article {}", id)));
        }
        Ok(())
    }
}
