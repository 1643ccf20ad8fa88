// ABOUTME: SQLite implementation of the storage gateway
// ABOUTME: Boards, items and item_tags tables with cascading deletes

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{QueryBuilder, Row, Sqlite};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use taskdeck_core::{Board, Item};
use tracing::{debug, info};

use crate::{StorageError, StorageGateway, StorageResult};

const ITEM_COLUMNS: &str = "id, board_id, title, description, completed, created_at";

/// SQLite implementation of StorageGateway
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) a database file
    pub async fn connect(path: &Path) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
            }
        }

        debug!("Connecting to database: {}", path.display());

        // Pragmas set here apply to every pooled connection
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Self { pool })
    }

    /// Private in-memory database on a single connection
    pub async fn in_memory() -> StorageResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(StorageError::Sqlx)?
            .foreign_keys(true);

        // The database lives as long as its only connection
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run embedded migrations
    pub async fn initialize(&self) -> StorageResult<()> {
        info!("Initializing SQLite storage with migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        info!("SQLite storage initialized successfully");
        Ok(())
    }

    fn row_to_board(row: &SqliteRow) -> StorageResult<Board> {
        Ok(Board {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    fn row_to_item(row: &SqliteRow) -> StorageResult<Item> {
        Ok(Item {
            id: row.try_get("id")?,
            board_id: row.try_get("board_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            completed: row.try_get::<bool, _>("completed")?,
            tags: Vec::new(),
            created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        })
    }

    /// Run an item query with one bound parameter and attach tags to each row
    async fn fetch_items(&self, sql: &str, param: &str) -> StorageResult<Vec<Item>> {
        let rows = sqlx::query(sql)
            .bind(param)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut items = rows
            .iter()
            .map(Self::row_to_item)
            .collect::<Result<Vec<_>, _>>()?;

        self.attach_tags(&mut items).await?;
        Ok(items)
    }

    async fn attach_tags(&self, items: &mut [Item]) -> StorageResult<()> {
        if items.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT item_id, tag FROM item_tags WHERE item_id IN (");
        let mut separated = builder.separated(", ");
        for item in items.iter() {
            separated.push_bind(item.id.clone());
        }
        separated.push_unseparated(") ORDER BY item_id, position");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        let mut by_item: HashMap<String, Vec<String>> = HashMap::new();
        for row in rows {
            let item_id: String = row.try_get("item_id")?;
            let tag: String = row.try_get("tag")?;
            by_item.entry(item_id).or_default().push(tag);
        }

        for item in items.iter_mut() {
            if let Some(tags) = by_item.remove(&item.id) {
                item.tags = tags;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for SqliteStorage {
    async fn create_board(&self, name: &str) -> StorageResult<Board> {
        let board_id = format!("board-{}", nanoid::nanoid!());
        let now = Utc::now();

        debug!("Creating board: {} (name: {})", board_id, name);

        sqlx::query("INSERT INTO boards (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&board_id)
            .bind(name)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        self.get_board(&board_id).await
    }

    async fn get_board(&self, id: &str) -> StorageResult<Board> {
        debug!("Fetching board: {}", id);

        let row = sqlx::query("SELECT id, name, created_at FROM boards WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        match row {
            Some(row) => Self::row_to_board(&row),
            None => Err(StorageError::board_not_found(id)),
        }
    }

    async fn list_boards(&self) -> StorageResult<Vec<Board>> {
        debug!("Fetching boards");

        let rows = sqlx::query("SELECT id, name, created_at FROM boards ORDER BY rowid")
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        rows.iter().map(Self::row_to_board).collect()
    }

    async fn update_board(&self, id: &str, name: &str) -> StorageResult<Board> {
        debug!("Updating board: {} (name: {})", id, name);

        let result = sqlx::query("UPDATE boards SET name = ? WHERE id = ?")
            .bind(name)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::board_not_found(id));
        }

        self.get_board(id).await
    }

    async fn delete_board(&self, id: &str) -> StorageResult<()> {
        debug!("Deleting board: {}", id);

        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::board_not_found(id));
        }
        Ok(())
    }

    async fn create_item(
        &self,
        board_id: &str,
        title: &str,
        description: &str,
    ) -> StorageResult<Item> {
        // Surface a missing board as NotFound rather than a constraint failure
        self.get_board(board_id).await?;

        let item_id = format!("item-{}", nanoid::nanoid!());
        let now = Utc::now();

        debug!("Creating item: {} (board: {})", item_id, board_id);

        sqlx::query(
            r#"
            INSERT INTO items (id, board_id, title, description, completed, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            "#,
        )
        .bind(&item_id)
        .bind(board_id)
        .bind(title)
        .bind(description)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(StorageError::Sqlx)?;

        self.get_item(&item_id).await
    }

    async fn get_item(&self, id: &str) -> StorageResult<Item> {
        debug!("Fetching item: {}", id);

        let sql = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
        let mut items = self.fetch_items(&sql, id).await?;

        items.pop().ok_or_else(|| StorageError::item_not_found(id))
    }

    async fn list_items_by_board(&self, board_id: &str) -> StorageResult<Vec<Item>> {
        debug!("Fetching items for board: {}", board_id);

        let sql = format!(
            "SELECT {} FROM items WHERE board_id = ? ORDER BY rowid",
            ITEM_COLUMNS
        );
        self.fetch_items(&sql, board_id).await
    }

    async fn update_item(
        &self,
        id: &str,
        title: &str,
        description: &str,
        completed: bool,
        tags: &[String],
    ) -> StorageResult<Item> {
        debug!("Updating item: {} ({} tags)", id, tags.len());

        let mut tx = self.pool.begin().await.map_err(StorageError::Sqlx)?;

        let result =
            sqlx::query("UPDATE items SET title = ?, description = ?, completed = ? WHERE id = ?")
                .bind(title)
                .bind(description)
                .bind(completed)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;

        // Dropping the transaction rolls it back
        if result.rows_affected() == 0 {
            return Err(StorageError::item_not_found(id));
        }

        sqlx::query("DELETE FROM item_tags WHERE item_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(StorageError::Sqlx)?;

        for (position, tag) in tags.iter().enumerate() {
            sqlx::query("INSERT OR IGNORE INTO item_tags (item_id, tag, position) VALUES (?, ?, ?)")
                .bind(id)
                .bind(tag)
                .bind(position as i64)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        tx.commit().await.map_err(StorageError::Sqlx)?;

        self.get_item(id).await
    }

    async fn delete_item(&self, id: &str) -> StorageResult<()> {
        debug!("Deleting item: {}", id);

        let result = sqlx::query("DELETE FROM items WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::item_not_found(id));
        }
        Ok(())
    }

    async fn list_distinct_tags(&self) -> StorageResult<Vec<String>> {
        debug!("Fetching distinct tags");

        let tags =
            sqlx::query_scalar::<_, String>("SELECT DISTINCT tag FROM item_tags ORDER BY tag")
                .fetch_all(&self.pool)
                .await
                .map_err(StorageError::Sqlx)?;

        Ok(tags)
    }

    async fn list_items_by_tag(&self, tag: &str) -> StorageResult<Vec<Item>> {
        debug!("Fetching items for tag: {}", tag);

        let sql = format!(
            "SELECT {} FROM items \
             WHERE id IN (SELECT item_id FROM item_tags WHERE tag = ?) ORDER BY rowid",
            ITEM_COLUMNS
        );
        self.fetch_items(&sql, tag).await
    }

    async fn count_items_by_tag(&self, tag: &str) -> StorageResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM item_tags WHERE tag = ?")
            .bind(tag)
            .fetch_one(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        usize::try_from(count)
            .map_err(|_| StorageError::Database(format!("invalid count {}", count)))
    }

    async fn delete_tag_association(&self, tag: &str) -> StorageResult<()> {
        debug!("Removing tag from all items: {}", tag);

        sqlx::query("DELETE FROM item_tags WHERE tag = ?")
            .bind(tag)
            .execute(&self.pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(())
    }
}
