//! SQLite storage for the finance tracker.
//!
//! A thin typed layer over sqlx: one `DbConnection` shared by all services,
//! schema created idempotently at startup, and per-table query methods.

use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::domain::models::{Category, Session, Transaction, User};
use shared::TransactionKind;

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

fn kind_to_str(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

fn kind_from_str(raw: &str) -> TransactionKind {
    match raw {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password: row.get("password"),
        created_at: row.get("created_at"),
    }
}

fn row_to_category(row: &sqlx::sqlite::SqliteRow) -> Category {
    let kind: String = row.get("kind");
    Category {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        kind: kind_from_str(&kind),
    }
}

fn row_to_transaction(row: &sqlx::sqlite::SqliteRow) -> Transaction {
    let kind: String = row.get("kind");
    Transaction {
        id: row.get("id"),
        user_id: row.get("user_id"),
        category_id: row.get("category_id"),
        kind: kind_from_str(&kind),
        amount: row.get("amount"),
        date: row.get("date"),
        description: row.get("description"),
        created_at: row.get("created_at"),
    }
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize a test database with a unique name
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);
        Self::new(&db_url).await
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                UNIQUE(user_id, name)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS transactions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                category_id TEXT NOT NULL REFERENCES categories(id),
                kind TEXT NOT NULL,
                amount TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                user_id TEXT PRIMARY KEY REFERENCES users(id),
                perspective TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    // --- users ---

    pub async fn create_user(&self, user: &User) -> Result<()> {
        sqlx::query("INSERT INTO users (id, username, password, created_at) VALUES (?, ?, ?, ?)")
            .bind(&user.id)
            .bind(&user.username)
            .bind(&user.password)
            .bind(&user.created_at)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| row_to_user(&r)))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| row_to_user(&r)))
    }

    // --- sessions ---

    pub async fn create_session(&self, session: &Session) -> Result<()> {
        sqlx::query("INSERT INTO sessions (token, user_id, created_at) VALUES (?, ?, ?)")
            .bind(&session.token)
            .bind(&session.user_id)
            .bind(&session.created_at)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_session(&self, token: &str) -> Result<Option<Session>> {
        let row = sqlx::query("SELECT * FROM sessions WHERE token = ?")
            .bind(token)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| Session {
            token: r.get("token"),
            user_id: r.get("user_id"),
            created_at: r.get("created_at"),
        }))
    }

    pub async fn delete_session(&self, token: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- categories ---

    pub async fn create_category(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categories (id, user_id, name, kind) VALUES (?, ?, ?, ?)")
            .bind(&category.id)
            .bind(&category.user_id)
            .bind(&category.name)
            .bind(kind_to_str(category.kind))
            .execute(&*self.pool)
            .await?;
        Ok(())
    }

    pub async fn get_category(&self, user_id: &str, category_id: &str) -> Result<Option<Category>> {
        let row = sqlx::query("SELECT * FROM categories WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(category_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| row_to_category(&r)))
    }

    pub async fn category_name_exists(&self, user_id: &str, name: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM categories WHERE user_id = ? AND name = ?")
            .bind(user_id)
            .bind(name)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn list_categories(&self, user_id: &str) -> Result<Vec<Category>> {
        let rows = sqlx::query("SELECT * FROM categories WHERE user_id = ? ORDER BY name")
            .bind(user_id)
            .fetch_all(&*self.pool)
            .await?;
        Ok(rows.iter().map(row_to_category).collect())
    }

    pub async fn delete_category(&self, user_id: &str, category_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(category_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count_category_transactions(
        &self,
        user_id: &str,
        category_id: &str,
    ) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS n FROM transactions WHERE user_id = ? AND category_id = ?",
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_one(&*self.pool)
        .await?;
        Ok(row.get("n"))
    }

    // --- transactions ---

    pub async fn store_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, user_id, category_id, kind, amount, date, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&transaction.id)
        .bind(&transaction.user_id)
        .bind(&transaction.category_id)
        .bind(kind_to_str(transaction.kind))
        .bind(&transaction.amount)
        .bind(&transaction.date)
        .bind(&transaction.description)
        .bind(&transaction.created_at)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn get_transaction(
        &self,
        user_id: &str,
        transaction_id: &str,
    ) -> Result<Option<Transaction>> {
        let row = sqlx::query("SELECT * FROM transactions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(transaction_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| row_to_transaction(&r)))
    }

    /// List transactions newest first, optionally filtered to a date range
    /// and starting strictly after the cursor transaction.
    pub async fn list_transactions(
        &self,
        user_id: &str,
        limit: u32,
        after: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Vec<Transaction>> {
        let cursor = match after {
            Some(id) => self.get_transaction(user_id, id).await?,
            None => None,
        };

        let mut sql = String::from("SELECT * FROM transactions WHERE user_id = ?");
        if start_date.is_some() {
            sql.push_str(" AND date >= ?");
        }
        if end_date.is_some() {
            sql.push_str(" AND date <= ?");
        }
        if cursor.is_some() {
            sql.push_str(" AND (date < ? OR (date = ? AND created_at < ?))");
        }
        sql.push_str(" ORDER BY date DESC, created_at DESC LIMIT ?");

        let mut query = sqlx::query(&sql).bind(user_id);
        if let Some(start) = start_date {
            query = query.bind(start);
        }
        if let Some(end) = end_date {
            query = query.bind(end);
        }
        if let Some(cursor) = &cursor {
            query = query
                .bind(&cursor.date)
                .bind(&cursor.date)
                .bind(&cursor.created_at);
        }
        let rows = query.bind(limit).fetch_all(&*self.pool).await?;
        Ok(rows.iter().map(row_to_transaction).collect())
    }

    /// All of a user's transactions in chronological order (oldest first).
    pub async fn list_transactions_chronological(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query(
            "SELECT * FROM transactions WHERE user_id = ? ORDER BY date ASC, created_at ASC",
        )
        .bind(user_id)
        .fetch_all(&*self.pool)
        .await?;
        Ok(rows.iter().map(row_to_transaction).collect())
    }

    pub async fn update_transaction(&self, transaction: &Transaction) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE transactions
            SET category_id = ?, kind = ?, amount = ?, date = ?, description = ?
            WHERE user_id = ? AND id = ?
            "#,
        )
        .bind(&transaction.category_id)
        .bind(kind_to_str(transaction.kind))
        .bind(&transaction.amount)
        .bind(&transaction.date)
        .bind(&transaction.description)
        .bind(&transaction.user_id)
        .bind(&transaction.id)
        .execute(&*self.pool)
        .await?;
        Ok(())
    }

    pub async fn delete_transaction(&self, user_id: &str, transaction_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM transactions WHERE user_id = ? AND id = ?")
            .bind(user_id)
            .bind(transaction_id)
            .execute(&*self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // --- settings ---

    pub async fn get_perspective(&self, user_id: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT perspective FROM settings WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&*self.pool)
            .await?;
        Ok(row.map(|r| r.get("perspective")))
    }

    pub async fn set_perspective(&self, user_id: &str, perspective: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (user_id, perspective) VALUES (?, ?)")
            .bind(user_id)
            .bind(perspective)
            .execute(&*self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test() -> DbConnection {
        DbConnection::init_test()
            .await
            .expect("Failed to create test database")
    }

    fn test_user(id: &str, username: &str) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            password: "secret".to_string(),
            created_at: "2026-03-01T10:00:00+00:00".to_string(),
        }
    }

    fn test_category(id: &str, user_id: &str) -> Category {
        Category {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "Groceries".to_string(),
            kind: TransactionKind::Expense,
        }
    }

    fn test_transaction(id: &str, user_id: &str, date: &str, created_at: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            user_id: user_id.to_string(),
            category_id: "cat-1".to_string(),
            kind: TransactionKind::Expense,
            amount: "10.00".to_string(),
            date: date.to_string(),
            description: "test".to_string(),
            created_at: created_at.to_string(),
        }
    }

    #[tokio::test]
    async fn test_file_backed_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("finance.db").display());
        let db = DbConnection::new(&url).await.unwrap();

        db.create_user(&test_user("u1", "alice")).await.unwrap();
        assert!(db.get_user("u1").await.unwrap().is_some());

        // Reconnecting sees the same data
        let reopened = DbConnection::new(&url).await.unwrap();
        assert!(reopened.get_user("u1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = setup_test().await;
        let user = test_user("u1", "alice");
        db.create_user(&user).await.expect("Failed to create user");

        let by_id = db.get_user("u1").await.unwrap();
        assert_eq!(by_id, Some(user.clone()));
        let by_name = db.get_user_by_username("alice").await.unwrap();
        assert_eq!(by_name, Some(user));
        assert!(db.get_user("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        let duplicate = db.create_user(&test_user("u2", "alice")).await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn test_session_roundtrip() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        let session = Session {
            token: "tok-1".to_string(),
            user_id: "u1".to_string(),
            created_at: "2026-03-01T10:00:00+00:00".to_string(),
        };
        db.create_session(&session).await.unwrap();

        let fetched = db.get_session("tok-1").await.unwrap();
        assert_eq!(fetched, Some(session));

        assert!(db.delete_session("tok-1").await.unwrap());
        assert!(!db.delete_session("tok-1").await.unwrap());
        assert!(db.get_session("tok-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_categories_are_scoped_per_user() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        db.create_user(&test_user("u2", "bob")).await.unwrap();

        let groceries = Category {
            id: "cat-1".to_string(),
            user_id: "u1".to_string(),
            name: "Groceries".to_string(),
            kind: TransactionKind::Expense,
        };
        db.create_category(&groceries).await.unwrap();

        assert_eq!(db.list_categories("u1").await.unwrap().len(), 1);
        assert!(db.list_categories("u2").await.unwrap().is_empty());
        assert!(db.get_category("u2", "cat-1").await.unwrap().is_none());
        assert!(db.category_name_exists("u1", "Groceries").await.unwrap());
        assert!(!db.category_name_exists("u2", "Groceries").await.unwrap());
    }

    #[tokio::test]
    async fn test_transaction_pagination_cursor() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        db.create_category(&test_category("cat-1", "u1")).await.unwrap();

        db.store_transaction(&test_transaction("t1", "u1", "2026-03-01", "2026-03-01T08:00:00+00:00"))
            .await
            .unwrap();
        db.store_transaction(&test_transaction("t2", "u1", "2026-03-02", "2026-03-02T08:00:00+00:00"))
            .await
            .unwrap();
        db.store_transaction(&test_transaction("t3", "u1", "2026-03-03", "2026-03-03T08:00:00+00:00"))
            .await
            .unwrap();

        let first_page = db.list_transactions("u1", 2, None, None, None).await.unwrap();
        assert_eq!(first_page.len(), 2);
        assert_eq!(first_page[0].id, "t3");
        assert_eq!(first_page[1].id, "t2");

        let second_page = db
            .list_transactions("u1", 2, Some("t2"), None, None)
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);
        assert_eq!(second_page[0].id, "t1");
    }

    #[tokio::test]
    async fn test_transaction_date_range_filter() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        db.create_category(&test_category("cat-1", "u1")).await.unwrap();
        for (id, date) in [("t1", "2026-01-15"), ("t2", "2026-02-15"), ("t3", "2026-03-15")] {
            db.store_transaction(&test_transaction(id, "u1", date, "2026-03-01T08:00:00+00:00"))
                .await
                .unwrap();
        }

        let february = db
            .list_transactions("u1", 50, None, Some("2026-02-01"), Some("2026-02-28"))
            .await
            .unwrap();
        assert_eq!(february.len(), 1);
        assert_eq!(february[0].id, "t2");
    }

    #[tokio::test]
    async fn test_update_and_delete_transaction() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();
        db.create_category(&test_category("cat-1", "u1")).await.unwrap();
        let mut transaction =
            test_transaction("t1", "u1", "2026-03-01", "2026-03-01T08:00:00+00:00");
        db.store_transaction(&transaction).await.unwrap();

        transaction.amount = "25.00".to_string();
        transaction.description = "updated".to_string();
        db.update_transaction(&transaction).await.unwrap();

        let fetched = db.get_transaction("u1", "t1").await.unwrap().unwrap();
        assert_eq!(fetched.amount, "25.00");
        assert_eq!(fetched.description, "updated");

        assert!(db.delete_transaction("u1", "t1").await.unwrap());
        assert!(!db.delete_transaction("u1", "t1").await.unwrap());
    }

    #[tokio::test]
    async fn test_perspective_storage() {
        let db = setup_test().await;
        db.create_user(&test_user("u1", "alice")).await.unwrap();

        assert!(db.get_perspective("u1").await.unwrap().is_none());
        db.set_perspective("u1", "optimistic").await.unwrap();
        assert_eq!(
            db.get_perspective("u1").await.unwrap().as_deref(),
            Some("optimistic")
        );
        db.set_perspective("u1", "pessimistic").await.unwrap();
        assert_eq!(
            db.get_perspective("u1").await.unwrap().as_deref(),
            Some("pessimistic")
        );
    }
}
