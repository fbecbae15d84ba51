//! Books repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, NewBook, UpdateBook},
};

/// Build WHERE conditions and bind parameters for a catalogue search.
///
/// Every filter binds its value through a numbered placeholder; raw input
/// never reaches the query text. Filters combine with AND.
fn build_filters(query: &BookQuery) -> (Vec<String>, Vec<String>) {
    let mut conditions = Vec::new();
    let mut params: Vec<String> = Vec::new();

    if let Some(term) = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        params.push(format!("%{}%", term.to_lowercase()));
        conditions.push(format!(
            "(LOWER(title) LIKE ${n} OR LOWER(author) LIKE ${n})",
            n = params.len()
        ));
    }

    if let Some(category) = query.category.as_deref().filter(|s| !s.is_empty()) {
        params.push(category.to_lowercase());
        conditions.push(format!("LOWER(category) = ${}", params.len()));
    }

    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        params.push(status.to_lowercase());
        conditions.push(format!("LOWER(status) = ${}", params.len()));
    }

    (conditions, params)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search books with optional filters, most recently added first
    pub async fn search(&self, query: &BookQuery) -> AppResult<Vec<Book>> {
        let (conditions, params) = build_filters(query);

        let mut sql = String::from(
            "SELECT id, title, author, isbn, category, description, status, created_at FROM books",
        );
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut builder = sqlx::query_as::<_, Book>(&sql);
        for param in &params {
            builder = builder.bind(param);
        }

        let books = builder.fetch_all(&self.pool).await?;
        Ok(books)
    }

    /// Get a single book by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, isbn, category, description, status, created_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Insert a new book and return the stored row
    pub async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let created = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (title, author, isbn, category, description, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, author, isbn, category, description, status, created_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(&book.description)
        .bind(book.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    /// Partially update a book. Absent fields keep their stored value;
    /// provided values are written as-is, empty strings included. The
    /// update and the existence check are one statement, so a concurrent
    /// delete cannot slip between them.
    pub async fn update(&self, id: i32, book: &UpdateBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET
                title = COALESCE($1::text, title),
                author = COALESCE($2::text, author),
                isbn = COALESCE($3::text, isbn),
                category = COALESCE($4::text, category),
                description = COALESCE($5::text, description),
                status = COALESCE($6::text, status)
            WHERE id = $7
            RETURNING id, title, author, isbn, category, description, status, created_at
            "#,
        )
        .bind(book.title.as_deref())
        .bind(book.author.as_deref())
        .bind(book.isbn.as_deref())
        .bind(book.category.as_deref())
        .bind(book.description.as_deref())
        .bind(book.status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))
    }

    /// Delete a book permanently
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query_scalar::<_, i32>("DELETE FROM books WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found.".to_string()))?;

        Ok(())
    }
}
