//! Catalogue management service

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookQuery, CreateBook, NewBook, UpdateBook},
    repository::Repository,
};

use super::non_empty;

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search books with filters; returns the rows and their count
    pub async fn search_books(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let books = self.repository.books.search(query).await?;
        let count = books.len() as i64;
        Ok((books, count))
    }

    /// Get a book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book. Title and author are required; status defaults
    /// to available.
    pub async fn create_book(&self, request: CreateBook) -> AppResult<Book> {
        let (title, author) = match (non_empty(&request.title), non_empty(&request.author)) {
            (Some(title), Some(author)) => (title, author),
            _ => {
                return Err(AppError::Validation(
                    "Title and author are required.".to_string(),
                ))
            }
        };

        let book = NewBook {
            title: title.to_string(),
            author: author.to_string(),
            isbn: request.isbn.clone(),
            category: request.category.clone(),
            description: request.description.clone(),
            status: request.status.unwrap_or_default(),
        };

        self.repository.books.create(&book).await
    }

    /// Partially update a book
    pub async fn update_book(&self, id: i32, request: UpdateBook) -> AppResult<Book> {
        self.repository.books.update(id, &request).await
    }

    /// Delete a book permanently
    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await
    }
}
