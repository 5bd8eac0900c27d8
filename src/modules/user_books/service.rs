//! Every statement here is scoped by `account_id`, so a record owned by
//! another account behaves exactly like a missing one.

use bookflow_core::AppError;
use bookflow_models::user_books::{CreateUserBookDto, UpdateUserBookDto, UserBook};
use bookflow_models::{AccountId, UserBookId};
use sqlx::PgPool;
use tracing::{info, instrument};

const USER_BOOK_COLUMNS: &str = "id, account_id, title, author, genre, published_date, \
                                 image, description, created_at, updated_at";

pub struct UserBookService;

fn not_found() -> AppError {
    AppError::not_found("Book not found")
}

impl UserBookService {
    #[instrument(skip(db, dto))]
    pub async fn create_user_book(
        db: &PgPool,
        account_id: AccountId,
        dto: CreateUserBookDto,
    ) -> Result<UserBook, AppError> {
        let book = sqlx::query_as::<_, UserBook>(&format!(
            r#"INSERT INTO user_books
                   (account_id, title, author, genre, published_date, image, description)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {USER_BOOK_COLUMNS}"#
        ))
        .bind(account_id)
        .bind(&dto.title)
        .bind(&dto.author)
        .bind(&dto.genre)
        .bind(dto.published_date)
        .bind(&dto.image)
        .bind(&dto.description)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to add book"))?;

        info!(user_book_id = %book.id, "Book added");
        Ok(book)
    }

    #[instrument(skip(db))]
    pub async fn list_user_books(
        db: &PgPool,
        account_id: AccountId,
    ) -> Result<Vec<UserBook>, AppError> {
        let books = sqlx::query_as::<_, UserBook>(&format!(
            "SELECT {USER_BOOK_COLUMNS} FROM user_books \
             WHERE account_id = $1 ORDER BY created_at, id"
        ))
        .bind(account_id)
        .fetch_all(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to list books"))?;

        Ok(books)
    }

    #[instrument(skip(db))]
    pub async fn get_user_book(
        db: &PgPool,
        account_id: AccountId,
        id: UserBookId,
    ) -> Result<UserBook, AppError> {
        sqlx::query_as::<_, UserBook>(&format!(
            "SELECT {USER_BOOK_COLUMNS} FROM user_books WHERE id = $1 AND account_id = $2"
        ))
        .bind(id)
        .bind(account_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db, dto))]
    pub async fn update_user_book(
        db: &PgPool,
        account_id: AccountId,
        id: UserBookId,
        dto: UpdateUserBookDto,
    ) -> Result<UserBook, AppError> {
        sqlx::query_as::<_, UserBook>(&format!(
            r#"UPDATE user_books SET
                   title = COALESCE($3, title),
                   author = COALESCE($4, author),
                   genre = COALESCE($5, genre),
                   published_date = COALESCE($6, published_date),
                   image = COALESCE($7, image),
                   description = COALESCE($8, description),
                   updated_at = NOW()
               WHERE id = $1 AND account_id = $2
               RETURNING {USER_BOOK_COLUMNS}"#
        ))
        .bind(id)
        .bind(account_id)
        .bind(&dto.title)
        .bind(&dto.author)
        .bind(&dto.genre)
        .bind(dto.published_date)
        .bind(&dto.image)
        .bind(&dto.description)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_user_book(
        db: &PgPool,
        account_id: AccountId,
        id: UserBookId,
    ) -> Result<UserBook, AppError> {
        let deleted = sqlx::query_as::<_, UserBook>(&format!(
            "DELETE FROM user_books WHERE id = $1 AND account_id = $2 RETURNING {USER_BOOK_COLUMNS}"
        ))
        .bind(id)
        .bind(account_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)?;

        info!(user_book_id = %id, "Book deleted");
        Ok(deleted)
    }
}
