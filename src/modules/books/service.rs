use bookflow_core::AppError;
use bookflow_models::books::{Book, BookFilterParams, CreateBookDto, UpdateBookDto};
use bookflow_models::{AuthorId, BookId, GenreId};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info, instrument};

const BOOK_COLUMNS: &str = "id, title, author_id, genre_id, pages, published_date, \
                            description, image, created_at, updated_at";

const BOOK_INSERT: &str =
    "INSERT INTO books (title, author_id, genre_id, pages, published_date, description, image) ";

pub struct BookService;

impl BookService {
    /// Lists books, optionally filtered by genre and author name.
    ///
    /// A name that matches no genre or author leaves that filter off.
    #[instrument(skip(db))]
    pub async fn list_books(
        db: &PgPool,
        filters: BookFilterParams,
    ) -> Result<Vec<Book>, AppError> {
        let genre_id = match filters.genre_name() {
            Some(name) => Self::genre_id_by_name(db, name).await?,
            None => None,
        };
        let author_id = match filters.author_name() {
            Some(name) => Self::author_id_by_name(db, name).await?,
            None => None,
        };
        let pagination = filters.pagination();

        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {BOOK_COLUMNS} FROM books WHERE TRUE"));
        if let Some(genre_id) = genre_id {
            query.push(" AND genre_id = ").push_bind(genre_id);
        }
        if let Some(author_id) = author_id {
            query.push(" AND author_id = ").push_bind(author_id);
        }
        query
            .push(" ORDER BY created_at, id LIMIT ")
            .push_bind(pagination.limit())
            .push(" OFFSET ")
            .push_bind(pagination.offset());

        let books = query
            .build_query_as::<Book>()
            .fetch_all(db)
            .await
            .map_err(|e| AppError::from(e).context("Failed to list books"))?;

        Ok(books)
    }

    async fn genre_id_by_name(db: &PgPool, name: &str) -> Result<Option<GenreId>, AppError> {
        let id = sqlx::query_scalar::<_, GenreId>("SELECT id FROM genres WHERE name = $1")
            .bind(name)
            .fetch_optional(db)
            .await?;

        if id.is_none() {
            debug!(genre = %name, "Unknown genre, filter ignored");
        }
        Ok(id)
    }

    async fn author_id_by_name(db: &PgPool, name: &str) -> Result<Option<AuthorId>, AppError> {
        let id = sqlx::query_scalar::<_, AuthorId>("SELECT id FROM authors WHERE name = $1")
            .bind(name)
            .fetch_optional(db)
            .await?;

        if id.is_none() {
            debug!(author = %name, "Unknown author, filter ignored");
        }
        Ok(id)
    }

    #[instrument(skip(db))]
    pub async fn get_book(db: &PgPool, id: BookId) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    #[instrument(skip(db, dto))]
    pub async fn create_book(db: &PgPool, dto: CreateBookDto) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(&format!(
            r#"{BOOK_INSERT}
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {BOOK_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(dto.author_id)
        .bind(dto.genre_id)
        .bind(dto.pages)
        .bind(dto.published_date)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_one(db)
        .await
        .map_err(|e| AppError::from(e).context("Failed to create book"))?;

        info!(book_id = %book.id, "Book created");
        Ok(book)
    }

    /// Inserts every book in one statement: all rows are stored or none.
    #[instrument(skip(db, books), fields(count = books.len()))]
    pub async fn create_books(
        db: &PgPool,
        books: Vec<CreateBookDto>,
    ) -> Result<Vec<Book>, AppError> {
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Postgres>::new(BOOK_INSERT);
        query.push_values(books, |mut row, book| {
            row.push_bind(book.title)
                .push_bind(book.author_id)
                .push_bind(book.genre_id)
                .push_bind(book.pages)
                .push_bind(book.published_date)
                .push_bind(book.description)
                .push_bind(book.image);
        });
        query.push(format!(" RETURNING {BOOK_COLUMNS}"));

        let created = query
            .build_query_as::<Book>()
            .fetch_all(db)
            .await
            .map_err(|e| AppError::from(e).context("Failed to create books"))?;

        info!(count = created.len(), "Books created");
        Ok(created)
    }

    /// Applies the fields present in `dto`; the rest keep their value.
    #[instrument(skip(db, dto))]
    pub async fn update_book(
        db: &PgPool,
        id: BookId,
        dto: UpdateBookDto,
    ) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>(&format!(
            r#"UPDATE books SET
                   title = COALESCE($2, title),
                   author_id = COALESCE($3, author_id),
                   genre_id = COALESCE($4, genre_id),
                   pages = COALESCE($5, pages),
                   published_date = COALESCE($6, published_date),
                   description = COALESCE($7, description),
                   image = COALESCE($8, image),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {BOOK_COLUMNS}"#
        ))
        .bind(id)
        .bind(&dto.title)
        .bind(dto.author_id)
        .bind(dto.genre_id)
        .bind(dto.pages)
        .bind(dto.published_date)
        .bind(&dto.description)
        .bind(&dto.image)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("Book not found"))
    }

    #[instrument(skip(db))]
    pub async fn delete_book(db: &PgPool, id: BookId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Book not found"));
        }

        info!(book_id = %id, "Book deleted");
        Ok(())
    }
}
