use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use super::fortunes::{fetch_fortunes, FortuneFilter};
use super::{decode_id, Database};
use crate::domain::entities::{Author, AuthorWithFortunes};
use crate::domain::errors::DomainResult;
use crate::domain::ports::AuthorRepository;
use crate::shared::utils::{now_timestamp, EntityId};

fn author_from_row(row: &SqliteRow) -> DomainResult<Author> {
    Ok(Author {
        id: decode_id(row, "id")?,
        name: row.try_get("name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

pub(super) async fn fetch_author_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> DomainResult<Option<Author>> {
    let row = sqlx::query(
        "SELECT id, name, created_at, updated_at
         FROM authors
         WHERE name = ?",
    )
    .bind(name)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(author_from_row).transpose()
}

async fn fetch_author_with_fortunes(
    conn: &mut SqliteConnection,
    id: EntityId,
) -> DomainResult<Option<AuthorWithFortunes>> {
    let row = sqlx::query(
        "SELECT id, name, created_at, updated_at
         FROM authors
         WHERE id = ?",
    )
    .bind(id.as_i64())
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let author = author_from_row(&row)?;
    let fortunes = fetch_fortunes(conn, FortuneFilter::Author(author.id)).await?;

    Ok(Some(AuthorWithFortunes { author, fortunes }))
}

#[async_trait::async_trait]
impl AuthorRepository for Database {
    async fn list_authors(&self) -> DomainResult<Vec<AuthorWithFortunes>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            "SELECT id, name, created_at, updated_at
             FROM authors
             ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut authors = Vec::with_capacity(rows.len());
        for row in rows {
            let author = author_from_row(&row)?;
            let fortunes = fetch_fortunes(&mut conn, FortuneFilter::Author(author.id)).await?;
            authors.push(AuthorWithFortunes { author, fortunes });
        }

        Ok(authors)
    }

    async fn get_author(&self, id: EntityId) -> DomainResult<Option<AuthorWithFortunes>> {
        let mut conn = self.pool.acquire().await?;
        fetch_author_with_fortunes(&mut conn, id).await
    }

    async fn rename_author(
        &self,
        id: EntityId,
        name: &str,
    ) -> DomainResult<Option<AuthorWithFortunes>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE authors SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(now_timestamp())
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let author = fetch_author_with_fortunes(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Author renamed: id={}", id);
        Ok(author)
    }
}
