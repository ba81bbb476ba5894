use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use super::fortunes::{fetch_fortunes, FortuneFilter};
use super::{decode_id, Database};
use crate::domain::entities::{Tag, TagWithFortunes};
use crate::domain::errors::DomainResult;
use crate::domain::ports::TagRepository;
use crate::shared::utils::{now_timestamp, EntityId};

pub(super) fn tag_from_row(row: &SqliteRow) -> DomainResult<Tag> {
    Ok(Tag {
        id: decode_id(row, "id")?,
        tag: row.try_get("tag")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Get tag by value
pub(super) async fn fetch_tag_by_value(
    conn: &mut SqliteConnection,
    value: &str,
) -> DomainResult<Option<Tag>> {
    let row = sqlx::query(
        "SELECT id, tag, created_at, updated_at
         FROM tags
         WHERE tag = ?",
    )
    .bind(value)
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(tag_from_row).transpose()
}

async fn fetch_tag_with_fortunes(
    conn: &mut SqliteConnection,
    id: EntityId,
) -> DomainResult<Option<TagWithFortunes>> {
    let row = sqlx::query(
        "SELECT id, tag, created_at, updated_at
         FROM tags
         WHERE id = ?",
    )
    .bind(id.as_i64())
    .fetch_optional(&mut *conn)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };
    let tag = tag_from_row(&row)?;
    let fortunes = fetch_fortunes(conn, FortuneFilter::Tag(tag.id)).await?;

    Ok(Some(TagWithFortunes { tag, fortunes }))
}

#[async_trait::async_trait]
impl TagRepository for Database {
    async fn list_tags(&self) -> DomainResult<Vec<TagWithFortunes>> {
        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query(
            "SELECT id, tag, created_at, updated_at
             FROM tags
             ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;

        let mut tags = Vec::with_capacity(rows.len());
        for row in rows {
            let tag = tag_from_row(&row)?;
            let fortunes = fetch_fortunes(&mut conn, FortuneFilter::Tag(tag.id)).await?;
            tags.push(TagWithFortunes { tag, fortunes });
        }

        Ok(tags)
    }

    async fn get_tag(&self, id: EntityId) -> DomainResult<Option<TagWithFortunes>> {
        let mut conn = self.pool.acquire().await?;
        fetch_tag_with_fortunes(&mut conn, id).await
    }

    async fn rename_tag(&self, id: EntityId, tag: &str) -> DomainResult<Option<TagWithFortunes>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE tags SET tag = ?, updated_at = ? WHERE id = ?")
            .bind(tag)
            .bind(now_timestamp())
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let renamed = fetch_tag_with_fortunes(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!("Tag renamed: id={}", id);
        Ok(renamed)
    }
}
