use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqliteConnection};

use super::{decode_id, Database};
use crate::domain::entities::{Author, Fortune, FortunePatch, NewFortune, Tag};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::FortuneRepository;
use crate::shared::utils::{now_timestamp, EntityId};

const FORTUNE_COLUMNS: &str = "SELECT f.id, f.content, f.created_at, f.updated_at,
        a.id AS author_id, a.name AS author_name,
        a.created_at AS author_created_at, a.updated_at AS author_updated_at
     FROM fortunes f
     INNER JOIN authors a ON a.id = f.author_id";

/// Which fortunes to load
#[derive(Debug, Clone, Copy)]
pub(crate) enum FortuneFilter {
    All,
    Id(EntityId),
    Author(EntityId),
    Tag(EntityId),
}

/// Load fortunes with their author and ordered tags, ordered by id
pub(crate) async fn fetch_fortunes(
    conn: &mut SqliteConnection,
    filter: FortuneFilter,
) -> DomainResult<Vec<Fortune>> {
    let (sql, bound) = match filter {
        FortuneFilter::All => (format!("{} ORDER BY f.id", FORTUNE_COLUMNS), None),
        FortuneFilter::Id(id) => (format!("{} WHERE f.id = ?", FORTUNE_COLUMNS), Some(id)),
        FortuneFilter::Author(id) => (
            format!("{} WHERE f.author_id = ? ORDER BY f.id", FORTUNE_COLUMNS),
            Some(id),
        ),
        FortuneFilter::Tag(id) => (
            format!(
                "{} INNER JOIN fortunes_tags ft ON ft.fortune_id = f.id
                 WHERE ft.tag_id = ? ORDER BY f.id",
                FORTUNE_COLUMNS
            ),
            Some(id),
        ),
    };

    let mut query = sqlx::query(&sql);
    if let Some(id) = bound {
        query = query.bind(id.as_i64());
    }
    let rows = query.fetch_all(&mut *conn).await?;

    let mut fortunes = Vec::with_capacity(rows.len());
    for row in rows {
        let mut fortune = fortune_from_row(&row)?;
        fortune.tags = fetch_fortune_tags(conn, fortune.id).await?;
        fortunes.push(fortune);
    }

    Ok(fortunes)
}

fn fortune_from_row(row: &SqliteRow) -> DomainResult<Fortune> {
    Ok(Fortune {
        id: decode_id(row, "id")?,
        content: row.try_get("content")?,
        author: Author {
            id: decode_id(row, "author_id")?,
            name: row.try_get("author_name")?,
            created_at: row.try_get("author_created_at")?,
            updated_at: row.try_get("author_updated_at")?,
        },
        tags: Vec::new(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

async fn fetch_fortune_tags(conn: &mut SqliteConnection, fortune_id: EntityId) -> DomainResult<Vec<Tag>> {
    let rows = sqlx::query(
        "SELECT t.id, t.tag, t.created_at, t.updated_at
         FROM tags t
         INNER JOIN fortunes_tags ft ON ft.tag_id = t.id
         WHERE ft.fortune_id = ?
         ORDER BY ft.position",
    )
    .bind(fortune_id.as_i64())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(super::tags::tag_from_row).collect()
}

/// Return the author with this name, creating it if needed
async fn resolve_author(conn: &mut SqliteConnection, name: &str) -> DomainResult<Author> {
    if let Some(author) = super::authors::fetch_author_by_name(conn, name).await? {
        return Ok(author);
    }

    let author = Author {
        id: EntityId::generate(),
        name: name.to_string(),
        created_at: now_timestamp(),
        updated_at: None,
    };
    sqlx::query("INSERT INTO authors (id, name, created_at) VALUES (?, ?, ?)")
        .bind(author.id.as_i64())
        .bind(&author.name)
        .bind(&author.created_at)
        .execute(&mut *conn)
        .await?;

    tracing::info!("Author created: id={}", author.id);
    Ok(author)
}

/// Return the tag with this value, creating it if needed
async fn resolve_tag(conn: &mut SqliteConnection, value: &str) -> DomainResult<Tag> {
    if let Some(tag) = super::tags::fetch_tag_by_value(conn, value).await? {
        return Ok(tag);
    }

    let tag = Tag {
        id: EntityId::generate(),
        tag: value.to_string(),
        created_at: now_timestamp(),
        updated_at: None,
    };
    sqlx::query("INSERT INTO tags (id, tag, created_at) VALUES (?, ?, ?)")
        .bind(tag.id.as_i64())
        .bind(&tag.tag)
        .bind(&tag.created_at)
        .execute(&mut *conn)
        .await?;

    tracing::info!("Tag created: id={}", tag.id);
    Ok(tag)
}

/// Replace the tag list of a fortune, keeping the given order
async fn link_tags(conn: &mut SqliteConnection, fortune_id: EntityId, values: &[String]) -> DomainResult<Vec<Tag>> {
    sqlx::query("DELETE FROM fortunes_tags WHERE fortune_id = ?")
        .bind(fortune_id.as_i64())
        .execute(&mut *conn)
        .await?;

    let mut tags = Vec::with_capacity(values.len());
    for (position, value) in values.iter().enumerate() {
        let tag = resolve_tag(conn, value).await?;
        sqlx::query("INSERT INTO fortunes_tags (fortune_id, tag_id, position) VALUES (?, ?, ?)")
            .bind(fortune_id.as_i64())
            .bind(tag.id.as_i64())
            .bind(position as i64)
            .execute(&mut *conn)
            .await?;
        tags.push(tag);
    }

    Ok(tags)
}

#[async_trait::async_trait]
impl FortuneRepository for Database {
    async fn list_fortunes(&self) -> DomainResult<Vec<Fortune>> {
        let mut conn = self.pool.acquire().await?;
        fetch_fortunes(&mut conn, FortuneFilter::All).await
    }

    async fn get_fortune(&self, id: EntityId) -> DomainResult<Option<Fortune>> {
        let mut conn = self.pool.acquire().await?;
        let fortunes = fetch_fortunes(&mut conn, FortuneFilter::Id(id)).await?;
        Ok(fortunes.into_iter().next())
    }

    async fn create_fortune(&self, new: &NewFortune) -> DomainResult<Fortune> {
        let mut tx = self.pool.begin().await?;

        let author = resolve_author(&mut tx, &new.author).await?;

        let id = EntityId::generate();
        let created_at = now_timestamp();
        sqlx::query(
            "INSERT INTO fortunes (id, content, author_id, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(id.as_i64())
        .bind(&new.content)
        .bind(author.id.as_i64())
        .bind(&created_at)
        .execute(&mut *tx)
        .await?;

        let tags = link_tags(&mut tx, id, &new.tags).await?;

        tx.commit().await?;

        tracing::info!("Fortune created: id={}, tags={}", id, tags.len());
        Ok(Fortune {
            id,
            content: new.content.clone(),
            author,
            tags,
            created_at,
            updated_at: None,
        })
    }

    async fn update_fortune(
        &self,
        id: EntityId,
        patch: &FortunePatch,
    ) -> DomainResult<Option<Fortune>> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query("SELECT id FROM fortunes WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await?
            .is_some();
        if !exists {
            return Ok(None);
        }

        let author = match &patch.author {
            Some(name) => Some(resolve_author(&mut tx, name).await?),
            None => None,
        };

        // updated_at is always touched, even when only the tags change
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE fortunes SET ");
        let mut separated = builder.separated(", ");

        if let Some(author) = &author {
            separated.push("author_id = ");
            separated.push_bind_unseparated(author.id.as_i64());
        }

        if let Some(content) = &patch.content {
            separated.push("content = ");
            separated.push_bind_unseparated(content.clone());
        }

        separated.push("updated_at = ");
        separated.push_bind_unseparated(now_timestamp());

        builder.push(" WHERE id = ");
        builder.push_bind(id.as_i64());
        builder.build().execute(&mut *tx).await?;

        if let Some(tags) = &patch.tags {
            link_tags(&mut tx, id, tags).await?;
        }

        let fortune = fetch_fortunes(&mut tx, FortuneFilter::Id(id))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::Internal(format!("fortune {} vanished mid-update", id)))?;

        tx.commit().await?;

        tracing::info!("Fortune updated: id={}", id);
        Ok(Some(fortune))
    }
}
