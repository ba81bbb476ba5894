use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::Database;
use crate::domain::errors::DomainResult;
use crate::shared::utils::{now_timestamp, EntityId};

/// Separator between tag values in the `tags` column
pub const TAG_SEPARATOR: char = '/';

/// One CSV row: `author,fortune,tags`
#[derive(Debug, Clone, Deserialize)]
pub struct FortuneRecord {
    pub author: String,
    pub fortune: String,
    #[serde(default)]
    pub tags: String,
}

impl FortuneRecord {
    /// Tag values in order, empty segments and repeats dropped
    pub fn tag_values(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.tags
            .split(TAG_SEPARATOR)
            .filter(|tag| !tag.is_empty() && seen.insert(*tag))
            .collect()
    }
}

/// Parse CSV rows with an `author,fortune,tags` header; `tags` may be absent
pub fn read_fortune_records<R: std::io::Read>(input: R) -> Result<Vec<FortuneRecord>, csv::Error> {
    csv::Reader::from_reader(input).deserialize().collect()
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub authors: usize,
    pub fortunes: usize,
    pub tags: usize,
    /// Rows whose fortune content had already been imported
    pub skipped: usize,
}

impl Database {
    /// Bulk-load fortunes in a single transaction. Authors and tags are
    /// shared by value; a repeated fortune is skipped.
    pub async fn import_fortunes<I>(&self, records: I) -> DomainResult<ImportSummary>
    where
        I: IntoIterator<Item = FortuneRecord>,
    {
        let mut tx = self.pool.begin().await?;
        let mut authors: HashMap<String, EntityId> = HashMap::new();
        let mut tags: HashMap<String, EntityId> = HashMap::new();
        let mut fortunes: HashSet<String> = HashSet::new();
        let mut summary = ImportSummary::default();

        for record in records {
            if fortunes.contains(&record.fortune) {
                summary.skipped += 1;
                continue;
            }
            let now = now_timestamp();

            let author_id = match authors.get(&record.author) {
                Some(id) => *id,
                None => {
                    let id = EntityId::generate();
                    sqlx::query("INSERT INTO authors (id, name, created_at) VALUES (?, ?, ?)")
                        .bind(id.as_i64())
                        .bind(&record.author)
                        .bind(&now)
                        .execute(&mut *tx)
                        .await?;
                    authors.insert(record.author.clone(), id);
                    id
                }
            };

            let fortune_id = EntityId::generate();
            sqlx::query(
                "INSERT INTO fortunes (id, content, author_id, created_at)
                 VALUES (?, ?, ?, ?)",
            )
            .bind(fortune_id.as_i64())
            .bind(&record.fortune)
            .bind(author_id.as_i64())
            .bind(&now)
            .execute(&mut *tx)
            .await?;

            for (position, value) in record.tag_values().into_iter().enumerate() {
                let tag_id = match tags.get(value) {
                    Some(id) => *id,
                    None => {
                        let id = EntityId::generate();
                        sqlx::query("INSERT INTO tags (id, tag, created_at) VALUES (?, ?, ?)")
                            .bind(id.as_i64())
                            .bind(value)
                            .bind(&now)
                            .execute(&mut *tx)
                            .await?;
                        tags.insert(value.to_string(), id);
                        id
                    }
                };

                sqlx::query(
                    "INSERT INTO fortunes_tags (fortune_id, tag_id, position) VALUES (?, ?, ?)",
                )
                .bind(fortune_id.as_i64())
                .bind(tag_id.as_i64())
                .bind(position as i64)
                .execute(&mut *tx)
                .await?;
            }

            fortunes.insert(record.fortune);
        }

        tx.commit().await?;

        summary.authors = authors.len();
        summary.fortunes = fortunes.len();
        summary.tags = tags.len();
        tracing::info!(
            "Imported {} fortunes, {} authors, {} tags ({} duplicates skipped)",
            summary.fortunes,
            summary.authors,
            summary.tags,
            summary.skipped
        );
        Ok(summary)
    }
}
