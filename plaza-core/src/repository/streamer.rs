use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};

use super::StreamerDirectory;
use crate::{
    models::{Platform, StreamerConfig},
    Result,
};

/// Read-only repository over the externally managed `streamers` table
#[derive(Clone)]
pub struct StreamerRepository {
    pool: PgPool,
}

impl StreamerRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_streamer(&self, row: &PgRow) -> Result<StreamerConfig> {
        let platform: String = row.try_get("platform")?;
        Ok(StreamerConfig {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            platform: Platform::parse(&platform)?,
            platform_id: row.try_get("platform_id")?,
        })
    }
}

#[async_trait]
impl StreamerDirectory for StreamerRepository {
    async fn list(&self) -> Result<Vec<StreamerConfig>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, platform, platform_id
            FROM streamers
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(|row| self.row_to_streamer(row)).collect()
    }
}
