use async_trait::async_trait;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use bayan_core::models::appointment::UserIdentity;

use crate::store::Directory;

/// Identity lookup against the users table. Slots denormalize the result at
/// write time; later profile edits do not reach historical slots.
pub struct PgDirectory {
    pool: Pool<Postgres>,
}

impl PgDirectory {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Directory for PgDirectory {
    async fn identity(&self, user_id: Uuid) -> Result<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT display_name, barangay_id
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(display_name, barangay_id)| UserIdentity {
            display_name,
            barangay_id,
        }))
    }
}
