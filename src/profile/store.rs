// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::types::{ProfileRecord, StoreError};
use async_trait::async_trait;
use sqlx::SqlitePool;

#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, RwLock};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRecord>, StoreError>;
}

/// One-time startup concern; request handling never touches the schema.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_profiles (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            bio TEXT,
            profile_picture_url TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| StoreError::Schema(e.to_string()))?;

    Ok(())
}

pub struct SqliteProfileStore {
    pool: SqlitePool,
}

impl SqliteProfileStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for SqliteProfileStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRecord>, StoreError> {
        sqlx::query_as::<_, ProfileRecord>(
            "SELECT id, name, bio, profile_picture_url, created_at, updated_at
             FROM user_profiles WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))
    }
}

#[cfg(test)]
pub struct MemoryProfileStore {
    profiles: Arc<RwLock<HashMap<i64, ProfileRecord>>>,
}

#[cfg(test)]
impl MemoryProfileStore {
    pub fn new(initial: HashMap<i64, ProfileRecord>) -> Self {
        Self {
            profiles: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn from_records(records: Vec<ProfileRecord>) -> Self {
        let data = records
            .into_iter()
            .map(|record| (record.id, record))
            .collect();
        Self::new(data)
    }
}

#[cfg(test)]
#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<ProfileRecord>, StoreError> {
        match self.profiles.read() {
            Ok(guard) => Ok(guard.get(&id).cloned()),
            Err(poisoned) => {
                log::error!("MemoryProfileStore lock poisoned on read; recovering");
                Ok(poisoned.into_inner().get(&id).cloned())
            }
        }
    }
}
