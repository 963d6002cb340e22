// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;

/// A stored profile row. `id` equals the authenticated subject id; timestamps
/// are naive ISO-8601 instants, emitted verbatim without timezone adjustment.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ProfileRecord {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Read-only projection returned to clients. Optional fields serialize as
/// JSON `null` rather than being omitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub id: i64,
    pub name: String,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ProfileRecord> for ProfileView {
    fn from(record: ProfileRecord) -> Self {
        ProfileView {
            id: record.id,
            name: record.name,
            bio: record.bio,
            profile_picture_url: record.profile_picture_url,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub enum StoreError {
    Query(String),
    Schema(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // The query failure text is surfaced verbatim in error envelopes.
            StoreError::Query(msg) => write!(f, "{}", msg),
            StoreError::Schema(msg) => write!(f, "Schema initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
