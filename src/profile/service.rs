// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use super::store::ProfileStore;
use super::types::ProfileView;
use std::sync::Arc;

/// Outcome of a profile lookup. The transport layer matches this explicitly
/// to choose status code and body; no exceptions cross this boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileLookup {
    Found(ProfileView),
    Missing,
    Failed(String),
}

/// Read-only lookup over an injected store. Holds no per-request state, so a
/// single instance serves all workers.
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Fetch the profile whose primary key equals `subject_id`. The id is
    /// trusted as produced by token verification; no shape validation here.
    pub async fn get_profile(&self, subject_id: i64) -> ProfileLookup {
        match self.store.find_by_id(subject_id).await {
            Ok(Some(record)) => ProfileLookup::Found(record.into()),
            Ok(None) => ProfileLookup::Missing,
            Err(err) => ProfileLookup::Failed(err.to_string()),
        }
    }
}
