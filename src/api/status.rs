// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::config::ValidatedConfig;

#[derive(Serialize)]
struct StatusResponse {
    name: String,
    description: String,
    version: &'static str,
    endpoints: Vec<&'static str>,
}

/// Unauthenticated front door; reports the service identity and the
/// available resource endpoints.
pub async fn service_status(config: web::Data<ValidatedConfig>) -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        name: config.app.name.clone(),
        description: config.app.description.clone(),
        version: env!("CARGO_PKG_VERSION"),
        endpoints: vec!["/users/profile"],
    })
}
