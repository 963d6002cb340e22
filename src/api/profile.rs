// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;

use crate::iam::AuthRequest;
use crate::profile::{ProfileLookup, ProfileService};

pub async fn get_profile(req: HttpRequest, profiles: web::Data<ProfileService>) -> HttpResponse {
    // The auth middleware rejects unauthenticated traffic before this point.
    let Some(subject_id) = req.subject_id() else {
        return HttpResponse::Unauthorized().json(json!({
            "error": "Missing bearer token"
        }));
    };

    match profiles.get_profile(subject_id).await {
        ProfileLookup::Found(view) => HttpResponse::Ok().json(view),
        ProfileLookup::Missing => HttpResponse::NotFound().json(json!({
            "error": "User profile not found"
        })),
        ProfileLookup::Failed(message) => HttpResponse::InternalServerError().json(json!({
            "error": message
        })),
    }
}
