// This file is part of the product Atelier.
// SPDX-FileCopyrightText: 2025-2026 Zivatar Limited
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

#![allow(dead_code)]

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, test, web};
use async_trait::async_trait;
use atelier::config::{
    AppConfig, AuthConfig, DatabaseConfig, JwtConfig, LoggingConfig, ServerConfig, ValidatedConfig,
};
use atelier::iam::jwt::JwtService;
use atelier::profile::{
    ProfileRecord, ProfileService, ProfileStore, SqliteProfileStore, StoreError, ensure_schema,
};
use chrono::NaiveDateTime;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

pub struct TestHarness {
    pub config: Arc<ValidatedConfig>,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub profile_service: Arc<ProfileService>,
}

#[derive(Clone)]
pub struct AppBundle {
    pub config: Arc<ValidatedConfig>,
    pub jwt_service: Arc<JwtService>,
    pub profile_service: Arc<ProfileService>,
}

impl TestHarness {
    pub async fn new() -> Self {
        let config = Arc::new(build_config());

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("sqlite pool");
        ensure_schema(&pool).await.expect("schema");

        let jwt_service = Arc::new(JwtService::new(&config));
        let profile_service = Arc::new(ProfileService::new(Arc::new(SqliteProfileStore::new(
            pool.clone(),
        ))));

        Self {
            config,
            pool,
            jwt_service,
            profile_service,
        }
    }

    pub async fn seed_profile(
        &self,
        id: i64,
        name: &str,
        bio: Option<&str>,
        profile_picture_url: Option<&str>,
        created_at: &str,
        updated_at: &str,
    ) {
        sqlx::query(
            "INSERT INTO user_profiles (id, name, bio, profile_picture_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(id)
        .bind(name)
        .bind(bio)
        .bind(profile_picture_url)
        .bind(timestamp(created_at))
        .bind(timestamp(updated_at))
        .execute(&self.pool)
        .await
        .expect("seed profile");
    }

    pub fn auth_for(&self, subject_id: i64) -> String {
        self.jwt_service
            .create_token(subject_id)
            .expect("jwt token")
    }

    pub fn app_bundle(&self) -> AppBundle {
        AppBundle {
            config: self.config.clone(),
            jwt_service: self.jwt_service.clone(),
            profile_service: self.profile_service.clone(),
        }
    }

    /// Bundle whose lookup service sits on a store that fails every query
    /// with `message`. Auth still goes through the real JWT service.
    pub fn failing_bundle(&self, message: &str) -> AppBundle {
        let store = Arc::new(FailingProfileStore {
            message: message.to_string(),
        });
        AppBundle {
            config: self.config.clone(),
            jwt_service: self.jwt_service.clone(),
            profile_service: Arc::new(ProfileService::new(store)),
        }
    }
}

pub struct FailingProfileStore {
    pub message: String,
}

#[async_trait]
impl ProfileStore for FailingProfileStore {
    async fn find_by_id(&self, _id: i64) -> Result<Option<ProfileRecord>, StoreError> {
        Err(StoreError::Query(self.message.clone()))
    }
}

pub fn build_test_app(
    bundle: AppBundle,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::from(bundle.config))
        .app_data(web::Data::from(bundle.jwt_service))
        .app_data(web::Data::from(bundle.profile_service))
        .configure(atelier::api::configure)
}

pub fn add_auth_header(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((header::AUTHORIZATION, format!("Bearer {}", token)))
}

pub fn timestamp(value: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").expect("timestamp")
}

fn build_config() -> ValidatedConfig {
    ValidatedConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8081,
            workers: 1,
        },
        database: DatabaseConfig {
            file: "profiles.db".to_string(),
        },
        auth: AuthConfig {
            jwt: JwtConfig {
                secret: "test-secret-0123456789abcdef".to_string(),
                issuer: "atelier".to_string(),
                audience: "atelier-users".to_string(),
                expiration_hours: 12,
            },
        },
        logging: LoggingConfig {
            level: "info".to_string(),
        },
        app: AppConfig {
            name: "Test App".to_string(),
            description: "Test Description".to_string(),
        },
    }
}
