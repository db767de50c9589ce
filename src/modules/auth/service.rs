use sqlx::PgPool;
use tracing::{info, instrument, warn};

use staybook_auth::create_access_token;
use staybook_config::JwtConfig;
use staybook_core::{AppError, hash_password, verify_password};
use staybook_models::{LoginRequest, LoginResponse, RegisterRequestDto, User, UserId};

use crate::metrics;

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, dto), fields(user.email = %dto.email))]
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let existing = sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE email = $1")
            .bind(&dto.email)
            .fetch_optional(db)
            .await?;

        if existing.is_some() {
            return Err(AppError::bad_request(anyhow::anyhow!("Email already exists")));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (first_name, last_name, email, password)
             VALUES ($1, $2, $3, $4)
             RETURNING id, first_name, last_name, email, created_at, updated_at",
        )
        .bind(&dto.first_name)
        .bind(&dto.last_name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::bad_request(anyhow::anyhow!("Email already exists"));
            }
            AppError::from(e)
        })?;

        metrics::track_user_registered();
        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    #[instrument(skip(db, dto, jwt_config), fields(user.email = %dto.email))]
    pub async fn login_user(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            #[sqlx(flatten)]
            user: User,
            password: String,
        }

        let Some(record) = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, first_name, last_name, email, password, created_at, updated_at
             FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        else {
            metrics::track_user_login_failure("unknown_email");
            return Err(AppError::unauthorized("Invalid email or password".to_string()));
        };

        if !verify_password(&dto.password, &record.password)? {
            warn!(user.id = %record.user.id, "Login with wrong password");
            metrics::track_user_login_failure("wrong_password");
            return Err(AppError::unauthorized("Invalid email or password".to_string()));
        }

        let access_token =
            create_access_token(record.user.id.into_inner(), &record.user.email, jwt_config)?;

        metrics::track_jwt_issued();
        metrics::track_user_login_success();

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt_config.access_token_expiry,
            user: record.user,
        })
    }
}
