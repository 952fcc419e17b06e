use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use tracing::instrument;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Credentials, Profile, Registration, Session, User},
    repository::UserRepository,
    telemetry::USERS_REGISTERED,
};

const MIN_PASSWORD_LEN: usize = 5;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and checks the HS256 bearer tokens that identify a user.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, lifetime_hours: i64) -> Self {
        Self {
            secret: secret.into(),
            lifetime: Duration::hours(lifetime_hours),
        }
    }

    pub fn issue(&self, user_id: i32) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            sub: user_id,
            exp: (now + self.lifetime).unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    pub fn verify(&self, token: &str) -> AppResult<i32> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims.sub)
    }
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    tokens: TokenIssuer,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, config: &Config) -> Self {
        Self {
            user_repo,
            tokens: TokenIssuer::new(config.jwt_secret.clone(), config.jwt_expires_in_hours),
        }
    }

    #[instrument(name = "auth.register", skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: Registration) -> AppResult<Session> {
        validate_registration(&input)?;

        if self.user_repo.email_taken(input.email.trim()).await? {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let user = self
            .user_repo
            .insert(input.email.trim(), &password_hash, input.name.trim())
            .await?;

        USERS_REGISTERED.add(1, &[]);
        tracing::info!(user_id = user.id, "User registered");

        self.session_for(&user)
    }

    #[instrument(name = "auth.login", skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: Credentials) -> AppResult<Session> {
        let user = self
            .user_repo
            .by_email(input.email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        verify_password(&input.password, &user.password_hash)?;
        tracing::info!(user_id = user.id, "User logged in");

        self.session_for(&user)
    }

    #[instrument(name = "auth.profile", skip(self))]
    pub async fn profile(&self, user_id: i32) -> AppResult<Profile> {
        self.user_repo
            .by_id(user_id)
            .await?
            .map(|user| Profile::from(&user))
            .ok_or(AppError::NotFound("User not found".to_string()))
    }

    #[instrument(name = "auth.validate_token", skip(self, token))]
    pub fn validate_token(&self, token: &str) -> AppResult<i32> {
        self.tokens.verify(token)
    }

    fn session_for(&self, user: &User) -> AppResult<Session> {
        Ok(Session {
            token: self.tokens.issue(user.id)?,
            user: Profile::from(user),
        })
    }
}

fn validate_registration(input: &Registration) -> AppResult<()> {
    if !input.email.contains('@') {
        return Err(AppError::Validation("A valid email is required".to_string()));
    }
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if input.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {}", e)))?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}
