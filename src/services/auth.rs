//! Authentication service: credential validation and token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::{AdminSeedConfig, AuthConfig},
    error::{AppError, AppResult},
    models::user::{LoginRequest, RegisterRequest, Role, User, UserClaims},
    repository::Repository,
};

use super::non_empty;

/// Hash a password with a fresh random salt
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a stored hash. Comparison timing is handled
/// by the hashing primitive.
fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is invalid: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[derive(Clone)]
pub struct AuthService {
    repository: Repository,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Register a new user and issue a session token.
    ///
    /// The requested role is honored only when it is literally "admin";
    /// everything else registers as a student.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<(User, String)> {
        let (name, email, password) = match (
            non_empty(&request.name),
            non_empty(&request.email),
            non_empty(&request.password),
        ) {
            (Some(name), Some(email), Some(password)) => (name, email, password),
            _ => {
                return Err(AppError::Validation(
                    "Name, email, and password are required.".to_string(),
                ))
            }
        };

        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        // Exact, case-sensitive match against the stored email
        if self.repository.users.email_exists(email).await? {
            return Err(AppError::Conflict(
                "A user with this email already exists.".to_string(),
            ));
        }

        let password_hash = hash_password(password)?;
        let role = Role::from_requested(request.role.as_deref());

        let user = self
            .repository
            .users
            .create(name, email, &password_hash, role)
            .await?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Authenticate by email and password and issue a session token.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(User, String)> {
        let (email, password) = match (non_empty(&request.email), non_empty(&request.password)) {
            (Some(email), Some(password)) => (email, password),
            _ => {
                return Err(AppError::Validation(
                    "Email and password are required.".to_string(),
                ))
            }
        };

        let user = self
            .repository
            .users
            .get_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password.".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication(
                "Invalid email or password.".to_string(),
            ));
        }

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Issue a signed session token for a user
    pub fn issue_token(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + self.config.token_expiry_days * 24 * 3600;

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            iat: now,
            exp,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Create the initial admin account at startup when none exists yet.
    /// Idempotent across restarts.
    pub async fn seed_admin(&self, seed: &AdminSeedConfig) -> AppResult<()> {
        if self.repository.users.admin_exists().await? {
            tracing::debug!("Admin account already exists, skipping seed");
            return Ok(());
        }

        if seed.password.is_empty() {
            return Err(AppError::Validation(
                "Admin seed requires a non-empty password".to_string(),
            ));
        }

        let password_hash = hash_password(&seed.password)?;
        let user = self
            .repository
            .users
            .create(&seed.name, &seed.email, &password_hash, Role::Admin)
            .await?;

        tracing::info!("Seeded admin account {} (id={})", user.email, user.id);
        Ok(())
    }
}
