use serde::Serialize;
use sqlx::SqliteConnection;

use crate::auth::{generate_jwt, hash_password, verify_password};
use crate::config::SecurityConfig;
use crate::database::models::{User, UserSummary};
use crate::services::{ServiceError, ServiceResult};

const EMAIL_IN_USE: &str = "Email address already in use";

/// Successful login: a bearer token plus the public user fields.
#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub access_token: String,
    pub user: UserSummary,
}

/// Self-service registration; always creates a non-admin account.
pub async fn register(
    conn: &mut SqliteConnection,
    email: Option<&str>,
    password: Option<&str>,
) -> ServiceResult<UserSummary> {
    let (email, password) = match (email, password) {
        (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
        _ => return Err(ServiceError::BadRequest("Email and password are required".to_string())),
    };

    create_user(conn, email, password, false).await
}

/// Insert a user with a freshly salted hash. Conflict when the email is taken.
pub async fn create_user(
    conn: &mut SqliteConnection,
    email: &str,
    password: &str,
    is_admin: bool,
) -> ServiceResult<UserSummary> {
    if find_by_email(conn, email).await?.is_some() {
        return Err(ServiceError::Conflict(EMAIL_IN_USE.to_string()));
    }

    let password_hash = hash_password(password)?;

    let result = sqlx::query("INSERT INTO users (email, password_hash, is_admin) VALUES (?, ?, ?)")
        .bind(email)
        .bind(&password_hash)
        .bind(is_admin)
        .execute(&mut *conn)
        .await
        .map_err(|e| match ServiceError::from(e) {
            // Lost a race with a concurrent registration.
            ServiceError::Conflict(_) => ServiceError::Conflict(EMAIL_IN_USE.to_string()),
            other => other,
        })?;

    tracing::info!("Registered user {} (admin: {})", email, is_admin);

    Ok(UserSummary {
        id: result.last_insert_rowid(),
        email: email.to_string(),
        is_admin,
    })
}

/// Check credentials and issue a token. `expect_admin` selects the user or
/// admin entry point; a role mismatch is reported as bad credentials.
pub async fn login(
    conn: &mut SqliteConnection,
    email: Option<&str>,
    password: Option<&str>,
    expect_admin: bool,
    security: &SecurityConfig,
) -> ServiceResult<LoginOutcome> {
    let (email, password) = match (email, password) {
        (Some(e), Some(p)) => (e, p),
        _ => {
            return Err(ServiceError::BadRequest(
                "Missing credentials in request body.".to_string(),
            ))
        }
    };
    if email.is_empty() || password.is_empty() {
        return Err(ServiceError::BadRequest("Email and password are required".to_string()));
    }

    let user = find_by_email(conn, email).await?;
    let verified = match &user {
        Some(user) => verify_password(password, &user.password_hash)?,
        None => false,
    };
    let user = match user {
        Some(user) if verified => user,
        _ => {
            tracing::warn!("Rejected login for {}", email);
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }
    };

    if user.is_admin != expect_admin {
        let role = if expect_admin { "an Admin" } else { "a User" };
        tracing::warn!("Rejected login for {}: account role does not match entry point", email);
        return Err(ServiceError::Unauthorized(format!(
            "Invalid credentials for {} account",
            role
        )));
    }

    let access_token = generate_jwt(user.id, security)?;

    Ok(LoginOutcome {
        access_token,
        user: UserSummary::from(&user),
    })
}

pub async fn find_by_id(conn: &mut SqliteConnection, id: i64) -> ServiceResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, is_admin FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}

pub async fn find_by_email(conn: &mut SqliteConnection, email: &str) -> ServiceResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, email, password_hash, is_admin FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(user)
}

pub async fn list_users(conn: &mut SqliteConnection) -> ServiceResult<Vec<UserSummary>> {
    let users = sqlx::query_as::<_, UserSummary>("SELECT id, email, is_admin FROM users ORDER BY id")
        .fetch_all(&mut *conn)
        .await?;
    Ok(users)
}

/// Grant or revoke the admin flag by email.
pub async fn set_admin(
    conn: &mut SqliteConnection,
    email: &str,
    is_admin: bool,
) -> ServiceResult<UserSummary> {
    let result = sqlx::query("UPDATE users SET is_admin = ? WHERE email = ?")
        .bind(is_admin)
        .bind(email)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ServiceError::NotFound(format!("No user with email {}", email)));
    }

    let user = find_by_email(conn, email)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No user with email {}", email)))?;
    Ok(UserSummary::from(&user))
}
