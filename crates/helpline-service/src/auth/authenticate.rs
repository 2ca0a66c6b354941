use salvo::http::header::HeaderMap;

use crate::error::{ServiceError, ServiceResult};
use helpline_core::config::{AuthMethod, ProxyAuthConfig, Settings};
use helpline_core::types::CallerRole;
use helpline_db::db::connection::DbConnection;
use helpline_db::db::query::user;
use helpline_db::model::user::{NewUser, User};

use super::capability::Caller;

/// Headers a trusted reverse proxy sets after verifying the caller.
pub mod proxy_headers {
    pub const USER_ID: &str = "x-remote-user-id";
    pub const USER_EMAIL: &str = "x-remote-user-email";
    pub const USER_NAME: &str = "x-remote-user-name";
    pub const USER_ROLE: &str = "x-remote-user-role";
}

/// Authenticated caller: the directory record plus the resolved role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user: User,
    pub role: CallerRole,
}

impl Identity {
    #[must_use]
    pub const fn caller(&self) -> Caller {
        Caller {
            user_id: self.user.id,
            role: self.role,
        }
    }
}

/// Get the user configured in settings for single user authentication.
///
/// If it doesn't exist, insert it into the database.
///
/// ## Errors
///
/// Returns an error if the user cannot be created or retrieved from the database.
#[tracing::instrument(skip(conn, config))]
async fn authenticate_single_user(
    conn: &mut DbConnection<'_>,
    config: &Settings,
) -> ServiceResult<Identity> {
    tracing::debug!("Authenticating single user");

    let single_user_config =
        config
            .auth
            .single_user
            .as_ref()
            .ok_or(ServiceError::InvalidConfiguration(
                "Single user config is missing".to_string(),
            ))?;
    let role = if single_user_config.administrator {
        CallerRole::Administrator
    } else {
        CallerRole::User
    };

    if let Some(existing) = user::find_by_email(conn, &single_user_config.email).await? {
        tracing::trace!(user_email = %existing.email, "Single user already exists");
        return Ok(Identity {
            user: existing,
            role,
        });
    }

    tracing::debug!(email = %single_user_config.email, "Creating single user");
    let created = user::upsert(
        conn,
        &NewUser {
            id: uuid::Uuid::now_v7(),
            name: &single_user_config.name,
            email: &single_user_config.email,
        },
    )
    .await?;

    tracing::info!(user_id = %created.id, user_email = %created.email, "Single user created");

    Ok(Identity {
        user: created,
        role,
    })
}

/// Caller identity as asserted by the proxy, before it is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProxyAssertion {
    id: uuid::Uuid,
    email: String,
    name: String,
    role: CallerRole,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// ## Summary
/// Reads the proxy identity headers. The name falls back to the email; the
/// role is administrator only when it equals the configured admin role.
///
/// ## Errors
/// Returns `NotAuthenticated` if the id or email header is missing or the
/// id is not a UUID.
fn read_proxy_headers(headers: &HeaderMap, admin_role: &str) -> ServiceResult<ProxyAssertion> {
    let id = header_str(headers, proxy_headers::USER_ID)
        .ok_or(ServiceError::NotAuthenticated)?
        .parse::<uuid::Uuid>()
        .map_err(|_e| ServiceError::NotAuthenticated)?;
    let email = header_str(headers, proxy_headers::USER_EMAIL)
        .ok_or(ServiceError::NotAuthenticated)?
        .to_string();
    let name = header_str(headers, proxy_headers::USER_NAME)
        .map_or_else(|| email.clone(), ToString::to_string);
    let role = match header_str(headers, proxy_headers::USER_ROLE) {
        Some(role) if role.eq_ignore_ascii_case(admin_role) => CallerRole::Administrator,
        _ => CallerRole::User,
    };

    Ok(ProxyAssertion {
        id,
        email,
        name,
        role,
    })
}

/// ## Summary
/// Trusts the identity headers of the reverse proxy and records the caller
/// in the user directory.
///
/// ## Errors
/// Returns `NotAuthenticated` if the headers are missing or malformed, or a
/// database error if the directory update fails.
#[tracing::instrument(skip(req, conn, config))]
async fn authenticate_proxy(
    req: &salvo::Request,
    conn: &mut DbConnection<'_>,
    config: &Settings,
) -> ServiceResult<Identity> {
    let admin_role = config
        .auth
        .proxy
        .as_ref()
        .map_or_else(|| ProxyAuthConfig::default().admin_role, |proxy| proxy.admin_role.clone());

    let assertion = read_proxy_headers(req.headers(), &admin_role)?;

    let recorded = user::upsert(
        conn,
        &NewUser {
            id: assertion.id,
            name: &assertion.name,
            email: &assertion.email,
        },
    )
    .await?;

    tracing::trace!(user_id = %recorded.id, role = ?assertion.role, "Proxy user recorded");

    Ok(Identity {
        user: recorded,
        role: assertion.role,
    })
}

/// ## Summary
/// Authenticate a user based on the configured authentication method.
///
/// ## Errors
/// Returns an error if authentication fails.
#[tracing::instrument(skip(req, conn, config))]
pub async fn authenticate(
    req: &salvo::Request,
    conn: &mut DbConnection<'_>,
    config: &Settings,
) -> ServiceResult<Identity> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(conn, config).await,
        AuthMethod::Proxy => authenticate_proxy(req, conn, config).await,
    }
}
