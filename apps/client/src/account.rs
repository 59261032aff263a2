//! Sign-in, sign-up and profile operations.

use tracing::info;

use crate::api_client::ApiClient;
use crate::errors::ClientError;
use crate::models::session::{Role, Session};
use crate::session::{Authenticator, SessionStore};

/// Address of the backend's built-in demo account for `role`.
pub fn demo_email(role: Role) -> &'static str {
    match role {
        Role::Hr => "demo_hr@project.com",
        Role::Candidate => "demo_candidate@project.com",
    }
}

fn require_filled(fields: &[&str]) -> Result<(), ClientError> {
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ClientError::Validation("Please fill all fields.".to_string()));
    }
    Ok(())
}

/// Logs in and replaces the stored session.
pub async fn login(
    api: &ApiClient,
    store: &SessionStore,
    email: &str,
    password: &str,
) -> Result<Session, ClientError> {
    require_filled(&[email, password])?;
    let email = email.trim();
    let response = api.login(email, password).await?;
    let session = Session::from_login(response, email)?;
    store.begin(session.clone())?;
    info!(role = %session.role, "Logged in");
    Ok(session)
}

pub async fn demo_login(
    api: &ApiClient,
    store: &SessionStore,
    role: Role,
) -> Result<Session, ClientError> {
    let response = api.demo_login(role).await?;
    let mut session = Session::from_login(response, demo_email(role))?;
    // The demo accounts carry their role in the request path, not the token.
    session.role = role;
    store.begin(session.clone())?;
    Ok(session)
}

pub async fn signup(
    api: &ApiClient,
    email: &str,
    password: &str,
    role: Role,
) -> Result<(), ClientError> {
    require_filled(&[email, password])?;
    api.signup(email.trim(), password, role).await?;
    info!(%role, "Account created");
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<(), ClientError> {
    store.clear()
}

/// Changes the display name on the backend, then in the local session.
pub async fn update_name(
    api: &ApiClient,
    auth: &Authenticator,
    name: &str,
) -> Result<(), ClientError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ClientError::Validation("Name cannot be empty.".to_string()));
    }
    auth.with_auth(|token| async move { api.update_name(&token, name).await })
        .await?;
    auth.store().set_name(name)
}

pub async fn change_password(
    api: &ApiClient,
    auth: &Authenticator,
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<(), ClientError> {
    validate_password_change(current, new, confirm)?;
    auth.with_auth(|token| async move { api.change_password(&token, current, new).await })
        .await?;
    info!("Password changed");
    Ok(())
}

pub fn validate_password_change(current: &str, new: &str, confirm: &str) -> Result<(), ClientError> {
    require_filled(&[current, new, confirm])?;
    if new != confirm {
        return Err(ClientError::Validation("Passwords do not match.".to_string()));
    }
    if new == current {
        return Err(ClientError::Validation(
            "New password must be different from the current one.".to_string(),
        ));
    }
    Ok(())
}
