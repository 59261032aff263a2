use reqwest::Method;

use super::ApiClient;
use crate::errors::ClientError;
use crate::models::session::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, Role,
    SignupRequest, UpdateNameRequest,
};
use crate::models::MessageResponse;

/// Demo accounts the backend exposes through `/demo-login/{role}`.
pub fn demo_role_path(role: Role) -> &'static str {
    match role {
        Role::Hr => "demo_hr",
        Role::Candidate => "demo_candidate",
    }
}

impl ApiClient {
    /// POST /login
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = self
            .request(Method::POST, "/login")
            .json(&LoginRequest { email, password });
        self.send(request).await
    }

    /// POST /demo-login/{role}
    pub async fn demo_login(&self, role: Role) -> Result<LoginResponse, ClientError> {
        let path = format!("/demo-login/{}", demo_role_path(role));
        self.send(self.request(Method::POST, &path)).await
    }

    /// POST /signup
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        role: Role,
    ) -> Result<MessageResponse, ClientError> {
        let request = self.request(Method::POST, "/signup").json(&SignupRequest {
            email,
            password,
            role,
        });
        self.send(request).await
    }

    /// POST /refresh
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ClientError> {
        let request = self
            .request(Method::POST, "/refresh")
            .json(&RefreshRequest { refresh_token });
        self.send(request).await
    }

    /// POST /change-password
    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ClientError> {
        let request = self
            .authed(Method::POST, "/change-password", token)
            .json(&ChangePasswordRequest {
                current_password,
                new_password,
            });
        self.send(request).await
    }

    /// PUT /update-name
    pub async fn update_name(&self, token: &str, name: &str) -> Result<MessageResponse, ClientError> {
        let request = self
            .authed(Method::PUT, "/update-name", token)
            .json(&UpdateNameRequest { name });
        self.send(request).await
    }
}
