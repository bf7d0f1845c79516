//! Accounts held by the backend, with a JWT session.

use crate::user::{NewUser, User};
use crate::AuthError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tienda_client::{ApiClient, HttpTransport};
use tienda_store::{keys, Cache, Storage};

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    fecha_nac: Option<String>,
}

/// What `/auth/login` and `/auth/register` answer.
#[derive(Deserialize)]
struct AuthResponse {
    #[serde(default, alias = "accessToken", alias = "jwt")]
    token: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

/// Login against `/auth`, keeping the token where [`ApiClient`] reads it.
pub struct RemoteAuth<T> {
    client: ApiClient<T>,
    cache: Cache<Arc<dyn Storage>>,
}

impl<T: HttpTransport> RemoteAuth<T> {
    /// Wrap a client. The session is written to the client's token store,
    /// or to `store` when the client has none.
    pub fn new(client: ApiClient<T>, store: Arc<dyn Storage>) -> Self {
        let store = client.token_store().cloned().unwrap_or(store);
        Self {
            client: client.with_token_store(Arc::clone(&store)),
            cache: Cache::new(store),
        }
    }

    pub fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let response: AuthResponse = self
            .client
            .post_json("/auth/login", &LoginRequest { email, password })
            .await
            .map_err(|e| match e.status() {
                Some(401 | 403) => AuthError::InvalidCredentials,
                _ => AuthError::from(e),
            })?;
        self.start_session(response, email)
    }

    pub async fn register(&self, new_user: &NewUser) -> Result<User, AuthError> {
        new_user.validate()?;
        let request = RegisterRequest {
            name: &new_user.nombre,
            email: &new_user.correo,
            password: &new_user.contrasena,
            fecha_nac: new_user
                .fecha_nacimiento
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| format!("{d}T00:00:00")),
        };
        let response: AuthResponse = self
            .client
            .post_json("/auth/register", &request)
            .await
            .map_err(|e| match e.status() {
                Some(409) => AuthError::EmailTaken,
                _ => AuthError::from(e),
            })?;
        self.start_session(response, &new_user.correo)
    }

    /// Forget the token and the current user.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.cache.delete(keys::JWT_TOKEN)?;
        self.cache.delete(keys::CURRENT_USER)?;
        Ok(())
    }

    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.cache.get_or_default(keys::CURRENT_USER)?)
    }

    pub fn is_logged_in(&self) -> Result<bool, AuthError> {
        Ok(self.client.token()?.is_some())
    }

    fn start_session(&self, response: AuthResponse, email: &str) -> Result<User, AuthError> {
        let token = response
            .token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;
        let user = response
            .user
            .unwrap_or_else(|| User {
                correo: email.to_string(),
                ..Default::default()
            })
            .without_password();

        self.cache.set_raw(keys::JWT_TOKEN, &token)?;
        self.cache.set(keys::CURRENT_USER, &user)?;
        tracing::info!(correo = %user.correo, "logged in");
        Ok(user)
    }
}
