//! Authentication errors.
//!
//! Messages reach the shopper as-is, so they are in Spanish.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Login didn't match any user.
    #[error("Usuario o contraseña incorrectos")]
    InvalidCredentials,

    /// No user with that email.
    #[error("Usuario no encontrado: {0}")]
    UserNotFound(String),

    /// Registration with an email that is already taken.
    #[error("El correo ya está registrado")]
    EmailTaken,

    /// A required registration field was left empty.
    #[error("Falta el campo: {0}")]
    MissingField(&'static str),

    /// The backend accepted the login but sent no token.
    #[error("La respuesta de autenticación no incluye un token")]
    MissingToken,

    /// Hashing a password failed.
    #[error("password hashing failed: {0}")]
    Hash(String),

    /// Store error.
    #[error("cache error: {0}")]
    Cache(#[from] tienda_store::CacheError),

    /// Backend error.
    #[error(transparent)]
    Fetch(#[from] tienda_client::FetchError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AuthError::InvalidCredentials => true,
            AuthError::Fetch(e) => matches!(e.status(), Some(401 | 403)),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(e: serde_json::Error) -> Self {
        AuthError::Serialization(e.to_string())
    }
}
