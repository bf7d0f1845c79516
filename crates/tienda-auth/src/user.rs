//! User records and the local user list.

use crate::AuthError;
use serde::{Deserialize, Serialize};
use tienda_commerce::UserId;
use tienda_store::{keys, Cache, Storage};

/// A registered user.
///
/// Local records use the Spanish field names; backend payloads (`name`,
/// `email`, `password`, `fechaNac`) are accepted on input.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend id. Users registered locally have none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default, alias = "name")]
    pub nombre: String,
    #[serde(default, alias = "email")]
    pub correo: String,
    /// Argon2 hash, or the plain password on legacy records.
    #[serde(default, alias = "password", skip_serializing_if = "String::is_empty")]
    pub contrasena: String,
    #[serde(default, alias = "fechaNac", skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    /// Account type; `admin` grants the admin pages.
    #[serde(default, alias = "rol", alias = "role", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_admin: bool,
}

impl User {
    /// Whether this user may use the admin pages.
    pub fn is_admin(&self) -> bool {
        self.is_admin
            || self.nombre == "admin"
            || self
                .tipo
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("admin"))
    }

    /// A copy without the password, for the session record.
    pub fn without_password(&self) -> Self {
        Self {
            contrasena: String::new(),
            ..self.clone()
        }
    }

    /// Whether `usuario` names this user, by email or by name.
    pub fn matches_login(&self, usuario: &str) -> bool {
        self.correo == usuario || self.nombre == usuario
    }
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub nombre: String,
    pub correo: String,
    pub contrasena: String,
    #[serde(default)]
    pub fecha_nacimiento: Option<String>,
}

impl NewUser {
    pub fn new(
        nombre: impl Into<String>,
        correo: impl Into<String>,
        contrasena: impl Into<String>,
    ) -> Self {
        Self {
            nombre: nombre.into(),
            correo: correo.into(),
            contrasena: contrasena.into(),
            fecha_nacimiento: None,
        }
    }

    /// Every field but the birth date is required.
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.nombre.trim().is_empty() {
            return Err(AuthError::MissingField("nombre"));
        }
        if self.correo.trim().is_empty() {
            return Err(AuthError::MissingField("correo"));
        }
        if self.contrasena.is_empty() {
            return Err(AuthError::MissingField("contrasena"));
        }
        Ok(())
    }
}

/// The user list kept in the store under `users`.
pub struct UserRepository<S> {
    cache: Cache<S>,
}

impl<S: Storage> UserRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            cache: Cache::new(store),
        }
    }

    /// All users. A missing or unreadable list is empty.
    pub fn get_users(&self) -> Result<Vec<User>, AuthError> {
        Ok(self.cache.get_or_default(keys::USERS)?)
    }

    pub fn save_users(&self, users: &[User]) -> Result<(), AuthError> {
        self.cache.set(keys::USERS, users)?;
        Ok(())
    }

    pub fn find_by_correo(&self, correo: &str) -> Result<Option<User>, AuthError> {
        Ok(self.get_users()?.into_iter().find(|u| u.correo == correo))
    }

    /// Remove the user with this email. Returns whether one was removed.
    pub fn delete_user(&self, correo: &str) -> Result<bool, AuthError> {
        let mut users = self.get_users()?;
        let before = users.len();
        users.retain(|u| u.correo != correo);
        if users.len() == before {
            return Ok(false);
        }
        self.save_users(&users)?;
        Ok(true)
    }

    /// Grant or revoke admin rights.
    pub fn set_admin(&self, correo: &str, is_admin: bool) -> Result<User, AuthError> {
        self.modify(correo, |user| user.is_admin = is_admin)
    }

    /// Apply `change` to the user with this email and save the list.
    pub fn modify(&self, correo: &str, change: impl FnOnce(&mut User)) -> Result<User, AuthError> {
        let mut users = self.get_users()?;
        let user = users
            .iter_mut()
            .find(|u| u.correo == correo)
            .ok_or_else(|| AuthError::UserNotFound(correo.to_string()))?;
        change(user);
        let updated = user.clone();
        self.save_users(&users)?;
        Ok(updated)
    }
}
