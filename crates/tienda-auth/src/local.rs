//! Accounts kept entirely in the store.

use crate::user::{NewUser, User, UserRepository};
use crate::{AuthError, PasswordHasher};
use tienda_store::{keys, Cache, Storage};

/// Registration and login against the local user list.
///
/// The logged-in user is kept under `currentUser`, without its password.
pub struct LocalAuth<S> {
    users: UserRepository<S>,
    cache: Cache<S>,
    hasher: PasswordHasher,
}

impl<S: Storage + Clone> LocalAuth<S> {
    pub fn new(store: S) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            cache: Cache::new(store),
            hasher: PasswordHasher::new(),
        }
    }

    pub fn users(&self) -> &UserRepository<S> {
        &self.users
    }

    /// Create an account and log it in.
    pub fn register_user(&self, new_user: NewUser) -> Result<User, AuthError> {
        new_user.validate()?;
        let mut users = self.users.get_users()?;
        if users.iter().any(|u| u.correo == new_user.correo) {
            return Err(AuthError::EmailTaken);
        }

        let user = User {
            nombre: new_user.nombre,
            correo: new_user.correo,
            contrasena: self.hasher.hash(&new_user.contrasena)?,
            fecha_nacimiento: new_user.fecha_nacimiento,
            ..Default::default()
        };
        users.push(user.clone());
        self.users.save_users(&users)?;
        self.set_current(&user)?;
        tracing::info!(correo = %user.correo, "user registered");
        Ok(user.without_password())
    }

    /// Log in by email or name.
    ///
    /// A legacy plain-text password is replaced with its hash on the first
    /// successful login.
    pub fn login(&self, usuario: &str, password: &str) -> Result<User, AuthError> {
        let mut users = self.users.get_users()?;
        let Some(found) = users.iter_mut().find(|u| u.matches_login(usuario)) else {
            return Err(AuthError::InvalidCredentials);
        };
        if !self.hasher.verify(password, &found.contrasena) {
            return Err(AuthError::InvalidCredentials);
        }

        let user = if PasswordHasher::needs_rehash(&found.contrasena) {
            found.contrasena = self.hasher.hash(password)?;
            let user = found.clone();
            self.users.save_users(&users)?;
            tracing::debug!(correo = %user.correo, "upgraded legacy password");
            user
        } else {
            found.clone()
        };

        self.set_current(&user)?;
        Ok(user.without_password())
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.cache.delete(keys::CURRENT_USER)?;
        Ok(())
    }

    /// The logged-in user. An unreadable session record counts as nobody.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        Ok(self.cache.get_or_default(keys::CURRENT_USER)?)
    }

    /// Whether the logged-in user is an admin.
    pub fn is_admin(&self) -> Result<bool, AuthError> {
        Ok(self.current_user()?.is_some_and(|u| u.is_admin()))
    }

    fn set_current(&self, user: &User) -> Result<(), AuthError> {
        self.cache.set(keys::CURRENT_USER, &user.without_password())?;
        Ok(())
    }
}
