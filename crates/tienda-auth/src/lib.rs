//! Authentication for the Tienda storefront.
//!
//! Two ways to hold an account:
//!
//! - [`LocalAuth`]: users live in the store under `users`, the session under
//!   `currentUser`.
//! - [`RemoteAuth`]: the backend owns the users; the JWT it returns is kept
//!   under `jwt_token`, where `tienda_client::ApiClient` picks it up.

mod error;
mod local;
mod password;
mod remote;
mod user;
mod users_api;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AuthError;
pub use local::LocalAuth;
pub use password::PasswordHasher;
pub use remote::RemoteAuth;
pub use user::{NewUser, User, UserRepository};
pub use users_api::{UserPayload, UsersApi};
