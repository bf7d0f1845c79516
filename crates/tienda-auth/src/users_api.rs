//! `/users`.

use crate::user::User;
use crate::AuthError;
use serde::Serialize;
use tienda_client::{ApiClient, HttpTransport};
use tienda_commerce::UserId;

/// Fields the backend accepts when creating or editing a user.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    /// Only sent when the password changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// `YYYY-MM-DDT00:00:00`.
    pub fecha_nac: Option<String>,
    pub is_admin: bool,
}

impl UserPayload {
    /// Payload for an edited user. `password` is the new password, if any.
    pub fn from_user(user: &User, password: Option<&str>) -> Self {
        Self {
            name: user.nombre.clone(),
            email: user.correo.clone(),
            password: password.filter(|p| !p.is_empty()).map(str::to_string),
            fecha_nac: user
                .fecha_nacimiento
                .as_deref()
                .filter(|d| !d.is_empty())
                .map(|d| {
                    if d.contains('T') {
                        d.to_string()
                    } else {
                        format!("{d}T00:00:00")
                    }
                }),
            is_admin: user.is_admin,
        }
    }
}

/// User administration endpoints.
pub struct UsersApi<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> UsersApi<'a, T> {
    pub fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<User>, AuthError> {
        let users: Option<Vec<User>> = self.client.get_json("/users").await?;
        Ok(users.unwrap_or_default())
    }

    pub async fn get(&self, id: &UserId) -> Result<User, AuthError> {
        Ok(self.client.get_json(&format!("/users/{id}")).await?)
    }

    pub async fn create(&self, payload: &UserPayload) -> Result<User, AuthError> {
        Ok(self.client.post_json("/users", payload).await?)
    }

    pub async fn update(&self, id: &UserId, payload: &UserPayload) -> Result<User, AuthError> {
        Ok(self.client.put_json(&format!("/users/{id}"), payload).await?)
    }

    pub async fn delete(&self, id: &UserId) -> Result<(), AuthError> {
        Ok(self.client.delete(&format!("/users/{id}")).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use tienda_client::{ClientConfig, Method};

    #[tokio::test]
    async fn test_crud_paths() {
        let transport = ScriptedTransport::default();
        transport
            .reply(200, r#"[{"id":1,"name":"Ana","email":"ana@duoc.cl"}]"#)
            .reply(200, r#"{"id":1,"name":"Ana María","email":"ana@duoc.cl","isAdmin":true}"#)
            .reply(204, "");
        let client = ApiClient::with_transport(ClientConfig::new("http://api.local"), transport.clone());
        let api = UsersApi::new(&client);

        let users = api.list().await.unwrap();
        assert_eq!(users[0].nombre, "Ana");

        let id = users[0].id.clone().unwrap();
        let mut edited = users[0].clone();
        edited.nombre = "Ana María".into();
        edited.is_admin = true;
        let updated = api
            .update(&id, &UserPayload::from_user(&edited, None))
            .await
            .unwrap();
        assert!(updated.is_admin());
        api.delete(&id).await.unwrap();

        let seen = transport.requests();
        assert_eq!(seen[1].method, Method::Put);
        assert_eq!(seen[1].url, "http://api.local/api/v1/users/1");
        assert_eq!(seen[2].method, Method::Delete);
        let body = transport.body_json(1);
        assert_eq!(body["name"], "Ana María");
        assert_eq!(body["isAdmin"], true);
        assert!(body.get("password").is_none());
    }

    #[test]
    fn test_payload_birth_date() {
        let user = User {
            fecha_nacimiento: Some("1999-12-31".into()),
            ..Default::default()
        };
        let payload = UserPayload::from_user(&user, Some("nueva"));
        assert_eq!(payload.fecha_nac.as_deref(), Some("1999-12-31T00:00:00"));
        assert_eq!(payload.password.as_deref(), Some("nueva"));
    }
}
