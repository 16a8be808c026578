use std::str::FromStr;

use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use serde::{Deserialize, Serialize};

/// Closed set of roles known to every layer. The session service in front
/// of this api authenticates the user and forwards id and role as headers;
/// no free-form role strings exist past this point.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
pub enum Role {
    Admin,
    Engineer,
    Driver,
}

impl Role {
    /// roles allowed to mutate teams, cars, parts and simulations
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin | Role::Engineer)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(value: &str) -> Result<Role, ()> {
        match value {
            "Admin" => Ok(Role::Admin),
            "Engineer" => Ok(Role::Engineer),
            "Driver" => Ok(Role::Driver),
            _ => Err(()),
        }
    }
}

/// The authenticated caller, as forwarded by the session collaborator in
/// the `X-User-Id` and `X-User-Role` headers.
#[derive(Clone, Copy, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub role: Role,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthUser {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<AuthUser, ()> {
        let user_id = request
            .headers()
            .get_one("X-User-Id")
            .and_then(|value| value.parse::<i32>().ok());
        let role = request
            .headers()
            .get_one("X-User-Role")
            .and_then(|value| value.parse::<Role>().ok());

        match (user_id, role) {
            (Some(user_id), Some(role)) => Outcome::Success(AuthUser { user_id, role }),
            _ => Outcome::Error((Status::Unauthorized, ())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!("Admin".parse(), Ok(Role::Admin));
        assert_eq!("Engineer".parse(), Ok(Role::Engineer));
        assert_eq!("Driver".parse(), Ok(Role::Driver));
    }

    #[test]
    fn rejects_unknown_roles() {
        assert_eq!("Administrador".parse::<Role>(), Err(()));
        assert_eq!("admin".parse::<Role>(), Err(()));
        assert_eq!("".parse::<Role>(), Err(()));
    }

    #[test]
    fn drivers_are_read_only() {
        assert!(Role::Admin.can_manage());
        assert!(Role::Engineer.can_manage());
        assert!(!Role::Driver.can_manage());
        assert!(!Role::Engineer.is_admin());
    }
}
