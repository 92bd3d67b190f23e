use serde::{Deserialize, Serialize};

/// JWT payload issued to an authenticated user.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }

    pub fn is_admin(&self) -> bool {
        self.0.admin
    }
}
