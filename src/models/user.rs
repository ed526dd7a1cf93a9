/// The authenticated identity a session carries. Passed explicitly into
/// every call that needs it; nothing reads a global "current user".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub display_name: String,
}

impl User {
    /// Short greeting name: first word of the display name, falling
    /// back to the email's local part.
    pub fn short_name(&self) -> &str {
        let name = self.display_name.split_whitespace().next();
        match name {
            Some(n) => n,
            None => self.email.split('@').next().unwrap_or(&self.email),
        }
    }
}

/// A stored account record, including the password hash. Only the auth
/// module should look inside; everything else works with [User].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub uid: String,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
}

impl Profile {
    pub fn user(&self) -> User {
        User {
            uid: self.uid.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}
