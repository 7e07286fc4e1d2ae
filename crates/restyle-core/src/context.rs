/// Per-request context handed to endpoint handlers
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Signed-in user, if the session layer identified one
    pub user: Option<UserIdentity>,
}

impl RequestContext {
    /// Id of the signed-in user
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.user_id.as_str())
    }
}

/// Authenticated user as established by the session layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Stable user identifier
    pub user_id: String,
}

impl UserIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }
}
