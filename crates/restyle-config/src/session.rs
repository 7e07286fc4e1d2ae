use serde::Deserialize;

/// How the signed-in user is identified on incoming requests
///
/// Sessions are terminated by the layer in front of this service, which
/// forwards the authenticated user id in a trusted header.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Header carrying the authenticated user id
    #[serde(default = "default_user_header")]
    pub user_header: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_header: default_user_header(),
        }
    }
}

fn default_user_header() -> String {
    "x-user-id".to_string()
}
