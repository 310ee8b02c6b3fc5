use serde::{Deserialize, Serialize};

/// A user record as returned by the identity directory. Only the fields the
/// feed needs are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryUser {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl DirectoryUser {
    /// Given and family name joined by a space, skipping absent or blank
    /// parts. Falls back to the username, then to an empty string.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();

        if !parts.is_empty() {
            return parts.join(" ");
        }

        self.username
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: String,
    pub name: String,
    pub profile_image_url: String,
}

impl From<DirectoryUser> for AuthorView {
    fn from(user: DirectoryUser) -> Self {
        let name = user.display_name();
        AuthorView {
            profile_image_url: user
                .profile_image_url
                .or(user.image_url)
                .unwrap_or_default(),
            id: user.id,
            name,
        }
    }
}
