//! DTO for the identity provider's session-data payload.

use serde::Deserialize;

use crate::domain::{EmailAddress, ExternalIdentity, SessionToken};

#[derive(Debug, Deserialize)]
pub(super) struct SessionDataDto {
    pub(super) email: String,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) picture: Option<String>,
    pub(super) session_token: String,
}

impl SessionDataDto {
    pub(super) fn into_identity(self) -> Result<ExternalIdentity, String> {
        let email = EmailAddress::new(&self.email).map_err(|err| err.to_string())?;
        let session_token = SessionToken::new(self.session_token).map_err(|err| err.to_string())?;
        let name = self
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| email.as_str().to_owned());
        let picture = self.picture.filter(|url| !url.trim().is_empty());
        Ok(ExternalIdentity {
            email,
            name,
            picture,
            session_token,
        })
    }
}
