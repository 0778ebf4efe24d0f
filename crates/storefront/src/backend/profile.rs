//! Profile endpoints.

use reqwest::Method;
use tracing::{info, instrument};

use super::HttpGateway;
use crate::error::{ClientError, Result};
use crate::models::{PasswordChange, ProfileUpdate, UserProfile};

const PROFILE_PATH: &str = "api/users/profile";
const CHANGE_PASSWORD_PATH: &str = "api/users/change-password";

/// Profile endpoints. All require a logged-in user.
#[derive(Debug, Clone)]
pub struct ProfileApi {
    gateway: HttpGateway,
}

impl ProfileApi {
    #[must_use]
    pub const fn new(gateway: HttpGateway) -> Self {
        Self { gateway }
    }

    /// The logged-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns the gateway's error.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<UserProfile> {
        self.gateway.get(PROFILE_PATH).await
    }

    /// Update the profile after trimming and validating every field.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without sending when a field is
    /// invalid, otherwise the gateway's error.
    #[instrument(skip_all)]
    pub async fn update(&self, update: ProfileUpdate) -> Result<UserProfile> {
        let update = update.trimmed();
        update.validate().map_err(ClientError::Validation)?;

        let profile = self.gateway.put(PROFILE_PATH, &update).await?;
        info!("Profile updated");
        Ok(profile)
    }

    /// Change the password.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Validation` without sending for a short new
    /// password, otherwise the gateway's error.
    #[instrument(skip_all)]
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        change.validate().map_err(ClientError::Validation)?;
        self.gateway
            .execute(Method::PUT, CHANGE_PASSWORD_PATH, Some(change))
            .await?;
        info!("Password changed");
        Ok(())
    }
}
