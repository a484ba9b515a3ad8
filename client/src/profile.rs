use reqwest::Method;
use shared::{CareerProfile, CareerProfileUpdate};

use crate::{ApiClient, Auth, Result};

impl ApiClient {
    pub async fn career_profile(&self) -> Result<Option<CareerProfile>> {
        let request = self.request(Method::GET, "/user/profile", Auth::Session)?;
        match self.send::<CareerProfile>(request).await {
            Ok(profile) => Ok(Some(profile)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Upserts the profile; unset fields are left untouched server-side.
    pub async fn update_career_profile(
        &self,
        update: &CareerProfileUpdate,
    ) -> Result<CareerProfile> {
        let request = self
            .request(Method::PUT, "/user/profile", Auth::Session)?
            .json(update);
        self.send(request).await
    }
}
