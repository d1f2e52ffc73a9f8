// Token session establishment
//
// The controller accepts a static API token on every request. The profile
// endpoint validates it and tells us which tenant all further URLs are
// scoped to.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::CgxClient;
use crate::rest::models::Profile;

const PROFILE_VERSION: &str = "v2.1";

impl CgxClient {
    /// Validate the token and resolve the tenant id.
    ///
    /// `GET /v2.1/api/profile`. Any failure here is reported as
    /// [`Error::Authentication`]: without a tenant no other call can work.
    pub async fn login_with_token(&self) -> Result<Profile, Error> {
        let url = self.api_url(PROFILE_VERSION, "profile")?;
        debug!("validating token against {}", url);

        let profile: Profile = self.get(url).await.map_err(|e| match e {
            Error::Authentication { .. } => e,
            other => Error::Authentication {
                message: format!("profile lookup failed: {other}"),
            },
        })?;

        if profile.tenant_id.is_empty() {
            return Err(Error::Authentication {
                message: "profile carries no tenant id".into(),
            });
        }

        self.set_tenant_id(profile.tenant_id.clone());
        debug!("token session established");
        Ok(profile)
    }
}
