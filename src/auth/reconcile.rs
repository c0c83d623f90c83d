//! Mapping an external profile onto a local user record

use tracing::{debug, info, warn};

use super::models::User;
use super::provider::ExternalProfile;
use crate::common::{safe_email_log, ApiError};
use crate::services::{NewUser, UserService};

/// Resolve the local user for a provider profile, creating or linking as needed
///
/// 1. A user already carrying this provider id is returned as-is.
/// 2. Otherwise the profile must supply an email, or the flow aborts with
///    `ProviderDataIncomplete` and nothing is written.
/// 3. A user with that email is linked to the provider id if it has none,
///    or returned unchanged if it is already linked (even to another id).
/// 4. Failing all of the above a new user is created.
///
/// Two concurrent first logins for the same person race on the unique
/// constraints; the loser gets `ApiError::Conflict`.
pub async fn reconcile_user(
    users: &UserService,
    profile: &ExternalProfile,
) -> Result<User, ApiError> {
    if let Some(user) = users.find_by_google_id(&profile.provider_id).await? {
        debug!(user_id = %user.id, provider_id = %profile.provider_id, "Found existing user by provider id");
        return Ok(user);
    }

    let email = profile.primary_email().ok_or_else(|| {
        warn!(
            provider_id = %profile.provider_id,
            "Provider profile has no email; was the email scope granted?"
        );
        ApiError::ProviderDataIncomplete(
            "Email not provided by the identity provider. Ensure the 'email' scope is requested and granted."
                .to_string(),
        )
    })?;

    if let Some(existing) = users.find_by_email(&email).await? {
        let Some(linked) = existing.google_id.as_deref() else {
            info!(
                user_id = %existing.id,
                email = %safe_email_log(&email),
                provider_id = %profile.provider_id,
                "Linking provider id to existing user"
            );
            return users
                .link_google_id(
                    &existing.id,
                    &profile.provider_id,
                    profile.display_name.as_deref(),
                )
                .await;
        };

        if linked != profile.provider_id {
            warn!(
                user_id = %existing.id,
                stored_provider_id = %linked,
                provider_id = %profile.provider_id,
                "Email matches a user linked to a different provider id; returning stored user"
            );
        }
        return Ok(existing);
    }

    let user = users
        .create(NewUser {
            google_id: Some(profile.provider_id.clone()),
            display_name: profile.display_name.clone(),
            first_name: Some(profile.given_name.clone().unwrap_or_default()),
            last_name: Some(profile.family_name.clone().unwrap_or_default()),
            email,
        })
        .await?;

    info!(
        user_id = %user.id,
        email = %safe_email_log(&user.email),
        provider_id = %profile.provider_id,
        "New user account created via OAuth"
    );

    Ok(user)
}
