use crate::errors::AppError;
use crate::locale::Locale;
use crate::models::profile::UserProfile;

/// Holds one session's profile. Initialized lazily to the locale defaults and
/// replaced wholesale on save.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    locale: Locale,
    profile: Option<UserProfile>,
}

impl ProfileStore {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            profile: None,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns the session profile, creating the default one on first access.
    pub fn get_current_profile(&mut self) -> UserProfile {
        let locale = self.locale;
        self.profile
            .get_or_insert_with(|| UserProfile::default_for(locale))
            .clone()
    }

    /// Replaces the session profile. An incomplete profile is rejected and the
    /// stored one is left untouched.
    pub fn save_profile(&mut self, profile: UserProfile) -> Result<(), AppError> {
        profile.validate()?;
        self.profile = Some(profile);
        Ok(())
    }
}
