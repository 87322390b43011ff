//! Personal info profile.
//!
//! Every field has a bracketed placeholder shown until the user fills it
//! in. Saving a blank field restores its placeholder.

use serde::{Deserialize, Serialize};

const NAME_PLACEHOLDER: &str = "[Dein Name]";
const TITLE_PLACEHOLDER: &str = "[Deine Berufsbezeichnung/Rolle]";
const LOCATION_PLACEHOLDER: &str = "[Dein Standort]";
const ABOUT_PLACEHOLDER: &str = "[Hier kannst du eine persönliche Beschreibung über dich einfügen. \
Erzähle von deinen Interessen, deiner Motivation und was dich antreibt. \
Dies ist dein Raum, um dich vorzustellen.]";
const EMAIL_PLACEHOLDER: &str = "[deine-email]";
const GITHUB_PLACEHOLDER: &str = "https://github.com/[dein-username]";
const LINKEDIN_PLACEHOLDER: &str = "https://linkedin.com/in/[dein-profil]";
const PORTFOLIO_PLACEHOLDER: &str = "[deine-portfolio-url]";

/// The stored profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Display name.
    pub name: String,
    /// Job title or role.
    pub title: String,
    /// Location.
    pub location: String,
    /// Free-text self description.
    pub about: String,
    /// Contact email.
    pub email: String,
    /// GitHub profile URL.
    pub github: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
    /// Portfolio URL.
    pub portfolio: String,
}

/// Editable profile fields; blank means "use the placeholder".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    /// Display name.
    pub name: String,
    /// Job title or role.
    pub title: String,
    /// Location.
    pub location: String,
    /// Free-text self description.
    pub about: String,
    /// Contact email.
    pub email: String,
    /// GitHub profile URL.
    pub github: String,
    /// LinkedIn profile URL.
    pub linkedin: String,
    /// Portfolio URL.
    pub portfolio: String,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            name: NAME_PLACEHOLDER.to_string(),
            title: TITLE_PLACEHOLDER.to_string(),
            location: LOCATION_PLACEHOLDER.to_string(),
            about: ABOUT_PLACEHOLDER.to_string(),
            email: EMAIL_PLACEHOLDER.to_string(),
            github: GITHUB_PLACEHOLDER.to_string(),
            linkedin: LINKEDIN_PLACEHOLDER.to_string(),
            portfolio: PORTFOLIO_PLACEHOLDER.to_string(),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

fn unless_placeholder(value: &str, is_placeholder: bool) -> String {
    if is_placeholder {
        String::new()
    } else {
        value.to_string()
    }
}

impl PersonalInfo {
    /// Build a profile from a draft, trimming fields and restoring placeholders for blanks.
    #[must_use]
    pub fn from_draft(draft: &ProfileDraft) -> Self {
        Self {
            name: or_placeholder(&draft.name, NAME_PLACEHOLDER),
            title: or_placeholder(&draft.title, TITLE_PLACEHOLDER),
            location: or_placeholder(&draft.location, LOCATION_PLACEHOLDER),
            about: or_placeholder(&draft.about, ABOUT_PLACEHOLDER),
            email: or_placeholder(&draft.email, EMAIL_PLACEHOLDER),
            github: or_placeholder(&draft.github, GITHUB_PLACEHOLDER),
            linkedin: or_placeholder(&draft.linkedin, LINKEDIN_PLACEHOLDER),
            portfolio: or_placeholder(&draft.portfolio, PORTFOLIO_PLACEHOLDER),
        }
    }

    /// The edit form contents: fields still holding a placeholder come back blank.
    #[must_use]
    pub fn editable(&self) -> ProfileDraft {
        ProfileDraft {
            name: unless_placeholder(&self.name, self.name == NAME_PLACEHOLDER),
            title: unless_placeholder(&self.title, self.title == TITLE_PLACEHOLDER),
            location: unless_placeholder(&self.location, self.location == LOCATION_PLACEHOLDER),
            about: unless_placeholder(&self.about, self.about.starts_with("[Hier kannst du")),
            email: unless_placeholder(&self.email, self.email == EMAIL_PLACEHOLDER),
            github: unless_placeholder(&self.github, self.github.contains("[dein-username]")),
            linkedin: unless_placeholder(&self.linkedin, self.linkedin.contains("[dein-profil]")),
            portfolio: unless_placeholder(&self.portfolio, self.portfolio == PORTFOLIO_PLACEHOLDER),
        }
    }

    /// `mailto:` link for the email field.
    #[must_use]
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }
}
