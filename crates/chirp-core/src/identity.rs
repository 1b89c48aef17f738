use chirp_db::models::{self, NewUser, ProfileUpdate};
use chirp_types::forms::{ProfileForm, SignupForm};
use chirp_types::models::{User, UserStats};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreError, Result};
use crate::password::{hash_password, verify_password};
use crate::{Chirp, Session};

const USERNAME_MAX_LEN: usize = 30;

impl Chirp {
    /// Register a new user. The password is hashed before it reaches the
    /// store; a taken username or email is `CoreError::Uniqueness` and
    /// leaves no row behind.
    pub fn signup(&self, form: &SignupForm) -> Result<User> {
        let username = validate_username(&form.username)?;
        let email = validate_email(&form.email)?;
        if form.password.is_empty() {
            return Err(CoreError::invalid("password", "must not be empty"));
        }

        let password_hash = hash_password(&form.password)?;
        let image_url = self.image_or_default(form.image_url.as_deref().unwrap_or(""));

        let row = self.db.insert_user(&NewUser {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash: &password_hash,
            image_url,
            header_image_url: &self.config.default_header_image_url,
        })?;

        info!(user_id = %row.id, username = %row.username, "user signed up");
        Ok(row.into_user()?)
    }

    /// Look up `username` and check `password`. Unknown users and wrong
    /// passwords both come back as `Ok(None)`; only missing input is an error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        if username.trim().is_empty() {
            return Err(CoreError::invalid("username", "must not be empty"));
        }
        if password.is_empty() {
            return Err(CoreError::invalid("password", "must not be empty"));
        }

        let Some(row) = self.db.get_user_by_username(username.trim())? else {
            warn!(username, "login for unknown user");
            return Ok(None);
        };

        if !verify_password(password, &row.password)? {
            warn!(user_id = %row.id, "login with wrong password");
            return Ok(None);
        }

        Ok(Some(row.into_user()?))
    }

    pub fn get_user(&self, id: Uuid) -> Result<User> {
        let row = self.db.get_user_by_id(id)?.ok_or(CoreError::NotFound("user"))?;
        Ok(row.into_user()?)
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<User> {
        let row = self
            .db
            .get_user_by_username(username)?
            .ok_or(CoreError::NotFound("user"))?;
        Ok(row.into_user()?)
    }

    /// Directory listing, optionally filtered by a username fragment.
    pub fn list_users(&self, query: Option<&str>) -> Result<Vec<User>> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        Ok(models::into_users(self.db.list_users(query)?)?)
    }

    pub fn user_stats(&self, id: Uuid) -> Result<UserStats> {
        if !self.db.user_exists(id)? {
            return Err(CoreError::NotFound("user"));
        }
        Ok(self.db.user_stats(id)?)
    }

    /// Edit the signed-in user's own profile. The current password has to
    /// check out, otherwise the edit is rejected as unauthorized.
    pub fn update_profile(
        &self,
        session: &Session,
        form: &ProfileForm,
        password: &str,
    ) -> Result<User> {
        let me = self.authorize(session)?;

        let row = self.db.get_user_by_id(me.id)?.ok_or(CoreError::Unauthorized)?;
        if password.is_empty() || !verify_password(password, &row.password)? {
            warn!(user_id = %me.id, "profile edit with wrong password");
            return Err(CoreError::Unauthorized);
        }

        let username = validate_username(&form.username)?;
        let email = validate_email(&form.email)?;
        let bio = non_empty(&form.bio);
        let location = non_empty(&form.location);

        let updated = self.db.update_profile(
            me.id,
            &ProfileUpdate {
                username,
                email,
                image_url: self.image_or_default(&form.image_url),
                header_image_url: self.header_or_default(&form.header_image_url),
                bio,
                location,
            },
        )?;
        if !updated {
            return Err(CoreError::NotFound("user"));
        }

        debug!(user_id = %me.id, "profile updated");
        self.get_user(me.id)
    }

    /// Administrative removal. Takes the user's messages, likes and follow
    /// edges with it.
    pub fn delete_user(&self, id: Uuid) -> Result<()> {
        if !self.db.delete_user(id)? {
            return Err(CoreError::NotFound("user"));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    fn image_or_default<'a>(&'a self, url: &'a str) -> &'a str {
        non_empty(url).unwrap_or(self.config.default_image_url.as_str())
    }

    fn header_or_default<'a>(&'a self, url: &'a str) -> &'a str {
        non_empty(url).unwrap_or(self.config.default_header_image_url.as_str())
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn validate_username(raw: &str) -> Result<&str> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(CoreError::invalid("username", "must not be empty"));
    }
    if username.chars().count() > USERNAME_MAX_LEN {
        return Err(CoreError::invalid(
            "username",
            format!("must be at most {USERNAME_MAX_LEN} characters"),
        ));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(CoreError::invalid("username", "must not contain whitespace"));
    }
    Ok(username)
}

fn validate_email(raw: &str) -> Result<&str> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CoreError::invalid("email", "must not be empty"));
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
        {
            Ok(email)
        }
        _ => Err(CoreError::invalid("email", "must look like name@domain")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usernames() {
        assert_eq!(validate_username("  user1 ").unwrap(), "user1");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"x".repeat(31)).is_err());
        assert!(validate_username(&"x".repeat(30)).is_ok());
    }

    #[test]
    fn emails() {
        assert_eq!(validate_email("a@b.c").unwrap(), "a@b.c");
        assert!(validate_email("").is_err());
        assert!(validate_email("nobody").is_err());
        assert!(validate_email("@b.c").is_err());
        assert!(validate_email("a@").is_err());
        assert!(validate_email("a@b@c").is_err());
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty("  hi "), Some("hi"));
        assert_eq!(non_empty("   "), None);
    }
}
