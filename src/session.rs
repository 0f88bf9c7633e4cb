use anyhow::ensure;

pub const EMAIL_DOMAIN: &str = "example.com";

/// Identity of the logged-in student plus the store id once it is known.
///
/// Created at login and consumed at logout. Only the synchronizer writes `known_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    username: String,
    email: String,
    known_id: Option<i64>,
}

impl Session {
    /// `username` comes from the external login collaborator; no credentials are checked here.
    pub fn login(username: &str) -> anyhow::Result<Self> {
        let username = username.trim();
        ensure!(!username.is_empty(), "username must not be empty");
        ensure!(
            !username.chars().any(|c| c.is_whitespace() || c == '@'),
            "username {username:?} must not contain whitespace or '@'"
        );

        Ok(Self {
            username: username.to_string(),
            email: format!("{username}@{EMAIL_DOMAIN}"),
            known_id: None,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> String {
        format!("Student {}", self.username)
    }

    pub fn known_id(&self) -> Option<i64> {
        self.known_id
    }

    pub(crate) fn remember_id(&mut self, id: i64) {
        self.known_id = Some(id);
    }

    /// Ends the session; the remembered id goes with it.
    pub fn logout(self) -> String {
        self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_derives_email_and_name() {
        let session = Session::login("24CS010").unwrap();
        assert_eq!(session.email(), "24CS010@example.com");
        assert_eq!(session.display_name(), "Student 24CS010");
        assert_eq!(session.known_id(), None);
    }

    #[test]
    fn login_trims_surrounding_whitespace() {
        let session = Session::login("  24CS022 ").unwrap();
        assert_eq!(session.email(), "24CS022@example.com");
    }

    #[test]
    fn login_rejects_bad_usernames() {
        assert!(Session::login("").is_err());
        assert!(Session::login("   ").is_err());
        assert!(Session::login("a b").is_err());
        assert!(Session::login("me@else.org").is_err());
    }

    #[test]
    fn logout_drops_known_id() {
        let mut session = Session::login("24CS010").unwrap();
        session.remember_id(4);
        assert_eq!(session.known_id(), Some(4));
        let username = session.logout();
        let fresh = Session::login(&username).unwrap();
        assert_eq!(fresh.known_id(), None);
    }
}
