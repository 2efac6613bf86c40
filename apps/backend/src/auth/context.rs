//! Authenticated caller context attached to one request.

use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;

/// Identity derived from verified token claims during the authentication
/// stage. Shared read-only by the authorization and handler stages; lives
/// only as long as the request being handled.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthContext {
    pub sub: String,
    pub email: String,
    /// Game-mode allowlist carried over from the claims.
    pub modes: Option<Vec<String>>,
}

impl AuthContext {
    /// Authorization rule: `None` grants every mode, `Some(list)` grants
    /// only the listed identifiers.
    pub fn may_access(&self, mode: &str) -> bool {
        match &self.modes {
            None => true,
            Some(allowed) => allowed.iter().any(|m| m == mode),
        }
    }
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
            modes: claims.modes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthContext;

    fn ctx(modes: Option<Vec<&str>>) -> AuthContext {
        AuthContext {
            sub: "player-1".to_string(),
            email: "player@example.com".to_string(),
            modes: modes.map(|m| m.into_iter().map(String::from).collect()),
        }
    }

    #[test]
    fn no_allowlist_grants_all_modes() {
        assert!(ctx(None).may_access("blackjack"));
        assert!(ctx(None).may_access("poker"));
    }

    #[test]
    fn allowlist_grants_only_listed_modes() {
        let ctx = ctx(Some(vec!["blackjack"]));
        assert!(ctx.may_access("blackjack"));
        assert!(!ctx.may_access("poker"));
    }

    #[test]
    fn empty_allowlist_grants_nothing() {
        assert!(!ctx(Some(vec![])).may_access("blackjack"));
    }
}
