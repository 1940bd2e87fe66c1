use secrecy::SecretString;

/// Process-wide configuration: loaded once at startup, read-only afterwards.
#[derive(Clone)]
pub struct GlobalArgs {
    secret: SecretString,
    frontend_url: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(secret: SecretString, frontend_url: String) -> Self {
        Self {
            secret,
            frontend_url,
        }
    }

    #[must_use]
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    #[must_use]
    pub fn frontend_url(&self) -> &str {
        &self.frontend_url
    }

    /// Session cookies are only marked `Secure` when the frontend is served
    /// over HTTPS.
    #[must_use]
    pub fn cookie_secure(&self) -> bool {
        self.frontend_url.starts_with("https://")
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("secret", &"***")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(
            SecretString::from("super-secret".to_string()),
            "http://localhost:3000".to_string(),
        );
        assert_eq!(args.secret().expose_secret(), "super-secret");
        assert_eq!(args.frontend_url(), "http://localhost:3000");
        assert!(!args.cookie_secure());
    }

    #[test]
    fn test_cookie_secure_follows_frontend_scheme() {
        let args = GlobalArgs::new(
            SecretString::from("super-secret".to_string()),
            "https://handyhub.dev".to_string(),
        );
        assert!(args.cookie_secure());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let args = GlobalArgs::new(
            SecretString::from("super-secret".to_string()),
            "http://localhost:3000".to_string(),
        );
        let debug = format!("{args:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }
}
