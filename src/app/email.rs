use crate::config::EmailConfig;
use crate::core::validate::{email_domain, is_valid_email_syntax, BannedDomains};
use crate::domain::ports::MxResolver;
use crate::utils::error::Result;

/// Address validation: syntax, then an MX record for the domain, then
/// (optionally) the disposable-domain list.
pub struct EmailValidator<R: MxResolver> {
    resolver: R,
    banned: BannedDomains,
    check_mx: bool,
}

impl<R: MxResolver> EmailValidator<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            banned: BannedDomains::builtin(),
            check_mx: true,
        }
    }

    /// Builtin list plus the configured file and extras.
    pub fn from_config(resolver: R, config: &EmailConfig) -> Result<Self> {
        let mut banned = BannedDomains::builtin();
        if let Some(path) = &config.banned_domains_file {
            banned.extend_from_list(&std::fs::read_to_string(path)?);
        }
        banned.extend(&config.extra_banned_domains);
        tracing::debug!("{} banned domains loaded", banned.len());

        Ok(Self {
            resolver,
            banned,
            check_mx: config.check_mx,
        })
    }

    pub fn without_mx_check(mut self) -> Self {
        self.check_mx = false;
        self
    }

    pub fn banned_domains(&self) -> &BannedDomains {
        &self.banned
    }

    /// `temp_allowed = false` rejects disposable-mail domains.
    pub async fn validate(&self, address: &str, temp_allowed: bool) -> bool {
        if !is_valid_email_syntax(address) {
            return false;
        }
        let Some(domain) = email_domain(address) else {
            return false;
        };

        if self.check_mx {
            match self.resolver.has_mx(domain).await {
                Ok(true) => {}
                Ok(false) => return false,
                Err(e) => {
                    tracing::warn!("MX lookup for {} failed: {}", domain, e);
                    return false;
                }
            }
        }

        temp_allowed || !self.banned.contains(domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::RecipeError;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::NamedTempFile;

    struct StaticMx {
        domains: Vec<&'static str>,
        lookups: AtomicUsize,
    }

    impl StaticMx {
        fn new(domains: Vec<&'static str>) -> Self {
            Self {
                domains,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MxResolver for StaticMx {
        async fn has_mx(&self, domain: &str) -> Result<bool> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            if domain == "broken.example" {
                return Err(RecipeError::ConfigError {
                    message: "resolver offline".to_string(),
                });
            }
            Ok(self.domains.iter().any(|d| *d == domain))
        }
    }

    #[tokio::test]
    async fn test_validate_with_mx() {
        let validator = EmailValidator::new(StaticMx::new(vec!["gmail.com", "mailinator.com"]));
        assert!(validator.validate("user@gmail.com", true).await);
        assert!(!validator.validate("user@nomx.example", true).await);
        assert!(!validator.validate("user@broken.example", true).await);
        assert!(!validator.validate("not-an-email", true).await);
        assert_eq!(validator.resolver.lookups.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_validate_temp_domains() {
        let validator = EmailValidator::new(StaticMx::new(vec!["mailinator.com"]));
        assert!(validator.validate("throwaway@mailinator.com", true).await);
        assert!(!validator.validate("throwaway@mailinator.com", false).await);
        assert!(!validator.validate("throwaway@MAILINATOR.com", false).await);
    }

    #[tokio::test]
    async fn test_validate_without_mx_check() {
        let validator = EmailValidator::new(StaticMx::new(vec![])).without_mx_check();
        assert!(validator.validate("user@anything.example", false).await);
        assert_eq!(validator.resolver.lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_from_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# local additions\nburner.example\n").unwrap();

        let config = EmailConfig {
            check_mx: false,
            banned_domains_file: Some(file.path().to_path_buf()),
            extra_banned_domains: vec!["Spam.Example".to_string()],
        };
        let validator = EmailValidator::from_config(StaticMx::new(vec![]), &config).unwrap();

        assert!(validator.banned_domains().contains("burner.example"));
        assert!(validator.banned_domains().contains("spam.example"));
        assert!(!validator.validate("me@burner.example", false).await);
        assert!(!validator.validate("me@spam.example", false).await);
        assert!(validator.validate("me@fine.example", false).await);

        let missing = EmailConfig {
            banned_domains_file: Some("/nonexistent/banned.txt".into()),
            ..EmailConfig::default()
        };
        assert!(EmailValidator::from_config(StaticMx::new(vec![]), &missing).is_err());
    }
}
