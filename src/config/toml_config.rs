use crate::utils::error::{RecipeError, Result};
use crate::utils::validation::{validate_endpoint, validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

/// Runtime settings, usually read from a `recipe.toml`. Every section is
/// optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeConfig {
    pub http: HttpConfig,
    pub endpoints: EndpointConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub max_redirects: usize,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 10,
            max_redirects: 10,
            user_agent: None,
        }
    }
}

/// Base URLs of the third-party services behind the web helpers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub google_suggest: String,
    pub tinyurl: String,
    pub geoplugin: String,
    pub wikipedia: String,
    pub alexa: String,
    pub pagerank: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            google_suggest: "http://suggestqueries.google.com/complete/search".to_string(),
            tinyurl: "http://tinyurl.com/api-create.php".to_string(),
            geoplugin: "http://www.geoplugin.net/json.gp".to_string(),
            wikipedia: "http://wikipedia.org/w/api.php".to_string(),
            alexa: "http://data.alexa.com/data".to_string(),
            pagerank: "http://toolbarqueries.google.com/tbr".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Every endpoint rooted at `base`, keeping each default path. Handy for
    /// pointing the whole set at a mock server.
    pub fn rooted_at(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            google_suggest: format!("{}/complete/search", base),
            tinyurl: format!("{}/api-create.php", base),
            geoplugin: format!("{}/json.gp", base),
            wikipedia: format!("{}/w/api.php", base),
            alexa: format!("{}/data", base),
            pagerank: format!("{}/tbr", base),
        }
    }

    fn named(&self) -> [(&'static str, &str); 6] {
        [
            ("endpoints.google_suggest", self.google_suggest.as_str()),
            ("endpoints.tinyurl", self.tinyurl.as_str()),
            ("endpoints.geoplugin", self.geoplugin.as_str()),
            ("endpoints.wikipedia", self.wikipedia.as_str()),
            ("endpoints.alexa", self.alexa.as_str()),
            ("endpoints.pagerank", self.pagerank.as_str()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub check_mx: bool,
    /// One domain per line; `#` starts a comment.
    pub banned_domains_file: Option<PathBuf>,
    pub extra_banned_domains: Vec<String>,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            check_mx: true,
            banned_domains_file: None,
            extra_banned_domains: Vec::new(),
        }
    }
}

impl RecipeConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| RecipeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables stay as
    /// written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let name = &caps[1];
                std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
            })
            .into_owned()
    }
}

impl Validate for RecipeConfig {
    fn validate(&self) -> Result<()> {
        validate_range("http.timeout_seconds", self.http.timeout_seconds, 1, 300)?;
        validate_range("http.max_redirects", self.http.max_redirects, 0, 50)?;

        for (field, url) in self.endpoints.named() {
            validate_endpoint(field, url)?;
        }

        if let Some(path) = &self.email.banned_domains_file {
            validate_path("email.banned_domains_file", &path.to_string_lossy())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RecipeConfig::from_toml_str("").unwrap();
        assert_eq!(config, RecipeConfig::default());
        assert_eq!(config.http.timeout_seconds, 10);
        assert!(config.email.check_mx);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[http]
timeout_seconds = 3
user_agent = "recipe-bot/1.0"

[endpoints]
tinyurl = "https://tiny.example.com/create"

[email]
check_mx = false
extra_banned_domains = ["spam.example"]
"#;
        let config = RecipeConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.http.timeout_seconds, 3);
        assert_eq!(config.http.max_redirects, 10);
        assert_eq!(config.http.user_agent.as_deref(), Some("recipe-bot/1.0"));
        assert_eq!(config.endpoints.tinyurl, "https://tiny.example.com/create");
        assert_eq!(
            config.endpoints.geoplugin,
            EndpointConfig::default().geoplugin
        );
        assert!(!config.email.check_mx);
        assert_eq!(config.email.extra_banned_domains, vec!["spam.example"]);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("RECIPE_TEST_SUGGEST", "https://suggest.example.com");
        let toml_content = r#"
[endpoints]
google_suggest = "${RECIPE_TEST_SUGGEST}"
wikipedia = "${RECIPE_TEST_UNSET_VARIABLE}"
"#;
        let config = RecipeConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.endpoints.google_suggest, "https://suggest.example.com");
        assert_eq!(config.endpoints.wikipedia, "${RECIPE_TEST_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
        std::env::remove_var("RECIPE_TEST_SUGGEST");
    }

    #[test]
    fn test_config_validation() {
        let mut config = RecipeConfig::default();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = RecipeConfig::default();
        config.http.max_redirects = 51;
        assert!(config.validate().is_err());

        let mut config = RecipeConfig::default();
        config.endpoints.alexa = "ftp://data.alexa.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(RecipeError::InvalidConfigValueError { field, .. }) if field == "endpoints.alexa"
        ));

        let mut config = RecipeConfig::default();
        config.email.banned_domains_file = Some(PathBuf::from(" "));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            RecipeConfig::from_toml_str("[http\ntimeout_seconds = 1"),
            Err(RecipeError::ConfigError { .. })
        ));
        assert!(RecipeConfig::from_toml_str("[http]\ntimeout_seconds = \"ten\"").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[http]\nmax_redirects = 0").unwrap();
        let config = RecipeConfig::from_file(file.path()).unwrap();
        assert_eq!(config.http.max_redirects, 0);

        assert!(matches!(
            RecipeConfig::from_file("/nonexistent/recipe.toml"),
            Err(RecipeError::IoError(_))
        ));
    }

    #[test]
    fn test_rooted_at() {
        let endpoints = EndpointConfig::rooted_at("http://127.0.0.1:8080/");
        assert_eq!(endpoints.tinyurl, "http://127.0.0.1:8080/api-create.php");
        assert!(RecipeConfig {
            endpoints,
            ..Default::default()
        }
        .validate()
        .is_ok());
    }
}
