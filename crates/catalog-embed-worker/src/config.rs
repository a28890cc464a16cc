//! Configuration management for the embedding worker
//!
//! Settings come from the process environment, optionally seeded from a
//! `.env` file found next to the working directory or at the project root.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use catalog_embed::{DescriptionLocale, DomainError, SellerJoin};

const ENV_FILE: &str = ".env";
/// How many directories above the working directory to look for a `.env`
const PROJECT_ROOT_DEPTH: usize = 2;

const DEFAULT_OPENAI_MODEL: &str = "text-embedding-3-small";
const DEFAULT_LOCAL_MODEL: &str = "all-MiniLM-L6-v2";

/// Find the `.env` file: `start/.env`, else the one two levels up
pub fn locate_env_file(start: &Path) -> Option<PathBuf> {
    let local = start.join(ENV_FILE);
    if local.is_file() {
        return Some(local);
    }

    start
        .ancestors()
        .nth(PROJECT_ROOT_DEPTH)
        .map(|root| root.join(ENV_FILE))
        .filter(|path| path.is_file())
}

/// Load the `.env` file into the process environment.
///
/// Returns the path that was loaded; variables already set in the
/// environment take precedence over the file.
pub fn load_env_file() -> Result<Option<PathBuf>, DomainError> {
    let cwd = std::env::current_dir()
        .map_err(|e| DomainError::Configuration(format!("Cannot read working directory: {e}")))?;

    match locate_env_file(&cwd) {
        Some(path) => {
            dotenvy::from_path(&path).map_err(|e| {
                DomainError::Configuration(format!("Failed to load {}: {e}", path.display()))
            })?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}

/// Embedding backend selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmbeddingProvider {
    /// OpenAI-compatible `/embeddings` endpoint
    OpenAi,
    /// In-process all-MiniLM-L6-v2 (requires the `local` feature, on by default)
    #[default]
    Local,
}

impl FromStr for EmbeddingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(EmbeddingProvider::OpenAi),
            "local" => Ok(EmbeddingProvider::Local),
            _ => Err(format!("Unknown embedding provider: {}", s)),
        }
    }
}

impl std::fmt::Display for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProvider::OpenAi => write!(f, "openai"),
            EmbeddingProvider::Local => write!(f, "local"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    /// Read `LOG_FORMAT` leniently; logging must come up before config errors can be reported
    pub fn from_env() -> Self {
        std::env::var("LOG_FORMAT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Data store connection and table layout
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_role_key: String,
    pub table: String,
    pub seller: SellerJoin,
    pub embedding_column: String,
    pub page_size: usize,
}

/// Embedding model settings
#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub provider: EmbeddingProvider,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Per-record retry policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    pub supabase: SupabaseConfig,
    pub embedding: EmbeddingConfig,
    pub locale: DescriptionLocale,
    pub retry: RetryConfig,
    pub request_timeout: Duration,
}

impl WorkerConfig {
    /// Build from the process environment
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let url = get("SUPABASE_URL").ok_or_else(|| DomainError::missing_config("SUPABASE_URL"))?;
        let service_role_key = get("SUPABASE_SERVICE_ROLE_KEY")
            .ok_or_else(|| DomainError::missing_config("SUPABASE_SERVICE_ROLE_KEY"))?;

        let page_size: usize = parse_or(&get, "FETCH_PAGE_SIZE", 1000)?;
        if page_size == 0 {
            return Err(DomainError::invalid_config("FETCH_PAGE_SIZE", "0"));
        }

        let supabase = SupabaseConfig {
            url: url.trim().trim_end_matches('/').to_string(),
            service_role_key: service_role_key.trim().to_string(),
            table: get("PRODUCTS_TABLE").unwrap_or_else(|| "products".to_string()),
            seller: SellerJoin::new(
                get("SELLER_RELATION").unwrap_or_else(|| "users".to_string()),
                get("SELLER_NAME_COLUMN").unwrap_or_else(|| "shop_name".to_string()),
            ),
            embedding_column: get("EMBEDDING_COLUMN").unwrap_or_else(|| "embedding".to_string()),
            page_size,
        };

        let provider: EmbeddingProvider =
            parse_or(&get, "EMBEDDING_PROVIDER", EmbeddingProvider::default())?;
        let api_key = get("EMBEDDING_API_KEY").or_else(|| get("OPENAI_API_KEY"));
        if provider == EmbeddingProvider::OpenAi && api_key.is_none() {
            return Err(DomainError::missing_config("EMBEDDING_API_KEY (or OPENAI_API_KEY)"));
        }
        let default_model = match provider {
            EmbeddingProvider::OpenAi => DEFAULT_OPENAI_MODEL,
            EmbeddingProvider::Local => DEFAULT_LOCAL_MODEL,
        };
        let embedding = EmbeddingConfig {
            provider,
            model: get("EMBEDDING_MODEL").unwrap_or_else(|| default_model.to_string()),
            api_key,
            base_url: get("EMBEDDING_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
        };

        let defaults = RetryConfig::default();
        let retry = RetryConfig {
            max_retries: parse_or(&get, "RECORD_MAX_RETRIES", defaults.max_retries)?,
            base_delay_ms: parse_or(&get, "RETRY_BASE_DELAY_MS", defaults.base_delay_ms)?,
            max_delay_ms: parse_or(&get, "RETRY_MAX_DELAY_MS", defaults.max_delay_ms)?,
        };

        Ok(Self {
            supabase,
            embedding,
            locale: parse_or(&get, "DESCRIPTION_LOCALE", DescriptionLocale::default())?,
            retry,
            request_timeout: Duration::from_secs(parse_or(&get, "REQUEST_TIMEOUT_SECS", 30)?),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DomainError::invalid_config(key, &raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 2] = [
        ("SUPABASE_URL", "https://demo.supabase.co/"),
        ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
    ];

    #[test]
    fn test_defaults_need_only_store_credentials() {
        let config = WorkerConfig::from_lookup(lookup(&REQUIRED)).unwrap();

        assert_eq!(config.supabase.url, "https://demo.supabase.co");
        assert_eq!(config.supabase.table, "products");
        assert_eq!(config.supabase.seller, SellerJoin::default());
        assert_eq!(config.supabase.embedding_column, "embedding");
        assert_eq!(config.supabase.page_size, 1000);
        assert_eq!(config.embedding.provider, EmbeddingProvider::Local);
        assert_eq!(config.embedding.model, "all-MiniLM-L6-v2");
        assert_eq!(config.embedding.api_key, None);
        assert_eq!(config.locale, DescriptionLocale::En);
        assert_eq!(config.retry, RetryConfig::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_missing_url_is_fatal() {
        let err = WorkerConfig::from_lookup(lookup(&[(
            "SUPABASE_SERVICE_ROLE_KEY",
            "service-key",
        )]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_URL"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let err = WorkerConfig::from_lookup(lookup(&[
            ("SUPABASE_URL", "https://demo.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "   "),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("SUPABASE_SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_openai_requires_api_key() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("EMBEDDING_PROVIDER", "openai"));

        let err = WorkerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("EMBEDDING_API_KEY"));
    }

    #[test]
    fn test_openai_provider_opt_in() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("EMBEDDING_PROVIDER", "OpenAI"));
        pairs.push(("OPENAI_API_KEY", "sk-test"));
        pairs.push(("DESCRIPTION_LOCALE", "vi"));

        let config = WorkerConfig::from_lookup(lookup(&pairs)).unwrap();
        assert_eq!(config.embedding.provider, EmbeddingProvider::OpenAi);
        assert_eq!(config.embedding.model, "text-embedding-3-small");
        assert_eq!(config.embedding.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.locale, DescriptionLocale::Vi);
    }

    #[test]
    fn test_invalid_number_names_variable() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("RECORD_MAX_RETRIES", "three"));

        let err = WorkerConfig::from_lookup(lookup(&pairs)).unwrap_err();
        assert!(err.to_string().contains("RECORD_MAX_RETRIES"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("FETCH_PAGE_SIZE", "0"));
        assert!(WorkerConfig::from_lookup(lookup(&pairs)).is_err());
    }

    #[test]
    fn test_locate_env_in_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), "SUPABASE_URL=x\n").unwrap();

        assert_eq!(locate_env_file(dir.path()), Some(dir.path().join(".env")));
    }

    #[test]
    fn test_locate_env_at_project_root() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("lib").join("recommendation");
        fs::create_dir_all(&nested).unwrap();
        fs::write(root.path().join(".env"), "SUPABASE_URL=x\n").unwrap();

        assert_eq!(locate_env_file(&nested), Some(root.path().join(".env")));
    }

    #[test]
    fn test_locate_env_missing() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(locate_env_file(&nested), None);
    }
}
