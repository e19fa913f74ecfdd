use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use dedupe_core::rules::{
    validate_property_name, DedupeSettings, DEFAULT_NORMALIZED_PHONE_PROPERTY,
};
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const APP_DIR: &str = "dedupe";
const CONFIG_FILENAME: &str = "config.toml";

pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";
pub const DEFAULT_ACCESS_TOKEN_ENV: &str = "CRM_ACCESS_TOKEN";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub crm: CrmConfig,
    pub dedupe: DedupeSettings,
    pub normalized_phone_property: String,
}

#[derive(Debug, Clone)]
pub struct CrmConfig {
    pub base_url: String,
    pub access_token_env: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: Option<String>,
}

impl Default for CrmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token_env: DEFAULT_ACCESS_TOKEN_ENV.to_string(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl CrmConfig {
    /// Inline token first, then the configured environment variable.
    pub fn resolve_access_token(&self) -> Result<String> {
        if let Some(token) = self.access_token.as_deref() {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }
        match env::var(&self.access_token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(ConfigError::MissingAccessToken(self.access_token_env.clone())),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            crm: CrmConfig::default(),
            dedupe: DedupeSettings::default(),
            normalized_phone_property: DEFAULT_NORMALIZED_PHONE_PROPERTY.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("config file permissions too permissive: {0}")]
    InsecurePermissions(PathBuf),
    #[error("invalid crm.base_url (https required): {0}")]
    InvalidBaseUrl(String),
    #[error("invalid {field} value: {value}")]
    InvalidTimeout { field: &'static str, value: u64 },
    #[error("invalid {field} value: {value}")]
    InvalidPropertyName { field: &'static str, value: String },
    #[error("invalid crm.access_token_env value: {0}")]
    InvalidAccessTokenEnv(String),
    #[error("missing CRM access token; set {0} or crm.access_token")]
    MissingAccessToken(String),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    crm: Option<CrmFile>,
    dedupe: Option<DedupeFile>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CrmFile {
    base_url: Option<String>,
    access_token_env: Option<String>,
    access_token: Option<String>,
    timeout_secs: Option<u64>,
    connect_timeout_secs: Option<u64>,
    user_agent: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DedupeFile {
    phone_property: Option<String>,
    mobile_property: Option<String>,
    address_property: Option<String>,
    normalized_phone_property: Option<String>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path.clone()) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    ensure_permissions(path)?;
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(merge_config(parsed)?))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(crm) = parsed.crm {
        if let Some(base_url) = crm.base_url {
            config.crm.base_url = validate_base_url(&base_url)?;
        }
        if let Some(name) = crm.access_token_env {
            let trimmed = name.trim();
            if trimmed.is_empty() || trimmed.contains('=') {
                return Err(ConfigError::InvalidAccessTokenEnv(name));
            }
            config.crm.access_token_env = trimmed.to_string();
        }
        if let Some(token) = crm.access_token {
            config.crm.access_token = Some(token).filter(|value| !value.trim().is_empty());
        }
        if let Some(timeout) = crm.timeout_secs {
            config.crm.timeout_secs = validate_timeout("crm.timeout_secs", timeout)?;
        }
        if let Some(timeout) = crm.connect_timeout_secs {
            config.crm.connect_timeout_secs =
                validate_timeout("crm.connect_timeout_secs", timeout)?;
        }
        if let Some(agent) = crm.user_agent {
            let trimmed = agent.trim();
            config.crm.user_agent = (!trimmed.is_empty()).then(|| trimmed.to_string());
        }
    }

    if let Some(dedupe) = parsed.dedupe {
        if let Some(name) = dedupe.phone_property {
            config.dedupe.phone_property = property_name("dedupe.phone_property", name)?;
        }
        if let Some(name) = dedupe.mobile_property {
            config.dedupe.mobile_property = property_name("dedupe.mobile_property", name)?;
        }
        if let Some(name) = dedupe.address_property {
            config.dedupe.address_property = property_name("dedupe.address_property", name)?;
        }
        if let Some(name) = dedupe.normalized_phone_property {
            config.normalized_phone_property =
                property_name("dedupe.normalized_phone_property", name)?;
        }
    }

    Ok(config)
}

fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_string()))?;
    if url.scheme() != "https" || url.host_str().is_none() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn validate_timeout(field: &'static str, value: u64) -> Result<u64> {
    if value == 0 || value > MAX_TIMEOUT_SECS {
        return Err(ConfigError::InvalidTimeout { field, value });
    }
    Ok(value)
}

fn property_name(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    validate_property_name(trimmed).map_err(|_| ConfigError::InvalidPropertyName {
        field,
        value: value.clone(),
    })?;
    Ok(trimmed.to_string())
}

#[cfg(unix)]
fn ensure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mode = metadata.permissions().mode();
    if mode & 0o077 != 0 {
        return Err(ConfigError::InsecurePermissions(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        load_at_path, merge_config, ConfigError, ConfigFile, CrmConfig, CrmFile, DedupeFile,
        DEFAULT_BASE_URL,
    };
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn restrict_permissions(path: &Path) {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path).expect("metadata").permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).expect("chmod");
        }
    }

    fn empty_crm() -> CrmFile {
        CrmFile {
            base_url: None,
            access_token_env: None,
            access_token: None,
            timeout_secs: None,
            connect_timeout_secs: None,
            user_agent: None,
        }
    }

    #[test]
    fn merge_config_applies_values() {
        let parsed = ConfigFile {
            crm: Some(CrmFile {
                base_url: Some("https://crm.example.com/".to_string()),
                timeout_secs: Some(5),
                user_agent: Some("  ops-dedupe ".to_string()),
                ..empty_crm()
            }),
            dedupe: Some(DedupeFile {
                phone_property: None,
                mobile_property: Some("cell".to_string()),
                address_property: Some("postal_key".to_string()),
                normalized_phone_property: None,
            }),
        };
        let merged = merge_config(parsed).expect("merge");
        assert_eq!(merged.crm.base_url, "https://crm.example.com");
        assert_eq!(merged.crm.timeout_secs, 5);
        assert_eq!(merged.crm.user_agent.as_deref(), Some("ops-dedupe"));
        assert_eq!(merged.dedupe.phone_property, "phone");
        assert_eq!(merged.dedupe.mobile_property, "cell");
        assert_eq!(merged.dedupe.address_property, "postal_key");
        assert_eq!(merged.normalized_phone_property, "normalized_phone");
    }

    #[test]
    fn merge_config_defaults_when_sections_missing() {
        let merged = merge_config(ConfigFile {
            crm: None,
            dedupe: None,
        })
        .expect("merge");
        assert_eq!(merged.crm.base_url, DEFAULT_BASE_URL);
        assert_eq!(merged.dedupe.address_property, "ca_normalized_address");
    }

    #[test]
    fn merge_config_rejects_plain_http() {
        let parsed = ConfigFile {
            crm: Some(CrmFile {
                base_url: Some("http://crm.example.com".to_string()),
                ..empty_crm()
            }),
            dedupe: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn merge_config_rejects_zero_timeout() {
        let parsed = ConfigFile {
            crm: Some(CrmFile {
                connect_timeout_secs: Some(0),
                ..empty_crm()
            }),
            dedupe: None,
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(err.to_string().contains("crm.connect_timeout_secs"));
    }

    #[test]
    fn merge_config_rejects_bad_property_names() {
        let parsed = ConfigFile {
            crm: None,
            dedupe: Some(DedupeFile {
                phone_property: Some("home phone".to_string()),
                mobile_property: None,
                address_property: None,
                normalized_phone_property: None,
            }),
        };
        let err = merge_config(parsed).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPropertyName {
                field: "dedupe.phone_property",
                ..
            }
        ));
    }

    #[test]
    fn inline_token_wins_over_environment() {
        let crm = CrmConfig {
            access_token: Some(" inline-token ".to_string()),
            access_token_env: "DEDUPE_TEST_TOKEN_UNSET_FOR_INLINE".to_string(),
            ..CrmConfig::default()
        };
        assert_eq!(crm.resolve_access_token().expect("token"), "inline-token");
    }

    #[test]
    fn missing_token_names_the_variable() {
        let crm = CrmConfig {
            access_token_env: "DEDUPE_TEST_TOKEN_NEVER_SET".to_string(),
            ..CrmConfig::default()
        };
        let err = crm.resolve_access_token().unwrap_err();
        assert!(err.to_string().contains("DEDUPE_TEST_TOKEN_NEVER_SET"));
    }

    #[test]
    fn load_at_path_requires_file_when_requested() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        let err = load_at_path(&missing, true).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("config file not found"));
    }

    #[test]
    fn load_at_path_skips_missing_optional_file() {
        let temp = TempDir::new().expect("tempdir");
        let missing = temp.path().join("config.toml");
        assert!(load_at_path(&missing, false).expect("load").is_none());
    }

    #[test]
    fn load_at_path_parses_toml() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[crm]\ntimeout_secs = 12\naccess_token_env = \"HUB_TOKEN\"\n[dedupe]\naddress_property = \"addr_key\"\n",
        )
        .expect("write config");
        restrict_permissions(&path);

        let config = load_at_path(&path, true).expect("load").expect("config");
        assert_eq!(config.crm.timeout_secs, 12);
        assert_eq!(config.crm.access_token_env, "HUB_TOKEN");
        assert_eq!(config.dedupe.address_property, "addr_key");
    }

    #[test]
    fn load_at_path_rejects_unknown_keys() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "[crm]\nretries = 3\n").expect("write config");
        restrict_permissions(&path);

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn load_at_path_rejects_world_readable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "").expect("write config");
        let mut perms = fs::metadata(&path).expect("metadata").permissions();
        perms.set_mode(0o644);
        fs::set_permissions(&path, perms).expect("chmod");

        let err = load_at_path(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::InsecurePermissions(_)));
    }
}
