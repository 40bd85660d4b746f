use serde::Deserialize;

/// Values a config file may supply. Every field is optional; anything given
/// explicitly on the command line wins.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub base_url: Option<String>,
    #[serde(alias = "email")]
    pub username: Option<String>,
    pub password: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    pub admin_user_id: Option<String>,
    pub lookup_page_size: Option<u64>,
    pub verbose: Option<bool>,
    pub no_color: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}
