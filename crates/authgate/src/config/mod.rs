mod session_tokens;
mod two_factor;

pub use session_tokens::*;
pub use two_factor::*;

/// Authgate configuration
#[derive(Serialize, Deserialize, Clone)]
pub struct Config {
    /// Issuer label shown in authenticator apps
    #[serde(default = "default_issuer")]
    pub issuer: String,

    /// Session token lifetimes
    #[serde(default)]
    pub session_tokens: SessionTokenConfig,

    /// Two-factor authentication options
    #[serde(default)]
    pub two_factor: TwoFactorConfig,
}

fn default_issuer() -> String {
    "Authgate".to_string()
}

impl Default for Config {
    fn default() -> Config {
        Config {
            issuer: default_issuer(),
            session_tokens: Default::default(),
            two_factor: Default::default(),
        }
    }
}
