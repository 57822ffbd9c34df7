//! Share link token generation and URL composition.

use rand::Rng;

use cloudvault_core::config::share::ShareConfig;

/// Characters a token is drawn from.
const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generates share tokens and the public URLs built from them.
#[derive(Debug, Clone)]
pub struct LinkService {
    /// Prefix every share URL starts with.
    base_url: String,
    /// Number of characters in a token.
    token_length: usize,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(base_url: impl Into<String>, token_length: usize) -> Self {
        Self {
            base_url: base_url.into(),
            token_length,
        }
    }

    /// Creates a link service from the share configuration.
    pub fn from_config(config: &ShareConfig) -> Self {
        Self::new(config.base_url.clone(), config.token_length)
    }

    /// Generates a random lowercase base-36 token.
    pub fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.token_length)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }

    /// The public URL for `token`.
    pub fn build_url(&self, token: &str) -> String {
        format!("{}{}", self.base_url, token)
    }

    /// A URL with a freshly generated token.
    pub fn new_url(&self) -> String {
        self.build_url(&self.generate_token())
    }
}

impl Default for LinkService {
    fn default() -> Self {
        Self::from_config(&ShareConfig::default())
    }
}
