/// Where the table service lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin of the service without a trailing slash. Empty means same-origin.
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut api_base_url: String = base_url.into();
        while api_base_url.ends_with('/') {
            api_base_url.pop();
        }
        Self { api_base_url }
    }

    /// Prefix of every API endpoint.
    pub fn api_url(&self) -> String {
        format!("{}/api", self.api_base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::new("")
        } else {
            Self::new("http://localhost:3000")
        }
    }
}
