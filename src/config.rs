use std::env;

pub const LOCAL_API_BASE: &str = "http://localhost:5000";
pub const PRODUCTION_API_BASE: &str = "https://cosmic-church.onrender.com";

const PAGE_HOST_VAR: &str = "EVENT_PAGE_HOST";
const API_BASE_VAR: &str = "EVENT_API_BASE";

// The hostname the page would run on comes from EVENT_PAGE_HOST;
// EVENT_API_BASE overrides the mapping wholesale for ad-hoc targets.
#[derive(Debug, Clone)]
pub struct Backend {
    base_url: String,
}

impl Backend {
    pub fn from_env() -> Self {
        if let Ok(base) = env::var(API_BASE_VAR) {
            let base = base.trim();
            if !base.is_empty() {
                return Self::with_base(base);
            }
        }
        let host = env::var(PAGE_HOST_VAR).unwrap_or_else(|_| "localhost".to_string());
        Self::for_host(&host)
    }

    // localhost maps to the local backend, anything else to production
    pub fn for_host(host: &str) -> Self {
        let host = host.trim();
        let base = if host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1" {
            LOCAL_API_BASE
        } else {
            PRODUCTION_API_BASE
        };
        Self::with_base(base)
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        let mut base_url = base.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
