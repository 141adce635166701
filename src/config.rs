//! Site and container configuration
//!
//! Everything the pager needs is passed in explicitly. A [`SiteConfig`] is
//! usually loaded from YAML and describes the blog plus the containers on the
//! current page; [`PagerConfig`] is the per-container view the controller is
//! built from.

use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_SIZE};
use crate::theme::normalize_site_url;
use crate::types::OptionStringExt;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Site Config
// ============================================================================

/// Blog-wide configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Blog host, with or without scheme (e.g. `example.blogspot.com`)
    pub site_url: String,

    /// URL of the page being rendered; supplies `page` and `max-results`
    #[serde(default)]
    pub current_url: Option<String>,

    /// Blog title
    #[serde(default)]
    pub blog_title: String,

    /// Separator between title parts in the document title
    #[serde(default = "default_title_separator")]
    pub title_separator: String,

    /// Word used for paged titles ("Page 3")
    #[serde(default = "default_page_title")]
    pub page_title: String,

    /// HTTP settings for feed requests
    #[serde(default)]
    pub http: HttpSettings,

    /// Paginated containers on the page
    #[serde(default)]
    pub pagers: Vec<ContainerConfig>,

    /// Custom post lists on the page
    #[serde(default)]
    pub post_lists: Vec<PostListConfig>,
}

fn default_title_separator() -> String {
    " - ".to_string()
}

fn default_page_title() -> String {
    "Page".to_string()
}

impl SiteConfig {
    /// Create a config for a site with every other option defaulted
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: site_url.into(),
            current_url: None,
            blog_title: String::new(),
            title_separator: default_title_separator(),
            page_title: default_page_title(),
            http: HttpSettings::default(),
            pagers: Vec::new(),
            post_lists: Vec::new(),
        }
    }

    /// Load a config file (YAML, or JSON which YAML accepts)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse a config from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check required values
    pub fn validate(&self) -> Result<()> {
        if normalize_site_url(&self.site_url).is_empty() {
            return Err(Error::invalid_value("site_url", "must not be empty"));
        }
        for pager in &self.pagers {
            if pager.name.trim().is_empty() {
                return Err(Error::invalid_value("pagers.name", "must not be empty"));
            }
        }
        Ok(())
    }

    /// Blog base URL, always `https://`
    pub fn base_url(&self) -> String {
        format!("https://{}", normalize_site_url(&self.site_url))
    }

    /// Find a pager container by name
    pub fn container(&self, name: &str) -> Result<&ContainerConfig> {
        self.pagers
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ContainerNotFound {
                name: name.to_string(),
            })
    }

    /// Find a post list by name
    pub fn post_list(&self, name: &str) -> Result<&PostListConfig> {
        self.post_lists
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::ContainerNotFound {
                name: name.to_string(),
            })
    }

    /// Controller configs for every pager container
    pub fn pager_configs(&self) -> Vec<PagerConfig> {
        self.pagers
            .iter()
            .map(|c| PagerConfig::for_container(self, c))
            .collect()
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings for feed traffic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries per request; the pager itself never retries
    #[serde(default)]
    pub max_retries: u32,

    /// Requests per second; 0 disables rate limiting
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_requests_per_second() -> u32 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: 0,
            requests_per_second: default_requests_per_second(),
        }
    }
}

impl HttpSettings {
    /// Build the HTTP client config
    pub fn client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries);

        if self.requests_per_second == 0 {
            builder.no_rate_limit().build()
        } else {
            builder
                .rate_limit(RateLimiterConfig::new(
                    self.requests_per_second,
                    self.requests_per_second,
                ))
                .build()
        }
    }
}

// ============================================================================
// Containers
// ============================================================================

/// A paginated container on the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Container name
    pub name: String,

    /// Items shown per page
    #[serde(default = "default_page_size")]
    pub posts: u32,

    /// Restrict the listing to a label
    #[serde(default)]
    pub label: Option<String>,

    /// Pagination flag; `false` or the string `"false"` turns it off
    #[serde(default = "default_true", deserialize_with = "deserialize_flag")]
    pub pagination: bool,

    /// Page-number controls shown at once
    #[serde(default = "default_window_size")]
    pub window_size: u32,
}

impl ContainerConfig {
    /// Create a container with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            posts: DEFAULT_PAGE_SIZE,
            label: None,
            pagination: true,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_window_size() -> u32 {
    DEFAULT_WINDOW_SIZE
}

fn default_true() -> bool {
    true
}

/// Accept `true`/`false` or any string; only `"false"` disables
fn deserialize_flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s.trim() != "false",
    })
}

/// A custom post list (related posts, label widgets)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListConfig {
    /// List name
    pub name: String,

    /// Comma-separated labels; one is picked at random when several are given
    #[serde(default)]
    pub label: Option<String>,

    /// Heading passed through to the renderer
    #[serde(default)]
    pub title: Option<String>,

    /// Number of posts to show
    #[serde(default = "default_items")]
    pub items: u32,

    /// Shuffle the posts and keep this many
    #[serde(default)]
    pub shuffle: Option<usize>,

    /// URL to leave out, usually the post being viewed
    #[serde(default)]
    pub no_item: Option<String>,
}

fn default_items() -> u32 {
    5
}

impl PostListConfig {
    /// Create a post list with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            title: None,
            items: default_items(),
            shuffle: None,
            no_item: None,
        }
    }
}

// ============================================================================
// Pager Config
// ============================================================================

/// Configuration of one pager controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Container name, used in logs
    pub name: String,
    /// Blog base URL (`https://host`)
    pub base_url: String,
    /// Items per page configured on the container
    pub page_size: u32,
    /// Page-number controls shown at once
    pub window_size: u32,
    /// Label the listing is scoped to
    pub label: Option<String>,
    /// Whether pagination is enabled
    pub pagination: bool,
    /// URL of the page being rendered
    pub current_url: Option<String>,
}

impl PagerConfig {
    /// Create a config for a blog with default settings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            name: "pagination".to_string(),
            base_url: base_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            window_size: DEFAULT_WINDOW_SIZE,
            label: None,
            pagination: true,
            current_url: None,
        }
    }

    /// Derive the controller config for a container of a site
    pub fn for_container(site: &SiteConfig, container: &ContainerConfig) -> Self {
        Self {
            name: container.name.clone(),
            base_url: site.base_url(),
            page_size: container.posts.max(1),
            window_size: container.window_size.max(1),
            label: container.label.clone().none_if_empty(),
            pagination: container.pagination,
            current_url: site.current_url.clone(),
        }
    }

    /// Set the label
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into().none_if_empty();
        self
    }

    /// Set the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the current URL
    #[must_use]
    pub fn with_current_url(mut self, url: impl Into<String>) -> Self {
        self.current_url = Some(url.into());
        self
    }

    /// Disable pagination
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.pagination = false;
        self
    }
}
