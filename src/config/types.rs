use serde::Deserialize;

/// Default user agent sent with every page and robots.txt request
pub const DEFAULT_USER_AGENT: &str = "docsweep/0.1 (+https://github.com/docsweep/docsweep)";

/// Main configuration structure for Docsweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub job: JobConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// What to crawl and where to write it
///
/// Supplied once at startup and never re-read during a run.
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Seed URLs; fragments are allowed and select a section export
    pub seeds: Vec<String>,

    /// Only follow links whose host matches a seed host
    #[serde(rename = "same-domain", default = "default_true")]
    pub same_domain: bool,

    /// Only follow links whose path starts with this prefix
    #[serde(rename = "path-prefix", default)]
    pub path_prefix: Option<String>,

    /// Maximum number of pages to persist
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,

    /// Root directory of the export tree
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,

    /// Package the export tree as `<output-dir>.zip` when done
    #[serde(rename = "make-zip", default = "default_true")]
    pub make_zip: bool,

    /// Honor `Disallow` rules of the wildcard robots.txt group
    #[serde(rename = "obey-robots", default = "default_true")]
    pub obey_robots: bool,

    /// Export `#fragment` seeds as their own section documents
    #[serde(rename = "include-fragments", default = "default_true")]
    pub include_fragments: bool,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-page request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// robots.txt request timeout (seconds)
    #[serde(rename = "robots-timeout-secs", default = "default_robots_timeout_secs")]
    pub robots_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            robots_timeout_secs: default_robots_timeout_secs(),
        }
    }
}

impl JobConfig {
    /// Creates a job for the given seeds with every other setting at its default
    pub fn with_seeds(seeds: Vec<String>) -> Self {
        Self {
            seeds,
            same_domain: true,
            path_prefix: None,
            max_pages: default_max_pages(),
            output_dir: default_output_dir(),
            make_zip: true,
            obey_robots: true,
            include_fragments: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_pages() -> usize {
    200
}

fn default_output_dir() -> String {
    "./export".to_string()
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    25
}

fn default_robots_timeout_secs() -> u64 {
    15
}
