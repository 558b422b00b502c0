use crate::query::QueryError;
pub use interfaces::defs::{Field, NewsItem, ParsingRule};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "news-fetcher/0.1".to_string(),
            timeout_seconds: 10,
            max_feed_size_mb: 10,
            max_redirects: 5,
        }
    }
}

impl FetchConfig {
    pub fn max_feed_bytes(&self) -> usize {
        self.max_feed_size_mb * 1024 * 1024
    }
}

/// Per-field values pulled out of one document, in document order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldValues {
    pub guids: Vec<String>,
    pub titles: Vec<String>,
    pub dates: Vec<String>,
    pub links: Vec<String>,
}

impl FieldValues {
    pub fn get_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Guid => &mut self.guids,
            Field::Title => &mut self.titles,
            Field::Date => &mut self.dates,
            Field::Link => &mut self.links,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme: {url}")]
    UnsupportedScheme { url: String },

    #[error("Feed size exceeds limit: {size} bytes (limit {limit})")]
    FeedTooLarge { size: usize, limit: usize },

    #[error("Feed parse error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Cannot decode feed as {encoding}: {reason}")]
    Encoding { encoding: String, reason: String },

    #[error("Invalid rule expression {expression:?}: {source}")]
    Rule {
        expression: String,
        #[source]
        source: QueryError,
    },

    #[error("Found {found} {field} values but {expected} guids")]
    Alignment {
        field: Field,
        expected: usize,
        found: usize,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Item at position {position} has an empty guid")]
    EmptyGuid { position: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NewsError {
    /// Error class used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            NewsError::Http(_)
            | NewsError::HttpStatus { .. }
            | NewsError::InvalidUrl(_)
            | NewsError::UnsupportedScheme { .. }
            | NewsError::FeedTooLarge { .. } => "FetchError",
            NewsError::Parse(_) | NewsError::Encoding { .. } => "ParseError",
            NewsError::Rule { .. } => "RuleError",
            NewsError::Alignment { .. } => "AlignmentError",
            NewsError::Database(_) | NewsError::EmptyGuid { .. } => "StoreError",
            NewsError::Io(_) => "IoError",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, NewsError::Http(e) if e.is_timeout())
    }
}

pub type Result<T> = std::result::Result<T, NewsError>;
