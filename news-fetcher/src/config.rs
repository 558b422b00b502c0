use crate::types::{FetchConfig, ParsingRule};
use crate::utils;
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Fetch a news feed into a local database and serve a title search over it.
#[derive(Debug, Clone, Parser)]
#[command(name = "news-fetcher", version, about)]
pub struct Cli {
    /// Feed URL to ingest before serving
    #[arg(long, env = "NEWS_FEED")]
    pub feed: Option<String>,

    /// Ingest a feed document from disk instead of fetching one
    #[arg(long, conflicts_with = "feed")]
    pub feed_file: Option<PathBuf>,

    /// GUID path expression
    #[arg(long, env = "NEWS_RULE_GUID", default_value = "/rss/channel/item/guid")]
    pub rule_guid: String,

    /// Title path expression
    #[arg(long, env = "NEWS_RULE_TITLE", default_value = "/rss/channel/item/title")]
    pub rule_title: String,

    /// Date path expression
    #[arg(long, env = "NEWS_RULE_DATE", default_value = "/rss/channel/item/pubDate")]
    pub rule_date: String,

    /// Link path expression
    #[arg(long, env = "NEWS_RULE_LINK", default_value = "/rss/channel/item/link")]
    pub rule_link: String,

    /// Directory holding the database and the search page [default: <tmp>/news_fetcher]
    #[arg(long, env = "NEWS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Address the search server listens on
    #[arg(long, env = "NEWS_ADDR", default_value = "0.0.0.0:8090")]
    pub addr: SocketAddr,

    /// Feed request timeout in seconds
    #[arg(long, env = "NEWS_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// User-Agent sent with the feed request
    #[arg(long, env = "NEWS_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Exit after ingestion instead of serving search
    #[arg(long)]
    pub no_serve: bool,
}

impl Cli {
    pub fn parsing_rule(&self) -> ParsingRule {
        ParsingRule {
            guid: self.rule_guid.clone(),
            title: self.rule_title.clone(),
            date: self.rule_date.clone(),
            link: self.rule_link.clone(),
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        let defaults = FetchConfig::default();
        FetchConfig {
            user_agent: self.user_agent.clone().unwrap_or(defaults.user_agent),
            timeout_seconds: self.timeout_secs,
            ..defaults
        }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(utils::default_data_dir)
    }
}
