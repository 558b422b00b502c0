use std::fmt;

use serde::{Deserialize, Serialize};

/// A single news entry, keyed by its feed GUID.
///
/// `title`, `date` and `link` are stored verbatim; `date` in particular is
/// never parsed, publishers format it however they like.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    #[serde(rename = "GUID")]
    pub guid: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Link")]
    pub link: String,
}

/// The four fields a news item is assembled from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Guid,
    Title,
    Date,
    Link,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Guid, Field::Title, Field::Date, Field::Link];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Guid => "guid",
            Field::Title => "title",
            Field::Date => "date",
            Field::Link => "link",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One query expression per field.
///
/// Every non-empty expression must select nodes in the same per-item order:
/// the n-th match of each field is taken to belong to the n-th item. An
/// empty expression disables extraction for that field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsingRule {
    pub guid: String,
    pub title: String,
    pub date: String,
    pub link: String,
}

impl ParsingRule {
    pub fn expression(&self, field: Field) -> &str {
        match field {
            Field::Guid => &self.guid,
            Field::Title => &self.title,
            Field::Date => &self.date,
            Field::Link => &self.link,
        }
    }
}

// RSS 2.0 layout
impl Default for ParsingRule {
    fn default() -> Self {
        Self {
            guid: "/rss/channel/item/guid".to_owned(),
            title: "/rss/channel/item/title".to_owned(),
            date: "/rss/channel/item/pubDate".to_owned(),
            link: "/rss/channel/item/link".to_owned(),
        }
    }
}

impl fmt::Display for ParsingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "guid={:?} title={:?} date={:?} link={:?}",
            self.guid, self.title, self.date, self.link
        )
    }
}
