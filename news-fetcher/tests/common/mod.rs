#![allow(dead_code)]

use news_fetcher::{NewsItem, NewsRepository, NewsStore};
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub async fn memory_store() -> NewsStore {
    let store = NewsStore::in_memory().await.expect("in-memory store");
    store.ensure_schema().await.expect("schema");
    store
}

pub fn item(guid: &str, title: &str) -> NewsItem {
    NewsItem {
        guid: guid.to_string(),
        title: title.to_string(),
        date: format!("date of {guid}"),
        link: format!("https://example.com/{guid}"),
    }
}

pub const ZONA_FEED: &str = r#"
<rss xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:content="http://purl.org/rss/1.0/modules/content/" xmlns:atom="http://www.w3.org/2005/Atom" version="2.0">
<channel>
<title>
<![CDATA[ Медиазона ]]>
</title>
<description>
<![CDATA[ Медиазона ]]>
</description>
<link>https://zona.media</link>
<image>
<url>https://zona.media/s/defaultShare.png</url>
<title>Медиазона</title>
<link>https://zona.media</link>
</image>
<generator>RSS for Node</generator>
<lastBuildDate>Tue, 19 May 2020 19:47:00 GMT</lastBuildDate>
<ttl>60</ttl>
<item>
<title>Коронавирус в России. Май</title>
<description>
<![CDATA[ Число зараженных превысило 300 тысяч ]]>
</description>
<link>https://zona.media/chronicle/spring</link>
<guid isPermaLink="false">https://zona.media/40281</guid>
<pubDate>Tue, 19 May 2020 19:45:13 GMT</pubDate>
<enclosure url="https://s3.zona.media/entry/b9edcee2d538ddd1478e041f1d48e101_1400x850" length="281717" type="image/jpeg"/>
</item>
<item>
<title>«Кому положено умереть — помрут» — глава инфоцентра по коронавирусу Мясников о смертях во время эпидемии</title>
<link>https://zona.media/news/2020/05/19/myasnikov</link>
<guid isPermaLink="false">https://zona.media/40682</guid>
<pubDate>Tue, 19 May 2020 19:39:51 GMT</pubDate>
</item>
</channel>
</rss>
	"#;

pub fn zona_items() -> Vec<NewsItem> {
    vec![
        NewsItem {
            guid: "https://zona.media/40281".to_string(),
            title: "Коронавирус в России. Май".to_string(),
            date: "Tue, 19 May 2020 19:45:13 GMT".to_string(),
            link: "https://zona.media/chronicle/spring".to_string(),
        },
        NewsItem {
            guid: "https://zona.media/40682".to_string(),
            title: "«Кому положено умереть — помрут» — глава инфоцентра по коронавирусу Мясников о смертях во время эпидемии".to_string(),
            date: "Tue, 19 May 2020 19:39:51 GMT".to_string(),
            link: "https://zona.media/news/2020/05/19/myasnikov".to_string(),
        },
    ]
}

/// Builds an RSS 2.0 document from `(guid, title)` pairs.
pub fn rss_feed(items: &[(&str, &str)]) -> String {
    let body: String = items
        .iter()
        .map(|(guid, title)| {
            format!(
                "<item><title>{title}</title><link>https://example.com/{guid}</link>\
                 <guid>{guid}</guid><pubDate>date of {guid}</pubDate></item>"
            )
        })
        .collect();
    format!("<?xml version=\"1.0\"?><rss version=\"2.0\"><channel><title>Example</title>{body}</channel></rss>")
}
