//! Data directory helpers for the binary

use crate::types::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DATABASE_FILE: &str = "data.db";
pub const INDEX_FILE: &str = "index.html";

/// Default location for the database and the search page.
pub fn default_data_dir() -> PathBuf {
    std::env::temp_dir().join("news_fetcher")
}

pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE)
}

pub async fn prepare_data_dir(data_dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(data_dir).await?;
    debug!("Using data directory {}", data_dir.display());
    Ok(())
}

/// Writes the search page served at `/`.
pub async fn write_index_page(data_dir: &Path) -> Result<PathBuf> {
    let path = data_dir.join(INDEX_FILE);
    tokio::fs::write(&path, INDEX_HTML).await?;
    Ok(path)
}

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>News search</title>
</head>
<body onload="sendReq()">
    <h1>News aggregator</h1>
    <label for="search">Search by title:</label>
    <input type="text" id="search" oninput="sendReq()">
    <section></section>
    <script>
        let input = document.getElementById("search");
        let section = document.getElementsByTagName("section")[0];
        function sendReq() {
            let searchParams = new URLSearchParams();
            searchParams.set("term", input.value);
            let url = new URL("search", window.location.origin);
            url.search = searchParams;
            fetch(url, { method: "GET" })
                .then(response => response.json())
                .then(data => {
                    // drop replies to stale keystrokes
                    if (data.term != input.value.trim()) {
                        return;
                    }
                    section.innerHTML = "";
                    for (const item of data.results || []) {
                        section.appendChild(newsBody(item));
                    }
                })
                .catch(e => window.alert(e));
        }
        function newsBody(newsItem) {
            let date = document.createElement("span");
            date.textContent = newsItem.Date;
            let title = document.createElement("span");
            title.textContent = newsItem.Title;
            let link = document.createElement("a");
            link.href = newsItem.Link;
            link.appendChild(title);
            let p = document.createElement("p");
            p.appendChild(date);
            p.appendChild(document.createElement("br"));
            p.appendChild(link);
            return p;
        }
    </script>
</body>
</html>
"#;
