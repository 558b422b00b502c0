use crate::types::{Field, FieldValues, NewsError, NewsItem, Result};

/// Zips per-field values into news items by position.
///
/// Every sequence must be exactly as long as `guids`; otherwise nothing is
/// produced at all.
pub fn assemble(
    guids: Vec<String>,
    titles: Vec<String>,
    dates: Vec<String>,
    links: Vec<String>,
) -> Result<Vec<NewsItem>> {
    let expected = guids.len();
    for (field, found) in [
        (Field::Title, titles.len()),
        (Field::Date, dates.len()),
        (Field::Link, links.len()),
    ] {
        if found != expected {
            return Err(NewsError::Alignment {
                field,
                expected,
                found,
            });
        }
    }

    let items = guids
        .into_iter()
        .zip(titles)
        .zip(dates)
        .zip(links)
        .map(|(((guid, title), date), link)| NewsItem {
            guid,
            title,
            date,
            link,
        })
        .collect();
    Ok(items)
}

pub fn assemble_values(values: FieldValues) -> Result<Vec<NewsItem>> {
    assemble(values.guids, values.titles, values.dates, values.links)
}
