use crate::query::Query;
use crate::types::{Field, FieldValues, NewsError, ParsingRule, Result};
use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use roxmltree::{Document, ParsingOptions};
use tracing::debug;

/// Decodes a raw feed body into text.
///
/// The encoding comes from the byte order mark, else from the `encoding`
/// of the XML declaration, else UTF-8. Bytes that are invalid in that
/// encoding fail the document rather than being replaced.
pub fn decode_document(body: &[u8]) -> Result<String> {
    let (encoding, content) = match Encoding::for_bom(body) {
        Some((encoding, bom_len)) => (encoding, &body[bom_len..]),
        None => (declared_encoding(body)?, body),
    };

    let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(content) else {
        return Err(NewsError::Encoding {
            encoding: encoding.name().to_string(),
            reason: "malformed byte sequence".to_string(),
        });
    };
    if encoding != UTF_8 {
        debug!("Decoded {} byte feed from {}", body.len(), encoding.name());
    }
    Ok(text.into_owned())
}

fn declared_encoding(body: &[u8]) -> Result<&'static Encoding> {
    let Some(label) = declaration_encoding_label(body) else {
        return Ok(UTF_8);
    };
    match Encoding::for_label(label.as_bytes()) {
        // a declaration readable as ASCII cannot be in UTF-16
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok(UTF_8),
        Some(encoding) => Ok(encoding),
        None => Err(NewsError::Encoding {
            encoding: label.to_string(),
            reason: "unknown encoding label".to_string(),
        }),
    }
}

// `<?xml version="1.0" encoding="windows-1251"?>` gives "windows-1251".
fn declaration_encoding_label(body: &[u8]) -> Option<&str> {
    let start = body.iter().position(|b| !b.is_ascii_whitespace())?;
    let head = body[start..].strip_prefix(b"<?xml")?;
    let head = &head[..head.len().min(512)];
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = std::str::from_utf8(&head[..end]).ok()?;

    let after = &declaration[declaration.find("encoding")? + "encoding".len()..];
    let value = after.trim_start().strip_prefix('=')?.trim_start();
    let quote = value.chars().next().filter(|c| matches!(*c, '"' | '\''))?;
    let value = &value[1..];
    value.find(quote).map(|len| &value[..len])
}

/// A feed parsed once and queried as many times as needed.
pub struct FeedDocument<'input> {
    doc: Document<'input>,
}

impl<'input> FeedDocument<'input> {
    pub fn parse(content: &'input str) -> Result<Self> {
        let content = content.trim_start_matches('\u{feff}').trim_start();
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(content, options)?;
        debug!("Parsed feed document ({} bytes)", content.len());
        Ok(Self { doc })
    }

    pub fn select(&self, query: &Query) -> Vec<String> {
        query.evaluate(&self.doc)
    }
}

/// Runs a single expression against a raw document.
///
/// An empty expression yields no values and leaves the document unparsed.
/// The expression is compiled before the document is parsed, so a bad rule
/// is reported as such even when the document is broken too.
pub fn extract(document: &str, expression: &str) -> Result<Vec<String>> {
    if expression.is_empty() {
        return Ok(Vec::new());
    }
    let query = compile(expression)?;
    let feed = FeedDocument::parse(document)?;
    Ok(feed.select(&query))
}

fn compile(expression: &str) -> Result<Query> {
    Query::compile(expression).map_err(|source| NewsError::Rule {
        expression: expression.to_string(),
        source,
    })
}

/// A parsing rule with every non-empty expression compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    queries: Vec<(Field, Query)>,
}

impl CompiledRule {
    pub fn compile(rule: &ParsingRule) -> Result<Self> {
        let mut queries = Vec::new();
        for field in Field::ALL {
            let expression = rule.expression(field);
            if !expression.is_empty() {
                queries.push((field, compile(expression)?));
            }
        }
        Ok(Self { queries })
    }

    /// Like [`extract`](Self::extract) on an undecoded body.
    pub fn extract_bytes(&self, body: &[u8]) -> Result<FieldValues> {
        if self.queries.is_empty() {
            return Ok(FieldValues::default());
        }
        self.extract(&decode_document(body)?)
    }

    /// Extracts all four fields, parsing the document at most once.
    pub fn extract(&self, document: &str) -> Result<FieldValues> {
        let mut values = FieldValues::default();
        if self.queries.is_empty() {
            return Ok(values);
        }

        let feed = FeedDocument::parse(document)?;
        for (field, query) in &self.queries {
            let found = feed.select(query);
            debug!("Rule {} ({}) matched {} nodes", field, query.as_str(), found.len());
            *values.get_mut(*field) = found;
        }
        Ok(values)
    }
}
