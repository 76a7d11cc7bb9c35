//! Atom feed parsing for arXiv API responses.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::{AppError, Article};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Summary,
    Published,
    Updated,
    AuthorName,
    Comment,
    JournalRef,
    Doi,
}

/// Parse the entries of an arXiv Atom feed.
///
/// arXiv reports query errors as a feed holding a single entry whose id points
/// at `/api/errors`; that case is returned as an error.
pub fn parse_feed(xml: &str) -> Result<Vec<Article>, AppError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut current: Option<Article> = None;
    let mut in_author = false;
    let mut field: Option<Field> = None;
    let mut text = String::new();

    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Eof => break,
            Event::Start(e) => {
                let Some(article) = current.as_mut() else {
                    if e.local_name().as_ref() == b"entry" {
                        current = Some(Article::default());
                    }
                    continue;
                };
                match e.local_name().as_ref() {
                    b"author" => in_author = true,
                    b"name" if in_author => field = Some(Field::AuthorName),
                    name if !in_author => {
                        field = leaf_field(name);
                        if field.is_none() {
                            read_attributes(&e, article)?;
                        }
                    }
                    _ => {}
                }
                text.clear();
            }
            Event::Empty(e) => {
                if let Some(article) = current.as_mut() {
                    read_attributes(&e, article)?;
                }
            }
            Event::Text(t) => {
                if field.is_some() {
                    text.push_str(&t.unescape().map_err(xml_error)?);
                }
            }
            Event::CData(t) => {
                if field.is_some() {
                    text.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"entry" => {
                    if let Some(article) = current.take() {
                        articles.push(finish(article)?);
                    }
                }
                b"author" => in_author = false,
                _ => {
                    if let (Some(f), Some(article)) = (field.take(), current.as_mut()) {
                        assign(article, f, text.trim());
                    }
                    text.clear();
                }
            },
            _ => {}
        }
    }

    Ok(articles)
}

fn leaf_field(name: &[u8]) -> Option<Field> {
    match name {
        b"id" => Some(Field::Id),
        b"title" => Some(Field::Title),
        b"summary" => Some(Field::Summary),
        b"published" => Some(Field::Published),
        b"updated" => Some(Field::Updated),
        b"comment" => Some(Field::Comment),
        b"journal_ref" => Some(Field::JournalRef),
        b"doi" => Some(Field::Doi),
        _ => None,
    }
}

fn assign(article: &mut Article, field: Field, value: &str) {
    let value = value.to_string();
    match field {
        Field::Id => article.id = value,
        Field::Title => article.title = value,
        Field::Summary => article.summary = value,
        Field::Published => article.published = value,
        Field::Updated => article.updated = value,
        Field::AuthorName => article.authors.push(value),
        Field::Comment => article.comment = Some(value),
        Field::JournalRef => article.journal_ref = Some(value),
        Field::Doi => article.doi = Some(value),
    }
}

fn read_attributes(e: &BytesStart<'_>, article: &mut Article) -> Result<(), AppError> {
    match e.local_name().as_ref() {
        b"link" => {
            let href = attribute(e, b"href")?;
            let rel = attribute(e, b"rel")?;
            let title = attribute(e, b"title")?;
            match (href, rel.as_deref(), title.as_deref()) {
                (Some(href), _, Some("pdf")) => article.pdf_url = Some(href),
                (Some(href), Some("alternate"), _) => article.arxiv_url = href,
                _ => {}
            }
        }
        b"primary_category" => article.primary_category = attribute(e, b"term")?,
        b"category" => {
            if let Some(term) = attribute(e, b"term")? {
                article.categories.push(term);
            }
        }
        _ => {}
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>, AppError> {
    match e.try_get_attribute(name).map_err(xml_error)? {
        Some(attr) => Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned())),
        None => Ok(None),
    }
}

fn finish(mut article: Article) -> Result<Article, AppError> {
    if article.id.contains("/api/errors") {
        return Err(AppError::ParseError {
            what: "arXiv response".to_string(),
            details: format!("API error: {}", article.summary),
        });
    }
    if article.arxiv_url.is_empty() {
        article.arxiv_url = article.id.clone();
    }
    Ok(article)
}

fn xml_error(err: impl std::fmt::Display) -> AppError {
    AppError::ParseError { what: "arXiv Atom feed".to_string(), details: err.to_string() }
}
