//! Sitemap content parser
//!
//! Handles the three documented sitemap shapes: an XML `<urlset>` of page
//! URLs, an XML `<sitemapindex>` of child sitemaps, and a plain-text list of
//! URLs (one per line). Parsing is a soft operation: content that matches no
//! shape yields [`ParsedSitemap::Empty`], never an error.

use quick_xml::events::Event;
use quick_xml::Reader;

/// Result of parsing one sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedSitemap {
    /// A `<urlset>` (or plain-text list): page URLs in document order
    Urlset(Vec<String>),

    /// A `<sitemapindex>`: child sitemap URLs in document order
    Index(Vec<String>),

    /// Content matched no known sitemap shape
    Empty,
}

impl ParsedSitemap {
    /// Returns true when the document yielded no URLs at all
    pub fn is_empty(&self) -> bool {
        match self {
            ParsedSitemap::Urlset(urls) => urls.is_empty(),
            ParsedSitemap::Index(children) => children.is_empty(),
            ParsedSitemap::Empty => true,
        }
    }
}

/// Root elements that identify a sitemap document
enum RootKind {
    Urlset,
    Index,
}

/// Parses sitemap content into a URL list or child-sitemap list
///
/// Structured XML is attempted first; if the content is not XML or matches
/// neither sitemap shape, lines starting with `http` are treated as a
/// plain-text sitemap. A document with one `<url>` entry parses identically
/// to one with many, since the event stream makes no single/multi
/// distinction.
pub fn parse(content: &str) -> ParsedSitemap {
    if let Some(parsed) = parse_xml(content) {
        return parsed;
    }

    parse_plain_text(content)
}

/// Attempts a structured XML parse; None means "not XML sitemap shaped"
fn parse_xml(content: &str) -> Option<ParsedSitemap> {
    let mut reader = Reader::from_str(content);

    let mut root: Option<RootKind> = None;
    let mut in_loc = false;
    let mut locs: Vec<String> = Vec::new();

    loop {
        match reader.read_event() {
            // Malformed XML falls back to plain-text mode
            Err(_) => return None,
            Ok(Event::Eof) => break,
            Ok(Event::Start(start)) => {
                let name = local_name(start.name().as_ref());
                if root.is_none() {
                    match name.as_str() {
                        "urlset" => root = Some(RootKind::Urlset),
                        "sitemapindex" => root = Some(RootKind::Index),
                        // Well-formed XML, but not a sitemap
                        _ => return None,
                    }
                } else if name == "loc" {
                    in_loc = true;
                }
            }
            Ok(Event::End(end)) => {
                if local_name(end.name().as_ref()) == "loc" {
                    in_loc = false;
                }
            }
            Ok(Event::Text(text)) if in_loc => {
                if let Ok(value) = text.unescape() {
                    push_loc(&mut locs, &value);
                }
            }
            Ok(Event::CData(cdata)) if in_loc => {
                push_loc(&mut locs, &String::from_utf8_lossy(cdata.as_ref()));
            }
            Ok(_) => {}
        }
    }

    match root {
        Some(RootKind::Urlset) => Some(ParsedSitemap::Urlset(locs)),
        Some(RootKind::Index) => Some(ParsedSitemap::Index(locs)),
        None => None,
    }
}

/// Keeps non-empty `<loc>` values, trimmed
fn push_loc(locs: &mut Vec<String>, value: &str) {
    let trimmed = value.trim();
    if !trimmed.is_empty() {
        locs.push(trimmed.to_string());
    }
}

/// Strips any namespace prefix and lowercases the element name
fn local_name(raw: &[u8]) -> String {
    let name = String::from_utf8_lossy(raw);
    name.rsplit(':').next().unwrap_or(&name).to_ascii_lowercase()
}

/// Plain-text fallback: trimmed lines starting with `http` are URLs
fn parse_plain_text(content: &str) -> ParsedSitemap {
    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with("http"))
        .map(String::from)
        .collect();

    if urls.is_empty() {
        ParsedSitemap::Empty
    } else {
        ParsedSitemap::Urlset(urls)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_urlset() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc><lastmod>2024-01-01</lastmod></url>
  <url><loc>https://example.com/about</loc></url>
  <url><loc>https://example.com/contact</loc></url>
</urlset>"#;

        assert_eq!(
            parse(xml),
            ParsedSitemap::Urlset(vec![
                "https://example.com/".to_string(),
                "https://example.com/about".to_string(),
                "https://example.com/contact".to_string(),
            ])
        );
    }

    #[test]
    fn test_single_url_parses_like_many() {
        let single = r#"<urlset><url><loc>https://example.com/only</loc></url></urlset>"#;
        let multi_with_one = r#"<urlset>
  <url><loc>https://example.com/only</loc></url>
</urlset>"#;

        assert_eq!(parse(single), parse(multi_with_one));
        assert_eq!(
            parse(single),
            ParsedSitemap::Urlset(vec!["https://example.com/only".to_string()])
        );
    }

    #[test]
    fn test_parse_sitemapindex() {
        let xml = r#"<?xml version="1.0"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>https://example.com/sitemap-pages.xml</loc></sitemap>
  <sitemap><loc>https://example.com/sitemap-posts.xml</loc></sitemap>
</sitemapindex>"#;

        assert_eq!(
            parse(xml),
            ParsedSitemap::Index(vec![
                "https://example.com/sitemap-pages.xml".to_string(),
                "https://example.com/sitemap-posts.xml".to_string(),
            ])
        );
    }

    #[test]
    fn test_namespaced_elements() {
        let xml = r#"<sm:urlset xmlns:sm="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sm:url><sm:loc>https://example.com/ns</sm:loc></sm:url>
</sm:urlset>"#;

        assert_eq!(
            parse(xml),
            ParsedSitemap::Urlset(vec!["https://example.com/ns".to_string()])
        );
    }

    #[test]
    fn test_loc_in_cdata() {
        let xml = r#"<urlset><url><loc><![CDATA[https://example.com/cdata]]></loc></url></urlset>"#;
        assert_eq!(
            parse(xml),
            ParsedSitemap::Urlset(vec!["https://example.com/cdata".to_string()])
        );
    }

    #[test]
    fn test_empty_loc_entries_filtered() {
        let xml = r#"<urlset>
  <url><loc>https://example.com/kept</loc></url>
  <url><loc>   </loc></url>
  <url><loc/></url>
</urlset>"#;

        assert_eq!(
            parse(xml),
            ParsedSitemap::Urlset(vec!["https://example.com/kept".to_string()])
        );
    }

    #[test]
    fn test_plain_text_sitemap() {
        let text = "https://example.com/a\n  https://example.com/b  \nnot a url\n\nhttps://example.com/c";
        assert_eq!(
            parse(text),
            ParsedSitemap::Urlset(vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
                "https://example.com/c".to_string(),
            ])
        );
    }

    #[test]
    fn test_garbage_is_empty() {
        assert_eq!(parse("this is nothing useful"), ParsedSitemap::Empty);
        assert_eq!(parse(""), ParsedSitemap::Empty);
    }

    #[test]
    fn test_html_page_is_empty() {
        let html = "<html><head><title>Hi</title></head><body><a href=\"https://example.com\">x</a></body></html>";
        assert_eq!(parse(html), ParsedSitemap::Empty);
    }

    #[test]
    fn test_xml_but_not_a_sitemap() {
        let xml = "<rss version=\"2.0\"><channel><title>Feed</title></channel></rss>";
        assert_eq!(parse(xml), ParsedSitemap::Empty);
    }

    #[test]
    fn test_is_empty() {
        assert!(ParsedSitemap::Empty.is_empty());
        assert!(ParsedSitemap::Urlset(vec![]).is_empty());
        assert!(!ParsedSitemap::Index(vec!["https://example.com/s.xml".to_string()]).is_empty());
    }
}
