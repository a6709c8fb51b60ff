use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::portfolio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Static marketing pages: path, change frequency, priority.
const STATIC_PAGES: [(&str, ChangeFrequency, f32); 6] = [
    ("", ChangeFrequency::Weekly, 1.0),
    ("/about", ChangeFrequency::Monthly, 0.8),
    ("/services", ChangeFrequency::Monthly, 0.8),
    ("/portfolio", ChangeFrequency::Weekly, 0.9),
    ("/contact", ChangeFrequency::Yearly, 0.6),
    ("/blog", ChangeFrequency::Weekly, 0.5),
];

/// Every public URL: the static pages stamped with `now`, then one entry per
/// published portfolio stamped with its own `updated_at`.
pub fn build_entries(
    base_url: &str,
    published: &[portfolio::Model],
    now: DateTime<Utc>,
) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');

    let pages = STATIC_PAGES
        .iter()
        .map(|(path, change_frequency, priority)| SitemapEntry {
            url: format!("{base_url}{path}"),
            last_modified: now,
            change_frequency: *change_frequency,
            priority: *priority,
        });

    let projects = published.iter().map(|item| SitemapEntry {
        url: format!("{base_url}/portfolio/{}", item.slug),
        last_modified: item.updated_at,
        change_frequency: ChangeFrequency::Monthly,
        priority: 0.7,
    });

    pages.chain(projects).collect()
}

/// Render entries as a sitemaps.org `urlset` document.
pub fn render_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for entry in entries {
        xml.push_str(&format!(
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <changefreq>{}</changefreq>\n    <priority>{:.1}</priority>\n  </url>\n",
            escape(&entry.url),
            entry.last_modified.to_rfc3339_opts(SecondsFormat::Secs, true),
            entry.change_frequency.as_str(),
            entry.priority,
        ));
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
