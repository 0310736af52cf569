//! Article card templating.
//!
//! Every article field is escaped before it reaches markup, and links are only
//! emitted for `http`/`https` targets.

use std::fmt::Write;

use chrono::{Datelike, NaiveDateTime, Timelike};
use url::Url;

use crate::Article;

const FALLBACK_TITLE: &str = "Новость";
const CONTENT_PLACEHOLDER: &str = "Содержание новости недоступно";

const MONTHS_GENITIVE: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

/// Rendered news card, ready to be placed into a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCard {
    /// Unescaped original title, for plain-text surfaces.
    pub headline: String,
    pub title_html: String,
    pub date_text: String,
    pub content_html: String,
}

pub fn render_article(article: &Article, received_at: NaiveDateTime) -> ArticleCard {
    let headline = present(&article.title).unwrap_or(FALLBACK_TITLE).to_string();

    let mut title_html = format!(
        "<div class=\"news-title-original\">{}</div>",
        escape_html(&headline)
    );
    if let Some(translated) = present(&article.title_translated) {
        let _ = write!(
            title_html,
            "\n<div class=\"news-title-translated\">🇷🇺 {}</div>",
            escape_html(translated)
        );
    }

    let sections = [
        (&article.content, "📝 Оригинал:", "news-content-original"),
        (&article.content_translated, "🇷🇺 Перевод:", "news-content-translated"),
        (&article.full_content, "📄 Полное содержание:", "news-content-full"),
    ];

    let mut content_html = String::new();
    for (field, heading, class) in sections {
        if let Some(text) = present(field) {
            let _ = write!(
                content_html,
                "<div class=\"news-content-section\">\n    <h4>{heading}</h4>\n    <div class=\"{class}\">{}</div>\n</div>\n",
                paragraphs(text)
            );
        }
    }
    if let Some(href) = article.link.as_deref().and_then(safe_link) {
        let _ = writeln!(
            content_html,
            "<div class=\"news-link-section\">\n    <a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"news-link\">🔗 Читать оригинал</a>\n</div>",
            escape_html(&href)
        );
    }
    if content_html.is_empty() {
        let _ = writeln!(
            content_html,
            "<div class=\"news-content-empty\">{CONTENT_PLACEHOLDER}</div>"
        );
    }

    ArticleCard {
        headline,
        title_html,
        date_text: format_received_at(received_at),
        content_html,
    }
}

/// Wraps a card into a standalone UTF-8 HTML page.
pub fn render_card_document(card: &ArticleCard) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n<article class=\"news-card show\">\n<header class=\"news-title\">\n{}\n</header>\n<div class=\"news-date\">{}</div>\n<section class=\"news-content\">\n{}</section>\n</article>\n</body>\n</html>\n",
        escape_html(&card.headline),
        card.title_html,
        escape_html(&card.date_text),
        card.content_html
    )
}

/// Replaces `&`, `<`, `>`, `"` and `'` with their HTML entities.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Russian long date with time, e.g. `17 октября 2026 г. в 14:05`.
pub fn format_received_at(at: NaiveDateTime) -> String {
    let month = MONTHS_GENITIVE[at.month0() as usize];
    format!(
        "{} {} {} г. в {:02}:{:02}",
        at.day(),
        month,
        at.year(),
        at.hour(),
        at.minute()
    )
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}

fn paragraphs(text: &str) -> String {
    escape_html(&text.replace("\r\n", "\n")).replace('\n', "<br><br>")
}

fn safe_link(raw: &str) -> Option<String> {
    let url = Url::parse(raw.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}
