mod support;

use newsdesk_core::{escape_html, format_received_at, render_article, Article};
use pretty_assertions::assert_eq;
use support::received_at;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn full_content_only_renders_one_section() {
    let article = Article {
        title: Some("Title".to_string()),
        full_content: Some("Whole story".to_string()),
        ..Default::default()
    };

    let card = render_article(&article, received_at());

    assert_eq!(count(&card.content_html, "news-content-section"), 1);
    assert!(card.content_html.contains("news-content-full"));
    assert!(!card.content_html.contains("news-content-original"));
    assert!(!card.content_html.contains("news-content-translated"));
    assert!(!card.content_html.contains("Содержание новости недоступно"));
}

#[test]
fn no_content_and_no_link_renders_placeholder_only() {
    let card = render_article(&Article::default(), received_at());

    assert!(card.content_html.contains("Содержание новости недоступно"));
    assert!(!card.content_html.contains("news-link-section"));
    assert_eq!(card.headline, "Новость");
    assert!(!card.title_html.contains("news-title-translated"));
}

#[test]
fn sections_follow_fixed_order() {
    let article = Article {
        title: Some("T".to_string()),
        content: Some("orig".to_string()),
        content_translated: Some("перевод".to_string()),
        full_content: Some("full".to_string()),
        ..Default::default()
    };

    let html = render_article(&article, received_at()).content_html;
    let original = html.find("news-content-original").expect("original");
    let translated = html.find("news-content-translated").expect("translated");
    let full = html.find("news-content-full").expect("full");

    assert!(original < translated && translated < full);
    assert_eq!(count(&html, "news-content-section"), 3);
}

#[test]
fn translated_title_is_prefixed() {
    let article = Article {
        title: Some("Original".to_string()),
        title_translated: Some("Перевод".to_string()),
        ..Default::default()
    };

    let card = render_article(&article, received_at());

    assert!(card
        .title_html
        .contains("<div class=\"news-title-translated\">🇷🇺 Перевод</div>"));
}

#[test]
fn newlines_become_paragraph_breaks() {
    let article = Article {
        content: Some("one\ntwo\r\nthree".to_string()),
        ..Default::default()
    };

    let html = render_article(&article, received_at()).content_html;

    assert!(html.contains("one<br><br>two<br><br>three"));
}

#[test]
fn fields_are_escaped() {
    let article = Article {
        title: Some("<script>alert(1)</script>".to_string()),
        content: Some("Tom & \"Jerry\" <b>".to_string()),
        ..Default::default()
    };

    let card = render_article(&article, received_at());

    assert!(!card.title_html.contains("<script>"));
    assert!(card.title_html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(card
        .content_html
        .contains("Tom &amp; &quot;Jerry&quot; &lt;b&gt;"));
}

#[test]
fn link_section_is_appended_for_http_links() {
    let article = Article {
        content: Some("text".to_string()),
        link: Some("https://example.com/news/1?a=1&b=2".to_string()),
        ..Default::default()
    };

    let html = render_article(&article, received_at()).content_html;

    assert!(html.contains("href=\"https://example.com/news/1?a=1&amp;b=2\""));
    assert!(html.find("news-link-section") > html.find("news-content-section"));
}

#[test]
fn link_alone_replaces_placeholder() {
    let article = Article {
        link: Some("http://example.com/a".to_string()),
        ..Default::default()
    };

    let html = render_article(&article, received_at()).content_html;

    assert!(!html.contains("Содержание новости недоступно"));
    assert!(html.contains("news-link-section"));
}

#[test]
fn script_links_are_dropped() {
    let article = Article {
        content: Some("text".to_string()),
        link: Some("javascript:alert(1)".to_string()),
        ..Default::default()
    };

    let html = render_article(&article, received_at()).content_html;

    assert!(!html.contains("news-link-section"));
    assert!(!html.contains("javascript"));
}

#[test]
fn blank_fields_count_as_absent() {
    let article = Article {
        title: Some("  ".to_string()),
        content: Some(String::new()),
        ..Default::default()
    };

    let card = render_article(&article, received_at());

    assert_eq!(card.headline, "Новость");
    assert!(card.content_html.contains("Содержание новости недоступно"));
}

#[test]
fn escape_html_covers_quotes() {
    assert_eq!(escape_html("a'b\"c"), "a&#39;b&quot;c");
}

#[test]
fn received_at_uses_russian_month_names() {
    assert_eq!(format_received_at(received_at()), "17 октября 2026 г. в 14:05");
}
