use std::path::Path;

use newsdesk_core::{AppViewModel, ArticleCard, ProgressView, UiState};

const BAR_WIDTH: usize = 30;

/// Turns the view model into the lines printed for the panel.
pub fn render(view: &AppViewModel, card_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    let mut status = format!(
        "[{}] {}",
        status_badge(view.ui),
        printable(&view.status_text)
    );
    if view.loading {
        status.push_str(" ⏳");
    }
    lines.push(status);

    lines.push(format!(
        "Новостей: {} | Язык: {} | start: {} | stop: {}",
        view.form.article_count,
        view.form.target_language,
        availability(view.start_enabled),
        availability(view.stop_enabled)
    ));

    if let Some(progress) = &view.progress {
        lines.push(progress_line(progress));
    }
    if let Some(card) = &view.article {
        lines.extend(article_lines(card, card_path));
    }
    lines
}

/// Backend text with control characters removed, so escape sequences never
/// reach the terminal.
fn printable(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

fn status_badge(ui: UiState) -> &'static str {
    match ui {
        UiState::Idle => "ГОТОВ",
        UiState::Running => "РАБОТА",
        UiState::Error => "ОШИБКА",
    }
}

fn availability(enabled: bool) -> &'static str {
    if enabled {
        "доступна"
    } else {
        "недоступна"
    }
}

pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = usize::from(percent.min(100)) * width / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

fn progress_line(progress: &ProgressView) -> String {
    let bar = progress_bar(progress.percent, BAR_WIDTH);
    let text = printable(&progress.text);
    if text.is_empty() {
        format!("{bar} {:>3}%", progress.percent)
    } else {
        format!("{bar} {:>3}% {}", progress.percent, text)
    }
}

fn article_lines(card: &ArticleCard, card_path: &Path) -> Vec<String> {
    vec![
        format!("Новость: {}", printable(&card.headline)),
        format!("Получена: {}", card.date_text),
        format!("Карточка: {}", card_path.display()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::JobConfig;
    use pretty_assertions::assert_eq;

    fn idle_view() -> AppViewModel {
        AppViewModel {
            ui: UiState::Idle,
            status_text: "Готов к работе".to_string(),
            start_enabled: true,
            stop_enabled: false,
            form: JobConfig::default(),
            ..Default::default()
        }
    }

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(50, 10), "[#####-----]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 10), "[##########]");
    }

    #[test]
    fn idle_panel_has_status_and_form_only() {
        let lines = render(&idle_view(), Path::new("out/latest_article.html"));
        assert_eq!(
            lines,
            vec![
                "[ГОТОВ] Готов к работе".to_string(),
                "Новостей: 1 | Язык: ru | start: доступна | stop: недоступна".to_string(),
            ]
        );
    }

    #[test]
    fn running_panel_shows_progress_and_spinner() {
        let view = AppViewModel {
            ui: UiState::Running,
            status_text: "Парсер запущен".to_string(),
            start_enabled: false,
            stop_enabled: true,
            loading: true,
            progress: Some(ProgressView {
                percent: 10,
                text: "Fetching page 2".to_string(),
            }),
            ..idle_view()
        };
        let lines = render(&view, Path::new("out/latest_article.html"));

        assert_eq!(lines[0], "[РАБОТА] Парсер запущен ⏳");
        assert!(lines[1].ends_with("start: недоступна | stop: доступна"));
        assert!(lines[2].ends_with(" 10% Fetching page 2"));
    }

    #[test]
    fn article_summary_points_at_card_file() {
        let view = AppViewModel {
            article: Some(ArticleCard {
                headline: "Заголовок".to_string(),
                title_html: String::new(),
                date_text: "17 октября 2026 г. в 14:05".to_string(),
                content_html: String::new(),
            }),
            ..idle_view()
        };
        let lines = render(&view, Path::new("out/latest_article.html"));

        assert_eq!(
            &lines[2..],
            &[
                "Новость: Заголовок".to_string(),
                "Получена: 17 октября 2026 г. в 14:05".to_string(),
                "Карточка: out/latest_article.html".to_string(),
            ]
        );
    }

    #[test]
    fn backend_text_cannot_inject_terminal_escapes() {
        let view = AppViewModel {
            status_text: "Ошибка\u{1b}[2J при парсинге".to_string(),
            progress: Some(ProgressView {
                percent: 5,
                text: "page\r\u{7} 2".to_string(),
            }),
            article: Some(ArticleCard {
                headline: "\u{1b}]0;owned\u{7}Заголовок\u{1b}[31m".to_string(),
                title_html: String::new(),
                date_text: "17 октября 2026 г. в 14:05".to_string(),
                content_html: String::new(),
            }),
            ..idle_view()
        };
        let lines = render(&view, Path::new("out/latest_article.html"));

        assert!(lines.iter().all(|line| !line.chars().any(char::is_control)));
        assert_eq!(lines[0], "[ГОТОВ] Ошибка[2J при парсинге");
        assert!(lines[2].ends_with("  5% page 2"));
        assert_eq!(lines[3], "Новость: ]0;ownedЗаголовок[31m");
    }
}
