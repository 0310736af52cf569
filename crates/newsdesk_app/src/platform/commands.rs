use newsdesk_core::Msg;
use thiserror::Error;

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the controller.
    Dispatch(Msg),
    /// Print the current panel again.
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Неизвестная команда: {0} (введите help)")]
    Unknown(String),
    #[error("Команде {0} нужен аргумент")]
    MissingArgument(&'static str),
    #[error("Количество новостей должно быть целым числом от 1: {0}")]
    InvalidCount(String),
}

pub const HELP_TEXT: &str = "\
Команды:
  start        запустить парсер
  stop         остановить парсер
  reset        сбросить статус
  test         протестировать парсер
  clear        очистить файлы результатов
  count N      количество новостей
  lang XX      язык перевода
  show         показать панель
  help         эта справка
  quit         выход";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match head.to_lowercase().as_str() {
        "start" => Command::Dispatch(Msg::StartClicked),
        "stop" => Command::Dispatch(Msg::StopClicked),
        "reset" => Command::Dispatch(Msg::ResetClicked),
        "test" => Command::Dispatch(Msg::TestClicked),
        "clear" => Command::Dispatch(Msg::ClearFilesClicked),
        "count" => {
            let raw = arg.ok_or(CommandError::MissingArgument("count"))?;
            let count = raw
                .parse::<u32>()
                .ok()
                .filter(|count| *count >= 1)
                .ok_or_else(|| CommandError::InvalidCount(raw.to_string()))?;
            Command::Dispatch(Msg::ArticleCountChanged(count))
        }
        "lang" => {
            let language = arg.ok_or(CommandError::MissingArgument("lang"))?;
            Command::Dispatch(Msg::LanguageChanged(language.to_string()))
        }
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
