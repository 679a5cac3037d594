/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Free text to send as-is.
    Say(String),
    Send,
    Draft,
    Actions,
    /// 1-based quick action number, never 0.
    Quick(usize),
    Open,
    Close,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Command::Say(line.trim_end_matches(['\r', '\n']).to_string());
        };

        let mut parts = rest.split_whitespace();
        let word = parts.next().unwrap_or("");
        match (word.to_lowercase().as_str(), parts.next()) {
            ("send", None) => Command::Send,
            ("draft", None) => Command::Draft,
            ("actions", None) => Command::Actions,
            ("quick", Some(n)) =>
                match n.parse::<usize>() {
                    Ok(n) if n > 0 => Command::Quick(n),
                    _ => Command::Unknown(trimmed.to_string()),
                }
            ("open", None) => Command::Open,
            ("close", None) => Command::Close,
            ("help", None) => Command::Help,
            ("quit", None) | ("exit", None) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}
