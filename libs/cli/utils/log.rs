use colored::*;
use std::fmt::{self, Display};

/// Outcome shown by the header symbol and color.
pub enum LogType {
    Success,
    Warning,
    /// The activity was started, joined or is now served.
    Start,
    /// The activity was torn down.
    Stop,
}

impl LogType {
    fn style(&self) -> (&'static str, Color) {
        match self {
            LogType::Success => ("✔", Color::Green),
            LogType::Warning => ("!", Color::Yellow),
            LogType::Start => ("❯", Color::Blue),
            LogType::Stop => ("■", Color::Magenta),
        }
    }
}

/// Command result printed as a header followed by a tree of labelled values.
pub struct LogBuilder {
    log_type: LogType,
    message: String,
    branches: Vec<(&'static str, String)>,
}

impl LogBuilder {
    pub fn new(log_type: LogType, message: impl Display) -> Self {
        Self {
            log_type,
            message: message.to_string(),
            branches: Vec::new(),
        }
    }

    pub fn with_branch(mut self, label: &'static str, value: impl Display) -> Self {
        self.branches.push((label, value.to_string()));
        self
    }

    /// Skipped when `value` is `None`.
    pub fn with_optional_branch<T: Display>(self, label: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with_branch(label, value),
            None => self,
        }
    }

    pub fn print(self) {
        println!("{self}");
    }
}

impl Display for LogBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (symbol, color) = self.log_type.style();
        write!(
            f,
            "{} {}",
            symbol.color(color).bold(),
            self.message.color(color).bold()
        )?;

        // Values line up on the longest label.
        let width = self
            .branches
            .iter()
            .map(|(label, _)| label.chars().count() + 1)
            .max()
            .unwrap_or(0);

        let last = self.branches.len().saturating_sub(1);
        for (i, (label, value)) in self.branches.iter().enumerate() {
            let connector = if i == last { "  ╰─" } else { "  ├─" };
            let label = format!("{label}:");
            write!(f, "\n{} {} {value}", connector.dimmed(), format!("{label:<width$}").bold())?;
        }

        Ok(())
    }
}
