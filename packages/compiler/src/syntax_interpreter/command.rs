//! Binding command keywords (the part after the `.` in `value.bind`).

use std::fmt;
use std::str::FromStr;

/// Commands that write a property binding into an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyCommand {
    For,
    OneWay,
    TwoWay,
    OneTime,
    Bind,
}

/// Every command the interpreter has a handler for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingCommand {
    Property(PropertyCommand),
    Trigger,
    Delegate,
    Ref,
    Options,
}

impl BindingCommand {
    pub const ALL: [BindingCommand; 9] = [
        BindingCommand::Property(PropertyCommand::For),
        BindingCommand::Property(PropertyCommand::OneWay),
        BindingCommand::Property(PropertyCommand::TwoWay),
        BindingCommand::Property(PropertyCommand::OneTime),
        BindingCommand::Property(PropertyCommand::Bind),
        BindingCommand::Trigger,
        BindingCommand::Delegate,
        BindingCommand::Ref,
        BindingCommand::Options,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            BindingCommand::Property(PropertyCommand::For) => "for",
            BindingCommand::Property(PropertyCommand::OneWay) => "one-way",
            BindingCommand::Property(PropertyCommand::TwoWay) => "two-way",
            BindingCommand::Property(PropertyCommand::OneTime) => "one-time",
            BindingCommand::Property(PropertyCommand::Bind) => "bind",
            BindingCommand::Trigger => "trigger",
            BindingCommand::Delegate => "delegate",
            BindingCommand::Ref => "ref",
            BindingCommand::Options => "options",
        }
    }
}

impl fmt::Display for BindingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// The keyword did not name a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand;

impl FromStr for BindingCommand {
    type Err = UnknownCommand;

    fn from_str(keyword: &str) -> Result<Self, Self::Err> {
        BindingCommand::ALL
            .into_iter()
            .find(|command| command.keyword() == keyword)
            .ok_or(UnknownCommand)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_keywords_resolve() {
        assert_eq!(
            "two-way".parse::<BindingCommand>(),
            Ok(BindingCommand::Property(PropertyCommand::TwoWay))
        );
        assert_eq!(
            "one-time".parse::<BindingCommand>(),
            Ok(BindingCommand::Property(PropertyCommand::OneTime))
        );
        assert_eq!("delegate".parse::<BindingCommand>(), Ok(BindingCommand::Delegate));
    }

    #[test]
    fn keywords_are_case_sensitive() {
        assert!("Bind".parse::<BindingCommand>().is_err());
        assert!("frobnicate".parse::<BindingCommand>().is_err());
        assert!("".parse::<BindingCommand>().is_err());
    }
}
