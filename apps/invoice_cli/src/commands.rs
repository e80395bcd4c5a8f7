//! Parsing of typed terminal commands into form commands.

use std::str::FromStr;

use shared::domain::{FieldId, FormAction, UnknownIdentifier};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  set <field-id> <value>   set a form field (see `fields`)
  add                      add the entered item to the invoice
  save                     submit the invoice and download the document
  clear                    reset the customer fields and remove all items
  show                     print the form, items and totals
  fields                   list field identifiers
  help                     show this help
  quit                     exit (waits for an in-flight save)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Set { field: FieldId, value: String },
    Action(FormAction),
    Show,
    Fields,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'; type `help`")]
    Unknown(String),
    #[error("usage: set <field-id> <value>")]
    MissingField,
    #[error(transparent)]
    UnknownField(#[from] UnknownIdentifier),
}

impl FromStr for UiCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim_start()))
            .unwrap_or((line, ""));

        match verb {
            "" => Err(CommandError::Empty),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(field, value)| (field, value.trim()))
                    .unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(CommandError::MissingField);
                }
                Ok(UiCommand::Set {
                    field: field.parse()?,
                    value: value.to_string(),
                })
            }
            "add" => Ok(UiCommand::Action(FormAction::AddItem)),
            "save" => Ok(UiCommand::Action(FormAction::SaveInvoice)),
            "clear" => Ok(UiCommand::Action(FormAction::ClearAll)),
            "show" => Ok(UiCommand::Show),
            "fields" => Ok(UiCommand::Fields),
            "help" | "?" => Ok(UiCommand::Help),
            "quit" | "exit" => Ok(UiCommand::Quit),
            other => other
                .parse::<FormAction>()
                .map(UiCommand::Action)
                .map_err(|_| CommandError::Unknown(other.to_string())),
        }
    }
}
