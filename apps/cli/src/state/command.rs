//! # Edit Session Commands
//!
//! One line of input, parsed.
//!
//! ## Grammar
//! ```text
//! add                              append a blank row
//! set <row> <field> <value...>     edit one cell (value may contain spaces)
//! remove <row>                     delete a row
//! customer [<client id>]           select a client (no id clears)
//! header <field> <value...>        invoiceNo | invoiceDate | referenceNo
//! show | print | items | clients   views
//! save | help | quit               session control
//! ```
//!
//! Rows are 1-based on the command line and 0-based everywhere else.

use std::str::FromStr;

use salesdesk_core::{HeaderField, LineField};

use crate::error::AppError;

pub const HELP: &str = "\
Commands:
  add                          Add a blank row
  set <row> <field> <value>    Edit a cell; fields: code, desc, note, qty, price, tax
  remove <row>                 Remove a row
  customer [<id>]              Select a client by id (no id clears the customer)
  header <field> <value>       Set invoiceNo, invoiceDate or referenceNo
  show                         Show the order
  print                        Print the invoice (stored orders only)
  items                        List the item catalog
  clients                      List clients
  save                         Save the order and close
  help                         Show this help
  quit                         Close without saving
Rows are numbered from 1.";

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Add,
    Set {
        row: usize,
        field: LineField,
        value: String,
    },
    Remove {
        row: usize,
    },
    Customer {
        client_id: String,
    },
    Header {
        field: HeaderField,
        value: String,
    },
    Show,
    Print,
    Items,
    Clients,
    Save,
    Help,
    Quit,
}

/// Splits off the first whitespace-delimited word.
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(i) => (&input[..i], input[i..].trim_start()),
        None => (input, ""),
    }
}

/// Parses a 1-based row number into a 0-based index.
fn parse_row(raw: &str) -> Result<usize, AppError> {
    match raw.parse::<usize>() {
        Ok(row) if row >= 1 => Ok(row - 1),
        _ => Err(AppError::validation(format!(
            "Row must be a number starting at 1, got '{}'",
            raw
        ))),
    }
}

fn require<'a>(word: &'a str, usage: &str) -> Result<&'a str, AppError> {
    if word.is_empty() {
        Err(AppError::validation(format!("Usage: {}", usage)))
    } else {
        Ok(word)
    }
}

impl FromStr for EditCommand {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = split_word(line.trim());

        match verb.to_ascii_lowercase().as_str() {
            "add" => Ok(EditCommand::Add),
            "set" => {
                const USAGE: &str = "set <row> <field> <value>";
                let (row, rest) = split_word(rest);
                let (field, value) = split_word(rest);
                Ok(EditCommand::Set {
                    row: parse_row(require(row, USAGE)?)?,
                    field: require(field, USAGE)?.parse()?,
                    value: value.trim_end().to_string(),
                })
            }
            "remove" | "rm" => {
                let (row, _) = split_word(rest);
                Ok(EditCommand::Remove {
                    row: parse_row(require(row, "remove <row>")?)?,
                })
            }
            "customer" => {
                let (client_id, _) = split_word(rest);
                Ok(EditCommand::Customer {
                    client_id: client_id.to_string(),
                })
            }
            "header" => {
                const USAGE: &str = "header <field> <value>";
                let (field, value) = split_word(rest);
                Ok(EditCommand::Header {
                    field: require(field, USAGE)?.parse()?,
                    value: value.trim_end().to_string(),
                })
            }
            "show" => Ok(EditCommand::Show),
            "print" => Ok(EditCommand::Print),
            "items" => Ok(EditCommand::Items),
            "clients" => Ok(EditCommand::Clients),
            "save" => Ok(EditCommand::Save),
            "help" | "?" => Ok(EditCommand::Help),
            "quit" | "exit" => Ok(EditCommand::Quit),
            "" => Err(AppError::validation("Empty command")),
            other => Err(AppError::validation(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                other
            ))),
        }
    }
}
