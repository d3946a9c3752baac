use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use crate::form::FormField;
use crate::models::ApartmentId;

pub const HELP: &str = "\
Commands:
  list                     show apartments
  form                     show the form
  set <field> <value>      fill in name, location, rent or status
  edit <id>                load an apartment into the form
  reset                    clear the form
  submit                   add or update the apartment in the form
  delete <id>              delete an apartment
  toggle <id>              flip Available/Occupied
  help                     show this text
  quit                     exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Form,
    Set { field: FormField, value: String },
    Edit(ApartmentId),
    Reset,
    Submit,
    Delete(ApartmentId),
    Toggle(ApartmentId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct ParseError(String);

lazy_static! {
    static ref COMMAND_REGEX: Regex = Regex::new(r"^\s*([A-Za-z-]+)\s*(.*?)\s*$").unwrap();
    static ref SET_ARGS_REGEX: Regex = Regex::new(r"^(\w+)\s+(.+)$").unwrap();
    static ref ID_REGEX: Regex = Regex::new(r"^\S+$").unwrap();
}

fn parse_id(verb: &str, args: &str) -> Result<ApartmentId, ParseError> {
    if !ID_REGEX.is_match(args) {
        return Err(ParseError(format!("usage: {verb} <id>")));
    }
    Ok(ApartmentId::new(args))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn no_args(command: Command, verb: &str, args: &str) -> Result<Command, ParseError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ParseError(format!("{verb} takes no arguments")))
    }
}

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let captures = COMMAND_REGEX
        .captures(input)
        .ok_or_else(|| ParseError("Unknown command, type 'help'".into()))?;
    let verb = captures[1].to_lowercase();
    let args = captures.get(2).map_or("", |m| m.as_str());

    match verb.as_str() {
        "list" | "ls" => no_args(Command::List, &verb, args),
        "form" => no_args(Command::Form, &verb, args),
        "reset" => no_args(Command::Reset, &verb, args),
        "submit" => no_args(Command::Submit, &verb, args),
        "help" => no_args(Command::Help, &verb, args),
        "quit" | "exit" => no_args(Command::Quit, &verb, args),
        "edit" => parse_id(&verb, args).map(Command::Edit),
        "delete" | "rm" => parse_id(&verb, args).map(Command::Delete),
        "toggle" => parse_id(&verb, args).map(Command::Toggle),
        "set" => {
            let set_args = SET_ARGS_REGEX
                .captures(args)
                .ok_or_else(|| ParseError("usage: set <field> <value>".into()))?;
            let field: FormField = set_args[1].parse().map_err(ParseError)?;
            Ok(Command::Set {
                field,
                value: unquote(&set_args[2]).to_string(),
            })
        }
        other => Err(ParseError(format!(
            "Unknown command '{other}', type 'help'"
        ))),
    }
}
