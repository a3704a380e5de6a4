//! Line commands accepted by the interactive console.

use anyhow::{Context, bail};
use grader_core::FieldId;

pub const HELP: &str = "\
Commands:
  set <field> <value>   set namespace | question | rubric | answer (\\n for newlines)
  rubric-file <path>    load rubric text from a file
  answer-file <path>    load the student answer from a file
  embed                 embed the rubric            (Embed rubric)
  grade                 grade the student answer    (Grade with AutoGrader.ai)
  close                 close the preview dialog
  show                  redraw the console
  help                  show this help
  quit                  leave the console";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Set { field: FieldId, value: String },
    LoadFile { field: FieldId, path: String },
    Embed,
    Grade,
    Close,
    Show,
    Help,
    Quit,
    Nothing,
}

/// Parse one input line.
pub fn parse(line: &str) -> anyhow::Result<ReplCommand> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim_start()));

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ReplCommand::Nothing,
        "set" => {
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest, ""), |(field, value)| (field, value.trim_start()));
            if field.is_empty() {
                bail!("usage: set <field> <value>");
            }
            ReplCommand::Set {
                field: field.parse::<FieldId>().context("cannot set field")?,
                value: value.replace("\\n", "\n"),
            }
        }
        "rubric-file" => ReplCommand::LoadFile {
            field: FieldId::RubricText,
            path: required_path(rest, "rubric-file")?,
        },
        "answer-file" => ReplCommand::LoadFile {
            field: FieldId::StudentAnswer,
            path: required_path(rest, "answer-file")?,
        },
        "embed" | "upload" => ReplCommand::Embed,
        "grade" => ReplCommand::Grade,
        "close" => ReplCommand::Close,
        "show" | "view" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        other => bail!("unknown command '{other}' (type `help`)"),
    };
    Ok(command)
}

fn required_path(rest: &str, command: &str) -> anyhow::Result<String> {
    if rest.is_empty() {
        bail!("usage: {command} <path>");
    }
    Ok(rest.to_string())
}
