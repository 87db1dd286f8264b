//! Command dispatch for the interactive prompt
//!
//! Each line is tokenized on whitespace; the first token selects the
//! command and free-text arguments are re-joined from the remaining
//! tokens, with one layer of matching quotes stripped. Command handlers
//! return their output as a string so the loop owns all printing.

use edit_engine::{EditError, EditorSession, SessionOptions};
use std::path::{Path, PathBuf};

/// What the loop should do after a line has been handled
#[derive(Debug, PartialEq, Eq)]
pub enum ReplAction {
    Continue,
    Quit,
}

const HELP: &str = "\
Commands:
  load [filename]              - Load a .docx file
  map                          - Show document structure JSON
  replace [id] [text...]       - Replace text of a run or paragraph
  insert_after [id] [text...]  - Insert a new paragraph after [id]
  delete [id]                  - Delete a paragraph or clear a run
  format [id] [prop] [value]   - Set bold, italic or size
  save [filename]              - Write the document to disk
  validate [filename]          - Check a saved file's integrity
  help                         - Show this message
  exit                         - Quit";

pub struct Repl {
    session: Option<EditorSession>,
    options: SessionOptions,
}

impl Repl {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            session: None,
            options,
        }
    }

    /// Load a document, replacing any session already open
    pub fn load(&mut self, path: &Path) -> String {
        match EditorSession::open(path, self.options) {
            Ok(session) => {
                let (paragraphs, tables) =
                    (session.tree().paragraph_count(), session.tree().table_count());
                self.session = Some(session);
                format!(
                    "Loaded {} ({} paragraphs, {} tables)",
                    path.display(),
                    paragraphs,
                    tables
                )
            }
            Err(err) => format!("Failed to load {}: {}", path.display(), err),
        }
    }

    /// Handle one input line, returning the action and the text to print
    pub fn handle_line(&mut self, line: &str) -> (ReplAction, String) {
        let mut tokens = line.split_whitespace();
        let cmd = match tokens.next() {
            Some(cmd) => cmd.to_ascii_lowercase(),
            None => return (ReplAction::Continue, String::new()),
        };
        let args: Vec<&str> = tokens.collect();

        let output = match cmd.as_str() {
            "exit" | "quit" => return (ReplAction::Quit, String::new()),
            "help" => HELP.to_string(),
            "load" => match args.first() {
                Some(path) => self.load(&PathBuf::from(path)),
                None => "Usage: load [filename]".to_string(),
            },
            "map" => self.with_session(|session| {
                serde_json::to_string_pretty(&session.map())
                    .unwrap_or_else(|err| format!("Failed to render map: {}", err))
            }),
            "replace" => {
                if args.len() < 2 {
                    "Usage: replace [id] [new text]".to_string()
                } else {
                    let id = args[0].to_string();
                    let text = strip_quotes(&args[1..].join(" ")).to_string();
                    self.with_session(|session| render(session.replace_text(&id, &text)))
                }
            }
            "insert_after" => {
                if args.len() < 2 {
                    "Usage: insert_after [id] [new text]".to_string()
                } else {
                    let id = args[0].to_string();
                    let text = strip_quotes(&args[1..].join(" ")).to_string();
                    self.with_session(|session| render(session.insert_after(&id, &text)))
                }
            }
            "delete" => match args.first() {
                Some(&id) => {
                    let id = id.to_string();
                    self.with_session(|session| render(session.delete_element(&id)))
                }
                None => "Usage: delete [id]".to_string(),
            },
            "format" => {
                if args.len() < 3 {
                    "Usage: format [id] [prop] [value]".to_string()
                } else {
                    let (id, prop, value) =
                        (args[0].to_string(), args[1].to_string(), args[2].to_string());
                    self.with_session(|session| render(session.format_element(&id, &prop, &value)))
                }
            }
            "save" => match args.first() {
                Some(path) => {
                    let path = PathBuf::from(path);
                    self.with_session(|session| render(session.save(&path)))
                }
                None => "Usage: save [filename]".to_string(),
            },
            "validate" => match args.first() {
                Some(path) => {
                    let path = PathBuf::from(path);
                    self.with_session(|session| session.validate(&path).to_string())
                }
                None => "Usage: validate [filename]".to_string(),
            },
            _ => "Unknown command. Type 'help' for the command list.".to_string(),
        };

        (ReplAction::Continue, output)
    }

    fn with_session(&mut self, f: impl FnOnce(&mut EditorSession) -> String) -> String {
        match self.session.as_mut() {
            Some(session) => f(session),
            None => "No document loaded.".to_string(),
        }
    }

    #[cfg(test)]
    fn with_open_session(session: EditorSession, options: SessionOptions) -> Self {
        Self {
            session: Some(session),
            options,
        }
    }
}

fn render(result: Result<edit_engine::EditOutcome, EditError>) -> String {
    match result {
        Ok(outcome) => match outcome.warning {
            Some(warning) => format!("{}\nwarning: {}", outcome.message, warning),
            None => outcome.message,
        },
        Err(err) => format!("Error: {}", err),
    }
}

/// Strip one layer of matching single or double quotes
fn strip_quotes(text: &str) -> &str {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &text[1..text.len() - 1];
        }
    }
    text
}
