use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

use crate::command::Mode;
use crate::session::{Outcome, Session};

pub(crate) const PROMPT: &str = "feedget> ";

/// One read from the line-input collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadLine {
    Line(String),
    Interrupted,
    Eof,
    Failed(String),
}

/// The line-input seam. Production uses the rustyline editor; tests drive
/// the loop with a scripted reader.
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> ReadLine;
}

pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> rustyline::Result<Self> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> ReadLine {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.trim());
                }
                ReadLine::Line(line)
            }
            Err(ReadlineError::Interrupted) => ReadLine::Interrupted,
            Err(ReadlineError::Eof) => ReadLine::Eof,
            Err(err) => ReadLine::Failed(err.to_string()),
        }
    }
}

pub fn run(session: &mut Session) -> i32 {
    let mut reader = match EditorReader::new() {
        Ok(reader) => reader,
        Err(err) => {
            eprintln!("feedget: cannot open terminal: {err}");
            return 1;
        }
    };
    run_with(session, &mut reader)
}

/// Read-dispatch loop over the line-input collaborator. Per-line failures
/// are reported by the dispatch boundary and the loop continues; `quit` and
/// end-of-input end the session with status 0, a broken reader with 1.
pub fn run_with(session: &mut Session, reader: &mut dyn LineReader) -> i32 {
    loop {
        match reader.read_line(PROMPT) {
            ReadLine::Line(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let argv: Vec<String> = line.split_whitespace().map(str::to_string).collect();
                match session.run(&argv, Mode::Interactive) {
                    Outcome::Quit => return 0,
                    Outcome::Status(status) => debug!(status, "command finished"),
                    // empty argv is filtered above, so this never fires
                    Outcome::EnterInteractive => {}
                }
            }
            ReadLine::Interrupted => println!("^C"),
            ReadLine::Eof => return 0,
            ReadLine::Failed(err) => {
                eprintln!("feedget: readline error: {err}");
                return 1;
            }
        }
    }
}
