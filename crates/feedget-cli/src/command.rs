/// Whether the token arrived from the process command line or from a line
/// read inside the session. `quit` and `help` only exist in the latter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Batch,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Install(Vec<String>),
    List(Vec<String>),
    Pack(Vec<String>),
    Unsupported(&'static str),
    Help,
    Quit,
    Unknown(String),
}

/// Case-insensitive alias resolution. `delete`/`rm` report as unsupported:
/// no installed-package bookkeeping is owned by this tool, so there is
/// nothing for them to remove (see DESIGN.md).
pub fn resolve(token: &str, args: Vec<String>, mode: Mode) -> Command {
    match token.to_lowercase().as_str() {
        "install" | "in" => Command::Install(args),
        "list" | "ls" => Command::List(args),
        "pack" => Command::Pack(args),
        "delete" | "rm" => Command::Unsupported("delete"),
        "publish" | "pub" => Command::Unsupported("publish"),
        "update" | "up" => Command::Unsupported("update"),
        "quit" if mode == Mode::Interactive => Command::Quit,
        "help" if mode == Mode::Interactive => Command::Help,
        other => Command::Unknown(other.to_string()),
    }
}
