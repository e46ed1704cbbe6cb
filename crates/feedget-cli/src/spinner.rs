use std::io::{self, Write};

const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];

/// Single-glyph progress indicator. Each tick overwrites the previous one by
/// ending with a carriage return instead of a newline. The rotation index
/// lives on the value so tests can reset it by constructing a fresh spinner.
#[derive(Debug, Default)]
pub struct Spinner {
    index: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    pub fn tick(&mut self, out: &mut dyn Write, prefix: &str) -> io::Result<()> {
        write!(out, "{}{}\r", prefix, GLYPHS[self.index])?;
        out.flush()?;
        self.index = (self.index + 1) % GLYPHS.len();
        Ok(())
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
