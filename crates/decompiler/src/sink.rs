// Copyright (C) 2025 Ryan Daum <ryan.daum@gmail.com> This program is free
// software: you can redistribute it and/or modify it under the terms of the GNU
// General Public License as published by the Free Software Foundation, version
// 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//

//! Indentation- and line-aware text output.

use std::io::{self, Write};

/// Wraps the destination stream and tracks the nesting depth and whether the cursor sits
/// mid-line. Nothing is buffered here; every call goes straight to the writer and any failure
/// is handed back to the caller.
#[derive(Debug)]
pub struct OutputSink<W: Write> {
    writer: W,
    indent_width: usize,
    depth: usize,
    inside_line: bool,
}

impl<W: Write> OutputSink<W> {
    pub fn new(writer: W, indent_width: usize) -> Self {
        Self {
            writer,
            indent_width,
            depth: 0,
            inside_line: false,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_inside_line(&self) -> bool {
        self.inside_line
    }

    /// Callers pair this with `decrease_indentation`.
    pub fn increase_indentation(&mut self) {
        self.depth += 1;
    }

    pub fn decrease_indentation(&mut self) {
        debug_assert!(self.depth > 0, "unbalanced indentation");
        self.depth = self.depth.saturating_sub(1);
    }

    /// Puts the depth back to a value saved earlier, after a render that bailed out mid-block.
    pub fn restore_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.inside_line = true;
        Ok(())
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.new_line()
    }

    pub fn new_line(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\n")?;
        self.inside_line = false;
        Ok(())
    }

    /// Ends the current line if anything has been written to it.
    pub fn break_line(&mut self) -> io::Result<()> {
        if self.inside_line {
            self.new_line()?;
        }
        Ok(())
    }

    pub fn write_indentation(&mut self) -> io::Result<()> {
        let width = self.depth * self.indent_width;
        write!(self.writer, "{:width$}", "")?;
        self.inside_line = true;
        Ok(())
    }

    pub fn write_indented(&mut self, text: &str) -> io::Result<()> {
        self.write_indentation()?;
        self.write(text)
    }

    pub fn write_indented_line(&mut self, text: &str) -> io::Result<()> {
        self.write_indented(text)?;
        self.new_line()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rendered(sink: OutputSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn tracks_line_state() {
        let mut sink = OutputSink::new(vec![], 2);
        assert!(!sink.is_inside_line());
        sink.write("abc").unwrap();
        assert!(sink.is_inside_line());
        sink.write_line(";").unwrap();
        assert!(!sink.is_inside_line());
        assert_eq!(rendered(sink), "abc;\n");
    }

    #[test]
    fn indents_two_spaces_per_level() {
        let mut sink = OutputSink::new(vec![], 2);
        sink.write_indented_line("{").unwrap();
        sink.increase_indentation();
        sink.write_indented_line("a;").unwrap();
        sink.increase_indentation();
        sink.write_indented_line("b;").unwrap();
        sink.decrease_indentation();
        sink.decrease_indentation();
        sink.write_indented_line("}").unwrap();
        assert_eq!(rendered(sink), "{\n  a;\n    b;\n}\n");
    }

    #[test]
    fn custom_indent_width() {
        let mut sink = OutputSink::new(vec![], 4);
        sink.increase_indentation();
        sink.write_indented_line("x").unwrap();
        assert_eq!(sink.depth(), 1);
        assert_eq!(rendered(sink), "    x\n");
    }

    #[test]
    fn restores_saved_depth() {
        let mut sink = OutputSink::new(vec![], 2);
        let saved = sink.depth();
        sink.increase_indentation();
        sink.increase_indentation();
        sink.restore_depth(saved);
        sink.write_indented_line("x").unwrap();
        assert_eq!(rendered(sink), "x\n");
    }

    #[test]
    fn break_line_only_when_mid_line() {
        let mut sink = OutputSink::new(vec![], 2);
        sink.break_line().unwrap();
        sink.write("if (a)").unwrap();
        sink.break_line().unwrap();
        sink.break_line().unwrap();
        sink.write_line("{").unwrap();
        assert_eq!(rendered(sink), "if (a)\n{\n");
    }

    #[test]
    fn write_errors_propagate() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
        let mut sink = OutputSink::new(Closed, 2);
        let err = sink.write("x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(!sink.is_inside_line());
    }
}
