// src/lines.rs

//! Line-oriented view over captured process output.

use std::io::{self, BufRead, BufReader, Read};

/// Lazy, single-pass sequence of lines read from `R`.
///
/// Each yielded line has all trailing `\r` / `\n` bytes removed. Bytes
/// that are not valid UTF-8 are replaced lossily. Once the reader hits
/// end-of-file or an error the sequence is exhausted; to read the data
/// again, obtain a new sequence from a rewound reader.
#[derive(Debug)]
pub struct OutputLines<R> {
    reader: BufReader<R>,
    done: bool,
}

/// Wrap `reader` in a line sequence, starting at its current position.
pub fn lines_of<R: Read>(reader: R) -> OutputLines<R> {
    OutputLines {
        reader: BufReader::new(reader),
        done: false,
    }
}

impl<R: Read> Iterator for OutputLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                while matches!(buf.last(), Some(b'\n' | b'\r')) {
                    buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
