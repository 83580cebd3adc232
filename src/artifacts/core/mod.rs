//! Shared utilities: line decoding for tool output and the pager wrapper

use derive_new::new;
use minus::Pager;
use std::io::{self, BufRead, Write};

/// Read one line without its line terminator
///
/// Lines that are not valid UTF-8 are decoded as ISO-8859-1, the usual
/// encoding of old CVS log messages. Returns `None` at the end of the stream.
pub(crate) fn read_tool_line(reader: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut buffer = Vec::new();
    if reader.read_until(b'\n', &mut buffer)? == 0 {
        return Ok(None);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();
    }
    if buffer.last() == Some(&b'\r') {
        buffer.pop();
    }

    let line = match String::from_utf8(buffer) {
        Ok(line) => line,
        Err(err) => err.into_bytes().into_iter().map(char::from).collect(),
    };

    Ok(Some(line))
}

/// Wrapper that implements `Write` for the minus pager
///
/// ```ignore
/// let pager = Pager::new();
/// let mut writer = PagerWriter::new(pager.clone());
/// writeln!(writer, "Some long output...")?;
/// page_all(pager)?;
/// ```
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let s =
            std::str::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(s).map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
