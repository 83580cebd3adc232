use std::cell::{RefCell, RefMut};
use std::io::Write;

/// Output sink of the commands
///
/// Reports go to the writer (stdout or the pager); per-file problems are
/// reported on stderr so that the report itself stays parseable.
pub struct Console {
    writer: RefCell<Box<dyn Write>>,
}

impl Console {
    pub fn new(writer: Box<dyn Write>) -> Self {
        Console {
            writer: RefCell::new(writer),
        }
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }
}
