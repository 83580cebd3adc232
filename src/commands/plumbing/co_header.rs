use crate::areas::console::Console;
use crate::artifacts::checkout::checkout_header::parse_checkout_header;
use anyhow::Context;
use std::io::{BufRead, Write};

impl Console {
    /// Print the file and revision named by a checkout banner
    pub fn co_header(&self, input: impl BufRead) -> anyhow::Result<()> {
        let header = parse_checkout_header(input)
            .context("failed to parse the checkout output")?
            .ok_or_else(|| anyhow::anyhow!("the checkout output is empty"))?;

        writeln!(self.writer(), "{},v {}", header.filename, header.revision)?;

        Ok(())
    }
}
