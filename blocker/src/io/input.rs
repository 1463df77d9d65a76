//! Whitespace-separated game input: setup block followed by one node id per turn.
//!
//! ```text
//! N L E        node, link and gateway counts
//! a b          L lines of link endpoints
//! g            E lines of gateway ids
//! s            one adversary position per turn, until end of input
//! ```

use std::collections::VecDeque;
use std::io::BufRead;

use anyhow::{Context, Result, anyhow, bail};

use crate::core::setup::Setup;

/// Token reader over a line-oriented input stream.
///
/// Turns are read lazily so an interactive referee can answer each cut
/// before sending the next position.
pub struct InputReader<R> {
    reader: R,
    pending: VecDeque<String>,
    line_no: usize,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            line_no: 0,
        }
    }

    /// Read the setup block. Any shortfall or malformed token is fatal.
    pub fn read_setup(&mut self) -> Result<Setup> {
        let node_count = self.expect_number("node count")?;
        let link_count = self.expect_number("link count")?;
        let gateway_count = self.expect_number("gateway count")?;

        let mut links = Vec::with_capacity(link_count);
        for index in 0..link_count {
            let a = self.expect_number(&format!("links[{index}] first endpoint"))?;
            let b = self.expect_number(&format!("links[{index}] second endpoint"))?;
            links.push((a, b));
        }

        let mut gateways = Vec::with_capacity(gateway_count);
        for index in 0..gateway_count {
            gateways.push(self.expect_number(&format!("gateways[{index}]"))?);
        }

        Ok(Setup {
            node_count,
            links,
            gateways,
        })
    }

    /// Read the next adversary position, or `None` once the input has ended.
    pub fn next_turn(&mut self) -> Result<Option<usize>> {
        match self.next_token()? {
            Some(token) => parse_number(&token, "adversary position", self.line_no).map(Some),
            None => Ok(None),
        }
    }

    fn expect_number(&mut self, what: &str) -> Result<usize> {
        let token = self
            .next_token()?
            .ok_or_else(|| anyhow!("input ended while reading {what}"))?;
        parse_number(&token, what, self.line_no)
    }

    fn next_token(&mut self) -> Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("read input line {}", self.line_no + 1))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(self.pending.pop_front())
    }
}

fn parse_number(token: &str, what: &str, line_no: usize) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(value) => Ok(value),
        Err(_) => bail!("line {line_no}: expected {what} as a non-negative integer, got {token:?}"),
    }
}

/// Parse a complete setup block from a string.
pub fn parse_setup(contents: &str) -> Result<Setup> {
    InputReader::new(contents.as_bytes()).read_setup()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHAIN: &str = "3 2 1\n0 1\n1 2\n2\n0\n1\n";

    #[test]
    fn reads_setup_then_turns() {
        let mut input = InputReader::new(CHAIN.as_bytes());
        let setup = input.read_setup().expect("setup");
        assert_eq!(
            setup,
            Setup {
                node_count: 3,
                links: vec![(0, 1), (1, 2)],
                gateways: vec![2],
            }
        );
        assert_eq!(input.next_turn().expect("turn"), Some(0));
        assert_eq!(input.next_turn().expect("turn"), Some(1));
        assert_eq!(input.next_turn().expect("turn"), None);
    }

    #[test]
    fn tolerates_blank_lines_and_packed_tokens() {
        let setup = parse_setup("2 1 1\n\n0 1 1\n").expect("setup");
        assert_eq!(setup.links, vec![(0, 1)]);
        assert_eq!(setup.gateways, vec![1]);
    }

    #[test]
    fn truncated_links_are_fatal() {
        let err = parse_setup("3 2 1\n0 1\n").expect_err("truncated");
        assert!(err.to_string().contains("links[1]"));
    }

    #[test]
    fn truncated_gateways_are_fatal() {
        let err = parse_setup("3 1 2\n0 1\n2\n").expect_err("truncated");
        assert!(err.to_string().contains("gateways[1]"));
    }

    #[test]
    fn non_numeric_token_is_fatal() {
        let mut input = InputReader::new("2 1 1\n0 1\n1\nx\n".as_bytes());
        input.read_setup().expect("setup");
        let err = input.next_turn().expect_err("bad turn");
        assert!(err.to_string().contains("line 4"));
        assert!(err.to_string().contains("adversary position"));
    }
}
