// Console abstraction: where prompts read from and where messages go.
// `TerminalConsole` drives a real terminal with `dialoguer`; `LineConsole`
// reads plain lines from any reader (piped stdin, or a buffer in tests)
// and fails once the input is exhausted instead of spinning.

use anyhow::{bail, Context, Result};
use crossterm::style::{style, Stylize};
use dialoguer::{Input, Select};
use std::ffi::OsStr;
use std::io::{self, BufRead, IsTerminal, Write};

/// How a message should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Warning,
    Failure,
}

pub trait Console {
    /// Show `prompt` and return one trimmed line. When `allow_empty` is
    /// false, blank lines are asked for again.
    fn read_line(&mut self, prompt: &str, allow_empty: bool) -> Result<String>;

    /// Let the user pick one of `items`, returning its index.
    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize>;

    fn say(&mut self, tone: Tone, text: &str) -> Result<()>;
}

/// Color only when writing to a terminal and `NO_COLOR` is unset or empty.
pub fn colors_wanted(is_terminal: bool, no_color: Option<&OsStr>) -> bool {
    is_terminal && no_color.map_or(true, OsStr::is_empty)
}

/// Interactive terminal backed by `dialoguer` prompts.
pub struct TerminalConsole {
    colors: bool,
}

impl TerminalConsole {
    pub fn new() -> Self {
        let no_color = std::env::var_os("NO_COLOR");
        TerminalConsole {
            colors: colors_wanted(io::stdout().is_terminal(), no_color.as_deref()),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        let text = Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .with_context(|| format!("failed to read input for {prompt:?}"))?;
        Ok(text.trim().to_string())
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .with_context(|| format!("failed to read selection for {prompt:?}"))
    }

    fn say(&mut self, tone: Tone, text: &str) -> Result<()> {
        if !self.colors {
            println!("{text}");
            return Ok(());
        }
        match tone {
            Tone::Plain => println!("{text}"),
            Tone::Success => println!("{}", style(text).green()),
            Tone::Warning => println!("{}", style(text).yellow()),
            Tone::Failure => println!("{}", style(text).red()),
        }
        Ok(())
    }
}

/// Line-oriented console for non-interactive input. Never colors.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str, allow_empty: bool) -> Result<String> {
        loop {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;

            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("failed to read from input")?;
            if read == 0 {
                bail!("input closed while waiting for {prompt:?}");
            }

            let text = line.trim();
            if allow_empty || !text.is_empty() {
                return Ok(text.to_string());
            }
        }
    }

    fn select(&mut self, prompt: &str, items: &[&str]) -> Result<usize> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, item)?;
        }
        loop {
            let raw = self.read_line(prompt, true)?;
            match raw.parse::<usize>() {
                Ok(n) if (1..=items.len()).contains(&n) => return Ok(n - 1),
                _ => writeln!(self.output, "Please enter a number from 1 to {}.", items.len())?,
            }
        }
    }

    fn say(&mut self, _tone: Tone, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}
