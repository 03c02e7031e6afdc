//! Reading from the user's terminal

use std::io::{self, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-oriented reader over stdin, shared by key prompts and the session loop
pub struct TerminalInput {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalInput {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Next line without its terminator, or None at end of input
    pub async fn read_line(&mut self) -> io::Result<Option<String>> {
        self.lines.next_line().await
    }

    /// Next line with echo turned off when stdin is a terminal.
    /// Piped input is read like any other line.
    pub async fn read_secret(&mut self) -> io::Result<Option<String>> {
        if !io::stdin().is_terminal() {
            return self.read_line().await;
        }

        tokio::task::spawn_blocking(read_hidden_line)
            .await
            .map_err(io::Error::other)?
            .map(Some)
    }
}

impl Default for TerminalInput {
    fn default() -> Self {
        Self::new()
    }
}

/// What a keystroke does to a hidden line being typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keystroke {
    Continue,
    Submit,
}

fn apply_keystroke(line: &mut String, key: KeyEvent) -> Keystroke {
    if key.kind != KeyEventKind::Press {
        return Keystroke::Continue;
    }
    match key.code {
        KeyCode::Enter => Keystroke::Submit,
        // Ctrl-C and Esc abandon the line; an empty answer aborts startup
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            line.clear();
            Keystroke::Submit
        }
        KeyCode::Esc => {
            line.clear();
            Keystroke::Submit
        }
        KeyCode::Backspace => {
            line.pop();
            Keystroke::Continue
        }
        KeyCode::Char(c) => {
            line.push(c);
            Keystroke::Continue
        }
        _ => Keystroke::Continue,
    }
}

fn read_hidden_line() -> io::Result<String> {
    terminal::enable_raw_mode()?;
    let typed = (|| -> io::Result<String> {
        let mut line = String::new();
        loop {
            if let Event::Key(key) = event::read()? {
                if apply_keystroke(&mut line, key) == Keystroke::Submit {
                    return Ok(line);
                }
            }
        }
    })();
    terminal::disable_raw_mode()?;

    // Enter is not echoed in raw mode
    let mut stdout = io::stdout();
    writeln!(stdout)?;
    stdout.flush()?;

    typed
}
