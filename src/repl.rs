use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use crate::{init, store, trie::Trie};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(PathBuf),
    Save(PathBuf),
    Insert { word: String, score: f64 },
    Remove(String),
    Contains(String),
    Complete { prefix: String, k: usize },
    Stats,
    Quit,
}

impl Command {
    /// Parse a whitespace separated command line. Returns None for blank
    /// lines, unknown verbs, wrong arity and unparsable numbers; all of
    /// those are ignored by the session.
    pub fn parse(line: &str) -> Option<Command> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let verb = parts.first()?.to_lowercase();

        let cmd = match (verb.as_str(), &parts[1..]) {
            ("quit", _) => Command::Quit,
            ("load", [path]) => Command::Load(PathBuf::from(*path)),
            ("save", [path]) => Command::Save(PathBuf::from(*path)),
            ("insert", [word, score]) => Command::Insert {
                word: word.to_lowercase(),
                score: score.parse().ok()?,
            },
            ("remove", [word]) => Command::Remove(word.to_lowercase()),
            ("contains", [word]) => Command::Contains(word.to_lowercase()),
            ("complete", [prefix, k]) => Command::Complete {
                prefix: prefix.to_lowercase(),
                k: parse_limit(k)?,
            },
            ("stats", []) => Command::Stats,
            _ => return None,
        };

        Some(cmd)
    }
}

/// Parse a completion limit. Any integer is well formed: negatives match
/// nothing and values past `usize::MAX` saturate.
fn parse_limit(s: &str) -> Option<usize> {
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(0);
    }

    Some(digits.parse().unwrap_or(usize::MAX))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive session holding the current trie.
pub struct Session {
    trie: Trie,
    max_results: usize,
}

impl Session {
    pub fn new(trie: Trie, max_results: usize) -> Self {
        Self { trie, max_results }
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Read commands line by line until `quit` or the end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> io::Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let Some(cmd) = Command::parse(&line) else {
                log::debug!("ignoring line: {}", line.trim_end());
                continue;
            };

            if self.execute(cmd, out)? == Flow::Quit {
                break;
            }
            out.flush()?;
        }

        out.flush()
    }

    /// Run one command, writing its output line (if any) to `out`.
    /// File errors are logged and never end the session.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<Flow> {
        match cmd {
            Command::Quit => return Ok(Flow::Quit),

            Command::Load(path) => match init::init_trie(&path) {
                Ok(t) => self.trie = t,
                Err(e) => log::error!("error loading {}: {}", path.display(), e),
            },

            Command::Save(path) => {
                let items = self.trie.items();
                match store::save(&path, &items) {
                    Ok(_) => log::info!("saved {} words to {}", items.len(), path.display()),
                    Err(e) => log::error!("error saving {}: {}", path.display(), e),
                }
            }

            Command::Insert { word, score } => {
                if let Some(old) = self.trie.score(&word) {
                    log::debug!("rescoring '{}': {} -> {}", word, old, score);
                }
                self.trie.insert(&word, score);
            }

            Command::Remove(word) => {
                let res = if self.trie.remove(&word) { "OK" } else { "MISS" };
                writeln!(out, "{}", res)?;
            }

            Command::Contains(word) => {
                let res = if self.trie.contains(&word) { "YES" } else { "NO" };
                writeln!(out, "{}", res)?;
            }

            Command::Complete { prefix, k } => {
                let k = if self.max_results > 0 {
                    k.min(self.max_results)
                } else {
                    k
                };
                writeln!(out, "{}", self.trie.complete(&prefix, k).join(","))?;
            }

            Command::Stats => writeln!(out, "{}", self.trie.stats())?,
        }

        Ok(Flow::Continue)
    }
}
