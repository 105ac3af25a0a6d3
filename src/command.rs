// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Line-oriented tracker commands.
//!
//! ```text
//! j <user> <chat>    join
//! t <chat>           terminate
//! c <user>           contribute
//! l <user> <chat>    leave a specific chat
//! l <user>           leave the current chat
//! ```
//!
//! Users are single whitespace-free tokens. Chats run to the end of the line
//! and may contain spaces.

use std::fmt;

use thiserror::Error;

use crate::tracker_trait::Tracker;

/// Error produced while parsing a single command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first token is not one of `j`, `t`, `c`, `l`.
    #[error("bad command {token:?} in line {line}")]
    BadCommand { token: String, line: usize },

    /// A required user or chat is missing.
    #[error("missing argument for {command:?} in line {line}")]
    MissingArgument { command: char, line: usize },
}

/// A single tracker operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Join { user: String, chat: String },
    Terminate { chat: String },
    Contribute { user: String },
    Leave { user: String, chat: String },
    LeaveCurrent { user: String },
}

/// What a command returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// `join` returns nothing.
    Joined,
    /// `contribute` and `terminate` counts.
    Count(u64),
    /// `leave` count, `None` when the user was not a member.
    Left(Option<u64>),
}

impl Outcome {
    /// The integer form used by command scripts: `-1` for a failed leave.
    pub fn code(&self) -> Option<i64> {
        match self {
            Outcome::Joined => None,
            Outcome::Count(n) => Some(*n as i64),
            Outcome::Left(Some(n)) => Some(*n as i64),
            Outcome::Left(None) => Some(-1),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code() {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "-"),
        }
    }
}

/// Split off the first whitespace-delimited token.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    let end = s.find(char::is_whitespace).unwrap_or(s.len());
    return Some((&s[..end], &s[end..]));
}

/// The rest of the line after leading whitespace, if anything is left.
fn rest_of_line(s: &str) -> Option<&str> {
    let s = s.trim_start();
    return (!s.is_empty()).then_some(s);
}

impl Command {
    /// Parse one line. Blank lines yield `Ok(None)`.
    ///
    /// `line` is the 1-based line number used in errors.
    pub fn parse(text: &str, line: usize) -> Result<Option<Command>, CommandError> {
        let Some((token, rest)) = next_token(text) else {
            return Ok(None);
        };

        let mut chars = token.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) => letter,
            _ => {
                return Err(CommandError::BadCommand {
                    token: token.to_owned(),
                    line,
                });
            }
        };
        let missing = CommandError::MissingArgument {
            command: letter,
            line,
        };

        let command = match letter {
            'j' => {
                let (user, rest) = next_token(rest).ok_or_else(|| missing.clone())?;
                let chat = rest_of_line(rest).ok_or(missing)?;
                Command::Join {
                    user: user.to_owned(),
                    chat: chat.to_owned(),
                }
            }
            't' => {
                let chat = rest_of_line(rest).ok_or(missing)?;
                Command::Terminate {
                    chat: chat.to_owned(),
                }
            }
            'c' => {
                let (user, _) = next_token(rest).ok_or(missing)?;
                Command::Contribute {
                    user: user.to_owned(),
                }
            }
            'l' => {
                let (user, rest) = next_token(rest).ok_or(missing)?;
                match rest_of_line(rest) {
                    Some(chat) => Command::Leave {
                        user: user.to_owned(),
                        chat: chat.to_owned(),
                    },
                    None => Command::LeaveCurrent {
                        user: user.to_owned(),
                    },
                }
            }
            _ => {
                return Err(CommandError::BadCommand {
                    token: token.to_owned(),
                    line,
                });
            }
        };
        return Ok(Some(command));
    }

    /// Run this command against a tracker.
    pub fn apply<T: Tracker + ?Sized>(&self, tracker: &mut T) -> Outcome {
        match self {
            Command::Join { user, chat } => {
                tracker.join(user, chat);
                Outcome::Joined
            }
            Command::Terminate { chat } => Outcome::Count(tracker.terminate(chat)),
            Command::Contribute { user } => Outcome::Count(tracker.contribute(user)),
            Command::Leave { user, chat } => Outcome::Left(tracker.leave(user, chat)),
            Command::LeaveCurrent { user } => Outcome::Left(tracker.leave_current(user)),
        }
    }
}

impl fmt::Display for Command {
    /// Formats back into script syntax.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Join { user, chat } => write!(f, "j {} {}", user, chat),
            Command::Terminate { chat } => write!(f, "t {}", chat),
            Command::Contribute { user } => write!(f, "c {}", user),
            Command::Leave { user, chat } => write!(f, "l {} {}", user, chat),
            Command::LeaveCurrent { user } => write!(f, "l {}", user),
        }
    }
}
