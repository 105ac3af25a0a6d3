// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Command scripts: loading, cross-checking and timing.
//!
//! A script is a sequence of [`Command`]s read from text, one per line.
//! Files ending in `.gz` are decompressed on the fly.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use flate2::bufread::GzDecoder;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::command::{Command, CommandError, Outcome};
use crate::config::TrackerConfig;
use crate::slow::SlowChatTracker;
use crate::tracker::ChatTracker;
use crate::tracker_trait::Tracker;

/// A short script exercising promotion, leaving and termination.
pub const BASIC_SCRIPT: &str = "\
j Fred Breadmaking
j Ethel Breadmaking
c Fred
j Lucy Lint Collecting
c Ethel
c Fred
c Fred
j Ricky Lint Collecting
j Fred Lint Collecting
c Fred
j Lucy Elbonian Politics
c Fred
c Ricky
c Lucy
j Lucy Breadmaking
j Ethel Breadmaking
c Lucy
t Lint Collecting
j Lucy Burmese Cats
c Lucy
j Lucy Worm Farming
j Lucy Elbonian Politics
l Lucy Breadmaking
c Lucy
l Ethel
l Lucy
j Ricky Lint Collecting
c Ricky
c Ricky
l Ricky
j Lucy Breadmaking
l Fred
";

/// Error produced while reading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot open {path}: {source}")]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// One parsed line, kept with its source text for reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
    pub command: Command,
}

/// The fast and reference trackers disagreed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("*** FAILED *** line {line}: {text:?} (got {actual}, expected {expected})")]
pub struct Mismatch {
    pub line: usize,
    pub text: String,
    pub actual: Outcome,
    pub expected: Outcome,
}

/// Wall-clock breakdown of one scripted run, in milliseconds.
#[derive(Clone, Debug, Serialize)]
pub struct Timings {
    pub commands: usize,
    pub buckets: usize,
    pub construction_ms: f64,
    pub commands_ms: f64,
    pub destruction_ms: f64,
    pub total_ms: f64,
}

/// A parsed command script.
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

fn millis(start: Instant) -> f64 {
    return start.elapsed().as_secs_f64() * 1000.0;
}

impl Script {
    /// Parse lines, skipping blanks. Stops at the first bad line.
    pub fn parse<I>(lines: I) -> Result<Script, ScriptError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut script = Script::default();
        for (i, text) in lines.into_iter().enumerate() {
            let text = text?;
            let line = i + 1;
            if let Some(command) = Command::parse(&text, line)? {
                script.lines.push(ScriptLine { line, text, command });
            }
        }
        return Ok(script);
    }

    pub fn parse_str(text: &str) -> Result<Script, ScriptError> {
        return Script::parse(text.lines().map(|line| Ok(line.to_owned())));
    }

    pub fn read(reader: impl BufRead) -> Result<Script, ScriptError> {
        return Script::parse(reader.lines());
    }

    /// Load a script file, decompressing it if the name ends in `.gz`.
    pub fn load(path: &Path) -> Result<Script, ScriptError> {
        let file = File::open(path).map_err(|source| ScriptError::Open {
            path: path.to_owned(),
            source,
        })?;
        let reader = BufReader::new(file);

        let script = if path.extension().is_some_and(|ext| ext == "gz") {
            Script::read(BufReader::new(GzDecoder::new(reader)))?
        } else {
            Script::read(reader)?
        };
        info!(path = %path.display(), commands = script.len(), "loaded script");
        return Ok(script);
    }

    /// Build a script from commands, numbering them from 1.
    pub fn from_commands(commands: impl IntoIterator<Item = Command>) -> Script {
        let lines = commands
            .into_iter()
            .enumerate()
            .map(|(i, command)| ScriptLine {
                line: i + 1,
                text: command.to_string(),
                command,
            })
            .collect();
        return Script { lines };
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.lines.is_empty();
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        return self.lines.iter().map(|line| &line.command);
    }

    /// Run every command, discarding results.
    pub fn run<T: Tracker + ?Sized>(&self, tracker: &mut T) {
        for command in self.commands() {
            command.apply(&mut *tracker);
        }
    }

    /// Run every command against both trackers, stopping at the first
    /// disagreement.
    pub fn check_against<F, R>(&self, fast: &mut F, reference: &mut R) -> Result<(), Mismatch>
    where
        F: Tracker + ?Sized,
        R: Tracker + ?Sized,
    {
        for line in &self.lines {
            let actual = line.command.apply(&mut *fast);
            let expected = line.command.apply(&mut *reference);
            if actual != expected {
                return Err(Mismatch {
                    line: line.line,
                    text: line.text.clone(),
                    actual,
                    expected,
                });
            }
        }
        debug!(commands = self.len(), "script agrees with reference");
        return Ok(());
    }

    /// Check a fresh [`ChatTracker`] against a fresh [`SlowChatTracker`].
    pub fn check(&self, config: TrackerConfig) -> Result<(), Mismatch> {
        let mut fast = ChatTracker::with_config(config);
        let mut reference = SlowChatTracker::new();
        return self.check_against(&mut fast, &mut reference);
    }

    /// Time construction, the commands, and teardown of a [`ChatTracker`].
    pub fn time(&self, config: TrackerConfig) -> Timings {
        let start = Instant::now();
        let (construction_ms, commands_ms) = {
            let mut tracker = ChatTracker::with_config(config);
            let constructed = millis(start);
            self.run(&mut tracker);
            (constructed, millis(start))
        };
        let total_ms = millis(start);

        let timings = Timings {
            commands: self.len(),
            buckets: config.effective_buckets(),
            construction_ms,
            commands_ms: commands_ms - construction_ms,
            destruction_ms: total_ms - commands_ms,
            total_ms,
        };
        info!(
            commands = timings.commands,
            total_ms = timings.total_ms,
            "timed script"
        );
        return timings;
    }
}
