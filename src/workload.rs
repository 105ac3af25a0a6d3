// created = "2026-10-16"
// modified = "2026-10-16"
// driver = "Isaac Clayton"

//! Random command workloads for stress tests, benchmarks and fuzz seeds.
//!
//! Generation is deterministic for a given [`Workload`], so a failing seed
//! can be replayed exactly.

use std::io::{self, Write};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::command::Command;

/// Relative weights of each command kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mix {
    pub join: u32,
    pub contribute: u32,
    pub leave: u32,
    pub leave_current: u32,
    pub terminate: u32,
}

impl Default for Mix {
    fn default() -> Self {
        return Mix {
            join: 30,
            contribute: 45,
            leave: 8,
            leave_current: 10,
            terminate: 7,
        };
    }
}

impl Mix {
    fn total(&self) -> u32 {
        return self.join + self.contribute + self.leave + self.leave_current + self.terminate;
    }
}

/// Parameters for a generated command sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    pub commands: usize,
    pub users: usize,
    pub chats: usize,
    pub seed: u64,
    pub mix: Mix,
}

impl Default for Workload {
    fn default() -> Self {
        return Workload {
            commands: 10_000,
            users: 1_000,
            chats: 200,
            seed: 0,
            mix: Mix::default(),
        };
    }
}

impl Workload {
    /// Generate the command sequence.
    ///
    /// Chat names contain a space so scripts exercise rest-of-line parsing.
    pub fn generate(&self) -> Vec<Command> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let users = self.users.max(1);
        let chats = self.chats.max(1);
        // An all-zero mix falls back to joins only.
        let total = self.mix.total().max(1);

        let user = |rng: &mut StdRng| format!("user{}", rng.gen_range(0..users));
        let chat = |rng: &mut StdRng| format!("chat {}", rng.gen_range(0..chats));

        let mix = &self.mix;
        let mut out = Vec::with_capacity(self.commands);
        for _ in 0..self.commands {
            let roll = rng.gen_range(0..total);
            let command = if mix.total() == 0 || roll < mix.join {
                Command::Join {
                    user: user(&mut rng),
                    chat: chat(&mut rng),
                }
            } else if roll < mix.join + mix.contribute {
                Command::Contribute { user: user(&mut rng) }
            } else if roll < mix.join + mix.contribute + mix.leave {
                Command::Leave {
                    user: user(&mut rng),
                    chat: chat(&mut rng),
                }
            } else if roll < total - mix.terminate {
                Command::LeaveCurrent { user: user(&mut rng) }
            } else {
                Command::Terminate { chat: chat(&mut rng) }
            };
            out.push(command);
        }
        return out;
    }

    /// Write the generated commands in script syntax, one per line.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        for command in self.generate() {
            writeln!(out, "{}", command)?;
        }
        return out.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_commands() {
        let workload = Workload { commands: 500, seed: 7, ..Workload::default() };
        assert_eq!(workload.generate(), workload.generate());
        assert_eq!(workload.generate().len(), 500);
    }

    #[test]
    fn different_seeds_differ() {
        let a = Workload { commands: 200, seed: 1, ..Workload::default() };
        let b = Workload { seed: 2, ..a };
        assert_ne!(a.generate(), b.generate());
    }

    #[test]
    fn mix_restricts_kinds() {
        let mix = Mix { join: 1, contribute: 0, leave: 0, leave_current: 0, terminate: 0 };
        let workload = Workload { commands: 100, mix, ..Workload::default() };
        assert!(workload.generate().iter().all(|c| matches!(c, Command::Join { .. })));
    }

    #[test]
    fn zero_mix_still_generates() {
        let mix = Mix { join: 0, contribute: 0, leave: 0, leave_current: 0, terminate: 0 };
        let workload = Workload { commands: 10, mix, ..Workload::default() };
        assert_eq!(workload.generate().len(), 10);
    }

    #[test]
    fn written_script_parses_back() {
        let workload = Workload { commands: 300, seed: 3, ..Workload::default() };
        let mut buf = Vec::new();
        workload.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let script = crate::script::Script::parse_str(&text).unwrap();
        let parsed: Vec<Command> = script.commands().cloned().collect();
        assert_eq!(parsed, workload.generate());
    }
}
