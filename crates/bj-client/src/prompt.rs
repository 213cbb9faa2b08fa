//! Where HIT/STAND decisions come from.
//!
//! The session loop asks a [`DecisionSource`] whenever the table is waiting
//! on the player. The real binary uses stdin; tests feed a scripted
//! sequence.

use std::io::{BufRead, Write};

use bj_core::protocol::messages::Decision;
use bj_core::session::RoundMirror;

/// Supplies the player's decision when the round waits on one.
pub trait DecisionSource {
    fn choose(&mut self, table: &RoundMirror) -> Decision;
}

/// Reads `h`/`s` (or `hit`/`stand`) lines from stdin, re-prompting on
/// anything else. EOF on stdin is answered with STAND so the session can
/// still finish.
pub struct StdinDecisions;

impl DecisionSource for StdinDecisions {
    fn choose(&mut self, table: &RoundMirror) -> Decision {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            print!("You hold {}. Hit or stand? [h/s] ", table.player_sum());
            let _ = std::io::stdout().flush();

            line.clear();
            match stdin.lock().read_line(&mut line) {
                Ok(0) => {
                    println!("(no more input, standing)");
                    return Decision::Stand;
                }
                Ok(_) => {}
                Err(_) => return Decision::Stand,
            }
            match parse_decision(&line) {
                Some(decision) => return decision,
                None => println!("Please answer 'h' to hit or 's' to stand."),
            }
        }
    }
}

/// Maps a typed line to a decision, `None` if unrecognized.
fn parse_decision(line: &str) -> Option<Decision> {
    match line.trim().to_ascii_lowercase().as_str() {
        "h" | "hit" => Some(Decision::Hit),
        "s" | "stand" => Some(Decision::Stand),
        _ => None,
    }
}

/// Plays a fixed sequence of decisions, then stands forever. Test helper,
/// but handy for demos too.
pub struct ScriptedDecisions {
    moves: Vec<Decision>,
    next: usize,
}

impl ScriptedDecisions {
    pub fn new(moves: Vec<Decision>) -> Self {
        Self { moves, next: 0 }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn choose(&mut self, _table: &RoundMirror) -> Decision {
        let decision = self
            .moves
            .get(self.next)
            .copied()
            .unwrap_or(Decision::Stand);
        self.next += 1;
        decision
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
