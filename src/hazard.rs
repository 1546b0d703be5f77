use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, trace};

use crate::decoder::{Instruction, Reg};
use crate::instructions::latency;

/// Outcome of scheduling one instruction record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Cycle the record issues at.
    pub cycle: u64,
    /// Bubble cycles inserted immediately before issue.
    pub stalls: u64,
    /// Register whose pending producer forced the longest wait. First source
    /// scanned wins ties.
    pub stalled_on: Option<Reg>,
}

/// Greedy single-pass stall scheduler for one straight-line block.
///
/// Tracks, per register, the cycle at which its most recent producer makes
/// the value available (forwarding assumed), and delays each consumer just
/// long enough for every source to be ready. One instance may analyze many
/// independent blocks; call `reset` between them, or stale readiness entries
/// from the previous block will corrupt the next.
#[derive(Debug, Clone)]
pub struct HazardScheduler {
    ready_cycle: HashMap<Reg, u64>,
    current_cycle: u64,
    total_stalls: u64,
}

impl HazardScheduler {
    pub fn new() -> Self {
        Self {
            ready_cycle: HashMap::new(),
            current_cycle: 1,
            total_stalls: 0,
        }
    }

    /// Clear all readiness state and counters before an independent analysis.
    pub fn reset(&mut self) {
        self.ready_cycle.clear();
        self.current_cycle = 1;
        self.total_stalls = 0;
    }

    /// Schedule one record, inserting the minimum bubbles so that every
    /// source is ready at issue.
    ///
    /// Labels are tagged with the current cycle and consume nothing: no
    /// bubble, no cycle advance, no readiness change.
    pub fn issue(&mut self, inst: &Instruction) -> Issue {
        let op = match inst {
            Instruction::Label(_) => {
                return Issue {
                    cycle: self.current_cycle,
                    stalls: 0,
                    stalled_on: None,
                };
            }
            Instruction::Op(op) => op,
        };

        let mut wait = 0u64;
        let mut stalled_on = None;
        for src in &op.sources {
            if let Some(&ready) = self.ready_cycle.get(src) {
                if ready > self.current_cycle && ready - self.current_cycle > wait {
                    wait = ready - self.current_cycle;
                    stalled_on = Some(src.clone());
                }
            }
        }

        if wait > 0 {
            if let Some(reg) = &stalled_on {
                debug!(%reg, wait, cycle = self.current_cycle, "read-after-write hazard");
            }
            self.total_stalls += wait;
            self.current_cycle += wait;
        }

        let cycle = self.current_cycle;
        if let Some(dest) = &op.dest {
            self.ready_cycle
                .insert(dest.clone(), cycle + latency(&op.mnemonic));
        }
        self.current_cycle += 1;
        trace!(mnemonic = %op.mnemonic, cycle, stalls = wait, "issued");

        Issue {
            cycle,
            stalls: wait,
            stalled_on,
        }
    }

    /// Last cycle consumed so far, bubbles included. 0 before any issue.
    pub fn elapsed_cycles(&self) -> u64 {
        self.current_cycle - 1
    }

    pub fn total_stalls(&self) -> u64 {
        self.total_stalls
    }

    /// Cycle at which `reg`'s pending producer makes it available, if any
    /// producer has been seen.
    pub fn ready_cycle(&self, reg: &Reg) -> Option<u64> {
        self.ready_cycle.get(reg).copied()
    }
}

impl Default for HazardScheduler {
    fn default() -> Self {
        Self::new()
    }
}
