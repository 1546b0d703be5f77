use serde::Serialize;
use tracing::trace;

use crate::decoder::{Instruction, LineDecoder, Reg};
use crate::hazard::HazardScheduler;

/// What happened to one source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Action {
    Label,
    Executed { mnemonic: String },
}

/// One decoded source line with its schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledLine {
    /// Trimmed original text.
    pub text: String,
    pub issue_cycle: u64,
    /// Bubble cycles inserted immediately before this line issued.
    pub stalls: u64,
    pub stalled_on: Option<Reg>,
    pub action: Action,
}

/// Schedule and totals for one straight-line block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub lines: Vec<ScheduledLine>,
    /// Operation records scheduled; labels and blank lines are not counted.
    pub instructions: usize,
    pub total_stalls: u64,
    pub elapsed_cycles: u64,
}

/// Run one block of source text through the scheduler and collect the
/// schedule. Resets the scheduler first, so no state leaks between calls.
pub fn analyze(dec: &LineDecoder, sched: &mut HazardScheduler, source: &str) -> Analysis {
    sched.reset();
    let mut lines = Vec::new();
    let mut instructions = 0usize;

    for raw in source.lines() {
        let text = raw.trim();
        let Some(inst) = dec.decode(text) else { continue };
        let issue = sched.issue(&inst);
        trace!(line = text, cycle = issue.cycle, "scheduled");
        let action = match &inst {
            Instruction::Label(_) => Action::Label,
            Instruction::Op(op) => {
                instructions += 1;
                Action::Executed {
                    mnemonic: op.mnemonic.clone(),
                }
            }
        };
        lines.push(ScheduledLine {
            text: text.to_string(),
            issue_cycle: issue.cycle,
            stalls: issue.stalls,
            stalled_on: issue.stalled_on,
            action,
        });
    }

    Analysis {
        lines,
        instructions,
        total_stalls: sched.total_stalls(),
        elapsed_cycles: sched.elapsed_cycles(),
    }
}
