use std::fmt::Write as _;

use crate::analyze::{Action, Analysis, ScheduledLine};

const RULE_WIDTH: usize = 60;

/// Render an analysis as a banner, a cycle table and a summary block.
///
/// Each schedule entry with stalls expands into its bubble rows: k stalls
/// occupy the k cycles immediately before the entry's issue cycle.
pub fn render_text(title: &str, analysis: &Analysis) -> String {
    let mut buf = String::new();
    let _ = writeln!(buf, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(buf, " ANALYSIS: {title}");
    let _ = writeln!(buf, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(buf, "{:<8} | {:<30} | {}", "CYCLE", "INSTRUCTION", "ACTION");
    let _ = writeln!(buf, "{}", "-".repeat(RULE_WIDTH));
    for line in &analysis.lines {
        push_rows(&mut buf, line);
    }
    let _ = writeln!(buf, "{}", "-".repeat(RULE_WIDTH));
    let _ = writeln!(buf, "Summary:");
    let _ = writeln!(buf, "  instructions : {}", analysis.instructions);
    let _ = writeln!(buf, "  stalls       : {}", analysis.total_stalls);
    let _ = writeln!(buf, "  cycles       : {}", analysis.elapsed_cycles);
    buf
}

fn push_rows(buf: &mut String, line: &ScheduledLine) {
    if let Some(reg) = &line.stalled_on {
        let first = line.issue_cycle - line.stalls;
        for i in 0..line.stalls {
            let _ = writeln!(
                buf,
                "{:<8} | {:<30} | bubble, waiting on {}",
                first + i,
                "NOP",
                reg
            );
        }
    }
    let action = match &line.action {
        Action::Label => "label".to_string(),
        Action::Executed { mnemonic } => format!("executed {mnemonic}"),
    };
    let _ = writeln!(
        buf,
        "{:<8} | {:<30} | {}",
        line.issue_cycle, line.text, action
    );
}
