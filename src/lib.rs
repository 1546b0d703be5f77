pub mod analyze;
pub mod decoder;
pub mod hazard;
pub mod instructions;
pub mod report;

pub use analyze::{analyze, Action, Analysis, ScheduledLine};
pub use decoder::{Instruction, LineDecoder, Operation, Reg, Syntax};
pub use hazard::{HazardScheduler, Issue};
