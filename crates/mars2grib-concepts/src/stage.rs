//! Stage and section indexing shared by the registry, deductions and rule engine (§4.2).

/// Number of encode stages the orchestrator walks, in order.
pub const NUM_STAGES: usize = 3;

/// Number of GRIB2 sections the orchestrator walks per stage (0..=5).
pub const NUM_SECTIONS: usize = 6;

/// One pass of the dispatch loop (§4.2 "Dispatch algorithm").
///
/// Ordering between stages is strict; `Allocate` always runs to completion
/// before `Preset` starts, which always completes before `Runtime` starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Stage {
    Allocate = 0,
    Preset = 1,
    Runtime = 2,
}

impl Stage {
    pub const ALL: [Stage; NUM_STAGES] = [Stage::Allocate, Stage::Preset, Stage::Runtime];

    pub const fn index(self) -> usize {
        self as usize
    }
}
