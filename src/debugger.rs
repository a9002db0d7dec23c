use std::collections::BTreeMap;

use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepMode {
    #[default]
    None,
    /// Called units run to completion while stepping.
    Over,
    /// Stepping descends into called units.
    Into,
}

/// Debugger state driven by the RESUME and STEP commands.
///
/// Breakpoints are keyed by source line. Each carries an eligibility flag:
/// an armed breakpoint stops execution once and is then disarmed until the
/// table is reset.
#[derive(Debug, Default)]
pub struct Debugger {
    breakpoints: BTreeMap<usize, bool>,
    step: StepMode,
    return_flag: bool,
}

impl Debugger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_breakpoint(&mut self, line: usize) {
        self.breakpoints.insert(line, true);
    }

    pub fn clear_breakpoint(&mut self, line: usize) -> bool {
        self.breakpoints.remove(&line).is_some()
    }

    pub fn is_armed(&self, line: usize) -> bool {
        self.breakpoints.get(&line).copied().unwrap_or(false)
    }

    pub fn breakpoint_count(&self) -> usize {
        self.breakpoints.len()
    }

    /// Called by the execution loop at each line; returns whether to stop.
    pub fn check_breakpoint(&mut self, line: usize) -> bool {
        match self.breakpoints.get_mut(&line) {
            Some(armed) if *armed => {
                *armed = false;
                debug!(line, "breakpoint hit");
                true
            }
            _ => false,
        }
    }

    /// Re-arm every breakpoint. Step mode is left alone.
    pub fn reset_all_breakpoints(&mut self) {
        for armed in self.breakpoints.values_mut() {
            *armed = true;
        }
        debug!(count = self.breakpoints.len(), "breakpoints re-armed");
    }

    pub fn set_step_into(&mut self, into: bool) {
        self.step = if into { StepMode::Into } else { StepMode::Over };
        debug!(mode = ?self.step, "step mode");
    }

    pub fn step_mode(&self) -> StepMode {
        self.step
    }

    pub fn set_return_flag(&mut self, flag: bool) {
        self.return_flag = flag;
    }

    pub fn return_flag(&self) -> bool {
        self.return_flag
    }

    /// Read and clear the return flag; the loop consumes it once the
    /// current unit returns to its caller.
    pub fn take_return_flag(&mut self) -> bool {
        std::mem::take(&mut self.return_flag)
    }
}
