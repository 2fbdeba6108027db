//! Fixed-timestep scheduler
//!
//! Converts irregular host callbacks into whole simulation ticks, and owns
//! the wall-clock freeze that pauses stepping after a point.

/// Freeze sub-state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Freeze {
    /// Stepping normally
    Running,
    /// Requested; the next host callback starts the clock
    Pending,
    /// Paused since host time `since`
    Frozen { since: f64 },
}

/// What a host callback did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    /// Not enough time owed for a tick
    Idle,
    /// Run this many steps
    Step(u32),
    /// Frozen; nothing to run
    Frozen,
    /// Freeze just ended, accumulated time discarded
    Thawed,
}

/// Tick accumulator with freeze support
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Seconds per tick
    tick_period: f64,
    max_substeps: u32,
    freeze_secs: f64,
    /// Ticks owed
    accumulator: f64,
    last_time: Option<f64>,
    freeze: Freeze,
}

impl Scheduler {
    pub fn new(tick_period: f64, max_substeps: u32, freeze_secs: f64) -> Self {
        Self {
            tick_period,
            max_substeps: max_substeps.max(1),
            freeze_secs,
            accumulator: 0.0,
            last_time: None,
            freeze: Freeze::Running,
        }
    }

    /// Ticks currently owed
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn freeze_state(&self) -> Freeze {
        self.freeze
    }

    pub fn is_frozen(&self) -> bool {
        self.freeze != Freeze::Running
    }

    /// Most recent host time seen, if any
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }

    /// Request a freeze. Ignored if one is already pending or running.
    pub fn engage_freeze(&mut self) {
        if self.freeze == Freeze::Running {
            log::debug!("Freeze engaged");
            self.freeze = Freeze::Pending;
        }
    }

    /// Account for host time `now` and report how many ticks to run
    ///
    /// Time keeps accruing while frozen; it is thrown away when the freeze
    /// ends so play does not burst forward.
    pub fn advance(&mut self, now: f64) -> Pulse {
        let last = self.last_time.replace(now).unwrap_or(now);
        self.accumulator += (now - last).max(0.0) / self.tick_period;

        match self.freeze {
            Freeze::Pending => {
                self.freeze = Freeze::Frozen { since: now };
                Pulse::Frozen
            }
            Freeze::Frozen { since } => {
                if now - since > self.freeze_secs {
                    log::debug!("Freeze lifted after {:.3}s", now - since);
                    self.accumulator = 0.0;
                    self.freeze = Freeze::Running;
                    Pulse::Thawed
                } else {
                    Pulse::Frozen
                }
            }
            Freeze::Running => {
                let owed = self.accumulator.floor().min(self.max_substeps as f64) as u32;
                if owed == 0 { Pulse::Idle } else { Pulse::Step(owed) }
            }
        }
    }

    /// Mark one tick as run
    pub fn consume(&mut self) {
        self.accumulator -= 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    fn scheduler() -> Scheduler {
        Scheduler::new(DT, 1, 1.0)
    }

    #[test]
    fn test_first_callback_only_sets_clock() {
        let mut s = scheduler();
        assert_eq!(s.advance(100.0), Pulse::Idle);
        assert_eq!(s.last_time(), Some(100.0));
        assert_eq!(s.accumulator(), 0.0);
    }

    #[test]
    fn test_accumulates_and_decrements_by_one() {
        let mut s = scheduler();
        s.advance(0.0);
        assert_eq!(s.advance(DT * 0.5), Pulse::Idle);
        assert_eq!(s.advance(DT * 2.5), Pulse::Step(1));
        s.consume();
        // 1.5 ticks left over, not reset to zero
        assert!((s.accumulator() - 1.5).abs() < 1e-9);
        assert_eq!(s.advance(DT * 2.5), Pulse::Step(1));
        s.consume();
        assert_eq!(s.advance(DT * 2.5), Pulse::Idle);
    }

    #[test]
    fn test_substep_cap() {
        let mut s = Scheduler::new(DT, 4, 1.0);
        s.advance(0.0);
        assert_eq!(s.advance(DT * 10.0), Pulse::Step(4));
    }

    #[test]
    fn test_backwards_clock_adds_nothing() {
        let mut s = scheduler();
        s.advance(5.0);
        assert_eq!(s.advance(4.0), Pulse::Idle);
        assert_eq!(s.accumulator(), 0.0);
    }

    #[test]
    fn test_freeze_lasts_one_second_then_discards_time() {
        let mut s = scheduler();
        s.advance(0.0);
        s.engage_freeze();
        assert_eq!(s.freeze_state(), Freeze::Pending);
        assert_eq!(s.advance(0.1), Pulse::Frozen);
        assert_eq!(s.freeze_state(), Freeze::Frozen { since: 0.1 });
        assert_eq!(s.advance(0.6), Pulse::Frozen);
        assert_eq!(s.advance(1.05), Pulse::Frozen);
        assert!(s.accumulator() > 50.0);
        assert_eq!(s.advance(1.11), Pulse::Thawed);
        assert_eq!(s.accumulator(), 0.0);
        assert!(!s.is_frozen());
        assert_eq!(s.advance(1.11 + DT * 1.01), Pulse::Step(1));
    }

    #[test]
    fn test_second_freeze_does_not_restart() {
        let mut s = scheduler();
        s.advance(0.0);
        s.engage_freeze();
        s.advance(0.0);
        s.advance(0.8);
        s.engage_freeze();
        assert_eq!(s.freeze_state(), Freeze::Frozen { since: 0.0 });
        assert_eq!(s.advance(1.01), Pulse::Thawed);
    }

    #[test]
    fn test_engage_while_pending_is_noop() {
        let mut s = scheduler();
        s.advance(0.0);
        s.engage_freeze();
        s.engage_freeze();
        assert_eq!(s.advance(0.5), Pulse::Frozen);
        assert_eq!(s.freeze_state(), Freeze::Frozen { since: 0.5 });
    }
}
