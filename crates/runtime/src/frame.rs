use foundation::time::Time;

/// One tick of the host's render loop.
///
/// Notifications are stamped with the index of the tick they were emitted
/// in, so a recorded session replays identically.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    pub index: u64,
    /// Fixed tick length (seconds).
    pub dt_s: f64,
    /// Time at the start of the tick (seconds).
    pub time: Time,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new(0, 0.0)
    }
}

impl Frame {
    pub fn new(index: u64, dt_s: f64) -> Self {
        Self {
            index,
            dt_s,
            time: Time(index as f64 * dt_s),
        }
    }

    pub fn next(self) -> Self {
        Self::new(self.index + 1, self.dt_s)
    }
}
