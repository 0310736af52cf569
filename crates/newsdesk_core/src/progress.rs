/// Increment applied per running status poll.
pub const PROGRESS_STEP: u8 = 5;
/// Highest value reached before completion is observed.
pub const PROGRESS_CEILING: u8 = 85;

/// Client-side progress estimate. The backend reports only running/not running,
/// so the value creeps towards the ceiling and jumps to 100 on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyntheticProgress {
    percent: u8,
}

impl SyntheticProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn is_complete(&self) -> bool {
        self.percent == 100
    }

    /// Never decreases and never passes the ceiling.
    pub fn advance(&mut self) {
        if self.is_complete() {
            return;
        }
        self.percent = self
            .percent
            .saturating_add(PROGRESS_STEP)
            .min(PROGRESS_CEILING)
            .max(self.percent);
    }

    pub fn complete(&mut self) {
        self.percent = 100;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_stops_at_ceiling() {
        let mut progress = SyntheticProgress::new();
        for _ in 0..40 {
            progress.advance();
        }
        assert_eq!(progress.percent(), PROGRESS_CEILING);
    }

    #[test]
    fn complete_is_sticky() {
        let mut progress = SyntheticProgress::new();
        progress.advance();
        progress.complete();
        progress.advance();
        assert_eq!(progress.percent(), 100);
    }
}
