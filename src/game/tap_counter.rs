// game/tap_counter.rs

/// Counts taps on the title and fires once every `goal` taps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapCounter {
    count: u32,
    goal: u32,
}

impl TapCounter {
    pub fn new(goal: u32) -> Self {
        TapCounter {
            count: 0,
            goal: goal.max(1),
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    /// Register one tap. Returns `true` exactly when the goal is reached, and
    /// starts counting from zero again.
    pub fn tap(&mut self) -> bool {
        self.count += 1;
        if self.count == self.goal {
            self.count = 0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
    }
}

impl Default for TapCounter {
    fn default() -> Self {
        TapCounter::new(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_on_fifth_tap_and_resets() {
        let mut counter = TapCounter::default();

        let fired: Vec<bool> = (0..5).map(|_| counter.tap()).collect();

        assert_eq!(fired, vec![false, false, false, false, true]);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_sixth_tap_does_not_refire() {
        let mut counter = TapCounter::default();
        for _ in 0..5 {
            counter.tap();
        }

        assert!(!counter.tap());
        assert_eq!(counter.count(), 1);

        // Four more complete the next cycle
        assert!(!counter.tap());
        assert!(!counter.tap());
        assert!(!counter.tap());
        assert!(counter.tap());
    }

    #[test]
    fn test_goal_of_zero_behaves_like_one() {
        let mut counter = TapCounter::new(0);
        assert_eq!(counter.goal(), 1);
        assert!(counter.tap());
        assert!(counter.tap());
    }
}
