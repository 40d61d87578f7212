//! Health and the timed invulnerability window.
//!
//! ```text
//! Vulnerable --take_damage--> Invulnerable --window elapsed--> Vulnerable
//! ```
//!
//! Damage only lands while vulnerable, so hits cannot stack inside the
//! window. Death is not decided here: the simulation's death check reads
//! [`Vitality::is_depleted`] once per tick.

use crate::clock::Timestamp;
use crate::constants::INVULNERABILITY_WINDOW_MS;

/// Health pool with an invulnerability window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vitality {
    health: i32,
    is_vulnerable: bool,
    last_hit: Option<Timestamp>,
    window_ms: u64,
}

impl Vitality {
    /// Creates a vulnerable pool using the default window.
    #[must_use]
    pub const fn new(health: i32) -> Self {
        Self::with_window(health, INVULNERABILITY_WINDOW_MS)
    }

    /// Creates a vulnerable pool with a custom window in milliseconds.
    #[must_use]
    pub const fn with_window(health: i32, window_ms: u64) -> Self {
        Self {
            health,
            is_vulnerable: true,
            last_hit: None,
            window_ms,
        }
    }

    /// Remaining health. May be zero or below until the death check runs.
    #[must_use]
    pub const fn health(&self) -> i32 {
        self.health
    }

    /// Whether the next hit will land.
    #[must_use]
    pub const fn is_vulnerable(&self) -> bool {
        self.is_vulnerable
    }

    /// Time of the last hit that landed.
    #[must_use]
    pub const fn last_hit(&self) -> Option<Timestamp> {
        self.last_hit
    }

    /// Applies one point of damage if the pool is vulnerable.
    ///
    /// Returns `true` when the hit landed; the caller emits the hit feedback
    /// in that case only.
    ///
    /// # Examples
    ///
    /// ```
    /// use frontier::clock::Timestamp;
    /// use frontier::vulnerability::Vitality;
    ///
    /// let mut vitality = Vitality::new(5);
    /// assert!(vitality.take_damage(Timestamp::from_millis(0)));
    /// assert!(!vitality.take_damage(Timestamp::from_millis(100)));
    /// assert_eq!(vitality.health(), 4);
    /// ```
    pub fn take_damage(&mut self, now: Timestamp) -> bool {
        if !self.is_vulnerable {
            return false;
        }
        self.health -= 1;
        self.is_vulnerable = false;
        self.last_hit = Some(now);
        true
    }

    /// Restores vulnerability once the window has strictly elapsed.
    pub fn refresh(&mut self, now: Timestamp) {
        if self.is_vulnerable {
            return;
        }
        let elapsed = self.last_hit.map_or(u64::MAX, |hit| now.millis_since(hit));
        if elapsed > self.window_ms {
            self.is_vulnerable = true;
        }
    }

    /// Whether the silhouette should replace the frame at `now`.
    ///
    /// Only invulnerable pools blink. The phase follows the sine of the
    /// millisecond clock, so the flicker runs at the clock's own rate.
    #[must_use]
    pub fn blink(&self, now: Timestamp) -> bool {
        !self.is_vulnerable && wave_value(now)
    }

    /// Whether the death check should remove the owner.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.health <= 0
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "Only the phase of the wave matters; precision loss past 2^53 ms is irrelevant."
)]
fn wave_value(now: Timestamp) -> bool {
    (now.as_millis() as f64).sin() >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn at(millis: u64) -> Timestamp {
        Timestamp::from_millis(millis)
    }

    #[rstest]
    fn damage_inside_window_is_ignored() {
        let mut vitality = Vitality::new(3);
        assert!(vitality.take_damage(at(1_000)));
        vitality.refresh(at(1_300));
        assert!(!vitality.is_vulnerable(), "window must strictly elapse");
        assert!(!vitality.take_damage(at(1_300)));
        vitality.refresh(at(1_301));
        assert!(vitality.is_vulnerable());
        assert!(vitality.take_damage(at(1_301)));
        assert_eq!(vitality.health(), 1);
        assert_eq!(vitality.last_hit(), Some(at(1_301)));
    }

    #[rstest]
    fn health_can_go_below_zero_before_death_check() {
        let mut vitality = Vitality::new(0);
        assert!(vitality.take_damage(at(0)));
        assert_eq!(vitality.health(), -1);
        assert!(vitality.is_depleted());
    }

    #[rstest]
    #[case::vulnerable_never_blinks(false, 1, false)]
    #[case::positive_sine(true, 1, true)]
    #[case::negative_sine(true, 4, false)]
    fn blink_follows_the_sine_of_the_clock(
        #[case] hit: bool,
        #[case] millis: u64,
        #[case] expected: bool,
    ) {
        let mut vitality = Vitality::new(5);
        if hit {
            vitality.take_damage(at(0));
        }
        assert_eq!(vitality.blink(at(millis)), expected);
    }
}
