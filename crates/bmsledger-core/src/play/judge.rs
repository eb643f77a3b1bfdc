use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Judgment counts of a play in fixed order PG, GR, GD, BD, PR, MS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judge {
    pub pgreat: u32,
    pub great: u32,
    pub good: u32,
    pub bad: u32,
    pub poor: u32,
    pub miss: u32,
}

impl Judge {
    pub fn from_array(counts: [u32; 6]) -> Self {
        let [pgreat, great, good, bad, poor, miss] = counts;
        Self {
            pgreat,
            great,
            good,
            bad,
            poor,
            miss,
        }
    }

    /// Sum the early and late timing windows of each judgment
    pub fn from_timing(early: [u32; 6], late: [u32; 6]) -> Self {
        let mut counts = [0u32; 6];
        for (i, count) in counts.iter_mut().enumerate() {
            *count = early[i].saturating_add(late[i]);
        }
        Self::from_array(counts)
    }

    pub fn as_array(&self) -> [u32; 6] {
        [
            self.pgreat,
            self.great,
            self.good,
            self.bad,
            self.poor,
            self.miss,
        ]
    }

    /// Calculate EX score (pgreat * 2 + great)
    pub fn ex_score(&self) -> u32 {
        self.pgreat.saturating_mul(2).saturating_add(self.great)
    }

    /// Notes that received a judgment (empty poor excluded)
    pub fn judged_notes(&self) -> u32 {
        [self.great, self.good, self.bad, self.poor]
            .into_iter()
            .fold(self.pgreat, u32::saturating_add)
    }

    /// Bad play count for a chart with `total_notes` notes.
    ///
    /// Notes never reached (aborted play) count as bad plays.
    pub fn bad_play_count(&self, total_notes: u32) -> u32 {
        [self.poor, self.miss, total_notes.saturating_sub(self.judged_notes())]
            .into_iter()
            .fold(self.bad, u32::saturating_add)
    }
}

impl Add for Judge {
    type Output = Judge;

    /// Counts saturate at `u32::MAX`
    fn add(self, rhs: Judge) -> Judge {
        Judge {
            pgreat: self.pgreat.saturating_add(rhs.pgreat),
            great: self.great.saturating_add(rhs.great),
            good: self.good.saturating_add(rhs.good),
            bad: self.bad.saturating_add(rhs.bad),
            poor: self.poor.saturating_add(rhs.poor),
            miss: self.miss.saturating_add(rhs.miss),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_timing_sums_windows() {
        let judge = Judge::from_timing([120, 6, 3, 1, 1, 0], [130, 4, 2, 1, 0, 0]);
        assert_eq!(judge.as_array(), [250, 10, 5, 2, 1, 0]);
    }

    #[test]
    fn test_ex_score_and_bp() {
        let judge = Judge::from_array([250, 10, 5, 2, 1, 0]);
        assert_eq!(judge.ex_score(), 510);
        assert_eq!(judge.judged_notes(), 268);
        assert_eq!(judge.bad_play_count(268), 3);
    }

    #[test]
    fn test_bad_play_count_charges_unplayed_notes() {
        // Closed after 100 of 500 notes
        let judge = Judge::from_array([80, 15, 3, 1, 1, 4]);
        assert_eq!(judge.bad_play_count(500), 1 + 1 + 4 + 400);
    }

    #[test]
    fn test_add() {
        let a = Judge::from_array([1, 2, 3, 4, 5, 6]);
        let b = Judge::from_array([10, 20, 30, 40, 50, 60]);
        assert_eq!((a + b).as_array(), [11, 22, 33, 44, 55, 66]);
    }

    #[test]
    fn test_out_of_range_counts_saturate() {
        let max = u32::MAX;
        let judge = Judge::from_timing([max, max, 0, max, 0, 0], [1, 0, 0, 1, 0, 0]);
        assert_eq!(judge.pgreat, max);
        assert_eq!(judge.ex_score(), max);
        assert_eq!(judge.judged_notes(), max);
        assert_eq!(judge.bad_play_count(268), max);
        assert_eq!((judge + judge).as_array(), [max, max, 0, max, 0, 0]);
    }
}
