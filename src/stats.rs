//! Cross-file aggregation and derived statistics

use crate::scan::FileCounts;

/// Running totals for every file of one archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub stunned_by_spells: u64,
    pub stunned_by_attacks: u64,
    pub total_attacks: u64,
    pub total_spells: u64,
    pub breath_damage_values: Vec<u64>,
    pub files_analyzed: u64,
}

impl Tally {
    /// Add one file's counts; breath values are appended in order
    pub fn absorb(&mut self, counts: FileCounts) {
        self.stunned_by_spells += counts.stunned_by_spells;
        self.stunned_by_attacks += counts.stunned_by_attacks;
        self.total_attacks += counts.total_attacks;
        self.total_spells += counts.total_spells;
        self.breath_damage_values.extend(counts.breath_damage_values);
        self.files_analyzed += 1;
    }
}

/// Final per-archive statistics
///
/// Rates are percentages rounded to three decimals. Any rate whose guard
/// denominator is zero is 0.0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArchiveStats {
    pub stunned_by_spells: u64,
    pub stunned_by_attacks: u64,
    pub total_attacks: u64,
    pub total_spells: u64,
    pub attack_stun_rate: f64,
    pub spell_stun_rate: f64,
    pub overall_stun_rate: f64,
    pub breath_damage_avg: f64,
    pub breath_count: u64,
    pub files_analyzed: u64,
}

impl ArchiveStats {
    /// Derive rates and the breath average, consuming the raw values
    pub fn from_tally(tally: Tally) -> Self {
        let Tally {
            stunned_by_spells,
            stunned_by_attacks,
            total_attacks,
            total_spells,
            breath_damage_values,
            files_analyzed,
        } = tally;

        let attack_stun_rate = if total_attacks > 0 {
            round3(percent(stunned_by_attacks, total_attacks))
        } else {
            0.0
        };

        let spell_stun_rate = if total_spells > 0 {
            round3(percent(stunned_by_spells, total_spells))
        } else {
            0.0
        };

        // Guarded on attacks alone: spells-only corpora report 0.0 here
        let overall_stun_rate = if total_attacks > 0 {
            round3(percent(
                stunned_by_attacks + stunned_by_spells,
                total_attacks + total_spells,
            ))
        } else {
            0.0
        };

        let breath_count = breath_damage_values.len() as u64;
        let breath_damage_avg = if breath_count > 0 {
            // Widened so amounts near u64::MAX cannot overflow the sum
            let sum: u128 = breath_damage_values.iter().map(|&v| u128::from(v)).sum();
            round3(sum as f64 / breath_count as f64)
        } else {
            0.0
        };

        Self {
            stunned_by_spells,
            stunned_by_attacks,
            total_attacks,
            total_spells,
            attack_stun_rate,
            spell_stun_rate,
            overall_stun_rate,
            breath_damage_avg,
            breath_count,
            files_analyzed,
        }
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    part as f64 / whole as f64 * 100.0
}

/// Round to three decimal places, ties to even
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(attacks: u64, spells: u64, stun_a: u64, stun_s: u64, breath: &[u64]) -> Tally {
        Tally {
            stunned_by_spells: stun_s,
            stunned_by_attacks: stun_a,
            total_attacks: attacks,
            total_spells: spells,
            breath_damage_values: breath.to_vec(),
            files_analyzed: 1,
        }
    }

    #[test]
    fn test_absorb_sums_and_concatenates() {
        let mut t = Tally::default();
        t.absorb(FileCounts {
            stunned_by_spells: 1,
            stunned_by_attacks: 2,
            total_attacks: 10,
            total_spells: 4,
            breath_damage_values: vec![5, 6],
        });
        t.absorb(FileCounts {
            stunned_by_spells: 0,
            stunned_by_attacks: 1,
            total_attacks: 3,
            total_spells: 0,
            breath_damage_values: vec![7],
        });

        assert_eq!(t.stunned_by_spells, 1);
        assert_eq!(t.stunned_by_attacks, 3);
        assert_eq!(t.total_attacks, 13);
        assert_eq!(t.total_spells, 4);
        assert_eq!(t.breath_damage_values, vec![5, 6, 7]);
        assert_eq!(t.files_analyzed, 2);
    }

    #[test]
    fn test_rates() {
        let stats = ArchiveStats::from_tally(tally(3, 4, 1, 1, &[]));
        assert_eq!(stats.attack_stun_rate, 33.333);
        assert_eq!(stats.spell_stun_rate, 25.0);
        assert_eq!(stats.overall_stun_rate, 28.571);
    }

    #[test]
    fn test_empty_archive_is_all_zero() {
        let stats = ArchiveStats::from_tally(Tally::default());
        assert_eq!(stats, ArchiveStats::default());
        assert_eq!(stats.attack_stun_rate, 0.0);
        assert_eq!(stats.spell_stun_rate, 0.0);
        assert_eq!(stats.overall_stun_rate, 0.0);
        assert_eq!(stats.breath_damage_avg, 0.0);
        assert_eq!(stats.breath_count, 0);
    }

    #[test]
    fn test_overall_rate_guarded_by_attacks_only() {
        let stats = ArchiveStats::from_tally(tally(0, 10, 0, 5, &[]));
        assert_eq!(stats.spell_stun_rate, 50.0);
        assert_eq!(stats.overall_stun_rate, 0.0);
    }

    #[test]
    fn test_overall_rate_with_attacks_and_no_spells() {
        let stats = ArchiveStats::from_tally(tally(8, 0, 2, 0, &[]));
        assert_eq!(stats.spell_stun_rate, 0.0);
        assert_eq!(stats.overall_stun_rate, 25.0);
    }

    #[test]
    fn test_breath_average_and_count() {
        let stats = ArchiveStats::from_tally(tally(0, 0, 0, 0, &[42]));
        assert_eq!(stats.breath_damage_avg, 42.0);
        assert_eq!(stats.breath_count, 1);

        let stats = ArchiveStats::from_tally(tally(0, 0, 0, 0, &[10, 10, 11]));
        assert_eq!(stats.breath_damage_avg, 10.333);
        assert_eq!(stats.breath_count, 3);
    }

    #[test]
    fn test_breath_average_of_huge_amounts() {
        let patterns = crate::patterns::PatternSet::new().unwrap();
        let counts = crate::scan::scan_lines(
            &patterns,
            [
                "X is hit for 18446744073709551615 damage!",
                "Y is hit for 2 damage!",
            ],
        )
        .unwrap();
        let mut t = Tally::default();
        t.absorb(counts);

        let stats = ArchiveStats::from_tally(t);
        let expected = (u64::MAX as f64 + 2.0) / 2.0;
        assert_eq!(stats.breath_count, 2);
        assert!((stats.breath_damage_avg - expected).abs() / expected < 1e-12);

        let stats = ArchiveStats::from_tally(tally(0, 0, 0, 0, &[u64::MAX, u64::MAX]));
        let expected = u64::MAX as f64;
        assert!((stats.breath_damage_avg - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn test_round3() {
        assert_eq!(round3(2.0 / 3.0 * 100.0), 66.667);
        assert_eq!(round3(12.5), 12.5);
        assert_eq!(round3(0.0), 0.0);
        assert_eq!(round3(100.0), 100.0);
    }
}
