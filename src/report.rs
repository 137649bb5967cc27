//! WITH / WITHOUT comparison report
//!
//! Nine rows in a fixed order, rendered as an ASCII table using the
//! [`tabled`] crate or as JSON.

use std::fmt;

use serde::Serialize;
use tabled::{Table, Tabled};

use crate::stats::ArchiveStats;

/// A single reported number
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Count(u64),
    Measure(f64),
}

impl fmt::Display for StatValue {
    /// Whole numbers print without a decimal point, fractions in full
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Count(n) => write!(f, "{}", n),
            StatValue::Measure(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.0}", v),
            StatValue::Measure(v) => write!(f, "{}", v),
        }
    }
}

/// One named statistic for both corpora
#[derive(Debug, Clone, PartialEq, Serialize, Tabled)]
pub struct ReportRow {
    #[tabled(rename = "Stat")]
    pub stat: &'static str,
    #[tabled(rename = "WITH")]
    pub with: StatValue,
    #[tabled(rename = "WITHOUT")]
    pub without: StatValue,
}

/// The full side-by-side comparison
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    rows: Vec<ReportRow>,
}

impl Report {
    pub fn new(with: &ArchiveStats, without: &ArchiveStats) -> Self {
        use StatValue::{Count, Measure};

        let row = |stat, pick: fn(&ArchiveStats) -> StatValue| ReportRow {
            stat,
            with: pick(with),
            without: pick(without),
        };

        let rows = vec![
            row("Stunned by Spells", |s| Count(s.stunned_by_spells)),
            row("Stunned by Attacks", |s| Count(s.stunned_by_attacks)),
            row("Total Attacks", |s| Count(s.total_attacks)),
            row("Total Spells", |s| Count(s.total_spells)),
            row("Attack Stun Rate (%)", |s| Measure(s.attack_stun_rate)),
            row("Spell Stun Rate (%)", |s| Measure(s.spell_stun_rate)),
            row("Overall Stun Rate (%)", |s| Measure(s.overall_stun_rate)),
            row("Breath Damage (avg)", |s| Measure(s.breath_damage_avg)),
            row("Number of Breaths", |s| Count(s.breath_count)),
        ];

        Self { rows }
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn render_table(&self) -> String {
        Table::new(&self.rows).to_string()
    }

    pub fn render_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.rows)
    }
}
