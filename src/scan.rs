//! Per-file accumulation
//!
//! Walks the lines of one log file in order and counts attack hits, spell
//! hits, attributed stuns and breath damage. A stun is attributed by looking
//! at the single line immediately above it: spell first, then attack.

use std::io::BufRead;

use crate::error::AnalysisError;
use crate::patterns::{LineMatch, PatternSet};

/// Counters for one scanned file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCounts {
    pub stunned_by_spells: u64,
    pub stunned_by_attacks: u64,
    pub total_attacks: u64,
    pub total_spells: u64,
    /// Breath damage amounts in file order
    pub breath_damage_values: Vec<u64>,
}

/// Line-by-line accumulator for a single file
pub struct Scanner<'p> {
    patterns: &'p PatternSet,
    counts: FileCounts,
    previous: Option<LineMatch>,
    lines: u64,
}

impl<'p> Scanner<'p> {
    pub fn new(patterns: &'p PatternSet) -> Self {
        Self {
            patterns,
            counts: FileCounts::default(),
            previous: None,
            lines: 0,
        }
    }

    /// Feed the next line of the file (without its line terminator)
    pub fn push_line(&mut self, line: &str) -> Result<(), AnalysisError> {
        let current = self.patterns.match_line(line)?;

        if current.hit_by_attack {
            self.counts.total_attacks += 1;
        }
        if current.hit_by_spell {
            self.counts.total_spells += 1;
        }

        if current.stunned {
            // First line of a file has nothing above it
            if let Some(previous) = self.previous {
                if previous.hit_by_spell {
                    self.counts.stunned_by_spells += 1;
                } else if previous.hit_by_attack {
                    self.counts.stunned_by_attacks += 1;
                }
            }
        }

        if let Some(amount) = current.breath {
            self.counts.breath_damage_values.push(amount);
        }

        self.previous = Some(current);
        self.lines += 1;
        Ok(())
    }

    /// Number of lines fed so far
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn finish(self) -> FileCounts {
        self.counts
    }
}

/// Scan an in-memory sequence of lines
pub fn scan_lines<'a, I>(patterns: &PatternSet, lines: I) -> Result<FileCounts, AnalysisError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = Scanner::new(patterns);
    for line in lines {
        scanner.push_line(line)?;
    }
    Ok(scanner.finish())
}

/// Scan a text stream, `entry` names it in errors and logs
///
/// Lines are split on `\n` with a trailing `\r` dropped. Content that is not
/// valid UTF-8 fails the whole file.
pub fn scan_reader<R: BufRead>(
    patterns: &PatternSet,
    entry: &str,
    reader: R,
) -> Result<FileCounts, AnalysisError> {
    let mut scanner = Scanner::new(patterns);
    for line in reader.lines() {
        let line = line.map_err(|source| AnalysisError::FileRead {
            entry: entry.to_string(),
            source,
        })?;
        scanner.push_line(&line)?;
    }

    tracing::debug!("Scanned {} ({} lines)", entry, scanner.lines());
    Ok(scanner.finish())
}
