//! Combat line patterns
//!
//! The four fixed phrases the analyzer looks for:
//! - `stunned`: "You are momentarily stunned!"
//! - `hit_by_spell`: "You are hit for N damage!"
//! - `hit_by_attack`: "... attacks you for N damage!"
//! - `breath_damage`: "... is hit for N damage!" (N is captured)
//!
//! Patterns are searched anywhere in a line, never anchored. The breath
//! amount is ASCII digits only, so every capture parses as a number.

use regex::Regex;

use crate::error::AnalysisError;

const STUNNED: &str = r"You are momentarily stunned!";
const HIT_BY_SPELL: &str = r"You are hit for \d+ damage!";
const HIT_BY_ATTACK: &str = r"attacks you for \d+ damage!";
const BREATH_DAMAGE: &str = r"is hit for ([0-9]+) damage!";

/// The compiled pattern table, built once per run and shared by reference
#[derive(Debug, Clone)]
pub struct PatternSet {
    stunned: Regex,
    hit_by_spell: Regex,
    hit_by_attack: Regex,
    breath_damage: Regex,
}

/// Which patterns a single line matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineMatch {
    pub stunned: bool,
    pub hit_by_spell: bool,
    pub hit_by_attack: bool,
    /// Damage amount when the line is a breath hit
    pub breath: Option<u64>,
}

impl PatternSet {
    /// Compile the pattern table
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            stunned: Regex::new(STUNNED)?,
            hit_by_spell: Regex::new(HIT_BY_SPELL)?,
            hit_by_attack: Regex::new(HIT_BY_ATTACK)?,
            breath_damage: Regex::new(BREATH_DAMAGE)?,
        })
    }

    /// Match one line against every pattern independently
    pub fn match_line(&self, line: &str) -> Result<LineMatch, AnalysisError> {
        let breath = match self.breath_damage.captures(line) {
            Some(caps) => {
                let capture = &caps[1];
                let amount = capture
                    .parse::<u64>()
                    .map_err(|_| AnalysisError::PatternCapture {
                        line: line.to_string(),
                        capture: capture.to_string(),
                    })?;
                Some(amount)
            }
            None => None,
        };

        Ok(LineMatch {
            stunned: self.stunned.is_match(line),
            hit_by_spell: self.hit_by_spell.is_match(line),
            hit_by_attack: self.hit_by_attack.is_match(line),
            breath,
        })
    }
}
