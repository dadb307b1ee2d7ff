// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule definitions and matching

use dvr_core::ProgrammeInterval;

/// How a rule matches programme titles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleMatch {
    /// Exact title
    pub is: Option<String>,
    /// Substring of the title
    pub contains: Option<String>,
}

impl TitleMatch {
    pub fn matches(&self, title: &str) -> bool {
        let exact = self.is.as_deref().is_some_and(|is| is == title);
        let partial = self
            .contains
            .as_deref()
            .is_some_and(|needle| title.contains(needle));
        exact || partial
    }
}

/// A single recording rule
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rule {
    /// Restrict to one channel; any channel when unset
    pub channel: Option<String>,
    /// Title condition; a rule without one never matches
    pub title: Option<TitleMatch>,
}

impl Rule {
    pub fn matches(&self, channel: &str, title: &str) -> bool {
        let channel_matches = self.channel.as_deref().is_none_or(|c| c == channel);
        let title_matches = self.title.as_ref().is_some_and(|t| t.matches(title));
        channel_matches && title_matches
    }
}

/// Ordered rules. Earlier rules take priority when their programmes collide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    pub rules: Vec<Rule>,
}

impl RuleSet {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Candidates in priority order: rule order first, then guide order.
    ///
    /// A programme matched by several rules is listed once per rule.
    pub fn candidates(&self, programmes: &[ProgrammeInterval]) -> Vec<ProgrammeInterval> {
        let mut matches = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let before = matches.len();
            matches.extend(
                programmes
                    .iter()
                    .filter(|p| rule.matches(&p.channel, &p.title))
                    .cloned(),
            );
            tracing::debug!(
                rule = index,
                matched = matches.len() - before,
                "rule checked"
            );
        }
        matches
    }
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
