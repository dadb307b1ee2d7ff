// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Recording rules: which guide programmes become schedule candidates

mod parser;
mod rule;

pub use parser::{load_rules, parse_rules, RuleError};
pub use rule::{Rule, RuleSet, TitleMatch};
