//! repoauditor - a multi-repository health auditor.
//!
//! Given a list of local checkouts and a declarative policy, runs a battery
//! of independent checkers (git hygiene, dependency freshness, security
//! posture, licensing, CI presence, documentation, deprecated-API usage,
//! code complexity) and per-language analyzers against each repository, then
//! aggregates the results into a scored, categorized report with a
//! deterministic process exit code. All orchestration logic lives in the
//! `repoauditor-*` library crates; this crate wires them together behind a
//! CLI.

pub mod cli;
