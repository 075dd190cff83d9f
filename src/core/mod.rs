//! # Core Application Logic
//!
//! This module contains EduQuest's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Catalog (content)    │
//!                    │  • State (session)      │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌────────────┐          ┌────────────┐
//!             │    TUI     │          │   Speech   │
//!             │  Adapter   │─────────▶│  Provider  │
//!             │ (ratatui)  │          │            │
//!             └────────────┘          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Subjects, levels, units, questions, shop items and roster
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`scoring`]: Points earned by a finished quiz run
//! - [`shop`]: Purchase rules
//! - [`leaderboard`]: Roster projection with live points
//! - [`config`]: Settings with layered overrides

pub mod action;
pub mod catalog;
pub mod config;
pub mod leaderboard;
pub mod scoring;
pub mod shop;
pub mod state;
