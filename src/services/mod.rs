// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod accounts;
pub mod dashboard;
pub mod exchange;
pub mod password;
pub mod search;
pub mod session;

pub use search::{SearchResult, SkillFilter};
pub use session::LoginOutcome;
