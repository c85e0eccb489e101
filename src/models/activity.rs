// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Activity feed model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::{format_utc_rfc3339, relative_label};

/// Stored activity feed entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub id: u64,
    /// User whose feed this entry belongs to
    pub user_id: u64,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn to_view(&self, now: DateTime<Utc>) -> ActivityView {
        ActivityView {
            id: self.id,
            text: self.text.clone(),
            time: relative_label(self.created_at, now),
            created_at: format_utc_rfc3339(self.created_at),
        }
    }
}

/// Activity entry as rendered in the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityView {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: u64,
    pub text: String,
    /// Relative label ("2h ago")
    pub time: String,
    pub created_at: String,
}
