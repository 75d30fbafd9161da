// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Canonical contribution data model.
///
/// Every source resolves to the same dataset shape so downstream compilation
/// never needs to know which source supplied the data.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Source label applied to synthetically generated datasets.
pub const MOCK_SOURCE_LABEL: &str = "synthetic";
/// Source label applied to datasets loaded from the GitHub GraphQL API.
pub const REMOTE_SOURCE_LABEL: &str = "github-graphql";

/// Activity count recorded for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributionDay
{
    /// ISO calendar date of the entry.
    pub date:  NaiveDate,
    /// Non-negative number of contributions recorded on the date.
    pub count: u32,
}

impl std::fmt::Display for ContributionDay
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        write!(f, "{}: {}", self.date, self.count)
    }
}

/// One year of daily contribution counts in canonical form.
///
/// Days are ordered ascending by date with no gaps or duplicates. The
/// dataset is replaced wholesale on every resolution; it is never partially
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributionDataset
{
    /// Ascending, contiguous sequence of daily entries.
    pub days:         Vec<ContributionDay,>,
    /// Aggregate contribution count for the window.
    pub total:        u64,
    /// Identifies which source produced the dataset.
    pub source_label: String,
}

impl ContributionDataset
{
    /// Builds a dataset whose total is recomputed from the daily counts.
    ///
    /// This is the only constructor used for synthetic data: the total of a
    /// mock dataset is always the recomputed sum, never a reported value.
    pub fn from_days(days: Vec<ContributionDay,>, source_label: impl Into<String,>,) -> Self
    {
        let total = days.iter().map(|day| u64::from(day.count,),).sum();

        Self {
            days,
            total,
            source_label: source_label.into(),
        }
    }

    /// Builds a dataset carrying a server-reported aggregate.
    ///
    /// Used by the remote source, where the endpoint guarantees the reported
    /// total matches the per-day counts.
    pub fn with_reported_total(
        days: Vec<ContributionDay,>,
        total: u64,
        source_label: impl Into<String,>,
    ) -> Self
    {
        Self {
            days,
            total,
            source_label: source_label.into(),
        }
    }

    /// Returns `true` when the dataset was generated rather than fetched.
    pub fn is_synthetic(&self,) -> bool
    {
        self.source_label == MOCK_SOURCE_LABEL
    }
}
