// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Contribution source resolution with graceful degradation.
///
/// Resolves a calendar window to a canonical dataset from one of two
/// variants: the GitHub GraphQL API when a token is configured, or the
/// synthetic generator otherwise. Every failure in the remote path degrades
/// to a fresh synthetic dataset; resolution never surfaces an error.
use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use chrono::NaiveDate;
use octocrab::Octocrab;
use serde::Deserialize;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::{
    calendar::{ContributionDataset, ContributionDay, REMOTE_SOURCE_LABEL},
    error::Error,
    mock,
    range::CalendarRange,
};

/// Status reported when no credentials are configured.
pub const NO_CREDENTIALS_STATUS: &str =
    "Using synthetic data (no GitHub token configured). Layout still matches GitHub.";
/// Status reported when the remote fetch succeeded.
pub const REMOTE_LOADED_STATUS: &str = "Loaded from GitHub GraphQL API.";
/// Status reported when the remote fetch failed and synthetic data is shown.
pub const REMOTE_FAILED_STATUS: &str =
    "GitHub fetch failed, showing synthetic data for layout purposes only.";

/// Upper bound on the remote fetch before falling back to synthetic data.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10,);

/// GraphQL query requesting one year of week-grouped contribution days.
const CONTRIBUTIONS_QUERY: &str = r"
query($userName: String!) {
  user(login: $userName) {
    contributionsCollection {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}";

/// Week-grouped contribution calendar as reported by the remote endpoint.
#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct RemoteCalendar
{
    /// Aggregate contribution count reported by the server.
    pub total_contributions: u64,
    /// Week buckets containing the daily entries.
    pub weeks:               Vec<RemoteWeek,>,
}

/// One week bucket of the remote calendar.
#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct RemoteWeek
{
    /// Daily entries within the week.
    pub contribution_days: Vec<RemoteDay,>,
}

/// One daily entry of the remote calendar.
#[derive(Debug, Clone, Deserialize,)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDay
{
    /// ISO calendar date of the entry.
    pub date:               NaiveDate,
    /// Contribution count recorded on the date.
    pub contribution_count: u32,
}

#[derive(Debug, Deserialize,)]
struct GraphQlResponse
{
    data: Option<ResponseData,>,
}

#[derive(Debug, Deserialize,)]
struct ResponseData
{
    user: Option<UserNode,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct UserNode
{
    contributions_collection: Option<ContributionsCollection,>,
}

#[derive(Debug, Deserialize,)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection
{
    contribution_calendar: Option<RemoteCalendar,>,
}

/// Remote calendar fetch seam.
///
/// The production implementation issues one GraphQL query through octocrab;
/// tests substitute doubles to count calls and inject failures.
#[async_trait]
pub trait FetchCalendar: Send + Sync
{
    /// Fetches the contribution calendar for the given login.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] on network failures or non-success
    /// statuses and [`Error::MalformedResponse`] when the calendar field is
    /// missing from an otherwise successful response.
    async fn fetch_calendar(&self, login: &str,) -> Result<RemoteCalendar, Error,>;
}

/// GitHub GraphQL implementation of [`FetchCalendar`].
pub struct RemoteGraphQlSource
{
    client: Octocrab,
}

impl RemoteGraphQlSource
{
    /// Builds an authenticated GraphQL source from a personal access token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`] when the underlying client cannot be
    /// initialized.
    pub fn new(token: &str,) -> Result<Self, Error,>
    {
        let client = Octocrab::builder().personal_token(token,).build().map_err(|e| {
            Error::transport(format!("failed to initialize GitHub client: {e}"),)
        },)?;

        Ok(Self {
            client,
        },)
    }
}

#[async_trait]
impl FetchCalendar for RemoteGraphQlSource
{
    async fn fetch_calendar(&self, login: &str,) -> Result<RemoteCalendar, Error,>
    {
        debug!("Requesting contribution calendar for {}", login);

        let payload = serde_json::json!({
            "query": CONTRIBUTIONS_QUERY,
            "variables": { "userName": login },
        });

        let response: GraphQlResponse = self
            .client
            .graphql(&payload,)
            .await
            .map_err(|e| Error::transport(format!("GitHub GraphQL request failed: {e}"),),)?;

        response
            .data
            .and_then(|data| data.user,)
            .and_then(|user| user.contributions_collection,)
            .and_then(|collection| collection.contribution_calendar,)
            .ok_or_else(|| Error::malformed("no contribution calendar in response",),)
    }
}

/// Polymorphic contribution source resolved once per session.
pub enum ContributionSource
{
    /// Credentialed variant backed by a remote calendar fetch.
    Remote
    {
        /// Fetch implementation, swappable in tests.
        fetcher: Box<dyn FetchCalendar,>,
        /// GitHub login whose calendar is requested.
        login:   String,
    },
    /// Synthetic variant used when no credentials are configured.
    Mock,
}

/// Outcome of a source resolution: the canonical dataset plus a status
/// message explaining which path produced it.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Resolution
{
    /// Canonical dataset ready for heatmap compilation.
    pub dataset: ContributionDataset,
    /// Informational message describing the data source.
    pub status:  String,
}

impl ContributionSource
{
    /// Selects the source variant for a user based on credential presence.
    ///
    /// A missing or blank token selects the synthetic variant; this is a
    /// valid, expected state rather than an error. A token that fails client
    /// initialization also degrades to the synthetic variant.
    pub fn for_user(login: impl Into<String,>, token: Option<&str,>,) -> Self
    {
        let login = login.into();

        match token.map(str::trim,).filter(|t| !t.is_empty(),) {
            Some(token,) => match RemoteGraphQlSource::new(token,) {
                Ok(source,) => Self::Remote {
                    fetcher: Box::new(source,),
                    login,
                },
                Err(error,) => {
                    warn!("Falling back to synthetic data: {}", error);
                    Self::Mock
                }
            },
            None => {
                debug!("No GitHub token configured; using synthetic data for {}", login);
                Self::Mock
            }
        }
    }

    /// Returns `true` when the source resolves synthetically.
    pub fn is_mock(&self,) -> bool
    {
        matches!(self, Self::Mock)
    }

    /// Resolves the source to a canonical dataset and a status message.
    ///
    /// This call always terminates with a valid dataset: the synthetic
    /// variant generates one directly, and every failure in the remote path
    /// (transport error, malformed response, timeout) degrades to a freshly
    /// generated synthetic dataset. No error ever reaches the caller.
    pub async fn resolve(&self, range: &CalendarRange,) -> Resolution
    {
        match self {
            Self::Mock => Resolution {
                dataset: mock::generate_default(range,),
                status:  NO_CREDENTIALS_STATUS.to_string(),
            },
            Self::Remote {
                fetcher,
                login,
            } => match fetch_with_timeout(fetcher.as_ref(), login,).await {
                Ok(calendar,) => {
                    let dataset = flatten_calendar(calendar,);
                    info!(
                        "Loaded {} contributions across {} days for {}",
                        dataset.total,
                        dataset.days.len(),
                        login
                    );

                    Resolution {
                        dataset,
                        status: REMOTE_LOADED_STATUS.to_string(),
                    }
                }
                Err(error,) => {
                    warn!("Contribution fetch for {} failed: {}", login, error);

                    Resolution {
                        dataset: mock::generate_default(range,),
                        status:  REMOTE_FAILED_STATUS.to_string(),
                    }
                }
            },
        }
    }
}

/// Bounds the remote fetch so an unresponsive endpoint cannot stall
/// resolution indefinitely.
async fn fetch_with_timeout(
    fetcher: &dyn FetchCalendar,
    login: &str,
) -> Result<RemoteCalendar, Error,>
{
    match timeout(FETCH_TIMEOUT, fetcher.fetch_calendar(login,),).await {
        Ok(result,) => result,
        Err(_,) => Err(Error::transport(format!(
            "contribution fetch exceeded {}s",
            FETCH_TIMEOUT.as_secs()
        ),),),
    }
}

/// Flattens week-grouped remote days into the canonical ascending sequence.
///
/// The server-reported aggregate is carried as the dataset total.
fn flatten_calendar(calendar: RemoteCalendar,) -> ContributionDataset
{
    let mut days: Vec<ContributionDay,> = calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days,)
        .map(|day| ContributionDay {
            date:  day.date,
            count: day.contribution_count,
        },)
        .collect();

    days.sort_by_key(|day| day.date,);

    ContributionDataset::with_reported_total(
        days,
        calendar.total_contributions,
        REMOTE_SOURCE_LABEL,
    )
}

/// Monotonic token dispenser guarding against stale-resolution races.
///
/// Callers obtain a token with [`Generation::begin`] before starting a
/// resolution and apply the result only while [`Generation::is_current`]
/// still holds, so a late result from a superseded resolution is discarded
/// instead of overwriting newer state.
#[derive(Debug, Default,)]
pub struct Generation
{
    current: AtomicU64,
}

impl Generation
{
    /// Creates a tracker with no resolution in flight.
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Starts a new resolution and returns its token, invalidating all
    /// previously issued tokens.
    pub fn begin(&self,) -> u64
    {
        self.current.fetch_add(1, Ordering::SeqCst,) + 1
    }

    /// Returns `true` while `token` belongs to the latest resolution.
    pub fn is_current(&self, token: u64,) -> bool
    {
        self.current.load(Ordering::SeqCst,) == token
    }
}
