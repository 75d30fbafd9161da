// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Synthetic contribution series generation.
///
/// Produces a shape-correct daily activity series for a calendar window,
/// used whenever real data is unavailable. The distribution is intentionally
/// sparse and bursty so the rendered layout resembles genuine activity.
use rand::Rng;
use tracing::debug;

use crate::{
    calendar::{ContributionDataset, ContributionDay, MOCK_SOURCE_LABEL},
    range::CalendarRange,
};

/// Probability that a generated day carries no activity.
const INACTIVE_PROBABILITY: f64 = 0.7;
/// Upper bound (inclusive) for counts on active days.
const MAX_DAILY_COUNT: u32 = 8;

/// Generates a synthetic dataset for every day in the window.
///
/// For each day one uniform value `u` in `[0, 1)` is drawn; `u <= 0.7`
/// yields an inactive day, otherwise the count is uniform in `[1, 8]`,
/// leaving roughly 30% of days active. The dataset total is always the
/// recomputed sum of the daily counts.
///
/// The random source is injected so tests can seed it; production callers
/// use [`generate_default`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use contribcal::{CalendarRange, mock};
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let today = NaiveDate::from_ymd_opt(2025, 8, 29,).unwrap();
/// let range = CalendarRange::trailing_year(today,);
/// let dataset = mock::generate(&range, &mut StdRng::seed_from_u64(7,),);
/// assert_eq!(dataset.days.len() as u64, range.day_count());
/// ```
pub fn generate<R,>(range: &CalendarRange, rng: &mut R,) -> ContributionDataset
where
    R: Rng + ?Sized,
{
    let mut days = Vec::with_capacity(range.day_count() as usize,);

    for date in range.days() {
        let count = if rng.random::<f64,>() <= INACTIVE_PROBABILITY {
            0
        } else {
            rng.random_range(1..=MAX_DAILY_COUNT,)
        };

        days.push(ContributionDay {
            date,
            count,
        },);
    }

    let dataset = ContributionDataset::from_days(days, MOCK_SOURCE_LABEL,);

    debug!(
        "Generated {} synthetic days for {} ({} contributions)",
        dataset.days.len(),
        range,
        dataset.total
    );

    dataset
}

/// Generates a synthetic dataset using the thread-local random source.
pub fn generate_default(range: &CalendarRange,) -> ContributionDataset
{
    generate(range, &mut rand::rng(),)
}

#[cfg(test)]
mod tests
{
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    fn date(year: i32, month: u32, day: u32,) -> NaiveDate
    {
        NaiveDate::from_ymd_opt(year, month, day,).expect("valid test date",)
    }

    #[test]
    fn generates_one_entry_per_day_in_trailing_year()
    {
        let range = CalendarRange::trailing_year(date(2025, 8, 29,),);
        let dataset = generate(&range, &mut StdRng::seed_from_u64(1,),);

        assert_eq!(dataset.days.len() as u64, range.day_count());
        assert_eq!(dataset.days.first().map(|d| d.date,), Some(range.start));
        assert_eq!(dataset.days.last().map(|d| d.date,), Some(range.end));
    }

    #[test]
    fn total_matches_sum_of_counts()
    {
        let range = CalendarRange::trailing_year(date(2025, 8, 29,),);
        let dataset = generate(&range, &mut StdRng::seed_from_u64(2,),);

        let sum: u64 = dataset.days.iter().map(|d| u64::from(d.count,),).sum();
        assert_eq!(dataset.total, sum);
    }

    #[test]
    fn identical_seeds_produce_identical_series()
    {
        let range = CalendarRange::trailing_year(date(2025, 8, 29,),);

        let first = generate(&range, &mut StdRng::seed_from_u64(42,),);
        let second = generate(&range, &mut StdRng::seed_from_u64(42,),);

        assert_eq!(first, second);
    }

    #[test]
    fn dataset_is_labeled_synthetic()
    {
        let range = CalendarRange::trailing_year(date(2025, 8, 29,),);
        let dataset = generate_default(&range,);

        assert!(dataset.is_synthetic());
    }

    proptest! {
        #[test]
        fn entries_are_contiguous_ascending_and_bounded(
            seed in any::<u64>(),
            offset in 0u64..3650,
            length in 0u64..400,
        ) {
            let end = date(2025, 8, 29,) - chrono::Days::new(offset,);
            let start = end - chrono::Days::new(length,);
            let range = CalendarRange::new(start, end,).expect("valid range");

            let dataset = generate(&range, &mut StdRng::seed_from_u64(seed,),);

            prop_assert_eq!(dataset.days.len() as u64, range.day_count());
            for window in dataset.days.windows(2,) {
                prop_assert_eq!(window[1].date - window[0].date, chrono::TimeDelta::days(1,));
            }
            prop_assert!(dataset.days.iter().all(|day| day.count <= MAX_DAILY_COUNT));
        }
    }
}
