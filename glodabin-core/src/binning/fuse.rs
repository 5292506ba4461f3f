use std::collections::{BTreeMap, VecDeque};

use crate::{Bin, FusedBin, GlodaError};

/// Fuse several ascending bin lists into one list aligned on shared start dates.
///
/// - Each source is consumed front to back. At every step the earliest head
///   `start_date` across all sources is selected; sources whose head starts
///   there contribute its items and advance, the rest contribute an empty list.
/// - `end_date` is the latest `end_date` among the sources that matched.
/// - Every source name appears in every fused bin. A name given twice keeps the
///   later list.
/// - Fusing only empty lists (or no lists) yields an empty result.
///
/// # Errors
/// Returns `Err(GlodaError::UnorderedBins)` if a source list is not strictly
/// ascending by `start_date`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use glodabin_core::{Interval, bin_by_interval, fuse};
///
/// let jan = Utc.with_ymd_and_hms(2021, 1, 10, 0, 0, 0).unwrap();
/// let feb = Utc.with_ymd_and_hms(2021, 2, 10, 0, 0, 0).unwrap();
/// let from_me = bin_by_interval(vec![jan], Interval::Months).unwrap();
/// let to_me = bin_by_interval(vec![jan, feb], Interval::Months).unwrap();
///
/// let fused = fuse([("from_me", from_me), ("to_me", to_me)]).unwrap();
/// assert_eq!(fused.len(), 2);
/// assert_eq!(fused[1].items("from_me").len(), 0);
/// assert_eq!(fused[1].items("to_me"), &[feb]);
/// ```
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(name = "glodabin_core::fuse::fuse", skip(named_bin_lists))
)]
pub fn fuse<T, S, I>(named_bin_lists: I) -> Result<Vec<FusedBin<T>>, GlodaError>
where
    S: Into<String>,
    I: IntoIterator<Item = (S, Vec<Bin<T>>)>,
{
    let mut sources: BTreeMap<String, VecDeque<Bin<T>>> = BTreeMap::new();
    for (name, bins) in named_bin_lists {
        let name = name.into();
        ensure_ascending(&name, &bins)?;
        sources.insert(name, bins.into());
    }

    let mut out = Vec::new();
    loop {
        let Some(earliest) = sources
            .values()
            .filter_map(|bins| bins.front().map(|b| b.start_date))
            .min()
        else {
            break;
        };

        let mut end_date = earliest;
        let mut fused_sources = BTreeMap::new();
        for (name, bins) in &mut sources {
            let items = match bins.pop_front_if_start(earliest) {
                Some(bin) => {
                    end_date = end_date.max(bin.end_date);
                    bin.items
                }
                None => Vec::new(),
            };
            fused_sources.insert(name.clone(), items);
        }
        out.push(FusedBin {
            start_date: earliest,
            end_date,
            sources: fused_sources,
        });
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(fused = out.len(), sources = sources.len(), "fused bins");
    Ok(out)
}

fn ensure_ascending<T>(name: &str, bins: &[Bin<T>]) -> Result<(), GlodaError> {
    match bins
        .windows(2)
        .position(|w| w[0].start_date >= w[1].start_date)
    {
        Some(i) => Err(GlodaError::UnorderedBins {
            source_name: name.to_string(),
            index: i + 1,
        }),
        None => Ok(()),
    }
}

trait PopFrontIfStart<T> {
    fn pop_front_if_start(&mut self, start: chrono::DateTime<chrono::Utc>) -> Option<Bin<T>>;
}

impl<T> PopFrontIfStart<T> for VecDeque<Bin<T>> {
    fn pop_front_if_start(&mut self, start: chrono::DateTime<chrono::Utc>) -> Option<Bin<T>> {
        if self.front().is_some_and(|b| b.start_date == start) {
            self.pop_front()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn month(m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, m, 1, 0, 0, 0).unwrap()
    }

    fn bin(m: u32, items: &[&'static str]) -> Bin<&'static str> {
        Bin {
            items: items.to_vec(),
            start_date: month(m),
            end_date: month(m + 1),
        }
    }

    #[test]
    fn fuses_on_shared_start_and_fills_gaps() {
        let fused = fuse([
            ("from_me", vec![bin(1, &["x"])]),
            ("to_me", vec![bin(1, &["y"]), bin(2, &["z"])]),
        ])
        .unwrap();
        assert_eq!(fused.len(), 2);
        assert_eq!(fused[0].start_date, month(1));
        assert_eq!(fused[0].end_date, month(2));
        assert_eq!(fused[0].items("from_me"), &["x"]);
        assert_eq!(fused[0].items("to_me"), &["y"]);
        assert_eq!(fused[1].start_date, month(2));
        assert!(fused[1].items("from_me").is_empty());
        assert_eq!(fused[1].items("to_me"), &["z"]);
        assert!(fused[1].sources.contains_key("from_me"));
    }

    #[test]
    fn empty_sources_fuse_to_nothing() {
        let none: Vec<Bin<&str>> = Vec::new();
        let fused = fuse([("a", none.clone()), ("b", none)]).unwrap();
        assert!(fused.is_empty());
        let fused = fuse(Vec::<(&str, Vec<Bin<&str>>)>::new()).unwrap();
        assert!(fused.is_empty());
    }

    #[test]
    fn interleaved_sources_stay_ascending() {
        let fused = fuse([
            ("a", vec![bin(1, &["a1"]), bin(3, &["a3"]), bin(5, &["a5"])]),
            ("b", vec![bin(2, &["b2"]), bin(3, &["b3"])]),
            ("c", vec![]),
        ])
        .unwrap();
        let starts: Vec<_> = fused.iter().map(|f| f.start_date).collect();
        assert_eq!(starts, vec![month(1), month(2), month(3), month(5)]);
        assert_eq!(fused[2].total_len(), 2);
        assert!(fused.iter().all(|f| f.sources.len() == 3));
    }

    #[test]
    fn end_date_is_latest_among_matches() {
        let mut short = bin(1, &["a"]);
        short.end_date = month(1) + chrono::TimeDelta::days(3);
        let fused = fuse([("a", vec![short]), ("b", vec![bin(1, &["b"])])]).unwrap();
        assert_eq!(fused[0].end_date, month(2));
    }

    #[test]
    fn unordered_source_is_rejected() {
        let err = fuse([("to_me", vec![bin(2, &["b"]), bin(1, &["a"])])]).unwrap_err();
        assert_eq!(
            err,
            GlodaError::UnorderedBins {
                source_name: "to_me".into(),
                index: 1
            }
        );
        let dup = fuse([("a", vec![bin(1, &["x"]), bin(1, &["y"])])]);
        assert!(matches!(dup, Err(GlodaError::UnorderedBins { .. })));
    }

    #[test]
    fn take_moves_items_out() {
        let mut fused = fuse([("a", vec![bin(1, &["x"])])]).unwrap();
        assert_eq!(fused[0].take("a"), vec!["x"]);
        assert!(fused[0].sources.contains_key("a"));
        assert!(fused[0].items("a").is_empty());
        assert!(fused[0].take("a").is_empty());
        assert!(fused[0].take("missing").is_empty());
        assert!(!fused[0].sources.contains_key("missing"));
    }
}
