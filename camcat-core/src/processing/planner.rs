//! Grouping and aggregation planning.
//!
//! The sorted entry list is partitioned into camera → date → hour, and each
//! hour becomes an `HourPlan`: its output path and the ordered fragments to
//! concatenate, with any output left by a previous run played first.
//!
//! Nothing here touches the filesystem; whether a prior output exists is
//! answered by a check supplied by the caller.

use crate::classify::ClassifiedEntry;
use crate::config::{CoreConfig, old_path};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of one hour-group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub camera_id: String,
    pub date: String,
    pub hour: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "camera {} / {} / {}h", self.camera_id, self.date, self.hour)
    }
}

type HourMap = BTreeMap<String, Vec<ClassifiedEntry>>;
type DateMap = BTreeMap<String, HourMap>;

/// Materialized camera → date → hour hierarchy.
///
/// Entries inside an hour keep the order in which they were inserted, which
/// for collector output is ascending time of day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupHierarchy {
    cameras: BTreeMap<String, DateMap>,
}

impl GroupHierarchy {
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ClassifiedEntry>,
    {
        let mut cameras: BTreeMap<String, DateMap> = BTreeMap::new();
        for entry in entries {
            cameras
                .entry(entry.camera_id().to_string())
                .or_default()
                .entry(entry.date().to_string())
                .or_default()
                .entry(entry.hour().to_string())
                .or_default()
                .push(entry);
        }
        Self { cameras }
    }

    pub fn cameras(&self) -> impl Iterator<Item = &str> {
        self.cameras.keys().map(String::as_str)
    }

    pub fn dates(&self, camera_id: &str) -> impl Iterator<Item = &str> {
        self.cameras
            .get(camera_id)
            .into_iter()
            .flat_map(|dates| dates.keys().map(String::as_str))
    }

    pub fn hours(&self, camera_id: &str, date: &str) -> impl Iterator<Item = &str> {
        self.cameras
            .get(camera_id)
            .and_then(|dates| dates.get(date))
            .into_iter()
            .flat_map(|hours| hours.keys().map(String::as_str))
    }

    pub fn group(&self, camera_id: &str, date: &str, hour: &str) -> Option<&[ClassifiedEntry]> {
        self.cameras
            .get(camera_id)?
            .get(date)?
            .get(hour)
            .map(Vec::as_slice)
    }

    /// Every hour-group in camera, date, hour order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupKey, &[ClassifiedEntry])> {
        self.cameras.iter().flat_map(|(camera_id, dates)| {
            dates.iter().flat_map(move |(date, hours)| {
                hours.iter().map(move |(hour, entries)| {
                    (
                        GroupKey {
                            camera_id: camera_id.clone(),
                            date: date.clone(),
                            hour: hour.clone(),
                        },
                        entries.as_slice(),
                    )
                })
            })
        })
    }

    pub fn group_count(&self) -> usize {
        self.cameras
            .values()
            .flat_map(BTreeMap::values)
            .map(BTreeMap::len)
            .sum()
    }

    pub fn entry_count(&self) -> usize {
        self.groups().map(|(_, entries)| entries.len()).sum()
    }
}

/// Everything needed to produce one hourly output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourPlan {
    pub key: GroupKey,
    /// `<target>/camera_<id>/<date>`
    pub date_dir: PathBuf,
    /// `<date_dir>/<date>_<hour>.00.00.<ext>`
    pub output: PathBuf,
    /// Where the existing output is moved before it is re-read, if one exists.
    pub prior: Option<PathBuf>,
    /// Fragment paths in playback order.
    pub fragments: Vec<PathBuf>,
}

impl HourPlan {
    /// Full manifest: the renamed prior output first, then the fragments.
    pub fn manifest_entries(&self) -> Vec<PathBuf> {
        self.prior
            .iter()
            .cloned()
            .chain(self.fragments.iter().cloned())
            .collect()
    }
}

/// Turns the hierarchy into one plan per hour-group.
///
/// `output_exists` is asked once per group whether its output path is
/// already taken by an earlier run. An existing output is only absorbed when
/// fragments are removed after concatenation; with `remove_sources` off the
/// fragments are all still present and the output is rebuilt from them.
pub fn plan_groups<F>(
    config: &CoreConfig,
    hierarchy: &GroupHierarchy,
    output_exists: F,
) -> Vec<HourPlan>
where
    F: Fn(&Path) -> bool,
{
    hierarchy
        .groups()
        .map(|(key, entries)| {
            let date_dir = config.date_dir(&key.camera_id, &key.date);
            let output = config.output_path(&key.camera_id, &key.date, &key.hour);
            let prior = (config.remove_sources && output_exists(&output)).then(|| old_path(&output));
            let fragments = entries.iter().map(|e| e.path().to_path_buf()).collect();
            HourPlan {
                key,
                date_dir,
                output,
                prior,
                fragments,
            }
        })
        .collect()
}
