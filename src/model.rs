use crate::error::{ReportError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub author_name: String,
    #[serde(default)]
    pub author_email: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitEntry {
    pub author: String,
    pub message: String,
    pub date: String,
}

impl From<Commit> for CommitEntry {
    fn from(commit: Commit) -> Self {
        Self {
            author: commit.author_name,
            message: commit.message,
            date: commit.created_at,
        }
    }
}

/// Project name to commits, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    projects: Vec<(String, Vec<CommitEntry>)>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserting a name that is already present replaces its commits but
    /// keeps the original position.
    pub fn insert(&mut self, name: String, commits: Vec<CommitEntry>) {
        match self.projects.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = commits,
            None => self.projects.push((name, commits)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&[CommitEntry]> {
        self.projects
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, commits)| commits.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CommitEntry])> {
        self.projects
            .iter()
            .map(|(name, commits)| (name.as_str(), commits.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn commit_count(&self) -> usize {
        self.projects.iter().map(|(_, commits)| commits.len()).sum()
    }
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.projects.len()))?;
        for (name, commits) in &self.projects {
            map.serialize_entry(name, commits)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub gitlab_url: String,
    pub since: String,
    pub until: String,
    pub projects: Report,
}

/// Inclusive calendar-day range, expanded to UTC bounds for the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Ordering of `start` and `end` is not checked.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self {
            start: parse_day(start)?,
            end: parse_day(end)?,
        })
    }

    pub fn since(&self) -> String {
        format!("{}T00:00:00Z", self.start.format("%Y-%m-%d"))
    }

    pub fn until(&self) -> String {
        format!("{}T23:59:59Z", self.end.format("%Y-%m-%d"))
    }
}

fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|e| ReportError::InvalidDate(format!("'{input}': {e}")))
}
