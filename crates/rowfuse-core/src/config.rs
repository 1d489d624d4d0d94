//! Configuration for multi-input stages.
//!
//! The policy enums live here rather than with the operators so the config
//! can be deserialized without pulling in operator code.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::{RowBuffer, OVER_ALLOCATE_SIZE};
use crate::error::{Error, Result};

/// Which input stream wins when several carry a field of the same name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Lowest-numbered stream that has the field.
    #[default]
    UseFirst,
    /// Lowest-numbered stream whose value is not null.
    UseFirstNotNull,
    /// Highest-numbered stream that has the field.
    UseLast,
    /// Highest-numbered stream whose value is not null.
    UseLastNotNull,
}

impl SelectionPolicy {
    pub fn scans_backward(self) -> bool {
        matches!(self, SelectionPolicy::UseLast | SelectionPolicy::UseLastNotNull)
    }

    pub fn skips_nulls(self) -> bool {
        matches!(
            self,
            SelectionPolicy::UseFirstNotNull | SelectionPolicy::UseLastNotNull
        )
    }
}

impl FromStr for SelectionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "use_first" | "first" => Ok(SelectionPolicy::UseFirst),
            "use_first_not_null" | "first_not_null" => Ok(SelectionPolicy::UseFirstNotNull),
            "use_last" | "last" => Ok(SelectionPolicy::UseLast),
            "use_last_not_null" | "last_not_null" => Ok(SelectionPolicy::UseLastNotNull),
            _ => Err(Error::Config(format!("unknown selection policy: {s}"))),
        }
    }
}

/// What schema merging does with a field whose name is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Keep the first field with a name; drop later ones.
    #[default]
    Prevent,
    /// Keep every field; later collisions get a `[n]` suffix.
    Rename,
}

impl FromStr for DuplicatePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "prevent" => Ok(DuplicatePolicy::Prevent),
            "rename" => Ok(DuplicatePolicy::Rename),
            _ => Err(Error::Config(format!("unknown duplicate policy: {s}"))),
        }
    }
}

/// What reconciliation does when no input carries an output field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFieldPolicy {
    /// Fill the slot with null.
    #[default]
    Null,
    /// Report an error.
    Fail,
}

impl FromStr for MissingFieldPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "null" => Ok(MissingFieldPolicy::Null),
            "fail" => Ok(MissingFieldPolicy::Fail),
            _ => Err(Error::Config(format!("unknown missing field policy: {s}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuseConfig {
    /// Extra slots added on every row allocation.
    pub slack: usize,
    pub selection: SelectionPolicy,
    pub duplicates: DuplicatePolicy,
    pub missing_field: MissingFieldPolicy,
}

impl Default for FuseConfig {
    fn default() -> Self {
        Self {
            slack: OVER_ALLOCATE_SIZE,
            selection: SelectionPolicy::default(),
            duplicates: DuplicatePolicy::default(),
            missing_field: MissingFieldPolicy::default(),
        }
    }
}

/// Upper bound on slack; anything larger is almost certainly a typo.
const MAX_SLACK: usize = 1 << 16;

impl FuseConfig {
    /// Defaults overridden by `ROWFUSE_SLACK`, `ROWFUSE_SELECTION`,
    /// `ROWFUSE_DUPLICATES` and `ROWFUSE_MISSING_FIELD`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FuseConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut cfg = Self::default();
        if let Some(v) = lookup("ROWFUSE_SLACK") {
            cfg.slack = v
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("invalid slack '{v}'")))?;
        }
        if let Some(v) = lookup("ROWFUSE_SELECTION") {
            cfg.selection = v.trim().parse()?;
        }
        if let Some(v) = lookup("ROWFUSE_DUPLICATES") {
            cfg.duplicates = v.trim().parse()?;
        }
        if let Some(v) = lookup("ROWFUSE_MISSING_FIELD") {
            cfg.missing_field = v.trim().parse()?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.slack > MAX_SLACK {
            return Err(Error::Config(format!(
                "slack {} exceeds maximum {}",
                self.slack, MAX_SLACK
            )));
        }
        Ok(())
    }

    pub fn row_buffer(&self) -> RowBuffer {
        RowBuffer::new(self.slack)
    }
}
