//! The latest conditions snapshot reported by a hub
//!
//! A `CurrentConditions` holds zero or one record of each `ConditionKind`.
//! It is built once per successful poll by whoever parses the hub's report
//! and is never mutated after being handed out; consumers only ever see it
//! behind a shared reference.

use crate::conditions::{
    AirQualityCondition, Condition, ConditionKind, ConditionRecord, IssCondition,
    LssBarCondition, LssTempHumCondition,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A record was requested that the snapshot does not contain
///
/// Metrics are gated on record presence before they are created, so
/// hitting this means a gating bug or a record that vanished after
/// activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("condition record '{kind}' is not present in the current snapshot")]
pub struct MissingRecord {
    pub kind: ConditionKind,
}

/// Snapshot of all condition records from one poll
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SnapshotRepr", into = "SnapshotRepr")]
pub struct CurrentConditions {
    /// Hub device id
    did: Option<String>,
    /// Time the hub generated the report
    timestamp: Option<DateTime<Utc>>,
    /// Indexed by `ConditionKind::index`
    records: [Option<ConditionRecord>; 4],
}

impl CurrentConditions {
    /// Create an empty snapshot (what consumers see before the first poll)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hub report timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the hub device id
    pub fn with_did(mut self, did: impl Into<String>) -> Self {
        self.did = Some(did.into());
        self
    }

    /// Add a record, replacing any record of the same kind
    pub fn insert(mut self, record: impl Into<ConditionRecord>) -> Self {
        let record = record.into();
        let index = record.kind().index();
        if self.records[index].is_some() {
            log::debug!("Replacing duplicate '{}' record in snapshot", record.kind());
        }
        self.records[index] = Some(record);
        self
    }

    pub fn did(&self) -> Option<&str> {
        self.did.as_deref()
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Check whether a record of the given kind is present
    pub fn contains(&self, kind: ConditionKind) -> bool {
        self.records[kind.index()].is_some()
    }

    /// Get the record of the given kind
    pub fn get(&self, kind: ConditionKind) -> Result<&ConditionRecord, MissingRecord> {
        self.records[kind.index()]
            .as_ref()
            .ok_or(MissingRecord { kind })
    }

    /// Get the record of type `T`
    pub fn get_as<T: Condition>(&self) -> Result<&T, MissingRecord> {
        self.get(T::KIND)
            .ok()
            .and_then(T::from_record)
            .ok_or(MissingRecord { kind: T::KIND })
    }

    /// Kinds present in this snapshot, in canonical order
    pub fn kinds(&self) -> Vec<ConditionKind> {
        ConditionKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    /// Number of records present
    pub fn len(&self) -> usize {
        self.records.iter().filter(|r| r.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Serialized form: one optional field per record kind
#[derive(Clone, Default, Serialize, Deserialize)]
struct SnapshotRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    did: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lss_bar: Option<LssBarCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lss_temp_hum: Option<LssTempHumCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    iss: Option<IssCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    air_quality: Option<AirQualityCondition>,
}

impl From<SnapshotRepr> for CurrentConditions {
    fn from(repr: SnapshotRepr) -> Self {
        let mut snapshot = CurrentConditions {
            did: repr.did,
            timestamp: repr.timestamp,
            records: Default::default(),
        };
        if let Some(c) = repr.lss_bar {
            snapshot = snapshot.insert(c);
        }
        if let Some(c) = repr.lss_temp_hum {
            snapshot = snapshot.insert(c);
        }
        if let Some(c) = repr.iss {
            snapshot = snapshot.insert(c);
        }
        if let Some(c) = repr.air_quality {
            snapshot = snapshot.insert(c);
        }
        snapshot
    }
}

impl From<CurrentConditions> for SnapshotRepr {
    fn from(snapshot: CurrentConditions) -> Self {
        let mut repr = SnapshotRepr {
            did: snapshot.did,
            timestamp: snapshot.timestamp,
            ..Default::default()
        };
        for record in snapshot.records.into_iter().flatten() {
            match record {
                ConditionRecord::LssBar(c) => repr.lss_bar = Some(c),
                ConditionRecord::LssTempHum(c) => repr.lss_temp_hum = Some(c),
                ConditionRecord::Iss(c) => repr.iss = Some(c),
                ConditionRecord::AirQuality(c) => repr.air_quality = Some(c),
            }
        }
        repr
    }
}
