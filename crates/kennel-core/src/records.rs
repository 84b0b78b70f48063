//! Read-only upstream records: dogs, litters and stud jobs.
//!
//! These are snapshots owned by the record store. The timeline never mutates
//! them; it only reads the fields needed to derive events.

use std::convert::Infallible;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{
    BreedingMethod, BreedingStatus, DogId, HeatCycleId, LitterId, LitterStatus, Sex, StudJobId,
    StudJobStatus,
};

/// A dog registered with the kennel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub sex: Sex,
    /// Recorded heat cycles, oldest first as entered. Only meaningful for females.
    #[serde(default)]
    pub heat_cycles: Vec<HeatCycle>,
}

impl Dog {
    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }
}

/// One recorded heat cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatCycle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HeatCycleId>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub bred: bool,
    #[serde(default)]
    pub breeding_dates: Vec<NaiveDate>,
}

/// A litter, from planning through puppy pickup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Litter {
    pub id: LitterId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub litter_name: Option<String>,
    pub dam_id: DogId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sire_id: Option<DogId>,
    pub status: LitterStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_ready_date: Option<NaiveDate>,
}

/// A stud service engagement between one of our males and an outside female.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudJob {
    pub id: StudJobId,
    pub stud_id: DogId,
    pub female_dog_name: String,
    pub status: StudJobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_date: Option<NaiveDate>,
    /// Individual breeding attempts, in the order they were recorded.
    #[serde(default)]
    pub breedings: Vec<StudBreedingRecord>,
}

/// A single breeding attempt within a stud job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudBreedingRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub method: BreedingMethod,
    pub status: BreedingStatus,
}

/// Read access to the kennel's record store.
///
/// Implementations own fetching and freshness; a failed read is reported
/// through `Error` by the implementation, never by the timeline.
pub trait KennelSource {
    type Error;

    fn list_dogs(&self) -> Result<Vec<Dog>, Self::Error>;

    fn list_litters(&self) -> Result<Vec<Litter>, Self::Error>;

    fn list_stud_jobs(&self) -> Result<Vec<StudJob>, Self::Error>;
}

/// An in-memory snapshot of the record store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KennelSnapshot {
    #[serde(default)]
    pub dogs: Vec<Dog>,
    #[serde(default)]
    pub litters: Vec<Litter>,
    #[serde(default)]
    pub stud_jobs: Vec<StudJob>,
}

impl KennelSnapshot {
    /// Pulls a full snapshot from a source.
    pub fn from_source<S: KennelSource>(source: &S) -> Result<Self, S::Error> {
        Ok(Self {
            dogs: source.list_dogs()?,
            litters: source.list_litters()?,
            stud_jobs: source.list_stud_jobs()?,
        })
    }
}

impl KennelSource for KennelSnapshot {
    type Error = Infallible;

    fn list_dogs(&self) -> Result<Vec<Dog>, Self::Error> {
        Ok(self.dogs.clone())
    }

    fn list_litters(&self) -> Result<Vec<Litter>, Self::Error> {
        Ok(self.litters.clone())
    }

    fn list_stud_jobs(&self) -> Result<Vec<StudJob>, Self::Error> {
        Ok(self.stud_jobs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_snapshot() {
        let json = r#"{
            "dogs": [{
                "id": "dog-1",
                "name": "Luna",
                "sex": "female",
                "heatCycles": [
                    {"id": "hc-1", "startDate": "2024-06-01", "bred": true, "breedingDates": ["2024-06-10", "2024-06-12"]},
                    {"startDate": "2024-12-15"}
                ]
            }],
            "litters": [{
                "id": "litter-1",
                "litterName": "Spring Litter",
                "damId": "dog-1",
                "sireId": "dog-2",
                "status": "pregnant",
                "expectedDateOfBirth": "2025-03-10"
            }],
            "studJobs": [{
                "id": "job-1",
                "studId": "dog-2",
                "femaleDogName": "Bella",
                "status": "confirmed",
                "breedings": [{"date": "2025-01-01", "method": "ai", "status": "completed"}]
            }]
        }"#;

        let snapshot: KennelSnapshot = serde_json::from_str(json).unwrap();

        let luna = &snapshot.dogs[0];
        assert!(luna.is_female());
        assert_eq!(luna.heat_cycles.len(), 2);
        assert_eq!(luna.heat_cycles[0].breeding_dates.len(), 2);
        assert!(!luna.heat_cycles[1].bred);
        assert!(luna.heat_cycles[1].id.is_none());

        assert_eq!(snapshot.litters[0].status, LitterStatus::Pregnant);
        assert_eq!(snapshot.litters[0].pickup_ready_date, None);

        let job = &snapshot.stud_jobs[0];
        assert_eq!(job.breedings[0].method, BreedingMethod::Ai);
        assert_eq!(job.scheduled_date, None);
    }

    #[test]
    fn empty_document_is_empty_snapshot() {
        let snapshot: KennelSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, KennelSnapshot::default());
    }

    #[test]
    fn snapshot_roundtrips_through_source() {
        let snapshot = KennelSnapshot {
            dogs: vec![Dog {
                id: DogId::new("dog-9").unwrap(),
                name: "Rex".to_string(),
                sex: Sex::Male,
                heat_cycles: vec![],
            }],
            ..KennelSnapshot::default()
        };
        let Ok(copy) = KennelSnapshot::from_source(&snapshot);
        assert_eq!(copy, snapshot);
    }
}
