//! Timeline aggregation and queries.
//!
//! Merges every derived and predicted event across the supplied dogs, litters
//! and stud jobs, then answers range, lookahead and single-day queries in
//! ascending date order. Events sharing a date keep derivation order; callers
//! should not rely on it.

use std::collections::{BTreeMap, HashMap};

use chrono::{Days, NaiveDate};

use crate::derive::{heat_cycle_events, litter_events, stud_job_events};
use crate::event::CanonicalEvent;
use crate::event_kind::EventKind;
use crate::predict::{PredictionConfig, predict_for_dog};
use crate::records::{Dog, KennelSource, Litter, StudJob};
use crate::types::{DogId, LitterId, StudJobId};

/// Default horizon for "upcoming" views, in days.
pub const DEFAULT_LOOKAHEAD_DAYS: u32 = 30;

/// Window around today in which a predicted heat is still worth showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceWindow {
    /// How far back a predicted heat may be and still show.
    /// Default: 30 days.
    pub days_back: u32,
    /// How far ahead a predicted heat may be and still show.
    /// Default: 60 days.
    pub days_ahead: u32,
}

impl Default for RelevanceWindow {
    fn default() -> Self {
        Self {
            days_back: 30,
            days_ahead: 60,
        }
    }
}

impl RelevanceWindow {
    /// Whether `date` falls within the window around `today` (inclusive).
    pub fn contains(&self, today: NaiveDate, date: NaiveDate) -> bool {
        let start = today
            .checked_sub_days(Days::new(u64::from(self.days_back)))
            .unwrap_or(NaiveDate::MIN);
        let end = add_days(today, self.days_ahead);
        (start..=end).contains(&date)
    }
}

/// Records whose events were dropped because their subject dog is unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DerivationReport {
    /// Litters whose dam could not be resolved.
    pub orphan_litters: Vec<(LitterId, DogId)>,
    /// Stud jobs whose stud could not be resolved.
    pub orphan_stud_jobs: Vec<(StudJobId, DogId)>,
}

impl DerivationReport {
    /// True when every record resolved its subject dog.
    pub fn is_clean(&self) -> bool {
        self.orphan_litters.is_empty() && self.orphan_stud_jobs.is_empty()
    }

    /// Number of records skipped.
    pub fn skipped(&self) -> usize {
        self.orphan_litters.len() + self.orphan_stud_jobs.len()
    }
}

/// Result of a full derivation pass.
#[derive(Debug, Clone, Default)]
pub struct Derivation {
    /// Events in derivation order (not sorted).
    pub events: Vec<CanonicalEvent>,
    pub report: DerivationReport,
}

/// Derives every event for the given records with default prediction settings.
pub fn derive_events(
    dogs: &[Dog],
    litters: &[Litter],
    stud_jobs: &[StudJob],
) -> Vec<CanonicalEvent> {
    derive_events_with(dogs, litters, stud_jobs, &PredictionConfig::default()).events
}

/// Derives every event for the given records.
///
/// Per dog: heat-cycle events, then the predicted next heat. Then litter
/// events, then stud job events. Litters and stud jobs whose subject dog is
/// missing from `dogs` contribute nothing and are listed in the report.
pub fn derive_events_with(
    dogs: &[Dog],
    litters: &[Litter],
    stud_jobs: &[StudJob],
    config: &PredictionConfig,
) -> Derivation {
    let dogs_by_id: HashMap<&DogId, &Dog> = dogs.iter().map(|dog| (&dog.id, dog)).collect();
    let mut derivation = Derivation::default();

    for dog in dogs {
        derivation.events.extend(heat_cycle_events(dog));
        derivation.events.extend(predict_for_dog(dog, config));
    }

    for litter in litters {
        let Some(dam) = dogs_by_id.get(&litter.dam_id) else {
            tracing::warn!(
                litter_id = %litter.id,
                dam_id = %litter.dam_id,
                "skipping litter events: dam not found"
            );
            derivation
                .report
                .orphan_litters
                .push((litter.id.clone(), litter.dam_id.clone()));
            continue;
        };
        derivation.events.extend(litter_events(litter, dam));
    }

    for job in stud_jobs {
        let Some(stud) = dogs_by_id.get(&job.stud_id) else {
            tracing::warn!(
                stud_job_id = %job.id,
                stud_id = %job.stud_id,
                "skipping stud job events: stud not found"
            );
            derivation
                .report
                .orphan_stud_jobs
                .push((job.id.clone(), job.stud_id.clone()));
            continue;
        };
        derivation.events.extend(stud_job_events(job, stud));
    }

    tracing::debug!(
        dogs = dogs.len(),
        litters = litters.len(),
        stud_jobs = stud_jobs.len(),
        events = derivation.events.len(),
        skipped = derivation.report.skipped(),
        "derived timeline events"
    );

    derivation
}

/// Events with `start <= date <= end`, ascending by date.
pub fn query_range(
    events: &[CanonicalEvent],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<&CanonicalEvent> {
    let mut matched: Vec<_> = events
        .iter()
        .filter(|e| e.date >= start && e.date <= end)
        .collect();
    matched.sort_by_key(|e| e.date);
    matched
}

/// Events from `today` through `today + days` inclusive, ascending by date.
pub fn query_lookahead(
    events: &[CanonicalEvent],
    today: NaiveDate,
    days: u32,
) -> Vec<&CanonicalEvent> {
    query_range(events, today, add_days(today, days))
}

/// Events on exactly `day`.
pub fn query_day(events: &[CanonicalEvent], day: NaiveDate) -> Vec<&CanonicalEvent> {
    events.iter().filter(|e| e.date == day).collect()
}

fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Events for one calendar cell, capped for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySummary<'a> {
    pub date: NaiveDate,
    /// At most `limit` events.
    pub shown: Vec<&'a CanonicalEvent>,
    /// How many more events fall on this day ("+N more").
    pub overflow: usize,
}

/// A sorted, queryable set of events.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    events: Vec<CanonicalEvent>,
    report: DerivationReport,
}

impl Timeline {
    /// Builds a timeline from already-derived events.
    pub fn new(mut events: Vec<CanonicalEvent>) -> Self {
        events.sort_by_key(|e| e.date);
        Self {
            events,
            report: DerivationReport::default(),
        }
    }

    /// Derives and sorts every event for the given records.
    pub fn from_records(
        dogs: &[Dog],
        litters: &[Litter],
        stud_jobs: &[StudJob],
        config: &PredictionConfig,
    ) -> Self {
        let Derivation { events, report } = derive_events_with(dogs, litters, stud_jobs, config);
        Self {
            report,
            ..Self::new(events)
        }
    }

    /// Reads the source and derives its timeline.
    pub fn from_source<S: KennelSource>(
        source: &S,
        config: &PredictionConfig,
    ) -> Result<Self, S::Error> {
        let dogs = source.list_dogs()?;
        let litters = source.list_litters()?;
        let stud_jobs = source.list_stud_jobs()?;
        Ok(Self::from_records(&dogs, &litters, &stud_jobs, config))
    }

    /// All events, ascending by date.
    pub fn events(&self) -> &[CanonicalEvent] {
        &self.events
    }

    pub fn report(&self) -> &DerivationReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drops predicted heats outside the relevance window around `today`.
    ///
    /// Recorded events are never dropped.
    pub fn surface_predictions(&mut self, today: NaiveDate, window: &RelevanceWindow) {
        self.events
            .retain(|e| !e.kind().is_predicted() || window.contains(today, e.date));
    }

    /// Keeps only events whose kind passes `keep`. Order is preserved.
    pub fn retain_kinds(&mut self, mut keep: impl FnMut(EventKind) -> bool) {
        self.events.retain(|e| keep(e.kind()));
    }

    /// Events with `start <= date <= end`. Empty if `start > end`.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> &[CanonicalEvent] {
        if start > end {
            return &[];
        }
        let lo = self.events.partition_point(|e| e.date < start);
        let hi = self.events.partition_point(|e| e.date <= end);
        &self.events[lo..hi]
    }

    /// Events from `today` through `today + days` inclusive.
    pub fn lookahead(&self, today: NaiveDate, days: u32) -> &[CanonicalEvent] {
        self.range(today, add_days(today, days))
    }

    /// Events on exactly `day`.
    pub fn day(&self, day: NaiveDate) -> &[CanonicalEvent] {
        self.range(day, day)
    }

    /// Events on `day`, capped at `limit` with an overflow count.
    pub fn day_summary(&self, day: NaiveDate, limit: usize) -> DaySummary<'_> {
        let events = self.day(day);
        DaySummary {
            date: day,
            shown: events.iter().take(limit).collect(),
            overflow: events.len().saturating_sub(limit),
        }
    }

    /// Range results grouped by day, for month grids.
    pub fn by_day(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> BTreeMap<NaiveDate, Vec<&CanonicalEvent>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&CanonicalEvent>> = BTreeMap::new();
        for event in self.range(start, end) {
            grouped.entry(event.date).or_default().push(event);
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use std::fmt::Write;

    use super::*;
    use crate::records::{HeatCycle, KennelSnapshot, StudBreedingRecord};
    use crate::types::{BreedingMethod, BreedingStatus, LitterStatus, Sex, StudJobStatus};
    use insta::assert_snapshot;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cycle(start: NaiveDate) -> HeatCycle {
        HeatCycle {
            id: None,
            start_date: start,
            end_date: None,
            bred: false,
            breeding_dates: vec![],
        }
    }

    fn luna() -> Dog {
        Dog {
            id: DogId::new("luna").unwrap(),
            name: "Luna".to_string(),
            sex: Sex::Female,
            heat_cycles: vec![cycle(date(2024, 4, 1)), cycle(date(2024, 10, 15))],
        }
    }

    fn rex() -> Dog {
        Dog {
            id: DogId::new("rex").unwrap(),
            name: "Rex".to_string(),
            sex: Sex::Male,
            heat_cycles: vec![],
        }
    }

    fn pregnant_litter(dam: &str) -> Litter {
        Litter {
            id: LitterId::new("litter-1").unwrap(),
            litter_name: Some("A Litter".to_string()),
            dam_id: DogId::new(dam).unwrap(),
            sire_id: Some(DogId::new("rex").unwrap()),
            status: LitterStatus::Pregnant,
            date_of_birth: None,
            expected_date_of_birth: Some(date(2025, 3, 10)),
            pickup_ready_date: None,
        }
    }

    fn stud_job(stud: &str) -> StudJob {
        StudJob {
            id: StudJobId::new("job-1").unwrap(),
            stud_id: DogId::new(stud).unwrap(),
            female_dog_name: "Bella".to_string(),
            status: StudJobStatus::Confirmed,
            scheduled_date: None,
            breedings: vec![StudBreedingRecord {
                date: Some(date(2025, 1, 1)),
                method: BreedingMethod::Ai,
                status: BreedingStatus::Completed,
            }],
        }
    }

    fn sample_timeline() -> Timeline {
        Timeline::from_records(
            &[luna(), rex()],
            &[pregnant_litter("luna")],
            &[stud_job("rex")],
            &PredictionConfig::default(),
        )
    }

    // ========== Derivation ==========

    #[test]
    fn derive_events_merges_all_sources() {
        let events = derive_events(
            &[luna(), rex()],
            &[pregnant_litter("luna")],
            &[stud_job("rex")],
        );

        let count = |kind: EventKind| events.iter().filter(|e| e.kind() == kind).count();
        assert_eq!(count(EventKind::HeatStarted), 2);
        assert_eq!(count(EventKind::ExpectedHeat), 1);
        assert_eq!(count(EventKind::DueDate), 1);
        assert_eq!(count(EventKind::StudBreeding), 1);
        assert_eq!(count(EventKind::PregnancyCheck), 1);
        assert_eq!(count(EventKind::LitterSizeCheck), 1);
        assert_eq!(events.len(), 7);
    }

    #[test]
    fn pregnant_litter_scenario() {
        let events = derive_events(&[luna()], &[pregnant_litter("luna")], &[]);
        let due: Vec<_> = events
            .iter()
            .filter(|e| e.kind() == EventKind::DueDate)
            .collect();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].date, date(2025, 3, 10));
        assert!(events.iter().all(|e| e.kind() != EventKind::PuppiesReady));
    }

    #[test]
    fn completed_stud_breeding_scenario() {
        let events = derive_events(&[rex()], &[], &[stud_job("rex")]);
        let summary: Vec<_> = events.iter().map(|e| (e.kind(), e.date)).collect();
        assert_eq!(
            summary,
            vec![
                (EventKind::StudBreeding, date(2025, 1, 1)),
                (EventKind::PregnancyCheck, date(2025, 1, 31)),
                (EventKind::LitterSizeCheck, date(2025, 3, 7)),
            ]
        );
        assert!(events[0].title.ends_with("(Done)"));
    }

    #[test]
    fn orphan_records_are_skipped_and_reported() {
        let derivation = derive_events_with(
            &[luna()],
            &[pregnant_litter("ghost")],
            &[stud_job("missing-stud")],
            &PredictionConfig::default(),
        );

        assert!(
            derivation
                .events
                .iter()
                .all(|e| e.subject_dog_id().as_str() == "luna")
        );
        assert_eq!(derivation.report.skipped(), 2);
        assert!(!derivation.report.is_clean());
        assert_eq!(derivation.report.orphan_litters[0].1.as_str(), "ghost");
        assert_eq!(
            derivation.report.orphan_stud_jobs[0].1.as_str(),
            "missing-stud"
        );
    }

    #[test]
    fn dates_at_the_end_of_the_calendar_do_not_abort_derivation() {
        let mut late_luna = luna();
        late_luna.heat_cycles = vec![cycle(NaiveDate::MAX - Days::new(10))];
        let mut late_job = stud_job("rex");
        late_job.breedings[0].date = Some(NaiveDate::MAX - Days::new(1));

        let derivation = derive_events_with(
            &[late_luna, rex()],
            &[pregnant_litter("luna")],
            &[late_job],
            &PredictionConfig::default(),
        );

        let kinds: Vec<_> = derivation.events.iter().map(CanonicalEvent::kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::HeatStarted,
                EventKind::DueDate,
                EventKind::StudBreeding
            ]
        );
        assert!(derivation.report.is_clean());

        let huge_default = PredictionConfig {
            default_cycle_length_days: 200_000_000,
        };
        let mut young_luna = luna();
        young_luna.heat_cycles.truncate(1);
        let timeline = Timeline::from_records(&[young_luna], &[], &[], &huge_default);
        assert_eq!(timeline.len(), 1);
        assert!(
            timeline
                .events()
                .iter()
                .all(|e| e.kind() != EventKind::ExpectedHeat)
        );
    }

    #[test]
    fn empty_inputs_give_empty_timeline() {
        let timeline = Timeline::from_records(&[], &[], &[], &PredictionConfig::default());
        assert!(timeline.is_empty());
        assert!(timeline.report().is_clean());
    }

    #[test]
    fn timeline_from_source_matches_from_records() {
        let snapshot = KennelSnapshot {
            dogs: vec![luna(), rex()],
            litters: vec![pregnant_litter("luna")],
            stud_jobs: vec![stud_job("rex")],
        };
        let Ok(timeline) = Timeline::from_source(&snapshot, &PredictionConfig::default());
        assert_eq!(timeline.events(), sample_timeline().events());
    }

    // ========== Queries ==========

    #[test]
    fn timeline_is_sorted_ascending() {
        let timeline = sample_timeline();
        assert!(timeline.events().windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn range_is_inclusive() {
        let timeline = sample_timeline();
        let hits = timeline.range(date(2025, 1, 1), date(2025, 1, 31));
        let kinds: Vec<_> = hits.iter().map(CanonicalEvent::kind).collect();
        assert_eq!(kinds, vec![EventKind::StudBreeding, EventKind::PregnancyCheck]);
    }

    #[test]
    fn inverted_range_is_empty() {
        let timeline = sample_timeline();
        assert!(timeline.range(date(2025, 2, 1), date(2025, 1, 1)).is_empty());
    }

    #[test]
    fn range_matches_free_function_and_is_idempotent() {
        let timeline = sample_timeline();
        let (start, end) = (date(2024, 1, 1), date(2025, 3, 31));

        let from_timeline: Vec<_> = timeline.range(start, end).iter().collect();
        let from_fn = query_range(timeline.events(), start, end);
        assert_eq!(from_timeline, from_fn);
        assert_eq!(query_range(timeline.events(), start, end), from_fn);
        assert!(from_fn.iter().all(|e| e.date >= start && e.date <= end));
    }

    #[test]
    fn wider_range_returns_superset() {
        let events = sample_timeline().events().to_vec();
        let narrow = query_range(&events, date(2025, 1, 15), date(2025, 3, 8));
        let wide = query_range(&events, date(2024, 12, 1), date(2025, 12, 31));
        assert!(narrow.iter().all(|e| wide.contains(e)));
        assert!(wide.len() > narrow.len());
    }

    #[test]
    fn query_range_sorts_unsorted_input() {
        let events = derive_events(
            &[luna(), rex()],
            &[pregnant_litter("luna")],
            &[stud_job("rex")],
        );
        let hits = query_range(&events, NaiveDate::MIN, NaiveDate::MAX);
        assert_eq!(hits.len(), events.len());
        assert!(hits.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn lookahead_covers_today_through_horizon() {
        let timeline = sample_timeline();
        let today = date(2025, 1, 1);

        let upcoming = timeline.lookahead(today, DEFAULT_LOOKAHEAD_DAYS);
        let kinds: Vec<_> = upcoming.iter().map(CanonicalEvent::kind).collect();
        assert_eq!(kinds, vec![EventKind::StudBreeding, EventKind::PregnancyCheck]);

        let free = query_lookahead(timeline.events(), today, 29);
        assert_eq!(free.len(), 1);
    }

    #[test]
    fn day_lookup_and_summary() {
        let mut events = sample_timeline().events().to_vec();
        for _ in 0..4 {
            events.push(events[0].clone());
        }
        let busy_day = events[0].date;
        let timeline = Timeline::new(events);

        assert_eq!(timeline.day(busy_day).len(), 5);
        assert_eq!(query_day(timeline.events(), busy_day).len(), 5);

        let summary = timeline.day_summary(busy_day, 3);
        assert_eq!(summary.shown.len(), 3);
        assert_eq!(summary.overflow, 2);

        let quiet = timeline.day_summary(date(1999, 1, 1), 3);
        assert!(quiet.shown.is_empty());
        assert_eq!(quiet.overflow, 0);
    }

    #[test]
    fn by_day_groups_events() {
        let timeline = sample_timeline();
        let grouped = timeline.by_day(date(2025, 1, 1), date(2025, 3, 31));
        let days: Vec<_> = grouped.keys().copied().collect();
        assert_eq!(
            days,
            vec![date(2025, 1, 1), date(2025, 1, 31), date(2025, 3, 7), date(2025, 3, 10)]
        );
    }

    // ========== Prediction relevance ==========

    #[test]
    fn relevance_window_bounds_are_inclusive() {
        let window = RelevanceWindow::default();
        let today = date(2025, 5, 1);
        assert!(window.contains(today, date(2025, 4, 1)));
        assert!(window.contains(today, date(2025, 6, 30)));
        assert!(!window.contains(today, date(2025, 3, 31)));
        assert!(!window.contains(today, date(2025, 7, 1)));
    }

    #[test]
    fn surface_predictions_only_drops_stale_predictions() {
        // Luna's cycles: 2024-04-01, 2024-10-15 (197 days) -> expected 2025-04-30.
        let mut timeline = sample_timeline();
        let before = timeline.len();

        timeline.surface_predictions(date(2025, 5, 1), &RelevanceWindow::default());
        assert_eq!(timeline.len(), before);

        timeline.surface_predictions(date(2025, 9, 1), &RelevanceWindow::default());
        assert_eq!(timeline.len(), before - 1);
        assert!(timeline.events().iter().all(|e| !e.kind().is_predicted()));
        assert!(
            timeline
                .events()
                .iter()
                .any(|e| e.kind() == EventKind::HeatStarted)
        );
    }

    #[test]
    fn retain_kinds_keeps_order_and_matching_kinds() {
        let mut timeline = sample_timeline();
        timeline.retain_kinds(|kind| kind.color() == crate::EventColor::Amber);

        let summary: Vec<_> = timeline.events().iter().map(|e| (e.kind(), e.date)).collect();
        assert_eq!(
            summary,
            vec![
                (EventKind::PregnancyCheck, date(2025, 1, 31)),
                (EventKind::LitterSizeCheck, date(2025, 3, 7)),
            ]
        );
    }

    #[test]
    fn rendered_timeline() {
        let timeline = sample_timeline();
        let mut out = String::new();
        for event in timeline.events() {
            writeln!(
                out,
                "{} {:<24} {:<5} {}",
                event.date,
                event.title,
                event.subject_dog_name(),
                event.detail.as_deref().unwrap_or("-")
            )
            .unwrap();
        }
        assert_snapshot!(out.trim_end(), @r"
        2024-04-01 Heat Started             Luna  -
        2024-10-15 Heat Started             Luna  -
        2025-01-01 Stud Breeding #1 (Done)  Rex   Bella - AI
        2025-01-31 Pregnancy Check          Rex   Bella - 30 days post-breeding
        2025-03-07 Litter Size Check        Rex   Bella - 65 days post-breeding
        2025-03-10 Due Date                 Luna  A Litter
        2025-04-30 Expected Heat            Luna  Avg cycle: 197 days
        ");
    }
}
