//! Per-cohort attendance ledger: the live check-in/check-out board, derived
//! overtime/lateness, end-of-day archival, and history queries.
//!
//! One ledger instance owns one cohort's two stored documents (live statuses
//! and archived days). All clock input is injected, so the transition rules
//! are testable without wall time.

pub mod policy;

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::attendance::{
    ArchivedDay, ArchivedEntry, AttendanceRecord, AttendanceStatus, HistoryFilter, TransitionEvent,
};
use crate::model::cohort::Cohort;
use crate::store::{PersonDirectory, RecordStore, StoreError};

/// Fallback for both an absent operator and a person id the directory does
/// not know. Directory and ledger may be transiently out of sync; a toggle
/// must still land.
pub const UNKNOWN: &str = "Unknown";

type LiveBoard = HashMap<String, AttendanceRecord>;

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("stored document `{key}` is not decodable: {source}")]
    CorruptDocument {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of an archival run. An empty selection is a reportable no-op, not
/// an error.
#[derive(Debug, PartialEq, Eq)]
pub enum ArchiveOutcome {
    NothingToArchive,
    Archived { date: NaiveDate, archived: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct BoardEntry {
    pub person_id: String,
    pub display_name: String,
    pub record: AttendanceRecord,
}

/// Live board partitioned the way the front desk reads it: who is still
/// expected or present today vs. who already left.
#[derive(Debug, Serialize)]
pub struct AttendanceBoard {
    pub open: Vec<BoardEntry>,
    pub departed: Vec<BoardEntry>,
}

pub struct Ledger<'a> {
    cohort: Cohort,
    store: &'a dyn RecordStore,
    directory: &'a dyn PersonDirectory,
}

impl<'a> Ledger<'a> {
    pub fn new(
        cohort: Cohort,
        store: &'a dyn RecordStore,
        directory: &'a dyn PersonDirectory,
    ) -> Self {
        Self {
            cohort,
            store,
            directory,
        }
    }

    /// Flip one person's presence state and persist the whole board.
    ///
    /// A check-in starts a fresh day-cycle: previous checkout fields and
    /// derived values are dropped. A check-out closes the cycle and lets the
    /// cohort policy fill in its derived field.
    pub async fn toggle(
        &self,
        person_id: &str,
        acting_user: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<(AttendanceRecord, TransitionEvent), LedgerError> {
        let actor = acting_user
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string();
        let display_name = self.resolve_name(person_id).await?;
        let policy = policy::for_cohort(self.cohort);

        let key = self.cohort.statuses_key();
        let mut board: LiveBoard = self.load_doc(&key).await?;
        let current = board.get(person_id).cloned().unwrap_or_default();

        let (record, event) = match current.status {
            AttendanceStatus::CheckedOut => {
                let mut record = AttendanceRecord {
                    status: AttendanceStatus::CheckedIn,
                    check_in_time: Some(now),
                    check_in_actor: Some(actor),
                    ..AttendanceRecord::default()
                };
                policy.apply_check_in(&mut record, now);
                let event = TransitionEvent::CheckedIn {
                    person_id: person_id.to_string(),
                    display_name,
                    at: now,
                    is_late: record.is_late,
                };
                (record, event)
            }
            AttendanceStatus::CheckedIn => {
                let mut record = current;
                record.status = AttendanceStatus::CheckedOut;
                record.check_out_time = Some(now);
                record.check_out_actor = Some(actor);
                policy.apply_check_out(&mut record, now);
                let event = TransitionEvent::CheckedOut {
                    person_id: person_id.to_string(),
                    display_name,
                    at: now,
                    overtime_minutes: record.overtime_minutes,
                };
                (record, event)
            }
        };

        board.insert(person_id.to_string(), record.clone());
        self.save_doc(&key, &board).await?;

        Ok((record, event))
    }

    /// Current board, partitioned into open/untouched vs. closed/departed.
    /// Live records whose person has left the roster stay visible under the
    /// fallback name.
    pub async fn board(&self) -> Result<AttendanceBoard, LedgerError> {
        let live: LiveBoard = self.load_doc(&self.cohort.statuses_key()).await?;
        let roster = self.directory.list(self.cohort).await?;

        let mut open = Vec::new();
        let mut departed = Vec::new();
        let mut push = |entry: BoardEntry| {
            if entry.record.is_closed() {
                departed.push(entry);
            } else {
                open.push(entry);
            }
        };

        for person in &roster {
            let record = live.get(&person.id).cloned().unwrap_or_default();
            push(BoardEntry {
                person_id: person.id.clone(),
                display_name: person.display_name.clone(),
                record,
            });
        }

        for (person_id, record) in &live {
            if roster.iter().any(|p| &p.id == person_id) {
                continue;
            }
            push(BoardEntry {
                person_id: person_id.clone(),
                display_name: UNKNOWN.to_string(),
                record: record.clone(),
            });
        }

        open.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        departed.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        Ok(AttendanceBoard { open, departed })
    }

    /// Move today's closed records into the archive and wipe their live
    /// state back to the untouched default.
    ///
    /// Re-archiving a date unions by person id, newest closure winning.
    /// Records still checked in, or never touched today, are left alone.
    pub async fn archive_closed_records(
        &self,
        today: NaiveDate,
    ) -> Result<ArchiveOutcome, LedgerError> {
        let statuses_key = self.cohort.statuses_key();
        let mut board: LiveBoard = self.load_doc(&statuses_key).await?;

        let closed: Vec<(String, AttendanceRecord)> = board
            .iter()
            .filter(|(_, record)| record.is_closed())
            .map(|(id, record)| (id.clone(), record.clone()))
            .collect();

        if closed.is_empty() {
            return Ok(ArchiveOutcome::NothingToArchive);
        }

        let mut entries = Vec::with_capacity(closed.len());
        for (person_id, record) in &closed {
            entries.push(ArchivedEntry {
                person_id: person_id.clone(),
                display_name: self.resolve_name(person_id).await?,
                record: record.clone(),
            });
        }
        entries.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        let archive_key = self.cohort.archive_key();
        let mut days: Vec<ArchivedDay> = self.load_doc(&archive_key).await?;
        match days.iter_mut().find(|day| day.date == today) {
            Some(day) => {
                day.records
                    .retain(|old| !entries.iter().any(|e| e.person_id == old.person_id));
                day.records.extend(entries);
            }
            None => days.push(ArchivedDay {
                date: today,
                records: entries,
            }),
        }
        days.sort_by(|a, b| b.date.cmp(&a.date));
        self.save_doc(&archive_key, &days).await?;

        for (person_id, _) in &closed {
            board.insert(person_id.clone(), AttendanceRecord::default());
        }
        self.save_doc(&statuses_key, &board).await?;

        Ok(ArchiveOutcome::Archived {
            date: today,
            archived: closed.len(),
        })
    }

    /// Archived days matching the filter, newest first. Pure read.
    pub async fn query_history(
        &self,
        filter: &HistoryFilter,
    ) -> Result<Vec<ArchivedDay>, LedgerError> {
        let days: Vec<ArchivedDay> = self.load_doc(&self.cohort.archive_key()).await?;
        Ok(filter_days(days, filter))
    }

    async fn resolve_name(&self, person_id: &str) -> Result<String, LedgerError> {
        Ok(self
            .directory
            .display_name(person_id)
            .await?
            .unwrap_or_else(|| UNKNOWN.to_string()))
    }

    async fn load_doc<T>(&self, key: &str) -> Result<T, LedgerError>
    where
        T: DeserializeOwned + Default,
    {
        match self.store.load(key).await? {
            Some(value) => {
                serde_json::from_value(value).map_err(|source| LedgerError::CorruptDocument {
                    key: key.to_string(),
                    source,
                })
            }
            None => Ok(T::default()),
        }
    }

    async fn save_doc<T: Serialize>(&self, key: &str, doc: &T) -> Result<(), LedgerError> {
        let value = serde_json::to_value(doc).map_err(StoreError::from)?;
        self.store.save(key, value).await?;
        Ok(())
    }
}

/// The date range includes or excludes whole days; person and overtime
/// predicates then narrow each surviving day's records. Days left empty are
/// dropped.
pub fn filter_days(days: Vec<ArchivedDay>, filter: &HistoryFilter) -> Vec<ArchivedDay> {
    let overtime = filter.overtime.unwrap_or_default();
    days.into_iter()
        .filter(|day| {
            filter.from.is_none_or(|from| day.date >= from)
                && filter.to.is_none_or(|to| day.date <= to)
        })
        .filter_map(|mut day| {
            day.records.retain(|entry| {
                filter
                    .person_id
                    .as_deref()
                    .is_none_or(|p| entry.person_id == p)
                    && overtime.matches(&entry.record)
            });
            if day.records.is_empty() { None } else { Some(day) }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::attendance::OvertimeFilter;
    use crate::store::memory::{MemoryDirectory, MemoryStore};

    fn june1(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn nursery_roster() -> (MemoryStore, MemoryDirectory) {
        let store = MemoryStore::new();
        let dir = MemoryDirectory::new();
        dir.enroll(Cohort::Nursery, "s1", "Ama");
        dir.enroll(Cohort::Nursery, "s2", "Kofi");
        dir.enroll(Cohort::Nursery, "s3", "Esi");
        (store, dir)
    }

    #[actix_web::test]
    async fn toggle_alternates_between_checked_in_and_out() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        let (record, event) = ledger
            .toggle("s1", Some("teacher1"), june1(8, 0, 0))
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::CheckedIn);
        assert_eq!(record.check_in_time, Some(june1(8, 0, 0)));
        assert_eq!(record.check_in_actor.as_deref(), Some("teacher1"));
        assert!(matches!(event, TransitionEvent::CheckedIn { .. }));

        let (record, event) = ledger
            .toggle("s1", Some("teacher1"), june1(16, 30, 0))
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::CheckedOut);
        assert!(record.is_closed());
        assert_eq!(record.check_out_time, Some(june1(16, 30, 0)));
        assert!(matches!(event, TransitionEvent::CheckedOut { .. }));
    }

    #[actix_web::test]
    async fn check_in_starts_a_fresh_cycle() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        ledger.toggle("s1", Some("teacher1"), june1(8, 0, 0)).await.unwrap();
        let (closed, _) = ledger
            .toggle("s1", Some("teacher2"), june1(18, 10, 0))
            .await
            .unwrap();
        assert_eq!(closed.overtime_minutes, Some(10));

        let (reopened, _) = ledger
            .toggle("s1", Some("teacher2"), june1(19, 0, 0))
            .await
            .unwrap();
        assert_eq!(reopened.status, AttendanceStatus::CheckedIn);
        assert_eq!(reopened.check_in_time, Some(june1(19, 0, 0)));
        assert_eq!(reopened.check_out_time, None);
        assert_eq!(reopened.check_out_actor, None);
        assert_eq!(reopened.overtime_minutes, None);
    }

    #[actix_web::test]
    async fn nursery_checkout_reports_overtime_in_the_event() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();
        let (_, event) = ledger.toggle("s1", None, june1(18, 12, 0)).await.unwrap();

        match event {
            TransitionEvent::CheckedOut {
                overtime_minutes, ..
            } => assert_eq!(overtime_minutes, Some(12)),
            other => panic!("expected a check-out event, got {:?}", other),
        }
    }

    #[actix_web::test]
    async fn staff_check_in_flags_lateness() {
        let store = MemoryStore::new();
        let dir = MemoryDirectory::new();
        dir.enroll(Cohort::Staff, "t1", "Mr. Boateng");
        let ledger = Ledger::new(Cohort::Staff, &store, &dir);

        let (record, _) = ledger.toggle("t1", None, june1(6, 10, 0)).await.unwrap();
        assert_eq!(record.is_late, Some(false));

        ledger.toggle("t1", None, june1(14, 0, 0)).await.unwrap();
        let (record, _) = ledger.toggle("t1", None, june1(7, 30, 0)).await.unwrap();
        assert_eq!(record.is_late, Some(true));
        // the staff policy never produces overtime
        assert_eq!(record.overtime_minutes, None);
    }

    #[actix_web::test]
    async fn missing_acting_user_falls_back_to_sentinel() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        let (record, _) = ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();
        assert_eq!(record.check_in_actor.as_deref(), Some(UNKNOWN));

        let (record, _) = ledger.toggle("s1", Some("  "), june1(9, 0, 0)).await.unwrap();
        assert_eq!(record.check_out_actor.as_deref(), Some(UNKNOWN));
    }

    #[actix_web::test]
    async fn unknown_person_is_recorded_under_fallback_name() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        let (_, event) = ledger.toggle("ghost", None, june1(8, 0, 0)).await.unwrap();
        match event {
            TransitionEvent::CheckedIn { display_name, .. } => assert_eq!(display_name, UNKNOWN),
            other => panic!("expected a check-in event, got {:?}", other),
        }

        ledger.toggle("ghost", None, june1(9, 0, 0)).await.unwrap();
        let outcome = ledger.archive_closed_records(today()).await.unwrap();
        assert_eq!(
            outcome,
            ArchiveOutcome::Archived {
                date: today(),
                archived: 1
            }
        );
        let days = ledger.query_history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(days[0].records[0].display_name, UNKNOWN);
    }

    #[actix_web::test]
    async fn archive_skips_untouched_and_still_checked_in_records() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        // s1 completes a cycle, s2 is still in, s3 never appeared
        ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();
        ledger.toggle("s1", None, june1(16, 0, 0)).await.unwrap();
        ledger.toggle("s2", None, june1(8, 30, 0)).await.unwrap();

        let outcome = ledger.archive_closed_records(today()).await.unwrap();
        assert_eq!(
            outcome,
            ArchiveOutcome::Archived {
                date: today(),
                archived: 1
            }
        );

        let days = ledger.query_history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].records.len(), 1);
        assert_eq!(days[0].records[0].person_id, "s1");

        // s2 is untouched by the reset and still checked in
        let board = ledger.board().await.unwrap();
        let s2 = board.open.iter().find(|e| e.person_id == "s2").unwrap();
        assert_eq!(s2.record.status, AttendanceStatus::CheckedIn);
    }

    #[actix_web::test]
    async fn archive_with_no_closed_records_is_a_noop() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();

        let outcome = ledger.archive_closed_records(today()).await.unwrap();
        assert_eq!(outcome, ArchiveOutcome::NothingToArchive);
        assert!(
            store
                .load(&Cohort::Nursery.archive_key())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[actix_web::test]
    async fn rearchiving_a_day_replaces_entries_per_person() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        // first round: s1 and s2 both close
        ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();
        ledger.toggle("s1", None, june1(18, 5, 0)).await.unwrap();
        ledger.toggle("s2", None, june1(8, 0, 0)).await.unwrap();
        ledger.toggle("s2", None, june1(15, 0, 0)).await.unwrap();
        ledger.archive_closed_records(today()).await.unwrap();

        // s1 comes back the same day and closes again
        ledger.toggle("s1", None, june1(18, 30, 0)).await.unwrap();
        ledger.toggle("s1", None, june1(18, 30, 0)).await.unwrap();
        ledger.archive_closed_records(today()).await.unwrap();

        let days = ledger.query_history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].records.len(), 2);

        let s1: Vec<_> = days[0]
            .records
            .iter()
            .filter(|e| e.person_id == "s1")
            .collect();
        assert_eq!(s1.len(), 1);
        // the newer closure won
        assert_eq!(s1[0].record.overtime_minutes, Some(30));
        assert!(days[0].records.iter().any(|e| e.person_id == "s2"));
    }

    #[actix_web::test]
    async fn archive_resets_live_records_to_the_default() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        ledger.toggle("s1", Some("teacher1"), june1(8, 0, 0)).await.unwrap();
        ledger.toggle("s1", Some("teacher1"), june1(18, 12, 0)).await.unwrap();
        ledger.archive_closed_records(today()).await.unwrap();

        let board = ledger.board().await.unwrap();
        let s1 = board.open.iter().find(|e| e.person_id == "s1").unwrap();
        assert_eq!(s1.record, AttendanceRecord::default());
        assert!(board.departed.is_empty());
    }

    #[actix_web::test]
    async fn board_partitions_open_and_departed() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap();
        ledger.toggle("s1", None, june1(16, 0, 0)).await.unwrap();
        ledger.toggle("s2", None, june1(8, 30, 0)).await.unwrap();
        // a record surviving from before an unenrollment
        ledger.toggle("stray", None, june1(9, 0, 0)).await.unwrap();

        let board = ledger.board().await.unwrap();

        let departed: Vec<_> = board.departed.iter().map(|e| e.person_id.as_str()).collect();
        assert_eq!(departed, vec!["s1"]);

        let open: Vec<_> = board.open.iter().map(|e| e.person_id.as_str()).collect();
        // sorted by display name: Esi (untouched), Kofi (checked in), then the stray
        assert_eq!(open, vec!["s3", "s2", "stray"]);
        let stray = board.open.iter().find(|e| e.person_id == "stray").unwrap();
        assert_eq!(stray.display_name, UNKNOWN);
    }

    #[actix_web::test]
    async fn corrupt_status_document_surfaces_as_an_error() {
        let (store, dir) = nursery_roster();
        store
            .save(
                &Cohort::Nursery.statuses_key(),
                serde_json::json!("not a board"),
            )
            .await
            .unwrap();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        let err = ledger.toggle("s1", None, june1(8, 0, 0)).await.unwrap_err();
        assert!(matches!(err, LedgerError::CorruptDocument { .. }));
    }

    #[actix_web::test]
    async fn full_day_flow_for_one_child() {
        let (store, dir) = nursery_roster();
        let ledger = Ledger::new(Cohort::Nursery, &store, &dir);

        let (record, _) = ledger
            .toggle("s1", Some("teacher1"), june1(8, 0, 0))
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::CheckedIn);
        assert_eq!(record.check_in_time, Some(june1(8, 0, 0)));
        assert_eq!(record.check_in_actor.as_deref(), Some("teacher1"));

        let (record, _) = ledger
            .toggle("s1", Some("teacher1"), june1(18, 12, 0))
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::CheckedOut);
        assert_eq!(record.check_out_time, Some(june1(18, 12, 0)));
        assert_eq!(record.overtime_minutes, Some(12));

        let outcome = ledger.archive_closed_records(today()).await.unwrap();
        assert_eq!(
            outcome,
            ArchiveOutcome::Archived {
                date: today(),
                archived: 1
            }
        );

        let days = ledger.query_history(&HistoryFilter::default()).await.unwrap();
        assert_eq!(days[0].date, today());
        let ama = &days[0].records[0];
        assert_eq!(ama.person_id, "s1");
        assert_eq!(ama.display_name, "Ama");
        assert_eq!(ama.record.overtime_minutes, Some(12));

        let board = ledger.board().await.unwrap();
        let live = board.open.iter().find(|e| e.person_id == "s1").unwrap();
        assert_eq!(live.record, AttendanceRecord::default());
    }

    mod filtering {
        use super::*;

        fn entry(person_id: &str, overtime: Option<u32>) -> ArchivedEntry {
            let mut record = AttendanceRecord::default();
            record.check_in_time = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0);
            record.check_out_time = NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(17, 0, 0);
            record.overtime_minutes = overtime;
            ArchivedEntry {
                person_id: person_id.to_string(),
                display_name: person_id.to_uppercase(),
                record,
            }
        }

        fn day(date: (i32, u32, u32), entries: Vec<ArchivedEntry>) -> ArchivedDay {
            ArchivedDay {
                date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
                records: entries,
            }
        }

        #[test]
        fn date_range_keeps_or_drops_whole_days() {
            let days = vec![
                day((2024, 1, 5), vec![entry("s1", None), entry("s2", Some(4))]),
                day((2024, 1, 1), vec![entry("s1", Some(9))]),
            ];
            let filter = HistoryFilter {
                from: NaiveDate::from_ymd_opt(2024, 1, 2),
                to: NaiveDate::from_ymd_opt(2024, 1, 10),
                ..HistoryFilter::default()
            };

            let out = filter_days(days, &filter);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
            // the surviving day is returned whole
            assert_eq!(out[0].records.len(), 2);
        }

        #[test]
        fn person_filter_narrows_records_and_drops_emptied_days() {
            let days = vec![
                day((2024, 1, 5), vec![entry("s2", None)]),
                day((2024, 1, 1), vec![entry("s1", Some(9)), entry("s2", None)]),
            ];
            let filter = HistoryFilter {
                person_id: Some("s1".to_string()),
                ..HistoryFilter::default()
            };

            let out = filter_days(days, &filter);
            assert_eq!(out.len(), 1);
            assert_eq!(out[0].date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
            assert_eq!(out[0].records.len(), 1);
        }

        #[test]
        fn overtime_predicates_split_on_zero_and_unset() {
            let days = vec![day(
                (2024, 1, 1),
                vec![entry("s1", Some(9)), entry("s2", Some(0)), entry("s3", None)],
            )];

            let with = filter_days(
                days.clone(),
                &HistoryFilter {
                    overtime: Some(OvertimeFilter::With),
                    ..HistoryFilter::default()
                },
            );
            assert_eq!(with[0].records.len(), 1);
            assert_eq!(with[0].records[0].person_id, "s1");

            let without = filter_days(
                days,
                &HistoryFilter {
                    overtime: Some(OvertimeFilter::Without),
                    ..HistoryFilter::default()
                },
            );
            assert_eq!(without[0].records.len(), 2);
        }

        #[test]
        fn unfiltered_query_preserves_newest_first_order() {
            let days = vec![
                day((2024, 1, 5), vec![entry("s1", None)]),
                day((2024, 1, 1), vec![entry("s1", None)]),
            ];
            let out = filter_days(days, &HistoryFilter::default());
            assert_eq!(out.len(), 2);
            assert!(out[0].date > out[1].date);
        }
    }
}
