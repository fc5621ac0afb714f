use std::sync::Arc;

use chrono::{NaiveTime, Timelike};

use crate::achievements::{self, Reconciliation};
use crate::error::{Error, Result};
use crate::roster::{RosterComparison, RosterEntry, compare_rosters};
use crate::store::{self, CURRENT, SnapshotStore};

/// Etykieta godzinowa `HHMM`, np. 09:05 → `"0905"`.
pub fn time_label(at: NaiveTime) -> String {
    format!("{:02}{:02}", at.hour(), at.minute())
}

/// Dozwolone etykiety: `current` albo poprawna godzina `HHMM`.
pub fn parse_label(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case(CURRENT) {
        return Ok(CURRENT.to_string());
    }
    let valid = raw.len() == 4
        && raw.bytes().all(|b| b.is_ascii_digit())
        && NaiveTime::parse_from_str(raw, "%H%M").is_ok();
    if valid {
        Ok(raw.to_string())
    } else {
        Err(Error::InvalidLabel(raw.to_string()))
    }
}

/// Zapis snapshotów i liczenie różnic na wstrzykniętym magazynie.
#[derive(Clone)]
pub struct Tracker {
    store: Arc<dyn SnapshotStore>,
}

impl Tracker {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    /// Nowy ranking ze scrapera → `current` + etykieta godzinowa. Zwraca etykietę.
    pub fn record(&self, roster: &[RosterEntry], at: NaiveTime) -> Result<String> {
        let label = time_label(at);
        store::save_roster(self.store(), roster, CURRENT)?;
        store::save_roster(self.store(), roster, &label)?;
        tracing::info!(label = %label, entries = roster.len(), "roster recorded");
        Ok(label)
    }

    /// Różnica między snapshotem `label` a `current`. `current` sam ze sobą → `InvalidLabel`.
    pub fn delta_since(&self, label: &str) -> Result<RosterComparison> {
        let label = parse_label(label)?;
        if label == CURRENT {
            return Err(Error::InvalidLabel(label));
        }
        let previous = store::load_roster(self.store(), &label)?;
        let current = store::load_roster(self.store(), CURRENT)?;
        let cmp = compare_rosters(&previous, &current);
        tracing::info!(
            label = %label,
            previous = previous.len(),
            current = current.len(),
            changes = cmp.changes.len(),
            total_delta = cmp.total_delta,
            "delta computed"
        );
        Ok(cmp)
    }

    /// `current` + rejestr członków + zbiór sezonu → zapisany, powiększony zbiór.
    pub fn sync_achievers(&self, threshold: u64, season: &str) -> Result<Reconciliation> {
        let roster = store::load_roster(self.store(), CURRENT)?;
        let registry = achievements::load_registry(self.store())?;
        let existing = achievements::load_achievers(self.store(), season)?;

        let rec = achievements::reconcile_achievers(&roster, threshold, &registry, &existing);
        achievements::save_achievers(self.store(), season, &rec.achievers)?;

        tracing::info!(
            season,
            threshold,
            total = rec.achievers.len(),
            added = rec.newly_added.len(),
            unresolved = rec.unresolved.len(),
            "achievers synced"
        );
        Ok(rec)
    }
}
