use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize_for_comparison;

/// Jeden wiersz rankingu klanu: nick (tak jak wyświetla go strona) + punkty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    #[serde(rename = "nick")]
    pub nickname: String,
    pub points: u64,
}

impl RosterEntry {
    pub fn new(nickname: impl Into<String>, points: u64) -> Self {
        Self {
            nickname: nickname.into(),
            points,
        }
    }
}

/// Kolejność = kolejność scrapowania.
pub type Roster = Vec<RosterEntry>;

/// Zmiana punktów jednego gracza między dwoma snapshotami.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Nick w formie z aktualnego snapshotu.
    #[serde(rename = "nick")]
    pub nickname: String,
    pub delta: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterComparison {
    pub total_delta: i64,
    pub changes: Vec<Delta>,
}

/// Mapa `klucz → wpis` w kolejności pierwszego wystąpienia klucza.
///
/// Duplikat klucza nadpisuje wartość (wygrywa późniejszy wpis), ale nie zmienia pozycji.
pub fn index_by_comparison_key(roster: &[RosterEntry]) -> IndexMap<String, &RosterEntry> {
    let mut map = IndexMap::with_capacity(roster.len());
    for entry in roster {
        map.insert(normalize_for_comparison(&entry.nickname), entry);
    }
    map
}

/// Porównuje dwa snapshoty rankingu.
///
/// Liczą się tylko gracze obecni w obu snapshotach. Nowi gracze oraz ci, którzy odeszli,
/// nie wchodzą ani do `changes`, ani do `total_delta`. Zerowe zmiany są pomijane.
pub fn compare_rosters(previous: &[RosterEntry], current: &[RosterEntry]) -> RosterComparison {
    let previous = index_by_comparison_key(previous);
    let current = index_by_comparison_key(current);

    let mut out = RosterComparison::default();
    for (key, now) in &current {
        let Some(before) = previous.get(key) else {
            continue;
        };
        let delta = points_delta(before.points, now.points);
        if delta != 0 {
            out.total_delta = out.total_delta.saturating_add(delta);
            out.changes.push(Delta {
                nickname: now.nickname.clone(),
                delta,
            });
        }
    }
    out
}

fn points_delta(before: u64, now: u64) -> i64 {
    if now >= before {
        i64::try_from(now - before).unwrap_or(i64::MAX)
    } else {
        i64::try_from(before - now).map(|d| -d).unwrap_or(i64::MIN)
    }
}
