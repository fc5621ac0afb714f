//! Osiągnięcia sezonowe.
//! - próg punktowy (domyślnie 1600),
//! - nick z rankingu → id użytkownika przez rejestr członków (`members`),
//! - zestaw zdobywców tylko rośnie: raz zdobyte osiągnięcie zostaje na stałe.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::normalize::normalize_for_identity;
use crate::roster::RosterEntry;
use crate::store::{SnapshotStore, load_json, save_json};

pub const DEFAULT_THRESHOLD: u64 = 1600;

/// Klucz rejestru członków. Rejestr jest tylko do odczytu – utrzymuje go system członkostwa.
pub const MEMBERS_KEY: &str = "members";

/// Wpis rejestru członków. Pozostałe pola rekordu są ignorowane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub nick: String,
}

/// `id użytkownika → rekord`, w kolejności z pliku.
pub type IdentityRegistry = IndexMap<String, IdentityRecord>;

/// Posortowany zbiór id – serializuje się jako posortowana tablica JSON.
pub type AchieversSet = BTreeSet<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// Stary zbiór ∪ nowo rozpoznani.
    pub achievers: AchieversSet,
    /// Id, których wcześniej nie było w zbiorze.
    pub newly_added: Vec<String>,
    /// Gracze powyżej progu bez dopasowania w rejestrze.
    pub unresolved: Vec<RosterEntry>,
}

pub fn achievers_key(season: &str) -> String {
    format!("achievers/{season}")
}

/// `nick znormalizowany → id`. Przy duplikatach wygrywa późniejszy wpis rejestru.
pub fn index_registry(registry: &IdentityRegistry) -> HashMap<String, &str> {
    let mut map = HashMap::with_capacity(registry.len());
    for (id, record) in registry {
        map.insert(normalize_for_identity(&record.nick), id.as_str());
    }
    map
}

/// Łączy zdobywców z rankingu z dotychczasowym zbiorem. Nigdy niczego nie usuwa.
pub fn reconcile_achievers(
    roster: &[RosterEntry],
    threshold: u64,
    registry: &IdentityRegistry,
    existing: &AchieversSet,
) -> Reconciliation {
    let lookup = index_registry(registry);
    let mut out = Reconciliation {
        achievers: existing.clone(),
        ..Default::default()
    };

    for entry in roster.iter().filter(|e| e.points >= threshold) {
        let key = normalize_for_identity(&entry.nickname);
        match lookup.get(key.as_str()) {
            Some(id) => {
                if out.achievers.insert((*id).to_string()) {
                    out.newly_added.push((*id).to_string());
                }
            }
            None => {
                tracing::warn!(
                    nick = %entry.nickname,
                    points = entry.points,
                    "achievement: no registry match for qualifying player"
                );
                out.unresolved.push(entry.clone());
            }
        }
    }
    out
}

/* =========================
   I/O
   ========================= */

/// Brak rejestru = pusty rejestr (nikogo nie da się rozpoznać).
pub fn load_registry(store: &dyn SnapshotStore) -> Result<IdentityRegistry, StoreError> {
    Ok(load_json(store, MEMBERS_KEY)?.unwrap_or_default())
}

pub fn load_achievers(store: &dyn SnapshotStore, season: &str) -> Result<AchieversSet, StoreError> {
    let list: Option<Vec<String>> = load_json(store, &achievers_key(season))?;
    Ok(list.unwrap_or_default().into_iter().collect())
}

pub fn save_achievers(
    store: &dyn SnapshotStore,
    season: &str,
    achievers: &AchieversSet,
) -> Result<(), StoreError> {
    save_json(store, &achievers_key(season), achievers)
}
