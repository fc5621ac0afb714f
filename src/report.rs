//! Raporty: tekst do konsoli i embedy Discorda.

use serenity::all::{Colour, CreateEmbed, CreateEmbedFooter};

use crate::achievements::Reconciliation;
use crate::roster::{Delta, RosterComparison};
use crate::store::CURRENT;

pub const SYSTEM_NAME: &str = "ALLIANCE Tracker";

/// Limit znaków pola embeda po stronie Discorda.
const FIELD_LIMIT: usize = 1024;

const COLOUR_UP: u32 = 0x2ECC71;
const COLOUR_DOWN: u32 = 0xE74C3C;
const COLOUR_FLAT: u32 = 0x95A5A6;
const COLOUR_ACHIEVERS: u32 = 0xF1C40F;

/// Kolejność do wyświetlania: największa zmiana (co do modułu) pierwsza, remisy bez zmian.
pub fn sorted_by_magnitude(changes: &[Delta]) -> Vec<Delta> {
    let mut out = changes.to_vec();
    out.sort_by_key(|d| std::cmp::Reverse(d.delta.unsigned_abs()));
    out
}

pub fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{delta}")
    } else {
        delta.to_string()
    }
}

fn since_text(label: &str) -> String {
    if label == CURRENT {
        return "od ostatniego snapshotu".to_string();
    }
    match (label.get(..2), label.get(2..)) {
        (Some(h), Some(m)) if label.len() == 4 => format!("od {h}:{m}"),
        _ => format!("od {label}"),
    }
}

pub fn delta_lines(cmp: &RosterComparison) -> Vec<String> {
    sorted_by_magnitude(&cmp.changes)
        .iter()
        .map(|d| format!("`{}` {}", format_delta(d.delta), d.nickname))
        .collect()
}

/// Skleja linie, dopóki mieszczą się w limicie; resztę zastępuje dopiskiem „… i N więcej”.
pub fn clamp_lines(lines: &[String], limit: usize) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let rest = lines.len() - i;
        let tail = format!("… i {rest} więcej");
        let needed = out.len() + line.len() + 1;
        // zostaw miejsce na dopisek, jeśli po tej linii coś jeszcze zostanie
        let reserve = if rest > 1 { tail.len() + 1 } else { 0 };
        if needed + reserve > limit {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&tail);
            return out;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }
    out
}

/// Tekstowy raport (CLI).
pub fn delta_text(label: &str, cmp: &RosterComparison) -> String {
    let mut out = format!(
        "Zmiana punktów klanu {}: {}\n",
        since_text(label),
        format_delta(cmp.total_delta)
    );
    if cmp.changes.is_empty() {
        out.push_str("Brak zmian.\n");
    }
    for line in delta_lines(cmp) {
        out.push_str(&line.replace('`', ""));
        out.push('\n');
    }
    out
}

pub fn delta_embed(label: &str, cmp: &RosterComparison) -> CreateEmbed {
    let colour = match cmp.total_delta {
        d if d > 0 => COLOUR_UP,
        d if d < 0 => COLOUR_DOWN,
        _ => COLOUR_FLAT,
    };
    let players = if cmp.changes.is_empty() {
        "Brak zmian.".to_string()
    } else {
        clamp_lines(&delta_lines(cmp), FIELD_LIMIT)
    };

    CreateEmbed::new()
        .title("📈 Zmiana punktów klanu")
        .description(since_text(label))
        .colour(Colour::new(colour))
        .field("Suma", format!("`{}`", format_delta(cmp.total_delta)), true)
        .field("Graczy ze zmianą", cmp.changes.len().to_string(), true)
        .field("Gracze", players, false)
        .footer(CreateEmbedFooter::new(SYSTEM_NAME))
}

pub fn achievers_text(rec: &Reconciliation, threshold: u64) -> String {
    let mut out = format!(
        "Osiągnięcie {threshold}+ pkt: {} zdobywców ({} nowych)\n",
        rec.achievers.len(),
        rec.newly_added.len()
    );
    for id in &rec.newly_added {
        out.push_str(&format!("+ {id}\n"));
    }
    if !rec.unresolved.is_empty() {
        out.push_str("Nierozpoznani (brak w rejestrze):\n");
        for e in &rec.unresolved {
            out.push_str(&format!("? {} ({} pkt)\n", e.nickname, e.points));
        }
    }
    out
}

pub fn achievers_embed(rec: &Reconciliation, threshold: u64) -> CreateEmbed {
    let new_lines: Vec<String> = rec.newly_added.iter().map(|id| format!("<@{id}>")).collect();
    let unresolved_lines: Vec<String> = rec
        .unresolved
        .iter()
        .map(|e| format!("`{}` – {} pkt", e.nickname, e.points))
        .collect();

    let mut embed = CreateEmbed::new()
        .title("🏆 Osiągnięcie sezonu")
        .description(format!("Próg: **{threshold}** pkt"))
        .colour(Colour::new(COLOUR_ACHIEVERS))
        .field("Zdobywców łącznie", rec.achievers.len().to_string(), true)
        .field("Nowi", rec.newly_added.len().to_string(), true)
        .footer(CreateEmbedFooter::new(SYSTEM_NAME));

    if !new_lines.is_empty() {
        embed = embed.field("Nowi zdobywcy", clamp_lines(&new_lines, FIELD_LIMIT), false);
    }
    if !unresolved_lines.is_empty() {
        embed = embed.field(
            "Do ręcznego sprawdzenia",
            clamp_lines(&unresolved_lines, FIELD_LIMIT),
            false,
        );
    }
    embed
}
