// crates/branchfinder-cli/src/render.rs
use branchfinder_core::{BranchRecord, FinderError, History, MapPoint, OutcomeKind, Place, SearchOutcome};
use std::fmt::Write;

/// Renders one outcome the way the console prints it.
pub fn outcome(o: &SearchOutcome) -> String {
    let mut out = String::new();
    if let Some(note) = &o.note {
        let _ = writeln!(out, "🔄 {note}");
    }
    let marker = match o.kind {
        OutcomeKind::AutoCorrected => "🏦",
        OutcomeKind::Suggestions => "⚠️ ",
        OutcomeKind::Remote => "🌍",
        OutcomeKind::NoResults => "❌",
    };
    let _ = writeln!(out, "{marker} {}", o.status);

    for (i, s) in o.suggestions.iter().enumerate() {
        let _ = writeln!(out, "{}. {} (confidence: {:.0}%)", i + 1, s.text, s.score);
    }
    if !o.rows().is_empty() {
        out.push_str(&table(o.rows()));
    }
    if !o.places().is_empty() {
        out.push_str(&places(o.places()));
    }
    let points = match o.kind {
        OutcomeKind::AutoCorrected => o.map_points(),
        _ => Vec::new(),
    };
    if !points.is_empty() {
        out.push_str("Map points:\n");
        out.push_str(&map_points(&points));
    }
    out
}

/// Aligned text table of dataset rows, using the first row's columns.
pub fn table(rows: &[BranchRecord]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.fields.iter().map(|(k, _)| k.as_str()).collect();
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, h) in headers.iter().enumerate() {
            let len = row.get(h).unwrap_or("").chars().count();
            widths[i] = widths[i].max(len);
        }
    }

    let mut out = String::new();
    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };
    let _ = writeln!(out, "{}", line(headers.clone()));
    for row in rows {
        let cells = headers.iter().map(|h| row.get(h).unwrap_or("")).collect();
        let _ = writeln!(out, "{}", line(cells));
    }
    out
}

pub fn places(places: &[Place]) -> String {
    let mut out = String::new();
    for (i, p) in places.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} ({:.5}, {:.5})",
            i + 1,
            p.label,
            p.latitude,
            p.longitude
        );
    }
    out
}

pub fn map_points(points: &[MapPoint]) -> String {
    let mut out = String::new();
    for p in points {
        let _ = writeln!(out, "  - {} ({:.5}, {:.5})", p.label, p.latitude, p.longitude);
    }
    out
}

/// The one line printed before the process exits on a startup error.
pub fn fatal(e: &FinderError) -> String {
    format!("❌ {e}")
}

/// Numbered list of status lines, printed when the session ends.
pub fn history(h: &History) -> String {
    let mut out = String::from("Search history:\n");
    for (i, o) in h.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, o.status);
    }
    out
}
