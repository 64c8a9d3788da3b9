// crates/branchfinder-web/src/page.rs

//! Server-side HTML for the single page. Everything user-supplied or read
//! from the dataset goes through [`escape`].

use branchfinder_core::{BranchRecord, History, MapPoint, OutcomeKind, Place, SearchOutcome};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Warning,
}

/// A message shown once on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub text: String,
}

impl Flash {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            text: text.into(),
        }
    }
}

pub struct PageContext<'a> {
    pub country: &'a str,
    pub branches: usize,
    pub dataset_error: Option<&'a str>,
    pub flash: Option<&'a Flash>,
    pub history: &'a History,
}

const STYLE: &str = "\
body{font-family:sans-serif;margin:0}\
.layout{display:flex;min-height:100vh}\
aside{width:34%;background:#f4f5f7;padding:1rem;overflow:auto}\
main{flex:1;padding:1rem 2rem}\
.banner{padding:.6rem 1rem;border-radius:4px;margin:.5rem 0}\
.success{background:#e3f6e8}.warning{background:#fff4d6}.error{background:#fde2e1}.info{background:#e4eefb}\
table{border-collapse:collapse;margin:.5rem 0}td,th{border:1px solid #ccc;padding:.2rem .5rem;font-size:.9em}\
.suggestion{display:flex;gap:1rem;align-items:center}";

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render(ctx: &PageContext<'_>) -> String {
    let country = escape(ctx.country);
    let mut out = String::new();
    let _ = write!(
        out,
        "<!doctype html><html><head><meta charset=\"utf-8\">\
         <title>Branch Finder ({country} Only)</title><style>{STYLE}</style></head><body>\
         <div class=\"layout\"><main><h1>🏦 Branch Finder ({country} Only)</h1>"
    );

    match ctx.dataset_error {
        Some(err) => {
            let _ = write!(out, "<div class=\"banner error\">❌ {}</div>", escape(err));
        }
        None => {
            let _ = write!(
                out,
                "<div class=\"banner success\">✅ Dataset loaded successfully ({country} only)! {} branches.</div>",
                ctx.branches
            );
        }
    }

    if let Some(flash) = ctx.flash {
        let class = match flash.level {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
        };
        let _ = write!(out, "<div class=\"banner {class}\">{}</div>", escape(&flash.text));
    }

    let disabled = if ctx.dataset_error.is_some() { " disabled" } else { "" };
    let _ = write!(
        out,
        "<form method=\"post\" action=\"/search\">\
         <label>🔎 Enter a state, city, or branch name: \
         <input type=\"text\" name=\"query\" autofocus{disabled}></label> \
         <button type=\"submit\"{disabled}>Search</button></form>"
    );

    if let Some(latest) = ctx.history.last() {
        out.push_str("<section>");
        out.push_str(&outcome(latest, true));
        out.push_str("</section>");
    }
    out.push_str("</main>");

    out.push_str(&sidebar(ctx.history));
    out.push_str("</div></body></html>");
    out
}

fn sidebar(history: &History) -> String {
    let mut out = String::from(
        "<aside><h2>🕘 Search History with Results</h2>\
         <form method=\"post\" action=\"/clear\"><button type=\"submit\">🗑️ Clear History</button></form>",
    );
    if history.is_empty() {
        out.push_str(
            "<div class=\"banner info\">No searches yet. Start by entering a location above!</div>",
        );
    }
    for (i, o) in history.iter_recent_first() {
        let _ = write!(out, "<h3>{i}. {}</h3>", escape(&o.query));
        out.push_str(&outcome(o, false));
        out.push_str("<hr>");
    }
    out.push_str("</aside>");
    out
}

/// Status, suggestions and tables for one outcome. Suggestion buttons only
/// make sense for the latest result, so the sidebar leaves them out.
fn outcome(o: &SearchOutcome, interactive: bool) -> String {
    let mut out = String::new();
    if let Some(note) = &o.note {
        let _ = write!(out, "<div class=\"banner info\">🔄 {}</div>", escape(note));
    }
    let (class, marker) = match o.kind {
        OutcomeKind::AutoCorrected => ("success", "🏦"),
        OutcomeKind::Suggestions => ("warning", "⚠️"),
        OutcomeKind::Remote => ("info", "🌍"),
        OutcomeKind::NoResults => ("error", "❌"),
    };
    let _ = write!(
        out,
        "<div class=\"banner {class}\">{marker} {}</div>",
        escape(&o.status)
    );

    for (i, s) in o.suggestions.iter().enumerate() {
        let text = escape(&s.text);
        let _ = write!(
            out,
            "<div class=\"suggestion\"><span>{}. <b>{text}</b> (confidence: {:.0}%)</span>",
            i + 1,
            s.score
        );
        if interactive {
            let _ = write!(
                out,
                "<form method=\"post\" action=\"/search\">\
                 <input type=\"hidden\" name=\"query\" value=\"{text}\">\
                 <button type=\"submit\">Search '{text}'</button></form>"
            );
        }
        out.push_str("</div>");
    }

    if !o.rows().is_empty() {
        out.push_str(&branch_table(o.rows()));
    }
    if !o.places().is_empty() {
        out.push_str(&place_table(o.places()));
    }
    if o.kind == OutcomeKind::AutoCorrected {
        out.push_str(&point_list(&o.map_points()));
    }
    out
}

fn branch_table(rows: &[BranchRecord]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.fields.iter().map(|(k, _)| k.as_str()).collect();
    let mut out = String::from("<table><tr>");
    for h in &headers {
        let _ = write!(out, "<th>{}</th>", escape(h));
    }
    out.push_str("</tr>");
    for row in rows {
        out.push_str("<tr>");
        for h in &headers {
            let _ = write!(out, "<td>{}</td>", escape(row.get(h).unwrap_or("")));
        }
        out.push_str("</tr>");
    }
    out.push_str("</table>");
    out
}

fn place_table(places: &[Place]) -> String {
    let mut out = String::from("<table><tr><th>Name</th><th>Lat</th><th>Lon</th><th></th></tr>");
    for p in places {
        let _ = write!(
            out,
            "<tr><td>{}</td><td>{:.5}</td><td>{:.5}</td><td>{}</td></tr>",
            escape(&p.label),
            p.latitude,
            p.longitude,
            map_link(p.latitude, p.longitude)
        );
    }
    out.push_str("</table>");
    out
}

fn point_list(points: &[MapPoint]) -> String {
    if points.is_empty() {
        return String::new();
    }
    let mut out = String::from("<ul class=\"map\">");
    for p in points {
        let _ = write!(
            out,
            "<li>{} ({:.5}, {:.5}) {}</li>",
            escape(&p.label),
            p.latitude,
            p.longitude,
            map_link(p.latitude, p.longitude)
        );
    }
    out.push_str("</ul>");
    out
}

fn map_link(lat: f64, lon: f64) -> String {
    format!(
        "<a href=\"https://www.openstreetmap.org/?mlat={lat:.5}&amp;mlon={lon:.5}#map=16/{lat:.5}/{lon:.5}\" target=\"_blank\">map</a>"
    )
}
