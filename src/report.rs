//! Static report output: `index.html` plus `data/games_by_day.json`

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::{Result, RunOutput, ScoredGame};

pub const HTML_FILE: &str = "index.html";
pub const JSON_FILE: &str = "data/games_by_day.json";

const STYLE: &str = r#"
    body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 24px; max-width: 980px; }
    h1 { margin: 0 0 8px 0; }
    .sub { color: #444; margin-bottom: 18px; }
    .day { margin: 24px 0 34px 0; }
    h2 { margin: 0 0 12px 0; padding-top: 8px; border-top: 1px solid #eee; }
    .card { border: 1px solid #ddd; border-radius: 12px; padding: 14px 16px; margin: 12px 0; }
    .matchup { font-size: 18px; font-weight: 700; }
    .meta { margin-top: 6px; color: #333; }
    .reason { margin-top: 10px; color: #222; line-height: 1.35; }
    .empty { color: #666; }
    .controls { display: flex; gap: 10px; align-items: center; margin: 14px 0 24px 0; flex-wrap: wrap; }
    select, button { padding: 8px 10px; border-radius: 10px; border: 1px solid #ccc; background: #fff; }
    button { cursor: pointer; }
    .footer { margin-top: 26px; color: #666; font-size: 12px; }
"#;

/// Browser side of the favorite selector. Cards carry `data-base-score` and the
/// normalized team keys; picking a team re-applies `data-bump` to its games and
/// re-orders each day, ties keeping the server order. The choice is kept in
/// localStorage.
const SCRIPT: &str = r#"
(function () {
  var STORAGE_KEY = "watchlist.favorite";
  var select = document.getElementById("favoriteSelect");
  var reset = document.getElementById("resetBtn");
  var content = document.getElementById("content");
  var bump = parseInt(content.getAttribute("data-bump"), 10) || 0;

  function hasOption(value) {
    return Array.prototype.some.call(select.options, function (o) { return o.value === value; });
  }

  function apply(favorite) {
    Array.prototype.forEach.call(content.querySelectorAll("section.day"), function (day) {
      var cards = Array.prototype.slice.call(day.querySelectorAll(".card"));
      cards.forEach(function (card) {
        var score = parseInt(card.getAttribute("data-default-score"), 10);
        if (favorite) {
          score = parseInt(card.getAttribute("data-base-score"), 10);
          if (card.getAttribute("data-away") === favorite || card.getAttribute("data-home") === favorite) {
            score += bump;
          }
        }
        card.setAttribute("data-score", String(score));
      });
      cards.sort(function (a, b) {
        return (parseInt(b.getAttribute("data-score"), 10) - parseInt(a.getAttribute("data-score"), 10)) ||
          (parseInt(a.getAttribute("data-order"), 10) - parseInt(b.getAttribute("data-order"), 10));
      });
      cards.forEach(function (card) { day.appendChild(card); });
    });
  }

  function remember(value) {
    try {
      if (value) { localStorage.setItem(STORAGE_KEY, value); } else { localStorage.removeItem(STORAGE_KEY); }
    } catch (e) {}
  }

  var stored = "";
  try { stored = localStorage.getItem(STORAGE_KEY) || ""; } catch (e) {}
  if (!hasOption(stored)) { stored = ""; }
  select.value = stored;
  apply(stored);

  select.addEventListener("change", function () {
    remember(select.value);
    apply(select.value);
  });
  reset.addEventListener("click", function () {
    select.value = "";
    remember("");
    apply("");
  });
})();
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
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

/// Start time in the reference zone, e.g. "5:00 PM MDT"
pub fn format_local_time(start: DateTime<Utc>, tz: Tz) -> String {
    start.with_timezone(&tz).format("%-I:%M %p %Z").to_string()
}

fn render_card(html: &mut String, game: &ScoredGame, order: usize, tz: Tz) {
    let mut meta = format_local_time(game.start_utc, tz);
    if !game.broadcast.is_empty() {
        meta.push_str(" · ");
        meta.push_str(&game.broadcast);
    }

    html.push_str(&format!(
        r#"
      <div class="card" data-kind="{kind}" data-score="{score}" data-default-score="{score}" data-base-score="{base}" data-away="{away}" data-home="{home}" data-order="{order}">
        <div class="matchup">{matchup}</div>
        <div class="meta">{meta}</div>
        <div class="reason">{reason}</div>
      </div>"#,
        kind = game.kind.slug(),
        score = game.score,
        base = game.base_score,
        away = escape_html(&game.away_key),
        home = escape_html(&game.home_key),
        order = order,
        matchup = escape_html(&game.matchup()),
        meta = escape_html(&meta),
        reason = escape_html(&game.reason),
    ));
}

/// Display names of the configured favorites, e.g. "Virginia" or "LSU, Ole Miss"
fn favorites_label(output: &RunOutput) -> String {
    if output.favorites.is_empty() {
        return "none".to_string();
    }

    output
        .favorites
        .iter()
        .map(|key| {
            output
                .teams
                .iter()
                .find(|t| t.key == *key)
                .map_or(key.as_str(), |t| t.name.as_str())
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_controls(output: &RunOutput) -> String {
    let default_label = escape_html(&favorites_label(output));

    let mut options = format!(
        r#"
      <option value="">Configured ({})</option>"#,
        default_label
    );
    for team in &output.teams {
        options.push_str(&format!(
            r#"
      <option value="{}">{}</option>"#,
            escape_html(&team.key),
            escape_html(&team.label())
        ));
    }

    format!(
        r#"<div class="controls">
    <label for="favoriteSelect"><strong>Favorite team:</strong></label>
    <select id="favoriteSelect">{options}
    </select>
    <button id="resetBtn" type="button">Reset to default ({default_label})</button>
  </div>"#,
        options = options,
        default_label = default_label,
    )
}

/// Render the full page
pub fn render_html(output: &RunOutput, tz: Tz) -> String {
    let mut sections = String::new();

    for (date, games) in &output.days {
        sections.push_str(&format!(
            r#"
    <section class="day">
      <h2>{}</h2>"#,
            date.format("%A, %B %-d, %Y")
        ));

        if games.is_empty() {
            sections.push_str(
                r#"
      <div class="empty">No ranked games found (or rankings didn&#39;t match).</div>"#,
            );
        }
        for (order, game) in games.iter().enumerate() {
            render_card(&mut sections, game, order, tz);
        }

        sections.push_str("\n    </section>");
    }

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>College Baseball Watchlist</title>
  <style>{style}</style>
</head>
<body>
  <h1>Top Ranked College Baseball Games ({days}-Day Lookahead)</h1>
  <div class="sub">Generated {generated} · Times shown in {zone}</div>
  {controls}
  <div id="content" data-bump="{bump}">{sections}
  </div>
  <div class="footer">
    Rankings-driven. Only games with at least one ranked team are eligible.
    The favorite-team bump persists in your browser and re-orders the games listed
    for each day; it cannot bring back a game that was cut from a day.
  </div>
  <script>{script}</script>
</body>
</html>
"#,
        style = STYLE,
        days = output.days.len(),
        generated = output.generated_at.format("%Y-%m-%dT%H:%M:%SZ"),
        zone = escape_html(tz.name()),
        controls = render_controls(output),
        bump = output.favorite_team_bump,
        sections = sections,
        script = SCRIPT,
    )
}

pub fn render_json(output: &RunOutput) -> Result<String> {
    Ok(serde_json::to_string_pretty(output)?)
}

/// Write both artifacts under `dir`, returning the paths written
pub fn write_report<P: AsRef<Path>>(output: &RunOutput, tz: Tz, dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let html_path = dir.join(HTML_FILE);
    let json_path = dir.join(JSON_FILE);

    if let Some(parent) = json_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(&json_path, render_json(output)?)?;
    log::debug!("Wrote {}", json_path.display());
    std::fs::write(&html_path, render_html(output, tz))?;
    log::debug!("Wrote {}", html_path.display());

    Ok(vec![html_path, json_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MatchupKind, TeamOption};
    use chrono::{NaiveDate, TimeZone};
    use std::collections::BTreeMap;

    fn make_output() -> RunOutput {
        let game = ScoredGame {
            id: "401700001".to_string(),
            away: "Virginia".to_string(),
            home: "Texas A&M".to_string(),
            away_rank: Some(5),
            home_rank: Some(18),
            start_utc: Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap(),
            broadcast: "ESPN2".to_string(),
            score: 53,
            base_score: 49,
            away_key: "virginia".to_string(),
            home_key: "texas a&m".to_string(),
            kind: MatchupKind::Top25Matchup,
            reason: "Top-25 matchup <live>".to_string(),
        };

        let mut days = BTreeMap::new();
        days.insert(NaiveDate::from_ymd_opt(2026, 3, 6).unwrap(), vec![game]);
        days.insert(NaiveDate::from_ymd_opt(2026, 3, 7).unwrap(), vec![]);

        RunOutput {
            generated_at: Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap(),
            timezone: "America/Denver".to_string(),
            favorite_team_bump: 4,
            favorites: vec!["virginia".to_string()],
            teams: vec![
                TeamOption {
                    key: "virginia".to_string(),
                    name: "Virginia".to_string(),
                    rank: Some(5),
                },
                TeamOption {
                    key: "texas a&m".to_string(),
                    name: "Texas A&M".to_string(),
                    rank: Some(18),
                },
            ],
            days,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("A&M <b>\"x\"</b>"), "A&amp;M &lt;b&gt;&quot;x&quot;&lt;/b&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_local_time() {
        let start = Utc.with_ymd_and_hms(2026, 3, 7, 0, 0, 0).unwrap();
        assert_eq!(format_local_time(start, chrono_tz::America::Denver), "5:00 PM MST");

        // after the March DST change
        let start = Utc.with_ymd_and_hms(2026, 3, 20, 0, 30, 0).unwrap();
        assert_eq!(format_local_time(start, chrono_tz::America::Denver), "6:30 PM MDT");
    }

    #[test]
    fn test_render_html() {
        let html = render_html(&make_output(), chrono_tz::America::Denver);

        assert!(html.contains("(2-Day Lookahead)"));
        assert!(html.contains("Friday, March 6, 2026"));
        assert!(html.contains("#5 Virginia @ #18 Texas A&amp;M"));
        assert!(html.contains("5:00 PM MST · ESPN2"));
        assert!(html.contains("Top-25 matchup &lt;live&gt;"));
        assert!(html.contains(r#"data-kind="top25_matchup""#));
        assert!(html.contains("No ranked games found"));
        assert!(html.contains("Generated 2026-03-05T12:00:00Z"));
    }

    #[test]
    fn test_favorite_selector() {
        let html = render_html(&make_output(), chrono_tz::America::Denver);

        assert!(html.contains(r#"<select id="favoriteSelect">"#));
        assert!(html.contains(r#"<option value="">Configured (Virginia)</option>"#));
        assert!(html.contains(r#"<option value="texas a&amp;m">#18 Texas A&amp;M</option>"#));
        assert!(html.contains("Reset to default (Virginia)"));
        assert!(html.contains(r#"<div id="content" data-bump="4">"#));
        assert!(html.contains(
            r#"data-score="53" data-default-score="53" data-base-score="49" data-away="virginia" data-home="texas a&amp;m" data-order="0""#
        ));
        assert!(html.contains("localStorage"));
    }

    #[test]
    fn test_favorites_label() {
        let mut output = make_output();
        output.favorites = vec!["texas a&m".to_string(), "oregon".to_string()];
        assert_eq!(favorites_label(&output), "Texas A&M, oregon");

        output.favorites.clear();
        assert_eq!(favorites_label(&output), "none");
    }

    #[test]
    fn test_write_report() {
        let dir = std::env::temp_dir().join(format!("watchlist-report-{}", std::process::id()));
        let paths = write_report(&make_output(), chrono_tz::America::Denver, &dir).unwrap();

        assert_eq!(paths.len(), 2);
        let json = std::fs::read_to_string(dir.join(JSON_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let game = &value["days"]["2026-03-06"][0];
        assert_eq!(game["score"], 53);
        assert_eq!(game["base_score"], 49);
        assert_eq!(game["away_key"], "virginia");
        assert_eq!(value["favorite_team_bump"], 4);
        assert_eq!(value["teams"][1]["key"], "texas a&m");
        assert!(dir.join(HTML_FILE).exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
