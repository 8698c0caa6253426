use ncaa_predictor::{Bracket, DataWarning, Matchup, Prediction, Slot, Team};
use std::fmt::Write;

/// Width of one team line in the bracket listing.
pub const TEAM_LINE_WIDTH: usize = 34;

// ---------------------------------------------------------------------------
// Head-to-head prediction
// ---------------------------------------------------------------------------

pub fn render_prediction(prediction: &Prediction) -> String {
    let mut out = String::new();
    let (t1, t2) = (&prediction.team1, &prediction.team2);
    let _ = writeln!(out, "{} vs {} ({})", seeded_name(t1), seeded_name(t2), prediction.site_label());
    let _ = writeln!(out);
    let _ = writeln!(out, "  {:<24} {:>5.1}%", t1.name, prediction.team1_win_probability);
    let _ = writeln!(out, "  {:<24} {:>5.1}%", t2.name, prediction.team2_win_probability);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Predicted winner: {} ({:.1}%)",
        prediction.winner.name,
        prediction.winner_probability()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", stat_line(t1));
    let _ = write!(out, "{}", stat_line(t2));
    out
}

fn seeded_name(team: &Team) -> String {
    if team.seed > 0 {
        format!("({}) {}", team.seed, team.name)
    } else {
        team.name.clone()
    }
}

pub fn stat_line(team: &Team) -> String {
    format!(
        "{:<20} NetRtg {:>6.2}  ORtg {:>5.1}  DRtg {:>5.1}  Tempo {:>4.1}  Luck {:>6.3}  SOS {:>6.2}",
        team.name, team.net_rtg, team.off_rtg, team.def_rtg, team.adj_tempo, team.luck, team.sos
    )
}

// ---------------------------------------------------------------------------
// Bracket listing
// ---------------------------------------------------------------------------

/// Every round with both sides of each matchup, team 1's chance as it was
/// when the game was decided, and the advancing team marked with `>`.
pub fn render_bracket(bracket: &Bracket) -> String {
    let mut out = String::new();
    for (round, matchups) in bracket.rounds() {
        let _ = writeln!(out, "== {} ({round}) ==", round.label());
        for (index, matchup) in matchups.iter().enumerate() {
            let probability = matchup.probability1;
            let _ = writeln!(out, "[{index:>2}] {}", format_team_line(matchup, &matchup.team1, probability, TEAM_LINE_WIDTH));
            let _ = writeln!(
                out,
                "     {}",
                format_team_line(matchup, &matchup.team2, probability.map(|p| 100.0 - p), TEAM_LINE_WIDTH)
            );
        }
        let _ = writeln!(out);
    }
    let champion = bracket.champion().map_or_else(|| "TBD".to_string(), seeded_name);
    let _ = write!(out, "Champion: {champion}");
    out
}

/// Format one side of a matchup: `"> [seed] [name        ] [pct]"`.
///
/// Total width = marker(1) + " " + seed(2) + " " + name + " " + pct(6).
pub fn format_team_line(matchup: &Matchup, slot: &Slot, probability: Option<f64>, width: usize) -> String {
    let (seed, name) = match slot {
        Slot::Team(team) => (format!("{:2}", team.seed), team.name.as_str()),
        Slot::Bye => ("  ".to_string(), "BYE"),
        Slot::Open => ("  ".to_string(), "TBD"),
    };
    let advanced = match (slot.team(), &matchup.winner) {
        (Some(team), Some(winner)) => team.name == winner.name,
        _ => false,
    };
    let marker = if advanced { '>' } else { ' ' };
    let pct = match (slot.team(), probability) {
        (Some(_), Some(p)) => format!("{p:>5.1}%"),
        _ => "      ".to_string(),
    };
    // name_w = width - (marker=1 + sp=1 + seed=2 + sp=1 + sp=1 + pct=6)
    let name_w = width.saturating_sub(12);
    let name_trunc: String = name.chars().take(name_w).collect();
    format!("{marker} {seed} {name_trunc:<name_w$} {pct}")
}

pub fn render_warnings(warnings: &[DataWarning]) -> String {
    warnings.iter().map(|w| format!("warning: {w}")).collect::<Vec<_>>().join("\n")
}
