use crate::Team;
use crate::error::{DataWarning, InputError, LookupError, LookupResult};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Two-digit season the bundled table covers.
pub const EMBEDDED_STATS_YEAR: &str = "25";
const EMBEDDED_STATS_JSON: &str = include_str!("../data/kenpom_2025.json");

/// Read-only source of season statistics.
pub trait TeamProvider {
    /// `year` is a two-digit season such as "25".
    fn lookup_team(&self, name: &str, year: &str) -> Option<Team>;
}

impl<P: TeamProvider + ?Sized> TeamProvider for &P {
    fn lookup_team(&self, name: &str, year: &str) -> Option<Team> {
        (**self).lookup_team(name, year)
    }
}

// ---------------------------------------------------------------------------
// Input validation
// ---------------------------------------------------------------------------

/// Validated head-to-head request.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupQuery {
    pub team1: String,
    pub team2: String,
    pub year: String,
}

impl MatchupQuery {
    pub fn new(team1: &str, team2: &str, year: &str) -> Result<Self, InputError> {
        let team1 = team1.trim();
        let team2 = team2.trim();
        if team1.is_empty() || team2.is_empty() {
            return Err(InputError::EmptyTeamName);
        }
        Ok(Self { team1: team1.to_string(), team2: team2.to_string(), year: normalize_year(year)? })
    }
}

/// Accepts "25" or "2025" and returns "25".
pub fn normalize_year(year: &str) -> Result<String, InputError> {
    let trimmed = year.trim();
    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::InvalidYear(year.to_string()));
    }
    match trimmed.len() {
        2 => Ok(trimmed.to_string()),
        4 => Ok(trimmed[2..].to_string()),
        _ => Err(InputError::InvalidYear(year.to_string())),
    }
}

/// Tournament year for the season in progress. In Nov/Dec the season
/// already belongs to next spring's tournament.
pub fn season_tournament_year(now: DateTime<Utc>) -> i32 {
    if now.month() >= 11 { now.year() + 1 } else { now.year() }
}

pub fn default_year() -> String {
    format!("{:02}", season_tournament_year(Utc::now()).rem_euclid(100))
}

// ---------------------------------------------------------------------------
// Name matching
// ---------------------------------------------------------------------------

/// Exact name first, then case-insensitive, then substring either way.
/// Ties go to whichever team comes first in `teams`.
pub fn find_team<'a>(teams: &'a [Team], name: &str) -> Option<&'a Team> {
    let query = name.trim();
    if query.is_empty() {
        return None;
    }
    let lowered = query.to_lowercase();

    teams
        .iter()
        .find(|t| t.name == query)
        .or_else(|| teams.iter().find(|t| t.name.to_lowercase() == lowered))
        .or_else(|| {
            teams.iter().find(|t| {
                let candidate = t.name.trim().to_lowercase();
                !candidate.is_empty() && (candidate.contains(&lowered) || lowered.contains(&candidate))
            })
        })
}

/// Lenient number parsing for scraped values like "+27.92" or "11.51*".
pub fn parse_stat(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Stats documents
// ---------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(s) => parse_stat(s),
        }
    }

    fn raw(&self) -> String {
        match self {
            StatValue::Number(n) => n.to_string(),
            StatValue::Text(s) => s.clone(),
        }
    }
}

/// One row as it appears on disk. Every stat may be missing or a string.
#[derive(Deserialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
struct TeamRecord {
    #[serde(default)]
    name: String,
    seed: Option<StatValue>,
    net_rtg: Option<StatValue>,
    off_rtg: Option<StatValue>,
    def_rtg: Option<StatValue>,
    adj_tempo: Option<StatValue>,
    luck: Option<StatValue>,
    sos: Option<StatValue>,
}

/// Rows without a seed are treated as the lowest line.
const UNSEEDED: u8 = 16;

impl TeamRecord {
    fn into_team(self, warnings: &mut Vec<DataWarning>) -> LookupResult<Team> {
        let name = self.name.trim().to_string();
        let seed = match &self.seed {
            None => UNSEEDED,
            Some(value) => match value.as_f64() {
                Some(s) if s.fract() == 0.0 && (0.0..=16.0).contains(&s) => s as u8,
                _ => return Err(LookupError::InvalidSeed { team: name, raw: value.raw() }),
            },
        };

        let mut stat = |value: &Option<StatValue>, field: &'static str| {
            value.as_ref().and_then(StatValue::as_f64).unwrap_or_else(|| {
                warnings.push(DataWarning::DefaultedStat { team: name.clone(), field });
                0.0
            })
        };

        Ok(Team {
            seed,
            net_rtg: stat(&self.net_rtg, "netRtg"),
            off_rtg: stat(&self.off_rtg, "offRtg"),
            def_rtg: stat(&self.def_rtg, "defRtg"),
            adj_tempo: stat(&self.adj_tempo, "adjTempo"),
            luck: stat(&self.luck, "luck"),
            sos: stat(&self.sos, "sos"),
            name,
        })
    }
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum StatsDocument {
    Seasons(BTreeMap<String, Vec<TeamRecord>>),
    Flat(Vec<TeamRecord>),
}

/// Team statistics loaded from JSON, keyed by two-digit season.
///
/// Accepts either `{ "25": [ ...teams ] }` or a bare array of teams. A bare
/// array answers lookups for every year.
#[derive(Debug, Clone, Default)]
pub struct StatsTable {
    seasons: BTreeMap<String, Vec<Team>>,
    any_year: Vec<Team>,
    warnings: Vec<DataWarning>,
}

impl StatsTable {
    /// KenPom numbers for the 2025 tournament field.
    pub fn embedded() -> LookupResult<Self> {
        Self::from_json_str(EMBEDDED_STATS_JSON, "embedded 2025 table")
    }

    pub fn load(path: impl AsRef<Path>) -> LookupResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| LookupError::Io(e, display.clone()))?;
        Self::from_json_str(&content, &display)
    }

    /// `source` only labels errors and log lines.
    pub fn from_json_str(json: &str, source: &str) -> LookupResult<Self> {
        let document: StatsDocument =
            serde_json::from_str(json).map_err(|e| LookupError::Parsing(e, source.to_string()))?;

        let mut table = StatsTable::default();
        match document {
            StatsDocument::Seasons(seasons) => {
                for (year, records) in seasons {
                    let year = normalize_year(&year)?;
                    let teams = convert_records(records, &mut table.warnings)?;
                    table.seasons.entry(year).or_default().extend(teams);
                }
            }
            StatsDocument::Flat(records) => {
                table.any_year = convert_records(records, &mut table.warnings)?;
            }
        }

        for warning in &table.warnings {
            warn!("{source}: {warning}");
        }
        debug!("loaded {} teams from {source}", table.len());
        Ok(table)
    }

    /// A table that serves the same teams for any year.
    pub fn from_teams(teams: Vec<Team>) -> Self {
        Self { any_year: teams, ..Default::default() }
    }

    /// Teams for `year` in file order, falling back to the year-less list.
    pub fn teams(&self, year: &str) -> &[Team] {
        normalize_year(year)
            .ok()
            .and_then(|y| self.seasons.get(&y))
            .map_or(self.any_year.as_slice(), Vec::as_slice)
    }

    /// Seasons present in the table, oldest first.
    pub fn years(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.seasons.keys().map(String::as_str)
    }

    pub fn latest_year(&self) -> Option<&str> {
        self.years().next_back()
    }

    /// Stats that were missing or malformed and defaulted to 0.
    pub fn warnings(&self) -> &[DataWarning] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.any_year.len() + self.seasons.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TeamProvider for StatsTable {
    fn lookup_team(&self, name: &str, year: &str) -> Option<Team> {
        let found = find_team(self.teams(year), name).cloned();
        match &found {
            Some(team) => debug!("lookup {name:?} ({year}) -> {}", team.name),
            None => debug!("lookup {name:?} ({year}) -> no match"),
        }
        found
    }
}

fn convert_records(records: Vec<TeamRecord>, warnings: &mut Vec<DataWarning>) -> LookupResult<Vec<Team>> {
    records
        .into_iter()
        .filter(|r| !r.name.trim().is_empty())
        .map(|r| r.into_team(warnings))
        .collect()
}
