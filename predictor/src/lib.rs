pub mod engine;
pub mod error;
pub mod lookup;
pub mod probability;
pub mod resolver;
pub mod samples;
pub mod scoring;

pub use engine::BracketEngine;
pub use error::{BracketError, BracketResult, DataWarning, InputError, LookupError};
pub use lookup::{StatsTable, TeamProvider};
pub use probability::{Jitter, NoJitter, RandomJitter, WinProbability};
pub use resolver::{MatchupResolver, Prediction, Resolution};
pub use scoring::{ScoringConfig, ScoringModel, StrengthModel};

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical Round-of-64 seed pairs, indexed by matchup position within a region.
pub const SEED_MATCHUPS: [(u8, u8); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];

// ---------------------------------------------------------------------------
// Domain types
// ---------------------------------------------------------------------------

/// One tournament team and its season efficiency profile.
///
/// Field names serialize in camelCase (`netRtg`, `offRtg`, ...) to match the
/// column names used by KenPom exports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Team {
    pub name: String,
    /// 1 (strongest) through 16. Incoming data may use 0 to mark a bye.
    pub seed: u8,
    pub net_rtg: f64,
    pub off_rtg: f64,
    pub def_rtg: f64,
    pub adj_tempo: f64,
    pub luck: f64,
    pub sos: f64,
}

impl Team {
    /// Legacy bye marker: seed 0 or a team literally named "Bye".
    pub fn is_bye_marker(&self) -> bool {
        self.seed == 0 || self.name.trim().eq_ignore_ascii_case("bye")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSite {
    Home,
    Away,
    #[default]
    Neutral,
}

impl FromStr for GameSite {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" | "h" => Ok(GameSite::Home),
            "away" | "a" | "road" => Ok(GameSite::Away),
            "neutral" | "n" => Ok(GameSite::Neutral),
            other => Err(InputError::UnknownSite(other.to_string())),
        }
    }
}

/// One side of a matchup.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Slot {
    /// Not decided yet (or no data).
    #[default]
    Open,
    /// Deliberately empty; the opponent advances.
    Bye,
    Team(Team),
}

impl Slot {
    /// Convert an incoming team record, mapping legacy bye markers to `Slot::Bye`.
    pub fn from_team(team: Team) -> Self {
        if team.is_bye_marker() {
            Slot::Bye
        } else {
            Slot::Team(team)
        }
    }

    pub fn team(&self) -> Option<&Team> {
        match self {
            Slot::Team(team) => Some(team),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Slot::Open)
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

impl From<Option<Team>> for Slot {
    fn from(team: Option<Team>) -> Self {
        team.map_or(Slot::Open, Slot::from_team)
    }
}

// Persisted as `null` (open), the string "Bye", or a team object.
impl Serialize for Slot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Slot::Open => serializer.serialize_none(),
            Slot::Bye => serializer.serialize_str("Bye"),
            Slot::Team(team) => team.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum SlotRepr {
            Marker(String),
            Team(Team),
        }

        match Option::<SlotRepr>::deserialize(deserializer)? {
            None => Ok(Slot::Open),
            Some(SlotRepr::Marker(marker)) if marker.trim().eq_ignore_ascii_case("bye") => {
                Ok(Slot::Bye)
            }
            Some(SlotRepr::Marker(other)) => Err(de::Error::custom(format!(
                "unexpected slot marker {other:?}, expected \"Bye\", null or a team"
            ))),
            Some(SlotRepr::Team(team)) => Ok(Slot::from_team(team)),
        }
    }
}

/// Which side of a matchup a team occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn from_index(matchup_index: usize) -> Self {
        if matchup_index % 2 == 0 { Side::Team1 } else { Side::Team2 }
    }

    pub fn position(&self) -> usize {
        match self {
            Side::Team1 => 0,
            Side::Team2 => 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Matchup {
    pub team1: Slot,
    pub team2: Slot,
    pub winner: Option<Team>,
    /// Team 1's chance as computed when the winner was decided. Manual
    /// picks keep the model's figure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability1: Option<f64>,
}

impl Matchup {
    pub fn new(team1: Slot, team2: Slot) -> Self {
        Self { team1, team2, winner: None, probability1: None }
    }

    pub fn slot(&self, side: Side) -> &Slot {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    pub fn slot_mut(&mut self, side: Side) -> &mut Slot {
        match side {
            Side::Team1 => &mut self.team1,
            Side::Team2 => &mut self.team2,
        }
    }

    /// Find the participant with the given name.
    pub fn participant(&self, name: &str) -> Option<&Team> {
        [&self.team1, &self.team2]
            .into_iter()
            .filter_map(Slot::team)
            .find(|team| team.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.team1.is_open() && self.team2.is_open() && self.winner.is_none()
    }
}

/// Round identifier. Ordered from Round of 64 to the championship game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundKey {
    #[default]
    Round1,
    Round2,
    Round3,
    Round4,
    Round5,
    Round6,
}

impl RoundKey {
    pub const ALL: [RoundKey; 6] = [
        RoundKey::Round1,
        RoundKey::Round2,
        RoundKey::Round3,
        RoundKey::Round4,
        RoundKey::Round5,
        RoundKey::Round6,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RoundKey::Round1 => "Round of 64",
            RoundKey::Round2 => "Round of 32",
            RoundKey::Round3 => "Sweet 16",
            RoundKey::Round4 => "Elite 8",
            RoundKey::Round5 => "Final 4",
            RoundKey::Round6 => "Championship",
        }
    }

    /// Persisted key, e.g. `round3`.
    pub fn key(&self) -> &'static str {
        match self {
            RoundKey::Round1 => "round1",
            RoundKey::Round2 => "round2",
            RoundKey::Round3 => "round3",
            RoundKey::Round4 => "round4",
            RoundKey::Round5 => "round5",
            RoundKey::Round6 => "round6",
        }
    }

    /// 1-based round number.
    pub fn number(&self) -> u8 {
        match self {
            RoundKey::Round1 => 1,
            RoundKey::Round2 => 2,
            RoundKey::Round3 => 3,
            RoundKey::Round4 => 4,
            RoundKey::Round5 => 5,
            RoundKey::Round6 => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    /// Matchups in this round: 64 / 2^k.
    pub fn matchups(&self) -> usize {
        64 >> self.number()
    }

    pub fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }
}

impl fmt::Display for RoundKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RoundKey {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let digits = lower
            .strip_prefix("round")
            .or_else(|| lower.strip_prefix('r'))
            .unwrap_or(&lower);
        digits
            .parse::<u8>()
            .ok()
            .and_then(Self::from_number)
            .ok_or_else(|| InputError::UnknownRound(s.trim().to_string()))
    }
}

/// Where the winner of a matchup lands in the following round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextMatchupInfo {
    pub round: RoundKey,
    pub matchup_index: usize,
    pub side: Side,
}

/// `None` for the championship game, which feeds nothing.
pub fn next_matchup_info(round: RoundKey, matchup_index: usize) -> Option<NextMatchupInfo> {
    let next = round.next()?;
    Some(NextMatchupInfo {
        round: next,
        matchup_index: matchup_index / 2,
        side: Side::from_index(matchup_index),
    })
}

// ---------------------------------------------------------------------------
// Bracket
// ---------------------------------------------------------------------------

/// Six rounds of fixed size (32, 16, 8, 4, 2, 1). Only cell contents change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBracket")]
pub struct Bracket {
    round1: Vec<Matchup>,
    round2: Vec<Matchup>,
    round3: Vec<Matchup>,
    round4: Vec<Matchup>,
    round5: Vec<Matchup>,
    round6: Vec<Matchup>,
}

impl Default for Bracket {
    fn default() -> Self {
        Self::new()
    }
}

impl Bracket {
    /// Allocate every round at its fixed size with all cells empty.
    pub fn new() -> Self {
        let empty = |round: RoundKey| vec![Matchup::default(); round.matchups()];
        Self {
            round1: empty(RoundKey::Round1),
            round2: empty(RoundKey::Round2),
            round3: empty(RoundKey::Round3),
            round4: empty(RoundKey::Round4),
            round5: empty(RoundKey::Round5),
            round6: empty(RoundKey::Round6),
        }
    }

    pub fn round(&self, round: RoundKey) -> &[Matchup] {
        match round {
            RoundKey::Round1 => &self.round1,
            RoundKey::Round2 => &self.round2,
            RoundKey::Round3 => &self.round3,
            RoundKey::Round4 => &self.round4,
            RoundKey::Round5 => &self.round5,
            RoundKey::Round6 => &self.round6,
        }
    }

    // Slice, not Vec: callers may edit cells but never resize a round.
    pub(crate) fn round_mut(&mut self, round: RoundKey) -> &mut [Matchup] {
        match round {
            RoundKey::Round1 => &mut self.round1,
            RoundKey::Round2 => &mut self.round2,
            RoundKey::Round3 => &mut self.round3,
            RoundKey::Round4 => &mut self.round4,
            RoundKey::Round5 => &mut self.round5,
            RoundKey::Round6 => &mut self.round6,
        }
    }

    pub fn rounds(&self) -> impl Iterator<Item = (RoundKey, &[Matchup])> {
        RoundKey::ALL.into_iter().map(|key| (key, self.round(key)))
    }

    pub fn matchup(&self, round: RoundKey, index: usize) -> BracketResult<&Matchup> {
        let matchups = self.round(round);
        matchups.get(index).ok_or(BracketError::OutOfBounds {
            round,
            index,
            len: matchups.len(),
        })
    }

    pub(crate) fn matchup_mut(&mut self, round: RoundKey, index: usize) -> BracketResult<&mut Matchup> {
        let matchups = self.round_mut(round);
        let len = matchups.len();
        matchups
            .get_mut(index)
            .ok_or(BracketError::OutOfBounds { round, index, len })
    }

    /// The tournament champion, once the title game has a winner.
    pub fn champion(&self) -> Option<&Team> {
        self.round6.first().and_then(|m| m.winner.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.rounds().all(|(_, matchups)| matchups.iter().all(Matchup::is_empty))
    }
}

#[derive(Deserialize)]
struct RawBracket {
    round1: Vec<Matchup>,
    round2: Vec<Matchup>,
    round3: Vec<Matchup>,
    round4: Vec<Matchup>,
    round5: Vec<Matchup>,
    round6: Vec<Matchup>,
}

impl TryFrom<RawBracket> for Bracket {
    type Error = BracketError;

    fn try_from(raw: RawBracket) -> Result<Self, Self::Error> {
        let bracket = Bracket {
            round1: raw.round1,
            round2: raw.round2,
            round3: raw.round3,
            round4: raw.round4,
            round5: raw.round5,
            round6: raw.round6,
        };
        for (round, matchups) in bracket.rounds() {
            if matchups.len() != round.matchups() {
                return Err(BracketError::Shape {
                    round,
                    expected: round.matchups(),
                    found: matchups.len(),
                });
            }
        }
        Ok(bracket)
    }
}
