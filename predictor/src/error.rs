use crate::RoundKey;
use std::fmt;

pub type BracketResult<T> = Result<T, BracketError>;
pub type LookupResult<T> = Result<T, LookupError>;

/// Structural failures. The bracket is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum BracketError {
    OutOfBounds { round: RoundKey, index: usize, len: usize },
    InvalidWinner { round: RoundKey, index: usize, team: String },
    InvalidSeed { team: String, seed: u8 },
    InvalidTeam(String),
    TooManyTeams(usize),
    Shape { round: RoundKey, expected: usize, found: usize },
}

impl fmt::Display for BracketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketError::OutOfBounds { round, index, len } => {
                write!(f, "matchup {index} is out of range for {round} ({len} matchups)")
            }
            BracketError::InvalidWinner { round, index, team } => {
                write!(f, "{team} is not playing in {round} matchup {index}")
            }
            BracketError::InvalidSeed { team, seed } => {
                write!(f, "{team} has seed {seed}, expected 1-16 (or 0 for a bye)")
            }
            BracketError::InvalidTeam(msg) => write!(f, "Invalid team: {msg}"),
            BracketError::TooManyTeams(count) => {
                write!(f, "a bracket holds 64 teams, got {count}")
            }
            BracketError::Shape { round, expected, found } => {
                write!(f, "{round} must have {expected} matchups, found {found}")
            }
        }
    }
}

impl std::error::Error for BracketError {}

/// Non-fatal conditions found while loading or seeding partial data.
#[derive(Debug, Clone, PartialEq)]
pub enum DataWarning {
    MissingTeams { expected: usize, found: usize },
    /// A region lacked this seed, so a spare team from another region filled it.
    SeedBorrowed { region: String, seed: u8, team: String },
    SeedMissing { region: String, seed: u8 },
    DefaultedStat { team: String, field: &'static str },
}

impl fmt::Display for DataWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataWarning::MissingTeams { expected, found } => {
                write!(f, "only {found} of {expected} teams supplied")
            }
            DataWarning::SeedBorrowed { region, seed, team } => {
                write!(f, "{region} has no #{seed} seed, using {team}")
            }
            DataWarning::SeedMissing { region, seed } => {
                write!(f, "{region} has no #{seed} seed, slot left open")
            }
            DataWarning::DefaultedStat { team, field } => {
                write!(f, "{team}: missing or malformed {field}, using 0")
            }
        }
    }
}

/// Bad user input (names, years, sites, round references).
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    EmptyTeamName,
    InvalidYear(String),
    UnknownSite(String),
    UnknownRound(String),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyTeamName => write!(f, "Team name must not be empty"),
            InputError::InvalidYear(year) => {
                write!(f, "Year must be 2 digits (e.g., 25 for 2025), got {year:?}")
            }
            InputError::UnknownSite(site) => {
                write!(f, "Unknown game site {site:?}, expected home, away or neutral")
            }
            InputError::UnknownRound(round) => {
                write!(f, "Unknown round {round:?}, expected round1-round6")
            }
        }
    }
}

impl std::error::Error for InputError {}

#[derive(Debug)]
pub enum LookupError {
    Io(std::io::Error, String),
    Parsing(serde_json::Error, String),
    InvalidSeed { team: String, raw: String },
    Input(InputError),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Io(e, path) => write!(f, "could not read {path}: {e}"),
            LookupError::Parsing(e, source) => write!(f, "invalid stats json in {source}: {e}"),
            LookupError::InvalidSeed { team, raw } => {
                write!(f, "{team} has seed {raw:?}, expected an integer 1-16")
            }
            LookupError::Input(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LookupError::Io(e, _) => Some(e),
            LookupError::Parsing(e, _) => Some(e),
            LookupError::Input(e) => Some(e),
            LookupError::InvalidSeed { .. } => None,
        }
    }
}

impl From<InputError> for LookupError {
    fn from(e: InputError) -> Self {
        LookupError::Input(e)
    }
}
