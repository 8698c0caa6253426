use ncaa_predictor::{GameSite, InputError, RoundKey};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Version,
    Predict(PredictArgs),
    Bracket(BracketArgs),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PredictArgs {
    pub team1: String,
    pub team2: String,
    /// From team 1's point of view.
    pub site: GameSite,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum TeamSource {
    #[default]
    Samples,
    File(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BracketArgs {
    pub source: TeamSource,
    pub year: Option<String>,
    pub picks: Vec<Pick>,
    pub json: bool,
}

/// A manual winner: `ROUND:INDEX=TEAM`, e.g. `round2:0=Purdue`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub round: RoundKey,
    pub index: usize,
    pub team: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArgsError {
    Unknown(String),
    MissingValue(&'static str),
    MissingTeams,
    InvalidPick(String),
    ConflictingSources,
    Input(InputError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::Unknown(arg) => write!(f, "Unknown argument: {arg}"),
            ArgsError::MissingValue(flag) => write!(f, "{flag} requires a value"),
            ArgsError::MissingTeams => write!(f, "predict needs two team names"),
            ArgsError::InvalidPick(raw) => {
                write!(f, "Invalid pick {raw:?}, expected ROUND:INDEX=TEAM (e.g. round2:0=Duke)")
            }
            ArgsError::ConflictingSources => write!(f, "--samples and --teams cannot be combined"),
            ArgsError::Input(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<InputError> for ArgsError {
    fn from(e: InputError) -> Self {
        ArgsError::Input(e)
    }
}

pub fn parse_args<I>(args: I) -> Result<Command, ArgsError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Ok(Command::Help);
    };

    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-V" | "--version" => Ok(Command::Version),
        "predict" => parse_predict(args).map(Command::Predict),
        "bracket" => parse_bracket(args).map(Command::Bracket),
        _ => Err(ArgsError::Unknown(first)),
    }
}

fn parse_predict(mut args: impl Iterator<Item = String>) -> Result<PredictArgs, ArgsError> {
    let mut teams = Vec::new();
    let mut site = GameSite::Neutral;
    let mut year = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--site" => site = value(&mut args, "--site")?.parse()?,
            "--year" => year = Some(value(&mut args, "--year")?),
            flag if flag.starts_with("--") => return Err(ArgsError::Unknown(arg)),
            _ => teams.push(arg),
        }
    }

    let mut teams = teams.into_iter();
    match (teams.next(), teams.next(), teams.next()) {
        (Some(team1), Some(team2), None) => Ok(PredictArgs { team1, team2, site, year }),
        (_, _, Some(extra)) => Err(ArgsError::Unknown(extra)),
        _ => Err(ArgsError::MissingTeams),
    }
}

fn parse_bracket(mut args: impl Iterator<Item = String>) -> Result<BracketArgs, ArgsError> {
    let mut parsed = BracketArgs::default();
    let mut source = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--samples" => set_source(&mut source, TeamSource::Samples)?,
            "--teams" => set_source(&mut source, TeamSource::File(value(&mut args, "--teams")?.into()))?,
            "--year" => parsed.year = Some(value(&mut args, "--year")?),
            "--pick" => parsed.picks.push(parse_pick(&value(&mut args, "--pick")?)?),
            "--json" => parsed.json = true,
            _ => return Err(ArgsError::Unknown(arg)),
        }
    }

    parsed.source = source.unwrap_or_default();
    Ok(parsed)
}

fn set_source(current: &mut Option<TeamSource>, next: TeamSource) -> Result<(), ArgsError> {
    if current.is_some() {
        return Err(ArgsError::ConflictingSources);
    }
    *current = Some(next);
    Ok(())
}

fn value(args: &mut impl Iterator<Item = String>, flag: &'static str) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue(flag))
}

pub fn parse_pick(raw: &str) -> Result<Pick, ArgsError> {
    let invalid = || ArgsError::InvalidPick(raw.to_string());
    let (position, team) = raw.split_once('=').ok_or_else(invalid)?;
    let (round, index) = position.split_once(':').ok_or_else(invalid)?;
    let team = team.trim();
    if team.is_empty() {
        return Err(invalid());
    }
    Ok(Pick {
        round: round.parse()?,
        index: index.trim().parse().map_err(|_| invalid())?,
        team: team.to_string(),
    })
}
