use crate::{GameSite, Team};

// Composite score weights. Net rating carries the most signal; offense and
// defense are measured against a 100-point baseline.
pub const NET_RATING_WEIGHT: f64 = 0.45;
pub const OFFENSE_WEIGHT: f64 = 0.20;
pub const DEFENSE_WEIGHT: f64 = 0.20;
pub const SOS_WEIGHT: f64 = 0.10;
pub const LUCK_WEIGHT: f64 = 0.05;
/// Luck is reported as a fraction of wins; this brings it onto the rating scale.
pub const LUCK_SCALE: f64 = 50.0;
pub const EFFICIENCY_BASELINE: f64 = 100.0;

pub const HOME_COURT_ADVANTAGE: f64 = 3.5;
/// Per seed line above 17, only when `ScoringConfig::seed_bonus` is on.
pub const SEED_BONUS_PER_LINE: f64 = 0.3;

/// Anything that turns a team plus game context into a strength score.
pub trait StrengthModel {
    fn score(&self, team: &Team, site: GameSite, is_home: bool) -> f64;
}

impl<M: StrengthModel + ?Sized> StrengthModel for &M {
    fn score(&self, team: &Team, site: GameSite, is_home: bool) -> f64 {
        (**self).score(team, site, is_home)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Add `(17 - seed) * 0.3` on top of the efficiency score.
    pub seed_bonus: bool,
}

/// Weighted KenPom composite with a home-court adjustment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoringModel {
    config: ScoringConfig,
}

impl ScoringModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ScoringConfig) -> Self {
        Self { config }
    }
}

impl StrengthModel for ScoringModel {
    fn score(&self, team: &Team, site: GameSite, is_home: bool) -> f64 {
        let mut score = efficiency_score(team) + site_adjustment(site, is_home);
        if self.config.seed_bonus {
            score += seed_bonus(team.seed);
        }
        score
    }
}

pub fn efficiency_score(team: &Team) -> f64 {
    let off_advantage = team.off_rtg - EFFICIENCY_BASELINE;
    let def_advantage = EFFICIENCY_BASELINE - team.def_rtg;
    team.net_rtg * NET_RATING_WEIGHT
        + off_advantage * OFFENSE_WEIGHT
        + def_advantage * DEFENSE_WEIGHT
        + team.sos * SOS_WEIGHT
        + team.luck * LUCK_SCALE * LUCK_WEIGHT
}

/// Home team gains the advantage at a home site; at an away site the
/// non-home side is credited instead.
pub fn site_adjustment(site: GameSite, is_home: bool) -> f64 {
    match (site, is_home) {
        (GameSite::Neutral, _) => 0.0,
        (GameSite::Home, true) | (GameSite::Away, false) => HOME_COURT_ADVANTAGE,
        (GameSite::Home, false) | (GameSite::Away, true) => -HOME_COURT_ADVANTAGE,
    }
}

pub fn seed_bonus(seed: u8) -> f64 {
    let seed = seed.clamp(1, 16);
    f64::from(17 - seed) * SEED_BONUS_PER_LINE
}
