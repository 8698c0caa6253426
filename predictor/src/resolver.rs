use crate::probability::WinProbability;
use crate::scoring::{ScoringModel, StrengthModel};
use crate::{GameSite, Side, Slot, Team};
use serde::Serialize;

/// Outcome of a single pairing.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Both teams present; the model picked a winner.
    Decided { winner: Team, probability1: f64 },
    /// Only one team present; it moves on without a game.
    Advance { winner: Team, side: Side },
    /// Nobody to advance.
    Unresolved,
}

impl Resolution {
    pub fn winner(&self) -> Option<&Team> {
        match self {
            Resolution::Decided { winner, .. } | Resolution::Advance { winner, .. } => Some(winner),
            Resolution::Unresolved => None,
        }
    }

    pub fn into_winner(self) -> Option<Team> {
        match self {
            Resolution::Decided { winner, .. } | Resolution::Advance { winner, .. } => Some(winner),
            Resolution::Unresolved => None,
        }
    }

    /// Team 1's displayed chance. Walkovers show as 100/0.
    pub fn probability1(&self) -> Option<f64> {
        match self {
            Resolution::Decided { probability1, .. } => Some(*probability1),
            Resolution::Advance { side: Side::Team1, .. } => Some(100.0),
            Resolution::Advance { side: Side::Team2, .. } => Some(0.0),
            Resolution::Unresolved => None,
        }
    }
}

/// Everything needed to present a head-to-head prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub team1: Team,
    pub team2: Team,
    pub winner: Team,
    pub team1_win_probability: f64,
    pub team2_win_probability: f64,
    pub site: GameSite,
}

impl Prediction {
    pub fn winner_probability(&self) -> f64 {
        if self.winner.name == self.team1.name {
            self.team1_win_probability
        } else {
            self.team2_win_probability
        }
    }

    /// Site from team 1's point of view, e.g. "Duke Home".
    pub fn site_label(&self) -> String {
        match self.site {
            GameSite::Home => format!("{} Home", self.team1.name),
            GameSite::Away => format!("{} Away", self.team1.name),
            GameSite::Neutral => "Neutral Site".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct MatchupResolver<M = ScoringModel> {
    probability: WinProbability<M>,
}

impl Default for MatchupResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchupResolver {
    pub fn new() -> Self {
        Self::with_probability(WinProbability::new())
    }
}

impl<M: StrengthModel> MatchupResolver<M> {
    pub fn with_probability(probability: WinProbability<M>) -> Self {
        Self { probability }
    }

    pub fn probability(&self) -> &WinProbability<M> {
        &self.probability
    }

    /// Decide a pairing. Byes and open slots never reach the scoring model.
    pub fn resolve(
        &self,
        team1: &Slot,
        team2: &Slot,
        site: GameSite,
        is_team1_home: bool,
    ) -> Resolution {
        match (team1.team(), team2.team()) {
            (Some(t1), Some(t2)) => {
                let probability1 = self.probability.win_probability(t1, t2, site, is_team1_home);
                let winner = if probability1 >= 50.0 { t1 } else { t2 };
                Resolution::Decided { winner: winner.clone(), probability1 }
            }
            (Some(t1), None) => Resolution::Advance { winner: t1.clone(), side: Side::Team1 },
            (None, Some(t2)) => Resolution::Advance { winner: t2.clone(), side: Side::Team2 },
            (None, None) => Resolution::Unresolved,
        }
    }

    /// Head-to-head prediction for two known teams. Ties go to team 1.
    pub fn predict(&self, team1: &Team, team2: &Team, site: GameSite, is_team1_home: bool) -> Prediction {
        let slot1 = Slot::from_team(team1.clone());
        let slot2 = Slot::from_team(team2.clone());
        let resolution = self.resolve(&slot1, &slot2, site, is_team1_home);
        let team1_win_probability = resolution.probability1().unwrap_or(50.0);
        let winner = resolution.into_winner().unwrap_or_else(|| team1.clone());
        Prediction {
            team1: team1.clone(),
            team2: team2.clone(),
            winner,
            team1_win_probability,
            team2_win_probability: 100.0 - team1_win_probability,
            site,
        }
    }

    pub fn predict_winner(&self, team1: &Team, team2: &Team, site: GameSite, is_team1_home: bool) -> Team {
        self.predict(team1, team2, site, is_team1_home).winner
    }
}
