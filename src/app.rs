use crate::args::{BracketArgs, Pick, PredictArgs, TeamSource};
use crate::draw;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use anyhow::{Context, anyhow};
use log::{debug, info};
use ncaa_predictor::lookup::{MatchupQuery, default_year, find_team};
use ncaa_predictor::samples::generate_sample_field;
use ncaa_predictor::{
    BracketEngine, GameSite, MatchupResolver, Prediction, RandomJitter, ScoringConfig, ScoringModel, Slot,
    StatsTable, Team, TeamProvider, WinProbability,
};

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    engine: BracketEngine,
}

impl App {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::load())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let resolver = MatchupResolver::with_probability(build_probability(&settings));
        Self {
            engine: BracketEngine::with_resolver(resolver),
            state: AppState::default(),
            settings,
        }
    }

    /// `MMPREDICT_STATS_JSON` if set, otherwise the bundled 2025 table.
    pub fn stats_table(&self) -> anyhow::Result<StatsTable> {
        match &self.settings.stats_path {
            Some(path) => StatsTable::load(path).context("loading MMPREDICT_STATS_JSON"),
            None => Ok(StatsTable::embedded()?),
        }
    }

    // -----------------------------------------------------------------------
    // Head-to-head predictions
    // -----------------------------------------------------------------------

    pub fn run_predict(&mut self, args: &PredictArgs) -> anyhow::Result<String> {
        let table = self.stats_table()?;
        let year = match &args.year {
            Some(year) => year.clone(),
            None => table.latest_year().map_or_else(default_year, str::to_string),
        };
        let query = MatchupQuery::new(&args.team1, &args.team2, &year)?;
        let prediction = self.predict_matchup(&table, &query, args.site)?;
        Ok(draw::render_prediction(prediction))
    }

    /// Look up both teams and predict. `site` is from team 1's point of view.
    pub fn predict_matchup(
        &mut self,
        provider: &impl TeamProvider,
        query: &MatchupQuery,
        site: GameSite,
    ) -> anyhow::Result<&Prediction> {
        let team1 = lookup(provider, &query.team1, &query.year)?;
        let team2 = lookup(provider, &query.team2, &query.year)?;
        let prediction = self.engine.resolver().predict(&team1, &team2, site, site == GameSite::Home);
        info!(
            "{} vs {}: {:.1}% / {:.1}%",
            team1.name, team2.name, prediction.team1_win_probability, prediction.team2_win_probability
        );
        Ok(self.state.last_prediction.insert(prediction))
    }

    // -----------------------------------------------------------------------
    // Bracket
    // -----------------------------------------------------------------------

    pub fn run_bracket(&mut self, args: &BracketArgs) -> anyhow::Result<String> {
        self.load_teams(&args.source, args.year.as_deref())?;
        self.auto_fill();
        for pick in &args.picks {
            self.select_winner(pick)
                .with_context(|| format!("applying pick {}:{}={}", pick.round, pick.index, pick.team))?;
        }

        let state = &self.state.bracket;
        if args.json {
            return serde_json::to_string_pretty(&state.bracket).context("serializing bracket");
        }
        let mut out = draw::render_bracket(&state.bracket);
        if !state.warnings.is_empty() {
            out = format!("{}\n\n{out}", draw::render_warnings(&state.warnings));
        }
        Ok(out)
    }

    /// Reset the bracket and seed round 1 from `source`.
    pub fn load_teams(&mut self, source: &TeamSource, year: Option<&str>) -> anyhow::Result<()> {
        self.clear();
        let (teams, mut warnings) = match source {
            TeamSource::Samples => (generate_sample_field(), Vec::new()),
            TeamSource::File(path) => {
                let table = StatsTable::load(path)?;
                let year = year
                    .map(str::to_string)
                    .or_else(|| table.latest_year().map(str::to_string))
                    .unwrap_or_else(default_year);
                (table.teams(&year).to_vec(), table.warnings().to_vec())
            }
        };
        debug!("seeding bracket from {} teams", teams.len());

        let bracket = &mut self.state.bracket.bracket;
        warnings.extend(self.engine.seed_round1(bracket, &teams)?);
        self.state.bracket.warnings = warnings;
        Ok(())
    }

    pub fn auto_fill(&mut self) {
        self.engine.auto_fill(&mut self.state.bracket.bracket);
    }

    /// Apply a manual winner. The pick may name the team loosely ("Duke"
    /// for "Duke (East)"); it is matched against the two teams playing.
    pub fn select_winner(&mut self, pick: &Pick) -> anyhow::Result<()> {
        let bracket = &mut self.state.bracket.bracket;
        let matchup = bracket.matchup(pick.round, pick.index)?;
        let playing: Vec<Team> = [&matchup.team1, &matchup.team2]
            .into_iter()
            .filter_map(Slot::team)
            .cloned()
            .collect();
        let team = find_team(&playing, &pick.team)
            .cloned()
            .unwrap_or_else(|| Team { name: pick.team.clone(), ..Default::default() });

        self.engine.set_winner(bracket, pick.round, pick.index, &team)?;
        self.state.bracket.picks.push(pick.clone());
        Ok(())
    }

    pub fn clear(&mut self) {
        self.engine.clear(&mut self.state.bracket.bracket);
        self.state.bracket.reset();
    }
}

fn build_probability(settings: &AppSettings) -> WinProbability {
    let model = ScoringModel::with_config(ScoringConfig { seed_bonus: settings.seed_bonus });
    let probability = WinProbability::with_model(model);
    if !settings.randomness {
        return probability;
    }
    match settings.rng_seed {
        Some(seed) => probability.jitter(RandomJitter::seeded(seed)),
        None => probability.jitter(RandomJitter::from_entropy()),
    }
}

fn lookup(provider: &impl TeamProvider, name: &str, year: &str) -> anyhow::Result<Team> {
    provider
        .lookup_team(name, year)
        .ok_or_else(|| anyhow!("Could not find team data for \"{name}\" for year {year}"))
}
