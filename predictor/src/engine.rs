use crate::error::{BracketError, BracketResult, DataWarning};
use crate::resolver::MatchupResolver;
use crate::scoring::{ScoringModel, StrengthModel};
use crate::{Bracket, GameSite, Matchup, RoundKey, SEED_MATCHUPS, Slot, Team, next_matchup_info};
use log::{debug, warn};
use std::ops::Range;

pub const REGIONS: [&str; 4] = ["East", "West", "South", "Midwest"];
pub const TEAMS_PER_REGION: usize = 16;
pub const FIELD_SIZE: usize = REGIONS.len() * TEAMS_PER_REGION;

/// Drives a [`Bracket`] from seeded Round-of-64 pairings to a champion.
///
/// Every write into a matchup re-derives all cells downstream of it, so a
/// manual pick in round 2 is reflected all the way to the title game.
#[derive(Debug)]
pub struct BracketEngine<M = ScoringModel> {
    resolver: MatchupResolver<M>,
    site: GameSite,
}

impl Default for BracketEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BracketEngine {
    pub fn new() -> Self {
        Self::with_resolver(MatchupResolver::new())
    }
}

impl<M: StrengthModel> BracketEngine<M> {
    pub fn with_resolver(resolver: MatchupResolver<M>) -> Self {
        Self { resolver, site: GameSite::Neutral }
    }

    /// Site applied to every bracket game. Team 1 is the home side at a home site.
    pub fn site(mut self, site: GameSite) -> Self {
        self.site = site;
        self
    }

    pub fn resolver(&self) -> &MatchupResolver<M> {
        &self.resolver
    }

    pub fn game_site(&self) -> GameSite {
        self.site
    }

    pub fn is_team1_home(&self) -> bool {
        self.site == GameSite::Home
    }

    pub fn initialize(&self) -> Bracket {
        Bracket::new()
    }

    /// Reset every cell, keeping the round sizes.
    pub fn clear(&self, bracket: &mut Bracket) {
        *bracket = Bracket::new();
    }

    /// Place the Round-of-64 pairings from teams ordered by region
    /// (East, West, South, Midwest; 16 each).
    ///
    /// Short or gappy data is not fatal: a seed missing from its region is
    /// borrowed from a team with that seed that no region placed for itself,
    /// and only left open when none exists. The returned warnings describe
    /// each gap.
    pub fn seed_round1(&self, bracket: &mut Bracket, teams: &[Team]) -> BracketResult<Vec<DataWarning>> {
        if teams.len() > FIELD_SIZE {
            return Err(BracketError::TooManyTeams(teams.len()));
        }
        for team in teams {
            validate_team(team)?;
        }

        let mut warnings = Vec::new();
        if teams.len() < FIELD_SIZE {
            warnings.push(DataWarning::MissingTeams { expected: FIELD_SIZE, found: teams.len() });
        }

        // First pass: every region takes its own teams. Only what is left
        // afterwards can be borrowed into another region's gaps.
        let mut placer = SeedPlacer { teams, used: vec![false; teams.len()] };
        let mut home_slots = Vec::with_capacity(FIELD_SIZE);
        for (region_idx, region) in REGIONS.iter().enumerate() {
            let start = (region_idx * TEAMS_PER_REGION).min(teams.len());
            let end = (start + TEAMS_PER_REGION).min(teams.len());
            for &(high, low) in &SEED_MATCHUPS {
                for seed in [high, low] {
                    home_slots.push((*region, seed, placer.place_home(start..end, seed)));
                }
            }
        }

        let slots: Vec<Slot> = home_slots
            .into_iter()
            .map(|(region, seed, slot)| slot.unwrap_or_else(|| placer.borrow(region, seed, &mut warnings)))
            .collect();

        let mut seeded = Bracket::new();
        for (matchup, pair) in seeded.round_mut(RoundKey::Round1).iter_mut().zip(slots.chunks_exact(2)) {
            *matchup = Matchup::new(pair[0].clone(), pair[1].clone());
        }

        for warning in &warnings {
            warn!("seeding: {warning}");
        }
        *bracket = seeded;
        Ok(warnings)
    }

    /// Resolve every matchup in `round` and push each winner forward.
    pub fn resolve_round(&self, bracket: &mut Bracket, round: RoundKey) {
        for index in 0..round.matchups() {
            let matchup = &mut bracket.round_mut(round)[index];
            self.decide(matchup);
            let winner = matchup.winner.clone();
            self.advance(bracket, round, index, winner);
        }
    }

    /// Resolve the whole bracket, round by round.
    pub fn auto_fill(&self, bracket: &mut Bracket) {
        for round in RoundKey::ALL {
            self.resolve_round(bracket, round);
        }
        if let Some(champion) = bracket.champion() {
            debug!("auto-fill complete, champion: {}", champion.name);
        }
    }

    /// Write `winner` into the slot that `(round, index)` feeds, then
    /// re-derive every matchup on the path to the title game.
    pub fn propagate(
        &self,
        bracket: &mut Bracket,
        round: RoundKey,
        index: usize,
        winner: Option<Team>,
    ) -> BracketResult<()> {
        bracket.matchup(round, index)?;
        self.advance(bracket, round, index, winner);
        Ok(())
    }

    /// Manually pick the winner of a matchup and redo everything downstream.
    ///
    /// Downstream cells are recomputed from scratch, so earlier predictions
    /// (and earlier manual picks) that depended on this game are replaced.
    pub fn set_winner(
        &self,
        bracket: &mut Bracket,
        round: RoundKey,
        index: usize,
        winner: &Team,
    ) -> BracketResult<()> {
        let chosen = bracket
            .matchup(round, index)?
            .participant(&winner.name)
            .cloned()
            .ok_or_else(|| BracketError::InvalidWinner {
                round,
                index,
                team: winner.name.clone(),
            })?;

        debug!("manual pick: {} wins {round} matchup {index}", chosen.name);
        bracket.matchup_mut(round, index)?.winner = Some(chosen.clone());
        self.advance(bracket, round, index, Some(chosen));
        Ok(())
    }

    fn decide(&self, matchup: &mut Matchup) {
        let resolution = self.resolver.resolve(&matchup.team1, &matchup.team2, self.site, self.is_team1_home());
        matchup.probability1 = resolution.probability1();
        matchup.winner = resolution.into_winner();
    }

    // Walks toward the championship. Each step overwrites one slot of the
    // next matchup and re-resolves it; an unresolvable matchup clears its
    // winner, which then clears the slot above it, and so on.
    fn advance(&self, bracket: &mut Bracket, round: RoundKey, index: usize, winner: Option<Team>) {
        let mut current = (round, index, winner);
        while let Some(next) = next_matchup_info(current.0, current.1) {
            let matchup = &mut bracket.round_mut(next.round)[next.matchup_index];
            *matchup.slot_mut(next.side) = current.2.map_or(Slot::Open, Slot::from_team);
            self.decide(matchup);
            debug!(
                "{} matchup {} -> {}",
                next.round,
                next.matchup_index,
                matchup.winner.as_ref().map_or("TBD", |t| t.name.as_str())
            );
            current = (next.round, next.matchup_index, matchup.winner.clone());
        }
    }
}

fn validate_team(team: &Team) -> BracketResult<()> {
    if team.name.trim().is_empty() {
        return Err(BracketError::InvalidTeam("team name must not be empty".into()));
    }
    if team.seed > 16 {
        return Err(BracketError::InvalidSeed { team: team.name.clone(), seed: team.seed });
    }
    Ok(())
}

struct SeedPlacer<'a> {
    teams: &'a [Team],
    used: Vec<bool>,
}

impl SeedPlacer<'_> {
    /// A team from the region's own block: the seed itself, then a bye entry.
    fn place_home(&mut self, home: Range<usize>, seed: u8) -> Option<Slot> {
        let idx = self
            .find(home.clone(), |t| t.seed == seed)
            .or_else(|| self.find(home, Team::is_bye_marker))?;
        Some(self.take(idx))
    }

    /// A same-seed team no region claimed for itself, or an open slot.
    fn borrow(&mut self, region: &str, seed: u8, warnings: &mut Vec<DataWarning>) -> Slot {
        match self.find(0..self.teams.len(), |t| t.seed == seed && !t.is_bye_marker()) {
            Some(idx) => {
                warnings.push(DataWarning::SeedBorrowed {
                    region: region.to_string(),
                    seed,
                    team: self.teams[idx].name.clone(),
                });
                self.take(idx)
            }
            None => {
                warnings.push(DataWarning::SeedMissing { region: region.to_string(), seed });
                Slot::Open
            }
        }
    }

    fn find(&self, range: Range<usize>, predicate: impl Fn(&Team) -> bool) -> Option<usize> {
        range.into_iter().find(|&idx| !self.used[idx] && predicate(&self.teams[idx]))
    }

    fn take(&mut self, idx: usize) -> Slot {
        self.used[idx] = true;
        Slot::from_team(self.teams[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probability::{RandomJitter, WinProbability};
    use crate::samples::generate_sample_field;

    fn team(name: &str, seed: u8, net_rtg: f64) -> Team {
        Team {
            name: name.into(),
            seed,
            net_rtg,
            off_rtg: 100.0 + net_rtg / 2.0,
            def_rtg: 100.0 - net_rtg / 2.0,
            ..Default::default()
        }
    }

    /// Four regions where a lower seed number is always the stronger team.
    fn chalk_field() -> Vec<Team> {
        let mut teams = Vec::new();
        for region in REGIONS {
            for &(high, low) in &SEED_MATCHUPS {
                for seed in [high, low] {
                    teams.push(team(&format!("{region} {seed}"), seed, 30.0 - f64::from(seed) * 2.0));
                }
            }
        }
        teams
    }

    fn name(slot: &Slot) -> Option<&str> {
        slot.team().map(|t| t.name.as_str())
    }

    fn winner(bracket: &Bracket, round: RoundKey, index: usize) -> Option<String> {
        bracket.matchup(round, index).unwrap().winner.as_ref().map(|t| t.name.clone())
    }

    #[test]
    fn initialize_allocates_all_rounds() {
        let bracket = BracketEngine::new().initialize();
        let sizes: Vec<usize> = bracket.rounds().map(|(_, m)| m.len()).collect();
        assert_eq!(sizes, vec![32, 16, 8, 4, 2, 1]);
        assert!(bracket.is_empty());
    }

    #[test]
    fn seeding_follows_the_seed_pair_table() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        let warnings = engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");

        let round1 = bracket.round(RoundKey::Round1);
        assert_eq!(name(&round1[0].team1), Some("East 1"));
        assert_eq!(name(&round1[0].team2), Some("East 16"));
        assert_eq!(name(&round1[1].team1), Some("East 8"));
        assert_eq!(name(&round1[7].team2), Some("East 15"));
        assert_eq!(name(&round1[8].team1), Some("West 1"));
        assert_eq!(name(&round1[31].team1), Some("Midwest 2"));
        assert!(round1.iter().all(|m| m.winner.is_none()));
    }

    #[test]
    fn seeding_does_not_depend_on_input_order_within_region() {
        let engine = BracketEngine::new();
        let mut teams = chalk_field();
        teams[0..16].reverse();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &teams).unwrap();
        let round1 = bracket.round(RoundKey::Round1);
        assert_eq!(name(&round1[0].team1), Some("East 1"));
        assert_eq!(name(&round1[2].team2), Some("East 12"));
    }

    #[test]
    fn missing_seed_is_borrowed_from_another_region() {
        let engine = BracketEngine::new();
        let mut teams = chalk_field();
        // East ends up with two 15 seeds and no 16; West with two 16s and no 15.
        let east16 = teams.iter().position(|t| t.name == "East 16").unwrap();
        let west15 = teams.iter().position(|t| t.name == "West 15").unwrap();
        teams[east16].seed = 15;
        teams[west15].seed = 16;

        let mut bracket = engine.initialize();
        let warnings = engine.seed_round1(&mut bracket, &teams).unwrap();
        assert_eq!(
            warnings,
            vec![
                DataWarning::SeedBorrowed { region: "East".into(), seed: 16, team: "West 15".into() },
                DataWarning::SeedBorrowed { region: "West".into(), seed: 15, team: "East 15".into() },
            ]
        );

        // Each region keeps the first team it owns for a seed; only the spare moves.
        let round1 = bracket.round(RoundKey::Round1);
        assert_eq!(name(&round1[0].team2), Some("West 15"));
        assert_eq!(name(&round1[7].team2), Some("East 16"));
        assert_eq!(name(&round1[8].team2), Some("West 16"));
        assert_eq!(name(&round1[15].team2), Some("East 15"));
    }

    #[test]
    fn gap_without_a_spare_stays_in_its_region() {
        let engine = BracketEngine::new();
        let mut teams = chalk_field();
        let east16 = teams.iter().position(|t| t.name == "East 16").unwrap();
        teams[east16] = team("East 15b", 15, 0.0);

        let mut bracket = engine.initialize();
        let warnings = engine.seed_round1(&mut bracket, &teams).unwrap();
        assert_eq!(warnings, vec![DataWarning::SeedMissing { region: "East".into(), seed: 16 }]);

        let round1 = bracket.round(RoundKey::Round1);
        assert!(round1[0].team2.is_open());
        for (index, region) in [(8, "West"), (16, "South"), (24, "Midwest")] {
            let expected = format!("{region} 16");
            assert_eq!(name(&round1[index].team2), Some(expected.as_str()));
        }
    }

    #[test]
    fn short_field_warns_and_leaves_open_slots() {
        let engine = BracketEngine::new();
        let teams: Vec<Team> = chalk_field().into_iter().take(20).collect();
        let mut bracket = engine.initialize();
        let warnings = engine.seed_round1(&mut bracket, &teams).unwrap();

        assert_eq!(warnings[0], DataWarning::MissingTeams { expected: 64, found: 20 });
        assert!(warnings.iter().any(|w| matches!(w, DataWarning::SeedMissing { .. })));

        // East is complete, the Midwest is empty.
        assert!(bracket.round(RoundKey::Round1)[0].team1.team().is_some());
        assert!(bracket.round(RoundKey::Round1)[31].team1.is_open());
        assert!(bracket.round(RoundKey::Round1)[31].team2.is_open());
    }

    #[test]
    fn invalid_seed_aborts_without_touching_bracket() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        let before = bracket.clone();

        let mut teams = chalk_field();
        teams[5].seed = 17;
        let err = engine.seed_round1(&mut bracket, &teams).unwrap_err();
        assert!(matches!(err, BracketError::InvalidSeed { seed: 17, .. }));
        assert_eq!(bracket, before);

        let mut teams = chalk_field();
        teams.push(team("Extra", 1, 1.0));
        assert_eq!(
            engine.seed_round1(&mut bracket, &teams).unwrap_err(),
            BracketError::TooManyTeams(65)
        );

        let mut teams = chalk_field();
        teams[0].name = "  ".into();
        assert!(matches!(
            engine.seed_round1(&mut bracket, &teams).unwrap_err(),
            BracketError::InvalidTeam(_)
        ));
        assert_eq!(bracket, before);
    }

    #[test]
    fn bye_entries_become_bye_slots_and_auto_advance() {
        let engine = BracketEngine::new();
        let mut teams = chalk_field();
        let east16 = teams.iter().position(|t| t.name == "East 16").unwrap();
        teams[east16] = team("Bye", 0, 0.0);

        let mut bracket = engine.initialize();
        let warnings = engine.seed_round1(&mut bracket, &teams).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
        assert!(bracket.round(RoundKey::Round1)[0].team2.is_bye());

        engine.resolve_round(&mut bracket, RoundKey::Round1);
        assert_eq!(winner(&bracket, RoundKey::Round1, 0).as_deref(), Some("East 1"));
    }

    #[test]
    fn propagation_fills_the_correct_slot() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();

        let x = bracket.round(RoundKey::Round1)[0].team1.team().cloned().unwrap();
        engine.set_winner(&mut bracket, RoundKey::Round1, 0, &x).unwrap();
        let r2 = &bracket.round(RoundKey::Round2)[0];
        assert_eq!(name(&r2.team1), Some("East 1"));
        assert!(r2.team2.is_open());

        let y = bracket.round(RoundKey::Round1)[1].team2.team().cloned().unwrap();
        engine.set_winner(&mut bracket, RoundKey::Round1, 1, &y).unwrap();
        let r2 = &bracket.round(RoundKey::Round2)[0];
        assert_eq!(name(&r2.team1), Some("East 1"));
        assert_eq!(name(&r2.team2), Some("East 9"));
        assert_eq!(r2.winner.as_ref().map(|t| t.name.as_str()), Some("East 1"));
    }

    #[test]
    fn lone_team_auto_advances_through_open_slots() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine
            .propagate(&mut bracket, RoundKey::Round1, 5, Some(team("Solo", 3, 20.0)))
            .unwrap();

        // 5 -> round2[2].team2 -> round3[1].team1 -> round4[0].team2 -> ...
        assert_eq!(name(&bracket.round(RoundKey::Round2)[2].team2), Some("Solo"));
        assert_eq!(name(&bracket.round(RoundKey::Round3)[1].team1), Some("Solo"));
        assert_eq!(name(&bracket.round(RoundKey::Round4)[0].team2), Some("Solo"));
        assert_eq!(bracket.champion().map(|t| t.name.as_str()), Some("Solo"));
    }

    #[test]
    fn propagating_nothing_clears_the_path() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine
            .propagate(&mut bracket, RoundKey::Round1, 0, Some(team("Solo", 1, 20.0)))
            .unwrap();
        assert!(bracket.champion().is_some());

        engine.propagate(&mut bracket, RoundKey::Round1, 0, None).unwrap();
        assert!(bracket.champion().is_none());
        assert!(bracket.round(RoundKey::Round2)[0].team1.is_open());
    }

    #[test]
    fn propagated_bye_marker_is_not_scored() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine
            .propagate(&mut bracket, RoundKey::Round1, 1, Some(team("East 8", 8, 14.0)))
            .unwrap();
        engine
            .propagate(&mut bracket, RoundKey::Round1, 0, Some(team("Placeholder", 0, 99.0)))
            .unwrap();

        let r2 = &bracket.round(RoundKey::Round2)[0];
        assert!(r2.team1.is_bye());
        assert_eq!(r2.winner.as_ref().map(|t| t.name.as_str()), Some("East 8"));
        assert_eq!(r2.probability1, Some(0.0));
    }

    #[test]
    fn stored_probability_matches_the_decided_winner() {
        for seed in 0..20 {
            let probability = WinProbability::new().jitter(RandomJitter::seeded(seed));
            let engine = BracketEngine::with_resolver(MatchupResolver::with_probability(probability));
            let mut bracket = engine.initialize();
            engine.seed_round1(&mut bracket, &generate_sample_field()).unwrap();
            engine.auto_fill(&mut bracket);

            for (round, matchups) in bracket.rounds() {
                for (index, m) in matchups.iter().enumerate() {
                    let p = m.probability1.unwrap();
                    let team1_won = m.winner.as_ref().map(|w| w.name.as_str()) == name(&m.team1);
                    assert_eq!(team1_won, p >= 50.0, "rng {seed}, {round} matchup {index}: p = {p}");
                }
            }
        }
    }

    #[test]
    fn auto_fill_produces_a_chalk_champion() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        engine.auto_fill(&mut bracket);

        for (_, matchups) in bracket.rounds() {
            assert!(matchups.iter().all(|m| m.winner.is_some()));
        }
        let final_four: Vec<String> = bracket
            .round(RoundKey::Round5)
            .iter()
            .flat_map(|m| [&m.team1, &m.team2])
            .filter_map(|s| s.team().map(|t| t.name.clone()))
            .collect();
        assert_eq!(final_four, vec!["East 1", "West 1", "South 1", "Midwest 1"]);
        assert_eq!(bracket.champion().map(|t| t.seed), Some(1));
    }

    #[test]
    fn override_cascades_through_every_dependent_round() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        engine.auto_fill(&mut bracket);
        assert_eq!(winner(&bracket, RoundKey::Round2, 0).as_deref(), Some("East 1"));

        // Upset the East 1 seed in the Round of 32.
        let underdog = bracket.round(RoundKey::Round2)[0].team2.team().cloned().unwrap();
        assert_eq!(underdog.name, "East 8");
        engine.set_winner(&mut bracket, RoundKey::Round2, 0, &underdog).unwrap();

        assert_eq!(name(&bracket.round(RoundKey::Round3)[0].team1), Some("East 8"));
        // East 4 now beats East 8 in the Sweet 16 and carries on upward.
        assert_eq!(winner(&bracket, RoundKey::Round3, 0).as_deref(), Some("East 4"));
        assert_eq!(name(&bracket.round(RoundKey::Round4)[0].team1), Some("East 4"));
        assert_eq!(winner(&bracket, RoundKey::Round4, 0).as_deref(), Some("East 2"));
        assert_eq!(name(&bracket.round(RoundKey::Round5)[0].team1), Some("East 2"));
        let finalists: Vec<&str> = [&bracket.round(RoundKey::Round6)[0].team1, &bracket.round(RoundKey::Round6)[0].team2]
            .into_iter()
            .filter_map(name)
            .collect();
        assert!(!finalists.contains(&"East 1"));

        // The other half of the bracket is untouched.
        assert_eq!(name(&bracket.round(RoundKey::Round5)[1].team1), Some("South 1"));
    }

    #[test]
    fn later_override_is_replaced_when_an_earlier_game_changes() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        engine.auto_fill(&mut bracket);

        let east16 = bracket.round(RoundKey::Round1)[0].team2.team().cloned().unwrap();
        engine.set_winner(&mut bracket, RoundKey::Round1, 0, &east16).unwrap();

        assert_eq!(name(&bracket.round(RoundKey::Round2)[0].team1), Some("East 16"));
        assert_eq!(winner(&bracket, RoundKey::Round2, 0).as_deref(), Some("East 8"));
        let champion = bracket.champion().map(|t| t.name.clone()).unwrap();
        assert_ne!(champion, "East 1");
    }

    #[test]
    fn set_winner_rejects_non_participants_atomically() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        engine.auto_fill(&mut bracket);
        let before = bracket.clone();

        let stranger = team("West 1", 1, 28.0);
        let err = engine.set_winner(&mut bracket, RoundKey::Round1, 0, &stranger).unwrap_err();
        assert_eq!(
            err,
            BracketError::InvalidWinner { round: RoundKey::Round1, index: 0, team: "West 1".into() }
        );
        assert_eq!(bracket, before);

        let err = engine.set_winner(&mut bracket, RoundKey::Round3, 8, &stranger).unwrap_err();
        assert!(matches!(err, BracketError::OutOfBounds { index: 8, len: 8, .. }));
        assert!(engine.propagate(&mut bracket, RoundKey::Round6, 1, None).is_err());
        assert_eq!(bracket, before);
    }

    #[test]
    fn championship_pick_sets_the_champion() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &chalk_field()).unwrap();
        engine.auto_fill(&mut bracket);

        let title_game = bracket.round(RoundKey::Round6)[0].clone();
        let loser = [&title_game.team1, &title_game.team2]
            .into_iter()
            .filter_map(Slot::team)
            .find(|t| Some(t.name.as_str()) != bracket.champion().map(|c| c.name.as_str()))
            .cloned()
            .unwrap();
        engine.set_winner(&mut bracket, RoundKey::Round6, 0, &loser).unwrap();
        assert_eq!(bracket.champion().map(|t| t.name.clone()), Some(loser.name));
    }

    #[test]
    fn clear_resets_to_initial_state() {
        let engine = BracketEngine::new();
        let mut bracket = engine.initialize();
        engine.seed_round1(&mut bracket, &generate_sample_field()).unwrap();
        engine.auto_fill(&mut bracket);
        assert!(bracket.champion().is_some());

        engine.clear(&mut bracket);
        assert_eq!(bracket, Bracket::new());
    }

    #[test]
    fn home_site_favors_team1_in_every_game() {
        let neutral = BracketEngine::new();
        let home = BracketEngine::new().site(GameSite::Home);
        let mut a = neutral.initialize();
        let mut b = home.initialize();
        // Near-identical teams: team 1 is only slightly weaker.
        let teams = vec![team("Host", 1, 10.0), team("Guest", 16, 10.5)];
        neutral.seed_round1(&mut a, &teams).unwrap();
        home.seed_round1(&mut b, &teams).unwrap();
        neutral.resolve_round(&mut a, RoundKey::Round1);
        home.resolve_round(&mut b, RoundKey::Round1);
        assert_eq!(winner(&a, RoundKey::Round1, 0).as_deref(), Some("Guest"));
        assert_eq!(winner(&b, RoundKey::Round1, 0).as_deref(), Some("Host"));
    }
}
