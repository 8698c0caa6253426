use crate::engine::REGIONS;
use crate::{SEED_MATCHUPS, Team};

struct SampleTeam {
    name: &'static str,
    net_rtg: f64,
    off_rtg: f64,
    def_rtg: f64,
    adj_tempo: f64,
    luck: f64,
    sos: f64,
}

const fn sample(
    name: &'static str,
    net_rtg: f64,
    off_rtg: f64,
    def_rtg: f64,
    adj_tempo: f64,
    luck: f64,
    sos: f64,
) -> SampleTeam {
    SampleTeam { name, net_rtg, off_rtg, def_rtg, adj_tempo, luck, sos }
}

/// Base profiles, one per seed line.
const SAMPLE_TEAMS: [SampleTeam; 16] = [
    sample("Michigan", 35.14, 122.4, 87.3, 73.0, 0.064, 14.03),
    sample("Purdue", 32.42, 129.4, 97.0, 66.5, 0.070, 5.25),
    sample("Duke", 32.05, 124.6, 92.6, 68.8, 0.043, -3.15),
    sample("Iowa St.", 29.65, 122.1, 92.5, 69.9, 0.039, 1.02),
    sample("Gonzaga", 29.12, 122.3, 93.1, 72.2, 0.103, 9.42),
    sample("Connecticut", 27.97, 122.3, 94.3, 66.6, 0.011, 1.49),
    sample("Houston", 27.97, 119.2, 91.2, 64.5, 0.048, 4.17),
    sample("Louisville", 27.89, 126.0, 98.1, 71.6, 0.052, -8.16),
    sample("Arizona", 27.88, 122.5, 94.6, 72.1, 0.086, 2.42),
    sample("Vanderbilt", 27.50, 125.2, 97.7, 72.3, 0.030, -0.27),
    sample("Kentucky", 26.96, 121.9, 94.9, 71.6, -0.117, -6.85),
    sample("BYU", 26.50, 120.5, 94.0, 72.8, 0.099, -0.43),
    sample("Kansas", 25.00, 118.0, 93.0, 70.0, 0.050, 2.00),
    sample("North Carolina", 24.50, 117.5, 93.0, 71.0, 0.040, 1.50),
    sample("Villanova", 23.00, 116.0, 93.0, 69.0, 0.030, 0.50),
    sample("Baylor", 22.50, 115.5, 93.0, 70.5, 0.025, -1.00),
];

/// A full, deterministic 64-team field for demos and tests.
///
/// Teams come out region by region in Round-of-64 pairing order, so the
/// result can be handed straight to `BracketEngine::seed_round1`. Each seed
/// line gets a base profile weakened in proportion to the seed.
pub fn generate_sample_field() -> Vec<Team> {
    let mut teams = Vec::with_capacity(REGIONS.len() * 16);
    for region in REGIONS {
        for &(high, low) in &SEED_MATCHUPS {
            teams.push(sample_team(region, high));
            teams.push(sample_team(region, low));
        }
    }
    teams
}

fn sample_team(region: &str, seed: u8) -> Team {
    let base = &SAMPLE_TEAMS[usize::from(seed - 1) % SAMPLE_TEAMS.len()];
    let lines = f64::from(seed - 1);
    Team {
        name: format!("{} ({region})", base.name),
        seed,
        net_rtg: base.net_rtg - lines * 1.5,
        off_rtg: base.off_rtg - lines * 0.8,
        def_rtg: base.def_rtg + lines * 0.5,
        adj_tempo: base.adj_tempo,
        luck: base.luck,
        sos: base.sos - lines * 0.5,
    }
}
