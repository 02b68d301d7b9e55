use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use dominoes_core::game::result::GameResult;
use dominoes_core::model::player::Team;

use crate::config::BenchConfig;

const CONFIDENCE_Z: f64 = 1.96; // 95% CI

/// Accumulates per-game outcomes across every series of a run.
///
/// The unit of analysis is the signed point differential of a single
/// game (positive favors North/South), the same scalar the engine's
/// search maximizes.
#[derive(Debug, Default)]
pub struct SeriesAnalytics {
    differentials: Vec<f64>,
    team_games: [usize; 2],
    tied_games: usize,
    hand_wins: usize,
    stuck_games: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub games: usize,
    pub north_south_games: usize,
    pub east_west_games: usize,
    pub tied_games: usize,
    pub hand_wins: usize,
    pub stuck_games: usize,
    pub mean_differential: f64,
    pub std_dev: Option<f64>,
    pub ci_half_width: Option<f64>,
    pub p_value: Option<f64>,
}

impl SeriesAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: &GameResult) {
        self.differentials.push(result.points() as f64);
        match result.scoring_team() {
            Some(team) => self.team_games[team.index()] += 1,
            None => self.tied_games += 1,
        }
        if result.won() {
            self.hand_wins += 1;
        } else {
            self.stuck_games += 1;
        }
    }

    pub fn games(&self) -> usize {
        self.differentials.len()
    }

    pub fn summary(&self) -> AnalyticsSummary {
        let n = self.differentials.len();
        let mean = if n == 0 {
            0.0
        } else {
            self.differentials.iter().sum::<f64>() / n as f64
        };

        let std_dev = (n >= 2).then(|| {
            let variance = self
                .differentials
                .iter()
                .map(|d| (d - mean).powi(2))
                .sum::<f64>()
                / (n - 1) as f64;
            variance.sqrt()
        });

        let standard_error = std_dev
            .filter(|sd| *sd > 0.0)
            .map(|sd| sd / (n as f64).sqrt());
        let ci_half_width = standard_error.map(|se| CONFIDENCE_Z * se);
        let p_value = standard_error.map(|se| {
            let normal = Normal::new(0.0, 1.0).expect("standard normal parameters are valid");
            2.0 * (1.0 - normal.cdf((mean / se).abs()))
        });

        AnalyticsSummary {
            games: n,
            north_south_games: self.team_games[Team::NorthSouth.index()],
            east_west_games: self.team_games[Team::EastWest.index()],
            tied_games: self.tied_games,
            hand_wins: self.hand_wins,
            stuck_games: self.stuck_games,
            mean_differential: mean,
            std_dev,
            ci_half_width,
            p_value,
        }
    }
}

/// Renders the run summary as a Markdown document.
pub fn render_markdown(
    config: &BenchConfig,
    summary: &AnalyticsSummary,
    series_played: usize,
) -> String {
    let mut out = String::new();
    out.push_str(&format!("# Run `{}`\n\n", config.run_id));
    out.push_str(&format!(
        "{series_played} series to {} points, {} games total.\n\n",
        config.series.target_score, summary.games
    ));

    out.push_str("## Seats\n\n");
    out.push_str("| seat | agent | kind |\n|---|---|---|\n");
    let seats = ["North", "East", "South", "West"];
    for (seat, agent) in seats.iter().zip(&config.agents) {
        out.push_str(&format!(
            "| {seat} | {} | {:?} |\n",
            agent.name, agent.kind
        ));
    }

    out.push_str("\n## Games\n\n");
    out.push_str("| metric | value |\n|---|---|\n");
    out.push_str(&format!(
        "| scored by North/South | {} |\n",
        summary.north_south_games
    ));
    out.push_str(&format!(
        "| scored by East/West | {} |\n",
        summary.east_west_games
    ));
    out.push_str(&format!("| tied | {} |\n", summary.tied_games));
    out.push_str(&format!("| won by emptying a hand | {} |\n", summary.hand_wins));
    out.push_str(&format!("| stuck | {} |\n", summary.stuck_games));

    out.push_str("\n## Point differential (positive favors North/South)\n\n");
    out.push_str(&format!("- mean: {:.2}\n", summary.mean_differential));
    if let Some(sd) = summary.std_dev {
        out.push_str(&format!("- std dev: {sd:.2}\n"));
    }
    if let Some(half) = summary.ci_half_width {
        out.push_str(&format!(
            "- 95% CI: {:.2} .. {:.2}\n",
            summary.mean_differential - half,
            summary.mean_differential + half
        ));
    }
    if let Some(p) = summary.p_value {
        out.push_str(&format!("- two-sided p-value vs zero: {p:.4}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::SeriesAnalytics;
    use dominoes_core::game::result::GameResult;
    use dominoes_core::model::player::Seat;

    #[test]
    fn summary_counts_outcome_kinds() {
        let mut analytics = SeriesAnalytics::new();
        analytics.record(&GameResult::new(Seat::North, true, 20));
        analytics.record(&GameResult::new(Seat::East, true, -10));
        analytics.record(&GameResult::new(Seat::South, false, 0));
        analytics.record(&GameResult::new(Seat::West, false, -6));

        let summary = analytics.summary();
        assert_eq!(summary.games, 4);
        assert_eq!(summary.north_south_games, 1);
        assert_eq!(summary.east_west_games, 2);
        assert_eq!(summary.tied_games, 1);
        assert_eq!(summary.hand_wins, 2);
        assert_eq!(summary.stuck_games, 2);
        assert_eq!(summary.mean_differential, 1.0);
    }

    #[test]
    fn dispersion_fields_need_at_least_two_games() {
        let mut analytics = SeriesAnalytics::new();
        analytics.record(&GameResult::new(Seat::North, true, 20));
        let summary = analytics.summary();
        assert_eq!(summary.mean_differential, 20.0);
        assert!(summary.std_dev.is_none());
        assert!(summary.ci_half_width.is_none());
        assert!(summary.p_value.is_none());
    }

    #[test]
    fn identical_differentials_have_no_spread() {
        let mut analytics = SeriesAnalytics::new();
        analytics.record(&GameResult::new(Seat::North, true, 5));
        analytics.record(&GameResult::new(Seat::South, true, 5));
        let summary = analytics.summary();
        assert_eq!(summary.std_dev, Some(0.0));
        assert!(summary.ci_half_width.is_none());
    }
}
