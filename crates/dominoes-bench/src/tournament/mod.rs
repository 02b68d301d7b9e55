use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{Level, event};

use dominoes_bot::strategy::{
    DoublesFirst, HeaviestFirst, Identity, Omniscient, Reverse, SampledLookahead, Shuffle,
    Strategy,
};
use dominoes_core::game::state::Game;
use dominoes_core::model::player::Seat;

use crate::analytics::{SeriesAnalytics, render_markdown};
use crate::config::{AgentConfig, AgentKind, BenchConfig, ResolvedOutputs};
use crate::series::Series;

/// Plays the configured line-up over seeded series and writes one
/// JSONL row per finished game plus a Markdown summary.
pub struct TournamentRunner {
    config: BenchConfig,
    outputs: ResolvedOutputs,
}

#[derive(Debug)]
pub struct RunSummary {
    pub series_played: usize,
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
}

#[derive(Debug, Serialize)]
struct GameRow<'a> {
    series: usize,
    game: usize,
    starting_seat: Seat,
    player: Seat,
    agent: &'a str,
    won: bool,
    points: i32,
    moves: usize,
    north_south_score: u32,
    east_west_score: u32,
}

impl TournamentRunner {
    pub fn new(config: BenchConfig, outputs: ResolvedOutputs) -> Result<Self> {
        config.validate().context("validating tournament config")?;
        Ok(Self { config, outputs })
    }

    pub fn run(&self) -> Result<RunSummary> {
        ensure_parent_dir(&self.outputs.jsonl)?;
        ensure_parent_dir(&self.outputs.summary_md)?;

        let file = File::create(&self.outputs.jsonl)
            .with_context(|| format!("creating {}", self.outputs.jsonl.display()))?;
        let mut writer = BufWriter::new(file);

        let base_seed = self.config.series.seed.unwrap_or_else(rand::random);
        let mut analytics = SeriesAnalytics::new();
        let mut rows_written = 0usize;

        for series_index in 0..self.config.series.count {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(series_index as u64));
            let mut strategies = build_strategies(&self.config.agents, base_seed, series_index);
            let mut series = Series::new(&mut rng, self.config.series.target_score);

            loop {
                play_out(series.current_game_mut(), &mut strategies)?;

                let game_index = series.games().len() - 1;
                let finished_game = series.current_game();
                let result = finished_game
                    .result()
                    .expect("the game was just played to completion");
                let starting_seat = finished_game.starting_seat();
                let moves = finished_game.moves().len();

                let series_goes_on = series.next_game(&mut rng)?.is_some();
                let [north_south_score, east_west_score] = series.scores();

                let row = GameRow {
                    series: series_index,
                    game: game_index,
                    starting_seat,
                    player: result.player(),
                    agent: self.config.agents[result.player().index()].name.as_str(),
                    won: result.won(),
                    points: result.points(),
                    moves,
                    north_south_score,
                    east_west_score,
                };
                serde_json::to_writer(&mut writer, &row)?;
                writeln!(writer)?;
                rows_written += 1;
                analytics.record(&result);

                if !series_goes_on {
                    break;
                }
            }

            event!(
                target: "dominoes_bench::tournament",
                Level::INFO,
                series = series_index,
                games = series.games().len(),
                north_south = series.scores()[0],
                east_west = series.scores()[1],
                "series finished"
            );
        }

        writer.flush().context("flushing game rows")?;

        let summary = analytics.summary();
        let markdown = render_markdown(&self.config, &summary, self.config.series.count);
        fs::write(&self.outputs.summary_md, markdown)
            .with_context(|| format!("writing {}", self.outputs.summary_md.display()))?;

        Ok(RunSummary {
            series_played: self.config.series.count,
            games_played: analytics.games(),
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
        })
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Drives a game to its result: each turn applies the seat's ordering
/// strategy and plays the front legal move.
fn play_out(game: &mut Game, strategies: &mut [Box<dyn Strategy>; 4]) -> Result<()> {
    while game.result().is_none() {
        strategies[game.turn().index()].apply(game);
        let mv = *game
            .legal_moves()
            .first()
            .context("an in-progress game offers a legal move")?;
        game.make_move(mv).context("playing the chosen move")?;
    }
    Ok(())
}

fn build_strategies(
    agents: &[AgentConfig],
    base_seed: u64,
    series_index: usize,
) -> [Box<dyn Strategy>; 4] {
    std::array::from_fn(|seat| {
        let agent = &agents[seat];
        // Distinct, reproducible stream per (run, series, seat).
        let seed = base_seed
            .wrapping_mul(0x9e37_79b9_7f4a_7c15)
            .wrapping_add((series_index as u64) << 8)
            .wrapping_add(seat as u64);
        build_strategy(agent, seed)
    })
}

fn build_strategy(agent: &AgentConfig, seed: u64) -> Box<dyn Strategy> {
    match agent.kind {
        AgentKind::Identity => Box::new(Identity),
        AgentKind::Shuffle => Box::new(Shuffle::seeded(seed)),
        AgentKind::Reverse => Box::new(Reverse),
        AgentKind::HeaviestFirst => Box::new(HeaviestFirst),
        AgentKind::DoublesFirst => Box::new(DoublesFirst),
        AgentKind::Omniscient => Box::new(Omniscient::new(agent.start_move)),
        AgentKind::SampledLookahead => {
            let lookahead = match agent.samples {
                Some(samples) => SampledLookahead::sampling(agent.start_move, samples),
                None => SampledLookahead::exhaustive(agent.start_move),
            };
            Box::new(lookahead.with_seed(seed).with_max_attempts(agent.max_attempts))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_strategy, play_out};
    use crate::config::{AgentConfig, AgentKind};
    use dominoes_bot::strategy::Strategy;
    use dominoes_core::game::state::Game;
    use dominoes_core::model::player::Seat;

    fn agent(kind: AgentKind) -> AgentConfig {
        AgentConfig {
            name: "seat".to_string(),
            kind,
            start_move: 20,
            samples: Some(4),
            max_attempts: 100,
        }
    }

    #[test]
    fn every_agent_kind_builds_and_orders() {
        for kind in [
            AgentKind::Identity,
            AgentKind::Shuffle,
            AgentKind::Reverse,
            AgentKind::HeaviestFirst,
            AgentKind::DoublesFirst,
            AgentKind::Omniscient,
            AgentKind::SampledLookahead,
        ] {
            let mut strategy = build_strategy(&agent(kind), 7);
            let mut game = Game::with_seed(Seat::North, 7);
            let count = game.legal_moves().len();
            strategy.apply(&mut game);
            assert_eq!(game.legal_moves().len(), count, "{kind:?} changed the set");
        }
    }

    #[test]
    fn play_out_finishes_a_game() {
        let mut strategies: [Box<dyn Strategy>; 4] = [
            build_strategy(&agent(AgentKind::Identity), 0),
            build_strategy(&agent(AgentKind::HeaviestFirst), 1),
            build_strategy(&agent(AgentKind::DoublesFirst), 2),
            build_strategy(&agent(AgentKind::Reverse), 3),
        ];
        let mut game = Game::with_seed(Seat::North, 99);
        play_out(&mut game, &mut strategies).unwrap();
        assert!(game.result().is_some());
    }
}
