//! Train command - Run self-play training and report reward statistics

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    cli::output::create_training_progress,
    tictactoe::{DRAW_REWARD, ILLEGAL_MOVE_REWARD, LOSS_REWARD, WIN_REWARD},
    trainer::{SelfPlayTrainer, TrainerConfig},
};

#[derive(Parser, Debug)]
#[command(about = "Train a self-play agent")]
pub struct TrainArgs {
    /// Number of generations (frozen-table promotions)
    #[arg(long, short = 'g', default_value_t = 30_000)]
    pub generations: usize,

    /// Episodes per generation
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

    /// Learning rate (alpha)
    #[arg(long, default_value_t = 0.8)]
    pub learning_rate: f64,

    /// Discount factor (gamma)
    #[arg(long, default_value_t = 0.95)]
    pub discount_factor: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON training summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Suppress the progress bar
    #[arg(long)]
    pub quiet: bool,
}

#[derive(Debug, Default, Serialize)]
struct SummaryStats {
    total_episodes: usize,
    wins: usize,
    draws: usize,
    losses: usize,
    illegal_moves: usize,
    win_rate: f64,
    draw_rate: f64,
    loss_rate: f64,
}

impl SummaryStats {
    fn record(&mut self, reward: f64) {
        self.total_episodes += 1;
        if reward == WIN_REWARD {
            self.wins += 1;
        } else if reward == DRAW_REWARD {
            self.draws += 1;
        } else if reward == LOSS_REWARD {
            self.losses += 1;
        } else if reward == ILLEGAL_MOVE_REWARD {
            self.illegal_moves += 1;
        }
    }

    fn finalize(&mut self) {
        if self.total_episodes > 0 {
            let total = self.total_episodes as f64;
            self.win_rate = self.wins as f64 / total;
            self.draw_rate = self.draws as f64 / total;
            self.loss_rate = self.losses as f64 / total;
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile {
    training: SummaryStats,
    final_generation_mean_reward: f64,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    generations: usize,
    episodes_per_generation: usize,
    learning_rate: f64,
    discount_factor: f64,
    seed: Option<u64>,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = TrainerConfig {
        generations: args.generations,
        episodes_per_generation: args.episodes,
        learning_rate: args.learning_rate,
        discount_factor: args.discount_factor,
        seed: args.seed,
    };

    println!(
        "Training for {} generations of {} episodes (alpha={}, gamma={})",
        config.generations, config.episodes_per_generation, config.learning_rate, config.discount_factor
    );

    let progress = if args.quiet {
        None
    } else {
        Some(create_training_progress(config.generations as u64)?)
    };

    let mut trainer = SelfPlayTrainer::new(config);
    let mut stats = SummaryStats::default();
    let mut last_mean = 0.0;

    trainer.train(|generation| {
        for &reward in &generation.final_rewards {
            stats.record(reward);
        }
        last_mean = generation.mean_reward();
        if let Some(pb) = &progress {
            pb.set_message(format!("mean reward {last_mean:.2}"));
            pb.inc(1);
        }
    });

    if let Some(pb) = &progress {
        pb.finish_with_message(format!("mean reward {last_mean:.2}"));
    }
    stats.finalize();

    println!("\n=== Training Results ===");
    println!("Episodes: {}", stats.total_episodes);
    println!("Wins: {} ({:.1}%)", stats.wins, stats.win_rate * 100.0);
    println!("Draws: {} ({:.1}%)", stats.draws, stats.draw_rate * 100.0);
    println!("Losses: {} ({:.1}%)", stats.losses, stats.loss_rate * 100.0);
    println!("Illegal-move terminations: {}", stats.illegal_moves);
    println!("Final generation mean reward: {last_mean:.3}");

    if let Some(raw_path) = &args.summary {
        let path = sanitize_summary_path(raw_path);
        let summary = TrainingSummaryFile {
            training: stats,
            final_generation_mean_reward: last_mean,
            metadata: SummaryMetadata {
                generations: args.generations,
                episodes_per_generation: args.episodes,
                learning_rate: args.learning_rate,
                discount_factor: args.discount_factor,
                seed: args.seed,
            },
        };

        let file = File::create(&path)
            .with_context(|| format!("failed to create summary file {}", path.display()))?;
        to_writer_pretty(file, &summary)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        println!("Summary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary.json")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/summary")),
            PathBuf::from("out/summary.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/")),
            PathBuf::from("out/training_summary.json")
        );
    }

    #[test]
    fn test_summary_stats_classification() {
        let mut stats = SummaryStats::default();
        for reward in [17.0, 17.0, -1.0, -19.0, -10.0] {
            stats.record(reward);
        }
        stats.finalize();

        assert_eq!(stats.total_episodes, 5);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.draws, 1);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.illegal_moves, 1);
        assert!((stats.win_rate - 0.4).abs() < 1e-12);
    }
}
