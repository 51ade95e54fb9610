//! Seeded smoke tests over the self-play training loop.

use tttrl::{
    SelfPlayTrainer, TrainerConfig,
    tictactoe::{DRAW_REWARD, ILLEGAL_MOVE_REWARD, LOSS_REWARD, WIN_REWARD},
};

fn config(generations: usize, episodes: usize, seed: u64) -> TrainerConfig {
    TrainerConfig {
        generations,
        episodes_per_generation: episodes,
        seed: Some(seed),
        ..TrainerConfig::default()
    }
}

#[test]
fn episode_count_matches_the_schedule() {
    let mut trainer = SelfPlayTrainer::new(config(4, 25, 11));
    trainer.train(|_| {});
    assert_eq!(trainer.total_episodes(), 100);
}

#[test]
fn every_final_reward_is_one_of_the_four_terminal_values() {
    let mut trainer = SelfPlayTrainer::new(config(2, 50, 12));
    trainer.train(|stats| {
        for &reward in &stats.final_rewards {
            assert!(
                reward == WIN_REWARD
                    || reward == DRAW_REWARD
                    || reward == LOSS_REWARD
                    || reward == ILLEGAL_MOVE_REWARD,
                "unexpected final reward {reward}"
            );
        }
    });
}

#[test]
fn generation_stats_cover_every_episode() {
    let mut trainer = SelfPlayTrainer::new(config(3, 10, 13));
    let mut generations = Vec::new();
    trainer.train(|stats| generations.push(stats.generation));

    assert_eq!(generations, vec![0, 1, 2]);

    let stats = trainer.train_generation(3);
    assert_eq!(stats.final_rewards.len(), 10);
    assert_eq!(stats.mean_rewards.len(), 10);
    let last_mean = stats.mean_rewards.last().copied().unwrap();
    assert!((last_mean - stats.mean_reward()).abs() < 1e-12);
}

#[test]
fn promotion_happens_after_each_generation() {
    let mut trainer = SelfPlayTrainer::new(config(1, 30, 14));
    trainer.train(|_| {});
    // train() promotes after the final generation
    assert_eq!(trainer.frozen_table(), trainer.learning_table());

    trainer.train_generation(1);
    assert_ne!(trainer.frozen_table(), trainer.learning_table());
}

#[test]
fn identical_seeds_reproduce_identical_runs() {
    let mut a = SelfPlayTrainer::new(config(2, 40, 15));
    let mut b = SelfPlayTrainer::new(config(2, 40, 15));

    let mut rewards_a = Vec::new();
    let mut rewards_b = Vec::new();
    a.train(|stats| rewards_a.extend_from_slice(&stats.final_rewards));
    b.train(|stats| rewards_b.extend_from_slice(&stats.final_rewards));

    assert_eq!(rewards_a, rewards_b);
    assert_eq!(a.learning_table(), b.learning_table());
    assert_eq!(a.frozen_table(), b.frozen_table());
}

#[test]
fn learning_table_departs_from_zero() {
    let mut trainer = SelfPlayTrainer::new(config(1, 50, 16));
    trainer.train(|_| {});
    assert_ne!(
        trainer.learning_table(),
        &tttrl::ValueTable::new(),
        "fifty episodes should leave a trace in the table"
    );
}
