use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use tile_recall::game::{
    ClickOutcome, Color, GameController, LEVELS, LevelStart, Phase, PlayerProfile, STARTING_LIVES,
};

fn new_game(seed: u64) -> GameController<StdRng> {
    let profile = PlayerProfile::new("Grace", 45, Color::rgb(0xe0, 0x1b, 0x24)).unwrap();
    GameController::new(profile, StdRng::seed_from_u64(seed))
}

fn armed_in_random_order(game: &GameController<StdRng>, order_seed: u64) -> Vec<usize> {
    let mut tiles: Vec<usize> = game.armed().iter().copied().collect();
    tiles.shuffle(&mut StdRng::seed_from_u64(order_seed));
    tiles
}

fn clear_level(game: &mut GameController<StdRng>, order_seed: u64) -> ClickOutcome {
    let mut last = ClickOutcome::Ignored;
    for tile in armed_in_random_order(game, order_seed) {
        last = game.handle_click(tile).unwrap();
    }
    last
}

proptest! {
    #[test]
    fn every_level_arms_exactly_its_flash_count(seed in any::<u64>(), level in 1usize..=10) {
        let mut game = new_game(seed);
        let LevelStart::Flash(plan) = game.start_level(level).unwrap() else {
            panic!("level {level} should be playable");
        };
        let config = LEVELS[level - 1];
        prop_assert_eq!(game.armed().len(), config.flash_count);
        prop_assert!(config.flash_count <= config.grid_size * config.grid_size);
        prop_assert_eq!(plan.tiles.len(), config.flash_count);
        prop_assert!(plan.tiles.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(plan.tiles.iter().all(|&t| t < config.grid_size * config.grid_size));
    }

    #[test]
    fn any_click_order_clears_the_level(
        seed in any::<u64>(),
        order_seed in any::<u64>(),
        level in 1usize..10,
    ) {
        let mut game = new_game(seed);
        game.start_level(level).unwrap();
        let outcome = clear_level(&mut game, order_seed);
        prop_assert_eq!(outcome, ClickOutcome::LevelCleared { next_level: level + 1 });
        prop_assert_eq!(game.phase(), Phase::LevelCleared);
        prop_assert_eq!(game.lives(), STARTING_LIVES);
    }

    #[test]
    fn three_wrong_clicks_end_the_game(seed in any::<u64>(), level in 1usize..=10) {
        let mut game = new_game(seed);
        game.start_level(level).unwrap();
        let wrong = (0..game.tiles().len())
            .find(|idx| !game.armed().contains(idx))
            .expect("every level leaves an unarmed tile");
        for _ in 0..2 {
            let is_miss = matches!(game.handle_click(wrong).unwrap(), ClickOutcome::Miss { .. });
            prop_assert!(is_miss);
        }
        let last = game.handle_click(wrong).unwrap();
        let is_loss = matches!(&last, ClickOutcome::Lost(report) if !report.won && report.lives == 0);
        prop_assert!(is_loss);
        prop_assert_eq!(game.lives(), 0);
        prop_assert_eq!(game.phase(), Phase::Lost);
    }

    #[test]
    fn finishing_level_ten_wins(seed in any::<u64>(), order_seed in any::<u64>(), misses in 0u8..3) {
        let mut game = new_game(seed);
        game.start().unwrap();
        let mut outcome = ClickOutcome::Ignored;
        for level in 1..=LEVELS.len() {
            if level > 1 {
                prop_assert!(matches!(game.start().unwrap(), LevelStart::Flash(_)));
            }
            if level == LEVELS.len() {
                let wrong = (0..game.tiles().len())
                    .find(|idx| !game.armed().contains(idx))
                    .unwrap();
                for _ in 0..misses {
                    game.handle_click(wrong).unwrap();
                }
            }
            outcome = clear_level(&mut game, order_seed ^ level as u64);
        }
        match outcome {
            ClickOutcome::Won(report) => {
                prop_assert!(report.won);
                prop_assert_eq!(report.level, LEVELS.len());
                prop_assert_eq!(report.lives, STARTING_LIVES - misses);
            }
            other => prop_assert!(false, "expected a win, got {:?}", other),
        }
        prop_assert_eq!(game.phase(), Phase::Won);
    }
}

#[test]
fn full_run_from_level_one() {
    let mut game = new_game(2026);
    let mut clears = 0;
    loop {
        match game.start().unwrap() {
            LevelStart::Flash(_) => {}
            LevelStart::Won(report) => panic!("won without clicking: {report:?}"),
        }
        match clear_level(&mut game, clears) {
            ClickOutcome::LevelCleared { next_level } => {
                clears += 1;
                assert_eq!(next_level as u64, clears + 1);
            }
            ClickOutcome::Won(report) => {
                assert_eq!(report.player, "Grace");
                assert_eq!(report.lives, STARTING_LIVES);
                break;
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }
    assert_eq!(clears, 9);
}
