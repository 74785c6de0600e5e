//! Integration tests for the full game flow.
//!
//! These tests drive complete matches with scripted entropy and scripted
//! operator input. Every expected winner is worked out by hand in the
//! comments above the script.

use fair_dice_core::{
    games::{
        parse_dice_list, Choice, DiceGame, DiceSet, GameEvent, Operator, Outcome, Phase, Prompt,
        ScriptedOperator,
    },
    protocol::{DrawPurpose, Party, Winner},
    Commitment, ScriptedEntropy, SecureKey, SecureRandom,
};

fn standard_dice() -> Vec<DiceSet> {
    parse_dice_list(["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
}

fn scripted_game(
    dice: Vec<DiceSet>,
    entropy: &[u8],
    choices: &[usize],
) -> DiceGame<ScriptedOperator, ScriptedEntropy> {
    DiceGame::with_rng(
        dice,
        ScriptedOperator::new(choices.iter().map(|&v| Choice::Value(v))),
        SecureRandom::with_entropy(ScriptedEntropy::new(entropy.iter().copied())),
    )
    .unwrap()
}

/// Check every revealed draw against the commitment published before it
fn assert_all_reveals_verify(events: &[GameEvent]) -> usize {
    let mut published: Vec<Commitment> = Vec::new();
    let mut verified = 0;

    for event in events {
        match event {
            GameEvent::Committed { commit, .. } => published.push(commit.commitment),
            GameEvent::Revealed { commit, reveal, .. } => {
                assert_eq!(published.last(), Some(&commit.commitment));
                assert_eq!(reveal.check(commit), Ok(()));

                let key = SecureKey::from_hex(&reveal.key).unwrap();
                assert_eq!(
                    Commitment::compute(&key, reveal.committed_value),
                    commit.commitment
                );
                verified += 1;
            }
            _ => {}
        }
    }
    verified
}

/// User moves first and wins.
///
/// - First move: committed 1, user 1, (1 + 1) % 2 = 0, user first
/// - User takes dice 0 [2,2,4,4,9,9]
/// - Computer samples 1 over remaining [1, 2], takes dice 2 [3,3,5,5,7,7]
/// - Computer roll: 253 is rejected (limit 252), 10 % 6 = 4 committed,
///   user 3, (4 + 3) % 6 = 1, face 3
/// - User roll: 250 % 6 = 4 committed, user 1, (4 + 1) % 6 = 5, face 9
/// - 9 > 3, user wins
#[test]
fn test_full_game_user_first_user_wins() {
    let mut game = scripted_game(standard_dice(), &[1, 1, 253, 10, 250], &[1, 0, 3, 1]);

    let Outcome::Finished(result) = game.play().unwrap() else {
        panic!("expected a finished match");
    };
    assert_eq!(result.first_mover, Party::User);
    assert_eq!(result.user_dice, 0);
    assert_eq!(result.computer_dice, 2);
    assert_eq!(result.computer_roll, 3);
    assert_eq!(result.user_roll, 9);
    assert_eq!(result.winner, Winner::User);
    assert_eq!(game.phase(), Phase::Finished);

    let operator = game.into_operator();
    assert_eq!(operator.remaining(), 0);
    assert_eq!(assert_all_reveals_verify(operator.events()), 3);
}

/// Computer moves first and wins; the user's invalid picks are re-prompted.
///
/// - First move: committed 0, user 1, result 1, computer first
/// - Computer samples 4 % 3 = 1 over [0, 1, 2], takes dice 1 [1,1,6,6,8,8]
/// - User tries 1 (taken) and 5 (out of range), then takes 2 [3,3,5,5,7,7]
/// - Computer roll: committed 0, user 2, result 2, face 6
/// - User roll: committed 3, user 0, result 3, face 5
/// - 6 > 5, computer wins
#[test]
fn test_full_game_computer_first_computer_wins() {
    let mut game = scripted_game(standard_dice(), &[0, 4, 0, 3], &[1, 1, 5, 2, 2, 0]);

    let Outcome::Finished(result) = game.play().unwrap() else {
        panic!("expected a finished match");
    };
    assert_eq!(result.first_mover, Party::Computer);
    assert_eq!(result.computer_dice, 1);
    assert_eq!(result.user_dice, 2);
    assert_eq!(result.computer_roll, 6);
    assert_eq!(result.user_roll, 5);
    assert_eq!(result.winner, Winner::Computer);

    let operator = game.into_operator();
    let invalid = operator
        .events()
        .iter()
        .filter(|e| matches!(e, GameEvent::InvalidChoice(_)))
        .count();
    assert_eq!(invalid, 2);
    assert_eq!(assert_all_reveals_verify(operator.events()), 3);
}

/// Equal faces tie.
///
/// - First move: committed 0, user 0, result 0, user first
/// - User takes dice 0 [1,2]; computer samples 0, takes dice 1 [2,3]
/// - Computer roll: committed 0, user 0, face 2
/// - User roll: committed 1, user 0, face 2
#[test]
fn test_full_game_tie() {
    let dice = parse_dice_list(["1,2", "2,3", "3,4"]).unwrap();
    let mut game = scripted_game(dice, &[0, 0, 0, 1], &[0, 0, 0, 0]);

    let Outcome::Finished(result) = game.play().unwrap() else {
        panic!("expected a finished match");
    };
    assert_eq!(result.user_roll, 2);
    assert_eq!(result.computer_roll, 2);
    assert_eq!(result.winner, Winner::Tie);
}

#[test]
fn test_events_follow_commit_reveal_order() {
    let mut game = scripted_game(standard_dice(), &[1, 1, 253, 10, 250], &[1, 0, 3, 1]);
    game.play().unwrap();

    let purposes: Vec<(bool, DrawPurpose)> = game
        .operator()
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::Committed { purpose, .. } => Some((true, *purpose)),
            GameEvent::Revealed { purpose, .. } => Some((false, *purpose)),
            _ => None,
        })
        .collect();

    assert_eq!(
        purposes,
        vec![
            (true, DrawPurpose::FirstMove),
            (false, DrawPurpose::FirstMove),
            (true, DrawPurpose::ComputerRoll),
            (false, DrawPurpose::ComputerRoll),
            (true, DrawPurpose::UserRoll),
            (false, DrawPurpose::UserRoll),
        ]
    );
}

#[test]
fn test_exit_at_dice_selection_aborts() {
    let mut game = DiceGame::with_rng(
        standard_dice(),
        ScriptedOperator::new([Choice::Value(1), Choice::Help, Choice::Exit]),
        SecureRandom::with_entropy(ScriptedEntropy::new([1])),
    )
    .unwrap();

    assert_eq!(game.play().unwrap(), Outcome::Aborted);
    assert_eq!(game.phase(), Phase::Aborted);

    let events = game.operator().events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::Help(_))));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::Finished(_))));
}

/// Operator that always answers with the first valid option
struct FirstOptionOperator {
    events: Vec<GameEvent>,
}

impl Operator for FirstOptionOperator {
    fn request_choice(&mut self, prompt: &Prompt<'_>) -> Choice {
        match prompt {
            Prompt::FairDraw { commit, .. } => Choice::Value(commit.range_max as usize),
            Prompt::SelectDice { options, .. } => Choice::Value(options[0]),
        }
    }

    fn display(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }
}

#[test]
fn test_full_game_with_os_entropy() {
    let dice = standard_dice();
    let mut game = DiceGame::new(dice.clone(), FirstOptionOperator { events: Vec::new() }).unwrap();

    let Outcome::Finished(result) = game.play().unwrap() else {
        panic!("expected a finished match");
    };

    assert_ne!(result.user_dice, result.computer_dice);
    assert!(dice[result.user_dice].faces().contains(&result.user_roll));
    assert!(dice[result.computer_dice].faces().contains(&result.computer_roll));
    assert_eq!(
        result.winner,
        Winner::from_rolls(result.user_roll, result.computer_roll)
    );
    assert_eq!(assert_all_reveals_verify(&game.into_operator().events), 3);
}
