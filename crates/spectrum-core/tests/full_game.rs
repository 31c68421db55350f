use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use spectrum_core::{Action, GameState, GameStatus, PlayerId, RuleError, RuleSet, Turn};

fn id(raw: &str) -> PlayerId {
    PlayerId::from(raw)
}

fn lobby(guests: &[&str]) -> GameState {
    let mut state = GameState::new_lobby(id("host"), "Host", RuleSet::default());
    for guest in guests {
        state = state.seat_player(id(guest), *guest).expect("seat guest");
    }
    state
}

/// Drives one game to completion with random legal plays, checking chip
/// conservation after every scored round.
fn play_out(mut state: GameState, rng: &mut StdRng) -> (GameState, u32) {
    let host = state.host_id().clone();
    let mut rounds = 0;
    let mut chips_before = state.chips_in_play();
    loop {
        state = match state.turn() {
            Turn::Seat(seat) => {
                let player = state.players()[seat].id.clone();
                let masked = state.legal_face_down_now(&player);
                let open = state.legal_plays(&player);
                assert!(!open.is_empty(), "seat {seat} has no legal face-up play");
                let (index, face_down) = match masked.choose(rng) {
                    Some(&index) if rng.gen_range(0..4) == 0 => (index, true),
                    _ => (*open.choose(rng).expect("legal play"), false),
                };
                state.apply(
                    &Action::Play {
                        player,
                        card_index: index,
                        face_down,
                    },
                    rng,
                )
            }
            Turn::ResolvePending => state.apply(&Action::ResolveTrick, rng),
            Turn::ScorePending => {
                let next = state.apply(&Action::ScoreRound, rng).expect("score");
                let result = next.round_result().expect("round result");
                rounds += 1;
                assert_eq!(
                    next.chips_in_play() + i64::from(result.forfeited),
                    chips_before + i64::from(result.minted),
                    "round {rounds} leaked chips"
                );
                if result.is_final {
                    return (next, rounds);
                }
                Ok(next)
            }
            Turn::RoundOver => {
                let mut next = state.clone();
                let guests: Vec<PlayerId> = next
                    .players()
                    .iter()
                    .map(|player| player.id.clone())
                    .filter(|player| *player != host)
                    .collect();
                for guest in guests {
                    next = next.mark_ready(&guest).expect("ready");
                }
                chips_before = next.chips_in_play();
                next.start_round(&host, rng)
            }
            Turn::Closed => panic!("game closed unexpectedly"),
        }
        .expect("engine accepts a legal step");
    }
}

#[test]
fn three_seat_game_runs_to_a_winner() {
    let mut rng = StdRng::seed_from_u64(2024);
    let state = lobby(&["g1", "g2"])
        .start_round(&id("host"), &mut rng)
        .unwrap();
    let (finished, rounds) = play_out(state, &mut rng);

    assert!((1..=4).contains(&rounds));
    assert_eq!(finished.status(), GameStatus::Finished);
    assert_eq!(finished.reserve(), 0);
    let result = finished.round_result().unwrap();
    let winner = result.winner_id.clone().unwrap();
    let top = finished.players().iter().map(|p| p.chips).max().unwrap();
    assert_eq!(finished.player(&winner).unwrap().chips, top);
    for player in finished.players() {
        assert_eq!(player.history.len(), rounds as usize);
    }
}

#[test]
fn four_seat_games_are_seed_deterministic() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = lobby(&["g1", "g2", "g3"])
            .start_round(&id("host"), &mut rng)
            .unwrap();
        play_out(state, &mut rng).0
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn finished_game_only_restarts_or_returns() {
    let mut rng = StdRng::seed_from_u64(99);
    let state = lobby(&["g1", "g2"])
        .start_round(&id("host"), &mut rng)
        .unwrap();
    let (finished, _) = play_out(state, &mut rng);

    assert!(matches!(
        finished.start_round(&id("host"), &mut rng),
        Err(RuleError::IllegalLifecycleTransition { .. })
    ));
    assert!(finished.score_round().is_err());

    let back = finished.return_to_lobby(&id("host")).unwrap();
    assert_eq!(back.status(), GameStatus::Lobby);
    assert!(back.players().iter().all(|p| p.chips == 5 && p.history.is_empty()));

    let again = finished.restart_game(&id("host"), &mut rng).unwrap();
    assert_eq!(again.status(), GameStatus::Playing);
    assert_eq!(again.round_count(), 1);
    assert!(again.round_result().is_none());
}

#[test]
fn next_round_waits_for_every_guest() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut state = lobby(&["g1", "g2"])
        .start_round(&id("host"), &mut rng)
        .unwrap();
    while state.turn() != Turn::RoundOver {
        state = match state.turn() {
            Turn::Seat(seat) => {
                let player = state.players()[seat].id.clone();
                let index = state.legal_plays(&player)[0];
                state.apply_move(&player, index, false)
            }
            Turn::ResolvePending => state.resolve_trick(),
            Turn::ScorePending => state.score_round(),
            other => panic!("unexpected turn {other:?}"),
        }
        .unwrap();
    }

    let state = state.mark_ready(&id("g1")).unwrap();
    assert!(!state.all_guests_ready());
    assert!(state.start_round(&id("host"), &mut rng).is_err());

    let state = state.mark_ready(&id("g2")).unwrap();
    assert!(state.start_round(&id("g1"), &mut rng).is_err());
    let next = state.start_round(&id("host"), &mut rng).unwrap();
    assert_eq!(next.round_count(), 2);
    assert!(next.players().iter().all(|p| !p.ready));
}
