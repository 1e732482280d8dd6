use super::*;
use crate::models::Bolt;

const SEED: u64 = 0xA11E_4;

fn idle() -> InputFrame {
    InputFrame::default()
}

fn press(action: Action) -> InputFrame {
    InputFrame::holding(&[action])
}

fn active_session() -> Session {
    let mut session = Session::new(SEED);
    session.tick(&press(Action::Confirm), 0.0).unwrap();
    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    session
}

fn wave_mut(session: &mut Session) -> &mut Wave {
    session.wave.as_mut().expect("wave exists while playing")
}

fn shoot_ship(session: &mut Session) {
    let wave = wave_mut(session);
    let ship = wave.ship().cloned().expect("ship present");
    wave.bolts_mut().push(Bolt::alien(ship.x, ship.y + ALIEN_BOLT_SPEED));
}

/// Leaves a single alien and a player bolt about to hit it.
fn doom_last_alien(session: &mut Session) {
    let wave = wave_mut(session);
    let formation = wave.formation_mut();
    for row in 0..formation.rows() {
        for col in 0..formation.columns() {
            if (row, col) != (0, 0) {
                formation.remove(row, col);
            }
        }
    }
    let last = formation.get(0, 0).cloned().expect("kept one alien");
    wave.bolts_mut().push(Bolt::player(last.x, last.y - PLAYER_BOLT_SPEED));
}

#[test]
fn starts_on_the_title_screen() {
    let session = Session::new(SEED);
    assert_eq!(session.state(), GameState::Inactive);
    assert!(session.wave().is_none());
    assert_eq!(session.message(), Some(Message::Welcome));
    assert_eq!(session.wave_number(), 0);
}

#[test]
fn confirm_is_edge_triggered() {
    let mut session = Session::new(SEED);
    let confirm = press(Action::Confirm);

    session.tick(&confirm, 0.0).unwrap();
    assert_eq!(session.state(), GameState::NewWave);
    assert_eq!(session.wave().unwrap().survivors(), ALIEN_ROWS * ALIENS_IN_ROW);

    session.tick(&confirm, 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    assert_eq!(session.message(), None);
    assert_eq!(session.wave_number(), 1);

    let wave = session.wave().unwrap();
    assert_eq!(wave.lives(), SHIP_LIVES);
    assert_eq!(wave.score(), 0);
    assert_eq!(wave.alien_speed(), ALIEN_SPEED);
}

#[test]
fn idle_title_screen_stays_put() {
    let mut session = Session::new(SEED);
    for _ in 0..10 {
        session.tick(&idle(), 0.016).unwrap();
    }
    assert_eq!(session.state(), GameState::Inactive);
}

#[test]
fn negative_delta_is_rejected_by_the_session() {
    let mut session = active_session();
    assert_eq!(
        session.tick(&idle(), -1.0),
        Err(ContractError::NegativeDelta { dt: -1.0 })
    );
    assert_eq!(session.state(), GameState::Active);
}

#[test]
fn pause_freezes_the_wave_and_confirm_resumes_it() {
    let mut session = active_session();
    session.tick(&press(Action::MoveLeft), 0.0).unwrap();
    let ship_x = session.wave().unwrap().ship().unwrap().x;

    session.tick(&press(Action::Pause), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Paused);
    assert_eq!(
        session.message(),
        Some(Message::Paused { lives: SHIP_LIVES })
    );

    let before: Vec<f32> = session.wave().unwrap().formation().iter().map(|(_, a)| a.x).collect();
    for _ in 0..10 {
        session.tick(&idle(), 1.0).unwrap();
    }
    let after: Vec<f32> = session.wave().unwrap().formation().iter().map(|(_, a)| a.x).collect();
    assert_eq!(before, after);

    session.tick(&press(Action::Confirm), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    assert_eq!(session.message(), None);
    assert_eq!(session.wave().unwrap().ship().unwrap().x, ship_x);
}

#[test]
fn holding_pause_does_not_pause_again_after_resume() {
    let mut session = active_session();
    let pause = press(Action::Pause);
    session.tick(&pause, 0.0).unwrap();
    assert_eq!(session.state(), GameState::Paused);

    let both = InputFrame::holding(&[Action::Pause, Action::Confirm]);
    session.tick(&both, 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    session.tick(&pause, 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
}

#[test]
fn losing_a_ship_with_lives_left_enters_death() {
    let mut session = active_session();
    shoot_ship(&mut session);

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    assert!(session.wave().unwrap().ship().is_none());

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Death);
    assert_eq!(
        session.message(),
        Some(Message::Died { lives: SHIP_LIVES - 1 })
    );

    session.tick(&press(Action::Confirm), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    assert!(session.wave().unwrap().ship().is_some());
}

#[test]
fn last_life_lost_goes_straight_to_game_over() {
    let mut session = active_session();
    wave_mut(&mut session).set_lives(1);
    shoot_ship(&mut session);

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.wave().unwrap().lives(), 0);
    assert!(session.wave().unwrap().ship().is_none());

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Complete(Outcome::GameOver));
    assert_eq!(session.message(), Some(Message::GameOver));

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Complete(Outcome::GameOver));
}

#[test]
fn game_over_confirm_returns_to_a_fresh_title() {
    let mut session = active_session();
    wave_mut(&mut session).set_lives(1);
    shoot_ship(&mut session);
    session.tick(&idle(), 0.0).unwrap();
    session.tick(&idle(), 0.0).unwrap();

    session.tick(&press(Action::Confirm), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Inactive);
    assert!(session.wave().is_none());
    assert!(session.carry_over().is_none());
    assert_eq!(session.wave_number(), 0);
}

#[test]
fn breaching_the_line_ends_the_game_without_another_update() {
    let mut session = active_session();
    let wave = wave_mut(&mut session);
    let lowest = wave.formation().get(0, 0).unwrap().y;
    let drop = lowest - DEFENSE_LINE;
    for alien in wave.formation_mut().aliens_mut() {
        alien.y -= drop;
    }
    let positions: Vec<f32> = wave.formation().iter().map(|(_, a)| a.x).collect();

    session.tick(&press(Action::Fire), 5.0).unwrap();
    assert_eq!(session.state(), GameState::Complete(Outcome::GameOver));

    let wave = session.wave().unwrap();
    assert!(wave.bolts().is_empty());
    let after: Vec<f32> = wave.formation().iter().map(|(_, a)| a.x).collect();
    assert_eq!(positions, after);
}

#[test]
fn pause_is_ignored_once_play_has_stopped() {
    let mut session = active_session();
    shoot_ship(&mut session);
    session.tick(&press(Action::Pause), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
}

#[test]
fn clearing_the_wave_carries_progress_into_the_next() {
    let mut session = active_session();
    doom_last_alien(&mut session);

    session.tick(&idle(), 0.0).unwrap();
    let wave = session.wave().unwrap();
    assert!(wave.no_aliens());
    let finished = CarryOver::from_wave(wave);
    assert_eq!(finished.score, KILL_SCORE);

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Complete(Outcome::WaveCleared));
    assert_eq!(session.message(), Some(Message::WaveComplete));

    for _ in 0..5 {
        session.tick(&idle(), 0.5).unwrap();
        assert!(session.wave().unwrap().no_aliens());
    }

    session.tick(&press(Action::Confirm), 0.0).unwrap();
    assert_eq!(session.state(), GameState::NewWave);
    assert_eq!(session.carry_over(), Some(&finished));
    let waiting = session.wave().expect("next wave is built on confirm");
    assert_eq!(waiting.survivors(), ALIEN_ROWS * ALIENS_IN_ROW);
    assert_eq!(waiting.score(), finished.score);

    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.state(), GameState::Active);
    assert_eq!(session.wave_number(), 2);

    let next = session.wave().unwrap();
    assert_eq!(next.lives(), finished.lives);
    assert_eq!(next.score(), finished.score);
    let expected = finished.alien_speed
        * (1.0 / SPEEDUP_FACTOR).powf(3.0 * (ALIEN_ROWS * ALIENS_IN_ROW) as f32 / 4.0);
    assert!((next.alien_speed() - expected).abs() < 1e-6);
    assert_eq!(next.survivors(), ALIEN_ROWS * ALIENS_IN_ROW);
}

#[test]
fn rebound_sits_between_the_previous_start_and_finish() {
    let cells = ALIEN_ROWS * ALIENS_IN_ROW;
    let finish = ALIEN_SPEED * SPEEDUP_FACTOR.powi(cells as i32);
    let next = CarryOver::rebound_speed(finish, ALIEN_ROWS, ALIENS_IN_ROW);
    assert!(next > finish);
    assert!(next < ALIEN_SPEED);
}

#[test]
fn mute_preference_survives_into_the_next_wave() {
    let mut session = active_session();
    session.tick(&press(Action::Mute), 0.0).unwrap();
    assert!(session.is_muted());

    doom_last_alien(&mut session);
    session.tick(&idle(), 0.0).unwrap();
    session.tick(&idle(), 0.0).unwrap();
    session.tick(&press(Action::Confirm), 0.0).unwrap();
    session.tick(&idle(), 0.0).unwrap();

    assert_eq!(session.state(), GameState::Active);
    assert!(session.wave().unwrap().is_muted());
}

#[test]
fn custom_layout_is_validated_up_front() {
    assert!(Session::with_layout(0, 3, SEED).is_err());
    assert_eq!(
        Session::with_layout(usize::MAX, 1, SEED).err(),
        Some(ContractError::FormationTooTall { rows: usize::MAX })
    );
    assert!(Session::with_layout(11, ALIENS_IN_ROW, SEED).is_err());
    let mut session = Session::with_layout(2, 3, SEED).unwrap();
    session.tick(&press(Action::Confirm), 0.0).unwrap();
    session.tick(&idle(), 0.0).unwrap();
    assert_eq!(session.wave().unwrap().survivors(), 6);
}
