use std::io;
use std::time::Duration;

use log::{error, info};

use crate::config::PAUSE_POLL_INTERVAL;
use crate::error::ScoreError;
use crate::game::{GameOverReason, GameState, StepOutcome};
use crate::renderer::Renderer;
use crate::score::ScoreRecorder;

/// How a session finished.
#[derive(Debug)]
pub enum SessionEnd {
    /// The player asked to leave; no score is recorded.
    Quit { score: u32 },
    /// The snake died. `high_scores` holds the updated list or the reason
    /// it could not be saved.
    GameOver {
        reason: GameOverReason,
        score: u32,
        high_scores: Result<Vec<u32>, ScoreError>,
    },
}

/// Drives `state` until game over or quit.
///
/// Each iteration sleeps for the current tick interval (or the pause poll
/// interval while paused), checks the live flag, steps once and redraws.
/// On game over the score is recorded exactly once before returning, and
/// before the final redraw, so a failing display cannot lose it.
pub fn run_session<R, S, F>(
    state: &mut GameState,
    renderer: &mut R,
    recorder: &mut S,
    mut sleep: F,
) -> io::Result<SessionEnd>
where
    R: Renderer,
    S: ScoreRecorder,
    F: FnMut(Duration),
{
    let controls = state.controls();
    info!(
        "session started on {}x{} grid, interval={:?}",
        state.bounds().width,
        state.bounds().height,
        state.tick_interval()
    );

    renderer.draw(state)?;

    loop {
        let wait = if controls.is_paused() {
            PAUSE_POLL_INTERVAL
        } else {
            state.tick_interval()
        };
        sleep(wait);

        if !controls.is_live() {
            info!("session quit at score {}", state.score);
            return Ok(SessionEnd::Quit { score: state.score });
        }

        if let StepOutcome::GameOver(reason) = state.step() {
            controls.shut_down();

            let high_scores = recorder.record(state.score);
            if let Err(error) = &high_scores {
                error!("failed to save high scores: {error}");
            }

            // Recorded above; a failed last frame is only logged.
            if let Err(error) = renderer.draw(state) {
                error!("final redraw failed: {error}");
            }

            return Ok(SessionEnd::GameOver {
                reason,
                score: state.score,
                high_scores,
            });
        }

        renderer.draw(state)?;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io;
    use std::path::PathBuf;
    use std::time::Duration;

    use super::{run_session, SessionEnd};
    use crate::config::{GridSize, PAUSE_POLL_INTERVAL};
    use crate::error::ScoreError;
    use crate::game::{GameOverReason, GameState};
    use crate::grid::Position;
    use crate::renderer::Renderer;
    use crate::score::{merge_top_scores, ScoreRecorder};
    use crate::snake::Snake;

    #[derive(Default)]
    struct CountingRenderer {
        draws: usize,
        heads: Vec<Position>,
    }

    impl Renderer for CountingRenderer {
        fn draw(&mut self, state: &GameState) -> io::Result<()> {
            self.draws += 1;
            self.heads.push(state.snake.head());
            Ok(())
        }
    }

    /// Draws the first frame, then fails every later one.
    #[derive(Default)]
    struct BrokenAfterFirstFrame {
        draws: usize,
    }

    impl Renderer for BrokenAfterFirstFrame {
        fn draw(&mut self, _state: &GameState) -> io::Result<()> {
            self.draws += 1;
            if self.draws > 1 {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "terminal gone"));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryRecorder {
        calls: Vec<u32>,
        prior: Vec<u32>,
    }

    impl ScoreRecorder for MemoryRecorder {
        fn record(&mut self, score: u32) -> Result<Vec<u32>, ScoreError> {
            self.calls.push(score);
            Ok(merge_top_scores(self.prior.clone(), score))
        }
    }

    struct FailingRecorder;

    impl ScoreRecorder for FailingRecorder {
        fn record(&mut self, _score: u32) -> Result<Vec<u32>, ScoreError> {
            Err(ScoreError::Write {
                path: PathBuf::from("/nowhere/high_scores.txt"),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            })
        }
    }

    fn coiled_state() -> GameState {
        let mut state = GameState::new_with_seed(GridSize::square(6), 3);
        state.snake = Snake::from_segments(vec![
            Position::new(2, 2),
            Position::new(2, 1),
            Position::new(3, 1),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(2, 3),
        ]);
        state.food = None;
        state.poison = None;
        state
    }

    #[test]
    fn self_collision_records_final_score_once() {
        let mut state = coiled_state();
        state.score = 30;
        let mut renderer = CountingRenderer::default();
        let mut recorder = MemoryRecorder {
            prior: vec![50, 20],
            ..MemoryRecorder::default()
        };

        let end = run_session(&mut state, &mut renderer, &mut recorder, |_| {})
            .expect("in-memory session never fails");

        assert_eq!(recorder.calls, vec![30]);
        match end {
            SessionEnd::GameOver {
                reason,
                score,
                high_scores,
            } => {
                assert_eq!(reason, GameOverReason::SelfCollision);
                assert_eq!(score, 30);
                assert_eq!(high_scores.expect("recording succeeds"), vec![50, 30, 20]);
            }
            other => panic!("expected game over, got {other:?}"),
        }
        assert!(!state.controls().is_live());
        assert_eq!(renderer.draws, 2);
    }

    #[test]
    fn poison_ends_session_after_normal_moves() {
        let mut state = GameState::new_with_seed(GridSize::square(5), 4);
        state.snake = Snake::new(Position::new(0, 0));
        state.food = None;
        state.poison = Some(Position::new(0, 3));
        let mut renderer = CountingRenderer::default();
        let mut recorder = MemoryRecorder::default();
        let mut waits = Vec::new();

        let end = run_session(&mut state, &mut renderer, &mut recorder, |wait| {
            waits.push(wait);
        })
        .expect("in-memory session never fails");

        assert!(matches!(
            end,
            SessionEnd::GameOver {
                reason: GameOverReason::PoisonEaten,
                score: 0,
                ..
            }
        ));
        assert_eq!(recorder.calls, vec![0]);
        assert_eq!(waits, vec![Duration::from_millis(500); 3]);
        assert_eq!(
            renderer.heads,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(0, 2),
            ]
        );
    }

    #[test]
    fn quit_stops_without_recording() {
        let mut state = GameState::new_with_seed(GridSize::square(20), 5);
        state.food = None;
        state.poison = None;
        let controls = state.controls();
        let mut renderer = CountingRenderer::default();
        let mut recorder = MemoryRecorder::default();
        let sleeps = Cell::new(0);

        let end = run_session(&mut state, &mut renderer, &mut recorder, |_| {
            sleeps.set(sleeps.get() + 1);
            if sleeps.get() == 3 {
                controls.shut_down();
            }
        })
        .expect("in-memory session never fails");

        assert!(matches!(end, SessionEnd::Quit { score: 0 }));
        assert!(recorder.calls.is_empty());
        assert_eq!(state.snake.head(), Position::new(0, 2));
    }

    #[test]
    fn paused_session_polls_without_moving() {
        let mut state = GameState::new_with_seed(GridSize::square(8), 6);
        state.food = None;
        state.poison = None;
        state.toggle_pause();
        let controls = state.controls();
        let mut renderer = CountingRenderer::default();
        let mut recorder = MemoryRecorder::default();
        let mut waits = Vec::new();

        let end = run_session(&mut state, &mut renderer, &mut recorder, |wait| {
            waits.push(wait);
            if waits.len() == 4 {
                controls.shut_down();
            }
        })
        .expect("in-memory session never fails");

        assert!(matches!(end, SessionEnd::Quit { .. }));
        assert_eq!(waits, vec![PAUSE_POLL_INTERVAL; 4]);
        assert_eq!(state.snake.head(), Position::new(0, 0));
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn failed_score_write_is_reported_not_raised() {
        let mut state = coiled_state();
        let mut renderer = CountingRenderer::default();

        let end = run_session(&mut state, &mut renderer, &mut FailingRecorder, |_| {})
            .expect("recorder failure does not abort the session");

        assert!(matches!(
            end,
            SessionEnd::GameOver {
                high_scores: Err(ScoreError::Write { .. }),
                ..
            }
        ));
    }

    #[test]
    fn failed_final_redraw_still_records_score() {
        let mut state = GameState::new_with_seed(GridSize::square(5), 8);
        state.snake = Snake::new(Position::new(0, 0));
        state.food = None;
        state.poison = Some(Position::new(0, 1));
        state.score = 40;
        let mut renderer = BrokenAfterFirstFrame::default();
        let mut recorder = MemoryRecorder::default();

        let end = run_session(&mut state, &mut renderer, &mut recorder, |_| {})
            .expect("a failed last frame does not abort game over");

        assert_eq!(recorder.calls, vec![40]);
        assert!(matches!(
            end,
            SessionEnd::GameOver {
                reason: GameOverReason::PoisonEaten,
                score: 40,
                ..
            }
        ));
        assert_eq!(renderer.draws, 2);
    }

    #[test]
    fn failed_redraw_mid_game_is_raised_without_recording() {
        let mut state = GameState::new_with_seed(GridSize::square(20), 9);
        state.food = None;
        state.poison = None;
        let mut renderer = BrokenAfterFirstFrame::default();
        let mut recorder = MemoryRecorder::default();

        let result = run_session(&mut state, &mut renderer, &mut recorder, |_| {});

        assert!(result.is_err());
        assert!(recorder.calls.is_empty());
    }
}
