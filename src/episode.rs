//! Episode runner
//!
//! Orchestrates one complete play-through from reset to a terminal outcome,
//! alternating between the agent (X, moves first) and an opponent (O)
//! supplied through the [`MoveSource`] port. Rewards and terminal signals
//! flow from the environment to the agent; the runner itself holds no game
//! knowledge beyond the turn structure.

use crate::{
    Result,
    game::{Board, BoardKey, Mark},
    ports::MoveSource,
    q_learning::QLearningAgent,
};

/// Reward credited for an agent win
pub const REWARD_WIN: f64 = 1.0;
/// Reward credited for a draw
pub const REWARD_DRAW: f64 = 0.5;
/// Reward credited for an opponent win
pub const REWARD_LOSS: f64 = -1.0;

/// Terminal outcome of an episode, from the agent's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    AgentWin,
    OpponentWin,
    Draw,
}

impl Outcome {
    /// Scalar outcome value for aggregation
    pub fn score(self) -> f64 {
        match self {
            Outcome::AgentWin => REWARD_WIN,
            Outcome::OpponentWin => REWARD_LOSS,
            Outcome::Draw => REWARD_DRAW,
        }
    }
}

/// Turn state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    AgentToMove,
    OpponentToMove,
    Terminal(Outcome),
}

/// Runs episodes against a fresh board.
///
/// In learning mode the agent selects moves ε-greedily and receives a
/// `learn` call after every one of its moves (and after a terminal opponent
/// move). In frozen mode selection is greedy and no learning or ε decay
/// occurs, which is what evaluation and interactive play use.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeRunner {
    learning: bool,
}

impl EpisodeRunner {
    /// Runner with learning enabled
    pub fn learning() -> Self {
        Self { learning: true }
    }

    /// Runner with the policy frozen (greedy selection, no updates)
    pub fn frozen() -> Self {
        Self { learning: false }
    }

    /// Play one episode to completion and return the outcome.
    ///
    /// # Errors
    ///
    /// Propagates opponent input failures and any illegal move reaching the
    /// environment. The latter is a contract violation: legal-action
    /// filtering precedes every move request, so it cannot trigger unless
    /// a `MoveSource` returns an index outside the provided legal set.
    pub fn run(
        &self,
        board: &mut Board,
        agent: &mut QLearningAgent,
        opponent: &mut dyn MoveSource,
    ) -> Result<Outcome> {
        board.reset();
        let mut turn = Turn::AgentToMove;
        // Most recent agent (state, action), pending credit assignment if
        // the opponent ends the game.
        let mut last_pair: Option<(BoardKey, usize)> = None;

        loop {
            match turn {
                Turn::AgentToMove => {
                    let state = board.snapshot();
                    let legal = board.available_actions();
                    let action = if self.learning {
                        agent.choose_action(&state, &legal)?
                    } else {
                        agent.greedy_action(&state, &legal)?
                    };

                    let won = board.apply_move(action, Mark::X)?;
                    let next = board.snapshot();

                    turn = if won {
                        if self.learning {
                            agent.learn(state, action, REWARD_WIN, &next, true);
                        }
                        Turn::Terminal(Outcome::AgentWin)
                    } else if board.is_full() {
                        if self.learning {
                            agent.learn(state, action, REWARD_DRAW, &next, true);
                        }
                        Turn::Terminal(Outcome::Draw)
                    } else {
                        if self.learning {
                            agent.learn(state, action, 0.0, &next, false);
                        }
                        last_pair = Some((state, action));
                        Turn::OpponentToMove
                    };
                }
                Turn::OpponentToMove => {
                    let legal = board.available_actions();
                    let action = opponent.next_move(board, &legal)?;
                    let won = board.apply_move(action, Mark::O)?;
                    let next = board.snapshot();

                    turn = if won {
                        if self.learning
                            && let Some((state, action)) = last_pair
                        {
                            agent.learn(state, action, REWARD_LOSS, &next, true);
                        }
                        Turn::Terminal(Outcome::OpponentWin)
                    } else if board.is_full() {
                        if self.learning
                            && let Some((state, action)) = last_pair
                        {
                            agent.learn(state, action, REWARD_DRAW, &next, true);
                        }
                        Turn::Terminal(Outcome::Draw)
                    } else {
                        // Non-terminal opponent move: no credit assignment
                        Turn::AgentToMove
                    };
                }
                Turn::Terminal(outcome) => return Ok(outcome),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::ScriptedOpponent,
        q_learning::Hyperparameters,
    };

    /// Greedy agent (ε=0) whose Q-table is primed so its move at each
    /// decision state is the unique maximizer.
    fn primed_agent(path: &[(&str, usize)]) -> QLearningAgent {
        let params = Hyperparameters {
            epsilon: 0.0,
            min_epsilon: 0.0,
            ..Hyperparameters::default()
        };
        let mut agent = QLearningAgent::new(params).unwrap().with_seed(1);
        for &(encoded, action) in path {
            let state = BoardKey::parse(encoded).unwrap();
            agent.q_table_mut().set(state, action, 10.0);
        }
        agent
    }

    #[test]
    fn test_agent_win_credits_positive_reward() {
        // Agent plays 0, 1, 2 (top row); opponent plays 3, 4.
        let mut agent = primed_agent(&[
            (".........", 0),
            ("X..O.....", 1),
            ("XX.OO....", 2),
        ]);
        let mut opponent = ScriptedOpponent::new(vec![3, 4]);
        let mut board = Board::new();

        let outcome = EpisodeRunner::learning()
            .run(&mut board, &mut agent, &mut opponent)
            .unwrap();

        assert_eq!(outcome, Outcome::AgentWin);
        assert_eq!(outcome.score(), 1.0);

        // Final winning pair was updated toward reward 1.0 with α=0.5:
        // new = 0.5*10.0 + 0.5*1.0 = 5.5
        let final_state = BoardKey::parse("XX.OO....").unwrap();
        let q = agent.q_table().value(&final_state, 2);
        assert!((q - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_opponent_win_credits_most_recent_pair() {
        // Agent plays 0, 1; opponent plays 3, 4, 5 (middle row).
        let mut agent = primed_agent(&[(".........", 0), ("X..O.....", 1)]);
        let mut opponent = ScriptedOpponent::new(vec![3, 4, 5]);
        let mut board = Board::new();

        let outcome = EpisodeRunner::learning()
            .run(&mut board, &mut agent, &mut opponent)
            .unwrap();

        assert_eq!(outcome, Outcome::OpponentWin);
        assert_eq!(outcome.score(), -1.0);

        // The agent's last pair was ("X..O.....", 1). It first received the
        // non-terminal reward-0 update, then the terminal -1 credit.
        let last_state = BoardKey::parse("X..O.....").unwrap();
        // After first update: 0.5*10 + 0.5*(0 + 0.99*0) = 5.0
        // After loss credit: 0.5*5 + 0.5*(-1) = 2.0
        let q = agent.q_table().value(&last_state, 1);
        assert!((q - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_draw_outcome_scores_half() {
        // Full board, no three-in-a-row:
        //   X O X
        //   X O O
        //   O X X
        // Agent: 0, 2, 3, 7, 8; opponent: 1, 4, 5, 6.
        let mut agent = primed_agent(&[
            (".........", 0),
            ("XO.......", 2),
            ("XOX.O....", 3),
            ("XOXXOO...", 7),
            ("XOXXOOOX.", 8),
        ]);
        let mut opponent = ScriptedOpponent::new(vec![1, 4, 5, 6]);
        let mut board = Board::new();

        let outcome = EpisodeRunner::learning()
            .run(&mut board, &mut agent, &mut opponent)
            .unwrap();

        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(outcome.score(), 0.5);
        assert!(board.is_terminal());
        assert!(board.winner().is_none());
    }

    #[test]
    fn test_frozen_runner_does_not_learn_or_decay() {
        let mut agent = primed_agent(&[
            (".........", 0),
            ("X..O.....", 1),
            ("XX.OO....", 2),
        ]);
        let table_size = agent.q_table_size();
        let epsilon = agent.epsilon();
        let mut opponent = ScriptedOpponent::new(vec![3, 4]);
        let mut board = Board::new();

        let outcome = EpisodeRunner::frozen()
            .run(&mut board, &mut agent, &mut opponent)
            .unwrap();

        assert_eq!(outcome, Outcome::AgentWin);
        assert_eq!(agent.q_table_size(), table_size);
        assert_eq!(agent.epsilon(), epsilon);
        let final_state = BoardKey::parse("XX.OO....").unwrap();
        assert_eq!(agent.q_table().value(&final_state, 2), 10.0);
    }

    #[test]
    fn test_illegal_scripted_move_is_fatal() {
        let mut agent = primed_agent(&[(".........", 0)]);
        // Opponent tries to replay the agent's cell
        let mut opponent = ScriptedOpponent::new(vec![0]);
        let mut board = Board::new();

        let result = EpisodeRunner::learning().run(&mut board, &mut agent, &mut opponent);
        assert!(matches!(
            result,
            Err(crate::Error::IllegalMove { position: 0 })
        ));
    }
}
