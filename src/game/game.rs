use uuid::Uuid;

use crate::game::action::Command;
use crate::game::config::GameConfig;
use crate::game::players::Player;
use crate::game::round::Phase;
use crate::game::state::{GameError, GameState};
use crate::game::trade::TradeError;
use crate::players::BasePlayer;

/// A `GameState` plus the ordered log of commands that changed it. Replaying the log
/// against the same config and seating rebuilds the same state.
#[derive(Debug)]
pub struct Game {
    pub id: Uuid,
    pub seed: u64,
    config: GameConfig,
    seating: Vec<Player>,
    pub state: GameState,
    log: Vec<Command>,
}

impl Game {
    pub fn new(config: GameConfig, players: Vec<Player>) -> Result<Self, GameError> {
        let state = GameState::new(config.clone(), players.clone())?;
        Ok(Self {
            id: Uuid::new_v4(),
            seed: config.seed,
            config,
            seating: players,
            state,
            log: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seating(&self) -> &[Player] {
        &self.seating
    }

    pub fn log(&self) -> &[Command] {
        &self.log
    }

    /// Applies `command`, logging it when it changed the state. A few rejections
    /// still change state and are logged too.
    pub fn execute(&mut self, command: Command) -> Result<(), GameError> {
        let result = self.state.apply(&command);
        if Self::changes_state(&command, &result) {
            self.log.push(command);
        }
        result
    }

    fn changes_state(command: &Command, result: &Result<(), GameError>) -> bool {
        match result {
            Ok(()) => true,
            Err(GameError::NothingToSteal(_)) => matches!(command, Command::RobPlayer { .. }),
            Err(GameError::Trade(TradeError::Insufficient { .. })) => matches!(
                command,
                Command::AcceptTradeOffer { .. } | Command::FinalizeTrade { .. }
            ),
            Err(_) => false,
        }
    }

    /// Rebuilds a game from its log. The new game gets a fresh id.
    pub fn replay(
        config: GameConfig,
        players: Vec<Player>,
        log: &[Command],
    ) -> Result<Self, GameError> {
        let mut game = Self::new(config, players)?;
        for command in log {
            if let Err(err) = game.execute(command.clone()) {
                if !Self::changes_state(command, &Err(err.clone())) {
                    return Err(err);
                }
            }
        }
        Ok(game)
    }

    /// Lets `agents` drive the game, one per seat, until it ends, an agent passes,
    /// or `max_commands` commands have been sent. Returns the winner's id.
    pub fn play(
        &mut self,
        agents: &mut [Box<dyn BasePlayer>],
        max_commands: usize,
    ) -> Option<String> {
        let mut sent = 0;
        while self.state.phase() != Phase::GameOver && sent < max_commands {
            let seat = self.state.acting_seat();
            let commands = self.state.legal_commands();
            if commands.is_empty() {
                let player = self.state.players()[seat].id();
                log::warn!("no legal command for {player} in {}", self.state.phase());
                break;
            }
            let Some(agent) = agents.get_mut(seat) else {
                break;
            };
            let Some(command) = agent.decide(&self.state, &commands) else {
                break;
            };
            if let Err(err) = self.execute(command) {
                log::debug!("command rejected: {err}");
            }
            sent += 1;
        }
        self.winner()
    }

    pub fn winner(&self) -> Option<String> {
        self.state.winner().map(str::to_string)
    }
}
