use std::collections::VecDeque;
use std::fmt;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of every random decision the engine makes. Draws happen in command order,
/// so a seed plus the command log reproduces a game exactly.
pub trait RandomSource: fmt::Debug + Send {
    /// One six-sided die.
    fn roll_die(&mut self) -> u8;

    /// Uniform index in `0..bound`; `bound` is never zero.
    fn pick(&mut self, bound: usize) -> usize;

    /// A permutation of `0..len`.
    fn shuffle_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        for i in (1..len).rev() {
            let j = self.pick(i + 1);
            indices.swap(i, j);
        }
        indices
    }
}

/// Returns `items` reordered by one draw of `shuffle_indices`.
pub fn shuffled<T: Clone>(rng: &mut dyn RandomSource, items: &[T]) -> Vec<T> {
    rng.shuffle_indices(items.len())
        .into_iter()
        .map(|idx| items[idx].clone())
        .collect()
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=6)
    }

    fn pick(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn shuffle_indices(&mut self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut self.rng);
        indices
    }
}

/// Replays queued dice and picks. Shuffles keep the input order so fixtures can lay
/// out decks and maps by hand. Once a queue runs dry, dice show 1 and picks return 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    dice: VecDeque<u8>,
    picks: VecDeque<usize>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = (u8, u8)>) -> Self {
        for (first, second) in rolls {
            self.dice.push_back(first);
            self.dice.push_back(second);
        }
        self
    }

    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks.extend(picks);
        self
    }

    pub fn push_roll(&mut self, first: u8, second: u8) {
        self.dice.push_back(first);
        self.dice.push_back(second);
    }

    pub fn push_pick(&mut self, pick: usize) {
        self.picks.push_back(pick);
    }
}

impl RandomSource for ScriptedRandom {
    fn roll_die(&mut self) -> u8 {
        self.dice.pop_front().unwrap_or(1)
    }

    fn pick(&mut self, bound: usize) -> usize {
        self.picks.pop_front().map(|v| v % bound).unwrap_or(0)
    }

    fn shuffle_indices(&mut self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}
