//! Core game state and the five transfer actions
//!
//! The queue is dealt full at start and every action that takes its front
//! piece refills it immediately, so it always shows `QUEUE_CAPACITY` pieces.
//! Each action checks its preconditions before touching either container:
//! a refused action leaves the state exactly as it was.

use crate::error::{ContainerError, TransferError};
use crate::generator::PieceGenerator;
use crate::piece::Piece;
use crate::queue::BoundedQueue;
use crate::stack::BoundedStack;
use crate::stats::Stats;
use std::fmt;

/// Upcoming pieces kept visible
pub const QUEUE_CAPACITY: usize = 5;
/// Reserve stack size
pub const STACK_CAPACITY: usize = 3;
/// Pieces exchanged by a block swap
pub const BLOCK_SIZE: usize = STACK_CAPACITY;

/// The transfer actions a player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Play the front piece of the queue
    Play,
    /// Move the front piece of the queue onto the reserve stack
    Reserve,
    /// Consume the top of the reserve stack
    UseReserved,
    /// Exchange the queue front and the stack top in place
    SwapFrontTop,
    /// Exchange the first three queue pieces with the whole stack
    SwapBlock,
}

impl Action {
    /// Map a numbered menu choice to an action (0 is quit, handled by the caller)
    pub fn from_choice(choice: u8) -> Option<Action> {
        match choice {
            1 => Some(Action::Play),
            2 => Some(Action::Reserve),
            3 => Some(Action::UseReserved),
            4 => Some(Action::SwapFrontTop),
            5 => Some(Action::SwapBlock),
            _ => None,
        }
    }

    pub fn choice(&self) -> u8 {
        match self {
            Action::Play => 1,
            Action::Reserve => 2,
            Action::UseReserved => 3,
            Action::SwapFrontTop => 4,
            Action::SwapBlock => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Action::Play => "Play",
            Action::Reserve => "Reserve",
            Action::UseReserved => "Use reserved",
            Action::SwapFrontTop => "Swap front/top",
            Action::SwapBlock => "Swap block",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Action::Play => "Play piece (remove from queue)",
            Action::Reserve => "Reserve piece (queue -> stack)",
            Action::UseReserved => "Use reserved piece (remove from stack)",
            Action::SwapFrontTop => "Swap stack top with queue front",
            Action::SwapBlock => "Swap block (3 of queue <-> 3 of stack)",
        }
    }

    pub fn all() -> &'static [Action] {
        &[
            Action::Play,
            Action::Reserve,
            Action::UseReserved,
            Action::SwapFrontTop,
            Action::SwapBlock,
        ]
    }
}

/// What a successful action did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Played(Piece),
    Reserved(Piece),
    UsedReserved(Piece),
    /// Pieces now sitting at the queue front and the stack top
    SwappedFrontTop { front: Piece, top: Piece },
    /// Pieces now at the queue front (front first) and in the stack (top first)
    SwappedBlock {
        front: [Piece; BLOCK_SIZE],
        stack: [Piece; BLOCK_SIZE],
    },
}

impl Outcome {
    pub fn action(&self) -> Action {
        match self {
            Outcome::Played(_) => Action::Play,
            Outcome::Reserved(_) => Action::Reserve,
            Outcome::UsedReserved(_) => Action::UseReserved,
            Outcome::SwappedFrontTop { .. } => Action::SwapFrontTop,
            Outcome::SwappedBlock { .. } => Action::SwapBlock,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Played(piece) => write!(f, "Piece {} was played!", piece),
            Outcome::Reserved(piece) => write!(f, "Piece {} reserved on the stack.", piece),
            Outcome::UsedReserved(piece) => write!(f, "Reserved piece {} was used!", piece),
            Outcome::SwappedFrontTop { front, top } => write!(
                f,
                "Swap done: stack top <-> queue front (front {}, top {})",
                front, top
            ),
            Outcome::SwappedBlock { front, stack } => write!(
                f,
                "Block swap done: queue front {}, stack {}",
                chips(front),
                chips(stack)
            ),
        }
    }
}

fn chips(pieces: &[Piece]) -> String {
    pieces.iter().map(Piece::to_string).collect::<Vec<_>>().join(" ")
}

/// An action paired with how it went, ready for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub action: Action,
    pub result: Result<Outcome, TransferError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(outcome) => write!(f, ">>> {}", outcome),
            Err(e) => write!(f, "ERROR ({}): {}", self.action.name(), e),
        }
    }
}

/// The queue, the reserve stack and the dealer behind them
#[derive(Debug, Clone)]
pub struct GameState {
    queue: BoundedQueue<Piece, QUEUE_CAPACITY>,
    stack: BoundedStack<Piece, STACK_CAPACITY>,
    generator: PieceGenerator,
    pub stats: Stats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Deal a new game with a random seed
    pub fn new() -> Self {
        Self::with_generator(PieceGenerator::new())
    }

    /// Deal a new game with a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_generator(PieceGenerator::with_seed(seed))
    }

    /// Fill the queue from `generator`; the stack starts empty
    pub fn with_generator(generator: PieceGenerator) -> Self {
        let mut state = Self {
            queue: BoundedQueue::new(),
            stack: BoundedStack::new(),
            generator,
            stats: Stats::default(),
        };
        while !state.queue.is_full() {
            let piece = state.generator.generate();
            if let Err(e) = state.queue.enqueue(piece) {
                tracing::error!("Initial deal stopped early: {}", e);
                break;
            }
        }
        tracing::info!(
            "Dealt queue {}",
            chips(&state.queue.iter().copied().collect::<Vec<_>>())
        );
        state
    }

    pub fn queue(&self) -> &BoundedQueue<Piece, QUEUE_CAPACITY> {
        &self.queue
    }

    pub fn stack(&self) -> &BoundedStack<Piece, STACK_CAPACITY> {
        &self.stack
    }

    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    /// Run one action, record it in the stats and log it
    pub fn apply(&mut self, action: Action) -> Report {
        let result = match action {
            Action::Play => self.play_front(),
            Action::Reserve => self.reserve_front(),
            Action::UseReserved => self.pop_reserved(),
            Action::SwapFrontTop => self.swap_front_with_top(),
            Action::SwapBlock => self.swap_block_with_stack(),
        };

        match &result {
            Ok(outcome) => {
                self.stats.record(outcome);
                tracing::info!("{}: {}", action.name(), outcome);
                tracing::debug!(
                    "Queue front {:?}, stack top {:?}, stack depth {}",
                    self.queue.front(),
                    self.stack.top(),
                    self.stack.len()
                );
            }
            Err(e) => {
                self.stats.record_failure();
                tracing::warn!("{} refused: {}", action.name(), e);
            }
        }

        Report { action, result }
    }

    /// Play the front piece and deal one new piece onto the tail
    pub fn play_front(&mut self) -> Result<Outcome, TransferError> {
        let played = self.queue.dequeue()?;
        self.queue.enqueue(self.generator.generate())?;
        Ok(Outcome::Played(played))
    }

    /// Move the front piece onto the reserve stack, then refill the queue
    pub fn reserve_front(&mut self) -> Result<Outcome, TransferError> {
        if self.stack.is_full() {
            return Err(TransferError::StackFull);
        }
        let piece = self.queue.dequeue()?;
        self.stack.push(piece)?;
        self.queue.enqueue(self.generator.generate())?;
        Ok(Outcome::Reserved(piece))
    }

    /// Consume the top reserved piece. The queue is not touched.
    pub fn pop_reserved(&mut self) -> Result<Outcome, TransferError> {
        if self.stack.is_empty() {
            return Err(TransferError::StackEmpty);
        }
        let used = self.stack.pop()?;
        Ok(Outcome::UsedReserved(used))
    }

    /// Exchange the queue front slot with the stack top slot
    pub fn swap_front_with_top(&mut self) -> Result<Outcome, TransferError> {
        let (Some(front), Some(top)) = (self.queue.front_mut(), self.stack.top_mut()) else {
            return Err(TransferError::EmptyContainer);
        };
        std::mem::swap(front, top);
        Ok(Outcome::SwappedFrontTop {
            front: *front,
            top: *top,
        })
    }

    /// Exchange queue positions 0..3 with stack depths 0..3 pairwise
    /// (front with top, second with second, third with base)
    pub fn swap_block_with_stack(&mut self) -> Result<Outcome, TransferError> {
        if !self.stack.is_full() {
            return Err(TransferError::StackNotFull);
        }
        if self.queue.len() < BLOCK_SIZE {
            return Err(TransferError::EmptyContainer);
        }
        let first = *self.queue.front().ok_or(ContainerError::Empty)?;

        let mut front = [first; BLOCK_SIZE];
        let mut stack = [first; BLOCK_SIZE];
        for i in 0..BLOCK_SIZE {
            // Both lengths were checked above
            let (Some(q), Some(s)) = (self.queue.get_mut(i), self.stack.get_mut(i)) else {
                return Err(ContainerError::Empty.into());
            };
            std::mem::swap(q, s);
            front[i] = *q;
            stack[i] = *s;
        }
        Ok(Outcome::SwappedBlock { front, stack })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(pieces: impl Iterator<Item = &'a Piece>) -> Vec<u64> {
        pieces.map(|p| p.id()).collect()
    }

    fn queue_ids(state: &GameState) -> Vec<u64> {
        ids(state.queue().iter())
    }

    fn stack_ids(state: &GameState) -> Vec<u64> {
        ids(state.stack().iter())
    }

    fn assert_capacity_invariant(state: &GameState) {
        assert!(state.queue().len() <= QUEUE_CAPACITY);
        assert!(state.stack().len() <= STACK_CAPACITY);
    }

    #[test]
    fn test_initial_deal() {
        let state = GameState::with_seed(1);
        assert!(state.queue().is_full());
        assert!(state.stack().is_empty());
        assert_eq!(queue_ids(&state), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_fresh_queue_dequeues_in_creation_order() {
        let mut state = GameState::with_seed(2);
        let drained: Vec<u64> = (0..QUEUE_CAPACITY)
            .map(|_| state.queue.dequeue().unwrap().id())
            .collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_play_refills_queue() {
        let mut state = GameState::with_seed(3);
        let report = state.apply(Action::Play);
        match report.result {
            Ok(Outcome::Played(piece)) => assert_eq!(piece.id(), 0),
            other => panic!("unexpected result {:?}", other),
        }
        assert!(state.queue().is_full());
        assert_eq!(queue_ids(&state), vec![1, 2, 3, 4, 5]);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_reserve_moves_front_to_stack() {
        let mut state = GameState::with_seed(4);
        let front = *state.queue().front().unwrap();
        assert_eq!(state.reserve_front(), Ok(Outcome::Reserved(front)));
        assert_eq!(state.stack().top(), Some(&front));
        assert!(state.queue().is_full());
        assert_eq!(queue_ids(&state), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_reserve_on_full_stack_leaves_state_unchanged() {
        let mut state = GameState::with_seed(5);
        for _ in 0..STACK_CAPACITY {
            state.reserve_front().unwrap();
        }
        let queue = state.queue().clone();
        let stack = state.stack().clone();
        let generated = state.generator().generated();

        assert_eq!(state.reserve_front(), Err(TransferError::StackFull));
        assert_eq!(state.queue(), &queue);
        assert_eq!(state.stack(), &stack);
        assert_eq!(state.generator().generated(), generated);
    }

    #[test]
    fn test_use_reserved() {
        let mut state = GameState::with_seed(6);
        state.reserve_front().unwrap();
        state.reserve_front().unwrap();
        let queue = state.queue().clone();

        let report = state.apply(Action::UseReserved);
        match report.result {
            Ok(Outcome::UsedReserved(piece)) => assert_eq!(piece.id(), 1),
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(stack_ids(&state), vec![0]);
        // No refill for this action
        assert_eq!(state.queue(), &queue);
    }

    #[test]
    fn test_use_reserved_on_empty_stack() {
        let mut state = GameState::with_seed(7);
        let queue = state.queue().clone();
        assert_eq!(state.pop_reserved(), Err(TransferError::StackEmpty));
        assert_eq!(state.queue(), &queue);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_swap_front_with_top() {
        let mut state = GameState::with_seed(8);
        state.reserve_front().unwrap(); // stack [0], queue [1..=5]
        let outcome = state.swap_front_with_top().unwrap();

        assert_eq!(queue_ids(&state), vec![0, 2, 3, 4, 5]);
        assert_eq!(stack_ids(&state), vec![1]);
        match outcome {
            Outcome::SwappedFrontTop { front, top } => {
                assert_eq!(front.id(), 0);
                assert_eq!(top.id(), 1);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
        assert_eq!(state.queue().len(), QUEUE_CAPACITY);
        assert_eq!(state.stack().len(), 1);
    }

    #[test]
    fn test_swap_front_with_empty_stack() {
        let mut state = GameState::with_seed(9);
        let queue = state.queue().clone();
        assert_eq!(state.swap_front_with_top(), Err(TransferError::EmptyContainer));
        assert_eq!(state.queue(), &queue);
        assert!(state.stack().is_empty());
    }

    #[test]
    fn test_swap_block_requires_full_stack() {
        let mut state = GameState::with_seed(10);
        for _ in 0..STACK_CAPACITY - 1 {
            state.reserve_front().unwrap();
            let queue = state.queue().clone();
            let stack = state.stack().clone();
            assert_eq!(state.swap_block_with_stack(), Err(TransferError::StackNotFull));
            assert_eq!(state.queue(), &queue);
            assert_eq!(state.stack(), &stack);
        }
    }

    #[test]
    fn test_reserve_three_then_swap_block() {
        let mut state = GameState::with_seed(11);
        for _ in 0..3 {
            state.apply(Action::Reserve);
            assert!(state.queue().is_full());
        }
        assert_eq!(stack_ids(&state), vec![2, 1, 0]);
        assert_eq!(queue_ids(&state), vec![3, 4, 5, 6, 7]);

        let report = state.apply(Action::SwapBlock);
        assert!(report.is_success());
        assert_eq!(queue_ids(&state), vec![2, 1, 0, 6, 7]);
        assert_eq!(stack_ids(&state), vec![3, 4, 5]);
        assert_eq!(state.queue().len(), QUEUE_CAPACITY);
        assert_eq!(state.stack().len(), STACK_CAPACITY);

        match report.result {
            Ok(Outcome::SwappedBlock { front, stack }) => {
                assert_eq!(front.map(|p| p.id()), [2, 1, 0]);
                assert_eq!(stack.map(|p| p.id()), [3, 4, 5]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_swap_block_after_wraparound() {
        let mut state = GameState::with_seed(12);
        // Push head around the ring before filling the stack
        for _ in 0..4 {
            state.play_front().unwrap();
        }
        for _ in 0..3 {
            state.reserve_front().unwrap();
        }
        let front_before: Vec<u64> = queue_ids(&state)[..3].to_vec();
        let stack_before = stack_ids(&state);

        state.swap_block_with_stack().unwrap();
        assert_eq!(queue_ids(&state)[..3].to_vec(), stack_before);
        assert_eq!(stack_ids(&state), front_before);
    }

    #[test]
    fn test_ids_unique_and_increasing_across_actions() {
        let mut state = GameState::with_seed(13);
        let mut seen: Vec<u64> = queue_ids(&state);
        let script = [
            Action::Play,
            Action::Reserve,
            Action::SwapFrontTop,
            Action::Reserve,
            Action::Reserve,
            Action::Reserve,
            Action::SwapBlock,
            Action::UseReserved,
            Action::Play,
            Action::UseReserved,
            Action::UseReserved,
            Action::UseReserved,
        ];
        for action in script {
            let before = state.generator().generated();
            state.apply(action);
            assert_capacity_invariant(&state);
            if state.generator().generated() > before {
                // Newly dealt pieces land on the queue tail
                let newest = state.queue().get(state.queue().len() - 1).unwrap().id();
                assert_eq!(newest, before);
                seen.push(newest);
            }
        }
        assert!(seen.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_report_messages() {
        let mut state = GameState::with_seed(14);
        let ok = state.apply(Action::Play);
        assert!(ok.to_string().starts_with(">>> Piece ["));
        let err = state.apply(Action::UseReserved);
        assert_eq!(
            err.to_string(),
            "ERROR (Use reserved): Reserve stack is empty!"
        );
    }

    #[test]
    fn test_block_swap_message_lists_pieces() {
        let mut state = GameState::with_seed(15);
        for _ in 0..3 {
            state.reserve_front().unwrap();
        }
        let outcome = state.swap_block_with_stack().unwrap();
        let text = outcome.to_string();
        let expected: Vec<String> = state
            .queue()
            .iter()
            .take(BLOCK_SIZE)
            .chain(state.stack().iter())
            .map(Piece::to_string)
            .collect();
        for chip in &expected {
            assert!(text.contains(chip.as_str()), "{} missing from {:?}", chip, text);
        }
        assert_eq!(queue_ids(&state)[..BLOCK_SIZE], [2, 1, 0]);
        let listed = format!(
            "queue front {}, stack {}",
            expected[..BLOCK_SIZE].join(" "),
            expected[BLOCK_SIZE..].join(" ")
        );
        assert!(text.ends_with(&listed), "{:?}", text);
    }

    #[test]
    fn test_action_choices_round_trip() {
        for action in Action::all() {
            assert_eq!(Action::from_choice(action.choice()), Some(*action));
        }
        assert_eq!(Action::from_choice(0), None);
        assert_eq!(Action::from_choice(6), None);
    }
}
