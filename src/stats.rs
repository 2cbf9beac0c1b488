//! Session statistics shown in the side panel and the exit summary

use crate::game::{Action, Outcome};

/// Running tally of what happened this session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    /// Pieces played straight from the queue
    pub played: u64,
    /// Pieces moved onto the reserve stack
    pub reserved: u64,
    /// Reserved pieces consumed
    pub used: u64,
    /// Front/top and block swaps
    pub swaps: u64,
    /// Actions refused because a precondition failed
    pub refused: u64,
}

impl Stats {
    /// Count a successful action
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome.action() {
            Action::Play => self.played += 1,
            Action::Reserve => self.reserved += 1,
            Action::UseReserved => self.used += 1,
            Action::SwapFrontTop | Action::SwapBlock => self.swaps += 1,
        }
    }

    /// Count a refused action
    pub fn record_failure(&mut self) {
        self.refused += 1;
    }

    /// Pieces that left the game (played or used from the reserve)
    pub fn consumed(&self) -> u64 {
        self.played + self.used
    }

    /// Total actions attempted
    pub fn actions(&self) -> u64 {
        self.played + self.reserved + self.used + self.swaps + self.refused
    }
}
