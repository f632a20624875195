//! Match identifier generation, injected into plan generation.

use crate::models::MatchId;
use uuid::Uuid;

/// Source of fresh match identifiers.
pub trait IdGenerator {
    fn next_id(&mut self) -> MatchId;
}

/// Random v4 UUIDs; what the server uses.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> MatchId {
        Uuid::new_v4()
    }
}

/// Deterministic ids 1, 2, 3, ... encoded as UUIDs.
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting after `offset`, e.g. to continue a sequence across calls.
    pub fn starting_after(offset: u128) -> Self {
        Self { next: offset }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> MatchId {
        self.next += 1;
        Uuid::from_u128(self.next)
    }
}
