use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPhase {
    Idle,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    Restarted,
}

/// Tracks whether a tick source is live and which run it belongs to.
///
/// Every `start` bumps the generation, so a tick carrying an older
/// generation is stale and must not touch state.
#[derive(Debug, Clone)]
pub struct MotionMachine {
    phase: MotionPhase,
    generation: u64,
}

impl MotionMachine {
    pub fn new() -> Self {
        Self {
            phase: MotionPhase::Idle,
            generation: 0,
        }
    }

    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self) -> StartOutcome {
        let outcome = match self.phase {
            MotionPhase::Idle => StartOutcome::Started,
            MotionPhase::Running => StartOutcome::Restarted,
        };
        self.phase = MotionPhase::Running;
        self.generation = self.generation.wrapping_add(1);
        outcome
    }

    /// Returns false when already idle.
    pub fn stop(&mut self) -> bool {
        if self.phase == MotionPhase::Idle {
            return false;
        }
        self.phase = MotionPhase::Idle;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.phase == MotionPhase::Running && self.generation == generation
    }
}

impl Default for MotionMachine {
    fn default() -> Self {
        Self::new()
    }
}
