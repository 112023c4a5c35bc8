//! Deterministic collaborators shared by the unit tests.

use std::collections::VecDeque;

use shared::{
    domain::MovieId,
    protocol::MovieRecord,
};

use crate::random::RandomSource;

/// Replays a fixed list of draws, wrapping around when exhausted.
pub struct ScriptedRandom {
    script: Vec<u32>,
    queue: VecDeque<u32>,
}

impl ScriptedRandom {
    pub fn new(script: impl Into<Vec<u32>>) -> Self {
        let script = script.into();
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        if self.queue.is_empty() {
            self.queue = self.script.iter().copied().collect();
        }
        let value = self.queue.pop_front().unwrap_or(0);
        if bound == 0 {
            0
        } else {
            value % bound
        }
    }
}

/// Draws that walk the first `count` seats of the grid in row-major order.
pub fn row_major_draws(count: usize) -> Vec<u32> {
    (0..count)
        .flat_map(|index| [(index / 8) as u32, (index % 8) as u32])
        .collect()
}

pub fn sample_movie(id: i64, title: &str) -> MovieRecord {
    MovieRecord {
        id: MovieId(id),
        title: title.to_string(),
        overview: format!("{title} overview"),
        poster_path: Some(format!("/{id}.jpg")),
        vote_average: 7.46,
        release_date: Some("2025-07-14".to_string()),
    }
}
