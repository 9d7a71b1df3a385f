//! Scripted input timeline for headless runs.
//!
//! An [`InputScript`] is a list of [`HoldSpan`]s, each holding one key down
//! for a half-open range of tick indices. The
//! [`apply_input_script`](crate::systems::input::apply_input_script) system
//! rewrites [`InputState`](crate::resources::input::InputState) from it at
//! the start of every tick.
//!
//! Spans parse from `KEY@START..END` (end exclusive) or `KEY@TICK`:
//!
//! ```text
//! D@0..3      hold D during ticks 0, 1 and 2
//! W@10        tap W on tick 10
//! Left@5..60  hold the left arrow
//! ```
use std::str::FromStr;

use bevy_ecs::prelude::*;

use crate::resources::input::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSpan {
    pub key: KeyCode,
    pub start: u64,
    pub end: u64,
}

impl HoldSpan {
    pub fn contains(&self, tick: u64) -> bool {
        tick >= self.start && tick < self.end
    }
}

impl FromStr for HoldSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (key, range) = s
            .rsplit_once('@')
            .ok_or_else(|| format!("expected KEY@START..END, got '{s}'"))?;
        let key: KeyCode = key.parse()?;
        let parse_tick = |t: &str| {
            t.trim()
                .parse::<u64>()
                .map_err(|e| format!("invalid tick '{t}' in '{s}': {e}"))
        };
        let (start, end) = match range.split_once("..") {
            Some((a, b)) => (parse_tick(a)?, parse_tick(b)?),
            None => {
                let t = parse_tick(range)?;
                let end = t
                    .checked_add(1)
                    .ok_or_else(|| format!("tick {t} in '{s}' is too large"))?;
                (t, end)
            }
        };
        if end <= start {
            return Err(format!("empty tick range in '{s}'"));
        }
        Ok(HoldSpan { key, start, end })
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct InputScript {
    pub spans: Vec<HoldSpan>,
}

impl InputScript {
    pub fn new(spans: Vec<HoldSpan>) -> Self {
        Self { spans }
    }

    /// Keys held on `tick`.
    pub fn held_at(&self, tick: u64) -> impl Iterator<Item = KeyCode> + '_ {
        self.spans
            .iter()
            .filter(move |s| s.contains(tick))
            .map(|s| s.key)
    }

    /// First tick after which no span holds any key.
    pub fn last_tick(&self) -> u64 {
        self.spans.iter().map(|s| s.end).max().unwrap_or(0)
    }
}
