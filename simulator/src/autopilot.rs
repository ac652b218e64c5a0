use std::collections::BTreeMap;

use snake_engine::{Cell, GameState, Heading, SessionRng};

use crate::config::AutopilotConfig;

/// Parses a scripted turn such as `"12:up"` into the tick it fires on and the heading.
pub fn parse_turn(turn: &str) -> Result<(u64, Heading), String> {
    let (tick, heading) = turn
        .split_once(':')
        .ok_or_else(|| format!("Turn '{}' must look like '<tick>:<heading>'", turn))?;
    let tick = tick
        .trim()
        .parse::<u64>()
        .map_err(|e| format!("Invalid tick in turn '{}': {}", turn, e))?;
    let heading = heading.parse::<Heading>()?;
    Ok((tick, heading))
}

/// Stand-in for a player: produces at most one heading per tick.
pub enum Autopilot {
    Idle,
    Scripted { turns: BTreeMap<u64, Heading> },
    Random { rng: SessionRng, turn_probability: f64 },
    Greedy,
}

impl Autopilot {
    pub fn from_config(config: &AutopilotConfig, seed: u64) -> Result<Self, String> {
        let autopilot = match config {
            AutopilotConfig::Idle => Autopilot::Idle,
            AutopilotConfig::Scripted { turns } => {
                let turns = turns
                    .iter()
                    .map(|turn| parse_turn(turn))
                    .collect::<Result<BTreeMap<_, _>, _>>()?;
                Autopilot::Scripted { turns }
            }
            AutopilotConfig::Random { turn_probability } => Autopilot::Random {
                rng: SessionRng::new(seed),
                turn_probability: *turn_probability,
            },
            AutopilotConfig::Greedy => Autopilot::Greedy,
        };
        Ok(autopilot)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Autopilot::Idle => "idle",
            Autopilot::Scripted { .. } => "scripted",
            Autopilot::Random { .. } => "random",
            Autopilot::Greedy => "greedy",
        }
    }

    /// Heading to feed into the tick that is about to run.
    pub fn next_input(&mut self, state: &GameState) -> Option<Heading> {
        match self {
            Autopilot::Idle => None,
            Autopilot::Scripted { turns } => turns.get(&(state.ticks() + 1)).copied(),
            Autopilot::Random { rng, turn_probability } => {
                if rng.random_bool(*turn_probability) {
                    random_safe_turn(state, rng)
                } else {
                    None
                }
            }
            Autopilot::Greedy => towards_apple(state),
        }
    }
}

fn candidate_headings(current: Heading) -> impl Iterator<Item = Heading> {
    Heading::ALL
        .into_iter()
        .filter(move |&heading| heading == current || current.differs_on_both_axes(heading))
}

fn is_safe(state: &GameState, cell: Cell) -> bool {
    state.field().contains(cell) && !state.body().contains(&cell)
}

fn manhattan_distance(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

// Only returns a heading when turning beats going straight.
fn towards_apple(state: &GameState) -> Option<Heading> {
    let head = state.body().head();
    let apple = state.apple();
    let current = state.body().heading();

    candidate_headings(current)
        .filter(|&heading| is_safe(state, head.offset(heading)))
        .min_by_key(|&heading| (manhattan_distance(head.offset(heading), apple), heading != current))
        .filter(|&heading| heading != current)
}

fn random_safe_turn(state: &GameState, rng: &mut SessionRng) -> Option<Heading> {
    let head = state.body().head();
    let current = state.body().heading();
    let safe: Vec<Heading> = candidate_headings(current)
        .filter(|&heading| heading != current && is_safe(state, head.offset(heading)))
        .collect();

    if safe.is_empty() {
        None
    } else {
        Some(safe[rng.random_range(0..safe.len())])
    }
}
