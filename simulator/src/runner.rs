use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local, TimeDelta};
use snake_engine::{
    log, log_verbose, GameState, GameStatus, SessionRng, StateSummary, StepOutcome,
};
use tokio::time::{interval, MissedTickBehavior};

use crate::autopilot::Autopilot;
use crate::config::SimulatorConfig;

#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub ticks: u64,
    pub resets: u64,
    pub apples_eaten: u64,
    pub max_length: usize,
    pub status: GameStatus,
    pub seed: u64,
    pub final_summary: StateSummary,
    pub started_at: DateTime<Local>,
    pub elapsed: TimeDelta,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ticks, {} resets, {} apples, max length {} (seed {}, started {}, {} ms)",
            self.ticks,
            self.resets,
            self.apples_eaten,
            self.max_length,
            self.seed,
            self.started_at.format("%H:%M:%S"),
            self.elapsed.num_milliseconds()
        )?;
        match self.status {
            GameStatus::Running => {}
            GameStatus::Over(reason) => write!(f, ", halted on {:?}", reason)?,
            GameStatus::Filled => write!(f, ", halted on a filled field")?,
        }
        write!(f, " | {}", self.final_summary)
    }
}

pub struct Runner {
    state: GameState,
    autopilot: Autopilot,
    max_ticks: u64,
    tick_interval: Duration,
    realtime: bool,
    max_length: usize,
}

impl Runner {
    pub fn new(config: &SimulatorConfig, seed: Option<u64>) -> Result<Self, String> {
        let rng = match seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        let autopilot_seed = rng.seed().wrapping_add(1);
        let state = GameState::with_rng(config.game.clone(), rng)?;
        let autopilot = Autopilot::from_config(&config.autopilot, autopilot_seed)?;

        Ok(Self {
            max_length: state.body().len(),
            state,
            autopilot,
            max_ticks: config.max_ticks,
            tick_interval: Duration::from_millis(config.tick_interval_ms as u64),
            realtime: config.realtime,
        })
    }

    #[cfg(test)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tick(&mut self) -> StepOutcome {
        let input = self.autopilot.next_input(&self.state);
        let outcome = self.state.step(input);
        self.max_length = self.max_length.max(self.state.body().len());
        log_verbose!("[tick {}] {:?} | {}", self.state.ticks(), outcome, self.state.summary());
        outcome
    }

    fn is_finished(&self) -> bool {
        self.state.ticks() >= self.max_ticks || self.state.status() != GameStatus::Running
    }

    pub fn run_headless(&mut self) -> RunReport {
        let started_at = Local::now();
        loop {
            self.tick();
            if self.is_finished() {
                break;
            }
        }
        self.report(started_at)
    }

    pub async fn run_realtime(&mut self) -> RunReport {
        let started_at = Local::now();
        let mut tick_interval_timer = interval(self.tick_interval);
        tick_interval_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tick_interval_timer.tick().await;
            self.tick();
            if self.is_finished() {
                break;
            }
        }
        self.report(started_at)
    }

    pub async fn run(&mut self) -> RunReport {
        log!(
            "Running {} ticks with {} autopilot{}",
            self.max_ticks,
            self.autopilot.name(),
            if self.realtime { " in realtime" } else { "" }
        );
        if self.realtime {
            self.run_realtime().await
        } else {
            self.run_headless()
        }
    }

    fn report(&self, started_at: DateTime<Local>) -> RunReport {
        RunReport {
            ticks: self.state.ticks(),
            resets: self.state.resets(),
            apples_eaten: self.state.apples_eaten(),
            max_length: self.max_length,
            status: self.state.status(),
            seed: self.state.seed(),
            final_summary: self.state.summary(),
            started_at,
            elapsed: Local::now() - started_at,
        }
    }
}
