use clap::ValueEnum;
use cup_core::{DebugSubscriber, Side};
use cup_executor::Executor;
use cup_simulator::Simulation;

pub mod headless;
pub mod real_time;

pub const FREQ: f64 = 60.0;
pub const DT: f64 = 1.0 / FREQ;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// Run a fixed number of ticks as fast as possible
    Headless,
    /// Step at 60 Hz until interrupted
    RealTime,
}

/// A simulated match: the physics world and the programs driving it.
pub struct Match {
    simulation: Simulation,
    executor: Executor,
    report_every: u64,
    debug: DebugSubscriber,
}

impl Match {
    pub fn new(simulation: Simulation, executor: Executor, report_every: u64) -> Self {
        Self {
            simulation,
            executor,
            report_every,
            debug: DebugSubscriber::spawn(),
        }
    }

    /// Decide, then step the physics once.
    pub fn tick(&mut self) -> Option<Side> {
        self.executor.tick(&mut self.simulation);
        let scorer = self.simulation.step(DT);
        if let Some(side) = scorer {
            tracing::info!(
                tick = self.executor.tick_count(),
                "Goal for {:?}, score {}",
                side,
                self.simulation.score()
            );
        }

        if self.report_every > 0 && self.executor.tick_count() % self.report_every == 0 {
            self.report();
        }
        scorer
    }

    fn report(&self) {
        let ball = self.executor.ball().position;
        tracing::info!(
            "t={:.1}s ball at ({:.0}, {:.0}), p{} attacking",
            self.simulation.time(),
            ball.x,
            ball.y,
            self.executor.assignment().attacker,
        );
        for robot in self.executor.robots() {
            tracing::debug!(
                "p{} at ({:.0}, {:.0}) dribble {:?} chase {:?}{}",
                robot.slot,
                robot.position.x,
                robot.position.y,
                robot.dribble_state,
                robot.chase_state,
                if robot.out_of_bounds { " out" } else { "" }
            );
        }
        tracing::trace!("debug values: {:?}", self.debug.get_copy());
    }

    pub fn summary(&self) {
        tracing::info!(
            "Finished after {} ticks ({:.1}s simulated), score {}",
            self.executor.tick_count(),
            self.simulation.time(),
            self.simulation.score()
        );
    }
}
