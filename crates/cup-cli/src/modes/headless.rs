use anyhow::Result;

use super::Match;

/// Run the match for a fixed number of ticks without pacing.
pub fn run(mut game: Match, ticks: u64) -> Result<()> {
    tracing::info!("Running {} ticks headless", ticks);
    for _ in 0..ticks {
        game.tick();
    }
    game.summary();
    Ok(())
}
