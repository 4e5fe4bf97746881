use anyhow::Result;
use tokio::time::Duration;

use super::{Match, DT};

/// Run the match at the tick rate until ctrl-c.
pub async fn run(mut game: Match) -> Result<()> {
    tracing::info!("Running in real time, press ctrl-c to stop");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interval = tokio::time::interval(Duration::from_secs_f64(DT));
    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result?;
                tracing::info!("Shutting down");
                break;
            }
            _ = interval.tick() => {
                game.tick();
            }
        }
    }

    game.summary();
    Ok(())
}
