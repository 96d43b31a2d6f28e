use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use rotaview_core::TimelineState;
use rotaview_core::config::LayoutConfig;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::loader::Sources;
use crate::render::Render;
use crate::zone::Zone;

/// Clear the terminal and move the cursor home
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Render once, then reload and re-render every `interval` until Ctrl-C.
///
/// A failed reload keeps the previous timeline; only the clock moves on.
pub async fn run(
    sources: &Sources,
    zone: &Zone,
    interval: Duration,
    layout: &LayoutConfig,
) -> Result<()> {
    watch_until(sources, zone, interval, layout, tokio::signal::ctrl_c()).await
}

/// The refresh loop, stopping once `shutdown` resolves.
///
/// `shutdown` is polled across iterations, so it fires even when it
/// resolves while a reload is in flight.
async fn watch_until<F: Future>(
    sources: &Sources,
    zone: &Zone,
    interval: Duration,
    layout: &LayoutConfig,
    shutdown: F,
) -> Result<()> {
    let docs = sources.load().await?;
    let mut state = TimelineState::build(
        &docs.schedule,
        docs.overrides.as_ref(),
        zone.day(Utc::now()),
    );
    draw(&state, layout);

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    ticker.tick().await;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let now = Utc::now();
                match sources.load().await {
                    Ok(docs) => {
                        state.rebuild(&docs.schedule, docs.overrides.as_ref(), zone.day(now));
                        info!(windows = state.windows().len(), "reloaded schedule");
                    }
                    Err(e) => {
                        error!(error = %format!("{e:#}"), "reload failed, keeping previous timeline");
                        if state.is_stale(now) {
                            error!("timeline is from a previous day");
                        }
                    }
                }
                draw(&state, layout);
            }
            _ = &mut shutdown => {
                info!("stopping");
                break;
            }
        }
    }

    Ok(())
}

fn draw(state: &TimelineState, layout: &LayoutConfig) {
    let model = state.render(Utc::now(), layout);
    print!("{}", CLEAR_SCREEN);
    println!("{}", model.render());
}
