use anyhow::Result;
use owo_colors::OwoColorize;
use rotaview_core::build_windows;

use crate::loader::Sources;
use crate::render::render_window;
use crate::zone::{Zone, resolve_now};

pub async fn run(sources: &Sources, zone: &Zone, now: Option<&str>) -> Result<()> {
    let now = resolve_now(now)?;
    let docs = sources.load().await?;

    let day = zone.day(now);
    let windows: Vec<_> = build_windows(&docs.schedule, docs.overrides.as_ref(), &day)
        .into_iter()
        .filter(|w| w.overlaps(day.start(), day.end()))
        .collect();

    println!("{}", day.local(day.start()).format("%a %b %-d").bold());

    if windows.is_empty() {
        println!("{}", "No maps today".dimmed());
        return Ok(());
    }

    for window in &windows {
        println!("{}", render_window(window, &day, now));
    }

    Ok(())
}
