use anyhow::Result;
use rotaview_core::config::LayoutConfig;

use crate::loader::Sources;
use crate::render::Render;
use crate::zone::{Zone, resolve_now};

pub async fn run(
    sources: &Sources,
    zone: &Zone,
    now: Option<&str>,
    json: bool,
    layout: &LayoutConfig,
) -> Result<()> {
    let now = resolve_now(now)?;
    let docs = sources.load().await?;

    let model = zone.recompute(&docs.schedule, docs.overrides.as_ref(), now, layout);

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        println!("{}", model.render());
    }

    Ok(())
}
