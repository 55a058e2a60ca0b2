use std::{env, fs, process};

use actix::Actor;
use anyhow::{Context, Result};
use log::info;

use boundary_sketch::{
    session::{Input, Snapshot},
    InputEvent, Session, SessionActor, SessionConfig,
};

#[actix_rt::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <config.json> <events.json>", args[0]);
        process::exit(1);
    }

    let config_text =
        fs::read_to_string(&args[1]).with_context(|| format!("cannot read '{}'", args[1]))?;
    let config = SessionConfig::from_json(&config_text)?;

    let events_text =
        fs::read_to_string(&args[2]).with_context(|| format!("cannot read '{}'", args[2]))?;
    let events: Vec<InputEvent> =
        serde_json::from_str(&events_text).context("invalid event script")?;

    let path = config
        .dataset
        .path
        .clone()
        .context("config is missing dataset.path")?;

    // Single attempt; the user reruns to retry.
    let session = match Session::load(&path, &config).await {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error loading data: {e}. Run again to retry.");
            process::exit(1);
        }
    };

    let addr = SessionActor::new(session).start();
    info!("replaying {} event(s)", events.len());
    for event in events {
        addr.send(Input(event)).await?;
    }

    let snapshot = addr.send(Snapshot).await?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
