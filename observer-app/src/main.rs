use std::{
    env,
    io::{self, BufRead},
    str::FromStr,
};

use crate::config::app::AppConfig;
use displays::DisplayKind;
use log::{debug, error, warn};
use panel::Panel;

pub use error::AppError;

mod config;
mod controls;
mod error;
mod panel;

const CONFIG_ARG: &str = "--config";
const DETACH_COMMAND: &str = "detach ";

/// Splits the command line into an optional config file and the values to submit.
fn parse_args<I>(args: I) -> Result<(Option<String>, Vec<String>), AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut config_path = None;
    let mut values = vec![];
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == CONFIG_ARG {
            let path = args
                .next()
                .ok_or_else(|| AppError::MissingArgument(arg.clone()))?;
            config_path = Some(path);
        } else {
            values.push(arg);
        }
    }
    Ok((config_path, values))
}

/// Detaches a display when `text` reads `detach <kind>`.
fn detach(panel: &mut Panel, text: &str) -> Option<Result<(), AppError>> {
    let kind = text.trim().strip_prefix(DETACH_COMMAND)?.trim();
    Some(match DisplayKind::from_str(kind) {
        Ok(kind) => panel.detach(kind),
        Err(_) => Err(AppError::UnknownDisplay(kind.to_string())),
    })
}

fn submit(panel: &mut Panel, text: &str) {
    if text.trim().is_empty() {
        return;
    }
    if let Some(result) = detach(panel, text) {
        match result {
            Ok(()) => debug!("{} display(s) left", panel.model().observer_count()),
            Err(err) => warn!("{err}"),
        }
        return;
    }
    match panel.submit(text) {
        Ok(()) => debug!("Value {} broadcast", panel.spin_box().value()),
        Err(AppError::Input(err)) => {
            warn!("Input rejected: {err}");
            return;
        }
        Err(AppError::Notify(err)) => {
            error!("{err}");
            for failure in &err.failures {
                error!("Display #{}: {}", failure.position, failure.error);
            }
        }
        Err(err) => error!("{err}"),
    }
    for line in panel.render() {
        println!("{line}");
    }
}

fn main() -> anyhow::Result<()> {
    crate::config::log::init();

    let (config_path, values) = parse_args(env::args().skip(1))?;
    let config = match config_path {
        Some(path) => AppConfig::with_file(path)?,
        None => AppConfig::new()?,
    };
    debug!("Starting with configuration: {:?}", config);

    let mut panel = Panel::new(&config)?;
    if values.is_empty() {
        for line in io::stdin().lock().lines() {
            submit(&mut panel, &line?);
        }
    } else {
        for value in &values {
            submit(&mut panel, value);
        }
    }
    Ok(())
}
