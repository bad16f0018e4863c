//! `densify plan`: print planned outputs as JSON on stdout.

use std::io::{Write, stdout};

use anyhow::Result;

use crate::config::Config;
use crate::pipeline::Pipeline;

pub fn print_plan(config: &Config, pretty: bool) -> Result<()> {
    let request = config.request();
    let options = config.pipeline_options();
    let pipeline = Pipeline::new(&request, &options)?;

    let plan = pipeline.plan();
    let mut out = stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &plan)?;
    } else {
        serde_json::to_writer(&mut out, &plan)?;
    }
    writeln!(out)?;
    Ok(())
}
