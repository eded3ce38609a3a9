use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::catalogue::Catalogue;
use crate::cli::{Cli, MissingStopArg, ProcessArgs, RenderArgs};
use crate::ingest;
use crate::render::MapRenderer;
use crate::request;

pub fn process(cli: &Cli, args: &ProcessArgs) -> Result<()> {
    let document = read_document(args.input.as_deref())?;
    let (catalogue, renderer) = build(cli, &document, args.missing_stop)?;

    let requests = ingest::stat_requests(&document)?;
    if cli.verbose > 0 {
        eprintln!("[process] executing {} stat requests", requests.len());
    }
    let responses = request::execute_all(&requests, &catalogue, &renderer);

    let mut text = serde_json::to_string_pretty(&responses)?;
    text.push('\n');
    write_output(args.output.as_deref(), &text)
}

pub fn render(cli: &Cli, args: &RenderArgs) -> Result<()> {
    let document = read_document(args.input.as_deref())?;
    let (catalogue, renderer) = build(cli, &document, args.missing_stop)?;

    write_output(args.output.as_deref(), &renderer.render(&catalogue))
}

/// Populate the catalogue and configure the renderer from one document.
fn build(
    cli: &Cli,
    document: &Value,
    missing_stop: MissingStopArg,
) -> Result<(Catalogue, MapRenderer)> {
    let mut catalogue = Catalogue::with_missing_stop_policy(missing_stop.into());
    ingest::populate_catalogue(&mut catalogue, document, cli.verbose)?;
    let settings = ingest::render_settings(document)?;
    Ok((catalogue, MapRenderer::new(settings)))
}

fn read_document(input: Option<&Path>) -> Result<Value> {
    match input {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).with_context(|| format!("open input {}", path.display()))?;
            ingest::load_document(&mut BufReader::new(file))
        }
        _ => ingest::load_document(&mut io::stdin().lock()),
    }
}

fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text).with_context(|| format!("write output {}", path.display()))
        }
        None => io::stdout().write_all(text.as_bytes()).context("write to stdout"),
    }
}
