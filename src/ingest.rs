//! JSON document loading: bulk-populates the catalogue from `base_requests`
//! and reads the `render_settings` and `stat_requests` blocks.
//!
//! Any structural violation is fatal to the run; nothing here produces
//! partial output.

use std::io::Read;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};

use crate::catalogue::Catalogue;
use crate::geo::Coordinates;
use crate::render::RenderSettings;
use crate::request::StatRequest;

/// Parse a full input document from a reader.
pub fn load_document(reader: &mut impl Read) -> Result<Value> {
    let mut text = String::new();
    reader.read_to_string(&mut text).context("read input document")?;
    serde_json::from_str(&text).context("parse input document")
}

/// Apply `base_requests` to the catalogue: all stops first, then all
/// distances, then each route, so route construction always sees the full
/// stop table.
pub fn populate_catalogue(catalogue: &mut Catalogue, document: &Value, verbose: u8) -> Result<()> {
    let root = as_object(document, "document root")?;
    let Some(base) = root.get("base_requests") else {
        return Ok(());
    };
    let requests = base.as_array().context("base_requests must be an array")?;

    let mut stops = Vec::new();
    let mut distances = Vec::new();
    let mut routes = Vec::new();

    for request in requests {
        let object = as_object(request, "base request")?;
        match get_str(object, "type")? {
            "Stop" => {
                let name = get_str(object, "name")?.to_owned();
                let latitude = get_f64(object, "latitude")?;
                let longitude = get_f64(object, "longitude")?;
                if let Some(road) = object.get("road_distances") {
                    let road = road.as_object().context("road_distances must be an object")?;
                    for (to, meters) in road {
                        let meters = meters
                            .as_f64()
                            .with_context(|| format!("distance to '{to}' must be a number"))?;
                        distances.push((name.clone(), to.clone(), meters));
                    }
                }
                stops.push((name, Coordinates::new(latitude, longitude)));
            }
            "Bus" => {
                let name = get_str(object, "name")?.to_owned();
                let stop_names = object
                    .get("stops")
                    .and_then(Value::as_array)
                    .context("bus stops must be an array")?
                    .iter()
                    .map(|stop| {
                        stop.as_str().map(str::to_owned).context("stop name must be a string")
                    })
                    .collect::<Result<Vec<_>>>()?;
                let is_roundtrip = match object.get("is_roundtrip") {
                    None => false,
                    Some(flag) => flag.as_bool().context("is_roundtrip must be a boolean")?,
                };
                routes.push((name, stop_names, is_roundtrip));
            }
            other => bail!("unknown base request type: {other}"),
        }
    }

    if verbose > 0 {
        eprintln!(
            "[ingest] {} stops, {} distances, {} routes",
            stops.len(),
            distances.len(),
            routes.len()
        );
    }

    catalogue.add_stops(stops);
    catalogue.add_distances(distances);
    for (name, stop_names, is_roundtrip) in routes {
        catalogue.add_route(&name, &stop_names, is_roundtrip)?;
    }
    Ok(())
}

/// Read the style block, falling back to defaults when absent. Out-of-range
/// values are load errors.
pub fn render_settings(document: &Value) -> Result<RenderSettings> {
    let root = as_object(document, "document root")?;
    let Some(node) = root.get("render_settings") else {
        return Ok(RenderSettings::default());
    };
    // An explicitly empty palette is rejected; an absent one is fine.
    if node.get("color_palette").and_then(Value::as_array).is_some_and(Vec::is_empty) {
        bail!("color_palette must not be empty");
    }
    let settings: RenderSettings =
        serde_json::from_value(node.clone()).context("invalid render_settings")?;
    settings.validate()?;
    Ok(settings)
}

/// Read the query batch, empty when absent. An unknown query tag fails here.
pub fn stat_requests(document: &Value) -> Result<Vec<StatRequest>> {
    let root = as_object(document, "document root")?;
    match root.get("stat_requests") {
        None => Ok(Vec::new()),
        Some(node) => serde_json::from_value(node.clone()).context("invalid stat_requests"),
    }
}

fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().with_context(|| format!("{what} must be an object"))
}

fn get_str<'a>(object: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    object
        .get(field)
        .with_context(|| format!("field '{field}' not found"))?
        .as_str()
        .with_context(|| format!("field '{field}' must be a string"))
}

fn get_f64(object: &Map<String, Value>, field: &str) -> Result<f64> {
    object
        .get(field)
        .with_context(|| format!("field '{field}' not found"))?
        .as_f64()
        .with_context(|| format!("field '{field}' must be a number"))
}
