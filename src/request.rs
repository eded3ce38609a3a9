//! Query dispatch: maps tagged stat requests onto catalogue reads and shapes
//! the JSON responses.
//!
//! The `type` tag selects the variant during deserialization, so an
//! unrecognized tag fails the whole document rather than producing a
//! per-query error; "don't understand this query kind" and "this named
//! entity doesn't exist" stay distinct failure modes.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::catalogue::Catalogue;
use crate::render::MapRenderer;

/// A single analytical query. Every response echoes `id` as `request_id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum StatRequest {
    Stop { id: i64, name: String },
    Bus { id: i64, name: String },
    Map { id: i64 },
}

impl StatRequest {
    /// Execute read-only against the catalogue. A semantic not-found yields
    /// the error object; it never aborts the batch.
    pub fn execute(&self, catalogue: &Catalogue, renderer: &MapRenderer) -> Value {
        match self {
            StatRequest::Stop { id, name } => match catalogue.stop_routes(name) {
                None => not_found(*id),
                Some(buses) => json!({ "request_id": id, "buses": buses }),
            },
            StatRequest::Bus { id, name } => match catalogue.route_info(name) {
                None => not_found(*id),
                Some(info) => json!({
                    "request_id": id,
                    "route_length": info.route_length as i64,
                    "curvature": info.curvature,
                    "stop_count": info.stop_count,
                    "unique_stop_count": info.unique_stop_count,
                }),
            },
            StatRequest::Map { id } => {
                json!({ "request_id": id, "map": renderer.render(catalogue) })
            }
        }
    }
}

fn not_found(id: i64) -> Value {
    json!({ "request_id": id, "error_message": "not found" })
}

/// Execute a batch, one response per query in input order.
pub fn execute_all(
    requests: &[StatRequest],
    catalogue: &Catalogue,
    renderer: &MapRenderer,
) -> Value {
    Value::Array(requests.iter().map(|request| request.execute(catalogue, renderer)).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{execute_all, StatRequest};
    use crate::catalogue::Catalogue;
    use crate::geo::Coordinates;
    use crate::render::{MapRenderer, RenderSettings};

    fn fixtures() -> (Catalogue, MapRenderer) {
        let mut catalogue = Catalogue::new();
        catalogue.add_stops(vec![
            ("A".to_owned(), Coordinates::new(55.611087, 37.20829)),
            ("B".to_owned(), Coordinates::new(55.595884, 37.209755)),
        ]);
        catalogue.add_distances(vec![("A".to_owned(), "B".to_owned(), 1000.0)]);
        catalogue.add_route("14", &["A".to_owned(), "B".to_owned()], false).unwrap();
        (catalogue, MapRenderer::new(RenderSettings::default()))
    }

    #[test]
    fn unknown_tag_is_a_parse_error() {
        let result = serde_json::from_value::<StatRequest>(json!({
            "type": "Train", "id": 1, "name": "X"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn stop_query_lists_buses() {
        let (catalogue, renderer) = fixtures();
        let request: StatRequest =
            serde_json::from_value(json!({ "type": "Stop", "id": 5, "name": "A" })).unwrap();

        let response = request.execute(&catalogue, &renderer);
        assert_eq!(response, json!({ "request_id": 5, "buses": ["14"] }));
    }

    #[test]
    fn unknown_names_share_the_error_shape() {
        let (catalogue, renderer) = fixtures();
        let expected = json!({ "request_id": 7, "error_message": "not found" });

        let stop: StatRequest =
            serde_json::from_value(json!({ "type": "Stop", "id": 7, "name": "Ghost" })).unwrap();
        assert_eq!(stop.execute(&catalogue, &renderer), expected);

        let bus: StatRequest =
            serde_json::from_value(json!({ "type": "Bus", "id": 7, "name": "Ghost" })).unwrap();
        assert_eq!(bus.execute(&catalogue, &renderer), expected);
    }

    #[test]
    fn bus_query_reports_route_stats() {
        let (catalogue, renderer) = fixtures();
        let request: StatRequest =
            serde_json::from_value(json!({ "type": "Bus", "id": 2, "name": "14" })).unwrap();

        let response = request.execute(&catalogue, &renderer);
        let object = response.as_object().unwrap();
        assert_eq!(object["request_id"], 2);
        // A-B-A with an explicit 1000 m forward entry reused for the return leg.
        assert_eq!(object["route_length"], 2000);
        assert_eq!(object["stop_count"], 3);
        assert_eq!(object["unique_stop_count"], 2);
        assert!(object["curvature"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn map_query_embeds_the_document() {
        let (catalogue, renderer) = fixtures();
        let request: StatRequest =
            serde_json::from_value(json!({ "type": "Map", "id": 3 })).unwrap();

        let response = request.execute(&catalogue, &renderer);
        let map = response["map"].as_str().unwrap();
        assert!(map.starts_with("<?xml"));
        assert!(map.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn batch_preserves_request_order() {
        let (catalogue, renderer) = fixtures();
        let requests: Vec<StatRequest> = serde_json::from_value(json!([
            { "type": "Bus", "id": 9, "name": "14" },
            { "type": "Stop", "id": 8, "name": "B" },
        ]))
        .unwrap();

        let responses = execute_all(&requests, &catalogue, &renderer);
        let ids = responses
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["request_id"].as_i64().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![9, 8]);
    }
}
