// End-to-end scenarios over the public API: ingest a document, execute the
// stat requests, check the shaped responses.

use serde_json::{json, Value};

use transit_atlas::catalogue::Catalogue;
use transit_atlas::ingest;
use transit_atlas::render::MapRenderer;
use transit_atlas::request;

fn run(document: Value) -> Value {
    let mut catalogue = Catalogue::new();
    ingest::populate_catalogue(&mut catalogue, &document, 0).unwrap();
    let renderer = MapRenderer::new(ingest::render_settings(&document).unwrap());
    let requests = ingest::stat_requests(&document).unwrap();
    request::execute_all(&requests, &catalogue, &renderer)
}

fn moscow_network() -> Value {
    json!([
        {
            "type": "Stop",
            "name": "A",
            "latitude": 55.611087,
            "longitude": 37.20829,
            "road_distances": { "B": 1000 }
        },
        {
            "type": "Stop",
            "name": "B",
            "latitude": 55.595884,
            "longitude": 37.209755,
            "road_distances": { "C": 1500, "A": 1000 }
        },
        {
            "type": "Stop",
            "name": "C",
            "latitude": 55.632761,
            "longitude": 37.333324,
            "road_distances": { "B": 1500 }
        },
        {
            "type": "Bus",
            "name": "Bus1",
            "stops": ["A", "B", "C"],
            "is_roundtrip": false
        }
    ])
}

#[test]
fn bus_query_reports_the_documented_stats() {
    let responses = run(json!({
        "base_requests": moscow_network(),
        "stat_requests": [{ "type": "Bus", "id": 1, "name": "Bus1" }]
    }));

    let response = &responses[0];
    assert_eq!(response["request_id"], 1);
    assert_eq!(response["stop_count"], 5);
    assert_eq!(response["unique_stop_count"], 3);
    assert_eq!(response["route_length"], 5000);
    let curvature = response["curvature"].as_f64().unwrap();
    // The terminals are ~8.2 km apart as the crow flies.
    assert!(curvature > 0.55 && curvature < 0.65, "got {curvature}");
}

#[test]
fn stop_queries_cover_all_three_outcomes() {
    let responses = run(json!({
        "base_requests": moscow_network(),
        "stat_requests": [
            { "type": "Stop", "id": 1, "name": "B" },
            { "type": "Stop", "id": 2, "name": "Nowhere" },
            { "type": "Bus", "id": 3, "name": "NoSuchBus" }
        ]
    }));

    assert_eq!(responses[0], json!({ "request_id": 1, "buses": ["Bus1"] }));
    assert_eq!(responses[1], json!({ "request_id": 2, "error_message": "not found" }));
    assert_eq!(responses[2], json!({ "request_id": 3, "error_message": "not found" }));
}

#[test]
fn unvisited_stop_reports_an_empty_bus_list() {
    let responses = run(json!({
        "base_requests": [
            {
                "type": "Stop",
                "name": "Depot",
                "latitude": 55.6,
                "longitude": 37.2
            }
        ],
        "stat_requests": [{ "type": "Stop", "id": 4, "name": "Depot" }]
    }));

    assert_eq!(responses[0], json!({ "request_id": 4, "buses": [] }));
}

#[test]
fn map_query_always_succeeds() {
    // No routes at all: the map is the bare, well-formed document.
    let responses = run(json!({
        "base_requests": [
            { "type": "Stop", "name": "A", "latitude": 55.6, "longitude": 37.2 }
        ],
        "stat_requests": [{ "type": "Map", "id": 10 }]
    }));

    let map = responses[0]["map"].as_str().unwrap();
    assert!(map.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n<svg"));
    assert!(map.trim_end().ends_with("</svg>"));
    assert!(!map.contains("<polyline") && !map.contains("<circle") && !map.contains("<text"));
}

#[test]
fn map_draws_all_four_layers() {
    let responses = run(json!({
        "base_requests": moscow_network(),
        "render_settings": {
            "width": 1200,
            "height": 800,
            "padding": 50,
            "color_palette": ["green", [255, 160, 0]]
        },
        "stat_requests": [{ "type": "Map", "id": 11 }]
    }));

    let map = responses[0]["map"].as_str().unwrap();
    assert!(map.contains("<polyline"));
    assert!(map.contains("stroke=\"green\""));
    assert!(map.contains(">Bus1</text>"));
    assert!(map.contains("<circle"));
    assert!(map.contains(">C</text>"));
}

#[test]
fn responses_survive_a_serialization_round_trip() {
    let responses = run(json!({
        "base_requests": moscow_network(),
        "stat_requests": [
            { "type": "Bus", "id": 1, "name": "Bus1" },
            { "type": "Stop", "id": 2, "name": "A" },
            { "type": "Map", "id": 3 }
        ]
    }));

    let text = serde_json::to_string(&responses).unwrap();
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, responses);
}

#[test]
fn queries_execute_in_document_order() {
    let responses = run(json!({
        "base_requests": moscow_network(),
        "stat_requests": [
            { "type": "Stop", "id": 3, "name": "A" },
            { "type": "Bus", "id": 1, "name": "Bus1" },
            { "type": "Stop", "id": 2, "name": "C" }
        ]
    }));

    let ids = responses
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["request_id"].as_i64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[test]
fn malformed_documents_fail_before_any_output() {
    let mut catalogue = Catalogue::new();

    // Wrong container type for base_requests.
    let bad = json!({ "base_requests": {} });
    assert!(ingest::populate_catalogue(&mut catalogue, &bad, 0).is_err());

    // Unknown stat request tag escalates, unlike an unknown entity name.
    let bad = json!({ "stat_requests": [{ "type": "Ferry", "id": 1, "name": "F" }] });
    assert!(ingest::stat_requests(&bad).is_err());

    // Out-of-range style value.
    let bad = json!({ "render_settings": { "padding": -5 } });
    assert!(ingest::render_settings(&bad).is_err());
}
