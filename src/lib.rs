#![doc = "Transit catalogue public API"]
pub mod catalogue;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod geo;
pub mod ingest;
pub mod render;
pub mod request;

#[doc(inline)]
pub use catalogue::{Catalogue, MissingStopPolicy};

#[doc(inline)]
pub use domain::{Route, RouteInfo, Stop, StopId};

#[doc(inline)]
pub use render::{MapRenderer, RenderSettings};

#[doc(inline)]
pub use request::StatRequest;
