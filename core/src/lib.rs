//! clearway-core: clearance-gated shortest-route engine.
//!
//! A pure Rust library that builds an adjacency structure over stations and
//! clearance-gated segments, then answers minimum-time route queries with
//! Dijkstra's algorithm run over the augmented (station, held clearance)
//! state space. No I/O, no global state — each query is reproducible from
//! its explicit inputs, and one immutable [`Graph`] can serve concurrent
//! searches.

mod error;
mod graph;
mod search;

pub use error::{GraphError, GraphResult};
pub use graph::{Clearance, Graph, NodeId, Segment};
pub use search::shortest_time;
