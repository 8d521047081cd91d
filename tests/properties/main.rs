//! Property tests for the graph engine.

mod edge_properties;
mod graph_properties;
mod progress_properties;
