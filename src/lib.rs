//! # dagr - directed graphs with topological ordering
//!
//! Graphs of named nodes, specialized into directed acyclic graphs that can be
//! sorted topologically and checked for cycles on demand.

pub mod cli;
pub mod cli_handlers;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod models;

pub use dataset::{Dataset, credit_worthiness_graph};
pub use error::{GraphError, Result};
pub use graph::{Bayesian, CyclePath, DirectedAcyclicGraph, Graph, SortOutcome};
pub use models::*;
