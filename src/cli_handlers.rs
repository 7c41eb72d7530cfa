use crate::cli::GraphSource;
use crate::dataset::Dataset;
use crate::graph::{DirectedAcyclicGraph, Graph, SortOutcome, find_cycle};
use crate::models::{EdgeId, NodeId, Undirected};
use anyhow::{Context, Result, bail};
use serde::Serialize;

/// JSON shape of `dagr sort --json`
#[derive(Debug, Serialize)]
struct SortReport {
    acyclic: bool,
    order: Vec<String>,
    cycle: Option<Vec<String>>,
    unprocessed: Vec<(String, String)>,
}

/// JSON shape of `dagr check --json`
#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    cycle: Option<Vec<String>>,
}

/// Load the dataset named by `source` and append its extra edges
pub fn load_dataset(source: &GraphSource) -> Result<Dataset> {
    let mut dataset = match &source.file {
        Some(path) => Dataset::load(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?,
        None => Dataset::credit_worthiness(),
    };

    for spec in &source.edges {
        let Some((from, to)) = spec.split_once(':') else {
            bail!("invalid edge '{spec}', expected FROM:TO");
        };
        dataset.edges.push((from.to_string(), to.to_string()));
    }

    Ok(dataset)
}

fn load_dag(source: &GraphSource) -> Result<DirectedAcyclicGraph> {
    let dataset = load_dataset(source)?;
    dataset
        .build()
        .with_context(|| format!("failed to build graph {}", dataset.name))
}

fn names(graph: &DirectedAcyclicGraph, ids: &[NodeId]) -> Vec<String> {
    ids.iter()
        .map(|id| graph.node_name(*id).unwrap_or("?").to_string())
        .collect()
}

fn edge_names(graph: &DirectedAcyclicGraph, ids: &[EdgeId]) -> Vec<(String, String)> {
    ids.iter()
        .filter_map(|id| graph.edge(*id))
        .map(|edge| {
            let [from, to] = edge.nodes();
            (
                graph.node_name(from).unwrap_or("?").to_string(),
                graph.node_name(to).unwrap_or("?").to_string(),
            )
        })
        .collect()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Handle the show command
pub fn handle_show(source: &GraphSource, undirected: bool) -> Result<()> {
    if undirected {
        let dataset = load_dataset(source)?;
        let graph: Graph<Undirected> = dataset
            .build()
            .with_context(|| format!("failed to build graph {}", dataset.name))?;
        print!("{graph}");
    } else {
        print!("{}", load_dag(source)?);
    }
    Ok(())
}

/// Handle the heads command
pub fn handle_heads(source: &GraphSource, json: bool) -> Result<()> {
    let graph = load_dag(source)?;
    let heads = names(&graph, &graph.head_nodes());

    if json {
        return print_json(&heads);
    }
    for name in heads {
        println!("{name}");
    }
    Ok(())
}

/// Handle the sort command. Returns false when the graph has a cycle.
pub fn handle_sort(source: &GraphSource, json: bool) -> Result<bool> {
    let graph = load_dag(source)?;
    let outcome = graph.topological_sort();

    let report = match &outcome {
        SortOutcome::Sorted(order) => SortReport {
            acyclic: true,
            order: names(&graph, order),
            cycle: None,
            unprocessed: vec![],
        },
        SortOutcome::Cyclic {
            partial,
            unprocessed,
        } => SortReport {
            acyclic: false,
            order: names(&graph, partial),
            cycle: find_cycle(&graph).map(|c| names(&graph, &c.path)),
            unprocessed: edge_names(&graph, unprocessed),
        },
    };

    if json {
        print_json(&report)?;
        return Ok(report.acyclic);
    }

    if report.acyclic {
        for (position, name) in report.order.iter().enumerate() {
            println!("{:>3}. {name}", position + 1);
        }
    } else {
        if let Some(cycle) = &report.cycle {
            println!("Cycle detected: {}", cycle.join(" → "));
        }
        println!("Unprocessed edges:");
        for (from, to) in &report.unprocessed {
            println!("  {from} -> {to}");
        }
    }

    Ok(report.acyclic)
}

/// Handle the check command. Returns false when the graph has a cycle.
pub fn handle_check(source: &GraphSource, json: bool) -> Result<bool> {
    let graph = load_dag(source)?;
    let valid = graph.is_valid();
    let report = CheckReport {
        valid,
        cycle: if valid {
            None
        } else {
            find_cycle(&graph).map(|c| names(&graph, &c.path))
        },
    };

    if json {
        print_json(&report)?;
    } else if report.valid {
        println!("{}: valid", graph.name());
    } else {
        let cycle = report.cycle.as_deref().unwrap_or_default().join(" → ");
        println!("{}: cyclic: {cycle}", graph.name());
    }

    Ok(report.valid)
}

/// Handle the dataset command
pub fn handle_dataset(source: &GraphSource) -> Result<()> {
    let dataset = load_dataset(source)?;
    println!("{}", dataset.to_json()?);
    Ok(())
}
