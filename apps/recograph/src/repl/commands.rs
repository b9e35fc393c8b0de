//! # Command Implementations
//!
//! The handlers behind the command loop, plus the rendering of core results
//! into the line protocol. Protocol output goes to stdout, user-facing
//! errors to stderr; the core itself never prints.

use super::Repl;
use recograph_core::{Collision, Edge, Node, parse_edge, parse_expression};
use std::fs;
use std::path::Path;

// =============================================================================
// LOAD DATABASE
// =============================================================================

/// Reset the graph and load an edge file, one specification per line.
///
/// The file contents are echoed first. Loading stops at the first invalid
/// line or rejected edge, leaving the graph partially populated and the
/// loaded flag untouched; only a complete pass sets it.
pub(crate) fn load_database(repl: &mut Repl, path: &Path) {
    if !path.exists() || path.is_dir() {
        eprintln!("Error, specified database file does not exist");
        return;
    }

    repl.graph.reset();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!("Error, {e}");
            return;
        }
    };
    println!("{contents}");

    for line in contents.lines() {
        let Some(edge) = parse_edge(line) else {
            eprintln!("Error, Invalid format in line: {line}");
            return;
        };
        match repl.graph.add_edge(edge) {
            Ok(collisions) => report_collisions(&collisions),
            Err(e) => {
                eprintln!("Error, {e}");
                return;
            }
        }
    }

    repl.loaded = true;
    tracing::info!(
        nodes = repl.graph.node_count(),
        edges = repl.graph.edge_count(),
        "database loaded from {}",
        path.display()
    );
}

// =============================================================================
// MUTATION COMMANDS
// =============================================================================

/// `add <edge spec>`
pub(crate) fn add(repl: &mut Repl, spec: &str) {
    let Some(edge) = parse_edge(spec) else {
        eprintln!("Error, Invalid add command syntax");
        return;
    };
    match repl.graph.add_edge(edge) {
        Ok(collisions) => report_collisions(&collisions),
        Err(e) => eprintln!("Error, {e}"),
    }
}

/// `remove <edge spec>`
pub(crate) fn remove(repl: &mut Repl, spec: &str) {
    let Some(edge) = parse_edge(spec) else {
        eprintln!("Error, invalid remove command syntax");
        return;
    };
    if !repl.graph.remove_edge(&edge) {
        eprintln!("Error, edge not found");
    }
}

fn report_collisions(collisions: &[Collision]) {
    for collision in collisions {
        match collision {
            Collision::IdReused { id } => {
                eprintln!("Error, Product with id {id} already exists with different name");
            }
            Collision::NameReused { name } => {
                eprintln!("Error, inconsistent product id for {name}");
            }
        }
    }
}

// =============================================================================
// QUERY COMMANDS
// =============================================================================

/// `nodes` - display names, space-joined on one line.
pub(crate) fn nodes(repl: &Repl) {
    let names: Vec<String> = repl.graph.nodes().iter().map(Node::display_name).collect();
    if repl.json {
        println!("{}", serde_json::json!(names));
    } else {
        println!("{}", names.join(" "));
    }
}

/// `edges` - one display line per edge, enumeration order.
pub(crate) fn edges(repl: &Repl) {
    let edges = repl.graph.edges();
    if repl.json {
        let listing: Vec<serde_json::Value> = edges
            .iter()
            .map(|e| {
                serde_json::json!({
                    "source": e.source.display_name(),
                    "relation": e.relation.name(),
                    "target": e.target.display_name(),
                })
            })
            .collect();
        println!("{}", serde_json::json!(listing));
        return;
    }
    for edge in &edges {
        println!("{}", display_string(edge));
    }
}

/// `recommend <expr>` - parse, evaluate, render the product set.
pub(crate) fn recommend(repl: &Repl, expression: &str) {
    match parse_expression(expression).and_then(|term| term.evaluate(&repl.graph)) {
        Ok(result) => {
            let names: Vec<String> = result.iter().map(Node::display_name).collect();
            if repl.json {
                println!("{}", serde_json::json!(names));
            } else {
                println!("{}", names.join(" "));
            }
        }
        Err(e) => eprintln!("Error, {e}"),
    }
}

/// `export` - DOT digraph: edges by bare lower-cased names, categories boxed.
pub(crate) fn export(repl: &Repl) {
    println!("digraph {{");
    for edge in repl.graph.edges() {
        println!("{}", dot_string(&edge));
    }
    for category in repl.graph.categories() {
        println!("{} [shape=box]", category.name());
    }
    println!("}}");
}

// =============================================================================
// RENDERING
// =============================================================================

fn display_string(edge: &Edge) -> String {
    format!(
        "{}-[{}]->{}",
        edge.source.display_name(),
        edge.relation.name(),
        edge.target.display_name()
    )
}

fn dot_string(edge: &Edge) -> String {
    format!(
        "{} -> {} [label={}]",
        edge.source.name(),
        edge.target.name(),
        edge.relation.label()
    )
}

// =============================================================================
// TESTS
// =============================================================================
