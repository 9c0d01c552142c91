//! Dependency graph for a scheduling request
//!
//! Borrows the request's tasks and links them prerequisite -> dependent.
//! Node indices follow input order. Uses petgraph for storage and for
//! locating cycles when the sort cannot finish.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::HashMap;

use super::error::ScheduleError;
use super::task::ScheduleTask;

/// A dependency graph over the tasks of one request
#[derive(Debug)]
pub struct DependencyGraph<'a> {
    /// Edge direction is prerequisite -> dependent
    graph: DiGraph<&'a ScheduleTask, ()>,

    /// Map from title to node index
    node_map: HashMap<&'a str, NodeIndex>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds a graph from validated tasks.
    ///
    /// A dependency listed twice becomes two parallel edges and counts twice
    /// toward in-degree. References that escaped validation are reported as
    /// [`ScheduleError::Internal`].
    pub fn from_tasks(tasks: &'a [ScheduleTask]) -> Result<Self, ScheduleError> {
        let mut graph = DiGraph::with_capacity(tasks.len(), tasks.len());
        let mut node_map = HashMap::with_capacity(tasks.len());

        // First pass: add all nodes
        for task in tasks {
            let idx = graph.add_node(task);
            if node_map.insert(task.title.as_str(), idx).is_some() {
                return Err(ScheduleError::Internal(format!(
                    "task '{}' appears more than once",
                    task.title
                )));
            }
        }

        // Second pass: add all edges
        for (pos, task) in tasks.iter().enumerate() {
            let task_idx = NodeIndex::new(pos);
            for dependency in &task.dependencies {
                let dep_idx = node_map.get(dependency.as_str()).ok_or_else(|| {
                    ScheduleError::Internal(format!(
                        "dependency '{}' of task '{}' is not in the graph",
                        dependency, task.title
                    ))
                })?;
                graph.add_edge(*dep_idx, task_idx, ());
            }
        }

        Ok(Self { graph, node_map })
    }

    /// Returns the node index for a title
    pub fn index_of(&self, title: &str) -> Option<NodeIndex> {
        self.node_map.get(title).copied()
    }

    /// Returns the task stored at a node
    pub fn task(&self, idx: NodeIndex) -> Option<&'a ScheduleTask> {
        self.graph.node_weight(idx).copied()
    }

    /// Returns all node indices in input order
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Number of unresolved prerequisites of a node (parallel edges included)
    pub fn in_degree(&self, idx: NodeIndex) -> usize {
        self.graph.edges_directed(idx, Direction::Incoming).count()
    }

    /// In-degree of every node, indexed by node position
    pub fn in_degrees(&self) -> Vec<usize> {
        self.node_indices().map(|idx| self.in_degree(idx)).collect()
    }

    /// Nodes that depend on `idx`, in input order
    pub fn dependents_of(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut dependents: Vec<_> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        dependents.sort_unstable();
        dependents
    }

    /// Titles of every task that sits on a dependency cycle, in input order.
    ///
    /// Tasks merely downstream of a cycle are not included.
    pub fn cycle_members(&self) -> Vec<String> {
        let mut members: Vec<NodeIndex> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || self.graph.find_edge(scc[0], scc[0]).is_some()
            })
            .flatten()
            .collect();
        members.sort_unstable();

        members
            .into_iter()
            .filter_map(|idx| self.task(idx).map(|t| t.title.clone()))
            .collect()
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the number of dependency edges
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
