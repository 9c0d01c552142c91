//! Deadline-priority topological sort
//!
//! Kahn's algorithm with the FIFO queue replaced by a min-heap keyed on due
//! date. Among all tasks whose prerequisites have been emitted, the one due
//! soonest goes next. Equal due dates fall back to the order in which tasks
//! became eligible (an explicit sequence number); that tie-break is an
//! implementation detail, not something callers should rely on.

use chrono::NaiveDateTime;
use petgraph::graph::NodeIndex;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use tracing::{debug, trace};

use super::error::ScheduleError;
use super::graph::DependencyGraph;

/// An eligible task waiting in the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Eligible {
    due: NaiveDateTime,
    seq: u64,
    node: NodeIndex,
}

/// Min-heap of eligible tasks, ordered by (due date, insertion sequence)
#[derive(Debug, Default)]
struct EligibleQueue {
    heap: BinaryHeap<Reverse<Eligible>>,
    next_seq: u64,
}

impl EligibleQueue {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    fn push(&mut self, node: NodeIndex, due: NaiveDateTime) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Reverse(Eligible { due, seq, node }));
    }

    fn pop(&mut self) -> Option<NodeIndex> {
        self.heap.pop().map(|Reverse(e)| e.node)
    }
}

/// Orders every task in the graph so prerequisites come first, preferring
/// earlier due dates whenever several tasks are eligible.
///
/// Returns [`ScheduleError::CyclicDependency`] naming the tasks on cycles if
/// not every task could be emitted.
pub fn sort_by_deadline<'a>(graph: &DependencyGraph<'a>) -> Result<Vec<&'a str>, ScheduleError> {
    let mut in_degree = graph.in_degrees();
    let mut queue = EligibleQueue::with_capacity(graph.len());

    for idx in graph.node_indices() {
        if in_degree[idx.index()] == 0 {
            queue.push(idx, due_of(graph, idx)?);
        }
    }

    let mut order = Vec::with_capacity(graph.len());

    while let Some(current) = queue.pop() {
        let task = graph
            .task(current)
            .ok_or_else(|| ScheduleError::Internal(format!("node {} has no task", current.index())))?;
        trace!(task = %task.title, due = %task.due_date, "emitting task");
        order.push(task.title.as_str());

        for dependent in graph.dependents_of(current) {
            let remaining = in_degree
                .get_mut(dependent.index())
                .ok_or_else(|| {
                    ScheduleError::Internal(format!("node {} has no in-degree", dependent.index()))
                })?;
            *remaining = remaining.checked_sub(1).ok_or_else(|| {
                ScheduleError::Internal(format!("in-degree underflow at node {}", dependent.index()))
            })?;

            if *remaining == 0 {
                queue.push(dependent, due_of(graph, dependent)?);
            }
        }
    }

    if order.len() != graph.len() {
        let tasks = graph.cycle_members();
        debug!(
            emitted = order.len(),
            total = graph.len(),
            cycle = ?tasks,
            "sort stopped early, dependency cycle present"
        );
        return Err(ScheduleError::CyclicDependency { tasks });
    }

    Ok(order)
}

fn due_of(graph: &DependencyGraph<'_>, idx: NodeIndex) -> Result<NaiveDateTime, ScheduleError> {
    graph
        .task(idx)
        .map(|t| t.due_date)
        .ok_or_else(|| ScheduleError::Internal(format!("node {} has no task", idx.index())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::task::ScheduleTask;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn task(title: &str, due: NaiveDateTime, deps: &[&str]) -> ScheduleTask {
        ScheduleTask::new(title, 1.0, due).with_dependencies(deps.iter().copied())
    }

    fn sort(tasks: &[ScheduleTask]) -> Result<Vec<String>, ScheduleError> {
        let graph = DependencyGraph::from_tasks(tasks)?;
        sort_by_deadline(&graph).map(|order| order.into_iter().map(String::from).collect())
    }

    #[test]
    fn earliest_due_first_among_eligible() {
        let tasks = vec![
            task("A", day(3), &[]),
            task("B", day(1), &[]),
            task("C", day(2), &["A", "B"]),
        ];
        assert_eq!(sort(&tasks).unwrap(), vec!["B", "A", "C"]);
    }

    #[test]
    fn dependencies_override_deadlines() {
        // C is due first but must wait for A
        let tasks = vec![
            task("A", day(5), &[]),
            task("C", day(1), &["A"]),
            task("B", day(3), &[]),
        ];
        assert_eq!(sort(&tasks).unwrap(), vec!["B", "A", "C"]);
    }

    #[test]
    fn newly_eligible_task_competes_with_waiting_ones() {
        // After A is emitted, C (due day 2) beats B (due day 4)
        let tasks = vec![
            task("A", day(1), &[]),
            task("B", day(4), &[]),
            task("C", day(2), &["A"]),
        ];
        assert_eq!(sort(&tasks).unwrap(), vec!["A", "C", "B"]);
    }

    #[test]
    fn equal_due_dates_keep_insertion_order() {
        let tasks = vec![
            task("X", day(1), &[]),
            task("Y", day(1), &[]),
            task("Z", day(1), &[]),
        ];
        assert_eq!(sort(&tasks).unwrap(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn time_of_day_breaks_same_date() {
        let morning = day(1) + chrono::Duration::hours(9);
        let evening = day(1) + chrono::Duration::hours(18);
        let tasks = vec![task("Late", evening, &[]), task("Early", morning, &[])];
        assert_eq!(sort(&tasks).unwrap(), vec!["Early", "Late"]);
    }

    #[test]
    fn chain_is_emitted_in_dependency_order() {
        let tasks = vec![
            task("Deploy", day(1), &["Test"]),
            task("Test", day(1), &["Build"]),
            task("Build", day(1), &[]),
        ];
        assert_eq!(sort(&tasks).unwrap(), vec!["Build", "Test", "Deploy"]);
    }

    #[test]
    fn repeated_dependency_still_resolves() {
        let tasks = vec![task("A", day(1), &[]), task("B", day(1), &["A", "A"])];
        assert_eq!(sort(&tasks).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn two_task_cycle_detected() {
        let tasks = vec![task("A", day(1), &["B"]), task("B", day(2), &["A"])];
        assert_eq!(
            sort(&tasks),
            Err(ScheduleError::CyclicDependency {
                tasks: vec!["A".into(), "B".into()]
            })
        );
    }

    #[test]
    fn cycle_behind_valid_tasks_detected() {
        let tasks = vec![
            task("Start", day(1), &[]),
            task("P", day(2), &["Start", "R"]),
            task("Q", day(2), &["P"]),
            task("R", day(2), &["Q"]),
            task("End", day(3), &["R"]),
        ];
        match sort(&tasks) {
            Err(ScheduleError::CyclicDependency { tasks }) => {
                assert_eq!(tasks, vec!["P", "Q", "R"]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn performance_500_task_chain() {
        use std::time::Instant;

        let tasks: Vec<_> = (0..500)
            .map(|i| {
                let t = ScheduleTask::new(format!("t{}", i), 1.0, day(1 + (i % 28) as u32));
                if i > 0 {
                    t.with_dependency(format!("t{}", i - 1))
                } else {
                    t
                }
            })
            .collect();

        let start = Instant::now();
        let order = sort(&tasks).unwrap();
        let duration = start.elapsed();

        assert_eq!(order.len(), 500);
        assert_eq!(order[0], "t0");
        assert_eq!(order[499], "t499");
        assert!(duration.as_millis() < 100, "Sort took {:?}", duration);
    }
}
