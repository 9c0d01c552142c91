//! Property tests for the deadline-priority scheduler

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use smart_schedule::{schedule, ScheduleRequest, ScheduleTask};

fn due(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 2, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

// Strategy to generate an acyclic request.
// Acyclicity holds because task N may only depend on tasks 0..N-1.
fn dag_request_strategy(max_tasks: usize) -> impl Strategy<Value = ScheduleRequest> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let dues = proptest::collection::vec((1u32..=28, 0u32..24), num_tasks);
        let deps = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..4),
            num_tasks,
        );

        (dues, deps).prop_map(move |(dues, raw_deps)| {
            dues.into_iter()
                .zip(raw_deps)
                .enumerate()
                .map(|(i, ((day, hour), potential_deps))| {
                    let mut valid_deps = Vec::new();
                    if i > 0 {
                        for dep_idx in potential_deps {
                            let name = format!("task_{}", dep_idx % i);
                            if !valid_deps.contains(&name) {
                                valid_deps.push(name);
                            }
                        }
                    }
                    ScheduleTask::new(format!("task_{}", i), 1.0, due(day, hour))
                        .with_dependencies(valid_deps)
                })
                .collect()
        })
    })
}

fn positions(order: &[String]) -> HashMap<&str, usize> {
    order
        .iter()
        .enumerate()
        .map(|(pos, title)| (title.as_str(), pos))
        .collect()
}

proptest! {
    #[test]
    fn acyclic_requests_are_valid(request in dag_request_strategy(15)) {
        let response = schedule(&request);
        prop_assert!(response.is_valid, "unexpected failure: {:?}", response.message);
    }

    #[test]
    fn dependencies_come_strictly_earlier(request in dag_request_strategy(15)) {
        let response = schedule(&request);
        let pos = positions(&response.recommended_order);

        for task in &request.tasks {
            for dep in &task.dependencies {
                prop_assert!(pos[dep.as_str()] < pos[task.title.as_str()]);
            }
        }
    }

    #[test]
    fn order_is_a_permutation_of_titles(request in dag_request_strategy(15)) {
        let response = schedule(&request);

        let emitted: HashSet<&str> = response.recommended_order.iter().map(String::as_str).collect();
        let expected: HashSet<&str> = request.tasks.iter().map(|t| t.title.as_str()).collect();

        prop_assert_eq!(response.recommended_order.len(), request.len());
        prop_assert_eq!(emitted, expected);
    }

    #[test]
    fn each_step_takes_the_earliest_eligible_deadline(request in dag_request_strategy(15)) {
        let response = schedule(&request);
        let by_title: HashMap<&str, &ScheduleTask> =
            request.tasks.iter().map(|t| (t.title.as_str(), t)).collect();

        let mut done: HashSet<&str> = HashSet::new();
        for title in &response.recommended_order {
            let earliest = request
                .tasks
                .iter()
                .filter(|t| !done.contains(t.title.as_str()))
                .filter(|t| t.dependencies.iter().all(|d| done.contains(d.as_str())))
                .map(|t| t.due_date)
                .min();

            prop_assert_eq!(Some(by_title[title.as_str()].due_date), earliest);
            done.insert(title.as_str());
        }
    }

    #[test]
    fn injected_cycle_is_reported(
        request in dag_request_strategy(15).prop_filter("need two tasks", |r| r.len() >= 2),
        a in any::<usize>(),
        b in any::<usize>(),
    ) {
        let mut request = request;
        let n = request.len();
        let first = a % n;
        let second = (first + 1 + b % (n - 1)) % n;

        let first_title = request.tasks[first].title.clone();
        let second_title = request.tasks[second].title.clone();
        request.tasks[first].dependencies.push(second_title);
        request.tasks[second].dependencies.push(first_title);

        let response = schedule(&request);
        prop_assert!(!response.is_valid);
        prop_assert!(response.recommended_order.is_empty());
        prop_assert!(response.message.unwrap_or_default().contains("Circular dependency"));
    }

    #[test]
    fn dangling_reference_is_named(request in dag_request_strategy(15), pick in any::<usize>()) {
        let mut request = request;
        let idx = pick % request.len();
        request.tasks[idx].dependencies.push("missing_task".to_string());

        let response = schedule(&request);
        prop_assert!(!response.is_valid);
        prop_assert!(response.message.unwrap_or_default().contains("'missing_task'"));
    }
}

#[test]
fn earlier_independent_deadline_goes_first() {
    let request = ScheduleRequest::new(vec![
        ScheduleTask::new("later", 1.0, due(10, 0)),
        ScheduleTask::new("sooner", 1.0, due(3, 0)),
    ]);

    let response = schedule(&request);
    assert_eq!(response.recommended_order, vec!["sooner", "later"]);
}
