//! Drives the skip list and the baseline containers through the same
//! operations and verifies they never disagree.

use crate::baseline::{SortedLinkedList, SortedVec};
use crate::config::SkipListConfig;
use crate::skip_list::SkipList;
use crate::sorted::SortedCollection;
use log::info;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CheckError {
    #[error("{container} order invalid after {operation}")]
    Unsorted {
        container: &'static str,
        operation: String,
    },
    #[error("{container} has size {actual} after {operation}, expected {expected}")]
    WrongSize {
        container: &'static str,
        operation: String,
        expected: usize,
        actual: usize,
    },
    #[error("{left} and {right} are not equivalent after {operation}")]
    Diverged {
        left: &'static str,
        right: &'static str,
        operation: String,
    },
    #[error("{left} and {right} returned different results for {operation}")]
    Disagreed {
        left: &'static str,
        right: &'static str,
        operation: String,
    },
    #[error("cannot build skip list: {0}")]
    Setup(String),
}

/// Fan-out over several sorted containers. Every mutation is applied to all
/// of them and followed by sortedness, size and equivalence checks.
pub struct Checker<T> {
    containers: Vec<Box<dyn SortedCollection<T>>>,
    operations: usize,
}

impl<T: PartialOrd + Clone + Debug> Checker<T> {
    pub fn new(containers: Vec<Box<dyn SortedCollection<T>>>) -> Self {
        Checker {
            containers,
            operations: 0,
        }
    }

    /// Operations applied so far, counted once per fan-out.
    pub fn operations(&self) -> usize {
        self.operations
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.containers.iter().map(|c| c.name()).collect()
    }

    pub fn insert(&mut self, value: T) -> Result<(), CheckError> {
        let operation = format!("insert({:?})", value);
        for container in self.containers.iter_mut() {
            let expected = container.len() + 1;
            container.insert(value.clone());
            check_container(&**container, &operation, expected)?;
        }
        self.operations += 1;
        self.check_equivalent(&operation)
    }

    /// Returns whether the value was present (all containers must agree).
    pub fn remove(&mut self, value: &T) -> Result<bool, CheckError> {
        let operation = format!("remove({:?})", value);
        let mut outcomes = Vec::with_capacity(self.containers.len());
        for container in self.containers.iter_mut() {
            let before = container.len();
            let removed = container.remove(value);
            let expected = if removed { before - 1 } else { before };
            check_container(&**container, &operation, expected)?;
            outcomes.push(removed);
        }
        self.operations += 1;
        let removed = self.agree(&outcomes, &operation)?;
        self.check_equivalent(&operation)?;
        Ok(removed)
    }

    pub fn contains(&mut self, value: &T) -> Result<bool, CheckError> {
        let operation = format!("contains({:?})", value);
        let outcomes: Vec<bool> = self.containers.iter().map(|c| c.contains(value)).collect();
        self.operations += 1;
        self.agree(&outcomes, &operation)
    }

    pub fn clear(&mut self) -> Result<(), CheckError> {
        for container in self.containers.iter_mut() {
            container.clear();
            check_container(&**container, "clear()", 0)?;
        }
        self.operations += 1;
        Ok(())
    }

    fn agree(&self, outcomes: &[bool], operation: &str) -> Result<bool, CheckError> {
        let Some(&first) = outcomes.first() else {
            return Ok(false);
        };
        match outcomes.iter().position(|&outcome| outcome != first) {
            Some(i) => Err(CheckError::Disagreed {
                left: self.containers[0].name(),
                right: self.containers[i].name(),
                operation: operation.to_string(),
            }),
            None => Ok(first),
        }
    }

    fn check_equivalent(&self, operation: &str) -> Result<(), CheckError> {
        let Some((reference, others)) = self.containers.split_first() else {
            return Ok(());
        };
        let expected = reference.to_vec();
        for other in others {
            if !equivalent(&expected, &other.to_vec()) {
                return Err(CheckError::Diverged {
                    left: reference.name(),
                    right: other.name(),
                    operation: operation.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn check_container<T: PartialOrd + Clone>(
    container: &dyn SortedCollection<T>,
    operation: &str,
    expected: usize,
) -> Result<(), CheckError> {
    let values = container.to_vec();
    if values.windows(2).any(|pair| pair[1] < pair[0]) {
        return Err(CheckError::Unsorted {
            container: container.name(),
            operation: operation.to_string(),
        });
    }
    if container.len() != expected || values.len() != expected {
        return Err(CheckError::WrongSize {
            container: container.name(),
            operation: operation.to_string(),
            expected,
            actual: container.len(),
        });
    }
    Ok(())
}

// Element-wise equality derived from `<` alone.
fn equivalent<T: PartialOrd>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| !(x < y) && !(y < x))
}

/// Summary of a finished [`run_correctness`].
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub containers: Vec<&'static str>,
    pub phases: Vec<&'static str>,
    pub operations: usize,
}

/// Feeds the shuffled values `0..n` through a skip list, a sorted vector
/// and a sorted linked list: insert everything, remove everything, refill,
/// then `contains` and `remove` with half of the probes missing.
///
/// The config's seed, when present, fixes both the shuffle and the skip
/// list's promotions.
pub fn run_correctness(n: u64, config: &SkipListConfig) -> Result<CheckReport, CheckError> {
    let skip_list: SkipList<u64> =
        SkipList::from_config(config).map_err(|e| CheckError::Setup(e.to_string()))?;

    let mut rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let mut input: Vec<u64> = (0..n).collect();
    input.shuffle(&mut rng);

    let mut checker: Checker<u64> = Checker::new(vec![
        Box::new(skip_list) as Box<dyn SortedCollection<u64>>,
        Box::new(SortedLinkedList::<u64>::new()),
        Box::new(SortedVec::<u64>::new()),
    ]);
    let half = n / 2;
    let mut phases = Vec::new();

    for &value in &input {
        checker.insert(value)?;
    }
    phases.push("insert");
    info!("Insert phase passed for {} values", n);

    for value in &input {
        checker.remove(value)?;
    }
    phases.push("remove (no misses)");
    info!("Remove phase passed, containers drained");

    for &value in &input {
        checker.insert(value)?;
    }
    phases.push("refill");

    for value in &input {
        checker.contains(&(value + half))?;
    }
    phases.push("contains (50% misses)");
    info!("Contains phase passed");

    for value in &input {
        checker.remove(&(value + half))?;
    }
    phases.push("remove (50% misses)");
    info!("Correctness run over {} values passed", n);

    Ok(CheckReport {
        containers: checker.names(),
        phases,
        operations: checker.operations(),
    })
}
