use std::fmt::Display;

use crate::errors::errors::ErrorImpl;

/// Running cyclomatic complexity of one function.
///
/// The score starts at one for the single straight-line path. Every branch
/// adds one, and every distinct user-defined callee adds its own finished
/// score the first time it is called. Additions fail with `ComplexityOverflow`
/// once the score no longer fits a `u64`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complexity {
    score: u64,
    branches: u32,
    /// Invocation count per callee, in first-call order.
    calls: Vec<(String, u32)>,
}

impl Complexity {
    pub fn new() -> Self {
        Complexity {
            score: 1,
            branches: 0,
            calls: vec![],
        }
    }

    pub fn add_branch(&mut self) -> Result<(), ErrorImpl> {
        self.score = self
            .score
            .checked_add(1)
            .ok_or(ErrorImpl::ComplexityOverflow)?;
        self.branches += 1;
        Ok(())
    }

    /// Records a call to a completed user function.
    ///
    /// # Arguments
    ///
    /// * `callee` - Name of the called function
    /// * `callee_score` - The callee's finished complexity score
    pub fn add_call(&mut self, callee: &str, callee_score: u64) -> Result<(), ErrorImpl> {
        match self.calls.iter_mut().find(|(name, _)| name == callee) {
            Some((_, count)) => *count += 1,
            None => {
                self.score = self
                    .score
                    .checked_add(callee_score)
                    .ok_or(ErrorImpl::ComplexityOverflow)?;
                self.calls.push((String::from(callee), 1));
            }
        }
        Ok(())
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn branches(&self) -> u32 {
        self.branches
    }

    pub fn calls(&self) -> &[(String, u32)] {
        &self.calls
    }

    /// Number of times `callee` was called, zero if never.
    pub fn call_count(&self, callee: &str) -> u32 {
        self.calls
            .iter()
            .find(|(name, _)| name == callee)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// The report line for a function named `name`.
    pub fn report(&self, name: &str) -> String {
        format!("Cyclomatic complexity of {}: {}", name, self)
    }
}

impl Default for Complexity {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut entries = vec![];
        if self.branches() > 0 {
            entries.push(format!("branch x {}", self.branches()));
        }
        for (callee, count) in self.calls() {
            entries.push(format!("{} x {}", callee, count));
        }

        if entries.is_empty() {
            write!(f, "{}", self.score())
        } else {
            write!(f, "{} ({})", self.score(), entries.join(", "))
        }
    }
}
