//! Conformance vectors
//!
//! A vector is a short sequence of operations evaluated in a fresh
//! `ExecutionContext`, plus the observable results another implementation
//! must reproduce: the last pushed word, the final memory size and the final
//! memory contents. Vectors are stored as JSON so any implementation of the
//! machine can consume the same files.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::vm::{ExecutionContext, MemorySnapshot, Op, VMError};
use crate::word::{parse_word, to_hex, Word};

/// Vectors for the core scenarios, shipped with the crate
pub const BUILTIN_VECTORS: &str = include_str!("../vectors/core.json");

/// One operation and its textual operands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub op: Op,

    #[serde(default)]
    pub args: Vec<String>,
}

impl Step {
    /// Parse `"mnemonic arg arg ..."`
    pub fn parse(text: &str) -> Result<Self, VMError> {
        let mut parts = text.split_whitespace();
        let op = parts
            .next()
            .ok_or_else(|| VMError::UnknownOp(text.to_string()))?
            .parse()?;
        Ok(Step {
            op,
            args: parts.map(str::to_string).collect(),
        })
    }

    /// Parse the textual operands into words
    pub fn operands(&self) -> Result<Vec<Word>, VMError> {
        self.args.iter().map(|arg| parse_word(arg)).collect()
    }
}

/// A named scenario and its expected observations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceVector {
    #[serde(default)]
    pub name: Option<String>,

    pub steps: Vec<Step>,

    /// Expected value pushed by the last value-producing step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,

    /// Expected final memory size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_msize: Option<usize>,

    /// Expected final memory contents, hex encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expect_memory: Option<String>,
}

/// A file's worth of vectors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConformanceSuite {
    pub vectors: Vec<ConformanceVector>,
}

impl ConformanceSuite {
    pub fn from_json(json: &str) -> Result<Self, VMError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VMError> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// The vectors shipped with the crate
    pub fn builtin() -> Result<Self, VMError> {
        Self::from_json(BUILTIN_VECTORS)
    }
}

/// Result of running one vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    /// Ran to completion but an observation differed
    Fail { reasons: Vec<String> },
    /// Could not run: bad operand text, arity, memory limit
    Error { message: String },
}

impl Outcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VectorResult {
    pub name: String,
    pub outcome: Outcome,

    /// Last pushed value, hex encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_value: Option<String>,

    pub memory: MemorySnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub results: Vec<VectorResult>,
    pub passed: usize,
    pub failed: usize,
}

impl SuiteReport {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Run every step in one context, returning the last pushed value
fn execute_steps(ctx: &mut ExecutionContext, steps: &[Step]) -> Result<Option<Word>, VMError> {
    let mut last = None;
    for step in steps {
        let operands = step.operands()?;
        if let Some(value) = ctx.evaluate(step.op, &operands)? {
            last = Some(value);
        }
    }
    Ok(last)
}

/// Normalise hex text for comparison: lowercase, no prefix, no whitespace
fn normalise_hex(text: &str) -> String {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    compact
        .strip_prefix("0x")
        .unwrap_or(&compact)
        .to_lowercase()
}

/// Compare what a context observed against what a vector expects
fn check_expectations(
    vector: &ConformanceVector,
    last: Option<Word>,
    snapshot: &MemorySnapshot,
) -> Result<Vec<String>, VMError> {
    let mut reasons = Vec::new();

    if let Some(expected) = &vector.expect {
        let expected = parse_word(expected)?;
        match last {
            Some(actual) if actual == expected => {}
            Some(actual) => reasons.push(format!(
                "expected {}, got {}",
                to_hex(expected),
                to_hex(actual)
            )),
            None => reasons.push(format!("expected {}, but no value was produced", to_hex(expected))),
        }
    }

    if let Some(expected) = vector.expect_msize {
        if snapshot.size != expected {
            reasons.push(format!(
                "expected memory size {}, got {}",
                expected, snapshot.size
            ));
        }
    }

    if let Some(expected) = &vector.expect_memory {
        if normalise_hex(expected) != snapshot.contents {
            reasons.push(format!(
                "expected memory {}, got {}",
                normalise_hex(expected),
                snapshot.contents
            ));
        }
    }

    Ok(reasons)
}

/// Run one vector in a fresh context
pub fn run_vector(vector: &ConformanceVector, memory_limit: Option<usize>) -> VectorResult {
    let name = vector.name.clone().unwrap_or_else(|| {
        vector
            .steps
            .iter()
            .map(|step| step.op.mnemonic())
            .collect::<Vec<_>>()
            .join(" ")
    });

    let mut ctx = ExecutionContext::with_memory_limit(memory_limit);
    let executed = execute_steps(&mut ctx, &vector.steps);
    let snapshot = ctx.memory().snapshot();

    let (outcome, last) = match executed {
        Ok(last) => match check_expectations(vector, last, &snapshot) {
            Ok(reasons) if reasons.is_empty() => (Outcome::Pass, last),
            Ok(reasons) => (Outcome::Fail { reasons }, last),
            Err(err) => (
                Outcome::Error {
                    message: err.to_string(),
                },
                last,
            ),
        },
        Err(err) => (
            Outcome::Error {
                message: err.to_string(),
            },
            None,
        ),
    };

    debug!("vector '{}': {:?}", name, outcome);

    VectorResult {
        name,
        outcome,
        last_value: last.map(to_hex),
        memory: snapshot,
    }
}

/// Run every vector in a suite
pub fn run_suite(suite: &ConformanceSuite, memory_limit: Option<usize>) -> SuiteReport {
    let results: Vec<VectorResult> = suite
        .vectors
        .iter()
        .map(|vector| run_vector(vector, memory_limit))
        .collect();

    let passed = results.iter().filter(|r| r.outcome.is_pass()).count();
    let failed = results.len() - passed;
    info!("conformance: {} passed, {} failed", passed, failed);

    SuiteReport {
        results,
        passed,
        failed,
    }
}
