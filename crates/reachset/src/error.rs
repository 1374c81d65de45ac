//! Error kinds produced by the reachability core.
//!
//! Three of the four variants are fatal and bubble to the driver with `?`;
//! `Infeasible` is an expected signal that call sites drop with `.ok()`.

use thiserror::Error;

/// Errors produced while configuring or running a reachable-set analysis.
#[derive(Debug, Error, PartialEq)]
pub enum ReachError {
    #[error("configuration error: {parameter} = {value} is out of range ({reason})")]
    Config {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("infeasible intersection while {operation}")]
    Infeasible { operation: &'static str },

    #[error("collision checker failed at step {step}: {message}")]
    Checker { step: usize, message: String },

    #[error("invariant violated: {message}")]
    Invariant { message: String },
}

impl ReachError {
    pub fn config(parameter: &'static str, value: f64, reason: &'static str) -> Self {
        ReachError::Config {
            parameter,
            value,
            reason,
        }
    }

    pub fn infeasible(operation: &'static str) -> Self {
        ReachError::Infeasible { operation }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        ReachError::Invariant {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_parameter() {
        let e = ReachError::config("dt", -1.0, "must be > 0");
        assert!(e.to_string().contains("dt"));
    }

    #[test]
    fn display_names_the_step_on_checker_errors() {
        let e = ReachError::Checker {
            step: 7,
            message: "boom".into(),
        };
        let s = e.to_string();
        assert!(s.contains('7'));
        assert!(s.contains("boom"));
    }
}
