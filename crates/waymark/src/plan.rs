/// Direction of one migration invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Rollback,
}

/// Decision of the sequencing engine: run the caller's action, or skip with
/// a reason. A skip is an informational outcome, not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    Execute,
    Skip { reason: String },
}

impl Plan {
    pub fn should_execute(&self) -> bool {
        matches!(self, Plan::Execute)
    }

    fn skip(reason: impl Into<String>) -> Self {
        Plan::Skip {
            reason: reason.into(),
        }
    }
}

/// Decide whether a migration at `target` may run, given the ledger's
/// `current` version (`None` when the ledger is empty).
///
/// Forward application is monotonic: a target at or below the current
/// version is skipped, which also makes re-running an applied migration a
/// no-op. Rollback is strictly single-step: only the version that is
/// actually current may be rolled back, and never from an empty ledger.
pub fn decide(direction: Direction, target: i64, current: Option<i64>) -> Plan {
    match direction {
        Direction::Forward => match current {
            Some(current) if target <= current => {
                Plan::skip(format!("new version {target} is not higher than {current}"))
            }
            _ => Plan::Execute,
        },
        Direction::Rollback => match current {
            None => Plan::skip("cannot rollback from empty state"),
            Some(current) if target != current => Plan::skip(format!(
                "version to rollback is {current} and requested was {target}"
            )),
            Some(_) => Plan::Execute,
        },
    }
}
