use tracing::info;
use waymark_common::{Error, Result};
use waymark_ledger::Ledger;

use crate::action::Action;
use crate::options::MigrationOptions;
use crate::plan::{self, Direction, Plan};

/// Terminal state of one runner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The up action ran and `version` is now current.
    Applied { version: i64 },
    /// The down action ran; `current` is what the ledger holds now.
    RolledBack { version: i64, current: Option<i64> },
    /// The sequencing engine declined to execute. Not a failure.
    Skipped { reason: String, current: Option<i64> },
}

impl Outcome {
    /// The ledger's version after this invocation.
    pub fn current_version(&self) -> Option<i64> {
        match self {
            Outcome::Applied { version } => Some(*version),
            Outcome::RolledBack { current, .. } => *current,
            Outcome::Skipped { current, .. } => *current,
        }
    }
}

/// Orchestrates one migration invocation: read the current version, let the
/// sequencing engine decide, run the chosen action, record the result.
///
/// One pass, no retry. The ledger changes only after the action has
/// succeeded; a failed action leaves the ledger untouched.
pub struct Runner {
    options: MigrationOptions,
}

impl Runner {
    pub fn new(options: MigrationOptions) -> Self {
        Self { options }
    }

    /// Open the ledger named by the configuration and run one invocation.
    /// The ledger handle lives for exactly this call.
    pub fn run(&self, up: &mut dyn Action, down: &mut dyn Action) -> Result<Outcome> {
        let config = waymark_config::load(&self.options.config)?;
        let environment = waymark_config::active_environment();
        let store = config.environment(&environment)?;
        let ledger = Ledger::open(&store.database)?;
        self.run_with_ledger(&ledger, up, down)
    }

    /// Run one invocation against an already-open ledger.
    pub fn run_with_ledger(
        &self,
        ledger: &Ledger,
        up: &mut dyn Action,
        down: &mut dyn Action,
    ) -> Result<Outcome> {
        let direction = self.direction();
        match direction {
            Direction::Forward => info!("starting migration"),
            Direction::Rollback => info!("starting rollback"),
        }

        let current = ledger.current_version()?;
        match current {
            Some(version) => info!("current version is {version}"),
            None => info!("no version recorded yet"),
        }

        match plan::decide(direction, self.options.version, current) {
            Plan::Skip { reason } => {
                info!("doing nothing: {reason}");
                Ok(Outcome::Skipped { reason, current })
            }
            Plan::Execute => match direction {
                Direction::Forward => self.apply(ledger, up),
                Direction::Rollback => self.roll_back(ledger, down),
            },
        }
    }

    fn direction(&self) -> Direction {
        if self.options.rollback {
            Direction::Rollback
        } else {
            Direction::Forward
        }
    }

    fn apply(&self, ledger: &Ledger, up: &mut dyn Action) -> Result<Outcome> {
        let version = self.options.version;
        up.execute()
            .map_err(|e| Error::Action(format!("forward migration to {version}: {e}")))?;

        // The action has already taken effect; a recording failure here
        // means real state and recorded state have diverged.
        ledger.record_version(version).map_err(|e| {
            Error::Inconsistency(format!(
                "migration to {version} was applied but recording it failed ({e}); \
                 the ledger no longer matches the applied schema"
            ))
        })?;

        info!("finished, version now {version}");
        Ok(Outcome::Applied { version })
    }

    fn roll_back(&self, ledger: &Ledger, down: &mut dyn Action) -> Result<Outcome> {
        let version = self.options.version;
        down.execute()
            .map_err(|e| Error::Action(format!("rollback of {version}: {e}")))?;

        ledger.remove_latest_version().map_err(|e| {
            Error::Inconsistency(format!(
                "rollback of {version} was applied but removing the record failed ({e}); \
                 the ledger no longer matches the applied schema"
            ))
        })?;

        let current = ledger.current_version()?;
        match current {
            Some(now) => info!("finished, version now {now}"),
            None => info!("finished, no version recorded"),
        }
        Ok(Outcome::RolledBack { version, current })
    }
}

/// Entry point for migration units: parse the unit's process arguments,
/// then run one invocation with the given version and actions.
pub fn run(version: i64, up: &mut dyn Action, down: &mut dyn Action) -> Result<Outcome> {
    let options = MigrationOptions::from_env(version);
    info!("migration options: {options}");
    Runner::new(options).run(up, down)
}
