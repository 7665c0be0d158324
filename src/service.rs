//! Service layer over the gym machine.
//!
//! Owns the machine instance on behalf of presentation layers: validates
//! crisp inputs against the declared variable bounds, switches between
//! membership-function families, and caches the membership snapshot so
//! rendering layers never touch engine internals.
//!
//! Validation failures do not raise: per the error-handling contract the
//! service answers with the documented fallback result and an error
//! string, which a GUI can render as a warning without crashing.

use tracing::{debug, info, warn};

use crate::config;
use crate::error::{FisError, FisResult};
use crate::inference::Inputs;
use crate::machine::{ComputeResult, GymMachine, MembershipSnapshot};
use crate::membership::MfFamily;
use crate::terms::VariableId;

/// Facade used by GUI, plotting and scenario layers.
///
/// The triangular family maps to the production machine (hand-tuned
/// terms, 30 rules); the other families build the experimental machine
/// under that family.
#[derive(Debug)]
pub struct FisService {
    machine: GymMachine,
    snapshot: MembershipSnapshot,
}

impl FisService {
    /// Service over the production machine.
    pub fn new() -> FisResult<Self> {
        Self::with_family(MfFamily::Triangular)
    }

    /// Service over the machine built for `family`.
    pub fn with_family(family: MfFamily) -> FisResult<Self> {
        let machine = Self::build_machine(family)?;
        let snapshot = machine.membership_snapshot();
        Ok(Self { machine, snapshot })
    }

    fn build_machine(family: MfFamily) -> FisResult<GymMachine> {
        match family {
            MfFamily::Triangular => GymMachine::production(),
            other => GymMachine::with_family(other),
        }
    }

    /// Rebuild the machine under a different family and refresh the
    /// cached snapshot.
    pub fn change_family(&mut self, family: MfFamily) -> FisResult<()> {
        info!(from = %self.machine.family(), to = %family, "switching membership family");
        self.machine = Self::build_machine(family)?;
        self.snapshot = self.machine.membership_snapshot();
        Ok(())
    }

    pub fn family(&self) -> MfFamily {
        self.machine.family()
    }

    pub fn rule_count(&self) -> usize {
        self.machine.rule_count()
    }

    pub fn machine(&self) -> &GymMachine {
        &self.machine
    }

    /// The cached membership snapshot for rendering layers. Refreshed on
    /// every family change; never mutated by consumers.
    pub fn membership_snapshot(&self) -> &MembershipSnapshot {
        &self.snapshot
    }

    /// Check every input against its variable's declared `[min, max]`.
    pub fn validate(&self, inputs: &Inputs) -> FisResult<()> {
        let checks = [
            (VariableId::Force, inputs.force),
            (VariableId::Speed, inputs.speed),
            (VariableId::Phase, inputs.phase),
            (VariableId::Fatigue, inputs.fatigue),
            (VariableId::Mode, inputs.mode),
        ];

        for (id, value) in checks {
            if !value.is_finite() {
                return Err(FisError::not_finite(id, value));
            }
            let (min, max) = config::input_bounds(id);
            if value < min || value > max {
                return Err(FisError::out_of_range(id, value, min, max));
            }
        }
        Ok(())
    }

    /// Validate, then run the inference pass. Invalid inputs produce the
    /// fallback result with the validation message attached instead of an
    /// error return.
    pub fn compute(&self, inputs: &Inputs) -> ComputeResult {
        if let Err(e) = self.validate(inputs) {
            warn!(%e, ?inputs, "rejected inputs");
            return ComputeResult::fallback(e.to_string());
        }

        debug!(?inputs, "computing");
        self.machine.compute(inputs)
    }
}
