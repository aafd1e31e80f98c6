use crate::domain::{entities::ResolvedRoutes, error::DomainError};

/// Centralized domain validation.
///
/// Checks the guarantees emitters rely on before any bytes are produced.
pub struct DomainValidator;

impl DomainValidator {
    /// A resolved table is total and has no shadowing catch-all.
    pub fn validate_resolved(routes: &ResolvedRoutes) -> Result<(), DomainError> {
        let Some(terminal) = routes.terminal() else {
            return Err(DomainError::InvariantViolated(
                "resolved route table is empty".into(),
            ));
        };

        if !terminal.pattern().is_catch_all() {
            return Err(DomainError::InvariantViolated(format!(
                "final rule '{}' is not a catch-all",
                terminal.pattern()
            )));
        }

        let early = routes.len() - 1;
        if let Some(shadowing) = routes.as_slice()[..early]
            .iter()
            .find(|r| r.pattern().is_catch_all())
        {
            return Err(DomainError::InvariantViolated(format!(
                "catch-all '{}' shadows the rules after it",
                shadowing
            )));
        }

        Ok(())
    }
}
