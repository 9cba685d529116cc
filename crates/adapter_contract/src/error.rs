//! Contract error types.

use thiserror::Error;

/// Errors raised while turning a raw request into a priced contract.
///
/// # Variants
/// - `Validation`: one or more field-level messages, in field order
/// - `Construction`: the contract terms cannot form an instrument
/// - `Configuration`: server-side data needed for the contract is missing
/// - `Pricing`: the pricing library rejected the contract
///
/// # Examples
/// ```
/// use adapter_contract::ContractError;
///
/// let err = ContractError::Validation(vec![
///     "STRIKE is empty".to_string(),
///     "SPOT must be > 0.".to_string(),
/// ]);
/// assert_eq!(err.messages(), vec!["STRIKE is empty", "SPOT must be > 0."]);
/// ```
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    /// Field-level validation failures.
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    /// Terms that cannot form an instrument.
    #[error("{0}")]
    Construction(String),

    /// Missing or inconsistent server configuration.
    #[error("{0}")]
    Configuration(String),

    /// Failure reported by the pricing library.
    #[error("{0}")]
    Pricing(String),
}

impl ContractError {
    /// Messages as returned to the client, one per failure.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ContractError::Validation(messages) => messages.clone(),
            ContractError::Construction(message)
            | ContractError::Configuration(message)
            | ContractError::Pricing(message) => vec![message.clone()],
        }
    }

    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ContractError::Validation(_) => "validation",
            ContractError::Construction(_) => "construction",
            ContractError::Configuration(_) => "configuration",
            ContractError::Pricing(_) => "pricing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_message_variants() {
        let err = ContractError::Pricing("barrier touched".to_string());
        assert_eq!(err.messages(), vec!["barrier touched"]);
        assert_eq!(err.to_string(), "barrier touched");
        assert_eq!(err.kind(), "pricing");
    }

    #[test]
    fn test_validation_display_joins() {
        let err = ContractError::Validation(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "a; b");
    }
}
