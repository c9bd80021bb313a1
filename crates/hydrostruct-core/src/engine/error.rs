use crate::core::hydraulics::flow_direction::InvalidFlowDirection;
use thiserror::Error;

/// Errors that abort an import pass.
///
/// Recoverable anomalies (missing references, unsupported variants, out-of-range chainages,
/// missing friction data) are reported through the
/// [`ImportReporter`](crate::engine::report::ImportReporter) instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid flow direction in structure definition '{definition_id}': {source}")]
    InvalidFlowDirection {
        definition_id: String,
        #[source]
        source: InvalidFlowDirection,
    },

    #[error("No weir formula exists for structure definition '{definition_id}' of legacy type {type_code}")]
    UnsupportedFormula {
        definition_id: String,
        type_code: i32,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
