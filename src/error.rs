use thiserror::Error;

/// Raised when a caller hands the simulation a value it cannot accept.
///
/// The simulation never clamps these; the caller is expected to fix its input.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ContractError {
    #[error("time delta must be finite and non-negative, got {dt}")]
    NegativeDelta { dt: f32 },
    #[error("formation needs at least one row and one column, got {rows}x{columns}")]
    EmptyFormation { rows: usize, columns: usize },
    #[error("{columns} columns do not fit inside the playfield")]
    FormationTooWide { columns: usize },
    #[error("{rows} rows would start the formation behind the defense line")]
    FormationTooTall { rows: usize },
    #[error("alien step interval must be finite and positive, got {speed}")]
    InvalidAlienSpeed { speed: f32 },
}

pub(crate) fn check_delta(dt: f32) -> Result<(), ContractError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(ContractError::NegativeDelta { dt })
    }
}

pub(crate) fn check_speed(speed: f32) -> Result<(), ContractError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(ContractError::InvalidAlienSpeed { speed })
    }
}
