//! Error types for gaze setup

use crate::scene::EntityId;

#[derive(Debug, thiserror::Error)]
pub enum GazeError {
    #[error("No gazeable found on {entity}")]
    MissingGazeable { entity: EntityId },

    #[error("No chargeable configured")]
    MissingChargeable,

    #[error("Invalid detector settings: {0}")]
    InvalidSettings(String),

    #[error("Focus detector on {entity} is disabled")]
    DetectorDisabled { entity: EntityId },
}

pub type Result<T> = std::result::Result<T, GazeError>;
