use thiserror::Error;

/// Configuration problems.  Controllers report these through `log::error!`
/// and keep running; only the loaders hand them back to the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("acceleration step must be positive, got {step}")]
    StepNotPositive { step: f32 },

    #[error("player top speed {top_speed} is not a multiple of move step {step}")]
    TopSpeedNotMultiple { top_speed: f32, step: f32 },

    #[error("decay divisor must be greater than 1, got {divisor}")]
    DecayDivisorTooSmall { divisor: f32 },

    #[error("world {width}x{height} is smaller than the {min_width}x{min_height} minimum")]
    WorldTooSmall {
        width: f32,
        height: f32,
        min_width: f32,
        min_height: f32,
    },

    #[error("wave index 0 is reserved and can never be spawned")]
    WaveIndexZero,

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
