use thiserror::Error;

/// Errors raised by configuration, the transformation engine and the simulation driver
#[derive(Debug, Error)]
pub enum CeemsError {
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("domain error while deriving {quantity}: radicand {radicand} is negative")]
    Domain {
        quantity: &'static str,
        radicand: f64,
    },

    #[error(
        "degenerate transform: J = alpha1*beta2 - alpha2*beta1 = {jacobian} \
         (alpha1={alpha1}, alpha2={alpha2}, beta1={beta1}, beta2={beta2})"
    )]
    DegenerateTransform {
        alpha1: f64,
        alpha2: f64,
        beta1: f64,
        beta2: f64,
        jacobian: f64,
    },

    #[error("numerical instability: trajectory '{trajectory}' is non-finite from step {step}")]
    NumericalInstability { trajectory: String, step: usize },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl CeemsError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CeemsError>;
