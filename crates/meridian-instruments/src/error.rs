use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("unknown domain '{domain_id}' for instrument '{instrument_id}'")]
    UnknownDomain {
        instrument_id: String,
        domain_id: String,
    },

    #[error("score for domain '{domain_id}' is not a finite number")]
    NonFinite { domain_id: String },
}
