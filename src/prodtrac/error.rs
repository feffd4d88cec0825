use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProdtracError {
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{}", rejection_text(.status, .detail))]
    Rejected { status: u16, detail: Option<String> },

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),

    /// A user-triggered action failed; the text is already user-facing.
    #[error("{0}")]
    Action(String),
}

fn rejection_text(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("Server rejected the request (status {})", status),
    }
}

impl ProdtracError {
    /// Text shown to the user for a failed action.
    ///
    /// Server-provided detail wins; local validation messages are shown as-is;
    /// everything else collapses to the per-action `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ProdtracError::Rejected {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ProdtracError::Invalid(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProdtracError>;
