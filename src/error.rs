pub type Result<T> = std::result::Result<T, CaplineError>;

#[derive(thiserror::Error, Debug)]
pub enum CaplineError {
    #[error("{0}")]
    Parse(String),

    #[error("invalid caption JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid section pattern: {0}")]
    InvalidRegex(#[from] regex::Error),

    #[error("no captions matched filter {filter}")]
    NoMatchingCaptions { filter: String },

    #[error("phrase layout needs at least one base position")]
    EmptyLayout,
}

impl CaplineError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_match_names_the_filter() {
        let err = CaplineError::NoMatchingCaptions {
            filter: "section 'verse1'".to_string(),
        };
        assert_eq!(err.to_string(), "no captions matched filter section 'verse1'");
    }

    #[test]
    fn parse_message_is_passed_through() {
        assert_eq!(CaplineError::parse("bad block").to_string(), "bad block");
    }
}
