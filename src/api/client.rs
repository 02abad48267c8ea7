use lazy_static::lazy_static;
use std::time::Duration;

lazy_static! {
    /// Agent for text generation calls
    pub static ref UREQ_AGENT: ureq::Agent = {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(120)))
            .build();
        config.into()
    };

    /// Agent for speech downloads; a hung TTS fetch should give up sooner
    pub static ref TTS_AGENT: ureq::Agent = {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();
        config.into()
    };
}

/// Map transport/status errors onto the short error codes the UI shows.
pub fn describe_http_error(provider: &str, err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::StatusCode(401) | ureq::Error::StatusCode(403) => {
            anyhow::anyhow!("INVALID_API_KEY")
        }
        ureq::Error::StatusCode(429) => anyhow::anyhow!("QUOTA_EXCEEDED:{}", provider),
        other => anyhow::anyhow!("{} Error: {}", provider, other),
    }
}
