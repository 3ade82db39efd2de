use crate::core::rtd::RtdProviderConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw provider params as configured by the publisher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NeuwoParams {
    #[serde(default, alias = "public_token", alias = "publictoken")]
    pub public_token: Option<String>,
    #[serde(default, alias = "api_url", alias = "apiurl")]
    pub api_url: Option<String>,
    /// Overrides the detected page url sent for classification
    #[serde(default, alias = "arg_url", alias = "argurl")]
    pub arg_url: Option<String>,
}

/// Params which passed validation, required fields are guaranteed present
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedParams {
    pub public_token: String,
    pub api_url: String,
    pub arg_url: Option<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("publicToken missing (config.params.publicToken)")]
    MissingPublicToken,
    #[error("apiUrl missing (config.params.apiUrl)")]
    MissingApiUrl,
    #[error("params could not be read: {0}")]
    Malformed(String),
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

impl NeuwoParams {
    /// Reads params from a provider config, absent params read as empty
    pub fn from_config(config: &RtdProviderConfig) -> Result<Self, ParamsError> {
        match &config.params {
            Value::Null => Ok(NeuwoParams::default()),
            params => serde_json::from_value(params.clone())
                .map_err(|e| ParamsError::Malformed(e.to_string())),
        }
    }

    /// Checks required fields, empty strings count as missing. The api
    /// url is taken as given, relative urls included.
    pub fn validate(&self) -> Result<ValidatedParams, ParamsError> {
        let public_token = non_empty(&self.public_token).ok_or(ParamsError::MissingPublicToken)?;
        let api_url = non_empty(&self.api_url).ok_or(ParamsError::MissingApiUrl)?;

        Ok(ValidatedParams {
            public_token,
            api_url,
            arg_url: non_empty(&self.arg_url),
        })
    }
}
