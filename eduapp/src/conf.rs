use clap::Parser;
use educore::{
    error::FetchError,
    session::Session,
    translation::DEFAULT_LOCALE,
};
use std::time::Duration;

use crate::{
    client::HttpClient,
    presenter::{
        CardContext,
        Presenter,
        DEFAULT_PLACEHOLDERS,
    },
};

#[derive(Clone, Debug, Parser)]
pub struct Builder {
    #[clap(
        long,
        value_name = "EDU_API_BASE_URL",
        env = "EDU_API_BASE_URL",
        default_value = "http://localhost:8000",
    )]
    pub edu_api_base_url: String,
    #[clap(
        long,
        value_name = "EDU_API_TOKEN",
        env = "EDU_API_TOKEN",
        hide_env_values = true,
    )]
    pub edu_api_token: Option<String>,
    #[clap(long, value_name = "EDU_LOCALE", env = "EDU_LOCALE", default_value = DEFAULT_LOCALE)]
    pub edu_locale: String,
    #[clap(
        long,
        value_name = "EDU_PLACEHOLDER_COUNT",
        env = "EDU_PLACEHOLDER_COUNT",
        default_value_t = DEFAULT_PLACEHOLDERS,
    )]
    pub edu_placeholder_count: usize,
    #[clap(
        long,
        value_name = "EDU_REQUEST_TIMEOUT_SECS",
        env = "EDU_REQUEST_TIMEOUT_SECS",
        default_value_t = 30,
    )]
    pub edu_request_timeout_secs: u64,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            edu_api_base_url: "http://localhost:8000".to_string(),
            edu_api_token: None,
            edu_locale: DEFAULT_LOCALE.to_string(),
            edu_placeholder_count: DEFAULT_PLACEHOLDERS,
            edu_request_timeout_secs: 30,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edu_api_base_url(mut self, value: String) -> Self {
        self.edu_api_base_url = value;
        self
    }

    pub fn edu_api_token(mut self, value: Option<String>) -> Self {
        self.edu_api_token = value;
        self
    }

    pub fn edu_locale(mut self, value: String) -> Self {
        self.edu_locale = value;
        self
    }

    pub fn edu_placeholder_count(mut self, value: usize) -> Self {
        self.edu_placeholder_count = value;
        self
    }

    pub fn edu_request_timeout_secs(mut self, value: u64) -> Self {
        self.edu_request_timeout_secs = value;
        self
    }

    pub fn session(&self) -> Session {
        Session::from_token(self.edu_api_token.clone())
    }

    pub fn client(&self) -> Result<HttpClient, FetchError> {
        HttpClient::with_timeout(
            self.edu_api_base_url.clone(),
            self.session(),
            Duration::from_secs(self.edu_request_timeout_secs),
        )
    }

    pub fn presenter(&self, client: &HttpClient) -> Presenter {
        Presenter::new(CardContext::new(client.storage_url()))
            .placeholders(self.edu_placeholder_count)
    }
}
