//! Server configuration.

use serde::{Deserialize, Serialize};

use revdcf_core::solver::DEFAULT_GROWTH_BOUNDS;
use revdcf_core::{GrowthRateSolver, SolverConfig, ValuationResult};
use revdcf_math::solvers::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};

use crate::error::ServerError;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL used in share links (defaults to the request's `Host`)
    pub public_url: Option<String>,

    /// Growth-rate solver settings
    #[serde(default)]
    pub solver: SolverSettings,
}

/// Growth-rate solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings {
    /// Interval width at which bisection stops
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,

    /// Iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Lowest growth rate searched
    #[serde(default = "default_lower_bound")]
    pub lower_bound: f64,

    /// Highest growth rate searched
    #[serde(default = "default_upper_bound")]
    pub upper_bound: f64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

fn default_max_iterations() -> u32 {
    DEFAULT_MAX_ITERATIONS
}

fn default_lower_bound() -> f64 {
    DEFAULT_GROWTH_BOUNDS.0
}

fn default_upper_bound() -> f64 {
    DEFAULT_GROWTH_BOUNDS.1
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            solver: SolverSettings::default(),
        }
    }
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            lower_bound: default_lower_bound(),
            upper_bound: default_upper_bound(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ServerError> {
        Ok(toml::from_str(content)?)
    }

    /// Configured base URL for share links, without a trailing slash.
    pub fn public_base_url(&self) -> Option<String> {
        self.public_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
    }

    /// URL of the bind address.
    pub fn bind_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl SolverSettings {
    /// Builds the growth-rate solver these settings describe.
    pub fn build(&self) -> ValuationResult<GrowthRateSolver> {
        let config = SolverConfig::new(self.tolerance, self.max_iterations);
        config.validate()?;
        GrowthRateSolver::new()
            .with_config(config)
            .with_bounds(self.lower_bound, self.upper_bound)
    }
}
