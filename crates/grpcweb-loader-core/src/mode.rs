//! Generation modes

use crate::LoaderError;
use serde::{Deserialize, Serialize};

/// What the compiler is asked to generate for a schema file
///
/// `Message` is the leaf artifact. `Service` depends on the `Message` artifact
/// of the same schema file and references it through a
/// [`DependencyReference`](crate::DependencyReference).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Binary-compatible message codec module
    #[default]
    #[serde(alias = "message", alias = "proto")]
    Message,
    /// Network service stub module
    #[serde(alias = "service", alias = "grpcService")]
    Service,
}

impl GenerationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMode::Message => "Message",
            GenerationMode::Service => "Service",
        }
    }
}

impl std::str::FromStr for GenerationMode {
    type Err = LoaderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "message" | "proto" => Ok(GenerationMode::Message),
            "service" | "grpcservice" => Ok(GenerationMode::Service),
            other => Err(LoaderError::InvalidOptions(format!(
                "unknown generation mode: {other} (expected message or service)"
            ))),
        }
    }
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
