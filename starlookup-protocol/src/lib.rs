pub mod model;

use serde::{
    Deserialize,
    Serialize,
};

/// Path templates advertised by the services list.
pub const SERVICES: &[&str] = &["star/{id}"];

/// Document served at `/` and for any path the server doesn't recognize.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServicesList {
    pub services: Vec<String>,
}

impl Default for ServicesList {
    fn default() -> Self {
        Self {
            services: SERVICES.iter().map(|service| service.to_string()).collect(),
        }
    }
}

impl ServicesList {
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}
