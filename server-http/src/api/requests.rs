use serde::Deserialize;

/// Query string of `GET /coordinates`
#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub address: Option<String>,
}

impl CoordinatesQuery {
    /// The address if present and not blank
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
    }
}
