use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLocation {
    pub city: String,
    /// State or province.
    pub region: String,
    pub country_name: String,
    pub country_code: String,
}

impl UserLocation {
    pub fn display_name(&self) -> String {
        [&self.city, &self.region, &self.country_name]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
