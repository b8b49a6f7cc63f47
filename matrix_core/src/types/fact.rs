//! Availability facts and their natural key

use super::ids::{Language, Region, Service};
use super::status::{Hosting, ServiceStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by the textual lookup key `Region|Service|Language`
pub const LOOKUP_KEY_SEPARATOR: char = '|';

/// Natural key of a fact: at most one fact exists per triple
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FactKey {
    pub region: Region,
    pub service: Service,
    pub language: Language,
}

impl FactKey {
    pub fn new(
        region: impl Into<Region>,
        service: impl Into<Service>,
        language: impl Into<Language>,
    ) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            language: language.into(),
        }
    }

    /// Render as `Region|Service|Language`
    pub fn lookup_key(&self) -> String {
        format!(
            "{}{sep}{}{sep}{}",
            self.region,
            self.service,
            self.language,
            sep = LOOKUP_KEY_SEPARATOR
        )
    }

    /// Parse a `Region|Service|Language` key. Returns `None` unless exactly
    /// three non-empty parts are present.
    pub fn parse_lookup_key(key: &str) -> Option<Self> {
        let mut parts = key.split(LOOKUP_KEY_SEPARATOR).map(str::trim);
        let region = parts.next().filter(|p| !p.is_empty())?;
        let service = parts.next().filter(|p| !p.is_empty())?;
        let language = parts.next().filter(|p| !p.is_empty())?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(region, service, language))
    }
}

impl fmt::Display for FactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lookup_key())
    }
}

/// One observed availability state for a service in a region and language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityFact {
    pub region: Region,
    pub service: Service,
    pub language: Language,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting: Option<Hosting>,
}

impl AvailabilityFact {
    pub fn new(
        region: impl Into<Region>,
        service: impl Into<Service>,
        language: impl Into<Language>,
        status: ServiceStatus,
    ) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            language: language.into(),
            status,
            hosting: None,
        }
    }

    pub fn with_hosting(mut self, hosting: Hosting) -> Self {
        self.hosting = Some(hosting);
        self
    }

    pub fn key(&self) -> FactKey {
        FactKey {
            region: self.region.clone(),
            service: self.service.clone(),
            language: self.language.clone(),
        }
    }
}
