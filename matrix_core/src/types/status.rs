//! Service and product status domains
//!
//! Service statuses are a fixed tri-level domain observed under two
//! vocabularies. Product statuses are policy-defined: each policy owns an enum
//! implementing [`StatusDomain`], and results are stored type-erased as
//! [`ProductStatus`].

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// SERVICE STATUS
// ============================================================================

/// Availability of one service in one region for one language.
///
/// Ordered by severity: `NotSupported < Limited < Full`, so the worst of a set
/// is its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceStatus {
    #[serde(rename = "Not Supported")]
    NotSupported,
    #[serde(rename = "Limited Support", alias = "Limited Availability")]
    Limited,
    #[serde(rename = "Full Support", alias = "General Availability")]
    Full,
}

/// Wording used when presenting service statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    /// Full Support / Limited Support / Not Supported
    #[default]
    Support,
    /// General Availability / Limited Availability / Not Supported
    Availability,
}

impl ServiceStatus {
    pub const ALL: [ServiceStatus; 3] = [
        ServiceStatus::Full,
        ServiceStatus::Limited,
        ServiceStatus::NotSupported,
    ];

    pub fn label(&self, vocabulary: Vocabulary) -> &'static str {
        match (self, vocabulary) {
            (ServiceStatus::Full, Vocabulary::Support) => "Full Support",
            (ServiceStatus::Full, Vocabulary::Availability) => "General Availability",
            (ServiceStatus::Limited, Vocabulary::Support) => "Limited Support",
            (ServiceStatus::Limited, Vocabulary::Availability) => "Limited Availability",
            (ServiceStatus::NotSupported, _) => "Not Supported",
        }
    }

    pub fn tier(&self) -> Tier {
        match self {
            ServiceStatus::Full => Tier::Full,
            ServiceStatus::Limited => Tier::Limited,
            ServiceStatus::NotSupported => Tier::NotSupported,
        }
    }

    /// One step worse, saturating at `NotSupported`
    pub fn downgraded(&self) -> ServiceStatus {
        match self {
            ServiceStatus::Full => ServiceStatus::Limited,
            _ => ServiceStatus::NotSupported,
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Vocabulary::Support))
    }
}

impl FromStr for ServiceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "full support" | "general availability" | "full" | "ga" => Ok(ServiceStatus::Full),
            "limited support" | "limited availability" | "limited" | "la" => {
                Ok(ServiceStatus::Limited)
            }
            "not supported" | "unsupported" | "none" => Ok(ServiceStatus::NotSupported),
            other => Err(format!("unrecognized service status '{}'", other)),
        }
    }
}

// ============================================================================
// HOSTING
// ============================================================================

/// Where a service is served from, relative to the requested region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hosting {
    #[serde(rename = "In-Region", alias = "in-region", alias = "in_region")]
    InRegion,
    #[serde(rename = "Cross-Region", alias = "cross-region", alias = "cross_region")]
    CrossRegion,
    #[serde(rename = "N/A", alias = "not-applicable", alias = "not_applicable")]
    NotApplicable,
}

impl Hosting {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hosting::InRegion => "In-Region",
            Hosting::CrossRegion => "Cross-Region",
            Hosting::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for Hosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Hosting {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "in-region" => Ok(Hosting::InRegion),
            "cross-region" => Ok(Hosting::CrossRegion),
            "n/a" | "not-applicable" | "na" => Ok(Hosting::NotApplicable),
            other => Err(format!("unrecognized hosting '{}'", other)),
        }
    }
}

// ============================================================================
// PRODUCT STATUS DOMAINS
// ============================================================================

/// Coarse availability tier shared by every status domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    NotSupported,
    Limited,
    Full,
}

/// Whether a composite status relies on routing to another region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locality {
    InRegion,
    CrossRegion,
}

/// A policy-owned product status enumeration
pub trait StatusDomain: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every value of the domain, best first
    const ALL: &'static [Self];

    fn label(&self) -> &'static str;

    fn tier(&self) -> Tier;

    fn locality(&self) -> Option<Locality> {
        None
    }

    fn to_product_status(&self) -> ProductStatus {
        ProductStatus {
            label: self.label(),
            tier: self.tier(),
            locality: self.locality(),
        }
    }
}

/// Type-erased composite status as stored in result tables.
///
/// Serializes as its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductStatus {
    pub label: &'static str,
    pub tier: Tier,
    pub locality: Option<Locality>,
}

impl ProductStatus {
    pub fn is_cross_region(&self) -> bool {
        self.locality == Some(Locality::CrossRegion)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label)
    }
}

impl Serialize for ProductStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(ServiceStatus::NotSupported < ServiceStatus::Limited);
        assert!(ServiceStatus::Limited < ServiceStatus::Full);
        assert_eq!(
            [ServiceStatus::Full, ServiceStatus::NotSupported, ServiceStatus::Limited]
                .iter()
                .min(),
            Some(&ServiceStatus::NotSupported)
        );
    }

    #[test]
    fn test_both_vocabularies_deserialize() {
        let ga: ServiceStatus = serde_json::from_str("\"General Availability\"").unwrap();
        let full: ServiceStatus = serde_json::from_str("\"Full Support\"").unwrap();
        let la: ServiceStatus = serde_json::from_str("\"Limited Availability\"").unwrap();
        assert_eq!(ga, ServiceStatus::Full);
        assert_eq!(full, ServiceStatus::Full);
        assert_eq!(la, ServiceStatus::Limited);
        assert_eq!(ga.label(Vocabulary::Availability), "General Availability");
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("GA".parse::<ServiceStatus>(), Ok(ServiceStatus::Full));
        assert_eq!(
            " not supported ".parse::<ServiceStatus>(),
            Ok(ServiceStatus::NotSupported)
        );
        assert!("maybe".parse::<ServiceStatus>().is_err());
    }

    #[test]
    fn test_downgrade_saturates() {
        assert_eq!(ServiceStatus::Full.downgraded(), ServiceStatus::Limited);
        assert_eq!(ServiceStatus::Limited.downgraded(), ServiceStatus::NotSupported);
        assert_eq!(
            ServiceStatus::NotSupported.downgraded(),
            ServiceStatus::NotSupported
        );
    }

    #[test]
    fn test_hosting_parsing() {
        assert_eq!("cross_region".parse::<Hosting>(), Ok(Hosting::CrossRegion));
        assert_eq!("In-Region".parse::<Hosting>(), Ok(Hosting::InRegion));
        assert_eq!("N/A".parse::<Hosting>(), Ok(Hosting::NotApplicable));
    }

    #[test]
    fn test_product_status_serializes_as_label() {
        let status = ProductStatus {
            label: "Full Support (Cross-Region)",
            tier: Tier::Full,
            locality: Some(Locality::CrossRegion),
        };
        assert!(status.is_cross_region());
        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            "\"Full Support (Cross-Region)\""
        );
    }
}
