//! Common customer domain types used across CDP

use serde::{Deserialize, Serialize};

/// Categorical risk level assigned to a customer during enrichment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = crate::CdpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(crate::CdpError::Parse(format!("invalid risk level: {}", s))),
        }
    }
}

/// Customer lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    Active,
    Suspended,
    Inactive,
    Closed,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
            Self::Inactive => "inactive",
            Self::Closed => "closed",
        }
    }
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = crate::CdpError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            "inactive" => Ok(Self::Inactive),
            "closed" => Ok(Self::Closed),
            _ => Err(crate::CdpError::Parse(format!("invalid customer status: {}", s))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_as_str() {
        assert_eq!(RiskLevel::Low.as_str(), "Low");
        assert_eq!(RiskLevel::Medium.as_str(), "Medium");
        assert_eq!(RiskLevel::High.as_str(), "High");
    }

    #[test]
    fn test_risk_level_from_str() {
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
        assert_eq!("High".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!("extreme".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_customer_status_as_str() {
        assert_eq!(CustomerStatus::Active.as_str(), "active");
        assert_eq!(CustomerStatus::Suspended.as_str(), "suspended");
    }

    #[test]
    fn test_customer_status_serialization() {
        let json = serde_json::to_string(&CustomerStatus::Active).unwrap();
        assert_eq!(json, r#""active""#);

        let status: CustomerStatus = serde_json::from_str(r#""suspended""#).unwrap();
        assert_eq!(status, CustomerStatus::Suspended);
    }

    #[test]
    fn test_risk_level_serialization() {
        let json = serde_json::to_string(&RiskLevel::Medium).unwrap();
        assert_eq!(json, r#""Medium""#);

        let level: RiskLevel = serde_json::from_str(r#""High""#).unwrap();
        assert_eq!(level, RiskLevel::High);
    }
}
