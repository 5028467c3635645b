//! Static location risk tables and the risk-context stage built on them.

use serde::{Deserialize, Serialize};

use super::currency::whole_dollars;
use super::domain::{CustomerProfile, RiskLevel};

const UNKNOWN_REGION: &str = "Unknown";
const DEFAULT_FLOOD_ZONE: &str = "X";
const DEFAULT_EARTHQUAKE_ZONE: &str = "Stable";
pub const DEFAULT_CRIME_SCORE: u8 = 5;

const HIGH_CRIME_THRESHOLD: u8 = 7;
const HIGH_NET_WORTH_THRESHOLD: u64 = 1_000_000;
const HIGH_VALUE_HOME_THRESHOLD: u64 = 500_000;

/// Hazard attributes for one peril at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRisk {
    pub zone: String,
    pub risk: RiskLevel,
    pub region: String,
}

/// Everything the rule set knows about a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskData {
    pub zip_code: String,
    pub flood: HazardRisk,
    pub earthquake: HazardRisk,
    pub crime_score: u8,
}

struct HazardEntry {
    zip: &'static str,
    zone: &'static str,
    risk: RiskLevel,
    region: &'static str,
}

impl HazardEntry {
    fn to_risk(&self) -> HazardRisk {
        HazardRisk {
            zone: self.zone.to_string(),
            risk: self.risk,
            region: self.region.to_string(),
        }
    }
}

const fn entry(
    zip: &'static str,
    zone: &'static str,
    risk: RiskLevel,
    region: &'static str,
) -> HazardEntry {
    HazardEntry {
        zip,
        zone,
        risk,
        region,
    }
}

// FEMA-style flood zones.
const FLOOD_ZONES: &[HazardEntry] = &[
    entry("33139", "AE", RiskLevel::High, "Miami, FL"),
    entry("70112", "AE", RiskLevel::High, "New Orleans, LA"),
    entry("10002", "A", RiskLevel::High, "New York, NY"),
    entry("94102", "X (protected)", RiskLevel::Medium, "San Francisco, CA"),
    entry("77002", "X (500-year)", RiskLevel::Medium, "Houston, TX"),
    entry("02108", "X (protected)", RiskLevel::Medium, "Boston, MA"),
    entry("85001", "X", RiskLevel::Low, "Phoenix, AZ"),
    entry("80202", "X", RiskLevel::Low, "Denver, CO"),
    entry("60601", "X", RiskLevel::Low, "Chicago, IL"),
    entry("30303", "X", RiskLevel::Low, "Atlanta, GA"),
];

const EARTHQUAKE_ZONES: &[HazardEntry] = &[
    entry("94102", "Alquist-Priolo", RiskLevel::VeryHigh, "San Francisco, CA"),
    entry("90001", "Alquist-Priolo", RiskLevel::VeryHigh, "Los Angeles, CA"),
    entry("98101", "Cascadia", RiskLevel::High, "Seattle, WA"),
    entry("97201", "Cascadia", RiskLevel::High, "Portland, OR"),
    entry("84101", "Wasatch", RiskLevel::Medium, "Salt Lake City, UT"),
    entry("89101", "Basin and Range", RiskLevel::Medium, "Las Vegas, NV"),
    entry("33139", "Stable", RiskLevel::Low, "Miami, FL"),
    entry("60601", "Stable", RiskLevel::Low, "Chicago, IL"),
    entry("10002", "Stable", RiskLevel::Low, "New York, NY"),
];

// 1 (lowest) to 10 (highest).
const CRIME_SCORES: &[(&str, u8)] = &[
    ("10002", 7),
    ("90001", 8),
    ("60601", 6),
    ("33139", 5),
    ("94102", 7),
    ("85001", 6),
    ("30303", 7),
    ("02108", 4),
    ("98101", 5),
    ("80202", 5),
];

pub fn flood_risk(zip_code: &str) -> HazardRisk {
    find_hazard(FLOOD_ZONES, zip_code).unwrap_or_else(|| HazardRisk {
        zone: DEFAULT_FLOOD_ZONE.to_string(),
        risk: RiskLevel::Low,
        region: UNKNOWN_REGION.to_string(),
    })
}

pub fn earthquake_risk(zip_code: &str) -> HazardRisk {
    find_hazard(EARTHQUAKE_ZONES, zip_code).unwrap_or_else(|| HazardRisk {
        zone: DEFAULT_EARTHQUAKE_ZONE.to_string(),
        risk: RiskLevel::Low,
        region: UNKNOWN_REGION.to_string(),
    })
}

pub fn crime_score(zip_code: &str) -> u8 {
    CRIME_SCORES
        .iter()
        .find(|(zip, _)| *zip == zip_code)
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_CRIME_SCORE)
}

/// Total lookup: unknown locations resolve to the low-risk defaults.
pub fn lookup(zip_code: &str) -> RiskData {
    RiskData {
        zip_code: zip_code.to_string(),
        flood: flood_risk(zip_code),
        earthquake: earthquake_risk(zip_code),
        crime_score: crime_score(zip_code),
    }
}

fn find_hazard(table: &[HazardEntry], zip_code: &str) -> Option<HazardRisk> {
    table
        .iter()
        .find(|entry| entry.zip == zip_code)
        .map(HazardEntry::to_risk)
}

/// Location data plus the customer-facing risk factors derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub location: RiskData,
    pub risk_factors: Vec<String>,
}

impl RiskProfile {
    pub fn assess(customer: &CustomerProfile) -> Self {
        let location = lookup(&customer.zip_code);
        let risk_factors = risk_factors(customer, &location);
        Self {
            location,
            risk_factors,
        }
    }
}

/// Location hazards first, then asset and lifestyle exposures.
pub fn risk_factors(customer: &CustomerProfile, location: &RiskData) -> Vec<String> {
    let mut factors = Vec::new();

    if matches!(location.flood.risk, RiskLevel::Medium | RiskLevel::High) {
        factors.push(format!(
            "{} flood risk - Zone {}",
            location.flood.risk, location.flood.zone
        ));
    }

    if location.earthquake.risk >= RiskLevel::Medium {
        factors.push(format!(
            "{} earthquake risk - {} zone",
            location.earthquake.risk, location.earthquake.zone
        ));
    }

    if location.crime_score >= HIGH_CRIME_THRESHOLD {
        factors.push(format!(
            "High crime area (score: {}/10)",
            location.crime_score
        ));
    }

    if let Some(net_worth) = customer.net_worth.filter(|value| *value > HIGH_NET_WORTH_THRESHOLD)
    {
        factors.push(format!(
            "High net worth ({}) - liability exposure",
            whole_dollars(net_worth)
        ));
    }

    if let Some(home_value) = customer
        .home_value
        .filter(|value| *value > HIGH_VALUE_HOME_THRESHOLD)
    {
        factors.push(format!("High-value property ({})", whole_dollars(home_value)));
    }

    if let Some(count) = customer.additional_properties.filter(|count| *count > 0) {
        factors.push(format!("Owns {count} additional properties"));
    }

    if customer.has_watercraft {
        factors.push("Owns watercraft - specialized coverage needed".to_string());
    }

    if customer.has_high_value_items {
        factors.push("Owns high-value items - enhanced coverage recommended".to_string());
    }

    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(zip: &str) -> CustomerProfile {
        CustomerProfile {
            name: "Morgan Lee".to_string(),
            zip_code: zip.to_string(),
            net_worth: None,
            home_value: None,
            additional_properties: None,
            has_watercraft: false,
            has_high_value_items: false,
        }
    }

    #[test]
    fn unknown_locations_resolve_to_defaults() {
        for zip in ["00000", "", "not-a-zip", "33139 "] {
            let data = lookup(zip);
            assert_eq!(data.flood.zone, "X");
            assert_eq!(data.flood.risk, RiskLevel::Low);
            assert_eq!(data.flood.region, "Unknown");
            assert_eq!(data.earthquake.zone, "Stable");
            assert_eq!(data.earthquake.risk, RiskLevel::Low);
            assert_eq!(data.crime_score, 5);
        }
    }

    #[test]
    fn known_locations_resolve_each_table_independently() {
        let sf = lookup("94102");
        assert_eq!(sf.flood.risk, RiskLevel::Medium);
        assert_eq!(sf.earthquake.risk, RiskLevel::VeryHigh);
        assert_eq!(sf.earthquake.zone, "Alquist-Priolo");
        assert_eq!(sf.crime_score, 7);

        let new_orleans = lookup("70112");
        assert_eq!(new_orleans.flood.zone, "AE");
        assert_eq!(new_orleans.earthquake.risk, RiskLevel::Low);
        assert_eq!(new_orleans.crime_score, DEFAULT_CRIME_SCORE);
    }

    #[test]
    fn risk_factors_cover_location_and_assets() {
        let mut profile = customer("94102");
        profile.net_worth = Some(2_500_000);
        profile.home_value = Some(1_200_000);
        profile.additional_properties = Some(2);
        profile.has_watercraft = true;
        profile.has_high_value_items = true;

        let assessed = RiskProfile::assess(&profile);

        assert_eq!(
            assessed.risk_factors,
            vec![
                "Medium flood risk - Zone X (protected)".to_string(),
                "Very High earthquake risk - Alquist-Priolo zone".to_string(),
                "High crime area (score: 7/10)".to_string(),
                "High net worth ($2,500,000) - liability exposure".to_string(),
                "High-value property ($1,200,000)".to_string(),
                "Owns 2 additional properties".to_string(),
                "Owns watercraft - specialized coverage needed".to_string(),
                "Owns high-value items - enhanced coverage recommended".to_string(),
            ]
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let mut profile = customer("60601");
        profile.net_worth = Some(1_000_000);
        profile.home_value = Some(500_000);
        profile.additional_properties = Some(0);

        let assessed = RiskProfile::assess(&profile);

        assert!(assessed.risk_factors.is_empty());
    }
}
