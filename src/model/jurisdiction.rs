use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A Canadian province or territory, or a name that could not be matched to one.
///
/// Parsing never fails. An unmatched name is kept as `Unrecognized` so that it can be reported,
/// and the rate table treats it with the default rate.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Jurisdiction {
    Alberta,
    BritishColumbia,
    Manitoba,
    NewBrunswick,
    NewfoundlandAndLabrador,
    NovaScotia,
    Ontario,
    PrinceEdwardIsland,
    Quebec,
    Saskatchewan,
    NorthwestTerritories,
    Nunavut,
    Yukon,
    Unrecognized(String),
}

impl Jurisdiction {
    /// All recognized jurisdictions.
    pub const KNOWN: [Jurisdiction; 13] = [
        Jurisdiction::Alberta,
        Jurisdiction::BritishColumbia,
        Jurisdiction::Manitoba,
        Jurisdiction::NewBrunswick,
        Jurisdiction::NewfoundlandAndLabrador,
        Jurisdiction::NovaScotia,
        Jurisdiction::Ontario,
        Jurisdiction::PrinceEdwardIsland,
        Jurisdiction::Quebec,
        Jurisdiction::Saskatchewan,
        Jurisdiction::NorthwestTerritories,
        Jurisdiction::Nunavut,
        Jurisdiction::Yukon,
    ];

    /// Matches a full name or a two-letter postal code, ignoring case and punctuation.
    pub fn parse(s: &str) -> Self {
        let key: String = s
            .chars()
            .map(|c| if matches!(c, 'é' | 'É') { 'e' } else { c })
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "ab" | "alberta" => Jurisdiction::Alberta,
            "bc" | "britishcolumbia" => Jurisdiction::BritishColumbia,
            "mb" | "manitoba" => Jurisdiction::Manitoba,
            "nb" | "newbrunswick" => Jurisdiction::NewBrunswick,
            "nl" | "newfoundland" | "newfoundlandandlabrador" => {
                Jurisdiction::NewfoundlandAndLabrador
            }
            "ns" | "novascotia" => Jurisdiction::NovaScotia,
            "on" | "ontario" => Jurisdiction::Ontario,
            "pe" | "pei" | "princeedwardisland" => Jurisdiction::PrinceEdwardIsland,
            "qc" | "quebec" => Jurisdiction::Quebec,
            "sk" | "saskatchewan" => Jurisdiction::Saskatchewan,
            "nt" | "northwestterritories" => Jurisdiction::NorthwestTerritories,
            "nu" | "nunavut" => Jurisdiction::Nunavut,
            "yt" | "yukon" => Jurisdiction::Yukon,
            _ => Jurisdiction::Unrecognized(s.trim().to_string()),
        }
    }

    /// The official name, or the original text for an unrecognized jurisdiction.
    pub fn name(&self) -> &str {
        match self {
            Jurisdiction::Alberta => "Alberta",
            Jurisdiction::BritishColumbia => "British Columbia",
            Jurisdiction::Manitoba => "Manitoba",
            Jurisdiction::NewBrunswick => "New Brunswick",
            Jurisdiction::NewfoundlandAndLabrador => "Newfoundland and Labrador",
            Jurisdiction::NovaScotia => "Nova Scotia",
            Jurisdiction::Ontario => "Ontario",
            Jurisdiction::PrinceEdwardIsland => "Prince Edward Island",
            Jurisdiction::Quebec => "Quebec",
            Jurisdiction::Saskatchewan => "Saskatchewan",
            Jurisdiction::NorthwestTerritories => "Northwest Territories",
            Jurisdiction::Nunavut => "Nunavut",
            Jurisdiction::Yukon => "Yukon",
            Jurisdiction::Unrecognized(name) => name,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Jurisdiction::Unrecognized(_))
    }
}

impl Default for Jurisdiction {
    fn default() -> Self {
        Jurisdiction::Ontario
    }
}

impl Display for Jurisdiction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Jurisdiction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Jurisdiction::parse(s))
    }
}

impl Serialize for Jurisdiction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Jurisdiction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Jurisdiction::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_codes() {
        assert_eq!(Jurisdiction::parse("Ontario"), Jurisdiction::Ontario);
        assert_eq!(Jurisdiction::parse("ON"), Jurisdiction::Ontario);
        assert_eq!(Jurisdiction::parse("Québec"), Jurisdiction::Quebec);
        assert_eq!(Jurisdiction::parse("quebec"), Jurisdiction::Quebec);
        assert_eq!(
            Jurisdiction::parse("british columbia"),
            Jurisdiction::BritishColumbia
        );
        assert_eq!(
            Jurisdiction::parse("Prince-Edward Island"),
            Jurisdiction::PrinceEdwardIsland
        );
    }

    #[test]
    fn test_unrecognized_keeps_name() {
        let mars = Jurisdiction::parse(" Mars ");
        assert!(!mars.is_recognized());
        assert_eq!(mars.name(), "Mars");
        assert_eq!(mars.to_string(), "Mars");
    }

    #[test]
    fn test_names_round_trip() {
        for jurisdiction in Jurisdiction::KNOWN {
            assert_eq!(Jurisdiction::parse(jurisdiction.name()), jurisdiction);
        }
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&Jurisdiction::NovaScotia).unwrap();
        assert_eq!(json, "\"Nova Scotia\"");
        let parsed: Jurisdiction = serde_json::from_str("\"NS\"").unwrap();
        assert_eq!(parsed, Jurisdiction::NovaScotia);
    }
}
