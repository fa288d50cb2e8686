//! Constant tax rate tables.
//!
//! Everything here is an exact `Decimal` built at compile time. Nothing in this module is
//! mutated at run time, so the tables can be read from any number of threads.

use crate::model::Jurisdiction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// `units` scaled down by `scale` decimal places, usable in constants.
const fn fixed(units: u32, scale: u32) -> Decimal {
    Decimal::from_parts(units, 0, 0, false, scale)
}

/// The GST rate, and the rate used for any jurisdiction that is not recognized.
pub const DEFAULT_RATE: Decimal = fixed(5, 2);

/// The Quebec Sales Tax rate.
pub const QST_RATE: Decimal = fixed(9975, 5);

const HST_13: Decimal = fixed(13, 2);
const HST_15: Decimal = fixed(15, 2);

/// The sales tax rate(s) embedded in a tax-inclusive amount.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TaxRate {
    /// A single GST or HST rate.
    Single { rate: Decimal },
    /// GST followed by a second tax charged on the GST-inclusive base (Quebec).
    Compound { gst: Decimal, qst: Decimal },
}

impl TaxRate {
    /// The GST/HST part of the rate.
    pub fn primary(&self) -> Decimal {
        match self {
            TaxRate::Single { rate } => *rate,
            TaxRate::Compound { gst, .. } => *gst,
        }
    }
}

/// Returns the GST/HST rate for `jurisdiction`, 5% when it is not recognized.
pub fn rate_for(jurisdiction: &Jurisdiction) -> Decimal {
    match jurisdiction {
        Jurisdiction::Ontario => HST_13,
        Jurisdiction::NewBrunswick
        | Jurisdiction::NewfoundlandAndLabrador
        | Jurisdiction::NovaScotia
        | Jurisdiction::PrinceEdwardIsland => HST_15,
        Jurisdiction::Alberta
        | Jurisdiction::BritishColumbia
        | Jurisdiction::Manitoba
        | Jurisdiction::Quebec
        | Jurisdiction::Saskatchewan
        | Jurisdiction::NorthwestTerritories
        | Jurisdiction::Nunavut
        | Jurisdiction::Yukon => DEFAULT_RATE,
        Jurisdiction::Unrecognized(name) => {
            tracing::debug!("Unrecognized jurisdiction '{name}', using the default GST rate");
            DEFAULT_RATE
        }
    }
}

/// True only for the jurisdiction that stacks a second sales tax on top of GST.
pub fn is_compound_jurisdiction(jurisdiction: &Jurisdiction) -> bool {
    matches!(jurisdiction, Jurisdiction::Quebec)
}

/// The full sales tax rate for `jurisdiction`.
pub fn tax_rate(jurisdiction: &Jurisdiction) -> TaxRate {
    if is_compound_jurisdiction(jurisdiction) {
        TaxRate::Compound {
            gst: rate_for(jurisdiction),
            qst: QST_RATE,
        }
    } else {
        TaxRate::Single {
            rate: rate_for(jurisdiction),
        }
    }
}

/// The column label for sales tax in reports: `GST/QST` in Quebec, `GST/HST` elsewhere.
pub fn sales_tax_label(jurisdiction: &Jurisdiction) -> &'static str {
    if is_compound_jurisdiction(jurisdiction) {
        "GST/QST"
    } else {
        "GST/HST"
    }
}

/// One band of a graduated income tax schedule.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// The top of the band, `None` for the last band.
    pub upper_bound: Option<Decimal>,
    pub marginal_rate: Decimal,
}

/// Federal income tax brackets, ordered from lowest to highest.
pub const FEDERAL_BRACKETS: [TaxBracket; 5] = [
    TaxBracket {
        upper_bound: Some(fixed(55_867, 0)),
        marginal_rate: fixed(15, 2),
    },
    TaxBracket {
        upper_bound: Some(fixed(111_733, 0)),
        marginal_rate: fixed(205, 3),
    },
    TaxBracket {
        upper_bound: Some(fixed(173_205, 0)),
        marginal_rate: fixed(26, 2),
    },
    TaxBracket {
        upper_bound: Some(fixed(246_752, 0)),
        marginal_rate: fixed(29, 2),
    },
    TaxBracket {
        upper_bound: None,
        marginal_rate: fixed(33, 2),
    },
];

/// A flat approximation of provincial income tax: the lowest provincial bracket rate.
pub fn provincial_rate(jurisdiction: &Jurisdiction) -> Decimal {
    match jurisdiction {
        Jurisdiction::Alberta => fixed(10, 2),
        Jurisdiction::BritishColumbia => fixed(506, 4),
        Jurisdiction::Manitoba => fixed(108, 3),
        Jurisdiction::NewBrunswick => fixed(94, 3),
        Jurisdiction::NewfoundlandAndLabrador => fixed(87, 3),
        Jurisdiction::NovaScotia => fixed(879, 4),
        Jurisdiction::Ontario => fixed(505, 4),
        Jurisdiction::PrinceEdwardIsland => fixed(965, 4),
        Jurisdiction::Quebec => fixed(14, 2),
        Jurisdiction::Saskatchewan => fixed(105, 3),
        Jurisdiction::NorthwestTerritories => fixed(59, 3),
        Jurisdiction::Nunavut => fixed(4, 2),
        Jurisdiction::Yukon => fixed(64, 3),
        Jurisdiction::Unrecognized(_) => fixed(10, 2),
    }
}

/// CPP contribution rate for the self-employed (employee and employer portions).
pub const CPP_SELF_EMPLOYED_RATE: Decimal = fixed(119, 3);

/// Earnings below this amount are exempt from CPP contributions.
pub const CPP_BASIC_EXEMPTION: Decimal = fixed(3_500, 0);

/// Year's maximum pensionable earnings.
pub const CPP_MAX_PENSIONABLE_EARNINGS: Decimal = fixed(68_500, 0);

/// Capital cost allowance classes for the assets a small business typically buys.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum CcaClass {
    /// Furniture, fixtures and general equipment.
    #[serde(rename = "8")]
    Class8,
    /// Motor vehicles.
    #[serde(rename = "10")]
    Class10,
    /// Software and small tools.
    #[serde(rename = "12")]
    Class12,
    /// Goodwill and other intangibles.
    #[serde(rename = "14.1")]
    Class14_1,
    /// Data network infrastructure.
    #[serde(rename = "46")]
    Class46,
    /// Computers and systems software.
    #[serde(rename = "50")]
    Class50,
    /// Manufacturing and processing machinery.
    #[serde(rename = "53")]
    Class53,
}

serde_plain::derive_display_from_serialize!(CcaClass);
serde_plain::derive_fromstr_from_deserialize!(CcaClass);

impl CcaClass {
    /// The declining-balance depreciation rate for the class.
    pub fn rate(&self) -> Decimal {
        match self {
            CcaClass::Class8 => fixed(20, 2),
            CcaClass::Class10 => fixed(30, 2),
            CcaClass::Class12 => Decimal::ONE,
            CcaClass::Class14_1 => fixed(5, 2),
            CcaClass::Class46 => fixed(30, 2),
            CcaClass::Class50 => fixed(55, 2),
            CcaClass::Class53 => fixed(50, 2),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CcaClass::Class8 => "Furniture, fixtures and equipment",
            CcaClass::Class10 => "Motor vehicles",
            CcaClass::Class12 => "Software and small tools",
            CcaClass::Class14_1 => "Goodwill and intangible property",
            CcaClass::Class46 => "Data network infrastructure equipment",
            CcaClass::Class50 => "Computer equipment and systems software",
            CcaClass::Class53 => "Manufacturing and processing machinery",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    #[test]
    fn test_hst_provinces() {
        assert_eq!(rate_for(&Jurisdiction::Ontario), dec!(0.13));
        assert_eq!(rate_for(&Jurisdiction::NovaScotia), dec!(0.15));
        assert_eq!(rate_for(&Jurisdiction::Alberta), dec!(0.05));
    }

    #[test]
    fn test_unrecognized_defaults_to_five_percent() {
        let mars = Jurisdiction::parse("Mars");
        assert_eq!(rate_for(&mars), dec!(0.05));
        assert_eq!(tax_rate(&mars), TaxRate::Single { rate: dec!(0.05) });
    }

    #[test]
    fn test_only_quebec_is_compound() {
        for jurisdiction in Jurisdiction::KNOWN {
            assert_eq!(
                is_compound_jurisdiction(&jurisdiction),
                jurisdiction == Jurisdiction::Quebec
            );
        }
        assert_eq!(
            tax_rate(&Jurisdiction::Quebec),
            TaxRate::Compound {
                gst: dec!(0.05),
                qst: dec!(0.09975)
            }
        );
    }

    #[test]
    fn test_sales_tax_label() {
        assert_eq!(sales_tax_label(&Jurisdiction::Quebec), "GST/QST");
        assert_eq!(sales_tax_label(&Jurisdiction::Ontario), "GST/HST");
    }

    #[test]
    fn test_constant_rates_are_exact() {
        assert_eq!(DEFAULT_RATE, dec!(0.05));
        assert_eq!(QST_RATE, dec!(0.09975));
        assert_eq!(QST_RATE.scale(), 5);
        assert_eq!(HST_13, dec!(0.13));
        assert_eq!(HST_15, dec!(0.15));
        assert_eq!(CPP_SELF_EMPLOYED_RATE, dec!(0.119));
        assert_eq!(CPP_BASIC_EXEMPTION, dec!(3500));
        assert_eq!(CPP_MAX_PENSIONABLE_EARNINGS, dec!(68500));
        assert_eq!(FEDERAL_BRACKETS[0].upper_bound, Some(dec!(55867)));
        assert_eq!(FEDERAL_BRACKETS[1].marginal_rate, dec!(0.205));
        assert_eq!(provincial_rate(&Jurisdiction::Ontario), dec!(0.0505));
    }

    #[test]
    fn test_federal_brackets_are_ordered() {
        let bounds: Vec<Decimal> = FEDERAL_BRACKETS
            .iter()
            .filter_map(|b| b.upper_bound)
            .collect();
        assert_eq!(bounds.len(), FEDERAL_BRACKETS.len() - 1);
        assert!(bounds.windows(2).all(|w| w[0] < w[1]));
        assert!(FEDERAL_BRACKETS.last().unwrap().upper_bound.is_none());
    }

    #[test]
    fn test_cca_class_parse_and_rate() {
        assert_eq!(CcaClass::from_str("14.1").unwrap(), CcaClass::Class14_1);
        assert_eq!(CcaClass::from_str("50").unwrap().rate(), dec!(0.55));
        assert_eq!(CcaClass::Class12.to_string(), "12");
        assert!(CcaClass::from_str("99").is_err());
    }
}
