//! Dataset profiles: every roster, range and probability the generator
//! draws from, bundled so several datasets share one generator.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use rand::Rng;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::GenError;
use crate::format::{MoneyStyle, PercentStyle};
use crate::schema::SchemaKind;
use crate::status::{DateDerivation, LoopStatus, StatusRule, LISTING_TERM_DAYS};

pub const DEFAULT_BASE_ID: u64 = 300_000_000;
/// Upper bound on `lookahead_days` and `span_days`.
pub const MAX_WINDOW_DAYS: u32 = 36_525;

/// An inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: u32,
    pub max: u32,
}

impl IntRange {
    #[must_use]
    pub const fn new(min: u32, max: u32) -> Self {
        IntRange { min, max }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> u32 {
        rng.gen_range(self.min..=self.max)
    }

    fn check(self, what: &str) -> Result<(), GenError> {
        if self.min > self.max {
            return Err(GenError::InvalidProfile(format!(
                "{} range {}..={} is empty",
                what, self.min, self.max
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyType {
    pub name: String,
    /// List price range, in thousands.
    pub price_thousands: IntRange,
    /// Overrides [`PricingRules::markup_thousands`] for this type.
    #[serde(default)]
    pub markup_thousands: Option<IntRange>,
}

impl PropertyType {
    #[must_use]
    pub fn new(name: &str, min_thousands: u32, max_thousands: u32) -> Self {
        PropertyType {
            name: name.to_owned(),
            price_thousands: IntRange::new(min_thousands, max_thousands),
            markup_thousands: None,
        }
    }
}

/// The window listing dates are drawn from, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub lookahead_days: u32,
    pub span_days: u32,
    /// Listings stop this many days before the end of the window.
    pub closure_margin_days: u32,
}

impl Default for DateWindow {
    fn default() -> Self {
        DateWindow {
            lookahead_days: 90,
            span_days: 450,
            closure_margin_days: 60,
        }
    }
}

impl DateWindow {
    #[must_use]
    pub fn end(&self, today: NaiveDate) -> NaiveDate {
        shift(today, i64::from(self.lookahead_days))
    }

    #[must_use]
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        shift(self.end(today), -i64::from(self.span_days))
    }

    /// Latest date a listing may start on.
    #[must_use]
    pub fn last_listing(&self, today: NaiveDate) -> NaiveDate {
        shift(self.end(today), -i64::from(self.closure_margin_days))
    }

    pub fn sample_listing<R: Rng + ?Sized>(&self, rng: &mut R, today: NaiveDate) -> NaiveDate {
        let open_days = i64::from(self.span_days.saturating_sub(self.closure_margin_days));
        shift(self.start(today), rng.gen_range(0..=open_days))
    }

    /// Checks that the window around `today`, and every date derived from a
    /// listing inside it, stays within the calendar.
    ///
    /// # Errors
    /// Errors with [`GenError::InvalidProfile`] when a bound is not representable.
    pub fn check(&self, today: NaiveDate) -> Result<(), GenError> {
        let end = today.checked_add_signed(Duration::days(i64::from(self.lookahead_days)));
        let start = end.and_then(|end| {
            end.checked_sub_signed(Duration::days(i64::from(self.span_days)))
        });
        // derived dates never lie more than a listing term past the window end
        let horizon =
            end.and_then(|end| end.checked_add_signed(Duration::days(LISTING_TERM_DAYS)));
        match (start, horizon) {
            (Some(_), Some(_)) => Ok(()),
            _ => Err(GenError::InvalidProfile(format!(
                "date window around {} falls outside the calendar",
                today
            ))),
        }
    }
}

/// Moves `date` by `days`, clamping at the ends of the calendar.
fn shift(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingRules {
    /// Chance of pricing just under a round number (`499,900`).
    pub psychological_probability: f64,
    pub psychological_adjustment: u32,
    /// Chance that the original list price was higher than the current one.
    pub markup_probability: f64,
    pub markup_thousands: IntRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralRule {
    pub lead_source: String,
    pub rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRules {
    /// Commission rate paid on each side of the deal.
    pub rate: Decimal,
    pub double_ended_probability: f64,
    /// Share of the total commission retained by the office.
    #[serde(default)]
    pub company_dollar_split: Option<Decimal>,
    pub earnest_money_rate: Decimal,
    pub referral: ReferralRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ZipRule {
    Fixed { zip: String },
    /// `prefix` followed by a two digit suffix drawn from `suffix`.
    Prefixed { prefix: String, suffix: IntRange },
}

impl ZipRule {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            ZipRule::Fixed { zip } => zip.clone(),
            ZipRule::Prefixed { prefix, suffix } => {
                format!("{}{:02}", prefix, suffix.sample(rng))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRules {
    pub street_numbers: IntRange,
    pub street_names: Vec<String>,
    pub state: String,
    pub county: String,
    pub country: String,
    pub zip: ZipRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoaRule {
    pub property_type: String,
    pub dues: IntRange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetailRules {
    pub bathrooms: IntRange,
    pub bedrooms: IntRange,
    pub lot_size: IntRange,
    pub square_footage: IntRange,
    pub year_built: IntRange,
    pub mls_number: IntRange,
    #[serde(default)]
    pub hoa: Option<HoaRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagRule {
    pub label: String,
    /// Loops priced strictly above this amount get the tag.
    pub price_above: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Presentation {
    pub money: MoneyStyle,
    pub percent: PercentStyle,
    pub tag: TagRule,
    pub earnest_money_held_by: String,
    pub managing_broker: String,
    pub remarks: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub schema: SchemaKind,
    pub record_count: usize,
    #[serde(default = "default_base_id")]
    pub base_id: u64,
    pub output_path: PathBuf,
    pub agents: Vec<String>,
    pub lead_sources: Vec<String>,
    pub cities: Vec<String>,
    pub property_types: Vec<PropertyType>,
    pub statuses: Vec<StatusRule>,
    #[serde(default)]
    pub window: DateWindow,
    pub pricing: PricingRules,
    pub commission: CommissionRules,
    pub address: AddressRules,
    pub details: PropertyDetailRules,
    pub presentation: Presentation,
}

fn default_base_id() -> u64 {
    DEFAULT_BASE_ID
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|&s| s.to_owned()).collect()
}

const AGENTS: [&str; 15] = [
    "Sarah Miller",
    "James Wilson",
    "Emily Chen",
    "Michael Brown",
    "Jessica Davis",
    "David Martinez",
    "Jennifer Taylor",
    "Robert Anderson",
    "Lisa Thomas",
    "William Jackson",
    "Elizabeth White",
    "Christopher Harris",
    "Ashley Martin",
    "Matthew Thompson",
    "Amanda Garcia",
];

const LEAD_SOURCES: [&str; 8] = [
    "Zillow",
    "Referral",
    "Open House",
    "Sphere of Influence",
    "Facebook Ads",
    "Realtor.com",
    "Walk-in",
    "Direct Mail",
];

impl Profile {
    /// Metro Atlanta brokerage dataset with a mostly historical book of business.
    #[must_use]
    pub fn brokerage() -> Self {
        let from_listing = DateDerivation::FromListing { closes: false };
        let closing = DateDerivation::FromListing { closes: true };
        Profile {
            name: "brokerage".to_owned(),
            schema: SchemaKind::Brokerage,
            record_count: 350,
            base_id: DEFAULT_BASE_ID,
            output_path: PathBuf::from("Demo_Brokerage_Data_2025.csv"),
            agents: owned(&AGENTS),
            lead_sources: owned(&LEAD_SOURCES),
            cities: owned(&[
                "Atlanta",
                "Marietta",
                "Roswell",
                "Alpharetta",
                "Sandy Springs",
                "Decatur",
                "Smyrna",
                "Woodstock",
                "Kennesaw",
                "Lawrenceville",
            ]),
            property_types: vec![
                PropertyType::new("Single Family", 350, 1500),
                PropertyType::new("Condo", 200, 600),
                PropertyType::new("Townhouse", 300, 750),
                PropertyType::new("Multi-Family", 450, 1200),
                PropertyType::new("Land", 50, 400),
            ],
            statuses: vec![
                StatusRule::new(LoopStatus::Sold, 4, closing).downgrading_future_close(),
                StatusRule::new(LoopStatus::ActiveListing, 2, DateDerivation::ListingOnly)
                    .labelled("Active Listings"),
                StatusRule::new(LoopStatus::UnderContract, 2, closing),
                StatusRule::new(LoopStatus::Archived, 1, from_listing),
            ],
            window: DateWindow::default(),
            pricing: PricingRules {
                psychological_probability: 0.7,
                psychological_adjustment: 100,
                markup_probability: 0.6,
                markup_thousands: IntRange::new(5, 50),
            },
            commission: CommissionRules {
                rate: Decimal::new(3, 2),
                double_ended_probability: 0.15,
                company_dollar_split: Some(Decimal::new(20, 2)),
                earnest_money_rate: Decimal::new(1, 2),
                referral: ReferralRule {
                    lead_source: "Referral".to_owned(),
                    rate: Decimal::new(25, 2),
                },
            },
            address: AddressRules {
                street_numbers: IntRange::new(100, 9999),
                street_names: owned(&[
                    "Main St",
                    "Oak Ave",
                    "Maple Dr",
                    "Pine Ln",
                    "Cedar Blvd",
                    "Elm St",
                    "Washington Ave",
                    "Park Pl",
                    "Lakeview Dr",
                    "Hillcrest Rd",
                ]),
                state: "GA".to_owned(),
                county: "Fulton".to_owned(),
                country: "USA".to_owned(),
                zip: ZipRule::Fixed {
                    zip: "30000".to_owned(),
                },
            },
            details: PropertyDetailRules {
                bathrooms: IntRange::new(2, 5),
                bedrooms: IntRange::new(3, 6),
                lot_size: IntRange::new(5000, 40000),
                square_footage: IntRange::new(1500, 5000),
                year_built: IntRange::new(1980, 2024),
                mls_number: IntRange::new(70_000_000, 79_999_999),
                hoa: None,
            },
            presentation: Presentation {
                money: MoneyStyle::Currency,
                percent: PercentStyle::Suffixed,
                tag: TagRule {
                    label: "Top Producer".to_owned(),
                    price_above: 800_000,
                },
                earnest_money_held_by: "Broker".to_owned(),
                managing_broker: "John Broker".to_owned(),
                remarks: String::new(),
            },
        }
    }

    /// Greater Boston dataset whose open loops all close in the near future,
    /// so commission projections have a pipeline to show.
    #[must_use]
    pub fn sold_test() -> Self {
        let closing = DateDerivation::FromListing { closes: true };
        let mut lead_sources = owned(&LEAD_SOURCES);
        lead_sources.extend(owned(&["Past Client", "Agent Website"]));
        Profile {
            name: "sold-test".to_owned(),
            schema: SchemaKind::SoldTest,
            record_count: 400,
            base_id: DEFAULT_BASE_ID,
            output_path: PathBuf::from("Demo_SoldTest_Data_2025.csv"),
            agents: owned(&AGENTS),
            lead_sources,
            cities: owned(&[
                "Boston",
                "Cambridge",
                "Somerville",
                "Brookline",
                "Newton",
                "Quincy",
                "Waltham",
                "Medford",
                "Malden",
                "Arlington",
            ]),
            property_types: vec![
                PropertyType::new("SingleFamily", 450, 2500),
                PropertyType::new("Condo", 300, 900),
                PropertyType::new("Townhouse", 400, 1200),
                PropertyType::new("MultiFamily", 600, 3000),
                PropertyType::new("Land", 100, 800),
            ],
            statuses: vec![
                StatusRule::new(LoopStatus::Sold, 4, closing).downgrading_future_close(),
                StatusRule::new(LoopStatus::ActiveListing, 2, DateDerivation::ForwardPipeline),
                StatusRule::new(LoopStatus::UnderContract, 2, DateDerivation::ForwardPipeline),
                StatusRule::new(LoopStatus::Archived, 1, closing).downgrading_future_close(),
            ],
            window: DateWindow::default(),
            pricing: PricingRules {
                psychological_probability: 0.7,
                psychological_adjustment: 100,
                markup_probability: 0.6,
                markup_thousands: IntRange::new(10, 100),
            },
            commission: CommissionRules {
                rate: Decimal::new(25, 3),
                double_ended_probability: 0.10,
                company_dollar_split: None,
                earnest_money_rate: Decimal::new(5, 2),
                referral: ReferralRule {
                    lead_source: "Referral".to_owned(),
                    rate: Decimal::new(25, 2),
                },
            },
            address: AddressRules {
                street_numbers: IntRange::new(1, 999),
                street_names: owned(&[
                    "Beacon St",
                    "Commonwealth Ave",
                    "Boylston St",
                    "Tremont St",
                    "Washington St",
                    "Massachusetts Ave",
                    "Cambridge St",
                    "Broadway",
                    "Main St",
                    "High St",
                ]),
                state: "MA".to_owned(),
                county: "Suffolk".to_owned(),
                country: "USA".to_owned(),
                zip: ZipRule::Prefixed {
                    prefix: "021".to_owned(),
                    suffix: IntRange::new(10, 99),
                },
            },
            details: PropertyDetailRules {
                bathrooms: IntRange::new(1, 4),
                bedrooms: IntRange::new(2, 6),
                lot_size: IntRange::new(1000, 10000),
                square_footage: IntRange::new(800, 4000),
                year_built: IntRange::new(1900, 2024),
                mls_number: IntRange::new(70_000_000, 79_999_999),
                hoa: Some(HoaRule {
                    property_type: "Condo".to_owned(),
                    dues: IntRange::new(200, 800),
                }),
            },
            presentation: Presentation {
                money: MoneyStyle::Plain,
                percent: PercentStyle::Bare,
                tag: TagRule {
                    label: "Luxury".to_owned(),
                    price_above: 1_500_000,
                },
                earnest_money_held_by: "Brokerage".to_owned(),
                managing_broker: String::new(),
                remarks: "Beautiful property in prime location.".to_owned(),
            },
        }
    }

    /// Looks up a built-in profile by name.
    #[must_use]
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "brokerage" => Some(Profile::brokerage()),
            "sold-test" | "soldtest" | "sold_test" => Some(Profile::sold_test()),
            _ => None,
        }
    }

    /// # Errors
    /// Errors when the file cannot be read, is not a valid profile document, or
    /// describes a profile that fails [`Profile::validate`].
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self, GenError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| GenError::ProfileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let profile: Profile = serde_json::from_str(&raw)?;
        profile.validate()?;
        Ok(profile)
    }

    /// # Errors
    /// Only if the profile cannot be represented as JSON
    pub fn to_json(&self) -> Result<String, GenError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Display label for `status`, falling back to its default label when the
    /// profile has no rule for it.
    #[must_use]
    pub fn status_label(&self, status: LoopStatus) -> &str {
        self.statuses
            .iter()
            .find(|rule| rule.status == status)
            .map_or_else(|| status.default_label(), |rule| rule.label.as_str())
    }

    /// Checks every roster is non-empty and every range and probability is usable,
    /// so that generation from a validated profile cannot fail.
    ///
    /// # Errors
    /// Errors with [`GenError::InvalidProfile`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), GenError> {
        non_empty("agents", &self.agents)?;
        non_empty("lead_sources", &self.lead_sources)?;
        non_empty("cities", &self.cities)?;
        non_empty("property_types", &self.property_types)?;
        non_empty("statuses", &self.statuses)?;
        non_empty("address.street_names", &self.address.street_names)?;

        for property_type in &self.property_types {
            property_type.price_thousands.check(&property_type.name)?;
            if property_type.price_thousands.min == 0 {
                return Err(GenError::InvalidProfile(format!(
                    "{} prices must start above zero",
                    property_type.name
                )));
            }
            if let Some(markup) = property_type.markup_thousands {
                markup.check(&format!("{} markup", property_type.name))?;
            }
        }
        let total_weight = self
            .statuses
            .iter()
            .try_fold(0_u32, |total, rule| total.checked_add(rule.weight));
        if matches!(total_weight, None | Some(0)) {
            return Err(GenError::InvalidStatusWeights);
        }

        let last_id = u64::try_from(self.record_count)
            .ok()
            .and_then(|count| self.base_id.checked_add(count.saturating_sub(1)));
        if last_id.is_none() {
            return Err(GenError::InvalidProfile(format!(
                "{} loops starting at id {} overflow the id range",
                self.record_count, self.base_id
            )));
        }

        for (what, days) in [
            ("window.lookahead_days", self.window.lookahead_days),
            ("window.span_days", self.window.span_days),
        ] {
            if days > MAX_WINDOW_DAYS {
                return Err(GenError::InvalidProfile(format!(
                    "{} of {} exceeds the {} day limit",
                    what, days, MAX_WINDOW_DAYS
                )));
            }
        }
        if self.window.closure_margin_days > self.window.span_days {
            return Err(GenError::InvalidProfile(format!(
                "closure margin of {} days leaves no room in a {} day window",
                self.window.closure_margin_days, self.window.span_days
            )));
        }

        probability("pricing.psychological_probability", self.pricing.psychological_probability)?;
        probability("pricing.markup_probability", self.pricing.markup_probability)?;
        probability(
            "commission.double_ended_probability",
            self.commission.double_ended_probability,
        )?;
        self.pricing.markup_thousands.check("pricing.markup_thousands")?;

        rate("commission.rate", self.commission.rate)?;
        rate("commission.earnest_money_rate", self.commission.earnest_money_rate)?;
        rate("commission.referral.rate", self.commission.referral.rate)?;
        if let Some(split) = self.commission.company_dollar_split {
            rate("commission.company_dollar_split", split)?;
        }

        self.address.street_numbers.check("address.street_numbers")?;
        if let ZipRule::Prefixed { suffix, .. } = &self.address.zip {
            suffix.check("address.zip.suffix")?;
        }

        let details = &self.details;
        details.bathrooms.check("details.bathrooms")?;
        details.bedrooms.check("details.bedrooms")?;
        details.lot_size.check("details.lot_size")?;
        details.square_footage.check("details.square_footage")?;
        details.year_built.check("details.year_built")?;
        details.mls_number.check("details.mls_number")?;
        if let Some(hoa) = &details.hoa {
            hoa.dues.check("details.hoa.dues")?;
        }
        Ok(())
    }
}

fn non_empty<T>(what: &str, items: &[T]) -> Result<(), GenError> {
    if items.is_empty() {
        Err(GenError::InvalidProfile(format!("{} must not be empty", what)))
    } else {
        Ok(())
    }
}

fn probability(what: &str, p: f64) -> Result<(), GenError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(GenError::InvalidProfile(format!(
            "{} must be within [0, 1], got {}",
            what, p
        )))
    }
}

fn rate(what: &str, r: Decimal) -> Result<(), GenError> {
    if r >= Decimal::ZERO && r <= Decimal::ONE {
        Ok(())
    } else {
        Err(GenError::InvalidProfile(format!(
            "{} must be within [0, 1], got {}",
            what, r
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_profiles_validate() {
        assert!(Profile::brokerage().validate().is_ok());
        assert!(Profile::sold_test().validate().is_ok());
        assert_eq!(Profile::builtin("sold-test").unwrap().name, "sold-test");
        assert!(Profile::builtin("nope").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_profiles() {
        let mut profile = Profile::brokerage();
        profile.agents.clear();
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::brokerage();
        profile.property_types[0].price_thousands = IntRange::new(900, 100);
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::brokerage();
        for rule in &mut profile.statuses {
            rule.weight = 0;
        }
        assert!(matches!(profile.validate(), Err(GenError::InvalidStatusWeights)));

        let mut profile = Profile::sold_test();
        profile.commission.double_ended_probability = 1.5;
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::sold_test();
        profile.window.closure_margin_days = 500;
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));
    }

    #[test]
    fn test_validate_rejects_oversized_window() {
        let mut profile = Profile::brokerage();
        profile.window.lookahead_days = 4_000_000_000;
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::brokerage();
        profile.window.span_days = MAX_WINDOW_DAYS + 1;
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::brokerage();
        profile.window.span_days = MAX_WINDOW_DAYS;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overflowing_weights() {
        let mut profile = Profile::brokerage();
        for rule in &mut profile.statuses {
            rule.weight = u32::MAX;
        }
        assert!(matches!(profile.validate(), Err(GenError::InvalidStatusWeights)));
    }

    #[test]
    fn test_validate_rejects_overflowing_ids() {
        let mut profile = Profile::brokerage();
        profile.base_id = u64::MAX;
        profile.record_count = 2;
        assert!(matches!(profile.validate(), Err(GenError::InvalidProfile(_))));

        profile.record_count = 1;
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_status_labels() {
        let brokerage = Profile::brokerage();
        assert_eq!(brokerage.status_label(LoopStatus::ActiveListing), "Active Listings");
        assert_eq!(brokerage.status_label(LoopStatus::Sold), "Sold");

        let mut trimmed = Profile::sold_test();
        trimmed.statuses.retain(|rule| rule.status == LoopStatus::Sold);
        assert_eq!(trimmed.status_label(LoopStatus::UnderContract), "Under Contract");
    }

    #[test]
    fn test_date_window() {
        let window = DateWindow::default();
        let today = ymd(2025, 6, 1);
        assert_eq!(window.end(today), ymd(2025, 8, 30));
        assert_eq!(window.start(today), window.end(today) - Duration::days(450));
        assert_eq!(window.last_listing(today), ymd(2025, 7, 1));
        assert!(window.check(today).is_ok());
        assert!(window.check(NaiveDate::MAX).is_err());
        assert!(window.check(NaiveDate::MIN).is_err());
        assert_eq!(window.end(NaiveDate::MAX), NaiveDate::MAX);
    }

    #[test]
    fn test_zip_rules() {
        let mut rng = rand::thread_rng();
        let fixed = ZipRule::Fixed {
            zip: "30000".to_owned(),
        };
        assert_eq!(fixed.sample(&mut rng), "30000");

        let prefixed = ZipRule::Prefixed {
            prefix: "021".to_owned(),
            suffix: IntRange::new(10, 99),
        };
        for _ in 0..100 {
            let zip = prefixed.sample(&mut rng);
            assert_eq!(zip.len(), 5);
            assert!(zip.starts_with("021"));
        }
    }

    #[test]
    fn test_json_round_trip_keeps_profile() {
        let profile = Profile::sold_test();
        let json = profile.to_json().unwrap();
        let parsed: Profile = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, profile);
    }

    #[test]
    fn test_from_json_path_missing_file() {
        let err = Profile::from_json_path("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
