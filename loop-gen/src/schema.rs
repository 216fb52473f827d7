//! Ordered CSV header tables and the value behind each header.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::format::{iso_date, locale_date};
use crate::money::Money;
use crate::profile::Profile;
use crate::record::{Loop, Record};
use crate::status::LoopStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    Brokerage,
    SoldTest,
}

/// The value a column is filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    LoopId,
    Status,
    Compliance,
    Tag,
    ListingDate,
    ListingDateLocale,
    OfferDate,
    ContractDate,
    ClosingDate,
    ExpirationDate,
    FullAddress,
    StreetLine,
    Locality,
    StreetNumber,
    StreetName,
    City,
    State,
    Zip,
    County,
    Country,
    Agent,
    CreatedByAdmin,
    Price,
    OriginalPrice,
    EarnestMoney,
    EarnestMoneyHeldBy,
    CommissionRate,
    BuySideAmount,
    SellSideAmount,
    BuySideRate,
    SellSideRate,
    CommissionTotal,
    CompanyDollar,
    PropertyType,
    Bathrooms,
    Bedrooms,
    LotSize,
    SquareFootage,
    YearBuilt,
    MlsNumber,
    HoaDues,
    Remarks,
    LeadSource,
    ReferralRate,
    /// The lead source, only when the loop came from a referral.
    ReferralSource,
    ManagingBroker,
    /// Present in the header, never filled.
    Blank,
}

const BROKERAGE: &[(&str, Column)] = &[
    ("Loop View", Column::LoopId),
    ("Loop ID", Column::LoopId),
    ("Loop Name", Column::FullAddress),
    ("Loop Status", Column::Status),
    ("Compliance Status", Column::Compliance),
    ("Tags", Column::Tag),
    ("Created Date", Column::ListingDate),
    ("Closing Date", Column::ClosingDate),
    ("Expiration Date", Column::ExpirationDate),
    ("Listing Date", Column::ListingDate),
    ("Joined Date", Column::ListingDate),
    ("Offer Date", Column::OfferDate),
    ("Address", Column::FullAddress),
    ("Price", Column::Price),
    ("Created By", Column::Agent),
    ("Created By Admin", Column::CreatedByAdmin),
    ("Agents", Column::Agent),
    ("Property Address / City", Column::City),
    ("Property Address / Country", Column::Country),
    ("Property Address / County", Column::County),
    ("Property Address / State/Prov", Column::State),
    ("Property Address / Street Name", Column::StreetName),
    ("Property Address / Street Number", Column::StreetNumber),
    ("Property Address / Zip/Postal Code", Column::Zip),
    ("Contract Dates / Closing Date", Column::ClosingDate),
    ("Contract Dates / Contract Agreement Date", Column::ContractDate),
    ("Financials / Earnest Money Amount", Column::EarnestMoney),
    ("Financials / Earnest Money Held By", Column::EarnestMoneyHeldBy),
    ("Financials / Purchase/Sale Price", Column::Price),
    ("Financials / Sale Commission Rate", Column::CommissionRate),
    ("Financials / Sale Commission Split $ - Buy Side", Column::BuySideAmount),
    ("Financials / Sale Commission Split $ - Sell Side", Column::SellSideAmount),
    ("Financials / Sale Commission Split % - Buy Side", Column::BuySideRate),
    ("Financials / Sale Commission Split % - Sell Side", Column::SellSideRate),
    ("Financials / Sale Commission Total", Column::CommissionTotal),
    ("Listing Information / Current Price", Column::Price),
    ("Listing Information / Original Price", Column::OriginalPrice),
    ("Listing Information / Listing Date", Column::ListingDateLocale),
    ("Property / Bathrooms", Column::Bathrooms),
    ("Property / Bedrooms", Column::Bedrooms),
    ("Property / Lot Size", Column::LotSize),
    ("Property / Square Footage", Column::SquareFootage),
    ("Property / Type", Column::PropertyType),
    ("Property / Year Built", Column::YearBuilt),
    ("Referral / Referral %", Column::ReferralRate),
    ("Referral / Referral Source", Column::LeadSource),
    ("Company Information / office managing broker", Column::ManagingBroker),
    ("Net to Office", Column::CompanyDollar),
];

const SOLD_TEST: &[(&str, Column)] = &[
    ("Loop View", Column::LoopId),
    ("Loop ID", Column::LoopId),
    ("Loop Name", Column::FullAddress),
    ("Loop Status", Column::Status),
    ("Compliance Status", Column::Compliance),
    ("Tags", Column::Tag),
    ("Created Date", Column::ListingDate),
    ("Closing Date", Column::ClosingDate),
    ("Expiration Date", Column::ExpirationDate),
    ("Listing Date", Column::ListingDate),
    ("Joined Date", Column::ListingDate),
    ("Offer Date", Column::OfferDate),
    ("Address", Column::FullAddress),
    ("Price", Column::Price),
    ("Created By", Column::Agent),
    ("Created By Admin", Column::CreatedByAdmin),
    ("Agents", Column::Agent),
    (
        "Property Address / City, State/Prov, Zip/Postal Code (Address 2)",
        Column::Locality,
    ),
    (
        "Property Address / Street Number, Street Name, Unit Number (Address 1)",
        Column::StreetLine,
    ),
    ("Car / other_terms", Column::Blank),
    ("Contract Dates / Closing Date", Column::ClosingDate),
    ("Contract Dates / Contract Agreement Date", Column::ContractDate),
    ("Financials / Earnest Money Amount", Column::EarnestMoney),
    ("Financials / Earnest Money Held By", Column::EarnestMoneyHeldBy),
    ("Financials / Purchase/Sale Price", Column::Price),
    ("Financials / Sale Commission Rate", Column::CommissionRate),
    ("Financials / Sale Commission Split $ - Buy Side", Column::BuySideAmount),
    ("Financials / Sale Commission Split $ - Sell Side", Column::SellSideAmount),
    ("Financials / Sale Commission Split % - Buy Side", Column::BuySideRate),
    ("Financials / Sale Commission Split % - Sell Side", Column::SellSideRate),
    ("Financials / Sale Commission Total", Column::CommissionTotal),
    ("Geographic Description / Legal Description", Column::Blank),
    ("Lead Source / Lead Source", Column::LeadSource),
    ("Listing Information / Current Price", Column::Price),
    ("Listing Information / Expiration Date", Column::ExpirationDate),
    ("Listing Information / Homeowner's Association Dues", Column::HoaDues),
    ("Listing Information / Listing Date", Column::ListingDateLocale),
    ("Listing Information / Original Price", Column::OriginalPrice),
    ("Listing Information / Property Excludes", Column::Blank),
    ("Listing Information / Remarks", Column::Remarks),
    ("Offer Dates / Occupancy Date", Column::ClosingDate),
    ("Property / Bathrooms", Column::Bathrooms),
    ("Property / Bedrooms", Column::Bedrooms),
    ("Property / Lot Size", Column::LotSize),
    ("Property / Square Footage", Column::SquareFootage),
    ("Property / Type", Column::PropertyType),
    ("Property / Year Built", Column::YearBuilt),
    ("Property Address / City", Column::City),
    ("Property Address / Country", Column::Country),
    ("Property Address / County", Column::County),
    ("Property Address / Full Address", Column::FullAddress),
    ("Property Address / MLS Number", Column::MlsNumber),
    ("Property Address / Parcel/Tax ID", Column::Blank),
    ("Property Address / State/Prov", Column::State),
    ("Property Address / Street Name", Column::StreetName),
    ("Property Address / Street Number", Column::StreetNumber),
    ("Property Address / Unit Number", Column::Blank),
    ("Property Address / Zip/Postal Code", Column::Zip),
    ("Referral / LEAD SOURCE", Column::LeadSource),
    ("Referral / Referral %", Column::ReferralRate),
    ("Referral / Referral Source", Column::ReferralSource),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    columns: &'static [(&'static str, Column)],
}

impl From<SchemaKind> for Schema {
    fn from(kind: SchemaKind) -> Self {
        let columns = match kind {
            SchemaKind::Brokerage => BROKERAGE,
            SchemaKind::SoldTest => SOLD_TEST,
        };
        Schema { columns }
    }
}

impl Schema {
    #[must_use]
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|&(header, _)| header).collect()
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn render(&self, lp: &Loop, profile: &Profile) -> Record {
        let mut record = Record::new();
        for &(header, column) in self.columns {
            record.insert(header, column.render(lp, profile));
        }
        record
    }
}

impl Column {
    #[must_use]
    pub fn render(self, lp: &Loop, profile: &Profile) -> String {
        let money = |m: Money| profile.presentation.money.render(m);
        let percent = |r: Decimal| profile.presentation.percent.render(r);
        let side_rate = |side: Money| {
            if side.is_zero() {
                percent(Decimal::ZERO)
            } else {
                percent(lp.commission.rate)
            }
        };
        let is_referral = lp.lead_source == profile.commission.referral.lead_source;

        match self {
            Column::LoopId => lp.id.to_string(),
            Column::Status => profile.status_label(lp.status).to_owned(),
            Column::Compliance => {
                let compliance = if lp.status == LoopStatus::Sold {
                    "Approved"
                } else {
                    "Pending"
                };
                compliance.to_owned()
            }
            Column::Tag => {
                let tag = &profile.presentation.tag;
                if lp.price > Money::from(tag.price_above) {
                    tag.label.clone()
                } else {
                    String::new()
                }
            }
            Column::ListingDate => iso_date(Some(lp.dates.listing)),
            Column::ListingDateLocale => locale_date(Some(lp.dates.listing)),
            Column::OfferDate => iso_date(lp.dates.offer),
            Column::ContractDate => iso_date(lp.dates.contract),
            Column::ClosingDate => iso_date(lp.dates.closing),
            Column::ExpirationDate => iso_date(Some(lp.dates.expiration)),
            Column::FullAddress => lp.address.full(),
            Column::StreetLine => lp.address.street_line(),
            Column::Locality => lp.address.locality(),
            Column::StreetNumber => lp.address.street_number.to_string(),
            Column::StreetName => lp.address.street_name.clone(),
            Column::City => lp.address.city.clone(),
            Column::State => lp.address.state.clone(),
            Column::Zip => lp.address.zip.clone(),
            Column::County => lp.address.county.clone(),
            Column::Country => lp.address.country.clone(),
            Column::Agent => lp.agent.clone(),
            Column::CreatedByAdmin => "false".to_owned(),
            Column::Price => money(lp.price),
            Column::OriginalPrice => money(lp.original_price),
            Column::EarnestMoney => money(lp.price.scaled(profile.commission.earnest_money_rate)),
            Column::EarnestMoneyHeldBy => profile.presentation.earnest_money_held_by.clone(),
            Column::CommissionRate => percent(lp.commission.rate),
            Column::BuySideAmount => money(lp.commission.buy_side),
            Column::SellSideAmount => money(lp.commission.sell_side),
            Column::BuySideRate => side_rate(lp.commission.buy_side),
            Column::SellSideRate => side_rate(lp.commission.sell_side),
            Column::CommissionTotal => money(lp.commission.total),
            Column::CompanyDollar => profile
                .presentation
                .money
                .render_opt(lp.commission.company_dollar),
            Column::PropertyType => lp.property_type.clone(),
            Column::Bathrooms => lp.details.bathrooms.to_string(),
            Column::Bedrooms => lp.details.bedrooms.to_string(),
            Column::LotSize => lp.details.lot_size.to_string(),
            Column::SquareFootage => lp.details.square_footage.to_string(),
            Column::YearBuilt => lp.details.year_built.to_string(),
            Column::MlsNumber => lp.details.mls_number.to_string(),
            Column::HoaDues => lp
                .details
                .hoa_dues
                .map(|dues| dues.to_string())
                .unwrap_or_default(),
            Column::Remarks => profile.presentation.remarks.clone(),
            Column::LeadSource => lp.lead_source.clone(),
            Column::ReferralRate => {
                if is_referral {
                    percent(profile.commission.referral.rate)
                } else {
                    percent(Decimal::ZERO)
                }
            }
            Column::ReferralSource => {
                if is_referral {
                    lp.lead_source.clone()
                } else {
                    String::new()
                }
            }
            Column::ManagingBroker => profile.presentation.managing_broker.clone(),
            Column::Blank => String::new(),
        }
    }
}
