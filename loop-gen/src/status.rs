//! Loop statuses and the date rules attached to each of them.
//!
//! Every status carries a [`DateDerivation`] deciding which of the offer,
//! contract and closing dates exist and how they are anchored. After the
//! dates are derived, [`StatusRule::reconcile`] keeps the status and the
//! closing date jointly consistent: a loop cannot be closed in the future.

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{Duration, NaiveDate};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Days between listing and the accepted offer.
pub const DAYS_ON_MARKET: RangeInclusive<i64> = 5..=90;
/// Days between the accepted offer and closing.
pub const DAYS_TO_CLOSE: RangeInclusive<i64> = 30..=60;
/// Days from today until a pipeline loop is projected to close.
pub const DAYS_TO_FUTURE_CLOSE: RangeInclusive<i64> = 15..=85;
/// Offer lead time back-computed from a projected closing date.
pub const PIPELINE_OFFER_LEAD_DAYS: i64 = 45;
/// A listing agreement expires this many days after the listing date.
pub const LISTING_TERM_DAYS: i64 = 180;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopStatus {
    Sold,
    ActiveListing,
    UnderContract,
    Archived,
}

impl LoopStatus {
    #[must_use]
    pub fn default_label(self) -> &'static str {
        match self {
            LoopStatus::Sold => "Sold",
            LoopStatus::ActiveListing => "Active Listing",
            LoopStatus::UnderContract => "Under Contract",
            LoopStatus::Archived => "Archived",
        }
    }

    /// Statuses for which an accepted offer must exist.
    #[must_use]
    pub fn requires_offer(self) -> bool {
        matches!(
            self,
            LoopStatus::Sold | LoopStatus::UnderContract | LoopStatus::Archived
        )
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum DateDerivation {
    /// Listing and expiration only.
    ListingOnly,
    /// The offer follows the listing by [`DAYS_ON_MARKET`]; when `closes`,
    /// closing follows the offer by [`DAYS_TO_CLOSE`].
    FromListing { closes: bool },
    /// Closing is projected [`DAYS_TO_FUTURE_CLOSE`] days past today and the
    /// offer is back-computed from it.
    ForwardPipeline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopDates {
    pub listing: NaiveDate,
    pub offer: Option<NaiveDate>,
    pub contract: Option<NaiveDate>,
    pub closing: Option<NaiveDate>,
    pub expiration: NaiveDate,
}

impl LoopDates {
    #[must_use]
    pub fn listed_on(listing: NaiveDate) -> Self {
        LoopDates {
            listing,
            offer: None,
            contract: None,
            closing: None,
            expiration: listing + Duration::days(LISTING_TERM_DAYS),
        }
    }

    fn with_offer(mut self, offer: NaiveDate) -> Self {
        self.offer = Some(offer);
        self.contract = Some(offer);
        self
    }

    fn with_closing(mut self, closing: NaiveDate) -> Self {
        self.closing = Some(closing);
        self
    }
}

impl DateDerivation {
    pub fn derive<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        listing: NaiveDate,
        today: NaiveDate,
    ) -> LoopDates {
        let dates = LoopDates::listed_on(listing);
        match self {
            DateDerivation::ListingOnly => dates,
            DateDerivation::FromListing { closes } => {
                let offer = listing + Duration::days(rng.gen_range(DAYS_ON_MARKET));
                let dates = dates.with_offer(offer);
                if closes {
                    dates.with_closing(offer + Duration::days(rng.gen_range(DAYS_TO_CLOSE)))
                } else {
                    dates
                }
            }
            DateDerivation::ForwardPipeline => {
                let closing = today + Duration::days(rng.gen_range(DAYS_TO_FUTURE_CLOSE));
                dates
                    .with_offer(closing - Duration::days(PIPELINE_OFFER_LEAD_DAYS))
                    .with_closing(closing)
            }
        }
    }
}

/// How a sampled status is weighted, labelled and dated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRule {
    pub status: LoopStatus,
    pub label: String,
    pub weight: u32,
    pub derivation: DateDerivation,
    /// Downgrade to [`LoopStatus::UnderContract`] when the derived closing
    /// date lies after today. The closing date is kept as a projection.
    pub downgrade_future_close: bool,
}

impl StatusRule {
    #[must_use]
    pub fn new(status: LoopStatus, weight: u32, derivation: DateDerivation) -> Self {
        StatusRule {
            status,
            label: status.default_label().to_owned(),
            weight,
            derivation,
            downgrade_future_close: false,
        }
    }

    #[must_use]
    pub fn labelled(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    #[must_use]
    pub fn downgrading_future_close(mut self) -> Self {
        self.downgrade_future_close = true;
        self
    }

    /// The status a loop ends up with once its dates are known.
    #[must_use]
    pub fn reconcile(&self, dates: &LoopDates, today: NaiveDate) -> LoopStatus {
        match dates.closing {
            Some(closing) if self.downgrade_future_close && closing > today => {
                debug!(
                    "{} loop closes on {} after {}; downgrading to {}",
                    self.status,
                    closing,
                    today,
                    LoopStatus::UnderContract
                );
                LoopStatus::UnderContract
            }
            _ => self.status,
        }
    }
}
