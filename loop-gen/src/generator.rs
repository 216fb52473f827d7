use chrono::NaiveDate;
use log::trace;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::error::GenError;
use crate::money::Money;
use crate::profile::{
    AddressRules, CommissionRules, PricingRules, Profile, PropertyDetailRules, PropertyType,
};
use crate::record::{Address, Commission, Loop, PropertyDetails, Record};
use crate::schema::Schema;

/// Produces loops drawn from a [`Profile`].
///
/// Construction validates the profile; once built, generation cannot fail.
#[derive(Debug)]
pub struct RecordGenerator<R> {
    profile: Profile,
    schema: Schema,
    statuses: WeightedIndex<u32>,
    rng: R,
    today: NaiveDate,
}

impl<R: Rng> RecordGenerator<R> {
    /// # Errors
    /// Errors when `profile` does not pass [`Profile::validate`], or when its
    /// date window around `today` runs off the calendar.
    pub fn new(profile: Profile, rng: R, today: NaiveDate) -> Result<Self, GenError> {
        profile.validate()?;
        profile.window.check(today)?;
        let statuses = WeightedIndex::new(profile.statuses.iter().map(|rule| rule.weight))
            .map_err(|_| GenError::InvalidStatusWeights)?;
        Ok(RecordGenerator {
            schema: Schema::from(profile.schema),
            profile,
            statuses,
            rng,
            today,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn schema(&self) -> Schema {
        self.schema
    }

    /// Generates loop `id` and renders it through the profile's schema.
    pub fn generate(&mut self, id: u64) -> Record {
        let lp = self.generate_loop(id);
        self.schema.render(&lp, &self.profile)
    }

    pub fn generate_loop(&mut self, id: u64) -> Loop {
        let RecordGenerator {
            profile,
            statuses,
            rng,
            today,
            ..
        } = self;
        let today = *today;

        let rule = &profile.statuses[statuses.sample(rng)];
        let property_type = pick(rng, &profile.property_types);
        let city = pick(rng, &profile.cities);
        let agent = pick(rng, &profile.agents);
        let lead_source = pick(rng, &profile.lead_sources);

        let (price, original_price) = sample_prices(rng, &profile.pricing, property_type);

        let listing = profile.window.sample_listing(rng, today);
        let dates = rule.derivation.derive(rng, listing, today);
        let status = rule.reconcile(&dates, today);

        let commission = sample_commission(rng, &profile.commission, price);
        let address = sample_address(rng, &profile.address, city);
        let details = sample_details(rng, &profile.details, property_type);

        trace!(
            "loop {}: {} {} at {} listed {}",
            id,
            status,
            property_type.name,
            price,
            dates.listing
        );

        Loop {
            id,
            status,
            property_type: property_type.name.clone(),
            agent: agent.clone(),
            lead_source: lead_source.clone(),
            address,
            price,
            original_price,
            dates,
            commission,
            details,
        }
    }
}

/// Rosters are checked non-empty by [`Profile::validate`].
fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn sample_prices<R: Rng + ?Sized>(
    rng: &mut R,
    pricing: &PricingRules,
    property_type: &PropertyType,
) -> (Money, Money) {
    let base = u64::from(property_type.price_thousands.sample(rng)) * 1000;
    let price = if rng.gen_bool(pricing.psychological_probability) {
        base.saturating_sub(u64::from(pricing.psychological_adjustment))
    } else {
        base
    };
    let original_price = if rng.gen_bool(pricing.markup_probability) {
        let markup = property_type
            .markup_thousands
            .unwrap_or(pricing.markup_thousands);
        price + u64::from(markup.sample(rng)) * 1000
    } else {
        price
    };
    (Money::from(price), Money::from(original_price))
}

fn sample_commission<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &CommissionRules,
    price: Money,
) -> Commission {
    let side = price.scaled(rules.rate);
    let double_ended = rng.gen_bool(rules.double_ended_probability);
    let (buy_side, sell_side) = if double_ended {
        (side, side)
    } else if rng.gen_bool(0.5) {
        (side, Money::ZERO)
    } else {
        (Money::ZERO, side)
    };
    let total = buy_side.saturating_add(sell_side);
    Commission {
        rate: rules.rate,
        buy_side,
        sell_side,
        total,
        double_ended,
        company_dollar: rules.company_dollar_split.map(|split| total.scaled(split)),
    }
}

fn sample_address<R: Rng + ?Sized>(rng: &mut R, rules: &AddressRules, city: &str) -> Address {
    Address {
        street_number: rules.street_numbers.sample(rng),
        street_name: pick(rng, &rules.street_names).clone(),
        city: city.to_owned(),
        state: rules.state.clone(),
        zip: rules.zip.sample(rng),
        county: rules.county.clone(),
        country: rules.country.clone(),
    }
}

fn sample_details<R: Rng + ?Sized>(
    rng: &mut R,
    rules: &PropertyDetailRules,
    property_type: &PropertyType,
) -> PropertyDetails {
    PropertyDetails {
        bathrooms: rules.bathrooms.sample(rng),
        bedrooms: rules.bedrooms.sample(rng),
        lot_size: rules.lot_size.sample(rng),
        square_footage: rules.square_footage.sample(rng),
        year_built: rules.year_built.sample(rng),
        mls_number: rules.mls_number.sample(rng),
        hoa_dues: rules
            .hoa
            .as_ref()
            .filter(|hoa| hoa.property_type == property_type.name)
            .map(|hoa| hoa.dues.sample(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::{DateDerivation, LoopStatus};
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: u64 = 2_000;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    fn generator(profile: Profile, seed: u64) -> RecordGenerator<StdRng> {
        RecordGenerator::new(profile, StdRng::seed_from_u64(seed), today()).unwrap()
    }

    fn loops(profile: Profile, seed: u64) -> Vec<Loop> {
        let mut generator = generator(profile, seed);
        (0..SAMPLES).map(|i| generator.generate_loop(i)).collect()
    }

    #[test]
    fn test_prices() {
        for lp in loops(Profile::brokerage(), 1) {
            assert!(lp.original_price >= lp.price);
            if lp.property_type == "Condo" {
                assert!(lp.price >= Money::from(199_900));
                assert!(lp.price <= Money::from(600_000));
            }
        }
    }

    #[test]
    fn test_offer_dates() {
        for lp in loops(Profile::brokerage(), 2) {
            if lp.status.requires_offer() {
                let offer = lp.dates.offer.unwrap();
                assert_eq!(lp.dates.contract, Some(offer));
                assert!(offer >= lp.dates.listing + Duration::days(5));
                assert!(offer <= lp.dates.listing + Duration::days(90));
            } else {
                assert!(lp.dates.offer.is_none());
                assert!(lp.dates.closing.is_none());
            }
        }
        for lp in loops(Profile::sold_test(), 2) {
            if lp.status.requires_offer() {
                assert!(lp.dates.offer.is_some());
                assert_eq!(lp.dates.offer, lp.dates.contract);
            }
        }
    }

    #[test]
    fn test_sold_loops_have_closed() {
        for profile in [Profile::brokerage(), Profile::sold_test()] {
            for lp in loops(profile, 3) {
                if lp.status == LoopStatus::Sold {
                    assert!(lp.dates.closing.unwrap() <= today());
                }
                if lp.status == LoopStatus::UnderContract {
                    assert!(lp.dates.closing.is_some());
                }
            }
        }
    }

    #[test]
    fn test_future_sales_are_downgraded() {
        let mut profile = Profile::brokerage();
        profile.statuses.retain(|rule| rule.status == LoopStatus::Sold);
        let all = loops(profile, 12);
        let downgraded: Vec<_> = all
            .iter()
            .filter(|lp| lp.status == LoopStatus::UnderContract)
            .collect();
        assert!(!downgraded.is_empty());
        assert!(downgraded.len() < all.len());
        for lp in downgraded {
            assert!(lp.dates.closing.unwrap() > today());
        }
    }

    #[test]
    fn test_pipeline_loops_close_in_future() {
        for lp in loops(Profile::sold_test(), 4) {
            if lp.status == LoopStatus::ActiveListing {
                let closing = lp.dates.closing.unwrap();
                assert!(closing >= today() + Duration::days(15));
                assert!(closing <= today() + Duration::days(85));
                assert_eq!(lp.dates.offer, Some(closing - Duration::days(45)));
            }
        }
    }

    #[test]
    fn test_commission_split() {
        let profile = Profile::brokerage();
        let rate = profile.commission.rate;
        let all = loops(profile, 5);
        for lp in &all {
            let c = lp.commission;
            assert_eq!(c.total, c.buy_side.saturating_add(c.sell_side));
            let side = lp.price.scaled(rate);
            assert!(c.buy_side == side || c.buy_side.is_zero());
            assert!(c.sell_side == side || c.sell_side.is_zero());
            if c.double_ended {
                assert_eq!(c.buy_side, c.sell_side);
            } else {
                assert!(c.buy_side.is_zero() != c.sell_side.is_zero());
            }
            assert_eq!(
                c.company_dollar,
                Some(c.total.scaled(rust_decimal::Decimal::new(20, 2)))
            );
        }
        assert!(all.iter().any(|lp| lp.commission.double_ended));
        assert!(all.iter().any(|lp| !lp.commission.double_ended));
    }

    #[test]
    fn test_listing_window_and_expiration() {
        let window = Profile::brokerage().window;
        for lp in loops(Profile::brokerage(), 6) {
            assert!(lp.dates.listing >= window.start(today()));
            assert!(lp.dates.listing <= window.last_listing(today()));
            assert_eq!(lp.dates.expiration, lp.dates.listing + Duration::days(180));
        }
    }

    #[test]
    fn test_hoa_dues_only_for_condos() {
        for lp in loops(Profile::sold_test(), 7) {
            assert_eq!(lp.details.hoa_dues.is_some(), lp.property_type == "Condo");
        }
        assert!(loops(Profile::brokerage(), 7)
            .iter()
            .all(|lp| lp.details.hoa_dues.is_none()));
    }

    #[test]
    fn test_markup_override() {
        let mut profile = Profile::brokerage();
        profile.pricing.markup_probability = 1.0;
        for property_type in &mut profile.property_types {
            property_type.markup_thousands = Some(crate::profile::IntRange::new(7, 7));
        }
        for lp in loops(profile, 8) {
            assert_eq!(lp.original_price, lp.price.saturating_add(Money::from(7_000)));
        }
    }

    #[test]
    fn test_status_weights_are_respected() {
        let mut profile = Profile::brokerage();
        for rule in &mut profile.statuses {
            if rule.status != LoopStatus::Archived {
                rule.weight = 0;
            }
        }
        assert!(loops(profile, 9)
            .iter()
            .all(|lp| lp.status == LoopStatus::Archived));
    }

    #[test]
    fn test_generate_renders_schema() {
        let mut generator = generator(Profile::brokerage(), 10);
        let record = generator.generate(300_000_042);
        assert_eq!(record.len(), 48);
        assert_eq!(record.cell("Loop ID"), "300000042");
        assert_eq!(record.cell("Loop View"), "300000042");
        assert_eq!(record.cell("Created Date"), record.cell("Listing Date"));
    }

    #[test]
    fn test_same_seed_same_loops() {
        assert_eq!(loops(Profile::sold_test(), 99), loops(Profile::sold_test(), 99));
    }

    #[test]
    fn test_invalid_profile_is_rejected() {
        let mut profile = Profile::brokerage();
        profile.cities.clear();
        let result = RecordGenerator::new(profile, StdRng::seed_from_u64(0), today());
        assert!(matches!(result, Err(GenError::InvalidProfile(_))));

        let mut profile = Profile::brokerage();
        profile.statuses = vec![crate::status::StatusRule::new(
            LoopStatus::Sold,
            0,
            DateDerivation::ListingOnly,
        )];
        let result = RecordGenerator::new(profile, StdRng::seed_from_u64(0), today());
        assert!(matches!(result, Err(GenError::InvalidStatusWeights)));
    }

    #[test]
    fn test_overflowing_weights_are_rejected() {
        let mut profile = Profile::brokerage();
        for rule in &mut profile.statuses {
            rule.weight = u32::MAX;
        }
        let result = RecordGenerator::new(profile, StdRng::seed_from_u64(0), today());
        assert!(matches!(result, Err(GenError::InvalidStatusWeights)));
    }

    #[test]
    fn test_window_off_the_calendar_is_rejected() {
        let mut profile = Profile::brokerage();
        profile.window.lookahead_days = 4_000_000_000;
        let result = RecordGenerator::new(profile, StdRng::seed_from_u64(0), today());
        assert!(matches!(result, Err(GenError::InvalidProfile(_))));

        let result =
            RecordGenerator::new(Profile::brokerage(), StdRng::seed_from_u64(0), NaiveDate::MAX);
        assert!(matches!(result, Err(GenError::InvalidProfile(_))));
    }
}
