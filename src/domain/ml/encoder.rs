//! Maps a sparse item description into the dense feature slots the ensemble
//! was trained on.
//!
//! Unrecognized categories and store ids are not errors: they encode as an
//! all-zero group (see [`CategoryMatch::NoMatch`] and [`StoreMatch::NoMatch`]).
//! An unparseable date is an error.

use super::feature_registry::{Feature, FeatureArray};
use crate::domain::errors::PredictionError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_PURITY: f64 = 22.0;
pub const DEFAULT_STORE_ID: &str = "MAIN_STORE";

fn default_purity() -> f64 {
    DEFAULT_PURITY
}

fn default_store_id() -> String {
    DEFAULT_STORE_ID.to_string()
}

/// One item to price, as supplied by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub category: String,
    /// Grams
    pub net_weight: f64,
    /// `YYYY-MM-DD`
    pub voucher_date: String,
    #[serde(default = "default_purity")]
    pub purity: f64,
    #[serde(default = "default_store_id")]
    pub store_id: String,
}

impl PredictionRequest {
    pub fn new(category: &str, net_weight: f64, voucher_date: &str) -> Self {
        Self {
            category: category.to_string(),
            net_weight,
            voucher_date: voucher_date.to_string(),
            purity: DEFAULT_PURITY,
            store_id: default_store_id(),
        }
    }

    pub fn with_purity(mut self, purity: f64) -> Self {
        self.purity = purity;
        self
    }

    pub fn with_store(mut self, store_id: &str) -> Self {
        self.store_id = store_id.to_string();
        self
    }

    pub fn parse_date(&self) -> Result<NaiveDate, PredictionError> {
        NaiveDate::parse_from_str(&self.voucher_date, DATE_FORMAT).map_err(|e| {
            PredictionError::InvalidDate {
                value: self.voucher_date.clone(),
                reason: e.to_string(),
            }
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Bracelet,
    Chain,
    Earring,
    Necklace,
    Ring,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryMatch {
    Known(Category),
    /// No slot is flagged; the request still gets a prediction.
    NoMatch,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bracelet,
        Category::Chain,
        Category::Earring,
        Category::Necklace,
        Category::Ring,
    ];

    /// Short and long spelling accepted for this slot, uppercase.
    pub fn spellings(self) -> [&'static str; 2] {
        match self {
            Category::Bracelet => ["BRACELET", "GOLD BRACELET"],
            Category::Chain => ["CHAIN", "GOLD CHAINS"],
            Category::Earring => ["EARRING", "GOLD EARRING"],
            Category::Necklace => ["NECKLACE", "GOLD NECKLACE"],
            Category::Ring => ["RING", "GOLD RINGS"],
        }
    }

    pub fn feature(self) -> Feature {
        match self {
            Category::Bracelet => Feature::CategoryBracelet,
            Category::Chain => Feature::CategoryChains,
            Category::Earring => Feature::CategoryEarring,
            Category::Necklace => Feature::CategoryNecklace,
            Category::Ring => Feature::CategoryRings,
        }
    }

    pub fn classify(raw: &str) -> CategoryMatch {
        let upper = raw.to_uppercase();
        Category::ALL
            .into_iter()
            .find(|c| c.spellings().iter().any(|s| *s == upper))
            .map_or(CategoryMatch::NoMatch, CategoryMatch::Known)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    Main,
    Store1,
    Store2,
    Store3,
    Store4,
    Store5,
    Store6,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMatch {
    Known(Store),
    NoMatch,
}

impl Store {
    pub const ALL: [Store; 7] = [
        Store::Main,
        Store::Store1,
        Store::Store2,
        Store::Store3,
        Store::Store4,
        Store::Store5,
        Store::Store6,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Store::Main => "MAIN_STORE",
            Store::Store1 => "STORE_1",
            Store::Store2 => "STORE_2",
            Store::Store3 => "STORE_3",
            Store::Store4 => "STORE_4",
            Store::Store5 => "STORE_5",
            Store::Store6 => "STORE_6",
        }
    }

    pub fn feature(self) -> Feature {
        match self {
            Store::Main => Feature::StoreMain,
            Store::Store1 => Feature::Store1,
            Store::Store2 => Feature::Store2,
            Store::Store3 => Feature::Store3,
            Store::Store4 => Feature::Store4,
            Store::Store5 => Feature::Store5,
            Store::Store6 => Feature::Store6,
        }
    }

    /// Exact, case-sensitive match on the literal store id.
    pub fn classify(raw: &str) -> StoreMatch {
        Store::ALL
            .into_iter()
            .find(|s| s.id() == raw)
            .map_or(StoreMatch::NoMatch, StoreMatch::Known)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightBucket {
    Light,
    Medium,
    Heavy,
    VeryHeavy,
    UltraHeavy,
}

impl WeightBucket {
    /// Lower bound inclusive, upper bound exclusive. Negative (or NaN)
    /// weights belong to no bucket.
    pub fn classify(grams: f64) -> Option<WeightBucket> {
        if grams >= 50.0 {
            Some(WeightBucket::UltraHeavy)
        } else if grams >= 20.0 {
            Some(WeightBucket::VeryHeavy)
        } else if grams >= 10.0 {
            Some(WeightBucket::Heavy)
        } else if grams >= 5.0 {
            Some(WeightBucket::Medium)
        } else if grams >= 0.0 {
            Some(WeightBucket::Light)
        } else {
            None
        }
    }

    pub fn feature(self) -> Feature {
        match self {
            WeightBucket::Light => Feature::WeightLight,
            WeightBucket::Medium => Feature::WeightMedium,
            WeightBucket::Heavy => Feature::WeightHeavy,
            WeightBucket::VeryHeavy => Feature::WeightVeryHeavy,
            WeightBucket::UltraHeavy => Feature::WeightUltraHeavy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBracket {
    Budget,
    Mid,
    Premium,
    Luxury,
    Ultra,
}

impl PriceBracket {
    /// Classifies an estimated item value. Everything below 20000 is Budget,
    /// a NaN value belongs to no bracket.
    pub fn classify(value: f64) -> Option<PriceBracket> {
        if value >= 200_000.0 {
            Some(PriceBracket::Ultra)
        } else if value >= 100_000.0 {
            Some(PriceBracket::Luxury)
        } else if value >= 50_000.0 {
            Some(PriceBracket::Premium)
        } else if value >= 20_000.0 {
            Some(PriceBracket::Mid)
        } else if value < 20_000.0 {
            Some(PriceBracket::Budget)
        } else {
            None
        }
    }

    pub fn feature(self) -> Feature {
        match self {
            PriceBracket::Budget => Feature::PriceBudget,
            PriceBracket::Mid => Feature::PriceMid,
            PriceBracket::Premium => Feature::PricePremium,
            PriceBracket::Luxury => Feature::PriceLuxury,
            PriceBracket::Ultra => Feature::PriceUltra,
        }
    }
}

/// Estimated gold rate per gram for a karat purity.
pub fn price_per_gram(purity: f64) -> f64 {
    if purity == 22.0 {
        6000.0
    } else if purity == 18.0 {
        5500.0
    } else {
        6500.0
    }
}

/// Market statistics the model was trained with but that are not computed
/// per request. These are fixed stand-ins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceholderStats {
    pub market_share: f64,
    pub category_avg_market: f64,
    pub store_avg_sales: f64,
    pub sales_momentum: f64,
}

impl Default for PlaceholderStats {
    fn default() -> Self {
        Self {
            market_share: 13.0,
            category_avg_market: 90_000.0,
            store_avg_sales: 95_000.0,
            sales_momentum: 92_000.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeatureEncoder {
    stats: PlaceholderStats,
}

impl FeatureEncoder {
    pub fn new(stats: PlaceholderStats) -> Self {
        Self { stats }
    }

    pub fn stats(&self) -> &PlaceholderStats {
        &self.stats
    }

    pub fn encode(&self, request: &PredictionRequest) -> Result<FeatureArray, PredictionError> {
        let date = request.parse_date()?;
        let mut features = FeatureArray::zeros();

        encode_date(&mut features, date);

        let rate = price_per_gram(request.purity);
        features.set(Feature::NetWeight, request.net_weight);
        features.set(Feature::PricePerGram, rate);
        features.set(Feature::MarketShare, self.stats.market_share);
        features.set(Feature::CategoryAvgMarket, self.stats.category_avg_market);
        features.set(Feature::StoreAvgSales, self.stats.store_avg_sales);
        features.set(Feature::SalesMomentum, self.stats.sales_momentum);

        match Category::classify(&request.category) {
            CategoryMatch::Known(category) => features.flag(category.feature()),
            CategoryMatch::NoMatch => {}
        }

        if let Some(bucket) = WeightBucket::classify(request.net_weight) {
            features.flag(bucket.feature());
        }

        if let Some(bracket) = PriceBracket::classify(rate * request.net_weight) {
            features.flag(bracket.feature());
        }

        match Store::classify(&request.store_id) {
            StoreMatch::Known(store) => features.flag(store.feature()),
            StoreMatch::NoMatch => {}
        }

        Ok(features)
    }
}

fn encode_date(features: &mut FeatureArray, date: NaiveDate) {
    let weekday = date.weekday();
    features.set(Feature::Year, f64::from(date.year()));
    features.set(Feature::Month, f64::from(date.month()));
    features.set(Feature::Day, f64::from(date.day()));
    features.set(Feature::DayOfWeek, f64::from(weekday.num_days_from_monday()));
    features.set(Feature::WeekOfYear, f64::from(date.iso_week().week()));
    let weekend = matches!(weekday, Weekday::Sat | Weekday::Sun);
    features.set(Feature::IsWeekend, if weekend { 1.0 } else { 0.0 });
    // No festival calendar yet.
    features.set(Feature::IsFestival, 0.0);
}
