use crate::domain::errors::ModelPackageError;
use std::ops::{Index, IndexMut};

/// Every feature the encoder knows how to produce.
///
/// The string names MUST match the column names used by the training
/// pipeline exactly (including the spaces in product categories). The
/// discriminant doubles as the slot index inside a [`FeatureArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Year,
    Month,
    Day,
    DayOfWeek,
    WeekOfYear,
    IsWeekend,
    IsFestival,
    NetWeight,
    PricePerGram,
    MarketShare,
    CategoryAvgMarket,
    StoreAvgSales,
    SalesMomentum,
    CategoryBracelet,
    CategoryChains,
    CategoryEarring,
    CategoryNecklace,
    CategoryRings,
    WeightLight,
    WeightMedium,
    WeightHeavy,
    WeightVeryHeavy,
    WeightUltraHeavy,
    PriceBudget,
    PriceMid,
    PricePremium,
    PriceLuxury,
    PriceUltra,
    StoreMain,
    Store1,
    Store2,
    Store3,
    Store4,
    Store5,
    Store6,
}

pub const FEATURE_COUNT: usize = 35;

impl Feature {
    /// Canonical order, identical to the discriminant order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Year,
        Feature::Month,
        Feature::Day,
        Feature::DayOfWeek,
        Feature::WeekOfYear,
        Feature::IsWeekend,
        Feature::IsFestival,
        Feature::NetWeight,
        Feature::PricePerGram,
        Feature::MarketShare,
        Feature::CategoryAvgMarket,
        Feature::StoreAvgSales,
        Feature::SalesMomentum,
        Feature::CategoryBracelet,
        Feature::CategoryChains,
        Feature::CategoryEarring,
        Feature::CategoryNecklace,
        Feature::CategoryRings,
        Feature::WeightLight,
        Feature::WeightMedium,
        Feature::WeightHeavy,
        Feature::WeightVeryHeavy,
        Feature::WeightUltraHeavy,
        Feature::PriceBudget,
        Feature::PriceMid,
        Feature::PricePremium,
        Feature::PriceLuxury,
        Feature::PriceUltra,
        Feature::StoreMain,
        Feature::Store1,
        Feature::Store2,
        Feature::Store3,
        Feature::Store4,
        Feature::Store5,
        Feature::Store6,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::Year => "year",
            Feature::Month => "month",
            Feature::Day => "day",
            Feature::DayOfWeek => "day_of_week",
            Feature::WeekOfYear => "week_of_year",
            Feature::IsWeekend => "is_weekend",
            Feature::IsFestival => "is_festival",
            Feature::NetWeight => "net_weight",
            Feature::PricePerGram => "price_per_gram",
            Feature::MarketShare => "market_share",
            Feature::CategoryAvgMarket => "category_avg_market",
            Feature::StoreAvgSales => "store_avg_sales",
            Feature::SalesMomentum => "sales_momentum",
            Feature::CategoryBracelet => "product_category_GOLD BRACELET",
            Feature::CategoryChains => "product_category_GOLD CHAINS",
            Feature::CategoryEarring => "product_category_GOLD EARRING",
            Feature::CategoryNecklace => "product_category_GOLD NECKLACE",
            Feature::CategoryRings => "product_category_GOLD RINGS",
            Feature::WeightLight => "weight_category_Light",
            Feature::WeightMedium => "weight_category_Medium",
            Feature::WeightHeavy => "weight_category_Heavy",
            Feature::WeightVeryHeavy => "weight_category_Very_Heavy",
            Feature::WeightUltraHeavy => "weight_category_Ultra_Heavy",
            Feature::PriceBudget => "price_bracket_Budget",
            Feature::PriceMid => "price_bracket_Mid",
            Feature::PricePremium => "price_bracket_Premium",
            Feature::PriceLuxury => "price_bracket_Luxury",
            Feature::PriceUltra => "price_bracket_Ultra",
            Feature::StoreMain => "store_id_MAIN_STORE",
            Feature::Store1 => "store_id_STORE_1",
            Feature::Store2 => "store_id_STORE_2",
            Feature::Store3 => "store_id_STORE_3",
            Feature::Store4 => "store_id_STORE_4",
            Feature::Store5 => "store_id_STORE_5",
            Feature::Store6 => "store_id_STORE_6",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.iter().copied().find(|f| f.name() == name)
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Dense feature values for one request, one slot per [`Feature`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureArray([f64; FEATURE_COUNT]);

impl FeatureArray {
    pub fn zeros() -> Self {
        Self([0.0; FEATURE_COUNT])
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        self.0[feature.index()] = value;
    }

    pub fn flag(&mut self, feature: Feature) {
        self.set(feature, 1.0);
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Default for FeatureArray {
    fn default() -> Self {
        Self::zeros()
    }
}

impl Index<Feature> for FeatureArray {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl IndexMut<Feature> for FeatureArray {
    fn index_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.0[feature.index()]
    }
}

/// Column order a fitted model expects, resolved against the registry once
/// when the model package is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureLayout {
    columns: Vec<Feature>,
}

impl FeatureLayout {
    /// Resolves the training column names. Any name the encoder cannot
    /// produce fails here so that no request ever sees a missing column.
    pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<Self, ModelPackageError> {
        let columns = names
            .iter()
            .enumerate()
            .map(|(position, name)| {
                Feature::from_name(name.as_ref()).ok_or_else(|| ModelPackageError::UnknownFeature {
                    name: name.as_ref().to_string(),
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { columns })
    }

    /// Layout matching the registry's canonical order.
    pub fn canonical() -> Self {
        Self {
            columns: Feature::ALL.to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Feature] {
        &self.columns
    }

    pub fn project(&self, features: &FeatureArray) -> Vec<f64> {
        self.columns.iter().map(|&f| features[f]).collect()
    }
}
