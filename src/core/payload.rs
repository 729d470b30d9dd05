use crate::domain::model::{LineItem, OrderPayload};
use crate::utils::error::{LoadTestError, Result};
use crate::utils::validation::{validate_bounds, validate_range, Validate};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// 每筆訂單的品項數上限
pub const MAX_ITEMS_PER_ORDER: usize = 100;

/// 訂單各欄位的隨機取值範圍（皆為閉區間）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadRanges {
    pub customer_id: (u32, u32),
    pub product_number: (u32, u32),
    pub quantity: (u32, u32),
    /// 價格以「分」表示，產生時轉成兩位小數
    pub price_cents: (i64, i64),
    pub items_per_order: (usize, usize),
}

impl Default for PayloadRanges {
    fn default() -> Self {
        Self {
            customer_id: (1, 1000),
            product_number: (1, 100),
            quantity: (1, 5),
            price_cents: (1_000, 10_000),
            items_per_order: (1, 1),
        }
    }
}

impl Validate for PayloadRanges {
    fn validate(&self) -> Result<()> {
        validate_bounds("payload.customer_id", self.customer_id.0, self.customer_id.1)?;
        validate_bounds(
            "payload.product_number",
            self.product_number.0,
            self.product_number.1,
        )?;
        validate_bounds("payload.quantity", self.quantity.0, self.quantity.1)?;
        validate_bounds("payload.price_cents", self.price_cents.0, self.price_cents.1)?;
        validate_bounds(
            "payload.items_per_order",
            self.items_per_order.0,
            self.items_per_order.1,
        )?;

        if self.items_per_order.0 == 0 {
            return Err(LoadTestError::InvalidConfigValueError {
                field: "payload.items_per_order".to_string(),
                value: self.items_per_order.0.to_string(),
                reason: "An order needs at least one line item".to_string(),
            });
        }
        validate_range(
            "payload.items_per_order",
            self.items_per_order.1,
            1,
            MAX_ITEMS_PER_ORDER,
        )?;
        if self.quantity.0 == 0 || self.customer_id.0 == 0 || self.product_number.0 == 0 {
            return Err(LoadTestError::ConfigError {
                message: "customer_id, product_number and quantity must start at 1 or above"
                    .to_string(),
            });
        }
        if self.price_cents.0 < 0 {
            return Err(LoadTestError::InvalidConfigValueError {
                field: "payload.price_cents".to_string(),
                value: self.price_cents.0.to_string(),
                reason: "Price cannot be negative".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderGenerator {
    ranges: PayloadRanges,
}

impl OrderGenerator {
    pub fn new(ranges: PayloadRanges) -> Result<Self> {
        ranges.validate()?;
        Ok(Self { ranges })
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> OrderPayload {
        let item_count = rng.gen_range(inclusive(self.ranges.items_per_order));
        let items = (0..item_count.max(1))
            .map(|_| self.generate_item(rng))
            .collect();

        OrderPayload {
            customer_id: rng.gen_range(inclusive(self.ranges.customer_id)),
            items,
        }
    }

    fn generate_item<R: Rng + ?Sized>(&self, rng: &mut R) -> LineItem {
        let product_number = rng.gen_range(inclusive(self.ranges.product_number));
        let cents = rng.gen_range(inclusive(self.ranges.price_cents));

        LineItem {
            product_id: format!("item-{}", product_number),
            quantity: rng.gen_range(inclusive(self.ranges.quantity)),
            price: Decimal::new(cents, 2),
        }
    }
}

fn inclusive<T>((low, high): (T, T)) -> RangeInclusive<T> {
    low..=high
}
