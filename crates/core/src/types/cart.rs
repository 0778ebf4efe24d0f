//! Client-side cart of pending subscription selections.
//!
//! A [`Cart`] holds at most one [`CartLine`] per publication. Line totals are
//! always derived from price and period, never trusted from storage.

use serde::{Deserialize, Serialize};

use super::{Price, PublicationId, SubscriptionPeriod};

/// One pending subscription selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredLine")]
pub struct CartLine {
    /// Publication being subscribed to.
    #[serde(rename = "id")]
    pub publication_id: PublicationId,
    /// Publication title, kept for display without a catalog lookup.
    pub title: String,
    /// Monthly price at the time the line was added.
    pub price_per_month: Price,
    period: SubscriptionPeriod,
    /// `price_per_month × period`.
    total_price: Price,
}

/// Persisted shape of a line; any stored total is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLine {
    id: PublicationId,
    title: String,
    price_per_month: Price,
    period: SubscriptionPeriod,
}

impl From<StoredLine> for CartLine {
    fn from(stored: StoredLine) -> Self {
        Self::new(stored.id, stored.title, stored.price_per_month, stored.period)
    }
}

impl CartLine {
    /// Create a line, deriving its total.
    #[must_use]
    pub fn new(
        publication_id: PublicationId,
        title: impl Into<String>,
        price_per_month: Price,
        period: SubscriptionPeriod,
    ) -> Self {
        Self {
            publication_id,
            title: title.into(),
            price_per_month,
            period,
            total_price: price_per_month.times_months(period.months()),
        }
    }

    /// Chosen period.
    #[must_use]
    pub const fn period(&self) -> SubscriptionPeriod {
        self.period
    }

    /// `price_per_month × period`.
    #[must_use]
    pub const fn total_price(&self) -> Price {
        self.total_price
    }

    fn set_period(&mut self, period: SubscriptionPeriod) {
        self.period = period;
        self.total_price = self.price_per_month.times_months(period.months());
    }
}

/// Ordered pending lines, unique by publication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Insert a line, or overwrite the period of the line already present
    /// for the same publication (keeping its position).
    pub fn upsert(&mut self, line: CartLine) {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.publication_id == line.publication_id)
        {
            existing.set_period(line.period);
        } else {
            self.lines.push(line);
        }
    }

    /// Remove lines matching both publication and period.
    ///
    /// Returns `true` if a line was removed.
    pub fn remove(&mut self, publication_id: PublicationId, period: SubscriptionPeriod) -> bool {
        let before = self.lines.len();
        self.lines
            .retain(|l| !(l.publication_id == publication_id && l.period == period));
        self.lines.len() != before
    }

    /// Change the period of a publication's line.
    ///
    /// Returns `false` if the publication is not in the cart.
    pub fn set_period(&mut self, publication_id: PublicationId, period: SubscriptionPeriod) -> bool {
        let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.publication_id == publication_id)
        else {
            return false;
        };
        line.set_period(period);
        true
    }

    /// Sum of line totals, rounded to two decimal places.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::total_price).sum::<Price>().rounded()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Find the line for a publication.
    #[must_use]
    pub fn get(&self, publication_id: PublicationId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.publication_id == publication_id)
    }
}

/// Rebuilds uniqueness when loading lines from storage.
impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            cart.upsert(line);
        }
        cart
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
