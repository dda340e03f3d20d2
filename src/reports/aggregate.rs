//! Aggregator
//!
//! Reduces a set of transactions into inflow/outflow totals, a separate
//! transfer bucket, and ordered category and payment-method breakdowns.
//!
//! Every transaction lands in exactly one of inflow, outflow or transfers.
//! Accumulation goes through [`Tally`], whose `merge` is a plain sum, so
//! partial tallies over shards of a large set can be combined in any order
//! before the breakdowns are sorted.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::transaction::title_case;
use crate::models::{Flow, Money, Transaction, TransferKind};

/// Grouping key of the transfer entry in the category breakdown
pub const TRANSFERS_KEY: &str = "transfers";

/// Display label of the transfer entry in the category breakdown
pub const TRANSFERS_LABEL: &str = "Transfers";

/// Key used for outflows that carry no payment method
pub const UNSPECIFIED_METHOD: &str = "unspecified";

/// Switches that widen the category breakdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateOptions {
    /// Add inflow amounts to the per-category entries
    #[serde(default)]
    pub include_inflow_categories: bool,
    /// Surface the transfer bucket as its own breakdown entry
    #[serde(default)]
    pub include_transfers_in_breakdown: bool,
}

/// Which bucket a breakdown entry comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakdownBucket {
    /// A user category
    Category,
    /// The bank transfer bucket
    Transfers,
}

/// One entry of the category breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    /// Normalized grouping key
    pub key: String,
    /// Display label
    pub label: String,
    /// Summed amount
    #[serde(rename = "value")]
    pub amount: Money,
    /// Number of contributing transactions
    pub transaction_count: usize,
    /// Source bucket
    pub bucket: BreakdownBucket,
}

impl CategoryTotal {
    /// Share of `total` taken by this entry, in percent with one digit
    pub fn share_of(&self, total: Money) -> Decimal {
        percent_of(self.amount, total)
    }

    /// Check if this entry is the transfer bucket
    pub fn is_transfers(&self) -> bool {
        self.bucket == BreakdownBucket::Transfers
    }
}

/// Outflow total for one payment method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodTotal {
    /// Lower-cased payment method key
    pub method: String,
    /// Summed outflow amount
    #[serde(rename = "value")]
    pub amount: Money,
    /// Number of contributing transactions
    pub transaction_count: usize,
}

/// Bank transfer bucket, kept apart from inflow and outflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferTotals {
    pub deposits: Money,
    pub withdrawals: Money,
}

impl TransferTotals {
    /// Total money moved in either direction
    pub fn total(&self) -> Money {
        self.deposits + self.withdrawals
    }

    /// Deposits minus withdrawals
    pub fn net(&self) -> Money {
        self.deposits - self.withdrawals
    }

    fn add(&mut self, kind: TransferKind, amount: Money) {
        match kind {
            TransferKind::Deposit => self.deposits += amount,
            TransferKind::Withdrawal => self.withdrawals += amount,
        }
    }
}

/// Reduced view of a transaction set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    pub total_inflow: Money,
    pub total_outflow: Money,
    pub transfers: TransferTotals,
    pub inflow_count: usize,
    pub outflow_count: usize,
    pub transfer_count: usize,
    /// Ordered by amount descending, then label ascending
    pub by_category: Vec<CategoryTotal>,
    /// Outflows per payment method, same ordering
    pub by_payment_method: Vec<MethodTotal>,
}

impl Aggregation {
    /// Total inflow minus total outflow
    pub fn net(&self) -> Money {
        self.total_inflow - self.total_outflow
    }

    /// Number of transactions that were aggregated
    pub fn transaction_count(&self) -> usize {
        self.inflow_count + self.outflow_count + self.transfer_count
    }

    /// Check if no transaction contributed
    pub fn is_empty(&self) -> bool {
        self.transaction_count() == 0
    }

    /// Largest category entry, ignoring the transfer bucket
    pub fn top_category(&self) -> Option<&CategoryTotal> {
        self.by_category.iter().find(|c| !c.is_transfers())
    }

    /// Top `limit` category entries, ignoring the transfer bucket
    pub fn top_categories(&self, limit: usize) -> Vec<&CategoryTotal> {
        self.by_category
            .iter()
            .filter(|c| !c.is_transfers())
            .take(limit)
            .collect()
    }

    /// Sum of all breakdown values
    pub fn category_sum(&self) -> Money {
        self.by_category.iter().map(|c| c.amount).sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Bucket {
    amount: Money,
    count: usize,
}

impl Bucket {
    fn add(&mut self, amount: Money) {
        self.amount += amount;
        self.count += 1;
    }

    fn merge(&mut self, other: Bucket) {
        self.amount += other.amount;
        self.count += other.count;
    }
}

/// Running accumulator behind [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    options: AggregateOptions,
    total_inflow: Money,
    total_outflow: Money,
    transfers: TransferTotals,
    inflow_count: usize,
    outflow_count: usize,
    transfer_count: usize,
    categories: HashMap<String, Bucket>,
    payment_methods: HashMap<String, Bucket>,
}

impl Tally {
    /// Create an empty tally
    pub fn new(options: AggregateOptions) -> Self {
        Self {
            options,
            ..Default::default()
        }
    }

    /// Account for one transaction
    pub fn add(&mut self, txn: &Transaction) {
        match txn.flow {
            Flow::Inflow => {
                self.total_inflow += txn.amount;
                self.inflow_count += 1;
                if self.options.include_inflow_categories {
                    self.category_bucket(&txn.category.key).add(txn.amount);
                }
            }
            Flow::Outflow => {
                self.total_outflow += txn.amount;
                self.outflow_count += 1;
                self.category_bucket(&txn.category.key).add(txn.amount);

                let method = txn.payment_method.as_deref().unwrap_or(UNSPECIFIED_METHOD);
                self.payment_methods
                    .entry(method.to_string())
                    .or_default()
                    .add(txn.amount);
            }
            Flow::Transfer(kind) => {
                self.transfers.add(kind, txn.amount);
                self.transfer_count += 1;
            }
        }
    }

    /// Combine two tallies; associative and commutative
    pub fn merge(mut self, other: Tally) -> Tally {
        self.total_inflow += other.total_inflow;
        self.total_outflow += other.total_outflow;
        self.transfers.deposits += other.transfers.deposits;
        self.transfers.withdrawals += other.transfers.withdrawals;
        self.inflow_count += other.inflow_count;
        self.outflow_count += other.outflow_count;
        self.transfer_count += other.transfer_count;

        for (key, bucket) in other.categories {
            self.categories.entry(key).or_default().merge(bucket);
        }
        for (method, bucket) in other.payment_methods {
            self.payment_methods.entry(method).or_default().merge(bucket);
        }
        self
    }

    /// Produce the ordered aggregation
    pub fn finish(self) -> Aggregation {
        let mut by_category: Vec<CategoryTotal> = self
            .categories
            .into_iter()
            .map(|(key, bucket)| CategoryTotal {
                label: title_case(&key),
                key,
                amount: bucket.amount,
                transaction_count: bucket.count,
                bucket: BreakdownBucket::Category,
            })
            .collect();

        if self.options.include_transfers_in_breakdown && self.transfer_count > 0 {
            by_category.push(CategoryTotal {
                key: TRANSFERS_KEY.to_string(),
                label: TRANSFERS_LABEL.to_string(),
                amount: self.transfers.total(),
                transaction_count: self.transfer_count,
                bucket: BreakdownBucket::Transfers,
            });
        }

        by_category.sort_by(|a, b| {
            by_amount_then_name(a.amount, &a.label, b.amount, &b.label)
                .then_with(|| a.key.cmp(&b.key))
                .then_with(|| a.bucket.cmp(&b.bucket))
        });

        let mut by_payment_method: Vec<MethodTotal> = self
            .payment_methods
            .into_iter()
            .map(|(method, bucket)| MethodTotal {
                method,
                amount: bucket.amount,
                transaction_count: bucket.count,
            })
            .collect();
        by_payment_method
            .sort_by(|a, b| by_amount_then_name(a.amount, &a.method, b.amount, &b.method));

        Aggregation {
            total_inflow: self.total_inflow,
            total_outflow: self.total_outflow,
            transfers: self.transfers,
            inflow_count: self.inflow_count,
            outflow_count: self.outflow_count,
            transfer_count: self.transfer_count,
            by_category,
            by_payment_method,
        }
    }

    fn category_bucket(&mut self, key: &str) -> &mut Bucket {
        self.categories.entry(key.to_string()).or_default()
    }
}

/// Reduce a transaction set
///
/// Empty input yields zero totals and empty breakdowns.
pub fn aggregate<'a, I>(transactions: I, options: AggregateOptions) -> Aggregation
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut tally = Tally::new(options);
    for txn in transactions {
        tally.add(txn);
    }
    tally.finish()
}

/// Amount descending, ties broken by name ascending
fn by_amount_then_name(a_amount: Money, a_name: &str, b_amount: Money, b_name: &str) -> Ordering {
    b_amount.cmp(&a_amount).then_with(|| a_name.cmp(b_name))
}

/// `part / total * 100`, one fraction digit; zero when `total` is zero
pub fn percent_of(part: Money, total: Money) -> Decimal {
    percentage(part.amount(), total.amount())
}

/// `part / whole * 100` rounded by [`round_percent`]
///
/// Zero when `whole` is zero. A ratio beyond the decimal range saturates
/// at `Decimal::MAX` or `Decimal::MIN`.
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return round_percent(Decimal::ZERO);
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(value) => round_percent(value),
        None if part.is_sign_negative() != whole.is_sign_negative() => Decimal::MIN,
        None => Decimal::MAX,
    }
}

/// Round a percentage to exactly one fraction digit, midpoint away from zero
pub fn round_percent(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(1);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn txn(flow: Flow, cents: i64, category: &str) -> Transaction {
        Transaction::new(
            flow,
            Money::from_cents(cents),
            category,
            Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap(),
        )
    }

    fn deposit(cents: i64) -> Transaction {
        txn(Flow::Transfer(TransferKind::Deposit), cents, "bank")
    }

    fn withdrawal(cents: i64) -> Transaction {
        txn(Flow::Transfer(TransferKind::Withdrawal), cents, "bank")
    }

    #[test]
    fn test_empty_input() {
        let agg = aggregate(&[], AggregateOptions::default());
        assert!(agg.total_inflow.is_zero());
        assert!(agg.total_outflow.is_zero());
        assert!(agg.transfers.total().is_zero());
        assert!(agg.by_category.is_empty());
        assert!(agg.by_payment_method.is_empty());
        assert!(agg.top_category().is_none());
        assert!(agg.is_empty());
    }

    #[test]
    fn test_totals_by_flow() {
        let transactions = vec![
            txn(Flow::Outflow, 5000, "Food"),
            txn(Flow::Outflow, 3000, "food"),
            txn(Flow::Inflow, 20000, "Salary"),
        ];

        let agg = aggregate(&transactions, AggregateOptions::default());
        assert_eq!(agg.total_inflow, Money::from_units(200));
        assert_eq!(agg.total_outflow, Money::from_units(80));
        assert_eq!(agg.net(), Money::from_units(120));
        assert_eq!(agg.by_category.len(), 1);
        assert_eq!(agg.by_category[0].label, "Food");
        assert_eq!(agg.by_category[0].amount, Money::from_units(80));
        assert_eq!(agg.by_category[0].transaction_count, 2);
    }

    #[test]
    fn test_each_transaction_counted_once() {
        let transactions = vec![
            txn(Flow::Outflow, 100, "a"),
            txn(Flow::Inflow, 200, "b"),
            deposit(300),
            withdrawal(400),
        ];

        let agg = aggregate(&transactions, AggregateOptions::default());
        let counted = agg.total_inflow + agg.total_outflow + agg.transfers.total();
        let input: Money = transactions.iter().map(|t| t.amount).sum();
        assert_eq!(counted, input);
        assert_eq!(agg.transaction_count(), transactions.len());
    }

    #[test]
    fn test_category_sum_matches_outflow() {
        let transactions = vec![
            txn(Flow::Outflow, 1234, "Transport"),
            txn(Flow::Outflow, 999, "bills"),
            txn(Flow::Outflow, 1, "Bills"),
            txn(Flow::Inflow, 5000, "Salary"),
        ];

        let agg = aggregate(&transactions, AggregateOptions::default());
        assert_eq!(agg.category_sum(), agg.total_outflow);
    }

    #[test]
    fn test_ordering_and_tie_break() {
        let transactions = vec![
            txn(Flow::Outflow, 1000, "shopping"),
            txn(Flow::Outflow, 2500, "tour"),
            txn(Flow::Outflow, 1000, "bills"),
            txn(Flow::Outflow, 1000, "Food"),
        ];

        let agg = aggregate(&transactions, AggregateOptions::default());
        let labels: Vec<_> = agg.by_category.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Tour", "Bills", "Food", "Shopping"]);
    }

    #[test]
    fn test_uncategorized_bucket() {
        let mut untagged = txn(Flow::Outflow, 700, "x");
        untagged.category = crate::models::CategoryName::new(None);

        let agg = aggregate(&[untagged], AggregateOptions::default());
        assert_eq!(agg.by_category[0].label, "Uncategorized");
    }

    #[test]
    fn test_transfers_kept_out_of_totals() {
        let transactions = vec![deposit(10000), withdrawal(2500), txn(Flow::Outflow, 100, "food")];

        let agg = aggregate(&transactions, AggregateOptions::default());
        assert_eq!(agg.total_outflow, Money::from_cents(100));
        assert!(agg.total_inflow.is_zero());
        assert_eq!(agg.transfers.deposits, Money::from_units(100));
        assert_eq!(agg.transfers.withdrawals, Money::from_units(25));
        assert_eq!(agg.transfers.net(), Money::from_units(75));
        assert!(agg.by_category.iter().all(|c| !c.is_transfers()));
    }

    #[test]
    fn test_transfers_in_breakdown() {
        let transactions = vec![deposit(10000), withdrawal(2500), txn(Flow::Outflow, 100, "food")];
        let options = AggregateOptions {
            include_transfers_in_breakdown: true,
            ..Default::default()
        };

        let agg = aggregate(&transactions, options);
        assert_eq!(agg.by_category.len(), 2);
        assert_eq!(agg.by_category[0].label, TRANSFERS_LABEL);
        assert_eq!(agg.by_category[0].amount, Money::from_units(125));
        assert_eq!(agg.by_category[0].transaction_count, 2);
        assert_eq!(agg.top_category().unwrap().label, "Food");
        assert_eq!(agg.total_outflow, Money::from_cents(100));
    }

    #[test]
    fn test_transfer_entry_omitted_without_transfers() {
        let options = AggregateOptions {
            include_transfers_in_breakdown: true,
            ..Default::default()
        };
        let agg = aggregate(&[txn(Flow::Outflow, 100, "food")], options);
        assert_eq!(agg.by_category.len(), 1);
    }

    #[test]
    fn test_inflow_categories_option() {
        let transactions = vec![
            txn(Flow::Inflow, 20000, "Salary"),
            txn(Flow::Outflow, 5000, "Food"),
        ];

        let default = aggregate(&transactions, AggregateOptions::default());
        assert_eq!(default.by_category.len(), 1);

        let options = AggregateOptions {
            include_inflow_categories: true,
            ..Default::default()
        };
        let widened = aggregate(&transactions, options);
        let labels: Vec<_> = widened.by_category.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Salary", "Food"]);
        assert_eq!(widened.total_inflow, default.total_inflow);
    }

    #[test]
    fn test_payment_methods() {
        let transactions = vec![
            txn(Flow::Outflow, 500, "food").with_payment_method("cash"),
            txn(Flow::Outflow, 700, "food").with_payment_method("BKASH"),
            txn(Flow::Outflow, 300, "bills").with_payment_method("cash"),
            txn(Flow::Outflow, 100, "bills"),
            txn(Flow::Inflow, 9000, "salary").with_payment_method("bank"),
        ];

        let agg = aggregate(&transactions, AggregateOptions::default());
        let methods: Vec<_> = agg
            .by_payment_method
            .iter()
            .map(|m| (m.method.as_str(), m.amount))
            .collect();
        assert_eq!(
            methods,
            vec![
                ("cash", Money::from_cents(800)),
                ("bkash", Money::from_cents(700)),
                (UNSPECIFIED_METHOD, Money::from_cents(100)),
            ]
        );
    }

    #[test]
    fn test_idempotent() {
        let transactions = vec![
            txn(Flow::Outflow, 1000, "a"),
            txn(Flow::Outflow, 1000, "b"),
            txn(Flow::Inflow, 3000, "c"),
            deposit(50),
        ];
        let options = AggregateOptions {
            include_transfers_in_breakdown: true,
            include_inflow_categories: true,
        };

        assert_eq!(aggregate(&transactions, options), aggregate(&transactions, options));
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let transactions: Vec<_> = (0..20)
            .map(|i| match i % 4 {
                0 => txn(Flow::Inflow, 1000 + i, "salary"),
                1 => txn(Flow::Outflow, 300 + i, "food"),
                2 => txn(Flow::Outflow, 200 + i, "Transport").with_payment_method("cash"),
                _ => deposit(50 + i),
            })
            .collect();
        let options = AggregateOptions::default();

        let merged = transactions
            .chunks(3)
            .map(|chunk| {
                let mut tally = Tally::new(options);
                chunk.iter().for_each(|t| tally.add(t));
                tally
            })
            .rev()
            .fold(Tally::new(options), Tally::merge)
            .finish();

        assert_eq!(merged, aggregate(&transactions, options));
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(Money::from_units(1), Money::from_units(3)), Decimal::new(333, 1));
        assert_eq!(percent_of(Money::from_units(5), Money::zero()), Decimal::ZERO);
        assert_eq!(percent_of(Money::from_units(4), Money::from_units(4)).to_string(), "100.0");
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let huge = |category: &str| {
            let mut t = txn(Flow::Outflow, 0, category);
            t.amount = Money::from_decimal(Decimal::MAX);
            t
        };
        let transactions = vec![huge("rent"), huge("rent")];

        let agg = aggregate(&transactions, AggregateOptions::default());
        assert_eq!(agg.total_outflow, Money::from_decimal(Decimal::MAX));
        assert_eq!(agg.by_category[0].amount, Money::from_decimal(Decimal::MAX));

        let mut left = Tally::new(AggregateOptions::default());
        left.add(&transactions[0]);
        let mut right = Tally::new(AggregateOptions::default());
        right.add(&transactions[1]);
        assert_eq!(left.merge(right).finish(), agg);
    }

    #[test]
    fn test_percentage_saturates() {
        assert_eq!(percentage(Decimal::MAX, Decimal::new(1, 2)), Decimal::MAX);
        assert_eq!(percentage(Decimal::MIN, Decimal::new(1, 2)), Decimal::MIN);
        assert_eq!(percentage(Decimal::ONE, Decimal::ZERO), Decimal::ZERO);
    }
}
