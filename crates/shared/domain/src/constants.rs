//! Domain-level constants.
//!
//! These constants define the fixed shapes of persisted invoicing data.

use crate::money::DecimalSpec;

// =============================================================================
// Currencies
// =============================================================================

/// Default billing currency for a newly registered user
pub const DEFAULT_USER_CURRENCY: &str = "NGN";

/// Default currency for a newly created customer
pub const DEFAULT_CUSTOMER_CURRENCY: &str = "USD";

/// ISO 4217 currency codes are always three letters
pub const CURRENCY_CODE_LENGTH: u32 = 3;

// =============================================================================
// Text Lengths
// =============================================================================

/// Names, emails, company names
pub const NAME_LENGTH: u32 = 255;

/// Tax identifiers and phone numbers
pub const SHORT_CODE_LENGTH: u32 = 50;

/// Invoice numbers (unique per user)
pub const INVOICE_NUMBER_LENGTH: u32 = 50;

/// Payment method labels
pub const PAYMENT_METHOD_LENGTH: u32 = 100;

/// Payment references
pub const PAYMENT_REFERENCE_LENGTH: u32 = 255;

// =============================================================================
// Fixed-Precision Decimals
// =============================================================================

/// Invoice totals, budgets, line amounts, payments
pub const MONEY: DecimalSpec = DecimalSpec::new(12, 2);

/// Hourly rates
pub const RATE: DecimalSpec = DecimalSpec::new(10, 2);

/// Budgeted hours and line item quantities
pub const QUANTITY: DecimalSpec = DecimalSpec::new(10, 2);

/// Hours logged on a single time entry
pub const HOURS: DecimalSpec = DecimalSpec::new(8, 2);

/// Tax rate as a percentage (e.g. 7.50)
pub const TAX_RATE: DecimalSpec = DecimalSpec::new(5, 2);

// =============================================================================
// Line Items
// =============================================================================

/// Display order assigned when none is given
pub const DEFAULT_LINE_ITEM_ORDER: i32 = 0;
