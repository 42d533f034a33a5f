//! Response shaping for Inven!RA.
//!
//! Both functions currently return their input unchanged. They are the
//! single place where analytics and the contract get reshaped once the
//! repository stops producing the Inven!RA format directly.

use proplan_types::{AnalyticsContract, StudentAnalytics};

/// Normalizes analytics records for `analytics_url`.
pub fn normalize_analytics(records: Vec<StudentAnalytics>) -> Vec<StudentAnalytics> {
    records
}

/// Normalizes the analytics contract for `analytics_list_url`.
pub fn normalize_contract(contract: AnalyticsContract) -> AnalyticsContract {
    contract
}
