use std::sync::LazyLock;

use chrono::{DateTime, TimeZone, Utc};
use microcuenca_models::tracking::TrackingId;

pub mod contact;

/// 2026-10-19 14:05 in Guatemala.
pub static NOW: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2026, 10, 19, 20, 5, 0).unwrap());

pub static SERVICE_STARTED_AT: LazyLock<DateTime<Utc>> =
    LazyLock::new(|| Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap());

pub static TRACKING_ID_1: LazyLock<TrackingId> =
    LazyLock::new(|| "MC_1792440300000_k3j9x0abc".parse().unwrap());
