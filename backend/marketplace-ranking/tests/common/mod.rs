#![allow(dead_code)]

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use marketplace_ranking::models::{
    GeoPoint, Listing, PaymentHistory, PaymentMethod, PaymentType, PickupWindow, RiskTolerance,
    SearchQuery, UserPaymentProfile,
};

/// Fixed evaluation time: Saturday 2024-06-01 14:00 UTC
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap()
}

/// Lower Manhattan
pub fn user_location() -> GeoPoint {
    GeoPoint::new(40.7128, -74.0060)
}

/// A point `km` kilometers due north of the user
pub fn north_of_user(km: f64) -> GeoPoint {
    let origin = user_location();
    GeoPoint::new(origin.lat + km / 111.194_926_644_558_73, origin.lon)
}

fn daytime_window() -> PickupWindow {
    PickupWindow {
        start: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
    }
}

pub fn iphone() -> Listing {
    Listing {
        id: "listing-iphone".to_string(),
        name: "iPhone 13".to_string(),
        category: "Electronics".to_string(),
        tags: vec!["phone".to_string(), "apple".to_string(), "ios".to_string()],
        location: user_location(),
        listing_time: now(),
        created_at: now(),
        pickup_window: daytime_window(),
        seller_reputation: 0.95,
        unanswered_requests: 0,
        available: true,
    }
}

pub fn samsung() -> Listing {
    Listing {
        id: "listing-samsung".to_string(),
        name: "Samsung Galaxy S21".to_string(),
        category: "Electronics".to_string(),
        tags: vec!["phone".to_string(), "android".to_string()],
        location: north_of_user(1.5),
        listing_time: now() - Duration::hours(19),
        created_at: now() - Duration::hours(19),
        pickup_window: daytime_window(),
        seller_reputation: 0.88,
        unanswered_requests: 4,
        available: true,
    }
}

pub fn phone_query() -> SearchQuery {
    SearchQuery {
        keywords: "phone".to_string(),
        category: Some("Electronics".to_string()),
        user_location: user_location(),
        current_time: now(),
    }
}

pub fn method(id: &str, method_type: PaymentType, fee: f64) -> PaymentMethod {
    PaymentMethod {
        id: id.to_string(),
        name: id.to_string(),
        method_type,
        transaction_fee: fee,
        available: true,
        requires_online: matches!(
            method_type,
            PaymentType::Card | PaymentType::Paypal | PaymentType::Wallet
        ),
    }
}

pub fn history(method_id: &str, success: u32, total: u32, days_ago: i64) -> PaymentHistory {
    PaymentHistory {
        method_id: method_id.to_string(),
        success_count: success,
        total_attempts: total,
        last_used: now() - Duration::days(days_ago),
        is_preferred: false,
    }
}

pub fn profile(risk_tolerance: RiskTolerance) -> UserPaymentProfile {
    UserPaymentProfile {
        user_id: "user-42".to_string(),
        history: Vec::new(),
        preferred_method_id: None,
        risk_tolerance,
    }
}
