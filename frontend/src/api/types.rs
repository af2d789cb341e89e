use chrono::NaiveDateTime;
use leptos::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub role: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingLot {
    pub id: i64,
    pub prime_location_name: String,
    pub price_per_hour: f64,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
    pub number_of_spots: i64,
}

/// Row of the admin lot overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLot {
    #[serde(flatten)]
    pub lot: ParkingLot,
    pub available_spots: i64,
    pub occupied_spots: i64,
}

/// Body for creating or updating a lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotInput {
    pub prime_location_name: String,
    pub price_per_hour: f64,
    pub address: String,
    pub pin_code: String,
    pub number_of_spots: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateLotResponse {
    pub message: String,
    pub lot: ParkingLot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpotStatus {
    #[serde(rename = "A")]
    Available,
    #[serde(rename = "O")]
    Occupied,
    #[serde(other)]
    Unknown,
}

impl SpotStatus {
    pub fn label(self) -> &'static str {
        match self {
            SpotStatus::Available => "Available",
            SpotStatus::Occupied => "Occupied",
            SpotStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotOccupant {
    pub username: String,
    pub user_id: i64,
    // Sent as an HTTP date, e.g. "Mon, 20 Oct 2025 10:00:00 GMT".
    pub parking_timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotDetail {
    pub spot_id: i64,
    pub status: SpotStatus,
    #[serde(default)]
    pub user_details: Option<SpotOccupant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub active_spot: Option<i64>,
}

/// Lot as listed to regular users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLot {
    pub lot_id: i64,
    pub prime_location_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
    pub price: f64,
    pub total_spots: i64,
    pub available_spots: i64,
    pub occupied_spots: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReserveRequest {
    pub lot_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub message: String,
    pub reservation_id: i64,
    pub spot_id: i64,
    pub parking_timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationAction {
    pub reservation_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupyResponse {
    pub message: String,
    pub spot_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub message: String,
    pub reservation_id: i64,
    pub parking_cost: f64,
    pub hours_charged: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub reservation_id: i64,
    pub spot_id: i64,
    #[serde(default)]
    pub lot_id: Option<i64>,
    #[serde(default)]
    pub lot_name: Option<String>,
    #[serde(default)]
    pub parking_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub leaving_timestamp: Option<NaiveDateTime>,
    #[serde(default)]
    pub parking_cost: Option<f64>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl ReservationRecord {
    pub fn is_active(&self) -> bool {
        self.leaving_timestamp.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyHours {
    pub month: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAmount {
    pub month: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAnalytics {
    #[serde(rename = "parkingStats", default)]
    pub parking_stats: Vec<MonthlyHours>,
    #[serde(rename = "revenueStats", default)]
    pub revenue_stats: Vec<MonthlyAmount>,
    pub total_hours: f64,
    pub total_spent: f64,
}

/// Failure surfaced to pages. Serializable so it can travel through resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn new(code: &str, msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            status: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", msg)
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::new("REQUEST_FAILED", msg)
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::new("DECODE_ERROR", msg)
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::new("STORAGE_ERROR", msg)
    }

    /// Backend rejection. `body` is the raw response text; the message is
    /// taken from its `error` or `msg` field when it is JSON.
    pub fn from_status(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            error: Option<String>,
            msg: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.msg))
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));
        let code = match status {
            400 => "BAD_REQUEST",
            401 => "UNAUTHORIZED",
            403 => "FORBIDDEN",
            404 => "NOT_FOUND",
            409 => "CONFLICT",
            500..=599 => "SERVER_ERROR",
            _ => "HTTP_ERROR",
        };
        Self {
            error: message,
            code: code.to_string(),
            status: Some(status),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}
