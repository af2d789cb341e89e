use super::{
    client::ApiClient,
    types::{
        ApiError, OccupyResponse, ReleaseResponse, ReservationAction, ReservationRecord,
        ReserveRequest, ReserveResponse, UserAnalytics, UserLot,
    },
};

impl ApiClient {
    pub async fn user_list_lots(&self) -> Result<Vec<UserLot>, ApiError> {
        self.get_json("/user/lots").await
    }

    /// The backend picks the first free spot in the lot.
    pub async fn reserve_spot(&self, lot_id: i64) -> Result<ReserveResponse, ApiError> {
        self.post_json("/user/reserve", &ReserveRequest { lot_id })
            .await
    }

    pub async fn occupy_spot(&self, reservation_id: i64) -> Result<OccupyResponse, ApiError> {
        self.post_json("/user/occupy", &ReservationAction { reservation_id })
            .await
    }

    pub async fn release_spot(&self, reservation_id: i64) -> Result<ReleaseResponse, ApiError> {
        self.post_json("/user/release", &ReservationAction { reservation_id })
            .await
    }

    pub async fn my_reservations(&self) -> Result<Vec<ReservationRecord>, ApiError> {
        self.get_json("/user/me/reservations").await
    }

    pub async fn user_analytics(&self) -> Result<UserAnalytics, ApiError> {
        self.get_json("/user/analytics").await
    }
}
