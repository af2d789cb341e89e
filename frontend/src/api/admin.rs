use super::{
    client::ApiClient,
    types::{
        AdminLot, AdminUser, ApiError, CreateLotResponse, LotInput, MessageResponse, SpotDetail,
    },
};

impl ApiClient {
    pub async fn admin_list_lots(&self) -> Result<Vec<AdminLot>, ApiError> {
        self.get_json("/admin/lots").await
    }

    pub async fn admin_create_lot(&self, lot: &LotInput) -> Result<CreateLotResponse, ApiError> {
        self.post_json("/admin/create_lot", lot).await
    }

    pub async fn admin_update_lot(
        &self,
        lot_id: i64,
        lot: &LotInput,
    ) -> Result<MessageResponse, ApiError> {
        self.put_json(&format!("/admin/update_lot/{}", lot_id), lot)
            .await
    }

    pub async fn admin_delete_lot(&self, lot_id: i64) -> Result<MessageResponse, ApiError> {
        self.delete_json(&format!("/admin/delete_lot/{}", lot_id))
            .await
    }

    pub async fn admin_lot_spots(&self, lot_id: i64) -> Result<Vec<SpotDetail>, ApiError> {
        self.get_json(&format!("/admin/lot/{}/spots", lot_id)).await
    }

    pub async fn admin_list_users(&self) -> Result<Vec<AdminUser>, ApiError> {
        self.get_json("/admin/users").await
    }
}
