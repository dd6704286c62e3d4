//! `/services` endpoints

use bookings_domain::{
    ApiRequest, CreateService, PageRequest, Paginated, Result, Service, UpdateService,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::client::BookingsApi;

const SERVICES_PATH: &str = "/services";

impl BookingsApi {
    /// # Errors
    /// Returns `BookingError::InvalidInput` for an invalid page, otherwise
    /// the API error.
    #[instrument(skip(self))]
    pub async fn list_services(&self, page: PageRequest) -> Result<Paginated<Service>> {
        page.validate()?;
        self.fetch(ApiRequest::get(format!("{SERVICES_PATH}?{}", page.query()))).await
    }

    /// # Errors
    /// Returns the API error (e.g. 404).
    #[instrument(skip(self))]
    pub async fn get_service(&self, id: Uuid) -> Result<Service> {
        self.fetch(ApiRequest::get(format!("{SERVICES_PATH}/{id}"))).await
    }

    /// # Errors
    /// Returns `BookingError::InvalidInput` when the payload breaks a
    /// contract constraint, otherwise the API error.
    #[instrument(skip(self, service), fields(name = %service.name))]
    pub async fn create_service(&self, service: &CreateService) -> Result<Service> {
        service.validate()?;
        let created: Service = self.fetch(ApiRequest::post(SERVICES_PATH).json(service)?).await?;
        info!(service_id = %created.id, "service created");
        Ok(created)
    }

    /// # Errors
    /// Returns `BookingError::InvalidInput` if the patch is invalid,
    /// otherwise the API error.
    #[instrument(skip(self, patch))]
    pub async fn update_service(&self, id: Uuid, patch: &UpdateService) -> Result<Service> {
        patch.validate()?;
        self.fetch(ApiRequest::patch(format!("{SERVICES_PATH}/{id}")).json(patch)?).await
    }
}
