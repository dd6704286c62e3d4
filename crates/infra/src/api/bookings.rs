//! `/bookings` endpoints

use bookings_domain::{
    ApiRequest, Booking, BookingStatus, CreateBooking, PageRequest, Paginated, Result,
    UpdateBooking,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::client::BookingsApi;

const BOOKINGS_PATH: &str = "/bookings";

impl BookingsApi {
    /// # Errors
    /// Returns `BookingError::InvalidInput` for an invalid page, otherwise
    /// the API error.
    #[instrument(skip(self))]
    pub async fn list_bookings(&self, page: PageRequest) -> Result<Paginated<Booking>> {
        page.validate()?;
        self.fetch(ApiRequest::get(format!("{BOOKINGS_PATH}?{}", page.query()))).await
    }

    /// # Errors
    /// Returns the API error (e.g. 404).
    #[instrument(skip(self))]
    pub async fn get_booking(&self, id: Uuid) -> Result<Booking> {
        self.fetch(ApiRequest::get(format!("{BOOKINGS_PATH}/{id}"))).await
    }

    /// # Errors
    /// Returns `BookingError::InvalidInput` if the slot is inverted,
    /// otherwise the API error.
    #[instrument(skip(self, booking), fields(service_id = %booking.service_id))]
    pub async fn create_booking(&self, booking: &CreateBooking) -> Result<Booking> {
        booking.validate()?;
        let created: Booking = self.fetch(ApiRequest::post(BOOKINGS_PATH).json(booking)?).await?;
        info!(booking_id = %created.id, "booking created");
        Ok(created)
    }

    /// # Errors
    /// Returns `BookingError::InvalidInput` if the patch is invalid,
    /// otherwise the API error.
    #[instrument(skip(self, patch))]
    pub async fn update_booking(&self, id: Uuid, patch: &UpdateBooking) -> Result<Booking> {
        patch.validate()?;
        self.fetch(ApiRequest::patch(format!("{BOOKINGS_PATH}/{id}")).json(patch)?).await
    }

    /// Move a booking to `cancelled`.
    ///
    /// # Errors
    /// Returns the API error.
    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, id: Uuid) -> Result<Booking> {
        self.update_booking(id, &UpdateBooking::status(BookingStatus::Cancelled)).await
    }
}
