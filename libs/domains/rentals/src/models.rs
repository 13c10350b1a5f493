use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle state of a booking.
///
/// The main progression is `Pending → Confirmed → InProgress → InInspection
/// → Completed`; `Rejected`, `NoShow` and `Cancelled` branch off the early
/// states. The generic update path may overwrite the state freely; only the
/// explicit transition API consults [`BookingState::can_transition_to`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "booking_state")]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BookingState {
    /// Booking created, awaiting confirmation
    #[default]
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Booking approved, awaiting pickup
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    /// Booking denied
    #[sea_orm(string_value = "rejected")]
    Rejected,
    /// User never showed up for pickup
    #[sea_orm(string_value = "no_show")]
    NoShow,
    /// Vehicle handed over, rental active
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    /// Vehicle returned, under technical inspection
    #[sea_orm(string_value = "in_inspection")]
    InInspection,
    /// Vehicle returned and checked in
    #[sea_orm(string_value = "completed")]
    Completed,
    /// Booking cancelled
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl BookingState {
    /// True for states from which no further progress is expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingState::Completed
                | BookingState::Cancelled
                | BookingState::Rejected
                | BookingState::NoShow
        )
    }

    /// Whether `target` is a legal successor under the strict lifecycle.
    ///
    /// Only consulted by the opt-in transition API; the generic update path
    /// accepts any state.
    pub fn can_transition_to(&self, target: BookingState) -> bool {
        use BookingState::*;

        matches!(
            (self, target),
            (Pending, Confirmed)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Pending, NoShow)
                | (Confirmed, InProgress)
                | (Confirmed, Cancelled)
                | (Confirmed, NoShow)
                | (InProgress, InInspection)
                | (InInspection, Completed)
        )
    }
}

/// Booking entity - a request to occupy a product over a date range
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    /// Unique identifier
    pub id: Uuid,
    /// First day of the rental (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the rental (inclusive)
    pub end_date: NaiveDate,
    /// Creation timestamp (immutable, set once)
    pub created_at: DateTime<Utc>,
    /// Current lifecycle state
    pub state: BookingState,
    /// Owning user
    pub user_id: Uuid,
    /// Booked product
    pub product_id: Uuid,
}

/// DTO for creating a new booking
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// DTO for updating an existing booking
///
/// Omitted fields keep their current value. No availability re-check is
/// performed against updated dates, and `state` may be set to any value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBooking {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub state: Option<BookingState>,
}

/// DTO for the guarded state transition endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TransitionBooking {
    pub state: BookingState,
}

/// Query filters for listing bookings
///
/// `from`/`to` select bookings whose date range overlaps the closed window
/// `[from, to]`.
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct BookingFilter {
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub state: Option<BookingState>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

impl Default for BookingFilter {
    fn default() -> Self {
        Self {
            user_id: None,
            product_id: None,
            state: None,
            from: None,
            to: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Booking {
    /// Create a new booking from the CreateBooking DTO
    pub fn new(input: CreateBooking) -> Self {
        Self {
            id: Uuid::now_v7(),
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: Utc::now(),
            state: BookingState::Pending,
            user_id: input.user_id,
            product_id: input.product_id,
        }
    }

    /// Apply updates from the UpdateBooking DTO
    ///
    /// `created_at` is never touched.
    pub fn apply_update(&mut self, update: UpdateBooking) {
        if let Some(start_date) = update.start_date {
            self.start_date = start_date;
        }
        if let Some(end_date) = update.end_date {
            self.end_date = end_date;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
    }
}

/// Review entity - written once against a completed booking
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    /// Unique identifier
    pub id: Uuid,
    /// Score in [1, 5]
    pub score: i32,
    /// Free-text comment, non-empty
    pub comment: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Authoring user
    pub user_id: Uuid,
    /// Reviewed product
    pub product_id: Uuid,
    /// The booking this review was written against; nulled when that
    /// booking is deleted
    pub booking_id: Option<Uuid>,
}

/// DTO for creating a new review
///
/// Eligibility rules (score range, non-empty comment, completed rental,
/// no prior review) are enforced in a fixed order by the review service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateReview {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub booking_id: Uuid,
    pub score: i32,
    pub comment: String,
}

/// DTO for updating an existing review
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReview {
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub score: i32,
    pub comment: String,
}

/// Query filters for listing reviews
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
pub struct ReviewFilter {
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub score: Option<i32>,
}

impl Review {
    /// Create a new review from the CreateReview DTO
    pub fn new(input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            score: input.score,
            comment: input.comment,
            created_at: Utc::now(),
            user_id: input.user_id,
            product_id: input.product_id,
            booking_id: Some(input.booking_id),
        }
    }
}
