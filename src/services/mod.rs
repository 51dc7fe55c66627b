pub mod auth_service;
pub mod destination_service;
pub mod email_service;
pub mod places;
pub mod review_service;
pub mod trip_service;
pub mod user_service;

pub use auth_service::AuthService;
pub use destination_service::{DestinationService, PlaceSearchParams};
pub use email_service::{create_email_service, EmailError, EmailService, LogEmailService};
pub use places::{PlaceDetails, PlaceSummary, PlacesClient, PlacesError};
pub use review_service::ReviewService;
pub use trip_service::TripService;
pub use user_service::UserService;
