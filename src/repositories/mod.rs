pub mod destination_repository;
pub mod review_repository;
pub mod trip_repository;
pub mod user_repository;

pub use destination_repository::{DestinationRepository, SqliteDestinationRepository};
pub use review_repository::{ReviewRepository, SqliteReviewRepository};
pub use trip_repository::{SqliteTripRepository, TripRepository};
pub use user_repository::{RepositoryError, SqliteUserRepository, UserRepository};
