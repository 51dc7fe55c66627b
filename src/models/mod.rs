pub mod destination;
pub mod review;
pub mod trip;
pub mod user;

pub use destination::{
    CreateDestinationRequest, Destination, DestinationResponse, NewDestination,
};
pub use review::{CreateReviewRequest, Review};
pub use trip::{
    CreateTripRequest, Trip, TripDestination, TripDestinationInput, TripListFilter,
    TripResponse, UpdateTripRequest,
};
pub use user::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, RegisterRequest,
    ResetPasswordRequest, TokenResponse, User, UserResponse, VerifyEmailRequest,
};
