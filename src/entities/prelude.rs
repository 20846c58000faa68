pub use super::movies::Entity as Movies;
pub use super::screenings::Entity as Screenings;
pub use super::users::Entity as Users;
