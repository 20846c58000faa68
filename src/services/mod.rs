pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{
    AuthError, AuthService, Credentials, LoginResult, SessionResolver, UserInfo,
};
pub use auth_service_impl::SeaOrmAuthService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieService};
pub use movie_service_impl::SeaOrmMovieService;
