pub mod passwords;

pub mod rate_limit;
pub use rate_limit::LoginRateLimiter;

pub mod tokens;
pub use tokens::{TokenError, TokenIssuer};

pub mod user_service;
pub use user_service::{LoginResult, UserError, UserRecord, UserService, UserUpdate};

pub mod user_service_impl;
pub use user_service_impl::SeaOrmUserService;

pub mod movie_service;
pub use movie_service::{MovieError, MovieRecord, MovieService};

pub mod movie_service_impl;
pub use movie_service_impl::SeaOrmMovieService;
