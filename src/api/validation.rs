//! Request body validation. Every check runs before any persistence call;
//! failures collect per-field messages into a single 400 response.

use chrono::{Datelike, NaiveDate, Utc};
use url::Url;

use super::ApiError;
use super::types::{CreateMovieRequest, RegisterRequest, UpdateMovieRequest, UpdateUserRequest};

const MIN_USERNAME_LEN: usize = 3;
const MIN_PASSWORD_LEN: usize = 8;
const MIN_SINOPSIS_LEN: usize = 10;
const MIN_MOVIE_YEAR: i32 = 1900;
const MAX_PAGE_LIMIT: u64 = 100;

fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

fn current_year() -> i32 {
    Utc::now().year()
}

fn check_username(errors: &mut Vec<String>, username: &str) {
    if username.trim().len() < MIN_USERNAME_LEN {
        errors.push(format!(
            "username: must be at least {} characters",
            MIN_USERNAME_LEN
        ));
    }
}

fn check_email(errors: &mut Vec<String>, email: &str) {
    if !is_valid_email(email) {
        errors.push("email: invalid email format".to_string());
    }
}

fn check_password(errors: &mut Vec<String>, password: &str) {
    if password.len() < MIN_PASSWORD_LEN {
        errors.push(format!(
            "password: must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
}

fn check_anio(errors: &mut Vec<String>, anio: i32) {
    let max = current_year();
    if !(MIN_MOVIE_YEAR..=max).contains(&anio) {
        errors.push(format!(
            "anio: must be between {} and {}",
            MIN_MOVIE_YEAR, max
        ));
    }
}

fn check_duracion(errors: &mut Vec<String>, duracion: i32) {
    if duracion <= 0 {
        errors.push("duracion: must be a positive integer".to_string());
    }
}

fn check_rating(errors: &mut Vec<String>, rating: f64) {
    if !(0.0..=10.0).contains(&rating) {
        errors.push("rating_promedio: must be between 0 and 10".to_string());
    }
}

fn check_url_field(errors: &mut Vec<String>, field: &str, value: &str) {
    if !is_valid_url(value) {
        errors.push(format!("{}: invalid URL", field));
    }
}

fn check_nonempty(errors: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(format!("{}: is required", field));
    }
}

fn check_fecha_estreno(errors: &mut Vec<String>, value: &str) {
    if !is_valid_date(value) {
        errors.push("fecha_estreno: invalid date, expected YYYY-MM-DD".to_string());
    }
}

fn finish(errors: Vec<String>) -> Result<(), ApiError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation(errors.join("; ")))
    }
}

pub fn validate_registration(req: &RegisterRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_username(&mut errors, &req.username);
    check_email(&mut errors, &req.email);
    check_password(&mut errors, &req.password);

    finish(errors)
}

pub fn validate_user_update(req: &UpdateUserRequest) -> Result<(), ApiError> {
    if req.username.is_none() && req.email.is_none() && req.password.is_none() {
        return Err(ApiError::validation("at least one field is required"));
    }

    let mut errors = Vec::new();

    if let Some(ref username) = req.username {
        check_username(&mut errors, username);
    }
    if let Some(ref email) = req.email {
        check_email(&mut errors, email);
    }
    if let Some(ref password) = req.password {
        check_password(&mut errors, password);
    }

    finish(errors)
}

pub fn validate_new_movie(req: &CreateMovieRequest) -> Result<(), ApiError> {
    let mut errors = Vec::new();

    check_nonempty(&mut errors, "titulo", &req.titulo);
    check_nonempty(&mut errors, "director", &req.director);
    check_anio(&mut errors, req.anio);
    if req.sinopsis.trim().len() < MIN_SINOPSIS_LEN {
        errors.push(format!(
            "sinopsis: must be at least {} characters",
            MIN_SINOPSIS_LEN
        ));
    }
    check_url_field(&mut errors, "imagen_url", &req.imagen_url);
    check_duracion(&mut errors, req.duracion);
    check_nonempty(&mut errors, "pais", &req.pais);
    if let Some(rating) = req.rating_promedio {
        check_rating(&mut errors, rating);
    }
    check_url_field(&mut errors, "trailer_url", &req.trailer_url);
    check_fecha_estreno(&mut errors, &req.fecha_estreno);

    finish(errors)
}

pub fn validate_movie_update(req: &UpdateMovieRequest) -> Result<(), ApiError> {
    let no_fields = req.titulo.is_none()
        && req.titulo_original.is_none()
        && req.director.is_none()
        && req.anio.is_none()
        && req.sinopsis.is_none()
        && req.imagen_url.is_none()
        && req.duracion.is_none()
        && req.pais.is_none()
        && req.rating_promedio.is_none()
        && req.trailer_url.is_none()
        && req.fecha_estreno.is_none();
    if no_fields {
        return Err(ApiError::validation("at least one field is required"));
    }

    let mut errors = Vec::new();

    if let Some(ref titulo) = req.titulo {
        check_nonempty(&mut errors, "titulo", titulo);
    }
    if let Some(ref director) = req.director {
        check_nonempty(&mut errors, "director", director);
    }
    if let Some(anio) = req.anio {
        check_anio(&mut errors, anio);
    }
    if let Some(ref sinopsis) = req.sinopsis {
        if sinopsis.trim().len() < MIN_SINOPSIS_LEN {
            errors.push(format!(
                "sinopsis: must be at least {} characters",
                MIN_SINOPSIS_LEN
            ));
        }
    }
    if let Some(ref imagen_url) = req.imagen_url {
        check_url_field(&mut errors, "imagen_url", imagen_url);
    }
    if let Some(duracion) = req.duracion {
        check_duracion(&mut errors, duracion);
    }
    if let Some(ref pais) = req.pais {
        check_nonempty(&mut errors, "pais", pais);
    }
    if let Some(rating) = req.rating_promedio {
        check_rating(&mut errors, rating);
    }
    if let Some(ref trailer_url) = req.trailer_url {
        check_url_field(&mut errors, "trailer_url", trailer_url);
    }
    if let Some(ref fecha_estreno) = req.fecha_estreno {
        check_fecha_estreno(&mut errors, fecha_estreno);
    }

    finish(errors)
}

pub fn validate_pagination(limit: u64, page: u64) -> Result<(), ApiError> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "limit: must be between 1 and {}",
            MAX_PAGE_LIMIT
        )));
    }
    if page < 1 {
        return Err(ApiError::validation("page: must be at least 1"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie_request() -> CreateMovieRequest {
        CreateMovieRequest {
            titulo: "The Matrix".to_string(),
            titulo_original: None,
            director: "Lana Wachowski".to_string(),
            anio: 1999,
            sinopsis: "A hacker discovers the nature of his reality.".to_string(),
            imagen_url: "https://example.com/matrix.jpg".to_string(),
            duracion: 136,
            pais: "USA".to_string(),
            rating_promedio: Some(8.7),
            trailer_url: "https://example.com/matrix-trailer".to_string(),
            fecha_estreno: "1999-03-31".to_string(),
        }
    }

    #[test]
    fn accepts_valid_registration() {
        let req = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(validate_registration(&req).is_ok());
    }

    #[test]
    fn rejects_short_username_and_password() {
        let req = RegisterRequest {
            username: "ab".to_string(),
            email: "alice@example.com".to_string(),
            password: "short".to_string(),
        };
        let err = validate_registration(&req).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("username"));
        assert!(msg.contains("password"));
    }

    #[test]
    fn rejects_bad_email_formats() {
        for email in ["plainaddress", "@no-local.com", "user@", "user@nodot", "a b@x.com"] {
            let req = RegisterRequest {
                username: "alice".to_string(),
                email: email.to_string(),
                password: "password123".to_string(),
            };
            assert!(validate_registration(&req).is_err(), "accepted {email}");
        }
    }

    #[test]
    fn year_bounds_are_inclusive() {
        let mut req = movie_request();

        req.anio = 1899;
        assert!(validate_new_movie(&req).is_err());

        req.anio = 1900;
        assert!(validate_new_movie(&req).is_ok());

        req.anio = current_year();
        assert!(validate_new_movie(&req).is_ok());

        req.anio = current_year() + 1;
        assert!(validate_new_movie(&req).is_err());
    }

    #[test]
    fn duration_must_be_positive() {
        let mut req = movie_request();

        req.duracion = -5;
        assert!(validate_new_movie(&req).is_err());

        req.duracion = 0;
        assert!(validate_new_movie(&req).is_err());

        req.duracion = 120;
        assert!(validate_new_movie(&req).is_ok());
    }

    #[test]
    fn rejects_invalid_urls_and_dates() {
        let mut req = movie_request();
        req.imagen_url = "not a url".to_string();
        req.fecha_estreno = "31/03/1999".to_string();

        let msg = validate_new_movie(&req).unwrap_err().to_string();
        assert!(msg.contains("imagen_url"));
        assert!(msg.contains("fecha_estreno"));
    }

    #[test]
    fn rating_range_is_checked_when_present() {
        let mut req = movie_request();

        req.rating_promedio = Some(10.5);
        assert!(validate_new_movie(&req).is_err());

        req.rating_promedio = Some(-0.1);
        assert!(validate_new_movie(&req).is_err());

        req.rating_promedio = None;
        assert!(validate_new_movie(&req).is_ok());
    }

    #[test]
    fn empty_updates_are_rejected() {
        assert!(validate_user_update(&UpdateUserRequest::default()).is_err());
        assert!(validate_movie_update(&UpdateMovieRequest::default()).is_err());
    }

    #[test]
    fn partial_movie_update_still_checks_bounds() {
        let req = UpdateMovieRequest {
            anio: Some(1850),
            ..UpdateMovieRequest::default()
        };
        assert!(validate_movie_update(&req).is_err());

        let req = UpdateMovieRequest {
            titulo: Some("Renamed".to_string()),
            ..UpdateMovieRequest::default()
        };
        assert!(validate_movie_update(&req).is_ok());
    }

    #[test]
    fn pagination_bounds() {
        assert!(validate_pagination(1, 1).is_ok());
        assert!(validate_pagination(100, 7).is_ok());
        assert!(validate_pagination(0, 1).is_err());
        assert!(validate_pagination(101, 1).is_err());
        assert!(validate_pagination(10, 0).is_err());
    }
}
