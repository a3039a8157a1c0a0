use crate::config::Config;
use crate::model::role::Role;
use crate::models::Claims;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web::Data};
use futures::future::{Ready, ready};
use jsonwebtoken::decode;
use jsonwebtoken::{DecodingKey, Validation};

/// Verified session identity. Roles and student ids come from the external
/// identity provider's token claims; nothing here touches credentials.
pub struct AuthUser {
    pub subject: String,
    pub role: Role,

    /// Present only for student sessions
    pub student_id: Option<String>,
}

impl FromRequest for AuthUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let token = match req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            Some(t) => t,
            None => return ready(Err(ErrorUnauthorized("Missing token"))),
        };

        let config = match req.app_data::<Data<Config>>() {
            Some(c) => c,
            None => {
                return ready(Err(actix_web::error::ErrorInternalServerError(
                    "Config missing",
                )));
            }
        };

        let data = match decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        ) {
            Ok(d) => d,
            Err(_) => return ready(Err(ErrorUnauthorized("Invalid token"))),
        };

        let role = match Role::from_id(data.claims.role) {
            Some(r) => r,
            None => return ready(Err(ErrorUnauthorized("Invalid role"))),
        };

        ready(Ok(AuthUser {
            subject: data.claims.sub,
            role,
            student_id: data.claims.student_id,
        }))
    }
}

impl AuthUser {
    pub fn require_teacher(&self) -> actix_web::Result<()> {
        if self.role == Role::Teacher {
            Ok(())
        } else {
            Err(actix_web::error::ErrorForbidden("Teacher only"))
        }
    }

    /// The student id bound to this session, required for student actions.
    pub fn student_id(&self) -> actix_web::Result<String> {
        self.student_id
            .clone()
            .ok_or_else(|| actix_web::error::ErrorForbidden("No student profile"))
    }

    pub fn is_student(&self) -> bool {
        self.role == Role::Student
    }
}
