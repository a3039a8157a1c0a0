use hlm::auth::jwt::{issue_token, verify_token};
use hlm::model::role::Role;

const SECRET: &str = "test-secret";

#[test]
fn test_student_token_round_trip() {
    let token = issue_token("u100", Role::Student, Some("S1".to_string()), SECRET, 900);
    let claims = verify_token(&token, SECRET).unwrap();

    assert_eq!(claims.sub, "u100");
    assert_eq!(claims.role, Role::Student as u8);
    assert_eq!(claims.student_id.as_deref(), Some("S1"));
}

#[test]
fn test_teacher_token_has_no_student_id() {
    let token = issue_token("t7", Role::Teacher, None, SECRET, 900);
    let claims = verify_token(&token, SECRET).unwrap();

    assert_eq!(claims.role, Role::Teacher as u8);
    assert!(claims.student_id.is_none());
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token("u100", Role::Student, Some("S1".to_string()), SECRET, 900);
    assert!(verify_token(&token, "other-secret").is_err());
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(verify_token("not.a.token", SECRET).is_err());
}

#[test]
fn test_tokens_carry_unique_jti() {
    let a = issue_token("u100", Role::Student, Some("S1".to_string()), SECRET, 900);
    let b = issue_token("u100", Role::Student, Some("S1".to_string()), SECRET, 900);

    let ja = verify_token(&a, SECRET).unwrap().jti;
    let jb = verify_token(&b, SECRET).unwrap().jti;
    assert_ne!(ja, jb);
}
