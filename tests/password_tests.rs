use preservation_windows_backend::util::password::*;
use std::collections::HashSet;

#[test]
fn test_hash_password_success() {
    let password = "test_password_123";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();

    assert!(!hash.is_empty());
    assert_ne!(hash, password);
    assert!(hash.starts_with("$argon2id$"));

    let parts: Vec<&str> = hash.split('$').collect();
    assert!(parts.len() >= 5, "Hash should have at least 5 parts separated by $");
}

#[test]
fn test_hash_is_salted() {
    let password = "same_password";
    let hashes: HashSet<String> = (0..5)
        .map(|_| PasswordUtilsImpl::hash_password(password).unwrap())
        .collect();
    assert_eq!(hashes.len(), 5, "Every hash should use a fresh salt");
}

#[test]
fn test_verify_password_success() {
    let password = "correct horse battery staple";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_password_wrong_password() {
    let hash = PasswordUtilsImpl::hash_password("right_password").unwrap();
    assert!(!PasswordUtilsImpl::verify_password("wrong_password", &hash).unwrap());
}

#[test]
fn test_verify_password_is_case_sensitive() {
    let hash = PasswordUtilsImpl::hash_password("Password").unwrap();
    assert!(!PasswordUtilsImpl::verify_password("password", &hash).unwrap());
}

#[test]
fn test_verify_unicode_password() {
    let password = "fenêtre-à-guillotine-🪟";
    let hash = PasswordUtilsImpl::hash_password(password).unwrap();
    assert!(PasswordUtilsImpl::verify_password(password, &hash).unwrap());
}

#[test]
fn test_verify_invalid_hash_format() {
    let result = PasswordUtilsImpl::verify_password("anything", "not-a-hash");
    assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
}

#[test]
fn test_verify_legacy_bcrypt_hash() {
    let legacy = bcrypt::hash("legacy_password", 4).unwrap();
    assert!(legacy.starts_with("$2"));

    assert!(PasswordUtilsImpl::verify_password("legacy_password", &legacy).unwrap());
    assert!(!PasswordUtilsImpl::verify_password("other_password", &legacy).unwrap());
}

#[test]
fn test_verify_legacy_2a_prefix() {
    // hashes written by older bcrypt libraries carry the $2a$ prefix
    let legacy = bcrypt::hash_with_result("legacy_password", 4)
        .unwrap()
        .format_for_version(bcrypt::Version::TwoA);
    assert!(legacy.starts_with("$2a$"));
    assert!(PasswordUtilsImpl::verify_password("legacy_password", &legacy).unwrap());
}
