use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid");
}

const MAX_NAME: usize = 64;
const MAX_EMAIL: usize = 64;
const MIN_PASSWORD: usize = 3;

fn check_email(email: &str, errors: &mut Vec<String>) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("Email is required.".to_string());
    } else if email.len() > MAX_EMAIL || !EMAIL_RE.is_match(email) {
        errors.push("Invalid email address.".to_string());
    }
}

fn check_passwords(password: &str, confirm: &str, errors: &mut Vec<String>) {
    if password.is_empty() {
        errors.push("Password is required.".to_string());
    } else if password.chars().count() < MIN_PASSWORD {
        errors.push(format!("Password must be at least {} characters.", MIN_PASSWORD));
    }
    if password != confirm {
        errors.push("Passwords must match.".to_string());
    }
}

/// 注册表单
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let name = self.name.trim();
        if name.is_empty() {
            errors.push("Name is required.".to_string());
        } else if name.chars().count() > MAX_NAME {
            errors.push(format!("Name must be at most {} characters.", MAX_NAME));
        }
        check_email(&self.email, &mut errors);
        check_passwords(&self.password, &self.confirm_password, &mut errors);
        errors
    }
}

/// 登录表单
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninForm {
    pub email: String,
    pub password: String,
}

impl SigninForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.push("Password is required.".to_string());
        }
        errors
    }
}

/// 重置密码表单
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_passwords(&self.password, &self.confirm_password, &mut errors);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            name: "Ada".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(signup("ada@example.com", "cat", "cat").validate().is_empty());
        assert_eq!(
            signup("not-an-email", "cat", "cat").validate(),
            vec!["Invalid email address.".to_string()]
        );
        assert_eq!(
            signup("ada@example.com", "cat", "dog").validate(),
            vec!["Passwords must match.".to_string()]
        );
        assert!(!SignupForm::default().validate().is_empty());
    }

    #[test]
    fn test_signin_validation() {
        let form = SigninForm {
            email: "ada@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), vec!["Password is required.".to_string()]);
    }

    #[test]
    fn test_reset_validation() {
        let form = ResetPasswordForm {
            password: "dog".to_string(),
            confirm_password: "dog".to_string(),
        };
        assert!(form.validate().is_empty());
        assert!(!ResetPasswordForm::default().validate().is_empty());
    }
}
