//! Request/response types for auth endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub age: i32,
    pub experience: i32,
    pub service_type: String,
    pub location: String,
    pub city: String,
    pub address: String,
    pub bio: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct ProfileUpdateRequest {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Public identity projection; never carries the password hash.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// One failed field check, in field-check order.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub(crate) fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Uniform response envelope for all auth operations.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl AuthResponse {
    pub(crate) fn success(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            user: None,
            errors: None,
        }
    }

    pub(crate) fn success_with_user(message: &str, user: UserResponse) -> Self {
        Self {
            user: Some(user),
            ..Self::success(message)
        }
    }

    pub(crate) fn failure(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            user: None,
            errors: None,
        }
    }

    pub(crate) fn failure_with_errors(message: &str, errors: Vec<FieldError>) -> Self {
        Self {
            errors: Some(errors),
            ..Self::failure(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Context, Result};

    #[test]
    fn signup_request_uses_camel_case_on_the_wire() -> Result<()> {
        let decoded: SignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Jo",
            "email": "a@b.com",
            "password": "Abcdefg1",
            "confirmPassword": "Abcdefg1",
        }))?;
        assert_eq!(decoded.confirm_password, "Abcdefg1");
        Ok(())
    }

    #[test]
    fn provider_request_uses_camel_case_service_type() -> Result<()> {
        let decoded: ProviderSignupRequest = serde_json::from_value(serde_json::json!({
            "name": "Sam",
            "email": "sam@example.com",
            "password": "Abcdefg1",
            "phone": "555-0100",
            "age": 34,
            "experience": 10,
            "serviceType": "plumber",
            "location": "Downtown",
            "city": "Springfield",
            "address": "12 Main St",
            "bio": "Licensed plumber",
        }))?;
        assert_eq!(decoded.service_type, "plumber");
        Ok(())
    }

    #[test]
    fn success_envelope_omits_empty_fields() -> Result<()> {
        let value = serde_json::to_value(AuthResponse::success("Login successful"))?;
        let object = value.as_object().context("expected object")?;
        assert_eq!(object.get("success"), Some(&serde_json::json!(true)));
        assert!(!object.contains_key("user"));
        assert!(!object.contains_key("errors"));
        Ok(())
    }

    #[test]
    fn failure_envelope_carries_field_errors() -> Result<()> {
        let response = AuthResponse::failure_with_errors(
            "Validation failed",
            vec![FieldError::new("email", "Email is required")],
        );
        let value = serde_json::to_value(response)?;
        let errors = value
            .get("errors")
            .and_then(serde_json::Value::as_array)
            .context("expected errors array")?;
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].get("field"), Some(&serde_json::json!("email")));
        Ok(())
    }
}
