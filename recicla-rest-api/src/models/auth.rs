//! Account request and response models

use recicla_core::{NewUser, UserSummary};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 3, message = "O nome deve ter pelo menos 3 caracteres"))]
    pub name: String,

    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 6, message = "A senha deve ter pelo menos 6 caracteres"))]
    pub password: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[validate(length(min = 1, message = "Informe o curso"))]
    pub curso: String,

    #[validate(length(min = 1, message = "Selecione o semestre"))]
    pub semestre: String,

    #[validate(length(min = 1, message = "Informe a turma"))]
    pub turma: String,

    #[validate(length(min = 1, message = "Selecione o turno"))]
    pub turno: String,

    #[validate(length(min = 1, message = "Selecione a unidade"))]
    pub unidade: String,
}

impl SignupRequest {
    /// Build the user to store; the plain password is dropped here
    pub fn into_new_user(self, password_hash: String) -> NewUser {
        NewUser {
            name: self.name,
            email: self.email,
            password_hash,
            phone: self.phone.filter(|p| !p.is_empty()),
            course: self.curso,
            semester: self.semestre,
            class_id: self.turma,
            shift: self.turno,
            unit_id: self.unidade,
        }
    }
}

/// Login form
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Email inválido"))]
    pub email: String,

    #[validate(length(min = 1, message = "A senha é obrigatória"))]
    pub password: String,
}

/// Signup and login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: UserSummary) -> Self {
        Self {
            message: message.into(),
            user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signup(overrides: serde_json::Value) -> SignupRequest {
        let mut body = json!({
            "name": "Maria Souza",
            "email": "maria@example.com",
            "password": "segredo1",
            "curso": "Sistemas de Informação",
            "semestre": "3",
            "turma": "SI2023",
            "turno": "noturno",
            "unidade": "alcindo_cacela"
        });
        if let (Some(body), Some(overrides)) = (body.as_object_mut(), overrides.as_object()) {
            for (key, value) in overrides {
                body.insert(key.clone(), value.clone());
            }
        }
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_signup() {
        let request = signup(json!({}));
        assert!(request.validate().is_ok());

        let user = request.into_new_user("hash".to_string());
        assert_eq!(user.class_id, "SI2023");
        assert_eq!(user.unit_id, "alcindo_cacela");
        assert!(user.phone.is_none());
    }

    #[test]
    fn test_signup_field_rules() {
        let errors = signup(json!({"name": "Al", "password": "123", "turma": ""}))
            .validate()
            .unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("turma"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_login_requires_email_format() {
        let request = LoginRequest {
            email: "not-an-email".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
