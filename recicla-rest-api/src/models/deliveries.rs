//! Delivery request models

use recicla_core::{CoreError, DeliveryFilter, NewDelivery, Shift, WasteType};
use serde::Deserialize;
use std::borrow::Cow;
use validator::{Validate, ValidationError};

use super::common::non_empty;

/// Body of `POST /entregas`
///
/// `tipo` and `turno` arrive as plain strings so an unknown value is reported
/// as a field error rather than a malformed body.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeliveryRequest {
    #[validate(
        required(message = "Informe a quantidade"),
        range(exclusive_min = 0.0, message = "A quantidade deve ser maior que zero")
    )]
    pub quantidade: Option<f64>,

    #[validate(custom(function = "validate_waste_type"))]
    pub tipo: String,

    #[validate(length(min = 1, message = "Informe a turma"))]
    pub turma: String,

    #[validate(length(min = 1, message = "Informe o curso"))]
    pub curso: String,

    #[validate(length(min = 1, message = "Selecione o semestre"))]
    pub semestre: String,

    #[validate(custom(function = "validate_shift"))]
    pub turno: String,

    #[validate(length(min = 1, message = "Selecione a unidade"))]
    pub unidade: String,

    #[serde(default)]
    pub user_id: Option<String>,
}

fn validate_waste_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<WasteType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("enum").with_message(Cow::Borrowed("Tipo de resíduo inválido")))
}

fn validate_shift(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<Shift>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("enum").with_message(Cow::Borrowed("Turno inválido")))
}

impl CreateDeliveryRequest {
    /// The owner named in the body, if any
    pub fn requested_user_id(&self) -> Option<&str> {
        self.user_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Convert a validated request into a record for the given owner
    pub fn into_new_delivery(self, user_id: Option<String>) -> Result<NewDelivery, CoreError> {
        Ok(NewDelivery {
            quantity: self.quantidade.unwrap_or_default(),
            waste_type: self.tipo.parse()?,
            class_id: self.turma,
            course: self.curso,
            semester: self.semestre,
            shift: self.turno.parse()?,
            unit_id: self.unidade,
            user_id,
        })
    }
}

/// Query string of `GET /entregas`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryListQuery {
    pub tipo: Option<String>,
    pub unidade: Option<String>,
    pub turma: Option<String>,
    pub curso: Option<String>,
    pub user_id: Option<String>,
}

impl DeliveryListQuery {
    pub fn into_filter(self) -> Result<DeliveryFilter, CoreError> {
        let waste_type = non_empty(self.tipo).map(|t| t.parse::<WasteType>()).transpose()?;

        Ok(DeliveryFilter {
            waste_type,
            unit_id: non_empty(self.unidade),
            class_id: non_empty(self.turma),
            course: non_empty(self.curso),
            user_id: non_empty(self.user_id),
            created_since: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: serde_json::Value) -> CreateDeliveryRequest {
        serde_json::from_value(body).unwrap()
    }

    fn valid_body() -> serde_json::Value {
        json!({
            "quantidade": 2.5,
            "tipo": "aluminio",
            "turma": "SI2023",
            "curso": "Sistemas de Informação",
            "semestre": "3",
            "turno": "noturno",
            "unidade": "alcindo_cacela"
        })
    }

    #[test]
    fn test_valid_delivery_converts() {
        let req = request(valid_body());
        assert!(req.validate().is_ok());
        assert!(req.requested_user_id().is_none());

        let delivery = req.into_new_delivery(Some("u1".to_string())).unwrap();
        assert_eq!(delivery.quantity, 2.5);
        assert_eq!(delivery.waste_type, WasteType::Aluminum);
        assert_eq!(delivery.shift, Shift::Evening);
        assert_eq!(delivery.user_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_quantity_must_be_positive() {
        let mut body = valid_body();
        body["quantidade"] = json!(0);
        let errors = request(body).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("quantidade"));

        let mut body = valid_body();
        body["quantidade"] = json!(-1.0);
        assert!(request(body).validate().is_err());

        let mut body = valid_body();
        body.as_object_mut().unwrap().remove("quantidade");
        assert!(request(body).validate().is_err());
    }

    #[test]
    fn test_enums_are_checked() {
        let mut body = valid_body();
        body["tipo"] = json!("papel");
        body["turno"] = json!("madrugada");
        let errors = request(body).validate().unwrap_err();
        let fields = errors.field_errors();

        assert_eq!(fields["tipo"][0].message.as_deref(), Some("Tipo de resíduo inválido"));
        assert_eq!(fields["turno"][0].message.as_deref(), Some("Turno inválido"));
    }

    #[test]
    fn test_body_user_id() {
        let mut body = valid_body();
        body["userId"] = json!("abc");
        assert_eq!(request(body).requested_user_id(), Some("abc"));

        let mut body = valid_body();
        body["userId"] = json!("");
        assert!(request(body).requested_user_id().is_none());
    }

    #[test]
    fn test_list_query_filter() {
        let query = DeliveryListQuery {
            tipo: Some("vidro".to_string()),
            unidade: Some(String::new()),
            turma: Some("ENG2022".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();

        assert_eq!(filter.waste_type, Some(WasteType::Glass));
        assert!(filter.unit_id.is_none());
        assert_eq!(filter.class_id.as_deref(), Some("ENG2022"));

        let bad = DeliveryListQuery {
            tipo: Some("papel".to_string()),
            ..Default::default()
        };
        assert_eq!(bad.into_filter().unwrap_err(), CoreError::InvalidWasteType("papel".to_string()));
    }
}
