//! Typed records served by the rental API, and the screen config each one carries.

use crate::config::{FieldConfig, FieldKind, LookupConfig, ResourceConfig};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A record type with its own collection endpoint and screen configuration.
pub trait Resource: DeserializeOwned + Serialize {
    const PATH: &'static str;

    fn resource_config() -> ResourceConfig;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motorbike {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub make: String,
    pub model: String,
    pub year: serde_json::Value,
    pub price: f64,
}

impl Resource for Motorbike {
    const PATH: &'static str = "motorbikes";

    fn resource_config() -> ResourceConfig {
        ResourceConfig {
            name: "Motorbike".into(),
            path_segment: Self::PATH.into(),
            id_field: "id".into(),
            fields: vec![
                FieldConfig::new("make", FieldKind::Text).searchable(),
                FieldConfig::new("model", FieldKind::Text).searchable(),
                FieldConfig::new("year", FieldKind::Integer),
                FieldConfig::new("price", FieldKind::Number),
            ],
            lookups: Vec::new(),
            details: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Resource for Client {
    const PATH: &'static str = "clients";

    fn resource_config() -> ResourceConfig {
        ResourceConfig {
            name: "Client".into(),
            path_segment: Self::PATH.into(),
            id_field: "id".into(),
            fields: vec![
                FieldConfig::new("name", FieldKind::Text).searchable(),
                FieldConfig::new("email", FieldKind::Text).searchable(),
                FieldConfig::new("phone", FieldKind::Text).searchable(),
                FieldConfig::new("address", FieldKind::Text),
            ],
            lookups: Vec::new(),
            details: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    pub motorbike_id: serde_json::Value,
    pub reservation_date: String,
    pub start_date: String,
    pub end_date: String,
}

impl Resource for Reservation {
    const PATH: &'static str = "reservations";

    fn resource_config() -> ResourceConfig {
        ResourceConfig {
            name: "Reservation".into(),
            path_segment: Self::PATH.into(),
            id_field: "id".into(),
            fields: vec![
                FieldConfig::new("clientId", FieldKind::Text).label("Client").searchable(),
                FieldConfig::new("motorbikeId", FieldKind::Text).label("Motorbike").searchable(),
                FieldConfig::new("reservationDate", FieldKind::Date).searchable(),
                FieldConfig::new("startDate", FieldKind::Date),
                FieldConfig::new("endDate", FieldKind::Date),
            ],
            lookups: vec![
                LookupConfig {
                    field: "clientId".into(),
                    resource: Client::PATH.into(),
                    display: vec!["name".into()],
                },
                LookupConfig {
                    field: "motorbikeId".into(),
                    resource: Motorbike::PATH.into(),
                    display: vec!["make".into(), "model".into()],
                },
            ],
            details: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub reservation_id: String,
    pub amount: f64,
    pub payment_date: String,
    /// Free text, e.g. "Paid" or "Pending".
    pub status: String,
}

impl Resource for Payment {
    const PATH: &'static str = "payments";

    fn resource_config() -> ResourceConfig {
        ResourceConfig {
            name: "Payment".into(),
            path_segment: Self::PATH.into(),
            id_field: "id".into(),
            fields: vec![
                FieldConfig::new("reservationId", FieldKind::Text).label("Reservation ID").searchable(),
                FieldConfig::new("amount", FieldKind::Number).searchable(),
                FieldConfig::new("paymentDate", FieldKind::Date).label("Date").searchable(),
                FieldConfig::new("status", FieldKind::Text).searchable(),
            ],
            lookups: Vec::new(),
            details: true,
        }
    }
}

/// `GET /reservations/{id}/details`: the reservation with its client and motorbike joined in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationDetails {
    pub id: String,
    #[serde(default)]
    pub client: Option<Client>,
    #[serde(default)]
    pub motorbike: Option<Motorbike>,
    pub reservation_date: String,
    pub start_date: String,
    pub end_date: String,
}

/// `GET /payments/{id}/details`: the payment with its reservation details joined in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub id: String,
    pub reservation_id: String,
    pub amount: f64,
    pub payment_date: String,
    pub status: String,
    #[serde(default)]
    pub reservation_details: Option<ReservationDetails>,
}

/// `GET /user` payload of an authenticated session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_details_decode_nested_aggregate() {
        let raw = serde_json::json!({
            "id": "p1",
            "reservationId": "r1",
            "amount": 120.5,
            "paymentDate": "2024-06-01",
            "status": "Paid",
            "reservationDetails": {
                "id": "r1",
                "client": { "id": "c1", "name": "Ana", "email": "a@x.com", "phone": "111", "address": "St1" },
                "motorbike": null,
                "reservationDate": "2024-05-20",
                "startDate": "2024-06-01",
                "endDate": "2024-06-05"
            }
        });
        let details: PaymentDetails = serde_json::from_value(raw).unwrap();
        let reservation = details.reservation_details.unwrap();
        assert_eq!(reservation.client.unwrap().name, "Ana");
        assert!(reservation.motorbike.is_none());
    }

    #[test]
    fn new_records_serialize_without_id() {
        let bike = Motorbike {
            id: None,
            make: "Honda".into(),
            model: "CB500".into(),
            year: serde_json::json!(2023),
            price: 5000.0,
        };
        let v = serde_json::to_value(&bike).unwrap();
        assert!(v.get("id").is_none());
        assert_eq!(v["make"], "Honda");
    }
}
