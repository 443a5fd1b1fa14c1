use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadKind {
    /// Expert callback with a list of matching properties; phone required.
    List,
    /// Paid premium report sent by email.
    Report,
}

impl LeadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LeadKind::List => "list",
            LeadKind::Report => "report",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    pub price: f64,
    pub rent: f64,
    #[serde(rename = "yield")]
    pub yield_percent: f64,
    pub country: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub kind: LeadKind,
    #[serde(default)]
    pub property_details: Option<PropertyDetails>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(rename = "type")]
    pub kind: LeadKind,
    pub property_details: Option<PropertyDetails>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadReceipt {
    pub success: bool,
    pub id: Uuid,
}

#[derive(Debug, Error, PartialEq)]
pub enum LeadError {
    #[error("name is required")]
    MissingName,
    #[error("a valid email address is required")]
    InvalidEmail,
    #[error("phone is required for expert callback requests")]
    MissingPhone,
    #[error("property {0} must be a finite, non-negative number")]
    InvalidFigure(&'static str),
}

pub fn validate(request: &LeadRequest) -> Result<(), LeadError> {
    if request.name.trim().is_empty() {
        return Err(LeadError::MissingName);
    }

    if !is_plausible_email(request.email.trim()) {
        return Err(LeadError::InvalidEmail);
    }

    let has_phone = request
        .phone
        .as_deref()
        .is_some_and(|phone| !phone.trim().is_empty());
    if request.kind == LeadKind::List && !has_phone {
        return Err(LeadError::MissingPhone);
    }

    if let Some(details) = &request.property_details {
        for (name, value) in [
            ("price", details.price),
            ("rent", details.rent),
            ("yield", details.yield_percent),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LeadError::InvalidFigure(name));
            }
        }
    }

    Ok(())
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// In-memory lead inbox, shared by clones.
#[derive(Debug, Clone, Default)]
pub struct LeadStore {
    leads: Arc<RwLock<Vec<Lead>>>,
}

impl LeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn submit(&self, request: LeadRequest) -> Result<LeadReceipt, LeadError> {
        validate(&request)?;

        let phone = request
            .phone
            .map(|phone| phone.trim().to_string())
            .filter(|phone| !phone.is_empty());
        let lead = Lead {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            phone,
            kind: request.kind,
            property_details: request.property_details,
        };
        let id = lead.id;

        debug!(lead = ?lead, "storing lead");
        self.leads.write().await.push(lead);
        info!(%id, kind = request.kind.as_str(), "lead captured");

        Ok(LeadReceipt { success: true, id })
    }

    pub async fn len(&self) -> usize {
        self.leads.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn snapshot(&self) -> Vec<Lead> {
        self.leads.read().await.clone()
    }
}
