//! Request and response bodies, as JSON.

use crate::template::SubstitutionMapping;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request for the fields of the available templates.
///
/// `name` identifies the caller's request and is echoed back; every template
/// in the store is described regardless of it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequest {
    #[serde(default)]
    pub name: String,
}

/// One template and the fields it declares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetails {
    pub name: String,

    pub filename: String,

    /// Field names in deck order, duplicates included
    #[serde(default)]
    pub fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub request: TemplateRequest,

    /// When the response was produced (UTC)
    pub generated: DateTime<Utc>,

    pub templates: Vec<TemplateDetails>,
}

/// Request to generate a deck from one template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestModel {
    #[serde(default)]
    pub name: String,

    /// The template to fill; only `filename` is used to locate it
    pub template_details: TemplateDetails,

    #[serde(default)]
    pub substitutions: SubstitutionMapping,
}
