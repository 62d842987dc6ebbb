use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============ Domains ============

/// Upper bound on labs per domain accepted by `POST /domains`.
pub const MAX_AMOUNT: u32 = 50;

/// Kind of lab environment a domain provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceType {
    Detection,
    Discovery,
}

impl InstanceType {
    /// Wire name, also used for display.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detection => "Detection",
            Self::Discovery => "Discovery",
        }
    }

    /// Whether instances of this type must list vulnerable applications.
    #[must_use]
    pub fn requires_applications(&self) -> bool {
        matches!(self, Self::Detection)
    }
}

impl fmt::Display for InstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstanceType {
    type Err = String;

    /// Exact wire name; the form only offers these two spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Detection" => Ok(Self::Detection),
            "Discovery" => Ok(Self::Discovery),
            other => Err(format!("unknown instance type: {other}")),
        }
    }
}

/// Reference to one lab inside a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabInfo {
    pub id: String,
    pub name: String,
}

/// One provisioned environment as returned by `GET /domains`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Unique key of the domain.
    pub domain_name: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub instance_type: InstanceType,
    pub amount: u32,
    #[serde(with = "crate::utils::datetime")]
    pub creation_date: DateTime<Utc>,
    /// May already be in the past.
    #[serde(with = "crate::utils::datetime")]
    pub expiration_date: DateTime<Utc>,
    /// Older backends call this field `learned_apis`.
    #[serde(default, alias = "learned_apis")]
    pub vulnerable_applications: Vec<String>,
    #[serde(default)]
    pub labs: Vec<LabInfo>,
}

/// Body of `POST /domains`.
///
/// Field rules are declared here; the rule that Detection instances need at
/// least one application depends on the form state and is checked by the
/// creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewDomainRequest {
    #[validate(length(min = 1, message = "Domain name is required"))]
    pub domain_name: String,
    #[validate(range(min = 1, max = MAX_AMOUNT, message = "Amount must be between 1 and 50"))]
    pub amount: u32,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub instance_type: String,
    /// Omitted from the body when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vulnerable_applications: Vec<String>,
    #[validate(range(min = 1, message = "TTL must be at least 1 day"))]
    pub ttl_in_days: u32,
    pub owner: String,
}

/// Body of `DELETE /domains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteDomainRequest {
    pub domain_name: String,
    pub owner: String,
}

impl From<&Domain> for DeleteDomainRequest {
    fn from(domain: &Domain) -> Self {
        Self {
            domain_name: domain.domain_name.clone(),
            owner: domain.owner.clone(),
        }
    }
}

// ============ Labs ============

/// A vulnerable application exposed by a lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerableApplication {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaltLoginDetails {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsConsoleLogin {
    pub url: String,
    pub username: String,
    pub password: String,
}

/// Credential and connection bundle of one lab, from `GET /lab`.
///
/// Contains secrets: never log it.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    #[serde(default)]
    pub vulnerable_applications: Vec<VulnerableApplication>,
    pub salt_login_details: SaltLoginDetails,
    pub aws_console_login: AwsConsoleLogin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_generator_url: Option<String>,
    #[serde(
        default,
        with = "crate::utils::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub generation_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "crate::utils::datetime::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub verification_time: Option<DateTime<Utc>>,
}

impl fmt::Debug for Lab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lab")
            .field("vulnerable_applications", &self.vulnerable_applications.len())
            .field("salt_username", &self.salt_login_details.username)
            .field("aws_username", &self.aws_console_login.username)
            .field("traffic_generator_url", &self.traffic_generator_url)
            .finish_non_exhaustive()
    }
}

// ============ Options ============

/// Choices offered by the creation form, from `GET /options`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabOptions {
    #[serde(default)]
    pub vulnerable_apis: Vec<String>,
    #[serde(default)]
    pub instance_types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn domain_accepts_learned_apis_alias() {
        let domain: Domain = serde_json::from_value(json!({
            "domain_name": "acme",
            "owner": "alice",
            "type": "Detection",
            "amount": 2,
            "creation_date": "2024-01-01T00:00:00Z",
            "expiration_date": "2024-02-01",
            "learned_apis": ["Crapi"],
            "labs": [{"id": "1", "name": "acme-1"}]
        }))
        .unwrap();
        assert_eq!(domain.instance_type, InstanceType::Detection);
        assert_eq!(domain.vulnerable_applications, vec!["Crapi"]);
        assert_eq!(domain.labs.len(), 1);
    }

    #[test]
    fn domain_without_applications_or_labs() {
        let domain: Domain = serde_json::from_value(json!({
            "domain_name": "acme",
            "owner": "alice",
            "type": "Discovery",
            "amount": 1,
            "creation_date": 1_704_067_200,
            "expiration_date": "2024-02-01T00:00:00"
        }))
        .unwrap();
        assert!(domain.vulnerable_applications.is_empty());
        assert!(domain.labs.is_empty());
    }

    #[test]
    fn new_domain_request_omits_empty_applications() {
        let request = NewDomainRequest {
            domain_name: "acme".into(),
            amount: 3,
            instance_type: "Discovery".into(),
            vulnerable_applications: vec![],
            ttl_in_days: 14,
            owner: "alice".into(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "domain_name": "acme",
                "amount": 3,
                "type": "Discovery",
                "ttl_in_days": 14,
                "owner": "alice"
            })
        );
    }

    #[test]
    fn new_domain_request_field_rules() {
        let mut request = NewDomainRequest {
            domain_name: "acme".into(),
            amount: 1,
            instance_type: "Detection".into(),
            vulnerable_applications: vec!["Crapi".into()],
            ttl_in_days: 30,
            owner: "alice".into(),
        };
        assert!(request.validate().is_ok());

        request.amount = MAX_AMOUNT;
        assert!(request.validate().is_ok());

        request.amount = MAX_AMOUNT + 1;
        request.ttl_in_days = 0;
        request.domain_name.clear();
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("amount"));
        assert!(fields.contains_key("ttl_in_days"));
        assert!(fields.contains_key("domain_name"));
        assert!(!fields.contains_key("instance_type"));
    }

    #[test]
    fn instance_type_parses_wire_names() {
        for kind in [InstanceType::Detection, InstanceType::Discovery] {
            assert_eq!(kind.as_str().parse::<InstanceType>(), Ok(kind));
        }
        assert!("detection".parse::<InstanceType>().is_err());
        assert!("".parse::<InstanceType>().is_err());
    }

    #[test]
    fn delete_request_is_camel_case() {
        let body = DeleteDomainRequest {
            domain_name: "acme".into(),
            owner: "alice".into(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"domainName": "acme", "owner": "alice"})
        );
    }

    #[test]
    fn lab_debug_hides_passwords() {
        let lab = Lab {
            vulnerable_applications: vec![],
            salt_login_details: SaltLoginDetails {
                username: "salt".into(),
                password: "s3cret".into(),
            },
            aws_console_login: AwsConsoleLogin {
                url: "https://console".into(),
                username: "aws".into(),
                password: "hunter2".into(),
            },
            traffic_generator_url: None,
            generation_time: None,
            verification_time: None,
        };
        let debug = format!("{lab:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("hunter2"));
    }
}
