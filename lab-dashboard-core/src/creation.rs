//! Instance creation flow
//!
//! [`CreationForm`] holds the field values of one dialog session and
//! [`validate`] checks them. [`CreationDialog`] owns the session lifecycle:
//! opening resets the status to `FORM`, closing schedules the same reset
//! 150 ms later, and submitting validates locally before anything is sent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use lab_dashboard_client::{Domain, InstanceType, NewDomainRequest};
use tokio::sync::broadcast;
use validator::Validate;

use crate::chips::{ChipInput, DEFAULT_VULNERABLE_APIS, REQUIRED_MESSAGE};
use crate::error::{CoreError, CoreResult};
use crate::gateway::DashboardGateway;
use crate::scheduler::ScheduledCallback;
use crate::status::{InstanceStatus, StatusKind};

pub const DEFAULT_AMOUNT: u32 = 1;
pub const DEFAULT_TTL_DAYS: u32 = 30;

/// Delay between closing the dialog and resetting the status to `FORM`.
pub const RESET_DELAY: Duration = Duration::from_millis(150);

pub const NEW_INSTANCE_TITLE: &str = "New Instance";
pub const CLONE_INSTANCE_TITLE: &str = "Clone Instance";

/// Instance types offered until the server's options arrive.
pub const DEFAULT_INSTANCE_TYPES: [&str; 2] = ["Detection", "Discovery"];

// ============ Validation ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    DomainName,
    Amount,
    InstanceType,
    TtlInDays,
    VulnerableApplications,
}

impl Field {
    pub const ALL: [Self; 5] = [
        Self::DomainName,
        Self::Amount,
        Self::InstanceType,
        Self::TtlInDays,
        Self::VulnerableApplications,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::DomainName => "Domain name",
            Self::Amount => "Amount",
            Self::InstanceType => "Type",
            Self::TtlInDays => "TTL (days)",
            Self::VulnerableApplications => "Vulnerable applications",
        }
    }

    fn from_request_field(name: &str) -> Option<Self> {
        match name {
            "domain_name" => Some(Self::DomainName),
            "amount" => Some(Self::Amount),
            "type" | "instance_type" => Some(Self::InstanceType),
            "ttl_in_days" => Some(Self::TtlInDays),
            "vulnerable_applications" => Some(Self::VulnerableApplications),
            _ => None,
        }
    }
}

/// Raw form input. Numbers are kept as typed so invalid input can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub domain_name: String,
    pub amount: String,
    pub instance_type: String,
    pub ttl_in_days: String,
    pub vulnerable_applications: Vec<String>,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            domain_name: String::new(),
            amount: DEFAULT_AMOUNT.to_string(),
            instance_type: String::new(),
            ttl_in_days: DEFAULT_TTL_DAYS.to_string(),
            vulnerable_applications: Vec::new(),
        }
    }
}

/// Field errors; empty when the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, String>,
}

impl ValidationResult {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn errors(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn add(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{}: {message}", field.label()))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Whether the chip list is mandatory for `instance_type`.
#[must_use]
pub fn is_api_required(instance_type: &str) -> bool {
    instance_type
        .parse::<InstanceType>()
        .is_ok_and(|kind| kind.requires_applications())
}

fn parse_whole_number(input: &str) -> Option<u32> {
    input.trim().parse().ok()
}

/// Check `values` without side effects.
#[must_use]
pub fn validate(values: &FormValues, is_api_required: bool) -> ValidationResult {
    let mut result = ValidationResult::default();

    let amount = parse_whole_number(&values.amount);
    if amount.is_none() {
        result.add(Field::Amount, "Amount must be a whole number");
    }
    let ttl_in_days = parse_whole_number(&values.ttl_in_days);
    if ttl_in_days.is_none() {
        result.add(Field::TtlInDays, "TTL must be a whole number of days");
    }

    let candidate = NewDomainRequest {
        domain_name: values.domain_name.trim().to_string(),
        amount: amount.unwrap_or(DEFAULT_AMOUNT),
        instance_type: values.instance_type.clone(),
        vulnerable_applications: Vec::new(),
        ttl_in_days: ttl_in_days.unwrap_or(DEFAULT_TTL_DAYS),
        owner: String::new(),
    };
    if let Err(errors) = candidate.validate() {
        for (name, field_errors) in errors.field_errors() {
            let Some(field) = Field::from_request_field(&name) else {
                continue;
            };
            let message = field_errors
                .first()
                .and_then(|e| e.message.as_ref())
                .map_or_else(|| format!("{} is invalid", field.label()), ToString::to_string);
            result.add(field, message);
        }
    }

    if is_api_required && values.vulnerable_applications.is_empty() {
        result.add(Field::VulnerableApplications, REQUIRED_MESSAGE);
    }

    result
}

/// Build the request body from valid `values`.
///
/// # Errors
/// [`CoreError::Validation`] with every field error when `values` is invalid.
pub fn build_request(values: &FormValues, owner: &str) -> CoreResult<NewDomainRequest> {
    let required = is_api_required(&values.instance_type);
    let result = validate(values, required);
    if !result.is_valid() {
        return Err(CoreError::Validation(result.to_string()));
    }

    let (Some(amount), Some(ttl_in_days)) = (
        parse_whole_number(&values.amount),
        parse_whole_number(&values.ttl_in_days),
    ) else {
        return Err(CoreError::Validation("numeric fields are invalid".into()));
    };

    Ok(NewDomainRequest {
        domain_name: values.domain_name.trim().to_string(),
        amount,
        instance_type: values.instance_type.clone(),
        vulnerable_applications: if required {
            values.vulnerable_applications.clone()
        } else {
            Vec::new()
        },
        ttl_in_days,
        owner: owner.to_string(),
    })
}

// ============ Form options ============

/// Choices for the form, replaced by the server's options when published.
pub struct FormOptions {
    vulnerable_apis: Vec<String>,
    instance_types: Vec<String>,
    apis_rx: broadcast::Receiver<Vec<String>>,
    types_rx: broadcast::Receiver<Vec<String>>,
}

impl FormOptions {
    #[must_use]
    pub fn new(gateway: &DashboardGateway) -> Self {
        Self {
            vulnerable_apis: DEFAULT_VULNERABLE_APIS.iter().map(ToString::to_string).collect(),
            instance_types: DEFAULT_INSTANCE_TYPES.iter().map(ToString::to_string).collect(),
            apis_rx: gateway.subscribe_vulnerable_apis(),
            types_rx: gateway.subscribe_instance_types(),
        }
    }

    #[must_use]
    pub fn vulnerable_apis(&self) -> &[String] {
        &self.vulnerable_apis
    }

    #[must_use]
    pub fn instance_types(&self) -> &[String] {
        &self.instance_types
    }

    /// Apply newly published options. Returns whether the vocabulary changed.
    pub fn sync(&mut self) -> bool {
        let mut apis_changed = false;
        while let Some(apis) = latest(&mut self.apis_rx) {
            self.vulnerable_apis = apis;
            apis_changed = true;
        }
        while let Some(types) = latest(&mut self.types_rx) {
            if !types.is_empty() {
                self.instance_types = types;
            }
        }
        apis_changed
    }
}

fn latest(rx: &mut broadcast::Receiver<Vec<String>>) -> Option<Vec<String>> {
    loop {
        match rx.try_recv() {
            Ok(value) => return Some(value),
            Err(broadcast::error::TryRecvError::Lagged(_)) => {}
            Err(_) => return None,
        }
    }
}

// ============ Form ============

/// Pre-fill for clone mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSource {
    pub instance_type: InstanceType,
    pub vulnerable_applications: Vec<String>,
}

impl From<&Domain> for CloneSource {
    fn from(domain: &Domain) -> Self {
        Self {
            instance_type: domain.instance_type,
            vulnerable_applications: domain.vulnerable_applications.clone(),
        }
    }
}

/// Text fields editable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    DomainName,
    Amount,
    TtlInDays,
}

/// Field values of one dialog session.
#[derive(Debug, Clone)]
pub struct CreationForm {
    values: FormValues,
    chips: ChipInput,
    type_locked: bool,
    cloned: bool,
}

impl CreationForm {
    #[must_use]
    pub fn new(vocabulary: Vec<String>) -> Self {
        Self {
            values: FormValues::default(),
            chips: ChipInput::new(vocabulary),
            type_locked: false,
            cloned: false,
        }
    }

    /// Clone mode: type pre-filled and locked, chips pre-selected.
    #[must_use]
    pub fn from_clone(source: &CloneSource, vocabulary: Vec<String>) -> Self {
        let values = FormValues {
            instance_type: source.instance_type.as_str().to_string(),
            ..FormValues::default()
        };
        Self {
            values,
            chips: ChipInput::with_selection(vocabulary, source.vulnerable_applications.clone()),
            type_locked: true,
            cloned: true,
        }
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        if self.cloned {
            CLONE_INSTANCE_TITLE
        } else {
            NEW_INSTANCE_TITLE
        }
    }

    #[must_use]
    pub fn is_type_locked(&self) -> bool {
        self.type_locked
    }

    #[must_use]
    pub fn is_api_required(&self) -> bool {
        is_api_required(&self.values.instance_type)
    }

    #[must_use]
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::DomainName => &self.values.domain_name,
            TextField::Amount => &self.values.amount,
            TextField::TtlInDays => &self.values.ttl_in_days,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::DomainName => &mut self.values.domain_name,
            TextField::Amount => &mut self.values.amount,
            TextField::TtlInDays => &mut self.values.ttl_in_days,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: &str) {
        value.clone_into(self.text_mut(field));
    }

    pub fn push_char(&mut self, field: TextField, c: char) {
        self.text_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: TextField) {
        self.text_mut(field).pop();
    }

    #[must_use]
    pub fn instance_type(&self) -> &str {
        &self.values.instance_type
    }

    /// Returns `false` when the type is locked.
    pub fn set_instance_type(&mut self, instance_type: &str) -> bool {
        if self.type_locked {
            return false;
        }
        instance_type.clone_into(&mut self.values.instance_type);
        true
    }

    /// Step to the next entry of `types` (or the first if unset).
    pub fn cycle_instance_type(&mut self, types: &[String]) -> bool {
        if types.is_empty() {
            return false;
        }
        let next = types
            .iter()
            .position(|t| *t == self.values.instance_type)
            .map_or(0, |pos| (pos + 1) % types.len());
        let choice = types[next].clone();
        self.set_instance_type(&choice)
    }

    #[must_use]
    pub fn chips(&self) -> &ChipInput {
        &self.chips
    }

    pub fn chips_mut(&mut self) -> &mut ChipInput {
        &mut self.chips
    }

    /// Current values including the chip selection.
    #[must_use]
    pub fn values(&self) -> FormValues {
        FormValues {
            vulnerable_applications: self.chips.selected().to_vec(),
            ..self.values.clone()
        }
    }

    #[must_use]
    pub fn validate(&self) -> ValidationResult {
        validate(&self.values(), self.is_api_required())
    }

    pub fn build_request(&self, owner: &str) -> CoreResult<NewDomainRequest> {
        build_request(&self.values(), owner)
    }
}

// ============ Dialog ============

/// Creation dialog session: at most one form open at a time.
pub struct CreationDialog {
    gateway: Arc<DashboardGateway>,
    owner: String,
    form: Option<CreationForm>,
    pending_reset: ScheduledCallback,
}

impl CreationDialog {
    #[must_use]
    pub fn new(gateway: Arc<DashboardGateway>, owner: impl Into<String>) -> Self {
        Self {
            gateway,
            owner: owner.into(),
            form: None,
            pending_reset: ScheduledCallback::default(),
        }
    }

    /// Open with `form`: cancel any pending reset and reset to `FORM` now.
    pub fn open(&mut self, form: CreationForm) {
        self.pending_reset.cancel();
        self.gateway.status().reset();
        log::debug!("Opening '{}' dialog", form.title());
        self.form = Some(form);
    }

    pub fn open_new(&mut self, options: &FormOptions) {
        self.open(CreationForm::new(options.vulnerable_apis().to_vec()));
    }

    pub fn open_clone(&mut self, source: &CloneSource, options: &FormOptions) {
        self.open(CreationForm::from_clone(
            source,
            options.vulnerable_apis().to_vec(),
        ));
    }

    /// Close the form and reset the status to `FORM` after [`RESET_DELAY`],
    /// whatever the status is now. An in-flight request is not cancelled.
    pub fn close(&mut self) {
        self.form = None;
        self.pending_reset.cancel();
        let gateway = Arc::clone(&self.gateway);
        self.pending_reset = ScheduledCallback::schedule(RESET_DELAY, move || {
            gateway.status().reset();
        });
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.form.is_some()
    }

    #[must_use]
    pub fn form(&self) -> Option<&CreationForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut CreationForm> {
        self.form.as_mut()
    }

    #[must_use]
    pub fn status(&self) -> InstanceStatus {
        self.gateway.current_status()
    }

    /// Refresh the chip vocabulary of the open form.
    pub fn set_vocabulary(&mut self, vocabulary: &[String]) {
        if let Some(form) = &mut self.form {
            form.chips_mut().set_vocabulary(vocabulary.to_vec());
        }
    }

    /// Validate and submit in the background.
    ///
    /// Invalid input is rejected here without any request. On success the
    /// status moves to `SUCCESS` and the domain list is reloaded.
    ///
    /// # Errors
    /// * [`CoreError::Validation`] when the form is closed or invalid
    /// * [`CoreError::InvalidTransition`] when a submission is already under way
    pub fn submit(&self) -> CoreResult<()> {
        let Some(form) = &self.form else {
            return Err(CoreError::Validation("no creation form is open".into()));
        };
        let request = form.build_request(&self.owner)?;

        let current = self.gateway.current_status();
        if !current.can_transition_to(StatusKind::Loading) {
            return Err(CoreError::InvalidTransition {
                from: current.kind(),
                to: StatusKind::Loading,
            });
        }

        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            if let Some(submission) = gateway.create_domain(&request).await {
                if let Err(e) = gateway.status().succeed(submission) {
                    log::debug!("Creation of '{}' finished after reset: {e}", request.domain_name);
                }
                gateway.list_domains().await;
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockLabApi;
    use lab_dashboard_client::{ApiError, LabApi, LabOptions};

    fn valid_values() -> FormValues {
        FormValues {
            domain_name: "acme".into(),
            amount: "3".into(),
            instance_type: "Discovery".into(),
            ttl_in_days: "14".into(),
            vulnerable_applications: Vec::new(),
        }
    }

    fn setup() -> (Arc<MockLabApi>, Arc<DashboardGateway>) {
        let api = Arc::new(MockLabApi::new());
        let gateway = Arc::new(DashboardGateway::new(Arc::clone(&api) as Arc<dyn LabApi>));
        (api, gateway)
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    // ---- validate ----

    #[test]
    fn valid_form_passes() {
        assert!(validate(&valid_values(), false).is_valid());
    }

    #[test]
    fn field_rules() {
        let values = FormValues {
            domain_name: "  ".into(),
            amount: "51".into(),
            instance_type: String::new(),
            ttl_in_days: "0".into(),
            vulnerable_applications: Vec::new(),
        };
        let result = validate(&values, false);
        assert!(result.error(Field::DomainName).is_some());
        assert_eq!(result.error(Field::Amount), Some("Amount must be between 1 and 50"));
        assert!(result.error(Field::InstanceType).is_some());
        assert_eq!(result.error(Field::TtlInDays), Some("TTL must be at least 1 day"));
        assert!(result.error(Field::VulnerableApplications).is_none());
    }

    #[test]
    fn non_numeric_amount() {
        let values = FormValues {
            amount: "three".into(),
            ..valid_values()
        };
        assert_eq!(
            validate(&values, false).error(Field::Amount),
            Some("Amount must be a whole number")
        );
    }

    #[test]
    fn detection_requires_applications() {
        let values = FormValues {
            instance_type: "Detection".into(),
            ..valid_values()
        };
        assert!(is_api_required(&values.instance_type));
        assert!(!is_api_required("Discovery"));
        assert!(!is_api_required(""));
        let result = validate(&values, true);
        assert_eq!(result.error(Field::VulnerableApplications), Some(REQUIRED_MESSAGE));

        let with_apps = FormValues {
            vulnerable_applications: vec!["Crapi".into()],
            ..values
        };
        assert!(validate(&with_apps, true).is_valid());
    }

    #[test]
    fn request_carries_owner_and_drops_optional_apps() {
        let values = FormValues {
            vulnerable_applications: vec!["Crapi".into()],
            ..valid_values()
        };
        let request = build_request(&values, "alice").unwrap();
        assert_eq!(request.owner, "alice");
        assert_eq!(request.amount, 3);
        assert_eq!(request.ttl_in_days, 14);
        assert!(request.vulnerable_applications.is_empty());
    }

    // ---- form ----

    #[test]
    fn new_form_defaults() {
        let form = CreationForm::new(vec!["Hackazon".into()]);
        assert_eq!(form.title(), "New Instance");
        assert_eq!(form.text(TextField::Amount), "1");
        assert_eq!(form.text(TextField::TtlInDays), "30");
        assert!(!form.is_type_locked());
        assert!(!form.is_api_required());
    }

    #[test]
    fn clone_form_locks_type_and_preselects() {
        let source = CloneSource {
            instance_type: InstanceType::Detection,
            vulnerable_applications: vec!["Crapi".into()],
        };
        let mut form = CreationForm::from_clone(&source, vec!["Hackazon".into(), "Crapi".into()]);
        assert_eq!(form.title(), "Clone Instance");
        assert_eq!(form.instance_type(), "Detection");
        assert!(form.is_api_required());
        assert!(!form.set_instance_type("Discovery"));
        assert!(!form.cycle_instance_type(&["Discovery".to_string()]));
        assert_eq!(form.chips().selected(), ["Crapi"]);
        assert_eq!(form.chips().available(), ["Hackazon"]);

        form.set_text(TextField::DomainName, "acme-clone");
        let request = form.build_request("alice").unwrap();
        assert_eq!(request.instance_type, "Detection");
        assert_eq!(request.vulnerable_applications, vec!["Crapi".to_string()]);
    }

    #[test]
    fn cycle_instance_type_wraps() {
        let types = vec!["Detection".to_string(), "Discovery".to_string()];
        let mut form = CreationForm::new(Vec::new());
        form.cycle_instance_type(&types);
        assert_eq!(form.instance_type(), "Detection");
        form.cycle_instance_type(&types);
        assert_eq!(form.instance_type(), "Discovery");
        form.cycle_instance_type(&types);
        assert_eq!(form.instance_type(), "Detection");
    }

    // ---- dialog ----

    #[tokio::test]
    async fn detection_without_apps_fails_before_network() {
        let (api, gateway) = setup();
        let mut dialog = CreationDialog::new(gateway, "alice");
        let mut form = CreationForm::new(Vec::new());
        form.set_text(TextField::DomainName, "acme");
        form.set_instance_type("Detection");
        dialog.open(form);

        let result = dialog.submit();
        assert!(matches!(result, Err(CoreError::Validation(_))));
        settle().await;
        assert!(api.created().await.is_empty());
        assert_eq!(dialog.status(), InstanceStatus::Form);
    }

    #[tokio::test]
    async fn successful_submit_sets_success_and_reloads() {
        let (api, gateway) = setup();
        let mut rx = gateway.status().subscribe();
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        let mut form = CreationForm::new(Vec::new());
        form.set_text(TextField::DomainName, "acme");
        form.set_instance_type("Discovery");
        dialog.open(form);
        assert_eq!(rx.try_recv().unwrap(), InstanceStatus::Form);

        dialog.submit().unwrap();
        settle().await;

        assert_eq!(rx.try_recv().unwrap(), InstanceStatus::Loading);
        assert_eq!(rx.try_recv().unwrap(), InstanceStatus::Success);
        assert_eq!(api.created().await[0].owner, "alice");
        assert_eq!(api.list_calls().await, 1);
    }

    #[tokio::test]
    async fn failed_submit_reports_server_message() {
        let (api, gateway) = setup();
        api.fail_next_with(ApiError::Server {
            status: 400,
            body: r#"{"error":"duplicate name"}"#.into(),
        })
        .await;
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        let mut form = CreationForm::new(Vec::new());
        form.set_text(TextField::DomainName, "acme");
        form.set_instance_type("Discovery");
        dialog.open(form);

        dialog.submit().unwrap();
        settle().await;

        assert_eq!(
            dialog.status(),
            InstanceStatus::Error {
                message: "duplicate name".into()
            }
        );
        assert_eq!(api.list_calls().await, 0);

        // A second submit is refused until the dialog is reopened.
        assert!(matches!(
            dialog.submit(),
            Err(CoreError::InvalidTransition { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn close_resets_after_exactly_150ms() {
        let (api, gateway) = setup();
        api.fail_next_with(ApiError::Transport {
            detail: "down".into(),
        })
        .await;
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        let mut form = CreationForm::new(Vec::new());
        form.set_text(TextField::DomainName, "acme");
        form.set_instance_type("Discovery");
        dialog.open(form);
        dialog.submit().unwrap();
        settle().await;
        assert_eq!(dialog.status().kind(), StatusKind::Error);

        dialog.close();
        assert!(!dialog.is_open());

        tokio::time::sleep(Duration::from_millis(149)).await;
        assert_eq!(dialog.status().kind(), StatusKind::Error);

        tokio::time::sleep(Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Form);
    }

    #[tokio::test(start_paused = true)]
    async fn reopening_cancels_pending_reset() {
        let (_api, gateway) = setup();
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        dialog.open(CreationForm::new(Vec::new()));
        dialog.close();

        tokio::time::sleep(Duration::from_millis(50)).await;
        dialog.open(CreationForm::new(Vec::new()));
        let mut rx = gateway.status().subscribe();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        assert!(dialog.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn late_completion_after_close_is_ignored() {
        let (api, gateway) = setup();
        let gate = api.hold_create().await;
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        let mut form = CreationForm::new(Vec::new());
        form.set_text(TextField::DomainName, "acme");
        form.set_instance_type("Discovery");
        dialog.open(form);
        dialog.submit().unwrap();
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Loading);

        dialog.close();
        tokio::time::sleep(RESET_DELAY).await;
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Form);

        gate.notify_one();
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Form);
        // The server did create it, so the list is still refreshed.
        assert_eq!(api.list_calls().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_request_cannot_settle_a_newer_one() {
        let (api, gateway) = setup();
        let gate = api.hold_create().await;
        let mut dialog = CreationDialog::new(Arc::clone(&gateway), "alice");
        let filled = || {
            let mut form = CreationForm::new(Vec::new());
            form.set_text(TextField::DomainName, "acme");
            form.set_instance_type("Discovery");
            form
        };

        dialog.open(filled());
        dialog.submit().unwrap();
        settle().await;
        dialog.close();
        tokio::time::sleep(RESET_DELAY).await;
        settle().await;

        dialog.open(filled());
        dialog.submit().unwrap();
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Loading);
        assert_eq!(api.created().await.len(), 2);

        // First request succeeds on the server after its dialog was closed
        gate.notify_one();
        settle().await;
        assert_eq!(dialog.status(), InstanceStatus::Loading);

        api.fail_next_with(ApiError::Server {
            status: 400,
            body: r#"{"error":"duplicate name"}"#.into(),
        })
        .await;
        gate.notify_one();
        settle().await;
        assert_eq!(
            dialog.status(),
            InstanceStatus::Error {
                message: "duplicate name".into()
            }
        );
    }

    #[tokio::test]
    async fn options_replace_defaults() {
        let (api, gateway) = setup();
        let mut options = FormOptions::new(&gateway);
        assert_eq!(options.vulnerable_apis(), ["Hackazon", "Crapi"]);

        api.set_options(LabOptions {
            vulnerable_apis: vec!["Juice Shop".into()],
            instance_types: Vec::new(),
        })
        .await;
        gateway.get_options().await;

        assert!(options.sync());
        assert_eq!(options.vulnerable_apis(), ["Juice Shop"]);
        assert_eq!(options.instance_types(), ["Detection", "Discovery"]);
        assert!(!options.sync());
    }
}
