//! Testing utilities for resource implementations.
//!
//! This module provides utilities to exercise [`Resource`] implementations
//! against an in-memory state store, without any provider host.
//!
//! # Example
//!
//! ```ignore
//! use typed_provider_sdk::testing::ResourceTester;
//! use serde_json::json;
//!
//! #[tokio::test]
//! async fn test_create_bucket() {
//!     let tester = ResourceTester::new(Bucket::default()).unwrap();
//!
//!     let state = tester.create(json!({"name": "logs"})).await.unwrap();
//!
//!     assert_eq!(state.id(), "/buckets/logs");
//!     assert_eq!(state.to_json()["name"], "logs");
//! }
//! ```

use std::sync::Mutex;

use crate::error::{ProviderError, StateError};
use crate::logging::Logger;
use crate::resource::{register, RegisteredResource, Resource};
use crate::schema::{Diagnostic, DiagnosticSeverity};
use crate::state::{MemoryState, ResourceData, StateWriter};
use crate::validation::validate_json;
use crate::value::Value;

/// A test harness for resource implementations.
///
/// Every operation runs against a [`MemoryState`] bound to the resource's
/// combined schema, and logs into a shared [`RecordingLogger`].
pub struct ResourceTester<R: Resource> {
    registered: RegisteredResource<R>,
    logger: RecordingLogger,
}

impl<R: Resource> ResourceTester<R> {
    /// Register `resource` and wrap it.
    pub fn new(resource: R) -> Result<Self, ProviderError> {
        Ok(Self {
            registered: register(resource)?,
            logger: RecordingLogger::new(),
        })
    }

    /// The registered resource.
    pub fn registered(&self) -> &RegisteredResource<R> {
        &self.registered
    }

    /// The logger every operation writes to.
    pub fn logger(&self) -> &RecordingLogger {
        &self.logger
    }

    /// Load persisted state, bound to the resource schema.
    pub fn state_from_json(&self, json: serde_json::Value) -> Result<MemoryState, TestError> {
        Ok(MemoryState::from_json(json)?.with_schema(self.registered.schema().clone()))
    }

    /// Load state persisted at an older schema version, upgrading it first.
    pub fn upgrade_state(
        &self,
        version: u64,
        json: serde_json::Value,
    ) -> Result<MemoryState, TestError> {
        Ok(self.registered.upgrade_state(version, json)?)
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Validate `config` and create the resource from it.
    ///
    /// Returns the committed state after create.
    pub async fn create(&self, config: serde_json::Value) -> Result<MemoryState, TestError> {
        check_diagnostics(validate_json(self.registered.schema(), &config))?;

        let mut state = self.registered.new_state();
        apply_changes(&mut state, config)?;
        self.registered.create(&mut state, &self.logger).await?;
        state.apply();
        Ok(state)
    }

    /// Refresh `state`.
    pub async fn read(&self, mut state: MemoryState) -> Result<MemoryState, ProviderError> {
        self.registered.read(&mut state, &self.logger).await?;
        state.apply();
        Ok(state)
    }

    /// Apply `changes` on top of `prior` and update the resource.
    ///
    /// Only the keys in `changes` are written, so exactly those report as
    /// changed to the resource. A `null` member clears its key.
    pub async fn update(
        &self,
        prior: MemoryState,
        changes: serde_json::Value,
    ) -> Result<MemoryState, TestError> {
        let mut state = prior;
        apply_changes(&mut state, changes)?;
        self.registered.update(&mut state, &self.logger).await?;
        state.apply();
        Ok(state)
    }

    /// Delete the resource recorded in `state`.
    pub async fn delete(&self, mut state: MemoryState) -> Result<MemoryState, ProviderError> {
        self.registered.delete(&mut state, &self.logger).await?;
        state.apply();
        Ok(state)
    }

    // =========================================================================
    // Lifecycle Helpers
    // =========================================================================

    /// Run a full create lifecycle: create → read.
    ///
    /// Returns the final state after read.
    pub async fn lifecycle_create(
        &self,
        config: serde_json::Value,
    ) -> Result<MemoryState, TestError> {
        let created = self.create(config).await?;
        Ok(self.read(created).await?)
    }

    /// Run a full CRUD lifecycle: create → read → update → read → delete.
    ///
    /// Returns the state after the update (before delete).
    pub async fn lifecycle_crud(
        &self,
        initial_config: serde_json::Value,
        changes: serde_json::Value,
    ) -> Result<MemoryState, TestError> {
        let created = self.lifecycle_create(initial_config).await?;

        let updated = self.update(created, changes).await?;
        let updated = self.read(updated).await?;

        let deleted = self.delete(updated.clone()).await?;
        if !deleted.is_gone() {
            return Err(TestError::Provider(ProviderError::Sdk(format!(
                "{} still has ID {:?} after delete",
                self.registered.resource_type(),
                deleted.id()
            ))));
        }

        Ok(updated)
    }
}

fn apply_changes(state: &mut MemoryState, changes: serde_json::Value) -> Result<(), TestError> {
    match Value::from_json(changes) {
        Value::Map(entries) => {
            for (key, value) in entries {
                state.set(&key, value)?;
            }
            Ok(())
        },
        other => Err(TestError::Diagnostics(vec![Diagnostic::error(
            "Expected object",
        )
        .with_detail(format!("Got {}", other.type_name()))])),
    }
}

/// Error type for test operations that may fail with diagnostics.
#[derive(Debug)]
pub enum TestError {
    /// The operation failed with diagnostics.
    Diagnostics(Vec<Diagnostic>),
    /// The state store rejected a value.
    State(StateError),
    /// The operation failed with a provider error.
    Provider(ProviderError),
}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::Diagnostics(diags) => {
                writeln!(f, "Operation failed with {} diagnostic(s):", diags.len())?;
                for diag in diags {
                    write!(f, "  [{:?}] {}", diag.severity, diag.summary)?;
                    if let Some(detail) = &diag.detail {
                        write!(f, ": {}", detail)?;
                    }
                    if let Some(attr) = &diag.attribute {
                        write!(f, " (at {})", attr)?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            },
            TestError::State(e) => write!(f, "State error: {}", e),
            TestError::Provider(e) => write!(f, "Provider error: {}", e),
        }
    }
}

impl std::error::Error for TestError {}

impl From<ProviderError> for TestError {
    fn from(e: ProviderError) -> Self {
        TestError::Provider(e)
    }
}

impl From<StateError> for TestError {
    fn from(e: StateError) -> Self {
        TestError::State(e)
    }
}

/// Check diagnostics and return an error if there are any errors.
fn check_diagnostics(diagnostics: Vec<Diagnostic>) -> Result<(), TestError> {
    let errors: Vec<_> = diagnostics
        .into_iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TestError::Diagnostics(errors))
    }
}

// =========================================================================
// Recording Logger
// =========================================================================

/// Severity of a recorded log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Recorded via [`Logger::debug`].
    Debug,
    /// Recorded via [`Logger::info`].
    Info,
    /// Recorded via [`Logger::warn`].
    Warn,
}

/// A [`Logger`] that keeps every message for later inspection.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded message with its level, oldest first.
    pub fn entries(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// Every recorded message, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    /// The messages recorded at warn level.
    pub fn warnings(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(level, _)| *level == LogLevel::Warn)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, level: LogLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogLevel, String)>> {
        // A panicking test thread must not hide what was recorded before it.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Logger for RecordingLogger {
    fn debug(&self, message: &str) {
        self.record(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.record(LogLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(LogLevel::Warn, message);
    }
}

// =========================================================================
// Assertion Helpers
// =========================================================================

/// Assert that diagnostics contain no errors.
///
/// # Panics
///
/// Panics if there are any error diagnostics.
pub fn assert_no_errors(diagnostics: &[Diagnostic]) {
    let errors: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
        .collect();

    assert!(
        errors.is_empty(),
        "Expected no errors, but got {} error(s): {:?}",
        errors.len(),
        errors.iter().map(|d| &d.summary).collect::<Vec<_>>()
    );
}

/// Assert that diagnostics contain at least one error.
///
/// # Panics
///
/// Panics if there are no error diagnostics.
pub fn assert_has_errors(diagnostics: &[Diagnostic]) {
    let has_errors = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error));

    assert!(has_errors, "Expected at least one error, but got none");
}

/// Assert that diagnostics contain an error with the given summary substring.
///
/// # Panics
///
/// Panics if no error diagnostic contains the given substring.
pub fn assert_error_contains(diagnostics: &[Diagnostic], substring: &str) {
    let has_matching_error = diagnostics
        .iter()
        .any(|d| matches!(d.severity, DiagnosticSeverity::Error) && d.summary.contains(substring));

    assert!(
        has_matching_error,
        "Expected an error containing '{}', but no matching error found. Errors: {:?}",
        substring,
        diagnostics
            .iter()
            .filter(|d| matches!(d.severity, DiagnosticSeverity::Error))
            .map(|d| &d.summary)
            .collect::<Vec<_>>()
    );
}

/// Assert that decoding produced no warnings.
///
/// # Panics
///
/// Panics if there are any warning diagnostics.
pub fn assert_no_warnings(diagnostics: &[Diagnostic]) {
    let warnings: Vec<_> = diagnostics
        .iter()
        .filter(|d| matches!(d.severity, DiagnosticSeverity::Warning))
        .map(|d| d.attribute.as_deref().unwrap_or_default())
        .collect();

    assert!(
        warnings.is_empty(),
        "Expected no warnings, but got {} warning(s) for: {:?}",
        warnings.len(),
        warnings
    );
}

/// Assert that a warning was raised for the given attribute path.
///
/// # Panics
///
/// Panics if no warning diagnostic names `attribute`.
pub fn assert_warning_for(diagnostics: &[Diagnostic], attribute: &str) {
    let found = diagnostics.iter().any(|d| {
        matches!(d.severity, DiagnosticSeverity::Warning)
            && d.attribute.as_deref() == Some(attribute)
    });

    assert!(
        found,
        "Expected a warning for '{}', but none was raised",
        attribute
    );
}
