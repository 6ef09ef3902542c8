//! Numeric and symbolic settings, and the scope guard that overrides them.
//!
//! The [`Environment`] is the only mutable configuration shared between
//! providers. Its settings can only change through [`Environment::enter`],
//! which validates the whole override set first, then applies it, and
//! restores the previous values when the returned [`ScopeGuard`] drops,
//! including during a panic unwind.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use tracing::debug;

use crate::errors::ConfigError;

/// Name of the accuracy setting.
pub const ACCURACY_FOR_TESTING: &str = "accuracy_for_testing";
/// Name of the field-conversion setting.
pub const FIELD_CONVERSION: &str = "field_conversion";
/// Significant digits used for printing and comparing reals outside any scope.
pub const DEFAULT_ACCURACY: u32 = 8;

/// Backend used to convert exact field elements to output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldBackend {
    Native,
    Algebra,
}

impl FieldBackend {
    pub fn name(self) -> &'static str {
        match self {
            FieldBackend::Native => "native",
            FieldBackend::Algebra => "algebra",
        }
    }
}

impl fmt::Display for FieldBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A setting a scope can override.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Setting {
    Accuracy,
    FieldConversion,
}

impl Setting {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ACCURACY_FOR_TESTING => Some(Setting::Accuracy),
            FIELD_CONVERSION => Some(Setting::FieldConversion),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Setting::Accuracy => ACCURACY_FOR_TESTING,
            Setting::FieldConversion => FIELD_CONVERSION,
        }
    }
}

/// A value for one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    /// Significant digits; `None` is full natural precision.
    Accuracy(Option<u32>),
    Field(FieldBackend),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Accuracy(Some(d)) => write!(f, "accuracy {d}"),
            SettingValue::Accuracy(None) => f.write_str("full precision"),
            SettingValue::Field(b) => write!(f, "field backend {b}"),
        }
    }
}

/// One requested override, addressed by setting name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub setting: String,
    pub value: SettingValue,
}

/// An ordered set of overrides for one scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<Override>,
}

impl Overrides {
    pub fn none() -> Self {
        Self::default()
    }

    /// Override the accuracy used for printing and comparing reals.
    #[must_use]
    pub fn accuracy(self, digits: Option<u32>) -> Self {
        self.set(ACCURACY_FOR_TESTING, SettingValue::Accuracy(digits))
    }

    /// Override the field-conversion backend.
    #[must_use]
    pub fn field(self, backend: FieldBackend) -> Self {
        self.set(FIELD_CONVERSION, SettingValue::Field(backend))
    }

    /// Override a setting by name. Unknown names are rejected when the scope is entered.
    #[must_use]
    pub fn set(mut self, setting: impl Into<String>, value: SettingValue) -> Self {
        self.entries.push(Override {
            setting: setting.into(),
            value,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Override> {
        self.entries.iter()
    }
}

/// The numeric/symbolic configuration examples run under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    accuracy: Option<u32>,
    field: FieldBackend,
    algebra_active: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Values captured before a scope applied its overrides. Only the settings
/// the scope touches are captured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    accuracy: Option<Option<u32>>,
    field: Option<FieldBackend>,
}

impl EnvironmentSnapshot {
    fn restore(self, env: &mut Environment) {
        if let Some(accuracy) = self.accuracy {
            env.accuracy = accuracy;
        }
        if let Some(field) = self.field {
            env.field = field;
        }
    }
}

impl Environment {
    /// Baseline settings: 8-digit accuracy, native field conversion.
    pub fn new(algebra_active: bool) -> Self {
        Self {
            accuracy: Some(DEFAULT_ACCURACY),
            field: FieldBackend::Native,
            algebra_active,
        }
    }

    pub fn accuracy(&self) -> Option<u32> {
        self.accuracy
    }

    pub fn field(&self) -> FieldBackend {
        self.field
    }

    /// Whether the computer-algebra backend is present.
    pub fn algebra_active(&self) -> bool {
        self.algebra_active
    }

    /// Check an override set without applying it.
    pub fn validate(&self, overrides: &Overrides) -> Result<Vec<(Setting, SettingValue)>, ConfigError> {
        let mut checked: Vec<(Setting, SettingValue)> = Vec::new();
        for o in overrides.iter() {
            let setting = Setting::from_name(&o.setting).ok_or_else(|| ConfigError::UnknownSetting {
                name: o.setting.clone(),
            })?;
            if checked.iter().any(|(s, _)| *s == setting) {
                return Err(ConfigError::DuplicateOverride {
                    setting: o.setting.clone(),
                });
            }
            match (setting, o.value) {
                (Setting::Accuracy, SettingValue::Accuracy(Some(0))) => {
                    return Err(ConfigError::ZeroAccuracy)
                }
                (Setting::Accuracy, SettingValue::Accuracy(_)) => {}
                (Setting::FieldConversion, SettingValue::Field(FieldBackend::Algebra))
                    if !self.algebra_active =>
                {
                    return Err(ConfigError::BackendUnavailable {
                        backend: FieldBackend::Algebra.to_string(),
                    })
                }
                (Setting::FieldConversion, SettingValue::Field(_)) => {}
                (setting, value) => {
                    return Err(ConfigError::WrongValue {
                        setting: setting.name().to_string(),
                        value: value.to_string(),
                    })
                }
            }
            checked.push((setting, o.value));
        }
        Ok(checked)
    }

    /// Enter a scope: validate, snapshot, apply.
    ///
    /// On error nothing has been changed. The previous values come back when
    /// the guard is dropped.
    pub fn enter(&mut self, overrides: &Overrides) -> Result<ScopeGuard<'_>, ConfigError> {
        let checked = self.validate(overrides)?;

        let mut snapshot = EnvironmentSnapshot::default();
        for (setting, value) in checked {
            match (setting, value) {
                (Setting::Accuracy, SettingValue::Accuracy(digits)) => {
                    snapshot.accuracy = Some(self.accuracy);
                    self.accuracy = digits;
                }
                (Setting::FieldConversion, SettingValue::Field(backend)) => {
                    snapshot.field = Some(self.field);
                    self.field = backend;
                }
                _ => {}
            }
        }
        debug!(accuracy = ?self.accuracy, field = %self.field, "scope entered");

        Ok(ScopeGuard {
            env: self,
            snapshot: Some(snapshot),
        })
    }

    /// Run `f` inside a scope.
    pub fn with_scope<T>(
        &mut self,
        overrides: &Overrides,
        f: impl FnOnce(&Environment) -> T,
    ) -> Result<T, ConfigError> {
        let guard = self.enter(overrides)?;
        Ok(f(&*guard))
    }
}

/// An open scope. Restores the captured settings on drop.
pub struct ScopeGuard<'env> {
    env: &'env mut Environment,
    snapshot: Option<EnvironmentSnapshot>,
}

impl Deref for ScopeGuard<'_> {
    type Target = Environment;

    fn deref(&self) -> &Environment {
        self.env
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore(self.env);
            debug!(accuracy = ?self.env.accuracy, field = %self.env.field, "scope restored");
        }
    }
}
