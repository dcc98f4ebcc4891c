//! Form bodies and their required-field checks
//!
//! A form that fails its check is answered without calling any action, so
//! the model is never reached.

use crate::domain::entities::{
    RecoveryEffort, RecoveryPotentialInput, ThreatDetectionInput, WipeAccuracyInput,
};
use serde::Deserialize;
use thiserror::Error;

/// Missing required form fields
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter your email and password.")]
    MissingCredentials,

    #[error("Please upload a wipe log file.")]
    MissingWipeLog,

    #[error("Please upload a device image file.")]
    MissingDeviceImage,

    #[error("Please provide a device description.")]
    MissingDeviceDescription,

    #[error("Please provide extracted data for analysis.")]
    MissingExtractedData,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Both fields must be present; their values are not checked
    pub fn validate(&self) -> Result<(), FormError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(FormError::MissingCredentials);
        }
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WipeAccuracyForm {
    pub wipe_log_data_uri: String,
}

impl WipeAccuracyForm {
    pub fn validate(self) -> Result<WipeAccuracyInput, FormError> {
        if self.wipe_log_data_uri.is_empty() {
            return Err(FormError::MissingWipeLog);
        }
        Ok(WipeAccuracyInput {
            wipe_log_data_uri: self.wipe_log_data_uri,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecoveryPotentialForm {
    pub device_image_uri: String,
    pub wipe_accuracy_report: String,
    pub device_description: String,
}

impl RecoveryPotentialForm {
    pub fn validate(self) -> Result<RecoveryPotentialInput, FormError> {
        if self.device_image_uri.is_empty() {
            return Err(FormError::MissingDeviceImage);
        }
        if self.device_description.trim().is_empty() {
            return Err(FormError::MissingDeviceDescription);
        }
        Ok(RecoveryPotentialInput {
            device_image_uri: self.device_image_uri,
            wipe_accuracy_report: self.wipe_accuracy_report,
            device_description: self.device_description,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThreatDetectionForm {
    pub extracted_data: String,
}

impl ThreatDetectionForm {
    pub fn validate(self) -> Result<ThreatDetectionInput, FormError> {
        if self.extracted_data.trim().is_empty() {
            return Err(FormError::MissingExtractedData);
        }
        Ok(ThreatDetectionInput {
            extracted_data: self.extracted_data,
        })
    }
}

/// Upload step of the simulation; an empty `dataUri` clears the file
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UploadForm {
    pub data_uri: String,
    pub file_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecoverForm {
    pub recovery_effort: RecoveryEffort,
}
