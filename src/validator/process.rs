// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Validation delegated to an external program.
//!
//! The program receives the request as JSON on stdin and answers with a
//! verdict (`{"errors": {"field": ["message", ...]}}`) on stdout. A
//! non-zero exit status is a capability failure, not a field failure.

use std::io::Write;
use std::process::{Command, Stdio};

use super::request::{ValidationRequest, Verdict};
use super::responder::AsyncResponder;
use super::Validator;
use crate::config::ValidatorConfig;
use crate::error::{FormError, Result, ValidatorError};

/// Runs an external command for every validation request.
#[derive(Debug, Clone)]
pub struct ProcessValidator {
    program: String,
    args: Vec<String>,
}

impl ProcessValidator {
    /// Create a validator running `program` with `args`.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Create a validator from the `[validator]` table.
    pub fn from_config(config: &ValidatorConfig) -> Result<Self> {
        let program = config
            .command
            .clone()
            .ok_or(FormError::Validator(ValidatorError::NotConfigured))?;
        Ok(Self::new(program, config.args.clone()))
    }

    fn execution_failed(&self, message: String) -> FormError {
        FormError::Validator(ValidatorError::ExecutionFailed {
            name: self.program.clone(),
            message,
        })
    }

    fn run(&self, request: &ValidationRequest) -> Result<Verdict> {
        let payload = serde_json::to_vec(request).map_err(|e| {
            self.execution_failed(format!("Failed to encode request: {}", e))
        })?;

        tracing::debug!("Running validator {} {:?}", self.program, self.args);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.execution_failed(format!("Failed to start: {}", e)))?;

        // The request is written from its own thread while stdout and stderr
        // are drained, so a chatty program cannot fill a pipe and stall.
        let stdin = child.stdin.take();
        let (output, written) = std::thread::scope(|scope| {
            let writer = stdin.map(|mut stdin| scope.spawn(move || stdin.write_all(&payload)));
            let output = child.wait_with_output();
            let written = match writer {
                Some(handle) => handle.join().unwrap_or_else(|_| {
                    Err(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        "request writer panicked",
                    ))
                }),
                None => Ok(()),
            };
            (output, written)
        });

        let output =
            output.map_err(|e| self.execution_failed(format!("Failed to wait: {}", e)))?;

        // A program that exits without reading its input closes the pipe
        // early; its exit status and output still decide the outcome.
        if let Err(e) = written {
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(self.execution_failed(format!("Failed to write request: {}", e)));
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.execution_failed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        serde_json::from_slice(&output.stdout).map_err(|e| {
            FormError::Validator(ValidatorError::InvalidResponse {
                name: self.program.clone(),
                message: e.to_string(),
            })
        })
    }
}

impl Validator for ProcessValidator {
    fn name(&self) -> &str {
        &self.program
    }

    fn evaluate(&self, request: &ValidationRequest) -> Result<Verdict> {
        self.run(request)
    }

    fn evaluate_async(&self, request: ValidationRequest, responder: AsyncResponder) -> Result<()> {
        let validator = self.clone();
        std::thread::Builder::new()
            .name(format!("formcheck-validate-{}", responder.ticket()))
            .spawn(move || match validator.run(&request) {
                Ok(verdict) => responder.settle(verdict),
                Err(e) => responder.reject(e.to_string()),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldValue;
    use std::collections::{BTreeMap, HashMap};

    fn request() -> ValidationRequest {
        let mut data = BTreeMap::new();
        data.insert("email".to_string(), FieldValue::from("nope"));
        let mut rules = BTreeMap::new();
        rules.insert("email".to_string(), "email".to_string());
        ValidationRequest {
            data,
            rules,
            attribute_names: BTreeMap::new(),
            locale: "en".to_string(),
            messages: HashMap::new(),
            is_async: false,
        }
    }

    fn shell(script: &str) -> ProcessValidator {
        ProcessValidator::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[test]
    fn test_reads_verdict_from_stdout() {
        let validator = shell(
            r#"cat > /dev/null; echo '{"errors": {"email": ["The email format is invalid."]}}'"#,
        );
        let verdict = validator.evaluate(&request()).unwrap();
        assert_eq!(
            verdict.first_message_for("email"),
            Some("The email format is invalid.")
        );
    }

    #[test]
    fn test_request_is_written_to_stdin() {
        // Echo the request back as the verdict's message.
        let validator = shell(
            r#"body=$(cat); case "$body" in *'"email":"nope"'*) echo '{"errors":{"email":["seen"]}}';; *) echo '{}';; esac"#,
        );
        let verdict = validator.evaluate(&request()).unwrap();
        assert_eq!(verdict.first_message_for("email"), Some("seen"));
    }

    #[test]
    fn test_non_zero_exit_is_capability_error() {
        let validator = shell("cat > /dev/null; echo boom >&2; exit 3");
        let err = validator.evaluate(&request()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Validator(ValidatorError::ExecutionFailed { .. })
        ));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_large_stderr_before_reading_stdin() {
        // Well past a pipe buffer of stderr before the request is read.
        let validator = shell(
            r#"head -c 262144 /dev/zero >&2; cat > /dev/null; echo '{"errors": {}}'"#,
        );
        let mut request = request();
        request
            .data
            .insert("bio".to_string(), FieldValue::from("x".repeat(262144)));

        let verdict = validator.evaluate(&request).unwrap();
        assert!(!verdict.failed());
    }

    #[test]
    fn test_garbage_output_is_invalid_response() {
        let validator = shell("cat > /dev/null; echo not-json");
        let err = validator.evaluate(&request()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Validator(ValidatorError::InvalidResponse { .. })
        ));
    }

    #[test]
    fn test_from_config_requires_command() {
        let err = ProcessValidator::from_config(&ValidatorConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            FormError::Validator(ValidatorError::NotConfigured)
        ));
    }
}
