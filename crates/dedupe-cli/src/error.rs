use anyhow::Error;
use dedupe_config::ConfigError;
use dedupe_core::CoreError;
use dedupe_crm::CrmError;
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;
pub const EXIT_AMBIGUOUS: u8 = 4;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    ExitCode::from(exit_status(err))
}

fn exit_status(err: &Error) -> u8 {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
            };
        }
        if let Some(crm_err) = cause.downcast_ref::<CrmError>() {
            return crm_exit_code(crm_err);
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return config_exit_code(config_err);
        }
        if let Some(core_err) = cause.downcast_ref::<CoreError>() {
            return core_exit_code(core_err);
        }
    }
    EXIT_FAILURE
}

fn core_exit_code(err: &CoreError) -> u8 {
    match err {
        CoreError::AmbiguousMatch { .. } => EXIT_AMBIGUOUS,
        CoreError::InvalidContactId(_) | CoreError::InvalidPropertyName(_) => EXIT_INVALID_INPUT,
    }
}

fn crm_exit_code(err: &CrmError) -> u8 {
    match err {
        CrmError::Core(core) => core_exit_code(core),
        CrmError::Status { status: 404, .. } => EXIT_NOT_FOUND,
        CrmError::Status { .. } | CrmError::Decode(_) => EXIT_FAILURE,
        CrmError::Event(_) | CrmError::Unavailable(_) => EXIT_INVALID_INPUT,
        #[cfg(feature = "http-client")]
        CrmError::Http(_) => EXIT_FAILURE,
        #[cfg(feature = "http-client")]
        CrmError::Url(_) => EXIT_INVALID_INPUT,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InsecurePermissions(_)
        | ConfigError::InvalidBaseUrl(_)
        | ConfigError::InvalidTimeout { .. }
        | ConfigError::InvalidPropertyName { .. }
        | ConfigError::InvalidAccessTokenEnv(_)
        | ConfigError::MissingAccessToken(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
