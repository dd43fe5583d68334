use super::{types::Config, ConfigError};
use crate::solver::{BatchConfig, CONSONANTS, VOWELS};

/// Validate configuration
///
/// Rejects settings the solver cannot run with: port 0, a word size outside
/// 1..=26, a zero attempt budget, an out-of-range present bias, batch fillers
/// that collide with their own letter class, and an empty model name when
/// suggestions are enabled.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(invalid("server.port cannot be 0"));
    }

    if !(1..=26).contains(&config.oracle.word_size) {
        return Err(invalid(format!(
            "oracle.word_size must be between 1 and 26, got {}",
            config.oracle.word_size
        )));
    }

    let solver = &config.solver;
    if solver.max_attempts == 0 {
        return Err(invalid("solver.max_attempts cannot be 0"));
    }
    if !(0.0..=1.0).contains(&solver.present_bias) {
        return Err(invalid(format!(
            "solver.present_bias must be between 0.0 and 1.0, got {}",
            solver.present_bias
        )));
    }
    if !solver.opening_letter.is_ascii_lowercase() {
        return Err(invalid("solver.opening_letter must be a lowercase letter"));
    }

    validate_batch(&config.batch)?;

    if config.suggestion.enabled && config.suggestion.model.trim().is_empty() {
        return Err(invalid("suggestion.model cannot be empty when suggestions are enabled"));
    }

    Ok(())
}

fn validate_batch(batch: &BatchConfig) -> Result<(), ConfigError> {
    if !batch.vowel_filler.is_ascii_lowercase() || VOWELS.contains(batch.vowel_filler) {
        return Err(invalid(format!(
            "batch.vowel_filler must be a lowercase non-vowel, got {:?}",
            batch.vowel_filler
        )));
    }
    if !batch.consonant_filler.is_ascii_lowercase() || CONSONANTS.contains(batch.consonant_filler)
    {
        return Err(invalid(format!(
            "batch.consonant_filler must be a lowercase vowel, got {:?}",
            batch.consonant_filler
        )));
    }
    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError(message.into())
}
