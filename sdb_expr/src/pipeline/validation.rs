use crate::logging::codes;

/// Validate that the pipeline is properly configured
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating expression pipeline configuration");

    // Compiles the shared rule table
    crate::lexical::init_lexical_analysis()?;

    let evaluation_codes = [
        codes::evaluation::EMPTY_OPERAND,
        codes::evaluation::INVALID_OPERAND,
        codes::evaluation::UNRESOLVED_REGISTER,
        codes::evaluation::DIVISION_BY_ZERO,
        codes::evaluation::LITERAL_OUT_OF_RANGE,
        codes::evaluation::MALFORMED_EXPRESSION,
        codes::evaluation::UNBALANCED_PARENTHESES,
        codes::evaluation::EXPRESSION_TOO_DEEP,
        codes::machine::UNREADABLE_ADDRESS,
    ];
    for code in &evaluation_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Evaluation error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Expression pipeline validation succeeded",
        "stages_validated" => 3,
        "word_bits" => crate::machine::WORD_BITS
    );

    Ok(())
}
