//! Cross-check of @param tags against a function's formal arguments.
//!
//! Purely advisory: mismatches are logged and reported, never fatal.

use crate::model::{DocBlock, SignatureReport};

/// Compare `args` with the @param names accumulated in `doc`.
pub fn validate(function: &str, args: &[String], doc: &DocBlock) -> SignatureReport {
    let documented: Vec<&str> = doc.params.iter().map(|p| p.name.as_str()).collect();

    let missing_docs: Vec<String> = args
        .iter()
        .filter(|arg| !documented.contains(&arg.as_str()))
        .cloned()
        .collect();

    let missing_args: Vec<String> = documented
        .iter()
        .filter(|name| !args.iter().any(|arg| arg.as_str() == **name))
        .map(|name| name.to_string())
        .collect();

    if !missing_docs.is_empty() {
        log::warn!(
            "function {} missing @param tags for: {}",
            function,
            missing_docs.join(", ")
        );
    }
    if !missing_args.is_empty() {
        log::warn!(
            "function {} missing function arguments: {}",
            function,
            missing_args.join(", ")
        );
    }

    SignatureReport {
        function: function.to_string(),
        missing_docs,
        missing_args,
    }
}
