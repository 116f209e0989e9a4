//! Render-time filters

use tracing::trace;

use super::value::Value;
use crate::error::{CompilerError, Result};
use crate::translation::{replace_parameters, Parameters, TranslationExtension};

pub(crate) struct FilterCall<'a> {
    pub name: &'a str,
    pub operand: Value,
    pub arguments: Vec<Value>,
    pub lineno: usize,
}

pub(crate) fn apply(
    extension: &TranslationExtension,
    locale: Option<&str>,
    call: FilterCall<'_>,
) -> Result<Value> {
    trace!(filter = call.name, line = call.lineno, "applying filter");
    let FilterCall {
        name,
        operand,
        arguments,
        lineno,
    } = call;

    match name {
        "trans" => {
            let parameters = parameters_at(&arguments, 0, lineno)?;
            let domain = string_at(&arguments, 1, lineno)?;
            let locale = string_at(&arguments, 2, lineno)?.or(locale);
            Ok(Value::String(extension.trans(
                &operand.to_string(),
                &parameters,
                domain,
                locale,
            )))
        }
        "replace" => {
            let parameters = parameters_at(&arguments, 0, lineno)?;
            Ok(Value::String(replace_parameters(&operand.to_string(), &parameters)))
        }
        "desc" => Ok(extension.desc(operand)),
        "meaning" => Ok(extension.meaning(operand)),
        "upper" => Ok(Value::String(operand.to_string().to_uppercase())),
        "lower" => Ok(Value::String(operand.to_string().to_lowercase())),
        _ => Err(CompilerError::UnknownFilter {
            name: name.to_string(),
            line: lineno,
        }),
    }
}

/// Hash argument at `index` as interpolation parameters. A missing or null
/// argument is an empty set.
pub(crate) fn parameters_at(arguments: &[Value], index: usize, lineno: usize) -> Result<Parameters> {
    match arguments.get(index) {
        None | Some(Value::Null) => Ok(Parameters::new()),
        Some(Value::Map(map)) => Ok(map
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()),
        Some(other) => Err(CompilerError::invalid_argument(
            format!("expected a hash of parameters, got \"{}\"", other),
            lineno,
        )),
    }
}

/// String argument at `index`; a missing or null argument is `None`.
pub(crate) fn string_at(arguments: &[Value], index: usize, lineno: usize) -> Result<Option<&str>> {
    match arguments.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(CompilerError::invalid_argument(
            format!("expected a string, got \"{}\"", other),
            lineno,
        )),
    }
}
