//! Host collaborator interfaces.

use core_types::Value;

/// The host's "evaluate source text" primitive.
///
/// `Err` carries the value the evaluated code threw, including syntax
/// errors reported by the host's compiler.
pub trait ScriptHost {
    /// Compiles and runs `source`, returning its completion value.
    fn evaluate(&mut self, source: &str) -> Result<Value, Value>;
}

impl<F> ScriptHost for F
where
    F: FnMut(&str) -> Result<Value, Value>,
{
    fn evaluate(&mut self, source: &str) -> Result<Value, Value> {
        self(source)
    }
}
