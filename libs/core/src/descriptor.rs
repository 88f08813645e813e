use crate::error::{Error, Result};
use crate::operation::Operation;

/// Wire-level value types known to the service interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Text,
}

/// Signature of a single remote method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: &'static str,
    pub params: &'static [ValueType],
    pub returns: ValueType,
}

/// Static declaration of the methods a service exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub methods: &'static [MethodSignature],
}

/// The workflow example service: `run_workflow(text) -> text`, `test() -> text`
pub const HELLO_WORLD: ServiceDescriptor = ServiceDescriptor {
    methods: &[
        MethodSignature {
            name: "run_workflow",
            params: &[ValueType::Text],
            returns: ValueType::Text,
        },
        MethodSignature {
            name: "test",
            params: &[],
            returns: ValueType::Text,
        },
    ],
};

impl ServiceDescriptor {
    pub fn method(&self, name: &str) -> Option<&'static MethodSignature> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Verify that an operation names a declared method with the right arity
    pub fn check(&self, op: &Operation) -> Result<&'static MethodSignature> {
        let signature = self
            .method(op.method_name())
            .ok_or_else(|| Error::UnknownMethod(op.method_name().to_string()))?;

        let actual = op.args().len();
        if actual != signature.params.len() {
            return Err(Error::ArityMismatch {
                method: signature.name,
                expected: signature.params.len(),
                actual,
            });
        }

        Ok(signature)
    }
}
